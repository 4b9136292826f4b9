//! Employee directory boundary.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::PayrollError;
use super::types::EmployeeRecord;

/// Read-only lookup of employees by normalized identifier.
///
/// Matching is exact and case-sensitive. `Ok(None)` means "not registered";
/// `Err` means the directory itself failed.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up one employee.
    async fn lookup(&self, identifier: &str) -> Result<Option<EmployeeRecord>, PayrollError>;
}

/// Directory held in memory, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    employees: HashMap<String, EmployeeRecord>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert(&mut self, record: EmployeeRecord) {
        self.employees.insert(record.identifier.clone(), record);
    }

    /// Number of registered employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if no employee is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl FromIterator<EmployeeRecord> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = EmployeeRecord>>(iter: I) -> Self {
        let mut directory = Self::new();
        for record in iter {
            directory.insert(record);
        }
        directory
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryDirectory {
    async fn lookup(&self, identifier: &str) -> Result<Option<EmployeeRecord>, PayrollError> {
        Ok(self.employees.get(identifier).cloned())
    }
}
