//! Employee repository: the persistent employee directory.

use async_trait::async_trait;
use chrono::NaiveDate;
use nomina_core::payroll::{EmployeeDirectory, EmployeeRecord, PayrollError};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use tracing::error;
use uuid::Uuid;

use crate::entities::employees;

/// Error types for employee operations.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    /// National id must be non-empty digits.
    #[error("National id must contain only digits: {0:?}")]
    InvalidNationalId(String),

    /// Base salary must be positive.
    #[error("Base salary must be positive")]
    NonPositiveSalary,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or updating an employee by national id.
#[derive(Debug, Clone)]
pub struct UpsertEmployeeInput {
    /// Digits-only national id.
    pub national_id: String,
    /// Display name.
    pub full_name: String,
    /// Job title.
    pub position: String,
    /// Monthly base salary in the primary currency.
    pub base_salary: Decimal,
    /// Hire date.
    pub hired_on: NaiveDate,
}

/// Employee repository for directory operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an employee by exact national id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_national_id(
        &self,
        national_id: &str,
    ) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::NationalId.eq(national_id))
            .one(&self.db)
            .await
    }

    /// Inserts an employee, or updates salary, name and position when the
    /// national id already exists. The hire date is kept on update.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - National id is empty or not all digits
    /// - Base salary is not positive
    /// - The database write fails
    pub async fn upsert(
        &self,
        input: UpsertEmployeeInput,
    ) -> Result<employees::Model, EmployeeError> {
        validate_national_id(&input.national_id)?;
        if input.base_salary <= Decimal::ZERO {
            return Err(EmployeeError::NonPositiveSalary);
        }

        let now = chrono::Utc::now().into();
        let model = employees::ActiveModel {
            id: Set(Uuid::now_v7()),
            national_id: Set(input.national_id),
            full_name: Set(input.full_name),
            position: Set(input.position),
            base_salary: Set(input.base_salary),
            hired_on: Set(input.hired_on),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let on_conflict = OnConflict::column(employees::Column::NationalId)
            .update_columns([
                employees::Column::FullName,
                employees::Column::Position,
                employees::Column::BaseSalary,
                employees::Column::UpdatedAt,
            ])
            .to_owned();

        let saved = employees::Entity::insert(model)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await?;

        Ok(saved)
    }
}

#[async_trait]
impl EmployeeDirectory for EmployeeRepository {
    async fn lookup(&self, identifier: &str) -> Result<Option<EmployeeRecord>, PayrollError> {
        let found = self.find_by_national_id(identifier).await.map_err(|e| {
            error!(identifier = %identifier, error = %e, "Employee directory lookup failed");
            PayrollError::Directory(e.to_string())
        })?;
        Ok(found.map(EmployeeRecord::from))
    }
}

impl From<employees::Model> for EmployeeRecord {
    fn from(model: employees::Model) -> Self {
        Self {
            identifier: model.national_id,
            name: model.full_name,
            base_salary: model.base_salary,
        }
    }
}

fn validate_national_id(national_id: &str) -> Result<(), EmployeeError> {
    if national_id.is_empty() || !national_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EmployeeError::InvalidNationalId(national_id.to_string()));
    }
    Ok(())
}
