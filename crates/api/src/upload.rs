//! Multipart payroll upload extraction.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use bytes::Bytes;
use nomina_core::payroll::PayrollError;
use nomina_shared::AppError;

use crate::ApiError;

/// Field names accepted for the workbook.
pub const FILE_FIELDS: &[&str] = &["file", "archivo"];

/// Field names accepted for the period token.
pub const PERIOD_FIELDS: &[&str] = &["period_id", "periodoId"];

/// Parts of a payroll upload form.
#[derive(Debug, Default)]
pub struct PayrollUpload {
    /// Workbook bytes.
    pub file: Option<Bytes>,
    /// Opaque period token.
    pub period_id: Option<String>,
}

impl PayrollUpload {
    /// Reads the form. Unknown fields are ignored; a repeated field keeps its last value.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut upload = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_string();
            if FILE_FIELDS.contains(&name.as_str()) {
                upload.file = Some(field.bytes().await.map_err(malformed)?);
            } else if PERIOD_FIELDS.contains(&name.as_str()) {
                upload.period_id = Some(field.text().await.map_err(malformed)?);
            }
        }

        Ok(upload)
    }

    /// Returns the workbook bytes.
    pub fn require_file(&self) -> Result<&[u8], PayrollError> {
        self.file.as_deref().ok_or(PayrollError::MissingUpload)
    }
}

fn malformed(err: MultipartError) -> ApiError {
    ApiError(AppError::Validation(err.body_text()))
}
