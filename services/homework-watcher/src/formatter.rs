//! Turns a submission record into the notification text

use crate::status::ReviewStatus;
use crate::validator::SubmissionRecord;

/// Reasons a submission record cannot be formatted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("homework has no 'homework_name'")]
    MissingHomeworkName,

    #[error("homework has no 'status'")]
    MissingStatus,

    #[error("unknown review status '{0}'")]
    UnknownStatus(String),
}

/// Build `Changed review status for "<name>". <verdict>` for a record
pub fn format_status(record: &SubmissionRecord) -> Result<String, FormatError> {
    let homework_name = record
        .get("homework_name")
        .and_then(|v| v.as_str())
        .ok_or(FormatError::MissingHomeworkName)?;
    let code = record
        .get("status")
        .and_then(|v| v.as_str())
        .ok_or(FormatError::MissingStatus)?;
    let status =
        ReviewStatus::from_code(code).ok_or_else(|| FormatError::UnknownStatus(code.to_string()))?;

    Ok(format!(
        "Changed review status for \"{}\". {}",
        homework_name,
        status.verdict()
    ))
}
