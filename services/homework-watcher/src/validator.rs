//! Shape checks on the review API payload

use serde_json::Value;

use crate::api_client::FetchResponse;

/// One homework submission as returned by the API
pub type SubmissionRecord = serde_json::Map<String, Value>;

/// Reasons a payload is rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("response has no 'homeworks' key")]
    MissingHomeworks,

    #[error("'homeworks' is not a list")]
    HomeworksNotAList,

    #[error("homeworks list is empty")]
    EmptyHomeworks,

    #[error("latest homework is not a JSON object")]
    RecordNotAnObject,
}

/// Return the most recent submission (index 0; the API sorts newest first)
pub fn extract(payload: &FetchResponse) -> Result<SubmissionRecord, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;
    let homeworks = object
        .get("homeworks")
        .ok_or(ValidationError::MissingHomeworks)?
        .as_array()
        .ok_or(ValidationError::HomeworksNotAList)?;

    let latest = homeworks.first().ok_or(ValidationError::EmptyHomeworks)?;
    latest
        .as_object()
        .cloned()
        .ok_or(ValidationError::RecordNotAnObject)
}
