//! In-memory dedup state for sent notifications

/// The most recently sent status message and error message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub last_message: Option<String>,
    pub last_error: Option<String>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a status message, returning true if it differs from the last one
    pub fn update_message(&mut self, message: &str) -> bool {
        replace_if_changed(&mut self.last_message, message)
    }

    /// Record an error message, returning true if it differs from the last one
    pub fn update_error(&mut self, error: &str) -> bool {
        replace_if_changed(&mut self.last_error, error)
    }
}

fn replace_if_changed(slot: &mut Option<String>, value: &str) -> bool {
    if slot.as_deref() == Some(value) {
        return false;
    }
    *slot = Some(value.to_string());
    true
}
