use crate::Error;

/// Observer of workflow changes. The workflow never owns its subscribers'
/// behavior; a real UI and a test harness subscribe the same way.
pub trait WorkflowListener {
    fn on_row_updated(&self, _contact_id: &str) {}
    fn on_row_removed(&self, _contact_id: &str) {}
    fn on_error(&self, _error: &Error) {}
}
