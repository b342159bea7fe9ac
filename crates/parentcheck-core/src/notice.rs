#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Outbound notification channel. Queuing and dismissal belong to the
/// implementor.
pub trait Notify {
    fn notify(&mut self, kind: NoticeKind, message: String);
}

impl Notify for Vec<Notice> {
    fn notify(&mut self, kind: NoticeKind, message: String) {
        self.push(Notice { kind, message });
    }
}

pub mod messages {
    pub const INVALID_EMAIL: &str = "Enter a valid email.";
    pub const PARENT_FOUND: &str = "Parent found.";
    pub const PARENT_NOT_FOUND: &str = "Parent not found for the given email.";
    pub const LOOKUP_NETWORK_ERROR: &str = "Network or server error during lookup.";
    pub const CLEARED: &str = "Data cleared successfully.";
    pub const CLEAR_NETWORK_ERROR: &str = "Network or server error during clear.";

    pub fn unexpected_response(status: u16) -> String {
        format!("Unexpected response (HTTP {status}).")
    }

    pub fn clear_failed(status: u16, message: &str) -> String {
        format!("Clear failed (HTTP {status}). {message}")
    }
}
