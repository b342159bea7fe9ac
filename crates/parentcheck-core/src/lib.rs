pub mod controller;
pub mod domain;
pub mod error;
pub mod gate;
pub mod notice;
pub mod reply;

pub use controller::{ClearRequest, LookupRequest, ViewState};
pub use domain::*;
pub use error::CoreError;
pub use gate::ConfirmGate;
pub use notice::{messages, Notice, NoticeKind, Notify};
pub use reply::{classify_clear, classify_lookup, parse_body, ClearOutcome, HttpReply, LookupOutcome};
