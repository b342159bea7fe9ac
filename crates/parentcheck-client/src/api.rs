use parentcheck_core::{EmailAddress, HttpReply, ParentId};

use crate::Result;

/// The two endpoint calls. Implementations report the transport status and
/// decoded body; classifying them is the controller's job.
pub trait ParentApi: Send + Sync {
    fn lookup(&self, email: &EmailAddress) -> Result<HttpReply>;
    fn clear(&self, parent_id: &ParentId) -> Result<HttpReply>;
}
