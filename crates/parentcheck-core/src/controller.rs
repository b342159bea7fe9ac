use std::fmt;

use serde_json::Value;
use tracing::{debug, error};

use crate::domain::{EmailAddress, ParentId};
use crate::gate::ConfirmGate;
use crate::notice::{messages, NoticeKind, Notify};
use crate::reply::{classify_clear, classify_lookup, ClearOutcome, HttpReply, LookupOutcome};

/// Issued by [`ViewState::submit_lookup`]; the caller performs the POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub email: EmailAddress,
}

/// Issued by [`ViewState::confirm_clear`]; the caller performs the DELETE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearRequest {
    pub parent_id: ParentId,
}

/// All state behind the form. Every user action and every network completion
/// has exactly one entry point here.
///
/// Invariant: `busy` is set by the two methods that hand out a request and
/// cleared by the matching `complete_*`, so at most one request is in flight.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    email: String,
    busy: bool,
    parent_id: Option<ParentId>,
    raw: Option<Value>,
    inspector_open: bool,
    gate: ConfirmGate,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn parent_id(&self) -> Option<&ParentId> {
        self.parent_id.as_ref()
    }

    pub fn raw_response(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    pub fn gate(&self) -> &ConfirmGate {
        &self.gate
    }

    pub fn is_inspector_open(&self) -> bool {
        self.inspector_open
    }

    /// Replaces the email text. The field is disabled while busy.
    pub fn set_email(&mut self, text: impl Into<String>) -> bool {
        if self.busy {
            return false;
        }
        self.email = text.into();
        true
    }

    pub fn edit_email(&mut self, edit: impl FnOnce(&mut String)) -> bool {
        if self.busy {
            return false;
        }
        edit(&mut self.email);
        true
    }

    pub fn submit_lookup(&mut self, notify: &mut impl Notify) -> Option<LookupRequest> {
        if self.busy {
            return None;
        }
        self.parent_id = None;
        self.raw = None;
        self.inspector_open = false;

        let Ok(email) = EmailAddress::parse(&self.email) else {
            notify.notify(NoticeKind::Error, messages::INVALID_EMAIL.to_string());
            return None;
        };

        debug!(email = %email, "lookup started");
        self.busy = true;
        Some(LookupRequest { email })
    }

    pub fn complete_lookup<E: fmt::Display>(
        &mut self,
        result: Result<HttpReply, E>,
        notify: &mut impl Notify,
    ) {
        self.busy = false;
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                error!(error = %err, "lookup request failed");
                notify.notify(
                    NoticeKind::Error,
                    messages::LOOKUP_NETWORK_ERROR.to_string(),
                );
                return;
            }
        };

        let outcome = classify_lookup(&reply);
        self.raw = Some(reply.body.clone());
        match outcome {
            LookupOutcome::Found(parent_id) => {
                debug!(parent_id = %parent_id, "parent found");
                self.parent_id = Some(parent_id);
                notify.notify(NoticeKind::Success, messages::PARENT_FOUND.to_string());
            }
            LookupOutcome::NotFound => {
                notify.notify(NoticeKind::Error, messages::PARENT_NOT_FOUND.to_string());
            }
            LookupOutcome::Unexpected { status } => {
                debug!(status, body = %reply.body, "lookup unexpected");
                notify.notify(NoticeKind::Error, messages::unexpected_response(status));
            }
        }
    }

    /// Opens the confirmation gate for the stored parent id.
    pub fn request_clear(&mut self) -> bool {
        if self.busy || self.gate.is_visible() {
            return false;
        }
        let Some(parent_id) = self.parent_id.clone() else {
            return false;
        };
        self.gate.open(parent_id);
        true
    }

    /// The dialog's Cancel control, disabled while a request is in flight.
    pub fn cancel_clear(&mut self) -> bool {
        if self.busy || !self.gate.is_visible() {
            return false;
        }
        self.gate.close();
        true
    }

    /// A click outside the dialog. The overlay is never disabled.
    pub fn dismiss_clear(&mut self) -> bool {
        if !self.gate.is_visible() {
            return false;
        }
        self.gate.close();
        true
    }

    pub fn confirm_clear(&mut self) -> Option<ClearRequest> {
        if self.busy {
            return None;
        }
        let parent_id = self.gate.target()?.clone();
        debug!(parent_id = %parent_id, "clear started");
        self.busy = true;
        Some(ClearRequest { parent_id })
    }

    /// The stored parent id and found panel survive every outcome here; only
    /// a new lookup resets them.
    pub fn complete_clear<E: fmt::Display>(
        &mut self,
        result: Result<HttpReply, E>,
        notify: &mut impl Notify,
    ) {
        self.busy = false;
        self.gate.close();
        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                error!(error = %err, "clear request failed");
                notify.notify(NoticeKind::Error, messages::CLEAR_NETWORK_ERROR.to_string());
                return;
            }
        };

        let outcome = classify_clear(&reply);
        self.raw = Some(reply.body);
        match outcome {
            ClearOutcome::Cleared => {
                notify.notify(NoticeKind::Success, messages::CLEARED.to_string());
            }
            ClearOutcome::Failed { status, message } => {
                debug!(status, message = %message, "clear rejected");
                notify.notify(
                    NoticeKind::Error,
                    messages::clear_failed(status, &message),
                );
            }
        }
    }

    pub fn toggle_inspector(&mut self) -> bool {
        if self.raw.is_none() {
            return false;
        }
        self.inspector_open = !self.inspector_open;
        true
    }

    /// Two-space indented rendering of the last raw response.
    pub fn raw_pretty(&self) -> Option<String> {
        let raw = self.raw.as_ref()?;
        Some(serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string()))
    }
}
