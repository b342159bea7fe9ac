use std::sync::Arc;

use parentcheck_client::ParentApi;
use parentcheck_core::{ClearRequest, LookupRequest};
use tracing::error;

use crate::app::App;
use crate::worker::{self, WorkerError};

#[derive(Debug, Clone)]
pub enum Action {
    Lookup(LookupRequest),
    Clear(ClearRequest),
}

/// Starts the worker for a request the controller handed out. If the worker
/// cannot start, the request completes as failed so the busy flag resets.
pub fn execute_action(app: &mut App, api: &Arc<dyn ParentApi>, action: Action) {
    match action {
        Action::Lookup(request) => match worker::spawn_lookup(Arc::clone(api), request.email) {
            Ok(pending) => app.set_pending(pending),
            Err(err) => {
                error!(error = %err, "lookup worker failed to start");
                app.view
                    .complete_lookup(Err(WorkerError::from(err)), &mut app.toasts);
                app.sync_focus();
            }
        },
        Action::Clear(request) => match worker::spawn_clear(Arc::clone(api), request.parent_id) {
            Ok(pending) => app.set_pending(pending),
            Err(err) => {
                error!(error = %err, "clear worker failed to start");
                app.view
                    .complete_clear(Err(WorkerError::from(err)), &mut app.toasts);
                app.sync_focus();
            }
        },
    }
}
