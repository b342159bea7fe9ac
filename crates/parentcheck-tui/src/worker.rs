use std::io;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use parentcheck_client::{ClientError, ParentApi};
use parentcheck_core::{EmailAddress, HttpReply, ParentId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("request worker exited without a reply")]
    Disconnected,
    #[error("failed to start request worker: {0}")]
    Spawn(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Lookup,
    Clear,
}

#[derive(Debug)]
pub struct ApiEvent {
    pub kind: RequestKind,
    pub result: Result<HttpReply, WorkerError>,
}

/// One in-flight request: the receiving end of its worker's channel.
#[derive(Debug)]
pub struct Pending {
    pub kind: RequestKind,
    receiver: Receiver<ApiEvent>,
}

impl Pending {
    /// `None` while the worker is still running. A worker that hung up
    /// without sending completes as a failure.
    pub fn poll(&self) -> Option<ApiEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(ApiEvent {
                kind: self.kind,
                result: Err(WorkerError::Disconnected),
            }),
        }
    }
}

pub fn spawn_lookup(api: Arc<dyn ParentApi>, email: EmailAddress) -> io::Result<Pending> {
    spawn(RequestKind::Lookup, move || api.lookup(&email))
}

pub fn spawn_clear(api: Arc<dyn ParentApi>, parent_id: ParentId) -> io::Result<Pending> {
    spawn(RequestKind::Clear, move || api.clear(&parent_id))
}

fn spawn<F>(kind: RequestKind, call: F) -> io::Result<Pending>
where
    F: FnOnce() -> parentcheck_client::Result<HttpReply> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let name = match kind {
        RequestKind::Lookup => "parentcheck-lookup",
        RequestKind::Clear => "parentcheck-clear",
    };
    thread::Builder::new().name(name.to_string()).spawn(move || {
        let result = call().map_err(WorkerError::from);
        let _ = sender.send(ApiEvent { kind, result });
    })?;
    Ok(Pending { kind, receiver })
}

#[cfg(test)]
impl Pending {
    pub fn from_receiver(kind: RequestKind, receiver: Receiver<ApiEvent>) -> Self {
        Self { kind, receiver }
    }
}
