//! Application-wide session context.
//!
//! Replaces an ambient global auth context: the context is created with an
//! explicit [`start`](SessionContext::start), handed to whoever needs the
//! session, and torn down with [`shutdown`](SessionContext::shutdown).

use std::sync::Arc;

use strokerisk_core::auth::AuthService;
use strokerisk_core::session::{GateDecision, SessionGate, SessionState};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub struct SessionContext {
    auth: Arc<dyn AuthService>,
    sign_in_route: String,
    session: watch::Receiver<SessionState>,
    cancel: CancellationToken,
}

impl SessionContext {
    /// Subscribes to the backend's session stream.
    pub fn start(auth: Arc<dyn AuthService>, sign_in_route: impl Into<String>) -> Self {
        let session = auth.subscribe();
        info!("Session context started");
        Self {
            auth,
            sign_in_route: sign_in_route.into(),
            session,
            cancel: CancellationToken::new(),
        }
    }

    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.auth
    }

    /// Latest session state.
    pub fn current(&self) -> SessionState {
        self.session.borrow().clone()
    }

    /// A fresh receiver of session changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.clone()
    }

    /// Waits until the backend has reported at least once.
    ///
    /// Returns the state seen at that point, or the last state if the
    /// backend went away before settling.
    pub async fn wait_until_settled(&self) -> SessionState {
        let mut session = self.session.clone();
        match session.wait_for(|state| !state.is_settling()).await {
            Ok(state) => state.clone(),
            Err(_) => self.current(),
        }
    }

    /// Mounts a gated view.
    ///
    /// A background task feeds every session change through a fresh
    /// [`SessionGate`] and forwards each decision to the returned handle,
    /// starting with the decision for the current state. It runs until the
    /// handle is unmounted or dropped; shutting down the context or closing
    /// the session stream also stops it.
    pub fn guard(&self) -> GuardHandle {
        let token = self.cancel.child_token();
        let (tx, rx) = mpsc::unbounded_channel();
        let mut session = self.session.clone();
        let mut gate = SessionGate::new(self.sign_in_route.clone());
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            loop {
                let decision = {
                    let state = session.borrow_and_update();
                    gate.observe(&state)
                };
                debug!("Gate decision: {:?}", decision);
                if tx.send(decision).is_err() {
                    break;
                }

                tokio::select! {
                    _ = task_token.cancelled() => break,
                    changed = session.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Gate task stopped");
        });

        GuardHandle {
            decisions: rx,
            token,
            task,
        }
    }

    /// Stops every gate task and drops the subscription.
    pub fn shutdown(self) {
        self.cancel.cancel();
        info!("Session context shut down");
    }
}

/// A mounted gated view, receiving gate decisions.
pub struct GuardHandle {
    decisions: mpsc::UnboundedReceiver<GateDecision>,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl GuardHandle {
    /// Next decision, or `None` once the gate task has stopped.
    pub async fn next_decision(&mut self) -> Option<GateDecision> {
        self.decisions.recv().await
    }

    /// Next decision if one is already queued.
    pub fn try_next_decision(&mut self) -> Option<GateDecision> {
        self.decisions.try_recv().ok()
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled() && !self.task.is_finished()
    }

    /// Stops the gate task and waits for it to finish.
    pub async fn unmount(mut self) {
        self.token.cancel();
        let _ = (&mut self.task).await;
    }
}

impl Drop for GuardHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
