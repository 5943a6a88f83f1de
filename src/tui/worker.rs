//! Background worker for non-blocking API calls.
//!
//! Each dispatched request runs on its own thread and reports its
//! `Completion` over a channel that the TUI main loop polls every tick, so
//! the interface stays responsive while a request is pending.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{ApiRequest, Completion};
use crate::ports::{ApiError, HealthApi};

/// Result of polling a worker.
#[derive(Debug)]
pub enum WorkerPoll {
    Pending,
    Done(Completion),
}

/// Handle to a running request.
pub struct ApiWorkerHandle {
    name: &'static str,
    completion_rx: Receiver<Completion>,
    /// Delivered instead if the worker thread dies without reporting.
    fallback: Option<Completion>,
    _handle: JoinHandle<()>,
}

impl ApiWorkerHandle {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Non-blocking check for the completion.
    pub fn poll(&mut self) -> WorkerPoll {
        match self.completion_rx.try_recv() {
            Ok(completion) => WorkerPoll::Done(completion),
            Err(TryRecvError::Empty) => WorkerPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                tracing::error!(request = self.name, "API worker exited without a result");
                match self.fallback.take() {
                    Some(completion) => WorkerPoll::Done(completion),
                    None => WorkerPoll::Pending,
                }
            }
        }
    }
}

/// Spawns one thread per request.
pub struct ApiWorker;

impl ApiWorker {
    pub fn spawn(api: Arc<dyn HealthApi>, request: ApiRequest) -> ApiWorkerHandle {
        let name = request.name();
        let fallback = request.failed(ApiError::Transport("worker exited".to_string()));
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let completion = request.execute(api.as_ref());
            // The receiver is gone only if the app is shutting down.
            let _ = tx.send(completion);
        });

        ApiWorkerHandle {
            name,
            completion_rx: rx,
            fallback: Some(fallback),
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::domain::{AssessmentInput, AuthState, Credentials, HistoryRow};
    use crate::ports::{ClearReply, LoginReply, PredictReply};

    struct OfflineApi;

    impl HealthApi for OfflineApi {
        fn login(&self, _: &Credentials) -> Result<LoginReply, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
        fn logout(&self) -> Result<(), ApiError> {
            Ok(())
        }
        fn auth_status(&self) -> Result<AuthState, ApiError> {
            Ok(AuthState {
                logged_in: true,
                user: Some("sam".into()),
            })
        }
        fn predict(&self, _: &AssessmentInput) -> Result<PredictReply, ApiError> {
            Err(ApiError::Transport("offline".into()))
        }
        fn history(&self) -> Result<Vec<HistoryRow>, ApiError> {
            Ok(Vec::new())
        }
        fn clear_history(&self) -> Result<ClearReply, ApiError> {
            Ok(ClearReply::Unauthorized)
        }
    }

    fn wait(handle: &mut ApiWorkerHandle) -> Completion {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let WorkerPoll::Done(completion) = handle.poll() {
                return completion;
            }
            assert!(Instant::now() < deadline, "worker did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_worker_delivers_completion() {
        let api: Arc<dyn HealthApi> = Arc::new(OfflineApi);
        let mut handle = ApiWorker::spawn(api, ApiRequest::AuthStatus);
        assert_eq!(handle.name(), "auth-status");

        match wait(&mut handle) {
            Completion::AuthStatus(Ok(state)) => assert_eq!(state.user(), Some("sam")),
            other => panic!("unexpected completion: {:?}", other),
        }
    }

    #[test]
    fn test_worker_passes_errors_through() {
        let api: Arc<dyn HealthApi> = Arc::new(OfflineApi);
        let mut handle = ApiWorker::spawn(api, ApiRequest::ClearHistory);
        assert!(matches!(
            wait(&mut handle),
            Completion::ClearHistory(Ok(ClearReply::Unauthorized))
        ));
    }
}
