use crate::core::submission::{SubmissionCompletion, SubmissionRequest};
use crate::task::submitter::Submitter;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One worker thread per submission.
    #[default]
    Threaded,
    /// Run on the calling thread; the completion is queued for the next drain.
    Inline,
}

/// Runs submissions and hands completions back to the event loop.
pub struct SubmissionExecutor {
    submitter: Arc<dyn Submitter>,
    mode: ExecutionMode,
    completion_tx: Sender<SubmissionCompletion>,
    completion_rx: Receiver<SubmissionCompletion>,
}

impl SubmissionExecutor {
    pub fn new(submitter: Arc<dyn Submitter>, mode: ExecutionMode) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<SubmissionCompletion>();
        Self {
            submitter,
            mode,
            completion_tx,
            completion_rx,
        }
    }

    pub fn threaded(submitter: Arc<dyn Submitter>) -> Self {
        Self::new(submitter, ExecutionMode::Threaded)
    }

    pub fn inline(submitter: Arc<dyn Submitter>) -> Self {
        Self::new(submitter, ExecutionMode::Inline)
    }

    pub fn spawn(&self, request: SubmissionRequest) {
        debug!(form = %request.form_id, sequence = request.sequence, mode = ?self.mode, "dispatching submission");
        match self.mode {
            ExecutionMode::Inline => {
                let completion = SubmissionCompletion::new(&request, self.submitter.submit(&request));
                let _ = self.completion_tx.send(completion);
            }
            ExecutionMode::Threaded => {
                let submitter = Arc::clone(&self.submitter);
                let completion_tx = self.completion_tx.clone();
                let spawned = std::thread::Builder::new()
                    .name(format!("submit-{}", request.form_id))
                    .spawn(move || {
                        let completion =
                            SubmissionCompletion::new(&request, submitter.submit(&request));
                        let _ = completion_tx.send(completion);
                    });
                if let Err(err) = spawned {
                    warn!(error = %err, "could not start submission worker");
                }
            }
        }
    }

    pub fn drain_ready(&self) -> Vec<SubmissionCompletion> {
        let mut out = Vec::<SubmissionCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}
