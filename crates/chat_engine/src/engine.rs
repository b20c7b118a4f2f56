use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chat_logging::chat_info;

use crate::client::{Backend, BackendSettings, ReqwestBackend};
use crate::{EngineError, EngineEvent, RequestId};

enum EngineCommand {
    Ask { request_id: RequestId, text: String },
    Upload { path: PathBuf },
}

/// Sends work to the engine thread. Each command runs as its own task, so a
/// slow request never holds up the next one.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side of the engine's completion events.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<(Self, EngineEvents), EngineError> {
        chat_info!("Backend base url: {}", settings.base_url);
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend))
    }

    /// Starts the engine thread. The runtime is built before the thread is
    /// spawned so a failure surfaces here instead of stranding every request.
    pub fn with_backend(backend: Arc<dyn Backend>) -> Result<(Self, EngineEvents), EngineError> {
        let runtime = tokio::runtime::Runtime::new().map_err(EngineError::Runtime)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut in_flight = Vec::new();
            while let Ok(command) = cmd_rx.recv() {
                in_flight.retain(|task: &tokio::task::JoinHandle<()>| !task.is_finished());
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                in_flight.push(runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                }));
            }
            // Handle dropped: report what is still running, then stop.
            runtime.block_on(async {
                for task in in_flight {
                    let _ = task.await;
                }
            });
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn ask(&self, request_id: RequestId, text: impl Into<String>) -> Result<(), EngineError> {
        self.send(EngineCommand::Ask {
            request_id,
            text: text.into(),
        })
    }

    pub fn upload(&self, path: impl Into<PathBuf>) -> Result<(), EngineError> {
        self.send(EngineCommand::Upload { path: path.into() })
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx.send(command).map_err(|_| EngineError::Stopped)
    }
}

impl EngineEvents {
    /// Blocks until the next event. `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Ask { request_id, text } => EngineEvent::QueryCompleted {
            request_id,
            result: backend.ask(&text).await,
        },
        EngineCommand::Upload { path } => EngineEvent::UploadCompleted {
            result: backend.upload_pdf(&path).await,
        },
    };
    let _ = event_tx.send(event);
}
