use std::sync::mpsc;
use std::thread;

use chat_core::{AgentReply, Effect, Msg, QueryOutcome, UploadOutcome};
use chat_engine::{EngineEvent, EngineEvents, EngineHandle};
use chat_logging::{chat_error, chat_info, chat_warn};

pub struct EffectRunner {
    engine: EngineHandle,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, events: EngineEvents, msg_tx: mpsc::Sender<Msg>) -> Self {
        spawn_event_loop(events, msg_tx.clone());
        Self { engine, msg_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let sent = match &effect {
                Effect::SendQuery { request_id, text } => {
                    chat_info!(
                        "SendQuery request_id={} text={}",
                        request_id,
                        chat_logging::preview(text, 60)
                    );
                    self.engine.ask(*request_id, text.clone())
                }
                Effect::UploadPdf { path } => {
                    chat_info!("UploadPdf path={:?}", path);
                    self.engine.upload(path.clone())
                }
            };
            // A stopped engine never answers, so answer on its behalf.
            if let Err(err) = sent {
                chat_error!("Effect not started: {}", err);
                let _ = self.msg_tx.send(failed_msg(&effect));
            }
        }
    }
}

/// The completion message for an effect that could not be started.
fn failed_msg(effect: &Effect) -> Msg {
    match effect {
        Effect::SendQuery { request_id, .. } => Msg::QueryCompleted {
            request_id: *request_id,
            outcome: QueryOutcome::RequestFailed,
        },
        Effect::UploadPdf { .. } => Msg::UploadCompleted {
            outcome: UploadOutcome::RequestFailed,
        },
    }
}

fn spawn_event_loop(events: EngineEvents, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if msg_tx.send(map_event(event)).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::QueryCompleted { request_id, result } => {
            let outcome = match result {
                Ok(response) => {
                    let (reply, sources) = response.into_parts();
                    QueryOutcome::Answered(AgentReply { reply, sources })
                }
                Err(err) => {
                    chat_warn!("Query {} failed: {}", request_id, err);
                    QueryOutcome::RequestFailed
                }
            };
            Msg::QueryCompleted {
                request_id,
                outcome,
            }
        }
        EngineEvent::UploadCompleted { result } => {
            let outcome = match result {
                Ok(response) => match response.error() {
                    Some(error) => {
                        chat_warn!("Upload rejected: {}", error);
                        UploadOutcome::Rejected {
                            error: error.to_string(),
                        }
                    }
                    None => {
                        if let Some(message) = &response.message {
                            chat_info!("Upload accepted: {}", message);
                        }
                        UploadOutcome::Accepted
                    }
                },
                Err(err) => {
                    chat_warn!("Upload failed: {}", err);
                    UploadOutcome::RequestFailed
                }
            };
            Msg::UploadCompleted { outcome }
        }
    }
}
