use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use spreadwatch::port::{AlertPayload, AlertTransport, TransportError, TransportResponse};

/// Transport that records payloads and replays scripted results.
///
/// Once the script runs out every send answers 204.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<AlertPayload>>>,
    script: Arc<Mutex<VecDeque<Result<TransportResponse, TransportError>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(script: Vec<Result<TransportResponse, TransportError>>) -> Self {
        Self {
            sent: Arc::default(),
            script: Arc::new(Mutex::new(script.into())),
        }
    }

    pub fn len(&self) -> usize {
        self.sent.lock().expect("lock sent").len()
    }

    pub fn payloads(&self) -> Vec<AlertPayload> {
        self.sent.lock().expect("lock sent").clone()
    }
}

pub fn status(status: u16) -> Result<TransportResponse, TransportError> {
    Ok(TransportResponse {
        status,
        retry_after: None,
    })
}

#[async_trait]
impl AlertTransport for RecordingTransport {
    async fn send(&self, payload: &AlertPayload) -> Result<TransportResponse, TransportError> {
        self.sent.lock().expect("lock sent").push(payload.clone());
        self.script
            .lock()
            .expect("lock script")
            .pop_front()
            .unwrap_or_else(|| status(204))
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
