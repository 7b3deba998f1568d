//! Executes the manager's requests off the UI thread.
//!
//! Each `Pending` gets its own short-lived thread sharing one ureq agent, so
//! independent requests (a delete while a create is out) run concurrently.
//! Outcomes come back over an mpsc channel that the event loop drains
//! between frames.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Operation, Pending};
use tracing::{debug, warn};

/// The outcome of one executed request.
#[derive(Debug)]
pub struct Completion {
    pub op: Operation,
    pub outcome: Result<HttpResponse, ApiError>,
}

#[derive(Clone)]
pub struct Executor {
    agent: ureq::Agent,
    tx: Sender<Completion>,
}

impl Executor {
    pub fn new(timeout: Duration, tx: Sender<Completion>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, tx }
    }

    pub fn dispatch(&self, pending: Pending) {
        let agent = self.agent.clone();
        let tx = self.tx.clone();
        let Pending { op, request } = pending;
        debug!(%op, method = %request.method, url = %request.url, "dispatching");
        thread::spawn(move || {
            let outcome = execute(&agent, request);
            if let Err(e) = &outcome {
                warn!(%op, error = %e, "request did not complete");
            }
            // The receiver is gone only when the UI has exited.
            let _ = tx.send(Completion { op, outcome });
        });
    }
}

/// Execute an `HttpRequest` with ureq. Non-2xx statuses come back as data;
/// only transport failures become `Err`.
pub fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.url)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok(HttpResponse::new(status, body))
}
