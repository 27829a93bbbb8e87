use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfirmKind {
    #[default]
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub kind: ConfirmKind,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind: ConfirmKind::Info,
            confirm_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    pub fn kind(mut self, kind: ConfirmKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub ticket: u64,
    pub accepted: bool,
}

/// Yes/no gate in front of destructive operations.
///
/// Requests are queued first-in first-out; a request made while another is
/// pending waits behind it instead of overwriting it, so no resolution is
/// ever dropped. Cancellation and backdrop dismissal are both the `false`
/// decision. A pending request waits indefinitely; there is no timeout.
#[derive(Debug, Default)]
pub struct ConfirmGate {
    queue: VecDeque<(u64, ConfirmRequest)>,
    next_ticket: u64,
}

impl ConfirmGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a request and returns its ticket for correlating the decision.
    pub fn request(&mut self, request: ConfirmRequest) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.queue.push_back((ticket, request));
        ticket
    }

    /// The request currently awaiting an answer, front of the queue.
    pub fn current(&self) -> Option<(u64, &ConfirmRequest)> {
        self.queue.front().map(|(ticket, request)| (*ticket, request))
    }

    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Answers the front request. Returns `None` when nothing is pending.
    pub fn resolve(&mut self, accepted: bool) -> Option<Decision> {
        self.queue
            .pop_front()
            .map(|(ticket, _)| Decision { ticket, accepted })
    }

    pub fn dismiss(&mut self) -> Option<Decision> {
        self.resolve(false)
    }
}
