//! Contact Module - Form submission state machine
//!
//! ```text
//! Idle ──submit──▶ Sending ──ok──▶ Sent ───┐
//!                     │                    ├──(revert delay)──▶ Idle
//!                     └────err──▶ Failed ──┘
//! ```
//!
//! The relay call itself happens outside this module: `submit` hands back a
//! `SendRequest` for the transport and `complete` takes its result. Each send
//! carries a ticket so a late completion from a superseded send is dropped.
//!
//! Re-entrancy:
//! - submit while `Sending` is rejected
//! - submit while `Sent`/`Failed` cancels the pending revert and starts over

use std::time::Instant;

use tracing::{error, info, warn};

use crate::config::ContactConfig;
use crate::error::RelayError;
use crate::state::timer::RevertTimer;

// =============================================================================
// TYPES
// =============================================================================

/// Submit button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
}

/// Identifies one send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SendTicket(pub u64);

/// Form field data as name/value pairs, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the relay receives. Passed through without interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub ticket: SendTicket,
    pub service_id: String,
    pub template_id: String,
    pub fields: FormFields,
}

/// Result of a submit attempt. Default form navigation is suppressed either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started(SendRequest),
    /// A send is already in flight.
    Busy,
}

/// Result of a relay completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Clear the form and show `notice`.
    Sent { notice: String },
    /// Show `notice`, which embeds the raw error.
    Failed { notice: String, error: RelayError },
    /// Completion for a send that is no longer current.
    Stale,
}

// =============================================================================
// CONTACT FORM
// =============================================================================

#[derive(Debug, Clone)]
pub struct ContactForm {
    config: ContactConfig,
    state: SendState,
    revert: RevertTimer,
    next_ticket: u64,
    in_flight: Option<SendTicket>,
}

impl ContactForm {
    pub fn new(config: ContactConfig) -> Self {
        let revert = RevertTimer::new(config.revert_after());
        Self {
            config,
            state: SendState::Idle,
            revert,
            next_ticket: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> SendState {
        self.state
    }

    pub fn revert_pending(&self) -> bool {
        self.revert.is_pending()
    }

    /// Label markup for `state`.
    pub fn label_for(config: &ContactConfig, state: SendState) -> &str {
        match state {
            SendState::Idle => &config.labels.idle,
            SendState::Sending => &config.labels.sending,
            SendState::Sent => &config.labels.sent,
            SendState::Failed => &config.labels.failed,
        }
    }

    pub fn label(&self) -> &str {
        Self::label_for(&self.config, self.state)
    }

    /// Form submitted.
    pub fn submit(&mut self, fields: FormFields) -> SubmitOutcome {
        if self.state == SendState::Sending {
            warn!(ticket = ?self.in_flight, "submit ignored while a send is in flight");
            return SubmitOutcome::Busy;
        }

        if self.revert.cancel() {
            info!("resubmitted before label revert; pending revert cancelled");
        }

        let ticket = SendTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.state = SendState::Sending;

        info!(ticket = ticket.0, fields = fields.len(), "sending contact form");
        SubmitOutcome::Started(SendRequest {
            ticket,
            service_id: self.config.service_id.clone(),
            template_id: self.config.template_id.clone(),
            fields,
        })
    }

    /// Relay finished.
    pub fn complete(
        &mut self,
        ticket: SendTicket,
        result: Result<(), RelayError>,
        now: Instant,
    ) -> Completion {
        if self.in_flight != Some(ticket) {
            warn!(ticket = ticket.0, current = ?self.in_flight, "dropping stale send completion");
            return Completion::Stale;
        }
        self.in_flight = None;
        self.revert.schedule(now);

        match result {
            Ok(()) => {
                info!(ticket = ticket.0, "contact form sent");
                self.state = SendState::Sent;
                Completion::Sent {
                    notice: self.config.success_message.clone(),
                }
            }
            Err(err) => {
                error!(ticket = ticket.0, error = %err, "relay send failed");
                self.state = SendState::Failed;
                Completion::Failed {
                    notice: format!("{}{}", self.config.failure_prefix, err.payload),
                    error: err,
                }
            }
        }
    }

    /// Advance the revert timer. Returns true if the label went back to idle.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.revert.fire_if_due(now) {
            self.state = SendState::Idle;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn form() -> ContactForm {
        ContactForm::new(ContactConfig::default())
    }

    fn fields() -> FormFields {
        FormFields::new()
            .with("name", "Ada")
            .with("email", "ada@example.com")
            .with("message", "Hello")
    }

    fn started(outcome: SubmitOutcome) -> SendRequest {
        match outcome {
            SubmitOutcome::Started(request) => request,
            SubmitOutcome::Busy => panic!("expected a started send"),
        }
    }

    #[test]
    fn test_submit_builds_pass_through_request() {
        let mut f = form();
        let request = started(f.submit(fields()));

        assert_eq!(f.state(), SendState::Sending);
        assert_eq!(f.label(), "<span>Sending...</span>");
        assert_eq!(request.service_id, "service_7r1oh9f");
        assert_eq!(request.template_id, "template_6csi4fe");
        assert_eq!(request.fields.get("email"), Some("ada@example.com"));
    }

    #[test]
    fn test_success_then_revert() {
        let start = Instant::now();
        let mut f = form();
        let request = started(f.submit(fields()));

        let done = f.complete(request.ticket, Ok(()), start);
        assert_eq!(
            done,
            Completion::Sent {
                notice: "Message sent successfully! I will get back to you soon.".to_string()
            }
        );
        assert_eq!(f.state(), SendState::Sent);

        assert!(!f.tick(start + Duration::from_millis(2999)));
        assert!(f.tick(start + Duration::from_millis(3000)));
        assert_eq!(f.state(), SendState::Idle);
        assert_eq!(f.label(), "<span>Send Message</span>");
    }

    #[test]
    fn test_failure_surfaces_raw_payload() {
        let start = Instant::now();
        let mut f = form();
        let request = started(f.submit(fields()));

        let raw = r#"{"status":412,"text":"The Public Key is invalid"}"#;
        match f.complete(request.ticket, Err(RelayError::new(raw)), start) {
            Completion::Failed { notice, error } => {
                assert_eq!(notice, format!("Failed to send! Error: {raw}"));
                assert_eq!(error.payload, raw);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(f.state(), SendState::Failed);
        assert!(f.tick(start + Duration::from_secs(3)));
        assert_eq!(f.state(), SendState::Idle);
    }

    #[test]
    fn test_submit_while_sending_is_busy() {
        let mut f = form();
        let first = started(f.submit(fields()));
        assert_eq!(f.submit(fields()), SubmitOutcome::Busy);
        assert_eq!(f.state(), SendState::Sending);

        // The first send still completes normally
        let done = f.complete(first.ticket, Ok(()), Instant::now());
        assert!(matches!(done, Completion::Sent { .. }));
    }

    #[test]
    fn test_resubmit_cancels_stale_revert() {
        let start = Instant::now();
        let mut f = form();
        let first = started(f.submit(fields()));
        f.complete(first.ticket, Ok(()), start);

        let second = started(f.submit(fields()));
        assert!(!f.revert_pending());
        assert_ne!(first.ticket, second.ticket);

        // The first send's revert would have fired here
        assert!(!f.tick(start + Duration::from_secs(3)));
        assert_eq!(f.state(), SendState::Sending);
    }

    #[test]
    fn test_stale_completion_ignored() {
        let start = Instant::now();
        let mut f = form();
        let first = started(f.submit(fields()));
        f.complete(first.ticket, Err(RelayError::new("timeout")), start);
        let second = started(f.submit(fields()));

        assert_eq!(f.complete(first.ticket, Ok(()), start), Completion::Stale);
        assert_eq!(f.state(), SendState::Sending);

        assert!(matches!(
            f.complete(second.ticket, Ok(()), start),
            Completion::Sent { .. }
        ));
    }
}
