//! Per-call lifecycle tracking.
//!
//! Every [`Command::invoke`](crate::Command::invoke) walks one
//! [`Invocation`] through `idle -> sent -> {succeeded, failed, disconnected}`.
//! The current state is mirrored onto the `menupath.state` field of the
//! active tracing span.

use std::time::{Duration, Instant};

use strum::Display;
use tracing::{Span, trace};

use crate::error::TransportError;
use crate::path::TransportAddress;

/// Where a single command invocation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum InvocationState {
    /// Created, nothing sent yet.
    Idle,
    /// Handed to the transport, awaiting the outcome.
    Sent,
    Succeeded,
    /// The engine (or the transport on its behalf) rejected the call.
    Failed,
    /// The engine could not be reached.
    Disconnected,
}

impl InvocationState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Sent => "sent",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Disconnected => "disconnected",
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Disconnected)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: InvocationState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Sent)
                | (Self::Sent, Self::Succeeded)
                | (Self::Sent, Self::Failed)
                | (Self::Sent, Self::Disconnected)
        )
    }
}

/// One command call against one address.
#[derive(Debug, Clone)]
pub struct Invocation {
    address: TransportAddress,
    state: InvocationState,
    sent_at: Option<Instant>,
    settled_at: Option<Instant>,
}

impl Invocation {
    pub fn new(address: TransportAddress) -> Self {
        Self {
            address,
            state: InvocationState::Idle,
            sent_at: None,
            settled_at: None,
        }
    }

    pub fn address(&self) -> &TransportAddress {
        &self.address
    }

    pub fn state(&self) -> InvocationState {
        self.state
    }

    /// Records that the call has been handed to the transport.
    pub fn mark_sent(&mut self) {
        self.sent_at = Some(Instant::now());
        self.advance(InvocationState::Sent);
    }

    /// Records the transport's outcome and returns the terminal state.
    pub fn settle<T>(&mut self, outcome: &Result<T, TransportError>) -> InvocationState {
        let next = match outcome {
            Ok(_) => InvocationState::Succeeded,
            Err(TransportError::Disconnected { .. }) => InvocationState::Disconnected,
            Err(TransportError::Remote(_)) => InvocationState::Failed,
        };
        self.settled_at = Some(Instant::now());
        self.advance(next);
        next
    }

    /// Time between sending and settling, once both have happened.
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.sent_at, self.settled_at) {
            (Some(sent), Some(settled)) => Some(settled.duration_since(sent)),
            _ => None,
        }
    }

    fn advance(&mut self, next: InvocationState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal invocation transition {} -> {}",
            self.state,
            next
        );
        trace!(from = %self.state, to = %next, address = %self.address, "invocation transition");
        self.state = next;
        Span::current().record("menupath.state", next.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::path::{Path, PathSegment, flatten};

    fn address() -> TransportAddress {
        let path = Path::root().join(PathSegment::new("report")).join(PathSegment::new("quality"));
        flatten(&path).unwrap()
    }

    #[test]
    fn starts_idle() {
        let invocation = Invocation::new(address());
        assert_eq!(invocation.state(), InvocationState::Idle);
        assert!(invocation.elapsed().is_none());
    }

    #[test]
    fn success_path() {
        let mut invocation = Invocation::new(address());
        invocation.mark_sent();
        assert_eq!(invocation.state(), InvocationState::Sent);
        let state = invocation.settle::<()>(&Ok(()));
        assert_eq!(state, InvocationState::Succeeded);
        assert!(invocation.elapsed().is_some());
    }

    #[test]
    fn remote_rejection_is_failed() {
        let mut invocation = Invocation::new(address());
        invocation.mark_sent();
        let outcome: Result<(), _> = Err(RemoteError::new("bad zone").into());
        assert_eq!(invocation.settle(&outcome), InvocationState::Failed);
    }

    #[test]
    fn lost_engine_is_disconnected() {
        let mut invocation = Invocation::new(address());
        invocation.mark_sent();
        let outcome: Result<(), _> = Err(TransportError::disconnected("socket closed"));
        assert_eq!(invocation.settle(&outcome), InvocationState::Disconnected);
    }

    #[test]
    fn transitions() {
        use InvocationState::*;
        assert!(Idle.can_advance_to(Sent));
        assert!(!Idle.can_advance_to(Succeeded));
        assert!(!Succeeded.can_advance_to(Sent));
        assert!(Disconnected.is_terminal());
        assert!(!Sent.is_terminal());
        assert_eq!(Disconnected.to_string(), "disconnected");
        assert_eq!(Succeeded.as_str(), Succeeded.to_string());
    }
}
