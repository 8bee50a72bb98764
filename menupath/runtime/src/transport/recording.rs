//! Recording transport for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::Transport;
use crate::error::TransportError;
use crate::path::TransportAddress;
use crate::value::{Kwargs, Value};

/// One call as seen by a [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Encoded address the call was sent to.
    pub address: TransportAddress,
    /// Positional arguments as received.
    pub args: Vec<Value>,
    /// Keyword arguments as received.
    pub kwargs: Kwargs,
}

/// Records every call and answers from a queue of scripted replies.
///
/// When the queue is empty each call succeeds with [`Value::Null`].
///
/// ## Examples
///
/// ```rust
/// use menupath_runtime::{RecordingTransport, TransportError, Value};
///
/// let transport = RecordingTransport::new();
/// transport.reply(Ok(Value::from("done")));
/// transport.reply(Err(TransportError::disconnected("session closed")));
/// assert_eq!(transport.call_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<VecDeque<Result<Value, TransportError>>>,
}

impl RecordingTransport {
    /// Creates a transport with no recorded calls and no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the reply for the next unanswered call.
    pub fn reply(&self, reply: Result<Value, TransportError>) {
        lock(&self.replies).push_back(reply);
    }

    /// All calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// The most recent call.
    pub fn last_call(&self) -> Option<RecordedCall> {
        lock(&self.calls).last().cloned()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(
        &self,
        address: &TransportAddress,
        args: &[Value],
        kwargs: &Kwargs,
    ) -> Result<Value, TransportError> {
        lock(&self.calls).push(RecordedCall {
            address: address.clone(),
            args: args.to_vec(),
            kwargs: kwargs.clone(),
        });
        lock(&self.replies).pop_front().unwrap_or(Ok(Value::Null))
    }
}
