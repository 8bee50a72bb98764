//! Navigation handles.
//!
//! A [`MenuNode`] pairs an immutable [`Path`] with the session's
//! [`TransportHandle`]. Moving to a child never mutates the parent, so the
//! same node may be shared across threads and tasks and branched freely.
//! [`Command`] is the terminal handle: the only thing that talks to the
//! transport.

use std::fmt;
use std::sync::Arc;

use tracing::field::Empty;
use tracing::{Span, debug, instrument, warn};

use crate::error::{CallError, PathIntegrityError};
use crate::invocation::Invocation;
use crate::path::{Path, PathSegment, TransportAddress, flatten};
use crate::transport::TransportHandle;
use crate::value::{Arguments, Value};

/// A position in the remote command tree, bound to a session.
#[derive(Clone)]
pub struct MenuNode {
    path: Path,
    transport: TransportHandle,
}

impl MenuNode {
    /// The session root. Its path is empty.
    pub fn root(transport: TransportHandle) -> Self {
        Self {
            path: Path::root(),
            transport,
        }
    }

    /// Descends into a plain container child.
    pub fn child(&self, remote_name: &str) -> Self {
        self.descend(PathSegment::new(remote_name))
    }

    /// Descends into one named instance of a collection, e.g. `controls[c1]`.
    pub fn named_child(&self, remote_name: &str, key: impl Into<String>) -> Self {
        self.descend(PathSegment::keyed(remote_name, key))
    }

    /// A callable handle for a leaf under this node.
    pub fn command(&self, remote_name: &str) -> Command {
        Command {
            path: self.path.join(PathSegment::new(remote_name)),
            transport: Arc::clone(&self.transport),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The transport encoding of this node's path.
    ///
    /// ## Errors
    ///
    /// Fails for the root and for paths with empty names or keys.
    pub fn address(&self) -> Result<TransportAddress, PathIntegrityError> {
        flatten(&self.path)
    }

    pub fn transport(&self) -> &TransportHandle {
        &self.transport
    }

    fn descend(&self, segment: PathSegment) -> Self {
        Self {
            path: self.path.join(segment),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuNode").field("path", &self.path).finish_non_exhaustive()
    }
}

/// Two nodes are equal when they name the same path in the same session.
impl PartialEq for MenuNode {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && Arc::ptr_eq(&self.transport, &other.transport)
    }
}

impl Eq for MenuNode {}

/// Implemented by every generated container type.
pub trait Menu {
    fn node(&self) -> &MenuNode;

    fn path(&self) -> &Path {
        self.node().path()
    }

    fn address(&self) -> Result<TransportAddress, PathIntegrityError> {
        self.node().address()
    }
}

impl Menu for MenuNode {
    fn node(&self) -> &MenuNode {
        self
    }
}

/// A leaf of the remote tree, ready to be invoked.
#[derive(Clone)]
pub struct Command {
    path: Path,
    transport: TransportHandle,
}

impl Command {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The remote name of the leaf itself.
    pub fn name(&self) -> &str {
        self.path.last().map(PathSegment::remote_name).unwrap_or_default()
    }

    /// Runs the command on the remote engine.
    ///
    /// The path is encoded first; an encoding failure is reported as
    /// [`CallError::PathIntegrity`] and nothing reaches the transport. The
    /// arguments are forwarded unchanged and exactly one transport request
    /// is made. Failures are returned to the caller, never retried.
    ///
    /// ## Errors
    ///
    /// - [`CallError::PathIntegrity`] - the path cannot be encoded
    /// - [`CallError::Remote`] - the engine rejected the call
    /// - [`CallError::Disconnected`] - the engine could not be reached
    #[instrument(
        name = "menupath_invoke",
        skip_all,
        fields(
            menupath.address = Empty,
            menupath.args = Empty,
            menupath.kwargs = Empty,
            menupath.state = "idle",
            otel.kind = "client",
            otel.status_code = Empty,
        )
    )]
    pub async fn invoke(&self, arguments: impl Into<Arguments>) -> Result<Value, CallError> {
        let span = Span::current();
        let address = flatten(&self.path)?;
        span.record("menupath.address", address.as_str());

        let (args, kwargs) = arguments.into().into_parts();
        span.record("menupath.args", args.len());
        span.record("menupath.kwargs", kwargs.len());

        let mut invocation = Invocation::new(address);
        invocation.mark_sent();
        debug!(address = %invocation.address(), "sending command");

        let outcome = self
            .transport
            .execute(invocation.address(), &args, &kwargs)
            .await;
        let state = invocation.settle(&outcome);

        match &outcome {
            Ok(_) => {
                span.record("otel.status_code", "OK");
                debug!(%state, elapsed = ?invocation.elapsed(), "command settled");
            }
            Err(e) => {
                span.record("otel.status_code", "ERROR");
                warn!(%state, error = %e, "command failed");
            }
        }

        outcome.map_err(CallError::from)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("path", &self.path).finish_non_exhaustive()
    }
}
