//! The transport seam.
//!
//! [`Transport`] is the single interface the runtime depends on: given an
//! encoded address and the caller's arguments, produce a result or say why
//! not. Any mechanism that can satisfy it is admissible.
//!
//! ## Implementations
//!
//! - [`LocalTransport`] - In-process dispatch to registered handlers
//! - [`RecordingTransport`] - Records calls and replays scripted replies
//! - [`HttpTransport`] - JSON over HTTP via `reqwest`
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use menupath_runtime::{LocalTransport, MenuNode, TransportHandle, Value};
//!
//! let transport: TransportHandle = Arc::new(
//!     LocalTransport::new().route("report/quality", |_args, _kwargs| Ok(Value::from(0.87))),
//! );
//! let root = MenuNode::root(transport);
//! let _quality = root.child("report").command("quality");
//! ```

mod http;
mod local;
mod recording;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::path::TransportAddress;
use crate::value::{Kwargs, Value};

pub use http::{HttpTransport, HttpTransportBuilder, TIMEOUT_ENV, URL_ENV};
pub use local::LocalTransport;
pub use recording::{RecordedCall, RecordingTransport};

/// Executes one remote command.
///
/// Implementations receive the arguments by reference and must forward them
/// as given. They own every policy the runtime does not: timeouts,
/// connection handling, and ordering against a shared session.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one command and waits for its reply.
    ///
    /// ## Errors
    ///
    /// Returns [`TransportError::Remote`] when the engine rejects the command
    /// or the call times out, and [`TransportError::Disconnected`] when the
    /// engine cannot be reached.
    async fn execute(
        &self,
        address: &TransportAddress,
        args: &[Value],
        kwargs: &Kwargs,
    ) -> Result<Value, TransportError>;
}

/// Shared transport handle: many proxy nodes, one transport.
pub type TransportHandle = Arc<dyn Transport>;

