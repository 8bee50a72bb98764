//! Runtime path proxy for generated remote command trees.
//!
//! Generated stub types are thin wrappers over [`MenuNode`]. Navigating the
//! tree only builds an immutable [`Path`]; nothing is sent until a leaf
//! [`Command`] is invoked, at which point the path is flattened into a
//! [`TransportAddress`] and handed to the session's [`Transport`] together
//! with the caller's arguments, untouched.
//!
//! ## Features
//!
//! - **Immutable paths**: Structurally shared, safe to branch and share across threads
//! - **Injective wire form**: `a/b[key]/c` with `\` escaping, reversible via [`parse_address`]
//! - **Pluggable transport**: HTTP, in-process handlers, or a recorder for tests
//! - **Layered errors**: path integrity, remote rejection and disconnection stay distinct
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use menupath_runtime::{LocalTransport, MenuNode, Value, args};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let transport = LocalTransport::new()
//!     .route("file/import/cad", |args, _kwargs| Ok(Value::from(args.len() as i64)));
//! let root = MenuNode::root(Arc::new(transport));
//! let cad = root.child("file").child("import").command("cad");
//!
//! let result = cad.invoke(args!("part.stp")).await.unwrap();
//! assert_eq!(result, Value::from(1));
//! # }
//! ```

pub mod error;
pub mod invocation;
pub mod node;
pub mod path;
pub mod transport;
pub mod value;

pub use error::{CallError, ConfigError, PathIntegrityError, RemoteError, TransportError};
pub use invocation::{Invocation, InvocationState};
pub use node::{Command, Menu, MenuNode};
pub use path::{Path, PathSegment, TransportAddress, flatten, parse_address};
pub use transport::{
    HttpTransport, HttpTransportBuilder, LocalTransport, RecordedCall, RecordingTransport,
    Transport, TransportHandle,
};
pub use value::{Arguments, Kwargs, Value};
