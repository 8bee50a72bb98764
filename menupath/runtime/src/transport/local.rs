//! In-process transport.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::Transport;
use crate::error::TransportError;
use crate::path::TransportAddress;
use crate::value::{Kwargs, Value};

type Handler = Arc<dyn Fn(&[Value], &Kwargs) -> Result<Value, TransportError> + Send + Sync>;

/// Dispatches commands to closures registered by address.
///
/// Unrouted addresses are rejected the way a remote engine rejects an
/// unknown command, unless a fallback handler is installed.
///
/// ## Examples
///
/// ```rust
/// use menupath_runtime::{LocalTransport, Value};
///
/// let transport = LocalTransport::new()
///     .route("file/read-case", |args, _| Ok(Value::from(args.len() as i64)))
///     .fallback(|_, _| Ok(Value::Null));
/// assert_eq!(transport.route_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct LocalTransport {
    routes: HashMap<String, Handler>,
    fallback: Option<Handler>,
}

impl LocalTransport {
    /// Creates a transport with no routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an encoded address.
    pub fn route<F>(mut self, address: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[Value], &Kwargs) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        self.routes.insert(address.into(), Arc::new(handler));
        self
    }

    /// Registers the handler for addresses without a route.
    pub fn fallback<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[Value], &Kwargs) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(handler));
        self
    }

    /// Number of registered routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

impl fmt::Debug for LocalTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        routes.sort_unstable();
        f.debug_struct("LocalTransport")
            .field("routes", &routes)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn execute(
        &self,
        address: &TransportAddress,
        args: &[Value],
        kwargs: &Kwargs,
    ) -> Result<Value, TransportError> {
        match self.routes.get(address.as_str()).or(self.fallback.as_ref()) {
            Some(handler) => handler(args, kwargs),
            None => Err(TransportError::remote(format!("unknown command: {address}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Path, PathSegment, flatten};

    fn address(names: &[&str]) -> TransportAddress {
        let path: Path = names.iter().copied().map(PathSegment::new).collect();
        flatten(&path).unwrap()
    }

    #[tokio::test]
    async fn routed_handler_receives_arguments() {
        let transport = LocalTransport::new().route("mesh/check", |args, kwargs| {
            assert_eq!(args, &[Value::Int(1)]);
            assert_eq!(kwargs.get("verbose"), Some(&Value::Bool(true)));
            Ok(Value::from("ok"))
        });
        let kwargs: Kwargs = [("verbose", true)].into_iter().collect();

        let result = transport
            .execute(&address(&["mesh", "check"]), &[Value::Int(1)], &kwargs)
            .await;
        assert_eq!(result, Ok(Value::from("ok")));
    }

    #[tokio::test]
    async fn unknown_address_is_a_remote_rejection() {
        let transport = LocalTransport::new();
        let err = transport
            .execute(&address(&["nope"]), &[], &Kwargs::new())
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::remote("unknown command: nope"));
    }

    #[tokio::test]
    async fn fallback_catches_unrouted_addresses() {
        let transport = LocalTransport::new().fallback(|_, _| Ok(Value::Int(7)));
        let result = transport.execute(&address(&["any"]), &[], &Kwargs::new()).await;
        assert_eq!(result, Ok(Value::Int(7)));
    }
}
