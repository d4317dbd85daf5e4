use futures::future::BoxFuture;
use std::sync::Arc;

use crate::{
    client::TransportFn,
    document::Document,
    error::{Error, ErrorKind, Result},
    server::{Invocation, Server},
};

/// Builds the per-call context a resolver receives.
///
/// Invoked exactly once per inbound document, before the matching
/// procedure's resolver runs; the produced value lives only for that one
/// call and is never cached or shared across calls.
pub type ContextFactory<C> =
    Arc<dyn Fn(Document) -> BoxFuture<'static, Result<C>> + Send + Sync>;

/// Routes inbound documents to a server's procedures.
///
/// This is the transportless half of a server host: it owns method lookup,
/// the method-type check, and context construction, and leaves decoding
/// bytes off a wire to the transport collaborator.
pub struct Dispatcher<C, X = ()> {
    server: Server<C, X>,
    context_factory: ContextFactory<C>,
}

impl<C: Send + 'static, X> Dispatcher<C, X> {
    pub fn new(server: Server<C, X>, context_factory: ContextFactory<C>) -> Self {
        Self {
            server,
            context_factory,
        }
    }

    #[must_use]
    pub fn server(&self) -> &Server<C, X> {
        &self.server
    }

    /// Serves one document.
    ///
    /// # Errors
    ///
    /// - `MethodNotFound` if the document names no bound procedure.
    /// - `MethodTypeMismatch` if the document's method type disagrees with
    ///   the procedure's (a query envelope must not invoke a mutation).
    /// - Context factory and resolver failures propagate unchanged.
    pub async fn dispatch(&self, doc: Document) -> Result<serde_json::Value> {
        let Some(procedure) = self.server.get(&doc.method) else {
            let m = format!("method not found: {}", doc.method);
            tracing::error!(m);
            return Err(Error::new(ErrorKind::MethodNotFound, m));
        };

        if procedure.method_type != doc.method_type {
            return Err(Error::new(
                ErrorKind::MethodTypeMismatch,
                format!(
                    "{} is a {}, document says {}",
                    doc.method, procedure.method_type, doc.method_type
                ),
            ));
        }

        let context = (self.context_factory)(doc.clone()).await?;
        (procedure.resolve)(Invocation {
            context,
            input: doc.input,
        })
        .await
    }
}

impl<C: Send + 'static, X: Send + Sync + 'static> Dispatcher<C, X> {
    /// Wraps the dispatcher as an in-process loopback [`TransportFn`].
    ///
    /// Useful for tests and single-process deployments: documents built by
    /// an [`RpcClient`](crate::RpcClient) are served directly, with no wire
    /// in between. Headers and pathname are accepted and ignored.
    #[must_use]
    pub fn into_transport(self: Arc<Self>) -> TransportFn {
        Arc::new(move |doc, _props| {
            let this = self.clone();
            Box::pin(async move { this.dispatch(doc).await })
        })
    }
}

impl<C, X> std::fmt::Debug for Dispatcher<C, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("server", &self.server)
            .finish()
    }
}
