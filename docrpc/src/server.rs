use foldhash::fast::RandomState;
use futures::future::BoxFuture;
use schemars::schema::RootSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;

use crate::{
    contract::Contract,
    error::{Error, ErrorKind, Result},
    method::MethodType,
};

/// What a resolver receives for one call: the per-call context built by the
/// host, and the decoded input value from the document.
pub struct Invocation<C> {
    pub context: C,
    pub input: serde_json::Value,
}

/// Boxed resolver over dynamic values. Resolvers must be safe to invoke
/// concurrently; the server imposes no mutual exclusion.
pub type ResolveFn<C> =
    Box<dyn Fn(Invocation<C>) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync>;

/// The implementer's half of a procedure: a resolver and optional
/// transport-specific extension metadata.
///
/// `X` is opaque to this crate; only a transport collaborator interprets
/// it (e.g. framework route options). When omitted it defaults to
/// `X::default()` at bind time.
pub struct ProcedureImpl<C, X = ()> {
    pub resolve: ResolveFn<C>,
    pub extensions: Option<X>,
}

impl<C, X> ProcedureImpl<C, X> {
    /// Wraps a typed async resolver into the dynamic [`ResolveFn`] shape.
    ///
    /// The adapter decodes the invocation input into `I` before calling `f`
    /// and encodes the returned `O`; a value that does not decode fails the
    /// call with `DeserializeFailed` without running the resolver.
    pub fn new<I, O, F, Fut>(f: F) -> Self
    where
        C: Send + 'static,
        I: DeserializeOwned + Send + 'static,
        O: Serialize,
        F: Fn(C, I) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<O>> + Send + 'static,
    {
        let resolve: ResolveFn<C> = Box::new(move |invocation: Invocation<C>| {
            let input = serde_json::from_value::<I>(invocation.input)
                .map_err(|e| Error::new(ErrorKind::DeserializeFailed, e.to_string()));
            let fut = input.map(|input| f(invocation.context, input));
            Box::pin(async move {
                let rsp = fut?.await?;
                serde_json::to_value(rsp)
                    .map_err(|e| Error::new(ErrorKind::SerializeFailed, e.to_string()))
            })
        });
        Self {
            resolve,
            extensions: None,
        }
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: X) -> Self {
        self.extensions = Some(extensions);
        self
    }
}

/// One bound method: the contract entry's identity and schema fields merged
/// with the implementation's behavior fields.
///
/// Identity and schema (`method`, `method_type`, `input`, `output`) are
/// always taken from the contract; `resolve` and `extensions` always from
/// the implementation. The fields are copied at bind time, so a procedure
/// never aliases the contract it came from.
pub struct Procedure<C, X = ()> {
    pub method: String,
    pub method_type: MethodType,
    pub input: RootSchema,
    pub output: RootSchema,
    pub resolve: ResolveFn<C>,
    pub extensions: X,
}

/// A contract bound to resolvers: the sole source of truth a transport
/// collaborator consults to register routes and serve calls.
pub struct Server<C, X = ()> {
    procedures: HashMap<String, Procedure<C, X>, RandomState>,
}

impl<C, X: Default> Server<C, X> {
    /// Binds a contract to an implementation map.
    ///
    /// Fails fast at bind time, never at first call:
    /// - `MissingResolver` if any contract method lacks an implementation,
    ///   naming every missing method;
    /// - `UnknownMethod` if the implementation names a method the contract
    ///   does not declare.
    ///
    /// Purely an in-memory composition step; no I/O.
    pub fn bind<K, I>(contract: &Contract, impls: I) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ProcedureImpl<C, X>)>,
    {
        let impls: HashMap<String, ProcedureImpl<C, X>, RandomState> =
            impls.into_iter().map(|(k, v)| (k.into(), v)).collect();

        let mut missing: Vec<&str> = contract
            .methods()
            .filter(|m| !impls.contains_key(m.as_str()))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(Error::new(
                ErrorKind::MissingResolver,
                format!("no resolver for: {}", missing.join(", ")),
            ));
        }

        let mut unknown: Vec<&str> = impls
            .keys()
            .filter(|k| contract.get(k).is_none())
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("not in contract: {}", unknown.join(", ")),
            ));
        }

        let mut procedures = HashMap::default();
        for (method, imp) in impls {
            let Some(entry) = contract.get(&method) else {
                continue; // ruled out by the unknown-method check above
            };
            procedures.insert(
                method,
                Procedure {
                    method: entry.method.clone(),
                    method_type: entry.method_type,
                    input: entry.input.clone(),
                    output: entry.output.clone(),
                    resolve: imp.resolve,
                    extensions: imp.extensions.unwrap_or_default(),
                },
            );
        }

        Ok(Self { procedures })
    }
}

impl<C, X> Server<C, X> {
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&Procedure<C, X>> {
        self.procedures.get(method)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    pub fn procedures(&self) -> impl Iterator<Item = &Procedure<C, X>> {
        self.procedures.values()
    }
}

impl<C, X> std::fmt::Debug for Server<C, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("procedures", &self.procedures.keys())
            .finish()
    }
}
