use foldhash::fast::RandomState;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_inline_default::serde_inline_default;
use std::{collections::HashMap, sync::Arc};

use crate::{
    contract::{Contract, ContractEntry},
    document::Document,
    error::{Error, ErrorKind, Result},
    method::MethodType,
};

pub type Headers = HashMap<String, String, RandomState>;

/// What the client hands the transport alongside the document: the merged
/// request headers and the configured base path.
#[derive(Clone, Debug)]
pub struct TransportProps {
    pub headers: Headers,
    pub pathname: String,
}

/// The externally supplied function that carries a [`Document`] to a server
/// and returns the decoded output value.
///
/// The transport owns serialization, the network, and status-to-error
/// translation; the client only calls it. Its failures propagate to the
/// caller unchanged.
pub type TransportFn = Arc<
    dyn Fn(Document, TransportProps) -> BoxFuture<'static, Result<serde_json::Value>>
        + Send
        + Sync,
>;

#[serde_inline_default]
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
pub struct ClientConfig {
    /// Base path handed to the transport on every call. Should equal the
    /// path the server side is mounted under.
    #[serde_inline_default(String::from("/"))]
    pub pathname: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        serde_json::from_value(serde_json::Value::Object(serde_json::Map::default())).unwrap()
    }
}

type CallFn = Arc<
    dyn Fn(serde_json::Value, Headers) -> BoxFuture<'static, Result<serde_json::Value>>
        + Send
        + Sync,
>;

/// One side of the client surface: the callable methods of a single
/// method type.
///
/// Execution functions are closures over immutable state only (the
/// contract entry, the base path, the transport), so concurrent calls are
/// fully independent.
#[derive(Default)]
pub struct Namespace {
    calls: HashMap<String, CallFn, RandomState>,
}

impl Namespace {
    /// Calls `method` with the given input and no extra headers.
    ///
    /// # Errors
    ///
    /// Fails with `MethodNotFound` if `method` is not in this namespace,
    /// with a codec error if `input`/the reply do not convert, or with
    /// whatever error the transport raised, unchanged.
    pub async fn call<I, O>(&self, method: &str, input: &I) -> Result<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        self.call_with_headers(method, input, Headers::default())
            .await
    }

    /// Calls `method` with caller-supplied headers overlaid on the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn call_with_headers<I, O>(
        &self,
        method: &str,
        input: &I,
        headers: Headers,
    ) -> Result<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let Some(execute) = self.calls.get(method) else {
            return Err(Error::new(
                ErrorKind::MethodNotFound,
                format!("method not found: {method}"),
            ));
        };
        let input = serde_json::to_value(input)?;
        let rsp = execute(input, headers).await?;
        Ok(serde_json::from_value(rsp)?)
    }

    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.calls.contains_key(method)
    }

    pub fn methods(&self) -> impl Iterator<Item = &String> {
        self.calls.keys()
    }

    fn install(&mut self, entry: &ContractEntry, pathname: &str, transport: &TransportFn) {
        let method = entry.method.clone();
        let entry = entry.clone();
        let pathname = pathname.to_string();
        let transport = transport.clone();
        let execute: CallFn = Arc::new(move |input, headers| {
            let doc = Document::build(&entry, input);
            let mut merged = Headers::default();
            merged.insert("content-type".to_string(), "application/json".to_string());
            // caller-supplied keys win on collision
            merged.extend(headers);
            transport(
                doc,
                TransportProps {
                    headers: merged,
                    pathname: pathname.clone(),
                },
            )
        });
        self.calls.insert(method, execute);
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace")
            .field("methods", &self.calls.keys())
            .finish()
    }
}

/// The callable surface derived from a contract: every query method under
/// `query`, every mutation under `mutate`. A method name is visible from
/// exactly one of the two, determined solely by its method type.
#[derive(Debug, Default)]
pub struct RpcClient {
    pub query: Namespace,
    pub mutate: Namespace,
}

impl RpcClient {
    /// Derives the client call tables from a contract and a transport.
    #[must_use]
    pub fn build(contract: &Contract, transport: TransportFn, config: &ClientConfig) -> Self {
        let mut client = Self::default();
        for entry in contract.entries() {
            match entry.method_type {
                MethodType::Query => client.query.install(entry, &config.pathname, &transport),
                MethodType::Mutation => client.mutate.install(entry, &config.pathname, &transport),
            }
        }
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.pathname, "/");
    }
}
