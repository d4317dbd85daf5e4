//! Contract-first RPC: author one declarative contract and derive the
//! server dispatch table and the client call table from it, so call sites,
//! route handlers, and payload schemas can never drift apart.
//!
//! Client and server never interact directly; they only agree on the
//! [`Document`] envelope a [`TransportFn`] carries between them.

#![forbid(unsafe_code)]

mod error;
pub use error::{Error, ErrorKind, Result};

mod method;
pub use method::{MethodSpec, MethodType};

mod contract;
pub use contract::{Contract, ContractEntry};

mod document;
pub use document::Document;

mod server;
pub use server::{Invocation, Procedure, ProcedureImpl, ResolveFn, Server};

mod client;
pub use client::{ClientConfig, Headers, Namespace, RpcClient, TransportFn, TransportProps};

mod dispatch;
pub use dispatch::{ContextFactory, Dispatcher};

mod route;
pub use route::{Route, RouteVerb, normalize_route, routes};
