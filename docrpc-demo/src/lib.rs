//! A small user-store service built from one contract: the same
//! [`Contract`] value produces both the bound server and the client call
//! tables, so the demo cannot drift between the two.

#![forbid(unsafe_code)]

use dashmap::DashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use docrpc::{
    ClientConfig, Contract, ContextFactory, Dispatcher, Error, ErrorKind, MethodSpec,
    ProcedureImpl, Result, RpcClient, Server,
};

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct GetUserRequest {
    pub id: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone)]
pub struct SetUserRequest {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct SetUserReply {
    pub ok: bool,
}

/// Context handed to every resolver, built once per inbound call.
#[derive(Debug, Clone)]
pub struct ReqContext {
    pub method: String,
}

#[derive(Debug, Default)]
pub struct UserStore {
    users: DashMap<String, String>,
}

#[must_use]
pub fn user_contract() -> Contract {
    Contract::build([
        ("getUser", MethodSpec::query::<GetUserRequest, User>()),
        ("setUser", MethodSpec::mutation::<SetUserRequest, SetUserReply>()),
    ])
}

/// Binds the user contract to resolvers backed by `store`.
///
/// # Errors
///
/// Fails only if the implementation map and the contract disagree, which
/// for this fixed pair they never do.
pub fn user_server(store: Arc<UserStore>) -> Result<Server<ReqContext>> {
    let get_store = store.clone();
    Server::bind(
        &user_contract(),
        [
            (
                "getUser",
                ProcedureImpl::new(move |_ctx: ReqContext, req: GetUserRequest| {
                    let store = get_store.clone();
                    async move {
                        match store.users.get(&req.id) {
                            Some(name) => Ok(User {
                                name: name.value().clone(),
                            }),
                            None => Err(Error::new(
                                ErrorKind::InvalidArgument,
                                format!("no such user: {}", req.id),
                            )),
                        }
                    }
                }),
            ),
            (
                "setUser",
                ProcedureImpl::new(move |_ctx: ReqContext, req: SetUserRequest| {
                    let store = store.clone();
                    async move {
                        tracing::info!(id = %req.id, name = %req.name, "set user");
                        store.users.insert(req.id, req.name);
                        Ok::<_, Error>(SetUserReply { ok: true })
                    }
                }),
            ),
        ],
    )
}

#[must_use]
pub fn context_factory() -> ContextFactory<ReqContext> {
    Arc::new(|doc| Box::pin(async move { Ok(ReqContext { method: doc.method }) }))
}

/// A client wired straight back into the server, no network in between.
///
/// # Errors
///
/// Propagates [`user_server`] failures.
pub fn loopback_client(store: Arc<UserStore>) -> Result<RpcClient> {
    let dispatcher = Arc::new(Dispatcher::new(user_server(store)?, context_factory()));
    Ok(RpcClient::build(
        &user_contract(),
        dispatcher.into_transport(),
        &ClientConfig::default(),
    ))
}
