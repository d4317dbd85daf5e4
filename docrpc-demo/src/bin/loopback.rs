use std::sync::Arc;

use docrpc_demo::{GetUserRequest, SetUserReply, SetUserRequest, User, UserStore, loopback_client};

#[tokio::main]
async fn main() -> docrpc::Result<()> {
    tracing_subscriber::fmt().init();

    let store = Arc::new(UserStore::default());
    let client = loopback_client(store)?;

    let reply: SetUserReply = client
        .mutate
        .call(
            "setUser",
            &SetUserRequest {
                id: "1".to_string(),
                name: "Ann".to_string(),
            },
        )
        .await?;
    tracing::info!(ok = reply.ok, "setUser");

    let user: User = client
        .query
        .call(
            "getUser",
            &GetUserRequest {
                id: "1".to_string(),
            },
        )
        .await?;
    tracing::info!(name = %user.name, "getUser");

    Ok(())
}
