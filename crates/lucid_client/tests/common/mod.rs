//! Common test utilities: a mockito-backed Lucid server.

use lucid_client::{LucidClient, LucidConfig};
use mockito::{Mock, Server, ServerGuard};

pub const TOKEN: &str = "test-jwt";
pub const VERSION_BODY: &str = "Lucid Version 2.3.1";

/// Start a mock server.
pub async fn lucid_server() -> ServerGuard {
    Server::new_async().await
}

/// Mock `GET /api/ui/version` answering like a Lucid server.
pub async fn mock_version(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/api/ui/version")
        .with_status(200)
        .with_body(VERSION_BODY)
        .create_async()
        .await
}

/// Mock `GET /api/kv/check-token` accepting [`TOKEN`].
#[allow(dead_code)]
pub async fn mock_token_ok(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/api/kv/check-token")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .with_status(200)
        .create_async()
        .await
}

/// Client pointed at the mock server, with the test token.
#[allow(dead_code)]
pub fn client_for(server: &ServerGuard) -> LucidClient {
    LucidClient::new(LucidConfig::new(server.url()).token(TOKEN))
}

/// Client pointed at the mock server, without a token.
#[allow(dead_code)]
pub fn anonymous_client_for(server: &ServerGuard) -> LucidClient {
    LucidClient::new(LucidConfig::new(server.url()))
}

/// Initialized client with the test token.
#[allow(dead_code)]
pub async fn ready_client(server: &mut ServerGuard) -> LucidClient {
    mock_version(server).await;
    mock_token_ok(server).await;
    let client = client_for(server);
    client.init().await.expect("init against mock server");
    client
}
