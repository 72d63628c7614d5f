//! End-to-end: a session talking to a live in-process server over real HTTP.

use axum::routing::get;
use axum::{Json, Router};
use tempfile::TempDir;

use quill_client::StoreClientFactory;
use quill_session::{ConfigurationStore, MemoryVault, SessionState};

/// Serves the documented single-post page on `/api/posts`.
async fn start_server() -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new().route(
        "/api/posts",
        get(|| async {
            Json(serde_json::json!({
                "posts": [{
                    "id": 1,
                    "content": "hi",
                    "createdAt": 1700000000000_i64,
                    "published": true,
                    "commentCount": 0
                }],
                "totalCount": 1
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, handle)
}

#[tokio::test]
async fn configured_session_lists_posts_from_a_real_server() {
    let (addr, server) = start_server().await;
    let dir = TempDir::new().unwrap();

    let mut session = SessionState::initialize(
        ConfigurationStore::with_path(dir.path().join("config.toml")),
        Box::new(MemoryVault::new()),
        StoreClientFactory::create_http_client(),
    );
    assert!(!session.configured());

    session
        .save_configuration(&addr.ip().to_string(), addr.port(), "k1")
        .unwrap();
    assert!(session.configured());

    let total = session.load_posts(1, 50).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(session.posts().len(), 1);
    let post = &session.posts()[0];
    assert_eq!(post.id, 1);
    assert_eq!(post.content, "hi");
    assert_eq!(post.created_at, 1_700_000_000_000);
    assert!(post.published);
    assert_eq!(post.comment_count, 0);

    session.clear_configuration().unwrap();
    assert!(!session.configured());
    assert!(session.posts().is_empty());

    server.abort();
}
