//! Demo application routes served by the binary.
//!
//! `/v1/ws` upgrades to a WebSocket and echoes frames back; it runs behind
//! the instrumentation layer to show upgrades are left intact.

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, Path},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};

pub fn build_router() -> Router {
    Router::new()
        .route("/hello", get(hello))
        .route("/items/:id", get(get_item).post(create_item))
        .route("/v1/ws", get(ws_echo))
}

async fn hello() -> &'static str {
    "hello\n"
}

async fn get_item(Path(id): Path<u64>) -> Result<String, StatusCode> {
    if id == 0 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(format!("item {id}\n"))
}

async fn create_item(Path(id): Path<u64>, body: String) -> (StatusCode, String) {
    (StatusCode::CREATED, format!("item {id}: {} bytes\n", body.len()))
}

async fn ws_echo(ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(|socket| async move {
        if let Err(e) = echo(socket).await {
            tracing::debug!(error = %e, "ws echo ended");
        }
    })
}

async fn echo(socket: WebSocket) -> Result<(), axum::Error> {
    let (mut tx, mut rx) = socket.split();
    while let Some(msg) = rx.next().await {
        match msg? {
            Message::Close(_) => break,
            m @ (Message::Text(_) | Message::Binary(_)) => tx.send(m).await?,
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
    Ok(())
}
