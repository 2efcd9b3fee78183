//! WebSocket upgrade and echo against a live server.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use sawthat_backend::config::AppConfig;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

mod common;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(server: &common::TestServer) -> Client {
    let (ws, response) = connect_async(server.ws_url()).await.expect("upgrade failed");
    assert_eq!(response.status(), 101);
    ws
}

async fn connect_with_origin(
    server: &common::TestServer,
    origin: &'static str,
) -> Result<Client, WsError> {
    let mut request = server.ws_url().into_client_request().unwrap();
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_static(origin));
    connect_async(request).await.map(|(ws, _)| ws)
}

/// Wait for the server to finish the closing handshake and end the stream.
///
/// Panics if the stream is still open after the timeout, or if a data
/// message arrives after the client sent its close frame.
async fn expect_server_close(ws: &mut Client) {
    loop {
        match tokio::time::timeout(Duration::from_secs(5), ws.next()).await {
            Err(_) => panic!("server did not close the connection within timeout"),
            Ok(None) => return,
            Ok(Some(Err(WsError::ConnectionClosed | WsError::AlreadyClosed))) => return,
            Ok(Some(Err(e))) => panic!("connection ended without a closing handshake: {e}"),
            Ok(Some(Ok(Message::Close(_)))) => continue,
            Ok(Some(Ok(message))) => {
                assert!(!message.is_text() && !message.is_binary(), "closed client got {message:?}");
            }
        }
    }
}

/// Next data message, skipping control frames.
async fn next_data(ws: &mut Client) -> Message {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("no echo within timeout")
            .expect("stream ended")
            .expect("read failed");
        if message.is_text() || message.is_binary() {
            return message;
        }
    }
}

#[tokio::test]
async fn echoes_text() {
    let server = common::start_default_server().await;
    let mut ws = connect(&server).await;

    ws.send(Message::text("ping")).await.unwrap();
    assert_eq!(next_data(&mut ws).await, Message::text("ping"));
}

#[tokio::test]
async fn echoes_binary() {
    let server = common::start_default_server().await;
    let mut ws = connect(&server).await;

    ws.send(Message::binary(vec![0x01, 0x02])).await.unwrap();
    assert_eq!(next_data(&mut ws).await, Message::binary(vec![0x01, 0x02]));
}

#[tokio::test]
async fn echoes_in_order() {
    let server = common::start_default_server().await;
    let mut ws = connect(&server).await;

    for i in 0..20 {
        ws.send(Message::text(format!("msg-{i}"))).await.unwrap();
    }
    for i in 0..20 {
        assert_eq!(next_data(&mut ws).await, Message::text(format!("msg-{i}")));
    }
}

#[tokio::test]
async fn any_origin_is_accepted_by_default() {
    let server = common::start_default_server().await;

    for origin in ["https://sawthat.example", "https://evil.example", "null"] {
        let mut ws = connect_with_origin(&server, origin)
            .await
            .unwrap_or_else(|e| panic!("origin {origin} rejected: {e}"));
        ws.send(Message::text(origin)).await.unwrap();
        assert_eq!(next_data(&mut ws).await, Message::text(origin));
    }
}

#[tokio::test]
async fn allow_list_rejects_other_origins() {
    let mut config = AppConfig::default();
    config.websocket.allowed_origins = vec!["https://sawthat.example".into()];
    let server = common::start_server(config, Arc::new(common::StaticStore(true))).await;

    assert!(connect_with_origin(&server, "https://sawthat.example").await.is_ok());

    let err = connect_with_origin(&server, "https://evil.example")
        .await
        .err()
        .expect("foreign origin upgraded");
    assert!(matches!(err, WsError::Http(ref response) if response.status() == 403));
}

#[tokio::test]
async fn connections_are_isolated() {
    let server = common::start_default_server().await;
    let mut a = connect(&server).await;
    let mut b = connect(&server).await;

    a.send(Message::text("from-a")).await.unwrap();
    b.send(Message::text("from-b")).await.unwrap();
    assert_eq!(next_data(&mut b).await, Message::text("from-b"));
    assert_eq!(next_data(&mut a).await, Message::text("from-a"));

    a.close(None).await.unwrap();
    expect_server_close(&mut a).await;

    b.send(Message::binary(vec![7, 7, 7])).await.unwrap();
    assert_eq!(next_data(&mut b).await, Message::binary(vec![7, 7, 7]));
}

#[tokio::test]
async fn client_close_ends_server_session() {
    let server = common::start_default_server().await;
    let mut ws = connect(&server).await;

    ws.send(Message::text("last words")).await.unwrap();
    assert_eq!(next_data(&mut ws).await, Message::text("last words"));

    ws.close(None).await.unwrap();
    expect_server_close(&mut ws).await;
}

#[tokio::test]
async fn failed_upgrade_leaves_server_serving() {
    let server = common::start_default_server().await;
    let client = common::http_client();

    let res = client.get(server.http_url("/ws")).send().await.unwrap();
    assert!(res.status().is_client_error());

    let mut ws = connect(&server).await;
    ws.send(Message::text("still here")).await.unwrap();
    assert_eq!(next_data(&mut ws).await, Message::text("still here"));

    let health = client.get(server.http_url("/health")).send().await.unwrap();
    assert_eq!(health.status(), 200);
}

#[tokio::test]
async fn abrupt_disconnect_does_not_affect_health() {
    let server = common::start_default_server().await;
    let ws = connect(&server).await;
    drop(ws);

    tokio::time::sleep(Duration::from_millis(100)).await;
    let health = common::http_client()
        .get(server.http_url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
}
