mod support;

use std::time::Duration;

use serde_json::Value;
use spreadwatch::adapter::outbound::webhook::WebhookTransport;
use spreadwatch::port::{AlertPayload, AlertTransport, Embed, EmbedField, TransportError};
use support::server::{Reply, TestServer};

fn payload() -> AlertPayload {
    AlertPayload {
        content: "Spread alert".into(),
        username: Some("spreadwatch".into()),
        embeds: vec![Embed {
            title: "Fed cuts in December?".into(),
            description: "1.0% spread".into(),
            color: 0x00ff00,
            timestamp: "2026-01-01T00:00:00Z".into(),
            fields: vec![EmbedField {
                name: "kalshi".into(),
                value: "0.40".into(),
                inline: true,
            }],
        }],
    }
}

#[tokio::test]
async fn posts_json_body_and_reports_status() {
    let server = TestServer::start(|_, _| Reply::status(204)).await;
    let transport = WebhookTransport::new(server.url("/hooks/abc"), Duration::from_secs(2));

    let response = transport.send(&payload()).await.expect("send");
    assert_eq!(response.status, 204);
    assert_eq!(response.retry_after, None);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/hooks/abc");
    assert_eq!(requests[0].header("content-type"), Some("application/json"));

    let body: Value = serde_json::from_str(&requests[0].body).expect("json body");
    assert_eq!(body["content"], "Spread alert");
    assert_eq!(body["username"], "spreadwatch");
    assert_eq!(body["embeds"][0]["color"], 0x00ff00);
    assert_eq!(body["embeds"][0]["fields"][0]["inline"], true);
}

#[tokio::test]
async fn omits_username_when_unset() {
    let server = TestServer::start(|_, _| Reply::status(200)).await;
    let transport = WebhookTransport::new(server.url("/hook"), Duration::from_secs(2));

    let mut message = payload();
    message.username = None;
    transport.send(&message).await.expect("send");

    let body: Value = serde_json::from_str(&server.requests()[0].body).expect("json body");
    assert!(body.get("username").is_none());
}

#[tokio::test]
async fn error_statuses_are_responses_not_errors() {
    let server = TestServer::start(|_, _| Reply::status(429).with_header("retry-after", "7")).await;
    let transport = WebhookTransport::new(server.url("/hook"), Duration::from_secs(2));

    let response = transport.send(&payload()).await.expect("send");
    assert_eq!(response.status, 429);
    assert_eq!(response.retry_after, Some(Duration::from_secs(7)));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Bind then release a port so nothing is listening on it.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let transport = WebhookTransport::new(format!("http://127.0.0.1:{port}/hook"), Duration::from_secs(2));

    let err = transport.send(&payload()).await.expect_err("refused");
    assert!(matches!(err, TransportError::Network(_)), "{err:?}");
}
