use std::time::Duration;

use reqwest::Client;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use codegate_forward_auth::domain::repository::Notifier;
use codegate_forward_auth::error::NotifyError;
use codegate_forward_auth::infra::notifier::{DiscordNotifier, TelegramNotifier};

fn telegram(server: &MockServer) -> TelegramNotifier {
    TelegramNotifier::with_api_base(
        Client::new(),
        server.uri(),
        SecretString::from("123:secret-token".to_owned()),
        "4242".to_owned(),
    )
}

fn discord(server: &MockServer) -> DiscordNotifier {
    DiscordNotifier::new(
        Client::new(),
        SecretString::from(format!("{}/api/webhooks/1/abc", server.uri())),
    )
}

#[tokio::test]
async fn should_post_telegram_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:secret-token/sendMessage"))
        .and(body_json(json!({
            "chat_id": "4242",
            "text": "🔐 Authorization Code: *004821*\n\nRequest from IP: `203.0.113.7`",
            "parse_mode": "Markdown",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    telegram(&server)
        .send_code("004821", "203.0.113.7")
        .await
        .unwrap();
}

#[tokio::test]
async fn should_fail_telegram_on_non_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = telegram(&server)
        .send_code("004821", "203.0.113.7")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        NotifyError::Status {
            channel: "telegram",
            status: 401
        }
    ));
}

#[tokio::test]
async fn should_not_leak_bot_token_in_transport_errors() {
    // Nothing listens on the reserved port.
    let notifier = TelegramNotifier::with_api_base(
        Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap(),
        "http://127.0.0.1:9".to_owned(),
        SecretString::from("123:secret-token".to_owned()),
        "4242".to_owned(),
    );

    let err = notifier.send_code("004821", "203.0.113.7").await.unwrap_err();
    assert!(matches!(err, NotifyError::Transport { .. }));
    let chain = format!("{err:?}");
    assert!(!chain.contains("secret-token"), "{chain}");
}

#[tokio::test]
async fn should_post_discord_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/webhooks/1/abc"))
        .and(body_json(json!({
            "content": "🔐 **Authorization Code**: `004821`\nRequest from IP: `203.0.113.7`",
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    discord(&server)
        .send_code("004821", "203.0.113.7")
        .await
        .unwrap();
}

#[tokio::test]
async fn should_accept_discord_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(discord(&server).send_code("1", "ip").await.is_ok());
}

#[tokio::test]
async fn should_fail_discord_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = discord(&server).send_code("1", "ip").await.unwrap_err();
    assert!(matches!(
        err,
        NotifyError::Status {
            channel: "discord",
            status: 429
        }
    ));
}
