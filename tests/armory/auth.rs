use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use realmscribe::ArmoryError;
use realmscribe::armory::{
    BrokerTokenProvider, ClientCredentialsTokenProvider, TokenProvider, create_token_provider,
    require_token,
};
use realmscribe::config::BattleNetConfig;

#[tokio::test]
async fn client_credentials_grant_uses_basic_auth_and_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        // base64("id:secret")
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "bearer-123",
            "token_type": "bearer",
            "expires_in": 86399
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        ClientCredentialsTokenProvider::new(&format!("{}/oauth/token", server.uri()), "id", "secret");
    assert_eq!(provider.get_access_token().await.as_deref(), Some("bearer-123"));
    server.verify().await;
}

#[tokio::test]
async fn rejected_credentials_yield_no_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let provider =
        ClientCredentialsTokenProvider::new(&format!("{}/oauth/token", server.uri()), "id", "bad");
    assert!(provider.get_access_token().await.is_none());
    assert!(matches!(
        require_token(&provider).await,
        Err(ArmoryError::Authentication(_))
    ));
}

#[tokio::test]
async fn broker_returns_token_without_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "  brokered  "
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = BrokerTokenProvider::new(&format!("{}/token", server.uri()));
    assert_eq!(require_token(&provider).await.unwrap(), "brokered");
}

#[tokio::test]
async fn broker_response_without_token_is_an_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_in": 10})))
        .mount(&server)
        .await;

    let provider = BrokerTokenProvider::new(&format!("{}/token", server.uri()));
    assert!(provider.get_access_token().await.is_none());
}

#[test]
fn broker_url_takes_precedence_over_credentials() {
    let config = BattleNetConfig {
        broker_url: Some("https://broker.example/token".into()),
        client_id: Some("id".into()),
        client_secret: Some("secret".into()),
        ..BattleNetConfig::default()
    };
    let provider = create_token_provider(&config).unwrap();
    assert_eq!(provider.name(), "broker");
}

#[test]
fn missing_credentials_are_reported() {
    let config = BattleNetConfig {
        broker_url: None,
        client_id: Some("id".into()),
        client_secret: None,
        ..BattleNetConfig::default()
    };
    let err = create_token_provider(&config).err().unwrap();
    assert!(err.to_string().contains("BNET_CLIENT_ID"));
}
