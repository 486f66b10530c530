use autotrade_core::api::ApiClient;
use autotrade_core::auth::{authenticate, AuthError, Credentials};
use autotrade_core::pipeline::{self, RunOptions};
use autotrade_core::report::GroupOutcome;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(reqwest::Client::new(), format!("{}/", server.uri()))
}

fn creds() -> Credentials {
    Credentials::new("me@example.com", "secret")
}

async fn mount_login(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "me@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_single_group_with_batch(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/portfolioGroups/"))
        .and(header("Authorization", "JWT abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": "1", "name": "RRSP"}])),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/1/info"))
        .and(header("Authorization", "JWT abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "calculated_trades": {
                "id": "5",
                "trades": [{
                    "action": "buy",
                    "units": 2,
                    "universal_symbol": {"symbol": "AAPL", "currency": {"code": "USD"}},
                    "price": 100
                }]
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn approved_batch_is_placed_exactly_once() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"token": "abc"})).await;
    mount_single_group_with_batch(&server).await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/1/calculatedtrades/5/impact"))
        .and(header("Authorization", "JWT abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/portfolioGroups/1/calculatedtrades/5/placeOrders"))
        .and(header("Authorization", "JWT abc"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "order-1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let session = authenticate(client(&server), creds()).await.unwrap();
    let report = pipeline::run(&session, &RunOptions::default()).await.unwrap();

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].0.name, "RRSP");
    assert_eq!(report.groups[0].1, GroupOutcome::Executed);
}

#[tokio::test]
async fn impact_detail_blocks_place_orders() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"token": "abc"})).await;
    mount_single_group_with_batch(&server).await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/1/calculatedtrades/5/impact"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"detail": "insufficient funds"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/portfolioGroups/1/calculatedtrades/5/placeOrders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let session = authenticate(client(&server), creds()).await.unwrap();
    let report = pipeline::run(&session, &RunOptions::default()).await.unwrap();

    assert_eq!(
        report.groups[0].1,
        GroupOutcome::Rejected {
            detail: "insufficient funds".to_string()
        }
    );
}

#[tokio::test]
async fn impact_http_error_fails_closed() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"token": "abc"})).await;
    mount_single_group_with_batch(&server).await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/1/calculatedtrades/5/impact"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Trades are stale."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/portfolioGroups/1/calculatedtrades/5/placeOrders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = authenticate(client(&server), creds()).await.unwrap();
    let report = pipeline::run(&session, &RunOptions::default()).await.unwrap();

    assert_eq!(
        report.groups[0].1,
        GroupOutcome::Rejected {
            detail: "Trades are stale.".to_string()
        }
    );
}

#[tokio::test]
async fn login_without_token_never_lists_groups() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"mfa_required": true})).await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = authenticate(client(&server), creds()).await.unwrap_err();
    assert!(matches!(err, AuthError::TokenMissing));
}

#[tokio::test]
async fn login_http_error_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Unable to log in with provided credentials."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = authenticate(client(&server), creds()).await.unwrap_err();
    match err {
        AuthError::Transport(api) => assert_eq!(
            api.detail(),
            Some("Unable to log in with provided credentials.")
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn group_without_batch_skips_impact() {
    let server = MockServer::start().await;
    mount_login(&server, json!({"token": "abc"})).await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "name": "Cash only"},
            {"id": "2", "name": "Gone"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/1/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accounts": []})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/2/info"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/portfolioGroups/1/calculatedtrades/5/impact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let session = authenticate(client(&server), creds()).await.unwrap();
    let report = pipeline::run(&session, &RunOptions::default()).await.unwrap();

    assert_eq!(report.groups[0].1, GroupOutcome::NoTrades);
    assert_eq!(
        report.groups[1].1,
        GroupOutcome::InspectFailed {
            error: "Not found.".to_string()
        }
    );
}
