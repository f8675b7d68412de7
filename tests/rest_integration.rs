use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use brkt_api_client::auth::{
    Credentials, NonceProvider, SignedRequestContext, TimestampProvider,
};
use brkt_api_client::error::BrktError;
use brkt_api_client::request::{RequestAttributes, RequestBuilder};
use brkt_api_client::rest::{RestClient, endpoints};
use brkt_api_client::types::Timestamp;

const NONCE: &str = "0f1e2d3c4b5a69788796a5b4c3d2e1f0";
const TS: u64 = 1_427_841_291;

struct FixedNonce;

impl NonceProvider for FixedNonce {
    fn next_nonce(&self) -> String {
        NONCE.to_string()
    }
}

struct FixedClock;

impl TimestampProvider for FixedClock {
    fn now_seconds(&self) -> u64 {
        TS
    }
}

/// Matches the exact `Authorization` header value.
struct AuthorizationIs(String);

impl Match for AuthorizationIs {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some(self.0.as_str())
    }
}

/// Matches a request without body and without `Content-Type`.
struct EmptyBody;

impl Match for EmptyBody {
    fn matches(&self, request: &Request) -> bool {
        request.body.is_empty() && request.headers.get("content-type").is_none()
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct BillingGroup {
    id: String,
    name: String,
    customer: Option<String>,
    created_time: Option<Timestamp>,
}

fn build_client(server: &MockServer) -> RestClient {
    RestClient::builder()
        .root_uri(server.uri())
        .access_token("test_token")
        .secret_key("test_secret")
        .build()
        .unwrap()
}

fn build_fixed_client(server: &MockServer) -> RestClient {
    RestClient::builder()
        .root_uri(server.uri())
        .access_token("test_token")
        .secret_key("test_secret")
        .nonce_provider(Arc::new(FixedNonce))
        .clock(Arc::new(FixedClock))
        .build()
        .unwrap()
}

fn expected_authorization(server: &MockServer, method: &str, path: &str) -> String {
    signed_header("127.0.0.1", server.address().port(), method, path)
}

fn signed_header(host: &str, port: u16, method: &str, path: &str) -> String {
    let context = SignedRequestContext {
        timestamp: TS,
        nonce: NONCE.to_string(),
        method: method.to_string(),
        path: path.to_string(),
        host: host.to_string(),
        port,
    };
    context
        .authorization(&Credentials::new("test_token", "test_secret"))
        .unwrap()
}

#[tokio::test]
async fn test_get_signs_request() {
    let server = MockServer::start().await;
    let group_path = endpoints::resource(endpoints::BILLING_GROUP, "bg1");
    let response = serde_json::json!({
        "id": "bg1",
        "name": "Engineering",
        "customer": "c1",
        "created_time": "2015-03-31T22:34:51.270584+00:00"
    });

    Mock::given(method("GET"))
        .and(path(group_path.as_str()))
        .and(header("accept", "application/json"))
        .and(EmptyBody)
        .and(AuthorizationIs(expected_authorization(&server, "GET", &group_path)))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_fixed_client(&server);
    let group: BillingGroup = client.get(&group_path).await.unwrap();
    assert_eq!(group.id, "bg1");
    assert_eq!(group.name, "Engineering");
    assert_eq!(group.customer.as_deref(), Some("c1"));
    assert_eq!(
        group.created_time.unwrap().to_string(),
        "2015-03-31T22:34:51.270Z"
    );
}

#[tokio::test]
async fn test_signature_uses_lowercase_path() {
    let server = MockServer::start().await;
    let mixed_path = "/v1/api/config/billinggroup/ABC";

    Mock::given(method("GET"))
        .and(path(mixed_path))
        .and(AuthorizationIs(expected_authorization(
            &server,
            "get",
            &mixed_path.to_lowercase(),
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "ABC",
            "name": "upper"
        })))
        .mount(&server)
        .await;

    let client = build_fixed_client(&server);
    let group: BillingGroup = client.get(mixed_path).await.unwrap();
    assert_eq!(group.id, "ABC");
}

#[tokio::test]
async fn test_signature_keeps_host_case() {
    let server = MockServer::start().await;
    let port = server.address().port();

    Mock::given(method("GET"))
        .and(path(endpoints::ZONE))
        .and(AuthorizationIs(signed_header(
            "LocalHost",
            port,
            "GET",
            endpoints::ZONE,
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::builder()
        .root_uri(format!("http://LocalHost:{port}"))
        .access_token("test_token")
        .secret_key("test_secret")
        .nonce_provider(Arc::new(FixedNonce))
        .clock(Arc::new(FixedClock))
        .build()
        .unwrap();

    let zones: Vec<serde_json::Value> = client.get(endpoints::ZONE).await.unwrap();
    assert!(zones.is_empty());
}

#[tokio::test]
async fn test_get_list() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        { "id": "bg1", "name": "Engineering" },
        { "id": "bg2", "name": "Finance" }
    ]);

    Mock::given(method("GET"))
        .and(path(endpoints::BILLING_GROUP))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let groups: Vec<BillingGroup> = client.get(endpoints::BILLING_GROUP).await.unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].name, "Finance");
    assert!(groups[0].created_time.is_none());
}

#[tokio::test]
async fn test_repeated_get_is_identical() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(endpoints::ZONE))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "z1", "name": "us-west-2a", "network": "n1" }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let first: serde_json::Value = client.get(endpoints::ZONE).await.unwrap();
    let second: serde_json::Value = client.get(endpoints::ZONE).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_post_sends_attributes() {
    let server = MockServer::start().await;
    let attrs = RequestBuilder::with_required(["name", "customer"])
        .attr("name", "Integration Test group")
        .attr("customer", "c1")
        .attr("description", "Engineering")
        .build()
        .unwrap();

    Mock::given(method("POST"))
        .and(path(endpoints::BILLING_GROUP))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(serde_json::json!({
            "name": "Integration Test group",
            "customer": "c1",
            "description": "Engineering"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "bg3",
            "name": "Integration Test group",
            "customer": "c1"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let group: BillingGroup = client
        .post(endpoints::BILLING_GROUP, Some(&attrs))
        .await
        .unwrap();
    assert_eq!(group.id, "bg3");
}

#[tokio::test]
async fn test_post_translates_attribute_keys() {
    let server = MockServer::start().await;
    let mut attrs = RequestAttributes::new();
    attrs.insert("requestedState", "DELETED");
    attrs.insert("enableServiceDomain", true);

    Mock::given(method("POST"))
        .and(path("/v2/api/config/workload/w1"))
        .and(body_json(serde_json::json!({
            "requested_state": "DELETED",
            "enable_service_domain": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "w1"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let workload: serde_json::Value = client
        .post(&endpoints::resource(endpoints::WORKLOAD, "w1"), Some(&attrs))
        .await
        .unwrap();
    assert_eq!(workload["id"], "w1");
}

#[tokio::test]
async fn test_post_without_attributes_sends_empty_body() {
    let server = MockServer::start().await;
    let reboot_path = endpoints::subresource(endpoints::INSTANCE, "i1", "reboot");

    Mock::given(method("POST"))
        .and(path(reboot_path.as_str()))
        .and(EmptyBody)
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "id": "r1",
            "status": "DISPATCHED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let reboot: serde_json::Value = client.post(&reboot_path, None).await.unwrap();
    assert_eq!(reboot["status"], "DISPATCHED");
}

#[tokio::test]
async fn test_delete_discards_body() {
    let server = MockServer::start().await;
    let volume_path = endpoints::resource(endpoints::VOLUME, "v1");

    Mock::given(method("DELETE"))
        .and(path(volume_path.as_str()))
        .and(EmptyBody)
        .and(AuthorizationIs(expected_authorization(
            &server,
            "DELETE",
            &volume_path,
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_fixed_client(&server);
    client.delete(&volume_path).await.unwrap();
}

#[tokio::test]
async fn test_delete_as_decodes_body() {
    let server = MockServer::start().await;
    let group_path = endpoints::resource(endpoints::SECURITY_GROUP, "sg1");

    Mock::given(method("DELETE"))
        .and(path(group_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sg1",
            "name": "Integration Test security group",
            "requested_state": "DELETED"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let group: serde_json::Value = client.delete_as(&group_path).await.unwrap();
    assert_eq!(group["requested_state"], "DELETED");
}

#[tokio::test]
async fn test_server_error_maps_to_http_error() {
    let server = MockServer::start().await;
    let body = serde_json::json!({ "error": "database unavailable" });

    Mock::given(method("GET"))
        .and(path(endpoints::VOLUME))
        .respond_with(ResponseTemplate::new(500).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .get::<Vec<serde_json::Value>>(endpoints::VOLUME)
        .await
        .unwrap_err();
    match err {
        BrktError::Http(error) => {
            assert_eq!(error.status, 500);
            assert_eq!(error.message.as_deref(), Some("Internal Server Error"));
            let payload: serde_json::Value = serde_json::from_slice(&error.payload).unwrap();
            assert_eq!(payload, body);
            assert!(error.to_string().contains("database unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_omits_payload_from_message() {
    let server = MockServer::start().await;
    let group_path = endpoints::resource(endpoints::BILLING_GROUP, "gone");

    Mock::given(method("GET"))
        .and(path(group_path.as_str()))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such billing group"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get::<BillingGroup>(&group_path).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        BrktError::Http(error) => {
            assert_eq!(error.to_string(), "404 Not Found");
            assert_eq!(error.payload_text(), "no such billing group");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_body_has_empty_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoints::WORKLOAD))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .post::<serde_json::Value>(endpoints::WORKLOAD, None)
        .await
        .unwrap_err();
    match err {
        BrktError::Http(error) => {
            assert_eq!(error.status, 403);
            assert!(error.payload.is_empty());
            assert_eq!(error.to_string(), "403 Forbidden");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_maps_to_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(endpoints::NETWORK))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .get::<Vec<serde_json::Value>>(endpoints::NETWORK)
        .await
        .unwrap_err();
    assert!(matches!(err, BrktError::Json(_)));
}

#[tokio::test]
async fn test_read_timeout_maps_to_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(endpoints::MACHINE_TYPE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = RestClient::builder()
        .root_uri(server.uri())
        .access_token("test_token")
        .secret_key("test_secret")
        .timeout_millis(100)
        .build()
        .unwrap();

    let err = client
        .get::<Vec<serde_json::Value>>(endpoints::MACHINE_TYPE)
        .await
        .unwrap_err();
    assert!(matches!(err, BrktError::Transport(_)));
}

#[tokio::test]
async fn test_connection_failure_maps_to_transport_error() {
    // Bind and drop a listener to get a port with nothing behind it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = RestClient::builder()
        .root_uri(format!("http://127.0.0.1:{port}"))
        .access_token("test_token")
        .secret_key("test_secret")
        .build()
        .unwrap();

    let err = client
        .get::<serde_json::Value>(endpoints::ZONE)
        .await
        .unwrap_err();
    assert!(matches!(err, BrktError::Transport(_)));
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(endpoints::OPERATING_SYSTEM))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "os1", "platform": "linux", "label": "Ubuntu 14.04" }
        ])))
        .expect(8)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .get::<Vec<serde_json::Value>>(endpoints::OPERATING_SYSTEM)
                .await
        }));
    }

    for handle in handles {
        let systems = handle.await.unwrap().unwrap();
        assert_eq!(systems[0]["platform"], "linux");
    }
}
