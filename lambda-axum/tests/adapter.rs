//! End-to-end tests: raw payload in, wire response out.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::body::Body;
use axum::extract::{Query, Request};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;
use http_body_util::BodyExt;
use lambda_axum::prelude::*;
use serde_json::json;

fn alb_payload() -> Vec<u8> {
    json!({
        "httpMethod": "GET",
        "path": "/echo",
        "multiValueHeaders": {
            "x-a": ["1"],
            "x-b": ["21", "22"]
        },
        "requestContext": {"elb": {"targetGroupArn": "arn:aws:elb:tg"}},
        "body": "",
        "isBase64Encoded": false
    })
    .to_string()
    .into_bytes()
}

fn api_gateway_v1_payload(path: &str) -> Vec<u8> {
    json!({
        "resource": path,
        "path": path,
        "httpMethod": "GET",
        "headers": {"Host": "api.example.com"},
        "requestContext": {
            "accountId": "123456789012",
            "identity": {"sourceIp": "10.0.0.1"}
        },
        "body": "",
        "isBase64Encoded": false
    })
    .to_string()
    .into_bytes()
}

#[tokio::test]
async fn alb_multi_value_round_trip() {
    let app = Router::new().route(
        "/echo",
        get(|req: Request| async move {
            assert_eq!(req.headers().get("X-A").unwrap(), "1");
            let b: Vec<_> = req.headers().get_all("X-B").iter().collect();
            assert_eq!(b, ["21", "22"]);

            let mut response = Response::new(Body::from("ok"));
            response
                .headers_mut()
                .append("X-Y", HeaderValue::from_static("1"));
            response
                .headers_mut()
                .append("X-Y", HeaderValue::from_static("2"));
            response
        }),
    );

    let response = LambdaAdapter::new(app)
        .handle_event(&alb_payload())
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "ok");
    assert!(!response.is_base64_encoded);
    let headers = response.multi_value_headers.unwrap();
    assert_eq!(headers["X-Y"], ["1", "2"]);
    assert!(response.headers.is_none());
}

#[tokio::test]
async fn alb_single_value_event_gets_flattened_headers_back() {
    let app = Router::new().route(
        "/echo",
        get(|| async {
            let mut response = Response::new(Body::from("ok"));
            response
                .headers_mut()
                .append("X-Bar", HeaderValue::from_static("2"));
            response
                .headers_mut()
                .append("X-Bar", HeaderValue::from_static("3"));
            response
        }),
    );

    // Single-value target group events bypass detection via a forced type;
    // the response then mirrors the single-value shape.
    let payload = json!({
        "httpMethod": "GET",
        "path": "/echo",
        "headers": {"x-forwarded-for": "198.51.100.7"},
        "requestContext": {"elb": {"targetGroupArn": "arn:aws:elb:tg"}},
        "body": "",
        "isBase64Encoded": false
    })
    .to_string()
    .into_bytes();

    let response = LambdaAdapter::with_options(app, Options::new().request_type(RequestType::Alb))
        .handle_event(&payload)
        .await
        .unwrap();

    assert!(response.multi_value_headers.is_none());
    let headers = response.headers.unwrap();
    assert_eq!(headers["X-Bar"], "2");
    assert_eq!(headers["x-Bar"], "3");
}

#[tokio::test]
async fn api_gateway_v1_flattens_duplicate_headers() {
    let app = Router::new().route(
        "/dup",
        get(|| async {
            let mut response = Response::new(Body::empty());
            response
                .headers_mut()
                .append("X-Bar", HeaderValue::from_static("2"));
            response
                .headers_mut()
                .append("X-Bar", HeaderValue::from_static("3"));
            response
        }),
    );

    let response = LambdaAdapter::new(app)
        .handle_event(&api_gateway_v1_payload("/dup"))
        .await
        .unwrap();

    let headers = response.headers.unwrap();
    assert!(response.multi_value_headers.is_none());
    assert_eq!(headers.len(), 2);
    for key in headers.keys() {
        assert!(key.eq_ignore_ascii_case("x-bar"));
    }
    // Original order: first occurrence keeps the unperturbed spelling.
    assert_eq!(headers["X-Bar"], "2");
    assert_eq!(headers["x-Bar"], "3");
}

#[tokio::test]
async fn query_parameters_reach_the_handler() {
    #[derive(serde::Deserialize)]
    struct Add {
        first: i64,
        second: i64,
    }

    let app = Router::new().route(
        "/add",
        get(|Query(add): Query<Add>| async move { format!("{}", add.first + add.second) }),
    );

    let payload = json!({
        "resource": "/add",
        "path": "/add",
        "httpMethod": "GET",
        "multiValueQueryStringParameters": {"first": ["12"], "second": ["30"]},
        "requestContext": {"accountId": "123456789012", "identity": {"sourceIp": ""}},
        "body": "",
        "isBase64Encoded": false
    })
    .to_string()
    .into_bytes();

    let response = LambdaAdapter::new(app).handle_event(&payload).await.unwrap();
    assert_eq!(response.body, "42");
}

#[tokio::test]
async fn escaped_path_is_decoded_for_the_handler() {
    let app = Router::new().fallback(|req: Request| async move {
        assert_eq!(req.decoded_path(), "/path/encode/test|");
        "seen"
    });

    let response = LambdaAdapter::new(app)
        .handle_event(&api_gateway_v1_payload("/path/encode%2Ftest%7C"))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "seen");
}

#[tokio::test]
async fn handler_reads_the_original_event() {
    let app = Router::new().route(
        "/context",
        get(|req: Request| async move {
            let event = req.api_gateway_v1_event().unwrap();
            assert_eq!(req.source_ip(), Some("10.0.0.1"));
            event.request_context.account_id.clone()
        }),
    );

    let response = LambdaAdapter::new(app)
        .handle_event(&api_gateway_v1_payload("/context"))
        .await
        .unwrap();

    assert_eq!(response.body, "123456789012");
}

#[tokio::test]
async fn base64_request_body_decodes_lazily() {
    let app = Router::new().route(
        "/upload",
        post(|req: Request| async move {
            let bytes = req.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&bytes[..], b"binary payload");
            "stored"
        }),
    );

    let payload = json!({
        "resource": "/upload",
        "path": "/upload",
        "httpMethod": "POST",
        "requestContext": {"accountId": "123456789012", "identity": {"sourceIp": ""}},
        "body": STANDARD.encode("binary payload"),
        "isBase64Encoded": true
    })
    .to_string()
    .into_bytes();

    let response = LambdaAdapter::new(app).handle_event(&payload).await.unwrap();
    assert_eq!(response.body, "stored");
}

#[tokio::test]
async fn accept_all_binary_content_types_encode_any_body() {
    let app = Router::new().route("/raw", get(|| async { "plain text output" }));

    let response = LambdaAdapter::with_options(
        app,
        Options::new().binary_content_types(["*/*"]),
    )
    .handle_event(&api_gateway_v1_payload("/raw"))
    .await
    .unwrap();

    assert!(response.is_base64_encoded);
    assert_eq!(response.body, STANDARD.encode("plain text output"));
}

#[tokio::test]
async fn forced_type_mismatch_fails_before_the_handler_runs() {
    let invoked = Arc::new(AtomicBool::new(false));
    let flag = invoked.clone();
    let app = Router::new().fallback(move || {
        flag.store(true, Ordering::SeqCst);
        async { "should not run" }
    });

    let adapter =
        LambdaAdapter::with_options(app, Options::new().request_type(RequestType::Alb));
    let result = adapter.handle_event(&api_gateway_v1_payload("/any")).await;

    assert!(matches!(result, Err(EventError::UnexpectedAlbRequest)));
    assert!(!invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn websocket_action_override_routes_to_virtual_endpoint() {
    let app = Router::new().route(
        "/ws/message",
        post(|req: Request| async move {
            let connection = req
                .headers()
                .get("Connection-Id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("")
                .to_string();
            assert_eq!(req.request_type(), Some(RequestType::Websocket));
            connection
        }),
    );

    let payload = json!({
        "requestContext": {
            "apiId": "ws-api",
            "eventType": "MESSAGE",
            "connectionId": "conn-42",
            "identity": {"sourceIp": "10.1.1.1"}
        },
        "body": "",
        "isBase64Encoded": false
    })
    .to_string()
    .into_bytes();

    let adapter = LambdaAdapter::with_options(
        app,
        Options::new()
            .websocket_action_override("message", ActionOverride::new("POST", "/ws/message")),
    );
    let response = adapter.handle_event(&payload).await.unwrap();

    assert_eq!(response.body, "conn-42");
}

#[tokio::test]
async fn sqs_records_arrive_as_post_body() {
    let app = Router::new().route(
        "/sqs",
        post(|req: Request| async move {
            let bytes = req.into_body().collect().await.unwrap().to_bytes();
            let records: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
            format!("{} records", records.len())
        }),
    );

    let payload = json!({
        "Records": [
            {"eventSource": "aws:sqs", "body": "a"},
            {"eventSource": "aws:sqs", "body": "b"}
        ]
    })
    .to_string()
    .into_bytes();

    let response = LambdaAdapter::new(app).handle_event(&payload).await.unwrap();

    assert_eq!(response.body, "2 records");
    assert!(response.headers.is_none());
    assert!(response.multi_value_headers.is_none());
}

#[tokio::test]
async fn api_gateway_v2_gets_multi_value_headers_back() {
    let app = Router::new().route(
        "/v2",
        get(|| async {
            let mut response = Response::new(Body::from("v2 ok"));
            response
                .headers_mut()
                .insert("x-one", HeaderValue::from_static("only"));
            response
        }),
    );

    let payload = json!({
        "version": "2.0",
        "headers": {"host": "api.example.com"},
        "requestContext": {
            "http": {"method": "GET", "path": "/v2", "sourceIp": "192.0.2.1"}
        },
        "body": "",
        "isBase64Encoded": false
    })
    .to_string()
    .into_bytes();

    let response = LambdaAdapter::new(app).handle_event(&payload).await.unwrap();

    let headers = response.multi_value_headers.unwrap();
    assert_eq!(headers["X-One"], ["only"]);
    assert_eq!(response.body, "v2 ok");
}

#[tokio::test]
async fn invoke_serializes_the_wire_response() {
    let app = Router::new().route("/", get(|| async { "hello" }));

    let bytes = LambdaAdapter::new(app)
        .invoke(&api_gateway_v1_payload("/"))
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["statusCode"], 200);
    assert_eq!(value["body"], "hello");
}

#[tokio::test]
async fn debug_log_does_not_change_the_response() {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let app = Router::new().route("/echo", get(|| async { "ok" }));
    let response = LambdaAdapter::with_options(app, Options::new().debug_log(true))
        .handle_event(&alb_payload())
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn unrecognized_payload_is_rejected() {
    let app = Router::new().fallback(|| async { "unreachable" });
    let result = LambdaAdapter::new(app)
        .handle_event(br#"{"not": "an event"}"#)
        .await;

    assert!(matches!(result, Err(EventError::UnrecognizedPayload)));
}
