// ABOUTME: Integration tests for the Kuaidi100 provider against a mock poll API
// ABOUTME: Covers subscribe envelopes, signed callback verification and decoding, and real-time queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{fields, kuaidi100, KUAIDI100_FIXTURE, KUAIDI100_FIXTURE_SIGN, SUBSCRIBE_URL};
use express_trace_providers::models::{CanonicalStatus, SubscribeRequest};
use express_trace_providers::signature::md5_upper_hex;
use express_trace_providers::{local_time, ErrorCode, ExpressTrace, TraceError};
use reqwest::Url;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query_value(url: &Url, key: &str) -> String {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
        .unwrap()
}

// ============================================================================
// Subscribe
// ============================================================================

#[tokio::test]
async fn test_subscribe_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/poll"))
        .and(query_param("schema", "json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "returnCode": "200",
            "message": "提交成功"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let request = SubscribeRequest::new(33_334, "JD0076810060555");
    provider.subscribe(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let param: Value = serde_json::from_str(&query_value(&requests[0].url, "param")).unwrap();
    assert_eq!(param["company"], "");
    assert_eq!(param["key"], "test-key");
    assert_eq!(param["number"], "JD0076810060555");
    assert_eq!(param["parameters"]["autoCom"], "1");
    assert_eq!(param["parameters"]["resultv2"], "0");
    assert_eq!(param["parameters"]["salt"], "123");
    assert_eq!(
        param["parameters"]["callbackurl"],
        format!("{SUBSCRIBE_URL}?orderId=33334")
    );
}

#[tokio::test]
async fn test_subscribe_passes_carrier_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/poll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let request = SubscribeRequest::new(7, "YT0000000001").with_carrier_hint("yuantong");
    provider.subscribe(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let param: Value = serde_json::from_str(&query_value(&requests[0].url, "param")).unwrap();
    assert_eq!(param["company"], "yuantong");
}

#[tokio::test]
async fn test_subscribe_rejected_with_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/poll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": false,
            "returnCode": "700",
            "message": "单号错误"
        })))
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let error = provider
        .subscribe(&SubscribeRequest::new(1, "BAD"))
        .await
        .unwrap_err();

    assert_eq!(error.code(), ErrorCode::ProviderRejected);
    assert_eq!(error.rejection_message(), Some("单号错误"));
}

#[tokio::test]
async fn test_subscribe_rejected_without_message_uses_generic_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": false})))
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let error = provider
        .subscribe(&SubscribeRequest::new(1, "X1"))
        .await
        .unwrap_err();

    assert_eq!(error.rejection_message(), Some("请求失败"));
}

#[tokio::test]
async fn test_subscribe_unparseable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let error = provider
        .subscribe(&SubscribeRequest::new(1, "X1"))
        .await
        .unwrap_err();

    assert!(matches!(error, TraceError::Response { provider: "kuaidi100", .. }));
    assert_eq!(error.code(), ErrorCode::InvalidResponse);
}

#[tokio::test]
async fn test_subscribe_transport_failure() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let error = provider
        .subscribe(&SubscribeRequest::new(1, "X1"))
        .await
        .unwrap_err();

    assert_eq!(error.code(), ErrorCode::TransportFailed);
}

#[tokio::test]
async fn test_subscribe_invalid_request_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": true})))
        .expect(0)
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    for request in [SubscribeRequest::new(0, "X1"), SubscribeRequest::new(1, "")] {
        let error = provider.subscribe(&request).await.unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidParameter);
    }
}

// ============================================================================
// Callback
// ============================================================================

#[test]
fn test_callback_decodes_signed_fixture() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let result = provider
        .handle_callback(
            33_334,
            &fields(&[("param", KUAIDI100_FIXTURE), ("sign", KUAIDI100_FIXTURE_SIGN)]),
        )
        .unwrap();

    assert_eq!(result.order_id, 33_334);
    assert_eq!(result.number, "JD0076810060555");
    assert!(result.is_signed());
    // Sub-state 304 has no canonical mapping
    assert_eq!(result.status, None);
    assert_eq!(result.status_name(), "");
    assert_eq!(result.events.len(), 5);
    let fixture: Value = serde_json::from_str(KUAIDI100_FIXTURE).unwrap();
    let expected: Vec<&str> = fixture["lastResult"]["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|trace| trace["context"].as_str().unwrap())
        .collect();
    let actual: Vec<&str> = result.events.iter().map(|event| event.info.as_str()).collect();
    assert_eq!(actual, expected);
    assert_eq!(
        result.latest_event_summary,
        "您的快件已由快递驿站代收，感谢您使用京东物流，期待再次为您服务"
    );
    assert_eq!(
        result.latest_event_time,
        local_time::parse("2022-06-30 10:34:33").unwrap()
    );
    assert_eq!(result.events[0].info, result.latest_event_summary);
    assert_eq!(result.carrier.code, "jd");
    assert_eq!(result.carrier.name, "京东物流");
}

#[test]
fn test_callback_accepts_lowercase_signature() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let sign = KUAIDI100_FIXTURE_SIGN.to_ascii_lowercase();
    let result = provider.handle_callback(1, &fields(&[("param", KUAIDI100_FIXTURE), ("sign", sign.as_str())]));
    assert!(result.is_ok());
}

#[test]
fn test_callback_rejects_tampered_payload() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let tampered = KUAIDI100_FIXTURE.replacen("\"ischeck\":\"1\"", "\"ischeck\":\"0\"", 1);
    assert_ne!(tampered, KUAIDI100_FIXTURE);

    let error = provider
        .handle_callback(1, &fields(&[("param", tampered.as_str()), ("sign", KUAIDI100_FIXTURE_SIGN)]))
        .unwrap_err();

    assert!(matches!(error, TraceError::Signature));
    assert_eq!(error.code(), ErrorCode::SignatureMismatch);
}

#[test]
fn test_callback_rejects_missing_signature() {
    let provider = kuaidi100("http://127.0.0.1:1");
    for form in [
        fields(&[("param", KUAIDI100_FIXTURE)]),
        fields(&[("param", KUAIDI100_FIXTURE), ("sign", "")]),
    ] {
        let error = provider.handle_callback(1, &form).unwrap_err();
        assert!(matches!(error, TraceError::Signature));
    }
}

#[test]
fn test_signature_checked_before_decoding() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let error = provider
        .handle_callback(1, &fields(&[("param", "not json"), ("sign", "00")]))
        .unwrap_err();
    assert!(matches!(error, TraceError::Signature));
}

#[test]
fn test_callback_with_valid_signature_but_bad_json() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let payload = "{\"lastResult\": 5}";
    let sign = md5_upper_hex(&[payload, common::KUAIDI100_SALT]);
    let error = provider
        .handle_callback(1, &fields(&[("param", payload), ("sign", sign.as_str())]))
        .unwrap_err();
    assert!(matches!(error, TraceError::CallbackDecode { provider: "kuaidi100", .. }));
}

#[test]
fn test_callback_missing_fields_in_order() {
    let provider = kuaidi100("http://127.0.0.1:1");

    let error = provider
        .handle_callback(0, &fields(&[("param", KUAIDI100_FIXTURE)]))
        .unwrap_err();
    assert!(matches!(error, TraceError::CallbackParam { field: "orderId" }));
    assert_eq!(error.code(), ErrorCode::MissingCallbackParameter);

    let error = provider
        .handle_callback(1, &fields(&[("sign", KUAIDI100_FIXTURE_SIGN)]))
        .unwrap_err();
    assert!(matches!(error, TraceError::CallbackParam { field: "param" }));
}

#[test]
fn test_callback_delivered_state_maps_to_delivered() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let payload = json!({
        "status": "polling",
        "message": "",
        "lastResult": {
            "message": "ok",
            "nu": "X1",
            "ischeck": "1",
            "com": "shunfeng",
            "state": "3",
            "data": [{"time": "2022-06-30 10:34:52", "context": "signed"}]
        }
    })
    .to_string();
    let sign = md5_upper_hex(&[payload.as_str(), common::KUAIDI100_SALT]);

    let result = provider
        .handle_callback(33_334, &fields(&[("param", payload.as_str()), ("sign", sign.as_str())]))
        .unwrap();

    assert_eq!(result.status, Some(CanonicalStatus::Delivered));
    assert_eq!(result.signed_flag, 1);
    assert_eq!(result.latest_event_summary, "signed");
    assert_eq!(result.carrier.name, "顺丰速运");
}

#[test]
fn test_signed_callback_with_null_messages_decodes() {
    let provider = kuaidi100("http://127.0.0.1:1");
    let payload = json!({
        "status": "polling",
        "message": null,
        "lastResult": {
            "message": null,
            "nu": "X1",
            "ischeck": "0",
            "com": "shunfeng",
            "condition": null,
            "state": "0",
            "data": [{"time": "2022-06-30 08:06:02", "context": "已揽收", "status": null}]
        }
    })
    .to_string();
    let sign = md5_upper_hex(&[payload.as_str(), common::KUAIDI100_SALT]);

    let result = provider
        .handle_callback(33_334, &fields(&[("param", payload.as_str()), ("sign", sign.as_str())]))
        .unwrap();

    assert_eq!(result.number, "X1");
    assert!(!result.is_signed());
    assert_eq!(result.latest_event_summary, "已揽收");
}

// ============================================================================
// Real-time query
// ============================================================================

#[tokio::test]
async fn test_query_signs_form_and_returns_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/poll/query.do"))
        .and(body_string_contains("customer=test-customer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok",
            "nu": "YT0000000001",
            "ischeck": "0",
            "condition": "F00",
            "com": "yuantong",
            "status": "200",
            "state": "0",
            "data": [
                {"time": "2022-06-29 22:30:20", "ftime": "2022-06-29 22:30:20", "context": "已发出"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let snapshot = provider.query("YT0000000001", "yuantong").await.unwrap();

    assert_eq!(snapshot.nu, "YT0000000001");
    assert_eq!(snapshot.canonical_status(), Some(CanonicalStatus::InTransit));
    assert!(!snapshot.is_signed().unwrap());
    assert_eq!(snapshot.events()[0].info, "已发出");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    let form = Url::parse(&format!("http://localhost/?{body}")).unwrap();
    let param = query_value(&form, "param");
    let param_json: Value = serde_json::from_str(&param).unwrap();
    assert_eq!(param_json["com"], "yuantong");
    assert_eq!(param_json["num"], "YT0000000001");
    assert_eq!(
        query_value(&form, "sign"),
        md5_upper_hex(&[param.as_str(), "test-key", "test-customer"])
    );
}

#[tokio::test]
async fn test_query_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/poll/query.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": false,
            "returnCode": "500",
            "message": "查询无结果，请隔段时间再查"
        })))
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let error = provider.query("X1", "yuantong").await.unwrap_err();
    assert_eq!(error.rejection_message(), Some("查询无结果，请隔段时间再查"));
}

#[tokio::test]
async fn test_query_requires_company() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = kuaidi100(&server.uri());
    let error = provider.query("X1", "").await.unwrap_err();
    assert_eq!(error.code(), ErrorCode::InvalidParameter);
}
