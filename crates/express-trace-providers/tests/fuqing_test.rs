// ABOUTME: Integration tests for the Fuqing provider against mock push and query APIs
// ABOUTME: Covers APPCODE subscribe, unsigned callback decoding, real-time queries and the carrier list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{fields, fuqing, FUQING_FIXTURE, SUBSCRIBE_URL};
use express_trace_providers::models::{CanonicalStatus, SubscribeRequest};
use express_trace_providers::{local_time, ErrorCode, ExpressTrace, TraceError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Subscribe
// ============================================================================

#[tokio::test]
async fn test_subscribe_sends_appcode_and_callback_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expresspush"))
        .and(header("authorization", "APPCODE test-app-code"))
        .and(query_param("no", "JD0076810087472"))
        .and(query_param("url", format!("{SUBSCRIBE_URL}?orderId=33334").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orderid": "",
            "status": true,
            "code": "OK",
            "no": "JD0076810087472",
            "message": "订阅成功"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    provider
        .subscribe(&SubscribeRequest::new(33_334, "JD0076810087472"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query_pairs().all(|(name, _)| name != "type"));
}

#[tokio::test]
async fn test_subscribe_sends_carrier_hint_as_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expresspush"))
        .and(query_param("type", "JD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": true})))
        .expect(1)
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let request = SubscribeRequest::new(1, "JD0076810087472").with_carrier_hint("JD");
    provider.subscribe(&request).await.unwrap();
}

#[tokio::test]
async fn test_subscribe_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/expresspush"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": false,
            "code": "201",
            "message": "快递单号错误"
        })))
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let error = provider
        .subscribe(&SubscribeRequest::new(1, "BAD"))
        .await
        .unwrap_err();

    assert!(matches!(
        &error,
        TraceError::ProviderRejected { provider: "fuqing", .. }
    ));
    assert_eq!(error.rejection_message(), Some("快递单号错误"));
}

#[tokio::test]
async fn test_subscribe_status_must_be_boolean() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let error = provider
        .subscribe(&SubscribeRequest::new(1, "X1"))
        .await
        .unwrap_err();
    assert_eq!(error.code(), ErrorCode::InvalidResponse);
}

// ============================================================================
// Callback
// ============================================================================

#[test]
fn test_callback_decodes_fixture() {
    let provider = fuqing("http://127.0.0.1:1");
    let result = provider
        .handle_callback(33_334, &fields(&[("data", FUQING_FIXTURE)]))
        .unwrap();

    assert_eq!(result.order_id, 33_334);
    assert_eq!(result.number, "JD0076810087472");
    assert!(result.is_signed());
    assert_eq!(result.status, Some(CanonicalStatus::Delivered));
    assert_eq!(result.events.len(), 8);
    let fixture: serde_json::Value = serde_json::from_str(FUQING_FIXTURE).unwrap();
    let expected: Vec<(String, String)> = fixture["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|trace| {
            (
                trace["content"].as_str().unwrap().to_owned(),
                trace["time"].as_str().unwrap().to_owned(),
            )
        })
        .collect();
    let actual: Vec<(String, String)> = result
        .events
        .iter()
        .map(|event| (event.info.clone(), local_time::format(&event.time.unwrap())))
        .collect();
    assert_eq!(actual, expected);
    assert_eq!(
        result.latest_event_summary,
        "您的快件已由快递驿站代收，感谢您使用京东物流，期待再次为您服务"
    );
    assert_eq!(
        result.latest_event_time,
        local_time::parse("2022-06-30 10:34:52").unwrap()
    );
    assert_eq!(result.carrier.name, "京东物流");
    assert_eq!(result.carrier.code, "JD");
    assert_eq!(result.carrier.website, "www.jdwl.com");
    assert_eq!(result.carrier.phone, "400-603-3600");
    assert_eq!(result.carrier.logo_url, "https://img3.fegine.com/express/jd.jpg");
}

#[test]
fn test_callback_canonical_serialization() {
    let provider = fuqing("http://127.0.0.1:1");
    let data = r#"{"state":"3","no":"X1","list":[{"time":"2022-06-30 10:34:52","content":"signed"}]}"#;
    let result = provider
        .handle_callback(33_334, &fields(&[("data", data)]))
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["orderId"], "33334");
    assert_eq!(json["number"], "X1");
    assert_eq!(json["signed"], 1);
    assert_eq!(json["status"], "delivered");
    assert_eq!(json["lastTraceInfo"], "signed");
    assert_eq!(json["lastTraceTime"], "2022-06-30 10:34:52");
    assert_eq!(
        json["traces"],
        json!([{"time": "2022-06-30 10:34:52", "info": "signed"}])
    );
}

#[test]
fn test_callback_with_no_events() {
    let provider = fuqing("http://127.0.0.1:1");
    let data = r#"{"state":"0","no":"X1","list":[]}"#;
    let result = provider.handle_callback(5, &fields(&[("data", data)])).unwrap();

    assert!(!result.is_signed());
    assert_eq!(result.status, Some(CanonicalStatus::NoneYet));
    assert!(result.events.is_empty());
    assert!(result.latest_event_summary.is_empty());
    assert!(result.latest_event_time.is_none());
}

#[test]
fn test_callback_unmapped_state() {
    let provider = fuqing("http://127.0.0.1:1");
    let data = r#"{"state":"42","no":"X1","list":[]}"#;
    let result = provider.handle_callback(5, &fields(&[("data", data)])).unwrap();
    assert_eq!(result.status, None);
    assert_eq!(result.status_name(), "");
}

#[test]
fn test_callback_missing_fields_in_order() {
    let provider = fuqing("http://127.0.0.1:1");

    let error = provider
        .handle_callback(0, &fields(&[("data", FUQING_FIXTURE)]))
        .unwrap_err();
    assert!(matches!(error, TraceError::CallbackParam { field: "orderId" }));

    let error = provider
        .handle_callback(1, &fields(&[("data", "")]))
        .unwrap_err();
    assert!(matches!(error, TraceError::CallbackParam { field: "data" }));
    assert_eq!(error.code(), ErrorCode::MissingCallbackParameter);
}

#[test]
fn test_callback_tolerates_null_text_fields() {
    let provider = fuqing("http://127.0.0.1:1");
    let data = r#"{"code":"OK","no":"X1","type":"JD","state":"3","name":"京东物流","site":null,
        "phone":null,"logo":null,"courier":null,"list":[{"time":"2022-06-30 10:34:52","content":null}]}"#;
    let result = provider.handle_callback(7, &fields(&[("data", data)])).unwrap();

    assert!(result.is_signed());
    assert_eq!(result.carrier.name, "京东物流");
    assert!(result.carrier.logo_url.is_empty());
    assert!(result.carrier.website.is_empty());
    assert_eq!(result.events.len(), 1);
    assert!(result.events[0].info.is_empty());
}

#[test]
fn test_callback_null_list_is_no_events() {
    let provider = fuqing("http://127.0.0.1:1");
    let data = r#"{"state":"1","no":"X1","list":null}"#;
    let result = provider.handle_callback(7, &fields(&[("data", data)])).unwrap();
    assert!(result.events.is_empty());
}

#[test]
fn test_callback_malformed_payload() {
    let provider = fuqing("http://127.0.0.1:1");
    let error = provider
        .handle_callback(1, &fields(&[("data", "{\"list\": \"nope\"}")]))
        .unwrap_err();
    assert!(matches!(error, TraceError::CallbackDecode { provider: "fuqing", .. }));
}

// ============================================================================
// Real-time query and carrier list
// ============================================================================

#[tokio::test]
async fn test_query_returns_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kdi"))
        .and(header("authorization", "APPCODE test-app-code"))
        .and(query_param("no", "780098068058"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "0",
            "msg": "ok",
            "result": {
                "number": "780098068058",
                "type": "ZTO",
                "list": [
                    {"time": "2018-03-09 11:59:26", "status": "【石家庄市】 快件已在 【长安三部】 签收"},
                    {"time": "2018-03-09 09:03:10", "status": "【石家庄市】 快件已到达 【长安三部】"}
                ],
                "deliverystatus": "3",
                "issign": "1",
                "expName": "中通快递",
                "expSite": "www.zto.com",
                "expPhone": "95311",
                "logo": "",
                "courier": "",
                "courierPhone": "",
                "updateTime": "2018-03-09 11:59:26",
                "takeTime": "2天20小时14分"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let snapshot = provider.query("780098068058", "").await.unwrap();

    assert_eq!(snapshot.number, "780098068058");
    assert!(snapshot.is_signed());
    assert_eq!(snapshot.canonical_status(), Some(CanonicalStatus::Delivered));
    assert_eq!(snapshot.events().len(), 2);
    assert_eq!(snapshot.carrier().name, "中通快递");
    assert_eq!(snapshot.take_time, "2天20小时14分");
}

#[tokio::test]
async fn test_query_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kdi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "205",
            "msg": "没有信息"
        })))
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let error = provider.query("X1", "ZTO").await.unwrap_err();
    assert_eq!(error.rejection_message(), Some("没有信息"));
}

#[tokio::test]
async fn test_query_rejected_with_null_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/kdi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "201",
            "msg": "快递单号错误",
            "result": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let error = provider.query("X1", "").await.unwrap_err();
    assert_eq!(error.code(), ErrorCode::ProviderRejected);
    assert_eq!(error.rejection_message(), Some("快递单号错误"));
}

#[tokio::test]
async fn test_companies_returns_raw_map() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pushExpressLists"))
        .and(header("authorization", "APPCODE test-app-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "0",
            "msg": "ok",
            "result": {"JD": "京东物流", "ZTO": "中通快递"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let companies = provider.companies().await.unwrap();
    assert_eq!(companies["result"]["JD"], "京东物流");
}

#[tokio::test]
async fn test_companies_unparseable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pushExpressLists"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
        .mount(&server)
        .await;

    let provider = fuqing(&server.uri());
    let error = provider.companies().await.unwrap_err();
    assert_eq!(error.code(), ErrorCode::InvalidResponse);
}
