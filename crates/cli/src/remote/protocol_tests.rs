// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn fetch_page_wire_format() {
    let msg = ClientMessage::FetchPage {
        request_id: 7,
        endpoint: "thread/id=1/po=false".to_string(),
        token: Some(Token::new("c2")),
        page_size: 20,
    };

    let value: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "fetch_page",
            "request_id": 7,
            "endpoint": "thread/id=1/po=false",
            "token": "c2",
            "page_size": 20,
        })
    );
}

#[test]
fn first_page_request_omits_token() {
    let msg = ClientMessage::FetchPage {
        request_id: 1,
        endpoint: "subscriptions".to_string(),
        token: None,
        page_size: 5,
    };

    assert!(!msg.to_json().unwrap().contains("token"));
}

#[test]
fn subscribe_wire_format() {
    let msg = ClientMessage::Unsubscribe {
        request_id: 3,
        id: "42".to_string(),
    };

    assert_eq!(
        msg.to_json().unwrap(),
        r#"{"type":"unsubscribe","request_id":3,"id":"42"}"#
    );
    assert_eq!(ClientMessage::from_json(&msg.to_json().unwrap()).unwrap(), msg);
    assert_eq!(msg.request_id(), 3);
}

#[test]
fn page_tokens_default_to_terminal() {
    let msg = ServerMessage::from_json(r#"{"type":"page","request_id":2,"items":[{"id":"a"}]}"#)
        .unwrap();

    assert_eq!(
        msg,
        ServerMessage::Page {
            request_id: 2,
            items: vec![json!({ "id": "a" })],
            prev_token: None,
            next_token: None,
        }
    );
}

#[parameterized(
    page_match = { r#"{"type":"page","request_id":5,"items":[]}"#, true },
    page_other = { r#"{"type":"page","request_id":4,"items":[]}"#, false },
    ack_match = { r#"{"type":"ack","request_id":5}"#, true },
    ack_other = { r#"{"type":"ack","request_id":6}"#, false },
    error_match = { r#"{"type":"error","request_id":5,"message":"no"}"#, true },
    error_other = { r#"{"type":"error","request_id":1,"message":"no"}"#, false },
    error_connection = { r#"{"type":"error","message":"shutting down"}"#, true },
)]
fn correlation_by_request_id(frame: &str, answers: bool) {
    assert_eq!(ServerMessage::from_json(frame).unwrap().answers(5), answers);
}

#[parameterized(
    unknown_type = { r#"{"type":"broadcast","request_id":1}"# },
    missing_items = { r#"{"type":"page","request_id":1}"# },
    not_json = { "page 1" },
)]
fn malformed_frames_fail_to_parse(frame: &str) {
    assert!(ServerMessage::from_json(frame).is_err());
}
