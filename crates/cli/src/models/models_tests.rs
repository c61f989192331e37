// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use serde_json::json;
use yare::parameterized;

#[test]
fn decodes_a_full_post() {
    let raw = json!({
        "id": "p1",
        "title": "Hello",
        "author": "ann",
        "body": "first!",
        "posted_at": "2026-03-01T12:00:00Z",
        "reply_count": 4,
    });

    let post: Post = decode(raw).unwrap();

    assert_eq!(post.id, "p1");
    assert_eq!(post.title.as_deref(), Some("Hello"));
    assert_eq!(post.author.as_deref(), Some("ann"));
    assert_eq!(post.body, "first!");
    assert_eq!(
        post.posted_at,
        Some(chrono::Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
    );
    assert_eq!(post.reply_count, Some(4));
}

#[test]
fn numeric_ids_become_strings() {
    let post: Post = decode(json!({ "id": 12345 })).unwrap();
    assert_eq!(post.id, "12345");
    assert_eq!(post.item_id(), "12345");
    assert_eq!(post, Post::placeholder("12345"));
}

#[parameterized(
    missing_id = { json!({ "body": "x" }) },
    empty_id = { json!({ "id": "  " }) },
    id_is_object = { json!({ "id": { "n": 1 } }) },
    not_an_object = { json!(["p1"]) },
    bad_timestamp = { json!({ "id": "p1", "posted_at": "yesterday" }) },
)]
fn malformed_posts_are_decode_errors(raw: Value) {
    let err = decode::<Post>(raw).unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn decodes_categories_and_notices() {
    let category: Category = decode(json!({ "id": 3, "name": "Tech" })).unwrap();
    assert_eq!(category.id, "3");
    assert_eq!(category.description, None);

    let notice: Notice = decode(json!({ "id": "2026-10-18", "text": "Maintenance tonight" })).unwrap();
    assert_eq!(notice.item_id(), "2026-10-18");
}

#[test]
fn category_requires_a_name() {
    assert!(decode::<Category>(json!({ "id": 3 })).is_err());
}

#[test]
fn post_payload_survives_the_store_format() {
    let post = Post {
        title: Some("t".to_string()),
        ..Post::placeholder("p9")
    };

    let text = serde_json::to_string(&post).unwrap();

    assert!(!text.contains("author"));
    assert_eq!(serde_json::from_str::<Post>(&text).unwrap(), post);
}
