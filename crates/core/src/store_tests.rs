// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_support::{ids, item, items, thread_query, TestItem};
use chrono::TimeZone;
use yare::parameterized;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn write(
    mode: WriteMode,
    page: &[&str],
    prev: Option<&str>,
    next: Option<&str>,
    secs: i64,
) -> PageWrite<TestItem> {
    PageWrite {
        mode,
        items: items(page),
        prev_token: prev.map(Token::from),
        next_token: next.map(Token::from),
        fetched_at: at(secs),
    }
}

fn read_ids(store: &PageStore, query: &LogicalQuery) -> Vec<String> {
    let rows: Vec<Row<TestItem>> = store.read_page(query, Position::Start, 1000).unwrap();
    rows.into_iter().map(|r| r.item.id).collect()
}

fn ordinals(store: &PageStore, query: &LogicalQuery) -> Vec<i64> {
    let rows: Vec<Row<TestItem>> = store.read_page(query, Position::Start, 1000).unwrap();
    rows.into_iter().map(|r| r.ordinal).collect()
}

#[test]
fn migrations_are_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();
}

#[test]
fn open_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache.db");

    let store = PageStore::open(&path).unwrap();
    store
        .write_page(&thread_query(1), &write(WriteMode::Replace, &["a"], None, None, 10))
        .unwrap();
    drop(store);

    let reopened = PageStore::open(&path).unwrap();
    assert_eq!(read_ids(&reopened, &thread_query(1)), vec!["a"]);
}

#[test]
fn empty_query_has_no_rows_or_key() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);

    assert_eq!(read_ids(&store, &q), Vec::<String>::new());
    assert_eq!(store.read_count(&q).unwrap(), 0);
    assert_eq!(store.read_remote_key(&q).unwrap(), None);
    assert_eq!(store.bounds(&q).unwrap(), None);
}

#[test]
fn replace_writes_rows_in_page_order_and_records_key() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);

    let summary = store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b", "c"], None, Some("p1"), 100))
        .unwrap();

    assert_eq!(summary, WriteSummary { inserted: 3, updated: 0 });
    assert_eq!(read_ids(&store, &q), vec!["a", "b", "c"]);
    assert_eq!(ordinals(&store, &q), vec![0, 1, 2]);
    let key = store.read_remote_key(&q).unwrap().unwrap();
    assert_eq!(key.prev_token, None);
    assert_eq!(key.next_token, Some(Token::from("p1")));
    assert_eq!(key.last_fetched_at, at(100));
}

#[test]
fn replace_evicts_previous_rows() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b"], None, Some("p1"), 100))
        .unwrap();
    store
        .write_page(&q, &write(WriteMode::Append, &["c"], Some("b1"), None, 110))
        .unwrap();

    store
        .write_page(&q, &write(WriteMode::Replace, &["x", "a"], None, Some("p1"), 120))
        .unwrap();

    assert_eq!(read_ids(&store, &q), vec!["x", "a"]);
    assert_eq!(ordinals(&store, &q), vec![0, 1]);
}

#[test]
fn append_places_new_items_after_existing() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b"], None, Some("p1"), 100))
        .unwrap();

    store
        .write_page(&q, &write(WriteMode::Append, &["c", "d"], Some("b1"), Some("p2"), 110))
        .unwrap();

    assert_eq!(read_ids(&store, &q), vec!["a", "b", "c", "d"]);
    assert_eq!(ordinals(&store, &q), vec![0, 1, 2, 3]);
    let key = store.read_remote_key(&q).unwrap().unwrap();
    assert_eq!(key.prev_token, None, "append keeps the known start");
    assert_eq!(key.next_token, Some(Token::from("p2")));
}

#[test]
fn prepend_places_new_items_before_existing_in_page_order() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["c", "d"], Some("b1"), Some("p2"), 100))
        .unwrap();

    store
        .write_page(&q, &write(WriteMode::Prepend, &["a", "b"], None, Some("p1"), 110))
        .unwrap();

    assert_eq!(read_ids(&store, &q), vec!["a", "b", "c", "d"]);
    assert_eq!(ordinals(&store, &q), vec![-2, -1, 0, 1]);
    let key = store.read_remote_key(&q).unwrap().unwrap();
    assert_eq!(key.prev_token, None);
    assert_eq!(key.next_token, Some(Token::from("p2")), "prepend keeps the known end");
}

#[test]
fn refetched_item_keeps_its_ordinal() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b", "c"], None, Some("p1"), 100))
        .unwrap();

    let mut updated = item("b");
    updated.body = "edited".to_string();
    let page = PageWrite {
        mode: WriteMode::Append,
        items: vec![updated, item("d")],
        prev_token: Some(Token::from("b1")),
        next_token: None,
        fetched_at: at(110),
    };
    let summary = store.write_page(&q, &page).unwrap();

    assert_eq!(summary, WriteSummary { inserted: 1, updated: 1 });
    let rows: Vec<Row<TestItem>> = store.read_page(&q, Position::Start, 10).unwrap();
    let page: Vec<TestItem> = rows.iter().map(|r| r.item.clone()).collect();
    assert_eq!(ids(&page), vec!["a", "b", "c", "d"]);
    assert_eq!(rows[1].ordinal, 1);
    assert_eq!(rows[1].item.body, "edited");
    assert_eq!(rows[3].ordinal, 3, "no gap left by the updated item");
}

#[test]
fn duplicate_ids_within_one_page_collapse_to_one_row() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);

    store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b", "a"], None, None, 100))
        .unwrap();

    assert_eq!(read_ids(&store, &q), vec!["a", "b"]);
}

#[test]
fn empty_page_still_records_the_key() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);

    store
        .write_page(&q, &write(WriteMode::Replace, &[], None, None, 100))
        .unwrap();

    assert_eq!(store.read_count(&q).unwrap(), 0);
    let key = store.read_remote_key(&q).unwrap().unwrap();
    assert!(key.end_reached());
    assert!(key.start_reached());
}

#[test]
fn last_fetched_at_never_moves_backwards() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["a"], None, Some("p1"), 200))
        .unwrap();

    store
        .write_page(&q, &write(WriteMode::Append, &["b"], Some("b1"), None, 150))
        .unwrap();

    let key = store.read_remote_key(&q).unwrap().unwrap();
    assert_eq!(key.last_fetched_at, at(200));
}

#[test]
fn queries_are_isolated() {
    let store = PageStore::open_in_memory().unwrap();
    let po = thread_query(1).with("po", true);
    let all = thread_query(1);

    store
        .write_page(&all, &write(WriteMode::Replace, &["a", "b"], None, None, 100))
        .unwrap();
    store
        .write_page(&po, &write(WriteMode::Replace, &["a"], None, None, 100))
        .unwrap();
    store.invalidate(&all).unwrap();

    assert_eq!(read_ids(&store, &all), Vec::<String>::new());
    assert_eq!(store.read_remote_key(&all).unwrap(), None);
    assert_eq!(read_ids(&store, &po), vec!["a"]);
}

#[parameterized(
    start = { Position::Start, 2, &["a", "b"] },
    from_middle = { Position::From(2), 2, &["c", "d"] },
    from_past_end = { Position::From(9), 2, &[] },
    before_end = { Position::Before(5), 2, &["d", "e"] },
    before_clipped = { Position::Before(1), 3, &["a"] },
    before_start = { Position::Before(0), 3, &[] },
)]
fn read_page_positions(position: Position, limit: usize, expected: &[&str]) {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b", "c", "d", "e"], None, None, 100))
        .unwrap();

    let rows: Vec<Row<TestItem>> = store.read_page(&q, position, limit).unwrap();
    let got: Vec<String> = rows.into_iter().map(|r| r.item.id).collect();
    assert_eq!(got, expected);
}

#[test]
fn rows_before_and_after() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b", "c"], None, None, 100))
        .unwrap();

    assert!(store.has_rows_after(&q, 1).unwrap());
    assert!(!store.has_rows_after(&q, 2).unwrap());
    assert!(store.has_rows_before(&q, 1).unwrap());
    assert!(!store.has_rows_before(&q, 0).unwrap());
    assert_eq!(store.bounds(&q).unwrap(), Some((0, 2)));
}

/// Every subsequence read back must be strictly ordered and duplicate free.
#[test]
fn ordering_is_total_after_mixed_writes() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["m", "n"], Some("b1"), Some("p1"), 100))
        .unwrap();
    store
        .write_page(&q, &write(WriteMode::Append, &["n", "o", "p"], Some("b2"), Some("p2"), 101))
        .unwrap();
    store
        .write_page(&q, &write(WriteMode::Prepend, &["k", "l", "m"], Some("b0"), Some("p0"), 102))
        .unwrap();
    store
        .write_page(&q, &write(WriteMode::Append, &["q"], None, None, 103))
        .unwrap();

    let ords = ordinals(&store, &q);
    assert!(ords.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(read_ids(&store, &q), vec!["k", "l", "m", "n", "o", "p", "q"]);
}

#[test]
fn failed_write_leaves_store_untouched() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    store
        .write_page(&q, &write(WriteMode::Replace, &["a", "b"], None, Some("p1"), 100))
        .unwrap();
    store
        .execute_batch(
            "CREATE TRIGGER poison BEFORE INSERT ON rows WHEN NEW.item_id = 'poison'
             BEGIN SELECT RAISE(ABORT, 'poisoned'); END;",
        )
        .unwrap();
    let before = store.dump().unwrap();

    let result = store.write_page(
        &q,
        &write(WriteMode::Replace, &["x", "poison", "y"], None, None, 200),
    );

    assert!(matches!(result, Err(Error::Database(_))));
    assert_eq!(store.dump().unwrap(), before);
}

#[test]
fn find_item_searches_every_query() {
    let store = PageStore::open_in_memory().unwrap();
    store
        .write_page(&thread_query(1), &write(WriteMode::Replace, &["a"], None, None, 100))
        .unwrap();
    store
        .write_page(&thread_query(2), &write(WriteMode::Replace, &["b"], None, None, 100))
        .unwrap();

    let found: Option<TestItem> = store.find_item("b").unwrap();
    assert_eq!(found, Some(item("b")));
    let missing: Option<TestItem> = store.find_item("zzz").unwrap();
    assert_eq!(missing, None);
}

#[test]
fn summaries_list_every_known_query() {
    let store = PageStore::open_in_memory().unwrap();
    store
        .write_page(&thread_query(1), &write(WriteMode::Replace, &["a", "b"], None, Some("p1"), 100))
        .unwrap();
    store
        .write_page(&thread_query(2), &write(WriteMode::Replace, &[], None, None, 100))
        .unwrap();

    let summaries = store.summaries().unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].query, thread_query(1));
    assert_eq!(summaries[0].rows, 2);
    assert_eq!(summaries[0].bounds, Some((0, 1)));
    assert_eq!(summaries[1].rows, 0);
    assert!(summaries[1].remote_key.as_ref().unwrap().end_reached());
}

// Pending mutations

fn subscribe(store: &PageStore, q: &LogicalQuery, id: &str, secs: i64) -> i64 {
    let payload = serde_json::to_string(&item(id)).unwrap();
    store
        .apply_local_mutation(q, id, MutationAction::Subscribe, Some(&payload), at(secs))
        .unwrap()
}

fn unsubscribe(store: &PageStore, q: &LogicalQuery, id: &str, secs: i64) -> i64 {
    store
        .apply_local_mutation(q, id, MutationAction::Unsubscribe, None, at(secs))
        .unwrap()
}

#[test]
fn local_subscribe_appends_row_and_records_pending() {
    let store = PageStore::open_in_memory().unwrap();
    let q = LogicalQuery::new("subscriptions");
    store
        .write_page(&q, &write(WriteMode::Replace, &["1", "2"], None, None, 100))
        .unwrap();

    let seq = subscribe(&store, &q, "42", 110);

    assert_eq!(read_ids(&store, &q), vec!["1", "2", "42"]);
    let pending = store.pending_mutations(&q).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].seq, seq);
    assert_eq!(pending[0].action, MutationAction::Subscribe);
    assert_eq!(pending[0].target_id, "42");
    assert!(store.has_pending(&q).unwrap());
}

#[test]
fn local_unsubscribe_removes_row() {
    let store = PageStore::open_in_memory().unwrap();
    let q = LogicalQuery::new("subscriptions");
    store
        .write_page(&q, &write(WriteMode::Replace, &["1", "42", "3"], None, None, 100))
        .unwrap();

    unsubscribe(&store, &q, "42", 110);

    assert_eq!(read_ids(&store, &q), vec!["1", "3"]);
}

#[test]
fn new_action_supersedes_pending_one() {
    let store = PageStore::open_in_memory().unwrap();
    let q = LogicalQuery::new("subscriptions");

    let first = subscribe(&store, &q, "42", 100);
    let second = unsubscribe(&store, &q, "42", 101);

    let pending = store.pending_mutations(&q).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].action, MutationAction::Unsubscribe);
    assert!(second > first);
    assert!(!store.delete_pending(first).unwrap(), "stale seq deletes nothing");
    assert_eq!(store.pending_count().unwrap(), 1);
    assert!(store.delete_pending(second).unwrap());
    assert!(!store.has_pending(&q).unwrap());
}

#[test]
fn pending_are_listed_in_sequence_order() {
    let store = PageStore::open_in_memory().unwrap();
    let q = LogicalQuery::new("subscriptions");

    subscribe(&store, &q, "b", 100);
    unsubscribe(&store, &q, "a", 101);
    subscribe(&store, &q, "c", 102);

    let targets: Vec<String> = store
        .pending_mutations(&q)
        .unwrap()
        .into_iter()
        .map(|p| p.target_id)
        .collect();
    assert_eq!(targets, vec!["b", "a", "c"]);
}

#[test]
fn refresh_does_not_resurrect_pending_unsubscribe() {
    let store = PageStore::open_in_memory().unwrap();
    let q = LogicalQuery::new("subscriptions");
    store
        .write_page(&q, &write(WriteMode::Replace, &["1", "42"], None, None, 100))
        .unwrap();
    unsubscribe(&store, &q, "42", 110);

    store
        .write_page(&q, &write(WriteMode::Replace, &["1", "42", "3"], None, None, 120))
        .unwrap();

    assert_eq!(read_ids(&store, &q), vec!["1", "3"]);
}

#[test]
fn refresh_keeps_pending_subscribe_visible() {
    let store = PageStore::open_in_memory().unwrap();
    let q = LogicalQuery::new("subscriptions");
    subscribe(&store, &q, "42", 100);

    store
        .write_page(&q, &write(WriteMode::Replace, &["1", "2"], None, None, 120))
        .unwrap();

    assert_eq!(read_ids(&store, &q), vec!["1", "2", "42"]);
}

#[test]
fn pending_overlay_is_scoped_to_its_query() {
    let store = PageStore::open_in_memory().unwrap();
    let subs = LogicalQuery::new("subscriptions");
    let other = thread_query(1);
    unsubscribe(&store, &subs, "42", 100);

    store
        .write_page(&other, &write(WriteMode::Replace, &["42"], None, None, 120))
        .unwrap();

    assert_eq!(read_ids(&store, &other), vec!["42"]);
}

// Change notification

#[tokio::test]
async fn commits_notify_subscribers_of_that_query_only() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    let other = thread_query(2);
    let mut rx = store.subscribe(&q);
    let other_rx = store.subscribe(&other);

    store
        .write_page(&q, &write(WriteMode::Replace, &["a"], None, None, 100))
        .unwrap();

    assert!(rx.has_changed().unwrap());
    rx.borrow_and_update();
    assert!(!other_rx.has_changed().unwrap());

    store.invalidate(&q).unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(!other_rx.has_changed().unwrap());
}

#[test]
fn failed_write_does_not_notify() {
    let store = PageStore::open_in_memory().unwrap();
    let q = thread_query(1);
    let rx = store.subscribe(&q);
    store
        .execute_batch(
            "CREATE TRIGGER poison BEFORE INSERT ON rows WHEN NEW.item_id = 'poison'
             BEGIN SELECT RAISE(ABORT, 'poisoned'); END;",
        )
        .unwrap();

    let _ = store.write_page(&q, &write(WriteMode::Replace, &["poison"], None, None, 100));

    assert!(!rx.has_changed().unwrap());
}
