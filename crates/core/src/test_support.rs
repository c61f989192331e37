// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: a scripted remote, a controllable clock and a
//! minimal item type.

#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::clock::ClockSource;
use crate::fetch::{BoxFuture, FetchError, FetchResult, RemotePageFetcher};
use crate::page::{Item, Page, Token};
use crate::query::LogicalQuery;
use crate::store::PageStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestItem {
    pub id: String,
    pub body: String,
}

impl Item for TestItem {
    fn item_id(&self) -> String {
        self.id.clone()
    }
}

pub fn item(id: &str) -> TestItem {
    TestItem {
        id: id.to_string(),
        body: format!("body of {id}"),
    }
}

pub fn items(ids: &[&str]) -> Vec<TestItem> {
    ids.iter().map(|id| item(id)).collect()
}

pub fn ids(items: &[TestItem]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

pub fn thread_query(id: u64) -> LogicalQuery {
    LogicalQuery::new("thread").with("id", id).with("po", false)
}

pub fn shared_store() -> Arc<PageStore> {
    Arc::new(PageStore::open_in_memory().unwrap())
}

/// Mock clock for testing with controllable time.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        ManualClock {
            now: Mutex::new(now),
        }
    }

    pub fn at_epoch_secs(secs: i64) -> Self {
        ManualClock::new(Utc.timestamp_opt(secs, 0).unwrap())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Remote that serves pre-scripted pages keyed by request token.
///
/// Records every call so tests can assert how many network round trips
/// happened and with which tokens.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: Mutex<HashMap<Option<String>, Page<TestItem>>>,
    failure: Mutex<Option<FetchError>>,
    delay_ms: Mutex<u64>,
    calls: AtomicUsize,
    tokens: Mutex<Vec<Option<String>>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a forward chain of pages: the first is served for the
    /// `None` token, page `k` for token `p{k}`.
    pub fn chain(pages: &[&[&str]]) -> Self {
        let fetcher = ScriptedFetcher::new();
        for (k, ids) in pages.iter().enumerate() {
            let token = (k > 0).then(|| format!("p{k}"));
            let prev = (k > 0).then(|| Token::new(format!("b{k}")));
            let next = (k + 1 < pages.len()).then(|| Token::new(format!("p{}", k + 1)));
            fetcher.script(token.as_deref(), Page::new(items(ids), prev, next));
        }
        fetcher
    }

    pub fn script(&self, token: Option<&str>, page: Page<TestItem>) {
        self.pages
            .lock()
            .unwrap()
            .insert(token.map(str::to_string), page);
    }

    pub fn fail_with(&self, error: FetchError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn set_delay_ms(&self, ms: u64) {
        *self.delay_ms.lock().unwrap() = ms;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

impl RemotePageFetcher<TestItem> for ScriptedFetcher {
    fn fetch<'a>(
        &'a self,
        _query: &'a LogicalQuery,
        token: Option<&'a Token>,
    ) -> BoxFuture<'a, FetchResult<Page<TestItem>>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let key = token.map(|t| t.as_str().to_string());
            self.tokens.lock().unwrap().push(key.clone());

            let delay = *self.delay_ms.lock().unwrap();
            if delay > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            }

            if let Some(err) = self.failure.lock().unwrap().clone() {
                return Err(err);
            }
            self.pages
                .lock()
                .unwrap()
                .get(&key)
                .cloned()
                .ok_or_else(|| FetchError::Transport(format!("no page scripted for {key:?}")))
        })
    }
}
