// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed page store.
//!
//! The [`PageStore`] holds three tables: cached result rows, per-query remote
//! keys, and pending local mutations. It is pure storage: it applies writes
//! atomically and publishes a per-query change notification after every
//! commit, but it never decides when to fetch.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::mutation::{MutationAction, PendingMutation};
use crate::page::{Item, Page, RemoteKey, Row, Token};
use crate::query::LogicalQuery;

/// SQL schema for the page store.
pub const SCHEMA: &str = r#"
-- Cached result rows, one per (query, natural item id)
CREATE TABLE IF NOT EXISTS rows (
    query_key TEXT NOT NULL,
    item_id TEXT NOT NULL,
    ordinal INTEGER NOT NULL,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (query_key, item_id)
);

-- Pagination bookkeeping per query
CREATE TABLE IF NOT EXISTS remote_keys (
    query_key TEXT PRIMARY KEY,
    prev_token TEXT,              -- NULL = known start of list
    next_token TEXT,              -- NULL = known end of list
    last_fetched_at TEXT NOT NULL
);

-- Local actions not yet confirmed by the remote
CREATE TABLE IF NOT EXISTS pending_mutations (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    query_key TEXT NOT NULL,
    target_id TEXT NOT NULL,
    action TEXT NOT NULL,         -- subscribe|unsubscribe
    payload TEXT,
    created_at TEXT NOT NULL,
    UNIQUE (query_key, target_id)
);

-- Indexes
CREATE UNIQUE INDEX IF NOT EXISTS idx_rows_ordinal ON rows(query_key, ordinal);
CREATE INDEX IF NOT EXISTS idx_rows_item ON rows(item_id);
"#;

/// Run schema creation on a database connection.
///
/// Idempotent; safe to call on every open.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Lock a std mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(Error::CorruptedData(format!(
                    "invalid timestamp '{value}' in column '{column}'"
                ))),
            )
        })
}

fn to_sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Where a page read starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The lowest ordinals of the query.
    Start,
    /// Rows with ordinal greater than or equal to the given one.
    From(i64),
    /// The rows immediately below the given ordinal.
    Before(i64),
}

/// How a fetched page is merged into the existing rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Evict every row of the query, then write the page as the sole content.
    Replace,
    /// Place new items after the current highest ordinal.
    Append,
    /// Place new items before the current lowest ordinal.
    Prepend,
}

/// A decomposed page ready to be committed.
#[derive(Debug, Clone)]
pub struct PageWrite<T> {
    pub mode: WriteMode,
    pub items: Vec<T>,
    pub prev_token: Option<Token>,
    pub next_token: Option<Token>,
    pub fetched_at: DateTime<Utc>,
}

impl<T> PageWrite<T> {
    pub fn from_page(mode: WriteMode, page: Page<T>, fetched_at: DateTime<Utc>) -> Self {
        PageWrite {
            mode,
            items: page.items,
            prev_token: page.prev_token,
            next_token: page.next_token,
            fetched_at,
        }
    }
}

/// What a committed write changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Items that received a new ordinal.
    pub inserted: usize,
    /// Items that already existed and were updated in place.
    pub updated: usize,
}

/// Cache state of one query, for status reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySummary {
    pub query: LogicalQuery,
    pub rows: usize,
    pub bounds: Option<(i64, i64)>,
    pub remote_key: Option<RemoteKey>,
}

/// Local persistent store for paged rows, remote keys and pending mutations.
pub struct PageStore {
    conn: Mutex<Connection>,
    /// Commit counters per query, bumped after every committed change.
    observers: Mutex<HashMap<LogicalQuery, watch::Sender<u64>>>,
}

impl PageStore {
    /// Open a store at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        run_migrations(&conn)?;
        Ok(PageStore {
            conn: Mutex::new(conn),
            observers: Mutex::new(HashMap::new()),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        lock(&self.conn)
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    /// Read up to `limit` rows at `position`, in ascending ordinal order.
    pub fn read_page<T: Item>(
        &self,
        query: &LogicalQuery,
        position: Position,
        limit: usize,
    ) -> Result<Vec<Row<T>>> {
        let conn = self.conn();
        let key = query.as_str();
        let limit = to_sql_limit(limit);

        let raw: Vec<(i64, String)> = match position {
            Position::Start => {
                let mut stmt = conn.prepare(
                    "SELECT ordinal, payload FROM rows WHERE query_key = ?1
                     ORDER BY ordinal ASC LIMIT ?2",
                )?;
                let rows = stmt.query_map(params![key, limit], |row| Ok((row.get(0)?, row.get(1)?)))?;
                rows.collect::<std::result::Result<_, _>>()?
            }
            Position::From(ordinal) => {
                let mut stmt = conn.prepare(
                    "SELECT ordinal, payload FROM rows WHERE query_key = ?1 AND ordinal >= ?2
                     ORDER BY ordinal ASC LIMIT ?3",
                )?;
                let rows = stmt.query_map(params![key, ordinal, limit], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?;
                rows.collect::<std::result::Result<_, _>>()?
            }
            Position::Before(ordinal) => {
                let mut stmt = conn.prepare(
                    "SELECT ordinal, payload FROM rows WHERE query_key = ?1 AND ordinal < ?2
                     ORDER BY ordinal DESC LIMIT ?3",
                )?;
                let rows = stmt.query_map(params![key, ordinal, limit], |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?;
                let mut raw: Vec<(i64, String)> = rows.collect::<std::result::Result<_, _>>()?;
                raw.reverse();
                raw
            }
        };

        raw.into_iter()
            .map(|(ordinal, payload)| {
                Ok(Row {
                    query: query.clone(),
                    ordinal,
                    item: serde_json::from_str(&payload)?,
                })
            })
            .collect()
    }

    /// Number of rows cached for the query.
    pub fn read_count(&self, query: &LogicalQuery) -> Result<usize> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM rows WHERE query_key = ?1",
            params![query.as_str()],
            |row| row.get(0),
        )?;
        usize::try_from(count).map_err(|_| Error::CorruptedData(format!("negative count {count}")))
    }

    /// The pagination bookkeeping for the query, if it was ever fetched.
    pub fn read_remote_key(&self, query: &LogicalQuery) -> Result<Option<RemoteKey>> {
        read_remote_key(&self.conn(), query)
    }

    /// Lowest and highest ordinal currently cached for the query.
    pub fn bounds(&self, query: &LogicalQuery) -> Result<Option<(i64, i64)>> {
        bounds(&self.conn(), query)
    }

    /// True if any row of the query has an ordinal above `ordinal`.
    pub fn has_rows_after(&self, query: &LogicalQuery, ordinal: i64) -> Result<bool> {
        let exists: bool = self.conn().query_row(
            "SELECT EXISTS(SELECT 1 FROM rows WHERE query_key = ?1 AND ordinal > ?2)",
            params![query.as_str(), ordinal],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// True if any row of the query has an ordinal below `ordinal`.
    pub fn has_rows_before(&self, query: &LogicalQuery, ordinal: i64) -> Result<bool> {
        let exists: bool = self.conn().query_row(
            "SELECT EXISTS(SELECT 1 FROM rows WHERE query_key = ?1 AND ordinal < ?2)",
            params![query.as_str(), ordinal],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Find a cached payload by natural id in any query.
    ///
    /// The most recently written copy wins.
    pub fn find_item<T: Item>(&self, item_id: &str) -> Result<Option<T>> {
        let payload: Option<String> = self
            .conn()
            .query_row(
                "SELECT payload FROM rows WHERE item_id = ?1
                 ORDER BY updated_at DESC LIMIT 1",
                params![item_id],
                |row| row.get(0),
            )
            .optional()?;
        payload
            .map(|p| serde_json::from_str(&p).map_err(Error::from))
            .transpose()
    }

    /// Cache state of every query that has rows or a remote key.
    pub fn summaries(&self) -> Result<Vec<QuerySummary>> {
        let conn = self.conn();
        let keys: Vec<String> = {
            let mut stmt = conn.prepare(
                "SELECT query_key FROM rows
                 UNION SELECT query_key FROM remote_keys
                 ORDER BY query_key",
            )?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect::<std::result::Result<_, _>>()?
        };

        let mut summaries = Vec::with_capacity(keys.len());
        for key in keys {
            let query: LogicalQuery = key.parse()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM rows WHERE query_key = ?1",
                params![key],
                |row| row.get(0),
            )?;
            summaries.push(QuerySummary {
                rows: usize::try_from(count).unwrap_or_default(),
                bounds: bounds(&conn, &query)?,
                remote_key: read_remote_key(&conn, &query)?,
                query,
            });
        }
        Ok(summaries)
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    /// Merge a fetched page and its remote key in one transaction.
    ///
    /// Either every row and the key update land, or nothing does. Pending
    /// local mutations of the query are re-applied inside the same
    /// transaction, so a refresh cannot resurrect an unconfirmed unsubscribe.
    pub fn write_page<T: Item>(
        &self,
        query: &LogicalQuery,
        write: &PageWrite<T>,
    ) -> Result<WriteSummary> {
        let summary = {
            let mut conn = self.conn();
            let tx = conn.transaction()?;
            let summary = write_page_tx(&tx, query, write)?;
            apply_pending_overlay(&tx, query, write.fetched_at)?;
            tx.commit()?;
            summary
        };
        self.notify(query);
        Ok(summary)
    }

    /// Delete every row and the remote key of the query.
    pub fn invalidate(&self, query: &LogicalQuery) -> Result<()> {
        {
            let mut conn = self.conn();
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM rows WHERE query_key = ?1", params![query.as_str()])?;
            tx.execute(
                "DELETE FROM remote_keys WHERE query_key = ?1",
                params![query.as_str()],
            )?;
            tx.commit()?;
        }
        self.notify(query);
        Ok(())
    }

    // ── Pending mutations ───────────────────────────────────────────────────

    /// Record a local subscribe/unsubscribe and apply it optimistically.
    ///
    /// Replaces any earlier pending action for the same target. A Subscribe
    /// with a payload makes the row visible at the end of the list; an
    /// Unsubscribe removes the row. Returns the new sequence number.
    pub fn apply_local_mutation(
        &self,
        query: &LogicalQuery,
        target_id: &str,
        action: MutationAction,
        payload: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<i64> {
        let key = query.as_str();
        let seq = {
            let mut conn = self.conn();
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM pending_mutations WHERE query_key = ?1 AND target_id = ?2",
                params![key, target_id],
            )?;
            tx.execute(
                "INSERT INTO pending_mutations (query_key, target_id, action, payload, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![key, target_id, action.as_str(), payload, format_timestamp(at)],
            )?;
            let seq = tx.last_insert_rowid();

            match (action, payload) {
                (MutationAction::Subscribe, Some(payload)) => {
                    upsert_local_row(&tx, query, target_id, payload, at)?;
                }
                (MutationAction::Subscribe, None) => {}
                (MutationAction::Unsubscribe, _) => {
                    tx.execute(
                        "DELETE FROM rows WHERE query_key = ?1 AND item_id = ?2",
                        params![key, target_id],
                    )?;
                }
            }
            tx.commit()?;
            seq
        };
        self.notify(query);
        Ok(seq)
    }

    /// Pending mutations of the query in increasing sequence order.
    pub fn pending_mutations(&self, query: &LogicalQuery) -> Result<Vec<PendingMutation>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT seq, target_id, action, payload, created_at FROM pending_mutations
             WHERE query_key = ?1 ORDER BY seq ASC",
        )?;
        let rows = stmt.query_map(params![query.as_str()], |row| {
            let action: String = row.get(2)?;
            let created: String = row.get(4)?;
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                action,
                row.get::<_, Option<String>>(3)?,
                parse_timestamp(&created, "created_at")?,
            ))
        })?;

        let mut pending = Vec::new();
        for row in rows {
            let (seq, target_id, action, payload, created_at) = row?;
            pending.push(PendingMutation {
                seq,
                query: query.clone(),
                target_id,
                action: action.parse()?,
                payload,
                created_at,
            });
        }
        Ok(pending)
    }

    /// True if the query has any unconfirmed local mutation.
    pub fn has_pending(&self, query: &LogicalQuery) -> Result<bool> {
        let exists: bool = self.conn().query_row(
            "SELECT EXISTS(SELECT 1 FROM pending_mutations WHERE query_key = ?1)",
            params![query.as_str()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Total number of pending mutations across all queries.
    pub fn pending_count(&self) -> Result<usize> {
        let count: i64 =
            self.conn()
                .query_row("SELECT COUNT(*) FROM pending_mutations", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Delete a confirmed mutation by sequence number.
    ///
    /// Returns false if it no longer exists (superseded by a newer action).
    pub fn delete_pending(&self, seq: i64) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM pending_mutations WHERE seq = ?1", params![seq])?;
        Ok(affected > 0)
    }

    // ── Change notification ─────────────────────────────────────────────────

    /// Watch commits to one query.
    ///
    /// The value is a commit counter; only its changes are meaningful.
    pub fn subscribe(&self, query: &LogicalQuery) -> watch::Receiver<u64> {
        let mut observers = lock(&self.observers);
        observers
            .entry(query.clone())
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }

    fn notify(&self, query: &LogicalQuery) {
        let mut observers = lock(&self.observers);
        if let Some(tx) = observers.get(query) {
            if tx.receiver_count() == 0 {
                observers.remove(query);
            } else {
                tx.send_modify(|commits| *commits += 1);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn().execute_batch(sql)?;
        Ok(())
    }

    /// Every row, key and pending mutation as text, for before/after comparisons.
    #[cfg(test)]
    pub(crate) fn dump(&self) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut out = Vec::new();
        for sql in [
            "SELECT query_key || '|' || item_id || '|' || ordinal || '|' || payload || '|' || updated_at
             FROM rows ORDER BY query_key, ordinal",
            "SELECT query_key || '|' || IFNULL(prev_token, '-') || '|' || IFNULL(next_token, '-')
             || '|' || last_fetched_at FROM remote_keys ORDER BY query_key",
            "SELECT seq || '|' || query_key || '|' || target_id || '|' || action
             FROM pending_mutations ORDER BY seq",
        ] {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            for row in rows {
                out.push(row?);
            }
        }
        Ok(out)
    }
}

fn read_remote_key(conn: &Connection, query: &LogicalQuery) -> Result<Option<RemoteKey>> {
    let key = conn
        .query_row(
            "SELECT prev_token, next_token, last_fetched_at FROM remote_keys WHERE query_key = ?1",
            params![query.as_str()],
            |row| {
                let prev: Option<String> = row.get(0)?;
                let next: Option<String> = row.get(1)?;
                let fetched: String = row.get(2)?;
                Ok(RemoteKey {
                    prev_token: prev.map(Token::from),
                    next_token: next.map(Token::from),
                    last_fetched_at: parse_timestamp(&fetched, "last_fetched_at")?,
                })
            },
        )
        .optional()?;
    Ok(key)
}

fn bounds(conn: &Connection, query: &LogicalQuery) -> Result<Option<(i64, i64)>> {
    let (min, max): (Option<i64>, Option<i64>) = conn.query_row(
        "SELECT MIN(ordinal), MAX(ordinal) FROM rows WHERE query_key = ?1",
        params![query.as_str()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(min.zip(max))
}

fn write_page_tx<T: Item>(
    tx: &Transaction<'_>,
    query: &LogicalQuery,
    write: &PageWrite<T>,
) -> Result<WriteSummary> {
    let key = query.as_str();
    let updated_at = format_timestamp(write.fetched_at);
    let existing_key = read_remote_key(tx, query)?;

    if write.mode == WriteMode::Replace {
        tx.execute("DELETE FROM rows WHERE query_key = ?1", params![key])?;
    }

    // Known items are updated in place and keep their ordinal; only new
    // items consume ordinals, in page order.
    let mut summary = WriteSummary::default();
    let mut fresh: Vec<(String, String)> = Vec::new();
    for item in &write.items {
        let item_id = item.item_id();
        let payload = serde_json::to_string(item)?;
        let changed = tx.execute(
            "UPDATE rows SET payload = ?1, updated_at = ?2 WHERE query_key = ?3 AND item_id = ?4",
            params![payload, updated_at, key, item_id],
        )?;
        if changed > 0 {
            summary.updated += 1;
        } else if let Some(slot) = fresh.iter_mut().find(|(id, _)| *id == item_id) {
            slot.1 = payload;
        } else {
            fresh.push((item_id, payload));
        }
    }

    let count = i64::try_from(fresh.len())
        .map_err(|_| Error::InvalidInput("page too large".to_string()))?;
    let first = match (write.mode, bounds(tx, query)?) {
        (_, None) => 0,
        (WriteMode::Prepend, Some((min, _))) => min - count,
        (_, Some((_, max))) => max + 1,
    };
    for (offset, (item_id, payload)) in (0_i64..).zip(&fresh) {
        tx.execute(
            "INSERT INTO rows (query_key, item_id, ordinal, payload, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![key, item_id, first + offset, payload, updated_at],
        )?;
    }
    summary.inserted = fresh.len();

    // Append keeps the known start, Prepend keeps the known end.
    let (prev_token, next_token) = match (write.mode, &existing_key) {
        (WriteMode::Append, Some(k)) => (k.prev_token.clone(), write.next_token.clone()),
        (WriteMode::Prepend, Some(k)) => (write.prev_token.clone(), k.next_token.clone()),
        _ => (write.prev_token.clone(), write.next_token.clone()),
    };
    let last_fetched_at = existing_key
        .map(|k| k.last_fetched_at.max(write.fetched_at))
        .unwrap_or(write.fetched_at);

    tx.execute(
        "INSERT INTO remote_keys (query_key, prev_token, next_token, last_fetched_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(query_key) DO UPDATE SET
             prev_token = excluded.prev_token,
             next_token = excluded.next_token,
             last_fetched_at = excluded.last_fetched_at",
        params![
            key,
            prev_token.as_ref().map(Token::as_str),
            next_token.as_ref().map(Token::as_str),
            format_timestamp(last_fetched_at),
        ],
    )?;

    Ok(summary)
}

/// Re-apply pending local intent on top of freshly written remote rows.
fn apply_pending_overlay(
    tx: &Transaction<'_>,
    query: &LogicalQuery,
    at: DateTime<Utc>,
) -> Result<()> {
    let key = query.as_str();
    tx.execute(
        "DELETE FROM rows WHERE query_key = ?1 AND item_id IN (
             SELECT target_id FROM pending_mutations
             WHERE query_key = ?1 AND action = 'unsubscribe')",
        params![key],
    )?;

    let missing: Vec<(String, String)> = {
        let mut stmt = tx.prepare(
            "SELECT p.target_id, p.payload FROM pending_mutations p
             WHERE p.query_key = ?1 AND p.action = 'subscribe' AND p.payload IS NOT NULL
               AND NOT EXISTS (
                   SELECT 1 FROM rows r WHERE r.query_key = p.query_key AND r.item_id = p.target_id)
             ORDER BY p.seq ASC",
        )?;
        let rows = stmt.query_map(params![key], |row| Ok((row.get(0)?, row.get(1)?)))?;
        rows.collect::<std::result::Result<_, _>>()?
    };
    for (target_id, payload) in missing {
        upsert_local_row(tx, query, &target_id, &payload, at)?;
    }
    Ok(())
}

/// Insert a locally originated row at the end of the query, or refresh its
/// payload if it is already cached.
fn upsert_local_row(
    tx: &Transaction<'_>,
    query: &LogicalQuery,
    item_id: &str,
    payload: &str,
    at: DateTime<Utc>,
) -> Result<()> {
    let key = query.as_str();
    let updated_at = format_timestamp(at);
    let changed = tx.execute(
        "UPDATE rows SET payload = ?1, updated_at = ?2 WHERE query_key = ?3 AND item_id = ?4",
        params![payload, updated_at, key, item_id],
    )?;
    if changed == 0 {
        let next = bounds(tx, query)?.map_or(0, |(_, max)| max + 1);
        tx.execute(
            "INSERT INTO rows (query_key, item_id, ordinal, payload, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![key, item_id, next, payload, updated_at],
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
