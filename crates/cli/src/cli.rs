// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand};

use crate::feed::Feed;

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Reading:
  read         Show the first page of a feed
  more         Show the next page of a feed
  categories   List forum categories
  notice       Show today's notice

Syncing:
  refresh      Replace a feed's cache with a fresh first page
  clear        Drop a feed's cached pages
  subscribe    Subscribe to a thread
  unsubscribe  Unsubscribe from a thread
  push         Push queued subscription changes

Setup:
  init         Initialize a cache
  status       Show cached feeds and queued changes
";

const QUICKSTART_HELP: &str = "\
Get started:
  quire init --remote wss://forum.example/ws   Initialize with a remote
  quire read forum:1                          Read a forum board
  quire more forum:1                          Load the next page
  quire read thread:42 --offline              Read a cached thread";

/// Default number of rows per page shown.
pub const DEFAULT_LIMIT: usize = 20;

fn parse_feed(s: &str) -> Result<Feed, String> {
    s.parse().map_err(|e: crate::error::Error| e.to_string())
}

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "quire")]
#[command(version)]
#[command(about = "An offline-first reader for paged forum feeds")]
#[command(
    long_about = "An offline-first reader for paged forum feeds.\n\n\
    Feeds are cached locally page by page and refreshed from the remote when it is reachable."
)]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Run as if quire was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a cache in the current directory (or specified path)
    #[command(after_help = "Examples:\n  \
        quire init                                 Offline-only cache\n  \
        quire init --remote wss://forum.example/ws  Cache backed by a remote")]
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(long)]
        path: Option<String>,

        /// WebSocket URL of the forum server
        #[arg(long)]
        remote: Option<String>,
    },

    /// Show the first page of a feed
    #[command(after_help = "Feeds:\n  \
        forum:<id>         Threads on a board\n  \
        timeline:<id>      A user's timeline\n  \
        thread:<id>        Replies to a thread\n  \
        thread:<id>:po     Replies by the original poster only\n  \
        subscriptions      Threads you subscribed to")]
    Read {
        #[arg(value_parser = parse_feed)]
        feed: Feed,

        /// Rows to show
        #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Serve from the cache without contacting the remote
        #[arg(long)]
        offline: bool,
    },

    /// Show the page after the last cached row of a feed
    More {
        #[arg(value_parser = parse_feed)]
        feed: Feed,

        /// Rows to show
        #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Serve from the cache without contacting the remote
        #[arg(long)]
        offline: bool,
    },

    /// Replace a feed's cache with a fresh first page
    Refresh {
        #[arg(value_parser = parse_feed)]
        feed: Feed,
    },

    /// Drop a feed's cached pages
    Clear {
        #[arg(value_parser = parse_feed)]
        feed: Feed,
    },

    /// Subscribe to a thread
    Subscribe {
        #[arg(value_parser = non_empty_string)]
        id: String,
    },

    /// Unsubscribe from a thread
    Unsubscribe {
        #[arg(value_parser = non_empty_string)]
        id: String,
    },

    /// Push queued subscription changes to the remote
    Push,

    /// List forum categories
    Categories {
        /// Fetch even if the cached copy is still fresh
        #[arg(long)]
        refresh: bool,
    },

    /// Show today's notice
    Notice {
        /// Fetch even if the cached copy is still fresh
        #[arg(long)]
        refresh: bool,
    },

    /// Show cached feeds and queued subscription changes
    Status,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
