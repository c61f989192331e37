// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! quirers - offline-first reader for paged forum feeds.
//!
//! This crate provides the `quire` CLI on top of `quire-core`: feeds are
//! cached in a SQLite page store under `.quire/` and refreshed from a
//! WebSocket remote when one is configured.
//!
//! # Main Components
//!
//! - [`Config`] - Work directory configuration (remote URL, page size, TTLs)
//! - [`Feed`] - Feed names accepted on the command line
//! - [`models`] - Forum data types ([`Post`](models::Post), [`Category`](models::Category))
//! - [`remote`] - WebSocket client for the forum server
//! - [`Error`] - Error types for all operations
//!
//! # Initialization
//!
//! ```rust,ignore
//! use quirers::{init_work_dir, Config, RemoteConfig};
//!
//! let work_dir = init_work_dir(Path::new("."), Some(RemoteConfig::new("wss://forum.example/ws")))?;
//! let config = Config::load(&work_dir)?;
//! ```

mod cli;
mod commands;
mod display;

pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod remote;

pub use cli::{Cli, Command};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config, RemoteConfig};
pub use error::{Error, Result};
pub use feed::Feed;

use commands::Workspace;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides the default level of `warn`, which only reports
/// remote failures that were answered from the cache.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Execute a parsed command.
pub fn run(command: Command) -> Result<()> {
    if let Command::Init { path, remote } = command {
        return commands::init::run(path, remote);
    }

    let ws = Workspace::open()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(dispatch(&ws, command))
}

async fn dispatch(ws: &Workspace, command: Command) -> Result<()> {
    match command {
        Command::Init { .. } => Ok(()),
        Command::Read {
            feed,
            limit,
            offline,
        } => {
            let listing = commands::read::read(ws, &feed, limit, offline).await?;
            print_lines(display::format_listing(&listing));
            Ok(())
        }
        Command::More {
            feed,
            limit,
            offline,
        } => {
            let listing = commands::read::more(ws, &feed, limit, offline).await?;
            print_lines(display::format_listing(&listing));
            Ok(())
        }
        Command::Refresh { feed } => {
            let report = commands::refresh::refresh(ws, &feed).await?;
            print_lines(display::format_refresh(&feed, &report));
            Ok(())
        }
        Command::Clear { feed } => {
            let rows = commands::refresh::clear(ws, &feed)?;
            println!("Cleared {}: {} rows dropped", feed, rows);
            Ok(())
        }
        Command::Subscribe { id } => {
            commands::subscription::subscribe(ws, &id)?;
            println!("Subscribed to {} (queued)", id.trim());
            Ok(())
        }
        Command::Unsubscribe { id } => {
            commands::subscription::unsubscribe(ws, &id)?;
            println!("Unsubscribed from {} (queued)", id.trim());
            Ok(())
        }
        Command::Push => {
            let report = commands::subscription::push(ws).await?;
            println!("{}", display::format_push(&report));
            Ok(())
        }
        Command::Categories { refresh } => {
            let categories = commands::resource::categories(ws, refresh).await?;
            print_lines(categories.iter().map(display::format_category));
            Ok(())
        }
        Command::Notice { refresh } => {
            let notices = commands::resource::notice(ws, refresh).await?;
            print_lines(display::format_notice(&notices));
            Ok(())
        }
        Command::Status => {
            let status = commands::status::status(ws)?;
            print_lines(display::format_status(&status));
            Ok(())
        }
    }
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{}", line);
    }
}
