// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use quire_core::PageStore;

use crate::config::{get_db_path, init_work_dir, RemoteConfig};
use crate::error::Result;

pub fn run(path: Option<String>, remote: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let work_dir = init(&target_path, remote.as_deref())?;

    println!("Initialized quire cache at {}", work_dir.display());
    match remote {
        Some(url) => println!("Remote: {}", url),
        None => println!("Remote: none (offline only)"),
    }
    Ok(())
}

/// Create `.quire/` under `path` with its configuration and an empty cache.
pub fn init(path: &Path, remote: Option<&str>) -> Result<PathBuf> {
    let work_dir = init_work_dir(path, remote.map(RemoteConfig::new))?;
    PageStore::open(&get_db_path(&work_dir))?;
    Ok(work_dir)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
