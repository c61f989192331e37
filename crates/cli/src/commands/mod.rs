// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod init;
pub mod read;
pub mod refresh;
pub mod resource;
pub mod status;
pub mod subscription;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use quire_core::{
    CachedResource, ClockSource, Item, LogicalQuery, MappedFetcher, PageStore, PagingSource,
    Reconciler, RemoteMediator, RemotePageFetcher, SystemClock, TtlGate,
};

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::{Error, Result};
use crate::feed::{subscriptions_query, Feed};
use crate::models::{decode, Post};
use crate::remote::{ForumRemote, Offline, WebSocketClient};

/// Page size used when no remote is configured.
const OFFLINE_PAGE_SIZE: usize = 20;

/// An opened workspace: configuration, cache and (optionally) the remote.
pub struct Workspace {
    pub config: Config,
    store: Arc<PageStore>,
    remote: Option<Arc<dyn ForumRemote>>,
    clock: Arc<dyn ClockSource>,
    /// Shared by every source and refresh so concurrent loads coalesce.
    mediator: RemoteMediator<Post>,
}

impl Workspace {
    /// Open the workspace containing the current directory.
    pub fn open() -> Result<Self> {
        Workspace::open_at(&find_work_dir()?)
    }

    pub fn open_at(work_dir: &Path) -> Result<Self> {
        let config = Config::load(work_dir)?;
        let store = Arc::new(PageStore::open(&get_db_path(work_dir))?);
        let remote = config.remote.as_ref().map(|remote| {
            let client = WebSocketClient::new(remote.url.clone(), remote.request_timeout());
            Arc::new(client) as Arc<dyn ForumRemote>
        });
        Ok(Workspace::assemble(config, store, remote, Arc::new(SystemClock)))
    }

    #[cfg(test)]
    pub(crate) fn in_memory(
        config: Config,
        remote: Option<Arc<dyn ForumRemote>>,
        clock: Arc<dyn ClockSource>,
    ) -> Result<Self> {
        let store = Arc::new(PageStore::open_in_memory()?);
        Ok(Workspace::assemble(config, store, remote, clock))
    }

    fn assemble(
        config: Config,
        store: Arc<PageStore>,
        remote: Option<Arc<dyn ForumRemote>>,
        clock: Arc<dyn ClockSource>,
    ) -> Self {
        let fetcher: Arc<dyn RemotePageFetcher<Post>> = Arc::new(MappedFetcher::new(
            forum_remote(remote.as_ref()),
            decode::<Post>,
            page_size(&config),
        ));
        let mediator = RemoteMediator::new(Arc::clone(&store), fetcher, Arc::clone(&clock));
        Workspace {
            config,
            store,
            remote,
            clock,
            mediator,
        }
    }

    pub fn store(&self) -> &Arc<PageStore> {
        &self.store
    }

    pub fn is_online(&self) -> bool {
        self.remote.is_some()
    }

    /// Fails with a hint when no remote is configured.
    pub fn require_remote(&self) -> Result<()> {
        if self.is_online() {
            Ok(())
        } else {
            Err(Error::NoRemote)
        }
    }

    pub fn fetcher<T: Item + DeserializeOwned>(&self) -> Arc<dyn RemotePageFetcher<T>> {
        Arc::new(MappedFetcher::new(
            forum_remote(self.remote.as_ref()),
            decode::<T>,
            page_size(&self.config),
        ))
    }

    /// The workspace's post mediator; clones share in-flight calls.
    pub fn mediator(&self) -> RemoteMediator<Post> {
        self.mediator.clone()
    }

    /// Paging source for a feed; cache-only when offline.
    pub fn source(&self, feed: &Feed, offline: bool) -> PagingSource<Post> {
        if offline || !self.is_online() {
            PagingSource::offline(Arc::clone(&self.store))
        } else {
            PagingSource::new(self.mediator(), feed.mode())
        }
    }

    pub fn reconciler(&self) -> Reconciler<Post> {
        Reconciler::new(
            Arc::clone(&self.store),
            Arc::new(forum_remote(self.remote.as_ref())),
            Arc::clone(&self.clock),
            subscriptions_query(),
        )
    }

    pub fn resource<T: Item + DeserializeOwned>(&self, query: LogicalQuery) -> CachedResource<T> {
        CachedResource::new(
            Arc::clone(&self.store),
            self.fetcher(),
            Arc::clone(&self.clock),
            query,
            TtlGate::hours(self.config.cache.resource_ttl_hours),
        )
    }
}

fn page_size(config: &Config) -> usize {
    config
        .remote
        .as_ref()
        .map_or(OFFLINE_PAGE_SIZE, |remote| remote.page_size)
}

fn forum_remote(remote: Option<&Arc<dyn ForumRemote>>) -> Arc<dyn ForumRemote> {
    match remote {
        Some(remote) => Arc::clone(remote),
        None => Arc::new(Offline),
    }
}
