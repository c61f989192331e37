// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote page fetching.
//!
//! The engine never talks to the network directly. A content source supplies
//! a [`RemoteApiClient`] (transport + serialization) and a [`Mapper`]
//! (DTO → domain item); [`MappedFetcher`] composes the two into the
//! [`RemotePageFetcher`] the mediator consumes.
//!
//! Traits return boxed futures so they stay object-safe and can be shared as
//! `Arc<dyn RemotePageFetcher<T>>`.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use crate::page::{Page, Token};
use crate::query::LogicalQuery;

/// Boxed, sendable future returned by remote-facing traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type for remote calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network failure, timeout or remote rejection.
    #[error("{0}")]
    Transport(String),

    /// The remote answered with a payload we cannot read.
    #[error("{0}")]
    Decode(String),
}

/// Result type for remote calls.
pub type FetchResult<T> = Result<T, FetchError>;

/// Fetches one page of domain items for a logical query.
///
/// Stateless; retrying is the caller's decision.
pub trait RemotePageFetcher<T>: Send + Sync {
    /// Fetches the page identified by `token` (`None` = start of list).
    fn fetch<'a>(
        &'a self,
        query: &'a LogicalQuery,
        token: Option<&'a Token>,
    ) -> BoxFuture<'a, FetchResult<Page<T>>>;
}

impl<T, F: RemotePageFetcher<T> + ?Sized> RemotePageFetcher<T> for Arc<F> {
    fn fetch<'a>(
        &'a self,
        query: &'a LogicalQuery,
        token: Option<&'a Token>,
    ) -> BoxFuture<'a, FetchResult<Page<T>>> {
        (**self).fetch(query, token)
    }
}

/// Concrete transport for one content source.
///
/// The endpoint is identified by the logical query itself: its kind and
/// parameters carry everything the transport needs to build a request.
pub trait RemoteApiClient: Send + Sync {
    /// Wire-level item type, before mapping.
    type Raw: Send;

    fn fetch_page<'a>(
        &'a self,
        endpoint: &'a LogicalQuery,
        token: Option<&'a Token>,
        page_size: usize,
    ) -> BoxFuture<'a, FetchResult<Page<Self::Raw>>>;
}

impl<C: RemoteApiClient + ?Sized> RemoteApiClient for Arc<C> {
    type Raw = C::Raw;

    fn fetch_page<'a>(
        &'a self,
        endpoint: &'a LogicalQuery,
        token: Option<&'a Token>,
        page_size: usize,
    ) -> BoxFuture<'a, FetchResult<Page<Self::Raw>>> {
        (**self).fetch_page(endpoint, token, page_size)
    }
}

/// Pure DTO-to-domain mapping.
///
/// A failure means the remote payload is malformed and should surface as
/// [`FetchError::Decode`].
pub trait Mapper<R, T>: Send + Sync {
    fn to_item(&self, raw: R) -> FetchResult<T>;
}

impl<R, T, F> Mapper<R, T> for F
where
    F: Fn(R) -> FetchResult<T> + Send + Sync,
{
    fn to_item(&self, raw: R) -> FetchResult<T> {
        self(raw)
    }
}

/// A [`RemotePageFetcher`] built from a client and a mapper.
pub struct MappedFetcher<C, M, T> {
    client: C,
    mapper: M,
    page_size: usize,
    _item: PhantomData<fn() -> T>,
}

impl<C, M, T> MappedFetcher<C, M, T>
where
    C: RemoteApiClient,
    M: Mapper<C::Raw, T>,
{
    pub fn new(client: C, mapper: M, page_size: usize) -> Self {
        MappedFetcher {
            client,
            mapper,
            page_size,
            _item: PhantomData,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

impl<C, M, T> RemotePageFetcher<T> for MappedFetcher<C, M, T>
where
    C: RemoteApiClient,
    M: Mapper<C::Raw, T>,
    T: Send,
{
    fn fetch<'a>(
        &'a self,
        query: &'a LogicalQuery,
        token: Option<&'a Token>,
    ) -> BoxFuture<'a, FetchResult<Page<T>>> {
        Box::pin(async move {
            let raw = self.client.fetch_page(query, token, self.page_size).await?;
            raw.try_map(|item| self.mapper.to_item(item))
        })
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
