//! List-mutate-refresh
//!
//! Every admin screen keeps a wholesale copy of a collection. After any
//! successful mutation the whole collection is fetched again; a failed
//! mutation leaves the copy as it was.

use std::future::Future;

use async_trait::async_trait;

use crate::ClientResult;

/// Something that can fetch a collection wholesale
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Send;

    async fn fetch(&self) -> ClientResult<Vec<Self::Item>>;
}

/// Last fetched copy of a [`ListSource`]
pub struct RefreshingList<S: ListSource> {
    source: S,
    items: Vec<S::Item>,
}

impl<S: ListSource> RefreshingList<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            items: Vec::new(),
        }
    }

    /// Replace the copy with a fresh fetch; on error the copy is kept
    pub async fn load(&mut self) -> ClientResult<&[S::Item]> {
        self.items = self.source.fetch().await?;
        Ok(&self.items)
    }

    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access for sources carrying query state, e.g. a search term
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Run `op`, then refetch if it succeeded
    ///
    /// Returns the mutation's own result. If the refetch fails its error is
    /// returned instead and the old copy stays.
    pub async fn mutate<T, F>(&mut self, op: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>> + Send,
    {
        let value = op.await?;
        self.load().await?;
        Ok(value)
    }
}
