//! Paginated stream for lazy iteration over list endpoints.
//!
//! Littlepay list endpoints are paged by `page` (1-based) and `per_page`
//! query parameters and answer with a [`ListResponse`] envelope. The
//! [`PaginatedStream`] walks those pages on demand and yields one decoded
//! record at a time.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ClientInner;
use crate::models::{tolerant, ListResponse};
use crate::Result;

/// Type alias for a boxed future used internally.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// A page fetcher: given a 1-based page number, produce that page.
type FetchPage =
    Box<dyn Fn(u64) -> BoxFuture<'static, Result<ListResponse<Value>>> + Send + Sync>;

/// Query parameters for a list request.
///
/// `page` is owned by the stream and is always ignored here; `per_page`
/// overrides the client's configured page size.
///
/// ```
/// use littlepay_rs::client::ListParams;
///
/// let params = ListParams::new()
///     .param("status", "ACTIVE")
///     .param("page", "7");
/// assert_eq!(params.extra(), &[("status".to_string(), "ACTIVE".to_string())]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    per_page: Option<u32>,
    extra: Vec<(String, String)>,
}

impl ListParams {
    /// Empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the number of items requested per page.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.max(1));
        self
    }

    /// Add a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        match key.as_str() {
            "page" => {
                tracing::debug!("Ignoring caller-supplied page parameter");
            }
            "per_page" => {
                if let Ok(per_page) = value.to_string().parse::<u32>() {
                    self = self.per_page(per_page);
                }
            }
            _ => self.extra.push((key, value.to_string())),
        }
        self
    }

    /// The extra (non-paging) parameters, in insertion order.
    pub fn extra(&self) -> &[(String, String)] {
        &self.extra
    }

    fn query(&self, page: u64, default_per_page: u32) -> Vec<(String, String)> {
        let per_page = self.per_page.unwrap_or(default_per_page);
        let mut query = vec![
            ("page".to_string(), page.to_string()),
            ("per_page".to_string(), per_page.to_string()),
        ];
        query.extend(self.extra.iter().cloned());
        query
    }
}

/// A stream that lazily fetches pages from a list endpoint.
///
/// Pages are requested starting at 1. The `total_count` of the first page is
/// trusted for the whole walk: no more than that many records are yielded and
/// no page is requested once it is reached. An empty page ends the stream
/// early. A failed page request is yielded as an error and ends the stream.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
///
/// # async fn example(client: littlepay_rs::LittlepayClient) -> littlepay_rs::Result<()> {
/// let mut groups = client.groups().list();
///
/// while let Some(group) = groups.next().await {
///     println!("{}", group?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    /// Function to fetch a page by number.
    fetch_page: FetchPage,
    /// Raw records of the current page not yet yielded.
    buffer: VecDeque<Value>,
    /// Next page number to fetch.
    next_page: u64,
    /// Records yielded so far.
    yielded: u64,
    /// Total reported by the first page.
    total: Option<u64>,
    /// Set once the stream has ended.
    done: bool,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<ListResponse<Value>>>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PaginatedStream<T>
where
    T: DeserializeOwned + Serialize,
{
    /// Create a new paginated stream.
    pub fn new<F>(fetch_page: F) -> Self
    where
        F: Fn(u64) -> BoxFuture<'static, Result<ListResponse<Value>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            buffer: VecDeque::new(),
            next_page: 1,
            yielded: 0,
            total: None,
            done: false,
            pending_fetch: None,
            _marker: PhantomData,
        }
    }

    /// The total reported by the first page, once it has been fetched.
    pub fn total_count(&self) -> Option<u64> {
        self.total
    }
}

impl<T> Stream for PaginatedStream<T>
where
    T: DeserializeOwned + Serialize,
{
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if this.done {
                return Poll::Ready(None);
            }

            if this.total.is_some_and(|total| this.yielded >= total) {
                this.done = true;
                this.buffer.clear();
                return Poll::Ready(None);
            }

            if let Some(raw) = this.buffer.pop_front() {
                this.yielded += 1;
                return Poll::Ready(Some(tolerant::from_value(raw)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        if this.total.is_none() {
                            this.total = Some(page.total_count);
                        }

                        if page.list.is_empty() {
                            this.done = true;
                            return Poll::Ready(None);
                        }

                        this.next_page += 1;
                        this.buffer.extend(page.list);
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.done = true;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            tracing::debug!(page = this.next_page, "Fetching list page");
            this.pending_fetch = Some((this.fetch_page)(this.next_page));
        }
    }
}

/// Builder for creating paginated streams over a client endpoint.
pub(crate) struct PaginatedStreamBuilder<T> {
    inner: Arc<ClientInner>,
    path: String,
    params: ListParams,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PaginatedStreamBuilder<T>
where
    T: DeserializeOwned + Serialize,
{
    /// Create a new builder.
    pub(crate) fn new(inner: Arc<ClientInner>, path: impl Into<String>) -> Self {
        Self {
            inner,
            path: path.into(),
            params: ListParams::default(),
            _marker: PhantomData,
        }
    }

    /// Set the query parameters.
    pub(crate) fn params(mut self, params: ListParams) -> Self {
        self.params = params;
        self
    }

    /// Build the stream.
    pub(crate) fn build(self) -> PaginatedStream<T> {
        let inner = self.inner;
        let path = self.path;
        let params = self.params;

        PaginatedStream::new(move |page: u64| {
            let inner = inner.clone();
            let path = path.clone();
            let query = params.query(page, inner.config.page_size);

            Box::pin(async move {
                inner
                    .get_with_query::<ListResponse<Value>, _>(&path, &query)
                    .await
            })
        })
    }
}
