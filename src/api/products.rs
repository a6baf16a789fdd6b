//! Products service.

use std::sync::Arc;

use crate::client::{ClientInner, ListParams, PaginatedStream, PaginatedStreamBuilder};
use crate::models::{Product, ProductStatus};
use crate::Result;

/// Service for fare product operations.
///
/// # Example
///
/// ```no_run
/// use futures_util::TryStreamExt;
/// use littlepay_rs::ProductStatus;
///
/// # async fn example(client: littlepay_rs::LittlepayClient) -> littlepay_rs::Result<()> {
/// let active: Vec<_> = client
///     .products()
///     .list(Some(ProductStatus::Active))
///     .try_collect()
///     .await?;
///
/// for product in active {
///     println!("{}: {}", product.code, product.description);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ProductsService {
    inner: Arc<ClientInner>,
}

impl ProductsService {
    pub(crate) const PATH: &'static str = "products";

    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Stream every product, optionally filtered by status.
    pub fn list(&self, status: Option<ProductStatus>) -> PaginatedStream<Product> {
        let params = match status {
            Some(status) => ListParams::new().param("status", status),
            None => ListParams::new(),
        };
        self.list_with(params)
    }

    /// Stream products with arbitrary query parameters.
    pub fn list_with(&self, params: ListParams) -> PaginatedStream<Product> {
        PaginatedStreamBuilder::new(self.inner.clone(), Self::PATH)
            .params(params)
            .build()
    }

    /// Get a single product.
    pub async fn get(&self, product_id: &str) -> Result<Product> {
        self.inner
            .get_record(&format!("{}/{}", Self::PATH, product_id))
            .await
    }
}
