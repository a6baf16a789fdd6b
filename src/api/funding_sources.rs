//! Funding sources service.

use std::sync::Arc;

use crate::client::{ClientInner, PaginatedStream, PaginatedStreamBuilder};
use crate::models::{FundingSource, FundingSourceGroup};
use crate::Result;

/// Service for funding source lookups.
pub struct FundingSourcesService {
    inner: Arc<ClientInner>,
}

impl FundingSourcesService {
    pub(crate) const PATH: &'static str = "fundingsources";

    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Look up a funding source by its card token.
    pub async fn get_by_token(&self, card_token: &str) -> Result<FundingSource> {
        self.inner
            .get_record(&format!("{}/bytoken/{}", Self::PATH, card_token))
            .await
    }

    /// Stream the concession groups a funding source is linked to.
    pub fn linked_concession_groups(&self, funding_source_id: &str) -> PaginatedStream<FundingSourceGroup> {
        PaginatedStreamBuilder::new(
            self.inner.clone(),
            format!("{}/{}/concession_groups", Self::PATH, funding_source_id),
        )
        .build()
    }
}
