//! Concession groups service.

use std::sync::Arc;

use futures_util::stream::{BoxStream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::products::ProductsService;
use crate::client::{ClientInner, PaginatedStream, PaginatedStreamBuilder};
use crate::models::{ConcessionExpiry, ConcessionGroup, GroupFundingSource, Product};
use crate::Result;

/// Service for concession group operations.
///
/// # Example
///
/// ```no_run
/// use futures_util::TryStreamExt;
///
/// # async fn example(client: littlepay_rs::LittlepayClient) -> littlepay_rs::Result<()> {
/// let created = client.groups().create("Seniors").await?;
/// println!("created {}", created);
///
/// let groups: Vec<_> = client.groups().list().try_collect().await?;
/// for group in &groups {
///     let sources: Vec<_> = client.groups().funding_sources(&group.id).try_collect().await?;
///     println!("{} has {} funding sources", group.label, sources.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct GroupsService {
    inner: Arc<ClientInner>,
}

/// Entry of a group's product list; only the id is used.
#[derive(Debug, Serialize, Deserialize)]
struct LinkedProduct {
    id: String,
}

#[derive(Debug, Serialize)]
struct FundingSourceLink<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiry: Option<ConcessionExpiry>,
}

impl GroupsService {
    pub(crate) const PATH: &'static str = "concession_groups";

    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    fn path(group_id: &str, rest: &str) -> String {
        if rest.is_empty() {
            format!("{}/{}", Self::PATH, group_id)
        } else {
            format!("{}/{}/{}", Self::PATH, group_id, rest)
        }
    }

    /// Create a new concession group.
    pub async fn create(&self, label: &str) -> Result<Value> {
        tracing::info!(%label, "Creating concession group");
        self.inner
            .post(Self::PATH, Some(&json!({ "label": label })))
            .await
    }

    /// Stream every concession group.
    pub fn list(&self) -> PaginatedStream<ConcessionGroup> {
        PaginatedStreamBuilder::new(self.inner.clone(), Self::PATH).build()
    }

    /// Remove a concession group.
    pub async fn remove(&self, group_id: &str) -> Result<bool> {
        tracing::info!(%group_id, "Removing concession group");
        self.inner.delete(&Self::path(group_id, "")).await
    }

    /// Migrate a concession group. The request carries no body.
    pub async fn migrate(&self, group_id: &str) -> Result<Value> {
        tracing::info!(%group_id, "Migrating concession group");
        self.inner
            .post::<Value>(&Self::path(group_id, "migrate"), None)
            .await
    }

    /// Stream the funding sources linked to a group.
    pub fn funding_sources(&self, group_id: &str) -> PaginatedStream<GroupFundingSource> {
        PaginatedStreamBuilder::new(self.inner.clone(), Self::path(group_id, "fundingsources"))
            .build()
    }

    /// Link a funding source to a group, optionally with a concession expiry.
    pub async fn link_funding_source(
        &self,
        group_id: &str,
        funding_source_id: &str,
        expiry: Option<ConcessionExpiry>,
    ) -> Result<Value> {
        let body = FundingSourceLink {
            id: funding_source_id,
            expiry,
        };
        self.inner
            .post(&Self::path(group_id, "fundingsources"), Some(&body))
            .await
    }

    /// Change when a linked funding source's concession lapses.
    pub async fn update_funding_source_expiry(
        &self,
        group_id: &str,
        funding_source_id: &str,
        expiry: ConcessionExpiry,
    ) -> Result<Value> {
        let path = Self::path(group_id, &format!("fundingsources/{}", funding_source_id));
        self.inner.put(&path, &json!({ "expiry": expiry })).await
    }

    /// Unlink a funding source from a group.
    pub async fn unlink_funding_source(&self, group_id: &str, funding_source_id: &str) -> Result<bool> {
        let path = Self::path(group_id, &format!("fundingsources/{}", funding_source_id));
        self.inner.delete(&path).await
    }

    /// Stream the products linked to a group.
    ///
    /// The group's product list only carries ids; each one is resolved to a
    /// full [`Product`] as the stream is consumed.
    pub fn products(&self, group_id: &str) -> BoxStream<'static, Result<Product>> {
        let inner = self.inner.clone();

        PaginatedStreamBuilder::<LinkedProduct>::new(self.inner.clone(), Self::path(group_id, "products"))
            .build()
            .and_then(move |linked| {
                let products = ProductsService::new(inner.clone());
                async move { products.get(&linked.id).await }
            })
            .boxed()
    }

    /// Link a product to a group.
    pub async fn link_product(&self, group_id: &str, product_id: &str) -> Result<Value> {
        self.inner
            .post(&Self::path(group_id, "products"), Some(&json!({ "id": product_id })))
            .await
    }

    /// Unlink a product from a group.
    pub async fn unlink_product(&self, group_id: &str, product_id: &str) -> Result<bool> {
        let path = Self::path(group_id, &format!("products/{}", product_id));
        self.inner.delete(&path).await
    }
}
