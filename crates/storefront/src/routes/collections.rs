//! Collection route handlers.
//!
//! Collections are not stored. They are the distinct collection tags of the
//! products in the catalog, addressed by slug.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use boutique_core::Product;
use boutique_core::catalog::collection_title;
use serde::Serialize;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::state::AppState;

/// One entry of the collection listing.
#[derive(Debug, Serialize)]
pub struct CollectionSummary {
    pub slug: String,
    pub title: &'static str,
    pub product_count: usize,
}

/// A collection with its products.
#[derive(Debug, Serialize)]
pub struct CollectionView {
    pub slug: String,
    pub title: &'static str,
    pub products: Vec<Product>,
}

/// List the collections that currently have products, ordered by slug.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CollectionSummary>>> {
    let products = state.catalog().list().await?;
    Ok(Json(summarize(&products)))
}

/// Display a collection.
///
/// An unknown slug is not an error: it renders the fallback title with no
/// products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CollectionView>> {
    let products = state
        .catalog()
        .list()
        .await?
        .into_iter()
        .filter(|p| p.in_collection(&slug))
        .collect();

    Ok(Json(CollectionView {
        title: collection_title(&slug),
        slug,
        products,
    }))
}

fn summarize(products: &[Product]) -> Vec<CollectionSummary> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for product in products {
        *counts.entry(product.collection_slug()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(slug, product_count)| CollectionSummary {
            title: collection_title(&slug),
            slug,
            product_count,
        })
        .collect()
}
