//! Product phase: one fetch per category, all in flight together.

use futures::stream::{FuturesUnordered, StreamExt};
use stockboard_core::ProductRecord;
use stockboard_fetch::ApiClient;

use crate::error::PipelineError;
use crate::presenter::Presenter;
use crate::session::Session;

/// Fetches every category concurrently and appends each one to the session
/// as soon as it arrives, re-rendering the growing collection each time.
///
/// Categories land in completion order; records within a category keep the
/// API's order. Returns the full collection once every category is in.
///
/// # Errors
///
/// Returns the first fatal fetch or presenter error. Fetches still in flight
/// are dropped.
pub async fn populate_products<'s, P: Presenter>(
    client: &ApiClient,
    categories: &[String],
    session: &'s mut Session<P>,
) -> Result<&'s [ProductRecord], PipelineError> {
    tracing::info!(categories = categories.len(), "populating product data");
    session.begin_products();

    let mut pending: FuturesUnordered<_> = categories
        .iter()
        .map(|category| async move {
            let result = client.fetch_products(category).await;
            (category.as_str(), result)
        })
        .collect();

    while let Some((category, result)) = pending.next().await {
        let records = result?;
        tracing::debug!(category, count = records.len(), "category fetched");
        session.append_category(records)?;
    }

    tracing::info!(products = session.products().len(), "product data populated");
    Ok(session.products())
}
