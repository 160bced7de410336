//! Availability phase: one feed per manufacturer, joined as each arrives.

use futures::stream::{FuturesUnordered, StreamExt};
use stockboard_fetch::ApiClient;

use crate::error::PipelineError;
use crate::join::distinct_manufacturers;
use crate::presenter::Presenter;
use crate::session::Session;

/// Fetches the availability feed of every manufacturer present in the
/// session's products and joins each feed as soon as it arrives.
///
/// Every completed join re-renders the whole table. The session reaches
/// [`crate::RunState::Done`] when the last manufacturer has been joined,
/// or straight away when there are no products.
///
/// # Errors
///
/// Returns the first fatal fetch or presenter error. Fetches still in flight
/// are dropped and the session stays in the availability phase.
pub async fn populate_availability<P: Presenter>(
    client: &ApiClient,
    session: &mut Session<P>,
) -> Result<(), PipelineError> {
    let manufacturers = distinct_manufacturers(session.products());
    tracing::info!(
        manufacturers = manufacturers.len(),
        "populating availability data"
    );
    session.begin_availability()?;

    if manufacturers.is_empty() {
        session.finish()?;
        return Ok(());
    }

    let mut pending = FuturesUnordered::new();
    for manufacturer in manufacturers {
        session.track_manufacturer();
        pending.push(async move {
            let result = client.fetch_availability(&manufacturer).await;
            (manufacturer, result)
        });
    }

    while let Some((manufacturer, result)) = pending.next().await {
        let records = result?;
        let feed_len = records.len();
        let updated = session.complete_manufacturer(&manufacturer, records)?;
        tracing::info!(
            manufacturer = %manufacturer,
            feed = feed_len,
            updated,
            in_flight = session.in_flight(),
            "availability joined"
        );
    }

    tracing::info!("availability data populated");
    Ok(())
}
