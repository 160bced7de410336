//! Fetch-join pipeline: products first, then per-manufacturer availability
//! merged onto them, with a presenter refresh after every step.

pub mod availability;
pub mod error;
pub mod join;
pub mod presenter;
pub mod products;
pub mod session;

pub use availability::populate_availability;
pub use error::PipelineError;
pub use join::{distinct_manufacturers, index_feed, join_manufacturer, AvailabilityIndex};
pub use presenter::{
    HtmlTablePresenter, PresentError, Presenter, RecordingPresenter, TableRow, STATUS_DONE,
    STATUS_FETCHING_AVAILABILITY,
};
pub use products::populate_products;
pub use session::{RunState, Session};

use stockboard_fetch::ApiClient;

/// Runs both phases against `presenter` and returns the finished session.
///
/// # Errors
///
/// Returns the first fatal [`PipelineError`]. A failure during the product
/// phase means the availability phase never starts.
pub async fn run<P: Presenter>(
    client: &ApiClient,
    categories: &[String],
    presenter: P,
) -> Result<Session<P>, PipelineError> {
    let mut session = Session::new(presenter);
    populate_products(client, categories, &mut session).await?;
    populate_availability(client, &mut session).await?;
    Ok(session)
}

/// Runs only the product phase; availability columns stay empty.
///
/// # Errors
///
/// Returns the first fatal [`PipelineError`].
pub async fn run_products_only<P: Presenter>(
    client: &ApiClient,
    categories: &[String],
    presenter: P,
) -> Result<Session<P>, PipelineError> {
    let mut session = Session::new(presenter);
    populate_products(client, categories, &mut session).await?;
    Ok(session)
}
