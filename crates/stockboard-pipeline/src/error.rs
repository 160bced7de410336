use stockboard_fetch::FetchError;
use thiserror::Error;

use crate::presenter::PresentError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("presenter failed: {0}")]
    Present(#[from] PresentError),
}
