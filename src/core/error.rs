use thiserror::Error;

use crate::resources::ResourceError;

/// Fatal display engine construction errors
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("could not create display surface: {0}")]
    Surface(String),

    #[error("could not load resources: {0}")]
    Resources(#[from] ResourceError),

    #[error("invalid display config: {0}")]
    InvalidConfig(String),
}
