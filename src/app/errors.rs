use thiserror::Error;

use crate::library::{img_ops::ImgOpsError, MergeError};

#[derive(Error, Debug)]
pub enum AppError {
    /////////////////////////////////
    // Argument parsing
    #[error("could not parse provided gap: {0}")]
    ParseGap(String),

    #[error("gap must not be negative, got: {0}")]
    NegativeGap(i64),

    #[error("could not parse provided background color")]
    ParseBackground(#[from] ImgOpsError),

    /////////////////////////////////
    // Merging
    #[error(transparent)]
    Merge(#[from] MergeError),
}
