pub mod clock;
pub mod definitions;
pub mod errors;
mod library_cfg;
mod merge;
mod utils;


//exports to app and tests
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::FixedClock;
pub use errors::MergeError;
pub use library_cfg::{MergeOutput, MergeRequest};
pub use merge::merge_images;
pub(crate) use utils::img_ops;
