use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("No input images provided")]
    NoInputImages,

    #[error("File not found - {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error opening image {}: {detail}", .path.display())]
    ImageDecode { path: PathBuf, detail: String },

    #[error("No valid images loaded")]
    NoValidImages,

    #[error("Merged image would be too wide: {num_images} images with a gap of {gap}px")]
    CanvasTooLarge { num_images: usize, gap: u32 },

    //Failures from the PNG encoder are passed through as-is.
    #[error(transparent)]
    Write(#[from] image::ImageError),
}
