use std::path::PathBuf;

use image::Rgb;

use super::definitions::{DEFAULT_BACKGROUND, DEFAULT_GAP};

#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub image_paths: Vec<PathBuf>,

    //None means the name is generated from the clock when the image is written.
    pub output_path: Option<PathBuf>,
    pub gap: u32,
    pub background: Rgb<u8>,
}

impl MergeRequest {
    pub fn new(image_paths: Vec<PathBuf>) -> Self {
        Self {
            image_paths,
            output_path: None,
            gap: DEFAULT_GAP,
            background: DEFAULT_BACKGROUND,
        }
    }
}

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutput {
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub num_images: usize,
}
