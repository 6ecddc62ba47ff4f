use std::{
    convert::TryFrom,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use image::{io::Reader, DynamicImage, ImageFormat, Rgb};

use super::{
    clock::Clock,
    definitions::{OUTPUT_NAME_EXTENSION, OUTPUT_NAME_PREFIX, OUTPUT_TIMESTAMP_FORMAT},
    errors::MergeError,
    img_ops::{self, RgbImgBuf},
    library_cfg::{MergeOutput, MergeRequest},
};

/// A decoded input, converted to 8 bit RGB. Any alpha channel is gone by this point.
#[derive(Debug, Clone)]
pub struct InputImage {
    pub path: PathBuf,
    pub image: RgbImgBuf,
}

impl InputImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Load every image in `request`, place them side by side and write the result as a PNG.
///
/// All inputs are decoded before anything is allocated or written, so a missing or
/// broken input never leaves a partial output file behind.
pub fn merge_images(request: &MergeRequest, clock: &dyn Clock) -> Result<MergeOutput, MergeError> {
    if request.image_paths.is_empty() {
        return Err(MergeError::NoInputImages);
    }

    let images = load_images(&request.image_paths)?;
    let num_images = images.len();

    let canvas = compose(images, request.gap, request.background)?;
    let (width, height) = canvas.dimensions();

    let output_path = resolve_output_path(request.output_path.as_deref(), clock);
    info!(
        target: "merge_images",
        "Writing {}x{} merged image to {}", width, height, output_path.display()
    );
    canvas.save_with_format(&output_path, ImageFormat::Png)?;

    Ok(MergeOutput {
        output_path,
        width,
        height,
        num_images,
    })
}

/// Decode each path in order, stopping at the first failure.
pub fn load_images(paths: &[PathBuf]) -> Result<Vec<InputImage>, MergeError> {
    let mut images = Vec::with_capacity(paths.len());

    for path in paths {
        trace!(target: "load_images", "Decoding {}", path.display());

        let image = decode_image(path)?.to_rgb8();

        images.push(InputImage {
            path: path.to_path_buf(),
            image,
        });
    }

    Ok(images)
}

//The format is sniffed from the file contents, so a misnamed or extensionless file still
//decodes. The extension is only a fallback when the contents are not recognised.
fn decode_image(path: &Path) -> Result<DynamicImage, MergeError> {
    let decode_error = |detail: String| MergeError::ImageDecode {
        path: path.to_path_buf(),
        detail,
    };

    let reader = match Reader::open(path) {
        Ok(reader) => reader,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MergeError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(decode_error(e.to_string())),
    };

    reader
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))
}

/// Inputs after the first whose height differs from `height`, with their own height.
pub fn height_mismatches(images: &[InputImage], height: u32) -> Vec<(&Path, u32)> {
    images
        .iter()
        .skip(1)
        .filter(|img| img.height() != height)
        .map(|img| (img.path.as_path(), img.height()))
        .collect()
}

/// Width and height of the canvas needed to hold `images` with `gap` pixels between them.
/// The first image decides the height.
pub fn canvas_dimensions(images: &[InputImage], gap: u32) -> Result<(u32, u32), MergeError> {
    let first = images.first().ok_or(MergeError::NoValidImages)?;

    let too_large = || MergeError::CanvasTooLarge {
        num_images: images.len(),
        gap,
    };

    let sum_x = images
        .iter()
        .try_fold(0u32, |acc, img| acc.checked_add(img.width()))
        .ok_or_else(too_large)?;

    let num_gaps = u32::try_from(images.len() - 1).map_err(|_e| too_large())?;
    let total_x = num_gaps
        .checked_mul(gap)
        .and_then(|gaps_x| gaps_x.checked_add(sum_x))
        .ok_or_else(too_large)?;

    Ok((total_x, first.height()))
}

/// Paste `images` left to right onto a fresh canvas. Each image is dropped as soon as
/// it has been copied.
pub fn compose(images: Vec<InputImage>, gap: u32, background: Rgb<u8>) -> Result<RgbImgBuf, MergeError> {
    let (canvas_x, canvas_y) = canvas_dimensions(&images, gap)?;

    //Heights are not reconciled. Shorter images leave background showing underneath,
    //taller ones get clipped. Either way the user probably wants to know.
    for (path, img_y) in height_mismatches(&images, canvas_y) {
        warn!(
            "Image {} has different height ({}) than first image ({})",
            path.display(),
            img_y,
            canvas_y
        );
    }

    let mut canvas = img_ops::blank_canvas(canvas_x, canvas_y, background);

    let mut x_offset = 0u32;
    for img in images {
        trace!(target: "compose", "Pasting {} at x={}", img.path.display(), x_offset);
        img_ops::paste_clipped(&mut canvas, &img.image, x_offset)?;
        x_offset = x_offset.saturating_add(img.width()).saturating_add(gap);
    }

    Ok(canvas)
}

/// An empty or absent path falls back to a name generated from the clock.
pub fn resolve_output_path(output_path: Option<&Path>, clock: &dyn Clock) -> PathBuf {
    match output_path {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => PathBuf::from(default_output_name(clock)),
    }
}

pub fn default_output_name(clock: &dyn Clock) -> String {
    format!(
        "{}{}.{}",
        OUTPUT_NAME_PREFIX,
        clock.now().format(OUTPUT_TIMESTAMP_FORMAT),
        OUTPUT_NAME_EXTENSION
    )
}
