use image::*;
use thiserror::Error;

pub type RgbImgBuf = ImageBuffer<Rgb<u8>, Vec<u8>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImgOpsError {
    #[error("Expected a color in the form R,G,B with each channel in 0-255, got: {0}")]
    ColorParseError(String),
}

pub fn blank_canvas(width: u32, height: u32, background: Rgb<u8>) -> RgbImgBuf {
    ImageBuffer::from_pixel(width, height, background)
}

//Copy img into canvas with its top-left corner at (x_coord, 0). Whatever part of img
//falls outside the canvas is dropped instead of being an error.
pub fn paste_clipped(canvas: &mut RgbImgBuf, img: &RgbImgBuf, x_coord: u32) -> ImageResult<()> {
    let (canvas_x, canvas_y) = canvas.dimensions();
    let (img_x, img_y) = img.dimensions();

    if x_coord >= canvas_x {
        return Ok(());
    }

    let visible_x = std::cmp::min(img_x, canvas_x - x_coord);
    let visible_y = std::cmp::min(img_y, canvas_y);

    canvas.copy_from(&img.view(0, 0, visible_x, visible_y), x_coord, 0)
}

pub fn parse_rgb(s: &str) -> Result<Rgb<u8>, ImgOpsError> {
    let channels = s
        .split(',')
        .map(|channel| channel.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_e| ImgOpsError::ColorParseError(s.to_string()))?;

    match channels.as_slice() {
        &[r, g, b] => Ok(Rgb([r, g, b])),
        _ => Err(ImgOpsError::ColorParseError(s.to_string())),
    }
}
