use image::Rgb;

// Canvas defaults
pub const DEFAULT_GAP: u32 = 0;
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([250, 250, 250]);

// Auto-generated output names look like merged-image-2021-06-01-13-45-09.png
pub const OUTPUT_NAME_PREFIX: &str = "merged-image-";
pub const OUTPUT_NAME_EXTENSION: &str = "png";
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
