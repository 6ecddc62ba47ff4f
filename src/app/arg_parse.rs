use std::{convert::TryFrom, ffi::OsString, path::PathBuf};

use crate::{
    app::*,
    library::{
        definitions::{DEFAULT_BACKGROUND, DEFAULT_GAP},
        img_ops, MergeRequest,
    },
};

const BIN_NAME: &str = "image_merge";

const IMAGE_PATHS: &str = "Input image paths";
const OUTPUT_PATH: &str = "Output path";
const GAP: &str = "Gap";
const BACKGROUND: &str = "Background color";
const JSON_OUTPUT: &str = "Json output";
const QUIET: &str = "Quiet";
const VERBOSE: &str = "Verbose";
const GENERATE_BASH_COMPLETIONS: &str = "Generate bash completions";

fn build_clap_app() -> clap::App<'static, 'static> {
    //args are not added through method chaining because this appears to break rustfmt.
    let mut clap_app = clap::App::new("Image merge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Merge multiple images horizontally into a single PNG image");

    clap_app = clap_app.arg(
        clap::Arg::with_name(IMAGE_PATHS)
            .index(1)
            .multiple(true)
            .required_unless(GENERATE_BASH_COMPLETIONS)
            .help("Input image files to merge, in left to right order (e.g. image1.png image2.png)")
            .display_order(1),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(OUTPUT_PATH)
            .short("o")
            .long("output")
            .takes_value(true)
            .help("Output file path (default: merged-image-<timestamp>.png in the current directory)")
            .display_order(2),
    );

    //hyphen values are allowed so that a negative gap reaches our own validation
    //instead of being mistaken for a flag.
    clap_app = clap_app.arg(
        clap::Arg::with_name(GAP)
            .short("g")
            .long("gap")
            .takes_value(true)
            .allow_hyphen_values(true)
            .help("Gap in pixels between images (default: 0)")
            .display_order(3),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(BACKGROUND)
            .short("b")
            .long("background")
            .takes_value(true)
            .help("Background color as R,G,B, visible in gaps and below images shorter than the first (default: 250,250,250)")
            .display_order(4),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(JSON_OUTPUT)
            .long("json-output")
            .help("Print the result in json format"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(QUIET)
            .long("quiet")
            .help("Quiet verbosity: Only print errors and output")
            .conflicts_with(VERBOSE),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(VERBOSE)
            .long("verbose")
            .help("Print trace logs, and the full cause of any error"),
    );

    clap_app = clap_app.arg(
        clap::Arg::with_name(GENERATE_BASH_COMPLETIONS)
            .long("generate-bash-completions")
            .help("Print a bash completion script and exit"),
    );

    clap_app
}

pub fn generate_shell_completions() {
    build_clap_app().gen_completions_to(BIN_NAME, clap::Shell::Bash, &mut std::io::stdout());
}

pub fn parse_args() -> Result<AppCfg, AppError> {
    parse_args_from(std::env::args_os())
}

pub fn parse_args_from<I, T>(args: I) -> Result<AppCfg, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_clap_app().get_matches_from(args);

    let image_paths = match matches.values_of_os(IMAGE_PATHS) {
        Some(image_paths) => image_paths.map(PathBuf::from).collect(),
        None => vec![],
    };

    let output_path = matches.value_of_os(OUTPUT_PATH).map(PathBuf::from);

    let gap = match matches.value_of(GAP) {
        Some(gap) => parse_gap(gap)?,
        None => DEFAULT_GAP,
    };

    let background = match matches.value_of(BACKGROUND) {
        Some(background) => img_ops::parse_rgb(background)?,
        None => DEFAULT_BACKGROUND,
    };

    let verbosity = if matches.is_present(QUIET) {
        ReportVerbosity::Quiet
    } else if matches.is_present(VERBOSE) {
        ReportVerbosity::Verbose
    } else {
        ReportVerbosity::Default
    };

    let ret = AppCfg {
        merge_request: MergeRequest {
            output_path,
            gap,
            background,
            ..MergeRequest::new(image_paths)
        },
        output_cfg: OutputCfg {
            json_output: matches.is_present(JSON_OUTPUT),
            verbosity,
        },
        generate_completions: matches.is_present(GENERATE_BASH_COMPLETIONS),
    };

    Ok(ret)
}

fn parse_gap(gap: &str) -> Result<u32, AppError> {
    let gap_signed = gap
        .trim()
        .parse::<i64>()
        .map_err(|_e| AppError::ParseGap(gap.to_string()))?;

    if gap_signed < 0 {
        return Err(AppError::NegativeGap(gap_signed));
    }

    u32::try_from(gap_signed).map_err(|_e| AppError::ParseGap(gap.to_string()))
}
