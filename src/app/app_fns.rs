use std::{error::Error, path::Path};

use serde::Serialize;

use crate::{
    app::*,
    library::{merge_images, Clock, MergeOutput, SystemClock},
};

pub fn run_app() -> i32 {
    //Parse arguments and bail early if there is an error.
    let cfg = match parse_args() {
        Ok(cfg) => {
            configure_logs(cfg.output_cfg.verbosity);
            cfg
        }
        Err(fatal) => {
            //Errors are reported using TermLogger, which is configured from the argument parser.
            //But if a fatal error occurred during parsing the logger would not be configured when
            //we attempt to print the fatal error. So if a fatal error occurs, start the logger
            //before returning the error.
            configure_logs(ReportVerbosity::Verbose);
            print_fatal_err(&fatal, ReportVerbosity::Verbose);
            return 1;
        }
    };

    if cfg.generate_completions {
        generate_shell_completions();
        return 0;
    }

    let result = run_app_inner(&cfg, &SystemClock);
    match &result {
        Ok(merge_output) => println!("{}", format_merge_output(merge_output, cfg.output_cfg.json_output)),
        Err(fatal_error) => print_fatal_err(fatal_error, cfg.output_cfg.verbosity),
    }

    exit_code(&result)
}

pub fn exit_code<T, E>(result: &Result<T, E>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

pub fn run_app_inner(cfg: &AppCfg, clock: &dyn Clock) -> Result<MergeOutput, AppError> {
    let request = &cfg.merge_request;

    info!(
        "Merging {} images with a gap of {}px",
        request.image_paths.len(),
        request.gap
    );

    let merge_output = merge_images(request, clock)?;
    Ok(merge_output)
}

fn print_fatal_err(fatal_err: &AppError, verbosity: ReportVerbosity) {
    error!(target: "app-errorlog", "{}", fatal_err);

    if verbosity == ReportVerbosity::Verbose {
        let mut source: Option<&(dyn Error + 'static)> = fatal_err.source();
        while let Some(e) = source {
            error!(target: "app-errorlog", "    caused by: {}", e);
            source = e.source();
        }
    }
}

pub fn format_merge_output(merge_output: &MergeOutput, json_output: bool) -> String {
    if json_output {
        #[derive(Serialize)]
        struct JsonStruct<'a> {
            output: &'a Path,
            width: u32,
            height: u32,
            images: usize,
        }

        let output = JsonStruct {
            output: &merge_output.output_path,
            width: merge_output.width,
            height: merge_output.height,
            images: merge_output.num_images,
        };

        serde_json::to_string_pretty(&output).unwrap_or_default()
    } else {
        format!("Merged image saved to: {}", merge_output.output_path.display())
    }
}

pub fn configure_logs(verbosity: ReportVerbosity) {
    use simplelog::*;

    let mut cfg = ConfigBuilder::new();
    cfg.set_time_level(LevelFilter::Off);

    let min_loglevel = match verbosity {
        ReportVerbosity::Quiet => LevelFilter::Error,
        ReportVerbosity::Default => LevelFilter::Info,
        ReportVerbosity::Verbose => LevelFilter::Trace,
    };

    TermLogger::init(
        min_loglevel,
        cfg.build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .expect("TermLogger failed to initialize");
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    use super::*;
    use crate::{
        app::arg_parse::parse_args_from,
        library::{FixedClock, MergeError},
    };

    fn cfg_for(args: &[&str]) -> AppCfg {
        parse_args_from(std::iter::once("image_merge").chain(args.iter().copied())).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2020, 2, 29).unwrap().and_hms_opt(8, 0, 0).unwrap())
    }

    #[test]
    fn test_run_merges_from_args() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        RgbImage::from_pixel(100, 50, Rgb([9, 9, 9])).save(&a).unwrap();
        RgbImage::from_pixel(80, 30, Rgb([7, 7, 7])).save(&b).unwrap();
        let out = dir.path().join("merged.png");

        let cfg = cfg_for(&[
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);
        let merge_output = run_app_inner(&cfg, &clock()).unwrap();

        assert_eq!(merge_output.output_path, out);
        assert_eq!((merge_output.width, merge_output.height), (180, 50));
        assert_eq!(merge_output.num_images, 2);

        let written = image::open(&out).unwrap().to_rgb8();
        assert_eq!(*written.get_pixel(120, 40), Rgb([250, 250, 250]));
    }

    #[test]
    fn test_run_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");
        let out = dir.path().join("merged.png");

        let cfg = cfg_for(&[missing.to_str().unwrap(), "-o", out.to_str().unwrap()]);

        match run_app_inner(&cfg, &clock()) {
            Err(AppError::Merge(MergeError::FileNotFound(path))) => assert_eq!(path, missing),
            other => panic!("expected FileNotFound, got {:?}", other),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_error_messages_name_the_file() {
        let err = AppError::from(MergeError::FileNotFound("x/y.png".into()));
        assert_eq!(err.to_string(), "File not found - x/y.png");

        let err = AppError::from(MergeError::NoInputImages);
        assert_eq!(err.to_string(), "No input images provided");
    }

    #[test]
    fn test_exit_code_distinguishes_failure() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.png");
        RgbImage::from_pixel(4, 4, Rgb([1, 1, 1])).save(&a).unwrap();
        let missing = dir.path().join("missing.png");

        let ok_cfg = cfg_for(&[a.to_str().unwrap(), "-o", dir.path().join("ok.png").to_str().unwrap()]);
        let err_cfg = cfg_for(&[
            a.to_str().unwrap(),
            missing.to_str().unwrap(),
            "-o",
            dir.path().join("err.png").to_str().unwrap(),
        ]);

        assert_eq!(exit_code(&run_app_inner(&ok_cfg, &clock())), 0);
        assert_eq!(exit_code(&run_app_inner(&err_cfg, &clock())), 1);
    }

    #[test]
    fn test_format_merge_output() {
        let merge_output = MergeOutput {
            output_path: "merged-image-2020-02-29-08-00-00.png".into(),
            width: 190,
            height: 50,
            num_images: 2,
        };

        assert_eq!(
            format_merge_output(&merge_output, false),
            "Merged image saved to: merged-image-2020-02-29-08-00-00.png"
        );

        let json: serde_json::Value = serde_json::from_str(&format_merge_output(&merge_output, true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "output": "merged-image-2020-02-29-08-00-00.png",
                "width": 190,
                "height": 50,
                "images": 2,
            })
        );
    }
}
