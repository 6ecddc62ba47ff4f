mod app_cfg;
mod app_fns;
mod arg_parse;
mod errors;

//exports
pub use app_cfg::{AppCfg, OutputCfg, ReportVerbosity};
pub use app_fns::*;
pub use arg_parse::{generate_shell_completions, parse_args};
pub use errors::AppError;
