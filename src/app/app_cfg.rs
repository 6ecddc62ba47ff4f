use crate::library::MergeRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVerbosity {
    Quiet,
    Default,
    Verbose,
}

#[derive(Debug, Clone)]
pub struct OutputCfg {
    pub json_output: bool,
    pub verbosity: ReportVerbosity,
}

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub merge_request: MergeRequest,
    pub output_cfg: OutputCfg,

    pub generate_completions: bool,
}
