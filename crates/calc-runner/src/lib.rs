mod cli;
mod config;
mod logging;
mod run;

pub use cli::{Cli, Commands, ExpressionCommand, OutputFormat};
pub use config::{
    load_runner_config, parse_runner_config, validate_runner_config, ConfigIssue, LimitsConfig, LogConfig,
    OutputConfig, RunnerConfig, RunnerConfigError,
};
pub use logging::{filter_directive, init_logging};
pub use run::{
    execute, execute_demo, execute_eval, execute_parse, execute_tokens, merge_settings, render_error,
    resolve_settings, RunnerError, Settings, FLAT_DEMO, TREE_DEMO,
};
