use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "calc")]
#[command(about = "Integer arithmetic expression calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Runner config file (YAML or JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Maximum nesting of parentheses and unary minus.
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,
    #[arg(long, global = true, default_value_t = false, conflicts_with = "max_depth")]
    pub no_depth_limit: bool,
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Evaluate an expression.
    Eval(ExpressionCommand),
    /// Print the syntax tree of an expression.
    Parse(ExpressionCommand),
    /// Print the tokens of an expression.
    Tokens(ExpressionCommand),
    /// Evaluate the built-in examples with both calculators.
    Demo,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ExpressionCommand {
    #[arg(allow_hyphen_values = true)]
    pub expression: String,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
