use crate::cli::{Cli, Commands, ExpressionCommand, OutputFormat};
use crate::config::{load_runner_config, RunnerConfig, RunnerConfigError};
use calc_expr::{
    flat, parse_expression_with_options, tokenize, CalcError, Calculator, ParseError, ParseOptions,
};
use serde_json::{json, Value};

/// Flat-calculator examples: space-separated, no parentheses.
pub const FLAT_DEMO: [&str; 3] = ["2 + 3", "3 * 2 + 1", "3 * -2 + 6"];

pub const TREE_DEMO: [&str; 6] = [
    "2 + 3",
    "3 * 2 + 1",
    "3 * -2 + 6",
    "(1 + 2) * 3",
    "((2 + 3) * (1 + 3))",
    "-(1 + 2) * 4",
];

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("runner config load failed: {0}")]
    Config(#[from] RunnerConfigError),
    #[error("{source}")]
    Calculation {
        expression: String,
        #[source]
        source: CalcError,
    },
    #[error("demo expression `{expression}` failed: {reason}")]
    Demo { expression: String, reason: String },
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Effective settings after merging the config file with CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub options: ParseOptions,
    pub format: OutputFormat,
    pub verbose: bool,
    pub log_level: Option<String>,
}

pub fn resolve_settings(cli: &Cli) -> Result<Settings, RunnerError> {
    let config = match &cli.config {
        Some(path) => load_runner_config(path)?,
        None => RunnerConfig::default(),
    };
    Ok(merge_settings(cli, &config))
}

pub fn merge_settings(cli: &Cli, config: &RunnerConfig) -> Settings {
    let mut options = config.parse_options();
    if cli.no_depth_limit {
        options.max_depth = None;
    } else if let Some(max_depth) = cli.max_depth {
        options.max_depth = Some(max_depth);
    }
    Settings {
        options,
        format: cli.format.unwrap_or(config.output.format),
        verbose: cli.verbose,
        log_level: config.log.level.clone(),
    }
}

pub fn execute(command: &Commands, settings: &Settings) -> Result<String, RunnerError> {
    match command {
        Commands::Eval(command) => execute_eval(command, settings),
        Commands::Parse(command) => execute_parse(command, settings),
        Commands::Tokens(command) => execute_tokens(command, settings),
        Commands::Demo => execute_demo(settings),
    }
}

pub fn execute_eval(command: &ExpressionCommand, settings: &Settings) -> Result<String, RunnerError> {
    let expression = command.expression.as_str();
    let value = calc_expr::calculate_with_options(expression, settings.options)
        .map_err(|source| calculation_error(expression, source))?;
    tracing::info!(expression, value, "evaluated");
    match settings.format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string(&json!({
            "expression": expression,
            "result": value,
        }))?),
    }
}

pub fn execute_parse(command: &ExpressionCommand, settings: &Settings) -> Result<String, RunnerError> {
    let expression = command.expression.as_str();
    let ast = non_blank(expression)
        .and_then(|expression| parse_expression_with_options(expression, settings.options))
        .map_err(|error| calculation_error(expression, error.into()))?;
    match settings.format {
        OutputFormat::Text => Ok(ast.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string(&json!({
            "expression": expression,
            "ast": ast.to_string(),
            "depth": ast.depth(),
            "nodes": ast.node_count(),
        }))?),
    }
}

pub fn execute_tokens(command: &ExpressionCommand, settings: &Settings) -> Result<String, RunnerError> {
    let expression = command.expression.as_str();
    let tokens = tokenize(expression).map_err(|error| calculation_error(expression, error.into()))?;
    match settings.format {
        OutputFormat::Text => Ok(tokens
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let items = tokens
                .iter()
                .map(|token| {
                    json!({
                        "kind": token.kind.as_str(),
                        "text": token.text,
                        "pos": token.pos,
                    })
                })
                .collect::<Vec<_>>();
            Ok(serde_json::to_string(&items)?)
        }
    }
}

pub fn execute_demo(settings: &Settings) -> Result<String, RunnerError> {
    let flat_results = FLAT_DEMO
        .iter()
        .map(|expression| {
            flat::calculate(expression)
                .map(|value| (*expression, value))
                .map_err(|error| demo_error(expression, error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut calculator = Calculator::with_options(settings.options);
    let tree_results = TREE_DEMO
        .iter()
        .map(|expression| {
            calculator
                .calculate(expression)
                .map(|value| (*expression, value))
                .map_err(|error| demo_error(expression, error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match settings.format {
        OutputFormat::Text => {
            let mut lines = vec![
                "Expression Calculator".to_string(),
                "=====================".to_string(),
                String::new(),
                "--- Flat two-pass calculator ---".to_string(),
            ];
            lines.extend(flat_results.iter().map(|(expression, value)| format_demo_line(expression, *value)));
            lines.push(String::new());
            lines.push("--- Syntax tree calculator ---".to_string());
            lines.extend(tree_results.iter().map(|(expression, value)| format_demo_line(expression, *value)));
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string(&json!({
            "flat": demo_json(&flat_results),
            "tree": demo_json(&tree_results),
        }))?),
    }
}

/// Renders a failure for the chosen output format. JSON errors are meant
/// for stdout, text errors for stderr.
pub fn render_error(error: &RunnerError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            let payload = match error {
                RunnerError::Calculation { expression, source } => json!({
                    "expression": expression,
                    "error": {
                        "kind": source.kind().as_str(),
                        "message": source.to_string(),
                    },
                }),
                other => json!({
                    "error": {
                        "kind": "runner",
                        "message": other.to_string(),
                    },
                }),
            };
            payload.to_string()
        }
    }
}

fn non_blank(expression: &str) -> Result<&str, ParseError> {
    if expression.trim().is_empty() {
        Err(ParseError::EmptyExpression)
    } else {
        Ok(expression)
    }
}

fn calculation_error(expression: &str, source: CalcError) -> RunnerError {
    tracing::debug!(expression, error = %source, "calculation failed");
    RunnerError::Calculation {
        expression: expression.to_string(),
        source,
    }
}

fn demo_error(expression: &str, reason: String) -> RunnerError {
    RunnerError::Demo {
        expression: expression.to_string(),
        reason,
    }
}

fn format_demo_line(expression: &str, value: i32) -> String {
    format!("  calculate(\"{expression}\") = {value}")
}

fn demo_json(results: &[(&str, i32)]) -> Value {
    Value::Array(
        results
            .iter()
            .map(|(expression, value)| json!({ "expression": expression, "result": value }))
            .collect(),
    )
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
