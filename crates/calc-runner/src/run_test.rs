use super::{
    execute, execute_demo, execute_eval, execute_parse, execute_tokens, merge_settings, render_error,
    RunnerError, Settings,
};
use crate::cli::{Cli, Commands, ExpressionCommand, OutputFormat};
use crate::config::RunnerConfig;
use calc_expr::{ErrorKind, ParseOptions};
use clap::Parser;
use serde_json::{json, Value};

fn settings(format: OutputFormat) -> Settings {
    Settings {
        options: ParseOptions::default(),
        format,
        verbose: false,
        log_level: None,
    }
}

fn expr(expression: &str) -> ExpressionCommand {
    ExpressionCommand {
        expression: expression.to_string(),
    }
}

fn parse_json(output: &str) -> Value {
    serde_json::from_str(output).expect("output must be json")
}

#[test]
fn eval_prints_result() {
    assert_eq!(execute_eval(&expr("3 * (2 + 1)"), &settings(OutputFormat::Text)).expect("eval"), "9");
    let output = execute_eval(&expr("-7 / 3"), &settings(OutputFormat::Json)).expect("eval");
    assert_eq!(parse_json(&output), json!({ "expression": "-7 / 3", "result": -2 }));
}

#[test]
fn eval_failure_keeps_error_kind() {
    let error = execute_eval(&expr("10 / (5 - 5)"), &settings(OutputFormat::Json)).expect_err("must fail");
    let RunnerError::Calculation { source, .. } = &error else {
        panic!("expected calculation error");
    };
    assert_eq!(source.kind(), ErrorKind::Validation);
    assert_eq!(
        parse_json(&render_error(&error, OutputFormat::Json)),
        json!({
            "expression": "10 / (5 - 5)",
            "error": { "kind": "validation", "message": "validation failed: division by zero" },
        })
    );
    assert_eq!(
        render_error(&error, OutputFormat::Text),
        "validation failed: division by zero"
    );
}

#[test]
fn parse_prints_parenthesised_tree() {
    let output = execute_parse(&expr("1 + 2 * -3"), &settings(OutputFormat::Text)).expect("parse");
    assert_eq!(output, "(1 + (2 * -3))");

    let output = execute_parse(&expr("(1 + 2) / 0"), &settings(OutputFormat::Json)).expect("parse");
    assert_eq!(
        parse_json(&output),
        json!({ "expression": "(1 + 2) / 0", "ast": "((1 + 2) / 0)", "depth": 3, "nodes": 5 })
    );
}

#[test]
fn parse_rejects_blank_and_malformed_input() {
    for input in ["   ", "(1 + 2"] {
        let error = execute_parse(&expr(input), &settings(OutputFormat::Text)).expect_err("must fail");
        let RunnerError::Calculation { source, .. } = error else {
            panic!("expected calculation error");
        };
        assert_eq!(source.kind(), ErrorKind::InvalidExpression);
    }
}

#[test]
fn tokens_lists_every_token() {
    let output = execute_tokens(&expr("(4)"), &settings(OutputFormat::Text)).expect("tokens");
    assert_eq!(output, "LPAREN '(' at 0\nNUMBER '4' at 1\nRPAREN ')' at 2\nEOF '' at 3");

    let output = execute_tokens(&expr("-1"), &settings(OutputFormat::Json)).expect("tokens");
    assert_eq!(
        parse_json(&output),
        json!([
            { "kind": "MINUS", "text": "-", "pos": 0 },
            { "kind": "NUMBER", "text": "1", "pos": 1 },
            { "kind": "EOF", "text": "", "pos": 2 },
        ])
    );
}

#[test]
fn demo_runs_both_calculators() {
    let output = execute_demo(&settings(OutputFormat::Text)).expect("demo");
    assert!(output.contains("--- Flat two-pass calculator ---"));
    assert!(output.contains("  calculate(\"3 * -2 + 6\") = 0"));
    assert!(output.contains("  calculate(\"-(1 + 2) * 4\") = -12"));
    assert!(output.contains("  calculate(\"((2 + 3) * (1 + 3))\") = 20"));

    let output = parse_json(&execute_demo(&settings(OutputFormat::Json)).expect("demo"));
    assert_eq!(output["flat"].as_array().map(Vec::len), Some(3));
    assert_eq!(output["tree"].as_array().map(Vec::len), Some(6));
    assert_eq!(output["tree"][3], json!({ "expression": "(1 + 2) * 3", "result": 9 }));
}

#[test]
fn cli_flags_override_config() {
    let mut config = RunnerConfig::default();
    config.output.format = OutputFormat::Json;
    config.limits.max_depth = Some(8);

    let cli = Cli::try_parse_from(["calc", "eval", "1"]).expect("cli");
    let merged = merge_settings(&cli, &config);
    assert_eq!(merged.options.max_depth, Some(8));
    assert_eq!(merged.format, OutputFormat::Json);

    let cli = Cli::try_parse_from(["calc", "eval", "1", "--max-depth", "3", "--format", "text"]).expect("cli");
    let merged = merge_settings(&cli, &config);
    assert_eq!(merged.options.max_depth, Some(3));
    assert_eq!(merged.format, OutputFormat::Text);

    let cli = Cli::try_parse_from(["calc", "eval", "1", "--no-depth-limit"]).expect("cli");
    assert_eq!(merge_settings(&cli, &config).options.max_depth, None);
}

#[test]
fn depth_limit_reaches_the_parser() {
    let cli = Cli::try_parse_from(["calc", "eval", "((1))", "--max-depth", "1"]).expect("cli");
    let settings = merge_settings(&cli, &RunnerConfig::default());
    let Commands::Eval(command) = &cli.command else {
        panic!("expected eval");
    };
    let error = execute(&cli.command, &settings).expect_err("too deep");
    assert!(error.to_string().contains("nested too deeply"));
    assert_eq!(command.expression, "((1))");
}
