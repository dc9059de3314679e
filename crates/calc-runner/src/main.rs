use calc_runner::{execute, init_logging, render_error, resolve_settings, Cli, OutputFormat};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(error) => {
            init_logging(cli.verbose, None);
            report(&render_error(&error, cli.format.unwrap_or_default()), cli.format.unwrap_or_default());
            std::process::exit(1);
        }
    };
    init_logging(settings.verbose, settings.log_level.as_deref());

    match execute(&cli.command, &settings) {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            report(&render_error(&error, settings.format), settings.format);
            std::process::exit(1);
        }
    }
}

fn report(message: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{message}"),
        OutputFormat::Text => eprintln!("{message}"),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
