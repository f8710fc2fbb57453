//! `dform` command-line driver

mod commands;
mod config;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use config::{CliConfig, LogFormat};
use dform_catalog::CatalogError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let path_arg = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .value_parser(value_parser!(PathBuf))
            .help(help)
    };

    Command::new("dform")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Declarative form engine driven by a field catalog")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .default_value("dform.toml")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file (defaults apply if missing)"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .value_parser(["text", "json"])
                .help("Log output format"),
        )
        .subcommand(
            Command::new("check")
                .about("Load a catalog and summarize its fields")
                .arg(path_arg("catalog", "Field catalog (JSON or YAML)").required(true)),
        )
        .subcommand(
            Command::new("render")
                .about("Print the controls currently visible")
                .arg(path_arg("catalog", "Field catalog (JSON or YAML)").required(true))
                .arg(path_arg("values", "JSON object of field values to apply first"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the render model as JSON"),
                ),
        )
        .subcommand(
            Command::new("submit")
                .about("Apply values, validate and hand off the record")
                .arg(path_arg("catalog", "Field catalog (JSON or YAML)").required(true))
                .arg(path_arg("values", "JSON object of field values").required(true))
                .arg(path_arg("store", "Hand-off store file").required(true)),
        )
        .subcommand(
            Command::new("confirm")
                .about("Print the confirmation view of a handed-off record")
                .arg(path_arg("store", "Hand-off store file").required(true))
                .arg(path_arg("names", "JSON object of field name to display name")),
        )
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn path<'a>(args: &'a ArgMatches, name: &str) -> Option<&'a Path> {
    args.get_one::<PathBuf>(name).map(PathBuf::as_path)
}

fn required_path<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    path(args, name).ok_or_else(|| anyhow::anyhow!("missing --{name}"))
}

fn run(matches: &ArgMatches) -> Result<u8> {
    let config_path = required_path(matches, "config")?;
    let config = CliConfig::load(config_path)?;

    let log_format = matches
        .get_one::<String>("log-format")
        .and_then(|f| LogFormat::parse(f))
        .or(config.log_format)
        .unwrap_or_default();
    init_tracing(log_format);
    tracing::debug!(config = %config_path.display(), ?log_format, "Configuration loaded");

    let form = &config.form;
    let mut out = std::io::stdout().lock();

    match matches.subcommand() {
        Some(("check", args)) => commands::check(required_path(args, "catalog")?, &mut out),
        Some(("render", args)) => commands::render(
            required_path(args, "catalog")?,
            path(args, "values"),
            args.get_flag("json"),
            form,
            &mut out,
        ),
        Some(("submit", args)) => commands::submit(
            required_path(args, "catalog")?,
            required_path(args, "values")?,
            required_path(args, "store")?,
            form,
            &mut out,
        ),
        Some(("confirm", args)) => commands::confirm(
            required_path(args, "store")?,
            path(args, "names"),
            form,
            &mut out,
        ),
        _ => Ok(0),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    match run(&matches) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            let configuration = e
                .downcast_ref::<CatalogError>()
                .is_some_and(CatalogError::is_configuration);
            ExitCode::from(if configuration {
                commands::EXIT_CONFIGURATION
            } else {
                commands::EXIT_REJECTED
            })
        }
    }
}
