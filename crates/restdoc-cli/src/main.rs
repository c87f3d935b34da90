use anyhow::{Context, Result, bail};
use clap::Parser as _;
use log::{debug, error, info};
use restdoc_config::Config;
use restdoc_engine::parsing::snapshot;
use restdoc_engine::{Diagnostic, Document, FsOrigin, ParsedDoc, Parser};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Parse reStructuredText-style documents and report what was found.
#[derive(Debug, clap::Parser)]
#[command(name = "restdoc", version)]
struct Cli {
    /// Documents to parse. Defaults to the `sources` globs of the config.
    files: Vec<PathBuf>,

    /// Config file to use instead of ~/.config/restdoc/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print each document as JSON instead of an outline
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Exit with an error if any document has diagnostics
    #[arg(long)]
    deny_warnings: bool,
}

/// One parsed document as printed with `--json`.
#[derive(Serialize)]
struct Report<'a> {
    file: &'a Path,
    document: &'a Document,
    diagnostics: &'a [Diagnostic],
    links: &'a BTreeMap<String, String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Filter used when `RUST_LOG` is unset.
///
/// The engine reports diagnostics as warnings; the CLI prints them itself, so
/// the engine's log output is kept to errors unless `--verbose` is given.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info,restdoc_engine=error"
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(verbose)),
    )
    .init();
}

/// Parses every requested document. Returns whether the run succeeded.
fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?;
    let files = if cli.files.is_empty() {
        config
            .source_files()?
            .into_iter()
            .map(|file| config.root.join(file))
            .collect()
    } else {
        cli.files.clone()
    };
    if files.is_empty() {
        bail!("no documents to parse");
    }

    let parser = Parser::new()
        .with_origin(FsOrigin::new(&config.root))
        .with_options(config.parser.clone());

    let mut ok = true;
    let mut warnings = 0;
    for file in &files {
        debug!("parsing {}", file.display());
        let path = std::path::absolute(file)
            .with_context(|| format!("cannot resolve {}", file.display()))?;
        match parser.parse_file(&path) {
            Ok(parsed) => {
                println!("{}", render(file, &parsed, cli.json)?);
                for diagnostic in &parsed.diagnostics {
                    eprintln!("{}: {diagnostic}", file.display());
                }
                warnings += parsed.diagnostics.len();
            }
            Err(e) => {
                error!("{}: {e}", file.display());
                ok = false;
            }
        }
    }

    info!("parsed {} document(s), {warnings} diagnostic(s)", files.len());
    if cli.deny_warnings && warnings > 0 {
        ok = false;
    }
    Ok(ok)
}

/// The explicit config path must exist; the default one is optional.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file {} not found", path.display())),
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

fn render(file: &Path, parsed: &ParsedDoc, json: bool) -> Result<String> {
    if json {
        let report = Report {
            file,
            document: &parsed.document,
            diagnostics: &parsed.diagnostics,
            links: &parsed.links,
        };
        return Ok(serde_json::to_string(&report)?);
    }
    Ok(format!(
        "# {}\n{}",
        file.display(),
        snapshot::normalize(&parsed.document).trim_end()
    ))
}
