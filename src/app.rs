//! Subcommand handlers and application utilities.
//!
//! This module contains exit codes, tracing setup, and one handler per
//! subcommand. Handlers print their result to stdout and report failures
//! on stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use albatross::cli::{Command, default_lang_dir};
use albatross::config::{ConfigError, Configuration};
use albatross::file::BackupOutcome;
use albatross::lang::LanguageManager;
use albatross::update::{ReqwestClient, UpdateChecker, UpdateStatus};
use serde_yaml::Value;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Timeout for the version endpoint request.
const UPDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unreadable or invalid file, missing path, bad arguments.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - update check failed.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs `command` and returns the process exit code.
pub fn dispatch(command: Command, namespace: &str) -> ExitCode {
    match command {
        Command::Get { file, path, json } => handle_get(&file, &path, json, namespace),
        Command::Keys { file } => handle_keys(&file, namespace),
        Command::Set {
            file,
            path,
            value,
            comments,
            backup,
        } => handle_set(&file, &path, &value, &comments, backup, namespace),
        Command::Backup { file } => handle_backup(&file, namespace),
        Command::Translate {
            locale,
            key,
            dir,
            fallback,
        } => handle_translate(&locale, &key, dir, fallback, namespace),
        Command::CheckUpdate {
            url,
            download,
            current,
        } => handle_check_update(&url, download, current),
    }
}

/// Opens and loads `file`, reporting failures on stderr.
fn open(file: &Path, namespace: &str) -> Result<Configuration, ExitCode> {
    let mut config = Configuration::new(file, namespace).map_err(report)?;
    config.load().map_err(report)?;
    Ok(config)
}

fn report(error: ConfigError) -> ExitCode {
    eprintln!("Error: {error}");
    if error.is_parse() {
        eprintln!("\nThe file is not a valid YAML mapping; fix it or restore it from its .bak copy.");
    }
    exit_code::CONFIG_ERROR
}

fn handle_get(file: &Path, path: &str, json: bool, namespace: &str) -> ExitCode {
    let config = match open(file, namespace) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let Some(value) = config.get(path) else {
        eprintln!("Error: '{path}' not found in {}", file.display());
        return exit_code::CONFIG_ERROR;
    };

    let rendered = if json {
        serde_json::to_string_pretty(value)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| e.to_string())
    } else {
        serde_yaml::to_string(value).map_err(|e| e.to_string())
    };
    match rendered {
        Ok(text) => {
            print!("{text}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: cannot render '{path}': {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

fn handle_keys(file: &Path, namespace: &str) -> ExitCode {
    match open(file, namespace) {
        Ok(config) => {
            for key in config.keys() {
                println!("{key}");
            }
            exit_code::SUCCESS
        }
        Err(code) => code,
    }
}

fn handle_set(
    file: &Path,
    path: &str,
    value: &str,
    comments: &[String],
    backup: bool,
    namespace: &str,
) -> ExitCode {
    let mut config = match open(file, namespace) {
        Ok(config) => config,
        Err(code) => return code,
    };

    if backup {
        if let Err(e) = config.backup_configuration() {
            return report(e);
        }
    }

    config.set_with_comments(path, parse_value(value), comments);
    match config.save() {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => report(e),
    }
}

/// Parses a command-line value as YAML, keeping unparsable input as text.
fn parse_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn handle_backup(file: &Path, namespace: &str) -> ExitCode {
    let config = match Configuration::new(file, namespace) {
        Ok(config) => config,
        Err(e) => return report(e),
    };
    match config.backup_configuration() {
        Ok(BackupOutcome::Copied) => {
            println!("Backed up to {}.bak", file.display());
            exit_code::SUCCESS
        }
        Ok(BackupOutcome::UpToDate) => {
            println!("Backup is up to date");
            exit_code::SUCCESS
        }
        Ok(BackupOutcome::NoSource) => {
            eprintln!("Error: {} does not exist", file.display());
            exit_code::CONFIG_ERROR
        }
        Err(e) => report(e),
    }
}

fn handle_translate(
    locale: &str,
    key: &str,
    dir: Option<PathBuf>,
    fallback: String,
    namespace: &str,
) -> ExitCode {
    let Some(dir) = dir.or_else(default_lang_dir) else {
        eprintln!("Error: no language directory; pass --dir");
        return exit_code::CONFIG_ERROR;
    };
    let manager = LanguageManager::new(dir, fallback).with_namespace(namespace);
    println!("{}", manager.localized_string(key, locale));
    exit_code::SUCCESS
}

/// Runs the update check on a fresh Tokio runtime.
fn handle_check_update(url: &str, download: String, current: String) -> ExitCode {
    let version_url = match Url::parse(url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Error: invalid --url '{url}': {e}");
            return exit_code::CONFIG_ERROR;
        }
    };
    let client = match ReqwestClient::with_timeout(UPDATE_TIMEOUT) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            return exit_code::runtime_error();
        }
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    let checker = UpdateChecker::new(client, version_url, download, current);
    match runtime.block_on(checker.check()) {
        Some(UpdateStatus::UpToDate) => {
            println!("up to date");
            exit_code::SUCCESS
        }
        Some(UpdateStatus::Available {
            latest,
            download_url,
        }) => {
            println!("{latest} available at {download_url}");
            exit_code::SUCCESS
        }
        None => exit_code::runtime_error(),
    }
}
