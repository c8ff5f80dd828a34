//! `exam` command-line tool.

use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::{ColorChoice, Parser};
use exam_cli::cli::{Cli, LogFormatArg, LogLevelArg};
use exam_cli::commands::run;
use exam_cli::logging::{LogConfig, LogFormat, init_logging};
use exam_persistence::{FileStore, StoreConfig};
use exam_validate::AdvisoryPolicy;
use tracing::error;
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = FileStore::open(&cli.store)
        .with_context(|| format!("open store at {}", cli.store.display()))
        .map(|store| store.with_config(store_config(&cli)))
        .and_then(|store| run(&store, &cli.command));
    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn store_config(cli: &Cli) -> StoreConfig {
    if cli.strict {
        StoreConfig::strict()
    } else {
        StoreConfig {
            advisory_policy: AdvisoryPolicy::Allow,
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_content = cli.log_content;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
