//! tg-media-export - CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use tg_media_export::{
    api::{GatewayClient, PlatformClient},
    cli::Args,
    config::{parse_channel, validate_config, Config},
    download::{ExportEngine, ExportOutcome, ExportSettings},
    error::{exit_codes, Result},
    fs::get_export_root,
    output::{
        print_banner, print_config_summary, print_error, print_export_start,
        print_export_summary, print_info, print_stopped, print_warning, ConsoleProgress,
        ProgressSink,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    let code = match run().await {
        Ok(ExportOutcome::Completed) => exit_codes::SUCCESS,
        Ok(ExportOutcome::Interrupted) => exit_codes::ABORT,
        Err(e) => {
            print_error(&e.to_string());
            tracing::error!("Export aborted: {:?}", e);
            e.exit_code()
        }
    };

    ExitCode::from(code as u8)
}

/// Split a log file path into the directory and file name the appender wants.
fn log_file_target(path: &Path) -> Option<(PathBuf, PathBuf)> {
    let name = PathBuf::from(path.file_name()?);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, name))
}

/// Most verbose level echoed to the terminal.
///
/// Progress and per-item events stay in the log file unless debugging, so they
/// do not break the progress line.
fn stderr_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::ERROR
    }
}

/// Install the stderr logger and, when configured, the log file.
fn setup_logging(debug: bool, log_file: Option<&Path>) {
    let level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_level(debug));

    let file_layer = log_file
        .and_then(log_file_target)
        .filter(|(dir, _)| std::fs::create_dir_all(dir).is_ok())
        .map(|(dir, name)| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(tracing_appender::rolling::never(dir, name))
        });

    // Option<Layer> is itself a layer; None disables file output
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

async fn run() -> Result<ExportOutcome> {
    let args = Args::parse();
    let debug = args.debug;
    let quiet = args.quiet;

    print_banner();

    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "No config file at {}; using defaults and command-line flags",
            config_path.display()
        ));
        Config::default()
    };
    args.merge_into_config(&mut config);

    config.target.channel_name = parse_channel(&config.target.channel_name)?;
    validate_config(&config)?;

    setup_logging(debug, config.options.log_file.as_deref());
    tracing::info!("Program start");

    let channel = config.target.channel_name.clone();
    let export_root = get_export_root(&config, &channel)?;
    print_config_summary(&config, &export_root);

    // Ctrl-C stops the run at the next wait point
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    print_info("Connecting to gateway...");
    let client = GatewayClient::from_config(&config)?;
    let session = tokio::select! {
        _ = cancel.cancelled() => {
            print_stopped();
            return Ok(ExportOutcome::Interrupted);
        }
        session = client.connect() => session?,
    };
    let who = session
        .display_name
        .or(session.username)
        .unwrap_or_else(|| config.account.session_name.clone());
    print_info(&format!("Logged in as {}", who));

    let progress: Arc<dyn ProgressSink> = if quiet {
        Arc::new(ConsoleProgress::hidden())
    } else {
        Arc::new(ConsoleProgress::new())
    };

    print_export_start(&channel);
    let mut engine = ExportEngine::new(client, ExportSettings::from_config(&config), progress);
    let report = engine.export(&channel, &export_root, &cancel).await;

    if report.outcome == ExportOutcome::Interrupted {
        print_stopped();
    }
    print_export_summary(&report);

    Ok(report.outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_only_shows_errors_by_default() {
        assert_eq!(stderr_level(false), LevelFilter::ERROR);
        assert!(tracing::Level::INFO > LevelFilter::ERROR);
        assert!(tracing::Level::WARN > LevelFilter::ERROR);
        assert_eq!(stderr_level(true), LevelFilter::DEBUG);
    }

    #[test]
    fn test_log_file_target() {
        assert_eq!(
            log_file_target(Path::new(".tg_media_export.log")),
            Some((PathBuf::from("."), PathBuf::from(".tg_media_export.log")))
        );
        assert_eq!(
            log_file_target(Path::new("logs/run.log")),
            Some((PathBuf::from("logs"), PathBuf::from("run.log")))
        );
        assert_eq!(log_file_target(Path::new("/")), None);
    }
}
