use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use hn_cli::api::{ApiService, StoryListType};
use hn_cli::config::{AppConfig, LoggingConfig};
use hn_cli::error::{BrowseError, Result};
use hn_cli::internal::output::TerminalOutput;
use hn_cli::internal::presenter::ListPresenter;
use hn_cli::internal::session::SessionIndex;
use hn_cli::internal::viewer::{ItemViewer, ViewMode};
use hn_cli::utils::datetime::now_secs;

/// Browse Hacker News from the terminal.
#[derive(Debug, Parser)]
#[command(name = "hn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a config.ron file.
    #[arg(long, global = true, env = "HN_CLI_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Also log to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the top stories.
    Top(ListArgs),
    /// List the newest stories.
    New(ListArgs),
    /// List the best stories.
    Best(ListArgs),
    /// List Ask HN posts.
    Ask(ListArgs),
    /// List Show HN posts.
    Show(ListArgs),
    /// List job posts.
    Jobs(ListArgs),
    /// View an item from the last listing by its number.
    View(ViewArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Number of stories to show.
    limit: Option<usize>,
}

#[derive(Debug, Args)]
struct ViewArgs {
    /// Number shown next to the story in the last listing.
    index: usize,

    /// Show the comment thread instead of the linked page.
    #[arg(short, long)]
    comments: bool,

    /// Only print comments whose author, text or age matches this regex.
    #[arg(short = 'q', long = "query", visible_alias = "comments-regex-query", default_value = "")]
    query: String,

    /// Open in the browser instead of printing.
    #[arg(short, long)]
    browser: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match AppConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", format!("Error: {:#}", e).red());
                return;
            }
        },
        None => AppConfig::load(),
    };

    let _guard = init_logging(&config.logging, cli.verbose);

    if let Err(err) = run(cli, &config) {
        tracing::error!(error = ?err, "Command failed");
        eprintln!("{}", format!("Error: {}", report(&err)).red());
    }
}

/// Log to a daily rolling file so stdout stays clean for listings.
/// RUST_LOG, when set, takes precedence over the configured levels.
fn init_logging(logging: &LoggingConfig, verbose: bool) -> Option<WorkerGuard> {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(logging.filter_directive()),
    };

    let log_dir = logging.resolved_directory();
    let (file_layer, guard) = match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "hn-cli.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .compact();
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("could not create log directory {}: {}", log_dir.display(), e);
            (None, None)
        }
    };

    let stderr_layer = verbose.then(|| fmt::layer().with_writer(io::stderr).compact());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    guard
}

fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let api = ApiService::with_base_url(config.api_base_url.clone(), config.request_timeout())?
        .with_page_width(config.wrap_width);

    let stdout = io::stdout();
    let color = config.color && !cli.no_color && stdout.is_terminal();
    let mut out = TerminalOutput::new(stdout.lock(), color, config.wrap_width, now_secs())
        .with_pager(config.pager.clone());

    let (list_type, args) = match cli.command {
        Commands::View(args) => return view(&api, config, &args, &mut out),
        Commands::Top(args) => (StoryListType::Top, args),
        Commands::New(args) => (StoryListType::New, args),
        Commands::Best(args) => (StoryListType::Best, args),
        Commands::Ask(args) => (StoryListType::Ask, args),
        Commands::Show(args) => (StoryListType::Show, args),
        Commands::Jobs(args) => (StoryListType::Job, args),
    };

    let mut session = SessionIndex::new(&config.session_dir());
    ListPresenter::new(&api, &mut out, &mut session)
        .present_list(list_type, args.limit.unwrap_or(config.default_limit))?;
    Ok(())
}

fn view<W: io::Write>(
    api: &ApiService,
    config: &AppConfig,
    args: &ViewArgs,
    out: &mut TerminalOutput<W>,
) -> Result<()> {
    let session = SessionIndex::restore(&config.session_dir())?;
    let viewer = ItemViewer::new(api, &session).with_max_depth(config.max_depth);
    let mode = match args.comments {
        true => ViewMode::Comments,
        false => ViewMode::Page,
    };

    if args.browser {
        let url = viewer.browser_url(args.index, mode)?;
        open::that(&url).with_context(|| format!("failed to open {} in a browser", url))?;
        return Ok(());
    }

    viewer.view(args.index, &args.query, mode, out)
}

/// One line with the error and its causes.
fn report(err: &BrowseError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use hn_cli::error::SessionError;

    #[test]
    fn report_joins_fetch_causes_on_one_line() {
        let err = BrowseError::Fetch(
            anyhow!("connection refused")
                .context("failed to send GET request to http://localhost:1/item/5.json")
                .context("fetch_item failed for id 5"),
        );

        let message = report(&err);
        assert_eq!(
            message,
            "fetch_item failed for id 5: failed to send GET request to \
             http://localhost:1/item/5.json: connection refused"
        );
        assert!(!message.contains('\n'));
    }

    #[test]
    fn report_includes_io_source_of_session_errors() {
        let err = BrowseError::Session(SessionError::Io {
            path: PathBuf::from("/tmp/hn/.hncliconfig"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        });

        assert_eq!(
            report(&err),
            "failed to access /tmp/hn/.hncliconfig: permission denied"
        );
    }

    #[test]
    fn report_of_plain_error_is_its_message() {
        let err = BrowseError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            report(&err),
            "index 4 out of range (last listing has 2 items)"
        );
    }
}
