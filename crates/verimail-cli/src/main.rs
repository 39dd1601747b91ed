//! Email verification CLI.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use verimail_cli::browse::Browser;
use verimail_cli::commands::{
    ChartAction, ExtractRequest, ShowRequest, run_add, run_chart, run_check, run_extract,
    run_reset, run_show,
};
use verimail_cli::logging::{LogConfig, LogFormat, init_logging};
use verimail_cli::progress::Spinner;
use verimail_cli::settings::Settings;
use verimail_cli::summary::{Styling, address_table, headers_table, terminal_size};
use verimail_client::ApiClient;
use verimail_ingest::Delimiter;
use verimail_store::{FileStore, SessionStore};

mod cli;

use crate::cli::{ChartArg, Cli, Command, DelimiterArg, LogFormatArg, LogLevelArg};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let styling = styling_from_cli(&cli);
    let session_path = settings.session_path();
    let store = FileStore::open_async(session_path.clone())
        .await
        .with_context(|| format!("open session {}", session_path.display()))?;
    let mut session = SessionStore::new(store);

    match cli.command {
        Command::Extract(args) => {
            let request = ExtractRequest {
                path: args.file,
                delimiter: match args.delimiter {
                    DelimiterArg::Comma => Delimiter::Comma,
                    DelimiterArg::Period => Delimiter::Period,
                },
                column: args.column,
                trim: args.trim,
                insert: args.insert,
            };
            let outcome = run_extract(&mut session, &request).await?;
            println!(
                "{}",
                headers_table(&outcome.headers, outcome.selected.as_deref(), styling)
            );
            if !outcome.column_known {
                println!("No header is named {:?}.", request.column.unwrap_or_default());
            } else if outcome.selected.is_none() && !outcome.headers.is_empty() {
                println!("No email column found; choose one with --column.");
            }
            match &outcome.summary {
                Some(summary) => println!("{summary}"),
                None => println!("No addresses found."),
            }
            match outcome.stored {
                Some(stored) => println!("Inserted; {stored} addresses stored."),
                None if !outcome.addresses.is_empty() => {
                    println!("{}", address_table(&outcome.addresses, styling));
                    println!("Run again with --insert to add them to the list.");
                }
                None => {}
            }
        }
        Command::Add { text } => {
            let list = run_add(&mut session, &text)?;
            println!("{} addresses stored.", list.len());
        }
        Command::List => {
            let addresses = session.addresses();
            if addresses.is_empty() {
                println!("No addresses stored.");
            } else {
                println!("{}", address_table(&addresses, styling));
            }
        }
        Command::Check { emails } => {
            let api = ApiClient::new(&settings.client_config(cli.api_url.as_deref()))?;
            let mut spinner = Spinner::new(format!("Checking addresses at {}", api.endpoint()));
            let outcome = run_check(&mut session, &api, &emails, &mut spinner).await?;
            if let Some(warning) = &outcome.storage_warning {
                eprintln!("warning: {warning}");
            }
            print_show(&mut session, &ShowRequest::default(), styling)?;
        }
        Command::Show(args) => {
            let request = ShowRequest {
                search: args.search,
                status: args.status,
                sort: args.sort,
                offset: args.offset,
            };
            print_show(&mut session, &request, styling)?;
        }
        Command::Browse => {
            let Some(mut browser) = Browser::open(&mut session, styling) else {
                println!("No results yet. Run `verimail check` first.");
                return Ok(());
            };
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = io::stdout();
            browser.run(input, &mut out).await?;
            writeln!(out)?;
        }
        Command::Chart { action } => {
            let action = action.map(|action| match action {
                ChartArg::Show => ChartAction::Show,
                ChartArg::Hide => ChartAction::Hide,
                ChartArg::Toggle => ChartAction::Toggle,
            });
            let shown = run_chart(&mut session, action)?;
            println!("Chart {}.", if shown { "shown" } else { "hidden" });
        }
        Command::Reset => {
            run_reset(&mut session)?;
            println!("Address list and results cleared.");
        }
    }
    Ok(())
}

fn print_show(
    session: &mut SessionStore<FileStore>,
    request: &ShowRequest,
    styling: Styling,
) -> Result<()> {
    let (_, rows) = terminal_size();
    match run_show(session, request, rows, styling)? {
        Some(rendered) => println!("{rendered}"),
        None => println!("No results yet. Run `verimail check` first."),
    }
    Ok(())
}

/// Table styling that follows the color choice.
fn styling_from_cli(cli: &Cli) -> Styling {
    match cli.color.color {
        ColorChoice::Always => Styling::Always,
        ColorChoice::Never => Styling::Never,
        ColorChoice::Auto if io::stdout().is_terminal() => Styling::Auto,
        ColorChoice::Auto => Styling::Never,
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
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
