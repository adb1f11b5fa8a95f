mod clipboard;
mod clock;
mod commit;
mod config;
mod form;
mod headless;
mod notify;
mod picker;
mod session;
mod ui;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::clock::select_clock;
use crate::commit::CommitDraft;
use crate::commit::validator::validate_date;
use crate::config::{AppConfig, Theme};
use crate::headless::{PrintOptions, PrintStatus};
use crate::notify::ConsoleNotifier;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTheme {
    Dark,
    Light,
}

impl From<CliTheme> for Theme {
    fn from(value: CliTheme) -> Self {
        match value {
            CliTheme::Dark => Theme::Dark,
            CliTheme::Light => Theme::Light,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "steins-git",
    version,
    about = "Compose backdated `git commit --date` commands"
)]
struct Cli {
    /// Commit date, prefilled into the form
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<String>,

    /// Commit time of day, 24-hour
    #[arg(long, value_name = "HH:MM")]
    time: Option<String>,

    /// Commit message
    #[arg(long, short = 'm')]
    message: Option<String>,

    /// Print the command to stdout instead of opening the window
    #[arg(long)]
    print: bool,

    /// Also copy the printed command to the clipboard
    #[arg(long, requires = "print")]
    copy: bool,

    /// Print a JSON report instead of the bare command
    #[arg(long, requires = "print")]
    json: bool,

    #[arg(long, value_enum, default_value_t = CliTheme::Dark)]
    theme: CliTheme,

    #[arg(long, hide = true, value_name = "YYYY-MM-DD", value_parser = parse_pinned_date)]
    today: Option<NaiveDate>,
}

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig {
        theme: cli.theme.into(),
        clock: select_clock(cli.today),
        draft: CommitDraft {
            date: cli.date,
            time: cli.time,
            message: cli.message,
        },
    };

    if cli.print {
        let options = PrintOptions {
            copy: cli.copy,
            json: cli.json,
        };
        let status = headless::run(
            &config.form(),
            options,
            &mut io::stdout().lock(),
            &mut headless::clipboard(),
            &mut ConsoleNotifier,
        )?;
        return Ok(match status {
            PrintStatus::Printed => ExitCode::SUCCESS,
            PrintStatus::Rejected => ExitCode::FAILURE,
        });
    }

    ui::app::run_gui(config)?;
    Ok(ExitCode::SUCCESS)
}

fn parse_pinned_date(value: &str) -> Result<NaiveDate, String> {
    validate_date(Some(value)).map_err(|err| err.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
