use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use daypage_lib::PageKey;
use daypage_lib::config::{Settings, parse_idle_window};

mod cmd;
mod output;
mod prompts;

use output::{OutputFormat, print_error};

/// daypage - one drawing per day, saved when you stop drawing
#[derive(Parser)]
#[command(name = "daypage")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Directory holding the pages (default: $DAYPAGE_PAGES_DIR or the data directory)
  #[arg(long, global = true)]
  pages_dir: Option<PathBuf>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List days that have a drawing
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the stored drawing for a day
  Show {
    /// Day as YYYY-MM-DD or "today"
    #[arg(value_parser = PageKey::parse_date)]
    date: PageKey,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Store a PNG as the drawing for a day
  Import {
    /// Day as YYYY-MM-DD or "today"
    #[arg(value_parser = PageKey::parse_date)]
    date: PageKey,

    /// PNG file to store
    file: PathBuf,
  },

  /// Write the drawing for a day to a file
  Export {
    /// Day as YYYY-MM-DD or "today"
    #[arg(value_parser = PageKey::parse_date)]
    date: PageKey,

    /// Destination file
    file: PathBuf,
  },

  /// Clear the drawing for a day
  Erase {
    /// Day as YYYY-MM-DD or "today"
    #[arg(value_parser = PageKey::parse_date)]
    date: PageKey,

    /// Skip confirmation prompt
    #[arg(long)]
    force: bool,
  },

  /// Feed PNG frames as consecutive strokes through the autosave session
  Replay {
    /// Day as YYYY-MM-DD or "today"
    #[arg(value_parser = PageKey::parse_date)]
    date: PageKey,

    /// PNG frames, in drawing order
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    /// Pause between strokes (e.g., "500ms", "4s")
    #[arg(long, value_parser = humantime::parse_duration, default_value = "500ms")]
    gap: Duration,

    /// Idle window before an automatic save (default: $DAYPAGE_IDLE_WINDOW or 3s)
    #[arg(long, value_parser = parse_idle_window)]
    idle: Option<Duration>,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let mut settings = Settings::from_env()?;
  if let Some(pages_dir) = cli.pages_dir {
    settings.pages_dir = pages_dir;
  }

  match cli.command {
    Commands::List { output } => cmd::cmd_list(&settings, output),
    Commands::Show { date, output } => cmd::cmd_show(&settings, &date, output),
    Commands::Import { date, file } => cmd::cmd_import(&settings, date, &file),
    Commands::Export { date, file } => cmd::cmd_export(&settings, &date, &file),
    Commands::Erase { date, force } => cmd::cmd_erase(&settings, date, force),
    Commands::Replay {
      date,
      frames,
      gap,
      idle,
    } => {
      if let Some(idle) = idle {
        settings.idle_window = idle;
      }
      cmd::cmd_replay(&settings, date, &frames, gap)
    }
  }
}
