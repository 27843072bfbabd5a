//! Command-line definitions for `formkit`.

use std::path::PathBuf;
use std::str::FromStr;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use formkit_prefs::{PrefsError, ShareChannel, ThemeMode, preset_names};
use formkit_submit::forms::{CATEGORIES, FREQUENCIES, PRIORITIES};

#[derive(Parser)]
#[command(
    name = "formkit",
    version,
    about = "Fill and submit forms, manage theme and sharing preferences",
    long_about = "Fill and submit the ticket, donation and sign-in forms against a \
                  simulated backend.\n\n\
                  Notifications are printed to stderr. Theme and share progress \
                  persist between runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for stored preferences (overrides the settings file).
    #[arg(long = "storage-dir", value_name = "DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Make the simulated backend reject every submission.
    #[arg(long = "fail", global = true)]
    pub fail: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open a support ticket.
    Ticket(TicketArgs),

    /// Make a donation.
    Donate(DonateArgs),

    /// Sign in, optionally remembering the email.
    SignIn(SignInArgs),

    /// Show or change the theme.
    #[command(subcommand)]
    Theme(ThemeCommand),

    /// Share on a channel, or show or reset share progress.
    Share(ShareArgs),
}

/// Ticket fields. Omitted fields are submitted blank and reported by validation.
#[derive(Args, Default)]
pub struct TicketArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, value_parser = PossibleValuesParser::new(CATEGORIES.iter().copied()))]
    pub category: Option<String>,
    #[arg(long, value_parser = PossibleValuesParser::new(PRIORITIES.iter().copied()))]
    pub priority: Option<String>,
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// File to attach (at most 5 MB).
    #[arg(long, value_name = "PATH")]
    pub attachment: Option<PathBuf>,
}

#[derive(Args, Default)]
pub struct DonateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Amount in dollars, e.g. 25 or 25.50.
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long, value_parser = PossibleValuesParser::new(FREQUENCIES.iter().copied()))]
    pub frequency: Option<String>,
}

#[derive(Args, Default)]
pub struct SignInArgs {
    /// Defaults to the remembered email, if any.
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    /// Remember the email for next time.
    #[arg(long, conflicts_with = "forget")]
    pub remember: bool,
    /// Forget a previously remembered email.
    #[arg(long)]
    pub forget: bool,
}

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the current theme.
    Show,

    /// Change individual colors or the mode.
    Set(ThemeSetArgs),

    /// Apply a named color preset.
    Preset {
        #[arg(
            value_name = "NAME",
            value_parser = PossibleValuesParser::new(preset_names()),
            ignore_case = true
        )]
        name: String,
    },

    /// Switch between light and dark mode.
    Toggle,

    /// Restore the default theme.
    Reset,
}

#[derive(Args, Default)]
pub struct ThemeSetArgs {
    /// Hex color such as #4f46e5.
    #[arg(long)]
    pub primary: Option<String>,
    #[arg(long)]
    pub secondary: Option<String>,
    #[arg(long)]
    pub accent: Option<String>,
    /// light or dark.
    #[arg(long)]
    pub mode: Option<ThemeMode>,
}

#[derive(Args)]
pub struct ShareArgs {
    /// A channel (twitter, facebook, linkedin, whatsapp, email, copy-link),
    /// or `status` or `reset`.
    #[arg(value_name = "CHANNEL")]
    pub action: ShareAction,
}

/// What `formkit share` was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAction {
    Share(ShareChannel),
    Status,
    Reset,
}

impl FromStr for ShareAction {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "reset" => Ok(Self::Reset),
            other => other.parse().map(Self::Share),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
