//! formkit CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use formkit_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, ShareAction, ThemeCommand};
use formkit_cli::commands::{
    Context, FormReport, run_donate, run_share, run_sign_in, run_theme, run_ticket,
};
use formkit_cli::logging::{LogConfig, LogFormat, init_logging};
use formkit_cli::render::{TerminalSink, field_error_lines, share_table, theme_table};
use formkit_cli::settings::Settings;
use formkit_notify::{FanOut, Notifier, TracingSink};
use formkit_submit::SubmitOutcome;
use tracing::level_filters::LevelFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    if matches!(cli.color.color, ColorChoice::Never) {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let settings = Settings::load(cli.config.as_deref());
    let sink = FanOut::new()
        .with(TerminalSink::stderr())
        .with(TracingSink::new());
    let notifier = Notifier::new(sink).with_duration(settings.toast_duration());
    let ctx = Context::new(&settings, cli.storage_dir.clone(), cli.fail, notifier);

    match run(&ctx, cli.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run one subcommand. `Ok(false)` means the form was not accepted.
async fn run(ctx: &Context, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Ticket(args) => Ok(print_report(&run_ticket(ctx, args).await?)),
        Command::Donate(args) => Ok(print_report(&run_donate(ctx, args).await?)),
        Command::SignIn(args) => Ok(print_report(&run_sign_in(ctx, args).await?)),
        Command::Theme(command) => {
            let show = matches!(command, ThemeCommand::Show);
            let theme = run_theme(ctx, command)?;
            if show {
                println!("{}", theme_table(&theme));
            }
            Ok(true)
        }
        Command::Share(args) => {
            let progress = run_share(ctx, args.action)?;
            if args.action == ShareAction::Status {
                println!("{}", share_table(&progress));
            }
            Ok(true)
        }
    }
}

fn print_report(report: &FormReport) -> bool {
    match &report.outcome {
        SubmitOutcome::Invalid { errors } => {
            for line in field_error_lines(&report.fields, errors) {
                eprintln!("{line}");
            }
        }
        SubmitOutcome::Succeeded(submission) => println!("{}", submission.confirmation),
        SubmitOutcome::Failed { .. } | SubmitOutcome::Busy => {}
    }
    report.is_success()
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
