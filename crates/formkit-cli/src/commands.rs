//! Subcommand implementations.
//!
//! Commands return what happened; printing tables and exit codes is left to
//! `main`. Toasts go through the [`Notifier`] in the [`Context`].

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, anyhow, bail};
use formkit_notify::Notifier;
use formkit_prefs::{
    FileStorage, PreferenceStore, PrefsError, SHARE_KEY, ShareProgress, ShareTracker, THEME_KEY,
    ThemePreferences,
};
use formkit_submit::forms::{DonationForm, SignInForm, TicketForm};
use formkit_submit::{FormPipeline, FormProfile, PipelineConfig, SimulatedBackend, SubmitOutcome};
use formkit_validate::{FieldSpec, FieldValue, FileRef};
use tracing::info;

use crate::cli::{DonateArgs, ShareAction, SignInArgs, ThemeCommand, ThemeSetArgs, TicketArgs};
use crate::logging::redact_email;
use crate::settings::{BackendSettings, Settings};

/// Everything a command needs, built once in `main`.
#[derive(Debug, Clone)]
pub struct Context {
    pub store: PreferenceStore<FileStorage>,
    pub notifier: Notifier,
    pub backend: BackendSettings,
}

impl Context {
    /// Apply command-line overrides to `settings`.
    pub fn new(settings: &Settings, storage_dir: Option<PathBuf>, fail: bool, notifier: Notifier) -> Self {
        let dir = storage_dir
            .or_else(|| settings.storage.dir.clone())
            .unwrap_or_else(FileStorage::default_dir);
        let mut backend = settings.backend.clone();
        backend.fail |= fail;
        Self {
            store: PreferenceStore::new(FileStorage::new(dir)),
            notifier,
            backend,
        }
    }

    fn backend(&self) -> SimulatedBackend {
        if self.backend.fail {
            SimulatedBackend::rejecting(self.backend.latency())
        } else {
            SimulatedBackend::accepting(self.backend.latency())
        }
    }
}

/// Result of a form subcommand.
#[derive(Debug)]
pub struct FormReport {
    pub outcome: SubmitOutcome,
    /// Field definitions, for labeling errors.
    pub fields: Vec<FieldSpec>,
}

impl FormReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

pub async fn run_ticket(ctx: &Context, args: TicketArgs) -> Result<FormReport> {
    let attachment = args.attachment.as_deref().map(file_ref).transpose()?;
    let mut values = text_values([
        ("name", args.name),
        ("email", args.email),
        ("phone", args.phone),
        ("category", args.category),
        ("priority", args.priority),
        ("subject", args.subject),
        ("description", args.description),
    ]);
    if let Some(file) = attachment {
        values.push(("attachment", FieldValue::File(file)));
    }
    run_form(ctx, TicketForm, values).await
}

pub async fn run_donate(ctx: &Context, args: DonateArgs) -> Result<FormReport> {
    let values = text_values([
        ("name", args.name),
        ("email", args.email),
        ("amount", args.amount),
        ("frequency", args.frequency),
    ]);
    run_form(ctx, DonationForm, values).await
}

pub async fn run_sign_in(ctx: &Context, args: SignInArgs) -> Result<FormReport> {
    let profile = SignInForm::new(ctx.store.clone());
    if let Some(email) = profile.remembered_email() {
        info!(email = %redact_email(email), "using remembered account");
    }
    let remember = if args.remember {
        Some("true".to_string())
    } else if args.forget {
        Some(String::new())
    } else {
        None
    };
    let values = text_values([
        ("email", args.email),
        ("password", args.password),
        ("remember", remember),
    ]);
    run_form(ctx, profile, values).await
}

async fn run_form<P: FormProfile>(
    ctx: &Context,
    profile: P,
    values: Vec<(&str, FieldValue)>,
) -> Result<FormReport> {
    let config = PipelineConfig {
        close_delay: ctx.backend.close_delay(),
    };
    let mut pipeline = FormPipeline::with_config(profile, ctx.backend(), ctx.notifier.clone(), config);
    pipeline.open_panel();
    for (id, value) in values {
        pipeline.input(id, value)?;
    }

    let outcome = pipeline.submit().await;
    if matches!(outcome, SubmitOutcome::Busy) {
        bail!("a submission is already in progress");
    }
    Ok(FormReport {
        outcome,
        fields: pipeline.fields().to_vec(),
    })
}

fn text_values<const N: usize>(
    values: [(&'static str, Option<String>); N],
) -> Vec<(&'static str, FieldValue)> {
    values
        .into_iter()
        .filter_map(|(id, value)| value.map(|v| (id, FieldValue::Text(v))))
        .collect()
}

fn file_ref(path: &Path) -> Result<FileRef> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot read attachment {}", path.display()))?;
    if !metadata.is_file() {
        bail!("attachment {} is not a file", path.display());
    }
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(FileRef::new(name, metadata.len()))
}

pub fn run_theme(ctx: &Context, command: ThemeCommand) -> Result<ThemePreferences> {
    let mut theme = ctx.store.preference::<ThemePreferences>(THEME_KEY);
    match command {
        ThemeCommand::Show => {}
        ThemeCommand::Set(args) => {
            theme
                .try_update(|t| apply_set(t, &args))
                .map_err(|e| user_error(&e))?;
            ctx.notifier.success("Theme updated");
        }
        ThemeCommand::Preset { name } => {
            theme
                .try_update(|t| t.apply_preset(&name))
                .map_err(|e| user_error(&e))?;
            ctx.notifier.success(&format!("Theme set to {}", name.trim().to_lowercase()));
        }
        ThemeCommand::Toggle => {
            let mode = theme.update(ThemePreferences::toggle_mode);
            ctx.notifier.success(&format!("Switched to {} mode", mode.label()));
        }
        ThemeCommand::Reset => {
            theme.reset();
            ctx.notifier.info("Theme reset to defaults");
        }
    }
    Ok(theme.get().clone())
}

fn apply_set(theme: &mut ThemePreferences, args: &ThemeSetArgs) -> formkit_prefs::Result<()> {
    if let Some(value) = &args.primary {
        theme.set_primary(value)?;
    }
    if let Some(value) = &args.secondary {
        theme.set_secondary(value)?;
    }
    if let Some(value) = &args.accent {
        theme.set_accent(value)?;
    }
    if let Some(mode) = args.mode {
        theme.set_mode(mode);
    }
    Ok(())
}

pub fn run_share(ctx: &Context, action: ShareAction) -> Result<ShareProgress> {
    match action {
        ShareAction::Status => Ok(ctx.store.load(SHARE_KEY)),
        ShareAction::Share(channel) => {
            let mut tracker = ShareTracker::new(&ctx.store, ctx.notifier.clone());
            tracker.share(channel);
            Ok(tracker.progress().clone())
        }
        ShareAction::Reset => {
            let mut tracker = ShareTracker::new(&ctx.store, ctx.notifier.clone());
            tracker.reset();
            Ok(tracker.progress().clone())
        }
    }
}

fn user_error(error: &PrefsError) -> anyhow::Error {
    anyhow!(error.user_message())
}
