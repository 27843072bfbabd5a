//! Sign-in form with an optional remembered email.

use formkit_prefs::{ACCOUNT_KEY, Preference, PreferenceStore, RememberedAccount, Storage};
use formkit_validate::{FieldSpec, RuleKind};

use crate::payload::Payload;
use crate::profile::FormProfile;

/// Whether a checkbox value counts as ticked.
pub fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1"
    )
}

/// Signs a user in and remembers their email when asked to.
pub struct SignInForm<S> {
    account: Preference<RememberedAccount, S>,
}

impl<S: Storage> SignInForm<S> {
    pub fn new(store: PreferenceStore<S>) -> Self {
        Self {
            account: Preference::open(store, ACCOUNT_KEY),
        }
    }

    pub fn remembered_email(&self) -> Option<&str> {
        self.account.get().email.as_deref()
    }
}

impl<S: Storage> FormProfile for SignInForm<S> {
    fn name(&self) -> &str {
        "signin"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut email = FieldSpec::new("email", "Email", RuleKind::Email);
        let mut remember = FieldSpec::new("remember", "Remember me", RuleKind::optional(RuleKind::required()));
        if let Some(saved) = self.remembered_email() {
            email.set_value(saved);
            remember.set_value("true");
        }
        vec![
            email,
            FieldSpec::new("password", "Password", RuleKind::Password),
            remember,
        ]
    }

    fn confirmation_prefix(&self) -> &str {
        "SIG"
    }

    fn submit_label(&self) -> &str {
        "Sign in"
    }

    fn success_message(&self, payload: &Payload, _confirmation: &str) -> String {
        format!("Welcome back, {}!", payload.text("email"))
    }

    fn on_success(&mut self, payload: &Payload) {
        if is_checked(payload.text("remember")) {
            let email = payload.text("email").to_string();
            self.account.replace(RememberedAccount { email: Some(email) });
            tracing::info!("remembered account saved");
        } else {
            self.account.reset();
            tracing::debug!("remembered account cleared");
        }
    }
}
