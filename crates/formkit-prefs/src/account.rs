//! Remembered sign-in account.

use serde::{Deserialize, Serialize};

use crate::store::Snapshot;

/// Storage key for the remembered account.
pub const ACCOUNT_KEY: &str = "remembered_account";

/// The email a user asked the sign-in form to remember.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RememberedAccount {
    pub email: Option<String>,
}

impl Snapshot for RememberedAccount {
    fn normalize(&mut self) {
        // Blank strings written by older pages count as absent
        if self.email.as_deref().is_some_and(|e| e.trim().is_empty()) {
            self.email = None;
        }
    }
}
