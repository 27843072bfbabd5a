//! Form submission pipeline.
//!
//! A [`FormPipeline`] owns a form's fields and runs the validate, submit,
//! notify and reset cycle against a [`Submitter`]. Page-specific behavior
//! comes from a [`FormProfile`]; the ticket, donation and sign-in forms live
//! in [`forms`].
//!
//! ```
//! use std::time::Duration;
//!
//! use formkit_notify::{Notifier, ToastQueue};
//! use formkit_submit::{FormPipeline, PipelineConfig, SimulatedBackend, SubmitOutcome};
//! use formkit_submit::forms::DonationForm;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let toasts = ToastQueue::new();
//! let config = PipelineConfig { close_delay: Duration::ZERO };
//! let backend = SimulatedBackend::accepting(Duration::ZERO);
//! let mut form = FormPipeline::with_config(DonationForm, backend, Notifier::new(toasts.clone()), config);
//!
//! form.input("name", "Jane").unwrap();
//! form.input("email", "jane@x.com").unwrap();
//! form.input("amount", "25").unwrap();
//! form.input("frequency", "monthly").unwrap();
//!
//! assert!(matches!(form.submit().await, SubmitOutcome::Succeeded(_)));
//! assert!(toasts.texts()[0].contains("$25"));
//! # });
//! ```

mod control;
mod error;
pub mod forms;
mod payload;
mod pipeline;
mod profile;
mod state;
mod submitter;

pub use control::{LOADING_LABEL, PanelState, SubmitControl};
pub use error::{FormError, Result};
pub use payload::{Payload, Receipt, confirmation_id, random_suffix};
pub use pipeline::{
    DEFAULT_CLOSE_DELAY, FieldError, FormPipeline, PipelineConfig, Submission, SubmitOutcome,
};
pub use profile::{CustomForm, DEFAULT_FAILURE_MESSAGE, FormProfile, INVALID_FORM_MESSAGE};
pub use state::SubmissionState;
pub use submitter::{FnSubmitter, SimulatedBackend, SubmitError, Submitter};
