//! Visual state of the submit button and the panel hosting the form.

/// Label shown on the submit control while a submission is in flight.
pub const LOADING_LABEL: &str = "Submitting...";

/// The submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    idle_label: String,
    busy: bool,
}

impl SubmitControl {
    pub fn new(idle_label: impl Into<String>) -> Self {
        Self {
            idle_label: idle_label.into(),
            busy: false,
        }
    }

    /// Disable the control and swap its label for the loading indicator.
    pub fn set_busy(&mut self) {
        self.busy = true;
    }

    /// Re-enable the control with its original label.
    pub fn set_idle(&mut self) {
        self.busy = false;
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.busy
    }

    pub fn label(&self) -> &str {
        if self.busy {
            LOADING_LABEL
        } else {
            &self.idle_label
        }
    }
}

/// A modal or panel that hosts a form and closes after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelState {
    open: bool,
}

impl PanelState {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}
