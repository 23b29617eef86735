//! Login page: the login/signup switch and the four-step signup wizard.
//!
//! Steps are 1-based: details, contact, OTP, confirmation. A step can be
//! revisited from the indicator once reached; forward progress only goes
//! through validated "Next" clicks or a completed OTP.

use std::collections::BTreeSet;
use std::time::Duration;

use thiserror::Error;

use crate::config::SignupConfig;
use crate::message::Toast;
use crate::timing::Timer;

/// Number of signup steps.
pub const SIGNUP_STEPS: u8 = 4;

const OTP_STEP: u8 = 3;
const CONFIRMATION_STEP: u8 = 4;

pub const OTP_VERIFIED_TEXT: &str = "Verification Complete!";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    #[error("Invalid step number: {0}")]
    InvalidStep(u8),
}

/// Which half of the login page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Login,
    Signup,
}

/// The page's main back button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackButton {
    pub label: &'static str,
    pub href: &'static str,
}

impl BackButton {
    const HOME: BackButton = BackButton {
        label: "Back to Homepage",
        href: "index.html",
    };
    const LOGIN: BackButton = BackButton {
        label: "Back to Login",
        href: "#",
    };

    pub fn render(&self) -> String {
        format!(
            r#"<a id="main-back-btn" href="{}"><span id="back-btn-text">{}</span></a>"#,
            self.href, self.label
        )
    }
}

/// Result of clicking the back button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackAction {
    /// Leave the page for this URL.
    Navigate(String),
    /// Stay and return to the login section.
    ShowLogin,
}

/// OTP verification indicator under the OTP input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OtpStatus {
    #[default]
    Blank,
    Verified,
}

/// What the user filled in on the current step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepForm {
    /// Required inputs as `(name, value)`.
    pub required: Vec<(String, String)>,
    /// Selected gender radio, step 1.
    pub gender: Option<String>,
    /// Selected OTP delivery radio, step 3.
    pub otp_method: Option<String>,
}

impl StepForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.required.push((name.into(), value.into()));
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn otp_method(mut self, method: impl Into<String>) -> Self {
        self.otp_method = Some(method.into());
        self
    }
}

/// Result of a "Next" click.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NextOutcome {
    pub advanced: bool,
    /// Messages in the order they are shown; the last one stays on screen.
    pub messages: Vec<Toast>,
}

#[derive(Debug, Clone)]
pub struct SignupFlow {
    section: Section,
    step: u8,
    visited: BTreeSet<u8>,
    errored: BTreeSet<String>,
    otp_length: usize,
    otp_status: OtpStatus,
    confirm: Timer,
}

impl SignupFlow {
    pub fn new(config: &SignupConfig) -> Self {
        Self {
            section: Section::Login,
            step: 1,
            visited: BTreeSet::from([1]),
            errored: BTreeSet::new(),
            otp_length: config.otp_length,
            otp_status: OtpStatus::Blank,
            confirm: Timer::new(Duration::from_millis(config.otp_advance_delay_ms)),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_visited(&self, step: u8) -> bool {
        self.visited.contains(&step)
    }

    /// Required inputs that failed the last validation.
    pub fn errored_fields(&self) -> impl Iterator<Item = &str> {
        self.errored.iter().map(String::as_str)
    }

    pub fn otp_status(&self) -> OtpStatus {
        self.otp_status
    }

    /// Whether the OTP input is marked as errored.
    pub fn otp_has_error(&self) -> bool {
        self.errored.contains("otp")
    }

    pub fn back_button(&self) -> BackButton {
        match self.section {
            Section::Login => BackButton::HOME,
            Section::Signup => BackButton::LOGIN,
        }
    }

    /// "Create now" clicked. Resumes at the step the user left off.
    pub fn show_signup(&mut self) {
        self.section = Section::Signup;
        self.mark_step(self.step);
    }

    pub fn show_login(&mut self) {
        self.section = Section::Login;
    }

    pub fn click_back(&mut self) -> BackAction {
        match self.section {
            Section::Login => BackAction::Navigate(BackButton::HOME.href.to_string()),
            Section::Signup => {
                self.show_login();
                BackAction::ShowLogin
            }
        }
    }

    /// "Go to login" on the confirmation step.
    pub fn go_to_login(&mut self) {
        self.show_login();
    }

    /// Login form submitted. Authentication is not wired up.
    pub fn submit_login(&self) -> Toast {
        Toast::info("Login button clicked (Placeholder)")
    }

    pub fn show_step(&mut self, step: u8) -> Result<(), SignupError> {
        if !(1..=SIGNUP_STEPS).contains(&step) {
            return Err(SignupError::InvalidStep(step));
        }
        self.mark_step(step);
        Ok(())
    }

    /// Step indicator clicked.
    pub fn click_step_indicator(&mut self, step: u8) -> Option<Toast> {
        if self.visited.contains(&step) {
            self.mark_step(step);
            None
        } else {
            Some(Toast::warning(format!(
                "Please complete Step {} first.",
                self.step
            )))
        }
    }

    /// "Next" clicked with the current step's inputs.
    pub fn next(&mut self, form: &StepForm) -> NextOutcome {
        let mut outcome = NextOutcome::default();

        self.errored = form
            .required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        let mut valid = self.errored.is_empty();

        if self.step == 1 && form.gender.is_none() {
            valid = false;
            outcome.messages.push(Toast::warning("Please select a gender."));
        }
        if self.step == OTP_STEP && form.otp_method.is_none() {
            valid = false;
            outcome
                .messages
                .push(Toast::warning("Please choose where to receive the OTP."));
        }

        if !valid {
            outcome.messages.push(Toast::warning(
                "Please fill in all required fields or make selections.",
            ));
            return outcome;
        }

        if self.step == OTP_STEP {
            outcome
                .messages
                .push(Toast::info("OTP sent to your selected method (simulated)."));
        } else if self.step < CONFIRMATION_STEP {
            self.mark_step(self.step + 1);
            outcome.advanced = true;
        }
        outcome
    }

    /// "Previous" clicked.
    pub fn prev(&mut self) {
        if self.step > 1 {
            self.mark_step(self.step - 1);
        }
    }

    /// The OTP input changed. A complete code schedules the confirmation
    /// step; anything else clears the status.
    pub fn otp_input(&mut self, value: &str) {
        if value.chars().count() == self.otp_length {
            self.otp_status = OtpStatus::Verified;
            self.confirm.restart();
        } else {
            self.otp_status = OtpStatus::Blank;
            self.confirm.cancel();
        }
    }

    /// The OTP input gained focus.
    pub fn otp_focus(&mut self) {
        self.otp_status = OtpStatus::Blank;
        self.errored.remove("otp");
    }

    pub fn render_otp_status(&self) -> String {
        match self.otp_status {
            OtpStatus::Verified => format!(
                r#"<div id="otp-verification-status" class="success">{}</div>"#,
                OTP_VERIFIED_TEXT
            ),
            OtpStatus::Blank => r#"<div id="otp-verification-status"></div>"#.to_string(),
        }
    }

    /// The numbered step indicator.
    pub fn render_step_indicator(&self) -> String {
        (1..=SIGNUP_STEPS)
            .map(|n| {
                let class = if n == self.step { "step active" } else { "step" };
                format!(r#"<div class="{}" data-step="{}">{}</div>"#, class, n, n)
            })
            .collect()
    }

    /// Let time pass: a verified OTP moves on to the confirmation step.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.confirm.advance(elapsed) {
            self.mark_step(CONFIRMATION_STEP);
        }
    }

    fn mark_step(&mut self, step: u8) {
        if step != self.step {
            tracing::debug!(from = self.step, to = step, "signup step");
        }
        self.step = step;
        self.visited.insert(step);
    }
}

impl Default for SignupFlow {
    fn default() -> Self {
        Self::new(&SignupConfig::default())
    }
}
