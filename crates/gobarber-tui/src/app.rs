//! Application state for the GoBarber terminal client.
//!
//! `App` owns the session store, the toast container and the state of the
//! sign-in and sign-up forms. Input handlers and the renderer only go
//! through it.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use gobarber_core::account::{self, SubmitOutcome};
use gobarber_core::api::{ApiClient, AuthApi};
use gobarber_core::auth::SessionStore;
use gobarber_core::config::Config;
use gobarber_core::forms::{FieldErrors, SignInForm, SignUpForm};
use gobarber_core::storage::{FileStorage, Storage};
use gobarber_core::toast::{ToastContainer, ToastStore};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for the name input.
const MAX_NAME_LENGTH: usize = 60;

/// Maximum length for e-mail input.
const MAX_EMAIL_LENGTH: usize = 80;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Buffer size for submission results
const CHANNEL_BUFFER_SIZE: usize = 4;

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    SignUp,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmingQuit,
    Quitting,
}

/// Sign-in form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFocus {
    Email,
    Password,
    Button,
    SignUpLink,
}

impl SignInFocus {
    pub fn next(self) -> Self {
        match self {
            SignInFocus::Email => SignInFocus::Password,
            SignInFocus::Password => SignInFocus::Button,
            SignInFocus::Button => SignInFocus::SignUpLink,
            SignInFocus::SignUpLink => SignInFocus::Email,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SignInFocus::Email => SignInFocus::SignUpLink,
            SignInFocus::Password => SignInFocus::Email,
            SignInFocus::Button => SignInFocus::Password,
            SignInFocus::SignUpLink => SignInFocus::Button,
        }
    }
}

/// Sign-up form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFocus {
    Name,
    Email,
    Password,
    Button,
    BackLink,
}

impl SignUpFocus {
    pub fn next(self) -> Self {
        match self {
            SignUpFocus::Name => SignUpFocus::Email,
            SignUpFocus::Email => SignUpFocus::Password,
            SignUpFocus::Password => SignUpFocus::Button,
            SignUpFocus::Button => SignUpFocus::BackLink,
            SignUpFocus::BackLink => SignUpFocus::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SignUpFocus::Name => SignUpFocus::BackLink,
            SignUpFocus::Email => SignUpFocus::Name,
            SignUpFocus::Password => SignUpFocus::Email,
            SignUpFocus::Button => SignUpFocus::Password,
            SignUpFocus::BackLink => SignUpFocus::Button,
        }
    }
}

/// Outcome of a form submission that ran in the background
#[derive(Debug)]
pub enum SubmitResult {
    SignIn(SubmitOutcome),
    SignUp {
        outcome: SubmitOutcome,
        email: String,
    },
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub config: Config,
    pub session: Arc<SessionStore>,
    api: Arc<dyn AuthApi>,
    pub toasts: ToastContainer,

    pub screen: Screen,
    pub state: AppState,

    pub sign_in_form: SignInForm,
    pub sign_in_focus: SignInFocus,
    pub sign_in_errors: FieldErrors,

    pub sign_up_form: SignUpForm,
    pub sign_up_focus: SignUpFocus,
    pub sign_up_errors: FieldErrors,

    /// A sign-in or sign-up request is in flight
    pub submitting: bool,
    submit_rx: mpsc::Receiver<SubmitResult>,
    submit_tx: mpsc::Sender<SubmitResult>,

    // Only the real app writes config back to disk
    save_config: bool,
}

impl App {
    /// Create the application from the on-disk configuration and storage
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let data_dir = config.data_dir()?;
        debug!(?data_dir, "Data directory configured");
        let storage = Arc::new(FileStorage::open(&data_dir));

        let api_url = config.api_url();
        debug!(%api_url, "API configured");
        let api = Arc::new(ApiClient::new(&api_url)?);

        let mut app = Self::with_parts(config, storage, api);
        app.save_config = true;
        Ok(app)
    }

    pub fn with_parts(config: Config, storage: Arc<dyn Storage>, api: Arc<dyn AuthApi>) -> Self {
        let session = Arc::new(SessionStore::restore(storage, api.clone()));
        let screen = if session.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::SignIn
        };

        let sign_in_form = SignInForm {
            email: config.last_email.clone().unwrap_or_default(),
            password: String::new(),
        };
        let sign_in_focus = if sign_in_form.email.is_empty() {
            SignInFocus::Email
        } else {
            SignInFocus::Password
        };

        let (submit_tx, submit_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            config,
            session,
            api,
            toasts: ToastContainer::new(ToastStore::new()),

            screen,
            state: AppState::Normal,

            sign_in_form,
            sign_in_focus,
            sign_in_errors: FieldErrors::new(),

            sign_up_form: SignUpForm::default(),
            sign_up_focus: SignUpFocus::Name,
            sign_up_errors: FieldErrors::new(),

            submitting: false,
            submit_rx,
            submit_tx,

            save_config: false,
        }
    }

    /// Per-tick housekeeping: apply finished submissions, then arm timers
    /// for new toasts and drop finished ones
    pub fn tick(&mut self) {
        while let Ok(result) = self.submit_rx.try_recv() {
            self.submitting = false;
            match result {
                SubmitResult::SignIn(outcome) => self.apply_sign_in(outcome),
                SubmitResult::SignUp { outcome, email } => self.apply_sign_up(outcome, email),
            }
        }
        self.toasts.sync();
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn go_to_sign_up(&mut self) {
        self.screen = Screen::SignUp;
        self.sign_up_focus = SignUpFocus::Name;
        self.sign_up_errors = FieldErrors::new();
    }

    pub fn go_to_sign_in(&mut self) {
        self.screen = Screen::SignIn;
        self.sign_in_errors = FieldErrors::new();
        self.sign_in_focus = if self.sign_in_form.email.is_empty() {
            SignInFocus::Email
        } else {
            SignInFocus::Password
        };
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Helper to send submission results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<SubmitResult>, result: SubmitResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send submit result - channel closed");
        }
    }

    /// Validate the sign-in form and send it in the background.
    /// The outcome is applied by `tick` once the request finishes.
    pub fn submit_sign_in(&mut self) {
        if self.submitting {
            debug!("Submission already in flight, ignoring");
            return;
        }
        if let Err(errors) = self.sign_in_form.validate() {
            self.sign_in_errors = errors;
            return;
        }
        self.sign_in_errors = FieldErrors::new();
        self.submitting = true;

        let session = self.session.clone();
        let toasts = self.toasts.store().clone();
        let form = self.sign_in_form.clone();
        let tx = self.submit_tx.clone();

        tokio::spawn(async move {
            let outcome = account::sign_in(&session, &toasts, &form).await;
            Self::send_result(&tx, SubmitResult::SignIn(outcome)).await;
        });
    }

    pub fn submit_sign_up(&mut self) {
        if self.submitting {
            debug!("Submission already in flight, ignoring");
            return;
        }
        if let Err(errors) = self.sign_up_form.validate() {
            self.sign_up_errors = errors;
            return;
        }
        self.sign_up_errors = FieldErrors::new();
        self.submitting = true;

        let api = self.api.clone();
        let toasts = self.toasts.store().clone();
        let form = self.sign_up_form.clone();
        let tx = self.submit_tx.clone();

        tokio::spawn(async move {
            let outcome = account::sign_up(api.as_ref(), &toasts, &form).await;
            let email = form.email.trim().to_string();
            Self::send_result(&tx, SubmitResult::SignUp { outcome, email }).await;
        });
    }

    fn apply_sign_in(&mut self, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Completed => {
                self.sign_in_errors = FieldErrors::new();
                self.sign_in_form.password.clear();
                self.remember_email();
                self.screen = Screen::Dashboard;
            }
            SubmitOutcome::Invalid(errors) => {
                self.sign_in_errors = errors;
            }
            SubmitOutcome::Failed => {
                self.sign_in_errors = FieldErrors::new();
            }
        }
    }

    fn apply_sign_up(&mut self, outcome: SubmitOutcome, email: String) {
        match outcome {
            SubmitOutcome::Completed => {
                self.sign_in_form.email = email;
                self.sign_up_form = SignUpForm::default();
                self.go_to_sign_in();
            }
            SubmitOutcome::Invalid(errors) => {
                self.sign_up_errors = errors;
            }
            SubmitOutcome::Failed => {
                self.sign_up_errors = FieldErrors::new();
            }
        }
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.sign_in_form.password.clear();
        self.go_to_sign_in();
    }

    fn remember_email(&mut self) {
        let email = self.sign_in_form.email.trim().to_string();
        if self.config.last_email.as_deref() == Some(email.as_str()) {
            return;
        }
        self.config.last_email = Some(email);
        if !self.save_config {
            return;
        }
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        } else {
            info!("Remembered sign-in e-mail");
        }
    }

    // =========================================================================
    // Form editing
    // =========================================================================

    /// The text field under focus and its length limit, if a text field is focused
    fn focused_field(&mut self) -> Option<(&mut String, usize)> {
        match self.screen {
            Screen::SignIn => match self.sign_in_focus {
                SignInFocus::Email => Some((&mut self.sign_in_form.email, MAX_EMAIL_LENGTH)),
                SignInFocus::Password => {
                    Some((&mut self.sign_in_form.password, MAX_PASSWORD_LENGTH))
                }
                _ => None,
            },
            Screen::SignUp => match self.sign_up_focus {
                SignUpFocus::Name => Some((&mut self.sign_up_form.name, MAX_NAME_LENGTH)),
                SignUpFocus::Email => Some((&mut self.sign_up_form.email, MAX_EMAIL_LENGTH)),
                SignUpFocus::Password => {
                    Some((&mut self.sign_up_form.password, MAX_PASSWORD_LENGTH))
                }
                _ => None,
            },
            Screen::Dashboard => None,
        }
    }

    /// Type a character into the focused field. Returns false if it was rejected.
    pub fn input_char(&mut self, c: char) -> bool {
        match self.focused_field() {
            Some((field, max)) if can_add_char(field.chars().count(), max, c) => {
                field.push(c);
                true
            }
            _ => false,
        }
    }

    pub fn backspace(&mut self) {
        if let Some((field, _)) = self.focused_field() {
            field.pop();
        }
    }
}

/// Check if a typed character should be accepted
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_char(current_len: usize, max_len: usize, c: char) -> bool {
    current_len < max_len && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================
