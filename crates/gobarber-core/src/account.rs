//! Form submission flows.
//!
//! Failures are routed by kind:
//! - validation errors come back as `SubmitOutcome::Invalid` for inline display
//! - remote failures become an error toast with a fixed message, no retry

use tracing::{error, info};

use crate::api::AuthApi;
use crate::auth::SessionStore;
use crate::forms::{FieldErrors, SignInForm, SignUpForm};
use crate::toast::{NewToast, ToastStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The remote call succeeded.
    Completed,
    /// The form did not validate. Nothing was sent.
    Invalid(FieldErrors),
    /// The remote call failed and an error toast was shown.
    Failed,
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed)
    }
}

pub async fn sign_up(api: &dyn AuthApi, toasts: &ToastStore, form: &SignUpForm) -> SubmitOutcome {
    if let Err(errors) = form.validate() {
        return SubmitOutcome::Invalid(errors);
    }

    match api.create_user(&form.to_new_user()).await {
        Ok(()) => {
            info!("Account created");
            toasts.add_toast(
                NewToast::success("Cadastro realizado!")
                    .with_description("Você já pode fazer seu logon no GoBarber"),
            );
            SubmitOutcome::Completed
        }
        Err(e) => {
            error!(error = %e, "Sign-up failed");
            toasts.add_toast(
                NewToast::error("Erro no cadastro")
                    .with_description("Ocorreu um erro ao fazer o cadastro, tente novamente"),
            );
            SubmitOutcome::Failed
        }
    }
}

pub async fn sign_in(session: &SessionStore, toasts: &ToastStore, form: &SignInForm) -> SubmitOutcome {
    if let Err(errors) = form.validate() {
        return SubmitOutcome::Invalid(errors);
    }

    match session.sign_in(&form.to_credentials()).await {
        Ok(()) => SubmitOutcome::Completed,
        Err(e) => {
            error!(error = %e, "Sign-in failed");
            toasts.add_toast(
                NewToast::error("Erro na autenticação")
                    .with_description("Ocorreu um erro ao fazer login, cheque as credenciais."),
            );
            SubmitOutcome::Failed
        }
    }
}
