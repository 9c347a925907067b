use super::utils;
use crate::api::{ApiError, LoginRequest, SignupRequest};
use crate::state::auth;
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Clone, Copy)]
pub struct AuthFormState {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AuthViewModel {
    pub form: AuthFormState,
    pub mode: RwSignal<AuthMode>,
    pub error: RwSignal<Option<ApiError>>,
    pub login_action: Action<LoginRequest, Result<(), ApiError>>,
    pub signup_action: Action<SignupRequest, Result<(), ApiError>>,
}

impl AuthViewModel {
    pub fn pending(&self) -> Signal<bool> {
        let login = self.login_action.pending();
        let signup = self.signup_action.pending();
        Signal::derive(move || login.get() || signup.get())
    }

    /// True once either action has completed successfully.
    pub fn succeeded(&self) -> Signal<bool> {
        let login = self.login_action.value();
        let signup = self.signup_action.value();
        Signal::derive(move || {
            matches!(login.get(), Some(Ok(()))) || matches!(signup.get(), Some(Ok(())))
        })
    }

    pub fn toggle_mode(&self) {
        self.mode.update(|mode| {
            *mode = match mode {
                AuthMode::Login => AuthMode::Signup,
                AuthMode::Signup => AuthMode::Login,
            }
        });
        self.error.set(None);
    }

    pub fn submit(&self) {
        if self.pending().get_untracked() {
            return;
        }
        let username = self.form.username.get_untracked();
        let email = self.form.email.get_untracked().trim().to_string();
        let password = self.form.password.get_untracked();

        match self.mode.get_untracked() {
            AuthMode::Login => {
                if let Err(msg) = utils::validate_login(&email, &password) {
                    self.error.set(Some(ApiError::validation(msg)));
                    return;
                }
                self.error.set(None);
                self.login_action.dispatch(LoginRequest { email, password });
            }
            AuthMode::Signup => {
                if let Err(msg) = utils::validate_signup(&username, &email, &password) {
                    self.error.set(Some(ApiError::validation(msg)));
                    return;
                }
                self.error.set(None);
                self.signup_action.dispatch(SignupRequest {
                    username: username.trim().to_string(),
                    email,
                    password,
                });
            }
        }
    }
}

pub fn use_auth_view_model() -> AuthViewModel {
    let form = AuthFormState::default();
    let error = create_rw_signal(None::<ApiError>);
    let login_action = auth::use_login_action();
    let signup_action = auth::use_signup_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });
    create_effect(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    AuthViewModel {
        form,
        mode: create_rw_signal(AuthMode::Login),
        error,
        login_action,
        signup_action,
    }
}
