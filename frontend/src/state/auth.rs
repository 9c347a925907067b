use std::rc::Rc;

use leptos::*;

use crate::{
    api::{ApiClient, ApiError, LoginRequest, RequestOptions, SignupRequest, User},
    utils::storage::{default_storage, SessionStorage},
};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Reads the persisted session. A missing or unreadable user blob yields `None`.
    pub fn rehydrate(storage: &dyn SessionStorage) -> Self {
        let token = storage.get_item(TOKEN_KEY);
        let user = storage
            .get_item(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("discarding stored user: {err}");
                    None
                }
            });
        Self { token, user }
    }
}

/// Session owner: in-memory state plus its durable mirror.
#[derive(Clone)]
pub struct AuthStore {
    state: RwSignal<AuthState>,
    storage: Rc<dyn SessionStorage>,
}

impl AuthStore {
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        let state = create_rw_signal(AuthState::rehydrate(storage.as_ref()));
        Self { state, storage }
    }

    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.get_untracked()
    }

    pub fn token(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    /// Snapshot read that does not subscribe the caller.
    pub fn is_authenticated_untracked(&self) -> bool {
        self.state.with_untracked(AuthState::is_authenticated)
    }

    pub fn login(&self, token: impl Into<String>, user: Option<User>) {
        let token = token.into();
        if let Err(err) = self.storage.set_item(TOKEN_KEY, &token) {
            log::warn!("failed to persist token: {err}");
        }
        match serde_json::to_string(&user) {
            Ok(raw) => {
                if let Err(err) = self.storage.set_item(USER_KEY, &raw) {
                    log::warn!("failed to persist user: {err}");
                }
            }
            Err(err) => log::warn!("failed to encode user: {err}"),
        }
        self.state.set(AuthState {
            token: Some(token),
            user,
        });
        log::info!("session started");
    }

    pub fn logout(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove_item(key) {
                log::warn!("failed to clear {key}: {err}");
            }
        }
        self.state.set(AuthState::default());
        log::info!("session cleared");
    }

    /// Transport options carrying the current bearer token.
    pub fn request_options(&self) -> RequestOptions {
        RequestOptions::with_token(self.token())
    }
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let store = AuthStore::new(default_storage());
    provide_context(store);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthStore {
    use_context::<AuthStore>().unwrap_or_else(|| {
        let store = AuthStore::new(default_storage());
        provide_context(store.clone());
        store
    })
}

pub async fn login_request(
    request: LoginRequest,
    api: &ApiClient,
    auth: &AuthStore,
) -> Result<(), ApiError> {
    let response = api.login(&request).await?;
    auth.login(response.token, Some(response.user));
    Ok(())
}

pub async fn signup_request(
    request: SignupRequest,
    api: &ApiClient,
    auth: &AuthStore,
) -> Result<(), ApiError> {
    let response = api.signup(&request).await?;
    auth.login(response.token, Some(response.user));
    Ok(())
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let auth = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        let auth = auth.clone();
        async move { login_request(payload, &api, &auth).await }
    })
}

pub fn use_signup_action() -> Action<SignupRequest, Result<(), ApiError>> {
    let auth = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |request: &SignupRequest| {
        let payload = request.clone();
        let api = api.clone();
        let auth = auth.clone();
        async move { signup_request(payload, &api, &auth).await }
    })
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn login_request_populates_store() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/login");
                then.status(200).json_body(json!({
                    "msg": "Login successful",
                    "token": "jwt-token",
                    "user": {
                        "_id": "u1",
                        "username": "nurse",
                        "email": "nurse@example.com"
                    }
                }));
            })
            .await;

        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let auth = AuthStore::new(Rc::new(storage.clone()));
        let api = ApiClient::new_with_base_url(server.base_url());

        login_request(
            LoginRequest {
                email: "nurse@example.com".into(),
                password: "secret".into(),
            },
            &api,
            &auth,
        )
        .await
        .unwrap();

        assert!(auth.is_authenticated_untracked());
        assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("jwt-token"));
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/login");
                then.status(401)
                    .json_body(json!({ "error": "Incorrect password" }));
            })
            .await;

        let runtime = create_runtime();
        let storage = MemoryStorage::new();
        let auth = AuthStore::new(Rc::new(storage.clone()));
        let api = ApiClient::new_with_base_url(server.base_url());

        let err = login_request(
            LoginRequest {
                email: "nurse@example.com".into(),
                password: "wrong".into(),
            },
            &api,
            &auth,
        )
        .await
        .unwrap_err();

        assert_eq!(err.error, "Incorrect password");
        assert!(!auth.is_authenticated_untracked());
        assert!(!storage.contains(TOKEN_KEY));
        runtime.dispose();
    }
}
