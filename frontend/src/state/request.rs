//! Single-call HTTP helper exposing loading/error state to views.
//!
//! Every call returns its own `Result`; the shared `error` signal is only a
//! convenience for rendering and is last-writer-wins when calls overlap.
//! `is_loading` counts in-flight calls, so overlapping calls do not clear
//! each other's indicator.

use std::future::Future;

use leptos::*;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::{ApiClient, ApiError, RequestOptions},
    state::auth::AuthStore,
};

#[derive(Clone)]
pub struct RequestHandle {
    api: ApiClient,
    auth: Option<AuthStore>,
    in_flight: RwSignal<usize>,
    error: RwSignal<Option<ApiError>>,
}

struct LoadingGuard {
    in_flight: RwSignal<usize>,
}

impl LoadingGuard {
    fn acquire(in_flight: RwSignal<usize>) -> Self {
        in_flight.update(|n| *n += 1);
        Self { in_flight }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let _ = self.in_flight.try_update(|n| *n = n.saturating_sub(1));
    }
}

impl RequestHandle {
    pub fn new(api: ApiClient, auth: Option<AuthStore>) -> Self {
        Self {
            api,
            auth,
            in_flight: create_rw_signal(0),
            error: create_rw_signal(None),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn is_loading(&self) -> Signal<bool> {
        let in_flight = self.in_flight;
        Signal::derive(move || in_flight.get() > 0)
    }

    pub fn is_loading_untracked(&self) -> bool {
        self.in_flight.get_untracked() > 0
    }

    pub fn error(&self) -> Signal<Option<ApiError>> {
        self.error.into()
    }

    pub fn error_untracked(&self) -> Option<ApiError> {
        self.error.get_untracked()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Transport options with the session's bearer token, if any.
    pub fn options(&self) -> RequestOptions {
        self.auth
            .as_ref()
            .map(AuthStore::request_options)
            .unwrap_or_default()
    }

    /// Tracks loading/error around an arbitrary API future. The loading
    /// count is released even if the future is dropped mid-flight.
    pub async fn run<T, F>(&self, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let guard = LoadingGuard::acquire(self.in_flight);
        self.error.set(None);

        let result = call.await;
        if let Err(err) = &result {
            log::debug!("request failed: {}", err);
            self.error.set(Some(err.clone()));
        }
        drop(guard);
        result
    }

    /// One HTTP call. The session token is added unless `options` already
    /// carries one.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        mut options: RequestOptions,
    ) -> Result<T, ApiError> {
        if options.bearer_token.is_none() {
            options.bearer_token = self.options().bearer_token;
        }
        self.run(self.api.request(method, path, body, &options))
            .await
    }
}

pub fn use_request() -> RequestHandle {
    let api = use_context::<ApiClient>().unwrap_or_default();
    let auth = use_context::<AuthStore>();
    RequestHandle::new(api, auth)
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiErrorKind, FALLBACK_ERROR_MESSAGE};
    use crate::utils::storage::MemoryStorage;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::rc::Rc;

    #[tokio::test]
    async fn successful_call_leaves_no_error_and_not_loading() {
        let runtime = create_runtime();
        let handle = RequestHandle::new(ApiClient::new_with_base_url("http://unused"), None);
        let probe = handle.clone();

        let value = handle
            .run(async move {
                assert!(probe.is_loading_untracked());
                Ok::<_, ApiError>(42)
            })
            .await
            .unwrap();

        assert_eq!(value, 42);
        assert!(!handle.is_loading_untracked());
        assert!(handle.error_untracked().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn failed_call_records_error_and_clears_loading() {
        let runtime = create_runtime();
        let handle = RequestHandle::new(ApiClient::new_with_base_url("http://unused"), None);

        let err = handle
            .run(async { Err::<(), _>(ApiError::server(404, "Patient not found")) })
            .await
            .unwrap_err();

        assert_eq!(err.error, "Patient not found");
        assert!(!handle.is_loading_untracked());
        assert_eq!(handle.error_untracked(), Some(err));
        runtime.dispose();
    }

    #[tokio::test]
    async fn new_attempt_clears_previous_error() {
        let runtime = create_runtime();
        let handle = RequestHandle::new(ApiClient::new_with_base_url("http://unused"), None);

        let _ = handle
            .run(async { Err::<(), _>(ApiError::unknown("first")) })
            .await;
        assert!(handle.error_untracked().is_some());

        handle.run(async { Ok::<_, ApiError>(()) }).await.unwrap();
        assert!(handle.error_untracked().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn overlapping_calls_each_get_their_own_result() {
        let runtime = create_runtime();
        let handle = RequestHandle::new(ApiClient::new_with_base_url("http://unused"), None);

        let slow = handle.run(async {
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            Err::<u8, _>(ApiError::unknown("slow failed"))
        });
        let fast = handle.run(async { Ok::<u8, ApiError>(1) });
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap_err().error, "slow failed");
        assert_eq!(fast.unwrap(), 1);
        assert!(!handle.is_loading_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn request_injects_session_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/user/get")
                    .header("Authorization", "Bearer jwt-token");
                then.status(200).json_body(json!({ "ok": true }));
            })
            .await;

        let runtime = create_runtime();
        let auth = AuthStore::new(Rc::new(MemoryStorage::new()));
        auth.login("jwt-token", None);
        let handle = RequestHandle::new(
            ApiClient::new_with_base_url(server.base_url()),
            Some(auth),
        );

        let body: Value = handle
            .request(Method::GET, "/user/get", None, RequestOptions::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body["ok"], json!(true));
        assert!(handle.error_untracked().is_none());
        runtime.dispose();
    }

    #[tokio::test]
    async fn server_failure_is_captured_with_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/patient/new");
                then.status(400).json_body(json!({ "msg": "Invalid input" }));
            })
            .await;

        let runtime = create_runtime();
        let handle = RequestHandle::new(ApiClient::new_with_base_url(server.base_url()), None);

        let result: Result<Value, _> = handle
            .request(
                Method::POST,
                "/patient/new",
                Some(json!({})),
                RequestOptions::default(),
            )
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Server);
        assert_eq!(err.error, "Invalid input");
        assert_eq!(handle.error_untracked().map(|e| e.error), Some("Invalid input".into()));
        assert!(!handle.is_loading_untracked());
        runtime.dispose();
    }

    #[tokio::test]
    async fn empty_server_error_uses_status_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/patient/p1");
                then.status(503);
            })
            .await;

        let runtime = create_runtime();
        let handle = RequestHandle::new(ApiClient::new_with_base_url(server.base_url()), None);
        let result: Result<Value, _> = handle
            .request(Method::GET, "/patient/p1", None, RequestOptions::default())
            .await;

        let message = result.unwrap_err().error;
        assert_eq!(message, "Request failed with status code 503");
        assert_ne!(message, FALLBACK_ERROR_MESSAGE);
        runtime.dispose();
    }
}
