//! Host-side rendering for component tests.

use std::rc::Rc;

use leptos::*;
use leptos_router::{RouterIntegrationContext, ServerIntegration};

use crate::{
    api::{ApiClient, User},
    state::{auth::AuthStore, common::CommonStore},
    utils::storage::MemoryStorage,
};

pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = leptos::create_runtime();
    let result = f();
    runtime.dispose();
    result
}

pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    leptos_reactive::suppress_resource_load(true);
    let html = with_runtime(|| view().into_view().render_to_string().to_string());
    leptos_reactive::suppress_resource_load(false);
    html
}

/// Renders `view` at `path` with the app-level contexts in place and, when
/// `user` is given, a signed-in session backed by in-memory storage.
pub fn render_with_session<F, N>(path: &str, user: Option<User>, view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let url = format!("http://localhost{}", path);
    render_to_string(move || {
        provide_context(RouterIntegrationContext::new(ServerIntegration { path: url }));
        provide_context(ApiClient::new_with_base_url("http://localhost:5000"));
        provide_context(CommonStore::new());
        let auth = AuthStore::new(Rc::new(MemoryStorage::default()));
        if let Some(user) = user {
            auth.login("test-token", Some(user));
        }
        provide_context(auth);
        view()
    })
}
