use leptos::*;
use leptos_router::*;

use crate::{router::resolve_navigation, state::auth::use_auth};

/// Renders its children only when the guard lets the current location
/// through; otherwise redirects to where navigation settles. The session
/// predicate is read as a snapshot per navigation, so a login or logout takes
/// effect on the next one.
#[component]
pub fn RouteGuard(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let target = create_memo(move |_| {
        let path = location.pathname.get();
        let resolution = resolve_navigation(&path, auth.is_authenticated_untracked());
        if resolution.redirects.is_empty() {
            None
        } else {
            log::debug!("guard: {} -> {}", path, resolution.path);
            Some(resolution.path)
        }
    });

    move || match target.get() {
        None => children().into_view(),
        Some(path) => view! {
            <Redirect path=path options=NavigateOptions { replace: true, ..Default::default() }/>
        }
        .into_view(),
    }
}
