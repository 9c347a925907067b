use leptos::*;
use leptos_router::*;

use crate::{
    components::error::InlineErrorMessage,
    router::AUTH_PATH,
    state::{
        auth::use_auth,
        common::{use_common, DEFAULT_PATIENT_STATUS},
        request::use_request,
    },
};

pub mod repository;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = use_auth();
    let common = use_common();
    let navigate = use_navigate();
    let user = auth.clone();

    let sign_out = move || {
        auth.logout();
        common.set_patient_status(DEFAULT_PATIENT_STATUS);
        log::info!("session cleared");
        navigate(AUTH_PATH, NavigateOptions { replace: true, ..Default::default() });
    };
    let sign_out_after_delete = sign_out.clone();

    let request = use_request();
    let error = request.error();
    let deleting = request.is_loading();
    let confirming = create_rw_signal(false);
    let delete = create_action(move |_: &()| {
        let request = request.clone();
        async move { repository::delete_account(request).await.is_ok() }
    });
    create_effect(move |_| {
        if delete.value().get() == Some(true) {
            log::info!("account deleted");
            sign_out_after_delete();
        }
    });

    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-semibold">"Settings"</h2>
            <section class="bg-white rounded shadow p-4">
                {move || match user.user() {
                    Some(u) => view! {
                        <dl class="grid grid-cols-2 gap-2 text-sm">
                            <dt>"Name"</dt><dd>{u.name}</dd>
                            <dt>"Email"</dt><dd>{u.email}</dd>
                            <dt>"Role"</dt><dd>{u.role}</dd>
                        </dl>
                    }.into_view(),
                    None => view! { <p class="text-sm text-gray-500">"No user details stored for this session."</p> }.into_view(),
                }}
            </section>
            <InlineErrorMessage error=error/>
            <div class="space-x-2">
                <button class="px-4 py-2 border rounded" on:click=move |_| sign_out()>
                    "Log out"
                </button>
                <button
                    class="px-4 py-2 border rounded text-red-600 disabled:opacity-50"
                    disabled=move || deleting.get()
                    on:click=move |_| {
                        if confirming.get_untracked() {
                            delete.dispatch(());
                        } else {
                            confirming.set(true);
                        }
                    }
                >
                    {move || if confirming.get() { "Confirm account deletion" } else { "Delete account" }}
                </button>
            </div>
        </div>
    }
}
