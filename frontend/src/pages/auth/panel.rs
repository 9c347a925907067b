use leptos::{ev::SubmitEvent, *};
use leptos_router::*;

use super::view_model::{use_auth_view_model, AuthMode};
use crate::{components::error::InlineErrorMessage, router::LANDING_PATH};

#[component]
pub fn AuthPanel() -> impl IntoView {
    let vm = use_auth_view_model();
    let pending = vm.pending();
    let succeeded = vm.succeeded();
    let navigate = use_navigate();

    create_effect(move |_| {
        if succeeded.get() {
            navigate(LANDING_PATH, Default::default());
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };
    let is_signup = move || vm.mode.get() == AuthMode::Signup;

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4">
            <form class="w-full max-w-sm space-y-4 bg-white p-6 rounded shadow" on:submit=on_submit>
                <h2 class="text-2xl font-bold text-center">
                    {move || if is_signup() { "Create an account" } else { "Sign in" }}
                </h2>
                <InlineErrorMessage error=vm.error.into()/>
                <Show when=is_signup>
                    <input
                        class="w-full border rounded px-3 py-2"
                        type="text"
                        placeholder="Username"
                        prop:value=move || vm.form.username.get()
                        on:input=move |ev| vm.form.username.set(event_target_value(&ev))
                    />
                </Show>
                <input
                    class="w-full border rounded px-3 py-2"
                    type="email"
                    placeholder="Email"
                    prop:value=move || vm.form.email.get()
                    on:input=move |ev| vm.form.email.set(event_target_value(&ev))
                />
                <input
                    class="w-full border rounded px-3 py-2"
                    type="password"
                    placeholder="Password"
                    prop:value=move || vm.form.password.get()
                    on:input=move |ev| vm.form.password.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="w-full bg-blue-600 text-white rounded py-2 disabled:opacity-50"
                    disabled=move || pending.get()
                >
                    {move || match (pending.get(), is_signup()) {
                        (true, _) => "Please wait...",
                        (false, true) => "Sign up",
                        (false, false) => "Log in",
                    }}
                </button>
                <button
                    type="button"
                    class="w-full text-sm text-blue-600"
                    on:click=move |_| vm.toggle_mode()
                >
                    {move || if is_signup() { "Already registered? Log in" } else { "No account? Sign up" }}
                </button>
            </form>
        </div>
    }
}
