use leptos::*;
use leptos_router::*;

use crate::state::{auth::use_auth, common::use_common};

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let auth = use_auth();
    let common = use_common();
    let session = auth.clone();
    create_effect(move |_| common.set_authenticated(session.is_authenticated()));
    let user_name = Signal::derive(move || auth.user().map(|u| u.name).unwrap_or_default());

    view! {
        <div class="min-h-screen flex bg-gray-50">
            <aside class=move || {
                if common.sidebar_open() {
                    "w-56 bg-white border-r border-gray-200 p-4 block"
                } else {
                    "w-56 bg-white border-r border-gray-200 p-4 hidden lg:block"
                }
            }>
                <h1 class="text-lg font-semibold mb-6">"Woundcare"</h1>
                <nav class="flex flex-col space-y-2" on:click=move |_| common.set_sidebar_open(false)>
                    <A href="/patients" class="px-3 py-2 rounded hover:bg-gray-100">"Patients"</A>
                    <A href="/new" class="px-3 py-2 rounded hover:bg-gray-100">"Add patient"</A>
                    <A href="/settings" class="px-3 py-2 rounded hover:bg-gray-100">"Settings"</A>
                </nav>
            </aside>
            <div class="flex-1 flex flex-col">
                <header class="h-14 flex items-center justify-between px-4 border-b border-gray-200 bg-white">
                    <button
                        class="lg:hidden px-2 py-1 rounded border"
                        on:click=move |_| common.toggle_sidebar()
                    >
                        "Menu"
                    </button>
                    <span class="text-sm text-gray-600">
                        {move || common.patient_status()}
                    </span>
                    <Show when=move || common.is_loading()>
                        <span class="text-xs text-gray-400">"Syncing..."</span>
                    </Show>
                    <Show when=move || common.is_authenticated()>
                        <span class="text-sm font-medium">{user_name}</span>
                    </Show>
                </header>
                <main class="flex-1 p-6">
                    <Outlet/>
                </main>
            </div>
        </div>
    }
}
