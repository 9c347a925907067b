use leptos::*;
use leptos_router::*;

use super::repository;
use crate::{
    api::Patient,
    components::error::InlineErrorMessage,
    state::{auth::use_auth, common::use_common, request::use_request},
    utils::format::{capitalize, format_timestamp},
};

/// Case-insensitive match on name, department or bed number.
pub fn filter_patients(patients: &[Patient], query: &str) -> Vec<Patient> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return patients.to_vec();
    }
    patients
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&query)
                || p.department.to_lowercase().contains(&query)
                || p.bed.to_string() == query
        })
        .cloned()
        .collect()
}

#[component]
pub fn PatientsPage() -> impl IntoView {
    let request = use_request();
    let auth = use_auth();
    let query = create_rw_signal(String::new());
    let is_loading = request.is_loading();
    let error = request.error();
    let common = use_common();
    create_effect(move |_| common.set_loading(is_loading.get()));

    let patients = create_local_resource(
        || (),
        move |_| {
            let request = request.clone();
            let supervisor = auth.user().map(|u| u.id).unwrap_or_default();
            async move {
                repository::list_patients(request, supervisor)
                    .await
                    .unwrap_or_default()
            }
        },
    );

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-semibold">"Patients"</h2>
                <A href="/new" class="bg-blue-600 text-white rounded px-3 py-2 text-sm">"Add patient"</A>
            </div>
            <input
                class="w-full border rounded px-3 py-2"
                type="search"
                placeholder="Search by name, department or bed"
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <InlineErrorMessage error=error/>
            <Show when=move || is_loading.get()>
                <p class="text-sm text-gray-500">"Loading patients..."</p>
            </Show>
            {move || patients.get().map(|list| {
                let visible = filter_patients(&list, &query.get());
                if visible.is_empty() {
                    return view! { <p class="text-gray-500">"No patients found."</p> }.into_view();
                }
                view! {
                    <table class="w-full text-left bg-white rounded shadow">
                        <thead>
                            <tr>
                                <th class="p-2">"Name"</th>
                                <th class="p-2">"Bed"</th>
                                <th class="p-2">"Department"</th>
                                <th class="p-2">"Wound"</th>
                                <th class="p-2">"Admitted"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {visible.into_iter().map(|p| view! {
                                <tr class="border-t">
                                    <td class="p-2">
                                        <A href=format!("/patient/{}", p.id)>{p.name.clone()}</A>
                                    </td>
                                    <td class="p-2">{p.bed}</td>
                                    <td class="p-2">{capitalize(&p.department)}</td>
                                    <td class="p-2">
                                        {format!("{} ({})", p.wound.wound_type, p.wound.severity)}
                                    </td>
                                    <td class="p-2">{format_timestamp(&p.created_at)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view()
            })}
        </div>
    }
}
