use leptos::{ev::Event, *};
use leptos_router::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use super::repository;
use crate::{
    api::{
        is_csv_file, series, summarize, ApiError, HealingFeatures, HealingPrediction,
        HealthIndicatorSample, IndicatorKind, InfectionFeatures, InfectionPrediction, Patient,
    },
    components::error::InlineErrorMessage,
    router::LANDING_PATH,
    state::{common::use_common, request::use_request},
    utils::format::{capitalize, format_number, format_timestamp},
};

/// Label shown in the dashboard header for the open patient.
pub fn status_label(patient: &Patient) -> &'static str {
    let infected = patient.wound.infected.as_bool().unwrap_or(false);
    match (infected, patient.wound.severity.as_str()) {
        (true, _) | (_, "Severe") => "Critical",
        (_, "Moderate") => "Monitoring",
        _ => "Stable",
    }
}

async fn read_file(file: &File) -> Result<Vec<u8>, ApiError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| ApiError::unknown("Could not read the selected file"))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[component]
pub fn PatientPage() -> impl IntoView {
    let params = use_params_map();
    let patient_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let common = use_common();
    let navigate = use_navigate();

    let request = use_request();
    let error = request.error();
    let is_loading = request.is_loading();

    let loader = request.clone();
    let patient = create_local_resource(patient_id, move |id| {
        let request = loader.clone();
        async move { repository::load_patient(request, id).await.ok() }
    });

    create_effect(move |_| {
        if let Some(Some(p)) = patient.get() {
            common.set_patient_status(status_label(&p));
        }
    });

    let predictions = use_request();
    let prediction_error = predictions.error();
    let healing_request = predictions.clone();
    let healing = create_action(move |patient: &Patient| {
        let request = healing_request.clone();
        let features = HealingFeatures::from(patient);
        async move { repository::predict_healing(request, features).await.ok() }
    });
    let infection = create_action(move |sample: &HealthIndicatorSample| {
        let request = predictions.clone();
        let features = InfectionFeatures::from(sample);
        async move { repository::predict_infection(request, features).await.ok() }
    });

    let remove = create_action(move |id: &String| {
        let request = request.clone();
        let id = id.clone();
        async move { repository::delete_patient(request, id).await.is_ok() }
    });
    create_effect(move |_| {
        if remove.value().get() == Some(true) {
            log::info!("patient deleted");
            navigate(LANDING_PATH, Default::default());
        }
    });

    let uploads = use_request();
    let upload_error = uploads.error();
    let uploading = uploads.is_loading();
    let file_error = create_rw_signal(None::<ApiError>);
    let source_error = Signal::derive(move || file_error.get().or_else(|| upload_error.get()));
    let upload = create_action(move |input: &(String, String, Vec<u8>)| {
        let request = uploads.clone();
        let (id, file_name, contents) = input.clone();
        async move {
            repository::connect_source(request, id, file_name, contents)
                .await
                .is_ok()
        }
    });
    create_effect(move |_| {
        if upload.value().get() == Some(true) {
            log::info!("data source connected");
            patient.refetch();
        }
    });
    let on_file = move |ev: Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let file_name = file.name();
        if !is_csv_file(&file_name) {
            file_error.set(Some(ApiError::validation("Only .csv files can be connected")));
            return;
        }
        file_error.set(None);
        let id = patient_id();
        spawn_local(async move {
            match read_file(&file).await {
                Ok(contents) => upload.dispatch((id, file_name, contents)),
                Err(err) => file_error.set(Some(err)),
            }
        });
    };

    let confirming = create_rw_signal(false);
    let selected = create_rw_signal(IndicatorKind::WoundTemperature);

    view! {
        <div class="space-y-6">
            <InlineErrorMessage error=error/>
            <Show when=move || is_loading.get()>
                <p class="text-sm text-gray-500">"Loading..."</p>
            </Show>
            {move || patient.get().flatten().map(|p| {
                let for_healing = p.clone();
                let latest = p.latest_sample();
                let delete_id = p.id.clone();
                view! {
                    <section class="bg-white rounded shadow p-4 space-y-2">
                        <div class="flex items-center justify-between">
                            <h2 class="text-2xl font-semibold">{p.name.clone()}</h2>
                            <div class="space-x-2">
                                <A href=format!("/patient/{}/edit", p.id) class="px-3 py-1 border rounded">"Edit"</A>
                                <button
                                    class="px-3 py-1 border rounded text-red-600"
                                    on:click=move |_| {
                                        if confirming.get_untracked() {
                                            remove.dispatch(delete_id.clone());
                                        } else {
                                            confirming.set(true);
                                        }
                                    }
                                >
                                    {move || if confirming.get() { "Confirm delete" } else { "Delete" }}
                                </button>
                            </div>
                        </div>
                        <dl class="grid grid-cols-2 gap-2 text-sm">
                            <dt>"Gender"</dt><dd>{p.gender.clone()}</dd>
                            <dt>"Age"</dt><dd>{p.age}</dd>
                            <dt>"Bed"</dt><dd>{p.bed}</dd>
                            <dt>"Department"</dt><dd>{capitalize(&p.department)}</dd>
                            <dt>"Blood type"</dt><dd>{p.blood_type.clone()}</dd>
                            <dt>"Admitted"</dt><dd>{format_timestamp(&p.created_at)}</dd>
                        </dl>
                    </section>
                    <section class="bg-white rounded shadow p-4 space-y-2">
                        <h3 class="text-lg font-semibold">"Wound"</h3>
                        <dl class="grid grid-cols-2 gap-2 text-sm">
                            <dt>"Type"</dt><dd>{p.wound.wound_type.clone()}</dd>
                            <dt>"Location"</dt><dd>{p.wound.location.clone()}</dd>
                            <dt>"Severity"</dt><dd>{p.wound.severity.clone()}</dd>
                            <dt>"Infected"</dt><dd>{p.wound.infected.as_label()}</dd>
                            <dt>"Size"</dt><dd>{format_number(p.wound.size)}</dd>
                            <dt>"Treatment"</dt><dd>{p.wound.treatment.clone()}</dd>
                        </dl>
                        <button
                            class="px-3 py-1 border rounded"
                            disabled=move || healing.pending().get()
                            on:click=move |_| healing.dispatch(for_healing.clone())
                        >
                            "Estimate healing time"
                        </button>
                        {move || healing.value().get().flatten().map(|h: HealingPrediction| view! {
                            <p class="text-sm">
                                {format!("Estimated healing time: {} days", format_number(h.healing_time_days))}
                            </p>
                        })}
                    </section>
                    <section class="bg-white rounded shadow p-4 space-y-2">
                        <h3 class="text-lg font-semibold">"Health indicators"</h3>
                        {if p.indicators.is_empty() {
                            view! { <p class="text-sm text-gray-500">"No indicator data connected."</p> }.into_view()
                        } else {
                            view! {
                                <table class="w-full text-sm text-left">
                                    <thead>
                                        <tr>
                                            <th>"Indicator"</th>
                                            <th>"Latest"</th>
                                            <th>"Min"</th>
                                            <th>"Max"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {IndicatorKind::ALL.iter().copied().filter_map(|kind| {
                                            summarize(&p.indicators, kind).map(|s| view! {
                                                <tr
                                                    class=move || if selected.get() == kind { "bg-blue-50 cursor-pointer" } else { "cursor-pointer" }
                                                    on:click=move |_| selected.set(kind)
                                                >
                                                    <td>{kind.label()}</td>
                                                    <td>{format_number(s.latest)}</td>
                                                    <td>{format_number(s.min)}</td>
                                                    <td>{format_number(s.max)}</td>
                                                </tr>
                                            })
                                        }).collect_view()}
                                    </tbody>
                                </table>
                                <IndicatorSeries samples=p.indicators.clone() selected=selected/>
                            }.into_view()
                        }}
                        {latest.map(|sample| view! {
                            <button
                                class="px-3 py-1 border rounded"
                                disabled=move || infection.pending().get()
                                on:click=move |_| infection.dispatch(sample)
                            >
                                "Check infection risk"
                            </button>
                        })}
                        {move || infection.value().get().flatten().map(|r: InfectionPrediction| view! {
                            <p class="text-sm">
                                {format!(
                                    "Infection predicted: {} ({}%)",
                                    if r.is_infected() { "Yes" } else { "No" },
                                    format_number(r.infection_probability * 100.0)
                                )}
                            </p>
                        })}
                    </section>
                }
            })}
            <InlineErrorMessage error=prediction_error/>
            <section class="bg-white rounded shadow p-4 space-y-2">
                <h3 class="text-lg font-semibold">"Data source"</h3>
                <p class="text-sm text-gray-500">"Upload a CSV of indicator readings for this patient."</p>
                <InlineErrorMessage error=source_error/>
                <input
                    type="file"
                    accept=".csv"
                    class="text-sm"
                    disabled=move || uploading.get()
                    on:change=on_file
                />
                <Show when=move || uploading.get()>
                    <p class="text-sm text-gray-500">"Uploading..."</p>
                </Show>
            </section>
        </div>
    }
}

/// Time-ordered readings of the selected indicator.
#[component]
fn IndicatorSeries(samples: Vec<HealthIndicatorSample>, selected: RwSignal<IndicatorKind>) -> impl IntoView {
    view! {
        <div class="mt-2">
            <h4 class="text-sm font-medium">{move || selected.get().label()}</h4>
            <table class="w-full text-xs text-left">
                <thead>
                    <tr><th>"Time"</th><th>"Value"</th></tr>
                </thead>
                <tbody>
                    {move || series(&samples, selected.get())
                        .into_iter()
                        .map(|(time, value)| view! {
                            <tr>
                                <td>{format_number(time)}</td>
                                <td>{format_number(value)}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
