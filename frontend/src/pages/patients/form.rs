use leptos::{ev::SubmitEvent, *};
use leptos_router::*;

use super::repository;
use crate::{
    api::{
        ApiError, InfectedFlag, NewPatient, Patient, Wound, GENDERS, WOUND_LOCATIONS,
        WOUND_SEVERITIES, WOUND_TREATMENTS, WOUND_TYPES,
    },
    components::error::InlineErrorMessage,
    state::request::use_request,
};

const INFECTED_CHOICES: &[&str] = &["No", "Yes"];

/// Raw form inputs. Numbers stay as text until submit so partial input
/// does not fight the cursor.
#[derive(Clone, Copy)]
pub struct PatientFormState {
    pub name: RwSignal<String>,
    pub avatar: RwSignal<String>,
    pub gender: RwSignal<String>,
    pub age: RwSignal<String>,
    pub bed: RwSignal<String>,
    pub department: RwSignal<String>,
    pub blood_type: RwSignal<String>,
    pub wound_type: RwSignal<String>,
    pub location: RwSignal<String>,
    pub severity: RwSignal<String>,
    pub infected: RwSignal<String>,
    pub size: RwSignal<String>,
    pub treatment: RwSignal<String>,
}

impl PatientFormState {
    pub fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            avatar: create_rw_signal(String::new()),
            gender: create_rw_signal(GENDERS[0].to_string()),
            age: create_rw_signal(String::new()),
            bed: create_rw_signal(String::new()),
            department: create_rw_signal(String::new()),
            blood_type: create_rw_signal(String::new()),
            wound_type: create_rw_signal(WOUND_TYPES[0].to_string()),
            location: create_rw_signal(WOUND_LOCATIONS[0].to_string()),
            severity: create_rw_signal(WOUND_SEVERITIES[0].to_string()),
            infected: create_rw_signal(INFECTED_CHOICES[0].to_string()),
            size: create_rw_signal(String::new()),
            treatment: create_rw_signal(WOUND_TREATMENTS[0].to_string()),
        }
    }

    pub fn fill(&self, patient: &Patient) {
        self.name.set(patient.name.clone());
        self.avatar.set(patient.avatar.clone());
        self.gender.set(patient.gender.clone());
        self.age.set(patient.age.to_string());
        self.bed.set(patient.bed.to_string());
        self.department.set(patient.department.clone());
        self.blood_type.set(patient.blood_type.clone());
        self.wound_type.set(patient.wound.wound_type.clone());
        self.location.set(patient.wound.location.clone());
        self.severity.set(patient.wound.severity.clone());
        self.infected.set(patient.wound.infected.as_label());
        self.size.set(patient.wound.size.to_string());
        self.treatment.set(patient.wound.treatment.clone());
    }

    pub fn to_new_patient(&self) -> Result<NewPatient, ApiError> {
        let age = parse_field::<u32>("Age", &self.age.get_untracked())?;
        let bed = parse_field::<u32>("Bed", &self.bed.get_untracked())?;
        let size = parse_field::<f64>("Wound size", &self.size.get_untracked())?;
        let patient = NewPatient {
            name: self.name.get_untracked().trim().to_string(),
            avatar: self.avatar.get_untracked().trim().to_string(),
            gender: self.gender.get_untracked(),
            age,
            bed,
            department: self.department.get_untracked().trim().to_string(),
            blood_type: self.blood_type.get_untracked().trim().to_string(),
            wound: Wound {
                wound_type: self.wound_type.get_untracked(),
                location: self.location.get_untracked(),
                severity: self.severity.get_untracked(),
                infected: InfectedFlag::Label(self.infected.get_untracked()),
                size,
                treatment: self.treatment.get_untracked(),
            },
        };
        patient.validate()?;
        Ok(patient)
    }
}

impl Default for PatientFormState {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field<T: std::str::FromStr>(label: &str, raw: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("{} must be a number", label)))
}

#[component]
fn TextField(label: &'static str, value: RwSignal<String>, #[prop(optional)] input_type: Option<&'static str>) -> impl IntoView {
    view! {
        <label class="block text-sm">
            <span class="text-gray-700">{label}</span>
            <input
                class="mt-1 w-full border rounded px-3 py-2"
                type=input_type.unwrap_or("text")
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
fn SelectField(label: &'static str, options: &'static [&'static str], value: RwSignal<String>) -> impl IntoView {
    view! {
        <label class="block text-sm">
            <span class="text-gray-700">{label}</span>
            <select
                class="mt-1 w-full border rounded px-3 py-2"
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {options.iter().map(|opt| {
                    let opt = *opt;
                    view! {
                        <option value=opt selected=move || value.get() == opt>{opt}</option>
                    }
                }).collect_view()}
            </select>
        </label>
    }
}

#[component]
fn PatientForm(
    form: PatientFormState,
    pending: Signal<bool>,
    error: Signal<Option<ApiError>>,
    submit_label: &'static str,
    on_submit: Callback<()>,
) -> impl IntoView {
    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_submit.call(());
    };
    view! {
        <form class="bg-white rounded shadow p-4 space-y-4" on:submit=handle_submit>
            <InlineErrorMessage error=error/>
            <div class="grid grid-cols-2 gap-4">
                <TextField label="Name" value=form.name/>
                <TextField label="Avatar URL" value=form.avatar/>
                <SelectField label="Gender" options=GENDERS value=form.gender/>
                <TextField label="Age" value=form.age input_type="number"/>
                <TextField label="Bed" value=form.bed input_type="number"/>
                <TextField label="Department" value=form.department/>
                <TextField label="Blood type" value=form.blood_type/>
            </div>
            <h3 class="text-lg font-semibold">"Wound"</h3>
            <div class="grid grid-cols-2 gap-4">
                <SelectField label="Type" options=WOUND_TYPES value=form.wound_type/>
                <SelectField label="Location" options=WOUND_LOCATIONS value=form.location/>
                <SelectField label="Severity" options=WOUND_SEVERITIES value=form.severity/>
                <SelectField label="Infected" options=INFECTED_CHOICES value=form.infected/>
                <TextField label="Size (cm)" value=form.size input_type="number"/>
                <SelectField label="Treatment" options=WOUND_TREATMENTS value=form.treatment/>
            </div>
            <button
                type="submit"
                class="bg-blue-600 text-white rounded px-4 py-2 disabled:opacity-50"
                disabled=move || pending.get()
            >
                {move || if pending.get() { "Saving..." } else { submit_label }}
            </button>
        </form>
    }
}

#[component]
pub fn NewPatientPage() -> impl IntoView {
    let form = PatientFormState::new();
    let request = use_request();
    let navigate = use_navigate();
    let pending = request.is_loading();
    let form_error = create_rw_signal(None::<ApiError>);
    let request_error = request.error();
    let error = Signal::derive(move || form_error.get().or_else(|| request_error.get()));

    let create = create_action(move |patient: &NewPatient| {
        let request = request.clone();
        let patient = patient.clone();
        async move { repository::create_patient(request, patient).await.ok() }
    });
    create_effect(move |_| {
        if let Some(Some(created)) = create.value().get() {
            navigate(&format!("/patient/{}", created.id), Default::default());
        }
    });

    let on_submit = Callback::new(move |_| match form.to_new_patient() {
        Ok(patient) => {
            form_error.set(None);
            create.dispatch(patient);
        }
        Err(err) => form_error.set(Some(err)),
    });

    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-semibold">"Add patient"</h2>
            <PatientForm form=form pending=pending error=error submit_label="Create" on_submit=on_submit/>
        </div>
    }
}

#[component]
pub fn EditPatientPage() -> impl IntoView {
    let params = use_params_map();
    let patient_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let form = PatientFormState::new();
    let request = use_request();
    let navigate = use_navigate();
    let pending = request.is_loading();
    let form_error = create_rw_signal(None::<ApiError>);
    let request_error = request.error();
    let error = Signal::derive(move || form_error.get().or_else(|| request_error.get()));

    let loader = request.clone();
    let existing = create_local_resource(patient_id, move |id| {
        let request = loader.clone();
        async move { repository::load_patient(request, id).await.ok() }
    });
    create_effect(move |_| {
        if let Some(Some(patient)) = existing.get() {
            form.fill(&patient);
        }
    });

    let save = create_action(move |input: &(String, NewPatient)| {
        let request = request.clone();
        let (id, patient) = input.clone();
        async move {
            repository::update_patient(request, id.clone(), patient)
                .await
                .ok()
                .map(|_| id)
        }
    });
    create_effect(move |_| {
        if let Some(Some(id)) = save.value().get() {
            navigate(&format!("/patient/{}", id), Default::default());
        }
    });

    let on_submit = Callback::new(move |_| match form.to_new_patient() {
        Ok(patient) => {
            form_error.set(None);
            save.dispatch((patient_id(), patient));
        }
        Err(err) => form_error.set(Some(err)),
    });

    view! {
        <div class="space-y-4">
            <h2 class="text-2xl font-semibold">"Edit patient"</h2>
            <PatientForm form=form pending=pending error=error submit_label="Save" on_submit=on_submit/>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::test_support::helpers::sample_patient;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn filled_form_round_trips_to_payload() {
        with_runtime(|| {
            let patient = sample_patient("p1");
            let form = PatientFormState::new();
            form.fill(&patient);

            let payload = form.to_new_patient().expect("valid form");
            assert_eq!(payload.name, "Jane Roe");
            assert_eq!(payload.age, 54);
            assert_eq!(payload.bed, 12);
            assert_eq!(payload.wound.size, 2.5);
            assert_eq!(payload.wound.infected, InfectedFlag::Label("No".into()));
        });
    }

    #[test]
    fn non_numeric_age_is_a_validation_error() {
        with_runtime(|| {
            let form = PatientFormState::new();
            form.fill(&sample_patient("p1"));
            form.age.set("fifty".into());

            let err = form.to_new_patient().unwrap_err();
            assert_eq!(err.kind, ApiErrorKind::Validation);
            assert_eq!(err.error, "Age must be a number");
        });
    }

    #[test]
    fn empty_form_fails_validation() {
        with_runtime(|| {
            let form = PatientFormState::new();
            form.age.set("30".into());
            form.bed.set("4".into());
            form.size.set("1.5".into());

            let err = form.to_new_patient().unwrap_err();
            assert_eq!(err.kind, ApiErrorKind::Validation);
            assert_eq!(err.error, "Name is required");
        });
    }

    #[test]
    fn infected_flag_from_backend_bool_becomes_label() {
        with_runtime(|| {
            let mut patient = sample_patient("p1");
            patient.wound.infected = InfectedFlag::Flag(true);
            let form = PatientFormState::new();
            form.fill(&patient);
            assert_eq!(form.infected.get_untracked(), "Yes");
        });
    }
}
