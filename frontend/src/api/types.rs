use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GENDERS: &[&str] = &["Male", "Female"];

pub const WOUND_TYPES: &[&str] = &[
    "Burn",
    "Puncture",
    "Abrasion",
    "Surgical Wound",
    "Ulcer",
    "Pressure Ulcer",
    "Diabetic Ulcer",
    "Laceration",
];

pub const WOUND_LOCATIONS: &[&str] = &[
    "Elbow", "Hand", "Head", "Shoulder", "Torso", "Knee", "Foot", "Back", "Arm", "Leg",
];

pub const WOUND_SEVERITIES: &[&str] = &["Moderate", "Mild", "Severe"];

pub const WOUND_TREATMENTS: &[&str] = &[
    "Surgical Debridement",
    "Antibiotics (Oral)",
    "Moist Wound Dressing",
    "Negative Pressure Wound Therapy",
    "Cleaning and Bandage",
    "No Treatment (for mild cases)",
    "Antibiotics (Topical)",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "username")]
    pub name: String,
    pub email: String,
    /// Opaque role label; the backend does not always send one.
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub msg: Option<String>,
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

/// The `infected` flag is a boolean in some payloads and a `"Yes"`/`"No"`
/// label in others. Both shapes are kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfectedFlag {
    Flag(bool),
    Label(String),
}

impl InfectedFlag {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            Self::Label(label) => match label.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" => Some(true),
                "no" | "false" => Some(false),
                _ => None,
            },
        }
    }

    /// `"Yes"`/`"No"` as the prediction endpoints expect it.
    pub fn as_label(&self) -> String {
        match (self, self.as_bool()) {
            (_, Some(true)) => "Yes".into(),
            (_, Some(false)) => "No".into(),
            (Self::Label(label), None) => label.clone(),
            (Self::Flag(flag), None) => flag.to_string(),
        }
    }
}

impl Default for InfectedFlag {
    fn default() -> Self {
        Self::Label("No".into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wound {
    #[serde(rename = "type")]
    pub wound_type: String,
    pub location: String,
    pub severity: String,
    pub infected: InfectedFlag,
    pub size: f64,
    pub treatment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub supervisor: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub gender: String,
    pub age: u32,
    pub bed: u32,
    pub department: String,
    pub blood_type: String,
    pub wound: Wound,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    /// Samples from a connected data source, when the backend attaches them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<HealthIndicatorSample>,
}

impl Patient {
    pub fn latest_sample(&self) -> Option<HealthIndicatorSample> {
        self.indicators
            .iter()
            .copied()
            .max_by(|a, b| a.time.total_cmp(&b.time))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientEnvelope {
    #[serde(default)]
    pub msg: Option<String>,
    pub patient: Patient,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserWithPatients {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub patients: Vec<Patient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserWithPatients>,
}

/// Payload for creating or editing a patient. The supervisor and timestamps
/// are filled in by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub gender: String,
    pub age: u32,
    pub bed: u32,
    pub department: String,
    pub blood_type: String,
    pub wound: Wound,
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("Name is required".to_string());
        }
        if self.department.trim().is_empty() {
            errors.push("Department is required".to_string());
        }
        if self.blood_type.trim().is_empty() {
            errors.push("Blood type is required".to_string());
        }
        check_one_of(&mut errors, "gender", &self.gender, GENDERS);
        check_one_of(&mut errors, "wound type", &self.wound.wound_type, WOUND_TYPES);
        check_one_of(&mut errors, "location", &self.wound.location, WOUND_LOCATIONS);
        check_one_of(&mut errors, "severity", &self.wound.severity, WOUND_SEVERITIES);
        check_one_of(&mut errors, "treatment", &self.wound.treatment, WOUND_TREATMENTS);
        if !self.wound.size.is_finite() || self.wound.size < 0.0 {
            errors.push("Wound size must be a non-negative number".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            let mut error = ApiError::validation(errors[0].clone());
            error.details = Some(serde_json::json!({ "errors": errors }));
            Err(error)
        }
    }
}

impl From<&Patient> for NewPatient {
    fn from(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            avatar: patient.avatar.clone(),
            gender: patient.gender.clone(),
            age: patient.age,
            bed: patient.bed,
            department: patient.department.clone(),
            blood_type: patient.blood_type.clone(),
            wound: patient.wound.clone(),
        }
    }
}

fn check_one_of(errors: &mut Vec<String>, field: &str, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        errors.push(format!("Invalid {}: {:?}", field, value));
    }
}

/// One sample of the charted wound indicators, keyed by display label on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthIndicatorSample {
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "Wound Temperature")]
    pub wound_temperature: f64,
    #[serde(rename = "Wound pH")]
    pub wound_ph: f64,
    #[serde(rename = "Moisture Level")]
    pub moisture_level: f64,
    #[serde(rename = "Drug Release")]
    pub drug_release: f64,
    #[serde(rename = "Healing Time")]
    pub healing_time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    WoundTemperature,
    WoundPh,
    MoistureLevel,
    DrugRelease,
    HealingTime,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::WoundTemperature,
        IndicatorKind::WoundPh,
        IndicatorKind::MoistureLevel,
        IndicatorKind::DrugRelease,
        IndicatorKind::HealingTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::WoundTemperature => "Wound Temperature",
            Self::WoundPh => "Wound pH",
            Self::MoistureLevel => "Moisture Level",
            Self::DrugRelease => "Drug Release",
            Self::HealingTime => "Healing Time",
        }
    }

    pub fn value(self, sample: &HealthIndicatorSample) -> f64 {
        match self {
            Self::WoundTemperature => sample.wound_temperature,
            Self::WoundPh => sample.wound_ph,
            Self::MoistureLevel => sample.moisture_level,
            Self::DrugRelease => sample.drug_release,
            Self::HealingTime => sample.healing_time,
        }
    }
}

/// `(time, value)` points for one indicator, ordered by time.
pub fn series(samples: &[HealthIndicatorSample], kind: IndicatorKind) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = samples
        .iter()
        .map(|sample| (sample.time, kind.value(sample)))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSummary {
    pub latest: f64,
    pub min: f64,
    pub max: f64,
}

pub fn summarize(samples: &[HealthIndicatorSample], kind: IndicatorKind) -> Option<IndicatorSummary> {
    let points = series(samples, kind);
    let (_, latest) = *points.last()?;
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        });
    Some(IndicatorSummary { latest, min, max })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfectionFeatures {
    #[serde(rename = "Wound Temperature")]
    pub wound_temperature: f64,
    #[serde(rename = "Wound pH")]
    pub wound_ph: f64,
    #[serde(rename = "Moisture Level")]
    pub moisture_level: f64,
    #[serde(rename = "Drug Release")]
    pub drug_release: f64,
}

impl From<&HealthIndicatorSample> for InfectionFeatures {
    fn from(sample: &HealthIndicatorSample) -> Self {
        Self {
            wound_temperature: sample.wound_temperature,
            wound_ph: sample.wound_ph,
            moisture_level: sample.moisture_level,
            drug_release: sample.drug_release,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingFeatures {
    #[serde(rename = "Patient Age")]
    pub patient_age: u32,
    #[serde(rename = "Size")]
    pub size: f64,
    #[serde(rename = "Wound Type")]
    pub wound_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Severity")]
    pub severity: String,
    #[serde(rename = "Infected")]
    pub infected: String,
    #[serde(rename = "Treatment")]
    pub treatment: String,
}

impl From<&Patient> for HealingFeatures {
    fn from(patient: &Patient) -> Self {
        Self {
            patient_age: patient.age,
            size: patient.wound.size,
            wound_type: patient.wound.wound_type.clone(),
            location: patient.wound.location.clone(),
            severity: patient.wound.severity.clone(),
            infected: patient.wound.infected.as_label(),
            treatment: patient.wound.treatment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfectionPrediction {
    pub infection_prediction: String,
    pub infection_probability: f64,
}

impl InfectionPrediction {
    pub fn is_infected(&self) -> bool {
        self.infection_prediction.eq_ignore_ascii_case("yes")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealingPrediction {
    pub healing_time_days: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend answered with a non-success status.
    Server,
    /// The request never produced a response.
    Transport,
    /// Rejected on the client before sending.
    Validation,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn new(kind: ApiErrorKind, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            kind,
            status: None,
            details: None,
        }
    }

    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ApiErrorKind::Server, msg)
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, msg)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, msg)
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, msg)
    }
}
