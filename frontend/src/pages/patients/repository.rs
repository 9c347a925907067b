use crate::{
    api::{
        ApiError, HealingFeatures, HealingPrediction, InfectionFeatures, InfectionPrediction,
        MessageResponse, NewPatient, Patient,
    },
    state::request::RequestHandle,
};

pub async fn list_patients(
    request: RequestHandle,
    supervisor_id: String,
) -> Result<Vec<Patient>, ApiError> {
    let options = request.options();
    request
        .run(request.api().list_patients(&supervisor_id, &options))
        .await
}

pub async fn load_patient(request: RequestHandle, id: String) -> Result<Patient, ApiError> {
    let options = request.options();
    request.run(request.api().get_patient(&id, &options)).await
}

pub async fn create_patient(
    request: RequestHandle,
    patient: NewPatient,
) -> Result<Patient, ApiError> {
    let options = request.options();
    request
        .run(request.api().create_patient(&patient, &options))
        .await
}

pub async fn update_patient(
    request: RequestHandle,
    id: String,
    patient: NewPatient,
) -> Result<(), ApiError> {
    let options = request.options();
    request
        .run(request.api().update_patient(&id, &patient, &options))
        .await
}

pub async fn delete_patient(
    request: RequestHandle,
    id: String,
) -> Result<MessageResponse, ApiError> {
    let options = request.options();
    request
        .run(request.api().delete_patient(&id, &options))
        .await
}

pub async fn connect_source(
    request: RequestHandle,
    id: String,
    file_name: String,
    contents: Vec<u8>,
) -> Result<MessageResponse, ApiError> {
    let options = request.options();
    request
        .run(
            request
                .api()
                .connect_patient_source(&id, &file_name, contents, &options),
        )
        .await
}

pub async fn predict_healing(
    request: RequestHandle,
    features: HealingFeatures,
) -> Result<HealingPrediction, ApiError> {
    let options = request.options();
    request
        .run(request.api().predict_healing(&features, &options))
        .await
}

pub async fn predict_infection(
    request: RequestHandle,
    features: InfectionFeatures,
) -> Result<InfectionPrediction, ApiError> {
    let options = request.options();
    request
        .run(request.api().predict_infection(&features, &options))
        .await
}
