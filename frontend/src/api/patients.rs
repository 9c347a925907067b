use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::{
    client::{path_segment, ApiClient, RequestOptions},
    types::{
        ApiError, MessageResponse, NewPatient, Patient, PatientEnvelope, UserListResponse,
    },
};

impl ApiClient {
    /// Patients supervised by `supervisor_id`. The backend only exposes them
    /// through the user listing, grouped per user.
    pub async fn list_patients(
        &self,
        supervisor_id: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Patient>, ApiError> {
        let listing: UserListResponse = self.get("/user/list", options).await?;
        Ok(listing
            .users
            .into_iter()
            .find(|user| user.id == supervisor_id)
            .map(|user| user.patients)
            .unwrap_or_default())
    }

    pub async fn get_patient(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<Patient, ApiError> {
        let envelope: PatientEnvelope = self
            .get(&format!("/patient/{}", path_segment(id)), options)
            .await?;
        Ok(envelope.patient)
    }

    pub async fn create_patient(
        &self,
        patient: &NewPatient,
        options: &RequestOptions,
    ) -> Result<Patient, ApiError> {
        patient.validate()?;
        let envelope: PatientEnvelope = self.post("/patient/new", patient, options).await?;
        Ok(envelope.patient)
    }

    pub async fn update_patient(
        &self,
        id: &str,
        patient: &NewPatient,
        options: &RequestOptions,
    ) -> Result<(), ApiError> {
        patient.validate()?;
        let _: Value = self
            .put(
                &format!("/patient/update/{}", path_segment(id)),
                patient,
                options,
            )
            .await?;
        Ok(())
    }

    pub async fn delete_patient(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<MessageResponse, ApiError> {
        self.delete(&format!("/patient/delete/{}", path_segment(id)), options)
            .await
    }

    /// Links a patient to an indicator data source by uploading its CSV.
    pub async fn connect_patient_source(
        &self,
        id: &str,
        file_name: &str,
        contents: Vec<u8>,
        options: &RequestOptions,
    ) -> Result<MessageResponse, ApiError> {
        if !is_csv_file(file_name) {
            return Err(ApiError::validation("Invalid file extension"));
        }
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| ApiError::unknown(format!("Failed to encode upload: {}", e)))?;
        self.upload(
            &format!("/patient/connect/{}", path_segment(id)),
            Form::new().part("file", part),
            options,
        )
        .await
    }
}

/// Only `.csv` sources are accepted by the backend.
pub fn is_csv_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"))
}
