use super::{
    client::{ApiClient, RequestOptions},
    types::{ApiError, HealingFeatures, HealingPrediction, InfectionFeatures, InfectionPrediction},
};

impl ApiClient {
    pub async fn predict_infection(
        &self,
        features: &InfectionFeatures,
        options: &RequestOptions,
    ) -> Result<InfectionPrediction, ApiError> {
        self.post("/api/infection", features, options).await
    }

    pub async fn predict_healing(
        &self,
        features: &HealingFeatures,
        options: &RequestOptions,
    ) -> Result<HealingPrediction, ApiError> {
        self.post("/api/healing", features, options).await
    }
}
