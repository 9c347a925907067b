use super::{
    client::{ApiClient, RequestOptions},
    types::{
        ApiError, AuthResponse, LoginRequest, MessageResponse, SignupRequest, User, UserEnvelope,
    },
};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/login", request, &RequestOptions::default())
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.post("/auth/signup", request, &RequestOptions::default())
            .await
    }

    pub async fn current_user(&self, options: &RequestOptions) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.get("/user/get", options).await?;
        Ok(envelope.user)
    }

    /// Deletes the signed-in account. The caller clears the session.
    pub async fn delete_account(&self, options: &RequestOptions) -> Result<MessageResponse, ApiError> {
        self.delete("/user/delete", options).await
    }
}
