use crate::{
    api::{ApiError, MessageResponse},
    state::request::RequestHandle,
};

pub async fn delete_account(request: RequestHandle) -> Result<MessageResponse, ApiError> {
    let options = request.options();
    request.run(request.api().delete_account(&options)).await
}
