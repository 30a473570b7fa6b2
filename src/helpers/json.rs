use actix_web::error::{Error, InternalError};
use actix_web::{web, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct JsonResponse<T> {
    pub(crate) status: String,
    pub(crate) message: String,
    pub(crate) code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) item: Option<T>,
}

#[derive(Serialize, Default)]
pub(crate) struct JsonResponseBuilder<T>
where
    T: Serialize + Default,
{
    item: Option<T>,
}

impl<T> JsonResponseBuilder<T>
where
    T: Serialize + Default,
{
    pub(crate) fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    fn to_json_response(self, status: &str, code: u32, message: &str) -> JsonResponse<T> {
        JsonResponse {
            status: status.to_string(),
            message: message.to_string(),
            code,
            item: self.item,
        }
    }

    pub(crate) fn ok(self, message: &str) -> web::Json<JsonResponse<T>> {
        let msg = if !message.trim().is_empty() {
            message
        } else {
            "Success"
        };
        web::Json(self.to_json_response("OK", 200, msg))
    }

    pub(crate) fn form_error(self, message: String) -> Error {
        let msg = if !message.trim().is_empty() {
            message
        } else {
            String::from("Validation error")
        };
        let body = self.to_json_response("Error", 400, &msg);
        InternalError::from_response(msg, HttpResponse::BadRequest().json(body)).into()
    }
}

impl<T> JsonResponse<T>
where
    T: Serialize + Default,
{
    pub(crate) fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder::default()
    }
}
