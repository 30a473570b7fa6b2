use crate::assistant::AssistantClient;
use crate::forms::AskForm;
use crate::helpers::JsonResponse;
use actix_web::{post, web, Responder, Result};
use serde::Serialize;
use serde_valid::Validate;

#[derive(Serialize, Default)]
pub struct Answer {
    pub answer: String,
}

#[tracing::instrument(name = "Ask assistant.", skip(form, assistant))]
#[post("/ask")]
pub async fn ask_handler(
    form: web::Json<AskForm>,
    assistant: web::Data<AssistantClient>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<Answer>::build().form_error(errors.to_string()));
    }

    let question = form.into_inner().question;
    let assistant = assistant.into_inner();
    // the client is blocking, keep it off the actix worker
    let answer = web::block(move || assistant.ask(&question)).await??;

    Ok(JsonResponse::build().set_item(Answer { answer }).ok("OK"))
}
