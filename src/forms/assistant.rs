use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct AskForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 20000)]
    pub question: String,
}
