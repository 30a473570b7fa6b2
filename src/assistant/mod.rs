mod client;
mod errors;
pub mod types;

pub use client::{AssistantClient, FOLDER_ID_HEADER};
pub use errors::AssistantError;
