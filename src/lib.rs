pub mod assistant;
pub mod configuration;
pub mod forms;
mod helpers;
pub mod routes;
pub mod startup;
pub mod telemetry;
