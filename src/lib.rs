pub mod client;
pub mod configuration;
pub mod contact_store;
pub mod domain;
pub mod email_client;
pub mod notification;
pub mod routes;
pub mod startup;
pub mod telemetry;
mod utils;
