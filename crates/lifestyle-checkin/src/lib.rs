pub mod checkin;
pub mod config;
pub mod error;
pub mod telemetry;
