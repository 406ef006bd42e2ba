mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use lifestyle_checkin::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
