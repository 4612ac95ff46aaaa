mod classify;
mod cli;
mod infra;
mod routes;
mod server;

use event_amplify::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
