mod cli;
mod infra;
mod routes;
mod server;

use aula_core::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
