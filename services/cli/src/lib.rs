mod analyze;
mod cli;
mod config;
mod demo;
mod error;
mod render;

pub use error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
