use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Startup failure (bind/serve) is the only fatal path; it is already
    // logged where it happens.
    match arcade_server::run_with_config().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
