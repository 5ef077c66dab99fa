use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    tutor_gateway::run().await
}
