use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match emissions_atlas::app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
