// Entrypoint for the CLI.
// - Keeps `main` small: resolve the requested environment, obtain a
//   handle, and print the projects collection URL.
// - Returns `anyhow::Result` so failures surface with context.

use lpapi_cli::auth::{lp_factory, DEFAULT_APP_NAME};
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let Some(system_name) = args.next() else {
        eprintln!("Usage: lpapi <dev|staging|production|prod> [app-name]");
        return Ok(ExitCode::FAILURE);
    };
    let app_name = args.next().unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

    // Unknown environments were already reported on stderr by the factory.
    let Some(lp) = lp_factory(&system_name, &app_name)? else {
        return Ok(ExitCode::FAILURE);
    };

    println!("{}", lp.projects_url());
    Ok(ExitCode::SUCCESS)
}
