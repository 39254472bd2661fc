use std::process::ExitCode;

use audio_fetcher::{
    api::UserApiClient,
    application::provisioning,
    config::{self, ServiceConfig},
    domain::{AdminCredentials, DEFAULT_ROLE},
    logging,
};
use clap::Parser;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "provision-admin",
    version,
    about = "Register the administrative account with the user-management API"
)]
struct Cli {
    /// Account name to register
    #[arg(short, long, env = "ADMIN_USERNAME")]
    username: String,

    /// Account password
    #[arg(short, long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    #[arg(short, long, env = "ADMIN_ROLE", default_value = DEFAULT_ROLE)]
    role: String,

    /// Base URL of the user-management API (overrides USER_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Before parsing, so `.env` values feed the clap env fallbacks.
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let base_url = match cli.api_url.as_deref() {
        Some(raw) => config::parse_base_url("--api-url", raw),
        None => ServiceConfig::from_env().map(|config| config.user_api),
    };
    let base_url = match base_url {
        Ok(url) => url,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error creating admin user: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match UserApiClient::new(base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating admin user: {}", e.detail());
            return ExitCode::FAILURE;
        }
    };

    let credentials = AdminCredentials {
        username: cli.username,
        password: cli.password,
        role: cli.role,
    };

    let report = provisioning::run(&client, &credentials).await;
    if report.is_failure() {
        eprintln!("{}", report);
        ExitCode::FAILURE
    } else {
        println!("{}", report);
        ExitCode::SUCCESS
    }
}
