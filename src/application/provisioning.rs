use std::fmt;

use tracing::{error, info};

use crate::{
    api::UserApiClient,
    domain::{AdminCredentials, RegistrationOutcome},
};

/// What the provisioning run tells the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionReport {
    Created(AdminCredentials),
    AlreadyExists { username: String },
    Failed(String),
}

impl ProvisionReport {
    pub fn is_failure(&self) -> bool {
        matches!(self, ProvisionReport::Failed(_))
    }
}

impl fmt::Display for ProvisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionReport::Created(credentials) => {
                writeln!(f, "Admin user created successfully")?;
                writeln!(f, "  username: {}", credentials.username)?;
                writeln!(f, "  password: {}", credentials.password)?;
                write!(f, "  role:     {}", credentials.role)
            }
            ProvisionReport::AlreadyExists { username } => {
                write!(f, "Admin user '{}' already exists", username)
            }
            ProvisionReport::Failed(detail) => write!(f, "Error creating admin user: {}", detail),
        }
    }
}

/// Issue the single registration request and turn its outcome into a report.
pub async fn run(client: &UserApiClient, credentials: &AdminCredentials) -> ProvisionReport {
    match client.register(credentials).await {
        Ok(RegistrationOutcome::Created) => {
            info!(username = %credentials.username, "admin user registered");
            ProvisionReport::Created(credentials.clone())
        }
        Ok(RegistrationOutcome::AlreadyExists) => {
            info!(username = %credentials.username, "admin user already registered");
            ProvisionReport::AlreadyExists {
                username: credentials.username.clone(),
            }
        }
        Err(e) => {
            error!("registration failed: {}", e);
            ProvisionReport::Failed(e.detail())
        }
    }
}
