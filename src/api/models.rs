use serde::Deserialize;

/// Message the user-management API returns when the account is already registered.
pub const USER_EXISTS_MSG: &str = "User already exists";

/// Error body of the user-management API. Every field is optional; unknown
/// shapes simply deserialize to `msg: None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn is_user_exists(&self) -> bool {
        self.msg.as_deref().map(str::trim) == Some(USER_EXISTS_MSG)
    }
}
