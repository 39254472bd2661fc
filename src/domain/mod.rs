pub mod error;
pub mod model;

pub use error::{AppError, ProvisionError};
pub use model::{
    AdminCredentials, DownloadPhase, DownloadRequest, DownloadResult, MediaType,
    RegistrationOutcome, SaveOutcome, DEFAULT_ROLE, SAVED_FILENAME,
};
