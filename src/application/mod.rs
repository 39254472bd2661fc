pub mod download_coordinator;
pub mod provisioning;

pub use download_coordinator::{DialogSaver, DownloadCoordinator, FileSaver};
pub use provisioning::ProvisionReport;
