//! Per-resource operation groups

pub mod applications;
pub mod backups;
pub mod deploys;
pub mod files;
pub mod network;
pub mod user;

pub use applications::ApplicationsModule;
pub use backups::BackupsModule;
pub use deploys::DeploysModule;
pub use files::FilesModule;
pub use network::NetworkModule;
pub use user::UserModule;
