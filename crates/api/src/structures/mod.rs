//! Domain objects built from validated API payloads

pub mod application;
pub mod backup;
pub mod deployment;
pub mod status;
pub mod user;

pub use application::{Application, ApplicationVariant, WebsiteApplication, WebsiteDetails};
pub use backup::Backup;
pub use deployment::Deployment;
pub use status::{ApplicationStatus, SimpleApplicationStatus, SimpleStatusUsage, StatusUsage};
pub use user::{User, UserAccess, UserPlan};
