use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Lifecycle state reported by the status endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationState {
    Exited,
    Created,
    Starting,
    Restarting,
    Deleting,
    Running,
}

impl_wire_enum_conversions!(ApplicationState {
    Exited => "exited",
    Created => "created",
    Starting => "starting",
    Restarting => "restarting",
    Deleting => "deleting",
    Running => "running",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationLanguage {
    Javascript,
    Typescript,
    Python,
    Java,
    Elixir,
    Rust,
    Go,
    Php,
    Dotnet,
    Static,
}

impl_wire_enum_conversions!(ApplicationLanguage {
    Javascript => "javascript",
    Typescript => "typescript",
    Python => "python",
    Java => "java",
    Elixir => "elixir",
    Rust => "rust",
    Go => "go",
    Php => "php",
    Dotnet => "dotnet",
    Static => "static",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentState {
    Pending,
    Clone,
    Success,
    Error,
}

impl_wire_enum_conversions!(DeploymentState {
    Pending => "pending",
    Clone => "clone",
    Success => "success",
    Error => "error",
});

/// Entry type in a file listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Directory,
    File,
}

impl_wire_enum_conversions!(FileKind {
    Directory => "directory",
    File => "file",
});
