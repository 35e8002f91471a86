use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task variant selected at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskVariant {
    /// Model-based
    #[serde(rename = "MB")]
    ModelBased,
    /// Model-based / model-free hybrid
    #[serde(rename = "MBMF")]
    Hybrid,
    /// Model-free
    #[serde(rename = "MF")]
    ModelFree,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task type {0:?} (expected MB, MBMF or MF)")]
pub struct ParseTaskError(pub String);

impl TaskVariant {
    pub fn code(&self) -> &'static str {
        match self {
            TaskVariant::ModelBased => "MB",
            TaskVariant::Hybrid => "MBMF",
            TaskVariant::ModelFree => "MF",
        }
    }
}

impl FromStr for TaskVariant {
    type Err = ParseTaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MB" => Ok(TaskVariant::ModelBased),
            "MBMF" => Ok(TaskVariant::Hybrid),
            "MF" => Ok(TaskVariant::ModelFree),
            other => Err(ParseTaskError(other.to_string())),
        }
    }
}

impl fmt::Display for TaskVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
