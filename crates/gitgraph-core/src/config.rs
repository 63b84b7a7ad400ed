use serde::{Deserialize, Serialize};

/// Load options shared by the executor and the layout engine: how much
/// history to pull and which branches render as protected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_commits: Option<usize>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub protected_branches: Vec<String>,
}
