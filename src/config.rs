use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the catalog client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the travel-planner REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Number of cities fetched per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet window before a search keystroke burst is sent, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Path of the stored session file
    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// Path of the budget tracker state file
    #[serde(default = "default_budget_file")]
    pub budget_file: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            session_file: default_session_file(),
            budget_file: default_budget_file(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

/// Default API base URL
fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

/// Default page size for city listings
fn default_page_size() -> u32 {
    6
}

/// Default search debounce quiet window
fn default_search_debounce_ms() -> u64 {
    500
}

/// Default request timeout
fn default_request_timeout_secs() -> u64 {
    10
}

/// Default session file location
fn default_session_file() -> String {
    ".wanderlist/session.json".to_string()
}

/// Default budget tracker file location
fn default_budget_file() -> String {
    ".wanderlist/budget.json".to_string()
}
