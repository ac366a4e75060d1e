use crate::severity::SeverityThresholds;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub locator_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub thresholds: SeverityThresholds,
    pub geocode_base_url: String,
}
