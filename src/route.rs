//! Dashboard route check
//!
//! Charts only load on the dashboard route, and only when the page actually
//! embeds the account-type chart. Other pages do no chart work.

use crate::config::DashboardConfig;

/// Whether `path` is one of the configured dashboard paths
pub fn is_dashboard_route(path: &str, config: &DashboardConfig) -> bool {
    config.dashboard_paths.iter().any(|p| p == path)
}

/// Full trigger condition for the chart data load
pub fn should_load_charts(path: &str, has_account_chart: bool, config: &DashboardConfig) -> bool {
    has_account_chart && is_dashboard_route(path, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_paths() {
        let config = DashboardConfig::default();
        assert!(is_dashboard_route("/", &config));
        assert!(is_dashboard_route("", &config));
        assert!(!is_dashboard_route("/accounts", &config));
        assert!(!is_dashboard_route("/reports/", &config));
    }

    #[test]
    fn test_requires_mount_point() {
        let config = DashboardConfig::default();
        assert!(should_load_charts("/", true, &config));
        assert!(!should_load_charts("/", false, &config));
        assert!(!should_load_charts("/banks", true, &config));
    }

    #[test]
    fn test_custom_paths() {
        let config = DashboardConfig {
            dashboard_paths: vec!["/dashboard".to_string()],
            ..Default::default()
        };
        assert!(is_dashboard_route("/dashboard", &config));
        assert!(!is_dashboard_route("/", &config));
    }
}
