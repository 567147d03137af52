//! Source-application allow/deny rules

/// Allow/deny rules keyed on the sending application's name.
///
/// A non-empty whitelist wins over the ignore list; with neither set every
/// application passes. Names match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppFilter {
    whitelist_apps: Vec<String>,
    ignored_apps: Vec<String>,
}

impl AppFilter {
    pub fn new(whitelist_apps: Vec<String>, ignored_apps: Vec<String>) -> Self {
        Self {
            whitelist_apps,
            ignored_apps,
        }
    }

    /// Split a comma-separated list, trimming items and dropping empties
    pub fn parse_list(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn whitelist_apps(&self) -> &[String] {
        &self.whitelist_apps
    }

    pub fn ignored_apps(&self) -> &[String] {
        &self.ignored_apps
    }

    pub fn should_forward(&self, app_name: &str) -> bool {
        if !self.whitelist_apps.is_empty() {
            return self.whitelist_apps.iter().any(|a| a == app_name);
        }

        if !self.ignored_apps.is_empty() {
            return !self.ignored_apps.iter().any(|a| a == app_name);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_rules_forwards_everything() {
        let filter = AppFilter::default();
        assert!(filter.should_forward("Slack"));
        assert!(filter.should_forward(""));
    }

    #[test]
    fn whitelist_only_forwards_listed_apps() {
        let filter = AppFilter::new(list(&["Slack", "Signal"]), vec![]);
        assert!(filter.should_forward("Slack"));
        assert!(!filter.should_forward("Spotify"));
    }

    #[test]
    fn whitelist_takes_precedence_over_ignore_list() {
        let filter = AppFilter::new(list(&["Slack"]), list(&["Slack"]));
        assert!(filter.should_forward("Slack"));
        assert!(!filter.should_forward("Discord"));
    }

    #[test]
    fn ignore_list_blocks_listed_apps() {
        let filter = AppFilter::new(vec![], list(&["Spotify"]));
        assert!(!filter.should_forward("Spotify"));
        assert!(filter.should_forward("Slack"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let filter = AppFilter::new(list(&["Slack"]), vec![]);
        assert!(!filter.should_forward("slack"));
    }

    #[test]
    fn parse_list_trims_and_drops_empties() {
        assert_eq!(
            AppFilter::parse_list(" Slack , Signal,, ,Mail "),
            list(&["Slack", "Signal", "Mail"])
        );
        assert!(AppFilter::parse_list("").is_empty());
    }
}
