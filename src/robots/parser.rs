//! Crawl-exclusion policy parser
//!
//! Parses the line-oriented robots.txt dialect the crawler honors: lines of
//! the form `Disallow: <path>` (directive recognized case-insensitively),
//! with every other line ignored.

/// A site's parsed crawl-exclusion policy
///
/// Holds the set of disallowed path prefixes for one site. A URL is denied
/// iff its path starts with any declared prefix; prefixes compare
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    /// Lowercased disallowed path prefixes
    disallow: Vec<String>,
}

impl RobotsPolicy {
    /// Parses raw robots.txt content into a policy
    ///
    /// Only `Disallow:` directives are honored. Empty disallow values are
    /// ignored (an empty prefix would match every path, and robots
    /// convention reads a bare `Disallow:` as allow-all).
    pub fn parse(content: &str) -> Self {
        let mut disallow = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some((directive, value)) = trimmed.split_once(':') {
                if directive.trim().eq_ignore_ascii_case("disallow") {
                    let path = value.trim();
                    if !path.is_empty() {
                        disallow.push(path.to_lowercase());
                    }
                }
            }
        }

        Self { disallow }
    }

    /// Creates a permissive policy that allows every path
    ///
    /// Used as the fail-open default when robots.txt cannot be fetched.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Checks whether a URL path is allowed under this policy
    pub fn is_allowed(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        !self.disallow.iter().any(|prefix| path.starts_with(prefix))
    }

    /// Returns the number of disallow rules in the policy
    pub fn rule_count(&self) -> usize {
        self.disallow.len()
    }
}
