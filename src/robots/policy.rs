//! Robots.txt evaluation
//!
//! This module wraps the robotstxt matcher in the small policy surface the
//! crawler needs: one decision per path, with HTTP-level outcomes folded
//! into blanket allow or deny policies.

use robotstxt::DefaultMatcher;

/// User agent token matched against robots.txt groups.
const MATCH_AGENT: &str = "sitemapper";

#[derive(Debug, Clone)]
enum Rules {
    /// Every path is allowed (no robots.txt was found).
    AllowAll,
    /// Every path is denied (the site could not serve its robots.txt).
    DisallowAll,
    /// Paths are checked against the retrieved robots.txt content.
    Content(String),
}

/// Access policy derived from a site's robots.txt
///
/// Construction never fails. The underlying matcher is a port of Google's
/// parser and is lenient the way production crawlers are: garbage lines are
/// skipped, not fatal.
#[derive(Debug, Clone)]
pub struct RobotsPolicy {
    rules: Rules,
}

impl RobotsPolicy {
    /// Policy that allows every path.
    pub fn allow_all() -> Self {
        Self {
            rules: Rules::AllowAll,
        }
    }

    /// Policy that denies every path.
    pub fn disallow_all() -> Self {
        Self {
            rules: Rules::DisallowAll,
        }
    }

    /// Builds the policy from a robots.txt fetch outcome.
    ///
    /// A 2xx response parses the body. A 4xx response means the site has no
    /// robots file and everything is allowed. Anything else (typically 5xx)
    /// denies everything, since the site's wishes could not be read.
    pub fn from_status_and_body(status: u16, body: &str) -> Self {
        match status {
            200..=299 => Self {
                rules: Rules::Content(body.to_string()),
            },
            400..=499 => Self::allow_all(),
            _ => Self::disallow_all(),
        }
    }

    /// Reports whether crawling `path` is allowed.
    pub fn allowed(&self, path: &str) -> bool {
        match &self.rules {
            Rules::AllowAll => true,
            Rules::DisallowAll => false,
            Rules::Content(content) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, MATCH_AGENT, path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_all_allows_everything() {
        let policy = RobotsPolicy::allow_all();
        assert!(policy.allowed("/"));
        assert!(policy.allowed("/admin"));
    }

    #[test]
    fn disallow_all_denies_everything() {
        let policy = RobotsPolicy::disallow_all();
        assert!(!policy.allowed("/"));
        assert!(!policy.allowed("/page"));
    }

    #[test]
    fn parses_disallow_rules() {
        let policy =
            RobotsPolicy::from_status_and_body(200, "User-agent: *\nDisallow: /admin");
        assert!(policy.allowed("/"));
        assert!(policy.allowed("/page"));
        assert!(!policy.allowed("/admin"));
        assert!(!policy.allowed("/admin/users"));
    }

    #[test]
    fn allow_overrides_broader_disallow() {
        let policy = RobotsPolicy::from_status_and_body(
            200,
            "User-agent: *\nDisallow: /private\nAllow: /private/public",
        );
        assert!(!policy.allowed("/private"));
        assert!(policy.allowed("/private/public"));
    }

    #[test]
    fn group_for_our_agent_takes_precedence() {
        let policy = RobotsPolicy::from_status_and_body(
            200,
            "User-agent: sitemapper\nDisallow: /\n\nUser-agent: *\nAllow: /",
        );
        assert!(!policy.allowed("/page"));
    }

    #[test]
    fn rules_for_other_agents_do_not_apply() {
        let policy = RobotsPolicy::from_status_and_body(
            200,
            "User-agent: otherbot\nDisallow: /",
        );
        assert!(policy.allowed("/page"));
    }

    #[test]
    fn empty_body_allows_everything() {
        let policy = RobotsPolicy::from_status_and_body(200, "");
        assert!(policy.allowed("/any/path"));
    }

    #[test]
    fn not_found_status_allows_everything() {
        let policy = RobotsPolicy::from_status_and_body(404, "");
        assert!(policy.allowed("/any/path"));
    }

    #[test]
    fn server_error_status_denies_everything() {
        let policy = RobotsPolicy::from_status_and_body(500, "");
        assert!(!policy.allowed("/any/path"));
    }

    #[test]
    fn garbage_content_is_not_fatal() {
        let policy =
            RobotsPolicy::from_status_and_body(200, "This is not valid robots.txt {{{");
        assert!(policy.allowed("/any/path"));
    }
}
