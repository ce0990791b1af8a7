//! Route-classification policy.
//!
//! A static, ordered table of `(methods, path-pattern, accessibility)` rules
//! evaluated against every request before any protected handler executes.
//! First matching rule wins; a path matching no rule is `Authenticated` —
//! only public paths are ever enumerated, never protected ones.

use http::Method;

/// Accessibility classification for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable with no principal.
    Public,
    /// Requires a populated authentication context.
    Authenticated,
}

/// One segment of a parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `*`: exactly one path segment
    Any,
    /// `**`: the remainder of the path (zero or more segments); only valid
    /// as the final segment
    Rest,
}

/// Ant-style path pattern: literal segments, `*` for one segment, trailing
/// `**` for any remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    fn parse(pattern: &str) -> Self {
        let segments = pattern
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment {
                "*" => Segment::Any,
                "**" => Segment::Rest,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        Self { segments }
    }

    fn matches(&self, path: &str) -> bool {
        let parts: Vec<&str> =
            path.trim_matches('/').split('/').filter(|part| !part.is_empty()).collect();

        let mut index = 0;
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Any => {
                    if index >= parts.len() {
                        return false;
                    }
                    index += 1;
                }
                Segment::Literal(literal) => {
                    if index >= parts.len() || parts[index] != literal.as_str() {
                        return false;
                    }
                    index += 1;
                }
            }
        }

        index == parts.len()
    }
}

/// One ordered rule of the policy table.
#[derive(Debug, Clone)]
pub struct PolicyRule {
    /// Methods this rule applies to; empty means any method.
    methods: Vec<Method>,
    pattern: PathPattern,
    access: Access,
}

impl PolicyRule {
    pub fn new(methods: &[Method], pattern: &str, access: Access) -> Self {
        Self { methods: methods.to_vec(), pattern: PathPattern::parse(pattern), access }
    }

    fn applies_to(&self, method: &Method, path: &str) -> bool {
        (self.methods.is_empty() || self.methods.contains(method)) && self.pattern.matches(path)
    }
}

/// The ordered route-classification table.
#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    rules: Vec<PolicyRule>,
}

impl AuthorizationPolicy {
    pub fn new(rules: Vec<PolicyRule>) -> Self {
        Self { rules }
    }

    /// Classify a request. First matching rule wins; no match is
    /// `Authenticated` (fail-closed).
    pub fn classify(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(method, path))
            .map(|rule| rule.access)
            .unwrap_or(Access::Authenticated)
    }
}

impl Default for AuthorizationPolicy {
    /// The dashboard's standard table: authentication endpoints and
    /// read-only service views are public; everything else — all mutations
    /// included — requires a principal.
    fn default() -> Self {
        use Access::{Authenticated, Public};

        Self::new(vec![
            // Identity echo needs a principal; listed before the /api/auth
            // wildcard so the ordering is what decides.
            PolicyRule::new(&[Method::GET], "/api/auth/me", Authenticated),
            PolicyRule::new(&[], "/api/auth/**", Public),
            PolicyRule::new(&[Method::GET], "/api/services", Public),
            PolicyRule::new(&[Method::GET], "/api/services/*", Public),
            PolicyRule::new(&[Method::GET], "/api/services/status/**", Public),
            PolicyRule::new(&[Method::GET], "/api/services/alerts", Public),
            PolicyRule::new(&[Method::GET], "/api/services/search", Public),
            PolicyRule::new(&[Method::GET], "/api/services/health-summary", Public),
            PolicyRule::new(&[Method::GET], "/health", Public),
            PolicyRule::new(&[Method::GET], "/docs/**", Public),
            PolicyRule::new(&[Method::GET], "/api-docs/**", Public),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_matching() {
        let exact = PathPattern::parse("/api/services");
        assert!(exact.matches("/api/services"));
        assert!(exact.matches("/api/services/"));
        assert!(!exact.matches("/api/services/1"));
        assert!(!exact.matches("/api"));

        let one = PathPattern::parse("/api/services/*");
        assert!(one.matches("/api/services/1"));
        assert!(one.matches("/api/services/alerts"));
        assert!(!one.matches("/api/services"));
        assert!(!one.matches("/api/services/1/status"));

        let rest = PathPattern::parse("/api/auth/**");
        assert!(rest.matches("/api/auth"));
        assert!(rest.matches("/api/auth/login"));
        assert!(rest.matches("/api/auth/a/b/c"));
        assert!(!rest.matches("/api/services"));
    }

    #[test]
    fn public_paths_are_classified_public() {
        let policy = AuthorizationPolicy::default();
        for path in [
            "/api/auth/login",
            "/api/services",
            "/api/services/1",
            "/api/services/status/OUTAGE",
            "/api/services/alerts",
            "/api/services/search",
            "/api/services/health-summary",
            "/health",
        ] {
            assert_eq!(policy.classify(&Method::GET, path), Access::Public, "path {}", path);
        }
        assert_eq!(policy.classify(&Method::POST, "/api/auth/login"), Access::Public);
    }

    #[test]
    fn mutations_are_protected_even_on_public_paths() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(policy.classify(&Method::POST, "/api/services"), Access::Authenticated);
        assert_eq!(policy.classify(&Method::PUT, "/api/services/1"), Access::Authenticated);
        assert_eq!(
            policy.classify(&Method::PATCH, "/api/services/1/status"),
            Access::Authenticated
        );
        assert_eq!(policy.classify(&Method::DELETE, "/api/services/1"), Access::Authenticated);
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = AuthorizationPolicy::default();
        // /api/auth/me sits under the public /api/auth/** umbrella but its
        // own earlier rule classifies it as authenticated.
        assert_eq!(policy.classify(&Method::GET, "/api/auth/me"), Access::Authenticated);
        // Sibling auth paths still fall through to the wildcard.
        assert_eq!(policy.classify(&Method::GET, "/api/auth/anything"), Access::Public);
    }

    #[test]
    fn unknown_paths_fail_closed() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(policy.classify(&Method::GET, "/api/users"), Access::Authenticated);
        assert_eq!(policy.classify(&Method::GET, "/"), Access::Authenticated);
        assert_eq!(policy.classify(&Method::GET, "/metrics"), Access::Authenticated);
    }

    #[test]
    fn explicit_rules_compose_in_order() {
        let policy = AuthorizationPolicy::new(vec![
            PolicyRule::new(&[], "/internal/**", Access::Authenticated),
            PolicyRule::new(&[], "/**", Access::Public),
        ]);
        assert_eq!(policy.classify(&Method::GET, "/internal/jobs"), Access::Authenticated);
        assert_eq!(policy.classify(&Method::GET, "/anything/else"), Access::Public);
    }
}
