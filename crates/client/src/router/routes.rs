//! Route table of the user and merchant portals.
//!
//! ```text
//! /                   -> redirect to /user
//! /user               user      User Portal
//! /user/register      user      User Registration
//! /user/login         user      User Login
//! /user/home          user      User Center        (protected)
//! /cart               user      Shopping Cart      (protected)
//! /shops/:id          user      Shop Details
//! /products/:id       user      Product Details
//! /merchant           merchant  Merchant Portal
//! /merchant/register  merchant  Merchant Registration
//! /merchant/login     merchant  Merchant Login
//! /merchant/home      merchant  Merchant Console   (protected)
//! /chat               neutral   Chat
//! *                   neutral   Page Not Found
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Page frame a route is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Customer portal.
    User,
    /// Merchant portal.
    Merchant,
    /// Page not tied to either portal.
    Neutral,
}

impl Layout {
    /// Lowercase name, as used by the portal shells.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Merchant => "merchant",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path pattern plus the metadata shown when it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Pattern with `:name` parameter segments, or `*` for the catch-all.
    pub pattern: &'static str,
    /// Frame the route is rendered in.
    pub layout: Layout,
    /// Page title, without the product name.
    pub title: Option<&'static str>,
}

const fn route(pattern: &'static str, layout: Layout, title: &'static str) -> RouteDescriptor {
    RouteDescriptor {
        pattern,
        layout,
        title: Some(title),
    }
}

/// Pattern of the catch-all route.
pub const CATCH_ALL: &str = "*";

/// Descriptor for paths no other route matches.
pub const NOT_FOUND: RouteDescriptor = route(CATCH_ALL, Layout::Neutral, "Page Not Found");

/// Every route, in match order. The catch-all is last.
pub const ROUTES: &[RouteDescriptor] = &[
    route("/user", Layout::User, "User Portal"),
    route("/user/register", Layout::User, "User Registration"),
    route("/user/login", Layout::User, "User Login"),
    route("/user/home", Layout::User, "User Center"),
    route("/cart", Layout::User, "Shopping Cart"),
    route("/shops/:id", Layout::User, "Shop Details"),
    route("/products/:id", Layout::User, "Product Details"),
    route("/merchant", Layout::Merchant, "Merchant Portal"),
    route("/merchant/register", Layout::Merchant, "Merchant Registration"),
    route("/merchant/login", Layout::Merchant, "Merchant Login"),
    route("/merchant/home", Layout::Merchant, "Merchant Console"),
    route("/chat", Layout::Neutral, "Chat"),
    NOT_FOUND,
];

/// Static redirects applied before the guard runs.
pub const REDIRECTS: &[(&str, &str)] = &[("/", "/user")];

/// A path matched against [`ROUTES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Normalized path (no query, no fragment, no trailing slash).
    pub path: String,
    /// Table entry that matched.
    pub descriptor: &'static RouteDescriptor,
    /// Captured `:name` segments.
    pub params: BTreeMap<String, String>,
}

/// Resolve a path, following static redirects. Never fails: unmatched paths
/// land on the catch-all.
#[must_use]
pub fn resolve(target: &str) -> ResolvedRoute {
    let mut path = normalize_path(target);
    if let Some((_, to)) = REDIRECTS.iter().find(|(from, _)| *from == path) {
        path = (*to).to_string();
    }

    for descriptor in ROUTES {
        if descriptor.pattern == CATCH_ALL {
            continue;
        }
        if let Some(params) = match_pattern(descriptor.pattern, &path) {
            return ResolvedRoute {
                path,
                descriptor,
                params,
            };
        }
    }

    ResolvedRoute {
        path,
        descriptor: &NOT_FOUND,
        params: BTreeMap::new(),
    }
}

/// Drop query string and fragment, ensure a leading slash and strip trailing
/// slashes (except for the root itself).
#[must_use]
pub fn normalize_path(target: &str) -> String {
    let without_query = target.split(['?', '#']).next().unwrap_or_default();
    let trimmed = without_query.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let mut pattern_segments = pattern.split('/').skip(1);
    let mut path_segments = path.split('/').skip(1);
    let mut params = BTreeMap::new();

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(params),
            (Some(expected), Some(actual)) => {
                if let Some(name) = expected.strip_prefix(':') {
                    if actual.is_empty() {
                        return None;
                    }
                    params.insert(name.to_string(), actual.to_string());
                } else if expected != actual {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/cart/"), "/cart");
        assert_eq!(normalize_path("/shops/3?tab=info#top"), "/shops/3");
        assert_eq!(normalize_path("chat"), "/chat");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/?x=1"), "/");
    }

    #[test]
    fn test_root_redirects_to_user_portal() {
        let resolved = resolve("/");
        assert_eq!(resolved.path, "/user");
        assert_eq!(resolved.descriptor.title, Some("User Portal"));
        assert_eq!(resolved.descriptor.layout, Layout::User);
    }

    #[test]
    fn test_params_are_captured() {
        let resolved = resolve("/products/42/");
        assert_eq!(resolved.descriptor.pattern, "/products/:id");
        assert_eq!(resolved.params.get("id").unwrap(), "42");
    }

    #[test]
    fn test_param_segment_must_be_present() {
        assert_eq!(resolve("/shops").descriptor.pattern, CATCH_ALL);
        assert_eq!(resolve("/shops/1/extra").descriptor.pattern, CATCH_ALL);
    }

    #[test]
    fn test_unmatched_lands_on_catch_all() {
        let resolved = resolve("/nowhere/at/all");
        assert_eq!(resolved.path, "/nowhere/at/all");
        assert_eq!(resolved.descriptor.layout, Layout::Neutral);
        assert_eq!(resolved.descriptor.title, Some("Page Not Found"));
        assert!(resolved.params.is_empty());
    }

    #[test]
    fn test_every_route_has_a_layout_and_title() {
        for descriptor in ROUTES {
            assert!(descriptor.title.is_some(), "{}", descriptor.pattern);
        }
        assert_eq!(ROUTES.last().unwrap().pattern, CATCH_ALL);
    }

    #[test]
    fn test_merchant_routes() {
        assert_eq!(resolve("/merchant/home").descriptor.layout, Layout::Merchant);
        assert_eq!(
            resolve("/merchant/login").descriptor.title,
            Some("Merchant Login")
        );
    }
}
