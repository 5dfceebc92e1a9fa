//! Dispatch registry and title routing.
//!
//! The registry is an owned name-to-handler map built once at startup
//! by iterating the handler modules; it is injected by reference into
//! the execution core and read-only from then on. Routing from a case
//! title to a handler name is substring containment over an ordered
//! route list: the first declared pattern contained in the title wins,
//! so overlap ambiguity is resolved by declaration order, never by
//! pattern specificity.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use catalog::CaseId;

use crate::handlers;
use crate::plan::RouteEntry;
use crate::reporter::{HandlerError, Reporter};

/// An executable test behavior. Side effects only; outcome is the Result.
pub type Handler = fn(&dyn Reporter, CaseId) -> Result<(), HandlerError>;

/// Owned mapping from handler name to behavior.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    by_name: BTreeMap<String, Handler>,
}

impl HandlerRegistry {
    /// Build the registry from every handler module in [`crate::handlers`].
    pub fn collect() -> Self {
        let mut registry = Self::default();
        for register in handlers::modules() {
            register(&mut registry);
        }
        debug!(handlers = registry.len(), "handler registry built");
        registry
    }

    /// Insert a handler under `name`. A duplicate name silently replaces
    /// the earlier binding (last write wins); the collision is logged
    /// because it usually means two modules export the same name.
    pub fn register(&mut self, name: &str, handler: Handler) {
        if self.by_name.insert(name.to_string(), handler).is_some() {
            warn!(name, "handler name re-registered, keeping later binding");
        }
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// One title route: a literal substring expected in a case title, bound
/// to a handler name in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub pattern: String,
    pub handler: String,
}

/// Ordered route list evaluated first-match-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The built-in routes for the stock handler set.
    pub fn defaults() -> Self {
        Self::new(vec![
            Route {
                pattern: "Google and Microsoft".to_string(),
                handler: "dashboard_landing_page".to_string(),
            },
            Route {
                pattern: "Already have an account".to_string(),
                handler: "settings_page".to_string(),
            },
        ])
    }

    /// Build from plan-declared routes, falling back to the defaults
    /// when the plan declares none.
    pub fn from_plan(entries: &[RouteEntry]) -> Self {
        if entries.is_empty() {
            return Self::defaults();
        }
        Self::new(
            entries
                .iter()
                .map(|entry| Route {
                    pattern: entry.pattern.clone(),
                    handler: entry.handler.clone(),
                })
                .collect(),
        )
    }

    /// First route whose pattern is contained in `title`, in declaration
    /// order. `None` means the title is unhandled.
    pub fn match_title(&self, title: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| title.contains(&route.pattern))
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_reporter: &dyn Reporter, _case_id: CaseId) -> Result<(), HandlerError> {
        Ok(())
    }

    fn failing(_reporter: &dyn Reporter, _case_id: CaseId) -> Result<(), HandlerError> {
        Err(HandlerError::Assertion("always fails".to_string()))
    }

    #[test]
    fn collect_includes_stock_handlers() {
        let registry = HandlerRegistry::collect();
        assert!(registry.get("dashboard_landing_page").is_some());
        assert!(registry.get("settings_page").is_some());
    }

    #[test]
    fn duplicate_registration_keeps_later_binding() {
        let mut registry = HandlerRegistry::default();
        registry.register("page", noop);
        registry.register("page", failing);
        assert_eq!(registry.len(), 1);
        let handler = registry.get("page").expect("registered");
        let err = handler(&crate::reporter::TracingReporter, CaseId(1)).expect_err("later wins");
        assert!(matches!(err, HandlerError::Assertion(_)));
    }

    #[test]
    fn first_declared_match_wins_over_longer_overlap() {
        let table = RouteTable::new(vec![
            Route {
                pattern: "Google".to_string(),
                handler: "short".to_string(),
            },
            Route {
                pattern: "Google and Microsoft".to_string(),
                handler: "long".to_string(),
            },
        ]);
        let route = table
            .match_title("Google and Microsoft login page")
            .expect("match");
        assert_eq!(route.handler, "short");
    }

    #[test]
    fn matching_is_substring_containment() {
        let table = RouteTable::defaults();
        let route = table
            .match_title("V2 Already have an account? Sign in")
            .expect("match");
        assert_eq!(route.handler, "settings_page");
        assert!(table.match_title("Completely unrelated").is_none());
    }

    #[test]
    fn empty_plan_routes_fall_back_to_defaults() {
        let table = RouteTable::from_plan(&[]);
        assert_eq!(table, RouteTable::defaults());
    }

    #[test]
    fn plan_routes_keep_declaration_order() {
        let entries = vec![
            RouteEntry {
                pattern: "b".to_string(),
                handler: "second".to_string(),
            },
            RouteEntry {
                pattern: "a".to_string(),
                handler: "first".to_string(),
            },
        ];
        let table = RouteTable::from_plan(&entries);
        let route = table.match_title("ab").expect("match");
        assert_eq!(route.handler, "second");
    }
}
