//! Named route registry with reverse lookup.
//!
//! # Responsibilities
//! - Record `(scope, name) → pattern` while routes are registered
//! - Reverse a route name plus parameters into a concrete path
//! - Fold nested tables in under a prefix and namespace
//!
//! # Design Decisions
//! - Patterns use axum syntax: `{param}` for one segment, `{*rest}` for the tail
//! - Named parameters must cover the placeholders exactly
//! - An unscoped lookup of a name registered under several scopes is ambiguous
//!   unless exactly one registration is unscoped

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// Parameters supplied to a reverse lookup.
#[derive(Debug, Clone, Copy)]
pub enum RouteParams<'a> {
    None,
    Positional(&'a [String]),
    Named(&'a BTreeMap<String, String>),
}

/// Why a reverse lookup failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoReverseMatch {
    pub reason: String,
}

impl NoReverseMatch {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for NoReverseMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Host-framework reverse lookup, consumed as a black box by declarations.
pub trait RouteResolver: Send + Sync {
    fn reverse(
        &self,
        route: &str,
        params: RouteParams<'_>,
        app_scope: Option<&str>,
    ) -> Result<String, NoReverseMatch>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    Wildcard(String),
}

/// A parsed axum route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(inner) => match inner.strip_prefix('*') {
                    Some(name) => Segment::Wildcard(name.to_string()),
                    None => Segment::Param(inner.to_string()),
                },
                None => Segment::Literal(s.to_string()),
            })
            .collect();

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) | Segment::Wildcard(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fill the pattern's placeholders.
    pub fn reverse(&self, params: RouteParams<'_>) -> Result<String, NoReverseMatch> {
        let names: Vec<&str> = self.placeholders().collect();

        let values: Vec<&str> = match params {
            RouteParams::None => {
                if !names.is_empty() {
                    return Err(NoReverseMatch::new(format!(
                        "pattern {} expects parameters {:?}",
                        self.raw, names
                    )));
                }
                Vec::new()
            }
            RouteParams::Positional(args) => {
                if args.len() != names.len() {
                    return Err(NoReverseMatch::new(format!(
                        "pattern {} expects {} positional parameters, got {}",
                        self.raw,
                        names.len(),
                        args.len()
                    )));
                }
                args.iter().map(String::as_str).collect()
            }
            RouteParams::Named(kwargs) => {
                if kwargs.len() != names.len() || names.iter().any(|n| !kwargs.contains_key(*n)) {
                    return Err(NoReverseMatch::new(format!(
                        "pattern {} expects parameters {:?}, got {:?}",
                        self.raw,
                        names,
                        kwargs.keys().collect::<Vec<_>>()
                    )));
                }
                names.iter().map(|n| kwargs[*n].as_str()).collect()
            }
        };

        let mut values = values.into_iter();
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(name) => {
                    let value = values.next().unwrap_or_default();
                    if value.is_empty() || value.contains('/') {
                        return Err(NoReverseMatch::new(format!(
                            "parameter {} = {:?} is not a single path segment",
                            name, value
                        )));
                    }
                    path.push_str(&encode_segment(value));
                }
                Segment::Wildcard(name) => {
                    let value = values.next().unwrap_or_default().trim_start_matches('/');
                    if value.is_empty() {
                        return Err(NoReverseMatch::new(format!("parameter {} is empty", name)));
                    }
                    let encoded: Vec<String> = value
                        .split('/')
                        .map(encode_segment)
                        .collect();
                    path.push_str(&encoded.join("/"));
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

fn encode_segment(value: &str) -> String {
    // form encoding turns spaces into '+', which is literal in a path
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Join a nest prefix and a nested pattern the way `axum::Router::nest` does.
fn join_prefix(prefix: &str, pattern: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if pattern == "/" || pattern.is_empty() {
        if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.to_string()
        }
    } else {
        format!("{}{}", prefix, pattern)
    }
}

#[derive(Debug, Clone)]
struct NamedRoute {
    scope: Option<String>,
    name: String,
    pattern: RoutePattern,
}

/// Registry of named routes, built during route-table construction.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<NamedRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named pattern. Re-registering `(scope, name)` replaces the pattern.
    pub fn insert(&mut self, scope: Option<&str>, name: &str, pattern: &str) {
        let pattern = RoutePattern::parse(pattern);
        match self
            .routes
            .iter_mut()
            .find(|r| r.name == name && r.scope.as_deref() == scope)
        {
            Some(existing) => existing.pattern = pattern,
            None => self.routes.push(NamedRoute {
                scope: scope.map(str::to_string),
                name: name.to_string(),
                pattern,
            }),
        }
    }

    /// Fold a nested table in under `prefix`, scoping its unscoped routes to `namespace`.
    pub fn merge(&mut self, prefix: &str, namespace: Option<&str>, other: RouteTable) {
        for route in other.routes {
            let scope = route.scope.as_deref().or(namespace);
            let pattern = join_prefix(prefix, route.pattern.as_str());
            self.insert(scope, &route.name, &pattern);
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn lookup(&self, route: &str, app_scope: Option<&str>) -> Result<&RoutePattern, NoReverseMatch> {
        let candidates: Vec<&NamedRoute> = self.routes.iter().filter(|r| r.name == route).collect();

        if let Some(scope) = app_scope {
            return candidates
                .into_iter()
                .find(|r| r.scope.as_deref() == Some(scope))
                .map(|r| &r.pattern)
                .ok_or_else(|| NoReverseMatch::new(format!("no route named {} in scope {}", route, scope)));
        }

        match candidates.as_slice() {
            [] => Err(NoReverseMatch::new(format!("no route named {}", route))),
            [only] => Ok(&only.pattern),
            many => {
                let unscoped: Vec<_> = many.iter().filter(|r| r.scope.is_none()).collect();
                match unscoped.as_slice() {
                    [only] => Ok(&only.pattern),
                    _ => Err(NoReverseMatch::new(format!(
                        "route name {} is registered in {} scopes",
                        route,
                        many.len()
                    ))),
                }
            }
        }
    }
}

impl RouteResolver for RouteTable {
    fn reverse(
        &self,
        route: &str,
        params: RouteParams<'_>,
        app_scope: Option<&str>,
    ) -> Result<String, NoReverseMatch> {
        self.lookup(route, app_scope)?.reverse(params)
    }
}
