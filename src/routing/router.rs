//! Route registration with optional healthchecks.
//!
//! # Responsibilities
//! - Register axum routes unchanged
//! - Record route names for later reverse lookup
//! - Hand attached healthchecks to the sync client
//!
//! # Design Decisions
//! - Healthchecks are only queued here; route names cannot be reversed until
//!   `finish()` returns the complete table
//! - A healthcheck on a nested router is a configuration mistake: fatal when
//!   strict, ignored when lenient

use std::sync::Arc;

use axum::routing::MethodRouter;
use axum::Router;

use crate::config::Strictness;
use crate::error::ConfigurationError;
use crate::health::Healthcheck;
use crate::routing::table::RouteTable;
use crate::sync::HealthcheckClient;

/// Options passed along with a route registration.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    /// Route name (or namespace, for nested routers).
    pub name: Option<String>,
    /// Healthcheck to create for this route.
    pub healthcheck: Option<Healthcheck>,
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn healthcheck(mut self, healthcheck: Healthcheck) -> Self {
        self.healthcheck = Some(healthcheck);
        self
    }
}

/// An `axum::Router` builder that understands route names and healthchecks.
pub struct HealthcheckRouter<S = ()> {
    inner: Router<S>,
    table: RouteTable,
    client: Arc<HealthcheckClient>,
}

impl<S> HealthcheckRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(client: Arc<HealthcheckClient>) -> Self {
        Self {
            inner: Router::new(),
            table: RouteTable::new(),
            client,
        }
    }

    /// Register a route, queueing its healthcheck if one is attached.
    pub fn route(mut self, path: &str, method_router: MethodRouter<S>, options: RouteOptions) -> Self {
        let RouteOptions { name, healthcheck } = options;

        if let Some(name) = &name {
            self.table.insert(None, name, path);
        }

        if let Some(mut healthcheck) = healthcheck {
            if let Some(name) = name {
                healthcheck.route = Some(name);
            }
            tracing::debug!(path = %path, route = ?healthcheck.route, "Healthcheck queued");
            self.client.enqueue(healthcheck);
        }

        self.inner = self.inner.route(path, method_router);
        self
    }

    /// Nest a sub-router. Its route names are scoped to `options.name`.
    pub fn nest(
        mut self,
        path: &str,
        router: HealthcheckRouter<S>,
        options: RouteOptions,
    ) -> Result<Self, ConfigurationError> {
        if options.healthcheck.is_some() {
            match self.client.settings().strictness() {
                Strictness::Strict => {
                    return Err(ConfigurationError::HealthcheckOnInclude {
                        path: path.to_string(),
                    });
                }
                Strictness::Lenient => {
                    tracing::debug!(path = %path, "Ignoring healthcheck attached to nested router");
                }
            }
        }

        self.table.merge(path, options.name.as_deref(), router.table);
        // axum refuses to nest at the root
        self.inner = if path.trim_end_matches('/').is_empty() {
            self.inner.merge(router.inner)
        } else {
            self.inner.nest(path, router.inner)
        };
        Ok(self)
    }

    /// The client healthchecks are queued on.
    pub fn client(&self) -> &Arc<HealthcheckClient> {
        &self.client
    }

    /// End route construction, yielding the axum router and the resolvable table.
    pub fn finish(self) -> (Router<S>, RouteTable) {
        (self.inner, self.table)
    }
}
