//! Healthcheck declarations.
//!
//! A [`Healthcheck`] is written while routes are still being registered, so it
//! only holds raw inputs. [`Healthcheck::resolve`] turns it into a
//! [`ResolvedHealthcheck`] once the route table can be queried; only the
//! resolved form can be serialized into a [`MonitorPayload`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{Environment, Settings, Strictness};
use crate::error::{HealthcheckError, ResolutionError, ValidationError};
use crate::health::identity::{default_name, identity_code};
use crate::health::url::HealthcheckUrl;
use crate::routing::{RouteParams, RouteResolver};

/// Request methods the monitoring API can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Head,
    Options,
    Patch,
}

impl FromStr for HttpMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "PATCH" => Ok(HttpMethod::Patch),
            _ => Err(ValidationError::InvalidMethod(s.to_string())),
        }
    }
}

fn default_method() -> String {
    "GET".to_string()
}

/// A healthcheck attached to a route, before the route can be reversed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Healthcheck {
    /// Route name to reverse. Set from the route's name on registration.
    pub route: Option<String>,
    /// Already-resolved path; skips reversal when set.
    pub path: Option<String>,
    /// Positional route parameters.
    pub args: Vec<String>,
    /// Named route parameters.
    pub kwargs: BTreeMap<String, String>,
    /// Disambiguates a route name registered under several namespaces.
    pub app_scope: Option<String>,
    /// Display name override.
    pub name: Option<String>,
    /// Explicit identity code, binding to an existing remote monitor.
    pub code: Option<String>,
    pub method: String,
    pub query: BTreeMap<String, String>,
    pub body: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub cookies: BTreeMap<String, String>,
    /// Rule objects, passed through to the API untouched.
    pub assertions: Vec<Value>,
    pub tags: Vec<String>,
    pub note: Option<String>,
    pub interval_seconds: Option<i64>,
    pub timeout_seconds: Option<i64>,
    /// Dev-mode flag. Stamped from settings on enqueue when not set explicitly.
    pub dev: Option<bool>,
}

impl Default for Healthcheck {
    fn default() -> Self {
        Self {
            route: None,
            path: None,
            args: Vec::new(),
            kwargs: BTreeMap::new(),
            app_scope: None,
            name: None,
            code: None,
            method: default_method(),
            query: BTreeMap::new(),
            body: None,
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            assertions: Vec::new(),
            tags: Vec::new(),
            note: None,
            interval_seconds: None,
            timeout_seconds: None,
            dev: None,
        }
    }
}

impl Healthcheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    pub fn app_scope(mut self, scope: impl Into<String>) -> Self {
        self.app_scope = Some(scope.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().to_ascii_uppercase();
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn cookie(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(key.into(), value.into());
        self
    }

    pub fn assertion(mut self, rule: Value) -> Self {
        self.assertions.push(rule);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn interval_seconds(mut self, seconds: i64) -> Self {
        self.interval_seconds = Some(seconds);
        self
    }

    pub fn timeout_seconds(mut self, seconds: i64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn dev(mut self, dev: bool) -> Self {
        self.dev = Some(dev);
        self
    }

    /// Name used in messages before resolution.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.route.as_deref())
            .or(self.path.as_deref())
            .unwrap_or("<unnamed healthcheck>")
    }

    fn environment(&self, settings: &Settings) -> Environment {
        match self.dev {
            Some(true) => Environment::Dev,
            Some(false) => Environment::Prod,
            None => settings.environment(),
        }
    }

    fn reverse(
        &self,
        resolver: &dyn RouteResolver,
        strictness: Strictness,
    ) -> Result<String, ResolutionError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        let route = self.route.as_deref().ok_or_else(|| ResolutionError::MissingRoute {
            display: self.label().to_string(),
        })?;

        if !self.args.is_empty() && !self.kwargs.is_empty() && strictness == Strictness::Strict {
            return Err(ResolutionError::ConflictingParams {
                route: route.to_string(),
            });
        }

        let params = if !self.kwargs.is_empty() {
            RouteParams::Named(&self.kwargs)
        } else if !self.args.is_empty() {
            RouteParams::Positional(&self.args)
        } else {
            RouteParams::None
        };

        resolver
            .reverse(route, params, self.app_scope.as_deref())
            .map_err(|e| ResolutionError::NoReverseMatch {
                route: route.to_string(),
                reason: e.reason,
            })
    }

    /// Reverse the route, build the URL and derive the identity.
    pub fn resolve(
        &self,
        resolver: &dyn RouteResolver,
        settings: &Settings,
    ) -> Result<ResolvedHealthcheck, HealthcheckError> {
        let path = self.reverse(resolver, settings.strictness())?;
        let url = HealthcheckUrl::new(&path, &self.query, settings)?;
        let environment = self.environment(settings);
        let default_name = default_name(&self.method.to_ascii_uppercase(), url.display_url());
        let code = match &self.code {
            Some(code) => code.clone(),
            None => identity_code(environment, &default_name),
        };

        Ok(ResolvedHealthcheck {
            healthcheck: self.clone(),
            url,
            default_name,
            code,
            dev: environment.is_dev(),
            default_tags: settings.default_tags().to_vec(),
        })
    }
}

/// A healthcheck whose URL and identity are known.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHealthcheck {
    healthcheck: Healthcheck,
    url: HealthcheckUrl,
    default_name: String,
    code: String,
    dev: bool,
    default_tags: Vec<String>,
}

impl fmt::Display for ResolvedHealthcheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl ResolvedHealthcheck {
    pub fn healthcheck(&self) -> &Healthcheck {
        &self.healthcheck
    }

    pub fn url(&self) -> &HealthcheckUrl {
        &self.url
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_dev(&self) -> bool {
        self.dev
    }

    /// Explicit name, else the default name.
    pub fn display_name(&self) -> &str {
        self.healthcheck.name.as_deref().unwrap_or(&self.default_name)
    }

    /// Validate and build the API payload.
    pub fn serialize(&self) -> Result<MonitorPayload, ValidationError> {
        let check = &self.healthcheck;
        let method: HttpMethod = check.method.parse()?;

        let timeout_seconds = match check.timeout_seconds {
            Some(t) if t < 0 => return Err(ValidationError::NegativeTimeout(t)),
            Some(t) => Some(t as u64),
            None => None,
        };

        let request_interval_seconds = match check.interval_seconds {
            Some(i) if i <= 0 => return Err(ValidationError::NonPositiveInterval(i)),
            Some(i) => Some(i as u64),
            None => None,
        };

        if let Some(index) = check.assertions.iter().position(|rule| !rule.is_object()) {
            return Err(ValidationError::RuleNotObject(index));
        }

        let tags: BTreeSet<String> = check
            .tags
            .iter()
            .chain(self.default_tags.iter())
            .cloned()
            .collect();

        Ok(MonitorPayload {
            kind: "healthcheck",
            code: self.code.clone(),
            default_name: self.default_name.clone(),
            request: RequestPayload {
                url: self.url.full_url().to_string(),
                method,
                cookies: check.cookies.clone(),
                headers: check.headers.clone(),
                body: check.body.clone(),
                timeout_seconds,
            },
            dev: self.dev,
            name: check.name.clone(),
            rules: check.assertions.clone(),
            request_interval_seconds,
            tags,
            note: check.note.clone(),
        })
    }
}

/// The `request` object of a monitor definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    pub url: String,
    pub method: HttpMethod,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

/// One monitor definition in the batch PUT.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: String,
    #[serde(rename = "defaultName")]
    pub default_name: String,
    pub request: RequestPayload,
    pub dev: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_interval_seconds: Option<u64>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
