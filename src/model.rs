//! Route table model and analysis result types.
//!
//! Everything here is created once from an extracted route table and never
//! mutated afterwards. Analyzers borrow a [`RouteTable`] and produce new
//! derived values ([`Conflict`], [`Warning`], [`CoverageReport`]).
//!
//! The invariants are enforced at construction *and* at deserialization:
//! a [`RouteEntry`] always has at least one method and at least one handler.

use {
    crate::{Error, Result, utils::join_methods},
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// An HTTP method a route is registered for.
///
/// `All` is a registration that matches every verb (Express `app.all`).
/// Serializes as the uppercase name; deserializes through [`FromStr`], so
/// `"get"` and `"_all"` are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
    All,
}

impl HttpMethod {
    /// The uppercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::All => "ALL",
        }
    }

    /// The method used on the wire when probing this registration.
    /// `All` has no wire form and is probed with `GET`.
    pub fn to_http(self) -> http::Method {
        match self {
            HttpMethod::Get | HttpMethod::All => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Trace => http::Method::TRACE,
            HttpMethod::Connect => http::Method::CONNECT,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "TRACE" => Ok(HttpMethod::Trace),
            "CONNECT" => Ok(HttpMethod::Connect),
            "ALL" | "_ALL" => Ok(HttpMethod::All),
            _ => Err(Error::invalid_input(format!("Unknown HTTP method: {s}"))),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// A single (path, methods, handlers) registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRouteEntry")]
pub struct RouteEntry {
    path: String,
    methods: Vec<HttpMethod>,
    handlers: Vec<String>,
}

#[derive(Deserialize)]
struct RawRouteEntry {
    path: String,
    methods: Vec<HttpMethod>,
    handlers: Vec<String>,
}

impl TryFrom<RawRouteEntry> for RouteEntry {
    type Error = Error;

    fn try_from(raw: RawRouteEntry) -> Result<Self> {
        RouteEntry::new(raw.path, raw.methods, raw.handlers)
    }
}

impl RouteEntry {
    /// Creates a route entry. Duplicate methods are collapsed, keeping the
    /// first occurrence.
    ///
    /// Fails if `methods` or `handlers` is empty.
    pub fn new(
        path: impl Into<String>,
        methods: impl IntoIterator<Item = HttpMethod>,
        handlers: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let path = path.into();
        let mut unique = Vec::new();
        for method in methods {
            if !unique.contains(&method) {
                unique.push(method);
            }
        }
        let handlers: Vec<String> = handlers.into_iter().map(Into::into).collect();

        if unique.is_empty() {
            return Err(Error::invalid_input(format!(
                "Route \"{path}\" has no HTTP methods"
            )));
        }
        if handlers.is_empty() {
            return Err(Error::invalid_input(format!(
                "Route \"{path}\" has no handlers"
            )));
        }

        Ok(Self {
            path,
            methods: unique,
            handlers,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn methods(&self) -> &[HttpMethod] {
        &self.methods
    }

    /// Handlers in execution order; the last one is the terminal handler.
    pub fn handlers(&self) -> &[String] {
        &self.handlers
    }

    pub fn terminal_handler(&self) -> &str {
        // non-empty by construction
        self.handlers.last().map(String::as_str).unwrap_or_default()
    }

    /// Handlers that run before the terminal handler.
    pub fn middleware(&self) -> &[String] {
        &self.handlers[..self.handlers.len() - 1]
    }

    /// `"GET, POST /path"`, the label used by coverage and console output.
    pub fn label(&self) -> String {
        format!("{} {}", join_methods(&self.methods), self.path)
    }
}

/// Middleware registered outside any specific route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalMiddlewareEntry {
    pub name: String,
}

impl GlobalMiddlewareEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Immutable snapshot of an application's routing state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTable {
    #[serde(default)]
    global_middleware: Vec<GlobalMiddlewareEntry>,
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(global_middleware: Vec<GlobalMiddlewareEntry>, routes: Vec<RouteEntry>) -> Self {
        Self {
            global_middleware,
            routes,
        }
    }

    pub fn global_middleware(&self) -> &[GlobalMiddlewareEntry] {
        &self.global_middleware
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Flattens the table into one probe target per method per route.
    /// Duplicate registrations are kept, so a conflicting route is probed
    /// once per registration.
    pub fn probe_targets(&self) -> Vec<ProbeTarget> {
        self.routes
            .iter()
            .flat_map(|route| {
                route.methods().iter().map(|&method| ProbeTarget {
                    method,
                    path: route.path().to_string(),
                })
            })
            .collect()
    }
}

/// A single `(method, path)` pair to exercise during a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTarget {
    pub method: HttpMethod,
    pub path: String,
}

impl ProbeTarget {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// A duplicate `(method, path)` registration. Serializes as its key, `"POST:/movies"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Conflict {
    pub method: HttpMethod,
    pub path: String,
}

impl Conflict {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.method, self.path)
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method, self.path)
    }
}

impl From<Conflict> for String {
    fn from(conflict: Conflict) -> Self {
        conflict.key()
    }
}

impl TryFrom<String> for Conflict {
    type Error = Error;

    fn try_from(key: String) -> Result<Self> {
        let (method, path) = key
            .split_once(':')
            .ok_or_else(|| Error::invalid_input(format!("Malformed conflict key: {key}")))?;
        Ok(Conflict::new(method.parse()?, path))
    }
}

/// Stable identifier of a warning category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// A sensitive route has no recognized authentication handler.
    MissingAuthentication,
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCode::MissingAuthentication => write!(f, "MISSING_AUTHENTICATION"),
        }
    }
}

/// A finding tied to a specific route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub path: String,
    pub methods: Vec<HttpMethod>,
    pub message: String,
}

impl Warning {
    pub fn missing_authentication(route: &RouteEntry) -> Self {
        Self {
            code: WarningCode::MissingAuthentication,
            path: route.path().to_string(),
            methods: route.methods().to_vec(),
            message: format!(
                "Sensitive route \"{}\" lacks authentication middleware.",
                route.path()
            ),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Middleware usage coverage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Global middleware names never referenced by any route.
    pub unused_middleware: Vec<String>,
    /// Labels (`"GET /movies"`) of routes whose only handler is the terminal one.
    pub routes_without_middleware: Vec<String>,
}

/// Aggregate of every analyzer's output; the single value passed to reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub route_table: RouteTable,
    pub conflicts: Vec<Conflict>,
    pub warnings: Vec<Warning>,
    pub coverage: CoverageReport,
}

impl AnalysisResult {
    /// True when there is nothing to report: no conflicts and no warnings.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty() && self.warnings.is_empty()
    }
}
