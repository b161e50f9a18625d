use {
    crate::{Error, HttpMethod, Result},
    axum::{Router, body::Body, http::Request},
    std::future::Future,
    tower::ServiceExt,
    url::Url,
};

/// Issues one request for a method and path and reports the response status.
///
/// Transport failures are returned as errors; any HTTP status, including
/// 4xx and 5xx, is a successful probe.
pub trait Probe {
    fn probe(&self, method: HttpMethod, path: &str) -> impl Future<Output = Result<u16>> + Send;
}

/// Probes an in-process [`axum::Router`] without binding a socket.
///
/// Each probe clones the router and drives it with `oneshot`, so the
/// application sees a fresh service per request.
#[derive(Clone)]
pub struct RouterProbe {
    router: Router,
}

impl RouterProbe {
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

impl Probe for RouterProbe {
    async fn probe(&self, method: HttpMethod, path: &str) -> Result<u16> {
        let request = Request::builder()
            .method(method.to_http())
            .uri(path)
            .body(Body::empty())
            .map_err(|e| Error::probe(format!("Invalid request for {path}: {e}")))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        Ok(response.status().as_u16())
    }
}

/// Probes a running server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProbe {
    /// Creates a probe for `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::invalid_input(format!("Invalid base URL \"{base_url}\": {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    /// Uses a preconfigured client (proxy, TLS roots, default headers).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins the route path onto the base URL, keeping any base path prefix.
    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Probe for HttpProbe {
    async fn probe(&self, method: HttpMethod, path: &str) -> Result<u16> {
        let response = self
            .client
            .request(method.to_http(), self.url_for(path))
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

/// A [`Probe`] backed by a closure. See [`probe_fn`].
#[derive(Clone)]
pub struct ProbeFn<F> {
    f: F,
}

/// Wraps an async closure as a [`Probe`].
///
/// ```rust
/// use route_audit::{HttpMethod, dry_run::{Probe, probe_fn}};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let probe = probe_fn(|_method: HttpMethod, path: String| async move {
///     Ok::<_, route_audit::Error>(if path == "/health" { 200 } else { 404 })
/// });
/// assert_eq!(probe.probe(HttpMethod::Get, "/health").await.unwrap(), 200);
/// # }
/// ```
pub fn probe_fn<F, Fut>(f: F) -> ProbeFn<F>
where
    F: Fn(HttpMethod, String) -> Fut,
    Fut: Future<Output = Result<u16>> + Send,
{
    ProbeFn { f }
}

impl<F, Fut> Probe for ProbeFn<F>
where
    F: Fn(HttpMethod, String) -> Fut,
    Fut: Future<Output = Result<u16>> + Send,
{
    fn probe(&self, method: HttpMethod, path: &str) -> impl Future<Output = Result<u16>> + Send {
        (self.f)(method, path.to_string())
    }
}
