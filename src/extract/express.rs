use {
    super::{RouteTableProvider, name_or_anonymous},
    crate::{Error, GlobalMiddlewareEntry, HttpMethod, Result, RouteEntry, RouteTable},
    serde_json::Value,
};

/// Reads an Express application's layer stack.
///
/// Express 4 keeps the stack under `app._router`, Express 5 under `app.router`;
/// the layer format is the same. A layer without a `route` is global
/// middleware. Layers named `router` are mounted sub-routers and are skipped.
#[derive(Debug, Clone, Copy)]
pub struct ExpressRouterProvider {
    field: &'static str,
    name: &'static str,
}

impl ExpressRouterProvider {
    /// `_router.stack` (Express 4).
    pub fn legacy() -> Self {
        Self {
            field: "_router",
            name: "express-legacy",
        }
    }

    /// `router.stack` (Express 5).
    pub fn current() -> Self {
        Self {
            field: "router",
            name: "express",
        }
    }

    fn read_stack(&self, layers: &[Value]) -> Result<RouteTable> {
        let mut global_middleware = Vec::new();
        let mut routes = Vec::new();

        for (index, layer) in layers.iter().enumerate() {
            let name = layer.get("name").and_then(Value::as_str);
            if name == Some("router") {
                tracing::debug!(index, "Skipping mounted sub-router layer");
                continue;
            }

            match layer.get("route").filter(|route| !route.is_null()) {
                None => global_middleware.push(GlobalMiddlewareEntry::new(name_or_anonymous(
                    layer.get("name"),
                ))),
                Some(route) => {
                    if let Some(entry) = read_route(route, index)? {
                        routes.push(entry);
                    }
                }
            }
        }

        Ok(RouteTable::new(global_middleware, routes))
    }
}

impl RouteTableProvider for ExpressRouterProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, document: &Value) -> Option<Result<RouteTable>> {
        let stack = document.get(self.field)?.get("stack")?;
        Some(match stack.as_array() {
            Some(layers) => self.read_stack(layers),
            None => Err(Error::extraction(format!(
                "`{}.stack` is not an array",
                self.field
            ))),
        })
    }
}

/// Reads one route layer. Returns `Ok(None)` for a route with no verbs attached.
fn read_route(route: &Value, index: usize) -> Result<Option<RouteEntry>> {
    let path = route
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::extraction(format!("Route layer #{index} has no string path")))?;

    let methods = route
        .get("methods")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::extraction(format!("Route \"{path}\" has no methods table")))?
        .iter()
        .filter(|(_, enabled)| is_truthy(enabled))
        .map(|(method, _)| {
            method.parse::<HttpMethod>().map_err(|e| {
                Error::extraction(format!("Route \"{path}\": {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if methods.is_empty() {
        tracing::warn!(path, "Skipping route without any HTTP method");
        return Ok(None);
    }

    let handlers: Vec<String> = route
        .get("stack")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::extraction(format!("Route \"{path}\" has no handler stack")))?
        .iter()
        .map(|handler| name_or_anonymous(handler.get("name")))
        .collect();

    RouteEntry::new(path, methods, handlers)
        .map(Some)
        .map_err(|e| Error::extraction(e.to_string()))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(enabled) => *enabled,
        _ => true,
    }
}
