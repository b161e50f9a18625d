//! OpenAPI 3.0.3 generation.
//!
//! The document is assembled as a `serde_json::Map` so path and operation
//! order follow the route table. Express path parameters (`/users/:id`) are
//! rewritten to OpenAPI templates (`/users/{id}`) and declared as required
//! string parameters on the path item.

use {
    crate::{AnalysisResult, HttpMethod, ReportConfig, Result, RouteEntry, extract::ANONYMOUS},
    serde_json::{Map, Value, json},
    std::collections::HashSet,
};

const OPENAPI_VERSION: &str = "3.0.3";

/// Methods an `ALL` registration expands to.
const ALL_FANOUT: [HttpMethod; 5] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Patch,
    HttpMethod::Delete,
];

/// Builds the OpenAPI document for `result`.
pub fn document(result: &AnalysisResult, report: &ReportConfig) -> Value {
    let mut paths = Map::new();
    let mut operation_ids = HashSet::new();

    for route in result.route_table.routes() {
        let (template, params) = to_openapi_path(route.path());

        let item = paths
            .entry(template.clone())
            .or_insert_with(|| path_item(&params));
        let Value::Object(item) = item else {
            continue;
        };

        for method in expand(route.methods()) {
            let Some(slot) = operation_slot(method) else {
                tracing::debug!(path = route.path(), %method, "No OpenAPI slot, skipping");
                continue;
            };
            if item.contains_key(slot) {
                // first registration wins
                continue;
            }
            let id = operation_id(route, slot, &template, &mut operation_ids);
            item.insert(slot.to_string(), operation(route, method, id));
        }
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": report.title,
            "version": report.version,
        },
        "paths": paths,
    })
}

pub fn render_json(result: &AnalysisResult, report: &ReportConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(&document(result, report))?)
}

pub fn render_yaml(result: &AnalysisResult, report: &ReportConfig) -> Result<String> {
    Ok(serde_yaml::to_string(&document(result, report))?)
}

fn expand(methods: &[HttpMethod]) -> Vec<HttpMethod> {
    let mut expanded = Vec::new();
    for &method in methods {
        let fanout: &[HttpMethod] = match method {
            HttpMethod::All => &ALL_FANOUT,
            _ => std::slice::from_ref(&method),
        };
        for &m in fanout {
            if !expanded.contains(&m) {
                expanded.push(m);
            }
        }
    }
    expanded
}

fn operation_slot(method: HttpMethod) -> Option<&'static str> {
    match method {
        HttpMethod::Get => Some("get"),
        HttpMethod::Post => Some("post"),
        HttpMethod::Put => Some("put"),
        HttpMethod::Patch => Some("patch"),
        HttpMethod::Delete => Some("delete"),
        HttpMethod::Head => Some("head"),
        HttpMethod::Options => Some("options"),
        HttpMethod::Trace => Some("trace"),
        HttpMethod::Connect | HttpMethod::All => None,
    }
}

/// Rewrites `/users/:id` to `/users/{id}` and returns the parameter names.
///
/// Every `:name` is rewritten, including several in one segment
/// (`/flights/:from-:to` → `/flights/{from}-{to}`). A `:` not followed by a
/// name is kept as is.
fn to_openapi_path(path: &str) -> (String, Vec<String>) {
    let mut params = Vec::new();
    let mut template = String::with_capacity(path.len() + 2);
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ':' {
            template.push(c);
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if !(next.is_ascii_alphanumeric() || next == '_') {
                break;
            }
            name.push(next);
            chars.next();
        }
        if name.is_empty() {
            template.push(':');
            continue;
        }
        template.push('{');
        template.push_str(&name);
        template.push('}');
        if !params.contains(&name) {
            params.push(name);
        }
    }
    (template, params)
}

fn path_item(params: &[String]) -> Value {
    let mut item = Map::new();
    if !params.is_empty() {
        let parameters: Vec<Value> = params
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "in": "path",
                    "required": true,
                    "schema": { "type": "string" },
                })
            })
            .collect();
        item.insert("parameters".into(), Value::Array(parameters));
    }
    Value::Object(item)
}

fn operation(route: &RouteEntry, method: HttpMethod, operation_id: String) -> Value {
    let mut op = Map::new();
    op.insert("operationId".into(), Value::String(operation_id));
    op.insert(
        "description".into(),
        Value::String(format!("Handlers: {}", route.handlers().join(" → "))),
    );
    if matches!(
        method,
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch
    ) {
        op.insert(
            "requestBody".into(),
            json!({
                "content": {
                    "application/json": {
                        "schema": { "type": "object" }
                    }
                }
            }),
        );
    }
    op.insert(
        "responses".into(),
        json!({
            "200": { "description": "Successful response" },
            "default": { "description": "Unexpected error" },
        }),
    );
    Value::Object(op)
}

fn operation_id(
    route: &RouteEntry,
    slot: &str,
    template: &str,
    taken: &mut HashSet<String>,
) -> String {
    let handler = route.terminal_handler();
    if handler != ANONYMOUS && taken.insert(handler.to_string()) {
        return handler.to_string();
    }

    let base = derived_operation_id(slot, template);
    let mut candidate = base.clone();
    let mut n = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{base}{n}");
        n += 1;
    }
    candidate
}

/// `get` + `/users/{id}/posts` → `getUsersIdPosts`
fn derived_operation_id(slot: &str, template: &str) -> String {
    let mut id = slot.to_string();
    for word in template
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            id.push(first.to_ascii_uppercase());
            id.extend(chars);
        }
    }
    if id == slot {
        id.push_str("Root");
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Analyzer, RouteTable};

    fn doc(routes: Vec<RouteEntry>) -> Value {
        let result = Analyzer::default().analyze(RouteTable::new(vec![], routes));
        document(&result, &ReportConfig::default())
    }

    #[test]
    fn test_info_and_version() {
        let result = Analyzer::default().analyze(RouteTable::default());
        let report = ReportConfig {
            title: "Movies API".into(),
            version: "2.0.0".into(),
        };
        let value = document(&result, &report);
        assert_eq!(value["openapi"], "3.0.3");
        assert_eq!(value["info"]["title"], "Movies API");
        assert_eq!(value["info"]["version"], "2.0.0");
        assert!(value["paths"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_path_params_rewritten() {
        let value = doc(vec![
            RouteEntry::new("/users/:userId/posts/:id", [HttpMethod::Get], ["getPost"]).unwrap(),
        ]);
        let item = &value["paths"]["/users/{userId}/posts/{id}"];
        assert_eq!(item["parameters"][0]["name"], "userId");
        assert_eq!(item["parameters"][1]["name"], "id");
        assert_eq!(item["parameters"][1]["in"], "path");
        assert_eq!(item["parameters"][1]["required"], true);
        assert_eq!(item["get"]["operationId"], "getPost");
    }

    #[test]
    fn test_compound_segments_keep_every_param() {
        assert_eq!(
            to_openapi_path("/flights/:from-:to"),
            ("/flights/{from}-{to}".to_string(), vec!["from".into(), "to".into()])
        );
        assert_eq!(
            to_openapi_path("/files/:file.:ext"),
            ("/files/{file}.{ext}".to_string(), vec!["file".into(), "ext".into()])
        );
        assert_eq!(
            to_openapi_path("/users/:id.json"),
            ("/users/{id}.json".to_string(), vec!["id".into()])
        );
        assert_eq!(to_openapi_path("/a/:/b"), ("/a/:/b".to_string(), vec![]));
    }

    #[test]
    fn test_compound_route_does_not_shadow_simple_route() {
        let value = doc(vec![
            RouteEntry::new("/flights/:from-:to", [HttpMethod::Get], ["range"]).unwrap(),
            RouteEntry::new("/flights/:from", [HttpMethod::Get], ["one"]).unwrap(),
        ]);
        let paths: Vec<_> = value["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(paths, vec!["/flights/{from}-{to}", "/flights/{from}"]);
        assert_eq!(value["paths"]["/flights/{from}-{to}"]["get"]["operationId"], "range");
        assert_eq!(value["paths"]["/flights/{from}"]["get"]["operationId"], "one");
        assert_eq!(
            value["paths"]["/flights/{from}-{to}"]["parameters"][1]["name"],
            "to"
        );
    }

    #[test]
    fn test_first_registration_wins() {
        let value = doc(vec![
            RouteEntry::new("/movies", [HttpMethod::Post], ["createMovie"]).unwrap(),
            RouteEntry::new("/movies", [HttpMethod::Post], ["createAnotherMovie"]).unwrap(),
        ]);
        assert_eq!(value["paths"]["/movies"]["post"]["operationId"], "createMovie");
        assert!(value["paths"]["/movies"]["post"]["requestBody"].is_object());
    }

    #[test]
    fn test_all_fans_out_and_connect_omitted() {
        let value = doc(vec![
            RouteEntry::new("/any", [HttpMethod::All], ["anything"]).unwrap(),
            RouteEntry::new("/tunnel", [HttpMethod::Connect], ["tunnel"]).unwrap(),
        ]);
        let methods: Vec<_> = value["paths"]["/any"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(methods, vec!["get", "post", "put", "patch", "delete"]);
        assert!(value["paths"]["/tunnel"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_paths_and_methods_in_table_order() {
        let value = doc(vec![
            RouteEntry::new("/zeta", [HttpMethod::Delete, HttpMethod::Get], ["zeta"]).unwrap(),
            RouteEntry::new("/alpha", [HttpMethod::Get], ["alpha"]).unwrap(),
        ]);
        let paths: Vec<_> = value["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(paths, vec!["/zeta", "/alpha"]);
        let methods: Vec<_> = value["paths"]["/zeta"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(methods, vec!["delete", "get"]);
    }

    #[test]
    fn test_operation_id_fallbacks() {
        let value = doc(vec![
            RouteEntry::new("/users/:id", [HttpMethod::Get], [ANONYMOUS]).unwrap(),
            RouteEntry::new("/items", [HttpMethod::Get, HttpMethod::Delete], ["items"]).unwrap(),
            RouteEntry::new("/", [HttpMethod::Get], [ANONYMOUS]).unwrap(),
        ]);
        assert_eq!(value["paths"]["/users/{id}"]["get"]["operationId"], "getUsersId");
        assert_eq!(value["paths"]["/items"]["get"]["operationId"], "items");
        assert_eq!(value["paths"]["/items"]["delete"]["operationId"], "deleteItems");
        assert_eq!(value["paths"]["/"]["get"]["operationId"], "getRoot");
    }

    #[test]
    fn test_get_has_no_request_body() {
        let value = doc(vec![
            RouteEntry::new("/movies", [HttpMethod::Get], ["list"]).unwrap(),
        ]);
        let op = &value["paths"]["/movies"]["get"];
        assert!(op.get("requestBody").is_none());
        assert_eq!(op["responses"]["200"]["description"], "Successful response");
        assert!(op["responses"]["default"].is_object());
    }

    #[test]
    fn test_yaml_rendering() {
        let result = Analyzer::default().analyze(RouteTable::new(
            vec![],
            vec![RouteEntry::new("/movies/:id", [HttpMethod::Get], ["getMovie"]).unwrap()],
        ));
        let yaml = render_yaml(&result, &ReportConfig::default()).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed["openapi"].as_str(), Some("3.0.3"));
        assert_eq!(
            parsed["paths"]["/movies/{id}"]["get"]["operationId"].as_str(),
            Some("getMovie")
        );
    }
}
