//! Plain text renderer for terminal output.
//!
//! Produces the human-readable listing printed by the CLI: global
//! middleware, routes with their handler chains, then the findings.

use crate::{AnalysisResult, dry_run::DryRunReport, dry_run::ProbeOutcome};

/// Render an analysis result for terminal display.
pub fn render(result: &AnalysisResult) -> String {
    let table = &result.route_table;
    let mut out = String::with_capacity(2048);

    out.push_str(&format!(
        "\nGlobal Middleware ({})\n",
        table.global_middleware().len()
    ));
    out.push_str(&"-".repeat(30));
    out.push('\n');
    if table.global_middleware().is_empty() {
        out.push_str("No global middleware found.\n");
    } else {
        for (i, middleware) in table.global_middleware().iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, middleware.name));
        }
    }

    out.push_str(&format!("\nRoutes ({})\n", table.routes().len()));
    out.push_str(&"-".repeat(30));
    out.push('\n');
    if table.routes().is_empty() {
        out.push_str("No routes found.\n");
    }
    for route in table.routes() {
        let methods: Vec<String> = route
            .methods()
            .iter()
            .map(|m| format!("[{m}]"))
            .collect();
        out.push_str(&format!(
            "{} {} → {}\n",
            methods.join(" "),
            route.path(),
            route.handlers().join(" → ")
        ));
    }

    if result.conflicts.is_empty() {
        out.push_str("\nNo route conflicts detected.\n");
    } else {
        out.push_str(&format!(
            "\nRoute Conflicts Detected ({})\n",
            result.conflicts.len()
        ));
        for conflict in &result.conflicts {
            out.push_str(&format!("- {conflict}\n"));
        }
    }

    if !result.warnings.is_empty() {
        out.push_str(&format!("\nSecurity Warnings ({})\n", result.warnings.len()));
        for warning in &result.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
    }

    let coverage = &result.coverage;
    if !coverage.unused_middleware.is_empty() {
        out.push_str("\nUnused Global Middleware\n");
        for name in &coverage.unused_middleware {
            out.push_str(&format!("- {name}\n"));
        }
    }
    if !coverage.routes_without_middleware.is_empty() {
        out.push_str("\nRoutes Without Middleware\n");
        for label in &coverage.routes_without_middleware {
            out.push_str(&format!("- {label}\n"));
        }
    }

    out
}

/// One line per probe: `PASS [GET] /movies → Status: 200`.
pub fn render_outcome(outcome: &ProbeOutcome) -> String {
    let verdict = if outcome.ok { "PASS" } else { "FAIL" };
    match (&outcome.status, &outcome.error) {
        (_, Some(error)) => format!(
            "{verdict} [{}] {} → Error: {error}",
            outcome.method, outcome.path
        ),
        (Some(status), None) => format!(
            "{verdict} [{}] {} → Status: {status}",
            outcome.method, outcome.path
        ),
        (None, None) => format!("{verdict} [{}] {}", outcome.method, outcome.path),
    }
}

/// Render a complete dry run, including a trailing summary.
pub fn render_dry_run(report: &DryRunReport) -> String {
    let mut out = format!(
        "\nDry run ({} probes)\n{}\n",
        report.outcomes.len(),
        "-".repeat(30)
    );
    for outcome in &report.outcomes {
        out.push_str(&render_outcome(outcome));
        out.push('\n');
    }
    if report.cancelled {
        out.push_str("Dry run cancelled before all routes were probed.\n");
    }
    out.push_str(&format!(
        "\nDry run complete: {} passed, {} failed.\n",
        report.passed(),
        report.failed()
    ));
    out
}
