use {
    crate::{AnalysisResult, utils::join_methods},
    std::fmt::Write,
};

/// Renders the Markdown report.
///
/// Section order is fixed: global middleware, routes, conflicts, security
/// warnings, middleware coverage. An empty section prints a sentinel line
/// instead of disappearing.
pub fn render(result: &AnalysisResult, title: &str) -> String {
    let mut md = String::new();
    // writeln! into a String cannot fail
    let _ = write_report(&mut md, result, title);
    md
}

fn write_report(md: &mut String, result: &AnalysisResult, title: &str) -> std::fmt::Result {
    let table = &result.route_table;

    writeln!(md, "# {title}")?;
    writeln!(md)?;

    writeln!(md, "## Global Middleware")?;
    writeln!(md)?;
    if table.global_middleware().is_empty() {
        writeln!(md, "No global middleware found.")?;
    } else {
        for (i, middleware) in table.global_middleware().iter().enumerate() {
            writeln!(md, "{}. {}", i + 1, middleware.name)?;
        }
    }
    writeln!(md)?;

    writeln!(md, "## Routes")?;
    writeln!(md)?;
    if table.routes().is_empty() {
        writeln!(md, "No routes found.")?;
    } else {
        for route in table.routes() {
            writeln!(
                md,
                "- **{}** {} → {}",
                join_methods(route.methods()),
                route.path(),
                route.handlers().join(" → ")
            )?;
        }
    }
    writeln!(md)?;

    writeln!(md, "## Conflicts")?;
    writeln!(md)?;
    if result.conflicts.is_empty() {
        writeln!(md, "No conflicts detected.")?;
    } else {
        for conflict in &result.conflicts {
            writeln!(md, "- {conflict}")?;
        }
    }
    writeln!(md)?;

    writeln!(md, "## Security Warnings")?;
    writeln!(md)?;
    if result.warnings.is_empty() {
        writeln!(md, "No security warnings.")?;
    } else {
        for warning in &result.warnings {
            writeln!(
                md,
                "- **{}** `{}`: {}",
                join_methods(&warning.methods),
                warning.path,
                warning.message
            )?;
        }
    }
    writeln!(md)?;

    writeln!(md, "## Middleware Coverage")?;
    writeln!(md)?;
    writeln!(md, "### Unused Global Middleware")?;
    writeln!(md)?;
    if result.coverage.unused_middleware.is_empty() {
        writeln!(md, "All global middleware is referenced by at least one route.")?;
    } else {
        for name in &result.coverage.unused_middleware {
            writeln!(md, "- {name}")?;
        }
    }
    writeln!(md)?;
    writeln!(md, "### Routes Without Middleware")?;
    writeln!(md)?;
    if result.coverage.routes_without_middleware.is_empty() {
        writeln!(md, "Every route has per-route middleware.")?;
    } else {
        for label in &result.coverage.routes_without_middleware {
            writeln!(md, "- {label}")?;
        }
    }

    Ok(())
}
