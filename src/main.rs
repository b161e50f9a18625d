//! Command-line front end.
//!
//! Usage:
//!   route-audit dump.json                              # Console report
//!   route-audit dump.json -o report.md                 # Also export (json, md, openapi.json, yaml)
//!   route-audit dump.json --dry-run --base-url URL     # Probe every route of a running app
//!   route-audit dump.json --ci                         # JSON summary, non-zero exit on findings

use {
    clap::Parser,
    route_audit::{
        Analyzer, Config, Error, LogFormat, Result,
        dry_run::{DryRunner, HttpProbe},
        load_route_table,
        report::{ci::CiSummary, console, export_to_file},
    },
    std::{path::PathBuf, process::ExitCode},
};

#[derive(Debug, Parser)]
#[command(
    name = "route-audit",
    version,
    about = "Audit a web application's route table for conflicts, unprotected routes and unused middleware"
)]
struct Cli {
    /// Router dump or route table (JSON)
    file: PathBuf,

    /// Export results; the format follows the extension (.json, .md, .openapi.json, .yaml)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Probe every route against a running application
    #[arg(long)]
    dry_run: bool,

    /// Base URL for --dry-run, overriding [dry_run].base_url
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Print a JSON summary and exit non-zero on conflicts or security warnings
    #[arg(long)]
    ci: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Log output format, overriding [logging].format
    #[arg(long, value_enum, value_name = "FMT")]
    log_format: Option<LogFormatArg>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LogFormatArg {
    Json,
    Default,
    Compact,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Default => LogFormat::Default,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Pretty => LogFormat::Pretty,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let ci = cli.ci;

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&e, ci);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(format) = cli.log_format {
        config = config.with_log_format(format.into());
    }
    config.validate()?;
    config.setup_tracing();

    let table = load_route_table(&cli.file)?;
    let result = Analyzer::new(config.security.clone()).analyze(table);
    let summary = CiSummary::from(&result);

    if cli.ci {
        println!("{}", summary.to_json()?);
    } else {
        print!("{}", console::render(&result));
    }

    if cli.dry_run {
        let base_url = config.dry_run.base_url().ok_or_else(|| {
            Error::config("--dry-run needs a target: pass --base-url or set [dry_run].base_url")
        })?;

        let mut runner = DryRunner::new(HttpProbe::new(base_url)?);
        if let Some(timeout) = config.dry_run.timeout {
            runner = runner.with_timeout(timeout);
        }

        let token = runner.cancellation_token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });

        let report = runner.run(&result.route_table.probe_targets()).await;
        let rendered = console::render_dry_run(&report);
        if cli.ci {
            eprint!("{rendered}");
        } else {
            print!("{rendered}");
        }
    }

    if let Some(output) = &cli.output {
        export_to_file(&result, &config.report, output)?;
        let message = format!("Results exported to {}", output.display());
        if cli.ci {
            eprintln!("{message}");
        } else {
            println!("\n{message}");
        }
    }

    Ok(if cli.ci {
        summary.exit_code()
    } else {
        ExitCode::SUCCESS
    })
}

fn print_error(error: &Error, ci: bool) {
    if ci {
        let response = error.to_error_response();
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("Error: {error}"),
        }
        return;
    }

    eprintln!("Error: {error}");
    if let Some(hint) = error.hint() {
        eprintln!("{hint}");
    }
}
