use crate::config::RouterConfig;
use crate::history::History;
use crate::router::{LintSeverity, NavigationEvent, NavigationKind, NavigationState, Resolved, Router};
use crate::view::ViewId;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

/// Command-line interface for keepsake-router
#[derive(Parser)]
#[command(name = "keepsake-router", version)]
#[command(about = "Inspect and exercise keepsake route tables", long_about = None)]
pub struct Cli {
    /// Log level for diagnostics written to stderr
    #[arg(long, global = true, env = "KEEPSAKE_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the route table in match order
    Routes {
        /// Route table file (TOML, YAML or JSON); defaults to the keepsake table
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Resolve paths against the table without navigating
    Resolve {
        /// Route table file (TOML, YAML or JSON); defaults to the keepsake table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print one JSON object per path
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Paths to resolve, e.g. /listen/42
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Validate the table and report shadowed routes
    Lint {
        /// Route table file (TOML, YAML or JSON); defaults to the keepsake table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit with an error if any warning is reported
        #[arg(long, default_value_t = false)]
        deny_warnings: bool,
    },
    /// Run a navigation session and print the state after each step
    Replay {
        /// Route table file (TOML, YAML or JSON); defaults to the keepsake table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print one JSON object per step
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Steps: push:/path (or /path), replace:/path, back, forward, go:N
        #[arg(required = true)]
        steps: Vec<Step>,
    },
}

/// One step of a replayed navigation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `push:/path` or a bare `/path`: navigate to a new entry
    Push(String),
    /// `replace:/path`: overwrite the current entry
    Replace(String),
    /// `back`: one entry back
    Back,
    /// `forward`: one entry forward
    Forward,
    /// `go:N`: move N entries, negative for backwards
    Go(isize),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back" => return Ok(Step::Back),
            "forward" => return Ok(Step::Forward),
            _ => {}
        }
        if s.starts_with('/') {
            return Ok(Step::Push(s.to_string()));
        }
        match s.split_once(':') {
            Some(("push", path)) => Ok(Step::Push(path.to_string())),
            Some(("replace", path)) => Ok(Step::Replace(path.to_string())),
            Some(("go", delta)) => delta
                .parse()
                .map(Step::Go)
                .map_err(|_| format!("invalid go delta '{delta}'")),
            _ => Err(format!(
                "invalid step '{s}' (expected push:/path, replace:/path, back, forward or go:N)"
            )),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Push(path) => write!(f, "push:{path}"),
            Step::Replace(path) => write!(f, "replace:{path}"),
            Step::Back => write!(f, "back"),
            Step::Forward => write!(f, "forward"),
            Step::Go(delta) => write!(f, "go:{delta}"),
        }
    }
}

fn load_config(config: Option<&Path>) -> Result<RouterConfig> {
    let config = match config {
        Some(path) => RouterConfig::load(path)?,
        None => RouterConfig::keepsake(),
    };
    Ok(config.with_env_overrides())
}

fn params_json(resolved: &Resolved<ViewId>) -> Value {
    let map: Map<String, Value> = resolved
        .params
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
        .collect();
    Value::Object(map)
}

fn params_text(resolved: &Resolved<ViewId>) -> String {
    resolved
        .params
        .iter()
        .map(|(k, v)| format!(" {k}={v}"))
        .collect()
}

/// Execute a parsed command, writing results to `out`
pub fn run_cli(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Commands::Routes { config } => {
            let table = load_config(config.as_deref())?
                .build_table()
                .context("Invalid route table")?;
            write!(out, "{table}")?;
            Ok(())
        }
        Commands::Resolve { config, json, paths } => {
            let router = load_config(config.as_deref())?.build_router()?;
            for path in paths {
                resolve_one(&router, path, *json, out)?;
            }
            Ok(())
        }
        Commands::Lint {
            config,
            deny_warnings,
        } => {
            let config = load_config(config.as_deref())?;
            let table = match config.build_table() {
                Ok(table) => table,
                Err(err) => {
                    writeln!(out, "[error] {err}")?;
                    bail!("route table is invalid");
                }
            };

            let issues = table.lint();
            for issue in issues {
                write!(
                    out,
                    "[{}] {} {}: {}",
                    issue.severity, issue.location, issue.kind, issue.message
                )?;
                match &issue.suggestion {
                    Some(suggestion) => writeln!(out, " (suggestion: {suggestion})")?,
                    None => writeln!(out)?,
                }
            }

            let warnings = issues
                .iter()
                .filter(|i| i.severity == LintSeverity::Warning)
                .count();
            writeln!(out, "{} route(s), {} issue(s)", table.len(), issues.len())?;
            if *deny_warnings && warnings > 0 {
                bail!("{warnings} warning(s) reported");
            }
            Ok(())
        }
        Commands::Replay {
            config,
            json,
            steps,
        } => replay(&load_config(config.as_deref())?, steps, *json, out),
    }
}

fn resolve_one<H: History>(
    router: &Router<ViewId, H>,
    path: &str,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let result = router.resolve(path);
    match (json, result) {
        (true, Ok(resolved)) => writeln!(
            out,
            "{}",
            json!({
                "path": path,
                "view": resolved.view,
                "pattern": resolved.pattern.as_ref(),
                "name": resolved.name.as_deref(),
                "params": params_json(&resolved),
            })
        )?,
        (true, Err(err)) => writeln!(out, "{}", json!({ "path": path, "error": err.to_string() }))?,
        (false, Ok(resolved)) => writeln!(
            out,
            "{path} -> {} ({}){}",
            resolved.view,
            resolved.pattern,
            params_text(&resolved)
        )?,
        (false, Err(err)) => writeln!(out, "{path} -> {err}")?,
    }
    Ok(())
}

fn replay(config: &RouterConfig, steps: &[Step], json: bool, out: &mut dyn Write) -> Result<()> {
    let mut router = config.build_router()?;

    let activations: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&activations);
    router.on_navigate(move |event: &NavigationEvent<'_, ViewId>| {
        let view = event
            .to
            .view()
            .map_or_else(|| "<not found>".to_string(), ToString::to_string);
        let kind = match event.kind {
            NavigationKind::Push => "push".to_string(),
            NavigationKind::Replace => "replace".to_string(),
            NavigationKind::Traverse { delta } => format!("traverse {delta:+}"),
        };
        sink.borrow_mut()
            .push(format!("{kind}: {} -> {view}", event.from));
    });

    for (i, step) in steps.iter().enumerate() {
        let (outcome, error) = match step {
            Step::Push(path) => match router.navigate(path) {
                Ok(()) => ("navigated".to_string(), None),
                Err(err) => ("navigated".to_string(), Some(err.to_string())),
            },
            Step::Replace(path) => match router.replace(path) {
                Ok(()) => ("replaced".to_string(), None),
                Err(err) => ("replaced".to_string(), Some(err.to_string())),
            },
            Step::Back => (moved_text(router.back()), None),
            Step::Forward => (moved_text(router.forward()), None),
            Step::Go(delta) => (format!("moved {}", router.go(*delta)), None),
        };

        let state = router.current();
        let activated: Vec<String> = activations.borrow_mut().drain(..).collect();
        if json {
            writeln!(
                out,
                "{}",
                json!({
                    "step": step.to_string(),
                    "outcome": outcome,
                    "error": error,
                    "location": state.location().to_string(),
                    "view": state.view(),
                    "params": state.resolved().map_or(Value::Null, params_json),
                    "activated": activated,
                    "can_go_back": router.can_go_back(),
                    "can_go_forward": router.can_go_forward(),
                })
            )?;
        } else {
            writeln!(out, "[{}] {step}: {outcome}", i + 1)?;
            for line in &activated {
                writeln!(out, "    activate {line}")?;
            }
            if let Some(error) = &error {
                writeln!(out, "    error: {error}")?;
            }
            writeln!(out, "    now at {}", describe(state))?;
        }
    }
    Ok(())
}

fn moved_text(moved: bool) -> String {
    if moved {
        "moved".to_string()
    } else {
        "at history boundary".to_string()
    }
}

fn describe(state: &NavigationState<ViewId>) -> String {
    match state.resolved() {
        Some(resolved) => format!(
            "{} => {}{}",
            state.location(),
            resolved.view,
            params_text(resolved)
        ),
        None => format!("{} => <not found>", state.location()),
    }
}
