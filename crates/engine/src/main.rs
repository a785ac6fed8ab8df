//! Talemaster quick-roll tool.
//!
//! Rolls dice, resolves ability checks and rolls ability scores from the
//! command line, printing JSON on stdout. Logs go to stderr.

use anyhow::Context;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use talemaster_domain::QuickDie;
use talemaster_engine::infrastructure::config::DiceConfig;
use talemaster_engine::use_cases::AbilityRollSession;
use talemaster_engine::App;

const USAGE: &str = "Usage: talemaster <command>

Commands:
  roll <expr> [--modifier N]           Roll a dice expression, e.g. 2d6+3
  check <expr> --dc N [--modifier N]   Resolve an ability check
  quick <d6|d20|4|8|10|12|100>         Roll a single die
  abilities                            Roll 3d6 for each ability";

fn main() -> anyhow::Result<()> {
    load_dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talemaster_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let app = App::new(DiceConfig::from_env());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.first().map(String::as_str) {
        Some("roll") => {
            let expr = positional(&args, "roll")?;
            let modifier = flag_value(&args, "--modifier")?.unwrap_or(0);
            let outcome = app.dice.evaluate_str(expr, modifier)?;
            json!({
                "outcome": outcome,
                "breakdown": outcome.breakdown(),
            })
        }
        Some("check") => {
            let expr = positional(&args, "check")?;
            let modifier = flag_value(&args, "--modifier")?.unwrap_or(0);
            let difficulty =
                flag_value(&args, "--dc")?.context("check requires --dc <difficulty>")?;
            let result = app.dice.resolve_str(expr, modifier, difficulty)?;
            json!({
                "result": result,
                "summary": result.summary(),
            })
        }
        Some("quick") => {
            let die: QuickDie = positional(&args, "quick")?.parse()?;
            json!({
                "die": die.to_string(),
                "value": app.dice.quick_roll(die),
            })
        }
        Some("abilities") => {
            let mut session = AbilityRollSession::new();
            let rolled = session.roll(&app.dice)?;
            let breakdowns: serde_json::Map<String, serde_json::Value> = rolled
                .outcomes()
                .iter()
                .map(|(ability, outcome)| (ability.code().to_string(), outcome.breakdown().into()))
                .collect();
            json!({
                "scores": rolled.scores(),
                "total": rolled.scores().total(),
                "rating": rolled.rating(),
                "rolls": breakdowns,
            })
        }
        Some(cmd) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        None => anyhow::bail!(USAGE),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// The argument right after the command name.
fn positional<'a>(args: &'a [String], command: &str) -> anyhow::Result<&'a str> {
    args.get(1)
        .filter(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .with_context(|| format!("{command} requires an argument\n\n{USAGE}"))
}

fn flag_value(args: &[String], flag: &str) -> anyhow::Result<Option<i32>> {
    let Some(pos) = args.iter().position(|arg| arg == flag) else {
        return Ok(None);
    };
    let raw = args
        .get(pos + 1)
        .with_context(|| format!("{flag} requires a value"))?;
    let value = raw
        .parse::<i32>()
        .with_context(|| format!("{flag} expects an integer, got '{raw}'"))?;
    Ok(Some(value))
}

fn load_dotenv() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides; the working directory wins over the repo root.
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    dirs.push(repo_root);

    for dir in dirs {
        for filename in [".env.local", ".env"] {
            let path = dir.join(filename);
            if path.exists() {
                let _ = dotenvy::from_path(path);
            }
        }
    }
}
