//! # SMEMO CLI
//!
//! Command-line interface for secret digests and change decisions.
//!
//! Secrets are read from stdin or from a named environment variable, never from
//! command-line arguments, so they do not show up in process listings or shell
//! history.
//!
//! ## Usage
//!
//! ```bash
//! # Print a digest for a secret
//! printf '%s' "$TOKEN" | smemo hash
//!
//! # Check a secret against a stored digest (exit status 1 on mismatch)
//! smemo verify --env TOKEN --digest '$2b$12$...'
//!
//! # Show the change decision for a secret and its stored digest
//! smemo evaluate --env TOKEN --digest '$2b$12$...'
//!
//! # Plan a resource: suppress unchanged secrets and write new digests to state
//! smemo plan --declared declared.json --state state.json --secret password
//!
//! # Print companion schema entries
//! smemo schema --attribute password --attribute api_token
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secret_memo::config::MemoConfig;
use secret_memo::memo::SecretValue;
use secret_memo::observability::init_tracing;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

mod evaluate;
mod hash;
mod plan;
mod schema;

/// Secret memo CLI
#[derive(Parser)]
#[command(name = "smemo")]
#[command(
    version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("BUILD_GIT_HASH"),
        ", built ",
        env!("BUILD_DATETIME"),
        ")"
    ),
    about = "Hash write-only secrets and detect changes without storing plaintext",
    long_about = None,
    after_help = "\
Environment:
  SECRET_MEMO_COST  bcrypt cost for new digests (4-31, default 12)
  SECRET_MEMO_MAX_VERIFY_COST
                    highest cost a stored digest may carry (4-31, default 16)
  LOG_LEVEL         ERROR, WARN, INFO, DEBUG or TRACE (default INFO)
  LOG_FORMAT        text or json (default text)
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a fresh salted digest of a secret
    Hash {
        /// Read the secret from this environment variable instead of stdin
        #[arg(long, value_name = "VAR")]
        env: Option<String>,
    },
    /// Check whether a secret matches a stored digest
    Verify {
        /// Stored digest
        #[arg(long)]
        digest: String,

        /// Read the secret from this environment variable instead of stdin
        #[arg(long, value_name = "VAR")]
        env: Option<String>,
    },
    /// Print the change decision for a secret as JSON
    Evaluate {
        /// Stored digest (omit when the secret was never hashed)
        #[arg(long, default_value = "")]
        digest: String,

        /// Read the secret from this environment variable instead of stdin
        #[arg(long, value_name = "VAR")]
        env: Option<String>,
    },
    /// Plan one resource and write updated digests back to its state file
    Plan {
        /// JSON object of declared attribute values
        #[arg(long, value_name = "PATH")]
        declared: PathBuf,

        /// JSON object of recorded state (created if missing)
        #[arg(long, value_name = "PATH")]
        state: PathBuf,

        /// Secret-bearing attribute (repeatable)
        #[arg(long = "secret", value_name = "NAME")]
        secrets: Vec<String>,

        /// Attribute compared case-insensitively (repeatable)
        #[arg(long = "case-insensitive", value_name = "NAME")]
        case_insensitive: Vec<String>,

        /// Show the plan without writing the state file
        #[arg(long)]
        dry_run: bool,
    },
    /// Print companion schema entries for secret-bearing attributes
    Schema {
        /// Secret-bearing attribute (repeatable)
        #[arg(long = "attribute", value_name = "NAME", required = true)]
        attributes: Vec<String>,
    },
}

fn main() -> Result<()> {
    // --help and --version work without a valid environment
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let config = MemoConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config)?;
    debug!(
        hash_cost = config.hash_cost,
        max_verify_cost = config.max_verify_cost,
        "Loaded configuration"
    );

    match cli.command {
        Commands::Hash { env } => hash::hash_command(&config, &read_secret(env.as_deref())?),
        Commands::Verify { digest, env } => {
            let matches = hash::verify_command(&config, &read_secret(env.as_deref())?, &digest)?;
            if !matches {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Evaluate { digest, env } => {
            evaluate::evaluate_command(&config, &read_secret(env.as_deref())?, &digest)
        }
        Commands::Plan {
            declared,
            state,
            secrets,
            case_insensitive,
            dry_run,
        } => {
            let request = plan::PlanRequest {
                declared_path: declared,
                state_path: state,
                secrets,
                case_insensitive,
                dry_run,
            };
            let failed = plan::plan_command(&config, &request)?;
            if failed > 0 {
                anyhow::bail!("{failed} secret attribute(s) could not be hashed");
            }
            Ok(())
        }
        Commands::Schema { attributes } => schema::schema_command(&attributes),
    }
}

/// Read a secret from an environment variable or stdin.
/// A single trailing newline from stdin is dropped.
fn read_secret(env: Option<&str>) -> Result<SecretValue> {
    if let Some(var) = env {
        let value = std::env::var(var)
            .with_context(|| format!("Environment variable {var} is not set"))?;
        return Ok(SecretValue::new(value));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read secret from stdin")?;
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(SecretValue::new(buffer))
}
