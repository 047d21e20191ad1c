//! Folio CLI - Main Entry Point
//!
//! Manages achievement claims. With a token and issuer id the claims API is
//! used; otherwise (or when the API is unreachable) claims live in a local
//! SQLite file.
//!
//! Usage:
//!     folio list
//!     folio --token $TOKEN --issuer 42 add --subject example.com/me \
//!         --type HAS_SKILL --statement "Rust" --date 2024-01-01 --stars 5
//!     folio remove 1712345678901 --yes
//!     folio export --out ./backups

mod commands;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args as ClapArgs, Parser, Subcommand};
use folio::{ClaimsService, FolioConfig, Session};
use folio_core::{HowKnown, LocalClaimStore, ProfileStore};
use folio_remote::RemoteClient;
use folio_sqlite::SqliteSlots;
use tracing::{debug, info};

use crate::commands::Context;

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Record, rate and export achievement claims")]
#[command(version)]
struct Args {
    /// Configuration file (TOML); missing file means defaults
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Claims API root (overrides config)
    #[arg(long)]
    api_url: Option<String>,

    /// SQLite file for local claims (overrides config)
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Bearer token for the claims API
    #[arg(long, env = "FOLIO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Issuer (user) id the token belongs to
    #[arg(long, env = "FOLIO_ISSUER")]
    issuer: Option<String>,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List claims
    List {
        /// Only claims about this subject
        #[arg(long)]
        subject: Option<String>,
    },
    /// Create a claim
    Add {
        #[command(flatten)]
        fields: ClaimFields,
        /// Write to local storage even when the API is available
        #[arg(long)]
        local: bool,
    },
    /// Change fields of a claim
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ClaimFields,
    },
    /// Delete a claim
    Remove {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Append claims from an export file to local storage
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the current claims to claims-YYYY-MM-DD.json
    Export {
        /// Target directory; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show rating and category statistics
    Stats,
    /// Show or change profile settings
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },
}

/// Claim fields shared by `add` and `edit`
#[derive(ClapArgs, Debug, Default)]
struct ClaimFields {
    /// Subject URI (https:// is added when missing)
    #[arg(long)]
    subject: Option<String>,
    /// Claim type, e.g. HAS_SKILL
    #[arg(long = "type")]
    claim_type: Option<String>,
    #[arg(long)]
    statement: Option<String>,
    /// Effective date, YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// Rating from 1 to 5
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    stars: Option<u8>,
    /// Explicit score in [-1, 1]; derived from stars when omitted
    #[arg(long, allow_negative_numbers = true)]
    score: Option<f64>,
    /// Category
    #[arg(long)]
    aspect: Option<String>,
    /// How the claim is known, e.g. FIRST_HAND
    #[arg(long)]
    how_known: Option<HowKnown>,
}

fn apply_overrides(config: &mut FolioConfig, args: &Args) {
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(path) = &args.storage {
        config.storage_path = path.clone();
    }
}

fn session_from(args: &Args) -> Session {
    let authenticated = args.token.is_some();
    Session::from_parts(args.token.clone(), args.issuer.clone(), authenticated)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: folio panicked");
        eprintln!(
            "  Location: {}",
            panic_info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        eprintln!(
            "  Message: {}",
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .unwrap_or(&"<no message>")
        );
    }));

    let args = Args::parse();
    folio::tracing::init_with_filter(&args.log_level);

    let mut config = FolioConfig::load_or_default(&args.config)?;
    apply_overrides(&mut config, &args);
    config.validate()?;
    debug!(?config, "resolved configuration");

    let slots = Arc::new(SqliteSlots::open(&config.storage_path)?);
    info!("Using local storage at {}", config.storage_path.display());

    let backend = RemoteClient::new(config.remote_config())?;
    let local = LocalClaimStore::with_key(slots.clone(), config.claims_key.clone());
    let service = ClaimsService::new(backend, local).with_config(&config);
    let profile = ProfileStore::with_key(slots, config.profile_key.clone());

    let mut ctx = Context {
        service,
        profile,
        session: session_from(&args),
    };

    let mut stdout = std::io::stdout().lock();
    commands::run(&mut ctx, args.command, &mut stdout).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_add() {
        let args = Args::try_parse_from([
            "folio", "add", "--subject", "example.com/me", "--type", "HAS_SKILL", "--statement",
            "Rust", "--date", "2024-01-01", "--stars", "5", "--local",
        ])
        .unwrap();

        match args.command {
            Command::Add { fields, local } => {
                assert!(local);
                assert_eq!(fields.stars, Some(5));
                assert_eq!(fields.claim_type.as_deref(), Some("HAS_SKILL"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_stars_out_of_range_rejected() {
        let result = Args::try_parse_from(["folio", "edit", "1", "--stars", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_score_accepted() {
        let args = Args::try_parse_from(["folio", "edit", "1", "--score", "-0.5"]).unwrap();
        match args.command {
            Command::Edit { id, fields } => {
                assert_eq!(id, 1);
                assert_eq!(fields.score, Some(-0.5));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_overrides_and_session() {
        let args = Args::try_parse_from([
            "folio",
            "--api-url",
            "https://claims.example.org",
            "--storage",
            "/tmp/x.db",
            "--token",
            "abc",
            "--issuer",
            "42",
            "stats",
        ])
        .unwrap();

        let mut config = FolioConfig::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config.api_base_url, "https://claims.example.org");
        assert_eq!(config.storage_path, PathBuf::from("/tmp/x.db"));

        let session = session_from(&args);
        assert!(session.is_remote_eligible(&config.local_only_token));
    }
}
