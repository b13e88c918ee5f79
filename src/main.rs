//! LaundryCanvass - AI sales intelligence for laundry-soap prospecting
//!
//! Scans an area for laundry businesses, classifies each one's street type
//! and drafts a WhatsApp opener, five leads per page.
//!
//! # Usage
//!
//! ```bash
//! # One-shot scan, first page
//! laundry-canvass "Tebet, Jakarta"
//!
//! # Interactive paging with PRO access
//! laundry-canvass "Tebet, Jakarta" --interactive --access-code $CODE
//!
//! # Machine-readable output
//! laundry-canvass "Tebet, Jakarta" --json
//! ```
//!
//! # Environment Variables
//!
//! - `GEMINI_API_KEY`: Gemini API key (leads stay unclassified without it)
//! - `SERPAPI_KEY`: SerpApi key (searches return nothing without it)
//! - `CANVASS_ACCESS_CODE`: code that unlocks PRO tier
//! - `CANVASS_CONFIG`: path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use laundry_canvass::config::{AppConfig, Secrets};
use laundry_canvass::pipeline::{ProspectingCoordinator, ScanError, SessionContext};
use laundry_canvass::types::LeadCard;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "laundry-canvass")]
#[command(about = "AI sales intelligence for laundry prospecting")]
#[command(version)]
struct CliArgs {
    /// Target area, e.g. "Tebet, Jakarta"
    location: Option<String>,

    /// Access code unlocking PRO tier for this session
    #[arg(long)]
    access_code: Option<String>,

    /// Path to a TOML config file (overrides CANVASS_CONFIG and ./canvass.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print lead cards as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep the session open and read paging commands from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(p) => AppConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(AppConfig::load()),
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn render_card(card: &LeadCard) -> String {
    let rating = if card.record.rating.is_empty() {
        String::new()
    } else {
        format!("  ⭐{}", card.record.rating)
    };

    if card.message.is_withheld() {
        return format!(
            "🔒 {}. {}{}\n   ⚠️  Prospect detected\n   🔥 Promising location (alley / residential):\n      ✅ Stable business, loyal customers\n      ✅ Low rent\n   🔓 UPGRADE TO PRO TO UNLOCK\n",
            card.position, card.record.name, rating
        );
    }

    let icon = if card.is_alley() { "💎" } else { "🏠" };
    let mut out = format!(
        "{}. {} {}{}\n   📍 {}\n   💬 {}\n",
        card.position,
        icon,
        card.record.name,
        rating,
        card.record.address,
        card.message.text().unwrap_or_default()
    );
    if card.category.is_some() {
        if let Some(copy) = card.copy_text() {
            out.push_str("   ── copy ──\n");
            for line in copy.lines() {
                out.push_str("   ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

fn print_page(session: &SessionContext, cards: &[LeadCard], json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(cards).context("Failed to serialize lead cards")?
        );
        return Ok(());
    }

    if let Some((start, end)) = session.page_bounds() {
        println!(
            "Showing {} - {} of {} ({} tier)\n",
            start,
            end,
            session.results().len(),
            session.tier()
        );
    }
    for card in cards {
        println!("{}", render_card(card));
    }

    let mut nav = Vec::new();
    if session.has_prev() {
        nav.push("[p] previous");
    }
    if session.has_next() {
        nav.push("[n] next");
    }
    if !nav.is_empty() {
        println!("{}", nav.join("   "));
    }
    Ok(())
}

async fn show_current_page(
    coordinator: &ProspectingCoordinator,
    session: &mut SessionContext,
    json: bool,
) -> Result<()> {
    let cards = coordinator.current_cards(session).await;
    print_page(session, &cards, json)
}

async fn run_scan(
    coordinator: &ProspectingCoordinator,
    session: &mut SessionContext,
    location: &str,
    json: bool,
) -> Result<()> {
    match coordinator.scan(session, location).await {
        Ok(count) => {
            if !json {
                println!("Found {count} laundries in {}!\n", location.trim());
            }
            show_current_page(coordinator, session, json).await
        }
        Err(ScanError::EmptyLocation) => {
            println!("Please enter a location first.");
            Ok(())
        }
        Err(e @ ScanError::NoResults { .. }) => {
            println!("No data found or search quota exhausted ({e}).");
            Ok(())
        }
    }
}

// ============================================================================
// Interactive Loop
// ============================================================================

const HELP: &str = "Commands: n (next)  p (previous)  s <location> (new scan)  u <code> (unlock PRO)  r (reset)  q (quit)";

async fn interactive(
    coordinator: &ProspectingCoordinator,
    session: &mut SessionContext,
    secrets: &Secrets,
    json: bool,
) -> Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));

        match cmd {
            "" => continue,
            "n" => {
                if session.next_page() {
                    show_current_page(coordinator, session, json).await?;
                } else {
                    println!("Already on the last page.");
                }
            }
            "p" => {
                if session.prev_page() {
                    show_current_page(coordinator, session, json).await?;
                } else {
                    println!("Already on the first page.");
                }
            }
            "s" => run_scan(coordinator, session, arg, json).await?,
            "u" => {
                if session.unlock(arg, secrets) {
                    println!("PRO unlocked.");
                    if session.current_batch().is_some() {
                        show_current_page(coordinator, session, json).await?;
                    }
                } else {
                    println!("Invalid access code.");
                }
            }
            "r" => {
                session.reset();
                println!("Session cleared.");
            }
            "q" => break,
            _ => println!("{HELP}"),
        }
    }

    info!(cache = %session.cache_stats(), "Session finished");
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    let config = load_config(args.config.as_ref())?;
    let secrets = Secrets::from_env();

    let coordinator = ProspectingCoordinator::from_config(&config, &secrets)
        .context("Failed to initialize HTTP clients")?;
    let mut session = SessionContext::new(config.paging.page_size);

    if let Some(code) = args.access_code.as_deref() {
        if !session.unlock(code, &secrets) {
            warn!("Access code rejected, continuing on FREE tier");
        }
    }

    if let Some(location) = args.location.as_deref() {
        run_scan(&coordinator, &mut session, location, args.json).await?;
    } else if !args.interactive {
        println!("Please enter a location, e.g. laundry-canvass \"Tebet, Jakarta\"");
        return Ok(());
    }

    if args.interactive {
        interactive(&coordinator, &mut session, &secrets, args.json).await?;
    }

    Ok(())
}
