//! CLI administration tool for vidlink.
//!
//! Inspects what the watch page would serve and replays visitor journeys
//! against the player engine without a browser.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin vidlink-admin -- db check
//!
//! # Print the bundle the watch page receives for post 42
//! cargo run --bin vidlink-admin -- post show 42
//!
//! # Drop the cached bundle of post 42 after editing its settings
//! cargo run --bin vidlink-admin -- post invalidate 42
//!
//! # Replay a visitor: first click, a second click inside the cooldown, then expiry
//! cargo run --bin vidlink-admin -- simulate --behavior behind --url https://ads.example \
//!     --duration 60 --steps load,play,load,play,wait:61,load,play
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `db` and `post`): PostgreSQL connection string
//! - `REDIS_URL` (used by `post invalidate`): Redis connection string
//!
//! `simulate` runs fully in memory and needs no database.

use vidlink::application::services::PostService;
use vidlink::domain::entities::{RedirectBehavior, RedirectConfig};
use vidlink::domain::repositories::PostRepository;
use vidlink::config;
use vidlink::infrastructure::cache::{CacheService, NullCache, RedisCache};
use vidlink::infrastructure::persistence::{PgPostRepository, PgSettingsRepository};
use vidlink::player::storage::{MARKER_COOKIE, RETURN_TRIP_KEY, TIMESTAMP_KEY};
use vidlink::player::{
    DeviceClass, Effect, ManualClock, MemoryStorage, PageContext, PlaybackState, PlayerSession,
    Scope, Timing, VisitorEvent,
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Select;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing vidlink.
#[derive(Parser)]
#[command(name = "vidlink-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Inspect posts
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// Replay visitor events against the player engine
    Simulate(SimulateArgs),
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// Post subcommands.
#[derive(Subcommand)]
enum PostAction {
    /// Print the bundle served to the watch page
    Show {
        /// Post id
        id: i64,
    },

    /// Drop the cached bundle so the next page view reads the database
    Invalidate {
        /// Post id
        id: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BehaviorArg {
    Front,
    Behind,
    RedirectFirst,
    None,
}

impl From<BehaviorArg> for RedirectBehavior {
    fn from(arg: BehaviorArg) -> Self {
        match arg {
            BehaviorArg::Front => RedirectBehavior::Front,
            BehaviorArg::Behind => RedirectBehavior::Behind,
            BehaviorArg::RedirectFirst => RedirectBehavior::RedirectFirst,
            BehaviorArg::None => RedirectBehavior::None,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DeviceArg {
    Desktop,
    Mobile,
}

#[derive(clap::Args)]
struct SimulateArgs {
    /// Redirect behavior (prompted when omitted)
    #[arg(short, long, value_enum)]
    behavior: Option<BehaviorArg>,

    /// Direct link url
    #[arg(short, long, default_value = "https://ads.example")]
    url: String,

    /// Cooldown window in seconds
    #[arg(short, long, default_value_t = 86_400)]
    duration: u64,

    /// Visitor device
    #[arg(long, value_enum, default_value = "desktop")]
    device: DeviceArg,

    /// Other post ids of the owner, for end-of-playback routing
    #[arg(long, value_delimiter = ',', default_value = "2,3,5")]
    others: Vec<i64>,

    /// Steps: load, play, ended, wait:<secs>, close (ends the tab session)
    #[arg(short, long, value_delimiter = ',', default_value = "load,play,load,play")]
    steps: Vec<Step>,

    /// Seed for end-of-playback routing
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

/// One step of a simulated visit.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Event(VisitorEvent),
    Wait(u64),
    Close,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "load" => Ok(Step::Event(VisitorEvent::Load)),
            "play" => Ok(Step::Event(VisitorEvent::Play)),
            "ended" => Ok(Step::Event(VisitorEvent::Ended)),
            "close" => Ok(Step::Close),
            other => other
                .strip_prefix("wait:")
                .and_then(|secs| secs.parse().ok())
                .map(Step::Wait)
                .ok_or_else(|| format!("unknown step '{}'", other)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
        Commands::Post { action } => handle_post_action(action, connect().await?).await?,
        Commands::Simulate(args) => simulate(args)?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;
            let posts = PgPostRepository::new(Arc::new(pool.clone()))
                .count()
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Posts: {}", posts.to_string().bright_green().bold());
        }
    }

    Ok(())
}

/// Handles post inspection commands.
async fn handle_post_action(action: PostAction, pool: PgPool) -> Result<()> {
    match action {
        PostAction::Show { id } => {
            let service = post_service(pool, Arc::new(NullCache::new()));

            let bundle = service
                .load_bundle(id)
                .await
                .with_context(|| format!("Failed to load post {}", id))?;

            println!("{}", format!("🎬 Post {}", id).bright_blue().bold());
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        PostAction::Invalidate { id } => {
            let config = config::load_from_env()?;
            let Some(redis_url) = config.redis_url.as_deref() else {
                println!("{}", "⚠️  Cache disabled, nothing to invalidate".yellow());
                return Ok(());
            };

            let cache = RedisCache::connect(redis_url, config.cache_ttl_seconds)
                .await
                .context("Failed to connect to Redis")?;
            post_service(pool, Arc::new(cache))
                .invalidate(id)
                .await
                .with_context(|| format!("Failed to invalidate post {}", id))?;

            println!(
                "{}",
                format!("✅ Cached bundle of post {} dropped", id).green().bold()
            );
        }
    }

    Ok(())
}

fn post_service(pool: PgPool, cache: Arc<dyn CacheService>) -> PostService {
    let pool = Arc::new(pool);
    PostService::new(
        Arc::new(PgPostRepository::new(pool.clone())),
        Arc::new(PgSettingsRepository::new(pool)),
        cache,
    )
}

/// Replays `args.steps` against one in-memory browser profile.
///
/// Every `load` starts a new page view. Deferred effects fire right away after
/// the clock is advanced by their delay.
fn simulate(args: SimulateArgs) -> Result<()> {
    let behavior = match args.behavior {
        Some(behavior) => RedirectBehavior::from(behavior),
        None => prompt_behavior()?,
    };

    let page = PageContext {
        post_id: 1,
        page_url: "https://vid.example/?p=1".to_string(),
        redirect: RedirectConfig {
            enabled: behavior != RedirectBehavior::None,
            behavior,
            url: args.url.clone(),
            cookie_duration: args.duration,
        },
        other_posts: args.others.clone(),
    };
    let device = match args.device {
        DeviceArg::Desktop => DeviceClass::Desktop,
        DeviceArg::Mobile => DeviceClass::Mobile,
    };

    let clock = Arc::new(ManualClock::new(Utc::now()));
    let mut storage = MemoryStorage::new(clock.clone());
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut playback = PlaybackState::Preview;

    println!(
        "{} behavior={} url={} cooldown={}s",
        "▶ Simulating".bright_blue().bold(),
        behavior.as_str().bright_white(),
        args.url,
        args.duration
    );
    println!();

    for step in args.steps {
        match step {
            Step::Wait(secs) => {
                clock.advance(Duration::from_secs(secs));
                println!("{}", format!("⏱  wait {}s", secs).dimmed());
            }
            Step::Close => {
                storage.end_session();
                println!("{}", "✖  tab closed".dimmed());
            }
            Step::Event(event) => {
                if event == VisitorEvent::Load {
                    playback = PlaybackState::Preview;
                }

                let mut session =
                    PlayerSession::new(page.clone(), &mut storage, clock.clone(), Timing::default())
                        .with_playback(playback);

                println!("{}", format!("{:?}", event).to_lowercase().yellow().bold());
                let effects = session.handle(event, device, &mut rng);
                print_effects(&effects, 1);

                for effect in effects {
                    if let Effect::Defer { delay, action } = effect {
                        clock.advance(delay);
                        let fired = session.fire(action);
                        print_effects(&fired, 2);
                    }
                }

                playback = session.playback();
            }
        }
    }

    println!();
    println!("{}", "Stored state".bright_blue().bold());
    for (scope, key) in [
        (Scope::Cookie, MARKER_COOKIE),
        (Scope::Durable, TIMESTAMP_KEY),
        (Scope::Session, RETURN_TRIP_KEY),
    ] {
        let value = storage.peek(scope, key).unwrap_or("-");
        println!("  {:<8} {:<27} {}", scope.to_string(), key, value);
    }

    Ok(())
}

fn prompt_behavior() -> Result<RedirectBehavior> {
    let options = [
        RedirectBehavior::Front,
        RedirectBehavior::Behind,
        RedirectBehavior::RedirectFirst,
        RedirectBehavior::None,
    ];
    let labels: Vec<&str> = options.iter().map(|b| b.as_str()).collect();

    let index = Select::new()
        .with_prompt("Redirect behavior")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[index])
}

fn print_effects(effects: &[Effect], depth: usize) {
    let indent = "  ".repeat(depth);

    if effects.is_empty() {
        println!("{}{}", indent, "(nothing)".dimmed());
        return;
    }

    for effect in effects {
        let line = match effect {
            Effect::StartPlayback => "start playback".green().to_string(),
            Effect::Navigate { url } => format!("navigate → {}", url).red().to_string(),
            Effect::OpenTab { url } => format!("open tab → {}", url).cyan().to_string(),
            Effect::OpenBackgroundTab { url } => {
                format!("open background tab → {}", url).cyan().to_string()
            }
            Effect::Defer { delay, .. } => format!("after {}ms:", delay.as_millis()),
        };
        println!("{}{}", indent, line);
    }
}
