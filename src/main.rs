use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use guild_router::application::errors::BotError;
use guild_router::application::messaging::{Context, Router, SetPrefixCommand};
use guild_router::domain::entities::{Member, Message, Permissions, Role};
use guild_router::domain::traits::{ChatClient, KeyValueStore};
use guild_router::infrastructure::adapters::console::{ConsoleAdapter, Directory};
use guild_router::infrastructure::config::{Config, StorageBackend};
use guild_router::infrastructure::database::SqliteStore;
use guild_router::infrastructure::storage::{JsonStore, MemoryStore};

#[derive(Parser)]
#[command(name = "guild-router")]
#[command(about = "Prefix-based command router for chat bots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Default prefix (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            if let Err(e) = run_bot(&cli.config, cli.prefix).await {
                tracing::error!("Bot stopped: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("guild-router v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config(&cli.config) {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load_config(path: &str, prefix_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if std::path::Path::new(path).exists() {
        let mut config = Config::load(path)?;
        config.apply_env();
        config
    } else {
        tracing::warn!("Config {} not found, using defaults", path);
        Config::load_env()
    };

    if let Some(prefix) = prefix_override {
        config.bot.prefix = prefix;
    }
    config.validate()?;
    Ok(config)
}

async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, BotError> {
    let path = &config.storage.path;
    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Json => {
            let store = JsonStore::new(path);
            store.init().await?;
            Arc::new(store)
        }
        StorageBackend::Sqlite => Arc::new(SqliteStore::new(path)?),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!("Settings storage: {:?} at {}", config.storage.backend, path.display());
    Ok(store)
}

fn console_session(config: &Config) -> ConsoleAdapter {
    let console = &config.console;
    let mut directory = Directory::default();

    let mut member = Member::new(&console.group_id, &console.user_id);
    if console.administrator {
        directory.add_role(
            &console.group_id,
            Role::new("admin", Permissions::ADMINISTRATOR).with_name("Administrator"),
        );
        member = member.with_role("admin");
    }
    directory.add_member(member);

    ConsoleAdapter::new(&config.bot.user_id)
        .with_name(&config.bot.name)
        .with_directory(directory)
}

async fn run_bot(config_path: &str, prefix_override: Option<String>) -> Result<(), BotError> {
    let config = load_config(config_path, prefix_override)?;
    tracing::info!("Starting {} with default prefix {:?}", config.bot.name, config.bot.prefix);

    let store = open_store(&config).await?;
    let mut router = Router::with_prefix(&config.bot.prefix, store).await?;

    router.register_command(
        "prefix",
        "Change this server's command prefix (administrators only)",
        SetPrefixCommand,
    )?;
    router.register_command("ping", "Check that the bot is alive", |ctx: Context, msg: Message| async move {
        ctx.send(&msg.channel_id, "Pong!").await
    })?;

    let router = Arc::new(router);
    let session: Arc<dyn ChatClient> = Arc::new(console_session(&config));
    let info = session.bot_info();
    tracing::info!("Bot started: {} ({} commands)", info.name, router.registry().len());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.map_err(|e| BotError::Internal(e.to_string()))? {
        let message = Message::new(
            &config.console.user_id,
            &config.console.channel_id,
            &config.console.group_id,
            line.trim_end_matches('\r'),
        )
        .with_platform("console");

        match router.handle_message(Arc::clone(&session), message).await {
            Ok(outcome) => tracing::debug!("Dispatch: {:?}", outcome),
            Err(e) => tracing::error!("Command failed: {}", e),
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn init_config(path: &str) -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml)
        .map_err(|e| BotError::Internal(format!("Failed to write {}: {}", path, e)))?;
    println!("Wrote default config to {}", path);
    Ok(())
}
