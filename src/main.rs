use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use radio_bot::application::client::BotClient;
use radio_bot::application::errors::BotError;
use radio_bot::domain::entities::CommandDefinition;
use radio_bot::domain::traits::{Discord, Logger, OfflineDiscord, SuggestionStore};
use radio_bot::infrastructure::config::Config;
use radio_bot::infrastructure::database::Database;
use radio_bot::infrastructure::discord::{self, SerenityDiscord};
use radio_bot::infrastructure::logging::{self, TracingLogger};
use radio_bot::infrastructure::server;
use radio_bot::infrastructure::stream::HttpStreamStatus;
use radio_bot::plugins::{Catalog, Category, Export, LoadReport, ManifestImporter, PluginLoader};
use radio_bot::routes::HttpApp;

#[derive(Parser)]
#[command(name = "radio-bot")]
#[command(about = "Discord companion bot for an internet radio station", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Bot token (overrides config and DISCORD_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot and the HTTP API
    Run,
    /// Load every plugin against an offline client and report the result
    Check,
    /// Push slash command definitions to Discord
    DeployCommands,
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Version => {
            println!("radio-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
        command => load_config(&cli.config, cli.token).and_then(|(config, found)| {
            logging::init(&config.bot.log_level);
            if !found {
                tracing::warn!("Config file {} not found, using defaults", cli.config.display());
            }
            let rt = tokio::runtime::Runtime::new()
                .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;
            rt.block_on(async move {
                match command {
                    Commands::Run => run_bot(config).await,
                    Commands::Check => check_plugins(config).await,
                    Commands::DeployCommands => deploy(config).await,
                    Commands::InitConfig | Commands::Version => Ok(()),
                }
            })
        }),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: &Path, token_override: Option<String>) -> Result<(Config, bool), BotError> {
    let (mut config, found) = Config::load_or_default(path)?;
    if let Some(token) = token_override {
        config.bot.token = Some(token);
    }
    Ok((config, found))
}

fn init_config() -> Result<(), BotError> {
    let yaml = Config::default().to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}

fn build_client(
    config: Config,
    discord: Arc<dyn Discord>,
    store: Arc<dyn SuggestionStore>,
    logger: Arc<dyn Logger>,
) -> Arc<BotClient> {
    let stream = Arc::new(HttpStreamStatus::new(config.station.stream_status_url.clone()));
    BotClient::new(config, discord, store, stream, logger)
}

async fn load_plugins(
    client: &Arc<BotClient>,
    app: &mut HttpApp,
    logger: Arc<dyn Logger>,
) -> Result<Vec<(Category, LoadReport)>, BotError> {
    logger.section("PLUGINS");
    let loader = PluginLoader::new(
        client.config.plugins.directory.clone(),
        Arc::new(ManifestImporter::builtin()),
        logger,
    );
    Ok(loader.load_all(client, app).await?)
}

async fn run_bot(config: Config) -> Result<(), BotError> {
    let token = config.token()?.to_string();
    tracing::info!("Starting radio-bot: {}", config.bot.name);

    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let store = Arc::new(Database::new(&config.database.path)?);
    tracing::info!("Database initialized at {}", config.database.path.display());

    let discord = Arc::new(SerenityDiscord::new(&token));
    let client = build_client(config, discord.clone(), store, logger.clone());

    let mut app = HttpApp::new();
    load_plugins(&client, &mut app, logger).await?;

    if client.config.api.enabled && !app.is_empty() {
        let router = app.into_router();
        let bind = client.config.api.bind;
        tokio::spawn(async move {
            if let Err(e) = server::serve(router, bind).await {
                tracing::error!("{}", e);
            }
        });
    }

    tokio::select! {
        result = discord::start_gateway(client.clone(), discord, &token) => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down..."),
    }

    client.scheduler.shutdown();
    Ok(())
}

async fn check_plugins(config: Config) -> Result<(), BotError> {
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let client = build_client(config, Arc::new(OfflineDiscord), Arc::new(Database::in_memory()?), logger.clone());

    let mut app = HttpApp::new();
    let reports = load_plugins(&client, &mut app, logger).await?;
    client.scheduler.shutdown();

    let mut failed = 0;
    for (category, report) in &reports {
        println!("{:<8} {}/{} loaded", category.directory(), report.loaded.len(), report.total);
        for file in &report.failed {
            println!("  failed: {}", file);
        }
        failed += report.failed.len();
    }
    println!("routes   {}", app.paths().join(", "));

    if failed > 0 {
        return Err(BotError::Internal(format!("{} plugin file(s) failed to load", failed)));
    }
    Ok(())
}

async fn deploy(config: Config) -> Result<(), BotError> {
    let token = config.token()?;
    let catalog = Catalog::builtin();

    let definitions: Vec<CommandDefinition> = catalog
        .keys(Category::Command)
        .iter()
        .filter_map(|key| catalog.get(Category::Command, key))
        .filter_map(|module| match &module.export {
            Some(Export::Command(handler)) => Some(handler.definition()),
            _ => None,
        })
        .collect();

    let count = discord::deploy_commands(token, config.bot.guild_id, &definitions).await?;
    match config.bot.guild_id {
        Some(guild_id) => tracing::info!("Deployed {} commands to guild {}", count, guild_id),
        None => tracing::info!("Deployed {} global commands", count),
    }
    Ok(())
}
