//! Command-line interface parsing and handling
//!
//! `intl-console` hosts the intl preferences module on top of the in-memory
//! collaborators. Every stdin line is treated as a chat message from the
//! configured session actor; replies are printed to stdout and logs go to
//! stderr.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{all_subcommands, Services, COMMAND_NAME};
use crate::core::config::{path_display, Config, SessionChannel};
use crate::memory::{
    CatalogRenderer, ConsoleChannel, FlowHub, IanaTimezones, MemoryPreferences, TomlCatalog,
};
use crate::module::{IntlPreferencesModule, ModuleDependencies};
use crate::services::{Channel, CommandFlows, PreferenceService};

#[derive(Parser)]
#[command(name = "intl-console")]
#[command(about = "Try the intl preferences command from a terminal")]
#[command(
    long_about = "Reads chat messages from stdin, one per line, and answers the `intl` \
command as a bot would. Every line is sent by the session user configured in the \
config file or through the flags below.\n\n\
Examples:\n\
  !intl list\n\
  !intl set language ru\n\
  !intl server_set timezone Europe/Moscow\n\n\
Set RUST_LOG (e.g. RUST_LOG=debug) to see what the module does."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(short = 'c', long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// User id the messages come from
    #[arg(short = 'u', long, global = true)]
    pub user: Option<u64>,

    /// Display name of the session user
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Guild id the messages are posted in
    #[arg(short = 'g', long, global = true)]
    pub guild: Option<u64>,

    /// Send messages as direct messages instead of in a guild text channel
    #[arg(long, global = true)]
    pub dm: bool,

    /// Grant the session user the Manage Server permission
    #[arg(long, global = true)]
    pub manager: bool,

    /// Directory with extra `<code>.toml` language files
    #[arg(long = "lang-dir", global = true, value_name = "DIR")]
    pub lang_dir: Option<PathBuf>,

    /// File to persist preferences to
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read messages from stdin (default)
    Run,
    /// Write the effective configuration to the config file
    InitConfig,
}

impl Args {
    /// Layers the flags over the loaded config.
    pub fn apply(&self, config: &mut Config) {
        let session = &mut config.session;
        if let Some(user) = self.user {
            session.user_id = user;
        }
        if let Some(name) = &self.name {
            session.display_name = name.clone();
        }
        if let Some(guild) = self.guild {
            session.guild_id = guild;
        }
        if self.dm {
            session.channel = SessionChannel::Direct;
        }
        if self.manager {
            session.manage_guild = true;
        }
        if let Some(dir) = &self.lang_dir {
            config.languages_dir = Some(dir.clone());
        }
        if let Some(store) = &self.store {
            config.store_path = Some(store.clone());
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };
    let mut config = Config::load_from_path(&config_path)?;
    args.apply(&mut config);
    init_tracing(config.log_filter.as_deref());

    match args.command.unwrap_or(Commands::Run) {
        Commands::InitConfig => {
            config.save_to_path(&config_path)?;
            println!("✅ Wrote config to {}", path_display(&config_path));
            Ok(())
        }
        Commands::Run => run_console(&config).await,
    }
}

fn init_tracing(fallback: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or("info")));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("⚠️  Logging unavailable: {err}");
    }
}

fn build_catalog(config: &Config) -> Result<TomlCatalog, Box<dyn Error>> {
    let catalog = TomlCatalog::with_builtin_languages(config.default_language.clone());
    if let Some(dir) = &config.languages_dir {
        let loaded = catalog.load_dir(dir)?;
        info!(dir = %path_display(dir), loaded, "Loaded extra languages");
    }
    Ok(catalog)
}

fn build_preferences(config: &Config) -> Result<MemoryPreferences, Box<dyn Error>> {
    Ok(match &config.store_path {
        Some(path) => {
            debug!(path = %path_display(path), "Opening preference store");
            MemoryPreferences::open(path, config.default_language.clone())?
        }
        None => MemoryPreferences::new(config.default_language.clone()),
    })
}

fn print_banner(config: &Config, store: Option<&Path>) {
    let session = &config.session;
    let place = match session.channel {
        SessionChannel::Guild => format!("guild {}", session.guild_id),
        SessionChannel::Direct => "direct messages".to_string(),
    };
    let role = if session.manage_guild {
        "manager"
    } else {
        "member"
    };
    println!(
        "Talking as {} ({}, {role}) in {place}.",
        session.display_name, session.user_id
    );
    if let Some(path) = store {
        println!("Preferences are saved to {}.", path_display(path));
    }
    println!("Commands:");
    for subcommand in all_subcommands() {
        println!(
            "  {}{} {:<60} {}",
            config.prefix, COMMAND_NAME, subcommand.usage, subcommand.help
        );
    }
    println!();
}

async fn run_console(config: &Config) -> Result<(), Box<dyn Error>> {
    let catalog = Arc::new(build_catalog(config)?);
    let preferences = Arc::new(build_preferences(config)?);
    let preference_service: Arc<dyn PreferenceService> = preferences.clone();
    let services = Services {
        catalog: catalog.clone(),
        preferences: preference_service.clone(),
        renderer: Arc::new(CatalogRenderer::new(catalog, preference_service)),
        timezones: Arc::new(IanaTimezones),
    };

    let hub = Arc::new(FlowHub::new(config.prefix.clone()));
    let flows: Arc<dyn CommandFlows> = hub.clone();
    let mut module = IntlPreferencesModule::init(ModuleDependencies {
        command_flows: Some(flows),
        services,
    })?;

    print_banner(config, config.store_path.as_deref());

    let channel: Arc<dyn Channel> = Arc::new(ConsoleChannel::new());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut message_id = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        message_id += 1;
        let message = config.session.message(message_id);
        match hub.dispatch(message, &line, channel.clone()).await {
            Ok(0) => debug!(line = %line, "No handler for line"),
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Command failed"),
        }
    }

    module.unload();
    info!(
        writes = preferences.write_count(),
        "Console session finished"
    );
    Ok(())
}
