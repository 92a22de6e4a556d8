use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{Parser, Subcommand};

use splitter::chat::ChatSession;
use splitter::config::{paths::SplitterPaths, settings::Settings};
use splitter::display::{format_amount, render_reply};
use splitter::models::{Category, UserId};
use splitter::services::{EntryWorkflow, Reply};
use splitter::storage::Storage;

#[derive(Parser)]
#[command(
    name = "splitter",
    version,
    about = "Chat-style income ledger",
    long_about = "Type an income as '<amount> <source>', confirm it, and the income \
                  splitter records it in a local ledger split into daily expenses, \
                  investments, cushion and dream fund."
)]
struct Cli {
    /// Bot credential token (overrides the one in config.json)
    #[arg(long, global = true, env = "SPLITTER_BOT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// User the chat messages are attributed to
    #[arg(short, long, global = true, default_value = "1", env = "SPLITTER_USER")]
    user: UserId,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat,

    /// Show the latest entries and totals
    Report,

    /// Write the default configuration and create the ledger
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    splitter::logging::init_tracing();
    let cli = Cli::parse();

    let paths = SplitterPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if cli.token.is_some() {
        settings.bot_token = cli.token;
    }

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let storage = Storage::new(paths)?;
            let mut workflow = EntryWorkflow::new(&storage, &settings);

            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            if interactive {
                println!("{}", splitter::display::USAGE);
                println!();
            }

            let mut session = ChatSession::new(&mut workflow, cli.user);
            if !interactive {
                session = session.without_prompt();
            }
            session.run(stdin.lock(), io::stdout().lock())?;
        }
        Commands::Report => {
            let storage = Storage::new(paths)?;
            let workflow = EntryWorkflow::new(&storage, &settings);
            let reply = match workflow.report() {
                Ok(report) => Reply::Report(report),
                Err(e) => {
                    tracing::warn!(error = %e, "report failed");
                    Reply::ReportFailed(e)
                }
            };
            println!("{}", render_reply(&reply));
        }
        Commands::Init => {
            println!(
                "Initializing income splitter at: {}",
                paths.base_dir().display()
            );
            settings.save(&paths)?;
            Storage::new(paths.clone())?;
            println!("Initialization complete!");
            println!();
            println!("Ledger:   {}", paths.database_file().display());
            println!("Settings: {}", paths.settings_file().display());
        }
        Commands::Config => {
            println!("Income Splitter Configuration");
            println!("=============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Ledger database:  {}", paths.database_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Bot token:       {}",
                settings.masked_token().unwrap_or_else(|| "(not set)".into())
            );
            for category in Category::ALL {
                println!(
                    "  {:<16} {:>5}%",
                    format!("{}:", category.label()),
                    format_amount(settings.allocation.fraction(category) * 100.0)
                );
            }
            match settings.pending_ttl_secs {
                Some(secs) => println!("  Pending TTL:     {}s", secs),
                None => println!("  Pending TTL:     until restart"),
            }
            println!("  Report limit:    {}", settings.report_limit);

            if paths.database_file().exists() {
                let storage = Storage::new(paths)?;
                println!();
                println!("Records stored:    {}", storage.ledger.count()?);
            }
        }
    }

    Ok(())
}
