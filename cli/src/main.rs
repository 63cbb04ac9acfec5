//! Terminal client for a remote todo list.

use std::io;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tasklist_core::blocking::{drive, Transport, UreqTransport};
use tasklist_core::{TodoId, TodoScreen};

mod config;
mod render;
mod shell;

#[derive(Parser, Debug)]
#[command(name = "tasklist", version, about = "Terminal client for a remote todo list")]
struct Cli {
    /// Base URL of the todo service (the collection lives at <url>/todos)
    #[arg(long, env = "TASKLIST_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Config file [default: <config dir>/tasklist/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Merge items returned by the server instead of reloading after each change
    #[arg(long, global = true)]
    merge: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the list
    List,
    /// Add a todo
    Add { title: String },
    /// Rename a todo
    Rename { id: String, title: String },
    /// Flip a todo's completion
    Toggle { id: String },
    /// Delete a todo
    Delete { id: String },
    /// Interactive session (default)
    Shell,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(cli.config.as_deref())?;
    let config = config::apply_overrides(config, cli.base_url, cli.merge);
    log::debug!("using {} ({:?} resync)", config.base_url, config.resync);

    let transport = UreqTransport::new();
    let mut screen = TodoScreen::from_config(&config);

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let stdin = io::stdin();
            shell::run(&mut screen, &transport, stdin.lock(), io::stdout())
        }
        command => run_once(&mut screen, &transport, command),
    }
}

/// Load the list, apply one action, and print the result.
fn run_once(screen: &mut TodoScreen, transport: &impl Transport, command: Command) -> anyhow::Result<()> {
    let outbound = screen.refresh();
    drive(screen, transport, outbound)?;

    let outbound = match command {
        Command::List | Command::Shell => None,
        Command::Add { title } => {
            screen.set_input(title);
            Some(screen.add()?)
        }
        Command::Rename { id, title } => {
            let id = TodoId::new(id);
            if !screen.begin_edit(&id) {
                bail!("no todo with id {id}");
            }
            screen.set_draft(title);
            Some(screen.submit_edit()?)
        }
        Command::Toggle { id } => Some(screen.toggle_complete(&TodoId::new(id))?),
        Command::Delete { id } => Some(screen.delete(&TodoId::new(id))),
    };
    if let Some(outbound) = outbound {
        drive(screen, transport, outbound)?;
    }

    print!("{}", render::render(screen));
    Ok(())
}
