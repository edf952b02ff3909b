use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;

use tickety::commands;
use tickety::commands::init::{DATA_DIR, STORE_FILE};
use tickety::storage::LocalStore;

#[derive(Parser)]
#[command(name = "tickety")]
#[command(about = "An IT request and site incident tracker with local state")]
#[command(version)]
struct Cli {
    /// Data directory (defaults to a .tickety directory found by walking up
    /// from the current directory)
    #[arg(long, env = "TICKETY_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize tickety in the current directory
    Init,

    /// Log in as one of the two fixed accounts
    Login {
        /// Username
        username: String,
        /// Password
        password: String,
        /// Role to log in as (admin, user)
        #[arg(short, long)]
        role: String,
    },

    /// Log out and clear the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Submit a device/issue request (any logged-in role)
    Request {
        /// Full name of the requester
        #[arg(long)]
        name: String,
        /// Requester matricule
        #[arg(long)]
        matricule: String,
        /// Site (misfat 1, misfat 2, misfat 3)
        #[arg(long)]
        site: String,
        /// Post name (Manager, Développeur, Designer, Personnel de soutien)
        #[arg(long)]
        post: String,
        /// Problem type (imprimante étiquette, code barre, souris, écran)
        #[arg(long)]
        problem: String,
    },

    /// List tickets (admin)
    List {
        /// Filter by status (pending, done, cancelled, all)
        #[arg(short, long, default_value = "pending")]
        status: String,
    },

    /// Mark a pending ticket as done (admin)
    Done {
        /// Ticket id
        id: String,
    },

    /// Cancel a pending ticket (admin)
    Cancel {
        /// Ticket id
        id: String,
    },

    /// Reopen a done or cancelled ticket (admin)
    Reopen {
        /// Ticket id
        id: String,
    },

    /// Site incident reports (admin)
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },

    /// Export all tickets as CSV (admin)
    Export {
        /// Output file
        #[arg(short, long, default_value = "tickets.csv")]
        output: String,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// File a new incident report
    Submit {
        /// Site (misfat 1, misfat 2, misfat 3)
        #[arg(long)]
        site: String,
        /// Post name
        #[arg(long)]
        post: String,
        /// Problem summary
        #[arg(long)]
        problem: String,
        /// Operating system (windows 10, windows 11)
        #[arg(long)]
        os: String,
        /// PC type (dell intel, other)
        #[arg(long)]
        pc_type: String,
        /// Free-form description
        #[arg(long)]
        description: String,
    },
    /// List filed reports, newest first
    List,
}

fn find_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        if !dir.is_dir() {
            bail!("Data directory {} does not exist.", dir.display());
        }
        return Ok(dir);
    }

    let mut current = env::current_dir()?;
    loop {
        let candidate = current.join(DATA_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }
        if !current.pop() {
            bail!("Not a tickety directory (or any parent). Run 'tickety init' first.");
        }
    }
}

fn get_store(override_dir: Option<PathBuf>) -> Result<LocalStore> {
    let data_dir = find_data_dir(override_dir)?;
    LocalStore::open(&data_dir.join(STORE_FILE))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let cwd = env::current_dir()?;
            commands::init::run(&cwd)
        }

        Commands::Login {
            username,
            password,
            role,
        } => {
            let store = get_store(cli.data_dir)?;
            commands::login::login(&store, &username, &password, &role)
        }

        Commands::Logout => {
            let store = get_store(cli.data_dir)?;
            commands::login::logout(&store)
        }

        Commands::Whoami => {
            let store = get_store(cli.data_dir)?;
            commands::login::whoami(&store)
        }

        Commands::Request {
            name,
            matricule,
            site,
            post,
            problem,
        } => {
            let store = get_store(cli.data_dir)?;
            commands::request::run(&store, &name, &matricule, &site, &post, &problem)
        }

        Commands::List { status } => {
            let store = get_store(cli.data_dir)?;
            commands::list::run(&store, &status)
        }

        Commands::Done { id } => {
            let store = get_store(cli.data_dir)?;
            commands::status::done(&store, &id)
        }

        Commands::Cancel { id } => {
            let store = get_store(cli.data_dir)?;
            commands::status::cancel(&store, &id)
        }

        Commands::Reopen { id } => {
            let store = get_store(cli.data_dir)?;
            commands::status::reopen(&store, &id)
        }

        Commands::Report { action } => {
            let store = get_store(cli.data_dir)?;
            match action {
                ReportCommands::Submit {
                    site,
                    post,
                    problem,
                    os,
                    pc_type,
                    description,
                } => commands::report::submit(
                    &store,
                    &site,
                    &post,
                    &problem,
                    &os,
                    &pc_type,
                    &description,
                ),
                ReportCommands::List => commands::report::list(&store),
            }
        }

        Commands::Export { output } => {
            let store = get_store(cli.data_dir)?;
            commands::export::run(&store, &output)
        }
    }
}
