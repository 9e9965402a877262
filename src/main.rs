use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stepform::cli::{
    handle_check_command, handle_config_command, handle_fill_command, handle_forms_command,
    handle_init_command, handle_password_command, handle_show_command,
    handle_submissions_command, CheckArgs, FillArgs,
};
use stepform::config::{Settings, StepformPaths};

#[derive(Parser)]
#[command(
    name = "stepform",
    version,
    about = "Multi-step registration forms in the terminal",
    long_about = "stepform walks you through multi-step registration forms one field \
                  at a time, validating each step before moving on and submitting \
                  the collected answers at the end."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available forms
    Forms,

    /// Show the steps and fields of a form
    Show {
        /// Form name
        form: String,
        /// Load the form definition from a JSON or YAML file
        #[arg(short, long)]
        definition: Option<std::path::PathBuf>,
    },

    /// Fill in a form interactively
    Fill(FillArgs),

    /// Validate answers from a file, and optionally submit them
    Check(CheckArgs),

    /// Check a password against the strength requirements
    Password {
        /// Password to check (prompted for without echo when omitted)
        value: Option<String>,
    },

    /// List stored submissions
    #[command(alias = "subs")]
    Submissions {
        /// Number of submissions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Show one submission in full
        #[arg(short, long)]
        show: Option<String>,
    },

    /// Create the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STEPFORM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Initialize paths and settings
    let paths = StepformPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Forms) => handle_forms_command(&paths)?,
        Some(Commands::Show { form, definition }) => {
            handle_show_command(&form, definition.as_deref(), &paths, &settings)?
        }
        Some(Commands::Fill(args)) => handle_fill_command(args, &paths, &settings)?,
        Some(Commands::Check(args)) => handle_check_command(args, &paths, &settings)?,
        Some(Commands::Password { value }) => handle_password_command(value)?,
        Some(Commands::Submissions { limit, show }) => {
            handle_submissions_command(&paths, limit, show.as_deref())?
        }
        Some(Commands::Init) => handle_init_command(&paths, &settings)?,
        Some(Commands::Config) => handle_config_command(&paths, &settings)?,
        None => {
            println!("stepform - multi-step registration forms");
            println!();
            println!("Run 'stepform --help' for usage information.");
            println!("Run 'stepform forms' to see the available forms.");
        }
    }

    Ok(())
}
