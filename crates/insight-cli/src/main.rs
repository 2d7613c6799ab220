mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "insight",
    about = "Insight+ self-assessment tools: rate your life areas, read the report, export it",
    version,
    propagate_version = true
)]
struct Cli {
    /// Data root (default: nearest directory with .insight-plus/, else home)
    #[arg(long, global = true, env = "INSIGHT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with your name and email
    Login {
        /// Full name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Agree to receive free self-knowledge content by email
        #[arg(long)]
        consent: bool,
        /// Endpoint that receives login details (overrides config)
        #[arg(long, env = "INSIGHT_SUBMISSION_URL")]
        endpoint: Option<String>,
    },

    /// Show the logged-in user
    Whoami,

    /// Greeting, available tools and completed assessments
    Home,

    /// List the tool catalog
    Tools,

    /// Run an assessment and show its report
    Assess {
        /// Tool id (e.g. roda-vida)
        tool: String,
        /// Rating as key=value (1-10); unrated areas stay at 5
        #[arg(long = "rate", value_name = "KEY=VALUE")]
        ratings: Vec<String>,
        /// Also write the plain-text export into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,
    },

    /// List completed assessments
    History,

    /// Show the full report of a completed assessment
    Report {
        /// Position in history (default: latest)
        index: Option<usize>,
    },

    /// Write the plain-text export of a completed assessment
    Export {
        /// Position in history (default: latest)
        index: Option<usize>,
        /// Directory to write into (default: current directory)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Inspect and change configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved data root");

    let result = match cli.command {
        Commands::Login {
            name,
            email,
            consent,
            endpoint,
        } => cmd::login::run(&root, name, email, consent, endpoint, cli.json),
        Commands::Whoami => cmd::login::whoami(&root, cli.json),
        Commands::Home => cmd::home::run(&root, cli.json),
        Commands::Tools => cmd::tools::run(cli.json),
        Commands::Assess {
            tool,
            ratings,
            export,
        } => cmd::assess::run(&root, &tool, &ratings, export.as_deref(), cli.json),
        Commands::History => cmd::history::run(&root, cli.json),
        Commands::Report { index } => cmd::history::report(&root, index, cli.json),
        Commands::Export { index, out } => cmd::export::run(&root, index, out.as_deref(), cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
