//! skillradar CLI — register candidates, take local tests, export reports.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "skillradar",
    version,
    about = "Local skill tests and candidate reports"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the local data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file
    Init,

    /// Register a candidate and generate their test
    Register {
        /// Candidate name
        #[arg(long)]
        name: String,

        /// Optional contact email
        #[arg(long)]
        email: Option<String>,

        /// Skills to be tested (comma-separated, e.g. "Java,SQL")
        #[arg(long)]
        skills: String,
    },

    /// Print the questions of a generated test
    ShowTest {
        /// Test id printed by `register`
        #[arg(long)]
        test_id: String,
    },

    /// Answer and submit a test
    Take {
        /// Test id printed by `register`
        #[arg(long)]
        test_id: String,

        /// Candidate the test was generated for
        #[arg(long)]
        candidate_id: String,

        /// Answers as QUESTION=OPTION (0-based), repeatable or comma-separated
        #[arg(long = "answer", value_delimiter = ',')]
        answers: Vec<String>,
    },

    /// List locally registered candidates
    Candidates {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export a report for a local candidate
    Report {
        #[arg(long)]
        candidate_id: String,

        /// Output file (default: ./<candidate_id>.<format>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: html, json
        #[arg(long, default_value = "html")]
        format: String,
    },

    /// Export a report for a candidate from the remote API
    RemoteReport {
        #[arg(long)]
        candidate_id: String,

        /// Output file (default: ./<candidate_id>.<format>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: html, json
        #[arg(long, default_value = "html")]
        format: String,
    },

    /// List candidates known to the remote API
    RemoteCandidates,

    /// Re-render a report saved with `--format json`
    Render {
        /// Saved JSON report
        #[arg(long)]
        input: PathBuf,

        /// Output file (default: ./<candidate_id>.<format>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: html, json
        #[arg(long, default_value = "html")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("skillradar=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config_path: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Register {
            name,
            email,
            skills,
        } => commands::register::execute(&ctx, &name, email.as_deref(), &skills),
        Commands::ShowTest { test_id } => commands::take::show(&ctx, &test_id),
        Commands::Take {
            test_id,
            candidate_id,
            answers,
        } => commands::take::execute(&ctx, &test_id, &candidate_id, &answers),
        Commands::Candidates { json } => commands::candidates::execute(&ctx, json),
        Commands::Report {
            candidate_id,
            output,
            format,
        } => commands::report::local(&ctx, &candidate_id, output, &format),
        Commands::RemoteReport {
            candidate_id,
            output,
            format,
        } => commands::report::remote(&ctx, &candidate_id, output, &format).await,
        Commands::RemoteCandidates => commands::candidates::remote(&ctx).await,
        Commands::Render {
            input,
            output,
            format,
        } => commands::report::render(&input, output, &format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
