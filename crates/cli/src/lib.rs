pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "tripquote",
    about = "Tripquote operator CLI",
    long_about = "Price quotation drafts, render quotation documents, and check catalog readiness.",
    after_help = "Examples:\n  tripquote price draft.json\n  tripquote render draft.json --out quotation.html\n  tripquote doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Validate a quotation draft and print its derived costs and warnings")]
    Price {
        #[arg(help = "Path to a quotation draft JSON file")]
        draft: PathBuf,
    },
    #[command(about = "Render a quotation draft into the client-facing document")]
    Render {
        #[arg(help = "Path to a quotation draft JSON file")]
        draft: PathBuf,
        #[arg(long, help = "Write the artifact to this path instead of stdout")]
        out: Option<PathBuf>,
        #[arg(long, help = "Convert to PDF when wkhtmltopdf is available")]
        pdf: bool,
    },
    #[command(about = "Fetch every catalog from the configured collaborator and print counts")]
    Catalogs,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, document pipeline, and catalog reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Price { draft } => commands::price::run(&draft),
        Command::Render { draft, out, pdf } => commands::render::run(&draft, out.as_deref(), pdf),
        Command::Catalogs => commands::catalogs::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
