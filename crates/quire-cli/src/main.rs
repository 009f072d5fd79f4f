//! quire CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{EngineArgs, OutputFormat};

#[derive(Parser)]
#[command(name = quire::LIB_NAME)]
#[command(version = quire::VERSION)]
#[command(about = "Read, edit and generate INI files without losing comments", long_about = None)]
struct Cli {
    /// Directory substituted for _BASEDIR_ (defaults to the current directory)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Fail when a diagnostic cannot be reported
    #[arg(long, global = true)]
    strict_sink: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every value in a file
    Dump {
        /// INI file to read
        file: PathBuf,

        /// Group values by [section] headers
        #[arg(long)]
        headers: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Ini)]
        format: OutputFormat,
    },

    /// Print one value
    Get {
        file: PathBuf,
        key: String,

        /// Read the key from this section (enables headers)
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Set one value, keeping the rest of the file intact
    Set {
        file: PathBuf,
        key: String,
        value: String,

        /// Write the key into this section (enables headers)
        #[arg(short, long)]
        section: Option<String>,
    },

    /// Write a new file, replacing any existing one
    Create {
        file: PathBuf,

        /// First comment line
        #[arg(long, default_value = "")]
        title: String,

        /// Second comment line
        #[arg(long, default_value = "")]
        subtitle: String,

        /// Initial value (SECTION.KEY=VALUE, or KEY=VALUE for no section)
        #[arg(long = "set", value_name = "SECTION.KEY=VALUE")]
        values: Vec<String>,
    },

    /// Remove everything except the title and subtitle comments
    Clear { file: PathBuf },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quire=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let engine = EngineArgs {
        base_dir: cli.base_dir,
        strict_sink: cli.strict_sink,
    };

    match cli.command {
        Commands::Dump {
            file,
            headers,
            format,
        } => commands::dump::execute(commands::dump::DumpArgs {
            engine,
            file,
            headers,
            format,
        }),
        Commands::Get { file, key, section } => {
            commands::get::execute(commands::get::GetArgs {
                engine,
                file,
                key,
                section,
            })
        }
        Commands::Set {
            file,
            key,
            value,
            section,
        } => commands::set::execute(commands::set::SetArgs {
            engine,
            file,
            key,
            value,
            section,
        }),
        Commands::Create {
            file,
            title,
            subtitle,
            values,
        } => commands::create::execute(commands::create::CreateArgs {
            engine,
            file,
            title,
            subtitle,
            values,
        }),
        Commands::Clear { file } => commands::clear::execute(engine, &file),
    }
}
