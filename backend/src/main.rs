//! Gallery CLI - manifest tooling for the portfolio site
//!
//! ```bash
//! gallery parse art/images.csv      # Parse the manifest, print items as JSON
//! gallery build-manifest            # art/images.txt -> art/images.csv
//! gallery stamp                     # Write today's date to art/lastmodified.txt
//! gallery contact                   # Print the contact mailto link
//! gallery serve                     # Serve the site + API (port 3000)
//! ```
//!
//! Paths default to the site root from `GALLERY_SITE_ROOT` (or `.env`).

use clap::{Parser, Subcommand};
use gallery::{
    build_manifest, load_manifest, write_last_modified, BuildOptions, SiteConfig,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Portfolio gallery manifest tooling", long_about = None)]
struct Cli {
    /// Site root (overrides GALLERY_SITE_ROOT)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a manifest and output gallery items as JSON
    Parse {
        /// Manifest file (default: <root>/art/images.csv)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build images.csv from the images.txt listing
    BuildManifest {
        /// Source listing (default: <root>/art/images.txt)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Manifest to write (default: <root>/art/images.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Delete the listing once the manifest is written
        #[arg(long)]
        remove_input: bool,
    },

    /// Write today's date to the last-modified file
    Stamp {
        /// Date file (default: <root>/art/lastmodified.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the configured contact address
    Contact,

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = gallery::config::DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = SiteConfig::from_env();
    if let Some(root) = cli.root {
        config = config.with_site_root(root);
    }

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(
            &input.unwrap_or_else(|| config.manifest_path()),
            output.as_deref(),
        ),

        Commands::BuildManifest {
            input,
            output,
            remove_input,
        } => cmd_build_manifest(BuildOptions {
            input: input.unwrap_or_else(|| config.manifest_source_path()),
            output: output.unwrap_or_else(|| config.manifest_path()),
            remove_input,
        }),

        Commands::Stamp { output } => {
            cmd_stamp(&output.unwrap_or_else(|| config.last_modified_path()))
        }

        Commands::Contact => cmd_contact(&config),

        Commands::Serve { port } => cmd_serve(port, config).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing manifest: {}", input.display());

    let outcome = load_manifest(input)?;

    eprintln!("✅ {}", outcome.summary());
    for skipped in &outcome.skipped {
        eprintln!("   Line {}: {}", skipped.line, skipped.reason);
    }

    let json = serde_json::to_string_pretty(&outcome.items)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_build_manifest(options: BuildOptions) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🛠️  Building manifest: {}", options.output.display());

    let report = build_manifest(&options)?;

    eprintln!("   Kept: {}", report.kept);
    if report.skipped > 0 {
        eprintln!("   ⚠️  Skipped: {}", report.skipped);
    }
    eprintln!("✨ Done!");
    Ok(())
}

fn cmd_stamp(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let today = chrono::Local::now().date_naive();
    let text = write_last_modified(path, today)?;
    eprintln!("📅 {} → {}", text, path.display());
    Ok(())
}

fn cmd_contact(config: &SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", config.contact.mailto());
    Ok(())
}

async fn cmd_serve(port: u16, config: SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    gallery::server::start_server(port, config).await?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
