//! Liftdex CLI - Parse exercise catalogs and group them by muscle
//!
//! ```bash
//! liftdex parse exercises.csv              # Records as JSON
//! liftdex group exercises.csv --order Chest,Legs
//! liftdex show exercises.csv               # Human-readable listing
//! liftdex serve                            # Start HTTP server (port 3000)
//! ```
//!
//! The preferred group order and port default to `LIFTDEX_GROUP_ORDER` and
//! `LIFTDEX_PORT` (a `.env` file is honoured).

use clap::{Parser, Subcommand};
use liftdex::config::parse_group_list;
use liftdex::{load_catalog, CatalogOptions, CatalogResponse, GroupedView, Settings};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "liftdex")]
#[command(about = "Parse exercise catalogs and index them by muscle group", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a catalog and output its records as JSON
    Parse {
        /// Input catalog file
        input: PathBuf,

        /// Leave out exercises without any muscle group
        #[arg(long)]
        drop_untargeted: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a catalog and output the grouped view as JSON
    Group {
        /// Input catalog file
        input: PathBuf,

        /// Comma-separated preferred group order
        #[arg(long)]
        order: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the grouped view as text
    Show {
        /// Input catalog file
        input: PathBuf,

        /// Comma-separated preferred group order
        #[arg(long)]
        order: Option<String>,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    let result = match cli.command {
        Commands::Parse {
            input,
            drop_untargeted,
            output,
        } => cmd_parse(&input, &settings, drop_untargeted, output.as_deref()),

        Commands::Group {
            input,
            order,
            output,
        } => cmd_group(&input, &settings, order.as_deref(), output.as_deref()),

        Commands::Show { input, order } => cmd_show(&input, &settings, order.as_deref()),

        Commands::Serve { port } => cmd_serve(settings, port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn catalog_options(settings: &Settings, order: Option<&str>) -> CatalogOptions {
    let group_order = order
        .map(parse_group_list)
        .filter(|groups| !groups.is_empty())
        .unwrap_or_else(|| settings.group_order.clone());

    CatalogOptions {
        group_order,
        drop_untargeted: false,
    }
}

fn cmd_parse(
    input: &Path,
    settings: &Settings,
    drop_untargeted: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = CatalogOptions {
        drop_untargeted,
        ..catalog_options(settings, None)
    };
    let result = load_catalog(input, &options)?;

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_group(
    input: &Path,
    settings: &Settings,
    order: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_catalog(input, &catalog_options(settings, order))?;

    let response = CatalogResponse::from(result);
    let json = serde_json::to_string_pretty(&response)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_show(
    input: &Path,
    settings: &Settings,
    order: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = load_catalog(input, &catalog_options(settings, order))?;
    print!("{}", render_view(&result.view));
    Ok(())
}

/// Group headings followed by `name  [subregion] ...` lines.
fn render_view(view: &GroupedView) -> String {
    let mut out = String::new();

    for section in view.sections() {
        out.push_str(&format!("\n{} ({})\n", section.group, section.records.len()));
        for record in section.records {
            let chips: Vec<String> = record
                .targets_in(section.group)
                .filter(|t| !t.subregion.is_empty())
                .map(|t| format!("[{}]", t.subregion))
                .collect();

            if chips.is_empty() {
                out.push_str(&format!("  {}\n", record.name()));
            } else {
                out.push_str(&format!("  {}  {}\n", record.name(), chips.join(" ")));
            }
        }
    }

    out
}

async fn cmd_serve(
    mut settings: Settings,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        settings.port = port;
    }
    liftdex::server::start_server(settings).await
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
