// ABOUTME: Main entry point for the md-slides program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use log::info;
use md_slides::{Chunk, Config, Page, StyleValue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print composited pages as JSON
    Pages(InputArgs),

    /// Print the section outline of the deck as JSON
    Outline(InputArgs),

    /// Render the deck to a standalone HTML file
    Html(HtmlArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,
}

#[derive(Args)]
struct HtmlArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// Deck title (defaults to the first h1/h2 of the document)
    #[arg(long)]
    title: Option<String>,
}

/// JSON view of a page with its derived fields
#[derive(Serialize)]
struct PageView<'a> {
    page_id: usize,
    title: Option<&'a str>,
    subtitle: Option<&'a str>,
    h1: Option<&'a str>,
    h2: Option<&'a str>,
    h3: Option<&'a str>,
    layout: &'a str,
    theme: &'a str,
    resource_dir: &'a str,
    slide_size: (u32, u32),
    styles: &'a BTreeMap<String, StyleValue>,
    body: &'a str,
    chunk: Chunk,
}

impl<'a> From<&'a Page> for PageView<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            page_id: page.page_id,
            title: page.title(),
            subtitle: page.subtitle(),
            h1: page.h1.as_deref(),
            h2: page.h2.as_deref(),
            h3: page.h3.as_deref(),
            layout: page.option.layout(),
            theme: page.option.theme(),
            resource_dir: page.option.resource_dir(),
            slide_size: page.option.computed_slide_size(),
            styles: page.option.styles(),
            body: &page.raw_md,
            chunk: page.chunk_tree(),
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> md_slides::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn run(command: &Commands, config: &Config) -> md_slides::Result<()> {
    match command {
        Commands::Pages(args) => {
            let document = md_slides::utils::read_document(&args.input)?;
            let pages = md_slides::composite(&document)?;
            let views: Vec<PageView> = pages.iter().map(PageView::from).collect();
            println!("{}", to_json(&views, config.pretty_json)?);
        }
        Commands::Outline(args) => {
            let document = md_slides::utils::read_document(&args.input)?;
            let pages = md_slides::composite(&document)?;
            let structure = md_slides::retrieve_structure(&pages);
            println!("{}", to_json(&structure, config.pretty_json)?);
        }
        Commands::Html(args) => {
            let document = md_slides::utils::read_document(&args.input)?;
            let html_config = config.get_html_config(args.title.clone());
            let html = md_slides::render_html(&document, &html_config)?;
            md_slides::write_html_to_file(&html, &args.output)?;
            info!("HTML generated successfully: {:?}", args.output);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::from_env();

    let Some(command) = &cli.command else {
        println!("No command specified. Use --help for usage information.");
        return Ok(());
    };

    match run(command, &config) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
