//! # Pyliter - Python Syntax Highlighting
//!
//! Highlights Python source for the terminal, or emits a positioned layout
//! for image renderers.
//!
//! ## Quick Start
//!
//! ```bash
//! # Highlight a file
//! cargo run -- path/to/script.py
//!
//! # Read from stdin with another style
//! cat script.py | cargo run -- - --style monokai
//!
//! # Lines 20..40 as JSON layout
//! cargo run -- script.py --start-line 20 --line-count 20 --layout
//! ```

mod config;

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pyliter_render::{AnsiRenderer, Layout};
use pyliter_style::StyleBook;

use config::{Config, OutputMode};

/// Pyliter - Python syntax highlighting
#[derive(Parser, Debug)]
#[command(name = "pyliter")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Python file to highlight ("-" reads stdin)
    #[arg(value_name = "INPUT", default_value = "-")]
    input: PathBuf,

    /// Style book name or path
    #[arg(short = 'S', long, value_name = "NAME|PATH")]
    style: Option<String>,

    /// List available style books and exit
    #[arg(short = 'L', long)]
    list_styles: bool,

    /// First line to render, zero-based
    #[arg(short = 'l', long, value_name = "N")]
    start_line: Option<usize>,

    /// Number of lines to render (0 = all)
    #[arg(short = 'c', long, value_name = "N")]
    line_count: Option<usize>,

    /// Do not number lines
    #[arg(short = 'N', long)]
    no_line_numbers: bool,

    /// Omit the background color
    #[arg(short, long)]
    transparent: bool,

    /// Print the positioned layout as JSON instead of ANSI text
    #[arg(long)]
    layout: bool,

    /// Config file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective settings to the default config file and exit
    #[arg(long)]
    save_config: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Overrides config values with the flags that were given.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(style) = &self.style {
            config.style = style.clone();
        }
        if let Some(start_line) = self.start_line {
            config.render.start_line = start_line;
        }
        if let Some(line_count) = self.line_count {
            config.render.line_count = line_count;
        }
        if self.no_line_numbers {
            config.render.line_numbers = false;
        }
        if self.transparent {
            config.render.transparent = true;
        }
        if self.layout {
            config.render.mode = OutputMode::Layout;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting pyliter v{}", env!("CARGO_PKG_VERSION"));

    if args.list_styles {
        for name in StyleBook::available_styles() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };
    let config = args.apply(config);

    if args.save_config {
        config.save().context("Failed to save config")?;
        tracing::info!("Saved config to {}", Config::default_path()?.display());
        return Ok(());
    }

    let source = read_input(&args.input)?;
    let output = render(&source, &config)?;
    print!("{output}");

    Ok(())
}

/// Reads the whole input file, or stdin for `-`.
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Highlights `source` as configured.
fn render(source: &str, config: &Config) -> anyhow::Result<String> {
    let mut book = StyleBook::from_any(&config.style)
        .with_context(|| format!("Failed to load style {}", config.style))?;
    if config.render.transparent {
        book = book.with_transparent_background();
    }

    let tokens = pyliter_render::highlight(source, &book)?;
    let layout = Layout::build(source, &tokens, &book, &config.render.layout_options());
    tracing::debug!(dimensions = ?layout.dimensions(), "rendering");

    match config.render.mode {
        OutputMode::Ansi => {
            Ok(AnsiRenderer::new(book.default_style()).render_layout(&layout))
        }
        OutputMode::Layout => Ok(layout.to_json()? + "\n"),
    }
}
