mod config;
mod output;
mod parse;
mod prompt;

use charsort_core::{collect_item_ids, EngineConfig, RankingEngine};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::output::{write_json, write_table};
use crate::prompt::{ask_restart, run_comparisons, summary_of, Outcome};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "charsort", version, about = "Rank characters by picking favourites two at a time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Start an interactive ranking session
    Rank(RankArgs),
    /// Create a default config file at ~/.config/charsort/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// File with one item per line, or a JSON array of item names
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Directory of .jpg / .png character images to rank
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Number of score tiers (default: 5)
    #[arg(long)]
    tier_count: Option<usize>,

    /// Seed for pair selection, for a reproducible question order
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/charsort/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "charsort_core=debug,charsort_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// List supported image files in `dir`, sorted by file name.
fn list_image_dir(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(collect_item_ids(names))
}

/// Items to rank, plus the image file of every item that came from a directory.
struct LoadedItems {
    ids: Vec<String>,
    images: HashMap<String, PathBuf>,
}

impl LoadedItems {
    fn add_image_dir(&mut self, dir: &Path) {
        let names = list_image_dir(dir)
            .unwrap_or_else(|e| bail(format!("Failed to read image directory {}: {e}", dir.display())));
        for name in names {
            self.images.insert(name.clone(), dir.join(&name));
            // An image already named via --items/--item keeps its place.
            if !self.ids.contains(&name) {
                self.ids.push(name);
            }
        }
    }
}

/// Load items from all sources: --items file, --item inline args, and --dir.
/// The config file's directory is only read when none of those gave anything.
fn load_items(args: &RankArgs, config_dir: Option<&Path>) -> LoadedItems {
    let mut loaded = LoadedItems { ids: Vec::new(), images: HashMap::new() };

    // From file (auto-detects JSON array vs one-per-line)
    if let Some(ref path) = args.items {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        loaded.ids = parse::parse_items_from_str(&content)
            .unwrap_or_else(|e| bail(format!("File looks like JSON but failed to parse: {e}")));
    }

    // From inline --item flags
    loaded.ids.extend(args.inline_items.iter().cloned());

    if let Some(ref dir) = args.dir {
        loaded.add_image_dir(dir);
    } else if loaded.ids.is_empty() {
        let Some(dir) = config_dir else {
            bail("No items provided. Use --items <file>, --item <name>, or --dir <images>.");
        };
        loaded.add_image_dir(dir);
    }

    if loaded.ids.is_empty() {
        bail("No items found to rank.");
    }
    loaded
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => {
            init_logging(args.verbose);
            if let Err(e) = run_rank(args) {
                bail(format!("I/O error: {e}"));
            }
        }
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default image directory, tier count, etc.");
        }
    }
}

fn run_rank(args: RankArgs) -> io::Result<()> {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let tier_count = args.tier_count.or(cfg.tier_count).unwrap_or(EngineConfig::default().tier_count);
    let json = args.json || cfg.json.unwrap_or(false);
    let config_dir = cfg.dir.map(PathBuf::from);

    let LoadedItems { ids: items, images } = load_items(&args, config_dir.as_deref());

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut engine = RankingEngine::initialize(&items, EngineConfig { tier_count }, rng)
        .unwrap_or_else(|e| bail(e));

    info!(
        items = items.len(),
        tier_count,
        comparisons = engine.session().total_comparisons(),
        "ranking started"
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    // Questions go to stderr so stdout carries only results (e.g. for --json).
    let mut prompts = io::stderr().lock();
    let mut results = io::stdout().lock();

    loop {
        let outcome = run_comparisons(&mut engine, &mut input, &mut prompts)?;
        debug!(?outcome, "comparisons finished");

        let rankings = engine.final_rankings(engine.handle()).map_err(io::Error::other)?;
        let summary = summary_of(&engine);
        writeln!(prompts)?;
        if json {
            write_json(&mut results, &rankings, &summary, &images)?;
        } else {
            write_table(&mut results, &rankings, &summary)?;
        }
        results.flush()?;

        if outcome == Outcome::Stopped || !ask_restart(&mut input, &mut prompts)? {
            return Ok(());
        }
        engine.reset();
        info!("starting over");
    }
}
