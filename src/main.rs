use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use gosafe_geofence::config::FileConfig;
use gosafe_geofence::domain::{EscalationDecision, LocationSample, NewZone, Zone, ZonePatch};
use gosafe_geofence::evaluate::{EvaluationMode, Evaluator, TrackReport};
use gosafe_geofence::export::zones_to_feature_collection;
use gosafe_geofence::geometry::{BoundaryInput, Ring, ZoneMetrics};
use gosafe_geofence::store::{JsonZoneStore, ZoneStore};

/// Manage GoSafe geofence zones and evaluate tourist locations against them
///
/// Examples:
///   # Create a danger zone from a GeoJSON polygon file
///   gosafe zones create --name "Ridge Trail" --type danger --boundary ridge.json
///
///   # Check where a tourist is and who should respond
///   gosafe evaluate --lat 28.611 --lng 77.203
///
///   # Replay a recorded track
///   gosafe track samples.json --json
#[derive(Parser, Debug)]
#[command(name = "gosafe")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches gosafe.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Zone store file (defaults to zones.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Use bounding-box containment instead of exact polygon geometry
    #[arg(long, global = true)]
    approximate: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, update, archive and list zones
    Zones {
        #[command(subcommand)]
        action: ZoneCommand,
    },

    /// Evaluate a single location
    Evaluate {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Subject the location belongs to
        #[arg(long, default_value = "anonymous")]
        subject: String,
    },

    /// Evaluate a JSON array of location samples
    Track {
        /// Samples file, or - for stdin
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum ZoneCommand {
    /// List active zones
    List {
        /// Include archived zones
        #[arg(long)]
        all: bool,
    },

    /// Create a zone
    Create {
        #[arg(long)]
        name: String,

        /// safe, restricted, danger or tourist_zone
        #[arg(long = "type")]
        zone_type: String,

        /// Boundary JSON file (GeoJSON Polygon or [{lat, lng}] array), or - for stdin
        #[arg(long)]
        boundary: PathBuf,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Update fields of an active zone
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type")]
        zone_type: Option<String>,

        #[arg(long)]
        boundary: Option<PathBuf>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Archive a zone (it stays on record but is no longer evaluated)
    Archive { id: String },

    /// Export zones as a GeoJSON FeatureCollection
    Export {
        /// Output file (defaults to stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Include archived zones
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_config: FileConfig = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        let contents = std::fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;
        toml::from_str(&contents).context("Failed to parse config file")?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;
    init_logging(verbose);

    let store_path = args.store.clone().unwrap_or(file_config.store_path);
    let mode = if args.approximate {
        EvaluationMode::Approximate
    } else {
        file_config.evaluation_mode
    };

    log::debug!("Zone store: {}", store_path.display());
    log::debug!("Evaluation mode: {:?}", mode);
    if mode == EvaluationMode::Approximate {
        log::warn!("Approximate mode: containment uses zone bounding boxes, not exact polygons");
    }

    let mut store = JsonZoneStore::open(&store_path)
        .with_context(|| format!("Failed to open zone store: {}", store_path.display()))?;
    let evaluator = Evaluator::new(mode);

    match args.command {
        Command::Zones { action } => run_zone_command(action, &mut store, args.json),
        Command::Evaluate { lat, lng, subject } => {
            let zones = store.list_active_zones()?;
            let sample = LocationSample::new(subject, lat, lng);
            let decision = evaluator.decide(&sample, &zones);
            if args.json {
                print_json(&decision)
            } else {
                print_decision(&decision);
                Ok(())
            }
        }
        Command::Track { file } => {
            let contents = read_input(&file)?;
            let samples: Vec<LocationSample> =
                serde_json::from_str(&contents).context("Failed to parse location samples")?;
            let zones = store.list_active_zones()?;
            run_track(&evaluator, &samples, &zones, args.json)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run_zone_command(action: ZoneCommand, store: &mut JsonZoneStore, json: bool) -> Result<()> {
    match action {
        ZoneCommand::List { all } => {
            let zones = if all {
                store.list_all_zones()?
            } else {
                store.list_active_zones()?
            };
            if json {
                return print_json(&zones);
            }
            if zones.is_empty() {
                println!("No zones.");
            }
            for zone in &zones {
                print_zone(zone);
            }
            Ok(())
        }
        ZoneCommand::Create {
            name,
            zone_type,
            boundary,
            description,
        } => {
            let boundary = read_boundary(&boundary)?;
            let zone = store
                .create_zone(NewZone::new(name, zone_type, boundary, description))
                .context("Failed to create zone")?;
            if json {
                return print_json(&zone);
            }
            println!("Created zone {}", zone.id);
            print_zone(&zone);
            Ok(())
        }
        ZoneCommand::Update {
            id,
            name,
            zone_type,
            boundary,
            description,
        } => {
            let boundary = boundary.as_deref().map(read_boundary).transpose()?;
            let patch = ZonePatch {
                name,
                zone_type,
                boundary,
                description,
            };
            if patch.is_empty() {
                bail!("Nothing to update: pass at least one of --name, --type, --boundary, --description");
            }
            let zone = store
                .update_zone(&id, patch)
                .context("Failed to update zone")?;
            if json {
                return print_json(&zone);
            }
            println!("Updated zone {}", zone.id);
            print_zone(&zone);
            Ok(())
        }
        ZoneCommand::Archive { id } => {
            store.archive_zone(&id).context("Failed to archive zone")?;
            println!("Archived zone {}", id);
            Ok(())
        }
        ZoneCommand::Export { output, all } => {
            let zones = if all {
                store.list_all_zones()?
            } else {
                store.list_active_zones()?
            };
            let collection = serde_json::to_string_pretty(&zones_to_feature_collection(&zones))?;
            match output {
                Some(path) => {
                    std::fs::write(&path, collection)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported {} zones to {}", zones.len(), path.display());
                }
                None => println!("{}", collection),
            }
            Ok(())
        }
    }
}

fn run_track(
    evaluator: &Evaluator,
    samples: &[LocationSample],
    zones: &[Zone],
    json: bool,
) -> Result<()> {
    let start = Instant::now();
    let progress = create_progress_bar(samples.len() as u64, "Evaluating samples");

    let mut report = TrackReport::default();
    for sample in samples {
        report.push(evaluator.decide(sample, zones));
        progress.inc(1);
    }
    progress.finish_with_message(format!(
        "Evaluated {} samples against {} zones [{:.1}s]",
        samples.len(),
        zones.len(),
        start.elapsed().as_secs_f32()
    ));

    if json {
        return print_json(&report);
    }

    println!();
    for decision in &report.decisions {
        print_decision(decision);
    }

    let summary = &report.summary;
    println!();
    println!("Summary");
    println!("=======");
    println!("  Samples:   {}", summary.samples);
    println!("  In a zone: {}", summary.matched);
    println!("  No zone:   {}", summary.unmatched());
    println!("  Ranger:    {}", summary.ranger);
    println!("  Police:    {}", summary.police);
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_boundary(path: &Path) -> Result<BoundaryInput> {
    let contents = read_input(path)?;
    let boundary = BoundaryInput::from_json(&contents)
        .with_context(|| format!("Invalid boundary in {}", path.display()))?;
    Ok(boundary)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_zone(zone: &Zone) {
    let status = if zone.active { "" } else { " [archived]" };
    println!("{}  {} ({}){}", zone.id, zone.name, zone.zone_type, status);

    match Ring::from_polygon(&zone.boundary) {
        Ok(ring) => {
            let metrics = ZoneMetrics::from_ring(&ring);
            println!("    {} vertices, {}", ring.len() - 1, metrics);
        }
        Err(e) => println!("    unreadable boundary: {}", e),
    }

    if !zone.description.is_empty() {
        println!("    {}", zone.description);
    }
}

fn print_decision(decision: &EscalationDecision<'_>) {
    let zone = decision
        .matched_zone
        .map(|z| format!("{} ({})", z.name, z.zone_type))
        .unwrap_or_else(|| "no zone".to_string());
    println!(
        "{} {} -> {} => dispatch {}",
        decision.timestamp.format("%Y-%m-%d %H:%M:%S"),
        decision.subject_id,
        zone,
        decision.responder_class
    );
}

fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{bar:30}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(message.to_string());
    pb
}
