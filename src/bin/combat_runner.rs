//! Headless Combat Runner
//!
//! Loads a TOML scenario, fires a volley of attacks at one target unit and
//! prints what happened as JSON or text.

use std::path::{Path, PathBuf};

use clap::Parser;
use hex_combat::board::{Board, Coords, Hex, Terrain, TerrainRegistry};
use hex_combat::core::{set_config, CombatConfig, CombatError, Result};
use hex_combat::damage::{
    apply_critical_roll, apply_damage, commit_doomed, resolve_aimed_hit, resolve_hit, roll_2d6,
    stand_check, AttackDirection, BipedHitTable, CombatUnit, Location, Report, RoundReports,
    UnitConfig,
};
use hex_combat::targeting::Target;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Headless Combat Runner - resolve attacks against a unit on a hex board
#[derive(Parser, Debug)]
#[command(name = "combat_runner")]
#[command(about = "Resolve a scenario's attacks and print a damage summary")]
struct Args {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of attacks; overrides the scenario
    #[arg(long)]
    attacks: Option<u32>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Optional combat rules override (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct HexSpec {
    x: i32,
    y: i32,
    #[serde(default)]
    elevation: i32,
    #[serde(default)]
    terrain: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TargetSpec {
    #[serde(default = "default_target_name")]
    name: String,
    position: Coords,
    #[serde(default)]
    armless: bool,
}

fn default_target_name() -> String {
    "Target".to_string()
}

#[derive(Debug, Deserialize)]
struct Scenario {
    width: i32,
    height: i32,
    attacker: Coords,
    target: TargetSpec,
    #[serde(default = "default_attacks")]
    attacks: u32,
    #[serde(default = "default_damage")]
    damage_per_attack: i32,
    #[serde(default)]
    direction: AttackDirection,
    #[serde(default)]
    aimed_at: Option<Location>,
    #[serde(default)]
    hexes: Vec<HexSpec>,
}

fn default_attacks() -> u32 {
    10
}

fn default_damage() -> i32 {
    5
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    target: String,
    line_of_sight: bool,
    intervening: Vec<String>,
    attacks_resolved: u32,
    hits: Vec<String>,
    destroyed_locations: Vec<Location>,
    damage_absorbed: i32,
    unit_destroyed: bool,
    stand_target: i32,
    reports: RoundReports,
    seed: u64,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);

    let summary = match run(&args, seed) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match args.format.as_str() {
        "text" => print_text(&summary),
        "json" => print_json(&summary),
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            print_json(&summary);
        }
    }
}

fn print_json(summary: &RunSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", CombatError::from(e));
            std::process::exit(1);
        }
    }
}

fn print_text(summary: &RunSummary) {
    println!("Combat Result");
    println!("=============");
    println!("Target: {}", summary.target);
    println!("Line of sight: {}", summary.line_of_sight);
    if !summary.intervening.is_empty() {
        println!("Intervening: {}", summary.intervening.join(" "));
    }
    println!("Attacks: {}", summary.attacks_resolved);
    for (round, reports) in summary.reports.rounds() {
        println!("Round {}:", round);
        for report in reports {
            println!("  {}", report.text);
        }
    }
    println!("Damage absorbed: {}", summary.damage_absorbed);
    println!("Unit destroyed: {}", summary.unit_destroyed);
    println!("Stand check target: {}", summary.stand_target);
    println!("Seed: {}", summary.seed);
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn build_board(scenario: &Scenario, registry: &TerrainRegistry) -> Result<Board> {
    let mut board = Board::new(scenario.width, scenario.height)?;
    for spec in &scenario.hexes {
        let mut hex = Hex::new(spec.elevation);
        for text in &spec.terrain {
            hex.add_terrain(Terrain::parse(registry, text)?);
        }
        board.set_hex(Coords::new(spec.x, spec.y), hex)?;
    }
    Ok(board)
}

fn run(args: &Args, seed: u64) -> Result<RunSummary> {
    let scenario = load_scenario(&args.scenario)?;
    if let Some(path) = &args.config {
        if set_config(CombatConfig::load(path)?).is_err() {
            tracing::warn!("combat config already set, ignoring {}", path.display());
        }
    }
    let config = hex_combat::core::config();

    let board = build_board(&scenario, TerrainRegistry::standard())?;
    let target_pos = scenario.target.position;
    if !board.contains(scenario.attacker) {
        return Err(CombatError::HexNotOnBoard(scenario.attacker));
    }
    let target_hex = board
        .get_hex(target_pos)
        .ok_or(CombatError::HexNotOnBoard(target_pos))?;

    let unit_config = if scenario.target.armless {
        UnitConfig::armless()
    } else {
        UnitConfig::standard()
    };
    let mut unit = CombatUnit::biped(
        hex_combat::targeting::coords_to_id(target_pos),
        scenario.target.name.clone(),
        unit_config,
    )
    .at(target_pos);
    unit.elevation = target_hex.elevation();

    let line_of_sight = board.has_line_of_sight(scenario.attacker, target_pos);
    let intervening = board
        .intervening_hexes(scenario.attacker, target_pos)
        .iter()
        .map(|c| c.board_num())
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut reports = RoundReports::new();
    let mut hits = Vec::new();
    let mut destroyed_locations = Vec::new();
    let mut damage_absorbed = 0;
    let mut attacks_resolved = 0;

    let attacks = if line_of_sight {
        args.attacks.unwrap_or(scenario.attacks)
    } else {
        tracing::warn!(attacker = %scenario.attacker, target = %target_pos, "no line of sight");
        0
    };

    for round in 1..=attacks {
        if unit.is_destroyed() {
            break;
        }
        attacks_resolved += 1;

        let roll = roll_2d6(&mut rng);
        let hit = match scenario.aimed_at {
            Some(aimed) if unit.as_target().is_immobile() => {
                resolve_aimed_hit(&BipedHitTable, aimed, roll, scenario.direction, config)
            }
            _ => resolve_hit(&BipedHitTable, roll, scenario.direction),
        };
        hits.push(format!("{} ({})", hit.location, roll));

        let outcome = apply_damage(&mut unit, &hit, scenario.damage_per_attack);
        damage_absorbed += outcome.voided;
        destroyed_locations.extend(outcome.destroyed_locations.iter().copied());
        reports.add(round, Report::from_outcome(unit.id, &outcome));

        for location in &outcome.critical_checks {
            let crit_roll = roll_2d6(&mut rng);
            let critical = apply_critical_roll(&mut unit, *location, crit_roll, config, &mut rng);
            destroyed_locations.extend(critical.destroyed_locations.iter().copied());
            reports.add(round, Report::from_critical(unit.id, *location, &critical));
        }

        // End of phase
        let commit = commit_doomed(&mut unit);
        reports.add(round, Report::from_commit(unit.id, &commit));
    }

    let target: Target = unit.as_target();
    Ok(RunSummary {
        target: target.display_name(),
        line_of_sight,
        intervening,
        attacks_resolved,
        hits,
        destroyed_locations,
        damage_absorbed,
        unit_destroyed: unit.is_destroyed(),
        stand_target: stand_check(&unit, config).target(),
        reports,
        seed,
    })
}
