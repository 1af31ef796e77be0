//! Unattended dungeon runs.
//!
//! Loads content, restores (or creates) a save slot, lets the autopilot play
//! a number of rooms and saves after every room. Between rooms the hero
//! crafts whatever its materials allow. A fallen hero's slot is deleted.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dungeon_content::ContentFactory;
use dungeon_core::{Difficulty, GameRng, Player, Recipe, StaticTables};
use dungeon_runtime::{
    AutoPilot, FileSaveRepository, LogConfig, RoomOutcome, RuntimeConfig, SaveRepository, Session,
    Temperament, logging,
};

/// Auto-play dungeon runs
#[derive(Parser)]
#[command(name = "dungeon-sim")]
#[command(about = "Let the autopilot play through the dungeon", long_about = None)]
#[command(version)]
struct Cli {
    /// Save slot to continue (letters, digits, '-' and '_')
    #[arg(long, default_value = "autosave")]
    slot: String,

    /// Name for a new character
    #[arg(long, default_value = "Hero")]
    name: String,

    /// Ignore any existing save in the slot
    #[arg(long)]
    fresh: bool,

    /// Rooms to play before stopping
    #[arg(long, default_value_t = 50)]
    rooms: u32,

    /// RNG seed (overrides GAME_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// normal, soul_enjoyer, realistic, hardcore or puzzle
    #[arg(long)]
    difficulty: Option<String>,

    /// balanced, reckless or cautious
    #[arg(long, default_value = "balanced")]
    temperament: String,

    /// Content directory (overrides CONTENT_DIR)
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Save directory (overrides SAVE_DATA_DIR)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Mirror logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = RuntimeConfig::from_env();
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.content_dir.is_some() {
        config.content_dir = cli.content_dir.clone();
    }
    if cli.save_dir.is_some() {
        config.save_data_dir = cli.save_dir.clone();
    }

    let _guard = logging::init(&LogConfig {
        session_id: config.session_id.clone(),
        stderr: cli.verbose,
        ..LogConfig::default()
    })?;

    let tables = load_tables(&config)?;
    let temperament = parse_temperament(&cli.temperament)?;
    let difficulty = cli
        .difficulty
        .as_deref()
        .map(|name| Difficulty::from_str(name).map_err(|_| anyhow!("unknown difficulty '{name}'")))
        .transpose()?;

    let repo = FileSaveRepository::new(config.save_dir())
        .context("Failed to open save directory")?;
    let mut player = if cli.fresh {
        new_player(&cli.name, &tables)
    } else {
        repo.load_or_default(&cli.slot, || new_player(&cli.name, &tables))
    };
    if let Some(difficulty) = difficulty
        && difficulty != player.difficulty
    {
        player.switch_difficulty(difficulty, &tables.armor_sets);
    }

    let seed = config.seed.unwrap_or_else(|| GameRng::from_entropy().seed());
    tracing::info!(seed, slot = %cli.slot, player = %player.name(), "starting run");

    let mut session = Session::new(tables, player, GameRng::new(seed));
    let mut pilot = AutoPilot::new(temperament);

    for _ in 0..cli.rooms {
        let report = session.explore(&mut pilot);
        summarize(&report.outcome);

        if !report.survived {
            repo.delete(&cli.slot)?;
            let player = session.player();
            println!(
                "{} fell on dungeon level {} after {} rooms (level {}, {} kills).",
                player.name(),
                player.dungeon_level,
                session.rooms_explored(),
                player.level,
                player.kills
            );
            return Ok(());
        }

        if let Some(level) = report.level {
            println!(
                "Cleared dungeon level {} (+{} gold).",
                level.cleared, level.reward
            );
            if level.run_finished {
                println!("The final boss is down. Starting New Game+.");
                session.start_ng_plus();
            }
        }

        pick_class(&mut session);
        craft_all(&mut session);
        repo.save(&cli.slot, session.player())?;
    }

    let player = session.player();
    println!(
        "{} rests on dungeon level {} (level {}, {} gold, {} kills). Saved to slot '{}'.",
        player.name(),
        player.dungeon_level,
        player.level,
        player.gold,
        player.kills,
        cli.slot
    );
    Ok(())
}

fn load_tables(config: &RuntimeConfig) -> Result<StaticTables> {
    match &config.content_dir {
        Some(dir) => ContentFactory::new(dir).load_tables(),
        None => ContentFactory::embedded(),
    }
}

fn new_player(name: &str, tables: &StaticTables) -> Player {
    let mut player = Player::from_config(name, &tables.config);
    for quest in &tables.quests {
        player.accept_quest(quest.clone());
    }
    player
}

fn parse_temperament(name: &str) -> Result<Temperament> {
    match name {
        "balanced" => Ok(Temperament::balanced()),
        "reckless" => Ok(Temperament::reckless()),
        "cautious" => Ok(Temperament::cautious()),
        other => Err(anyhow!("unknown temperament '{other}'")),
    }
}

/// Take the first class on offer once the novice qualifies for one.
fn pick_class(session: &mut Session<StaticTables, GameRng>) {
    if session.player().class_name != Player::DEFAULT_CLASS {
        return;
    }
    let level = session.player().level;
    let offered = session
        .tables()
        .classes
        .iter()
        .find(|class| class.unlock_level <= level)
        .map(|class| class.name.clone());
    if let Some(name) = offered {
        session.choose_class(&name);
    }
}

/// Craft every recipe the gathered materials cover, once each.
fn craft_all(session: &mut Session<StaticTables, GameRng>) {
    let recipes: Vec<Recipe> = session
        .tables()
        .crafting
        .craftable(&session.player().materials)
        .cloned()
        .collect();
    for recipe in recipes {
        match session.player_mut().craft(&recipe) {
            Ok(outcome) => println!("Crafted {}: {outcome:?}", recipe.name),
            Err(err) => tracing::debug!(recipe = %recipe.key, %err, "craft skipped"),
        }
    }
}

fn summarize(outcome: &RoomOutcome) {
    match outcome {
        RoomOutcome::Empty => {}
        RoomOutcome::Combat(report) => {
            tracing::debug!(outcome = %report.outcome, rounds = report.rounds, events = report.events.len(), "fight");
        }
        RoomOutcome::Treasure {
            found,
            lost,
            material,
        } => {
            for item in found {
                tracing::info!(item = %item.name(), "treasure found");
            }
            if !lost.is_empty() {
                tracing::info!(count = lost.len(), "treasure left behind");
            }
            if let Some(key) = material {
                tracing::info!(material = %key, "material found");
            }
        }
        RoomOutcome::Shop { bought, sold } => {
            for item in bought {
                println!("Bought {} for {} gold.", item.name(), item.value());
            }
            for item in sold {
                println!("Sold {} for {} gold.", item.name(), item.sell_value());
            }
        }
        RoomOutcome::Puzzle(report) => {
            println!(
                "{} puzzle {} after {} attempts.",
                report.kind,
                if report.solved { "solved" } else { "failed" },
                report.attempts
            );
        }
        RoomOutcome::Rest { hp, mana, stamina } => {
            tracing::debug!(hp, mana, stamina, "rest");
        }
    }
}
