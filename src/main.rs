use std::time::Duration;

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;

use rusted_skirmish::engine::assets::AssetLoader;
use rusted_skirmish::engine::game_loop::GameLoop;
use rusted_skirmish::game::characters::{CharacterCatalog, DEFAULT_CATALOG};
use rusted_skirmish::game::{Arena, ArenaConfig};

/// Simulated length of the skirmish
const SKIRMISH_SECONDS: f32 = 12.0;
/// Simulated frame pacing (30 fps, two fixed ticks per frame)
const FRAME_TIME: Duration = Duration::from_micros(33_334);

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Skirmish...");

    let catalog = match std::env::args().nth(1) {
        Some(dir) => CharacterCatalog::load(&AssetLoader::new(&dir), DEFAULT_CATALOG)
            .with_context(|| format!("loading catalog from {dir}"))?,
        None => CharacterCatalog::builtin().context("parsing built-in catalog")?,
    };

    let mut config = ArenaConfig::default();
    if let Ok(seed) = std::env::var("SKIRMISH_SEED") {
        config.seed = seed
            .parse()
            .with_context(|| format!("SKIRMISH_SEED is not a number: {seed}"))?;
    }

    let mut arena = Arena::new(catalog, config);
    let hero = arena.spawn("knight_hero", Vec2::ZERO)?;
    let monsters = [
        arena.spawn("fire_monster", Vec2::new(180.0, 40.0))?,
        arena.spawn("ice_monster", Vec2::new(-150.0, -120.0))?,
        arena.spawn("spider_monster", Vec2::new(60.0, 220.0))?,
        arena.spawn("golem_monster", Vec2::new(-400.0, 0.0))?,
    ];
    for monster in monsters {
        arena.attach_ai(monster, hero);
    }

    let mut game_loop = GameLoop::new();
    let dt = game_loop.fixed_timestep();
    let mut hero_down = false;

    while game_loop.simulated_secs() < SKIRMISH_SECONDS {
        for _ in 0..game_loop.advance(FRAME_TIME) {
            arena.tick(dt);
        }

        if !hero_down && game_loop.simulated_secs() >= SKIRMISH_SECONDS / 2.0 {
            info!("The knight falls at {:.1}s", game_loop.simulated_secs());
            arena.kill(hero);
            hero_down = true;
        }
    }

    info!(
        "Skirmish over after {} ticks: {} characters left ({} alive), {} projectiles in flight",
        arena.tick_count(),
        arena.characters().count(),
        arena.characters().alive_count(),
        arena.projectiles().count()
    );
    for character in arena.characters().iter() {
        info!(
            "  {} {} is {:?} facing {}",
            character.character_type,
            character.id,
            character.state(),
            character.orientation()
        );
    }

    Ok(())
}
