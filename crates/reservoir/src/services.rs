//! # Game Services
//!
//! Owns every pool the game uses and initializes them in a fixed order.
//! Constructed once at startup and passed by reference to gameplay code.
//!
//! ## Execution Order
//!
//! | Order | Service | Why first |
//! |-------|---------|-----------|
//! | -20 | sound effects | gameplay may play sounds during its own init |
//! | -10 | visual effects | |
//! | 0 | save slot rows | menu is built last |

use std::any::Any;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use reservoir_core::config::parse_toml;
use reservoir_core::{
    Bootstrap, BootstrapError, MultiPoolConfig, MultiPoolManager, OrderedPoolConfig,
    OrderedPoolContainer, PoolConfig, PoolError, SinglePoolManager,
};

use crate::effects::{visual_effect_library, SoundEffect, VisualEffect};
use crate::menu::{SaveSlotRow, SaveSummary};

const SOUND_EFFECTS_ORDER: i32 = -20;
const VISUAL_EFFECTS_ORDER: i32 = -10;
const SAVE_SLOTS_ORDER: i32 = 0;

/// Errors raised while setting up services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServicesError {
    /// The services config is malformed or invalid.
    #[error("services config: {0}")]
    Config(#[from] PoolError),

    /// A pool failed to initialize.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

/// Result type for service setup.
pub type ServicesResult<T> = Result<T, ServicesError>;

/// One TOML document configuring every pool.
///
/// ```toml
/// [sound_effects]
/// initial_size = 8
///
/// [visual_effects]
/// pool_size_per_key = 4
///
/// [save_slots]
/// initial_size = 3
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Sound effect pool.
    pub sound_effects: PoolConfig,
    /// Per-kind visual effect pools.
    pub visual_effects: MultiPoolConfig,
    /// Load-game menu rows.
    pub save_slots: OrderedPoolConfig,
}

impl ServicesConfig {
    /// Parses and validates a services config.
    ///
    /// # Errors
    ///
    /// [`ServicesError::Config`] on malformed TOML or invalid pool sizes.
    pub fn from_toml_str(source: &str) -> ServicesResult<Self> {
        let config: Self = parse_toml(source)?;
        config.sound_effects.validate()?;
        config.visual_effects.validate()?;
        Ok(config)
    }
}

/// Every pool of the game.
pub struct Services {
    /// One-shot sounds. Starvation skips the sound.
    pub sound_effects: SinglePoolManager<SoundEffect>,
    /// Particle bursts, one pool per kind.
    pub visual_effects: MultiPoolManager<VisualEffect>,
    /// Load-game menu rows.
    pub save_slots: OrderedPoolContainer<SaveSlotRow>,
}

impl Services {
    /// Constructs every owner. Pools stay empty until [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(config: ServicesConfig) -> Self {
        Self {
            sound_effects: SinglePoolManager::new(config.sound_effects, SoundEffect::default),
            visual_effects: MultiPoolManager::new(
                "visual_effects",
                config.visual_effects,
                visual_effect_library(),
            ),
            save_slots: OrderedPoolContainer::new("save_slots", config.save_slots, SaveSlotRow::default),
        }
    }

    /// Hands rows already placed under the menu layout to the save slot pool.
    /// Only visible rows count as live.
    #[must_use]
    pub fn with_preplaced_save_rows(mut self, rows: Vec<Box<dyn Any>>) -> Self {
        self.save_slots = self
            .save_slots
            .with_existing_children(rows, SaveSlotRow::is_visible);
        self
    }

    /// Initializes every pool in execution order.
    ///
    /// # Errors
    ///
    /// [`ServicesError::Bootstrap`] naming the first pool that failed. Hand-built
    /// configs are checked here too, not only those parsed from TOML.
    pub fn initialize(&mut self) -> ServicesResult<()> {
        let mut bootstrap = Bootstrap::new();
        bootstrap
            .register(SOUND_EFFECTS_ORDER, &mut self.sound_effects)
            .register(VISUAL_EFFECTS_ORDER, &mut self.visual_effects)
            .register(SAVE_SLOTS_ORDER, &mut self.save_slots);
        bootstrap.run()?;
        Ok(())
    }

    /// Plays a one-shot sound. Returns false when the pool is starved and
    /// the sound was skipped.
    pub fn play_sound(&mut self, clip: &str, volume: f32, duration: f32) -> bool {
        let Some(handle) = self.sound_effects.acquire_free_object() else {
            tracing::debug!("Sound '{}' skipped: no free sound effect", clip);
            return false;
        };
        if let Some(sound) = self.sound_effects.get_mut(handle) {
            sound.play(clip, volume, duration);
        }
        true
    }

    /// Spawns a visual effect of `kind`. Returns false for an unknown kind or
    /// a starved pool.
    pub fn spawn_effect(&mut self, kind: &str, position: [f32; 3]) -> bool {
        let Some(handle) = self.visual_effects.acquire_free_object(kind) else {
            return false;
        };
        if let Some(effect) = self.visual_effects.get_mut(kind, handle) {
            effect.spawn_at(position);
        }
        true
    }

    /// Shows one menu row per save, hides the rest. Returns the row count.
    pub fn show_save_slots(&mut self, saves: &[SaveSummary]) -> usize {
        let rows = self.save_slots.acquire_only_first_objects(saves.len());
        for (row, save) in rows.iter_mut().zip(saves) {
            row.bind(save);
        }
        rows.len()
    }

    /// Advances every playing effect by `dt` seconds. Finished effects
    /// release themselves.
    pub fn tick(&mut self, dt: f32) {
        for sound in self.sound_effects.objects_in_use_mut() {
            sound.tick(dt);
        }
        for (_, effect) in self.visual_effects.objects_in_use_mut() {
            effect.tick(dt);
        }
    }

    /// Returns true while any sound or visual effect is playing.
    #[must_use]
    pub fn any_effect_playing(&self) -> bool {
        self.sound_effects.any_in_use() || self.visual_effects.any_in_use()
    }

    /// Stops every effect, e.g. on scene change. Menu rows are left alone.
    pub fn stop_all_effects(&mut self) {
        self.sound_effects.release_all_objects();
        self.visual_effects.release_all_objects();
    }

    /// Clips currently playing, in pool order.
    pub fn playing_clips(&self) -> impl Iterator<Item = &str> + '_ {
        self.sound_effects
            .objects_in_use()
            .filter_map(SoundEffect::clip)
    }

    /// Number of sound effects currently checked out.
    #[must_use]
    pub fn sounds_playing(&self) -> usize {
        self.sound_effects.pool().count_in_use()
    }
}
