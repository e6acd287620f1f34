//! # RESERVOIR
//!
//! Game-side pools built on [`reservoir_core`].
//!
//! ## Modules
//!
//! - `effects`: pooled one-shot sounds and visual effects
//! - `menu`: rows of the load-game menu
//! - `services`: owns every pool and initializes them in order
//!
//! ## Example
//!
//! ```rust,ignore
//! let config = ServicesConfig::from_toml_str(&std::fs::read_to_string("pools.toml")?)?;
//! let mut services = Services::new(config);
//! services.initialize()?;
//!
//! services.play_sound("explosion", 0.8, 1.2);
//! services.spawn_effect("smoke", [0.0, 1.0, 0.0]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod effects;
pub mod menu;
pub mod services;

// Re-export the pooling primitive
pub use reservoir_core as core;

pub use effects::{visual_effect_library, SoundEffect, VisualEffect, VISUAL_EFFECT_KINDS};
pub use menu::{SaveSlotRow, SaveSummary};
pub use services::{Services, ServicesConfig, ServicesError, ServicesResult};
