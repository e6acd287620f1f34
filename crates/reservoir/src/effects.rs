//! # Pooled Effects
//!
//! Short-lived, high-frequency objects: one-shot sounds and visual effects.
//! Both play for a fixed duration, then release themselves on the frame they
//! finish.

use reservoir_core::{Occupancy, PooledEntity, TemplateLibrary};

/// A one-shot sound player.
#[derive(Debug, Default)]
pub struct SoundEffect {
    occupancy: Occupancy,
    clip: Option<String>,
    volume: f32,
    remaining: f32,
    /// Times this instance was used. Shows recycling at work.
    plays: u32,
}

impl SoundEffect {
    /// Starts playing `clip`. The effect must be acquired first.
    pub fn play(&mut self, clip: &str, volume: f32, duration: f32) {
        debug_assert!(self.is_in_use(), "playing a free sound effect");
        self.clip = Some(clip.to_owned());
        self.volume = volume.clamp(0.0, 1.0);
        self.remaining = duration;
        self.plays += 1;
    }

    /// Advances playback. Releases the effect once the clip is over.
    pub fn tick(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.release();
        }
    }

    /// Clip being played, if any.
    #[must_use]
    pub fn clip(&self) -> Option<&str> {
        self.clip.as_deref()
    }

    /// Playback volume in `[0, 1]`.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// How many times this instance has played.
    #[must_use]
    pub fn plays(&self) -> u32 {
        self.plays
    }
}

impl PooledEntity for SoundEffect {
    fn is_in_use(&self) -> bool {
        self.occupancy.is_in_use()
    }

    fn acquire(&mut self) {
        self.occupancy.acquire();
    }

    fn release(&mut self) {
        self.occupancy.release();
        self.clip = None;
        self.remaining = 0.0;
    }
}

/// A particle burst built from one template kind.
#[derive(Debug)]
pub struct VisualEffect {
    kind: &'static str,
    lifetime: f32,
    occupancy: Occupancy,
    position: [f32; 3],
    remaining: f32,
    /// Set by `init_once`; template instances start unprepared.
    prepared: bool,
}

impl VisualEffect {
    /// Blueprint for one effect kind.
    #[must_use]
    pub fn blueprint(kind: &'static str, lifetime: f32) -> Self {
        Self {
            kind,
            lifetime,
            occupancy: Occupancy::new(),
            position: [0.0; 3],
            remaining: 0.0,
            prepared: false,
        }
    }

    /// Places the effect and restarts its lifetime.
    pub fn spawn_at(&mut self, position: [f32; 3]) {
        debug_assert!(self.is_in_use(), "spawning a free visual effect");
        self.position = position;
        self.remaining = self.lifetime;
    }

    /// Advances the effect. Releases it once its lifetime is over.
    pub fn tick(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.release();
        }
    }

    /// Template kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// World position of the burst.
    #[must_use]
    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    /// Returns true once the pool ran `init_once`.
    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }
}

impl PooledEntity for VisualEffect {
    fn init_once(&mut self) {
        self.prepared = true;
    }

    fn is_in_use(&self) -> bool {
        self.occupancy.is_in_use()
    }

    fn acquire(&mut self) {
        self.occupancy.acquire();
    }

    fn release(&mut self) {
        self.occupancy.release();
        self.remaining = 0.0;
    }
}

/// Every visual effect kind shipped with the game, with its lifetime in
/// seconds.
pub const VISUAL_EFFECT_KINDS: [(&str, f32); 3] = [("explosion", 1.5), ("smoke", 3.0), ("spark", 0.25)];

/// Template library holding one blueprint per entry of [`VISUAL_EFFECT_KINDS`].
#[must_use]
pub fn visual_effect_library() -> TemplateLibrary<VisualEffect> {
    let mut library = TemplateLibrary::new();
    for (kind, lifetime) in VISUAL_EFFECT_KINDS {
        library.register(kind, move || VisualEffect::blueprint(kind, lifetime));
    }
    library
}
