//! # Load-Game Menu Rows
//!
//! One row per save slot. Row `i` of the menu is always pool entity `i`, so
//! rebinding the list never shuffles rows around.

use reservoir_core::{Occupancy, PooledEntity};

/// What the menu shows for one save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSummary {
    /// Save slot number.
    pub slot: u32,
    /// Player-facing save title.
    pub title: String,
    /// Total play time.
    pub play_time_minutes: u32,
}

/// A menu row backed by the ordered pool.
#[derive(Debug, Default)]
pub struct SaveSlotRow {
    occupancy: Occupancy,
    visible: bool,
    slot: Option<u32>,
    label: String,
}

impl SaveSlotRow {
    /// A row placed in the layout ahead of time, e.g. a design preview.
    #[must_use]
    pub fn preplaced(label: &str, visible: bool) -> Self {
        Self {
            label: label.to_owned(),
            visible,
            ..Self::default()
        }
    }

    /// Shows `summary` on this row.
    pub fn bind(&mut self, summary: &SaveSummary) {
        self.slot = Some(summary.slot);
        self.label = format!(
            "Slot {} - {} ({}h{:02})",
            summary.slot,
            summary.title,
            summary.play_time_minutes / 60,
            summary.play_time_minutes % 60
        );
    }

    /// Text currently shown.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Bound save slot.
    #[must_use]
    pub fn slot(&self) -> Option<u32> {
        self.slot
    }

    /// Whether the row is drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl PooledEntity for SaveSlotRow {
    fn is_in_use(&self) -> bool {
        self.occupancy.is_in_use()
    }

    fn acquire(&mut self) {
        self.occupancy.acquire();
        self.visible = true;
    }

    fn release(&mut self) {
        self.occupancy.release();
        self.visible = false;
        self.slot = None;
    }
}
