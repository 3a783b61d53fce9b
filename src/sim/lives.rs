//! Lives displays
//!
//! Two read-only views of the lives counter, refreshed by the orchestrator
//! at the end of every frame: a row of heart icons and a numeric readout
//! that changes color as lives run out. Pure data; drawing them is the
//! renderer's problem.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVES;

/// A view of the lives counter
pub trait LivesDisplay {
    fn refresh(&mut self, lives: u32);
}

/// One icon per remaining life, up to the cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconRow {
    pub shown: u32,
    pub capacity: u32,
}

impl IconRow {
    pub fn new(capacity: u32) -> Self {
        Self { shown: 0, capacity }
    }
}

impl LivesDisplay for IconRow {
    fn refresh(&mut self, lives: u32) {
        self.shown = lives.min(self.capacity);
    }
}

/// Readout color tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivesColor {
    Green,
    Yellow,
    Red,
}

/// Numeric lives readout with a color that tracks urgency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericReadout {
    pub text: String,
    pub color: LivesColor,
}

impl NumericReadout {
    pub fn new(lives: u32) -> Self {
        let mut readout = Self {
            text: String::new(),
            color: LivesColor::Green,
        };
        readout.refresh(lives);
        readout
    }
}

impl LivesDisplay for NumericReadout {
    fn refresh(&mut self, lives: u32) {
        self.text = lives.to_string();
        self.color = match lives {
            1 => LivesColor::Red,
            2 => LivesColor::Yellow,
            _ => LivesColor::Green,
        };
    }
}

/// Both displays, refreshed together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivesPanel {
    pub icons: IconRow,
    pub numeric: NumericReadout,
}

impl LivesPanel {
    pub fn new(lives: u32) -> Self {
        let mut icons = IconRow::new(MAX_LIVES);
        icons.refresh(lives);
        Self {
            icons,
            numeric: NumericReadout::new(lives),
        }
    }

    pub fn refresh(&mut self, lives: u32) {
        self.icons.refresh(lives);
        self.numeric.refresh(lives);
    }
}
