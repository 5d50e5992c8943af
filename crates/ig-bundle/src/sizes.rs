//! Fixed icon sizes and the platform file names derived from them.

use serde::{Deserialize, Serialize};

/// One target grid size with its finest cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub size: usize,
    pub cell: usize,
}

impl SizeEntry {
    pub const fn new(size: usize, cell: usize) -> Self {
        Self { size, cell }
    }

    /// Selectable cell sizes, finest first: `[c, 2c, 4c]`.
    pub fn cell_steps(&self) -> [usize; 3] {
        [self.cell, self.cell * 2, self.cell * 4]
    }

    pub fn cell_for_step(&self, step: usize) -> Option<usize> {
        self.cell_steps().get(step).copied()
    }
}

pub const STEP_COUNT: usize = 3;

/// Reference sizes and their default cell sizes.
pub const REFERENCE_SIZES: [SizeEntry; 9] = [
    SizeEntry::new(16, 1),
    SizeEntry::new(32, 2),
    SizeEntry::new(64, 4),
    SizeEntry::new(128, 8),
    SizeEntry::new(150, 10),
    SizeEntry::new(180, 15),
    SizeEntry::new(192, 8),
    SizeEntry::new(256, 16),
    SizeEntry::new(512, 32),
];

/// Which encoding of a size an alias copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasSource {
    Raster,
    Vector,
    /// Raster bytes, or a real ICO container when configured.
    Favicon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    pub size: usize,
    pub name: &'static str,
    pub source: AliasSource,
}

pub const ALIASES: [Alias; 5] = [
    Alias {
        size: 32,
        name: "favicon.ico",
        source: AliasSource::Favicon,
    },
    Alias {
        size: 150,
        name: "mstile-150x150.png",
        source: AliasSource::Raster,
    },
    Alias {
        size: 180,
        name: "apple-touch-icon.png",
        source: AliasSource::Raster,
    },
    Alias {
        size: 192,
        name: "icon-192.png",
        source: AliasSource::Raster,
    },
    Alias {
        size: 256,
        name: "safari-pinned-tab.svg",
        source: AliasSource::Vector,
    },
];

pub fn aliases_for(size: usize) -> impl Iterator<Item = &'static Alias> {
    ALIASES.iter().filter(move |a| a.size == size)
}

pub fn png_name(size: usize) -> String {
    format!("icon-{size}x{size}.png")
}

pub fn svg_name(size: usize) -> String {
    format!("icon-{size}x{size}.svg")
}
