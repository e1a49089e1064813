//! Fixed maze literals and their translation into region placements.

use clap::ValueEnum;
use pantry_maze_core::{Command, IngredientKind, ObstacleKind, RegionId, RegionKind};
use thiserror::Error;

use crate::config::PickupDurations;

const TUTORIAL: &[&str] = &[
    "#############",
    "#...B...~~..#",
    "#..#..#.....#",
    "#..#..#...R.#",
    "#..#I.#.#...#",
    "#..#..#.#.W.#",
    "#..#..#.#...#",
    "#S..C...#.C.#",
    "#############",
];

const KITCHEN: &[&str] = &[
    "###############",
    "#S..C..#...H..#",
    "#.##.#.I.#.##.#",
    "#.#..#.#.#..~.#",
    "#.#.B#~~~#R.#.#",
    "#...##.O.##W#.#",
    "#.G..........W#",
    "###############",
];

/// Levels bundled with the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LevelKind {
    /// Guided introduction to every ability.
    Tutorial,
    /// Timed level using every ingredient.
    Kitchen,
}

impl LevelKind {
    fn rows(self) -> &'static [&'static str] {
        match self {
            Self::Tutorial => TUTORIAL,
            Self::Kitchen => KITCHEN,
        }
    }

    /// Parses the level's maze literal.
    pub(crate) fn layout(self, pickups: &PickupDurations) -> Result<Layout, LayoutError> {
        Layout::parse(self.rows(), pickups)
    }
}

/// Location of a maze cell in columns and rows from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) column: u32,
    pub(crate) row: u32,
}

/// Trigger region found in the maze literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Placement {
    pub(crate) region: RegionId,
    pub(crate) kind: RegionKind,
    pub(crate) cell: Cell,
}

/// Parsed maze literal.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Layout {
    spawn: Cell,
    placements: Vec<Placement>,
    walls: usize,
}

/// Reasons a maze literal is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LayoutError {
    /// A cell used a glyph with no meaning.
    #[error("unknown glyph '{glyph}' at row {row}, column {column}")]
    UnknownGlyph { glyph: char, row: u32, column: u32 },
    /// No cell marked the spawn point.
    #[error("maze has no spawn point")]
    MissingSpawn,
    /// More than one cell marked the spawn point.
    #[error("second spawn point at row {row}, column {column}")]
    DuplicateSpawn { row: u32, column: u32 },
}

impl Layout {
    /// Parses rows of glyphs, numbering regions in reading order from one.
    pub(crate) fn parse(rows: &[&str], pickups: &PickupDurations) -> Result<Self, LayoutError> {
        let mut spawn = None;
        let mut placements = Vec::new();
        let mut walls = 0;
        let mut next_region = 1;

        for (row, line) in (0u32..).zip(rows) {
            for (column, glyph) in (0u32..).zip(line.chars()) {
                let cell = Cell { column, row };
                let kind = match glyph {
                    '#' => {
                        walls += 1;
                        continue;
                    }
                    '.' | ' ' | 'O' => continue,
                    'S' => {
                        if spawn.replace(cell).is_some() {
                            return Err(LayoutError::DuplicateSpawn { row, column });
                        }
                        continue;
                    }
                    'C' => pickup(IngredientKind::Chili, pickups),
                    'B' => pickup(IngredientKind::Butter, pickups),
                    'R' => pickup(IngredientKind::Bread, pickups),
                    'G' => pickup(IngredientKind::Garlic, pickups),
                    'H' => pickup(IngredientKind::Honey, pickups),
                    'I' => RegionKind::Obstacle {
                        kind: ObstacleKind::MeltableWall,
                    },
                    'W' => RegionKind::Obstacle {
                        kind: ObstacleKind::SoakableWater,
                    },
                    '~' => RegionKind::StickyZone,
                    glyph => return Err(LayoutError::UnknownGlyph { glyph, row, column }),
                };

                placements.push(Placement {
                    region: RegionId::new(next_region),
                    kind,
                    cell,
                });
                next_region += 1;
            }
        }

        let spawn = spawn.ok_or(LayoutError::MissingSpawn)?;
        Ok(Self {
            spawn,
            placements,
            walls,
        })
    }

    /// Cell the player starts on.
    pub(crate) fn spawn(&self) -> Cell {
        self.spawn
    }

    /// Regions in reading order.
    pub(crate) fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of wall cells.
    pub(crate) fn walls(&self) -> usize {
        self.walls
    }

    /// Commands that place every region into a world.
    pub(crate) fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.placements.iter().map(|placement| Command::PlaceRegion {
            region: placement.region,
            kind: placement.kind,
        })
    }
}

fn pickup(ingredient: IngredientKind, pickups: &PickupDurations) -> RegionKind {
    RegionKind::Pickup {
        ingredient,
        duration: pickups.duration(ingredient),
    }
}
