//! Vessel classes, their shapes, and the mutable per-round fleet.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::CellSet;
use crate::common::BoardError;
use crate::config::FLEET;
use crate::geometry::{Cell, Offset, Rotation, DIRECTIONS};

/// Class of a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum VesselClass {
    Destroyer,
    Cruiser,
    Battleship,
    Carrier,
    Hovercraft,
}

const DESTROYER: [Offset; 2] = [(0, 0), (1, 0)];
const CRUISER: [Offset; 3] = [(0, 0), (0, 1), (0, 2)];
const BATTLESHIP: [Offset; 4] = [(0, 0), (0, 1), (0, 2), (0, 3)];
const CARRIER: [Offset; 6] = [(-1, -1), (1, -1), (0, -1), (0, 0), (0, 1), (0, 2)];
const HOVERCRAFT: [Offset; 6] = [(-1, 0), (0, 0), (0, -1), (0, 1), (1, -1), (1, 1)];

impl VesselClass {
    pub fn name(&self) -> &'static str {
        match self {
            VesselClass::Destroyer => "Destroyer",
            VesselClass::Cruiser => "Cruiser",
            VesselClass::Battleship => "Battleship",
            VesselClass::Carrier => "Carrier",
            VesselClass::Hovercraft => "Hovercraft",
        }
    }

    /// Canonical footprint relative to the anchor at `(0, 0)`.
    pub fn offsets(&self) -> &'static [Offset] {
        match self {
            VesselClass::Destroyer => &DESTROYER,
            VesselClass::Cruiser => &CRUISER,
            VesselClass::Battleship => &BATTLESHIP,
            VesselClass::Carrier => &CARRIER,
            VesselClass::Hovercraft => &HOVERCRAFT,
        }
    }

    pub fn size(&self) -> usize {
        self.offsets().len()
    }
}

impl fmt::Display for VesselClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn has(cells: &[Offset], (r, c): Offset) -> bool {
    cells.contains(&(r, c))
}

/// Identify the vessel class of a footprint in any orientation or position.
///
/// Two-, three- and four-cell footprints are classified by size alone. The two
/// six-cell classes share a hub cell with three neighbours; in the Carrier the
/// hub's stem continues straight on for another cell, in the Hovercraft it
/// does not.
pub fn classify_shape(cells: &[Offset]) -> Result<VesselClass, BoardError> {
    let malformed = BoardError::MalformedShape { cells: cells.len() };
    match cells.len() {
        2 => return Ok(VesselClass::Destroyer),
        3 => return Ok(VesselClass::Cruiser),
        4 => return Ok(VesselClass::Battleship),
        6 => {}
        _ => return Err(malformed),
    }

    let neighbours = |&(r, c): &Offset| {
        DIRECTIONS
            .iter()
            .filter(|&&(dr, dc)| has(cells, (r + dr, c + dc)))
            .count()
    };
    let mut hubs = cells.iter().filter(|&&cell| neighbours(&cell) == 3);
    let hub = match (hubs.next(), hubs.next()) {
        (Some(&hub), None) => hub,
        _ => return Err(malformed),
    };

    let (hr, hc) = hub;
    let stem = DIRECTIONS.iter().find(|&&(dr, dc)| {
        has(cells, (hr + dr, hc + dc)) && !has(cells, (hr - dr, hc - dc))
    });
    match stem {
        Some(&(dr, dc)) if has(cells, (hr + 2 * dr, hc + 2 * dc)) => Ok(VesselClass::Carrier),
        Some(_) => Ok(VesselClass::Hovercraft),
        None => Err(malformed),
    }
}

/// Footprint classification for absolute cells, e.g. a resolved hit region.
pub fn classify_cells(cells: &CellSet) -> Result<VesselClass, BoardError> {
    let offsets: Vec<Offset> = cells.iter().map(|c| (c.row, c.col)).collect();
    classify_shape(&offsets)
}

/// Sort and translate so the first cell sits at the origin.
fn normalize(mut cells: Vec<Offset>) -> Vec<Offset> {
    cells.sort_unstable();
    if let Some(&(r0, c0)) = cells.first() {
        for cell in cells.iter_mut() {
            *cell = (cell.0 - r0, cell.1 - c0);
        }
    }
    cells
}

/// A vessel's footprint together with its distinct orientations.
#[derive(Clone, PartialEq, Eq)]
pub struct Shape {
    class: VesselClass,
    offsets: Vec<Offset>,
    orientations: Vec<Vec<Offset>>,
}

impl Shape {
    /// Build a shape from raw offsets, classifying it on the way.
    pub fn new(offsets: &[Offset]) -> Result<Self, BoardError> {
        let class = classify_shape(offsets)?;
        Ok(Self::from_parts(class, offsets))
    }

    /// The standard footprint of `class`.
    pub fn canonical(class: VesselClass) -> Self {
        debug_assert_eq!(classify_shape(class.offsets()), Ok(class));
        Self::from_parts(class, class.offsets())
    }

    fn from_parts(class: VesselClass, offsets: &[Offset]) -> Self {
        let mut orientations: Vec<Vec<Offset>> = Vec::new();
        for rotation in Rotation::ALL {
            let turned = normalize(offsets.iter().map(|&o| rotation.apply(o)).collect());
            if !orientations.contains(&turned) {
                orientations.push(turned);
            }
        }
        Self {
            class,
            offsets: offsets.to_vec(),
            orientations,
        }
    }

    pub fn class(&self) -> VesselClass {
        self.class
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    pub fn size(&self) -> usize {
        self.offsets.len()
    }

    /// Rotations that produce distinct footprints, each normalised.
    pub fn orientations(&self) -> &[Vec<Offset>] {
        &self.orientations
    }

    /// Cells covered when the canonical footprint is rotated about its
    /// anchor and the anchor is placed on `anchor`.
    pub fn place(&self, anchor: Cell, rotation: Rotation) -> impl Iterator<Item = Cell> + '_ {
        self.offsets.iter().map(move |&o| anchor + rotation.apply(o))
    }

    /// Every translated orientation that covers `cell`, as raw cell lists.
    /// Cells are not checked for validity.
    pub fn placements_covering(&self, cell: Cell) -> impl Iterator<Item = Vec<Cell>> + '_ {
        self.orientations.iter().flat_map(move |orientation| {
            orientation.iter().map(move |&(pr, pc)| {
                let anchor = Cell::new(cell.row - pr, cell.col - pc);
                orientation.iter().map(|&o| anchor + o).collect()
            })
        })
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape {{ class: {}, offsets: {:?}, orientations: {} }}",
            self.class,
            self.offsets,
            self.orientations.len()
        )
    }
}

/// The vessels still unaccounted for on one side. Only ever shrinks within a
/// round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    shapes: Vec<Shape>,
}

impl Fleet {
    /// The full standard fleet in deployment order.
    pub fn full() -> Self {
        Self {
            shapes: FLEET.iter().map(|&class| Shape::canonical(class)).collect(),
        }
    }

    /// A fleet of arbitrary footprints.
    pub fn from_shapes(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes in reverse order, used to escape search-order bias.
    pub fn reversed(&self) -> Vec<Shape> {
        self.shapes.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, class: VesselClass) -> bool {
        self.shapes.iter().any(|s| s.class == class)
    }

    /// Strike the first vessel of `class` off the fleet.
    pub fn remove(&mut self, class: VesselClass) -> bool {
        match self.shapes.iter().position(|s| s.class == class) {
            Some(idx) => {
                self.shapes.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.shapes.iter().map(Shape::size).sum()
    }

    pub fn classes(&self) -> impl Iterator<Item = VesselClass> + '_ {
        self.shapes.iter().map(|s| s.class)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::full()
    }
}
