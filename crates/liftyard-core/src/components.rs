//! ECS components for generated warehouse structure.

use liftyard_logic::constants::{BoxKind, Zone};
use serde::{Deserialize, Serialize};

/// Shelf row component - one row of shelves spanning all columns.
///
/// Immutable after generation; the zone assignment is what entry events are
/// verified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfRow {
    pub index: u32,
    pub zone: Zone,
}

impl ShelfRow {
    pub fn new(index: u32, zone: Zone) -> Self {
        Self { index, zone }
    }
}

/// Box component - a single placed box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxItem {
    pub kind: BoxKind,
}

impl BoxItem {
    pub fn new(kind: BoxKind) -> Self {
        Self { kind }
    }
}

/// Where a box was generated: shelf grid cell plus the slot inside it.
///
/// Boxes are never reassigned a slot; this records their starting position
/// for the rendering side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRef {
    pub row: u32,
    pub column: u32,
    pub slot: u32,
}

impl SlotRef {
    pub fn new(row: u32, column: u32, slot: u32) -> Self {
        Self { row, column, slot }
    }
}
