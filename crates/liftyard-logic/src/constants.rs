//! Warehouse constants - box kinds, shelf zones, slot layout.
//!
//! These are simple `#[repr(u8)]` enums with no engine dependency. Both the
//! native engine and the headless simtest use these.

use serde::{Deserialize, Serialize};

/// Number of distinct box kinds.
pub const KIND_COUNT: usize = 4;

/// Number of shelf zones (the mixed catch-all plus one per kind).
pub const ZONE_COUNT: usize = 5;

/// Fixed sub-positions a single shelf offers for boxes.
///
/// The exact offsets (3 columns × 4 levels) belong to the rendering side;
/// the core only needs the count.
pub const SLOTS_PER_SHELF: usize = 12;

/// A kind of box stocked in the warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BoxKind {
    Blue = 0,
    Green = 1,
    Yellow = 2,
    Red = 3,
}

impl BoxKind {
    pub const ALL: [BoxKind; KIND_COUNT] = [
        BoxKind::Blue,
        BoxKind::Green,
        BoxKind::Yellow,
        BoxKind::Red,
    ];

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Blue),
            1 => Some(Self::Green),
            2 => Some(Self::Yellow),
            3 => Some(Self::Red),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }

    /// The dedicated zone that holds this kind.
    pub fn home_zone(&self) -> Zone {
        match self {
            Self::Blue => Zone::Blue,
            Self::Green => Zone::Green,
            Self::Yellow => Zone::Yellow,
            Self::Red => Zone::Red,
        }
    }
}

/// A shelf zone: a contiguous run of rows holding one kind, or the mixed
/// catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Zone {
    Mixed = 0,
    Blue = 1,
    Green = 2,
    Yellow = 3,
    Red = 4,
}

impl Zone {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Mixed),
            1 => Some(Self::Blue),
            2 => Some(Self::Green),
            3 => Some(Self::Yellow),
            4 => Some(Self::Red),
            _ => None,
        }
    }

    /// The kind this zone is reserved for, or `None` for the mixed zone.
    pub fn kind(&self) -> Option<BoxKind> {
        match self {
            Self::Mixed => None,
            Self::Blue => Some(BoxKind::Blue),
            Self::Green => Some(BoxKind::Green),
            Self::Yellow => Some(BoxKind::Yellow),
            Self::Red => Some(BoxKind::Red),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mixed => "Mixed",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::Mixed
    }
}
