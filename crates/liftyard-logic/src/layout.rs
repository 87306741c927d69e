//! Row-to-zone partitioning and derived shelf spacing.
//!
//! Pure arithmetic — no randomness. The partition walks the configured zone
//! row counts in zone order and paints consecutive rows; spacing is derived
//! from the building footprint and the shelf grid.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigWarning, RoundConfig};
use crate::constants::{Zone, ZONE_COUNT};

/// Footprint of a single shelf along the aisle axis, in metres.
pub const SHELF_WIDTH: f32 = 4.0;

/// Gap metrics derived from the building size and the shelf grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// Free aisle depth between neighbouring shelf rows.
    pub row_gap: f32,
    /// Clearance between the outermost shelf column and the wall.
    pub wall_clearance: f32,
}

impl Spacing {
    pub fn derive(config: &RoundConfig) -> Self {
        let (width, depth) = config.building_size;
        let rows = config.shelf_rows as f32;
        let columns = config.shelf_columns as f32;
        Self {
            row_gap: (depth - rows) / (rows + 1.0),
            wall_clearance: (width - columns * SHELF_WIDTH) / 2.0,
        }
    }
}

/// Assigns a zone to every shelf row.
///
/// Walks `zone_rows` in zone order (mixed first, then one zone per kind) and
/// paints consecutive row indices. If the configured counts would run past
/// the end of the grid the walk stops there: rows painted so far keep their
/// zone, everything after stays [`Zone::Mixed`], and a
/// [`ConfigWarning::ZoneOverflow`] is returned. Never panics.
pub fn plan_rows(
    shelf_rows: u32,
    zone_rows: &[u32; ZONE_COUNT],
) -> (Vec<Zone>, Option<ConfigWarning>) {
    let mut map = vec![Zone::Mixed; shelf_rows as usize];
    let mut cursor = 0usize;
    let mut warning = None;

    'zones: for (zone_id, &count) in zone_rows.iter().enumerate() {
        // Safe: zone_id ranges over exactly the Zone discriminants.
        let zone = Zone::from_u8(zone_id as u8).unwrap_or_default();
        for _ in 0..count {
            if cursor >= map.len() {
                warning = Some(ConfigWarning::ZoneOverflow {
                    assigned: cursor as u32,
                    shelf_rows,
                });
                break 'zones;
            }
            map[cursor] = zone;
            cursor += 1;
        }
    }

    (map, warning)
}
