//! Warehouse generation - shelf rows and the seeded box population.
//!
//! The planner partitions rows into zones, then the sampler walks every slot
//! of every shelf and rolls whether a box occupies it. All randomness comes
//! from one stream per round, so a fixed seed reproduces the floor exactly.

use hecs::{Entity, World};
use liftyard_logic::config::{ConfigWarning, RoundConfig, TaskKind};
use liftyard_logic::constants::{BoxKind, Zone, KIND_COUNT, SLOTS_PER_SHELF};
use liftyard_logic::layout::{plan_rows, Spacing};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{BoxItem, ShelfRow, SlotRef};

/// Placed-box entities grouped by kind.
pub type PlacedBoxes = [Vec<Entity>; KIND_COUNT];

/// What a generation pass produced, for the host and for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "'de: 'static"))]
pub struct GenerateSummary {
    pub zone_map: Vec<Zone>,
    pub spacing: Spacing,
    pub placed_per_kind: [usize; KIND_COUNT],
    pub warnings: Vec<ConfigWarning>,
}

/// Spawns one `ShelfRow` entity per row, zoned by the configured partition.
pub fn spawn_shelf_rows(
    world: &mut World,
    config: &RoundConfig,
) -> (Vec<Entity>, Vec<Zone>, Option<ConfigWarning>) {
    let (zone_map, warning) = plan_rows(config.shelf_rows, &config.zone_rows);

    let rows = zone_map
        .iter()
        .enumerate()
        .map(|(index, &zone)| world.spawn((ShelfRow::new(index as u32, zone),)))
        .collect();

    (rows, zone_map, warning)
}

/// Rolls the box population for every shelf slot.
///
/// Fetch rounds stock the typed zones: each slot of a kind's zone holds a box
/// of that kind with the kind's own weight. Sort rounds stock the mixed zone:
/// each slot first draws a kind uniformly, then that kind's weight decides
/// whether the box appears at all. The second form deliberately is not a
/// normalised weighted choice between kinds.
pub fn populate_boxes(
    world: &mut World,
    config: &RoundConfig,
    zone_map: &[Zone],
    rng: &mut impl Rng,
) -> PlacedBoxes {
    let mut placed: PlacedBoxes = Default::default();

    for (row, &zone) in zone_map.iter().enumerate() {
        for column in 0..config.shelf_columns {
            match config.task {
                TaskKind::Fetch => {
                    let Some(kind) = zone.kind() else { continue };
                    for slot in 0..SLOTS_PER_SHELF as u32 {
                        if config.kind_weight[kind as usize] > rng.gen::<f32>() {
                            spawn_box(world, &mut placed, kind, row as u32, column, slot);
                        }
                    }
                }
                TaskKind::Sort => {
                    if zone != Zone::Mixed {
                        continue;
                    }
                    for slot in 0..SLOTS_PER_SHELF as u32 {
                        let pick = rng.gen_range(0..KIND_COUNT as u8);
                        // Safe: pick < KIND_COUNT.
                        let kind = BoxKind::from_u8(pick).unwrap_or(BoxKind::Blue);
                        if config.kind_weight[kind as usize] > rng.gen::<f32>() {
                            spawn_box(world, &mut placed, kind, row as u32, column, slot);
                        }
                    }
                }
            }
        }
    }

    placed
}

fn spawn_box(
    world: &mut World,
    placed: &mut PlacedBoxes,
    kind: BoxKind,
    row: u32,
    column: u32,
    slot: u32,
) {
    let entity = world.spawn((BoxItem::new(kind), SlotRef::new(row, column, slot)));
    placed[kind as usize].push(entity);
}
