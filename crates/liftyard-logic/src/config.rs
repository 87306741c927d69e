//! Round configuration - task type, generation parameters, templates.
//!
//! External frontends feed arbitrary numeric input here; [`RoundConfig::sanitize`]
//! clamps every field into its documented range so the engine never sees a
//! value it has to defend against. [`RoundConfig::audit`] reproduces the
//! pre-round setup warnings shown to instructors.

use serde::{Deserialize, Serialize};

use crate::constants::{BoxKind, Zone, KIND_COUNT, ZONE_COUNT};

/// Sentinel seed requesting a non-deterministic round.
pub const SEED_RANDOM: i64 = -1;

/// What the trainee is asked to do with the boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TaskKind {
    /// Boxes start in the mixed zone and must be sorted into their kind zones.
    Sort = 0,
    /// Boxes start in their kind zones and a subset must be fetched to the
    /// mixed zone.
    Fetch = 1,
}

impl TaskKind {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Sort),
            1 => Some(Self::Fetch),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sort => "Sort",
            Self::Fetch => "Fetch",
        }
    }
}

/// Non-fatal problems found in a configuration. Generation always proceeds;
/// these are surfaced so the operator can fix the setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigWarning {
    /// Zone row counts index past the available shelf rows; the partition was
    /// truncated and the remaining rows stay mixed.
    ZoneOverflow { assigned: u32, shelf_rows: u32 },
    /// Zone row counts do not add up to the shelf row count.
    ZoneSumMismatch { zone_sum: u32, shelf_rows: u32 },
    /// No kind is enabled, so no typed zone will receive boxes.
    NoActiveKinds,
    /// Fetch rounds need mixed-zone capacity for every enabled kind.
    MixedZoneUndersized { mixed_rows: u32, active_kinds: u32 },
    /// Sort rounds need at least as much typed-zone capacity as mixed capacity.
    TypedZonesUndersized { mixed_rows: u32, typed_rows: u32 },
    /// A numeric field was outside its valid range and was clamped.
    FieldClamped { field: &'static str },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZoneOverflow {
                assigned,
                shelf_rows,
            } => write!(
                f,
                "zone rows overflow the shelf grid ({} assigned, {} rows available)",
                assigned, shelf_rows
            ),
            Self::ZoneSumMismatch {
                zone_sum,
                shelf_rows,
            } => write!(
                f,
                "zone rows sum to {} but there are {} shelf rows",
                zone_sum, shelf_rows
            ),
            Self::NoActiveKinds => write!(f, "no box kinds are enabled"),
            Self::MixedZoneUndersized {
                mixed_rows,
                active_kinds,
            } => write!(
                f,
                "mixed zone has {} rows for {} active kinds; fetched boxes may not fit",
                mixed_rows, active_kinds
            ),
            Self::TypedZonesUndersized {
                mixed_rows,
                typed_rows,
            } => write!(
                f,
                "mixed zone ({} rows) outweighs typed zones ({} rows); sorted boxes may not fit",
                mixed_rows, typed_rows
            ),
            Self::FieldClamped { field } => write!(f, "{} was out of range and clamped", field),
        }
    }
}

/// Everything needed to generate and score one training round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// RNG seed; [`SEED_RANDOM`] requests a fresh entropy-seeded stream.
    pub seed: i64,
    pub task: TaskKind,
    /// Fetch mode: percentage of placed boxes pulled into the job set (20-100).
    pub completion_percent: u8,
    /// Interior footprint in metres (width, depth).
    pub building_size: (f32, f32),
    pub shelf_columns: u32,
    pub shelf_rows: u32,
    /// Which kinds participate in this round.
    pub kind_enabled: [bool; KIND_COUNT],
    /// Per-kind placement probability, 0-1.
    pub kind_weight: [f32; KIND_COUNT],
    /// Rows allotted per zone; index 0 is the mixed zone, 1-4 follow
    /// [`Zone`] ids.
    pub zone_rows: [u32; ZONE_COUNT],
    pub time_limit_secs: f64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            seed: SEED_RANDOM,
            task: TaskKind::Fetch,
            completion_percent: 50,
            building_size: (24.0, 48.0),
            shelf_columns: 3,
            shelf_rows: 6,
            kind_enabled: [true; KIND_COUNT],
            kind_weight: [0.5; KIND_COUNT],
            zone_rows: [2, 1, 1, 1, 1],
            time_limit_secs: 15.0 * 60.0,
        }
    }
}

impl RoundConfig {
    /// Builds a time limit from an hours/minutes/seconds triple, clamping
    /// each component to 0-60 the way the setup screen does.
    pub fn time_limit_hms(hours: f64, minutes: f64, seconds: f64) -> f64 {
        let h = hours.clamp(0.0, 60.0);
        let m = minutes.clamp(0.0, 60.0);
        let s = seconds.clamp(0.0, 60.0);
        h * 3600.0 + m * 60.0 + s
    }

    /// Clamps every field into its valid range, in place. Returns a warning
    /// per adjusted field. Disabled kinds are zero-weighted and lose their
    /// zone rows, so they can never place a box.
    pub fn sanitize(&mut self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut clamp_f32 = |field: &'static str, val: &mut f32, lo: f32, hi: f32| {
            let clamped = val.clamp(lo, hi);
            if (clamped - *val).abs() > f32::EPSILON {
                warnings.push(ConfigWarning::FieldClamped { field });
            }
            *val = clamped;
        };

        clamp_f32("building width", &mut self.building_size.0, 8.0, 100.0);
        clamp_f32("building depth", &mut self.building_size.1, 8.0, 100.0);
        for i in 0..KIND_COUNT {
            clamp_f32("kind weight", &mut self.kind_weight[i], 0.0, 1.0);
        }

        if !(20..=100).contains(&self.completion_percent) {
            self.completion_percent = self.completion_percent.clamp(20, 100);
            warnings.push(ConfigWarning::FieldClamped {
                field: "completion percent",
            });
        }
        if !(1..=100).contains(&self.shelf_columns) {
            self.shelf_columns = self.shelf_columns.clamp(1, 100);
            warnings.push(ConfigWarning::FieldClamped {
                field: "shelf columns",
            });
        }
        if !(1..=100).contains(&self.shelf_rows) {
            self.shelf_rows = self.shelf_rows.clamp(1, 100);
            warnings.push(ConfigWarning::FieldClamped { field: "shelf rows" });
        }
        for rows in self.zone_rows.iter_mut() {
            if *rows > 999 {
                *rows = 999;
                warnings.push(ConfigWarning::FieldClamped { field: "zone rows" });
            }
        }
        if self.time_limit_secs < 1.0 {
            self.time_limit_secs = 1.0;
            warnings.push(ConfigWarning::FieldClamped { field: "time limit" });
        }

        for kind in BoxKind::ALL {
            let i = kind as usize;
            if !self.kind_enabled[i] {
                self.kind_weight[i] = 0.0;
                self.zone_rows[kind.home_zone() as usize] = 0;
            }
        }

        warnings
    }

    /// Pre-round setup audit: capacity and balance warnings shown to the
    /// operator before generation.
    pub fn audit(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        let active_kinds = self.kind_enabled.iter().filter(|e| **e).count() as u32;
        let typed_rows: u32 = BoxKind::ALL
            .iter()
            .filter(|k| self.kind_enabled[**k as usize])
            .map(|k| self.zone_rows[k.home_zone() as usize])
            .sum();
        let mixed_rows = self.zone_rows[Zone::Mixed as usize];
        let zone_sum = mixed_rows + typed_rows;

        if active_kinds == 0 {
            warnings.push(ConfigWarning::NoActiveKinds);
        }
        if zone_sum != self.shelf_rows {
            warnings.push(ConfigWarning::ZoneSumMismatch {
                zone_sum,
                shelf_rows: self.shelf_rows,
            });
        }
        match self.task {
            TaskKind::Fetch => {
                if mixed_rows < active_kinds {
                    warnings.push(ConfigWarning::MixedZoneUndersized {
                        mixed_rows,
                        active_kinds,
                    });
                }
            }
            TaskKind::Sort => {
                if mixed_rows > typed_rows {
                    warnings.push(ConfigWarning::TypedZonesUndersized {
                        mixed_rows,
                        typed_rows,
                    });
                }
            }
        }

        warnings
    }
}

/// Canned round setups offered by the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Template {
    /// Two kinds, small floor, 15 minutes.
    FetchBasic = 0,
    SortBasic = 1,
    /// All four kinds, longer floor, 30 minutes.
    FetchFull = 2,
    SortFull = 3,
    /// Four columns, 45 minutes.
    FetchWide = 4,
    SortWide = 5,
}

impl Template {
    pub const ALL: [Template; 6] = [
        Template::FetchBasic,
        Template::SortBasic,
        Template::FetchFull,
        Template::SortFull,
        Template::FetchWide,
        Template::SortWide,
    ];

    pub fn config(&self) -> RoundConfig {
        let base = RoundConfig {
            seed: SEED_RANDOM,
            ..RoundConfig::default()
        };
        match self {
            Self::FetchBasic => RoundConfig {
                task: TaskKind::Fetch,
                completion_percent: 50,
                time_limit_secs: RoundConfig::time_limit_hms(0.0, 15.0, 0.0),
                building_size: (24.0, 44.0),
                shelf_columns: 2,
                shelf_rows: 4,
                kind_enabled: [true, true, false, false],
                kind_weight: [0.5, 0.5, 0.0, 0.0],
                zone_rows: [2, 1, 1, 0, 0],
                ..base
            },
            Self::SortBasic => RoundConfig {
                task: TaskKind::Sort,
                completion_percent: 100,
                time_limit_secs: RoundConfig::time_limit_hms(0.0, 15.0, 0.0),
                building_size: (24.0, 44.0),
                shelf_columns: 2,
                shelf_rows: 4,
                kind_enabled: [true, true, false, false],
                kind_weight: [0.25, 0.25, 0.0, 0.0],
                zone_rows: [2, 1, 1, 0, 0],
                ..base
            },
            Self::FetchFull => RoundConfig {
                task: TaskKind::Fetch,
                completion_percent: 50,
                time_limit_secs: RoundConfig::time_limit_hms(0.0, 30.0, 0.0),
                building_size: (24.0, 60.0),
                shelf_columns: 2,
                shelf_rows: 6,
                kind_enabled: [true; KIND_COUNT],
                kind_weight: [0.5; KIND_COUNT],
                zone_rows: [2, 1, 1, 1, 1],
                ..base
            },
            Self::SortFull => RoundConfig {
                task: TaskKind::Sort,
                completion_percent: 100,
                time_limit_secs: RoundConfig::time_limit_hms(0.0, 30.0, 0.0),
                building_size: (24.0, 60.0),
                shelf_columns: 2,
                shelf_rows: 6,
                kind_enabled: [true; KIND_COUNT],
                kind_weight: [0.25; KIND_COUNT],
                zone_rows: [2, 1, 1, 1, 1],
                ..base
            },
            Self::FetchWide => RoundConfig {
                task: TaskKind::Fetch,
                completion_percent: 50,
                time_limit_secs: RoundConfig::time_limit_hms(0.0, 45.0, 0.0),
                building_size: (32.0, 60.0),
                shelf_columns: 4,
                shelf_rows: 6,
                kind_enabled: [true; KIND_COUNT],
                kind_weight: [0.5; KIND_COUNT],
                zone_rows: [2, 1, 1, 1, 1],
                ..base
            },
            Self::SortWide => RoundConfig {
                task: TaskKind::Sort,
                completion_percent: 100,
                time_limit_secs: RoundConfig::time_limit_hms(0.0, 45.0, 0.0),
                building_size: (32.0, 60.0),
                shelf_columns: 4,
                shelf_rows: 6,
                kind_enabled: [true; KIND_COUNT],
                kind_weight: [0.25; KIND_COUNT],
                zone_rows: [2, 1, 1, 1, 1],
                ..base
            },
        }
    }
}
