//! Round engine - main entry point for running a training round.

use hecs::World;
use liftyard_logic::config::{RoundConfig, SEED_RANDOM};
use liftyard_logic::constants::{BoxKind, Zone};
use liftyard_logic::layout::Spacing;
use liftyard_logic::score::{ScoreBreakdown, ScoreInputs, ScoreRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::generation::{populate_boxes, spawn_shelf_rows, GenerateSummary, PlacedBoxes};
use crate::job::{select_job, JobSet};
use crate::verifier::{EntryOutcome, RoundPhase, ZoneEntry, ZoneVerifier};

/// Main round engine.
///
/// Owns all per-round state; nothing is process-global, so independent
/// rounds can run side by side. The host drives it with a fixed-step loop:
/// feed `tick` the step, `on_zone_entry` the vehicle contacts, and
/// `add_distance` the odometer deltas.
pub struct RoundEngine {
    /// ECS world containing shelf rows and placed boxes
    pub world: World,
    config: RoundConfig,
    zone_map: Vec<Zone>,
    spacing: Spacing,
    placed: PlacedBoxes,
    job: JobSet,
    verifier: ZoneVerifier,
    phase: RoundPhase,
    rng: StdRng,
    sim_time: f64,
    distance: f64,
}

impl RoundEngine {
    /// Create an idle engine with no floor generated.
    pub fn new() -> Self {
        let config = RoundConfig::default();
        let spacing = Spacing::derive(&config);
        Self {
            world: World::new(),
            config,
            zone_map: Vec::new(),
            spacing,
            placed: PlacedBoxes::default(),
            job: JobSet::default(),
            verifier: ZoneVerifier::new(),
            phase: RoundPhase::Idle,
            rng: StdRng::from_entropy(),
            sim_time: 0.0,
            distance: 0.0,
        }
    }

    /// Generate a complete floor for `config` and start the round.
    ///
    /// Atomic with respect to observers: the phase leaves `Running` before
    /// any collection is touched, every piece of round state is rebuilt from
    /// scratch, and only then does the phase return to `Running`. Safe to
    /// call mid-round; nothing from the previous round survives.
    pub fn generate(&mut self, config: RoundConfig) -> GenerateSummary {
        self.phase = RoundPhase::Generating;

        let mut config = config;
        let mut warnings = config.sanitize();

        self.world.clear();
        self.placed = PlacedBoxes::default();
        self.job = JobSet::default();
        self.verifier = ZoneVerifier::new();
        self.sim_time = 0.0;
        self.distance = 0.0;

        self.rng = if config.seed == SEED_RANDOM {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(config.seed as u64)
        };

        let (_rows, zone_map, overflow) = spawn_shelf_rows(&mut self.world, &config);
        if let Some(warning) = overflow {
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        self.placed = populate_boxes(&mut self.world, &config, &zone_map, &mut self.rng);
        self.zone_map = zone_map;
        self.spacing = Spacing::derive(&config);
        self.config = config;

        self.select_job();

        let placed_per_kind: [usize; 4] = std::array::from_fn(|kind| self.placed[kind].len());
        log::info!(
            "generated floor: {} rows x {} columns, {} boxes placed, {} required",
            self.config.shelf_rows,
            self.config.shelf_columns,
            placed_per_kind.iter().sum::<usize>(),
            self.job.total()
        );

        self.phase = RoundPhase::Running;

        GenerateSummary {
            zone_map: self.zone_map.clone(),
            spacing: self.spacing,
            placed_per_kind,
            warnings,
        }
    }

    /// Re-derive the job set from the current population and reset all
    /// correctness state. `generate` calls this; hosts can call it again to
    /// restart the same floor.
    pub fn select_job(&mut self) -> &JobSet {
        self.job = select_job(
            self.config.task,
            &self.placed,
            self.config.completion_percent,
            &mut self.rng,
        );
        self.verifier = ZoneVerifier::new();
        &self.job
    }

    /// Process a vehicle-reported zone contact. No-op in any phase but
    /// `Running`.
    pub fn on_zone_entry(&mut self, entry: &ZoneEntry) -> EntryOutcome {
        if self.phase != RoundPhase::Running {
            return EntryOutcome::Ignored;
        }
        self.verifier
            .on_entry(self.config.task, &self.job, entry, self.sim_time)
    }

    /// Advance the simulated clock by `dt_secs` and check the completion
    /// predicate. Returns the phase after the step.
    pub fn tick(&mut self, dt_secs: f64) -> RoundPhase {
        if self.phase == RoundPhase::Running {
            self.sim_time += dt_secs.max(0.0);
            if self.is_complete() {
                self.phase = RoundPhase::Finished;
            }
        }
        self.phase
    }

    /// Feed a distance-travelled delta from the vehicle odometer.
    pub fn add_distance(&mut self, meters: f64) {
        if self.phase == RoundPhase::Running {
            self.distance += meters.max(0.0);
        }
    }

    /// True once every required box is resolved or the clock has run out.
    /// An empty job never completes on count alone.
    pub fn is_complete(&self) -> bool {
        self.verifier.total_correct() >= self.required_total()
            || self.sim_time >= self.config.time_limit_secs
    }

    /// Boxes the job demands, floored at 1 for degenerate empty rounds.
    pub fn required_total(&self) -> usize {
        self.job.total().max(1)
    }

    /// Score the round as it stands and produce the leaderboard row.
    pub fn finalize(&self, name: impl Into<String>) -> (ScoreBreakdown, ScoreRecord) {
        let inputs = ScoreInputs {
            correct: self.verifier.total_correct() as u32,
            required: self.required_total() as u32,
            misplaced: self.verifier.misplaced(),
            distance: self.distance,
            elapsed_secs: self.sim_time,
            time_limit_secs: self.config.time_limit_secs,
        };
        let breakdown = ScoreBreakdown::compute(&inputs);
        let record = breakdown.record(name);
        (breakdown, record)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn zone_map(&self) -> &[Zone] {
        &self.zone_map
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn job(&self) -> &JobSet {
        &self.job
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn misplaced_count(&self) -> u32 {
        self.verifier.misplaced()
    }

    pub fn correct_count(&self) -> usize {
        self.verifier.total_correct()
    }

    pub fn correct_for_kind(&self, kind: BoxKind) -> usize {
        self.verifier.correct_for_kind(kind)
    }

    /// Count boxes placed for a kind during generation.
    pub fn placed_count(&self, kind: BoxKind) -> usize {
        self.placed[kind as usize].len()
    }

    /// Placed-box entities for a kind, in placement order.
    pub fn placed_boxes(&self, kind: BoxKind) -> &[hecs::Entity] {
        &self.placed[kind as usize]
    }
}

impl Default for RoundEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftyard_logic::config::TaskKind;
    use liftyard_logic::constants::KIND_COUNT;

    fn seeded_config(task: TaskKind) -> RoundConfig {
        RoundConfig {
            seed: 77,
            task,
            shelf_columns: 2,
            shelf_rows: 6,
            zone_rows: [2, 1, 1, 1, 1],
            kind_weight: [0.5; KIND_COUNT],
            ..RoundConfig::default()
        }
    }

    #[test]
    fn test_engine_starts_idle() {
        let engine = RoundEngine::new();
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(engine.correct_count(), 0);
        assert_eq!(engine.sim_time(), 0.0);
    }

    #[test]
    fn test_generate_enters_running() {
        let mut engine = RoundEngine::new();
        let summary = engine.generate(seeded_config(TaskKind::Fetch));
        assert_eq!(engine.phase(), RoundPhase::Running);
        assert_eq!(summary.zone_map.len(), 6);
    }

    #[test]
    fn test_generate_is_deterministic_per_seed() {
        let mut engine = RoundEngine::new();
        let a = engine.generate(seeded_config(TaskKind::Fetch));
        let job_a = engine.job().total();
        let b = engine.generate(seeded_config(TaskKind::Fetch));
        let job_b = engine.job().total();

        assert_eq!(a.placed_per_kind, b.placed_per_kind);
        assert_eq!(job_a, job_b);
    }

    #[test]
    fn test_regenerate_discards_previous_round() {
        let mut engine = RoundEngine::new();
        engine.generate(seeded_config(TaskKind::Sort));

        // Sort a box, misplace another, drive a bit.
        let item = engine.placed_boxes(BoxKind::Blue).first().copied();
        if let Some(item) = item {
            engine.on_zone_entry(&ZoneEntry {
                item,
                kind: BoxKind::Blue,
                row: 2,
                zone: Zone::Blue,
            });
        }
        engine.add_distance(40.0);
        engine.tick(10.0);

        engine.generate(seeded_config(TaskKind::Sort));
        assert_eq!(engine.correct_count(), 0);
        assert_eq!(engine.misplaced_count(), 0);
        assert_eq!(engine.distance(), 0.0);
        assert_eq!(engine.sim_time(), 0.0);
    }

    #[test]
    fn test_events_ignored_outside_running() {
        let mut engine = RoundEngine::new();
        let item = engine.world.spawn((0u32,));
        let entry = ZoneEntry {
            item,
            kind: BoxKind::Blue,
            row: 0,
            zone: Zone::Blue,
        };
        // Idle: no round yet.
        assert_eq!(engine.on_zone_entry(&entry), EntryOutcome::Ignored);

        engine.generate(seeded_config(TaskKind::Sort));
        engine.tick(engine.config().time_limit_secs + 1.0);
        assert_eq!(engine.phase(), RoundPhase::Finished);
        // Finished: contacts no longer move anything.
        let item = engine.world.spawn((0u32,));
        assert_eq!(
            engine.on_zone_entry(&ZoneEntry {
                item,
                kind: BoxKind::Blue,
                row: 0,
                zone: Zone::Blue,
            }),
            EntryOutcome::Ignored
        );
    }

    #[test]
    fn test_round_completes_by_count() {
        let mut engine = RoundEngine::new();
        engine.generate(seeded_config(TaskKind::Sort));
        assert!(engine.job().total() > 0, "seeded sort round should have work");

        for kind in BoxKind::ALL {
            for item in engine.placed_boxes(kind).to_vec() {
                engine.on_zone_entry(&ZoneEntry {
                    item,
                    kind,
                    row: 0,
                    zone: kind.home_zone(),
                });
            }
        }
        assert_eq!(engine.tick(0.02), RoundPhase::Finished);
    }

    #[test]
    fn test_round_completes_by_timeout() {
        let mut engine = RoundEngine::new();
        engine.generate(seeded_config(TaskKind::Fetch));
        let limit = engine.config().time_limit_secs;
        for _ in 0..10 {
            engine.tick(limit / 10.0);
        }
        assert_eq!(engine.phase(), RoundPhase::Finished);
    }

    #[test]
    fn test_finalize_reflects_counts() {
        let mut engine = RoundEngine::new();
        engine.generate(seeded_config(TaskKind::Sort));
        engine.tick(450.0);
        let (breakdown, record) = engine.finalize("Trainee");
        assert_eq!(breakdown.box_score, 0.0);
        assert_eq!(record.name, "Trainee");
        assert!(breakdown.final_score.is_finite());
    }

    #[test]
    fn test_distance_only_accumulates_while_running() {
        let mut engine = RoundEngine::new();
        engine.add_distance(10.0);
        assert_eq!(engine.distance(), 0.0);

        engine.generate(seeded_config(TaskKind::Fetch));
        engine.add_distance(10.0);
        engine.add_distance(-5.0);
        assert_eq!(engine.distance(), 10.0);
    }
}
