//! Liftyard Headless Round Harness
//!
//! Validates generation, verification, and scoring without a frontend.
//! Runs entirely in-process — no rendering, no vehicle, no transport.
//!
//! Usage:
//!   cargo run -p liftyard-simtest
//!   cargo run -p liftyard-simtest -- --verbose

use liftyard_core::engine::RoundEngine;
use liftyard_core::verifier::{EntryOutcome, RoundPhase, ZoneEntry};
use liftyard_logic::config::{RoundConfig, TaskKind, Template};
use liftyard_logic::constants::{BoxKind, Zone, KIND_COUNT};
use liftyard_logic::layout::plan_rows;
use liftyard_logic::score::{ScoreBreakdown, ScoreInputs};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Liftyard Round Harness ===\n");

    let mut results = Vec::new();

    // 1. Row partitioning sweep
    results.extend(validate_partition(verbose));

    // 2. Seeded determinism
    results.extend(validate_determinism(verbose));

    // 3. Population sampling rates
    results.extend(validate_sampling(verbose));

    // 4. Job derivation
    results.extend(validate_jobs(verbose));

    // 5. Verifier semantics
    results.extend(validate_verifier(verbose));

    // 6. Score table
    results.extend(validate_scoring(verbose));

    // 7. Canned templates
    results.extend(validate_templates(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Row partitioning ────────────────────────────────────────────────

fn validate_partition(_verbose: bool) -> Vec<TestResult> {
    println!("--- Row Partitioning ---");
    let mut results = Vec::new();

    let (map, warning) = plan_rows(6, &[2, 1, 1, 1, 1]);
    results.push(TestResult {
        name: "partition_exact".into(),
        passed: map
            == vec![
                Zone::Mixed,
                Zone::Mixed,
                Zone::Blue,
                Zone::Green,
                Zone::Yellow,
                Zone::Red,
            ]
            && warning.is_none(),
        detail: format!("{:?}", map),
    });

    let (map, warning) = plan_rows(3, &[2, 2, 2, 2, 2]);
    results.push(TestResult {
        name: "partition_truncates".into(),
        passed: map.len() == 3 && warning.is_some(),
        detail: format!("{} rows, warning: {}", map.len(), warning.is_some()),
    });

    let mut oob = false;
    for rows in 0..64u32 {
        let (map, _) = plan_rows(rows, &[999, 999, 999, 999, 999]);
        if map.len() != rows as usize {
            oob = true;
        }
    }
    results.push(TestResult {
        name: "partition_never_out_of_bounds".into(),
        passed: !oob,
        detail: "swept 0..64 rows against saturated zone counts".into(),
    });

    results
}

// ── 2. Determinism ─────────────────────────────────────────────────────

fn validate_determinism(verbose: bool) -> Vec<TestResult> {
    println!("--- Seeded Determinism ---");
    let mut results = Vec::new();

    let config = RoundConfig {
        seed: 4242,
        task: TaskKind::Fetch,
        ..RoundConfig::default()
    };

    let mut engine_a = RoundEngine::new();
    let mut engine_b = RoundEngine::new();
    let a = engine_a.generate(config.clone());
    let b = engine_b.generate(config.clone());

    if verbose {
        match serde_json::to_string(&a) {
            Ok(json) => println!("  generated: {}", json),
            Err(e) => println!("  (summary not serializable: {})", e),
        }
    }

    results.push(TestResult {
        name: "same_seed_same_floor".into(),
        passed: a.placed_per_kind == b.placed_per_kind && a.zone_map == b.zone_map,
        detail: format!("placed {:?}", a.placed_per_kind),
    });

    let mut distinct = std::collections::HashSet::new();
    for seed in 0..25 {
        let mut engine = RoundEngine::new();
        let summary = engine.generate(RoundConfig {
            seed,
            ..config.clone()
        });
        distinct.insert(summary.placed_per_kind);
    }
    results.push(TestResult {
        name: "seeds_vary_floor".into(),
        passed: distinct.len() > 1,
        detail: format!("{} distinct populations over 25 seeds", distinct.len()),
    });

    results
}

// ── 3. Sampling rates ──────────────────────────────────────────────────

fn validate_sampling(_verbose: bool) -> Vec<TestResult> {
    println!("--- Population Sampling ---");
    let mut results = Vec::new();

    // Fetch: occupancy per kind should track its weight.
    let weights = [0.2f32, 0.5, 0.8, 1.0];
    let mut occupancy = [0usize; KIND_COUNT];
    let mut slots = [0usize; KIND_COUNT];
    for seed in 0..60 {
        let mut engine = RoundEngine::new();
        engine.generate(RoundConfig {
            seed,
            task: TaskKind::Fetch,
            shelf_columns: 2,
            shelf_rows: 8,
            zone_rows: [0, 2, 2, 2, 2],
            kind_weight: weights,
            ..RoundConfig::default()
        });
        for kind in BoxKind::ALL {
            occupancy[kind as usize] += engine.placed_count(kind);
            slots[kind as usize] += 2 * 2 * 12; // rows x columns x slots
        }
    }

    let mut worst = 0.0f64;
    for kind in 0..KIND_COUNT {
        let rate = occupancy[kind] as f64 / slots[kind] as f64;
        worst = worst.max((rate - weights[kind] as f64).abs());
    }
    results.push(TestResult {
        name: "fetch_occupancy_tracks_weight".into(),
        passed: worst < 0.04,
        detail: format!("worst deviation {:.3}", worst),
    });

    // Sort: kinds are drawn uniformly before the weight gate, so with equal
    // weights every kind lands roughly equally often.
    let mut counts = [0usize; KIND_COUNT];
    for seed in 0..60 {
        let mut engine = RoundEngine::new();
        engine.generate(RoundConfig {
            seed,
            task: TaskKind::Sort,
            shelf_columns: 2,
            shelf_rows: 4,
            zone_rows: [4, 0, 0, 0, 0],
            kind_weight: [0.5; KIND_COUNT],
            ..RoundConfig::default()
        });
        for kind in BoxKind::ALL {
            counts[kind as usize] += engine.placed_count(kind);
        }
    }
    let total: usize = counts.iter().sum();
    let mut worst = 0.0f64;
    for count in counts {
        worst = worst.max((count as f64 / total as f64 - 0.25).abs());
    }
    results.push(TestResult {
        name: "sort_kinds_drawn_uniformly".into(),
        passed: worst < 0.04,
        detail: format!("shares {:?}, worst deviation {:.3}", counts, worst),
    });

    results
}

// ── 4. Job derivation ──────────────────────────────────────────────────

fn validate_jobs(_verbose: bool) -> Vec<TestResult> {
    println!("--- Job Derivation ---");
    let mut results = Vec::new();

    let mut engine = RoundEngine::new();
    engine.generate(RoundConfig {
        seed: 7,
        task: TaskKind::Sort,
        ..RoundConfig::default()
    });
    let all_covered = BoxKind::ALL
        .iter()
        .all(|k| engine.job().kind_len(*k as usize) == engine.placed_count(*k));
    results.push(TestResult {
        name: "sort_job_is_population".into(),
        passed: all_covered,
        detail: format!("{} boxes required", engine.job().total()),
    });

    let mut placed_total = 0usize;
    let mut job_total = 0usize;
    for seed in 0..50 {
        let mut engine = RoundEngine::new();
        engine.generate(RoundConfig {
            seed,
            task: TaskKind::Fetch,
            completion_percent: 30,
            shelf_rows: 10,
            zone_rows: [2, 2, 2, 2, 2],
            ..RoundConfig::default()
        });
        placed_total += BoxKind::ALL
            .iter()
            .map(|k| engine.placed_count(*k))
            .sum::<usize>();
        job_total += engine.job().total();
    }
    let fraction = job_total as f64 / placed_total.max(1) as f64;
    results.push(TestResult {
        name: "fetch_job_fraction".into(),
        passed: (fraction - 0.30).abs() < 0.03,
        detail: format!("{:.3} of {} placed", fraction, placed_total),
    });

    results
}

// ── 5. Verifier ────────────────────────────────────────────────────────

fn validate_verifier(_verbose: bool) -> Vec<TestResult> {
    println!("--- Zone Verifier ---");
    let mut results = Vec::new();

    let mut engine = RoundEngine::new();
    engine.generate(RoundConfig {
        seed: 99,
        task: TaskKind::Sort,
        kind_weight: [1.0; KIND_COUNT],
        ..RoundConfig::default()
    });

    // Debounce: hammer one wrong-zone contact.
    let item = engine.placed_boxes(BoxKind::Blue)[0];
    let wrong = ZoneEntry {
        item,
        kind: BoxKind::Blue,
        row: 5,
        zone: Zone::Red,
    };
    let mut increments = 0;
    for _ in 0..10 {
        engine.tick(0.05);
        if engine.on_zone_entry(&wrong) == EntryOutcome::Misplaced {
            increments += 1;
        }
    }
    results.push(TestResult {
        name: "misplace_debounced".into(),
        passed: increments == 1 && engine.misplaced_count() == 1,
        detail: format!("{} increments from 10 contacts in 0.5s", increments),
    });

    engine.tick(2.0);
    let late = engine.on_zone_entry(&wrong);
    results.push(TestResult {
        name: "misplace_after_window".into(),
        passed: late == EntryOutcome::Misplaced && engine.misplaced_count() == 2,
        detail: format!("{:?}", late),
    });

    // Idempotence.
    let good = ZoneEntry {
        item,
        kind: BoxKind::Blue,
        row: 2,
        zone: Zone::Blue,
    };
    let first = engine.on_zone_entry(&good);
    let second = engine.on_zone_entry(&good);
    results.push(TestResult {
        name: "entry_idempotent".into(),
        passed: first == EntryOutcome::Accepted
            && second == EntryOutcome::AlreadyCounted
            && engine.correct_for_kind(BoxKind::Blue) == 1,
        detail: format!("{:?} then {:?}", first, second),
    });

    // Phase gating.
    let mut idle = RoundEngine::new();
    let phantom = idle.world.spawn((0u32,));
    let gated = idle.on_zone_entry(&ZoneEntry {
        item: phantom,
        kind: BoxKind::Blue,
        row: 0,
        zone: Zone::Blue,
    });
    results.push(TestResult {
        name: "idle_engine_drops_contacts".into(),
        passed: gated == EntryOutcome::Ignored && idle.phase() == RoundPhase::Idle,
        detail: format!("{:?}", gated),
    });

    results
}

// ── 6. Scoring ─────────────────────────────────────────────────────────

fn validate_scoring(_verbose: bool) -> Vec<TestResult> {
    println!("--- Score Table ---");
    let mut results = Vec::new();

    let b = ScoreBreakdown::compute(&ScoreInputs {
        correct: 5,
        required: 5,
        misplaced: 0,
        distance: 0.0,
        elapsed_secs: 450.0,
        time_limit_secs: 900.0,
    });
    let expected = (b.box_score - 500.0).abs() < 1e-9
        && (b.time_score - 500.0).abs() < 1e-9
        && b.incorrect_score == 0.0
        && (b.trip_score - 10.0).abs() < 1e-9
        && (b.difficulty_modifier - 1.5).abs() < 1e-9
        && (b.final_score - 1515.0).abs() < 1e-9;
    results.push(TestResult {
        name: "reference_breakdown".into(),
        passed: expected,
        detail: format!("final {:.2}", b.final_score),
    });

    let degenerate = ScoreBreakdown::compute(&ScoreInputs {
        correct: 0,
        required: 0,
        misplaced: 0,
        distance: 0.0,
        elapsed_secs: 10.0,
        time_limit_secs: 900.0,
    });
    results.push(TestResult {
        name: "degenerate_round_finite".into(),
        passed: degenerate.final_score.is_finite(),
        detail: format!("final {:.2}", degenerate.final_score),
    });

    results
}

// ── 7. Templates ───────────────────────────────────────────────────────

fn validate_templates(verbose: bool) -> Vec<TestResult> {
    println!("--- Templates ---");
    let mut results = Vec::new();

    for template in Template::ALL {
        let mut config = template.config();
        config.seed = 1;
        let clamps = config.sanitize();
        let mut engine = RoundEngine::new();
        let summary = engine.generate(config);

        if verbose {
            println!(
                "  {:?}: placed {:?}, job {}",
                template,
                summary.placed_per_kind,
                engine.job().total()
            );
        }

        results.push(TestResult {
            name: format!("template_{:?}", template),
            passed: clamps.is_empty()
                && summary.warnings.is_empty()
                && engine.phase() == RoundPhase::Running,
            detail: format!(
                "{} boxes placed, {} required",
                summary.placed_per_kind.iter().sum::<usize>(),
                engine.job().total()
            ),
        });
    }

    results
}
