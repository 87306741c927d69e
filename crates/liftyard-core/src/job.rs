//! Job derivation - which placed boxes the trainee must resolve this round.

use hecs::Entity;
use liftyard_logic::config::TaskKind;
use liftyard_logic::constants::KIND_COUNT;
use rand::Rng;

use crate::generation::PlacedBoxes;

/// The per-kind lists of boxes that must end up correctly placed.
#[derive(Debug, Clone, Default)]
pub struct JobSet {
    pub per_kind: [Vec<Entity>; KIND_COUNT],
}

impl JobSet {
    pub fn total(&self) -> usize {
        self.per_kind.iter().map(Vec::len).sum()
    }

    pub fn kind_len(&self, kind: usize) -> usize {
        self.per_kind[kind].len()
    }
}

/// Derives the job set from the placed population.
///
/// Fetch includes each placed box independently with `completion_percent`
/// probability; Sort demands the entire population, kind by kind.
pub fn select_job(
    task: TaskKind,
    placed: &PlacedBoxes,
    completion_percent: u8,
    rng: &mut impl Rng,
) -> JobSet {
    let mut job = JobSet::default();

    match task {
        TaskKind::Fetch => {
            for (kind, boxes) in placed.iter().enumerate() {
                for &entity in boxes {
                    if (rng.gen::<f32>() * 100.0).floor() < completion_percent as f32 {
                        job.per_kind[kind].push(entity);
                    }
                }
            }
        }
        TaskKind::Sort => {
            for (kind, boxes) in placed.iter().enumerate() {
                job.per_kind[kind] = boxes.clone();
            }
        }
    }

    job
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_dummies(world: &mut World, count: usize) -> Vec<Entity> {
        (0..count).map(|i| world.spawn((i as u32,))).collect()
    }

    #[test]
    fn test_sort_takes_whole_population() {
        let mut world = World::new();
        let placed: PlacedBoxes = [
            spawn_dummies(&mut world, 3),
            spawn_dummies(&mut world, 0),
            spawn_dummies(&mut world, 7),
            spawn_dummies(&mut world, 1),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let job = select_job(TaskKind::Sort, &placed, 50, &mut rng);

        for kind in 0..KIND_COUNT {
            assert_eq!(job.per_kind[kind], placed[kind]);
        }
        assert_eq!(job.total(), 11);
    }

    #[test]
    fn test_fetch_full_percent_takes_everything() {
        let mut world = World::new();
        let placed: PlacedBoxes = [
            spawn_dummies(&mut world, 5),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ];
        let mut rng = StdRng::seed_from_u64(0);
        let job = select_job(TaskKind::Fetch, &placed, 100, &mut rng);
        assert_eq!(job.total(), 5);
    }

    #[test]
    fn test_fetch_fraction_converges() {
        let mut world = World::new();
        let placed: PlacedBoxes = [
            spawn_dummies(&mut world, 4000),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ];
        let mut rng = StdRng::seed_from_u64(42);
        let job = select_job(TaskKind::Fetch, &placed, 50, &mut rng);

        let fraction = job.total() as f64 / 4000.0;
        assert!(
            (fraction - 0.5).abs() < 0.05,
            "selected fraction {} too far from 0.5",
            fraction
        );
    }

    #[test]
    fn test_fetch_preserves_placement_order() {
        let mut world = World::new();
        let placed: PlacedBoxes = [
            spawn_dummies(&mut world, 50),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        let job = select_job(TaskKind::Fetch, &placed, 50, &mut rng);

        // Selected boxes appear in the same relative order they were placed.
        let positions: Vec<usize> = job.per_kind[0]
            .iter()
            .map(|e| placed[0].iter().position(|p| p == e).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
