//! Oncoming traffic: spawning, advancing and culling
//!
//! Spawning is retry-bounded. A candidate car is rejected when it would
//! appear inside an existing car's safety rectangle while being faster than
//! that car, since it would run into it from behind with no way to steer.
//! After `MAX_SPAWN_ATTEMPTS` rejections the lane simply gets no car this tick.

use super::difficulty;
use super::geometry::Rect;
use super::random::RandomSource;
use super::road::Lane;
use super::state::TrafficCar;
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::tuning::Tuning;

/// Result of trying to place one car in one lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Car committed on the given (1-based) attempt
    Placed { attempt: u32 },
    /// Every attempt was rejected
    Exhausted,
}

/// Move every car down by its scaled speed and drop cars past the bottom margin
pub fn advance(traffic: &mut Vec<TrafficCar>, game_speed: f32, height: i32, tuning: &Tuning) {
    for car in traffic.iter_mut() {
        let dy = (car.speed * game_speed) as i32;
        car.bounds.translate_y(dy);
    }

    let limit = height.saturating_add(tuning.traffic_despawn_margin);
    traffic.retain(|car| car.bounds.bottom() <= limit);
}

/// Whether `candidate` moving at `speed` may be added next to `existing`
pub fn is_safe_spawn(candidate: &Rect, speed: f32, existing: &[TrafficCar], margin: i32) -> bool {
    !existing
        .iter()
        .any(|car| speed > car.speed && candidate.intersects(&car.bounds.expand_x(margin)))
}

/// Try to place one new car inside `lane`
pub fn spawn_in_lane(
    traffic: &mut Vec<TrafficCar>,
    lane: &Lane,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
) -> SpawnOutcome {
    // Inclusive upper bound keeps the whole car inside the lane
    let max_x = lane.right - tuning.traffic_width;

    for attempt in 1..=MAX_SPAWN_ATTEMPTS {
        let x = rng.range_i32(lane.left, max_x + 1);
        let speed = tuning.traffic_base_speed + tuning.traffic_speed_band * rng.next_f64() as f32;
        let candidate = Rect::new(
            x,
            tuning.traffic_spawn_y,
            tuning.traffic_width,
            tuning.traffic_height,
        );

        if is_safe_spawn(&candidate, speed, traffic, tuning.safety_margin) {
            log::debug!("Spawned traffic at x={} speed={:.2} (attempt {})", x, speed, attempt);
            traffic.push(TrafficCar {
                bounds: candidate,
                speed,
            });
            return SpawnOutcome::Placed { attempt };
        }

        log::trace!("Rejected traffic at x={} speed={:.2}", x, speed);
    }

    SpawnOutcome::Exhausted
}

/// Per-tick spawn decision: one draw, then one placement batch per lane
///
/// Returns the number of cars added.
pub fn spawn_tick(
    traffic: &mut Vec<TrafficCar>,
    lanes: &[Lane],
    spawn_interval: f32,
    tuning: &Tuning,
    rng: &mut dyn RandomSource,
) -> usize {
    if rng.next_f64() >= difficulty::spawn_probability(spawn_interval) {
        return 0;
    }

    lanes
        .iter()
        .map(|lane| spawn_in_lane(traffic, lane, tuning, rng))
        .filter(|outcome| matches!(outcome, SpawnOutcome::Placed { .. }))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{SeededRandom, SequenceRandom};

    const LANE: Lane = Lane {
        left: 200,
        right: 600,
    };

    fn car(x: i32, y: i32, speed: f32) -> TrafficCar {
        TrafficCar {
            bounds: Rect::new(x, y, 50, 90),
            speed,
        }
    }

    #[test]
    fn test_advance_scales_with_game_speed() {
        let tuning = Tuning::default();
        let mut traffic = vec![car(300, 0, 4.0), car(400, 0, 3.5)];
        advance(&mut traffic, 1.5, 600, &tuning);
        assert_eq!(traffic[0].bounds.top(), 6);
        assert_eq!(traffic[1].bounds.top(), 5);
    }

    #[test]
    fn test_advance_culls_below_margin() {
        let tuning = Tuning::default();
        // bottom 700 stays, bottom 701 goes after moving 1px
        let mut traffic = vec![car(300, 609, 1.0), car(400, 610, 1.0)];
        advance(&mut traffic, 1.0, 600, &tuning);
        assert_eq!(traffic.len(), 1);
        assert_eq!(traffic[0].bounds.left(), 300);
        assert!(traffic[0].bounds.bottom() <= 600 + tuning.traffic_despawn_margin);
    }

    #[test]
    fn test_huge_despawn_margin_keeps_cars() {
        let tuning = Tuning {
            traffic_despawn_margin: i32::MAX,
            ..Default::default()
        };
        let mut traffic = vec![car(300, i32::MAX - 200, 7.0)];
        advance(&mut traffic, 2.0, 600, &tuning);
        assert_eq!(traffic.len(), 1);
        assert!(traffic[0].bounds.top() > i32::MAX - 200);
    }

    #[test]
    fn test_safety_rule() {
        let existing = vec![car(300, -100, 4.0)];
        let beside = Rect::new(360, -100, 50, 90);
        // Within the 20px margin: only a faster car is rejected
        assert!(!is_safe_spawn(&beside, 5.0, &existing, 20));
        assert!(is_safe_spawn(&beside, 3.0, &existing, 20));
        assert!(is_safe_spawn(&beside, 4.0, &existing, 20));
        // Clear of the margin: always fine
        let clear = Rect::new(371, -100, 50, 90);
        assert!(is_safe_spawn(&clear, 6.0, &existing, 20));
    }

    #[test]
    fn test_first_attempt_in_empty_lane() {
        let tuning = Tuning::default();
        let mut traffic = Vec::new();
        let mut rng = SequenceRandom::new(vec![0.5, 0.25]);
        let outcome = spawn_in_lane(&mut traffic, &LANE, &tuning, &mut rng);
        assert_eq!(outcome, SpawnOutcome::Placed { attempt: 1 });
        assert_eq!(traffic.len(), 1);
        // x range is 200..=550
        assert_eq!(traffic[0].bounds, Rect::new(375, -100, 50, 90));
        assert_eq!(traffic[0].speed, 4.0);
    }

    #[test]
    fn test_retry_after_rejection() {
        let tuning = Tuning::default();
        // Slow car parked where the first candidate lands
        let mut traffic = vec![car(375, -100, 3.0)];
        // Attempt 1: x=375, fast -> rejected. Attempt 2: x=200, fast -> clear
        let mut rng = SequenceRandom::new(vec![0.5, 0.9, 0.0, 0.9]);
        let outcome = spawn_in_lane(&mut traffic, &LANE, &tuning, &mut rng);
        assert_eq!(outcome, SpawnOutcome::Placed { attempt: 2 });
        assert_eq!(traffic.len(), 2);
        assert_eq!(traffic[1].bounds.left(), 200);
    }

    #[test]
    fn test_exhaustion_adds_nothing() {
        let tuning = Tuning::default();
        let mut traffic = vec![car(375, -100, 3.0)];
        // Every attempt lands on the slow car with a faster speed
        let mut rng = SequenceRandom::new(vec![0.5, 0.9]);
        let outcome = spawn_in_lane(&mut traffic, &LANE, &tuning, &mut rng);
        assert_eq!(outcome, SpawnOutcome::Exhausted);
        assert_eq!(traffic.len(), 1);
        assert_eq!(rng.draws(), 2 * MAX_SPAWN_ATTEMPTS as usize);
    }

    #[test]
    fn test_slower_candidate_may_overlap() {
        let tuning = Tuning::default();
        let mut traffic = vec![car(375, -100, 6.5)];
        let mut rng = SequenceRandom::new(vec![0.5, 0.1]);
        let outcome = spawn_in_lane(&mut traffic, &LANE, &tuning, &mut rng);
        assert_eq!(outcome, SpawnOutcome::Placed { attempt: 1 });
        assert_eq!(traffic.len(), 2);
    }

    #[test]
    fn test_spawn_tick_decision() {
        let tuning = Tuning::default();
        let lanes = [
            Lane { left: 10, right: 390 },
            Lane { left: 410, right: 790 },
        ];

        let mut traffic = Vec::new();
        let mut rng = SequenceRandom::constant(0.999);
        assert_eq!(spawn_tick(&mut traffic, &lanes, 1.5, &tuning, &mut rng), 0);
        assert_eq!(rng.draws(), 1);

        // Spawns in both lanes independently
        let mut rng = SequenceRandom::new(vec![0.0, 0.5, 0.5, 0.5, 0.5]);
        assert_eq!(spawn_tick(&mut traffic, &lanes, 1.5, &tuning, &mut rng), 2);
        assert_eq!(traffic.len(), 2);
        assert!(traffic[0].bounds.right() <= 390);
        assert!(traffic[1].bounds.left() >= 410);
    }

    #[test]
    fn test_random_spawns_stay_in_lane() {
        let tuning = Tuning::default();
        let mut rng = SeededRandom::new(1234);
        let mut traffic = Vec::new();
        for _ in 0..200 {
            let _ = spawn_in_lane(&mut traffic, &LANE, &tuning, &mut rng);
            traffic.retain(|c| c.bounds.top() > -1000);
            for car in &mut traffic {
                car.bounds.translate_y(-100);
            }
        }
        assert!(!traffic.is_empty());
        for car in &traffic {
            assert!(car.bounds.left() >= LANE.left);
            assert!(car.bounds.right() <= LANE.right);
            assert!(car.speed >= tuning.traffic_base_speed);
            assert!(car.speed <= tuning.traffic_base_speed + tuning.traffic_speed_band);
        }
    }
}
