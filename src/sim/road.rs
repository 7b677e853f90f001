//! Road geometry and off-road detection

use serde::{Deserialize, Serialize};

use super::state::{PlayerId, PlayerState};
use crate::consts::{ROAD_SCROLL_PERIOD, ROAD_SEGMENT_COUNT};
use crate::tuning::Tuning;

/// A horizontal band of road, `left..=right` in screen x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub left: i32,
    pub right: i32,
}

impl Lane {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn center(&self) -> i32 {
        self.left + self.width() / 2
    }

    pub fn contains_x(&self, x: i32) -> bool {
        x >= self.left && x <= self.right
    }
}

/// Mode-dependent lane layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadLayout {
    /// One centered road, half the play width
    Single([Lane; 1]),
    /// Two independent roads, `[left, right]`, one per player
    Split([Lane; 2]),
}

impl RoadLayout {
    pub fn new(width: i32, multiplayer: bool, tuning: &Tuning) -> Self {
        let half = width / 2;
        if multiplayer {
            let lane_width = half - 2 * tuning.lane_inset;
            let left = Lane {
                left: tuning.lane_inset,
                right: tuning.lane_inset + lane_width,
            };
            let right = Lane {
                left: half + tuning.lane_inset,
                right: half + tuning.lane_inset + lane_width,
            };
            RoadLayout::Split([left, right])
        } else {
            let left = (width - half) / 2;
            RoadLayout::Single([Lane {
                left,
                right: left + half,
            }])
        }
    }

    /// Lane-groups traffic spawns into
    pub fn lanes(&self) -> &[Lane] {
        match self {
            RoadLayout::Single(lanes) => lanes.as_slice(),
            RoadLayout::Split(lanes) => lanes.as_slice(),
        }
    }

    /// Whether a player at `x` is off its road
    pub fn is_off_road(&self, id: PlayerId, x: i32) -> bool {
        match self {
            RoadLayout::Single([road]) => !road.contains_x(x),
            // Each player owns its half; only crossing the centerline counts
            RoadLayout::Split([left, right]) => match id {
                PlayerId::Player1 => x > left.right,
                PlayerId::Player2 => x < right.left,
            },
        }
    }
}

/// Scrolling road markings (renderer only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadState {
    pub scroll_offset: i32,
    pub segment_count: u32,
}

impl Default for RoadState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            segment_count: ROAD_SEGMENT_COUNT,
        }
    }
}

impl RoadState {
    pub fn scroll(&mut self, game_speed: f32, tuning: &Tuning) {
        let step = (tuning.road_scroll_speed * game_speed).round() as i32;
        self.scroll_offset = (self.scroll_offset + step).rem_euclid(ROAD_SCROLL_PERIOD);
    }
}

/// Flag off-road players and apply the speed-scaled penalty
pub fn apply_off_road<'a>(
    players: impl Iterator<Item = &'a mut PlayerState>,
    layout: &RoadLayout,
    game_speed: f32,
    tuning: &Tuning,
) {
    let penalty = (tuning.offroad_penalty * game_speed).round() as u64;
    for player in players {
        player.off_road = layout.is_off_road(player.id, player.position.x);
        if player.off_road {
            player.score = player.score.saturating_sub(penalty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_single_layout() {
        let layout = RoadLayout::new(800, false, &Tuning::default());
        assert_eq!(layout.lanes(), &[Lane { left: 200, right: 600 }]);
        assert!(!layout.is_off_road(PlayerId::Player1, 400));
        assert!(!layout.is_off_road(PlayerId::Player1, 200));
        assert!(layout.is_off_road(PlayerId::Player1, 199));
        assert!(layout.is_off_road(PlayerId::Player1, 601));
    }

    #[test]
    fn test_split_layout() {
        let layout = RoadLayout::new(800, true, &Tuning::default());
        let lanes = layout.lanes();
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0], Lane { left: 10, right: 390 });
        assert_eq!(lanes[1], Lane { left: 410, right: 790 });

        assert!(!layout.is_off_road(PlayerId::Player1, 200));
        assert!(!layout.is_off_road(PlayerId::Player1, 390));
        assert!(layout.is_off_road(PlayerId::Player1, 391));
        assert!(!layout.is_off_road(PlayerId::Player2, 410));
        assert!(layout.is_off_road(PlayerId::Player2, 409));
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let tuning = Tuning::default();
        let layout = RoadLayout::new(800, false, &tuning);
        let mut player = PlayerState::new(PlayerId::Player1, IVec2::new(100, 480));
        player.score = 30;

        apply_off_road(std::iter::once(&mut player), &layout, 1.0, &tuning);
        assert!(player.off_road);
        assert_eq!(player.score, 10);

        apply_off_road(std::iter::once(&mut player), &layout, 1.0, &tuning);
        assert_eq!(player.score, 0);

        player.position.x = 400;
        apply_off_road(std::iter::once(&mut player), &layout, 1.0, &tuning);
        assert!(!player.off_road);
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_penalty_scales_with_game_speed() {
        let tuning = Tuning::default();
        let layout = RoadLayout::new(800, false, &tuning);
        let mut player = PlayerState::new(PlayerId::Player1, IVec2::new(100, 480));
        player.score = 1000;
        apply_off_road(std::iter::once(&mut player), &layout, 1.5, &tuning);
        assert_eq!(player.score, 970);
    }

    #[test]
    fn test_scroll_wraps() {
        let tuning = Tuning::default();
        let mut road = RoadState::default();
        for _ in 0..21 {
            road.scroll(1.0, &tuning);
        }
        assert_eq!(road.scroll_offset, 5);
        assert_eq!(road.segment_count, ROAD_SEGMENT_COUNT);
    }
}
