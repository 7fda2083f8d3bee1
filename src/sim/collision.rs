//! Collision detection between the swan and obstacles
//!
//! Sprites carry transparent margins, so both sides are tested with shrunk
//! "hitboxes" rather than their sprite bounds.

use glam::Vec2;

use super::obstacle::{Obstacle, ObstacleField};
use super::player::Player;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict AABB overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Scale about the box by `scale`, keeping it centred
    pub fn shrink(&self, scale: f32) -> Rect {
        let inset = self.size * (1.0 - scale) * 0.5;
        Rect::new(self.pos + inset, self.size * scale)
    }
}

/// Horizontal trim of the swan sprite
const PLAYER_TRIM_X: f32 = 28.0;
/// Offset of the hitbox centre from the sprite's left edge
const PLAYER_CENTER_X: f32 = 18.0;
/// Standing pose: (top inset, total vertical trim)
const STANDING_INSET: (f32, f32) = (10.0, 20.0);
/// Ducking pose sits lower and is shorter
const DUCKING_INSET: (f32, f32) = (30.0, 36.0);
/// Obstacles keep the middle 80% of their sprite
const OBSTACLE_HITBOX_SCALE: f32 = 0.8;

/// Hitbox of the swan for its current pose
pub fn player_hitbox(player: &Player) -> Rect {
    let width = player.size.x - PLAYER_TRIM_X;
    let (top, trim) = if player.ducking {
        DUCKING_INSET
    } else {
        STANDING_INSET
    };
    Rect::new(
        Vec2::new(player.pos.x + PLAYER_CENTER_X - width / 2.0, player.pos.y + top),
        Vec2::new(width, player.size.y - trim),
    )
}

/// Hitbox of an obstacle: 10% inset on every side
pub fn obstacle_hitbox(obstacle: &Obstacle) -> Rect {
    obstacle.bounds().shrink(OBSTACLE_HITBOX_SCALE)
}

/// Index of the first obstacle touching the swan, if any
pub fn first_hit(player: &Player, field: &ObstacleField) -> Option<usize> {
    let hitbox = player_hitbox(player);
    field
        .iter()
        .position(|obstacle| hitbox.overlaps(&obstacle_hitbox(obstacle)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacle::PlantVariant;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_basic() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&rect(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlaps(&rect(-10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_player_hitbox_standing() {
        let player = Player::default();
        let hitbox = player_hitbox(&player);
        assert_eq!(hitbox, rect(50.0, 130.0, 36.0, 44.0));
    }

    #[test]
    fn test_player_hitbox_ducking_is_lower_and_shorter() {
        let mut player = Player::default();
        let standing = player_hitbox(&player);
        player.ducking = true;
        let ducking = player_hitbox(&player);

        assert_eq!(ducking, rect(50.0, 150.0, 36.0, 28.0));
        assert!(ducking.top() > standing.top());
        assert!(ducking.size.y < standing.size.y);
        assert_eq!(ducking.left(), standing.left());
    }

    #[test]
    fn test_obstacle_hitbox_inset() {
        let plant = Obstacle::ground_plant(100.0, PlantVariant::new(4));
        let hitbox = obstacle_hitbox(&plant);
        // 80x80 sprite at (100, 104)
        assert!((hitbox.left() - 108.0).abs() < 0.001);
        assert!((hitbox.top() - 112.0).abs() < 0.001);
        assert!((hitbox.size.x - 64.0).abs() < 0.001);
        assert!((hitbox.size.y - 64.0).abs() < 0.001);
    }

    #[test]
    fn test_low_flyer_ducked_high_flyer_passes_standing() {
        let mut player = Player::default();
        let low = Obstacle::low_flyer(PLAYER_X, LOW_FLYER_ALTITUDES[1]);
        let high = Obstacle::low_flyer(PLAYER_X, LOW_FLYER_ALTITUDES[0]);

        assert!(player_hitbox(&player).overlaps(&obstacle_hitbox(&low)));
        assert!(!player_hitbox(&player).overlaps(&obstacle_hitbox(&high)));

        player.ducking = true;
        assert!(!player_hitbox(&player).overlaps(&obstacle_hitbox(&low)));
    }

    #[test]
    fn test_first_hit_reports_earliest() {
        let player = Player::default();
        let mut field = ObstacleField::new();
        field.push(Obstacle::ground_plant(600.0, PlantVariant::new(0)));
        assert_eq!(first_hit(&player, &field), None);

        field.push(Obstacle::ground_plant(PLAYER_X, PlantVariant::new(3)));
        field.push(Obstacle::ground_plant(PLAYER_X + 5.0, PlantVariant::new(1)));
        assert_eq!(first_hit(&player, &field), Some(1));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.1f32..200.0, 0.1f32..200.0)
            .prop_map(|(x, y, w, h)| rect(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_overlap_reflexive(a in arb_rect()) {
            prop_assert!(a.overlaps(&a));
        }

        #[test]
        fn prop_separated_boxes_never_overlap(
            a in arb_rect(),
            gap in 1.0f32..100.0,
            h in 0.1f32..200.0
        ) {
            let right = rect(a.right() + gap, a.top(), 10.0, h);
            let left = rect(a.left() - gap - 10.0, a.top(), 10.0, h);
            let below = rect(a.left(), a.bottom() + gap, 10.0, h);
            let above = rect(a.left(), a.top() - gap - h, 10.0, h);
            prop_assert!(!a.overlaps(&right));
            prop_assert!(!a.overlaps(&left));
            prop_assert!(!a.overlaps(&below));
            prop_assert!(!a.overlaps(&above));
        }
    }
}
