//! Obstacles: the two kinds, the live field and the spawner

use glam::Vec2;
use rand::Rng;

use super::collision::Rect;
use crate::consts::*;

/// Plant sprite sizes (width, height), already scaled to 80%
pub const PLANT_SIZES: [(f32, f32); 6] = [
    (34.0 * 0.8, 70.0 * 0.8),
    (68.0 * 0.8, 70.0 * 0.8),
    (102.0 * 0.8, 70.0 * 0.8),
    (50.0 * 0.8, 100.0 * 0.8),
    (100.0 * 0.8, 100.0 * 0.8),
    (150.0 * 0.8, 100.0 * 0.8),
];

/// Index into [`PLANT_SIZES`]; also selects the plant sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlantVariant(u8);

impl PlantVariant {
    pub const COUNT: usize = PLANT_SIZES.len();

    /// Variant for a table index (wraps out-of-range values)
    pub fn new(index: usize) -> Self {
        Self((index % Self::COUNT) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn size(self) -> Vec2 {
        let (w, h) = PLANT_SIZES[self.index()];
        Vec2::new(w, h)
    }
}

/// A bird flying at one of two altitudes
#[derive(Debug, Clone, PartialEq)]
pub struct LowFlyer {
    pub pos: Vec2,
    /// Wing animation frame (0 or 1)
    pub frame: u8,
}

/// A plant rooted on the ground line
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPlant {
    pub pos: Vec2,
    pub variant: PlantVariant,
}

/// An obstacle scrolling toward the swan
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    LowFlyer(LowFlyer),
    GroundPlant(GroundPlant),
}

impl Obstacle {
    /// Bird at the given altitude, entering from the right edge
    pub fn low_flyer(x: f32, y: f32) -> Self {
        Obstacle::LowFlyer(LowFlyer {
            pos: Vec2::new(x, y),
            frame: 0,
        })
    }

    /// Plant whose base sits flush with the swan's feet
    pub fn ground_plant(x: f32, variant: PlantVariant) -> Self {
        let height = variant.size().y;
        Obstacle::GroundPlant(GroundPlant {
            pos: Vec2::new(x, GROUND_Y + (PLAYER_HEIGHT - height)),
            variant,
        })
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Obstacle::LowFlyer(flyer) => flyer.pos,
            Obstacle::GroundPlant(plant) => plant.pos,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            Obstacle::LowFlyer(_) => Vec2::new(LOW_FLYER_WIDTH, LOW_FLYER_HEIGHT),
            Obstacle::GroundPlant(plant) => plant.variant.size(),
        }
    }

    /// Sprite bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos(), self.size())
    }

    /// Fully past the left edge of the viewport
    pub fn off_screen(&self) -> bool {
        self.pos().x + self.size().x <= 0.0
    }

    fn shift(&mut self, dx: f32) {
        match self {
            Obstacle::LowFlyer(flyer) => flyer.pos.x -= dx,
            Obstacle::GroundPlant(plant) => plant.pos.x -= dx,
        }
    }
}

/// Live obstacles in spawn order (leftmost first)
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Scroll every obstacle left and update bird wing frames
    pub fn advance(&mut self, distance: f32, anim_frame: u8) {
        for obstacle in &mut self.obstacles {
            obstacle.shift(distance);
            if let Obstacle::LowFlyer(flyer) = obstacle {
                flyer.frame = anim_frame;
            }
        }
    }

    /// Drop obstacles that have completely left the screen
    pub fn prune(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.off_screen());
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObstacleField {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}

/// Cooldown-gated obstacle emitter
#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    /// Seconds until the next spawn
    pub cooldown: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            cooldown: SPAWN_INTERVAL,
        }
    }
}

impl Spawner {
    /// Count down; emits one obstacle when the cooldown runs out.
    ///
    /// The interval is fixed and does not follow speed or the nominal
    /// obstacle frequency.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<Obstacle> {
        self.cooldown -= dt.max(0.0);
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = SPAWN_INTERVAL;
        Some(random_obstacle(rng))
    }
}

/// Pick a kind and geometry for a new obstacle at the right edge
pub fn random_obstacle<R: Rng>(rng: &mut R) -> Obstacle {
    if rng.random::<f32>() < LOW_FLYER_CHANCE {
        let altitude = LOW_FLYER_ALTITUDES[rng.random_range(0..LOW_FLYER_ALTITUDES.len())];
        Obstacle::low_flyer(VIEW_WIDTH, altitude)
    } else {
        let variant = PlantVariant::new(rng.random_range(0..PlantVariant::COUNT));
        Obstacle::ground_plant(VIEW_WIDTH, variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_plant_sits_on_ground() {
        for index in 0..PlantVariant::COUNT {
            let plant = Obstacle::ground_plant(100.0, PlantVariant::new(index));
            let bounds = plant.bounds();
            assert!((bounds.bottom() - (GROUND_Y + PLAYER_HEIGHT)).abs() < 0.001);
        }
    }

    #[test]
    fn test_prune_only_fully_offscreen() {
        let mut field = ObstacleField::new();
        // Right edge exactly at 0: gone
        field.push(Obstacle::low_flyer(-LOW_FLYER_WIDTH, 50.0));
        // One pixel still visible: kept
        field.push(Obstacle::low_flyer(-LOW_FLYER_WIDTH + 1.0, 50.0));
        field.push(Obstacle::ground_plant(300.0, PlantVariant::new(2)));

        assert_eq!(field.prune(), 1);
        assert_eq!(field.len(), 2);
        assert!(field.iter().all(|o| o.pos().x + o.size().x > 0.0));
    }

    #[test]
    fn test_advance_moves_left_and_flaps() {
        let mut field = ObstacleField::new();
        field.push(Obstacle::low_flyer(400.0, 100.0));
        field.push(Obstacle::ground_plant(500.0, PlantVariant::new(0)));
        field.advance(10.0, 1);

        let xs: Vec<f32> = field.iter().map(|o| o.pos().x).collect();
        assert_eq!(xs, vec![390.0, 490.0]);
        assert!(matches!(
            field.iter().next(),
            Some(Obstacle::LowFlyer(LowFlyer { frame: 1, .. }))
        ));
    }

    #[test]
    fn test_spawner_cadence() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawner = Spawner::default();
        let dt = 0.25;

        let mut spawned = 0;
        // Cooldown runs out on every fifth step
        for _ in 0..40 {
            if spawner.update(dt, &mut rng).is_some() {
                spawned += 1;
            }
        }
        assert_eq!(spawned, 8);
    }

    #[test]
    fn test_spawner_emits_one_per_expiry() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = Spawner { cooldown: 0.01 };
        // A huge step still only yields a single obstacle
        assert!(spawner.update(5.0, &mut rng).is_some());
        assert_eq!(spawner.cooldown, SPAWN_INTERVAL);
        assert!(spawner.update(0.0, &mut rng).is_none());
    }

    #[test]
    fn test_random_obstacle_geometry() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut flyers = 0;
        let total = 2000;
        for _ in 0..total {
            match random_obstacle(&mut rng) {
                Obstacle::LowFlyer(flyer) => {
                    flyers += 1;
                    assert!(LOW_FLYER_ALTITUDES.contains(&flyer.pos.y));
                    assert_eq!(flyer.pos.x, VIEW_WIDTH);
                }
                Obstacle::GroundPlant(plant) => {
                    assert!(plant.variant.index() < PLANT_SIZES.len());
                    assert_eq!(plant.pos.x, VIEW_WIDTH);
                }
            }
        }
        // Roughly 30% flyers
        let ratio = flyers as f32 / total as f32;
        assert!((0.25..0.35).contains(&ratio), "flyer ratio {ratio}");
    }
}
