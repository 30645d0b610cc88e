//! Level construction.

use glam::{Vec2, Vec3};
use ledge_physics::{CollisionWorld, GeometryError, LayerMask};
use serde::{Deserialize, Serialize};

/// Spawn center height above a floor at y=0 for the default 1x2 collider.
///
/// Slightly above resting height so the first step settles onto the floor.
pub const SPAWN_HEIGHT: f32 = 1.05;

/// A level: static collision geometry plus spawn points.
#[derive(Debug, Clone)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Actor spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// Where an actor appears when a level starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Collider center in world space.
    pub position: Vec3,

    /// `1.0` facing right, `-1.0` facing left.
    pub facing: f32,
}

impl SpawnPoint {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            facing: 1.0,
        }
    }
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// A single wide floor with its top at y=0.
    pub fn flat_ground() -> Result<Self, GeometryError> {
        let mut level = Self::new("flat_ground", "Flat Ground");

        level.collision.add_box(
            Vec2::new(0.0, -0.5),
            Vec2::new(200.0, 0.5),
            LayerMask::GROUND,
        )?;
        level.spawn_points.push(SpawnPoint::new(Vec3::new(0.0, SPAWN_HEIGHT, 0.0)));

        Ok(level)
    }

    /// A short course exercising every kind of contact.
    ///
    /// Left to right: boundary wall, spawn, a walkable ramp up to a plateau,
    /// a drop, a low ceiling, a pushable crate, a slope too steep to climb and
    /// a boundary wall.
    pub fn test_course() -> Result<Self, GeometryError> {
        let mut level = Self::new("test_course", "Test Course");
        let world = &mut level.collision;

        // Floor
        world.add_box_min_max(Vec2::new(-10.0, -1.0), Vec2::new(60.0, 0.0), LayerMask::GROUND)?;

        // Boundary walls
        world.add_box_min_max(Vec2::new(-11.0, 0.0), Vec2::new(-10.0, 20.0), LayerMask::GROUND)?;
        world.add_box_min_max(Vec2::new(60.0, 0.0), Vec2::new(61.0, 20.0), LayerMask::GROUND)?;

        // ~27 degree ramp up to a plateau, then a drop
        world.add_convex_polygon(
            &[Vec2::new(4.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 3.0)],
            LayerMask::GROUND,
        )?;
        world.add_box_min_max(Vec2::new(10.0, 0.0), Vec2::new(16.0, 3.0), LayerMask::GROUND)?;

        // Platform low enough to bump into when jumping
        world.add_box_min_max(Vec2::new(22.0, 2.6), Vec2::new(28.0, 3.0), LayerMask::PLATFORM)?;

        // Pushable crate
        world.add_box_min_max(
            Vec2::new(32.0, 0.0),
            Vec2::new(33.0, 1.5),
            LayerMask::GROUND | LayerMask::INTERACTABLE,
        )?;

        // ~76 degree slope, past the default 70 degree limit
        world.add_convex_polygon(
            &[Vec2::new(40.0, 0.0), Vec2::new(41.0, 0.0), Vec2::new(41.0, 4.0)],
            LayerMask::GROUND,
        )?;

        // Purely visual, never collides with movement
        world.add_box_min_max(Vec2::new(18.0, 0.0), Vec2::new(19.0, 5.0), LayerMask::DECORATION)?;

        level.spawn_points.push(SpawnPoint::new(Vec3::new(0.0, SPAWN_HEIGHT, 0.0)));
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(50.0, SPAWN_HEIGHT, 0.0),
            facing: -1.0,
        });

        Ok(level)
    }

    /// Get a spawn point by index.
    pub fn spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }

    /// First spawn point, or one above the origin if the level has none.
    pub fn default_spawn(&self) -> SpawnPoint {
        self.spawn(0)
            .copied()
            .unwrap_or_else(|| SpawnPoint::new(Vec3::new(0.0, SPAWN_HEIGHT, 0.0)))
    }
}
