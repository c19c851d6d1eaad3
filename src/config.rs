//! Configuration types for the world and its solvers.

use crate::float::Float;
use crate::vec::Vec2;

/// Tunables for a [`World`](crate::World).
///
/// Units are screen-like: positions in pixels, y pointing down.
///
/// # Builder Pattern
/// ```
/// use scission::config::WorldConfig;
/// use scission::vec::Vec2;
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_gravity(Vec2::new(0.0, 981.0))
///     .with_velocity_iterations(8)
///     .with_position_iterations(3)
///     .with_tear_threshold(20_000.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig<F: Float> {
    /// Gravity acceleration. Default: (0, 500).
    pub gravity: Vec2<F>,
    /// Sequential impulse passes per step. Default: 10.
    pub velocity_iterations: usize,
    /// Penetration/length correction passes per step. Default: 5.
    pub position_iterations: usize,
    /// Broadphase leaf fattening. Default: 0.1.
    pub aabb_margin: F,
    /// Penetration allowed before correction kicks in. Default: 0.01.
    pub slop: F,
    /// Fraction of positional error corrected per pass. Default: 0.2.
    pub baumgarte: F,
    /// Per-step linear velocity multiplier. Default: 0.999.
    pub linear_damping: F,
    /// Per-step angular velocity multiplier. Default: 0.995.
    pub angular_damping: F,
    /// Closing speed beyond which restitution applies. Default: 1.0.
    pub restitution_threshold: F,
    /// Stress at which tearable constraints break. Default: 30000.
    pub tear_threshold: F,
    /// Slice fragments smaller than this are rejected. Default: 100.
    pub min_fragment_area: F,
    /// Squared distance under which fragment vertices merge. Default: 1.0.
    pub merge_distance_sq: F,
    /// Speed pushing slice fragments apart. Default: 50.
    pub separation_speed: F,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            gravity: Vec2::new(F::zero(), F::from_f32(500.0)),
            velocity_iterations: 10,
            position_iterations: 5,
            aabb_margin: F::from_f32(0.1),
            slop: F::from_f32(0.01),
            baumgarte: F::from_f32(0.2),
            linear_damping: F::from_f32(0.999),
            angular_damping: F::from_f32(0.995),
            restitution_threshold: F::one(),
            tear_threshold: F::from_f32(30_000.0),
            min_fragment_area: F::from_f32(100.0),
            merge_distance_sq: F::one(),
            separation_speed: F::from_f32(50.0),
        }
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the number of velocity iterations.
    pub fn with_velocity_iterations(mut self, iterations: usize) -> Self {
        self.velocity_iterations = iterations;
        self
    }

    /// Set the number of position iterations.
    pub fn with_position_iterations(mut self, iterations: usize) -> Self {
        self.position_iterations = iterations;
        self
    }

    pub fn with_aabb_margin(mut self, margin: F) -> Self {
        self.aabb_margin = margin;
        self
    }

    /// Set the linear and angular damping multipliers.
    pub fn with_damping(mut self, linear: F, angular: F) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    pub fn with_tear_threshold(mut self, threshold: F) -> Self {
        self.tear_threshold = threshold;
        self
    }

    pub fn with_min_fragment_area(mut self, area: F) -> Self {
        self.min_fragment_area = area;
        self
    }

    pub fn with_separation_speed(mut self, speed: F) -> Self {
        self.separation_speed = speed;
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
