//! Cloth built from soft particles and tearable distance constraints.

use alloc::vec::Vec as AllocVec;

use crate::body::{Body, BodyId, BodyType};
use crate::broadphase::Broadphase;
use crate::constraint::Constraint;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use crate::world::World;

/// Configuration for a cloth sheet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct FabricConfig<F: Float> {
    pub cols: usize,
    pub rows: usize,
    /// Rest distance between horizontal and vertical neighbours.
    pub spacing: F,
    /// Stiffness of every link, in [0, 1].
    pub stiffness: F,
    pub particle_radius: F,
    pub density: F,
}

impl<F: Float> Default for FabricConfig<F> {
    fn default() -> Self {
        FabricConfig {
            cols: 10,
            rows: 10,
            spacing: F::from_f32(20.0),
            stiffness: F::one(),
            particle_radius: F::two(),
            density: F::one(),
        }
    }
}

/// Handle to a cloth sheet living in a [`World`].
///
/// The world owns the particles and links; this only remembers which
/// bodies make up the grid. Particle at (col, row) has index
/// `row * cols + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct Fabric {
    particles: AllocVec<BodyId>,
    cols: usize,
    rows: usize,
}

impl Fabric {
    /// Add a cloth sheet to `world`, hanging from `origin` towards +y.
    ///
    /// Creates structural links (horizontal and vertical, rest = spacing)
    /// and shear links (both diagonals, rest = spacing * sqrt(2)), all
    /// tearable. The top row is pinned.
    pub fn create<F: Float, B: Broadphase<F>>(
        world: &mut World<F, B>,
        origin: Vec2<F>,
        config: &FabricConfig<F>,
    ) -> Result<Fabric, PhysicsError> {
        let (cols, rows, spacing) = (config.cols, config.rows, config.spacing);
        if cols < 2 || rows < 2 {
            return Err(PhysicsError::InvalidGridDimensions);
        }
        if !(spacing > F::zero()) {
            return Err(PhysicsError::InvalidSpacing);
        }

        // Build every particle before touching the world so a bad radius or
        // density leaves it unchanged.
        let mut bodies = AllocVec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                let position = Vec2::new(
                    origin.x + F::from_f32(col as f32) * spacing,
                    origin.y + F::from_f32(row as f32) * spacing,
                );
                bodies.push(Body::cloth_particle(position, config.particle_radius, config.density, row == 0)?);
            }
        }
        let particles: AllocVec<BodyId> = bodies.into_iter().map(|b| world.add_body(b)).collect();

        let diag_length = (spacing * spacing + spacing * spacing).sqrt();
        let mut links = AllocVec::new();

        // Structural: horizontal
        for row in 0..rows {
            for col in 0..(cols - 1) {
                links.push((row * cols + col, row * cols + col + 1, spacing));
            }
        }

        // Structural: vertical
        for row in 0..(rows - 1) {
            for col in 0..cols {
                links.push((row * cols + col, (row + 1) * cols + col, spacing));
            }
        }

        // Shear: diagonals
        for row in 0..(rows - 1) {
            for col in 0..(cols - 1) {
                let tl = row * cols + col;
                let tr = tl + 1;
                let bl = tl + cols;
                let br = bl + 1;
                links.push((tl, br, diag_length));
                links.push((tr, bl, diag_length));
            }
        }

        let link_count = links.len();
        for (a, b, rest) in links {
            let link = Constraint::distance(particles[a], particles[b], rest, config.stiffness).with_tearable(true);
            world.add_constraint(link)?;
        }

        log::debug!("fabric {}x{} created with {} links", cols, rows, link_count);
        Ok(Fabric { particles, cols, rows })
    }

    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Body id of the particle at (col, row), if inside the grid.
    pub fn particle(&self, col: usize, row: usize) -> Option<BodyId> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.particles.get(self.index(col, row)).copied()
    }

    pub fn particles(&self) -> &[BodyId] {
        &self.particles
    }

    /// Fix a particle in place.
    pub fn pin<F: Float, B: Broadphase<F>>(
        &self,
        world: &mut World<F, B>,
        col: usize,
        row: usize,
    ) -> Result<(), PhysicsError> {
        self.set_particle_type(world, col, row, BodyType::Static)
    }

    /// Release a pinned particle back into the simulation.
    pub fn unpin<F: Float, B: Broadphase<F>>(
        &self,
        world: &mut World<F, B>,
        col: usize,
        row: usize,
    ) -> Result<(), PhysicsError> {
        self.set_particle_type(world, col, row, BodyType::Soft)
    }

    fn set_particle_type<F: Float, B: Broadphase<F>>(
        &self,
        world: &mut World<F, B>,
        col: usize,
        row: usize,
        body_type: BodyType,
    ) -> Result<(), PhysicsError> {
        let id = self.particle(col, row).ok_or(PhysicsError::InvalidGridDimensions)?;
        let body = world.body_mut(id).ok_or(PhysicsError::BodyNotFound(id))?;
        body.set_body_type(body_type);
        Ok(())
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
}
