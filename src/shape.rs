//! Collision shapes, materials and mass properties.

use alloc::vec::Vec as AllocVec;

use crate::aabb::Aabb;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::transform::Transform;
use crate::vec::{Vec, Vec2};

/// Surface and bulk properties carried by a shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material<F: Float> {
    pub density: F,
    pub friction: F,
    pub restitution: F,
}

impl<F: Float> Material<F> {
    pub fn new(density: F, friction: F, restitution: F) -> Self {
        Material { density, friction, restitution }
    }

    pub fn with_density(mut self, density: F) -> Self {
        self.density = density;
        self
    }

    fn validate(&self) -> Result<(), PhysicsError> {
        if self.density.is_nan() || self.density < F::zero() || self.density == F::infinity() {
            return Err(PhysicsError::InvalidDensity);
        }
        Ok(())
    }
}

impl<F: Float> Default for Material<F> {
    fn default() -> Self {
        Material { density: F::one(), friction: F::from_f32(0.3), restitution: F::from_f32(0.2) }
    }
}

/// Mass and rotational inertia with their cached inverses.
///
/// An inverse is zero whenever its quantity is zero, which is how static and
/// kinematic bodies opt out of every impulse.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MassData<F: Float> {
    pub mass: F,
    pub inv_mass: F,
    pub inertia: F,
    pub inv_inertia: F,
}

impl<F: Float> MassData<F> {
    pub fn new(mass: F, inertia: F) -> Self {
        let inv = |v: F| if v > F::zero() { F::one() / v } else { F::zero() };
        MassData { mass, inv_mass: inv(mass), inertia, inv_inertia: inv(inertia) }
    }

    /// Zero mass, zero inverses.
    pub fn immovable() -> Self {
        MassData::default()
    }
}

/// Convex polygon in local space: CCW winding, centroid at the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon<F: Float> {
    vertices: AllocVec<Vec2<F>>,
    normals: AllocVec<Vec2<F>>,
    area: F,
}

impl<F: Float> Polygon<F> {
    /// Build a polygon from vertices in either winding.
    ///
    /// Clockwise input is reversed and the result is re-centred on its area
    /// centroid, so `vertices()` may differ from the input by a translation.
    pub fn new(points: &[Vec2<F>]) -> Result<Self, PhysicsError> {
        if points.len() < 3 {
            return Err(PhysicsError::InsufficientVertices { count: points.len() });
        }
        let (centroid, signed) = centroid_and_area(points).ok_or(PhysicsError::DegeneratePolygon)?;

        let mut vertices: AllocVec<Vec2<F>> = points.iter().map(|&p| p - centroid).collect();
        if signed < F::zero() {
            vertices.reverse();
        }

        let n = vertices.len();
        let normals = (0..n)
            .map(|i| {
                let edge = vertices[(i + 1) % n] - vertices[i];
                Vec2::new(edge.y, -edge.x).normalize()
            })
            .collect();

        Ok(Polygon { vertices, normals, area: signed.abs() })
    }

    pub fn vertices(&self) -> &[Vec2<F>] { &self.vertices }
    pub fn normals(&self) -> &[Vec2<F>] { &self.normals }
    pub fn area(&self) -> F { self.area }
    pub fn len(&self) -> usize { self.vertices.len() }
    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// The vertex with the largest projection onto `dir` (local space).
    pub fn support(&self, dir: Vec2<F>) -> Vec2<F> {
        let mut best = self.vertices[0];
        let mut best_proj = best.dot(dir);
        for &v in self.vertices.iter().skip(1) {
            let proj = v.dot(dir);
            if proj > best_proj {
                best_proj = proj;
                best = v;
            }
        }
        best
    }

    /// Local-space point containment (boundary counts as inside).
    pub fn contains_point(&self, p: Vec2<F>) -> bool {
        self.vertices
            .iter()
            .zip(self.normals.iter())
            .all(|(&v, &n)| n.dot(p - v) <= F::zero())
    }

    fn mass_and_inertia(&self, density: F) -> (F, F) {
        // Triangle fan from the origin, which is the centroid.
        let third = F::one() / F::from_f32(3.0);
        let quarter = F::from_f32(0.25);
        let n = self.vertices.len();
        let mut area = F::zero();
        let mut inertia = F::zero();
        for i in 0..n {
            let e1 = self.vertices[i];
            let e2 = self.vertices[(i + 1) % n];
            let d = e1.cross(e2);
            area = area + F::half() * d;
            let int_x2 = e1.x * e1.x + e2.x * e1.x + e2.x * e2.x;
            let int_y2 = e1.y * e1.y + e2.y * e1.y + e2.y * e2.y;
            inertia = inertia + quarter * third * d * (int_x2 + int_y2);
        }
        (density * area, density * inertia)
    }
}

/// Area centroid and signed area (positive for CCW) of a simple polygon.
///
/// Returns `None` when the enclosed area is effectively zero.
pub fn centroid_and_area<F: Float>(points: &[Vec2<F>]) -> Option<(Vec2<F>, F)> {
    let n = points.len();
    if n < 3 {
        return None;
    }
    // Accumulate relative to the first point to limit cancellation.
    let origin = points[0];
    let mut area = F::zero();
    let mut c = Vec2::zero();
    for i in 1..n - 1 {
        let e1 = points[i] - origin;
        let e2 = points[i + 1] - origin;
        let tri = F::half() * e1.cross(e2);
        area = area + tri;
        c = c + (e1 + e2).scale(tri / F::from_f32(3.0));
    }
    if area.is_near_zero(F::from_f32(1e-6)) {
        return None;
    }
    Some((origin + c.scale(F::one() / area), area))
}

/// Geometry of a shape.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind<F: Float> {
    Circle { radius: F },
    Polygon(Polygon<F>),
}

/// A collision shape: geometry plus material.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape<F: Float> {
    pub kind: ShapeKind<F>,
    pub material: Material<F>,
}

impl<F: Float> Shape<F> {
    pub fn circle(radius: F, material: Material<F>) -> Result<Self, PhysicsError> {
        material.validate()?;
        if radius.is_nan() || radius <= F::zero() {
            return Err(PhysicsError::InvalidRadius);
        }
        Ok(Shape { kind: ShapeKind::Circle { radius }, material })
    }

    pub fn polygon(points: &[Vec2<F>], material: Material<F>) -> Result<Self, PhysicsError> {
        material.validate()?;
        Ok(Shape { kind: ShapeKind::Polygon(Polygon::new(points)?), material })
    }

    /// Axis-aligned box of the given full width and height.
    pub fn rect(width: F, height: F, material: Material<F>) -> Result<Self, PhysicsError> {
        let (hw, hh) = (width * F::half(), height * F::half());
        let points = [
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ];
        Self::polygon(&points, material)
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`, the
    /// first vertex on the +x axis.
    pub fn regular_polygon(sides: usize, radius: F, material: Material<F>) -> Result<Self, PhysicsError> {
        if sides < 3 {
            return Err(PhysicsError::InsufficientVertices { count: sides });
        }
        let step = F::two() * F::pi() / F::from_f32(sides as f32);
        let points: AllocVec<Vec2<F>> = (0..sides)
            .map(|i| {
                let angle = step * F::from_f32(i as f32);
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Self::polygon(&points, material)
    }

    pub fn as_polygon(&self) -> Option<&Polygon<F>> {
        match &self.kind {
            ShapeKind::Polygon(p) => Some(p),
            ShapeKind::Circle { .. } => None,
        }
    }

    pub fn area(&self) -> F {
        match &self.kind {
            ShapeKind::Circle { radius } => F::pi() * *radius * *radius,
            ShapeKind::Polygon(p) => p.area(),
        }
    }

    /// Mass properties for the shape's own density.
    pub fn compute_mass(&self) -> MassData<F> {
        let density = self.material.density;
        match &self.kind {
            ShapeKind::Circle { radius } => {
                let mass = density * F::pi() * *radius * *radius;
                MassData::new(mass, F::half() * mass * *radius * *radius)
            }
            ShapeKind::Polygon(p) => {
                let (mass, inertia) = p.mass_and_inertia(density);
                MassData::new(mass, inertia)
            }
        }
    }

    /// World-space bounds under `xf`.
    pub fn compute_aabb(&self, xf: &Transform<F>) -> Aabb<F> {
        match &self.kind {
            ShapeKind::Circle { radius } => {
                let r = Vec2::splat(*radius);
                Aabb::new(xf.position - r, xf.position + r)
            }
            ShapeKind::Polygon(p) => {
                let first = xf.apply(p.vertices[0]);
                let mut aabb = Aabb::new(first, first);
                for &v in p.vertices.iter().skip(1) {
                    let w = xf.apply(v);
                    aabb.min = aabb.min.min(w);
                    aabb.max = aabb.max.max(w);
                }
                aabb
            }
        }
    }

    /// Local-space point containment.
    pub fn contains_local_point(&self, p: Vec2<F>) -> bool {
        match &self.kind {
            ShapeKind::Circle { radius } => p.length_sq() <= *radius * *radius,
            ShapeKind::Polygon(poly) => poly.contains_point(p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clockwise_input_is_rewound() {
        let cw = [
            Vec2::new(0.0f32, 0.0),
            Vec2::new(0.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 0.0),
        ];
        let poly = Polygon::new(&cw).unwrap();
        let v = poly.vertices();
        let e1 = v[1] - v[0];
        let e2 = v[2] - v[1];
        assert!(e1.cross(e2) > 0.0, "vertices should wind counter-clockwise");
        assert!((poly.area() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn polygon_is_recentred() {
        let pts = [Vec2::new(10.0f32, 10.0), Vec2::new(20.0, 10.0), Vec2::new(20.0, 20.0), Vec2::new(10.0, 20.0)];
        let poly = Polygon::new(&pts).unwrap();
        let (c, _) = centroid_and_area(poly.vertices()).unwrap();
        assert!(c.length() < 1e-4);
    }

    #[test]
    fn normals_point_outward() {
        let shape = Shape::rect(2.0f32, 2.0, Material::default()).unwrap();
        let poly = shape.as_polygon().unwrap();
        for (v, n) in poly.vertices().iter().zip(poly.normals()) {
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert!(n.dot(*v) > 0.0);
        }
    }

    #[test]
    fn support_picks_extreme_vertex() {
        let shape = Shape::rect(4.0f32, 2.0, Material::default()).unwrap();
        let s = shape.as_polygon().unwrap().support(Vec2::new(1.0, 1.0));
        assert!(s.distance(Vec2::new(2.0, 1.0)) < 1e-4);
    }

    #[test]
    fn too_few_vertices() {
        let pts = [Vec2::new(0.0f32, 0.0), Vec2::new(1.0, 0.0)];
        assert_eq!(Polygon::new(&pts), Err(PhysicsError::InsufficientVertices { count: 2 }));
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let pts = [Vec2::new(0.0f32, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
        assert_eq!(Polygon::new(&pts), Err(PhysicsError::DegeneratePolygon));
    }

    #[test]
    fn negative_density_rejected() {
        let m = Material::new(-1.0f32, 0.3, 0.2);
        assert_eq!(Shape::circle(1.0, m), Err(PhysicsError::InvalidDensity));
    }
}
