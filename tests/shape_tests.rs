use scission::{Body, BodyType, MassData, Material, PhysicsError, Shape, Transform, Vec2};

#[test]
fn box_mass_and_inertia() {
    let shape: Shape<f32> = Shape::rect(100.0, 50.0, Material::default()).unwrap();
    let md = shape.compute_mass();
    assert!((md.mass - 5000.0).abs() < 50.0, "mass = {}", md.mass);

    let expected_inertia = 5000.0 * (100.0 * 100.0 + 50.0 * 50.0) / 12.0;
    let rel = (md.inertia - expected_inertia).abs() / expected_inertia;
    assert!(rel < 0.01, "inertia = {}, expected ~ {}", md.inertia, expected_inertia);
    assert!((md.inv_mass * md.mass - 1.0).abs() < 1e-5);
}

#[test]
fn static_and_kinematic_bodies_are_immovable() {
    for body_type in [BodyType::Static, BodyType::Kinematic] {
        let shape = Shape::rect(10.0f32, 10.0, Material::default()).unwrap();
        let body = Body::new(shape, Vec2::new(0.0, 0.0), body_type);
        assert_eq!(body.mass_data().inv_mass, 0.0);
        assert_eq!(body.mass_data().inv_inertia, 0.0);
    }
}

#[test]
fn circle_mass() {
    let shape: Shape<f32> = Shape::circle(2.0, Material::default()).unwrap();
    let md = shape.compute_mass();
    let expected = core::f32::consts::PI * 4.0;
    assert!((md.mass - expected).abs() < 1e-3);
    assert!((md.inertia - 0.5 * expected * 4.0).abs() < 1e-2);
}

#[test]
fn hexagon_area() {
    let shape: Shape<f32> = Shape::regular_polygon(6, 60.0, Material::default()).unwrap();
    let expected = 1.5 * 3.0f32.sqrt() * 3600.0;
    assert!((shape.area() - expected).abs() / expected < 1e-3);
    assert_eq!(shape.as_polygon().unwrap().len(), 6);
}

#[test]
fn rotated_box_aabb_grows() {
    let shape: Shape<f32> = Shape::rect(2.0, 2.0, Material::default()).unwrap();
    let aabb = shape.compute_aabb(&Transform::new(Vec2::new(0.0, 0.0), core::f32::consts::FRAC_PI_4));
    let half = 2.0f32.sqrt();
    assert!((aabb.max.x - half).abs() < 1e-4);
    assert!((aabb.min.y + half).abs() < 1e-4);
}

#[test]
fn invalid_shapes_are_rejected() {
    let m = Material::<f32>::default();
    assert_eq!(Shape::circle(0.0, m).unwrap_err(), PhysicsError::InvalidRadius);
    assert_eq!(Shape::circle(1.0, m.with_density(-1.0)).unwrap_err(), PhysicsError::InvalidDensity);
    assert_eq!(
        Shape::polygon(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], m).unwrap_err(),
        PhysicsError::InsufficientVertices { count: 2 }
    );
    let line = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
    assert_eq!(Shape::polygon(&line, m).unwrap_err(), PhysicsError::DegeneratePolygon);
}

#[test]
fn world_point_containment_follows_transform() {
    let shape = Shape::rect(10.0f32, 10.0, Material::default()).unwrap();
    let mut body = Body::new(shape, Vec2::new(100.0, 0.0), BodyType::Dynamic);
    assert!(body.contains_point(Vec2::new(104.0, 4.0)));
    body.set_angle(core::f32::consts::FRAC_PI_4);
    assert!(!body.contains_point(Vec2::new(104.0, 4.0)));
    assert!(body.contains_point(Vec2::new(106.5, 0.0)));
}

fn two_by_two(body_type: BodyType) -> Body<f32> {
    let shape = Shape::rect(2.0, 2.0, Material::default()).unwrap();
    Body::new(shape, Vec2::new(0.0, 0.0), body_type)
}

#[test]
fn off_centre_force_adds_torque() {
    let mut b = two_by_two(BodyType::Dynamic);
    b.apply_force(Vec2::new(0.0, 10.0), Some(Vec2::new(1.0, 0.0)));
    assert_eq!(b.force, Vec2::new(0.0, 10.0));
    assert!((b.torque - 10.0).abs() < 1e-6);
}

#[test]
fn velocity_at_point_includes_spin() {
    let mut b = two_by_two(BodyType::Dynamic);
    b.angular_velocity = 1.0;
    let v = b.velocity_at_point(Vec2::new(0.0, 2.0));
    assert!((v.x + 2.0).abs() < 1e-6);
    assert!(v.y.abs() < 1e-6);
}

#[test]
fn switching_to_static_zeroes_mass() {
    let mut b = two_by_two(BodyType::Dynamic);
    assert!(b.mass_data().inv_mass > 0.0);
    b.set_body_type(BodyType::Static);
    assert_eq!(*b.mass_data(), MassData::immovable());
}

#[test]
fn set_position_refreshes_aabb() {
    let mut b = two_by_two(BodyType::Dynamic);
    b.set_position(Vec2::new(10.0, 0.0));
    assert!((b.aabb().min.x - 9.0).abs() < 1e-5);
}
