use scission::{
    Body, BodyId, BodyType, Material, NoOpStepObserver, PolygonSplitter, Segment, Shape, SlicingAlgorithm,
    StepObserver, Vec2, World, WorldConfig,
};

#[derive(Default)]
struct SliceRecorder {
    sliced: Vec<(BodyId, [BodyId; 2])>,
}

impl StepObserver<f32> for SliceRecorder {
    fn on_body_sliced(&mut self, original: BodyId, pieces: [BodyId; 2]) {
        self.sliced.push((original, pieces));
    }
}

fn hexagon(world: &mut World<f32>) -> BodyId {
    let shape = Shape::regular_polygon(6, 60.0, Material::default().with_density(2.0)).unwrap();
    let body = Body::new(shape, Vec2::new(0.0, 0.0), BodyType::Dynamic)
        .with_slicable(true)
        .with_color(0xFF00_00FF);
    world.add_body(body)
}

fn zero_gravity() -> World<f32> {
    World::new(WorldConfig::default().with_gravity(Vec2::new(0.0, 0.0)))
}

#[test]
fn slicing_conserves_area_and_mass() {
    let mut world = zero_gravity();
    let id = hexagon(&mut world);
    let area = world.body(id).unwrap().shape.area();
    let mass = world.body(id).unwrap().mass_data().mass;

    let cut = Segment::new(Vec2::new(10.0, -100.0), Vec2::new(-5.0, 100.0));
    let mut recorder = SliceRecorder::default();
    assert_eq!(world.slice(&cut, &mut recorder), 1);

    assert!(world.body(id).is_none());
    assert_eq!(world.body_count(), 2);
    assert_eq!(recorder.sliced.len(), 1);
    assert_eq!(recorder.sliced[0].0, id);

    let pieces: Vec<_> = recorder.sliced[0].1.iter().map(|&p| world.body(p).unwrap()).collect();
    let total_area: f32 = pieces.iter().map(|b| b.shape.area()).sum();
    let total_mass: f32 = pieces.iter().map(|b| b.mass_data().mass).sum();
    assert!((total_area - area).abs() / area < 0.01, "area {} vs {}", total_area, area);
    assert!((total_mass - mass).abs() / mass < 0.01, "mass {} vs {}", total_mass, mass);

    for piece in &pieces {
        assert!(piece.slicable);
        assert_eq!(piece.color, 0xFF00_00FF);
        assert_eq!(piece.body_type(), BodyType::Dynamic);
        assert_eq!(piece.angle(), 0.0);
        assert!(piece.contains_point(piece.position()));
    }
}

#[test]
fn pieces_separate_along_cut_normal() {
    let mut world = zero_gravity();
    hexagon(&mut world);
    let cut = Segment::new(Vec2::new(0.0, -100.0), Vec2::new(0.0, 100.0));
    let mut recorder = SliceRecorder::default();
    world.slice(&cut, &mut recorder);

    let [a, b] = recorder.sliced[0].1;
    let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
    let (left, right) = if a.position().x < b.position().x { (a, b) } else { (b, a) };
    assert!((left.velocity.x + 50.0).abs() < 1e-3, "left vx = {}", left.velocity.x);
    assert!((right.velocity.x - 50.0).abs() < 1e-3, "right vx = {}", right.velocity.x);
}

#[test]
fn uneven_pieces_part_at_the_same_speed() {
    let mut world = zero_gravity();
    hexagon(&mut world);
    let cut = Segment::new(Vec2::new(25.0, -100.0), Vec2::new(25.0, 100.0));
    let mut recorder = SliceRecorder::default();
    assert_eq!(world.slice(&cut, &mut recorder), 1);

    let [a, b] = recorder.sliced[0].1;
    let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
    let (big, small) = if a.mass_data().mass > b.mass_data().mass { (a, b) } else { (b, a) };
    assert!(big.mass_data().mass > 2.0 * small.mass_data().mass);
    assert!((big.velocity.x + 50.0).abs() < 1e-3, "big vx = {}", big.velocity.x);
    assert!((small.velocity.x - 50.0).abs() < 1e-3, "small vx = {}", small.velocity.x);
}

#[test]
fn spinning_body_passes_on_point_velocity() {
    let mut world = zero_gravity();
    let id = hexagon(&mut world);
    world.body_mut(id).unwrap().angular_velocity = 2.0;
    let cut = Segment::new(Vec2::new(-100.0, 1.0), Vec2::new(100.0, 1.0));
    let mut recorder = SliceRecorder::default();
    world.slice(&cut, &mut recorder);

    for &piece in &recorder.sliced[0].1 {
        let body = world.body(piece).unwrap();
        assert_eq!(body.angular_velocity, 2.0);
        // Centroids sit on the y axis, so spin shows up as x velocity.
        let expected_vx = -2.0 * body.position().y;
        assert!((body.velocity.x - expected_vx).abs() < 1e-2, "vx = {}, expected {}", body.velocity.x, expected_vx);
    }
}

#[test]
fn single_crossing_leaves_world_unchanged() {
    let mut world = zero_gravity();
    let id = hexagon(&mut world);
    let cut = Segment::new(Vec2::new(-100.0, 0.0), Vec2::new(0.0, 0.0));
    assert_eq!(world.slice(&cut, &mut NoOpStepObserver), 0);
    assert!(world.body(id).is_some());
    assert_eq!(world.body_count(), 1);
}

#[test]
fn sliver_cut_is_rejected() {
    let mut world = zero_gravity();
    let id = hexagon(&mut world);
    // Clips the +x corner, leaving a triangle well under the minimum area.
    let cut = Segment::new(Vec2::new(58.0, -100.0), Vec2::new(58.0, 100.0));

    let result = SlicingAlgorithm::slice_body(world.body(id).unwrap(), &cut).unwrap();
    let splitter = PolygonSplitter::from_config(world.config());
    assert!(!splitter.split(&result, &mut world, &mut NoOpStepObserver));

    assert_eq!(world.slice(&cut, &mut NoOpStepObserver), 0);
    assert!(world.body(id).is_some());
    assert_eq!(world.body_count(), 1);
}

#[test]
fn unslicable_and_static_walls() {
    let mut world = zero_gravity();
    let solid = world.add_body(Body::wall(Vec2::new(0.0, 0.0), 100.0, 100.0).unwrap());
    let breakable = world.add_body(Body::wall(Vec2::new(300.0, 0.0), 100.0, 100.0).unwrap().with_slicable(true));

    let cut = Segment::new(Vec2::new(-100.0, 10.0), Vec2::new(400.0, 10.0));
    let mut recorder = SliceRecorder::default();
    assert_eq!(world.slice(&cut, &mut recorder), 1);

    assert!(world.body(solid).is_some());
    assert!(world.body(breakable).is_none());
    for &piece in &recorder.sliced[0].1 {
        let body = world.body(piece).unwrap();
        assert_eq!(body.body_type(), BodyType::Static);
        assert_eq!(body.velocity, Vec2::new(0.0, 0.0));
        assert_eq!(body.mass_data().inv_mass, 0.0);
    }
}

#[test]
fn blades_are_never_cut() {
    let mut world = zero_gravity();
    let blade = Body::blade(Vec2::new(0.0, 0.0), 100.0, 10.0).unwrap().with_slicable(true);
    let blade = world.add_body(blade);
    let cut = Segment::new(Vec2::new(0.0, -50.0), Vec2::new(0.0, 50.0));
    assert_eq!(world.slice(&cut, &mut NoOpStepObserver), 0);
    assert!(world.body(blade).is_some());
}

#[test]
fn sliced_pieces_keep_simulating() {
    let mut world = World::new(WorldConfig::default());
    world.add_body(Body::wall(Vec2::new(0.0, 200.0), 600.0, 20.0).unwrap());
    hexagon(&mut world);
    let cut = Segment::new(Vec2::new(0.0, -100.0), Vec2::new(0.0, 100.0));
    assert_eq!(world.slice(&cut, &mut NoOpStepObserver), 1);

    for _ in 0..120 {
        world.update_fixed(1.0 / 60.0, &mut NoOpStepObserver);
    }
    assert_eq!(world.body_count(), 3);
    for body in world.bodies().iter().filter(|b| b.body_type() == BodyType::Dynamic) {
        assert!(body.position().y > 0.0 && body.position().y < 200.0, "y = {}", body.position().y);
    }
}
