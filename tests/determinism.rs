use scission::{
    Body, BodyType, Fabric, FabricConfig, Material, NoOpStepObserver, Segment, Shape, Vec2, World, WorldConfig,
};

fn build_scene() -> World<f32> {
    let mut world = World::new(WorldConfig::default());
    world.add_body(Body::wall(Vec2::new(0.0, 300.0), 800.0, 20.0).unwrap());
    for i in 0..5 {
        let shape = Shape::rect(40.0, 40.0, Material::default()).unwrap();
        let x = -100.0 + i as f32 * 45.0;
        let y = 200.0 - (i % 2) as f32 * 60.0;
        world.add_body(Body::new(shape, Vec2::new(x, y), BodyType::Dynamic).with_slicable(true));
    }
    let hex = Shape::regular_polygon(6, 30.0, Material::default()).unwrap();
    world.add_body(Body::new(hex, Vec2::new(150.0, 100.0), BodyType::Dynamic).with_slicable(true));

    let cloth = FabricConfig { cols: 8, rows: 6, spacing: 12.0, ..FabricConfig::default() };
    Fabric::create(&mut world, Vec2::new(-300.0, -200.0), &cloth).unwrap();
    world
}

fn run() -> Vec<(u32, u32, u32)> {
    let mut world = build_scene();
    for step in 0..120 {
        if step == 30 {
            let cut = Segment::new(Vec2::new(150.0, -50.0), Vec2::new(140.0, 300.0));
            world.slice(&cut, &mut NoOpStepObserver);
        }
        world.update_fixed(1.0 / 60.0, &mut NoOpStepObserver);
    }
    world
        .bodies()
        .iter()
        .map(|b| (b.position().x.to_bits(), b.position().y.to_bits(), b.angle().to_bits()))
        .collect()
}

#[test]
fn identical_runs_are_bit_identical() {
    let first = run();
    for _ in 0..3 {
        assert_eq!(run(), first);
    }
}

#[test]
fn constraint_state_is_reproducible() {
    let snapshot = || {
        let mut world = build_scene();
        for _ in 0..60 {
            world.update_fixed(1.0 / 60.0, &mut NoOpStepObserver);
        }
        world.constraints().iter().map(|c| c.current_force.to_bits()).collect::<Vec<_>>()
    };
    assert_eq!(snapshot(), snapshot());
}
