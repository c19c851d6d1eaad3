use proptest::prelude::*;
use scission::{
    Aabb, AabbTree, Body, BodyId, BodyType, Broadphase, Material, NoOpStepObserver, Segment, Shape, Vec2, World,
    WorldConfig,
};

fn boxes() -> impl Strategy<Value = Vec<(f32, f32, f32, f32)>> {
    prop::collection::vec((-200.0f32..200.0, -200.0f32..200.0, 1.0f32..40.0, 1.0f32..40.0), 0..40)
}

proptest! {
    #[test]
    fn tree_pairs_match_brute_force(specs in boxes()) {
        let margin = 0.1f32;
        let mut tree = AabbTree::new(margin);
        let mut fat = Vec::new();
        for (i, &(x, y, w, h)) in specs.iter().enumerate() {
            let aabb = Aabb::new(Vec2::new(x, y), Vec2::new(x + w, y + h));
            let proxy = tree.insert(BodyId(i as u32), aabb);
            fat.push(tree.fat_aabb(proxy).unwrap());
        }

        let mut expected = Vec::new();
        for i in 0..fat.len() {
            for j in (i + 1)..fat.len() {
                if fat[i].overlaps(&fat[j]) {
                    expected.push((BodyId(i as u32), BodyId(j as u32)));
                }
            }
        }
        let mut actual = tree.pairs();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn removal_keeps_remaining_pairs(specs in boxes(), remove_every in 2usize..5) {
        let mut tree = AabbTree::new(0.1f32);
        let mut proxies = Vec::new();
        for (i, &(x, y, w, h)) in specs.iter().enumerate() {
            let aabb = Aabb::new(Vec2::new(x, y), Vec2::new(x + w, y + h));
            proxies.push((BodyId(i as u32), tree.insert(BodyId(i as u32), aabb)));
        }
        let mut kept = Vec::new();
        for (i, &(id, proxy)) in proxies.iter().enumerate() {
            if i % remove_every == 0 {
                tree.remove(proxy);
            } else {
                kept.push(id);
            }
        }
        prop_assert_eq!(tree.len(), kept.len());
        for (a, b) in tree.pairs() {
            prop_assert!(a < b);
            prop_assert!(kept.contains(&a) && kept.contains(&b));
        }
    }

    #[test]
    fn slicing_conserves_area(
        sides in 3usize..10,
        radius in 30.0f32..120.0,
        angle in 0.0f32..core::f32::consts::PI,
        offset in -0.5f32..0.5,
    ) {
        let mut world = World::new(WorldConfig::default().with_gravity(Vec2::new(0.0, 0.0)));
        let shape = Shape::regular_polygon(sides, radius, Material::default()).unwrap();
        let area = shape.area();
        let id = world.add_body(Body::new(shape, Vec2::new(0.0, 0.0), BodyType::Dynamic).with_slicable(true));

        let (s, c) = angle.sin_cos();
        let dir = Vec2::new(c, s);
        let shift = Vec2::new(-s, c);
        let center = Vec2::new(shift.x * offset * radius * 0.5, shift.y * offset * radius * 0.5);
        let reach = radius * 3.0;
        let cut = Segment::new(
            Vec2::new(center.x - dir.x * reach, center.y - dir.y * reach),
            Vec2::new(center.x + dir.x * reach, center.y + dir.y * reach),
        );

        // Keep the cut points clear of the vertices so the splitter never
        // merges a cut point into a corner, which would shave off area.
        let vertices = world.body(id).unwrap().world_vertices().unwrap();
        let clearance = vertices
            .iter()
            .map(|v| ((v.x - center.x) * dir.y - (v.y - center.y) * dir.x).abs())
            .fold(f32::INFINITY, f32::min);
        prop_assume!(clearance > 1.5);

        let sliced = world.slice(&cut, &mut NoOpStepObserver);
        if sliced == 0 {
            // Rejected cuts leave the body alone.
            prop_assert!(world.body(id).is_some());
            prop_assert_eq!(world.body_count(), 1);
        } else {
            prop_assert_eq!(world.body_count(), 2);
            let total: f32 = world.bodies().iter().map(|b| b.shape.area()).sum();
            prop_assert!((total - area).abs() <= 0.01 * area, "area {} vs {}", total, area);
        }
    }
}
