use std::collections::BTreeSet;

use voxel_world::{
    engine_state::{
        rendering::{MeshKind, PresentationMode, RenderTarget, SceneTarget},
        voxels::{generation::GenerationMethod, ChunkCoord, World},
    },
    WorldConfig,
};

fn world(generation: GenerationMethod) -> World {
    World::new(&WorldConfig {
        seed: Some(77),
        render_distance: 2,
        generation,
        ..WorldConfig::default()
    })
}

fn square(center: ChunkCoord, radius: i32) -> BTreeSet<ChunkCoord> {
    let mut coords = BTreeSet::new();
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            coords.insert(center.offset(dx, dz));
        }
    }
    coords
}

fn attached(scene: &SceneTarget) -> BTreeSet<ChunkCoord> {
    scene.attached_chunks().into_iter().collect()
}

#[test]
fn first_tick_attaches_exactly_the_window() {
    let mut world = world(GenerationMethod::Terrain);
    let mut scene = SceneTarget::new();

    let report = world.update_around(ChunkCoord::new(0, 0), &mut scene);

    assert_eq!(attached(&scene), square(ChunkCoord::new(0, 0), 2));
    assert_eq!(report.attached.len(), 25);
    assert!(report.detached.is_empty());
    for coord in square(ChunkCoord::new(0, 0), 2) {
        for kind in MeshKind::ALL {
            assert!(scene.is_attached(coord, kind));
        }
    }
}

#[test]
fn moving_one_chunk_east_swaps_one_column() {
    let mut world = world(GenerationMethod::Terrain);
    let mut scene = SceneTarget::new();
    world.update_around(ChunkCoord::new(0, 0), &mut scene);

    let revisions: Vec<_> = square(ChunkCoord::new(0, 0), 2)
        .into_iter()
        .map(|coord| (coord, world.chunk(coord).unwrap().mesh_revision()))
        .collect();
    let created = world.store().len();

    let report = world.update_around(ChunkCoord::new(1, 0), &mut scene);

    let detached: BTreeSet<_> = report.detached.iter().copied().collect();
    let newly: BTreeSet<_> = report.attached.iter().copied().collect();
    assert_eq!(detached, (-2..=2).map(|z| ChunkCoord::new(-2, z)).collect());
    assert_eq!(newly, (-2..=2).map(|z| ChunkCoord::new(3, z)).collect());
    assert_eq!(attached(&scene), square(ChunkCoord::new(1, 0), 2));

    // Chunks that stay in the window keep their meshes.
    for (coord, revision) in revisions {
        assert_eq!(world.chunk(coord).unwrap().mesh_revision(), revision, "{:?} was remeshed", coord);
        if coord.x > -2 {
            assert_eq!(scene.attached_revision(coord, MeshKind::Opaque), Some(revision));
        }
    }
    assert!(report.refreshed.is_empty());

    // Detached chunks stay resident.
    assert!(world.store().len() > created);
    assert!(world.chunk(ChunkCoord::new(-2, 0)).unwrap().has_meshes());
}

#[test]
fn walking_back_reattaches_without_regenerating() {
    let mut world = world(GenerationMethod::Terrain);
    let mut scene = SceneTarget::new();
    world.update_around(ChunkCoord::new(0, 0), &mut scene);
    let revision = world.chunk(ChunkCoord::new(-2, 1)).unwrap().mesh_revision();

    world.update_around(ChunkCoord::new(1, 0), &mut scene);
    let report = world.update_around(ChunkCoord::new(0, 0), &mut scene);

    assert!(report.attached.contains(&ChunkCoord::new(-2, 1)));
    assert!(!report.prepared.contains(&ChunkCoord::new(-2, 1)));
    assert_eq!(world.chunk(ChunkCoord::new(-2, 1)).unwrap().mesh_revision(), revision);
}

#[test]
fn detaching_twice_is_harmless() {
    let mut world = world(GenerationMethod::Flat { height: 6 });
    let mut scene = SceneTarget::new();
    world.update_around(ChunkCoord::new(0, 0), &mut scene);

    let far = ChunkCoord::new(50, 50);
    let first = world.update_around(far, &mut scene);
    assert_eq!(first.detached.len(), 25);

    for kind in MeshKind::ALL {
        scene.detach(ChunkCoord::new(0, 0), kind);
    }
    let second = world.update_around(far, &mut scene);
    assert!(second.detached.is_empty());
    assert_eq!(attached(&scene), square(far, 2));
}

#[test]
fn presentation_never_changes_meshes() {
    let mut world = world(GenerationMethod::Terrain);
    let mut scene = SceneTarget::new();
    world.update_around(ChunkCoord::new(0, 0), &mut scene);

    let before: Vec<_> = world
        .store()
        .coords()
        .map(|coord| (coord, world.chunk(coord).unwrap().meshes().cloned()))
        .collect();
    let attaches = scene.attach_count();

    world.set_presentation_mode(PresentationMode::Debug);
    let report = world.update_around(ChunkCoord::new(0, 0), &mut scene);

    assert!(report.is_empty());
    assert_eq!(scene.attach_count(), attaches);
    assert!(!scene.presentation().unwrap().fog);
    for (coord, meshes) in before {
        assert_eq!(world.chunk(coord).unwrap().meshes().cloned(), meshes);
    }
}

#[test]
fn radius_zero_streams_a_single_chunk() {
    let mut world = World::new(&WorldConfig {
        seed: Some(1),
        render_distance: 0,
        ..WorldConfig::default()
    });
    let mut scene = SceneTarget::new();

    world.update_around(ChunkCoord::new(-7, 3), &mut scene);
    assert_eq!(scene.attached_chunks(), vec![ChunkCoord::new(-7, 3)]);
}
