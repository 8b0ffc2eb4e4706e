//! Benchmark multi-level intersection queries.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vastu_grid::{
    AlignedBox3, GridAccess, GridIndex, GridSize, HeightPatch, MultiLevelGridMap, Point3,
    Resolution,
};

/// Terrain with a floor everywhere and a second level over every third column.
fn terrain(size: usize) -> MultiLevelGridMap<HeightPatch> {
    let mut map = MultiLevelGridMap::new(GridSize::new(size, size), Resolution::uniform(0.05));
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let index = GridIndex::new(x, y);
            let floor = 0.01 * ((x + y) % 7) as f64;
            map.insert_patch(index, HeightPatch::new(floor - 0.02, floor))
                .unwrap();
            if x % 3 == 0 {
                map.insert_patch(index, HeightPatch::new(1.8, 2.0)).unwrap();
            }
        }
    }
    map
}

fn footprint(half_extent: f64) -> AlignedBox3 {
    AlignedBox3::new(
        Point3::new(5.0 - half_extent, 5.0 - half_extent, -0.1),
        Point3::new(5.0 + half_extent, 5.0 + half_extent, 0.5),
    )
}

fn bench_intersect_aabb(c: &mut Criterion) {
    let map = terrain(200);
    let mut group = c.benchmark_group("intersect_aabb");

    for half_extent in [0.2, 0.5, 1.0].iter() {
        let bx = footprint(*half_extent);
        group.bench_with_input(
            BenchmarkId::from_parameter(half_extent),
            half_extent,
            |b, _| {
                b.iter(|| {
                    let hits = map.intersect_aabb(black_box(&bx));
                    black_box(hits.len())
                })
            },
        );
    }

    group.finish();
}

fn bench_intersect_aabb_first_hit(c: &mut Criterion) {
    let map = terrain(200);
    let bx = footprint(1.0);

    c.bench_function("intersect_aabb_first_hit", |b| {
        b.iter(|| black_box(map.intersect_aabb_with(black_box(&bx), |_, _| true)))
    });
}

fn bench_intersect_cuboid(c: &mut Criterion) {
    let map = terrain(200);
    let mut group = c.benchmark_group("intersect_cuboid");

    for half_extent in [0.2, 0.5, 1.0].iter() {
        let bx = footprint(*half_extent);
        group.bench_with_input(
            BenchmarkId::from_parameter(half_extent),
            half_extent,
            |b, _| {
                b.iter(|| {
                    let (view, count) = map.intersect_cuboid_counted(black_box(&bx));
                    black_box((view.num_cells(), count))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_intersect_aabb,
    bench_intersect_aabb_first_hit,
    bench_intersect_cuboid
);
criterion_main!(benches);
