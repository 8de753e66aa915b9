//! Kd-tree benchmarks
//!
//! Run with: cargo bench

use cgmath::Point3;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use recursive_portals::geometry::{triangle_ray_intersection, Ray, Triangle};
use recursive_portals::spatial::brute_force_ray_trace;
use recursive_portals::{build_kd_tree, TriangleMesh};

fn random_point(rng: &mut StdRng, extent: f32) -> Point3<f32> {
    Point3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

fn random_triangles(rng: &mut StdRng, count: usize) -> Vec<Triangle> {
    (0..count)
        .map(|_| {
            let a = random_point(rng, 50.0);
            let b = a + (random_point(rng, 1.0) - Point3::new(0.0, 0.0, 0.0));
            let c = a + (random_point(rng, 1.0) - Point3::new(0.0, 0.0, 0.0));
            Triangle::new(a, b, c)
        })
        .collect()
}

fn random_rays(rng: &mut StdRng, count: usize) -> Vec<Ray> {
    (0..count)
        .map(|_| Ray::from_start_and_end(random_point(rng, 60.0), random_point(rng, 60.0)))
        .collect()
}

fn kd_tree_build_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("kd_tree_build");
    let mut rng = StdRng::seed_from_u64(42);

    for count in [1_000, 10_000, 50_000] {
        let triangles = random_triangles(&mut rng, count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &triangles, |b, triangles| {
            b.iter(|| build_kd_tree(black_box(triangles), None))
        });
    }
    group.finish();
}

fn ray_trace_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ray_trace");
    let mut rng = StdRng::seed_from_u64(7);
    let triangles = random_triangles(&mut rng, 10_000);
    let rays = random_rays(&mut rng, 256);
    let mesh = TriangleMesh::from_triangles(triangles.clone());

    group.bench_function("kd_tree", |b| {
        b.iter(|| {
            for ray in &rays {
                black_box(mesh.ray_trace(ray));
            }
        })
    });

    group.bench_function("kd_tree_batch", |b| b.iter(|| black_box(mesh.ray_trace_batch(&rays))));

    group.bench_function("brute_force", |b| {
        b.iter(|| {
            for ray in &rays {
                black_box(brute_force_ray_trace(ray, &triangles, ray.distance, 0.0, |ray: &Ray, triangle: &Triangle| {
                    triangle_ray_intersection(triangle, ray.origin, ray.direction)
                }));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, kd_tree_build_benchmark, ray_trace_benchmark);
criterion_main!(benches);
