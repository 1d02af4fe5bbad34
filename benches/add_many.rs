//! Allocating IDs and inserting requirements into a large tree, then saving
//! it.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use reqd::{Project, Store};
use tempfile::TempDir;

/// A project with `width` top-level requirements, each with a chain of
/// `depth` descendants.
fn preseed_project(width: usize, depth: usize) -> Project {
    let mut project = Project::new("Benchmark", "BENCH");
    for _ in 0..width {
        let mut parent = project.add_requirement("top", None).unwrap().id().to_string();
        for _ in 0..depth {
            parent = project
                .add_requirement("nested", Some(&parent))
                .unwrap()
                .id()
                .to_string();
        }
    }
    project
}

fn add_requirements(c: &mut Criterion) {
    c.bench_function("add under deepest leaf", |b| {
        b.iter_batched(
            || preseed_project(100, 10),
            |mut project| {
                let deepest = format!("100{}", ".1".repeat(10));
                for _ in 0..100 {
                    project.add_requirement("leaf", Some(&deepest)).unwrap();
                }
                project
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("add at top level", |b| {
        b.iter_batched(
            || preseed_project(100, 10),
            |mut project| {
                for _ in 0..100 {
                    project.add_requirement("top", None).unwrap();
                }
                project
            },
            BatchSize::SmallInput,
        );
    });
}

fn save_and_load(c: &mut Criterion) {
    let project = preseed_project(100, 10);
    let tmp_dir = TempDir::new().unwrap();
    let store = Store::in_dir(tmp_dir.path());

    c.bench_function("save and load", |b| {
        b.iter(|| {
            store.save(&project).unwrap();
            store.load().unwrap()
        });
    });
}

criterion_group!(benches, add_requirements, save_and_load);
criterion_main!(benches);
