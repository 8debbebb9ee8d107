use badref::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn object(
    uid: String,
    api_version: &str,
    kind: &str,
    name: String,
    owners: Vec<OwnerRef>,
) -> ObjectDescriptor {
    ObjectDescriptor {
        api_version: api_version.to_string(),
        kind: kind.to_string(),
        name,
        namespace: "bench".to_string(),
        uid: Uid::from(uid),
        is_namespaced: true,
        owner_references: owners,
    }
}

/// Deployment -> ReplicaSet -> 4 Pods, repeated `apps` times.
fn synthetic_catalog(apps: usize) -> ObjectCatalog {
    let mut objects = Vec::with_capacity(apps * 6);
    for i in 0..apps {
        let deploy = format!("deploy-{i}");
        let rs = format!("rs-{i}");
        objects.push(object(
            deploy.clone(),
            "apps/v1",
            "Deployment",
            format!("app-{i}"),
            Vec::new(),
        ));
        objects.push(object(
            rs.clone(),
            "apps/v1",
            "ReplicaSet",
            format!("app-{i}-5d8f"),
            vec![OwnerRef::new(deploy, "apps/v1", "Deployment", format!("app-{i}")).controller()],
        ));
        for p in 0..4 {
            objects.push(object(
                format!("pod-{i}-{p}"),
                "v1",
                "Pod",
                format!("app-{i}-5d8f-{p}"),
                vec![
                    OwnerRef::new(rs.clone(), "apps/v1", "ReplicaSet", format!("app-{i}-5d8f"))
                        .controller(),
                ],
            ));
        }
    }
    objects.into_iter().collect()
}

fn bench_validate(c: &mut Criterion) {
    let catalog = synthetic_catalog(2_000);
    let validator = OwnerReferenceValidator::default();

    c.bench_function("validate.12k_objects", |b| {
        b.iter(|| validator.validate(black_box(&catalog)));
    });
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
