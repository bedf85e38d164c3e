use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::audit::emitter::mock::RecordingAuditEmitter;
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::repo::InMemoryCredentialStore;
use service::auth::AuthService;

fn bench_authenticate(c: &mut Criterion) {
    let svc = AuthService::new(Arc::new(InMemoryCredentialStore::new()), Arc::new(RecordingAuditEmitter::default()));

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        email: "bench@example.com".into(),
        password: "Benchmark1".into(),
        first_name: "Bench".into(),
        last_name: String::new(),
        active: true,
    }));

    c.bench_function("auth_authenticate_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.authenticate(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });
}

criterion_group!(benches, bench_authenticate);
criterion_main!(benches);
