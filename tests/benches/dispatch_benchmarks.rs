//! # Facility Response Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Request validation | < 1µs |
//! | Zone mask iteration (32 zones) | < 1µs |
//! | Single-step dispatch, no controller delay | < 100µs |
//! | Panic-button trigger | < 10ms |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use response_executor::adapters::RecordingControllers;
use response_executor::{
    validate, ExecutorConfig, ResponseExecutor, ResponseExecutorApi, ResponseRequest,
    ResponseType, SubsystemControllers, ZoneMask,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

fn ready_executor(rt: &tokio::runtime::Runtime) -> (ResponseExecutor, Arc<RecordingControllers>) {
    let controllers = Arc::new(RecordingControllers::new());
    let executor = ResponseExecutor::new(
        ExecutorConfig::for_testing(),
        SubsystemControllers::from_shared(controllers.clone()),
    );
    rt.block_on(executor.init()).unwrap();
    (executor, controllers)
}

// ============================================================================
// Domain
// ============================================================================

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("validation");
    let mut rng = rand::thread_rng();

    let requests: Vec<_> = (0..1_000)
        .map(|_| {
            ResponseRequest::new(
                ResponseType::ALL[rng.gen_range(0..ResponseType::ALL.len())],
                rng.gen_range(0..=12),
                ZoneMask::new(rng.gen()),
                "benchmark",
            )
        })
        .collect();

    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("validate_1000_random", |b| {
        b.iter(|| {
            requests
                .iter()
                .filter(|r| validate(black_box(r)).is_ok())
                .count()
        })
    });
    group.finish();
}

fn bench_zone_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("zones");
    for bits in [0x1u32, 0x0F0F_0F0F, u32::MAX] {
        let mask = ZoneMask::new(bits);
        group.bench_with_input(BenchmarkId::new("iterate", mask.count()), &mask, |b, mask| {
            b.iter(|| black_box(*mask).iter().map(u32::from).sum::<u32>())
        });
    }
    group.finish();
}

// ============================================================================
// Executor
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let rt = runtime();
    let (executor, controllers) = ready_executor(&rt);
    let mut group = c.benchmark_group("dispatch");

    for response_type in [
        ResponseType::BackupActivate,
        ResponseType::Lockdown,
        ResponseType::Evacuation,
    ] {
        group.bench_with_input(
            BenchmarkId::new("sequence", response_type),
            &response_type,
            |b, response_type| {
                b.iter(|| {
                    let request =
                        ResponseRequest::new(*response_type, 5, ZoneMask::ALL, "benchmark");
                    rt.block_on(executor.dispatch(request)).unwrap();
                    controllers.clear_calls();
                })
            },
        );
    }
    group.finish();
}

fn bench_trigger(c: &mut Criterion) {
    let rt = runtime();
    let (executor, _controllers) = ready_executor(&rt);

    // Only the trigger is timed; each scheduled lockdown drains before the next
    c.bench_function("trigger_emergency", |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::ZERO;
            for _ in 0..iters {
                let started = Instant::now();
                let response_id = executor.trigger_emergency(black_box(10)).unwrap();
                total += started.elapsed();

                rt.block_on(async {
                    while executor.last_report().response_id != response_id {
                        tokio::task::yield_now().await;
                    }
                });
            }
            total
        })
    });
}

criterion_group!(
    benches,
    bench_validation,
    bench_zone_iteration,
    bench_dispatch,
    bench_trigger
);
criterion_main!(benches);
