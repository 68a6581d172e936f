use dht_core::{UseCaseValidatable, utils::generate_short_id};
use tracing::{info, warn};

use crate::{
    core::domain::models::{
        AppError,
        usecases::{DeleteKeyUseCaseInput, GetKeyUseCaseInput, PutKeyUseCaseInput},
    },
    infrastructure::{config::BenchConfig, di::PeerModule},
};

/// Average latency per phase, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BenchReport {
    pub put_avg_ms: f64,
    pub get_avg_ms: f64,
    pub delete_avg_ms: f64,
    pub failures: usize,
}

/// Latency accumulated over the successful operations of one phase.
#[derive(Debug, Clone, Copy, Default)]
struct Phase {
    total_ms: u64,
    succeeded: usize,
    failed: usize,
}

impl Phase {
    fn record(&mut self, latency: Result<u64, AppError>, name: &str) {
        match latency {
            Ok(ms) => {
                self.total_ms += ms;
                self.succeeded += 1;
            }
            Err(e) => {
                warn!(role = "client", "bench {name} failed: {e}");
                self.failed += 1;
            }
        }
    }

    /// Failed operations are left out; a phase with no success averages 0.
    fn average_ms(&self) -> f64 {
        if self.succeeded == 0 {
            return 0.0;
        }
        self.total_ms as f64 / self.succeeded as f64
    }
}

/// Runs `iterations` PUTs, then as many GETs, then as many DELETEs over the
/// keys `key0..key<range>`.
pub async fn run_bench(module: &PeerModule, cfg: BenchConfig) -> Result<BenchReport, AppError> {
    let mut put = Phase::default();
    for i in 0..cfg.iterations {
        let input = PutKeyUseCaseInput {
            key: bench_key(i, cfg.key_range),
            value: generate_short_id(12),
        };
        let latency = module.put_key_use_case.validate_and_execute(input).await;
        put.record(latency.map(|out| out.latency_ms), "PUT");
    }

    let mut get = Phase::default();
    for i in 0..cfg.iterations {
        let input = GetKeyUseCaseInput {
            key: bench_key(i, cfg.key_range),
        };
        let latency = module.get_key_use_case.validate_and_execute(input).await;
        get.record(latency.map(|out| out.latency_ms), "GET");
    }

    let mut delete = Phase::default();
    for i in 0..cfg.iterations {
        let input = DeleteKeyUseCaseInput {
            key: bench_key(i, cfg.key_range),
        };
        let latency = module.delete_key_use_case.validate_and_execute(input).await;
        delete.record(latency.map(|out| out.latency_ms), "DELETE");
    }

    let report = BenchReport {
        put_avg_ms: put.average_ms(),
        get_avg_ms: get.average_ms(),
        delete_avg_ms: delete.average_ms(),
        failures: put.failed + get.failed + delete.failed,
    };

    info!(
        role = "client",
        put_ms = report.put_avg_ms,
        get_ms = report.get_avg_ms,
        delete_ms = report.delete_avg_ms,
        failures = report.failures,
        "benchmark finished"
    );

    println!("PUT average latency: {:.3} ms", report.put_avg_ms);
    println!("GET average latency: {:.3} ms", report.get_avg_ms);
    println!("DELETE average latency: {:.3} ms", report.delete_avg_ms);

    Ok(report)
}

#[inline]
fn bench_key(i: usize, range: usize) -> String {
    format!("key{}", i % range.max(1))
}
