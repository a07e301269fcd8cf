//! Mock infrastructure telemetry for demo runs.
//!
//! Every run samples a different subset of realistic error lines.

use rand::Rng;
use rand::seq::index;

/// Realistic production error lines.
pub const MOCK_ERROR_POOL: [&str; 12] = [
    "500 Internal Server Error: Database connection timeout after 30 000 ms on host db-primary-01",
    "503 Service Unavailable: Upstream gateway 'api-gateway-west' returned no healthy backends",
    "500 Internal Server Error: OOM killed — container 'payments-svc' exceeded 2 Gi memory limit",
    "502 Bad Gateway: TLS handshake failure between ingress-nginx and svc-auth (certificate expired)",
    "500 Internal Server Error: Deadlock detected on table 'orders' — transaction rolled back",
    "504 Gateway Timeout: Request to inventory-service exceeded 60 s SLA",
    "500 Internal Server Error: Redis connection refused on redis-cluster-node-3:6379",
    "503 Service Unavailable: Circuit breaker OPEN for downstream 'recommendation-engine'",
    "500 Internal Server Error: Kafka consumer lag exceeded 100 000 messages on topic 'events.clicks'",
    "502 Bad Gateway: DNS resolution failed for 'internal-ml-scoring.corp.net'",
    "500 Internal Server Error: Disk I/O latency spike — p99 > 500 ms on vol-data-0012",
    "503 Service Unavailable: Pod CrashLoopBackOff — 'checkout-worker' restarted 8 times in 10 min",
];

const TIMESTAMP_BASE: &str = "2026-02-14T13:";

/// `count` distinct error lines (capped at the pool size), newline-separated.
pub fn generate_mock_telemetry(count: usize) -> String {
    generate_mock_telemetry_with(&mut rand::rng(), count)
}

/// Like [`generate_mock_telemetry`] with a caller-supplied RNG.
pub fn generate_mock_telemetry_with<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    let amount = count.min(MOCK_ERROR_POOL.len());
    index::sample(rng, MOCK_ERROR_POOL.len(), amount)
        .into_iter()
        .enumerate()
        .map(|(idx, pick)| {
            format!(
                "[{}{:02}:00Z]  ALERT  ▸  {}",
                TIMESTAMP_BASE,
                30 + idx,
                MOCK_ERROR_POOL[pick]
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
