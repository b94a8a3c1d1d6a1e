//! Policy Cache demo runner
//!
//! Builds a cache from environment configuration, drives a concurrent
//! read/write workload against it and prints the resulting statistics.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use policy_cache::{spawn_sweeper, Cache, Config};

const WORKERS: u64 = 8;
const OPS_PER_WORKER: u64 = 50_000;
/// Larger than the default capacity so evictions happen
const KEY_SPACE: u64 = 4_096;
const SHORT_TTL: Duration = Duration::from_millis(5);

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache with the configured policy
/// 4. Start background TTL sweeper
/// 5. Run the workload until done or Ctrl+C
/// 6. Print statistics as JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Policy Cache workload");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: capacity={}, policy={}, default_ttl={:?}, sweep_interval={:?}",
        config.capacity, config.policy, config.default_ttl, config.sweep_interval
    );

    let cache: Arc<Cache<String, u64>> =
        Arc::new(Cache::from_config(&config).context("failed to build cache")?);

    let sweeper = config
        .sweep_interval
        .map(|interval| spawn_sweeper(cache.clone(), interval));

    let started = Instant::now();
    tokio::select! {
        result = run_workload(cache.clone()) => {
            result?;
            info!("Workload finished in {:?}", started.elapsed());
        }
        _ = signal::ctrl_c() => {
            warn!("Received Ctrl+C, stopping workload early");
        }
    }

    if let Some(handle) = sweeper {
        handle.abort();
        info!("Sweeper stopped");
    }

    cache
        .check_invariants()
        .context("cache invariants violated after workload")?;

    let stats = cache.stats();
    info!(
        "Hit ratio {:.3} over {} lookups",
        stats.hit_ratio(),
        stats.lookups()
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Runs `WORKERS` blocking workers against the shared cache.
async fn run_workload(cache: Arc<Cache<String, u64>>) -> anyhow::Result<()> {
    let workers: Vec<JoinHandle<policy_cache::Result<()>>> = (0..WORKERS)
        .map(|worker| {
            let cache = cache.clone();
            tokio::task::spawn_blocking(move || {
                for i in 0..OPS_PER_WORKER {
                    let key = format!("key-{}", (worker * 7_919 + i * 31) % KEY_SPACE);
                    match i % 8 {
                        0 => cache.put(key, i, Some(SHORT_TTL))?,
                        1 | 2 => cache.insert(key, i)?,
                        3 => {
                            cache.remove(&key);
                        }
                        _ => {
                            cache.get(&key);
                        }
                    }
                }
                Ok(())
            })
        })
        .collect();

    for worker in workers {
        worker.await.context("worker panicked")??;
    }
    Ok(())
}
