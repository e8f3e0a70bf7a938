//! Monitor — background CPU and memory sampling.
//!
//! The sampler thread publishes into a `SharedStats` cell; the frame loop
//! only ever reads the latest value, without locking. A reading can be one
//! sampling interval old.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Percentages, 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonitorSnapshot {
    pub cpu: f64,
    pub mem: f64,
}

/// Source of the most recent snapshot.
pub trait StatsProvider {
    fn latest(&self) -> MonitorSnapshot;
}

impl StatsProvider for MonitorSnapshot {
    fn latest(&self) -> MonitorSnapshot {
        *self
    }
}

/// Latest-value cell shared between the sampler and the frame loop.
#[derive(Debug, Clone, Default)]
pub struct SharedStats {
    cpu: Arc<AtomicU64>,
    mem: Arc<AtomicU64>,
}

impl SharedStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: MonitorSnapshot) {
        self.cpu.store(snapshot.cpu.to_bits(), Ordering::Relaxed);
        self.mem.store(snapshot.mem.to_bits(), Ordering::Relaxed);
    }

    /// True once no other handle is left to read from this cell.
    fn is_orphaned(&self) -> bool {
        Arc::strong_count(&self.cpu) == 1
    }
}

impl StatsProvider for SharedStats {
    fn latest(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            cpu: f64::from_bits(self.cpu.load(Ordering::Relaxed)),
            mem: f64::from_bits(self.mem.load(Ordering::Relaxed)),
        }
    }
}

pub struct Monitor;

impl Monitor {
    /// Start the sampler thread. It stops once every returned handle has
    /// been dropped.
    pub fn spawn(interval: Duration) -> std::io::Result<SharedStats> {
        let stats = SharedStats::new();
        let sink = stats.clone();

        thread::Builder::new()
            .name("pet-monitor".into())
            .spawn(move || {
                let mut sys = System::new_with_specifics(
                    RefreshKind::nothing()
                        .with_cpu(CpuRefreshKind::everything())
                        .with_memory(MemoryRefreshKind::everything()),
                );
                info!("monitor sampling every {interval:?}");
                loop {
                    let snapshot = sample(&mut sys);
                    debug!("cpu {:.1}% mem {:.1}%", snapshot.cpu, snapshot.mem);
                    sink.publish(snapshot);
                    if sink.is_orphaned() {
                        debug!("monitor stopping, no readers left");
                        break;
                    }
                    thread::sleep(interval);
                }
            })?;

        Ok(stats)
    }
}

fn sample(sys: &mut System) -> MonitorSnapshot {
    sys.refresh_cpu_all();
    sys.refresh_memory();

    let cpu = f64::from(sys.global_cpu_usage());
    let total = sys.total_memory();
    let mem = if total > 0 {
        sys.used_memory() as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    MonitorSnapshot {
        cpu: round_tenth(cpu),
        mem: round_tenth(mem),
    }
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
