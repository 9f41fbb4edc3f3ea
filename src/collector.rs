// Host metrics via sysinfo (psutil equivalent)

use crate::models::{MetricsReport, ResourceKind, ResourceSample, Unit, usage_percent};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Disks, System};

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("sysinfo lock poisoned: {0}")]
    LockPoisoned(String),
    #[error("mount point {0} not readable")]
    MountUnreadable(String),
    #[error("sysinfo task join: {0}")]
    TaskJoin(String),
}

pub struct MetricsCollector {
    sys: Arc<std::sync::Mutex<System>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    data_mount: PathBuf,
    cpu_window: Duration,
}

impl MetricsCollector {
    pub fn new(data_mount: impl Into<PathBuf>, cpu_window: Duration) -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let disks = Disks::new_with_refreshed_list();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            disks: Arc::new(std::sync::Mutex::new(disks)),
            data_mount: data_mount.into(),
            cpu_window,
        }
    }

    /// Produces one sample per resource kind. Blocks (off the runtime) for the
    /// CPU measurement window. An unreadable data mount yields `data: None`
    /// with a warning; an unreadable root filesystem fails the whole call.
    pub async fn sample(&self) -> Result<MetricsReport, CollectionError> {
        let sys = self.sys.clone();
        let disks = self.disks.clone();
        let data_mount = self.data_mount.clone();
        let cpu_window = self.cpu_window;
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| CollectionError::LockPoisoned(e.to_string()))?;

            sys.refresh_cpu_all();
            std::thread::sleep(cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
            sys.refresh_cpu_all();
            sys.refresh_memory();

            let sampled_at = Utc::now();

            let logical_cores = sys.cpus().len() as u64;
            let cpu = ResourceSample {
                kind: ResourceKind::Cpu,
                usage_percent: (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
                total: logical_cores,
                used: 0,
                unit: Unit::Cores,
                sampled_at,
            };

            let mem_total = sys.total_memory();
            let mem_used = mem_total.saturating_sub(sys.available_memory());
            let memory = ResourceSample {
                kind: ResourceKind::Memory,
                usage_percent: usage_percent(mem_used, mem_total),
                total: mem_total,
                used: mem_used,
                unit: Unit::Bytes,
                sampled_at,
            };

            let mut disks_guard = disks
                .lock()
                .map_err(|e| CollectionError::LockPoisoned(e.to_string()))?;
            disks_guard.refresh(false);

            let root = disk_sample(&disks_guard, Path::new("/"), ResourceKind::RootStorage)
                .ok_or_else(|| CollectionError::MountUnreadable("/".into()))?;

            let data = disk_sample(&disks_guard, &data_mount, ResourceKind::DataStorage);
            if data.is_none() {
                tracing::warn!(
                    mount = %data_mount.display(),
                    "could not read data mount; skipping data storage sample"
                );
            }

            Ok(MetricsReport {
                cpu,
                memory,
                root,
                data,
            })
        })
        .await
        .map_err(|e| CollectionError::TaskJoin(e.to_string()))?
    }
}

fn disk_sample(disks: &Disks, mount: &Path, kind: ResourceKind) -> Option<ResourceSample> {
    let disk = disks.list().iter().find(|d| d.mount_point() == mount)?;
    let total = disk.total_space();
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(disk.available_space());
    Some(ResourceSample {
        kind,
        usage_percent: usage_percent(used, total),
        total,
        used,
        unit: Unit::Bytes,
        sampled_at: Utc::now(),
    })
}
