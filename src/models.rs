// Domain models for sampling and alerting

use chrono::{DateTime, Utc};

/// The four monitored resources. Fixed set, not an extensible metrics registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Cpu,
    Memory,
    RootStorage,
    DataStorage,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Cpu,
        ResourceKind::Memory,
        ResourceKind::RootStorage,
        ResourceKind::DataStorage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Cpu => "CPU",
            ResourceKind::Memory => "Memory",
            ResourceKind::RootStorage => "Root Storage",
            ResourceKind::DataStorage => "Data Storage",
        }
    }

    /// Embed color: red for CPU, orange for memory, yellow for storage.
    pub fn color(self) -> u32 {
        match self {
            ResourceKind::Cpu => 0xFF0000,
            ResourceKind::Memory => 0xFFA500,
            ResourceKind::RootStorage | ResourceKind::DataStorage => 0xFFFF00,
        }
    }
}

/// How a sample's capacity numbers are denominated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Cores,
    Bytes,
}

/// One instantaneous reading for one resource. Immutable once produced.
#[derive(Debug, Clone)]
pub struct ResourceSample {
    pub kind: ResourceKind,
    pub usage_percent: f64,
    pub total: u64,
    /// Zero for CPU; core usage is already expressed by usage_percent.
    pub used: u64,
    pub unit: Unit,
    pub sampled_at: DateTime<Utc>,
}

impl ResourceSample {
    /// "Used" display value: "75.0% of 4 cores" or "85.5% (1.50 GB used)".
    pub fn used_display(&self) -> String {
        match self.unit {
            Unit::Cores => format!("{:.1}% of {} cores", self.usage_percent, self.total),
            Unit::Bytes => format!(
                "{:.1}% ({:.2} GB used)",
                self.usage_percent,
                bytes_to_gb(self.used)
            ),
        }
    }

    /// "Total" display value: "4 cores" or "16.00 GB".
    pub fn total_display(&self) -> String {
        match self.unit {
            Unit::Cores => format!("{} cores", self.total),
            Unit::Bytes => format!("{:.2} GB", bytes_to_gb(self.total)),
        }
    }
}

/// One tick's worth of samples. `data` is None when the data mount is
/// unreadable; that never fails the other three kinds.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub cpu: ResourceSample,
    pub memory: ResourceSample,
    pub root: ResourceSample,
    pub data: Option<ResourceSample>,
}

impl MetricsReport {
    /// Samples in fixed evaluation order; three when the data mount is absent.
    pub fn samples(&self) -> Vec<&ResourceSample> {
        let mut out = vec![&self.cpu, &self.memory, &self.root];
        if let Some(data) = &self.data {
            out.push(data);
        }
        out
    }
}

/// Transient value handed from the evaluator to the dispatcher on an
/// upward threshold crossing. Not persisted.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub sample: ResourceSample,
    pub threshold: f64,
}

impl AlertEvent {
    pub fn kind(&self) -> ResourceKind {
        self.sample.kind
    }
}

/// Bytes to binary gigabytes (1024^3), rounded to 2 decimal places.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    (bytes as f64 / (1024u64.pow(3)) as f64 * 100.0).round() / 100.0
}

/// Percent of `used` over `total`, zero when total is zero.
pub fn usage_percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        (used as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
