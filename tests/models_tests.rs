// Model tests: unit conversion, display strings, report iteration

use chrono::Utc;
use server_monitor::models::*;

fn bytes_sample(kind: ResourceKind, usage_percent: f64, total: u64, used: u64) -> ResourceSample {
    ResourceSample {
        kind,
        usage_percent,
        total,
        used,
        unit: Unit::Bytes,
        sampled_at: Utc::now(),
    }
}

#[test]
fn test_bytes_to_gb_binary_units() {
    assert_eq!(bytes_to_gb(1073741824), 1.00);
    assert_eq!(bytes_to_gb(1610612736), 1.50);
    assert_eq!(bytes_to_gb(0), 0.0);
    // Rounded to 2 decimals, not truncated.
    assert_eq!(bytes_to_gb(16 * 1024 * 1024 * 1024), 16.00);
    assert_eq!(bytes_to_gb(1073741824 + 5368709), 1.01);
}

#[test]
fn test_usage_percent_zero_total() {
    assert_eq!(usage_percent(10, 0), 0.0);
    assert_eq!(usage_percent(1, 2), 50.0);
}

#[test]
fn test_core_sample_displays() {
    let sample = ResourceSample {
        kind: ResourceKind::Cpu,
        usage_percent: 75.0,
        total: 4,
        used: 0,
        unit: Unit::Cores,
        sampled_at: Utc::now(),
    };
    assert_eq!(sample.total_display(), "4 cores");
    assert_eq!(sample.used_display(), "75.0% of 4 cores");
}

#[test]
fn test_bytes_sample_displays() {
    let sample = bytes_sample(
        ResourceKind::Memory,
        85.5,
        8 * 1024 * 1024 * 1024,
        1610612736,
    );
    assert_eq!(sample.total_display(), "8.00 GB");
    assert_eq!(sample.used_display(), "85.5% (1.50 GB used)");
}

#[test]
fn test_resource_kind_labels_and_colors() {
    assert_eq!(ResourceKind::Cpu.label(), "CPU");
    assert_eq!(ResourceKind::Memory.label(), "Memory");
    assert_eq!(ResourceKind::RootStorage.label(), "Root Storage");
    assert_eq!(ResourceKind::DataStorage.label(), "Data Storage");

    assert_eq!(ResourceKind::Cpu.color(), 0xFF0000);
    assert_eq!(ResourceKind::Memory.color(), 0xFFA500);
    assert_eq!(ResourceKind::RootStorage.color(), 0xFFFF00);
    assert_eq!(ResourceKind::DataStorage.color(), 0xFFFF00);
    assert_eq!(ResourceKind::ALL.len(), 4);
}

#[test]
fn test_report_samples_order_and_optional_data() {
    let cpu = ResourceSample {
        kind: ResourceKind::Cpu,
        usage_percent: 10.0,
        total: 4,
        used: 0,
        unit: Unit::Cores,
        sampled_at: Utc::now(),
    };
    let memory = bytes_sample(ResourceKind::Memory, 20.0, 100, 20);
    let root = bytes_sample(ResourceKind::RootStorage, 30.0, 100, 30);
    let data = bytes_sample(ResourceKind::DataStorage, 40.0, 100, 40);

    let full = MetricsReport {
        cpu: cpu.clone(),
        memory: memory.clone(),
        root: root.clone(),
        data: Some(data),
    };
    let kinds: Vec<_> = full.samples().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ResourceKind::Cpu,
            ResourceKind::Memory,
            ResourceKind::RootStorage,
            ResourceKind::DataStorage
        ]
    );

    let partial = MetricsReport {
        cpu,
        memory,
        root,
        data: None,
    };
    assert_eq!(partial.samples().len(), 3);
}
