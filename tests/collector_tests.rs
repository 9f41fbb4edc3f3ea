// Collector tests against the real host via sysinfo.

use server_monitor::collector::MetricsCollector;
use server_monitor::models::{ResourceKind, Unit};
use std::time::Duration;

#[tokio::test]
async fn test_sample_reads_mandatory_kinds() {
    let collector = MetricsCollector::new("/", Duration::from_millis(100));
    let report = collector.sample().await.expect("sample");

    assert_eq!(report.cpu.kind, ResourceKind::Cpu);
    assert_eq!(report.cpu.unit, Unit::Cores);
    assert!((0.0..=100.0).contains(&report.cpu.usage_percent));
    assert!(report.cpu.total > 0, "at least one logical core");

    assert_eq!(report.memory.kind, ResourceKind::Memory);
    assert_eq!(report.memory.unit, Unit::Bytes);
    assert!(report.memory.total > 0);
    assert!(report.memory.used <= report.memory.total);
    assert!((0.0..=100.0).contains(&report.memory.usage_percent));

    assert_eq!(report.root.kind, ResourceKind::RootStorage);
    assert!(report.root.total > 0);
    assert!((0.0..=100.0).contains(&report.root.usage_percent));
}

#[tokio::test]
async fn test_sample_with_root_as_data_mount() {
    // "/" always exists, so the data sample mirrors the root filesystem.
    let collector = MetricsCollector::new("/", Duration::from_millis(100));
    let report = collector.sample().await.expect("sample");
    let data = report.data.expect("data mount '/' should be readable");
    assert_eq!(data.kind, ResourceKind::DataStorage);
    assert_eq!(data.total, report.root.total);
}

#[tokio::test]
async fn test_sample_with_missing_data_mount_degrades() {
    let collector = MetricsCollector::new("/definitely/not/mounted", Duration::from_millis(100));
    let report = collector.sample().await.expect("sample");
    // Other kinds are unaffected by the unreadable data mount.
    assert!(report.data.is_none());
    assert!(report.memory.total > 0);
    assert_eq!(report.samples().len(), 3);
}
