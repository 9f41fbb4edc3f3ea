// Background monitor loop: sample, evaluate thresholds, dispatch alerts,
// log one summary line, wait for the next tick. Alert latches live here
// for the process lifetime; a failed tick never terminates the loop.

use crate::collector::MetricsCollector;
use crate::config::ThresholdsConfig;
use crate::evaluator::ThresholdEvaluator;
use crate::models::{MetricsReport, ResourceKind, ResourceSample};
use crate::notifier::NotificationDispatcher;
use std::sync::Arc;
use tokio::time::{Duration, interval};

/// Collaborators and shutdown for the loop.
pub struct MonitorDeps {
    pub collector: Arc<MetricsCollector>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct MonitorConfig {
    pub check_interval: Duration,
    pub thresholds: ThresholdsConfig,
    pub data_mount_point: String,
}

pub fn spawn(deps: MonitorDeps, config: MonitorConfig) -> tokio::task::JoinHandle<()> {
    let MonitorDeps {
        collector,
        dispatcher,
        mut shutdown_rx,
    } = deps;

    tokio::spawn(async move {
        let mut evaluator = ThresholdEvaluator::new();
        let mut tick = interval(config.check_interval);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = run_tick(&collector, &dispatcher, &mut evaluator, &config).await {
                        // Scoped to this tick; the loop stays alive.
                        tracing::error!(error = %e, "tick failed");
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Monitor shutting down");
                    break;
                }
            }
        }
    })
}

/// One full sample-evaluate-notify-log cycle. Dispatch failures are logged
/// per event and never fail the tick; only collection of the mandatory
/// kinds (CPU, memory, root) can.
pub async fn run_tick(
    collector: &MetricsCollector,
    dispatcher: &NotificationDispatcher,
    evaluator: &mut ThresholdEvaluator,
    config: &MonitorConfig,
) -> anyhow::Result<()> {
    let report = collector.sample().await?;

    let mut events = Vec::new();
    for sample in report.samples() {
        let threshold = threshold_for(&config.thresholds, sample.kind);
        if let Some(event) = evaluator.evaluate(sample, threshold) {
            events.push(event);
        }
    }

    for event in &events {
        if let Err(e) = dispatcher.dispatch(event).await {
            tracing::error!(
                error = %e,
                resource = event.kind().label(),
                "webhook dispatch failed"
            );
        }
    }

    log_summary(&report, &config.data_mount_point);
    Ok(())
}

fn threshold_for(thresholds: &ThresholdsConfig, kind: ResourceKind) -> f64 {
    match kind {
        ResourceKind::Cpu => thresholds.cpu,
        ResourceKind::Memory => thresholds.memory,
        ResourceKind::RootStorage => thresholds.root_storage,
        ResourceKind::DataStorage => thresholds.data_storage,
    }
}

fn format_sample(sample: &ResourceSample) -> String {
    match sample.kind {
        ResourceKind::Cpu => format!(
            "{:.1}% ({} cores)",
            sample.usage_percent, sample.total
        ),
        _ => format!(
            "{:.1}% ({:.2}/{:.2} GB)",
            sample.usage_percent,
            crate::models::bytes_to_gb(sample.used),
            crate::models::bytes_to_gb(sample.total)
        ),
    }
}

fn log_summary(report: &MetricsReport, data_mount: &str) {
    let data = report
        .data
        .as_ref()
        .map(format_sample)
        .unwrap_or_else(|| "unavailable".into());
    tracing::info!(
        cpu = %format_sample(&report.cpu),
        memory = %format_sample(&report.memory),
        root = %format_sample(&report.root),
        data = %data,
        data_mount,
        "metrics"
    );
}
