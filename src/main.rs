use anyhow::Result;
use server_monitor::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    // An unset or placeholder webhook URL fails validation here, before the
    // loop starts, and exits non-zero.
    let app_config = config::AppConfig::load()?;

    let collector = Arc::new(collector::MetricsCollector::new(
        &app_config.monitoring.data_mount_point,
        Duration::from_millis(app_config.monitoring.cpu_sample_window_ms),
    ));
    let dispatcher = Arc::new(notifier::NotificationDispatcher::new(
        app_config.notification.webhook_url.clone(),
        app_config.notification.server_name.clone(),
        Duration::from_secs(app_config.notification.request_timeout_secs),
    )?);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let monitor_handle = monitor::spawn(
        monitor::MonitorDeps {
            collector,
            dispatcher,
            shutdown_rx,
        },
        monitor::MonitorConfig {
            check_interval: Duration::from_secs(app_config.monitoring.check_interval_secs),
            thresholds: app_config.thresholds.clone(),
            data_mount_point: app_config.monitoring.data_mount_point.clone(),
        },
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        server = %app_config.notification.server_name,
        check_interval_secs = app_config.monitoring.check_interval_secs,
        "Server monitor started"
    );

    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable; using ctrl-c only");
                tokio::signal::ctrl_c().await?;
                let _ = shutdown_tx.send(());
                let _ = monitor_handle.await;
                return Ok(());
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    let _ = monitor_handle.await;

    Ok(())
}
