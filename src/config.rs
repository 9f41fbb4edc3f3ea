use serde::Deserialize;

/// Sentinel left in shipped config files; rejected at startup.
pub const WEBHOOK_PLACEHOLDER: &str = "YOUR_DISCORD_WEBHOOK_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub thresholds: ThresholdsConfig,
    pub monitoring: MonitoringConfig,
    pub notification: NotificationConfig,
}

/// Per-kind alert thresholds in percent.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    pub cpu: f64,
    pub memory: f64,
    pub root_storage: f64,
    pub data_storage: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub check_interval_secs: u64,
    /// Blocking window for the CPU rate measurement; part of the effective
    /// tick period, not hidden from it.
    #[serde(default = "default_cpu_sample_window_ms")]
    pub cpu_sample_window_ms: u64,
    pub data_mount_point: String,
}

fn default_cpu_sample_window_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    pub webhook_url: String,
    pub server_name: String,
    /// Upper bound on one delivery attempt so an unresponsive sink cannot
    /// starve subsequent ticks.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("thresholds.cpu", self.thresholds.cpu),
            ("thresholds.memory", self.thresholds.memory),
            ("thresholds.root_storage", self.thresholds.root_storage),
            ("thresholds.data_storage", self.thresholds.data_storage),
        ] {
            anyhow::ensure!(
                value.is_finite() && (0.0..=100.0).contains(&value),
                "{} must be a percentage between 0 and 100, got {}",
                name,
                value
            );
        }
        anyhow::ensure!(
            self.monitoring.check_interval_secs > 0,
            "monitoring.check_interval_secs must be > 0, got {}",
            self.monitoring.check_interval_secs
        );
        anyhow::ensure!(
            self.monitoring.cpu_sample_window_ms > 0,
            "monitoring.cpu_sample_window_ms must be > 0, got {}",
            self.monitoring.cpu_sample_window_ms
        );
        anyhow::ensure!(
            !self.monitoring.data_mount_point.is_empty(),
            "monitoring.data_mount_point must be non-empty"
        );
        anyhow::ensure!(
            !self.notification.webhook_url.is_empty()
                && self.notification.webhook_url != WEBHOOK_PLACEHOLDER,
            "notification.webhook_url is not set"
        );
        anyhow::ensure!(
            !self.notification.server_name.is_empty(),
            "notification.server_name must be non-empty"
        );
        anyhow::ensure!(
            self.notification.request_timeout_secs > 0,
            "notification.request_timeout_secs must be > 0, got {}",
            self.notification.request_timeout_secs
        );
        Ok(())
    }
}
