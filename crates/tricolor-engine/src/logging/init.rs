use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu's internals are chatty at `info`; keep them at `warn`.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "tricolor_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter string this config resolves to, given the value of `RUST_LOG`.
    ///
    /// An explicit filter wins over the environment; an empty one counts as unset.
    pub fn resolve_filter(&self, rust_log: Option<&str>) -> String {
        let explicit = self.env_filter.as_deref().filter(|f| !f.trim().is_empty());
        let from_env = rust_log.filter(|f| !f.trim().is_empty());

        explicit
            .or(from_env)
            .unwrap_or(DEFAULT_FILTER)
            .to_string()
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = config.resolve_filter(rust_log.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // Another logger may already be installed (e.g. by a test harness).
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized with filter {filter:?}");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_quiets_wgpu_internals() {
        let cfg = LoggingConfig::default();
        let filter = cfg.resolve_filter(None);
        assert_eq!(filter, DEFAULT_FILTER);
        assert!(filter.starts_with("info"));
        assert!(filter.contains("wgpu_core=warn"));
    }

    #[test]
    fn explicit_filter_beats_environment() {
        let cfg = LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_filter(Some("error")), "debug");
    }

    #[test]
    fn environment_used_when_no_explicit_filter() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.resolve_filter(Some("trace")), "trace");
    }

    #[test]
    fn blank_values_fall_through() {
        let cfg = LoggingConfig {
            env_filter: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_filter(Some("")), DEFAULT_FILTER);
    }
}
