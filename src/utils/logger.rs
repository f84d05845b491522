use std::sync::Once;

use log::LevelFilter;

/// Level applied to everything outside this crate unless overridden.
const DEPENDENCY_LEVEL: LevelFilter = LevelFilter::Warn;

/// How the crate's logger is set up.
///
/// `crate_level` only affects `est_animtex` targets; wgpu and other
/// dependencies stay at `warn` so frame-by-frame playback logs are not
/// buried under driver chatter. `env_filter`, when present, replaces the
/// whole directive string (`env_logger` syntax).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub crate_level: LevelFilter,
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            crate_level: LevelFilter::Info,
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Debug output for this crate, dependencies unchanged.
    pub fn verbose() -> Self {
        Self {
            crate_level: LevelFilter::Debug,
            ..Self::default()
        }
    }

    /// Directive string handed to `env_logger`.
    ///
    /// Precedence: explicit `env_filter`, then the `RUST_LOG` value passed
    /// in, then the crate-scoped default.
    pub fn filter_directives(&self, rust_log: Option<&str>) -> String {
        if let Some(filter) = self.env_filter.as_deref() {
            return filter.to_string();
        }

        match rust_log {
            Some(filter) if !filter.trim().is_empty() => filter.to_string(),
            _ => format!(
                "{},{}={}",
                DEPENDENCY_LEVEL.as_str().to_ascii_lowercase(),
                env!("CARGO_CRATE_NAME"),
                self.crate_level.as_str().to_ascii_lowercase()
            ),
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect, and a
/// logger installed by the host application is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let directives = config.filter_directives(rust_log.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&directives);
        builder.write_style(config.write_style);
        if !config.timestamps {
            builder.format_timestamp(None);
        }

        if builder.try_init().is_ok() {
            log::debug!("logging initialized with `{}`", directives);
        }
    });
}
