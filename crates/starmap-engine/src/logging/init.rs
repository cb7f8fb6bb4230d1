use std::sync::Once;

use log::LevelFilter;

/// Crates whose info output drowns a tile render: SVG parsing warns once per
/// unsupported attribute.
const NOISY_MODULES: [&str; 2] = ["usvg", "resvg"];

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax, e.g. "warn" or
/// "starmap_render=debug". When absent, `RUST_LOG` is consulted, then the
/// `info` default.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Keep SVG parser chatter at warn level unless the filter names it.
    pub quiet_svg: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            quiet_svg: true,
        }
    }
}

static INIT: Once = Once::new();

fn builder(config: &LoggingConfig) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    if config.quiet_svg {
        for module in NOISY_MODULES {
            builder.filter_module(module, LevelFilter::Warn);
        }
    }
    // Later directives win, so an explicit filter can still raise the SVG crates.
    if let Some(filter) = config.env_filter.clone().or_else(|| std::env::var("RUST_LOG").ok()) {
        builder.parse_filters(&filter);
    }
    builder.write_style(config.write_style);
    builder.format_timestamp_millis();
    builder
}

/// Installs the global logger. Only the first call does anything.
///
/// A logger installed by the host application is kept.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if builder(&config).try_init().is_err() {
            log::debug!("logger already installed, keeping it");
            return;
        }
        log::debug!("logging initialized");
    });
}
