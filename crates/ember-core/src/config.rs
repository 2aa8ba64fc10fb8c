use crate::{logging, profiling};

/// Process-wide settings for Ember diagnostics.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tracing filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: logging::DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_profiling(mut self, mode: ProfilingMode) -> Self {
        self.profiling = mode;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are compiled in but not collected
    #[default]
    Off,
    /// Scopes are collected in-process only
    On,
    /// Scopes are collected and served to 'puffin_viewer' over HTTP
    WithWebserver,
}

/// Install logging and profiling according to `config`.
pub fn init(config: &Config) {
    logging::init_with_filter(&config.log_filter);

    match config.profiling {
        ProfilingMode::Off => {}
        ProfilingMode::On => profiling::enable_scopes(),
        ProfilingMode::WithWebserver => {
            profiling::init_profiling(profiling::ProfilingBackend::PuffinHttp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_filter, logging::DEFAULT_FILTER);
        assert_eq!(config.profiling, ProfilingMode::Off);
    }

    #[test]
    fn test_config_builder() {
        let config = Config::default()
            .with_log_filter("trace")
            .with_profiling(ProfilingMode::On);
        assert_eq!(config.log_filter, "trace");
        assert_eq!(config.profiling, ProfilingMode::On);
    }
}
