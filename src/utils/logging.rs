use std::{path::PathBuf, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};

pub const CLI_PREFIX: &str = "cli";

/// Where and how much minidone logs. Files always go into `<log_root>/logs`, stdout only
/// receives output when `show_std` is set.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub prefix: &'static str,
    pub log_root: PathBuf,
    pub level: Option<LevelFilter>,
    pub show_std: bool,
}

impl LoggingOptions {
    /// `--log` means everything down to TRACE, mirrored to the terminal.
    pub fn for_cli(log_root: PathBuf, verbose: bool) -> Self {
        Self {
            prefix: CLI_PREFIX,
            log_root,
            level: verbose.then_some(LevelFilter::TRACE),
            show_std: verbose,
        }
    }

    /// Filter directive for this crate. Explicit level wins over `RUST_LOG`, `debug` otherwise.
    pub fn directive(&self) -> String {
        let level = self
            .level
            .map(|v| v.to_string())
            .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()));
        format!("{}={level}", env!("CARGO_PKG_NAME").replace("-", "_"))
    }
}

pub fn enable_logging(options: &LoggingOptions) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix(options.prefix)
        .build(options.log_root.join("logs"))?;

    let show_std = options.show_std;
    let stdout = std::io::stdout.with_filter(move |_| show_std);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(options.directive()))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(appender))
        .pretty()
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .try_init();
});

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::LoggingOptions;

    #[test]
    fn test_verbose_directive() {
        let options = LoggingOptions::for_cli(PathBuf::from("."), true);
        assert_eq!(options.directive(), "minidone=trace");
        assert!(options.show_std);
    }

    #[test]
    fn test_quiet_keeps_stdout_clean() {
        let options = LoggingOptions::for_cli(PathBuf::from("."), false);
        assert!(!options.show_std);
        assert!(options.level.is_none());
    }
}
