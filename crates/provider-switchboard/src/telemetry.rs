//! Tracing setup shared by the server and the `validate-env` binary.
//!
//! Logs always go to stderr so stdio JSON-RPC stays clean. A daily rolling
//! file under `<SWITCHBOARD_HOME>/logs` (or `LOG_DIR`) is added when enabled.

use std::path::{Path, PathBuf};

use env_flags::env_flags;
use once_cell::sync::OnceCell;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingCfg, UserConfig};

const LOG_FILE_NAME: &str = "provider-switchboard.log";

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Json,
    Compact,
    Pretty,
    Full,
}

/// Effective logging options after env flags and `[logging]` are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub json: bool,
    pub compact: bool,
    pub pretty: bool,
    pub to_file: bool,
    pub dir: Option<PathBuf>,
}

impl LogSettings {
    fn from_flags() -> Self {
        env_flags! {
            /// Tracing filter, e.g. "info", "debug", or targets format.
            RUST_LOG: &str = "info";
            /// Preferred filter env (alias). If set, overrides RUST_LOG.
            TRACING_FILTER: &str = "";
            /// Pretty formatting (ignored if TRACING_JSON=true).
            TRACING_PRETTY: bool = false;
            /// Compact single-line formatting (ignored if TRACING_JSON=true)
            TRACING_COMPACT: bool = true;
            /// JSON formatting for logs
            TRACING_JSON: bool = false;
            /// If true, also log to file under <SWITCHBOARD_HOME>/logs or LOG_DIR
            LOG_TO_FILE: bool = true;
            /// Optional explicit log directory. Defaults to <SWITCHBOARD_HOME>/logs
            LOG_DIR: &str = "";
        }

        let filter = if !(*TRACING_FILTER).is_empty() {
            *TRACING_FILTER
        } else {
            *RUST_LOG
        };
        Self {
            filter: filter.to_string(),
            json: *TRACING_JSON,
            compact: *TRACING_COMPACT,
            pretty: *TRACING_PRETTY,
            to_file: *LOG_TO_FILE,
            dir: (!(*LOG_DIR).is_empty()).then(|| PathBuf::from(*LOG_DIR)),
        }
    }

    /// Fill in values from `[logging]` for every flag `env_set` reports as
    /// absent from the environment.
    pub fn merge_config(mut self, cfg: &LoggingCfg, env_set: impl Fn(&str) -> bool) -> Self {
        if !(env_set("TRACING_FILTER") || env_set("RUST_LOG"))
            && let Some(level) = cfg.level.as_ref()
        {
            self.filter = level.clone();
        }
        if !env_set("TRACING_JSON")
            && let Some(v) = cfg.json
        {
            self.json = v;
        }
        if !env_set("TRACING_COMPACT")
            && let Some(v) = cfg.compact
        {
            self.compact = v;
        }
        if !env_set("TRACING_PRETTY")
            && let Some(v) = cfg.pretty
        {
            self.pretty = v;
        }
        if !env_set("LOG_TO_FILE")
            && let Some(v) = cfg.to_file
        {
            self.to_file = v;
        }
        if !env_set("LOG_DIR")
            && let Some(dir) = cfg.dir.as_deref()
        {
            self.dir = Some(crate::config::expand_home(dir));
        }
        self
    }

    /// JSON wins, then compact, then pretty.
    pub fn style(&self) -> LogStyle {
        if self.json {
            LogStyle::Json
        } else if self.compact {
            LogStyle::Compact
        } else if self.pretty {
            LogStyle::Pretty
        } else {
            LogStyle::Full
        }
    }
}

fn fmt_layer<S, W>(style: LogStyle, writer: W, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    match style {
        LogStyle::Json => base.json().boxed(),
        LogStyle::Compact => base.compact().boxed(),
        LogStyle::Pretty => base.pretty().boxed(),
        LogStyle::Full => base.boxed(),
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing(sb_home: &Path, user_cfg: Option<&UserConfig>) {
    let env_set = |k: &str| std::env::var_os(k).is_some();
    let mut settings = LogSettings::from_flags();
    if let Some(cfg) = user_cfg.and_then(|c| c.logging.as_ref()) {
        settings = settings.merge_config(cfg, env_set);
    }
    let style = settings.style();

    let filter = EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut file_error = None;
    let file_writer = if settings.to_file {
        let dir = settings.dir.clone().unwrap_or_else(|| sb_home.join("logs"));
        match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
                let (nb, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                Some(nb)
            }
            Err(e) => {
                file_error = Some(format!("failed to create log dir {}: {}", dir.display(), e));
                None
            }
        }
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer(style, std::io::stderr, true))
        .with(file_writer.map(|nb| fmt_layer(style, nb, false)));
    if let Err(e) = subscriber.try_init() {
        tracing::debug!("tracing already set: {:?}", e);
    }
    if let Some(msg) = file_error {
        tracing::warn!("{}", msg);
    }
    tracing::debug!(style = ?style, filter = %settings.filter, "tracing initialized");
}
