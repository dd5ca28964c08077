use serde::{Deserialize, Serialize};

/// Severity understood by [`TracingLogger`](super::TracingLogger).
///
/// More severe levels sort first, so a logger set to `Info` emits everything
/// that compares `<= Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeLevel {
    /// Logged, then the calling thread panics with the message
    Panic,
    /// Logged, then the logger's exit function runs with code 1
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl NativeLevel {
    pub const ALL: [NativeLevel; 7] = [
        NativeLevel::Panic,
        NativeLevel::Fatal,
        NativeLevel::Error,
        NativeLevel::Warn,
        NativeLevel::Info,
        NativeLevel::Debug,
        NativeLevel::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NativeLevel::Panic => "panic",
            NativeLevel::Fatal => "fatal",
            NativeLevel::Error => "error",
            NativeLevel::Warn => "warn",
            NativeLevel::Info => "info",
            NativeLevel::Debug => "debug",
            NativeLevel::Trace => "trace",
        }
    }

    /// The `tracing` level events at this severity are emitted with
    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            NativeLevel::Panic | NativeLevel::Fatal | NativeLevel::Error => tracing::Level::ERROR,
            NativeLevel::Warn => tracing::Level::WARN,
            NativeLevel::Info => tracing::Level::INFO,
            NativeLevel::Debug => tracing::Level::DEBUG,
            NativeLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl std::fmt::Display for NativeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NativeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panic" => Ok(NativeLevel::Panic),
            "fatal" => Ok(NativeLevel::Fatal),
            "error" => Ok(NativeLevel::Error),
            "warn" | "warning" => Ok(NativeLevel::Warn),
            "info" => Ok(NativeLevel::Info),
            "debug" => Ok(NativeLevel::Debug),
            "trace" => Ok(NativeLevel::Trace),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}
