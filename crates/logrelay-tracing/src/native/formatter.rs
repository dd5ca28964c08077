use serde::{Deserialize, Serialize};

/// Entry layout, each backed by a `tracing-subscriber` fmt layer.
///
/// Only the layout is selectable. Timestamps, ANSI and target display use
/// fixed settings; callers needing other fmt options build their own
/// `tracing-subscriber` stack instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formatter {
    /// `timestamp LEVEL message key=value`
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Abbreviated single-line text
    Compact,
}

impl std::fmt::Display for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formatter::Text => write!(f, "text"),
            Formatter::Json => write!(f, "json"),
            Formatter::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for Formatter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Formatter::Text),
            "json" => Ok(Formatter::Json),
            "compact" => Ok(Formatter::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}
