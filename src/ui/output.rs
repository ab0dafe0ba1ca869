//! Output mode.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show extra detail (ids, repair reports).
    Verbose,
    /// Show data and status messages.
    #[default]
    Normal,
    /// Show data and errors only.
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl From<crate::config::schema::OutputMode> for OutputMode {
    fn from(config_mode: crate::config::schema::OutputMode) -> Self {
        match config_mode {
            crate::config::schema::OutputMode::Verbose => Self::Verbose,
            crate::config::schema::OutputMode::Normal => Self::Normal,
            crate::config::schema::OutputMode::Quiet => Self::Quiet,
        }
    }
}

impl OutputMode {
    /// Check if this mode shows details.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows status messages.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
