//! CLI-specific types.
//!
//! Strong types for the command-line surface: how listings are printed and
//! which exit code a failure maps to.
//!
//! # Examples
//!
//! ```
//! use embedfs_core::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format.as_str(), "json");
//!
//! assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// CLI output format for listings.
///
/// All formats carry the same information with different presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// JSON array for machine parsing
    Json,
    /// Tab-separated lines for scripts
    Text,
    /// Human-readable lines with colors
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Returns the string representation of the format.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_core::cli::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Json.as_str(), "json");
    /// assert_eq!(OutputFormat::Text.as_str(), "text");
    /// assert_eq!(OutputFormat::Pretty.as_str(), "pretty");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::InvalidArgument(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// CLI exit code with semantic meaning.
///
/// # Examples
///
/// ```
/// use embedfs_core::cli::ExitCode;
/// use embedfs_core::Error;
///
/// let code = ExitCode::from(&Error::InvalidArgument("x".to_string()));
/// assert_eq!(code, ExitCode::INVALID_INPUT);
/// assert!(!code.is_success());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Successful execution (exit code 0).
    pub const SUCCESS: Self = Self(0);

    /// General or internal error (exit code 1).
    pub const ERROR: Self = Self(1);

    /// Invalid arguments, patterns, or configuration (exit code 2).
    pub const INVALID_INPUT: Self = Self(2);

    /// An input source could not be read (exit code 3).
    pub const SOURCE_ERROR: Self = Self(3);

    /// The output could not be written (exit code 4).
    pub const OUTPUT_ERROR: Self = Self(4);

    /// Creates an exit code from an integer value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the exit code as an integer.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Checks if the exit code represents success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        if err.is_user_error() {
            Self::INVALID_INPUT
        } else if err.is_source_error() {
            Self::SOURCE_ERROR
        } else if err.is_output_error() {
            Self::OUTPUT_ERROR
        } else {
            Self::ERROR
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Pretty);
    }

    #[test]
    fn test_exit_code_mapping() {
        let source = Error::SourceUnreadable {
            path: "x".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(ExitCode::from(&source), ExitCode::SOURCE_ERROR);

        let output = Error::OutputUnwritable {
            path: "x".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(ExitCode::from(&output), ExitCode::OUTPUT_ERROR);

        let pattern = Error::PatternInvalid {
            pattern: "(".to_string(),
            source: "unclosed".into(),
        };
        assert_eq!(ExitCode::from(&pattern), ExitCode::INVALID_INPUT);

        let invariant = Error::InvariantViolation {
            message: "x".to_string(),
            source: None,
        };
        assert_eq!(ExitCode::from(&invariant), ExitCode::ERROR);
    }

    #[test]
    fn test_exit_code_conversions() {
        assert_eq!(i32::from(ExitCode::OUTPUT_ERROR), 4);
        assert_eq!(ExitCode::from_i32(3), ExitCode::SOURCE_ERROR);
        assert!(ExitCode::default().is_success());
        assert_eq!(ExitCode::INVALID_INPUT.to_string(), "2");
    }
}
