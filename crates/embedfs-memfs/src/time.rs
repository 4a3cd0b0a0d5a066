//! Modification timestamps.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A modification time with nanosecond precision, relative to the Unix epoch.
///
/// `nanos` is always below one second; negative `secs` denote times before
/// 1970. [`ModTime::ZERO`] is the sentinel used for directories that were
/// synthesized rather than read from a source.
///
/// # Examples
///
/// ```
/// use embedfs_memfs::ModTime;
///
/// let t = ModTime::new(10, 1_500_000_000);
/// assert_eq!(t.secs(), 11);
/// assert_eq!(t.nanos(), 500_000_000);
/// assert!(ModTime::ZERO.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ModTime {
    secs: i64,
    nanos: u32,
}

impl ModTime {
    /// The zero timestamp (the Unix epoch).
    pub const ZERO: Self = Self { secs: 0, nanos: 0 };

    /// Creates a timestamp, carrying whole seconds out of `nanos`.
    #[must_use]
    pub const fn new(secs: i64, nanos: u32) -> Self {
        Self {
            secs: secs.saturating_add((nanos / NANOS_PER_SEC) as i64),
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub const fn secs(&self) -> i64 {
        self.secs
    }

    /// Sub-second part in nanoseconds.
    #[must_use]
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }

    /// Returns `true` for the zero sentinel.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// Converts a `SystemTime`, including times before the epoch.
    ///
    /// # Examples
    ///
    /// ```
    /// use embedfs_memfs::ModTime;
    /// use std::time::{Duration, UNIX_EPOCH};
    ///
    /// let before = UNIX_EPOCH - Duration::from_millis(1500);
    /// let t = ModTime::from_system_time(before);
    /// assert_eq!((t.secs(), t.nanos()), (-2, 500_000_000));
    /// assert_eq!(t.to_system_time(), Some(before));
    /// ```
    #[must_use]
    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Self {
                secs: i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                nanos: after.subsec_nanos(),
            },
            Err(err) => {
                let before = err.duration();
                let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                match before.subsec_nanos() {
                    0 => Self { secs: -secs, nanos: 0 },
                    nanos => Self {
                        secs: -secs - 1,
                        nanos: NANOS_PER_SEC - nanos,
                    },
                }
            }
        }
    }

    /// Converts back to a `SystemTime`.
    ///
    /// Returns `None` if the platform cannot represent the instant.
    #[must_use]
    pub fn to_system_time(&self) -> Option<SystemTime> {
        if self.secs >= 0 {
            UNIX_EPOCH.checked_add(Duration::new(self.secs.unsigned_abs(), self.nanos))
        } else {
            UNIX_EPOCH
                .checked_sub(Duration::from_secs(self.secs.unsigned_abs()))?
                .checked_add(Duration::from_nanos(u64::from(self.nanos)))
        }
    }
}

impl From<SystemTime> for ModTime {
    fn from(time: SystemTime) -> Self {
        Self::from_system_time(time)
    }
}

impl fmt::Display for ModTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs, self.nanos)
    }
}
