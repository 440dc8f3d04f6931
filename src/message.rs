//! Upstream command and status payloads
//!
//! These mirror the fields of the broker topics after JSON decoding. Every
//! field is optional; [`Scheduler::apply`](crate::Scheduler::apply) acts on
//! the valid ones and leaves prior state alone for anything missing or out of
//! range.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::clock::DateTime;
use crate::config::SEGMENT_HEIGHT;
use crate::content::{Icon, Notification, Screen};

/// Decoded upstream command
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// Queue a notification
    Notification(NotificationMessage),
    /// Change power, brightness or clock format
    Settings(SettingsMessage),
    /// Set the wall-clock time
    Time(TimeMessage),
    /// Create or update a screen
    Screen(ScreenMessage),
}

/// `notification` payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationMessage {
    /// Icon rows, one or more 8-row frames
    pub icon: Option<Vec<u8>>,
    /// Text
    pub text: Option<String>,
    /// Auto-dismiss after this many seconds
    pub timeout_secs: Option<u32>,
}

impl NotificationMessage {
    /// Build the queued notification
    ///
    /// The icon is kept only when it holds whole 8-row frames, and only the
    /// first frame is shown. Missing text shows as empty.
    pub fn into_notification(self) -> Notification {
        let icon = self
            .icon
            .filter(|rows| !rows.is_empty() && rows.len() % SEGMENT_HEIGHT as usize == 0)
            .and_then(|rows| Icon::from_slice(&rows));
        Notification::new(
            icon,
            self.text.unwrap_or_default(),
            self.timeout_secs.unwrap_or(0),
        )
    }
}

/// `settings` payload
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettingsMessage {
    /// Intensity 0..=15; anything higher is ignored
    pub brightness: Option<u8>,
    /// Power
    pub state: Option<bool>,
    /// Show seconds on the clock
    pub seconds_visible: Option<bool>,
}

/// `time` payload; all fields are required together
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeMessage {
    /// Hour
    pub hour: Option<u8>,
    /// Minute
    pub minute: Option<u8>,
    /// Second
    pub second: Option<u8>,
    /// Day of month
    pub day: Option<u8>,
    /// Month
    pub month: Option<u8>,
    /// Full year
    pub year: Option<u16>,
}

impl TimeMessage {
    /// The time to set, or `None` if any field is missing or out of range
    pub fn date_time(&self) -> Option<DateTime> {
        let (hour, minute, second) = (self.hour?, self.minute?, self.second?);
        let (day, month, year) = (self.day?, self.month?, self.year?);
        if day == 0 || month == 0 || year == 0 || hour >= 24 || minute >= 60 || second >= 60 {
            return None;
        }
        Some(DateTime::new(year, month, day, hour, minute, second))
    }
}

/// `screen` payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreenMessage {
    /// Key; the message is ignored without it
    pub id: Option<u8>,
    /// Icon rows, exactly 8 bytes
    pub icon: Option<Vec<u8>>,
    /// Text
    pub text: Option<String>,
}

impl ScreenMessage {
    /// Build the screen entry, or `None` without an id
    pub fn into_screen(self) -> Option<Screen> {
        let id = self.id?;
        let icon = self
            .icon
            .filter(|rows| rows.len() == SEGMENT_HEIGHT as usize)
            .and_then(|rows| Icon::from_slice(&rows));
        Some(Screen::new(id, icon, self.text.unwrap_or_default()))
    }
}

/// Snapshot reported on the status topic
///
/// Network fields (`ip`, `mac`, `rssi`) and the firmware version are added by
/// the publishing glue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Status {
    /// Power
    pub state: bool,
    /// Intensity 0..=15
    pub brightness: u8,
    /// Clock shows seconds
    pub seconds_visible: bool,
    /// Milliseconds since boot
    pub uptime_ms: u32,
}

impl Status {
    /// `"ON"` or `"OFF"`
    pub fn state_str(&self) -> &'static str {
        if self.state { "ON" } else { "OFF" }
    }

    /// Uptime formatted as `<days>T<hh>:<mm>:<ss>.<mmm>`
    ///
    /// ```
    /// use matrix_informer::Status;
    ///
    /// let status = Status { state: true, brightness: 5, seconds_visible: true, uptime_ms: 90_061_001 };
    /// assert_eq!(format!("{}", status.uptime()), "1T01:01:01.001");
    /// ```
    pub fn uptime(&self) -> Uptime {
        Uptime(self.uptime_ms)
    }
}

/// Uptime display adapter returned by [`Status::uptime`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uptime(pub u32);

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0;
        let secs = ms / 1000;
        write!(
            f,
            "{}T{:02}:{:02}:{:02}.{:03}",
            secs / 86_400,
            secs / 3600 % 24,
            secs / 60 % 60,
            secs % 60,
            ms % 1000
        )
    }
}
