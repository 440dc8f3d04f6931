//! Content shown by the scheduler

use alloc::string::String;

use crate::config::SEGMENT_HEIGHT;

/// One 8x8 bitmap, a byte per row with the MSB as the leftmost pixel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Icon(pub [u8; SEGMENT_HEIGHT as usize]);

impl Icon {
    /// Take the first 8 rows of `rows`, or `None` if fewer are given
    pub fn from_slice(rows: &[u8]) -> Option<Self> {
        let frame = rows.get(..SEGMENT_HEIGHT as usize)?;
        let mut bitmap = [0u8; SEGMENT_HEIGHT as usize];
        bitmap.copy_from_slice(frame);
        Some(Self(bitmap))
    }

    /// Row bytes
    pub fn rows(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 8]> for Icon {
    fn from(rows: [u8; 8]) -> Self {
        Self(rows)
    }
}

/// Transient message queued for display
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notification {
    /// Optional icon in the leftmost cell
    pub icon: Option<Icon>,
    /// Text, scrolled when it does not fit
    pub text: String,
    /// Seconds before auto-dismiss; `None` waits for a click
    pub timeout_secs: Option<u32>,
}

impl Notification {
    /// Create a notification; a zero timeout waits for a click
    pub fn new(icon: Option<Icon>, text: impl Into<String>, timeout_secs: u32) -> Self {
        Self {
            icon,
            text: text.into(),
            timeout_secs: (timeout_secs > 0).then_some(timeout_secs),
        }
    }
}

/// Persistent entry in the screen rotation, keyed by `id`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    /// Unique key
    pub id: u8,
    /// Optional icon in the leftmost cell
    pub icon: Option<Icon>,
    /// Text, scrolled when it does not fit
    pub text: String,
}

impl Screen {
    /// Create a screen
    pub fn new(id: u8, icon: Option<Icon>, text: impl Into<String>) -> Self {
        Self {
            id,
            icon,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_from_slice_takes_first_frame() {
        let rows = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        assert_eq!(Icon::from_slice(&rows), Some(Icon([1, 2, 3, 4, 5, 6, 7, 8])));
        assert_eq!(Icon::from_slice(&rows[..7]), None);
    }

    #[test]
    fn test_zero_timeout_is_indefinite() {
        assert_eq!(Notification::new(None, "hi", 0).timeout_secs, None);
        assert_eq!(Notification::new(None, "hi", 5).timeout_secs, Some(5));
    }
}
