//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_SEGMENTS};

/// Height of every segment in pixels
pub const SEGMENT_HEIGHT: u8 = 8;

/// Width of every segment in pixels
pub const SEGMENT_WIDTH: u8 = 8;

/// Panel orientation flags
///
/// The three flags are independent and composable: each one transforms a
/// single index on the way to the wire and never the frame buffer itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Bit-reverse every row byte before transmission
    pub invert_segment_x: bool,
    /// Transmit segments in reverse order
    pub invert_display_x: bool,
    /// Remap row `r` to row address `7 - r`
    pub invert_y: bool,
}

impl Orientation {
    /// Legacy flag bit for [`Orientation::invert_segment_x`]
    pub const INVERT_SEGMENT_X: u8 = 1;
    /// Legacy flag bit for [`Orientation::invert_display_x`]
    pub const INVERT_DISPLAY_X: u8 = 2;
    /// Legacy flag bit for [`Orientation::invert_y`]
    pub const INVERT_Y: u8 = 4;

    /// Build from legacy flag bits (unknown bits are ignored)
    ///
    /// ```
    /// use matrix_informer::Orientation;
    ///
    /// let o = Orientation::from_bits(Orientation::INVERT_SEGMENT_X | Orientation::INVERT_Y);
    /// assert!(o.invert_segment_x);
    /// assert!(!o.invert_display_x);
    /// assert!(o.invert_y);
    /// ```
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            invert_segment_x: bits & Self::INVERT_SEGMENT_X != 0,
            invert_display_x: bits & Self::INVERT_DISPLAY_X != 0,
            invert_y: bits & Self::INVERT_Y != 0,
        }
    }

    /// Convert back to legacy flag bits
    pub const fn bits(self) -> u8 {
        (self.invert_segment_x as u8 * Self::INVERT_SEGMENT_X)
            | (self.invert_display_x as u8 * Self::INVERT_DISPLAY_X)
            | (self.invert_y as u8 * Self::INVERT_Y)
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of chained 8x8 segments
    pub segments: u8,
    /// Panel orientation
    pub orientation: Orientation,
}

impl Config {
    /// Visible width in pixels
    pub fn width(&self) -> u16 {
        self.segments as u16 * SEGMENT_WIDTH as u16
    }

    /// Required frame buffer size in bytes (one byte per row and segment)
    pub fn buffer_size(&self) -> usize {
        self.segments as usize * SEGMENT_HEIGHT as usize
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use matrix_informer::{Builder, Orientation};
///
/// let config = match Builder::new()
///     .segments(8)
///     .orientation(Orientation::from_bits(7))
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.width(), 64);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Number of chained segments (required)
    segments: Option<u8>,
    /// Panel orientation
    orientation: Orientation,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of chained segments (required)
    pub fn segments(mut self, segments: u8) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Set panel orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingSegments` if the segment count was not set,
    /// or `BuilderError::InvalidSegments` if it is 0 or above [`MAX_SEGMENTS`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let segments = self.segments.ok_or(BuilderError::MissingSegments)?;
        if segments == 0 || segments > MAX_SEGMENTS {
            return Err(BuilderError::InvalidSegments { segments });
        }
        Ok(Config {
            segments,
            orientation: self.orientation,
        })
    }
}
