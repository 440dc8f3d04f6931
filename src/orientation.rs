//! Orientation transforms
//!
//! Chained 8x8 modules are soldered in every conceivable way: rows may be
//! wired bottom-up, the chain may start at the right-hand end, and each
//! module may have its columns mirrored. The frame buffer always stays in
//! logical order; these helpers translate one index at a time when a row is
//! pushed to the wire.
//!
//! ## Example
//!
//! ```
//! use matrix_informer::orientation::{reverse_byte, row_address, segment_order};
//! use matrix_informer::Orientation;
//!
//! let flipped = Orientation { invert_y: true, ..Orientation::default() };
//! assert_eq!(row_address(0, flipped), 7);
//!
//! let reversed = Orientation { invert_display_x: true, ..Orientation::default() };
//! assert_eq!(segment_order(0, 4, reversed), 3);
//!
//! assert_eq!(reverse_byte(0b1000_0001), 0b1000_0001);
//! assert_eq!(reverse_byte(0b1100_0000), 0b0000_0011);
//! ```

use crate::config::{Orientation, SEGMENT_HEIGHT};

/// Physical row address for logical row `row`
pub fn row_address(row: u8, orientation: Orientation) -> u8 {
    if orientation.invert_y {
        SEGMENT_HEIGHT - 1 - row
    } else {
        row
    }
}

/// Frame buffer segment for the `slot`-th word of a transaction
///
/// # Arguments
///
/// * `slot` - Position in transmission order, 0 is sent first
/// * `segments` - Number of chained segments
/// * `orientation` - Panel orientation
pub fn segment_order(slot: u8, segments: u8, orientation: Orientation) -> u8 {
    if orientation.invert_display_x {
        segments - 1 - slot
    } else {
        slot
    }
}

/// Row byte as transmitted for one segment
pub fn segment_data(data: u8, orientation: Orientation) -> u8 {
    if orientation.invert_segment_x {
        reverse_byte(data)
    } else {
        data
    }
}

/// Reverse the bit order of a byte
pub fn reverse_byte(b: u8) -> u8 {
    let b = (b & 0xF0) >> 4 | (b & 0x0F) << 4;
    let b = (b & 0xCC) >> 2 | (b & 0x33) << 2;
    (b & 0xAA) >> 1 | (b & 0x55) << 1
}
