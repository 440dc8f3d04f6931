//! MAX7219 command definitions
//!
//! Every transaction on the chain carries one 16-bit word per segment,
//! shifted out MSB-first while chip select is held low. The high byte is the
//! register address and the low byte is the register value.
//!
//! ## Word Structure
//!
//! ```text
//! 15      8 7       0
//! +--------+--------+
//! | address|  data  |
//! +--------+--------+
//! ```
//!
//! ## Example
//!
//! ```
//! use matrix_informer::command;
//!
//! assert_eq!(command::enable(true), 0x0C01);
//! assert_eq!(command::intensity(7), 0x0A07);
//! assert_eq!(command::row(0, 0xFF), 0x01FF);
//! assert_eq!(command::row(7, 0x81), 0x0881);
//! ```

/// Shutdown register (0x0C)
///
/// Low bit 1 = normal operation, 0 = shutdown (display blank, RAM kept).
pub const CMD_ENABLE: u16 = 0x0C00;

/// Intensity register (0x0A)
///
/// Low nibble selects one of 16 PWM duty cycles (1/32 .. 31/32).
pub const CMD_INTENSITY: u16 = 0x0A00;

/// Display test register (0x0F)
///
/// Writing 0 selects normal operation (no test pattern).
pub const CMD_TEST: u16 = 0x0F00;

/// Scan limit register (0x0B)
///
/// Number of scanned rows minus one.
pub const CMD_SCAN_LIMIT: u16 = 0x0B00;

/// Decode mode register (0x09)
///
/// Writing 0 disables BCD decoding for every row.
pub const CMD_DECODE: u16 = 0x0900;

/// Scan all 8 rows
pub const SCAN_ALL_ROWS: u16 = 7;

/// Maximum intensity level accepted by the chip
pub const MAX_INTENSITY: u8 = 0x0F;

/// Enable or shut down the display
pub const fn enable(enabled: bool) -> u16 {
    CMD_ENABLE | enabled as u16
}

/// Intensity word, clamped to [`MAX_INTENSITY`]
pub const fn intensity(level: u8) -> u16 {
    let level = if level > MAX_INTENSITY {
        MAX_INTENSITY
    } else {
        level
    };
    CMD_INTENSITY | level as u16
}

/// Row write word
///
/// Row registers live at addresses 1..=8, so `row_address` 0 maps to
/// register 0x01.
pub const fn row(row_address: u8, data: u8) -> u16 {
    ((row_address as u16 + 1) << 8) | data as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_words() {
        assert_eq!(enable(false), 0x0C00);
        assert_eq!(enable(true), 0x0C01);
    }

    #[test]
    fn test_intensity_is_clamped() {
        assert_eq!(intensity(0), 0x0A00);
        assert_eq!(intensity(15), 0x0A0F);
        assert_eq!(intensity(20), 0x0A0F);
    }

    #[test]
    fn test_init_words() {
        assert_eq!(CMD_TEST, 0x0F00);
        assert_eq!(CMD_DECODE, 0x0900);
        assert_eq!(CMD_SCAN_LIMIT | SCAN_ALL_ROWS, 0x0B07);
    }

    #[test]
    fn test_row_addresses_are_one_based() {
        assert_eq!(row(0, 0x00), 0x0100);
        assert_eq!(row(3, 0xA5), 0x04A5);
        assert_eq!(row(7, 0xFF), 0x08FF);
    }
}
