//! Core display operations
//!
//! [`Matrix`] owns the frame buffer for a chain of 8x8 segments and turns it
//! into MAX7219 row writes. Pixel coordinates are signed and silently
//! clipped, so callers can draw text that hangs off either edge without
//! checking bounds themselves.
//!
//! ## Frame Buffer Layout
//!
//! One byte per (row, segment): `buffer[row * segments + x / 8]`, with the
//! most significant bit as the leftmost pixel of the segment.

use crate::command::{
    self, CMD_DECODE, CMD_SCAN_LIMIT, CMD_TEST, MAX_INTENSITY, SCAN_ALL_ROWS,
};
use crate::config::{Config, SEGMENT_HEIGHT};
use crate::error::{Error, MAX_SEGMENTS};
use crate::font::{self, GLYPH_SIZE};
use crate::interface::MatrixInterface;
use crate::orientation::{row_address, segment_data, segment_order};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Direction for [`Matrix::scroll`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrollDirection {
    /// Move every pixel one row up, clearing the bottom row
    Up,
    /// Move every pixel one row down, clearing the top row
    Down,
    /// Move every pixel one column left, carrying across segments
    Left,
    /// Move every pixel one column right, carrying across segments
    Right,
}

/// Frame buffer driver for a chain of MAX7219 8x8 segments
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`MatrixInterface`]
/// * `B` - Frame buffer storage, at least `8 * segments` bytes
pub struct Matrix<I, B>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Pixel storage
    buffer: B,
    /// Last enable state sent to the chain
    enabled: bool,
    /// Last intensity sent to the chain
    brightness: u8,
}

impl<I, B> Matrix<I, B>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    /// Create a new Matrix and clear its frame buffer
    ///
    /// No words are sent until [`init`](Self::init) is called.
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if `buffer` is shorter than
    /// `config.buffer_size()`.
    pub fn new(interface: I, config: Config, mut buffer: B) -> Result<Self, Error<I>> {
        let required = config.buffer_size();
        let provided = buffer.as_mut().len();
        if provided < required {
            return Err(Error::BufferTooSmall { required, provided });
        }

        let mut matrix = Self {
            interface,
            config,
            buffer,
            enabled: false,
            brightness: 0,
        };
        matrix.clear();
        Ok(matrix)
    }

    /// Put every chip in a known state
    ///
    /// Disables test mode and BCD decoding, scans all 8 rows and leaves the
    /// display shut down until [`set_enabled`](Self::set_enabled).
    pub fn init(&mut self) -> DisplayResult<I> {
        self.broadcast(CMD_TEST)?;
        self.broadcast(CMD_DECODE)?;
        self.broadcast(CMD_SCAN_LIMIT | SCAN_ALL_ROWS)?;
        self.set_enabled(false)
    }

    /// Enable or shut down every segment
    pub fn set_enabled(&mut self, enabled: bool) -> DisplayResult<I> {
        self.broadcast(command::enable(enabled))?;
        self.enabled = enabled;
        Ok(())
    }

    /// Set intensity on every segment
    ///
    /// Levels above 15 are clamped to 15.
    pub fn set_brightness(&mut self, level: u8) -> DisplayResult<I> {
        let level = level.min(MAX_INTENSITY);
        self.broadcast(command::intensity(level))?;
        self.brightness = level;
        Ok(())
    }

    /// Whether the last enable command switched the display on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Last intensity sent to the chain
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Number of chained segments
    pub fn segments(&self) -> u8 {
        self.config.segments
    }

    /// Visible width in pixels
    pub fn width(&self) -> i32 {
        self.config.width() as i32
    }

    /// Access the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Raw frame buffer, `8 * segments` bytes
    pub fn frame_buffer(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.config.buffer_size()]
    }

    /// Zero the frame buffer
    pub fn clear(&mut self) {
        let size = self.config.buffer_size();
        self.buffer.as_mut()[..size].fill(0);
    }

    /// Set or clear one pixel; coordinates outside the matrix are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = self.locate(x, y) {
            let byte = &mut self.buffer.as_mut()[index];
            if on {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }

    /// Read one pixel; coordinates outside the matrix read as off
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .is_some_and(|(index, mask)| self.buffer.as_ref()[index] & mask != 0)
    }

    /// Set the 8 pixels of column `x` from `value`, LSB = top row
    pub fn set_column(&mut self, x: i32, mut value: u8) {
        for y in 0..SEGMENT_HEIGHT as i32 {
            self.set_pixel(x, y, value & 1 != 0);
            value >>= 1;
        }
    }

    /// Draw a sprite with its top-left corner at (x, y)
    ///
    /// Each sprite row is one byte, MSB = leftmost pixel. Every covered pixel
    /// is replaced, so zero bits clear what was underneath. Rows missing from
    /// `sprite` and pixels off the matrix are skipped.
    pub fn draw_sprite(&mut self, sprite: &[u8], x: i32, y: i32, width: i32, height: i32) {
        for (iy, &bits) in sprite.iter().enumerate().take(height.max(0) as usize) {
            for ix in 0..width {
                let mask = 0x80u8.checked_shr(ix as u32).unwrap_or(0);
                self.set_pixel(x + ix, y + iy as i32, bits & mask != 0);
            }
        }
    }

    /// Draw ASCII text in 8-pixel cells starting at (x, y)
    ///
    /// Drawing stops at the first cell whose left edge lies beyond the
    /// visible width; cells entirely to the left of the matrix are skipped.
    pub fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        let width = self.width();
        for (idx, code) in text.bytes().enumerate() {
            let cell_x = x + idx as i32 * GLYPH_SIZE;
            if cell_x > width {
                return;
            }
            if cell_x + GLYPH_SIZE > 0 {
                self.draw_sprite(font::glyph(code), cell_x, y, GLYPH_SIZE, GLYPH_SIZE);
            }
        }
    }

    /// Shift the whole frame buffer by one pixel
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let segments = self.config.segments as usize;
        let size = self.config.buffer_size();
        let buffer = &mut self.buffer.as_mut()[..size];

        match direction {
            ScrollDirection::Up => {
                buffer.copy_within(segments.., 0);
                buffer[size - segments..].fill(0);
            }
            ScrollDirection::Down => {
                buffer.copy_within(..size - segments, segments);
                buffer[..segments].fill(0);
            }
            ScrollDirection::Right => {
                // Carry is reset between rows
                for row in buffer.chunks_exact_mut(segments) {
                    let mut carry = 0u8;
                    for byte in row.iter_mut() {
                        let next = *byte & 0x01;
                        *byte = (carry << 7) | (*byte >> 1);
                        carry = next;
                    }
                }
            }
            ScrollDirection::Left => {
                for row in buffer.chunks_exact_mut(segments) {
                    let mut carry = 0u8;
                    for byte in row.iter_mut().rev() {
                        let next = *byte & 0x80;
                        *byte = (carry >> 7) | (*byte << 1);
                        carry = next;
                    }
                }
            }
        }
    }

    /// Push the whole frame buffer to the chain, one transaction per row
    pub fn display(&mut self) -> DisplayResult<I> {
        for row in 0..SEGMENT_HEIGHT {
            self.display_row(row)?;
        }
        Ok(())
    }

    /// Push one row of every segment in a single transaction
    ///
    /// Rows outside 0..8 are ignored.
    pub fn display_row(&mut self, row: u8) -> DisplayResult<I> {
        if row >= SEGMENT_HEIGHT {
            return Ok(());
        }

        let segments = self.config.segments;
        let orientation = self.config.orientation;
        let address = row_address(row, orientation);
        let base = row as usize * segments as usize;

        let mut words = [0u16; MAX_SEGMENTS as usize];
        for slot in 0..segments {
            let segment = segment_order(slot, segments, orientation);
            let data = segment_data(self.buffer.as_ref()[base + segment as usize], orientation);
            words[slot as usize] = command::row(address, data);
        }

        log::trace!("row {} -> address {}", row, address);
        self.interface
            .write_words(&words[..segments as usize])
            .map_err(Error::Interface)
    }

    /// Send the same word to every segment in one transaction
    fn broadcast(&mut self, word: u16) -> DisplayResult<I> {
        let words = [word; MAX_SEGMENTS as usize];
        self.interface
            .write_words(&words[..self.config.segments as usize])
            .map_err(Error::Interface)
    }

    /// Byte index and bit mask for a pixel, if it is on the matrix
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if !(0..SEGMENT_HEIGHT as i32).contains(&y) || !(0..self.width()).contains(&x) {
            return None;
        }
        let index = y as usize * self.config.segments as usize + (x >> 3) as usize;
        Some((index, 0x80 >> (x & 7)))
    }

    /// Release the interface and frame buffer
    pub fn release(self) -> (I, B) {
        (self.interface, self.buffer)
    }
}
