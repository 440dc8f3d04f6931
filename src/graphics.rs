//! Graphics support via embedded-graphics
//!
//! [`Matrix`] implements [`DrawTarget`] with [`BinaryColor`], so any
//! embedded-graphics primitive, font or image can be drawn into the frame
//! buffer. Pixels off the matrix are dropped, exactly like
//! [`Matrix::set_pixel`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle},
//! };
//! use matrix_informer::{Builder, Matrix, MatrixInterface};
//! # struct MockInterface;
//! # impl MatrixInterface for MockInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn write_words(&mut self, _words: &[u16]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let config = match Builder::new().segments(4).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let mut matrix = match Matrix::new(MockInterface, config, [0u8; 32]) {
//!     Ok(matrix) => matrix,
//!     Err(_) => return,
//! };
//!
//! let _ = Line::new(Point::new(0, 0), Point::new(31, 7))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut matrix);
//!
//! let _ = matrix.display();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::config::SEGMENT_HEIGHT;
use crate::display::Matrix;
use crate::interface::MatrixInterface;

impl<I, B> DrawTarget for Matrix<I, B>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.is_on());
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        if color.is_on() {
            let width = self.width();
            for x in 0..width {
                self.set_column(x, 0xFF);
            }
        } else {
            Matrix::clear(self);
        }
        Ok(())
    }
}

impl<I, B> OriginDimensions for Matrix<I, B>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(self.width() as u32, SEGMENT_HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use embedded_graphics::{
        prelude::*,
        primitives::{Line, PrimitiveStyle, Rectangle},
    };

    #[derive(Debug)]
    struct MockInterface;

    impl MatrixInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn write_words(&mut self, _words: &[u16]) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn test_matrix(segments: u8) -> Matrix<MockInterface, [u8; 32]> {
        let config = Builder::new().segments(segments).build().unwrap();
        Matrix::new(MockInterface, config, [0u8; 32]).unwrap()
    }

    #[test]
    fn test_size_matches_chain() {
        assert_eq!(test_matrix(4).size(), Size::new(32, 8));
        assert_eq!(test_matrix(1).size(), Size::new(8, 8));
    }

    #[test]
    fn test_line_sets_pixels() {
        let mut matrix = test_matrix(2);
        Line::new(Point::new(0, 3), Point::new(15, 3))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut matrix)
            .unwrap();
        assert_eq!(matrix.frame_buffer()[6], 0xFF);
        assert_eq!(matrix.frame_buffer()[7], 0xFF);
        assert!(!matrix.get_pixel(0, 2));
    }

    #[test]
    fn test_off_screen_primitives_are_clipped() {
        let mut matrix = test_matrix(1);
        Rectangle::new(Point::new(-4, -4), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut matrix)
            .unwrap();
        assert!(matrix.get_pixel(3, 3));
        assert!(!matrix.get_pixel(4, 3));
        assert!(!matrix.get_pixel(3, 4));
    }

    #[test]
    fn test_clear_fills_and_blanks() {
        let mut matrix = test_matrix(2);
        DrawTarget::clear(&mut matrix, BinaryColor::On).unwrap();
        assert!(matrix.frame_buffer().iter().all(|b| *b == 0xFF));
        DrawTarget::clear(&mut matrix, BinaryColor::Off).unwrap();
        assert!(matrix.frame_buffer().iter().all(|b| *b == 0));
    }
}
