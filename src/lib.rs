//! MAX7219 LED Matrix Informer
//!
//! A driver and display scheduler for horizontally chained MAX7219 8x8 LED
//! matrix segments: a clock, a rotation of user-defined screens and a queue of
//! notifications, controlled by a single push button.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Up to 32 chained segments with independent orientation flags
//! - Debounced click, double click, triple click and press-and-hold detection
//! - Notification queue and screen rotation (with `alloc` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use matrix_informer::{Builder, Interface, Matrix, Orientation};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # let spi = MockSpi;
//! let interface = Interface::new(spi);
//! let config = match Builder::new()
//!     .segments(4)
//!     .orientation(Orientation::from_bits(Orientation::INVERT_Y))
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut matrix = match Matrix::new(interface, config, [0u8; 32]) {
//!     Ok(matrix) => matrix,
//!     Err(_) => return,
//! };
//! let _ = matrix.init();
//! let _ = matrix.set_enabled(true);
//! matrix.draw_string("Hi!", 4, 0);
//! let _ = matrix.display();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Push-button gesture detection
pub mod button;
/// Wall-clock time source
pub mod clock;
/// MAX7219 command words
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Expiring timers
pub mod deadline;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// 8x8 ASCII font
pub mod font;
/// Hardware interface abstraction
pub mod interface;
/// Row and segment orientation transforms
pub mod orientation;

/// Notification and screen content (requires `alloc` feature)
#[cfg(feature = "alloc")]
pub mod content;
/// Cooperative main loop (requires `alloc` feature)
#[cfg(feature = "alloc")]
pub mod informer;
/// Upstream command and status payloads (requires `alloc` feature)
#[cfg(feature = "alloc")]
pub mod message;
/// Display scheduler (requires `alloc` feature)
#[cfg(feature = "alloc")]
pub mod scheduler;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use button::{Button, ButtonState, ButtonTiming, Gesture, GestureHandler, POLL_INTERVAL_MS};
pub use clock::{DateTime, SoftClock, TimeSource};
pub use config::{Builder, Config, Orientation, SEGMENT_HEIGHT, SEGMENT_WIDTH};
pub use deadline::Deadline;
pub use display::{Matrix, ScrollDirection};
pub use error::{BuilderError, Error, MAX_SEGMENTS, RunError};
pub use interface::{Interface, InterfaceError, MatrixInterface};

#[cfg(feature = "alloc")]
pub use content::{Icon, Notification, Screen};
#[cfg(feature = "alloc")]
pub use informer::Informer;
#[cfg(feature = "alloc")]
pub use message::{
    Message, NotificationMessage, ScreenMessage, SettingsMessage, Status, TimeMessage, Uptime,
};
#[cfg(feature = "alloc")]
pub use scheduler::{DEFAULT_BRIGHTNESS, DisplayMode, Scheduler, SchedulerTiming};
