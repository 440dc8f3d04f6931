//! Hardware interface abstraction
//!
//! This module provides the [`MatrixInterface`] trait and the [`Interface`] struct
//! for shifting command words into a chain of MAX7219 controllers over SPI.
//!
//! ## Hardware Requirements
//!
//! The MAX7219 chain requires:
//! - SPI bus (MOSI + SCK), mode 0, MSB first, up to 10 MHz
//! - A chip-select (LOAD) line, held low for the whole transaction and
//!   released after the last word. With embedded-hal this is handled by the
//!   [`SpiDevice`] implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use matrix_informer::{Interface, MatrixInterface};
//! # use core::convert::Infallible;
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
//! let mut interface = Interface::new(MockSpi);
//!
//! // Same intensity word for a chain of four segments
//! let _ = interface.write_words(&[0x0A05; 4]);
//! ```

use core::fmt::Debug;
use embedded_hal::spi::SpiDevice;

use crate::error::MAX_SEGMENTS;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to a MAX7219 chain
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Matrix`](crate::display::Matrix) to work with any
/// transport able to clock 16-bit words into the chain.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. Implement this
/// trait yourself for bit-banged buses or for recording words in tests.
pub trait MatrixInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send one transaction to the chain
    ///
    /// `words` holds one 16-bit word per segment in transmission order. The
    /// first word is shifted through to the segment farthest from the
    /// controller. The implementation must:
    /// 1. Assert chip select (low)
    /// 2. Shift every word out MSB-first
    /// 3. Release chip select so the chips latch their word
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication fails.
    fn write_words(&mut self, words: &[u16]) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<SpiErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// More words than the largest supported chain
    TooManyWords {
        /// Number of words requested
        words: usize,
    },
}

impl<SpiErr: Debug> core::fmt::Display for InterfaceError<SpiErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::TooManyWords { words } => {
                write!(f, "Too many words: {words} (max {MAX_SEGMENTS})")
            }
        }
    }
}

impl<SpiErr: Debug> core::error::Error for InterfaceError<SpiErr> {}

/// Hardware interface implementation for a MAX7219 chain
///
/// Implements [`MatrixInterface`] for an embedded-hal v1.0 [`SpiDevice`].
/// The device owns chip select, so one [`SpiDevice::write`] call is exactly
/// one latched transaction.
pub struct Interface<SPI> {
    /// SPI device for communication
    spi: SPI,
}

impl<SPI> Interface<SPI>
where
    SPI: SpiDevice,
{
    /// Create a new Interface
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> MatrixInterface for Interface<SPI>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
{
    type Error = InterfaceError<SPI::Error>;

    fn write_words(&mut self, words: &[u16]) -> InterfaceResult<(), Self::Error> {
        let mut bytes = [0u8; 2 * MAX_SEGMENTS as usize];
        if words.len() > MAX_SEGMENTS as usize {
            return Err(InterfaceError::TooManyWords { words: words.len() });
        }

        for (chunk, word) in bytes.chunks_exact_mut(2).zip(words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        self.spi
            .write(&bytes[..2 * words.len()])
            .map_err(InterfaceError::Spi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use embedded_hal::spi::{ErrorType, Operation};

    #[derive(Debug, Default)]
    struct RecordingSpi {
        transactions: Vec<Vec<u8>>,
    }

    impl ErrorType for RecordingSpi {
        type Error = core::convert::Infallible;
    }

    impl SpiDevice for RecordingSpi {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            let mut bytes = Vec::new();
            for op in operations.iter() {
                if let Operation::Write(data) = op {
                    bytes.extend_from_slice(data);
                }
            }
            self.transactions.push(bytes);
            Ok(())
        }
    }

    #[test]
    fn test_words_are_sent_msb_first_in_one_transaction() {
        let mut interface = Interface::new(RecordingSpi::default());
        interface.write_words(&[0x0C01, 0x0A0F]).unwrap();

        let spi = interface.release();
        assert_eq!(spi.transactions.len(), 1);
        assert_eq!(spi.transactions[0], [0x0C, 0x01, 0x0A, 0x0F]);
    }

    #[test]
    fn test_each_call_is_a_separate_transaction() {
        let mut interface = Interface::new(RecordingSpi::default());
        interface.write_words(&[0x0F00; 3]).unwrap();
        interface.write_words(&[0x0900; 3]).unwrap();

        let spi = interface.release();
        assert_eq!(spi.transactions.len(), 2);
        assert_eq!(spi.transactions[1], [0x09, 0x00, 0x09, 0x00, 0x09, 0x00]);
    }

    #[test]
    fn test_oversized_chain_is_rejected() {
        let mut interface = Interface::new(RecordingSpi::default());
        let words = [0u16; MAX_SEGMENTS as usize + 1];
        let result = interface.write_words(&words);
        assert!(matches!(
            result,
            Err(InterfaceError::TooManyWords { words: 33 })
        ));
        assert!(interface.release().transactions.is_empty());
    }

    struct FailingSpi;

    impl ErrorType for FailingSpi {
        type Error = embedded_hal::spi::ErrorKind;
    }

    impl SpiDevice for FailingSpi {
        fn transaction(
            &mut self,
            _operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            Err(embedded_hal::spi::ErrorKind::Overrun)
        }
    }

    #[test]
    fn test_spi_failure_is_wrapped() {
        let mut interface = Interface::new(FailingSpi);
        let result = interface.write_words(&[0x0C01]);
        assert!(matches!(
            result,
            Err(InterfaceError::Spi(embedded_hal::spi::ErrorKind::Overrun))
        ));
    }
}
