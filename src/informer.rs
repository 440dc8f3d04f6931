//! Cooperative main loop
//!
//! [`Informer`] runs a [`Button`] and a [`Scheduler`] from one loop. Each
//! [`step`](Informer::step) samples the button, routes any gesture to the
//! scheduler and ticks the scheduler once its requested delay has passed. The
//! returned sleep is the time left until the next tick, shortened to
//! [`POLL_INTERVAL_MS`] while a gesture is in progress so a press shorter than
//! a refresh period is still debounced and counted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::InputPin;
//! use matrix_informer::{
//!     Builder, Button, ButtonTiming, Informer, Matrix, MatrixInterface, Scheduler,
//!     SchedulerTiming, SoftClock,
//! };
//! # use core::convert::Infallible;
//! # struct MockInterface;
//! # impl MatrixInterface for MockInterface {
//! #     type Error = Infallible;
//! #     fn write_words(&mut self, _words: &[u16]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # fn millis() -> u32 { 0 }
//! # fn sleep_ms(_ms: u32) {}
//! # let config = match Builder::new().segments(4).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! let matrix = match Matrix::new(MockInterface, config, [0u8; 32]) {
//!     Ok(matrix) => matrix,
//!     Err(_) => return,
//! };
//! let scheduler = Scheduler::new(matrix, SoftClock::new(), SchedulerTiming::default());
//! let button = Button::new(MockPin, ButtonTiming::default());
//! let mut informer = Informer::new(scheduler, button);
//! let _ = informer.scheduler_mut().init();
//!
//! loop {
//!     match informer.step(millis()) {
//!         Ok(sleep) => sleep_ms(sleep),
//!         Err(_) => break,
//!     }
//! }
//! ```

use embedded_hal::digital::InputPin;

use crate::button::{Button, POLL_INTERVAL_MS};
use crate::clock::TimeSource;
use crate::error::RunError;
use crate::interface::MatrixInterface;
use crate::scheduler::Scheduler;

/// Button and scheduler driven from one cooperative loop
pub struct Informer<I, B, C, P>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
    C: TimeSource,
    P: InputPin,
{
    scheduler: Scheduler<I, B, C>,
    button: Button<P>,
    /// Uptime of the last tick and the delay it requested
    last_tick: Option<(u32, u32)>,
}

impl<I, B, C, P> Informer<I, B, C, P>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
    C: TimeSource,
    P: InputPin,
{
    /// Combine a scheduler and a button; the first step ticks immediately
    pub fn new(scheduler: Scheduler<I, B, C>, button: Button<P>) -> Self {
        Self {
            scheduler,
            button,
            last_tick: None,
        }
    }

    /// Run one loop iteration at uptime `now_ms`
    ///
    /// Returns how long to sleep before the next step. A gesture forces an
    /// immediate tick so its effect shows without waiting out the delay.
    pub fn step(&mut self, now_ms: u32) -> Result<u32, RunError<I, P::Error>> {
        let gesture = self.button.poll(now_ms).map_err(RunError::Input)?;
        if let Some(gesture) = gesture {
            gesture.dispatch(&mut self.scheduler)?;
        }

        let due = match self.last_tick {
            Some((at, delay)) => gesture.is_some() || now_ms.wrapping_sub(at) >= delay,
            None => true,
        };
        let (at, delay) = match self.last_tick {
            Some(last) if !due => last,
            _ => {
                let delay = self.scheduler.tick(now_ms)?;
                self.last_tick = Some((now_ms, delay));
                (now_ms, delay)
            }
        };

        let until_tick = delay.saturating_sub(now_ms.wrapping_sub(at));
        if self.button.is_idle() {
            Ok(until_tick)
        } else {
            Ok(until_tick.min(POLL_INTERVAL_MS))
        }
    }

    /// The scheduler
    pub fn scheduler(&self) -> &Scheduler<I, B, C> {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for upstream commands
    pub fn scheduler_mut(&mut self) -> &mut Scheduler<I, B, C> {
        &mut self.scheduler
    }

    /// The button
    pub fn button(&self) -> &Button<P> {
        &self.button
    }

    /// Mutable access to the button
    pub fn button_mut(&mut self) -> &mut Button<P> {
        &mut self.button
    }

    /// Release the scheduler and button
    pub fn release(self) -> (Scheduler<I, B, C>, Button<P>) {
        (self.scheduler, self.button)
    }
}
