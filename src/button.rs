//! Push-button gesture detection
//!
//! [`Button`] samples one digital input per call to [`Button::poll`] and
//! turns the debounced level changes into [`Gesture`]s: single, double and
//! triple clicks, and press-and-hold.
//!
//! ## Timing
//!
//! - A level change must persist for the debounce window before it counts.
//! - Clicks are only reported once no new press has started within the
//!   multi-click window of the last press, so a double click never shows up
//!   as a single click first.
//! - Holding the button fires [`Gesture::PressAndHold`] every hold interval
//!   and suppresses the click that would otherwise follow the release. The
//!   held press still counts toward the next click sequence.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::InputPin;
//! use matrix_informer::{Button, ButtonTiming, Gesture};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # fn millis() -> u32 { 0 }
//! let mut button = Button::new(MockPin, ButtonTiming::default());
//!
//! if let Ok(Some(gesture)) = button.poll(millis()) {
//!     match gesture {
//!         Gesture::Click => { /* next screen */ }
//!         Gesture::PressAndHold => { /* toggle power */ }
//!         _ => {}
//!     }
//! }
//! ```

use embedded_hal::digital::InputPin;

/// Recommended polling period while a gesture is in progress
pub const POLL_INTERVAL_MS: u32 = 10;

/// Gesture timing parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonTiming {
    /// How long a level change must persist to be accepted
    pub debounce_ms: u32,
    /// Quiet period after a press start before clicks are reported
    pub multi_click_ms: u32,
    /// Hold duration that fires (and re-fires) press-and-hold
    pub press_and_hold_ms: u32,
    /// A single click must be held longer than this to count
    pub min_click_ms: u32,
    /// Pin level that means "pressed"
    pub active_high: bool,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            multi_click_ms: 500,
            press_and_hold_ms: 3000,
            min_click_ms: 150,
            active_high: true,
        }
    }
}

/// Gestures reported by [`Button::poll`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    /// One press held longer than the minimum click duration
    Click,
    /// Two presses within the multi-click window
    DoubleClick,
    /// Three presses within the multi-click window
    TripleClick,
    /// Button held for the press-and-hold interval (repeats while held)
    PressAndHold,
}

impl Gesture {
    /// Invoke the handler method matching this gesture
    pub fn dispatch<H: GestureHandler>(self, handler: &mut H) -> Result<(), H::Error> {
        match self {
            Self::Click => handler.clicked(),
            Self::DoubleClick => handler.double_clicked(),
            Self::TripleClick => handler.triple_clicked(),
            Self::PressAndHold => handler.press_and_hold(),
        }
    }
}

/// Receiver for button gestures, one method per gesture
///
/// Every method defaults to doing nothing, so implementors only override the
/// gestures they care about.
pub trait GestureHandler {
    /// Error returned by the handler
    type Error;

    /// Single click
    fn clicked(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Double click
    fn double_clicked(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Triple click
    fn triple_clicked(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Press and hold
    fn press_and_hold(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Observable detector state
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonState {
    /// Released, nothing pending
    Idle,
    /// Level change seen, waiting for it to settle
    Debouncing,
    /// Held down
    Pressed,
    /// Held down after press-and-hold fired
    PressAndHoldFired,
    /// Released, waiting for the multi-click window to close
    AwaitingMultiClick,
}

/// Debounced multi-gesture push button
pub struct Button<P> {
    pin: P,
    timing: ButtonTiming,
    /// Debounced level
    pressed: bool,
    /// Start of the pending level change
    debounce_since: Option<u32>,
    press_start_ms: u32,
    press_length_ms: u32,
    /// Reference point for press-and-hold, cleared on release
    hold_anchor_ms: Option<u32>,
    hold_fired: bool,
    click_count: u8,
    /// Next press starts a new click sequence
    reset_count: bool,
    /// Released and waiting to report clicks
    ready: bool,
}

impl<P> Button<P>
where
    P: InputPin,
{
    /// Create a detector; the button is assumed released
    pub fn new(pin: P, timing: ButtonTiming) -> Self {
        Self {
            pin,
            timing,
            pressed: false,
            debounce_since: None,
            press_start_ms: 0,
            press_length_ms: 0,
            hold_anchor_ms: None,
            hold_fired: false,
            click_count: 0,
            reset_count: true,
            ready: false,
        }
    }

    /// Sample the pin at `now_ms` and advance the state machine
    ///
    /// Returns at most one gesture per call.
    pub fn poll(&mut self, now_ms: u32) -> Result<Option<Gesture>, P::Error> {
        let level = if self.timing.active_high {
            self.pin.is_high()?
        } else {
            self.pin.is_low()?
        };

        if level != self.pressed {
            match self.debounce_since {
                None => self.debounce_since = Some(now_ms),
                Some(since) if now_ms.wrapping_sub(since) >= self.timing.debounce_ms => {
                    self.debounce_since = None;
                    self.commit(level, now_ms);
                }
                Some(_) => {}
            }
        } else if self.debounce_since.take().is_some() {
            log::trace!("button: bounce discarded");
        }

        if let Some(anchor) = self.hold_anchor_ms {
            if !self.ready && now_ms.wrapping_sub(anchor) > self.timing.press_and_hold_ms {
                log::debug!("button: press and hold");
                self.hold_anchor_ms = Some(now_ms);
                self.hold_fired = true;
                return Ok(Some(Gesture::PressAndHold));
            }
        }

        if self.ready
            && !self.hold_fired
            && now_ms.wrapping_sub(self.press_start_ms) > self.timing.multi_click_ms
        {
            return Ok(self.finalize());
        }

        Ok(None)
    }

    /// Current detector state
    pub fn state(&self) -> ButtonState {
        if self.debounce_since.is_some() {
            ButtonState::Debouncing
        } else if self.pressed && self.hold_fired {
            ButtonState::PressAndHoldFired
        } else if self.pressed {
            ButtonState::Pressed
        } else if self.ready && !self.hold_fired {
            ButtonState::AwaitingMultiClick
        } else {
            ButtonState::Idle
        }
    }

    /// Whether nothing is in progress, so polling may slow down
    pub fn is_idle(&self) -> bool {
        self.state() == ButtonState::Idle
    }

    /// Mutable access to the input pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Release the input pin
    pub fn release(self) -> P {
        self.pin
    }

    fn commit(&mut self, pressed: bool, now_ms: u32) {
        self.pressed = pressed;
        if pressed {
            self.press_start_ms = now_ms;
            self.hold_anchor_ms = Some(now_ms);
            self.hold_fired = false;
            self.press_length_ms = 0;
            if self.reset_count {
                self.click_count = 1;
                self.reset_count = false;
            } else {
                self.click_count = self.click_count.saturating_add(1);
            }
            self.ready = false;
        } else {
            self.press_length_ms = now_ms.wrapping_sub(self.press_start_ms);
            self.hold_anchor_ms = None;
            self.ready = true;
        }
    }

    fn finalize(&mut self) -> Option<Gesture> {
        self.ready = false;
        self.reset_count = true;

        log::debug!(
            "button: click duration {}ms, count {}",
            self.press_length_ms,
            self.click_count
        );

        match self.click_count {
            1 if self.press_length_ms > self.timing.min_click_ms => Some(Gesture::Click),
            2 => Some(Gesture::DoubleClick),
            3 => Some(Gesture::TripleClick),
            _ => None,
        }
    }
}
