//! Display scheduler
//!
//! [`Scheduler`] decides what the matrix shows: the clock, a rotation of
//! user-defined screens, or the head of a notification queue. It is driven by
//! a cooperative loop that calls [`Scheduler::tick`] and sleeps for the delay
//! it returns. [`Informer`](crate::informer::Informer) runs that loop together
//! with a [`Button`](crate::button::Button).
//!
//! ## Modes
//!
//! - `Clock` is the resting mode while powered on.
//! - A click from `Clock` starts `ScreenCycle`; each further click advances,
//!   and the cycle ends after the last screen or when its timer runs out.
//! - A queued notification pre-empts everything until the queue drains,
//!   either by per-notification timeout or by clicks.
//! - `Off` blanks and shuts down the chain; a notification arriving while off
//!   is still shown, after which the display returns to `Off`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use matrix_informer::{
//!     Builder, Matrix, MatrixInterface, Notification, Scheduler, SchedulerTiming, SoftClock,
//! };
//! # struct MockInterface;
//! # impl MatrixInterface for MockInterface {
//! #     type Error = core::convert::Infallible;
//! #     fn write_words(&mut self, _words: &[u16]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # fn millis() -> u32 { 0 }
//! # fn sleep_ms(_ms: u32) {}
//! # fn run() -> Result<(), matrix_informer::Error<MockInterface>> {
//! # let config = match Builder::new().segments(4).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return Ok(()),
//! # };
//! let matrix = Matrix::new(MockInterface, config, [0u8; 32])?;
//! let mut scheduler = Scheduler::new(matrix, SoftClock::new(), SchedulerTiming::default());
//! scheduler.init()?;
//!
//! scheduler.set_notification(Notification::new(None, "Hello", 5))?;
//! loop {
//!     let delay = scheduler.tick(millis())?;
//!     sleep_ms(delay);
//! }
//! # }
//! ```

use alloc::{collections::VecDeque, vec::Vec};

use crate::button::GestureHandler;
use crate::clock::{DateTime, TimeSource};
use crate::command::MAX_INTENSITY;
use crate::content::{Icon, Notification, Screen};
use crate::deadline::Deadline;
use crate::display::Matrix;
use crate::error::Error;
use crate::font::GLYPH_SIZE;
use crate::interface::MatrixInterface;
use crate::message::{Message, SettingsMessage, Status};

type SchedulerResult<I> = core::result::Result<(), Error<I>>;

/// Brightness applied until a settings command says otherwise
pub const DEFAULT_BRIGHTNESS: u8 = 5;

/// Timer and refresh parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SchedulerTiming {
    /// Screen cycle falls back to the clock after this long without a click
    pub screen_timeout_ms: u32,
    /// Delay between scroll steps
    pub scroll_step_ms: u32,
    /// Delay while centered text is held still
    pub static_ms: u32,
    /// Delay while the clock is shown
    pub clock_ms: u32,
    /// Delay while powered off
    pub off_ms: u32,
}

impl Default for SchedulerTiming {
    fn default() -> Self {
        Self {
            screen_timeout_ms: 6000,
            scroll_step_ms: 50,
            static_ms: 300,
            clock_ms: 500,
            off_ms: 1000,
        }
    }
}

/// Active content source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Blank and shut down
    Off,
    /// Time of day
    Clock,
    /// Rotating user screens
    ScreenCycle,
    /// Head of the notification queue
    Notification,
}

/// Mode state machine over a [`Matrix`]
pub struct Scheduler<I, B, C>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
    C: TimeSource,
{
    matrix: Matrix<I, B>,
    clock: C,
    timing: SchedulerTiming,
    mode: DisplayMode,
    notifications: VecDeque<Notification>,
    screens: Vec<Screen>,
    screen_index: usize,
    /// Left edge of scrolling text
    cursor: i32,
    state: bool,
    brightness: u8,
    seconds_visible: bool,
    /// Return to `Off` once the notification queue drains
    switch_off_after_notification: bool,
    notification_deadline: Deadline,
    screen_deadline: Deadline,
}

impl<I, B, C> Scheduler<I, B, C>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
    C: TimeSource,
{
    /// Create a scheduler showing the clock, powered on at the default brightness
    ///
    /// Nothing is sent to the chain until [`init`](Self::init).
    pub fn new(matrix: Matrix<I, B>, clock: C, timing: SchedulerTiming) -> Self {
        Self {
            matrix,
            clock,
            timing,
            mode: DisplayMode::Clock,
            notifications: VecDeque::new(),
            screens: Vec::new(),
            screen_index: 0,
            cursor: 0,
            state: true,
            brightness: DEFAULT_BRIGHTNESS,
            seconds_visible: true,
            switch_off_after_notification: false,
            notification_deadline: Deadline::new(),
            screen_deadline: Deadline::new(),
        }
    }

    /// Initialize the chain and apply the current power and brightness
    pub fn init(&mut self) -> SchedulerResult<I> {
        self.matrix.init()?;
        self.matrix.set_brightness(self.brightness)?;
        self.matrix.set_enabled(self.state)?;
        self.matrix.clear();
        self.matrix.display()
    }

    /// Render the active mode, flush it and expire timers
    ///
    /// Returns the recommended delay in milliseconds before the next call.
    pub fn tick(&mut self, now_ms: u32) -> Result<u32, Error<I>> {
        let delay = match self.mode {
            DisplayMode::Off => self.timing.off_ms,
            DisplayMode::Clock => self.draw_clock(now_ms),
            DisplayMode::ScreenCycle => match self.screens.get(self.screen_index) {
                Some(screen) => {
                    let scrolled = draw_content(
                        &mut self.matrix,
                        &mut self.cursor,
                        screen.icon.as_ref(),
                        &screen.text,
                    );
                    self.content_delay(scrolled)
                }
                None => self.timing.static_ms,
            },
            DisplayMode::Notification => match self.notifications.front() {
                Some(notification) => {
                    let scrolled = draw_content(
                        &mut self.matrix,
                        &mut self.cursor,
                        notification.icon.as_ref(),
                        &notification.text,
                    );
                    self.content_delay(scrolled)
                }
                None => self.timing.static_ms,
            },
        };

        if self.mode != DisplayMode::Off {
            self.matrix.display()?;
        }

        if self.notification_deadline.expired(now_ms) {
            log::debug!("notification timed out");
            self.dismiss_notification()?;
        }
        if self.screen_deadline.expired(now_ms) {
            log::debug!("screen cycle timed out");
            self.dismiss_screen();
        }

        Ok(delay)
    }

    /// Set the wall-clock time as of uptime `now_ms`
    ///
    /// Out-of-range time fields are clamped.
    pub fn set_time(&mut self, time: DateTime, now_ms: u32) {
        let time = DateTime::new(
            time.year,
            time.month,
            time.day,
            time.hour,
            time.minute,
            time.second,
        );
        log::debug!(
            "time set to {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            time.year,
            time.month,
            time.day,
            time.hour,
            time.minute,
            time.second
        );
        self.clock.set(time, now_ms);
    }

    /// Queue a notification, showing it at once if the queue was empty
    pub fn set_notification(&mut self, notification: Notification) -> SchedulerResult<I> {
        let was_empty = self.notifications.is_empty();
        self.notifications.push_back(notification);
        log::debug!("notification queued, {} pending", self.notifications.len());

        if was_empty {
            if !self.state {
                self.switch_off_after_notification = true;
                self.matrix.set_enabled(true)?;
            }
            self.screen_deadline.disarm();
            self.enter(DisplayMode::Notification);
            self.arm_notification();
        }
        Ok(())
    }

    /// Insert a screen, or replace the one with the same id in place
    pub fn set_screen(&mut self, screen: Screen) {
        match self.screens.iter().position(|s| s.id == screen.id) {
            Some(index) => {
                log::debug!("screen {} updated", screen.id);
                self.screens[index] = screen;
                if self.mode == DisplayMode::ScreenCycle && self.screen_index == index {
                    self.enter(DisplayMode::ScreenCycle);
                }
            }
            None => {
                log::debug!("screen {} added", screen.id);
                self.screens.push(screen);
            }
        }
    }

    /// Switch power on or off
    ///
    /// Switching off while a notification is shown lets the queue drain first.
    pub fn set_state(&mut self, on: bool) -> SchedulerResult<I> {
        log::info!("power {}", if on { "on" } else { "off" });
        self.state = on;

        if on {
            self.switch_off_after_notification = false;
            self.matrix.set_enabled(true)?;
            if self.mode == DisplayMode::Off {
                self.enter(DisplayMode::Clock);
            }
            return Ok(());
        }

        if self.mode == DisplayMode::Notification {
            self.switch_off_after_notification = true;
            Ok(())
        } else {
            self.power_off()
        }
    }

    /// Set intensity 0..=15; higher levels are ignored
    pub fn set_brightness(&mut self, level: u8) -> SchedulerResult<I> {
        if level > MAX_INTENSITY {
            log::debug!("brightness {} ignored", level);
            return Ok(());
        }
        self.brightness = level;
        self.matrix.set_brightness(level)
    }

    /// Show or hide seconds on the clock
    pub fn set_seconds_visible(&mut self, visible: bool) {
        if self.seconds_visible != visible {
            self.seconds_visible = visible;
            if self.mode == DisplayMode::Clock {
                self.enter(DisplayMode::Clock);
            }
        }
    }

    /// Single click: dismiss, start or advance the screen cycle
    pub fn button_clicked(&mut self) -> SchedulerResult<I> {
        log::debug!("click in {:?}", self.mode);
        match self.mode {
            DisplayMode::Notification => self.dismiss_notification()?,
            DisplayMode::Clock if !self.screens.is_empty() => {
                self.screen_index = 0;
                self.show_screen();
            }
            DisplayMode::ScreenCycle if self.screen_index + 1 < self.screens.len() => {
                self.screen_index += 1;
                self.show_screen();
            }
            DisplayMode::ScreenCycle => self.dismiss_screen(),
            DisplayMode::Clock | DisplayMode::Off => {}
        }
        Ok(())
    }

    /// Press and hold: toggle power
    pub fn button_press_and_hold(&mut self) -> SchedulerResult<I> {
        log::debug!("press and hold");
        self.set_state(!self.state)
    }

    /// Apply a decoded upstream command received at uptime `now_ms`,
    /// ignoring invalid fields
    pub fn apply(&mut self, message: Message, now_ms: u32) -> SchedulerResult<I> {
        match message {
            Message::Notification(notification) => {
                self.set_notification(notification.into_notification())
            }
            Message::Settings(settings) => self.apply_settings(settings),
            Message::Time(time) => {
                match time.date_time() {
                    Some(time) => self.set_time(time, now_ms),
                    None => log::debug!("incomplete or invalid time ignored"),
                }
                Ok(())
            }
            Message::Screen(screen) => {
                match screen.into_screen() {
                    Some(screen) => self.set_screen(screen),
                    None => log::debug!("screen without id ignored"),
                }
                Ok(())
            }
        }
    }

    /// Snapshot for the status topic
    pub fn status(&self, uptime_ms: u32) -> Status {
        Status {
            state: self.state,
            brightness: self.brightness,
            seconds_visible: self.seconds_visible,
            uptime_ms,
        }
    }

    /// Active mode
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Power state
    pub fn state(&self) -> bool {
        self.state
    }

    /// Current intensity
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Whether the clock shows seconds
    pub fn seconds_visible(&self) -> bool {
        self.seconds_visible
    }

    /// Number of queued notifications, including the one on display
    pub fn pending_notifications(&self) -> usize {
        self.notifications.len()
    }

    /// Number of screens in the rotation
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// The driven matrix
    pub fn matrix(&self) -> &Matrix<I, B> {
        &self.matrix
    }

    /// Release the matrix and time source
    pub fn release(self) -> (Matrix<I, B>, C) {
        (self.matrix, self.clock)
    }

    fn apply_settings(&mut self, settings: SettingsMessage) -> SchedulerResult<I> {
        if let Some(level) = settings.brightness {
            self.set_brightness(level)?;
        }
        if let Some(on) = settings.state {
            self.set_state(on)?;
        }
        if let Some(visible) = settings.seconds_visible {
            self.set_seconds_visible(visible);
        }
        Ok(())
    }

    /// Switch mode, clearing the frame and restarting the scroll cursor
    fn enter(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            log::info!("mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        self.matrix.clear();
        self.cursor = if self.active_icon().is_some() {
            GLYPH_SIZE
        } else {
            0
        };
    }

    fn active_icon(&self) -> Option<&Icon> {
        match self.mode {
            DisplayMode::Notification => self.notifications.front()?.icon.as_ref(),
            DisplayMode::ScreenCycle => self.screens.get(self.screen_index)?.icon.as_ref(),
            DisplayMode::Off | DisplayMode::Clock => None,
        }
    }

    fn show_screen(&mut self) {
        self.enter(DisplayMode::ScreenCycle);
        self.screen_deadline.arm(self.timing.screen_timeout_ms);
    }

    fn arm_notification(&mut self) {
        match self.notifications.front().and_then(|n| n.timeout_secs) {
            Some(secs) => self.notification_deadline.arm(secs.saturating_mul(1000)),
            None => self.notification_deadline.disarm(),
        }
    }

    fn dismiss_notification(&mut self) -> SchedulerResult<I> {
        if self.notifications.pop_front().is_none() {
            return Ok(());
        }
        log::debug!("notification dismissed, {} pending", self.notifications.len());

        if !self.notifications.is_empty() {
            self.enter(DisplayMode::Notification);
            self.arm_notification();
            return Ok(());
        }

        self.notification_deadline.disarm();
        if self.switch_off_after_notification {
            self.switch_off_after_notification = false;
            self.power_off()
        } else {
            self.enter(DisplayMode::Clock);
            Ok(())
        }
    }

    fn dismiss_screen(&mut self) {
        if !self.screens.is_empty() {
            self.screen_index = (self.screen_index + 1) % self.screens.len();
        }
        self.screen_deadline.disarm();
        if self.notifications.is_empty() {
            self.enter(DisplayMode::Clock);
        } else {
            self.enter(DisplayMode::Notification);
        }
    }

    fn power_off(&mut self) -> SchedulerResult<I> {
        self.screen_deadline.disarm();
        self.enter(DisplayMode::Off);
        self.matrix.display()?;
        self.matrix.set_enabled(false)
    }

    fn draw_clock(&mut self, now_ms: u32) -> u32 {
        let time = self.clock.now(now_ms);
        let mut buf = [b' '; 8];
        let text = clock_text(&time, self.seconds_visible, &mut buf);
        if draw_content(&mut self.matrix, &mut self.cursor, None, text) {
            self.timing.scroll_step_ms
        } else {
            self.timing.clock_ms
        }
    }

    fn content_delay(&self, scrolled: bool) -> u32 {
        if scrolled {
            self.timing.scroll_step_ms
        } else {
            self.timing.static_ms
        }
    }
}

impl<I, B, C> GestureHandler for Scheduler<I, B, C>
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
    C: TimeSource,
{
    type Error = Error<I>;

    fn clicked(&mut self) -> Result<(), Self::Error> {
        self.button_clicked()
    }

    fn press_and_hold(&mut self) -> Result<(), Self::Error> {
        self.button_press_and_hold()
    }
}

/// Draw text with an optional icon in the leftmost cell
///
/// Text that fits in the cells beside the icon is centered. Longer text is
/// drawn at `cursor`, which then steps one pixel left and wraps back to the
/// right edge once the text has scrolled out. Returns whether it scrolled.
fn draw_content<I, B>(
    matrix: &mut Matrix<I, B>,
    cursor: &mut i32,
    icon: Option<&Icon>,
    text: &str,
) -> bool
where
    I: MatrixInterface,
    B: AsMut<[u8]> + AsRef<[u8]>,
{
    let icon_cells = i32::from(icon.is_some());
    let available = matrix.segments() as i32 - icon_cells;
    let len = text.len() as i32;

    matrix.clear();
    let scrolled = len > available;
    if scrolled {
        matrix.draw_string(text, *cursor, 0);
        *cursor -= 1;
        if *cursor < -(len * GLYPH_SIZE) {
            *cursor = matrix.width() - GLYPH_SIZE;
        }
    } else {
        let x = (available - len) * GLYPH_SIZE / 2 + GLYPH_SIZE * icon_cells;
        matrix.draw_string(text, x, 0);
    }

    if let Some(icon) = icon {
        matrix.draw_sprite(icon.rows(), 0, 0, GLYPH_SIZE, GLYPH_SIZE);
    }
    scrolled
}

/// `HH:MM:SS`, or `HH:MM` with the colon shown on even seconds
fn clock_text<'a>(time: &DateTime, seconds_visible: bool, buf: &'a mut [u8; 8]) -> &'a str {
    put_two_digits(&mut buf[0..2], time.hour);
    put_two_digits(&mut buf[3..5], time.minute);
    let len = if seconds_visible {
        buf[2] = b':';
        buf[5] = b':';
        put_two_digits(&mut buf[6..8], time.second);
        8
    } else {
        buf[2] = if time.second % 2 == 0 { b':' } else { b' ' };
        5
    };
    core::str::from_utf8(&buf[..len]).unwrap_or_default()
}

fn put_two_digits(out: &mut [u8], value: u8) {
    out[0] = b'0' + value / 10 % 10;
    out[1] = b'0' + value % 10;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::Gesture;
    use crate::clock::SoftClock;
    use crate::command;
    use crate::config::Builder;
    use crate::message::{NotificationMessage, ScreenMessage, TimeMessage};
    use alloc::{string::String, vec, vec::Vec};

    #[derive(Debug, Default)]
    struct MockInterface {
        transactions: Vec<Vec<u16>>,
    }

    impl MatrixInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn write_words(&mut self, words: &[u16]) -> Result<(), Self::Error> {
            self.transactions.push(words.to_vec());
            Ok(())
        }
    }

    type TestScheduler = Scheduler<MockInterface, [u8; 64], SoftClock>;

    fn test_matrix(segments: u8) -> Matrix<MockInterface, [u8; 64]> {
        let config = Builder::new().segments(segments).build().unwrap();
        Matrix::new(MockInterface::default(), config, [0u8; 64]).unwrap()
    }

    fn test_scheduler(segments: u8) -> TestScheduler {
        let mut scheduler = Scheduler::new(
            test_matrix(segments),
            SoftClock::new(),
            SchedulerTiming::default(),
        );
        scheduler.init().unwrap();
        scheduler
    }

    fn expected_frame(segments: u8, text: &str, x: i32, icon: Option<&Icon>) -> Vec<u8> {
        let mut matrix = test_matrix(segments);
        matrix.draw_string(text, x, 0);
        if let Some(icon) = icon {
            matrix.draw_sprite(icon.rows(), 0, 0, 8, 8);
        }
        matrix.frame_buffer().to_vec()
    }

    fn last_word(scheduler: &TestScheduler, mask: u16) -> Option<u16> {
        scheduler
            .matrix
            .interface()
            .transactions
            .iter()
            .rev()
            .map(|t| t[0])
            .find(|w| w & 0xFF00 == mask)
    }

    fn front_text(scheduler: &TestScheduler) -> &str {
        &scheduler.notifications.front().unwrap().text
    }

    #[test]
    fn test_defaults() {
        let scheduler = test_scheduler(4);
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
        assert!(scheduler.state());
        assert_eq!(scheduler.brightness(), 5);
        assert!(scheduler.seconds_visible());
        assert!(scheduler.matrix().is_enabled());
        assert_eq!(last_word(&scheduler, command::CMD_INTENSITY), Some(0x0A05));
    }

    #[test]
    fn test_hello_is_centered() {
        let mut scheduler = test_scheduler(8);
        scheduler
            .set_notification(Notification::new(None, "HELLO", 0))
            .unwrap();
        let delay = scheduler.tick(0).unwrap();
        assert_eq!(delay, 300);
        assert_eq!(scheduler.matrix().frame_buffer(), &expected_frame(8, "HELLO", 12, None)[..]);
    }

    #[test]
    fn test_icon_shifts_centered_text() {
        let mut scheduler = test_scheduler(4);
        let icon = Icon([0xFF; 8]);
        scheduler
            .set_notification(Notification::new(Some(icon), "A", 0))
            .unwrap();
        scheduler.tick(0).unwrap();
        // 3 free cells: (3 - 1) * 8 / 2 + 8
        assert_eq!(
            scheduler.matrix().frame_buffer(),
            &expected_frame(4, "A", 16, Some(&icon))[..]
        );
    }

    #[test]
    fn test_centering_uses_half_cells() {
        let mut scheduler = test_scheduler(4);
        scheduler
            .set_notification(Notification::new(None, "ABC", 0))
            .unwrap();
        scheduler.tick(0).unwrap();
        // One spare cell split across both sides
        assert_eq!(scheduler.matrix().frame_buffer(), &expected_frame(4, "ABC", 4, None)[..]);
    }

    #[test]
    fn test_long_text_scrolls_and_wraps() {
        let mut scheduler = test_scheduler(4);
        scheduler
            .set_notification(Notification::new(None, "ABCDE", 0))
            .unwrap();
        assert_eq!(scheduler.cursor, 0);

        assert_eq!(scheduler.tick(0).unwrap(), 50);
        assert_eq!(scheduler.matrix().frame_buffer(), &expected_frame(4, "ABCDE", 0, None)[..]);
        assert_eq!(scheduler.cursor, -1);

        for step in 1..=40 {
            scheduler.tick(step * 50).unwrap();
        }
        assert_eq!(scheduler.cursor, 24);
    }

    #[test]
    fn test_scrolling_text_starts_after_icon() {
        let mut scheduler = test_scheduler(2);
        let icon = Icon([0x81; 8]);
        scheduler.set_screen(Screen::new(1, Some(icon), "LONG"));
        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.cursor, 8);
        scheduler.tick(0).unwrap();
        assert_eq!(
            scheduler.matrix().frame_buffer(),
            &expected_frame(2, "LONG", 8, Some(&icon))[..]
        );
    }

    #[test]
    fn test_notifications_are_fifo() {
        let mut scheduler = test_scheduler(4);
        for text in ["one", "two", "three"] {
            scheduler
                .set_notification(Notification::new(None, text, 0))
                .unwrap();
        }
        assert_eq!(scheduler.pending_notifications(), 3);

        let mut shown = Vec::new();
        while scheduler.mode() == DisplayMode::Notification {
            shown.push(String::from(front_text(&scheduler)));
            scheduler.button_clicked().unwrap();
        }
        assert_eq!(shown, vec!["one", "two", "three"]);
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
    }

    #[test]
    fn test_notification_timeout_returns_to_clock() {
        let mut scheduler = test_scheduler(8);
        scheduler
            .set_notification(Notification::new(None, "Hi", 5))
            .unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Notification);

        let mut now = 0;
        while now < 5000 {
            now += scheduler.tick(now).unwrap();
            if now < 5000 {
                assert_eq!(scheduler.mode(), DisplayMode::Notification);
            }
        }
        scheduler.tick(now).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
        assert_eq!(scheduler.pending_notifications(), 0);
    }

    #[test]
    fn test_each_notification_gets_its_own_timeout() {
        let mut scheduler = test_scheduler(8);
        scheduler
            .set_notification(Notification::new(None, "a", 1))
            .unwrap();
        scheduler
            .set_notification(Notification::new(None, "b", 2))
            .unwrap();

        scheduler.tick(0).unwrap();
        scheduler.tick(1000).unwrap();
        assert_eq!(front_text(&scheduler), "b");
        // The countdown for "b" starts at the next tick
        scheduler.tick(2000).unwrap();
        scheduler.tick(3999).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Notification);
        scheduler.tick(4000).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
    }

    #[test]
    fn test_power_off_waits_for_notification() {
        let mut scheduler = test_scheduler(4);
        scheduler
            .set_notification(Notification::new(None, "x", 0))
            .unwrap();
        scheduler.set_state(false).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Notification);
        assert!(scheduler.matrix().is_enabled());

        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Off);
        assert!(!scheduler.matrix().is_enabled());
        assert!(scheduler.matrix().frame_buffer().iter().all(|b| *b == 0));
    }

    #[test]
    fn test_notification_while_off_returns_to_off() {
        let mut scheduler = test_scheduler(4);
        scheduler.set_state(false).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Off);
        assert_eq!(scheduler.tick(0).unwrap(), 1000);

        scheduler
            .set_notification(Notification::new(None, "x", 0))
            .unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Notification);
        assert!(scheduler.matrix().is_enabled());

        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Off);
        assert!(!scheduler.state());
    }

    #[test]
    fn test_power_on_during_notification_cancels_switch_off() {
        let mut scheduler = test_scheduler(4);
        scheduler.set_state(false).unwrap();
        scheduler
            .set_notification(Notification::new(None, "x", 0))
            .unwrap();
        scheduler.set_state(true).unwrap();
        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
    }

    #[test]
    fn test_screen_upsert_keeps_length() {
        let mut scheduler = test_scheduler(4);
        scheduler.set_screen(Screen::new(5, None, "first"));
        scheduler.set_screen(Screen::new(5, None, "second"));
        assert_eq!(scheduler.screen_count(), 1);
        assert_eq!(scheduler.screens[0].text, "second");
        scheduler.set_screen(Screen::new(6, None, "third"));
        assert_eq!(scheduler.screen_count(), 2);
    }

    #[test]
    fn test_brightness_out_of_range_is_ignored() {
        let mut scheduler = test_scheduler(4);
        scheduler.set_brightness(9).unwrap();
        scheduler.set_brightness(20).unwrap();
        assert_eq!(scheduler.brightness(), 9);
        assert_eq!(scheduler.matrix().brightness(), 9);
        assert_eq!(last_word(&scheduler, command::CMD_INTENSITY), Some(0x0A09));
    }

    #[test]
    fn test_click_cycles_screens() {
        let mut scheduler = test_scheduler(4);
        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);

        scheduler.set_screen(Screen::new(1, None, "one"));
        scheduler.set_screen(Screen::new(2, None, "two"));

        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::ScreenCycle);
        assert_eq!(scheduler.screen_index, 0);

        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.screen_index, 1);

        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
        assert_eq!(scheduler.screen_index, 0);
    }

    #[test]
    fn test_screen_cycle_times_out() {
        let mut scheduler = test_scheduler(4);
        scheduler.set_screen(Screen::new(1, None, "one"));
        scheduler.button_clicked().unwrap();

        scheduler.tick(1000).unwrap();
        scheduler.tick(6999).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::ScreenCycle);
        scheduler.tick(7000).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
    }

    #[test]
    fn test_notification_preempts_screen_cycle() {
        let mut scheduler = test_scheduler(4);
        scheduler.set_screen(Screen::new(1, None, "one"));
        scheduler.button_clicked().unwrap();
        scheduler
            .set_notification(Notification::new(None, "n", 0))
            .unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Notification);
        assert!(!scheduler.screen_deadline.is_armed());

        scheduler.button_clicked().unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
    }

    #[test]
    fn test_press_and_hold_toggles_power() {
        let mut scheduler = test_scheduler(4);
        Gesture::PressAndHold.dispatch(&mut scheduler).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Off);
        assert_eq!(last_word(&scheduler, command::CMD_ENABLE), Some(0x0C00));

        Gesture::PressAndHold.dispatch(&mut scheduler).unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Clock);
        assert_eq!(last_word(&scheduler, command::CMD_ENABLE), Some(0x0C01));
    }

    #[test]
    fn test_double_click_is_not_a_click() {
        let mut scheduler = test_scheduler(4);
        scheduler
            .set_notification(Notification::new(None, "n", 0))
            .unwrap();
        Gesture::DoubleClick.dispatch(&mut scheduler).unwrap();
        assert_eq!(scheduler.pending_notifications(), 1);
        Gesture::Click.dispatch(&mut scheduler).unwrap();
        assert_eq!(scheduler.pending_notifications(), 0);
    }

    #[test]
    fn test_clock_rendering() {
        let mut scheduler = test_scheduler(8);
        scheduler.set_time(DateTime::new(2024, 1, 1, 12, 34, 56), 0);

        assert_eq!(scheduler.tick(0).unwrap(), 500);
        assert_eq!(scheduler.matrix().frame_buffer(), &expected_frame(8, "12:34:56", 0, None)[..]);

        scheduler.set_seconds_visible(false);
        scheduler.tick(0).unwrap();
        assert_eq!(scheduler.matrix().frame_buffer(), &expected_frame(8, "12:34", 12, None)[..]);
        scheduler.tick(1000).unwrap();
        assert_eq!(scheduler.matrix().frame_buffer(), &expected_frame(8, "12 34", 12, None)[..]);
    }

    #[test]
    fn test_time_is_set_as_of_the_given_uptime() {
        let mut scheduler = test_scheduler(8);
        scheduler.tick(0).unwrap();
        scheduler.set_time(DateTime::new(2024, 1, 1, 12, 0, 0), 2_500);
        assert_eq!(scheduler.clock.now(2_500), DateTime::new(2024, 1, 1, 12, 0, 0));
        assert_eq!(scheduler.clock.now(3_500), DateTime::new(2024, 1, 1, 12, 0, 1));

        scheduler
            .apply(
                Message::Time(TimeMessage {
                    hour: Some(8),
                    minute: Some(15),
                    second: Some(0),
                    day: Some(2),
                    month: Some(3),
                    year: Some(2024),
                }),
                60_000,
            )
            .unwrap();
        assert_eq!(scheduler.clock.now(60_000), DateTime::new(2024, 3, 2, 8, 15, 0));
    }

    #[test]
    fn test_apply_messages() {
        let mut scheduler = test_scheduler(4);

        scheduler
            .apply(
                Message::Settings(SettingsMessage {
                    brightness: Some(12),
                    state: None,
                    seconds_visible: Some(false),
                }),
                0,
            )
            .unwrap();
        assert_eq!(scheduler.brightness(), 12);
        assert!(!scheduler.seconds_visible());

        scheduler
            .apply(
                Message::Screen(ScreenMessage {
                    id: None,
                    icon: None,
                    text: Some("lost".into()),
                }),
                0,
            )
            .unwrap();
        assert_eq!(scheduler.screen_count(), 0);

        scheduler
            .apply(
                Message::Time(TimeMessage {
                    hour: Some(7),
                    ..Default::default()
                }),
                0,
            )
            .unwrap();
        assert_eq!(scheduler.clock.now(0), DateTime::default());

        scheduler
            .apply(
                Message::Notification(NotificationMessage {
                    icon: Some(vec![0xFF; 8]),
                    text: Some("mail".into()),
                    timeout_secs: None,
                }),
                0,
            )
            .unwrap();
        assert_eq!(scheduler.mode(), DisplayMode::Notification);
        assert_eq!(scheduler.cursor, 8);

        scheduler
            .apply(
                Message::Settings(SettingsMessage {
                    state: Some(false),
                    ..Default::default()
                }),
                0,
            )
            .unwrap();
        let status = scheduler.status(1234);
        assert_eq!(status.state_str(), "OFF");
        assert_eq!(status.brightness, 12);
        assert_eq!(status.uptime_ms, 1234);
    }
}
