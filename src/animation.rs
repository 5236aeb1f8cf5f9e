//! Animation driver
//!
//! Two periodic sources share the UI thread: the border hue rotation and the
//! HUD refresh. Neither owns a thread or timer handle; the event loop asks for
//! the next deadline and polls when it wakes.

use std::time::{Duration, Instant};

use h3v3n_theme::Color;

/// Interval between border hue steps
pub const BORDER_TICK: Duration = Duration::from_millis(40);
/// Interval between HUD refreshes
pub const HUD_TICK: Duration = Duration::from_secs(1);

const BORDER_SATURATION: f64 = 0.7;
const BORDER_VALUE: f64 = 1.0;

/// Rotating border hue in whole degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HueAnimation {
    hue: u32,
}

impl HueAnimation {
    pub fn new(hue: u32) -> Self {
        Self { hue: hue % 360 }
    }

    pub fn hue(&self) -> u32 {
        self.hue
    }

    /// Advance by `speed` degrees, wrapping at 360
    pub fn advance(&mut self, speed: u32) -> u32 {
        self.hue = (self.hue + speed % 360) % 360;
        self.hue
    }

    pub fn color(&self) -> Color {
        Color::from_hsv(self.hue as f64 / 360.0, BORDER_SATURATION, BORDER_VALUE)
    }

    pub fn border_hex(&self) -> String {
        self.color().to_hex()
    }
}

/// Fixed-interval deadline tracker
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Fire at most once per call; a late wakeup does not cause a burst
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}

/// Owns both periodic sources
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    hue: HueAnimation,
    border: Ticker,
    hud: Ticker,
}

impl AnimationDriver {
    pub fn new(now: Instant) -> Self {
        Self {
            hue: HueAnimation::default(),
            border: Ticker::new(BORDER_TICK, now),
            hud: Ticker::new(HUD_TICK, now),
        }
    }

    pub fn hue(&self) -> &HueAnimation {
        &self.hue
    }

    /// Check both timers; returns the border color when the hue advanced and
    /// whether the HUD is due
    pub fn poll(&mut self, now: Instant, speed: u32) -> (Option<String>, bool) {
        let border = if self.border.poll(now) {
            self.hue.advance(speed);
            Some(self.hue.border_hex())
        } else {
            None
        };
        (border, self.hud.poll(now))
    }

    /// Earliest instant at which a timer is due
    pub fn next_deadline(&self) -> Instant {
        self.border.deadline().min(self.hud.deadline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_after_n_ticks() {
        for speed in [0u32, 1, 4, 7, 90, 359, 360, 1000] {
            let mut hue = HueAnimation::new(10);
            let ticks = 250u32;
            for _ in 0..ticks {
                hue.advance(speed);
            }
            let expected = (10 + (ticks as u64) * speed as u64) % 360;
            assert_eq!(hue.hue() as u64, expected, "speed {}", speed);
        }
    }

    #[test]
    fn test_hue_zero_is_red_tint() {
        assert_eq!(HueAnimation::new(0).border_hex(), "#ff4c4c");
    }

    #[test]
    fn test_hue_wraps() {
        let mut hue = HueAnimation::new(358);
        assert_eq!(hue.advance(4), 2);
    }

    #[test]
    fn test_ticker_fires_on_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(BORDER_TICK, start);
        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(39)));
        assert!(ticker.poll(start + Duration::from_millis(40)));
        assert!(!ticker.poll(start + Duration::from_millis(41)));
        assert!(ticker.poll(start + Duration::from_millis(80)));
    }

    #[test]
    fn test_ticker_late_wakeup_fires_once() {
        let start = Instant::now();
        let mut ticker = Ticker::new(BORDER_TICK, start);
        let late = start + Duration::from_millis(500);
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.deadline(), late + BORDER_TICK);
    }

    #[test]
    fn test_driver_schedules_both_timers() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(start);
        assert_eq!(driver.next_deadline(), start + BORDER_TICK);

        let (border, hud) = driver.poll(start + BORDER_TICK, 4);
        assert_eq!(driver.hue().hue(), 4);
        assert!(border.is_some());
        assert!(!hud);

        let (_, hud) = driver.poll(start + HUD_TICK, 4);
        assert!(hud);
    }
}
