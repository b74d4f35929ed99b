//! Ticker/Animation Tunables
//!
//! `TickerConfig` is a value, not a global — each [`crate::engine::AnimationEngine`]
//! owns one. There is no on-disk or env-var configuration surface here (the
//! engine has no persistence, by design): this struct exists purely so a host
//! can override timing constants (e.g. a faster spacer cadence under test)
//! without reaching for a serde/file layer that nothing downstream needs.

/// Coarse ticker tick period, in microseconds, at `speed_factor == 1.0`.
pub const TICKER_SPEED_US: u32 = 333_333;

/// Slow ticker tick period, in microseconds, at `speed_factor == 1.0`.
pub const TICKER_SLOW_SPEED_US: u32 = 1_666_666;

/// Nominal pixel-ticker period: one pixel-tick per frame at 60 FPS.
pub const PIXEL_TICK_PERIOD_MS: f32 = 1000.0 / 60.0;

/// Mean reading speed used to size how long a wrapped line is held on
/// screen, in characters per minute.
pub const READING_PACE_CPM: f32 = 1000.0;

/// Number of pixel-ticks the smooth character ticker pauses at each end of
/// its scroll.
pub const SMOOTH_SCROLL_PAUSE_TICKS: u32 = 32;

/// Ellipsis appended to unselected, overflowing labels.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Spacer used by loop tickers when the caller supplies none.
pub const DEFAULT_SPACER: &str = "   |   ";

/// Smallest speed factor the engine will honor; anything at or below this is
/// treated as `1.0` to avoid a division blow-up in the tick periods.
pub const MIN_SPEED_FACTOR: f32 = 0.0001;

#[derive(Debug, Clone, PartialEq)]
pub struct TickerConfig {
    pub ticker_speed_us: u32,
    pub ticker_slow_speed_us: u32,
    pub pixel_tick_period_ms: f32,
    pub reading_pace_cpm: f32,
    pub smooth_scroll_pause_ticks: u32,
    pub ellipsis: String,
    pub default_spacer: String,
    pub min_speed_factor: f32,
}

impl Default for TickerConfig {
    fn default() -> Self {
        TickerConfig {
            ticker_speed_us: TICKER_SPEED_US,
            ticker_slow_speed_us: TICKER_SLOW_SPEED_US,
            pixel_tick_period_ms: PIXEL_TICK_PERIOD_MS,
            reading_pace_cpm: READING_PACE_CPM,
            smooth_scroll_pause_ticks: SMOOTH_SCROLL_PAUSE_TICKS,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            default_spacer: DEFAULT_SPACER.to_string(),
            min_speed_factor: MIN_SPEED_FACTOR,
        }
    }
}

impl TickerConfig {
    /// Clamp a caller-supplied ticker speed to a safe positive factor.
    pub(crate) fn clamp_speed_factor(&self, speed: f32) -> f32 {
        if speed > self.min_speed_factor {
            speed
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_constants() {
        let cfg = TickerConfig::default();
        assert_eq!(cfg.ticker_speed_us, 333_333);
        assert_eq!(cfg.ticker_slow_speed_us, 1_666_666);
        assert!((cfg.pixel_tick_period_ms - (1000.0 / 60.0)).abs() < 1e-6);
        assert_eq!(cfg.smooth_scroll_pause_ticks, 32);
        assert_eq!(cfg.ellipsis, "...");
    }

    #[test]
    fn speed_factor_clamps_non_positive() {
        let cfg = TickerConfig::default();
        assert_eq!(cfg.clamp_speed_factor(0.0), 1.0);
        assert_eq!(cfg.clamp_speed_factor(-5.0), 1.0);
        assert_eq!(cfg.clamp_speed_factor(2.0), 2.0);
    }
}
