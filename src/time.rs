//! Tick-Index Driver
//!
//! Maintains wall-clock delta time and four monotonic tick indices advanced
//! from host-supplied current time: a coarse index and a slow index (both
//! driven by elapsed real time), plus a horizontal and a vertical pixel
//! index (both driven every call, regardless of delta, by a
//! fractional-pixel accumulator). Ticker routines consume whichever index
//! suits their cadence.

use crate::config::TickerConfig;

/// Hook a host installs to apply menu/display-specific scaling to the
/// horizontal pixel increment before it is accumulated. The vertical (line)
/// increment is never scaled, since line tickers are sized in characters,
/// not physical pixels.
pub trait UpdateTimeHook {
    fn scale(&self, pixel_increment: &mut f32, video_width: u32, video_height: u32);
}

/// The default hook: no scaling.
pub struct NoopUpdateTimeHook;

impl UpdateTimeHook for NoopUpdateTimeHook {
    fn scale(&self, _pixel_increment: &mut f32, _video_width: u32, _video_height: u32) {}
}

/// Snapshot of the four tick indices, handed back by
/// [`crate::engine::AnimationEngine::update`] for callers that want them all
/// at once rather than four separate getter calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickIndices {
    pub idx: u64,
    pub slow_idx: u64,
    pub pixel_idx: u64,
    pub pixel_line_idx: u64,
}

pub(crate) struct TickClock {
    idx: u64,
    slow_idx: u64,
    pixel_idx: u64,
    pixel_line_idx: u64,

    cur_time_us: u64,
    old_time_us: Option<u64>,
    delta_time_ms: f32,

    last_coarse_update_us: u64,
    last_slow_update_us: u64,
    last_clock_update_us: u64,

    pixel_accumulator: f32,
    pixel_line_accumulator: f32,
}

impl TickClock {
    pub fn new() -> Self {
        TickClock {
            idx: 0,
            slow_idx: 0,
            pixel_idx: 0,
            pixel_line_idx: 0,
            cur_time_us: 0,
            old_time_us: None,
            delta_time_ms: 0.0,
            last_coarse_update_us: 0,
            last_slow_update_us: 0,
            last_clock_update_us: 0,
            pixel_accumulator: 0.0,
            pixel_line_accumulator: 0.0,
        }
    }

    pub fn delta_time_ms(&self) -> f32 {
        self.delta_time_ms
    }

    pub fn indices(&self) -> TickIndices {
        TickIndices {
            idx: self.idx,
            slow_idx: self.slow_idx,
            pixel_idx: self.pixel_idx,
            pixel_line_idx: self.pixel_line_idx,
        }
    }

    pub fn idx(&self) -> u64 {
        self.idx
    }

    pub fn slow_idx(&self) -> u64 {
        self.slow_idx
    }

    pub fn pixel_idx(&self) -> u64 {
        self.pixel_idx
    }

    pub fn pixel_line_idx(&self) -> u64 {
        self.pixel_line_idx
    }

    /// Advance the clock by one frame. Returns `true` if the once-a-second
    /// clock-display flag fired this frame (`timedate_enable` was set and at
    /// least one second of wall time has elapsed since the last firing).
    #[allow(clippy::too_many_arguments)]
    pub fn advance(
        &mut self,
        current_time_us: u64,
        timedate_enable: bool,
        ticker_speed: f32,
        video_width: u32,
        video_height: u32,
        ticker_is_active: bool,
        config: &TickerConfig,
        hook: &dyn UpdateTimeHook,
    ) -> bool {
        let speed_factor = config.clamp_speed_factor(ticker_speed);
        let ticker_period_us = ((config.ticker_speed_us as f32) / speed_factor + 0.5) as u64;
        let ticker_slow_period_us =
            ((config.ticker_slow_speed_us as f32) / speed_factor + 0.5) as u64;

        self.cur_time_us = current_time_us;
        self.delta_time_ms = match self.old_time_us {
            None => 0.0,
            Some(old) => (self.cur_time_us.saturating_sub(old)) as f32 / 1000.0,
        };
        self.old_time_us = Some(self.cur_time_us);

        let mut clock_fired = false;
        if timedate_enable && self.cur_time_us.saturating_sub(self.last_clock_update_us) > 1_000_000
        {
            clock_fired = true;
            self.last_clock_update_us = self.cur_time_us;
        }

        if ticker_is_active {
            if self.cur_time_us.saturating_sub(self.last_coarse_update_us) >= ticker_period_us {
                self.idx += 1;
                self.last_coarse_update_us = self.cur_time_us;
            }

            if self.cur_time_us.saturating_sub(self.last_slow_update_us) >= ticker_slow_period_us {
                self.slow_idx += 1;
                self.last_slow_update_us = self.cur_time_us;
            }

            let base_increment = self.delta_time_ms / config.pixel_tick_period_ms;
            let mut h_increment = base_increment * speed_factor;
            let line_increment = base_increment * speed_factor;

            hook.scale(&mut h_increment, video_width, video_height);

            self.pixel_accumulator += h_increment;
            let whole = self.pixel_accumulator as u64;
            if whole > 0 {
                self.pixel_idx += whole;
                self.pixel_accumulator -= whole as f32;
            }

            self.pixel_line_accumulator += line_increment;
            let whole_line = self.pixel_line_accumulator as u64;
            if whole_line > 0 {
                self.pixel_line_idx += whole_line;
                self.pixel_line_accumulator -= whole_line as f32;
            }
        }

        clock_fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = TickClock::new();
        let cfg = TickerConfig::default();
        clock.advance(1_000_000, false, 1.0, 0, 0, true, &cfg, &NoopUpdateTimeHook);
        assert_eq!(clock.delta_time_ms(), 0.0);
    }

    #[test]
    fn coarse_idx_advances_after_period() {
        let mut clock = TickClock::new();
        let cfg = TickerConfig::default();
        clock.advance(0, false, 1.0, 0, 0, true, &cfg, &NoopUpdateTimeHook);
        assert_eq!(clock.idx(), 0);

        clock.advance(
            TICKER_SPEED_TEST,
            false,
            1.0,
            0,
            0,
            true,
            &cfg,
            &NoopUpdateTimeHook,
        );
        assert_eq!(clock.idx(), 1);
    }

    const TICKER_SPEED_TEST: u64 = crate::config::TICKER_SPEED_US as u64;

    #[test]
    fn inactive_ticker_freezes_indices() {
        let mut clock = TickClock::new();
        let cfg = TickerConfig::default();
        clock.advance(0, false, 1.0, 0, 0, false, &cfg, &NoopUpdateTimeHook);
        clock.advance(
            10_000_000,
            false,
            1.0,
            0,
            0,
            false,
            &cfg,
            &NoopUpdateTimeHook,
        );
        assert_eq!(clock.idx(), 0);
        assert_eq!(clock.slow_idx(), 0);
        assert_eq!(clock.pixel_idx(), 0);
    }

    #[test]
    fn pixel_idx_advances_with_accumulated_delta() {
        let mut clock = TickClock::new();
        let cfg = TickerConfig::default();
        // First frame establishes old_time.
        clock.advance(0, false, 1.0, 0, 0, true, &cfg, &NoopUpdateTimeHook);
        // One frame's worth of pixel-ticker period should add exactly 1.
        let dt_us = (cfg.pixel_tick_period_ms * 1000.0) as u64;
        clock.advance(dt_us, false, 1.0, 0, 0, true, &cfg, &NoopUpdateTimeHook);
        assert_eq!(clock.pixel_idx(), 1);
        assert_eq!(clock.pixel_line_idx(), 1);
    }

    #[test]
    fn clock_flag_fires_once_per_second_when_enabled() {
        let mut clock = TickClock::new();
        let cfg = TickerConfig::default();
        assert!(!clock.advance(0, true, 1.0, 0, 0, true, &cfg, &NoopUpdateTimeHook));
        assert!(clock.advance(
            1_000_001,
            true,
            1.0,
            0,
            0,
            true,
            &cfg,
            &NoopUpdateTimeHook
        ));
        assert!(!clock.advance(
            1_000_002,
            true,
            1.0,
            0,
            0,
            true,
            &cfg,
            &NoopUpdateTimeHook
        ));
    }

    struct DoubleHook;
    impl UpdateTimeHook for DoubleHook {
        fn scale(&self, pixel_increment: &mut f32, _w: u32, _h: u32) {
            *pixel_increment *= 2.0;
        }
    }

    #[test]
    fn update_time_hook_scales_only_horizontal_pixel_idx() {
        let mut clock = TickClock::new();
        let cfg = TickerConfig::default();
        clock.advance(0, false, 1.0, 0, 0, true, &cfg, &DoubleHook);
        let dt_us = (cfg.pixel_tick_period_ms * 1000.0) as u64;
        clock.advance(dt_us, false, 1.0, 0, 0, true, &cfg, &DoubleHook);
        // Horizontal got doubled -> 2 ticks; vertical stayed at 1.
        assert_eq!(clock.pixel_idx(), 2);
        assert_eq!(clock.pixel_line_idx(), 1);
    }
}
