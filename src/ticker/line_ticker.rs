//! Line ticker: word-wrap plus vertical scroll of the wrapped lines.

use crate::config::TickerConfig;

/// Greedy word-wrap to `line_len` code points per line; breaks mid-word
/// only when a single word itself overflows `line_len`. Not grounded in
/// the original source (which defers to an external `word_wrap()` helper
/// not present in the retrieved sources) — implemented directly here.
pub fn word_wrap(source: &str, line_len: usize) -> Vec<String> {
    if line_len == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in source.split(' ') {
        let mut remaining = word.to_string();
        loop {
            let word_len = remaining.chars().count();
            let sep = if current.is_empty() { 0 } else { 1 };

            if current_len + sep + word_len <= line_len {
                if sep == 1 {
                    current.push(' ');
                    current_len += 1;
                }
                current.push_str(&remaining);
                current_len += word_len;
                break;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }

            // word itself is too long for an empty line: hard-break it.
            let take: String = remaining.chars().take(line_len).collect();
            let rest: String = remaining.chars().skip(line_len).collect();
            lines.push(take);
            if rest.is_empty() {
                break;
            }
            remaining = rest;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

/// Base number of coarse ticks a wrapped line should be held on screen,
/// derived from a mean reading pace.
pub fn line_display_ticks(line_len: usize, config: &TickerConfig) -> u64 {
    let line_duration_us = (line_len as f32) * 60.0 * 1_000_000.0 / config.reading_pace_cpm;
    (line_duration_us / config.ticker_speed_us as f32) as u64
}

/// Base number of pixel-ticks over which one line should scroll into the
/// next, for the smooth line ticker.
pub fn line_smooth_scroll_ticks(line_len: usize, config: &TickerConfig) -> u64 {
    let line_duration_ms = (line_len as f32) * 60.0 * 1000.0 / config.reading_pace_cpm;
    (line_duration_ms / config.pixel_tick_period_ms) as u64
}

/// Quantised bounce: pauses one line-duration at the first and last line.
/// Caller must ensure `num_lines > max_lines`.
pub fn bounce_line_offset(idx: u64, line_ticks: u64, max_lines: usize, num_lines: usize) -> usize {
    let excess = num_lines - max_lines;
    let period = excess * 2 + 2;
    let mut phase = ((idx / line_ticks.max(1)) % period as u64) as usize;

    if phase > 0 {
        phase -= 1;
    }
    if phase > excess {
        phase -= 1;
    }

    if phase <= excess {
        phase
    } else {
        excess * 2 - phase
    }
}

/// Quantised loop: `line_offset` is simply the phase, wrapping through an
/// extra "+1" empty slot.
pub fn loop_line_offset(idx: u64, line_ticks: u64, num_lines: usize) -> usize {
    let period = num_lines + 1;
    ((idx / line_ticks.max(1)) % period as u64) as usize
}

/// Fade alpha for a line fading out (1 -> 0) or in (0 -> 1) across half a
/// scroll, clamped to `[0, 1]`.
fn fade_alphas(scroll_ticks: u64, line_phase: u64) -> (f32, f32) {
    let fade_out = (scroll_ticks as f32 - line_phase as f32 * 2.0) / scroll_ticks as f32;
    let fade_in = -fade_out;
    (fade_out.max(0.0), fade_in.max(0.0))
}

/// Result of one smooth line-ticker evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SmoothLineResult {
    pub num_display_lines: usize,
    pub line_offset: usize,
    pub y_offset: f32,
    pub fade_active: bool,
    pub top_fade_line_offset: usize,
    pub top_fade_y_offset: f32,
    pub top_fade_alpha: f32,
    pub bottom_fade_line_offset: usize,
    pub bottom_fade_y_offset: f32,
    pub bottom_fade_alpha: f32,
}

#[allow(clippy::too_many_arguments)]
fn fade_parameters(
    scroll_up: bool,
    scroll_ticks: u64,
    line_phase: u64,
    line_height: f32,
    num_lines: usize,
    num_display_lines: usize,
    line_offset: usize,
    y_offset: f32,
) -> (usize, f32, f32, usize, f32, f32) {
    let (fade_out, fade_in) = fade_alphas(scroll_ticks, line_phase);

    let top_fade_line_offset = if line_offset > 0 {
        line_offset - 1
    } else {
        num_lines
    };
    let top_fade_y_offset = y_offset - line_height;
    let top_fade_alpha = if scroll_up { fade_out } else { fade_in };

    let bottom_fade_line_offset = line_offset + num_display_lines;
    let bottom_fade_y_offset = y_offset + line_height * num_display_lines as f32;
    let bottom_fade_alpha = if scroll_up { fade_in } else { fade_out };

    (
        top_fade_line_offset,
        top_fade_y_offset,
        top_fade_alpha,
        bottom_fade_line_offset,
        bottom_fade_y_offset,
        bottom_fade_alpha,
    )
}

/// Smooth (pixel-accurate) bounce line scroll with optional fade.
/// Caller must ensure `num_lines > max_display_lines`.
#[allow(clippy::too_many_arguments)]
pub fn smooth_bounce(
    idx: u64,
    fade_enabled: bool,
    scroll_ticks: u64,
    line_height: f32,
    max_display_lines: usize,
    num_lines: usize,
) -> SmoothLineResult {
    let scroll_ticks = scroll_ticks.max(1);
    let excess = num_lines - max_display_lines;
    let period = (excess * 2 + 2) as u64 * scroll_ticks;
    let mut phase = idx % period;

    let mut pause = phase < scroll_ticks;
    phase = if phase >= scroll_ticks { phase - scroll_ticks } else { 0 };

    let mut scroll_up = true;
    if phase >= excess as u64 * scroll_ticks {
        scroll_up = false;
        if phase < (excess as u64 + 1) * scroll_ticks {
            pause = true;
            phase = 0;
        } else {
            phase -= (excess as u64 + 1) * scroll_ticks;
        }
    }

    let line_phase = phase % scroll_ticks;
    let mut result = SmoothLineResult::default();

    if pause || line_phase == 0 {
        result.num_display_lines = max_display_lines;
        result.y_offset = 0.0;
        result.fade_active = false;
        result.line_offset = if pause {
            if scroll_up { 0 } else { excess }
        } else if scroll_up {
            (phase / scroll_ticks) as usize
        } else {
            excess - (phase / scroll_ticks) as usize
        };
    } else {
        result.num_display_lines = max_display_lines - 1;
        result.fade_active = fade_enabled;

        if scroll_up {
            result.line_offset = (phase / scroll_ticks) as usize + 1;
            result.y_offset = line_height * (scroll_ticks - line_phase) as f32 / scroll_ticks as f32;
        } else {
            result.line_offset = excess - (phase / scroll_ticks) as usize;
            result.y_offset =
                line_height * (1.0 - (scroll_ticks - line_phase) as f32 / scroll_ticks as f32);
        }

        if result.fade_active {
            let (tlo, tyo, ta, blo, byo, ba) = fade_parameters(
                scroll_up,
                scroll_ticks,
                line_phase,
                line_height,
                num_lines,
                result.num_display_lines,
                result.line_offset,
                result.y_offset,
            );
            result.top_fade_line_offset = tlo;
            result.top_fade_y_offset = tyo;
            result.top_fade_alpha = ta;
            result.bottom_fade_line_offset = blo;
            result.bottom_fade_y_offset = byo;
            result.bottom_fade_alpha = ba;
        }
    }

    result
}

/// Smooth (pixel-accurate) loop line scroll; always scrolls up, fade is
/// always symmetric when enabled.
pub fn smooth_loop(
    idx: u64,
    fade_enabled: bool,
    scroll_ticks: u64,
    line_height: f32,
    max_display_lines: usize,
    num_lines: usize,
) -> SmoothLineResult {
    let scroll_ticks = scroll_ticks.max(1);
    let period = (num_lines + 1) as u64 * scroll_ticks;
    let phase = idx % period;
    let line_phase = phase % scroll_ticks;

    let mut result = SmoothLineResult {
        line_offset: (phase / scroll_ticks) as usize,
        ..Default::default()
    };

    if line_phase == scroll_ticks - 1 {
        result.num_display_lines = max_display_lines;
        result.fade_active = false;
    } else {
        result.num_display_lines = max_display_lines - 1;
        result.fade_active = fade_enabled;
    }

    result.y_offset = line_height * (scroll_ticks - line_phase) as f32 / scroll_ticks as f32;

    if result.fade_active {
        let (tlo, tyo, ta, blo, byo, ba) = fade_parameters(
            true,
            scroll_ticks,
            line_phase,
            line_height,
            num_lines,
            result.num_display_lines,
            result.line_offset,
            result.y_offset,
        );
        result.top_fade_line_offset = tlo;
        result.top_fade_y_offset = tyo;
        result.top_fade_alpha = ta;
        result.bottom_fade_line_offset = blo;
        result.bottom_fade_y_offset = byo;
        result.bottom_fade_alpha = ba;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_wrap_breaks_on_word_boundaries() {
        let lines = word_wrap("the quick brown fox jumps", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps");
    }

    #[test]
    fn word_wrap_hard_breaks_overlong_word() {
        let lines = word_wrap("supercalifragilisticexpialidocious", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.concat(), "supercalifragilisticexpialidocious");
    }

    #[test]
    fn smooth_line_scroll_fade_scenario() {
        // 5 lines, max_display=3, scroll_ticks=10, line_phase=5. `idx` is
        // `scroll_ticks + line_phase`: the first `scroll_ticks` ticks of
        // `smooth_bounce`'s period are the initial pause segment, so the
        // literal spec scenario's `line_phase` lands in the scroll segment
        // only once the pause has elapsed.
        let r = smooth_bounce(15, true, 10, 1.0, 3, 5);
        assert_eq!(r.num_display_lines, 2);
        assert_eq!(r.top_fade_alpha, 0.0);
        assert_eq!(r.bottom_fade_alpha, 0.0);
    }

    #[test]
    fn smooth_line_scroll_fade_partial() {
        // line_phase=1 -> idx = scroll_ticks(10) + 1.
        let r = smooth_bounce(11, true, 10, 1.0, 3, 5);
        assert!((r.top_fade_alpha - 0.8).abs() < 1e-5);
    }

    #[test]
    fn loop_line_offset_wraps_through_empty_slot() {
        for idx in 0..20u64 {
            let offset = loop_line_offset(idx, 1, 5);
            assert!(offset <= 5);
        }
    }

    #[test]
    fn bounce_line_offset_stays_within_excess() {
        for idx in 0..50u64 {
            let offset = bounce_line_offset(idx, 1, 3, 5);
            assert!(offset <= 2);
        }
    }
}
