//! Text-ticker engine.
//!
//! Four public entry points mirror the façade in [`crate::engine`]:
//! [`ticker`] (character-quantised), [`ticker_smooth`] (pixel-accurate),
//! [`line_ticker`] and [`line_ticker_smooth`] (vertical scroll of wrapped
//! lines). Each absorbs its own failures: an empty source, a zero field
//! dimension, or a negative glyph metric clears the output and returns
//! `is_active = false` rather than propagating an error. An empty
//! source/zero dimension is a routine per-frame outcome (`trace!`); a
//! negative glyph metric from a caller's font callback is unexpected enough
//! to warrant `warn!`.

pub mod char_ticker;
pub mod line_ticker;
pub mod smooth;

use std::fmt;

use crate::config::TickerConfig;

/// Why a ticker call returned a cleared, inactive result. Never surfaced to
/// callers — the public contract stays `is_active: bool` — this exists only
/// to give the log lines below (and the tests that assert on them) a name
/// for the early-out instead of a bare boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickerFailure {
    EmptySource,
    ZeroDimension,
    NegativeMetric,
}

impl fmt::Display for TickerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TickerFailure::EmptySource => "source string is empty",
            TickerFailure::ZeroDimension => "field width (or line/display count) is zero",
            TickerFailure::NegativeMetric => "glyph metric callback returned a negative width",
        };
        f.write_str(msg)
    }
}

/// Animation style shared by every ticker routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickerType {
    #[default]
    Bounce,
    Loop,
}

/// How glyph widths are supplied to the smooth (pixel-accurate) routines.
pub enum GlyphSource<'a> {
    /// Every glyph has this width, in pixels.
    FixedWidth(f32),
    /// Per-codepoint width lookup. Returning `None` for any character in
    /// the scanned range is a hard failure (§4.F "metric-unavailable"):
    /// the whole call clears its output.
    Proportional(&'a dyn Fn(char) -> Option<f32>),
}

fn codepoint_count(s: &str) -> usize {
    s.chars().count()
}

fn codepoint_prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn codepoint_slice(s: &str, offset: usize, count: usize) -> String {
    s.chars().skip(offset).take(count).collect()
}

/// Build the ellipsised static label shown for unselected, overflowing
/// entries: the longest prefix that fits `field_width - 3*dot_width`,
/// followed by the three-dot ellipsis.
fn ellipsis_prefix(source: &str, field_width: u32, dot_width: u32, config: &TickerConfig) -> String {
    let budget = field_width.saturating_sub(3 * dot_width);
    let prefix = codepoint_prefix(source, (budget / dot_width.max(1)) as usize);
    format!("{prefix}{}", config.ellipsis)
}

// ===========================================================================
// Character ticker (quantised)
// ===========================================================================

pub struct CharTickerRequest<'a> {
    pub source: &'a str,
    pub spacer: Option<&'a str>,
    pub field_width: u32,
    pub selected: bool,
    pub ticker_type: TickerType,
    pub idx: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharTickerResult {
    pub text: String,
    pub is_active: bool,
}

pub fn ticker(req: &CharTickerRequest, config: &TickerConfig) -> CharTickerResult {
    if req.source.is_empty() {
        log::trace!("ticker: {}", TickerFailure::EmptySource);
        return CharTickerResult::default();
    }
    if req.field_width == 0 {
        log::trace!("ticker: {}", TickerFailure::ZeroDimension);
        return CharTickerResult::default();
    }

    let str_width = codepoint_count(req.source) as u32;

    if str_width <= req.field_width {
        return CharTickerResult {
            text: req.source.to_string(),
            is_active: false,
        };
    }

    if !req.selected {
        return CharTickerResult {
            text: ellipsis_prefix(req.source, req.field_width, 1, config),
            is_active: false,
        };
    }

    let text = match req.ticker_type {
        TickerType::Bounce => {
            let (offset, width) = char_ticker::bounce_offset(req.idx, str_width, req.field_width);
            codepoint_slice(req.source, offset as usize, width as usize)
        }
        TickerType::Loop => {
            let spacer = spacer_or_default(req.spacer, config);
            let spacer_width = codepoint_count(&spacer) as u32;
            let slices =
                char_ticker::loop_slices(req.idx, str_width, spacer_width, req.field_width);
            let mut out = String::new();
            out.push_str(&codepoint_slice(
                req.source,
                slices[0].offset as usize,
                slices[0].width as usize,
            ));
            out.push_str(&codepoint_slice(
                &spacer,
                slices[1].offset as usize,
                slices[1].width as usize,
            ));
            out.push_str(&codepoint_slice(
                req.source,
                slices[2].offset as usize,
                slices[2].width as usize,
            ));
            out
        }
    };

    CharTickerResult {
        text,
        is_active: true,
    }
}

fn spacer_or_default(spacer: Option<&str>, config: &TickerConfig) -> String {
    spacer.unwrap_or(&config.default_spacer).to_string()
}

// ===========================================================================
// Character ticker (smooth / pixel-accurate)
// ===========================================================================

pub struct SmoothTickerRequest<'a> {
    pub source: &'a str,
    pub spacer: Option<&'a str>,
    pub field_width: f32,
    pub selected: bool,
    pub ticker_type: TickerType,
    pub idx: u64,
    pub glyphs: GlyphSource<'a>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothTickerResult {
    pub text: String,
    pub x_offset: f32,
    pub drawn_width: f32,
    pub is_active: bool,
}

fn glyph_widths(source: &str, glyphs: &GlyphSource) -> Option<Vec<u32>> {
    match glyphs {
        GlyphSource::FixedWidth(_) => None,
        GlyphSource::Proportional(f) => {
            let mut widths = Vec::with_capacity(source.chars().count());
            for ch in source.chars() {
                let w = f(ch)?;
                if w < 0.0 {
                    return None;
                }
                widths.push(w.round() as u32);
            }
            Some(widths)
        }
    }
}

pub fn ticker_smooth(req: &SmoothTickerRequest, config: &TickerConfig) -> SmoothTickerResult {
    if req.source.is_empty() {
        log::trace!("ticker_smooth: {}", TickerFailure::EmptySource);
        return SmoothTickerResult::default();
    }
    if req.field_width <= 0.0 {
        log::trace!("ticker_smooth: {}", TickerFailure::ZeroDimension);
        return SmoothTickerResult::default();
    }

    let dot_width = match &req.glyphs {
        GlyphSource::FixedWidth(w) => *w,
        GlyphSource::Proportional(f) => match f('.') {
            Some(w) if w >= 0.0 => w,
            _ => {
                log::warn!("ticker_smooth: {}", TickerFailure::NegativeMetric);
                return SmoothTickerResult::default();
            }
        },
    };
    if dot_width <= 0.0 {
        log::warn!("ticker_smooth: {}", TickerFailure::NegativeMetric);
        return SmoothTickerResult::default();
    }

    let str_width_px: f32 = match &req.glyphs {
        GlyphSource::FixedWidth(w) => codepoint_count(req.source) as f32 * w,
        GlyphSource::Proportional(f) => {
            let mut total = 0.0;
            for ch in req.source.chars() {
                match f(ch) {
                    Some(w) if w >= 0.0 => total += w,
                    _ => {
                        log::warn!("ticker_smooth: {}", TickerFailure::NegativeMetric);
                        return SmoothTickerResult::default();
                    }
                }
            }
            total
        }
    };

    if str_width_px <= req.field_width {
        return SmoothTickerResult {
            text: req.source.to_string(),
            x_offset: 0.0,
            drawn_width: str_width_px,
            is_active: false,
        };
    }

    if !req.selected {
        return SmoothTickerResult {
            text: ellipsis_prefix(req.source, req.field_width as u32, dot_width as u32, config),
            x_offset: 0.0,
            drawn_width: req.field_width,
            is_active: false,
        };
    }

    let num_chars = codepoint_count(req.source) as u32;
    let field_width = req.field_width as u32;
    let str_width = str_width_px as u32;

    let result = match req.ticker_type {
        TickerType::Bounce => {
            let offset = smooth::scroll_offset(
                req.idx,
                str_width,
                field_width,
                config.smooth_scroll_pause_ticks,
            );
            let scan = match &req.glyphs {
                GlyphSource::FixedWidth(w) => {
                    smooth::scan_fixed_width(num_chars, *w as u32, field_width, offset)
                }
                GlyphSource::Proportional(_) => {
                    let widths = match glyph_widths(req.source, &req.glyphs) {
                        Some(w) => w,
                        None => {
                            log::warn!("ticker_smooth: {}", TickerFailure::NegativeMetric);
                            return SmoothTickerResult::default();
                        }
                    };
                    smooth::scan_characters(&widths, field_width, offset)
                }
            };
            let text = codepoint_slice(req.source, scan.char_offset as usize, scan.num_chars as usize);
            SmoothTickerResult {
                text,
                x_offset: scan.x_offset as f32,
                drawn_width: scan.display_width as f32,
                is_active: true,
            }
        }
        TickerType::Loop => {
            let spacer = spacer_or_default(req.spacer, config);
            let spacer_chars = codepoint_count(&spacer) as u32;

            match &req.glyphs {
                GlyphSource::FixedWidth(w) => {
                    let glyph_width = *w as u32;
                    let spacer_width = spacer_chars * glyph_width;
                    let r = smooth::scan_loop_fixed_width(
                        req.idx,
                        str_width,
                        num_chars,
                        spacer_width,
                        spacer_chars,
                        glyph_width,
                        field_width,
                    );
                    let mut text = String::new();
                    text.push_str(&codepoint_slice(
                        req.source,
                        r.slice1.char_offset as usize,
                        r.slice1.num_chars as usize,
                    ));
                    text.push_str(&codepoint_slice(
                        &spacer,
                        r.slice2.char_offset as usize,
                        r.slice2.num_chars as usize,
                    ));
                    text.push_str(&codepoint_prefix(req.source, r.slice3_num_chars as usize));
                    SmoothTickerResult {
                        text,
                        x_offset: r.x_offset as f32,
                        drawn_width: req.field_width,
                        is_active: true,
                    }
                }
                GlyphSource::Proportional(f) => {
                    let widths = match glyph_widths(req.source, &req.glyphs) {
                        Some(w) => w,
                        None => {
                            log::warn!("ticker_smooth: {}", TickerFailure::NegativeMetric);
                            return SmoothTickerResult::default();
                        }
                    };
                    let mut spacer_widths = Vec::with_capacity(spacer.chars().count());
                    for ch in spacer.chars() {
                        match f(ch) {
                            Some(w) if w >= 0.0 => spacer_widths.push(w.round() as u32),
                            _ => {
                                log::warn!("ticker_smooth: {}", TickerFailure::NegativeMetric);
                                return SmoothTickerResult::default();
                            }
                        }
                    }
                    let spacer_width: u32 = spacer_widths.iter().sum();

                    let r = smooth::scan_loop_characters(
                        req.idx,
                        str_width,
                        &widths,
                        spacer_width,
                        &spacer_widths,
                        field_width,
                    );
                    let mut text = String::new();
                    text.push_str(&codepoint_slice(
                        req.source,
                        r.slice1.char_offset as usize,
                        r.slice1.num_chars as usize,
                    ));
                    text.push_str(&codepoint_slice(
                        &spacer,
                        r.slice2.char_offset as usize,
                        r.slice2.num_chars as usize,
                    ));
                    text.push_str(&codepoint_prefix(req.source, r.slice3_num_chars as usize));
                    SmoothTickerResult {
                        text,
                        x_offset: r.x_offset as f32,
                        drawn_width: req.field_width,
                        is_active: true,
                    }
                }
            }
        }
    };

    result
}

// ===========================================================================
// Line ticker (quantised & smooth)
// ===========================================================================

pub struct LineTickerRequest<'a> {
    pub source: &'a str,
    pub line_len: usize,
    pub max_lines: usize,
    pub ticker_type: TickerType,
    pub idx: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTickerResult {
    pub lines: Vec<String>,
    pub is_active: bool,
}

pub fn line_ticker(req: &LineTickerRequest, config: &TickerConfig) -> LineTickerResult {
    if req.source.is_empty() {
        log::trace!("line_ticker: {}", TickerFailure::EmptySource);
        return LineTickerResult::default();
    }
    if req.line_len == 0 || req.max_lines == 0 {
        log::trace!("line_ticker: {}", TickerFailure::ZeroDimension);
        return LineTickerResult::default();
    }

    let wrapped = line_ticker::word_wrap(req.source, req.line_len);
    if wrapped.len() <= req.max_lines {
        return LineTickerResult {
            lines: wrapped,
            is_active: false,
        };
    }

    let line_ticks = line_ticker::line_display_ticks(req.line_len, config).max(1);
    let offset = match req.ticker_type {
        TickerType::Bounce => {
            line_ticker::bounce_line_offset(req.idx, line_ticks, req.max_lines, wrapped.len())
        }
        TickerType::Loop => line_ticker::loop_line_offset(req.idx, line_ticks, wrapped.len()),
    };

    let lines = (0..req.max_lines)
        .map(|i| {
            let idx = offset + i;
            if idx < wrapped.len() {
                wrapped[idx].clone()
            } else {
                String::new()
            }
        })
        .collect();

    LineTickerResult {
        lines,
        is_active: true,
    }
}

pub struct LineTickerSmoothRequest<'a> {
    pub source: &'a str,
    pub line_len: usize,
    pub max_display_lines: usize,
    pub line_height: f32,
    pub ticker_type: TickerType,
    pub fade_enabled: bool,
    pub idx: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineTickerSmoothResult {
    pub lines: Vec<String>,
    pub y_offset: f32,
    pub fade_active: bool,
    pub top_fade_line: Option<(String, f32, f32)>,
    pub bottom_fade_line: Option<(String, f32, f32)>,
    pub is_active: bool,
}

pub fn line_ticker_smooth(
    req: &LineTickerSmoothRequest,
    config: &TickerConfig,
) -> LineTickerSmoothResult {
    if req.source.is_empty() {
        log::trace!("line_ticker_smooth: {}", TickerFailure::EmptySource);
        return LineTickerSmoothResult::default();
    }
    if req.line_len == 0 || req.max_display_lines == 0 {
        log::trace!("line_ticker_smooth: {}", TickerFailure::ZeroDimension);
        return LineTickerSmoothResult::default();
    }

    let wrapped = line_ticker::word_wrap(req.source, req.line_len);
    if wrapped.len() <= req.max_display_lines {
        return LineTickerSmoothResult {
            lines: wrapped,
            is_active: false,
            ..Default::default()
        };
    }

    let scroll_ticks = line_ticker::line_smooth_scroll_ticks(req.line_len, config).max(1);

    let r = match req.ticker_type {
        TickerType::Bounce => line_ticker::smooth_bounce(
            req.idx,
            req.fade_enabled,
            scroll_ticks,
            req.line_height,
            req.max_display_lines,
            wrapped.len(),
        ),
        TickerType::Loop => line_ticker::smooth_loop(
            req.idx,
            req.fade_enabled,
            scroll_ticks,
            req.line_height,
            req.max_display_lines,
            wrapped.len(),
        ),
    };

    let line_at = |i: usize| -> String {
        if i < wrapped.len() {
            wrapped[i].clone()
        } else {
            String::new()
        }
    };

    let lines = (0..r.num_display_lines)
        .map(|i| line_at(r.line_offset + i))
        .collect();

    let top_fade_line = r.fade_active.then(|| {
        (
            line_at(r.top_fade_line_offset),
            r.top_fade_y_offset,
            r.top_fade_alpha,
        )
    });
    let bottom_fade_line = r.fade_active.then(|| {
        (
            line_at(r.bottom_fade_line_offset),
            r.bottom_fade_y_offset,
            r.bottom_fade_alpha,
        )
    });

    LineTickerSmoothResult {
        lines,
        y_offset: r.y_offset,
        fade_active: r.fade_active,
        top_fade_line,
        bottom_fade_line,
        is_active: true,
    }
}
