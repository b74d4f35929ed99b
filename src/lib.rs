//! # tweenticker
//!
//! A UI animation and text-ticker engine for frontend menu systems: it
//! drives time-based interpolation of scalar UI values ("tweens") and
//! computes, per frame, the visible substrings and offsets needed to
//! scroll overly long text labels within fixed-size display fields.
//!
//! Two subsystems dominate:
//!
//! - a tween scheduler ([`tween`], [`easing`]) advancing a reentrant-safe
//!   list of active interpolations once per frame by a real-time delta;
//! - a ticker engine ([`ticker`]) that, given a monotonic tick index and a
//!   source string, computes which glyphs of that string are visible this
//!   frame, in bounce or loop style, at character or pixel resolution.
//!
//! Both are purely computational: no rendering, font rasterisation,
//! window-system interaction, persistence, or threading of its own. The
//! engine is driven synchronously, once per frame, by a single caller.
//!
//! ## Modules
//!
//! - [`easing`] — the 33 pure easing curves.
//! - [`tween`] — one scalar interpolation and its tag/callback machinery.
//! - [`time`] — the tick-index driver ([`time::TickClock`]) consumed by tickers.
//! - [`config`] — tunables ([`config::TickerConfig`]) shared by time and ticker routines.
//! - [`ticker`] — character and line ticker algorithms.
//! - [`engine`] — [`engine::AnimationEngine`], the façade tying the above together.

pub mod config;
pub mod easing;
pub mod engine;
pub mod ticker;
pub mod time;
pub mod tween;

pub use config::TickerConfig;
pub use easing::Easing;
pub use engine::{AnimationEngine, CtlState};
pub use ticker::{
    CharTickerRequest, CharTickerResult, GlyphSource, LineTickerRequest, LineTickerResult,
    LineTickerSmoothRequest, LineTickerSmoothResult, SmoothTickerRequest, SmoothTickerResult,
    TickerType,
};
pub use time::{TickIndices, UpdateTimeHook};
pub use tween::{OnComplete, Subject, Tag, TweenEntry};
