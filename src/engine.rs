//! Public façade: owns the tween lists, the tick clock, and per-engine
//! ticker state, and exposes the in-process call surface a host drives
//! once per frame.
//!
//! There is no process-wide singleton: [`AnimationEngine`] is a handle a
//! host constructs and holds. A thin thread-local default instance is kept
//! only as a convenience for single-frontend embedders that would
//! otherwise have to thread a handle through code that doesn't care to —
//! see [`with_default`] / [`with_default_mut`].

use std::cell::RefCell;

use crate::config::TickerConfig;
use crate::ticker::{
    self, CharTickerRequest, CharTickerResult, LineTickerRequest, LineTickerResult,
    LineTickerSmoothRequest, LineTickerSmoothResult, SmoothTickerRequest, SmoothTickerResult,
};
use crate::time::{NoopUpdateTimeHook, TickClock, TickIndices, UpdateTimeHook};
use crate::tween::{OnComplete, Subject, Tag, Tween, TweenEntry};

/// Recognized states for [`AnimationEngine::ctl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtlState {
    /// Tear down: clear both tween lists, reset every tick index and
    /// clock, reset both activity flags. Does not zero a pointer to the
    /// engine the way the source this generalizes does — the whole struct
    /// is put back in its just-constructed state.
    Deinit,
    /// Clear both activity flags without touching the tween lists.
    ClearActive,
    /// Force both activity flags on.
    SetActive,
    /// No-op.
    None,
}

pub struct AnimationEngine {
    active: Vec<Tween>,
    pending: Vec<Tween>,
    /// Delayed pushes staged by [`Self::push_delayed`]: a 0->1 linear timer
    /// paired with the entry it will push once the timer completes.
    delayed: Vec<(Tween, Option<TweenEntry>)>,
    clock: TickClock,
    config: TickerConfig,
    in_update: bool,
    pending_deletes: bool,
    animation_active: bool,
    ticker_active: bool,
    update_time_hook: Box<dyn UpdateTimeHook>,
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new(TickerConfig::default())
    }
}

impl AnimationEngine {
    pub fn new(config: TickerConfig) -> Self {
        AnimationEngine {
            active: Vec::new(),
            pending: Vec::new(),
            delayed: Vec::new(),
            clock: TickClock::new(),
            config,
            in_update: false,
            pending_deletes: false,
            animation_active: false,
            ticker_active: false,
            update_time_hook: Box::new(NoopUpdateTimeHook),
        }
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    // -----------------------------------------------------------------
    // Tween scheduler
    // -----------------------------------------------------------------

    /// Start a new tween. Rejects degenerate tweens (§3: zero duration or
    /// `initial == target`). Returns whether it was accepted.
    pub fn push(&mut self, entry: TweenEntry) -> bool {
        let initial = entry.subject.get();
        if crate::tween::is_degenerate(entry.duration_ms, initial, entry.target) {
            log::warn!(
                "tween rejected: degenerate (duration={}, initial==target={})",
                entry.duration_ms,
                initial == entry.target
            );
            return false;
        }

        log::debug!("tween accepted: duration={}ms target={}", entry.duration_ms, entry.target);
        let tween = Tween::from_entry(entry);
        if self.in_update {
            self.pending.push(tween);
        } else {
            self.active.push(tween);
        }
        true
    }

    /// Equivalent to starting a linear 0->1 timer whose completion invokes
    /// `push(entry)`. The timer itself is owned entirely by the engine and
    /// dropped once it fires — unlike the source this generalizes, there is
    /// no separate heap allocation for the delayed-push wrapper.
    pub fn push_delayed(&mut self, delay_ms: f32, entry: TweenEntry) -> bool {
        let delay_subject: Subject = std::rc::Rc::new(std::cell::Cell::new(0.0));
        let timer_entry =
            TweenEntry::new(crate::easing::Easing::Linear, delay_ms, 1.0, delay_subject);
        self.delayed.push((Tween::from_entry(timer_entry), Some(entry)));
        true
    }

    /// Advance every active tween by the elapsed real time and splice in
    /// anything staged via [`Self::push`]/[`Self::push_delayed`] while
    /// inside the previous sweep. Returns `animation_active` (whether any
    /// tween remains running).
    pub fn update(
        &mut self,
        current_time_us: u64,
        timedate_enable: bool,
        ticker_speed: f32,
        video_width: u32,
        video_height: u32,
    ) -> bool {
        let clock_fired = self.clock.advance(
            current_time_us,
            timedate_enable,
            ticker_speed,
            video_width,
            video_height,
            self.ticker_active,
            &self.config,
            self.update_time_hook.as_ref(),
        );
        if clock_fired {
            self.animation_active = true;
        }

        let dt = self.clock.delta_time_ms();

        self.in_update = true;
        self.drain_delayed(dt);

        let mut i = 0;
        while i < self.active.len() {
            if self.active[i].deleted {
                i += 1;
                continue;
            }
            if self.active[i].step(dt) {
                let mut tween = self.active.remove(i);
                if let Some(cb) = tween.on_complete.take() {
                    cb(self);
                }
                continue;
            }
            i += 1;
        }

        if self.pending_deletes {
            self.active.retain(|t| !t.deleted);
            self.pending_deletes = false;
        }

        if !self.pending.is_empty() {
            self.active.append(&mut self.pending);
        }

        self.in_update = false;
        self.animation_active = !self.active.is_empty();
        log::trace!(
            "update: dt={dt}ms active_tweens={}",
            self.active.len()
        );
        self.animation_active
    }

    fn drain_delayed(&mut self, dt: f32) {
        for (timer, _) in self.delayed.iter_mut() {
            timer.step(dt);
        }

        let ready: Vec<_> = self
            .delayed
            .iter()
            .enumerate()
            .filter(|(_, (timer, _))| timer.subject.get() >= 1.0)
            .map(|(i, _)| i)
            .collect();

        for i in ready.into_iter().rev() {
            let (_, entry) = self.delayed.remove(i);
            if let Some(entry) = entry {
                self.push(entry);
            }
        }
    }

    /// Cancel every tween tagged `tag`. `Tag::NONE` is always a no-op.
    /// Completion callbacks never fire for killed tweens.
    pub fn kill_by_tag(&mut self, tag: Tag) -> bool {
        if tag.is_none() {
            return false;
        }

        let mut killed = false;
        if self.in_update {
            for tween in self.active.iter_mut() {
                if tween.tag == tag && !tween.deleted {
                    tween.deleted = true;
                    killed = true;
                }
            }
            if killed {
                self.pending_deletes = true;
            }
            let before = self.pending.len();
            self.pending.retain(|t| t.tag != tag);
            killed |= self.pending.len() != before;
        } else {
            let before = self.active.len();
            self.active.retain(|t| t.tag != tag);
            killed = self.active.len() != before;
        }

        log::trace!("kill_by_tag: tag={:?} killed_any={killed}", tag.0);
        killed
    }

    /// A timer is a tween of a caller-owned cell from 0 to 1 with linear
    /// easing; its tag is derived from the cell's own identity so
    /// `timer_kill` can cancel it without the caller tracking a separate
    /// handle.
    pub fn timer_start(&mut self, subject: Subject, duration_ms: f32, on_complete: Option<OnComplete>) -> bool {
        let tag = Tag::of(&subject);
        subject.set(0.0);
        let mut entry = TweenEntry::new(crate::easing::Easing::Linear, duration_ms, 1.0, subject).with_tag(tag);
        if let Some(cb) = on_complete {
            entry = entry.with_on_complete(cb);
        }
        self.push(entry)
    }

    pub fn timer_kill(&mut self, subject: &Subject) -> bool {
        self.kill_by_tag(Tag::of(subject))
    }

    // -----------------------------------------------------------------
    // Activity / control
    // -----------------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.animation_active || self.ticker_active
    }

    pub fn get_delta_time(&self) -> f32 {
        self.clock.delta_time_ms()
    }

    pub fn ctl(&mut self, state: CtlState) {
        match state {
            CtlState::Deinit => {
                let config = self.config.clone();
                *self = AnimationEngine::new(config);
            }
            CtlState::ClearActive => {
                self.animation_active = false;
                self.ticker_active = false;
            }
            CtlState::SetActive => {
                self.animation_active = true;
                self.ticker_active = true;
            }
            CtlState::None => {}
        }
    }

    pub fn indices(&self) -> TickIndices {
        self.clock.indices()
    }

    pub fn idx(&self) -> u64 {
        self.clock.idx()
    }

    pub fn slow_idx(&self) -> u64 {
        self.clock.slow_idx()
    }

    pub fn pixel_idx(&self) -> u64 {
        self.clock.pixel_idx()
    }

    pub fn pixel_line_idx(&self) -> u64 {
        self.clock.pixel_line_idx()
    }

    pub fn set_update_time_cb(&mut self, hook: Box<dyn UpdateTimeHook>) {
        self.update_time_hook = hook;
    }

    pub fn unset_update_time_cb(&mut self) {
        self.update_time_hook = Box::new(NoopUpdateTimeHook);
    }

    // -----------------------------------------------------------------
    // Ticker surface
    // -----------------------------------------------------------------

    pub fn ticker(&mut self, req: &CharTickerRequest) -> CharTickerResult {
        let result = ticker::ticker(req, &self.config);
        if result.is_active {
            self.ticker_active = true;
        }
        result
    }

    pub fn ticker_smooth(&mut self, req: &SmoothTickerRequest) -> SmoothTickerResult {
        let result = ticker::ticker_smooth(req, &self.config);
        if result.is_active {
            self.ticker_active = true;
        }
        result
    }

    pub fn line_ticker(&mut self, req: &LineTickerRequest) -> LineTickerResult {
        let result = ticker::line_ticker(req, &self.config);
        if result.is_active {
            self.ticker_active = true;
        }
        result
    }

    pub fn line_ticker_smooth(&mut self, req: &LineTickerSmoothRequest) -> LineTickerSmoothResult {
        let result = ticker::line_ticker_smooth(req, &self.config);
        if result.is_active {
            self.ticker_active = true;
        }
        result
    }
}

thread_local! {
    static DEFAULT_ENGINE: RefCell<AnimationEngine> = RefCell::new(AnimationEngine::default());
}

/// Convenience accessor for single-frontend embedders that don't want to
/// thread an [`AnimationEngine`] handle through their own call graph.
/// Prefer constructing and owning an `AnimationEngine` directly when more
/// than one independent engine is needed in the same process.
pub fn with_default<R>(f: impl FnOnce(&AnimationEngine) -> R) -> R {
    DEFAULT_ENGINE.with(|cell| f(&cell.borrow()))
}

pub fn with_default_mut<R>(f: impl FnOnce(&mut AnimationEngine) -> R) -> R {
    DEFAULT_ENGINE.with(|cell| f(&mut cell.borrow_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() -> AnimationEngine {
        AnimationEngine::default()
    }

    #[test]
    fn linear_tween_completion_scenario() {
        let mut engine = setup();
        let subject = Rc::new(Cell::new(0.0));
        let entry = TweenEntry::new(Easing::Linear, 1000.0, 100.0, subject.clone());
        assert!(engine.push(entry));

        engine.update(0, false, 1.0, 0, 0);
        engine.update(500_000, false, 1.0, 0, 0);
        assert_eq!(subject.get(), 50.0);

        engine.update(1_000_000, false, 1.0, 0, 0);
        assert_eq!(subject.get(), 100.0);
        assert!(!engine.is_active());
    }

    /// Spec §8 scenario 5, driven through a real `on_complete` closure: the
    /// first tween's completion callback reentrantly calls `kill_by_tag` on
    /// the engine it is running inside of (handed back as the callback's
    /// `&mut AnimationEngine` argument), killing a second, still-running
    /// tween sharing the same tag. The second tween's own callback must
    /// never fire, and `update` must finish the sweep without corrupting
    /// iteration.
    #[test]
    fn kill_during_update_scenario() {
        let mut engine = setup();
        let tag = Tag(42);

        let s1 = Rc::new(Cell::new(0.0));
        let s2 = Rc::new(Cell::new(0.0));
        let second_fired = Rc::new(Cell::new(false));
        let second_fired_clone = second_fired.clone();

        // Completes first (500ms) and, on completion, kills `tag` itself —
        // reentrantly cancelling the second tween (2000ms, still running).
        engine.push(
            TweenEntry::new(Easing::Linear, 500.0, 100.0, s1)
                .with_tag(tag)
                .with_on_complete(Box::new(move |engine: &mut AnimationEngine| {
                    engine.kill_by_tag(tag);
                })),
        );
        engine.push(
            TweenEntry::new(Easing::Linear, 2000.0, 50.0, s2)
                .with_tag(tag)
                .with_on_complete(Box::new(move |_: &mut AnimationEngine| {
                    second_fired_clone.set(true)
                })),
        );

        engine.update(0, false, 1.0, 0, 0);
        engine.update(500_000, false, 1.0, 0, 0);

        assert!(!second_fired.get());
        assert!(engine.active.is_empty());
    }

    #[test]
    fn ctl_deinit_resets_everything() {
        let mut engine = setup();
        let subject = Rc::new(Cell::new(0.0));
        engine.push(TweenEntry::new(Easing::Linear, 1000.0, 10.0, subject));
        engine.update(0, false, 1.0, 0, 0);
        engine.ctl(CtlState::Deinit);
        assert!(!engine.is_active());
        assert_eq!(engine.idx(), 0);
    }

    #[test]
    fn ctl_set_and_clear_active() {
        let mut engine = setup();
        engine.ctl(CtlState::SetActive);
        assert!(engine.is_active());
        engine.ctl(CtlState::ClearActive);
        assert!(!engine.is_active());
    }

    #[test]
    fn timer_kill_cancels_via_identity() {
        let mut engine = setup();
        let subject = Rc::new(Cell::new(0.0));
        engine.timer_start(subject.clone(), 1000.0, None);
        assert!(engine.timer_kill(&subject));
    }

    #[test]
    fn push_delayed_fires_after_its_own_timer_completes() {
        let mut engine = setup();
        let subject = Rc::new(Cell::new(0.0));
        let entry = TweenEntry::new(Easing::Linear, 1000.0, 100.0, subject.clone());
        assert!(engine.push_delayed(500.0, entry));

        // Delay timer itself is still running; the wrapped tween hasn't
        // pushed yet, so the subject is untouched.
        engine.update(0, false, 1.0, 0, 0);
        engine.update(250_000, false, 1.0, 0, 0);
        assert_eq!(subject.get(), 0.0);

        // Delay elapses this frame: the wrapped entry is queued via
        // `pending` (we're mid-`update` when `drain_delayed` pushes it) and
        // spliced into `active` only at the end of this same sweep, so it
        // isn't stepped until the *next* `update` call.
        engine.update(500_000, false, 1.0, 0, 0);
        assert_eq!(subject.get(), 0.0);

        engine.update(1_000_000, false, 1.0, 0, 0);
        assert_eq!(subject.get(), 50.0);

        engine.update(1_500_000, false, 1.0, 0, 0);
        assert_eq!(subject.get(), 100.0);
    }
}
