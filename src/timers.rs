//! Wall-clock timers: invulnerability, power-up windows and the fire cooldown.
//!
//! All times are milliseconds on the caller's clock (`now_ms`), so tests can
//! drive them with plain numbers.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Obstacle contact is ignored while active.
    Invulnerable,
    /// Each shot fires two bullets.
    DoubleShot,
    /// Enemy contact is ignored while active.
    Invisible,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Window {
    active: bool,
    expires_at: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    invulnerable: Window,
    double_shot: Window,
    invisible: Window,
    last_shot_ms: Option<u64>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    fn window(&self, effect: Effect) -> &Window {
        match effect {
            Effect::Invulnerable => &self.invulnerable,
            Effect::DoubleShot => &self.double_shot,
            Effect::Invisible => &self.invisible,
        }
    }

    fn window_mut(&mut self, effect: Effect) -> &mut Window {
        match effect {
            Effect::Invulnerable => &mut self.invulnerable,
            Effect::DoubleShot => &mut self.double_shot,
            Effect::Invisible => &mut self.invisible,
        }
    }

    /// Start `effect`, or restart it if already running. Durations never stack.
    pub fn activate(&mut self, effect: Effect, now_ms: u64, duration_ms: u64) {
        *self.window_mut(effect) = Window {
            active: true,
            expires_at: now_ms + duration_ms,
        };
    }

    pub fn is_active(&self, effect: Effect) -> bool {
        self.window(effect).active
    }

    pub fn expires_at(&self, effect: Effect) -> Option<u64> {
        let w = self.window(effect);
        w.active.then_some(w.expires_at)
    }

    /// Whole seconds left, floored; 0 when inactive.
    pub fn remaining_secs(&self, effect: Effect, now_ms: u64) -> u64 {
        match self.expires_at(effect) {
            Some(end) => end.saturating_sub(now_ms) / 1000,
            None => 0,
        }
    }

    /// Clear every window whose expiry has passed.
    pub fn update(&mut self, now_ms: u64) {
        for w in [
            &mut self.invulnerable,
            &mut self.double_shot,
            &mut self.invisible,
        ] {
            if w.active && now_ms > w.expires_at {
                w.active = false;
            }
        }
    }

    /// Fire-rate gate. Returns `true` and records the shot if more than
    /// `cooldown_ms` has passed since the previous one (or there was none).
    pub fn try_fire(&mut self, now_ms: u64, cooldown_ms: u64) -> bool {
        let ready = match self.last_shot_ms {
            Some(last) => now_ms.saturating_sub(last) > cooldown_ms,
            None => true,
        };
        if ready {
            self.last_shot_ms = Some(now_ms);
        }
        ready
    }

    pub fn last_shot_ms(&self) -> Option<u64> {
        self.last_shot_ms
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
