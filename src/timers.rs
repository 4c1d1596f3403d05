//! Time-bounded effects.
//!
//! Every timer is checked against the single `now` read at the start of the
//! tick.  Nothing here reads a clock on its own.

use crate::constants::player::{FLASH_INTERVAL_MS, FLASH_TOGGLES};

/// An effect that ends once `now >= deadline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expiry {
    deadline: u64,
}

impl Expiry {
    pub fn at(deadline: u64) -> Self {
        Self { deadline }
    }

    pub fn after(now: u64, duration_ms: u64) -> Self {
        Self {
            deadline: now.saturating_add(duration_ms),
        }
    }

    #[inline]
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: u64) -> u64 {
        self.deadline.saturating_sub(now)
    }
}

// ── Invulnerability flashing ─────────────────────────────────────────────────

/// Visibility toggle machine.  Ends after a fixed number of toggles rather
/// than after a duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Flasher {
    visible: bool,
    toggles: u32,
    last_toggle: u64,
}

impl Flasher {
    pub fn new(now: u64) -> Self {
        Self {
            visible: true,
            toggles: 0,
            last_toggle: now,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    /// Toggle at most once per call.  Returns `true` once the toggle budget
    /// is spent.
    pub fn update(&mut self, now: u64) -> bool {
        if now.saturating_sub(self.last_toggle) >= FLASH_INTERVAL_MS {
            self.visible = !self.visible;
            self.toggles += 1;
            self.last_toggle = now;
        }
        self.toggles >= FLASH_TOGGLES
    }
}

// ── Life state ───────────────────────────────────────────────────────────────

/// Respawning(hidden) → Invulnerable(flashing) → Normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeState {
    Normal,
    Respawning { until: Expiry },
    Invulnerable(Flasher),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeTransition {
    /// Respawn delay elapsed, the ship reappears flashing.
    Respawned,
    /// Flashing finished.
    Recovered,
}

impl LifeState {
    /// Excluded from damage checks.
    pub fn is_intangible(&self) -> bool {
        !matches!(self, LifeState::Normal)
    }

    pub fn is_respawning(&self) -> bool {
        matches!(self, LifeState::Respawning { .. })
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(self, LifeState::Invulnerable(_))
    }

    pub fn is_visible(&self) -> bool {
        match self {
            LifeState::Normal => true,
            LifeState::Respawning { .. } => false,
            LifeState::Invulnerable(flasher) => flasher.visible(),
        }
    }

    pub fn update(&mut self, now: u64) -> Option<LifeTransition> {
        match self {
            LifeState::Normal => None,
            LifeState::Respawning { until } => {
                if until.is_expired(now) {
                    *self = LifeState::Invulnerable(Flasher::new(now));
                    Some(LifeTransition::Respawned)
                } else {
                    None
                }
            }
            LifeState::Invulnerable(flasher) => {
                if flasher.update(now) {
                    *self = LifeState::Normal;
                    Some(LifeTransition::Recovered)
                } else {
                    None
                }
            }
        }
    }
}

// ── Power-up effects ─────────────────────────────────────────────────────────

/// Power-ups that change how the ship fires or moves.  Only one is active at
/// a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponMode {
    TripleShot,
    SpeedBoost,
    Laser,
}

/// Active timed effects on the player.  The shield composes with any weapon
/// mode; weapon modes replace each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerState {
    pub shield: Option<Expiry>,
    pub weapon: Option<(WeaponMode, Expiry)>,
}

/// What `PowerState::expire` cleared this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Expired {
    pub shield: bool,
    pub weapon: Option<WeaponMode>,
}

impl PowerState {
    pub fn is_shielded(&self) -> bool {
        self.shield.is_some()
    }

    pub fn weapon(&self) -> Option<WeaponMode> {
        self.weapon.map(|(mode, _)| mode)
    }

    pub fn has(&self, mode: WeaponMode) -> bool {
        self.weapon() == Some(mode)
    }

    pub fn grant_shield(&mut self, now: u64, duration_ms: u64) {
        self.shield = Some(Expiry::after(now, duration_ms));
    }

    /// Install `mode`, returning the mode it displaced (if different).
    pub fn grant_weapon(&mut self, mode: WeaponMode, now: u64, duration_ms: u64) -> Option<WeaponMode> {
        let previous = self.weapon().filter(|&prev| prev != mode);
        self.weapon = Some((mode, Expiry::after(now, duration_ms)));
        previous
    }

    pub fn expire(&mut self, now: u64) -> Expired {
        let mut expired = Expired::default();
        if self.shield.is_some_and(|e| e.is_expired(now)) {
            self.shield = None;
            expired.shield = true;
        }
        if let Some((mode, expiry)) = self.weapon {
            if expiry.is_expired(now) {
                self.weapon = None;
                expired.weapon = Some(mode);
            }
        }
        expired
    }
}
