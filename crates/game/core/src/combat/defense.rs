//! Layered defenses: shields, then armor, then hull.

/// Incoming damage packet.
///
/// `shield_mult` and `armor_mult` describe the ammo type: anti-shield rounds
/// carry a high `shield_mult`, armor-piercing rounds a high `armor_mult`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub amount: f32,
    pub shield_mult: f32,
    pub armor_mult: f32,
}

impl Hit {
    pub const fn new(amount: f32, shield_mult: f32, armor_mult: f32) -> Self {
        Self {
            amount,
            shield_mult,
            armor_mult,
        }
    }

    /// Neutral ammo: both multipliers at 1.0.
    pub const fn plain(amount: f32) -> Self {
        Self::new(amount, 1.0, 1.0)
    }
}

/// Outcome of one hit, for HUD and damage-visual feedback.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    pub destroyed: bool,
    pub shields_pct: f32,
    pub armor_pct: f32,
    pub hull_pct: f32,
}

/// Current and maximum values of the three defense layers.
///
/// # Invariants
///
/// - `0 <= current <= max` for every layer after any mutation
/// - the owner is alive iff `hull > 0`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefenseStack {
    pub shields: f32,
    pub armor: f32,
    pub hull: f32,
    pub max_shields: f32,
    pub max_armor: f32,
    pub max_hull: f32,
}

impl DefenseStack {
    /// Creates a stack at full strength. Negative or non-finite inputs become 0.
    pub fn new(shields: f32, armor: f32, hull: f32) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let (shields, armor, hull) = (clean(shields), clean(armor), clean(hull));
        Self {
            shields,
            armor,
            hull,
            max_shields: shields,
            max_armor: armor,
            max_hull: hull,
        }
    }

    /// Creates a stack with explicit current values, clamped to the maxima.
    pub fn with_current(max: (f32, f32, f32), current: (f32, f32, f32)) -> Self {
        let mut stack = Self::new(max.0, max.1, max.2);
        stack.shields = current.0;
        stack.armor = current.1;
        stack.hull = current.2;
        stack.clamp();
        stack
    }

    /// Applies a hit through the shield → armor → hull cascade.
    ///
    /// ```text
    /// if shields > 0:
    ///     scaled   = amount * shield_mult
    ///     absorbed = min(shields, scaled)
    ///     shields -= absorbed
    ///     amount   = (scaled - absorbed) / shield_mult
    /// if amount > 0 and armor > 0:
    ///     (same with armor_mult)
    /// if amount > 0:
    ///     hull -= amount
    /// ```
    ///
    /// The leftover is normalized back to nominal damage between layers, so
    /// a high `shield_mult` strips shields fast but the spill into armor is
    /// reduced in proportion. A multiplier that is not a positive finite
    /// number leaves its layer untouched and passes the damage through.
    ///
    /// Returns `true` when the hull is depleted.
    pub fn apply_damage(&mut self, amount: f32, shield_mult: f32, armor_mult: f32) -> bool {
        let mut amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };

        if self.shields > 0.0 && amount > 0.0 {
            amount = absorb(&mut self.shields, amount, shield_mult);
        }
        if amount > 0.0 && self.armor > 0.0 {
            amount = absorb(&mut self.armor, amount, armor_mult);
        }
        if amount > 0.0 {
            self.hull -= amount;
        }

        self.clamp();
        self.hull <= 0.0
    }

    /// Applies a [`Hit`] and reports the resulting layer percentages.
    pub fn take_hit(&mut self, hit: Hit) -> DamageReport {
        let destroyed = self.apply_damage(hit.amount, hit.shield_mult, hit.armor_mult);
        DamageReport {
            destroyed,
            shields_pct: pct(self.shields, self.max_shields),
            armor_pct: pct(self.armor, self.max_armor),
            hull_pct: pct(self.hull, self.max_hull),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hull > 0.0
    }

    pub fn total(&self) -> f32 {
        self.shields + self.armor + self.hull
    }

    pub fn max_total(&self) -> f32 {
        self.max_shields + self.max_armor + self.max_hull
    }

    /// `current_total / max_total`, 0 for an empty stack.
    pub fn health_fraction(&self) -> f32 {
        let max = self.max_total();
        if max <= 0.0 { 0.0 } else { self.total() / max }
    }

    fn clamp(&mut self) {
        self.shields = self.shields.clamp(0.0, self.max_shields);
        self.armor = self.armor.clamp(0.0, self.max_armor);
        self.hull = self.hull.clamp(0.0, self.max_hull);
    }
}

/// Runs one layer of the cascade and returns the nominal leftover.
fn absorb(layer: &mut f32, amount: f32, mult: f32) -> f32 {
    if !(mult.is_finite() && mult > 0.0) {
        return amount;
    }
    let scaled = amount * mult;
    let absorbed = layer.min(scaled);
    *layer -= absorbed;
    (scaled - absorbed) / mult
}

fn pct(current: f32, max: f32) -> f32 {
    if max <= 0.0 { 0.0 } else { (current / max * 100.0).clamp(0.0, 100.0) }
}
