//! Weapon kinds and per-weapon storage

use serde::{Deserialize, Serialize};

use crate::tuning::{Tuning, WeaponSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Fast single shots, narrow spread
    #[default]
    Rifle,
    /// Slow pellet bursts, wide spread
    Shotgun,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 2] = [WeaponKind::Rifle, WeaponKind::Shotgun];

    /// Fire behaviour for this weapon
    pub fn spec<'a>(&self, tuning: &'a Tuning) -> &'a WeaponSpec {
        match self {
            WeaponKind::Rifle => &tuning.rifle,
            WeaponKind::Shotgun => &tuning.shotgun,
        }
    }

    /// The weapon a switch moves to
    pub fn next(&self) -> Self {
        match self {
            WeaponKind::Rifle => WeaponKind::Shotgun,
            WeaponKind::Shotgun => WeaponKind::Rifle,
        }
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            WeaponKind::Rifle => "RIFLE",
            WeaponKind::Shotgun => "SHOTGUN",
        }
    }
}

/// One value per weapon (ammo counts, magazine sizes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerWeapon<T> {
    pub rifle: T,
    pub shotgun: T,
}

impl<T> PerWeapon<T> {
    pub fn from_fn(mut f: impl FnMut(WeaponKind) -> T) -> Self {
        Self {
            rifle: f(WeaponKind::Rifle),
            shotgun: f(WeaponKind::Shotgun),
        }
    }

    pub fn get(&self, kind: WeaponKind) -> &T {
        match kind {
            WeaponKind::Rifle => &self.rifle,
            WeaponKind::Shotgun => &self.shotgun,
        }
    }

    pub fn get_mut(&mut self, kind: WeaponKind) -> &mut T {
        match kind {
            WeaponKind::Rifle => &mut self.rifle,
            WeaponKind::Shotgun => &mut self.shotgun,
        }
    }
}
