//! Static interaction table (Gen 6+ chart)
//!
//! One row per attacking category listing the defending categories it is
//! nullified by, resisted by, or super effective against. Anything not
//! listed takes 1x.

use super::category::Category::{self, *};
use crate::TypeError;

/// How one attacking category interacts with defending categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionRow {
    pub attacker: Category,
    /// Defenders taking 0x
    pub nullifies: &'static [Category],
    /// Defenders taking 0.5x
    pub resists: &'static [Category],
    /// Defenders taking 2x
    pub super_effective: &'static [Category],
}

impl InteractionRow {
    /// Multiplier this attacker deals to a single defending category
    pub fn multiplier(&self, defender: Category) -> f32 {
        if self.nullifies.contains(&defender) {
            0.0
        } else if self.resists.contains(&defender) {
            0.5
        } else if self.super_effective.contains(&defender) {
            2.0
        } else {
            1.0
        }
    }
}

/// Row used for the neutral marker
pub static NEUTRAL_ROW: InteractionRow = InteractionRow {
    attacker: Levitate,
    nullifies: &[],
    resists: &[],
    super_effective: &[],
};

#[rustfmt::skip]
pub static INTERACTION_TABLE: [InteractionRow; 18] = [
    InteractionRow {
        attacker: Normal,
        nullifies: &[Ghost],
        resists: &[Rock, Steel],
        super_effective: &[],
    },
    InteractionRow {
        attacker: Fire,
        nullifies: &[],
        resists: &[Fire, Water, Rock, Dragon],
        super_effective: &[Grass, Ice, Bug, Steel],
    },
    InteractionRow {
        attacker: Water,
        nullifies: &[],
        resists: &[Water, Grass, Dragon],
        super_effective: &[Fire, Ground, Rock],
    },
    InteractionRow {
        attacker: Electric,
        nullifies: &[Ground],
        resists: &[Electric, Grass, Dragon],
        super_effective: &[Water, Flying],
    },
    InteractionRow {
        attacker: Grass,
        nullifies: &[],
        resists: &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
        super_effective: &[Water, Ground, Rock],
    },
    InteractionRow {
        attacker: Ice,
        nullifies: &[],
        resists: &[Fire, Water, Ice, Steel],
        super_effective: &[Grass, Ground, Flying, Dragon],
    },
    InteractionRow {
        attacker: Fighting,
        nullifies: &[Ghost],
        resists: &[Poison, Flying, Psychic, Bug, Fairy],
        super_effective: &[Normal, Ice, Rock, Dark, Steel],
    },
    InteractionRow {
        attacker: Poison,
        nullifies: &[Steel],
        resists: &[Poison, Ground, Rock, Ghost],
        super_effective: &[Grass, Fairy],
    },
    InteractionRow {
        attacker: Ground,
        nullifies: &[Flying],
        resists: &[Grass, Bug],
        super_effective: &[Fire, Electric, Poison, Rock, Steel],
    },
    InteractionRow {
        attacker: Flying,
        nullifies: &[],
        resists: &[Electric, Rock, Steel],
        super_effective: &[Grass, Fighting, Bug],
    },
    InteractionRow {
        attacker: Psychic,
        nullifies: &[Dark],
        resists: &[Psychic, Steel],
        super_effective: &[Fighting, Poison],
    },
    InteractionRow {
        attacker: Bug,
        nullifies: &[],
        resists: &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
        super_effective: &[Grass, Psychic, Dark],
    },
    InteractionRow {
        attacker: Rock,
        nullifies: &[],
        resists: &[Fighting, Ground, Steel],
        super_effective: &[Fire, Ice, Flying, Bug],
    },
    InteractionRow {
        attacker: Ghost,
        nullifies: &[Normal],
        resists: &[Dark],
        super_effective: &[Psychic, Ghost],
    },
    InteractionRow {
        attacker: Dragon,
        nullifies: &[Fairy],
        resists: &[Steel],
        super_effective: &[Dragon],
    },
    InteractionRow {
        attacker: Dark,
        nullifies: &[],
        resists: &[Fighting, Dark, Fairy],
        super_effective: &[Psychic, Ghost],
    },
    InteractionRow {
        attacker: Steel,
        nullifies: &[],
        resists: &[Fire, Water, Electric, Steel],
        super_effective: &[Ice, Rock, Fairy],
    },
    InteractionRow {
        attacker: Fairy,
        nullifies: &[],
        resists: &[Fire, Poison, Steel],
        super_effective: &[Fighting, Dragon, Dark],
    },
];

/// Find the interaction row for an attacking category
pub fn lookup(attacker: Category) -> Result<&'static InteractionRow, TypeError> {
    if attacker.is_neutral_marker() {
        return Ok(&NEUTRAL_ROW);
    }
    INTERACTION_TABLE
        .iter()
        .find(|row| row.attacker == attacker)
        .ok_or(TypeError::UnknownInteraction(attacker))
}

impl Category {
    /// Get effectiveness of this attacking category against a single defending category
    pub fn effectiveness(self, defender: Category) -> f32 {
        let row = lookup(self);
        debug_assert!(row.is_ok(), "no interaction row for {self}");
        row.map_or(1.0, |row| row.multiplier(defender))
    }

    /// Get effectiveness against several defending categories (multiplied)
    pub fn effectiveness_multi(self, defenders: &[Category]) -> f32 {
        defenders.iter().map(|t| self.effectiveness(*t)).product()
    }
}
