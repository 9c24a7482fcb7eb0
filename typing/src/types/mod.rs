//! Domain types for the type-relationship engine

mod category;
mod compound;
mod interaction;
mod multipliers;

pub use category::{Category, ELEMENTAL_COUNT};
pub use compound::CompoundType;
pub use interaction::{INTERACTION_TABLE, InteractionRow, NEUTRAL_ROW, lookup};
pub use multipliers::{Effectiveness, Multipliers, defense_vector, derive_defense};
