//! Spell layer: static definitions and damage computation

pub mod damage;
pub mod definitions;

pub use damage::{
    compute_damage_preview, is_tile_in_spell_range, roll_spell_damage, spell_range_tiles,
    DamagePreview, SpellDamagePreview,
};
pub use definitions::{default_spells, DamageElement, SpellBook, SpellDamage, SpellDefinition};
