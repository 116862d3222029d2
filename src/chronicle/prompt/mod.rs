mod builder;
mod engine;

pub use builder::{
    RealmRuleset, build_character_prompt, build_realm_prompt, group_thousands, guild_role_phrase,
    guild_size_phrase,
};
pub use engine::TeraEngine;
