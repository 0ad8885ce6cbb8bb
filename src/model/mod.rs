/// Beatmap related types.
pub mod beatmap;

/// Gamemode related types.
pub mod mode;

/// Gamemods related types.
pub mod mods;

/// Score related types.
pub mod score;
