/// Mod bits the performance engine understands.
///
/// Everything from `NoFail` up to and including `SpunOut` and `Autopilot`,
/// i.e. the lowest 13 bits. Higher bits such as key mods, `Random`, or
/// `ScoreV2` are stripped before a calculation.
pub const ENGINE_MODS_MASK: u32 = 8191;

/// Splits a raw mods integer into what the engine sees and what it doesn't.
pub trait Mods: Copy {
    /// The mods that are forwarded to the engine.
    fn engine_bits(self) -> u32;

    /// The mods that the engine would not recognize.
    fn unsupported_bits(self) -> u32;
}

impl Mods for u32 {
    fn engine_bits(self) -> u32 {
        self & ENGINE_MODS_MASK
    }

    fn unsupported_bits(self) -> u32 {
        self & !ENGINE_MODS_MASK
    }
}
