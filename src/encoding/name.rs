use crate::encoding::identifier::Identifier;

pub const ADJECTIVES: [&str; 16] = [
    "LIMINAL", "NUMINOUS", "NOETIC", "ORPHIC", "CHTHONIC", "IMMANENT", "PNEUMAL", "LUCENT",
    "SOMATIC", "ASTRAL", "ABYSSAL", "TELIC", "APEIRIC", "PLENAL", "AEONIC", "VERNAL",
];

pub const VERBS: [&str; 16] = [
    "BECOMING",
    "UNFOLDING",
    "DISSOLVING",
    "EMANATING",
    "TRANSCENDING",
    "DIFFUSING",
    "RESONATING",
    "COLLAPSING",
    "ASCENDING",
    "PERCEIVING",
    "TRAVERSING",
    "AWAKENING",
    "PERSISTING",
    "CONVERGING",
    "RECEDING",
    "DRIFTING",
];

pub const NOUNS: [&str; 32] = [
    "PSYCHE", "PNEUMA", "NOUS", "ANIMA", "LOGOS", "TELOS", "APORIA", "AETHER", "PLENUM", "ATMAN",
    "KAIROS", "KOSMOS", "SOMA", "ARCHE", "PATHOS", "EIDOLON", "MONAD", "TOPOS", "PRAXIS", "FLUX",
    "STASIS", "LIMBO", "EPOCH", "NEXUS", "AXIOM", "LOCUS", "NADIR", "ZENITH", "APOGEE", "VOID",
    "PLEROMA", "EKPYROSIS",
];

/// Three-word label derived from an identifier's bit slices.
///
/// Bits 0..4 select the adjective, bits 4..8 the verb and bits 8..13 the noun.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct IdentityName {
    pub adjective: &'static str,
    pub verb: &'static str,
    pub noun: &'static str,
}

impl IdentityName {
    pub fn of(id: Identifier) -> Self {
        name_for_bits(u32::from(id.value()))
    }
}

impl std::fmt::Display for IdentityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.adjective, self.verb, self.noun)
    }
}

/// Name for any integer; only the low 13 bits participate.
pub fn name_for_bits(bits: u32) -> IdentityName {
    IdentityName {
        adjective: ADJECTIVES[(bits & 0xF) as usize],
        verb: VERBS[((bits >> 4) & 0xF) as usize],
        noun: NOUNS[((bits >> 8) & 0x1F) as usize],
    }
}

pub fn name(id: Identifier) -> IdentityName {
    IdentityName::of(id)
}

#[cfg(test)]
#[path = "../../tests/unit/encoding/name.rs"]
mod tests;
