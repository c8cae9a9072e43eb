use std::fmt;

/// Unique identifier of a unit for the lifetime of a battle.
///
/// Identifiers are allocated sequentially and never reused, even after the
/// unit dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitId(pub u32);

impl UnitId {
    pub const FIRST: Self = Self(1);

    #[inline]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allegiance of a unit.
///
/// `SideA` is the player-facing side and `SideB` the opposition; `Neutral`
/// units occupy tiles but never take turns or count toward elimination.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Side {
    SideA,
    SideB,
    Neutral,
}

impl Side {
    /// Sides that take turns, in turn order.
    pub const COMBATANTS: [Side; 2] = [Side::SideA, Side::SideB];

    /// The side this one fights against, if any.
    pub const fn opponent(self) -> Option<Side> {
        match self {
            Side::SideA => Some(Side::SideB),
            Side::SideB => Some(Side::SideA),
            Side::Neutral => None,
        }
    }

    pub const fn is_combatant(self) -> bool {
        !matches!(self, Side::Neutral)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn sides_parse_case_insensitively() {
        assert_eq!(Side::from_str("side_a").unwrap(), Side::SideA);
        assert_eq!(Side::from_str("SIDE_B").unwrap(), Side::SideB);
        assert_eq!(Side::Neutral.to_string(), "neutral");
    }

    #[test]
    fn opponents_are_symmetric() {
        assert_eq!(Side::SideA.opponent(), Some(Side::SideB));
        assert_eq!(Side::SideB.opponent(), Some(Side::SideA));
        assert_eq!(Side::Neutral.opponent(), None);
    }
}
