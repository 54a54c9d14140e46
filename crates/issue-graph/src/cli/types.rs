//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::LinkDirection;

/// Link direction for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// The other issue references this one
    Inward,
    /// This issue references the other one
    Outward,
}

impl std::fmt::Display for DirectionArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inward => write!(f, "inward"),
            Self::Outward => write!(f, "outward"),
        }
    }
}

impl From<DirectionArg> for LinkDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Inward => LinkDirection::Inward,
            DirectionArg::Outward => LinkDirection::Outward,
        }
    }
}
