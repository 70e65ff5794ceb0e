//! Hardware identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Hardware model of a node, parsed from the `hardware` self-info field.
///
/// The set is closed: it keys the static unsupported-feature tables, so an
/// unlisted hardware string parses to [`Model::NotKnown`] rather than
/// failing. Only administrative input (where a typo must be rejected, not
/// silently accepted) uses the strict [`FromStr`] parse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Model {
    R1D,
    R2D,
    R1CM,
    R1CL,
    R3,
    R3A,
    R3D,
    R3G,
    R3L,
    R3P,
    R4,
    R4A,
    R4AC,
    R4C,
    R4CM,
    D01,
    RN06,
    CR8806,
    RM1800,
    RA67,
    RA70,
    RA72,
    #[serde(rename = "NOT_KNOWN")]
    NotKnown,
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::R1D => "R1D",
            Model::R2D => "R2D",
            Model::R1CM => "R1CM",
            Model::R1CL => "R1CL",
            Model::R3 => "R3",
            Model::R3A => "R3A",
            Model::R3D => "R3D",
            Model::R3G => "R3G",
            Model::R3L => "R3L",
            Model::R3P => "R3P",
            Model::R4 => "R4",
            Model::R4A => "R4A",
            Model::R4AC => "R4AC",
            Model::R4C => "R4C",
            Model::R4CM => "R4CM",
            Model::D01 => "D01",
            Model::RN06 => "RN06",
            Model::CR8806 => "CR8806",
            Model::RM1800 => "RM1800",
            Model::RA67 => "RA67",
            Model::RA70 => "RA70",
            Model::RA72 => "RA72",
            Model::NotKnown => "NOT_KNOWN",
        }
    }

    /// Lenient parse for device-reported hardware strings.
    ///
    /// Case-insensitive; anything unlisted is [`Model::NotKnown`].
    pub fn from_hardware(hardware: &str) -> Self {
        hardware.trim().parse().unwrap_or(Model::NotKnown)
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R1D" => Ok(Model::R1D),
            "R2D" => Ok(Model::R2D),
            "R1CM" => Ok(Model::R1CM),
            "R1CL" => Ok(Model::R1CL),
            "R3" => Ok(Model::R3),
            "R3A" => Ok(Model::R3A),
            "R3D" => Ok(Model::R3D),
            "R3G" => Ok(Model::R3G),
            "R3L" => Ok(Model::R3L),
            "R3P" => Ok(Model::R3P),
            "R4" => Ok(Model::R4),
            "R4A" => Ok(Model::R4A),
            "R4AC" => Ok(Model::R4AC),
            "R4C" => Ok(Model::R4C),
            "R4CM" => Ok(Model::R4CM),
            "D01" => Ok(Model::D01),
            "RN06" => Ok(Model::RN06),
            "CR8806" => Ok(Model::CR8806),
            "RM1800" => Ok(Model::RM1800),
            "RA67" => Ok(Model::RA67),
            "RA70" => Ok(Model::RA70),
            "RA72" => Ok(Model::RA72),
            "NOT_KNOWN" => Ok(Model::NotKnown),
            other => Err(Error::UnknownModel(other.to_owned())),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hardware_parse_is_case_insensitive() {
        assert_eq!(Model::from_hardware("r3g"), Model::R3G);
        assert_eq!(Model::from_hardware("RA70"), Model::RA70);
        assert_eq!(Model::from_hardware(" cr8806 "), Model::CR8806);
    }

    #[test]
    fn unlisted_hardware_is_not_known() {
        assert_eq!(Model::from_hardware("AX9000"), Model::NotKnown);
        assert_eq!(Model::from_hardware(""), Model::NotKnown);
    }

    #[test]
    fn strict_parse_rejects_unlisted_names() {
        assert!("R3".parse::<Model>().is_ok());
        assert!("AX9000".parse::<Model>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for model in [Model::R1D, Model::RM1800, Model::NotKnown] {
            assert_eq!(model.to_string().parse::<Model>().unwrap(), model);
        }
    }
}
