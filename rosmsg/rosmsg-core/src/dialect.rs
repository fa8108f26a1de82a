use std::{fmt, str::FromStr};

use crate::ParseError;

/// Input dialects of the message definition language.
/// Names follow the MCAP schema encoding registry: <https://mcap.dev/spec/registry>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// ROS 1 `.msg` (`ros1msg`)
    #[default]
    Ros1Msg,
    /// ROS 2 `.msg` (`ros2msg`)
    Ros2Msg,
    /// ROS 2 IDL (`ros2idl`)
    Ros2Idl,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ros1Msg => "ros1msg",
            Self::Ros2Msg => "ros2msg",
            Self::Ros2Idl => "ros2idl",
        }
    }

    /// Whether definitions of this dialect are parsed line by line.
    pub fn is_line_oriented(&self) -> bool {
        !matches!(self, Self::Ros2Idl)
    }
}

impl FromStr for Dialect {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ros1msg" | "ros1" => Ok(Self::Ros1Msg),
            "ros2msg" | "ros2" => Ok(Self::Ros2Msg),
            "ros2idl" | "idl" => Ok(Self::Ros2Idl),
            other => Err(ParseError::UnsupportedDialect {
                dialect: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
