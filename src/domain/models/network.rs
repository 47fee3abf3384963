use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::UnknownNetwork;

/// Carrier network a message is addressed through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Tm,
    Globe,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Tm, Network::Globe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Tm => "tm",
            Network::Globe => "globe",
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tm" => Ok(Network::Tm),
            "globe" => Ok(Network::Globe),
            other => Err(UnknownNetwork(other.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
