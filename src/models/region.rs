//! Platform regions and the regional routing clusters they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown region: {0}")]
pub struct UnknownRegion(pub String);

/// Platform a player's account lives on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    #[default]
    Na1,
    Br1,
    La1,
    La2,
    Euw1,
    Eune1,
    Tr1,
    Ru,
    Kr,
    Jp1,
    Oc1,
    Ph2,
    Sg2,
    Th2,
    Tw2,
    Vn2,
}

/// Regional routing cluster used by the account and match endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionalRoute {
    Americas,
    Europe,
    Asia,
    Sea,
}

impl RegionalRoute {
    pub fn host(&self) -> &'static str {
        match self {
            RegionalRoute::Americas => "americas",
            RegionalRoute::Europe => "europe",
            RegionalRoute::Asia => "asia",
            RegionalRoute::Sea => "sea",
        }
    }
}

impl Region {
    pub const ALL: [Region; 16] = [
        Region::Na1,
        Region::Br1,
        Region::La1,
        Region::La2,
        Region::Euw1,
        Region::Eune1,
        Region::Tr1,
        Region::Ru,
        Region::Kr,
        Region::Jp1,
        Region::Oc1,
        Region::Ph2,
        Region::Sg2,
        Region::Th2,
        Region::Tw2,
        Region::Vn2,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::Na1 => "NA1",
            Region::Br1 => "BR1",
            Region::La1 => "LA1",
            Region::La2 => "LA2",
            Region::Euw1 => "EUW1",
            Region::Eune1 => "EUNE1",
            Region::Tr1 => "TR1",
            Region::Ru => "RU",
            Region::Kr => "KR",
            Region::Jp1 => "JP1",
            Region::Oc1 => "OC1",
            Region::Ph2 => "PH2",
            Region::Sg2 => "SG2",
            Region::Th2 => "TH2",
            Region::Tw2 => "TW2",
            Region::Vn2 => "VN2",
        }
    }

    /// Routing cluster for account and match-v5 lookups.
    pub fn regional(&self) -> RegionalRoute {
        match self {
            Region::Na1 | Region::Br1 | Region::La1 | Region::La2 => RegionalRoute::Americas,
            Region::Euw1 | Region::Eune1 | Region::Tr1 | Region::Ru => RegionalRoute::Europe,
            Region::Kr | Region::Jp1 => RegionalRoute::Asia,
            Region::Oc1 | Region::Ph2 | Region::Sg2 | Region::Th2 | Region::Tw2 | Region::Vn2 => {
                RegionalRoute::Sea
            }
        }
    }

    /// Host prefix for platform-routed endpoints (spectator).
    pub fn platform_host(&self) -> String {
        self.code().to_lowercase()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.code() == upper)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

impl TryFrom<String> for Region {
    type Error = UnknownRegion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.code().to_string()
    }
}
