use std::fmt;
use std::str::FromStr;

use super::catalog::CatalogError;

/// Platform routing values for Riot API (Summoner-v4, League-v4, Champion-Mastery-v4...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    BR1,
    EUN1,
    EUW1,
    JP1,
    KR,
    LA1,
    LA2,
    ME1,
    NA1,
    OC1,
    TR1,
    RU,
    PH2,
    SG2,
    TH2,
    TW2,
    VN2,
}

impl Platform {
    pub const ALL: [Platform; 17] = [
        Self::BR1,
        Self::EUN1,
        Self::EUW1,
        Self::JP1,
        Self::KR,
        Self::LA1,
        Self::LA2,
        Self::ME1,
        Self::NA1,
        Self::OC1,
        Self::TR1,
        Self::RU,
        Self::PH2,
        Self::SG2,
        Self::TH2,
        Self::TW2,
        Self::VN2,
    ];

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BR1 => "br1",
            Self::EUN1 => "eun1",
            Self::EUW1 => "euw1",
            Self::JP1 => "jp1",
            Self::KR => "kr",
            Self::LA1 => "la1",
            Self::LA2 => "la2",
            Self::ME1 => "me1",
            Self::NA1 => "na1",
            Self::OC1 => "oc1",
            Self::TR1 => "tr1",
            Self::RU => "ru",
            Self::PH2 => "ph2",
            Self::SG2 => "sg2",
            Self::TH2 => "th2",
            Self::TW2 => "tw2",
            Self::VN2 => "vn2",
        }
    }

    /// Exact platform id lookup, e.g. `euw1`. Case-insensitive.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.to_lowercase();
        Self::ALL.into_iter().find(|p| p.as_str() == id)
    }

    pub fn to_region(self) -> Region {
        match self {
            Self::BR1 | Self::LA1 | Self::LA2 | Self::NA1 => Region::Americas,
            Self::JP1 | Self::KR => Region::Asia,
            Self::EUN1 | Self::EUW1 | Self::ME1 | Self::RU | Self::TR1 => Region::Europe,
            Self::OC1 | Self::PH2 | Self::SG2 | Self::TH2 | Self::TW2 | Self::VN2 => Region::Sea,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BR1 => "Brazil",
            Self::EUN1 => "EU Nordic & East",
            Self::EUW1 => "EU West",
            Self::JP1 => "Japan",
            Self::KR => "Korea",
            Self::LA1 => "Latin America North",
            Self::LA2 => "Latin America South",
            Self::ME1 => "Middle East",
            Self::NA1 => "North America",
            Self::OC1 => "Oceania",
            Self::TR1 => "Turkey",
            Self::RU => "Russia",
            Self::PH2 => "Philippines",
            Self::SG2 => "Singapore",
            Self::TH2 => "Thailand",
            Self::TW2 => "Taiwan",
            Self::VN2 => "Vietnam",
        }
    }
}

/// Accepts both platform ids (`euw1`) and the short server names players use (`EUW`).
impl FromStr for Platform {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BR" | "BR1" => Ok(Self::BR1),
            "EUNE" | "EUN" | "EUN1" => Ok(Self::EUN1),
            "EUW" | "EUW1" => Ok(Self::EUW1),
            "JP" | "JP1" => Ok(Self::JP1),
            "KR" => Ok(Self::KR),
            "LAN" | "LA1" => Ok(Self::LA1),
            "LAS" | "LA2" => Ok(Self::LA2),
            "ME" | "ME1" => Ok(Self::ME1),
            "NA" | "NA1" => Ok(Self::NA1),
            "OCE" | "OC" | "OC1" => Ok(Self::OC1),
            "TR" | "TR1" => Ok(Self::TR1),
            "RU" => Ok(Self::RU),
            "PH" | "PH2" => Ok(Self::PH2),
            "SG" | "SG2" => Ok(Self::SG2),
            "TH" | "TH2" => Ok(Self::TH2),
            "TW" | "TW2" => Ok(Self::TW2),
            "VN" | "VN2" => Ok(Self::VN2),
            _ => Err(CatalogError::InvalidLocation(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Regional routing values for Riot API (Account-v1, Match-v5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub const ALL: [Region; 4] = [Self::Americas, Self::Asia, Self::Europe, Self::Sea];

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }

    /// Upper-case routing name, e.g. `EUROPE`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_uppercase().as_str() {
            "AMERICAS" => Some(Self::Americas),
            "ASIA" => Some(Self::Asia),
            "EUROPE" => Some(Self::Europe),
            "SEA" => Some(Self::Sea),
            _ => None,
        }
    }

    /// Account-v1 is not served from the SEA cluster, those players are looked up through ASIA.
    pub fn account_region(self) -> Region {
        match self {
            Self::Sea => Self::Asia,
            other => other,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved API host: either a single platform shard or a continental routing cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostTarget {
    Platform(Platform),
    Region(Region),
}

impl HostTarget {
    pub fn base_url(&self) -> String {
        match self {
            Self::Platform(platform) => platform.base_url(),
            Self::Region(region) => region.base_url(),
        }
    }
}

impl From<Platform> for HostTarget {
    fn from(value: Platform) -> Self {
        Self::Platform(value)
    }
}

impl From<Region> for HostTarget {
    fn from(value: Region) -> Self {
        Self::Region(value)
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform(platform) => platform.fmt(f),
            Self::Region(region) => write!(f, "{}", region.as_str().to_uppercase()),
        }
    }
}

/// Resolve a platform id or a routing region name into a host.
///
/// Platform ids are tried first (lower-cased), then region names (upper-cased).
pub fn resolve_host(identifier: &str) -> Result<HostTarget, CatalogError> {
    if let Some(platform) = Platform::from_id(identifier) {
        return Ok(HostTarget::Platform(platform));
    }

    Region::from_name(identifier)
        .map(HostTarget::Region)
        .ok_or_else(|| CatalogError::InvalidLocation(identifier.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_ids_resolve_case_insensitively() {
        assert_eq!(
            resolve_host("euw1").unwrap(),
            HostTarget::Platform(Platform::EUW1)
        );
        assert_eq!(
            resolve_host("EUW1").unwrap(),
            HostTarget::Platform(Platform::EUW1)
        );
        assert_eq!(resolve_host("Kr").unwrap(), HostTarget::Platform(Platform::KR));
    }

    #[test]
    fn region_names_resolve_after_platforms() {
        assert_eq!(
            resolve_host("europe").unwrap(),
            HostTarget::Region(Region::Europe)
        );
        assert_eq!(
            resolve_host("AmErIcAs").unwrap(),
            HostTarget::Region(Region::Americas)
        );
    }

    #[test]
    fn unknown_location_is_rejected() {
        let err = resolve_host("atlantis").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidLocation(ref s) if s == "atlantis"));

        // Short server names are CLI aliases, not host identifiers.
        assert!(resolve_host("EUW").is_err());
    }

    #[test]
    fn base_urls_are_built_from_ids() {
        assert_eq!(
            HostTarget::from(Platform::NA1).base_url(),
            "https://na1.api.riotgames.com"
        );
        assert_eq!(
            HostTarget::from(Region::Sea).base_url(),
            "https://sea.api.riotgames.com"
        );
    }

    #[test]
    fn platform_aliases_and_routing() {
        assert_eq!("euw".parse::<Platform>().unwrap(), Platform::EUW1);
        assert_eq!("EUNE".parse::<Platform>().unwrap(), Platform::EUN1);
        assert!("xx".parse::<Platform>().is_err());

        assert_eq!(Platform::KR.to_region(), Region::Asia);
        assert_eq!(Platform::OC1.to_region(), Region::Sea);
        assert_eq!(Platform::OC1.to_region().account_region(), Region::Asia);
        assert_eq!(Platform::EUW1.to_region().account_region(), Region::Europe);
        assert_eq!(Platform::EUW1.to_string(), "EUW1");
    }
}
