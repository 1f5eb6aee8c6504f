//! Station and battery pack configuration keys.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Station layout: dock/battery counts and topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StationType {
    /// One independent station, 15 docks, 14 batteries.
    #[serde(rename = "1-int")]
    OneIndependent,
    /// Two independent stations, 30 docks, 28 batteries.
    #[serde(rename = "2-int")]
    TwoIndependent,
    /// Three independent stations, 45 docks, 42 batteries.
    #[serde(rename = "3-int")]
    ThreeIndependent,
    /// Two clustered stations, 30 docks, 29 batteries.
    #[serde(rename = "2-clu")]
    TwoClustered,
    /// Three clustered stations, 45 docks, 44 batteries.
    #[serde(rename = "3-clu")]
    ThreeClustered,
}

/// Topology of a station configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Stations operate with separate battery pools.
    Independent,
    /// Stations share a battery pool.
    Clustered,
}

impl StationType {
    /// All station configurations in display order.
    pub const ALL: [Self; 5] = [
        Self::OneIndependent,
        Self::TwoIndependent,
        Self::ThreeIndependent,
        Self::TwoClustered,
        Self::ThreeClustered,
    ];

    /// Display label, used verbatim in the UI and as a lookup key.
    pub fn label(self) -> &'static str {
        match self {
            Self::OneIndependent => "1 Independent Station (15 docks, 14 batteries)",
            Self::TwoIndependent => "2 Independent Stations (30 docks, 28 batteries)",
            Self::ThreeIndependent => "3 Independent Stations (45 docks, 42 batteries)",
            Self::TwoClustered => "2 Clustered Stations (30 docks, 29 batteries)",
            Self::ThreeClustered => "3 Clustered Stations (45 docks, 44 batteries)",
        }
    }

    /// Short CLI/API code, e.g. `"2-clu"`.
    pub fn code(self) -> &'static str {
        match self {
            Self::OneIndependent => "1-int",
            Self::TwoIndependent => "2-int",
            Self::ThreeIndependent => "3-int",
            Self::TwoClustered => "2-clu",
            Self::ThreeClustered => "3-clu",
        }
    }

    /// Number of stations in the configuration.
    pub fn station_count(self) -> u8 {
        match self {
            Self::OneIndependent => 1,
            Self::TwoIndependent | Self::TwoClustered => 2,
            Self::ThreeIndependent | Self::ThreeClustered => 3,
        }
    }

    pub fn topology(self) -> Topology {
        match self {
            Self::OneIndependent | Self::TwoIndependent | Self::ThreeIndependent => {
                Topology::Independent
            }
            Self::TwoClustered | Self::ThreeClustered => Topology::Clustered,
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StationType {
    type Err = String;

    /// Accepts either the short code or the full label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| {
                st.code().eq_ignore_ascii_case(needle) || st.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                let codes: Vec<&str> = Self::ALL.iter().map(|st| st.code()).collect();
                format!(
                    "unknown station \"{needle}\", available: {}",
                    codes.join(", ")
                )
            })
    }
}

/// Battery packs issued per swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BatteryType {
    /// One pack per swap.
    #[serde(rename = "1bp")]
    OneBp,
    /// Two packs per swap.
    #[serde(rename = "2bp")]
    TwoBp,
    /// Three packs per swap.
    #[serde(rename = "3bp")]
    ThreeBp,
    /// Mixed demand, up to three packs per swap.
    #[serde(rename = "mix")]
    ThreeBpMix,
}

impl BatteryType {
    /// All battery pack types in display order.
    pub const ALL: [Self; 4] = [Self::OneBp, Self::TwoBp, Self::ThreeBp, Self::ThreeBpMix];

    pub fn label(self) -> &'static str {
        match self {
            Self::OneBp => "1 BP",
            Self::TwoBp => "2 BP",
            Self::ThreeBp => "3 BP",
            Self::ThreeBpMix => "3 BP Mix",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::OneBp => "1bp",
            Self::TwoBp => "2bp",
            Self::ThreeBp => "3bp",
            Self::ThreeBpMix => "mix",
        }
    }

    /// Returns `true` for the mixed-demand pack type.
    pub fn is_mix(self) -> bool {
        matches!(self, Self::ThreeBpMix)
    }
}

impl fmt::Display for BatteryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BatteryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|bt| {
                bt.code().eq_ignore_ascii_case(needle) || bt.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                let codes: Vec<&str> = Self::ALL.iter().map(|bt| bt.code()).collect();
                format!(
                    "unknown battery type \"{needle}\", available: {}",
                    codes.join(", ")
                )
            })
    }
}

/// A (station, battery) pair; the lookup key for every static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Configuration {
    pub station: StationType,
    pub battery: BatteryType,
}

impl Configuration {
    pub const fn new(station: StationType, battery: BatteryType) -> Self {
        Self { station, battery }
    }

    /// Every configuration, station-major.
    pub fn all() -> impl Iterator<Item = Self> {
        StationType::ALL.into_iter().flat_map(|station| {
            BatteryType::ALL
                .into_iter()
                .map(move |battery| Self::new(station, battery))
        })
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {}", self.station, self.battery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_parses_code_and_label() {
        assert_eq!("2-clu".parse::<StationType>(), Ok(StationType::TwoClustered));
        assert_eq!("3-INT".parse::<StationType>(), Ok(StationType::ThreeIndependent));
        assert_eq!(
            "1 Independent Station (15 docks, 14 batteries)".parse::<StationType>(),
            Ok(StationType::OneIndependent)
        );
    }

    #[test]
    fn unknown_station_lists_codes() {
        let err = "4-int".parse::<StationType>().unwrap_err();
        assert!(err.contains("unknown station"));
        assert!(err.contains("3-clu"));
    }

    #[test]
    fn battery_parses_code_and_label() {
        assert_eq!("mix".parse::<BatteryType>(), Ok(BatteryType::ThreeBpMix));
        assert_eq!("3 bp mix".parse::<BatteryType>(), Ok(BatteryType::ThreeBpMix));
        assert_eq!(" 2 BP ".parse::<BatteryType>(), Ok(BatteryType::TwoBp));
        assert!("4 BP".parse::<BatteryType>().is_err());
    }

    #[test]
    fn twenty_configurations() {
        let all: Vec<Configuration> = Configuration::all().collect();
        assert_eq!(all.len(), 20);
        assert_eq!(
            all[0],
            Configuration::new(StationType::OneIndependent, BatteryType::OneBp)
        );
        assert_eq!(
            all[19],
            Configuration::new(StationType::ThreeClustered, BatteryType::ThreeBpMix)
        );
    }

    #[test]
    fn topology_and_count() {
        assert_eq!(StationType::TwoClustered.topology(), Topology::Clustered);
        assert_eq!(StationType::OneIndependent.topology(), Topology::Independent);
        assert_eq!(StationType::ThreeClustered.station_count(), 3);
    }
}
