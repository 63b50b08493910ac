use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three network-dependent steps of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Ip,
    Coordinates,
    PassTimes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ip => "IP address",
            Stage::Coordinates => "coordinates",
            Stage::PassTimes => "flyover times",
        };
        f.write_str(name)
    }
}

/// Public IP as reported by the IP echo service. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpAddress(String);

impl IpAddress {
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat {}, lon {}", self.latitude, self.longitude)
    }
}

/// A predicted visibility window: start as epoch seconds plus length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassWindow {
    pub risetime: i64,
    pub duration: u64,
}

/// Everything gathered by one full lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlyoverReport {
    pub ip: IpAddress,
    pub coordinates: Coordinates,
    pub passes: Vec<PassWindow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_address_rejects_blank() {
        assert!(IpAddress::new("").is_none());
        assert!(IpAddress::new("  \n").is_none());
        assert_eq!(IpAddress::new(" 1.2.3.4 ").unwrap().as_str(), "1.2.3.4");
    }

    #[test]
    fn test_report_serializes_flat_fields() {
        let report = FlyoverReport {
            ip: IpAddress::new("1.2.3.4").unwrap(),
            coordinates: Coordinates::new(37.4, -122.1),
            passes: vec![PassWindow {
                risetime: 1_000_000_000,
                duration: 600,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["ip"], "1.2.3.4");
        assert_eq!(json["coordinates"]["latitude"], 37.4);
        assert_eq!(json["passes"][0]["duration"], 600);
    }
}
