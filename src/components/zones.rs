use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Zones shipped with the tool, used when no configuration provides any
pub const DEFAULT_ZONES: [(&str, &str); 7] = [
    ("Adults", "#FF0000"),
    ("Kids/Footwear", "#FFD700"),
    ("Cashiers", "#00C853"),
    ("Replenishment/Refill", "#9C27B0"),
    ("Shipment", "#2196F3"),
    ("Operation", "#FF922B"),
    ("Fitting Rooms", "#FF7F50"),
];

/// Highest numeric hotkey that selects a zone
pub const MAX_HOTKEY: usize = 9;

/// Rejections raised while editing the zone list
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ZoneError {
    #[error("Zone name cannot be empty")]
    #[diagnostic(code(dco::zone::empty_name))]
    EmptyName,

    #[error("Zone '{0}' already exists")]
    #[diagnostic(code(dco::zone::duplicate))]
    DuplicateName(String),

    #[error("Invalid zone color '{0}', expected six hex digits like #FF922B")]
    #[diagnostic(code(dco::zone::color))]
    InvalidColor(String),

    #[error("No zone at position {0}")]
    #[diagnostic(code(dco::zone::index))]
    IndexOutOfRange(usize),
}

/// 24-bit RGB color written as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };

    /// Hex digits without the leading `#`, as spreadsheet fills expect
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Perceived brightness in `[0, 1]`
    pub fn luminance(&self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }

    /// Black or white, whichever reads better on this background
    pub fn text_color(&self) -> Rgb {
        if self.luminance() > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

impl FromStr for Rgb {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ZoneError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ZoneError::InvalidColor(s.to_string()))
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = ZoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// A named work area and its display color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub name: String,
    pub color: Rgb,
}

impl ZoneDefinition {
    /// Create a zone, trimming the name and rejecting empty ones
    pub fn new(name: &str, color: Rgb) -> Result<Self, ZoneError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ZoneError::EmptyName);
        }
        Ok(Self {
            name: name.to_string(),
            color,
        })
    }
}

/// Ordered zone list with a name to color lookup kept in sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ZoneDefinition>", into = "Vec<ZoneDefinition>")]
pub struct ZoneConfig {
    zones: Vec<ZoneDefinition>,
    colors: HashMap<String, Rgb>,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        let zones = DEFAULT_ZONES
            .iter()
            .filter_map(|(name, color)| {
                let color = color.parse().ok()?;
                ZoneDefinition::new(name, color).ok()
            })
            .collect();
        let mut config = Self {
            zones,
            colors: HashMap::new(),
        };
        config.rebuild();
        config
    }
}

impl ZoneConfig {
    /// Build a zone list, validating names
    pub fn new(zones: Vec<ZoneDefinition>) -> Result<Self, ZoneError> {
        let mut config = Self {
            zones: Vec::with_capacity(zones.len()),
            colors: HashMap::new(),
        };
        for zone in zones {
            config.add(zone)?;
        }
        Ok(config)
    }

    pub fn zones(&self) -> &[ZoneDefinition] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn color_of(&self, name: &str) -> Option<Rgb> {
        self.colors.get(name).copied()
    }

    /// Zone bound to a numeric key; `1` is the first zone in the list
    pub fn by_hotkey(&self, key: usize) -> Option<&ZoneDefinition> {
        if !(1..=MAX_HOTKEY).contains(&key) {
            return None;
        }
        self.zones.get(key - 1)
    }

    fn validate(&self, zone: &ZoneDefinition, skip: Option<usize>) -> Result<(), ZoneError> {
        if zone.name.trim().is_empty() {
            return Err(ZoneError::EmptyName);
        }
        let taken = self
            .zones
            .iter()
            .enumerate()
            .any(|(i, z)| Some(i) != skip && z.name == zone.name);
        if taken {
            return Err(ZoneError::DuplicateName(zone.name.clone()));
        }
        Ok(())
    }

    pub fn add(&mut self, zone: ZoneDefinition) -> Result<(), ZoneError> {
        self.validate(&zone, None)?;
        self.zones.push(zone);
        self.rebuild();
        Ok(())
    }

    pub fn update(&mut self, index: usize, zone: ZoneDefinition) -> Result<(), ZoneError> {
        if index >= self.zones.len() {
            return Err(ZoneError::IndexOutOfRange(index));
        }
        self.validate(&zone, Some(index))?;
        self.zones[index] = zone;
        self.rebuild();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<ZoneDefinition, ZoneError> {
        if index >= self.zones.len() {
            return Err(ZoneError::IndexOutOfRange(index));
        }
        let removed = self.zones.remove(index);
        self.rebuild();
        Ok(removed)
    }

    fn rebuild(&mut self) {
        self.colors = self
            .zones
            .iter()
            .map(|z| (z.name.clone(), z.color))
            .collect();
    }
}

impl TryFrom<Vec<ZoneDefinition>> for ZoneConfig {
    type Error = ZoneError;

    fn try_from(zones: Vec<ZoneDefinition>) -> Result<Self, Self::Error> {
        ZoneConfig::new(zones)
    }
}

impl From<ZoneConfig> for Vec<ZoneDefinition> {
    fn from(config: ZoneConfig) -> Self {
        config.zones
    }
}
