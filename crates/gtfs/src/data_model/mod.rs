use std::num::ParseIntError;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

pub mod agency;
pub mod routes;
pub mod shapes;

/// An RGB color, serialized as six hex digits without `#` (`FF0000`). Three-digit
/// shorthands are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let rgb_strings = if hex.len() == 3 {
            [
                hex.get(0..1)?.repeat(2),
                hex.get(1..2)?.repeat(2),
                hex.get(2..3)?.repeat(2),
            ]
        } else if hex.len() == 6 {
            [
                hex.get(0..2)?.to_owned(),
                hex.get(2..4)?.to_owned(),
                hex.get(4..6)?.to_owned(),
            ]
        } else {
            return None;
        };
        let rgb = rgb_strings
            .iter()
            .map(|val| u8::from_str_radix(val, 16))
            .collect::<Result<Vec<u8>, ParseIntError>>()
            .ok()?;
        Some(Color {
            red: rgb[0],
            green: rgb[1],
            blue: rgb[2],
        })
    }

    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const fn red() -> Self {
        Self::from_rgb(255, 0, 0)
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| D::Error::custom(format!("invalid color '{hex}'")))
    }
}

/// WGS84 degrees, -90.0 to 90.0.
pub type Latitude = f64;
/// WGS84 degrees, -180.0 to 180.0.
pub type Longitude = f64;
/// IETF BCP 47 code such as `en-US`.
pub type LanguageCode = String;
/// IANA zone name such as `America/New_York`.
pub type Timezone = String;
pub type Url = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_round_trip_through_hex() {
        assert_eq!(Color::red().to_hex(), "FF0000");
        assert_eq!(Color::from_hex("0039A6"), Some(Color::from_rgb(0, 0x39, 0xA6)));
        assert_eq!(Color::from_hex("fff"), Some(Color::from_rgb(255, 255, 255)));
    }

    #[test]
    fn malformed_colors_are_rejected() {
        assert_eq!(Color::from_hex("#FF0000"), None);
        assert_eq!(Color::from_hex("GG0000"), None);
        assert!(serde_json::from_str::<Color>("\"12\"").is_err());
    }
}
