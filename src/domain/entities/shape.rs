//! Shape families for QR body modules and finder-pattern eyes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a shape name does not belong to a known family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    #[error("Unknown body shape: '{0}'")]
    UnknownBodyShape(String),

    #[error("Unknown eye shape: '{0}'")]
    UnknownEyeShape(String),
}

/// Shape used to paint each dark data module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyShape {
    #[default]
    Square,
    Rounded,
    Circle,
    Dot,
    /// Neighbor-aware rounding that merges adjacent modules into blobs.
    Liquid,
}

impl BodyShape {
    pub const ALL: [BodyShape; 5] = [
        BodyShape::Square,
        BodyShape::Rounded,
        BodyShape::Circle,
        BodyShape::Dot,
        BodyShape::Liquid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyShape::Square => "SQUARE",
            BodyShape::Rounded => "ROUNDED",
            BodyShape::Circle => "CIRCLE",
            BodyShape::Dot => "DOT",
            BodyShape::Liquid => "LIQUID",
        }
    }
}

impl fmt::Display for BodyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyShape {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StyleError::UnknownBodyShape(s.to_string()))
    }
}

/// Shape family for the three finder patterns.
///
/// [`EyeShape::Square`] means "no custom eyes": finder cells are painted
/// inline with the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EyeShape {
    #[default]
    Square,
    Rounded,
    Circle,
    /// Top-left and bottom-right corners rounded, the other two sharp.
    Leaf,
}

impl EyeShape {
    pub const ALL: [EyeShape; 4] = [
        EyeShape::Square,
        EyeShape::Rounded,
        EyeShape::Circle,
        EyeShape::Leaf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EyeShape::Square => "SQUARE",
            EyeShape::Rounded => "ROUNDED",
            EyeShape::Circle => "CIRCLE",
            EyeShape::Leaf => "LEAF",
        }
    }
}

impl fmt::Display for EyeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EyeShape {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StyleError::UnknownEyeShape(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_shape_from_str_case_insensitive() {
        assert_eq!("liquid".parse::<BodyShape>().unwrap(), BodyShape::Liquid);
        assert_eq!("ROUNDED".parse::<BodyShape>().unwrap(), BodyShape::Rounded);
    }

    #[test]
    fn test_unknown_body_shape_fails() {
        let err = "HEXAGON".parse::<BodyShape>().unwrap_err();
        assert_eq!(err, StyleError::UnknownBodyShape("HEXAGON".to_string()));
    }

    #[test]
    fn test_unknown_eye_shape_fails() {
        assert!("star".parse::<EyeShape>().is_err());
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&EyeShape::Leaf).unwrap();
        assert_eq!(json, "\"LEAF\"");

        let shape: BodyShape = serde_json::from_str("\"DOT\"").unwrap();
        assert_eq!(shape, BodyShape::Dot);
    }

    #[test]
    fn test_serde_rejects_unknown_variant() {
        let result = serde_json::from_str::<BodyShape>("\"TRIANGLE\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_matches_as_str() {
        for shape in BodyShape::ALL {
            assert_eq!(shape.to_string(), shape.as_str());
        }
        for shape in EyeShape::ALL {
            assert_eq!(shape.to_string(), shape.as_str());
        }
    }
}
