//! Configuration errors
//!
//! Only construction and settings parsing can fail. Once a [`crate::sim::SimState`]
//! exists, ticking it never returns an error.

use std::fmt;

/// Reasons a [`crate::Settings`] value is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Polygon needs at least three sides.
    TooFewSides {
        /// The side count that was provided
        sides: u32,
    },
    /// A radius was zero or negative.
    NonPositiveRadius {
        /// Which radius
        what: &'static str,
        /// The rejected value
        value: f32,
    },
    /// A coefficient that must lie in `[0, 1]` did not.
    OutOfUnitRange {
        /// Which coefficient
        what: &'static str,
        /// The rejected value
        value: f32,
    },
    /// A field was NaN or infinite.
    NonFinite {
        /// Which field
        what: &'static str,
    },
    /// Gravity range is negative or inverted.
    InvalidGravityRange { min: f32, max: f32 },
    /// Initial gravity magnitude lies outside the configured range.
    GravityOutOfRange { magnitude: f32, min: f32, max: f32 },
    /// Body is too large to fit inside the polygon.
    BodyDoesNotFit { body_radius: f32, apothem: f32 },
    /// Body starts overlapping or outside the boundary.
    BodyOutsideBoundary {
        /// Edge index the body overlaps
        edge: usize,
    },
    /// Settings text could not be parsed.
    Parse {
        /// Parser message
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewSides { sides } => {
                write!(f, "boundary needs at least 3 sides (got {sides})")
            }
            Self::NonPositiveRadius { what, value } => {
                write!(f, "{what} must be positive (got {value})")
            }
            Self::OutOfUnitRange { what, value } => {
                write!(f, "{what} must be within [0, 1] (got {value})")
            }
            Self::NonFinite { what } => write!(f, "{what} must be finite"),
            Self::InvalidGravityRange { min, max } => {
                write!(f, "invalid gravity range [{min}, {max}]")
            }
            Self::GravityOutOfRange {
                magnitude,
                min,
                max,
            } => write!(f, "gravity magnitude {magnitude} outside [{min}, {max}]"),
            Self::BodyDoesNotFit {
                body_radius,
                apothem,
            } => write!(
                f,
                "body radius {body_radius} does not fit inside boundary (apothem {apothem})"
            ),
            Self::BodyOutsideBoundary { edge } => {
                write!(f, "body starts overlapping boundary edge {edge}")
            }
            Self::Parse { message } => write!(f, "failed to parse settings: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = ConfigError::OutOfUnitRange {
            what: "restitution",
            value: 1.5,
        };
        assert_eq!(err.to_string(), "restitution must be within [0, 1] (got 1.5)");
    }

    #[test]
    fn test_from_json_error() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
