//! Value objects for the Growing Units context.
//!
//! Every constructor validates its input and fails with
//! `DomainError::Validation`; once built, a value object is always valid.

use std::fmt;
use std::str::FromStr;

use greenhouse_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum length of a growing unit name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Display name of a growing unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrowingUnitName(String);

impl GrowingUnitName {
    /// Creates a name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// longer than [`MAX_NAME_LENGTH`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("growing unit name must not be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "growing unit name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrowingUnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowingUnitType {
    /// A single pot.
    Pot,
    /// An in-ground or raised bed.
    GardenBed,
    /// A suspended basket.
    HangingBasket,
    /// A box mounted under a window.
    WindowBox,
}

impl GrowingUnitType {
    /// Returns the wire form, e.g. `GARDEN_BED`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pot => "POT",
            Self::GardenBed => "GARDEN_BED",
            Self::HangingBasket => "HANGING_BASKET",
            Self::WindowBox => "WINDOW_BOX",
        }
    }
}

impl fmt::Display for GrowingUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrowingUnitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POT" => Ok(Self::Pot),
            "GARDEN_BED" => Ok(Self::GardenBed),
            "HANGING_BASKET" => Ok(Self::HangingBasket),
            "WINDOW_BOX" => Ok(Self::WindowBox),
            _ => Err(DomainError::validation(format!(
                "unknown growing unit type: {s}"
            ))),
        }
    }
}

/// Maximum number of plants a growing unit can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(u32);

impl Capacity {
    /// Creates a capacity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `value` is negative or does not
    /// fit in a `u32`.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 0 {
            return Err(DomainError::validation("capacity must not be negative"));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("capacity {value} is too large")))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Capacity {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Unit of length used by [`Dimensions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthUnit {
    /// Centimetres.
    #[default]
    Centimeters,
    /// Metres.
    Meters,
    /// Inches.
    Inches,
    /// Feet.
    Feet,
}

impl FromStr for LengthUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CENTIMETERS" | "CM" => Ok(Self::Centimeters),
            "METERS" | "M" => Ok(Self::Meters),
            "INCHES" | "IN" => Ok(Self::Inches),
            "FEET" | "FT" => Ok(Self::Feet),
            _ => Err(DomainError::validation(format!("unknown length unit: {s}"))),
        }
    }
}

/// Plain form of [`Dimensions`], as stored and carried in events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionsPrimitives {
    /// Length.
    pub length: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Unit of all three measures.
    #[serde(default)]
    pub unit: LengthUnit,
}

/// Physical size of a growing unit. All measures are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    length: f64,
    width: f64,
    height: f64,
    unit: LengthUnit,
}

impl Dimensions {
    /// Creates dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any measure is not a finite
    /// positive number.
    pub fn new(length: f64, width: f64, height: f64, unit: LengthUnit) -> Result<Self, DomainError> {
        for (label, value) in [("length", length), ("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::validation(format!(
                    "dimension {label} must be a positive number"
                )));
            }
        }
        Ok(Self {
            length,
            width,
            height,
            unit,
        })
    }

    /// Length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Unit of measure.
    #[must_use]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Returns the plain form.
    #[must_use]
    pub fn to_primitives(&self) -> DimensionsPrimitives {
        DimensionsPrimitives {
            length: self.length,
            width: self.width,
            height: self.height,
            unit: self.unit,
        }
    }
}

impl TryFrom<DimensionsPrimitives> for Dimensions {
    type Error = DomainError;

    fn try_from(p: DimensionsPrimitives) -> Result<Self, Self::Error> {
        Self::new(p.length, p.width, p.height, p.unit)
    }
}

/// Optional nickname given to a plant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlantName(String);

impl PlantName {
    /// Creates a plant name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// longer than [`MAX_NAME_LENGTH`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "plant name must be between 1 and {MAX_NAME_LENGTH} characters"
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status of a plant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlantStatus {
    /// Just put in the ground.
    #[default]
    Planted,
    /// Actively growing.
    Growing,
    /// Harvested.
    Harvested,
    /// Died.
    Dead,
    /// Kept for history only.
    Archived,
}

impl PlantStatus {
    /// Returns the wire form, e.g. `PLANTED`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planted => "PLANTED",
            Self::Growing => "GROWING",
            Self::Harvested => "HARVESTED",
            Self::Dead => "DEAD",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlantStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PLANTED" => Ok(Self::Planted),
            "GROWING" => Ok(Self::Growing),
            "HARVESTED" => Ok(Self::Harvested),
            "DEAD" => Ok(Self::Dead),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(DomainError::validation(format!("unknown plant status: {s}"))),
        }
    }
}
