//! Value objects for the Plant Species context.

use std::fmt;
use std::str::FromStr;

use greenhouse_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Maximum length of a common name, in characters.
pub const MAX_COMMON_NAME_LENGTH: usize = 100;
/// Maximum length of a scientific name, in characters.
pub const MAX_SCIENTIFIC_NAME_LENGTH: usize = 150;
/// Maximum length of a family name, in characters.
pub const MAX_FAMILY_LENGTH: usize = 100;

fn bounded_text(value: &str, label: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > max {
        return Err(DomainError::validation(format!(
            "{label} must be between 1 and {max} characters"
        )));
    }
    Ok(trimmed.to_owned())
}

/// Everyday name of a species, e.g. "Sweet basil".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommonName(String);

impl CommonName {
    /// Creates a common name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// too long.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        bounded_text(value.as_ref(), "common name", MAX_COMMON_NAME_LENGTH).map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binomial name of a species, e.g. "Ocimum basilicum".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScientificName(String);

impl ScientificName {
    /// Creates a scientific name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// longer than [`MAX_SCIENTIFIC_NAME_LENGTH`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        bounded_text(value.as_ref(), "scientific name", MAX_SCIENTIFIC_NAME_LENGTH).map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScientificName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Botanical family, e.g. "Lamiaceae".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlantFamily(String);

impl PlantFamily {
    /// Creates a family name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// too long.
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        bounded_text(value.as_ref(), "plant family", MAX_FAMILY_LENGTH).map(Self)
    }

    /// Returns the family as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Broad grouping of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpeciesCategory {
    /// Vegetables.
    Vegetable,
    /// Culinary or medicinal herbs.
    Herb,
    /// Fruit-bearing plants.
    Fruit,
    /// Ornamental flowers.
    Flower,
    /// Succulents and cacti.
    Succulent,
    /// Trees.
    Tree,
    /// Shrubs.
    Shrub,
    /// Anything else.
    Other,
}

impl FromStr for SpeciesCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "VEGETABLE" => Ok(Self::Vegetable),
            "HERB" => Ok(Self::Herb),
            "FRUIT" => Ok(Self::Fruit),
            "FLOWER" => Ok(Self::Flower),
            "SUCCULENT" => Ok(Self::Succulent),
            "TREE" => Ok(Self::Tree),
            "SHRUB" => Ok(Self::Shrub),
            "OTHER" => Ok(Self::Other),
            _ => Err(DomainError::validation(format!("unknown species category: {s}"))),
        }
    }
}

/// How hard a species is to keep alive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    /// Forgiving.
    Easy,
    /// Needs some attention.
    #[default]
    Medium,
    /// Demanding.
    Hard,
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Self::Easy),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            _ => Err(DomainError::validation(format!("unknown difficulty: {s}"))),
        }
    }
}

/// How fast a species grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrowthRate {
    /// Slow.
    Slow,
    /// Medium.
    #[default]
    Medium,
    /// Fast.
    Fast,
}

impl FromStr for GrowthRate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SLOW" => Ok(Self::Slow),
            "MEDIUM" => Ok(Self::Medium),
            "FAST" => Ok(Self::Fast),
            _ => Err(DomainError::validation(format!("unknown growth rate: {s}"))),
        }
    }
}

/// Plain `{min, max}` pair used by the range value objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePrimitives {
    /// Lower bound, inclusive.
    pub min: f64,
    /// Upper bound, inclusive.
    pub max: f64,
}

/// Ideal temperature range in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    min: f64,
    max: f64,
}

impl TemperatureRange {
    /// Creates a temperature range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a bound is not finite or
    /// `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, DomainError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DomainError::validation("temperature bounds must be finite"));
        }
        if min > max {
            return Err(DomainError::validation(format!(
                "temperature min {min} is above max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the plain form.
    #[must_use]
    pub fn to_primitives(&self) -> RangePrimitives {
        RangePrimitives {
            min: self.min,
            max: self.max,
        }
    }
}

impl TryFrom<RangePrimitives> for TemperatureRange {
    type Error = DomainError;

    fn try_from(p: RangePrimitives) -> Result<Self, Self::Error> {
        Self::new(p.min, p.max)
    }
}

/// Soil pH range, within `0..=14`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhRange {
    min: f64,
    max: f64,
}

impl PhRange {
    /// Creates a pH range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `0 <= min <= max <= 14`.
    pub fn new(min: f64, max: f64) -> Result<Self, DomainError> {
        if !(0.0..=14.0).contains(&min) || !(0.0..=14.0).contains(&max) {
            return Err(DomainError::validation("pH bounds must be between 0 and 14"));
        }
        if min > max {
            return Err(DomainError::validation(format!(
                "pH min {min} is above max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns the plain form.
    #[must_use]
    pub fn to_primitives(&self) -> RangePrimitives {
        RangePrimitives {
            min: self.min,
            max: self.max,
        }
    }
}

impl TryFrom<RangePrimitives> for PhRange {
    type Error = DomainError;

    fn try_from(p: RangePrimitives) -> Result<Self, Self::Error> {
        Self::new(p.min, p.max)
    }
}

/// Days from planting to first harvest. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DaysToHarvest(u32);

impl DaysToHarvest {
    /// Creates a day count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `days` is not positive or does
    /// not fit in a `u32`.
    pub fn new(days: i64) -> Result<Self, DomainError> {
        if days <= 0 {
            return Err(DomainError::validation("days to harvest must be positive"));
        }
        u32::try_from(days)
            .map(Self)
            .map_err(|_| DomainError::validation(format!("days to harvest {days} is too large")))
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}
