//! The `Plant` entity, owned by a growing unit.

use chrono::{DateTime, Utc};
use greenhouse_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{PlantName, PlantStatus};

/// Plain form of a [`Plant`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantPrimitives {
    /// Plant identifier.
    pub id: Uuid,
    /// Species this plant belongs to, if known.
    pub species_id: Option<Uuid>,
    /// Optional nickname.
    pub name: Option<String>,
    /// When the plant went in.
    pub planted_date: Option<DateTime<Utc>>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Lifecycle status.
    pub status: PlantStatus,
}

/// A plant growing in a unit. Plants exist only inside their growing unit
/// and are identified by id within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    id: Uuid,
    species_id: Option<Uuid>,
    name: Option<PlantName>,
    planted_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    status: PlantStatus,
}

impl Plant {
    /// Creates a plant.
    #[must_use]
    pub fn new(
        id: Uuid,
        species_id: Option<Uuid>,
        name: Option<PlantName>,
        planted_date: Option<DateTime<Utc>>,
        notes: Option<String>,
        status: PlantStatus,
    ) -> Self {
        Self {
            id,
            species_id,
            name,
            planted_date,
            notes,
            status,
        }
    }

    /// Plant identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Species identifier.
    #[must_use]
    pub fn species_id(&self) -> Option<Uuid> {
        self.species_id
    }

    /// Nickname.
    #[must_use]
    pub fn name(&self) -> Option<&PlantName> {
        self.name.as_ref()
    }

    /// Planting date.
    #[must_use]
    pub fn planted_date(&self) -> Option<DateTime<Utc>> {
        self.planted_date
    }

    /// Notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> PlantStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: PlantStatus) {
        self.status = status;
    }

    /// Returns the plain form.
    #[must_use]
    pub fn to_primitives(&self) -> PlantPrimitives {
        PlantPrimitives {
            id: self.id,
            species_id: self.species_id,
            name: self.name.as_ref().map(|n| n.as_str().to_owned()),
            planted_date: self.planted_date,
            notes: self.notes.clone(),
            status: self.status,
        }
    }
}

impl TryFrom<PlantPrimitives> for Plant {
    type Error = DomainError;

    fn try_from(p: PlantPrimitives) -> Result<Self, Self::Error> {
        Ok(Self {
            id: p.id,
            species_id: p.species_id,
            name: p.name.map(PlantName::new).transpose()?,
            planted_date: p.planted_date,
            notes: p.notes,
            status: p.status,
        })
    }
}
