use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::TypeError;

/// The closed set of entity types the console can manage.
///
/// Resolution by name is exact and case-sensitive: `"State"` resolves,
/// `"state"` does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    /// Every known kind, in registry order.
    pub const ALL: [EntityKind; 7] = [
        Self::BaseModel,
        Self::User,
        Self::State,
        Self::City,
        Self::Amenity,
        Self::Place,
        Self::Review,
    ];

    /// Resolve a type name to a kind.
    pub fn resolve(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The type name used in keys, records, and console output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Amenity => "Amenity",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }

    /// Fields every instance of this kind carries from construction.
    pub const fn declared_fields(self) -> &'static [&'static str] {
        match self {
            Self::BaseModel => &[],
            Self::User => &["email", "password", "first_name", "last_name"],
            Self::State => &["name"],
            Self::City => &["state_id", "name"],
            Self::Amenity => &["name"],
            Self::Place => &[
                "city_id",
                "user_id",
                "name",
                "description",
                "number_rooms",
                "number_bathrooms",
                "max_guest",
                "price_by_night",
                "latitude",
                "longitude",
                "amenity_ids",
            ],
            Self::Review => &["place_id", "user_id", "text"],
        }
    }

    /// Whether `field` is one of this kind's declared fields.
    pub fn declares(self, field: &str) -> bool {
        self.declared_fields().contains(&field)
    }

    /// Construct a fresh instance with a new identity.
    pub fn instantiate(self) -> Entity {
        Entity::new(self)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| TypeError::UnknownKind(s.to_string()))
    }
}
