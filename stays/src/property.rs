//! Property types.
//!
//! A property is the reservable resource: it carries the owner identity used
//! for the self-booking check and the nightly rate used for price derivation.
//! From the allocator's perspective properties are read-only.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reservation::ValidationError;

/// A reservable property with its nightly rate.
///
/// Prices are integer amounts in minor currency units; money is never
/// represented as floating point.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use stays::Property;
///
/// let property = Property::builder(Uuid::new_v4(), "Seaside cottage", 100)
///     .location(Some("Brighton".to_string()))
///     .build()
///     .unwrap();
/// assert_eq!(property.price_per_night(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    location: Option<String>,
    price_per_night: i64,
    created_at: SystemTime,
}

impl Property {
    /// Creates a new property builder.
    ///
    /// The builder defaults to a fresh random id and the current time; the
    /// database layer overrides these when rehydrating stored rows.
    #[must_use]
    pub fn builder(owner_id: Uuid, title: impl Into<String>, price_per_night: i64) -> PropertyBuilder {
        PropertyBuilder {
            id: None,
            owner_id,
            title: title.into(),
            location: None,
            price_per_night,
            created_at: None,
        }
    }

    /// Returns the property identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the owner's identifier.
    #[must_use]
    pub const fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional location.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the nightly rate in minor currency units.
    #[must_use]
    pub const fn price_per_night(&self) -> i64 {
        self.price_per_night
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

/// Builder for creating `Property` instances.
#[derive(Debug)]
pub struct PropertyBuilder {
    id: Option<Uuid>,
    owner_id: Uuid,
    title: String,
    location: Option<String>,
    price_per_night: i64,
    created_at: Option<SystemTime>,
}

impl PropertyBuilder {
    /// Sets an explicit property id (used when loading stored rows).
    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the location.
    ///
    /// The location string is trimmed of leading/trailing whitespace.
    #[must_use]
    pub fn location(mut self, location: Option<String>) -> Self {
        self.location = location.map(|l| l.trim().to_string());
        self
    }

    /// Sets the creation timestamp (used when loading stored rows).
    #[must_use]
    pub fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the property.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The title is empty after trimming whitespace
    /// - The location is provided but empty after trimming
    /// - The nightly rate is negative
    pub fn build(self) -> Result<Property, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError {
                field: "title".into(),
                message: "title must be non-empty after trimming whitespace".into(),
            });
        }

        if let Some(ref location) = self.location {
            if location.is_empty() {
                return Err(ValidationError {
                    field: "location".into(),
                    message: "location must be non-empty after trimming whitespace".into(),
                });
            }
        }

        if self.price_per_night < 0 {
            return Err(ValidationError {
                field: "price_per_night".into(),
                message: format!(
                    "nightly rate must be non-negative, got {}",
                    self.price_per_night
                ),
            });
        }

        Ok(Property {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            owner_id: self.owner_id,
            title,
            location: self.location,
            price_per_night: self.price_per_night,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        })
    }
}
