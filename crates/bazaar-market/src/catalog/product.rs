//! Product listing types.

use crate::error::MarketError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// How a rental is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentalMode {
    /// Billed per started hour.
    #[serde(rename = "PER_HOUR")]
    PerHour,
    /// Billed per started calendar day.
    #[serde(rename = "PER_DAY")]
    PerDay,
}

impl RentalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalMode::PerHour => "PER_HOUR",
            RentalMode::PerDay => "PER_DAY",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PER_HOUR" => Some(RentalMode::PerHour),
            "PER_DAY" => Some(RentalMode::PerDay),
            _ => None,
        }
    }

    /// Billing unit name for display ("hour" / "day").
    pub fn unit_name(&self) -> &'static str {
        match self {
            RentalMode::PerHour => "hour",
            RentalMode::PerDay => "day",
        }
    }
}

/// A product's rental terms: price per billing unit plus the unit itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentalRate {
    /// Price per billing unit.
    pub price: f64,
    /// The billing unit.
    pub mode: RentalMode,
}

/// Server-owned availability state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    /// Listed and open for purchase or booking.
    #[default]
    Available,
    /// Bought; no longer listed.
    Sold,
    /// Currently booked for a rental window.
    Rented,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "AVAILABLE",
            AvailabilityStatus::Sold => "SOLD",
            AvailabilityStatus::Rented => "RENTED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(AvailabilityStatus::Available),
            "SOLD" => Some(AvailabilityStatus::Sold),
            "RENTED" => Some(AvailabilityStatus::Rented),
            _ => None,
        }
    }
}

/// A product listing as the catalog service returns it.
///
/// Read-only from the client's perspective. `rent` and `type_of_rent` are
/// both present or both absent on valid server data; [`Product::rental_rate`]
/// is the paired accessor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, server-assigned id.
    pub id: ProductId,
    /// Listing title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Categories; non-empty for a valid listing.
    pub categories: Vec<String>,
    /// Sale price; absent means not for sale.
    #[serde(default)]
    pub selling_price: Option<f64>,
    /// Rental price per billing unit; absent means not for rent.
    #[serde(default)]
    pub rent: Option<f64>,
    /// Rental billing unit; absent means not for rent.
    #[serde(default)]
    pub type_of_rent: Option<RentalMode>,
    /// Server-owned availability state.
    pub availability_status: AvailabilityStatus,
    /// Start of the current or most recent booking, display-only.
    #[serde(default)]
    pub rent_start_time: Option<String>,
    /// End of the current or most recent booking, display-only.
    #[serde(default)]
    pub rent_end_time: Option<String>,
    /// Creation timestamp, display-only.
    pub created_at: String,
}

impl Product {
    /// Rental terms, present only when both halves of the pair are set.
    pub fn rental_rate(&self) -> Option<RentalRate> {
        match (self.rent, self.type_of_rent) {
            (Some(price), Some(mode)) => Some(RentalRate { price, mode }),
            _ => None,
        }
    }

    /// Check if the listing can be rented.
    pub fn is_rentable(&self) -> bool {
        self.rental_rate().is_some()
    }

    /// Check if the listing can be bought.
    pub fn is_for_sale(&self) -> bool {
        self.selling_price.is_some()
    }

    /// Check if the listing is open for purchase or booking.
    pub fn is_available(&self) -> bool {
        self.availability_status == AvailabilityStatus::Available
    }

    /// Truncated description for collapsed list rows, `None` when the full
    /// text already fits. Cuts on a character boundary.
    pub fn description_preview(&self, max_chars: usize) -> Option<String> {
        if self.description.chars().count() <= max_chars {
            return None;
        }
        Some(self.description.chars().take(max_chars).collect())
    }
}

/// The create/edit payload for a listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Listing title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Categories; at least one required.
    #[serde(rename = "categoriesList")]
    pub categories: Vec<String>,
    /// Sale price, zero or more.
    pub selling_price: f64,
    /// Rental price per billing unit, zero or more.
    pub rent: f64,
    /// Rental billing unit.
    #[serde(default)]
    pub type_of_rent: Option<RentalMode>,
}

impl ProductDraft {
    /// Validate the draft before submission. Local failures here never reach
    /// the server.
    pub fn validate(&self) -> Result<(), MarketError> {
        if self.title.trim().is_empty() {
            return Err(MarketError::InvalidProduct("Title is required".into()));
        }
        if self.categories.is_empty() {
            return Err(MarketError::InvalidProduct(
                "At least one category must be provided".into(),
            ));
        }
        if self.categories.iter().any(|c| c.trim().is_empty()) {
            return Err(MarketError::InvalidProduct(
                "Category name must not be blank".into(),
            ));
        }
        if self.type_of_rent.is_none() {
            return Err(MarketError::InvalidProduct(
                "Type of rent is required (PER_HOUR, PER_DAY)".into(),
            ));
        }
        if self.selling_price < 0.0 {
            return Err(MarketError::InvalidProduct(
                "Selling price must be zero or more".into(),
            ));
        }
        if self.rent < 0.0 {
            return Err(MarketError::InvalidProduct("Rent must be zero or more".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Product {
        Product {
            id: ProductId::new(7),
            title: "Cordless drill".to_string(),
            description: "Barely used".to_string(),
            categories: vec!["TOOLS".to_string()],
            selling_price: Some(120.0),
            rent: Some(15.0),
            type_of_rent: Some(RentalMode::PerHour),
            availability_status: AvailabilityStatus::Available,
            rent_start_time: None,
            rent_end_time: None,
            created_at: "1st June 2025".to_string(),
        }
    }

    #[test]
    fn test_rental_rate_pairing() {
        let mut product = listing();
        let rate = product.rental_rate().unwrap();
        assert_eq!(rate.price, 15.0);
        assert_eq!(rate.mode, RentalMode::PerHour);

        // Half a pair is not a rate
        product.type_of_rent = None;
        assert!(product.rental_rate().is_none());
        assert!(!product.is_rentable());
    }

    #[test]
    fn test_wire_deserialization() {
        let json = r#"{
            "id": 8,
            "title": "Tent",
            "description": "Sleeps four",
            "categories": ["OUTDOOR"],
            "sellingPrice": 200.0,
            "rent": 30.0,
            "typeOfRent": "PER_DAY",
            "availabilityStatus": "AVAILABLE",
            "createdAt": "3rd June 2025"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(8));
        assert_eq!(product.type_of_rent, Some(RentalMode::PerDay));
        assert!(product.rent_start_time.is_none());
        assert!(product.is_available());
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(AvailabilityStatus::Rented.as_str(), "RENTED");
        assert_eq!(
            AvailabilityStatus::from_str("SOLD"),
            Some(AvailabilityStatus::Sold)
        );
        assert_eq!(AvailabilityStatus::from_str("unknown"), None);
    }

    #[test]
    fn test_description_preview() {
        let mut product = listing();
        assert!(product.description_preview(150).is_none());

        product.description = "x".repeat(200);
        let preview = product.description_preview(150).unwrap();
        assert_eq!(preview.chars().count(), 150);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = ProductDraft {
            title: "Kayak".to_string(),
            description: String::new(),
            categories: vec!["OUTDOOR".to_string()],
            selling_price: 300.0,
            rent: 25.0,
            type_of_rent: Some(RentalMode::PerDay),
        };
        assert!(draft.validate().is_ok());

        draft.categories.clear();
        assert!(draft.validate().is_err());

        draft.categories = vec!["OUTDOOR".to_string()];
        draft.rent = -1.0;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_wire_field_names() {
        let draft = ProductDraft {
            title: "Kayak".to_string(),
            categories: vec!["OUTDOOR".to_string()],
            type_of_rent: Some(RentalMode::PerDay),
            ..ProductDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("categoriesList").is_some());
        assert_eq!(json["typeOfRent"], "PER_DAY");
    }
}
