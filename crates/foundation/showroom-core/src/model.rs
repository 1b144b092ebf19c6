//! Row types for the managed store's tables.
//!
//! Field names match the backend schema exactly so rows serialize straight
//! onto the REST wire. Read types carry server-side columns (id, timestamps);
//! the `New*` types carry only what an insert is allowed to send.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ============== Inventory ==============

/// A vehicle listed for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    /// Free-form, e.g. "45,000 km".
    pub mileage: Option<String>,
    pub fuel_type: String,
    pub transmission: String,
    pub description: Option<String>,
    /// Convenience reference to the primary image.
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    /// "Make Model" as shown in listings and emails.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: Option<String>,
    pub fuel_type: String,
    pub transmission: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl NewCar {
    pub fn validate(&self) -> Result<()> {
        if self.make.trim().is_empty() {
            return Err(Error::MissingField("make"));
        }
        if self.model.trim().is_empty() {
            return Err(Error::MissingField("model"));
        }
        Ok(())
    }
}

impl Default for NewCar {
    fn default() -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: 2020,
            price: 0.0,
            mileage: None,
            fuel_type: "Petrol".to_string(),
            transmission: "Manual".to_string(),
            description: None,
            image_url: None,
        }
    }
}

/// A gallery image belonging to a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarImage {
    pub id: Uuid,
    pub car_id: Uuid,
    pub image_url: String,
    pub storage_path: String,
    pub is_primary: Option<bool>,
    pub display_order: Option<i32>,
    pub alt_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CarImage {
    pub fn primary(&self) -> bool {
        self.is_primary.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCarImage {
    pub car_id: Uuid,
    pub image_url: String,
    pub storage_path: String,
    pub is_primary: bool,
    pub display_order: i32,
    pub alt_text: String,
}

impl NewCarImage {
    /// Row for a freshly uploaded image: primary only when the gallery was
    /// empty, appended at the end of the display order.
    pub fn for_upload(
        car_id: Uuid,
        image_url: String,
        storage_path: String,
        existing: &[CarImage],
    ) -> Self {
        Self {
            car_id,
            image_url,
            storage_path,
            is_primary: existing.is_empty(),
            display_order: next_display_order(existing),
            alt_text: format!("Car image {}", existing.len() + 1),
        }
    }
}

/// First slot after the current highest display_order, 0 for an empty gallery.
pub fn next_display_order(images: &[CarImage]) -> i32 {
    images
        .iter()
        .filter_map(|img| img.display_order)
        .max()
        .map(|n| n + 1)
        .unwrap_or(0)
}

/// The image flagged primary, if any.
pub fn primary_image(images: &[CarImage]) -> Option<&CarImage> {
    images.iter().find(|img| img.primary())
}

/// One-to-one performance and dimension sheet for a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSpecification {
    pub id: Uuid,
    pub car_id: Uuid,
    pub engine_size: Option<String>,
    pub horsepower: Option<f64>,
    pub torque: Option<f64>,
    pub acceleration_0_100: Option<f64>,
    pub top_speed: Option<f64>,
    pub fuel_consumption_city: Option<f64>,
    pub fuel_consumption_highway: Option<f64>,
    pub fuel_consumption_combined: Option<f64>,
    pub co2_emissions: Option<f64>,
    pub drivetrain: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub number_of_doors: Option<f64>,
    pub number_of_seats: Option<f64>,
    pub boot_capacity: Option<f64>,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub wheelbase: Option<f64>,
    pub warranty_years: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCarSpecification {
    pub car_id: Uuid,
    pub engine_size: Option<String>,
    pub horsepower: Option<f64>,
    pub torque: Option<f64>,
    pub acceleration_0_100: Option<f64>,
    pub top_speed: Option<f64>,
    pub fuel_consumption_city: Option<f64>,
    pub fuel_consumption_highway: Option<f64>,
    pub fuel_consumption_combined: Option<f64>,
    pub co2_emissions: Option<f64>,
    pub drivetrain: Option<String>,
    pub exterior_color: Option<String>,
    pub interior_color: Option<String>,
    pub number_of_doors: Option<f64>,
    pub number_of_seats: Option<f64>,
    pub boot_capacity: Option<f64>,
    pub weight: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub wheelbase: Option<f64>,
    pub warranty_years: Option<f64>,
}

// ============== Leads ==============

/// A message sent through the contact page or a car detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub car_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub car_id: Option<Uuid>,
}

impl NewContactInquiry {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::MissingField("email"));
        }
        if self.message.trim().is_empty() {
            return Err(Error::MissingField("message"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceApplication {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub annual_income: Option<f64>,
    pub loan_amount: Option<f64>,
    pub employment_status: Option<String>,
    pub car_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFinanceApplication {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub annual_income: Option<f64>,
    pub loan_amount: Option<f64>,
    pub employment_status: Option<String>,
    pub car_id: Option<Uuid>,
}

impl NewFinanceApplication {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::MissingField("email"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub appointment_type: String,
    pub appointment_date: DateTime<Utc>,
    pub car_id: Option<Uuid>,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub appointment_type: String,
    pub appointment_date: DateTime<Utc>,
    pub car_id: Option<Uuid>,
    pub message: Option<String>,
}

impl NewAppointment {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::MissingField("email"));
        }
        if self.appointment_type.trim().is_empty() {
            return Err(Error::MissingField("appointment_type"));
        }
        Ok(())
    }
}

/// An import/order request for a car not currently in stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarOrder {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub car_make: String,
    pub car_model: String,
    pub budget_range: Option<String>,
    pub special_requirements: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCarOrder {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub car_make: String,
    pub car_model: String,
    pub budget_range: Option<String>,
    pub special_requirements: Option<String>,
}

impl NewCarOrder {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::MissingField("email"));
        }
        if self.car_make.trim().is_empty() {
            return Err(Error::MissingField("car_make"));
        }
        if self.car_model.trim().is_empty() {
            return Err(Error::MissingField("car_model"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub car_purchased: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub is_approved: Option<bool>,
    pub is_featured: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Testimonial {
    pub fn approved(&self) -> bool {
        self.is_approved.unwrap_or(false)
    }

    pub fn featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub rating: i32,
    pub title: Option<String>,
    pub content: String,
    pub car_purchased: Option<String>,
    pub purchase_date: Option<NaiveDate>,
}

impl NewTestimonial {
    pub fn validate(&self) -> Result<()> {
        if self.rating < 1 || self.rating > 5 {
            return Err(Error::InvalidRating);
        }
        if self.customer_name.trim().is_empty() {
            return Err(Error::MissingField("customer_name"));
        }
        if self.content.trim().is_empty() {
            return Err(Error::MissingField("content"));
        }
        Ok(())
    }
}

// ============== Content ==============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub display_order: Option<i32>,
    pub is_featured: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(order: Option<i32>, primary: bool) -> CarImage {
        CarImage {
            id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            image_url: "https://example.test/img.jpg".to_string(),
            storage_path: "abc/1.jpg".to_string(),
            is_primary: Some(primary),
            display_order: order,
            alt_text: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_contact_requires_name() {
        let inquiry = NewContactInquiry {
            name: "".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            message: "Is the Golf still available?".to_string(),
            car_id: None,
        };
        assert!(matches!(
            inquiry.validate(),
            Err(Error::MissingField("name"))
        ));
    }

    #[test]
    fn test_contact_whitespace_name_rejected() {
        let inquiry = NewContactInquiry {
            name: "   ".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            message: "Hello".to_string(),
            car_id: None,
        };
        assert!(inquiry.validate().is_err());
    }

    #[test]
    fn test_contact_valid() {
        let inquiry = NewContactInquiry {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: Some("+357 99 123456".to_string()),
            message: "Hello".to_string(),
            car_id: None,
        };
        assert!(inquiry.validate().is_ok());
    }

    #[test]
    fn test_testimonial_unrated_rejected() {
        let t = NewTestimonial {
            customer_name: "Andreas".to_string(),
            customer_email: None,
            rating: 0,
            title: None,
            content: "Great service".to_string(),
            car_purchased: None,
            purchase_date: None,
        };
        assert!(matches!(t.validate(), Err(Error::InvalidRating)));
    }

    #[test]
    fn test_testimonial_rating_bounds() {
        let mut t = NewTestimonial {
            customer_name: "Andreas".to_string(),
            customer_email: None,
            rating: 5,
            title: None,
            content: "Great service".to_string(),
            car_purchased: None,
            purchase_date: None,
        };
        assert!(t.validate().is_ok());
        t.rating = 6;
        assert!(t.validate().is_err());
        t.rating = 1;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_order_requires_make_and_model() {
        let order = NewCarOrder {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            car_make: "Audi".to_string(),
            car_model: "".to_string(),
            budget_range: None,
            special_requirements: None,
        };
        assert!(matches!(
            order.validate(),
            Err(Error::MissingField("car_model"))
        ));
    }

    #[test]
    fn test_next_display_order() {
        assert_eq!(next_display_order(&[]), 0);

        let images = vec![image(Some(0), true), image(Some(3), false), image(None, false)];
        assert_eq!(next_display_order(&images), 4);
    }

    #[test]
    fn test_upload_row_primary_only_when_gallery_empty() {
        let car_id = Uuid::new_v4();
        let first = NewCarImage::for_upload(
            car_id,
            "https://example.test/a.jpg".to_string(),
            format!("{car_id}/1.jpg"),
            &[],
        );
        assert!(first.is_primary);
        assert_eq!(first.display_order, 0);
        assert_eq!(first.alt_text, "Car image 1");

        let existing = vec![image(Some(0), true)];
        let second = NewCarImage::for_upload(
            car_id,
            "https://example.test/b.jpg".to_string(),
            format!("{car_id}/2.jpg"),
            &existing,
        );
        assert!(!second.is_primary);
        assert_eq!(second.display_order, 1);
        assert_eq!(second.alt_text, "Car image 2");
    }

    #[test]
    fn test_car_row_deserializes_from_store_json() {
        let raw = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "make": "BMW",
            "model": "320i",
            "year": 2021,
            "price": 28000,
            "mileage": "35,000 km",
            "fuel_type": "Petrol",
            "transmission": "Automatic",
            "description": null,
            "image_url": null,
            "created_at": "2025-01-15T10:30:00+00:00",
            "updated_at": "2025-01-15T10:30:00+00:00"
        }"#;
        let car: Car = serde_json::from_str(raw).expect("car row should deserialize");
        assert_eq!(car.make, "BMW");
        assert_eq!(car.price, 28000.0);
        assert_eq!(car.display_name(), "BMW 320i");
    }
}
