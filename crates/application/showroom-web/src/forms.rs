//! Form payloads as the browser submits them.
//!
//! Every field arrives as a string; conversion to the typed `New*` rows
//! happens here, with blank optionals becoming `None`. The raw structs are
//! kept around after a failed submit so templates can re-render the form
//! with everything the visitor typed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use showroom_core::{
    Error, NewAppointment, NewCar, NewCarOrder, NewCarSpecification, NewContactInquiry,
    NewFinanceApplication, NewTestimonial,
};

fn opt(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn opt_f64(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

fn opt_uuid(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}

/// Accepts the `datetime-local` input format, with RFC 3339 as fallback.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M") {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub car_id: String,
}

impl ContactForm {
    pub fn to_inquiry(&self) -> NewContactInquiry {
        NewContactInquiry {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: opt(&self.phone),
            message: self.message.trim().to_string(),
            car_id: opt_uuid(&self.car_id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinanceForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub annual_income: String,
    #[serde(default)]
    pub loan_amount: String,
    #[serde(default)]
    pub employment_status: String,
    #[serde(default)]
    pub car_id: String,
}

impl FinanceForm {
    pub fn to_application(&self) -> NewFinanceApplication {
        NewFinanceApplication {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: opt(&self.phone),
            annual_income: opt_f64(&self.annual_income),
            loan_amount: opt_f64(&self.loan_amount),
            employment_status: opt(&self.employment_status),
            car_id: opt_uuid(&self.car_id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub appointment_type: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub car_id: String,
    #[serde(default)]
    pub message: String,
}

impl AppointmentForm {
    /// A date the browser could not be trusted to send well-formed is a
    /// validation failure, same as a missing one.
    pub fn to_appointment(&self) -> Result<NewAppointment, Error> {
        let appointment_date =
            parse_datetime(&self.appointment_date).ok_or(Error::MissingField("appointment_date"))?;
        Ok(NewAppointment {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: opt(&self.phone),
            appointment_type: self.appointment_type.trim().to_string(),
            appointment_date,
            car_id: opt_uuid(&self.car_id),
            message: opt(&self.message),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub car_make: String,
    #[serde(default)]
    pub car_model: String,
    #[serde(default)]
    pub budget_range: String,
    #[serde(default)]
    pub special_requirements: String,
}

impl OrderForm {
    pub fn to_order(&self) -> NewCarOrder {
        NewCarOrder {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: opt(&self.phone),
            car_make: self.car_make.trim().to_string(),
            car_model: self.car_model.trim().to_string(),
            budget_range: opt(&self.budget_range),
            special_requirements: opt(&self.special_requirements),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestimonialForm {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub car_purchased: String,
    #[serde(default)]
    pub purchase_date: String,
}

impl TestimonialForm {
    pub fn to_testimonial(&self) -> NewTestimonial {
        NewTestimonial {
            customer_name: self.customer_name.trim().to_string(),
            customer_email: opt(&self.customer_email),
            rating: self.rating.trim().parse().unwrap_or(0),
            title: opt(&self.title),
            content: self.content.trim().to_string(),
            car_purchased: opt(&self.car_purchased),
            purchase_date: NaiveDate::parse_from_str(self.purchase_date.trim(), "%Y-%m-%d").ok(),
        }
    }
}

/// Admin add/edit car form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarForm {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub mileage: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

impl CarForm {
    pub fn to_new_car(&self) -> NewCar {
        let defaults = NewCar::default();
        NewCar {
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year.trim().parse().unwrap_or(defaults.year),
            price: self.price.trim().parse().unwrap_or(0.0),
            mileage: opt(&self.mileage),
            fuel_type: opt(&self.fuel_type).unwrap_or(defaults.fuel_type),
            transmission: opt(&self.transmission).unwrap_or(defaults.transmission),
            description: opt(&self.description),
            image_url: opt(&self.image_url),
        }
    }

    pub fn from_car(car: &showroom_core::Car) -> Self {
        Self {
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            price: car.price.to_string(),
            mileage: car.mileage.clone().unwrap_or_default(),
            fuel_type: car.fuel_type.clone(),
            transmission: car.transmission.clone(),
            description: car.description.clone().unwrap_or_default(),
            image_url: car.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Admin specification sheet form; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecificationForm {
    #[serde(default)]
    pub engine_size: String,
    #[serde(default)]
    pub horsepower: String,
    #[serde(default)]
    pub torque: String,
    #[serde(default)]
    pub acceleration_0_100: String,
    #[serde(default)]
    pub top_speed: String,
    #[serde(default)]
    pub fuel_consumption_city: String,
    #[serde(default)]
    pub fuel_consumption_highway: String,
    #[serde(default)]
    pub fuel_consumption_combined: String,
    #[serde(default)]
    pub co2_emissions: String,
    #[serde(default)]
    pub drivetrain: String,
    #[serde(default)]
    pub exterior_color: String,
    #[serde(default)]
    pub interior_color: String,
    #[serde(default)]
    pub number_of_doors: String,
    #[serde(default)]
    pub number_of_seats: String,
    #[serde(default)]
    pub boot_capacity: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub wheelbase: String,
    #[serde(default)]
    pub warranty_years: String,
}

impl SpecificationForm {
    pub fn to_specification(&self, car_id: Uuid) -> NewCarSpecification {
        NewCarSpecification {
            car_id,
            engine_size: opt(&self.engine_size),
            horsepower: opt_f64(&self.horsepower),
            torque: opt_f64(&self.torque),
            acceleration_0_100: opt_f64(&self.acceleration_0_100),
            top_speed: opt_f64(&self.top_speed),
            fuel_consumption_city: opt_f64(&self.fuel_consumption_city),
            fuel_consumption_highway: opt_f64(&self.fuel_consumption_highway),
            fuel_consumption_combined: opt_f64(&self.fuel_consumption_combined),
            co2_emissions: opt_f64(&self.co2_emissions),
            drivetrain: opt(&self.drivetrain),
            exterior_color: opt(&self.exterior_color),
            interior_color: opt(&self.interior_color),
            number_of_doors: opt_f64(&self.number_of_doors),
            number_of_seats: opt_f64(&self.number_of_seats),
            boot_capacity: opt_f64(&self.boot_capacity),
            weight: opt_f64(&self.weight),
            length: opt_f64(&self.length),
            width: opt_f64(&self.width),
            height: opt_f64(&self.height),
            wheelbase: opt_f64(&self.wheelbase),
            warranty_years: opt_f64(&self.warranty_years),
        }
    }

    pub fn from_specification(spec: &showroom_core::CarSpecification) -> Self {
        fn text(value: &Option<f64>) -> String {
            value.map(|n| n.to_string()).unwrap_or_default()
        }
        Self {
            engine_size: spec.engine_size.clone().unwrap_or_default(),
            horsepower: text(&spec.horsepower),
            torque: text(&spec.torque),
            acceleration_0_100: text(&spec.acceleration_0_100),
            top_speed: text(&spec.top_speed),
            fuel_consumption_city: text(&spec.fuel_consumption_city),
            fuel_consumption_highway: text(&spec.fuel_consumption_highway),
            fuel_consumption_combined: text(&spec.fuel_consumption_combined),
            co2_emissions: text(&spec.co2_emissions),
            drivetrain: spec.drivetrain.clone().unwrap_or_default(),
            exterior_color: spec.exterior_color.clone().unwrap_or_default(),
            interior_color: spec.interior_color.clone().unwrap_or_default(),
            number_of_doors: text(&spec.number_of_doors),
            number_of_seats: text(&spec.number_of_seats),
            boot_capacity: text(&spec.boot_capacity),
            weight: text(&spec.weight),
            length: text(&spec.length),
            width: text(&spec.width),
            height: text(&spec.height),
            wheelbase: text(&spec.wheelbase),
            warranty_years: text(&spec.warranty_years),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_optionals_become_none() {
        let form = ContactForm {
            name: "  Maria  ".to_string(),
            email: "maria@example.com".to_string(),
            phone: "   ".to_string(),
            message: "Hello".to_string(),
            car_id: String::new(),
        };

        let inquiry = form.to_inquiry();
        assert_eq!(inquiry.name, "Maria");
        assert!(inquiry.phone.is_none());
        assert!(inquiry.car_id.is_none());
    }

    #[test]
    fn test_whitespace_name_fails_validation() {
        let form = ContactForm {
            name: "   ".to_string(),
            email: "maria@example.com".to_string(),
            message: "Hello".to_string(),
            ..Default::default()
        };
        assert!(form.to_inquiry().validate().is_err());
    }

    #[test]
    fn test_datetime_local_parses() {
        let form = AppointmentForm {
            name: "Costas".to_string(),
            email: "costas@example.com".to_string(),
            appointment_type: "test_drive".to_string(),
            appointment_date: "2025-06-14T10:30".to_string(),
            ..Default::default()
        };

        let appointment = form.to_appointment().expect("parses");
        assert_eq!(
            appointment.appointment_date.to_rfc3339(),
            "2025-06-14T10:30:00+00:00"
        );
    }

    #[test]
    fn test_garbage_date_is_missing_field() {
        let form = AppointmentForm {
            name: "Costas".to_string(),
            email: "costas@example.com".to_string(),
            appointment_type: "viewing".to_string(),
            appointment_date: "whenever".to_string(),
            ..Default::default()
        };
        assert!(form.to_appointment().is_err());
    }

    #[test]
    fn test_unparseable_rating_fails_validation() {
        let form = TestimonialForm {
            customer_name: "Elena".to_string(),
            rating: "great".to_string(),
            content: "Loved the service".to_string(),
            ..Default::default()
        };
        assert!(form.to_testimonial().validate().is_err());
    }

    #[test]
    fn test_car_form_round_trip() {
        let form = CarForm {
            make: "BMW".to_string(),
            model: "320i".to_string(),
            year: "2021".to_string(),
            price: "28500".to_string(),
            mileage: "30,000 km".to_string(),
            fuel_type: "Petrol".to_string(),
            transmission: "Automatic".to_string(),
            description: String::new(),
            image_url: String::new(),
        };

        let car = form.to_new_car();
        assert_eq!(car.year, 2021);
        assert_eq!(car.price, 28500.0);
        assert!(car.description.is_none());
        assert!(car.validate().is_ok());
    }

    #[test]
    fn test_spec_form_numbers() {
        let form = SpecificationForm {
            horsepower: "184".to_string(),
            number_of_doors: "4".to_string(),
            drivetrain: "RWD".to_string(),
            ..Default::default()
        };

        let spec = form.to_specification(Uuid::from_u128(1));
        assert_eq!(spec.horsepower, Some(184.0));
        assert_eq!(spec.number_of_doors, Some(4.0));
        assert_eq!(spec.drivetrain.as_deref(), Some("RWD"));
        assert!(spec.torque.is_none());
    }
}
