//! Notification payloads and their email templates.
//!
//! The request body is `{"type": ..., "data": {...}}` with one shape per
//! lead kind. Templates are plain string interpolation, one per kind.

use serde::Deserialize;

/// A tagged notification request.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Notification {
    Contact(ContactData),
    Finance(FinanceData),
    Appointment(AppointmentData),
    CarOrder(CarOrderData),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinanceData {
    pub name: String,
    pub email: String,
    pub loan_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub appointment_date: String,
    #[serde(default)]
    pub appointment_type: String,
    pub car_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarOrderData {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub car_make: String,
    #[serde(default)]
    pub car_model: String,
    pub budget_range: Option<String>,
}

impl Notification {
    pub fn recipient(&self) -> &str {
        match self {
            Notification::Contact(data) => &data.email,
            Notification::Finance(data) => &data.email,
            Notification::Appointment(data) => &data.email,
            Notification::CarOrder(data) => &data.email,
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            Notification::Contact(_) => "Thank you for contacting us!",
            Notification::Finance(_) => "Finance Application Received",
            Notification::Appointment(_) => "Appointment Confirmation",
            Notification::CarOrder(_) => "Car Order Inquiry Received",
        }
    }

    pub fn html(&self) -> String {
        match self {
            Notification::Contact(data) => format!(
                "<h1>Thank you for your inquiry, {}!</h1>\
                 <p>We have received your message and will get back to you within 24 hours.</p>\
                 <p><strong>Your message:</strong></p>\
                 <p>{}</p>\
                 <p>Best regards,<br>The Auto Dealership Team</p>",
                data.name, data.message
            ),
            Notification::Finance(data) => format!(
                "<h1>Finance Application Received</h1>\
                 <p>Dear {},</p>\
                 <p>We have received your finance application. Our team will review it and \
                 get back to you within 2 business days.</p>\
                 <p><strong>Loan Amount:</strong> ${}</p>\
                 <p>Thank you for choosing us!</p>\
                 <p>Best regards,<br>The Auto Dealership Team</p>",
                data.name,
                data.loan_amount.map(|n| n.to_string()).unwrap_or_default()
            ),
            Notification::Appointment(data) => {
                let vehicle_line = if data.car_id.is_some() {
                    "<p><strong>Vehicle:</strong> Related to your inquiry</p>"
                } else {
                    ""
                };
                format!(
                    "<h1>Appointment Confirmed!</h1>\
                     <p>Dear {},</p>\
                     <p>Your appointment has been scheduled for:</p>\
                     <p><strong>Date:</strong> {}</p>\
                     <p><strong>Type:</strong> {}</p>\
                     {}\
                     <p>We look forward to seeing you!</p>\
                     <p>Best regards,<br>The Auto Dealership Team</p>",
                    data.name,
                    format_date(&data.appointment_date),
                    data.appointment_type.replace('_', " ").to_uppercase(),
                    vehicle_line
                )
            }
            Notification::CarOrder(data) => format!(
                "<h1>Car Order Inquiry Received</h1>\
                 <p>Dear {},</p>\
                 <p>We have received your car order inquiry:</p>\
                 <p><strong>Make:</strong> {}</p>\
                 <p><strong>Model:</strong> {}</p>\
                 <p><strong>Budget Range:</strong> {}</p>\
                 <p>Our team will search for the perfect vehicle and contact you soon!</p>\
                 <p>Best regards,<br>The Auto Dealership Team</p>",
                data.name,
                data.car_make,
                data.car_model,
                data.budget_range.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Render a submitted timestamp readably; anything unparseable passes through.
fn format_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_selects_template() {
        let request: Notification = serde_json::from_str(
            r#"{"type":"contact","data":{"name":"Maria","email":"maria@example.com","message":"Is the Golf still available?"}}"#,
        )
        .expect("parses");

        assert_eq!(request.subject(), "Thank you for contacting us!");
        assert_eq!(request.recipient(), "maria@example.com");
        assert!(request.html().contains("Thank you for your inquiry, Maria!"));
        assert!(request.html().contains("Is the Golf still available?"));
    }

    #[test]
    fn test_appointment_type_rendering() {
        let request: Notification = serde_json::from_str(
            r#"{"type":"appointment","data":{
                "name":"Costas",
                "email":"costas@example.com",
                "appointment_date":"2025-06-14T10:30:00+03:00",
                "appointment_type":"test_drive",
                "car_id":"7c9e6679-7425-40de-944b-e07fc1f90ae7"
            }}"#,
        )
        .expect("parses");

        let html = request.html();
        assert_eq!(request.subject(), "Appointment Confirmation");
        assert!(html.contains("TEST DRIVE"));
        assert!(html.contains("2025-06-14 10:30"));
        assert!(html.contains("Related to your inquiry"));
    }

    #[test]
    fn test_appointment_without_car_skips_vehicle_line() {
        let request: Notification = serde_json::from_str(
            r#"{"type":"appointment","data":{
                "name":"Costas",
                "email":"costas@example.com",
                "appointment_date":"next Tuesday",
                "appointment_type":"consultation"
            }}"#,
        )
        .expect("parses");

        let html = request.html();
        assert!(!html.contains("Vehicle:"));
        assert!(html.contains("CONSULTATION"));
        // unparseable dates render as submitted
        assert!(html.contains("next Tuesday"));
    }

    #[test]
    fn test_finance_and_order_templates() {
        let finance: Notification = serde_json::from_str(
            r#"{"type":"finance","data":{"name":"Elena","email":"elena@example.com","loan_amount":25000}}"#,
        )
        .expect("parses");
        assert_eq!(finance.subject(), "Finance Application Received");
        assert!(finance.html().contains("$25000"));

        let order: Notification = serde_json::from_str(
            r#"{"type":"car_order","data":{
                "name":"Andreas",
                "email":"andreas@example.com",
                "car_make":"Audi",
                "car_model":"A4",
                "budget_range":"20000-30000"
            }}"#,
        )
        .expect("parses");
        assert_eq!(order.subject(), "Car Order Inquiry Received");
        assert!(order.html().contains("<strong>Make:</strong> Audi"));
        assert!(order.html().contains("20000-30000"));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result: Result<Notification, _> = serde_json::from_str(
            r#"{"type":"newsletter","data":{"name":"X","email":"x@example.com"}}"#,
        );
        assert!(result.is_err());
    }
}
