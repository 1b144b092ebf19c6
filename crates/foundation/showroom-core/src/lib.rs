//! # Showroom Core
//!
//! Domain types and pure logic for the dealership platform:
//! - Row types mirroring the managed store's tables (cars, images,
//!   specifications, and the lead tables)
//! - The in-memory catalog filter used by the inventory page
//! - The fixed showcase vehicles used as fallback and seed data
//! - CSV export for the back-office inventory tab
//!
//! Everything here is synchronous and side-effect free; network and
//! storage concerns live in the data tier.

pub mod export;
pub mod filter;
pub mod model;
pub mod showcase;

pub use export::{cars_to_csv, export_filename};
pub use filter::{filter_cars, quick_search, CatalogFilter, PriceBand};
pub use model::{
    next_display_order, primary_image, Appointment, Car, CarImage, CarOrder,
    CarSpecification, ContactInquiry, Faq, FinanceApplication, NewAppointment, NewCar,
    NewCarImage, NewCarOrder, NewCarSpecification, NewContactInquiry,
    NewFinanceApplication, NewTestimonial, Testimonial,
};
pub use showcase::{showcase_cars, BRANDS, FUEL_TYPES, TRANSMISSIONS};

/// Result type for showroom-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in showroom-core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("rating must be between 1 and 5")]
    InvalidRating,

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}
