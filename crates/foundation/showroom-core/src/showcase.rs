//! The six showcase vehicles.
//!
//! These back the inventory page whenever the store has no rows (fresh
//! deployments, store outages) and seed the store through the ops CLI.
//! Their ids are fixed so seeding stays idempotent and detail links keep
//! working against the fallback list.

use chrono::Utc;
use uuid::Uuid;

use crate::model::Car;

struct Entry {
    id: u128,
    make: &'static str,
    model: &'static str,
    year: i32,
    price: f64,
    image: &'static str,
    fuel: &'static str,
    transmission: &'static str,
    mileage: &'static str,
}

const ENTRIES: [Entry; 6] = [
    Entry {
        id: 1,
        make: "Mazda",
        model: "Demio",
        year: 2020,
        price: 12500.0,
        image: "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?w=500&h=300&fit=crop",
        fuel: "Petrol",
        transmission: "Manual",
        mileage: "45,000 km",
    },
    Entry {
        id: 2,
        make: "Range Rover",
        model: "Evoque",
        year: 2019,
        price: 35000.0,
        image: "https://images.unsplash.com/photo-1494905998402-395d579af36f?w=500&h=300&fit=crop",
        fuel: "Petrol",
        transmission: "Automatic",
        mileage: "60,000 km",
    },
    Entry {
        id: 3,
        make: "BMW",
        model: "320i",
        year: 2021,
        price: 28000.0,
        image: "https://images.unsplash.com/photo-1555215695-3004980ad54e?w=500&h=300&fit=crop",
        fuel: "Petrol",
        transmission: "Automatic",
        mileage: "35,000 km",
    },
    Entry {
        id: 4,
        make: "Toyota",
        model: "Corolla",
        year: 2022,
        price: 18500.0,
        image: "https://images.unsplash.com/photo-1621007947382-bb3c3994e3fb?w=500&h=300&fit=crop",
        fuel: "Hybrid",
        transmission: "Automatic",
        mileage: "25,000 km",
    },
    Entry {
        id: 5,
        make: "Mercedes",
        model: "C-Class",
        year: 2020,
        price: 32000.0,
        image: "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=500&h=300&fit=crop",
        fuel: "Petrol",
        transmission: "Automatic",
        mileage: "50,000 km",
    },
    Entry {
        id: 6,
        make: "Volkswagen",
        model: "Golf",
        year: 2021,
        price: 22000.0,
        image: "https://images.unsplash.com/photo-1606220588913-b3aacb4d2f46?w=500&h=300&fit=crop",
        fuel: "Petrol",
        transmission: "Manual",
        mileage: "30,000 km",
    },
];

/// The fixed showcase list, in display order.
pub fn showcase_cars() -> Vec<Car> {
    let now = Utc::now();
    ENTRIES
        .iter()
        .map(|entry| Car {
            id: Uuid::from_u128(entry.id),
            make: entry.make.to_string(),
            model: entry.model.to_string(),
            year: entry.year,
            price: entry.price,
            mileage: Some(entry.mileage.to_string()),
            fuel_type: entry.fuel.to_string(),
            transmission: entry.transmission.to_string(),
            description: None,
            image_url: Some(entry.image.to_string()),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Brands offered by the inventory filter dropdown.
pub const BRANDS: [&str; 6] = [
    "BMW",
    "Mazda",
    "Range Rover",
    "Toyota",
    "Mercedes",
    "Volkswagen",
];

/// Fuel types offered by the inventory filter dropdown.
pub const FUEL_TYPES: [&str; 4] = ["Petrol", "Diesel", "Hybrid", "Electric"];

/// Transmissions offered by the inventory filter dropdown.
pub const TRANSMISSIONS: [&str; 2] = ["Manual", "Automatic"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showcase_is_stable() {
        let first = showcase_cars();
        let second = showcase_cars();

        assert_eq!(first.len(), 6);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.make, b.make);
            assert_eq!(a.price, b.price);
        }
    }

    #[test]
    fn test_showcase_order_matches_listing() {
        let makes: Vec<_> = showcase_cars().into_iter().map(|c| c.make).collect();
        assert_eq!(
            makes,
            vec!["Mazda", "Range Rover", "BMW", "Toyota", "Mercedes", "Volkswagen"]
        );
    }
}
