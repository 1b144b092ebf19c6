//! In-memory catalog filtering for the inventory page.
//!
//! The whole vehicle list is loaded once and refiltered from scratch on
//! every change; there is no index and no incremental update. Filtering is
//! a pure function of (list, criteria) and preserves the list's order.

use serde::{Deserialize, Serialize};

use crate::model::Car;

/// Fixed price bands offered by the inventory filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBand {
    Under15000,
    From15000To25000,
    From25000To35000,
    Over35000,
}

impl PriceBand {
    pub const ALL: [PriceBand; 4] = [
        PriceBand::Under15000,
        PriceBand::From15000To25000,
        PriceBand::From25000To35000,
        PriceBand::Over35000,
    ];

    /// Parse the dropdown value, e.g. "15000-25000".
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "under-15000" => Some(PriceBand::Under15000),
            "15000-25000" => Some(PriceBand::From15000To25000),
            "25000-35000" => Some(PriceBand::From25000To35000),
            "over-35000" => Some(PriceBand::Over35000),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            PriceBand::Under15000 => "under-15000",
            PriceBand::From15000To25000 => "15000-25000",
            PriceBand::From25000To35000 => "25000-35000",
            PriceBand::Over35000 => "over-35000",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceBand::Under15000 => "Under €15,000",
            PriceBand::From15000To25000 => "€15,000 - €25,000",
            PriceBand::From25000To35000 => "€25,000 - €35,000",
            PriceBand::Over35000 => "Over €35,000",
        }
    }

    /// Band membership. The middle bands include both endpoints, so a price
    /// of exactly 15000 belongs to 15000-25000 and not to under-15000.
    pub fn contains(&self, price: f64) -> bool {
        match self {
            PriceBand::Under15000 => price < 15000.0,
            PriceBand::From15000To25000 => (15000.0..=25000.0).contains(&price),
            PriceBand::From25000To35000 => (25000.0..=35000.0).contains(&price),
            PriceBand::Over35000 => price > 35000.0,
        }
    }
}

/// Criteria active on the inventory page. Empty/None members are inactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Free-text search, matched against make and model.
    pub query: String,
    pub brand: Option<String>,
    pub price: Option<PriceBand>,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
}

impl CatalogFilter {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.brand.is_none()
            && self.price.is_none()
            && self.year.is_none()
            && self.fuel_type.is_none()
            && self.transmission.is_none()
    }

    /// True when the car satisfies every active criterion.
    pub fn matches(&self, car: &Car) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() {
            let make = car.make.to_lowercase();
            let model = car.model.to_lowercase();
            if !make.contains(&query) && !model.contains(&query) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !car.make.eq_ignore_ascii_case(brand) {
                return false;
            }
        }
        if let Some(band) = &self.price {
            if !band.contains(car.price) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if car.year != year {
                return false;
            }
        }
        if let Some(fuel) = &self.fuel_type {
            if !car.fuel_type.eq_ignore_ascii_case(fuel) {
                return false;
            }
        }
        if let Some(transmission) = &self.transmission {
            if !car.transmission.eq_ignore_ascii_case(transmission) {
                return false;
            }
        }
        true
    }
}

/// The visible subset of the catalog: cars satisfying the AND of all active
/// criteria, in their original order.
pub fn filter_cars<'a>(cars: &'a [Car], filter: &CatalogFilter) -> Vec<&'a Car> {
    cars.iter().filter(|car| filter.matches(car)).collect()
}

/// Back-office quick search: case-insensitive substring across make, model,
/// fuel type, transmission, and the year rendered as text.
pub fn quick_search<'a>(cars: &'a [Car], term: &str) -> Vec<&'a Car> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return cars.iter().collect();
    }
    cars.iter()
        .filter(|car| {
            car.make.to_lowercase().contains(&term)
                || car.model.to_lowercase().contains(&term)
                || car.fuel_type.to_lowercase().contains(&term)
                || car.transmission.to_lowercase().contains(&term)
                || car.year.to_string().contains(&term)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::showcase_cars;

    fn ids(cars: &[&Car]) -> Vec<String> {
        cars.iter().map(|c| c.display_name()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_full_list() {
        let cars = showcase_cars();
        let filter = CatalogFilter::default();
        assert!(filter.is_empty());

        let visible = filter_cars(&cars, &filter);
        assert_eq!(visible.len(), cars.len());
        for (shown, original) in visible.iter().zip(cars.iter()) {
            assert_eq!(shown.id, original.id);
        }
    }

    #[test]
    fn test_result_is_order_preserving_subsequence() {
        let cars = showcase_cars();
        let filter = CatalogFilter {
            fuel_type: Some("Petrol".to_string()),
            ..Default::default()
        };

        let visible = filter_cars(&cars, &filter);
        assert!(!visible.is_empty());

        // Walk the original list and check the result appears in the same
        // relative order without inventing elements.
        let mut cursor = 0;
        for car in &cars {
            if cursor < visible.len() && visible[cursor].id == car.id {
                cursor += 1;
            }
        }
        assert_eq!(cursor, visible.len());
    }

    #[test]
    fn test_partition_against_active_predicates() {
        let cars = showcase_cars();
        let filter = CatalogFilter {
            price: Some(PriceBand::From15000To25000),
            transmission: Some("Automatic".to_string()),
            ..Default::default()
        };

        let visible = filter_cars(&cars, &filter);
        for car in &visible {
            assert!(filter.matches(car));
        }
        let shown: Vec<_> = visible.iter().map(|c| c.id).collect();
        for car in cars.iter().filter(|c| !shown.contains(&c.id)) {
            assert!(!filter.matches(car));
        }
    }

    #[test]
    fn test_price_band_boundaries() {
        assert!(PriceBand::Under15000.contains(14999.0));
        assert!(!PriceBand::Under15000.contains(15000.0));

        // Exactly 15000 lands in the middle band.
        assert!(PriceBand::From15000To25000.contains(15000.0));
        assert!(PriceBand::From15000To25000.contains(25000.0));
        assert!(!PriceBand::From15000To25000.contains(25000.5));

        assert!(PriceBand::From25000To35000.contains(25000.0));
        assert!(PriceBand::From25000To35000.contains(35000.0));

        assert!(!PriceBand::Over35000.contains(35000.0));
        assert!(PriceBand::Over35000.contains(35000.5));
    }

    #[test]
    fn test_price_band_slug_round_trip() {
        for band in PriceBand::ALL {
            assert_eq!(PriceBand::from_slug(band.slug()), Some(band));
        }
        assert_eq!(PriceBand::from_slug("all"), None);
        assert_eq!(PriceBand::from_slug(""), None);
    }

    #[test]
    fn test_query_bmw_finds_the_320i() {
        let cars = showcase_cars();
        let filter = CatalogFilter {
            query: "bmw".to_string(),
            ..Default::default()
        };

        let visible = filter_cars(&cars, &filter);
        assert_eq!(ids(&visible), vec!["BMW 320i"]);
    }

    #[test]
    fn test_query_matches_model_substring() {
        let cars = showcase_cars();
        let filter = CatalogFilter {
            query: "corol".to_string(),
            ..Default::default()
        };

        let visible = filter_cars(&cars, &filter);
        assert_eq!(ids(&visible), vec!["Toyota Corolla"]);
    }

    #[test]
    fn test_under_15000_finds_the_demio() {
        let cars = showcase_cars();
        let filter = CatalogFilter {
            price: Some(PriceBand::Under15000),
            ..Default::default()
        };

        let visible = filter_cars(&cars, &filter);
        assert_eq!(ids(&visible), vec!["Mazda Demio"]);
        assert_eq!(visible[0].price, 12500.0);
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let cars = showcase_cars();

        // Petrol + Manual leaves the Demio and the Golf.
        let filter = CatalogFilter {
            fuel_type: Some("Petrol".to_string()),
            transmission: Some("Manual".to_string()),
            ..Default::default()
        };
        let visible = filter_cars(&cars, &filter);
        assert_eq!(ids(&visible), vec!["Mazda Demio", "Volkswagen Golf"]);

        // Adding a brand narrows further.
        let filter = CatalogFilter {
            fuel_type: Some("Petrol".to_string()),
            transmission: Some("Manual".to_string()),
            brand: Some("Volkswagen".to_string()),
            ..Default::default()
        };
        let visible = filter_cars(&cars, &filter);
        assert_eq!(ids(&visible), vec!["Volkswagen Golf"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let cars = showcase_cars();
        let filter = CatalogFilter {
            query: "lamborghini".to_string(),
            ..Default::default()
        };
        assert!(filter_cars(&cars, &filter).is_empty());
    }

    #[test]
    fn test_year_filter_is_exact() {
        let cars = showcase_cars();
        let filter = CatalogFilter {
            year: Some(2021),
            ..Default::default()
        };

        let visible = filter_cars(&cars, &filter);
        assert_eq!(ids(&visible), vec!["BMW 320i", "Volkswagen Golf"]);
    }

    #[test]
    fn test_quick_search_spans_admin_columns() {
        let cars = showcase_cars();

        let by_fuel = quick_search(&cars, "hybrid");
        assert_eq!(ids(&by_fuel), vec!["Toyota Corolla"]);

        let by_year = quick_search(&cars, "2019");
        assert_eq!(ids(&by_year), vec!["Range Rover Evoque"]);

        let blank = quick_search(&cars, "   ");
        assert_eq!(blank.len(), cars.len());
    }
}
