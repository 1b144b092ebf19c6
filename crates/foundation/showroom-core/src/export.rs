//! CSV export for the back-office inventory tab.

use chrono::NaiveDate;

use crate::model::Car;
use crate::Result;

const HEADERS: [&str; 8] = [
    "Make",
    "Model",
    "Year",
    "Price",
    "Mileage",
    "Fuel Type",
    "Transmission",
    "Description",
];

/// Render the given rows (already filtered by the caller) as CSV bytes.
pub fn cars_to_csv(cars: &[Car]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for car in cars {
        writer.write_record(&[
            car.make.clone(),
            car.model.clone(),
            car.year.to_string(),
            format!("€{}", car.price),
            car.mileage.clone().unwrap_or_default(),
            car.fuel_type.clone(),
            car.transmission.clone(),
            car.description.clone().unwrap_or_default(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::Error::Csv(e.into_error().into()))
}

/// Download name for an export taken on the given day.
pub fn export_filename(date: NaiveDate) -> String {
    format!("car-inventory-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::showcase_cars;

    #[test]
    fn test_export_has_header_and_all_rows() {
        let cars = showcase_cars();
        let bytes = cars_to_csv(&cars).expect("export should succeed");
        let text = String::from_utf8(bytes).expect("csv is utf-8");

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Make,Model,Year,Price,Mileage,Fuel Type,Transmission,Description")
        );
        assert_eq!(lines.count(), cars.len());
        assert!(text.contains("BMW,320i,2021,€28000"));
    }

    #[test]
    fn test_export_quotes_embedded_commas() {
        let mut cars = showcase_cars();
        cars[0].description = Some("One owner, full history".to_string());

        let bytes = cars_to_csv(&cars[..1]).expect("export should succeed");
        let text = String::from_utf8(bytes).expect("csv is utf-8");

        // Mileage and description carry commas and must be quoted.
        assert!(text.contains("\"45,000 km\""));
        assert!(text.contains("\"One owner, full history\""));
    }

    #[test]
    fn test_export_filename_carries_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).expect("valid date");
        assert_eq!(export_filename(date), "car-inventory-2026-03-07.csv");
    }
}
