//! High-level data access for the showroom.
//!
//! One [`Store`] wraps the REST and storage clients and exposes the exact
//! operations the site performs, table by table. Sort orders and filters
//! live here so route handlers never assemble queries themselves.

use chrono::Utc;
use uuid::Uuid;

use showroom_core::{
    Appointment, Car, CarImage, CarOrder, CarSpecification, ContactInquiry, Faq,
    FinanceApplication, NewAppointment, NewCar, NewCarImage, NewCarOrder, NewCarSpecification,
    NewContactInquiry, NewFinanceApplication, NewTestimonial, Testimonial,
};

use crate::rest::{Query, RestClient};
use crate::storage::{StorageClient, CAR_IMAGES_BUCKET};
use crate::Result;

/// Table names as they exist in the backend schema.
pub mod tables {
    pub const CARS: &str = "cars";
    pub const CAR_IMAGES: &str = "car_images";
    pub const CAR_SPECIFICATIONS: &str = "car_specifications";
    pub const CONTACT_INQUIRIES: &str = "contact_inquiries";
    pub const FINANCE_APPLICATIONS: &str = "finance_applications";
    pub const APPOINTMENTS: &str = "appointments";
    pub const CAR_ORDERS: &str = "car_orders";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const FAQS: &str = "faqs";
}

#[derive(Debug, Clone)]
pub struct Store {
    rest: RestClient,
    storage: StorageClient,
}

impl Store {
    pub fn new(base_url: &str, key: &str) -> Result<Self> {
        Ok(Self {
            rest: RestClient::new(base_url, key)?,
            storage: StorageClient::new(base_url, key)?,
        })
    }

    // ============== Cars ==============

    /// Every car, newest listing first.
    pub async fn list_cars(&self) -> Result<Vec<Car>> {
        self.rest
            .select(
                tables::CARS,
                Query::new().select("*").order_desc("created_at"),
            )
            .await
    }

    pub async fn get_car(&self, id: Uuid) -> Result<Option<Car>> {
        let rows: Vec<Car> = self
            .rest
            .select(
                tables::CARS,
                Query::new().select("*").eq("id", id).limit(1),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    pub async fn create_car(&self, car: &NewCar) -> Result<Car> {
        self.rest.insert_returning(tables::CARS, car).await
    }

    pub async fn update_car(&self, id: Uuid, car: &NewCar) -> Result<()> {
        self.rest
            .update(tables::CARS, Query::new().eq("id", id), car)
            .await
    }

    pub async fn delete_car(&self, id: Uuid) -> Result<()> {
        self.rest
            .delete(tables::CARS, Query::new().eq("id", id))
            .await
    }

    // ============== Car images ==============

    /// Gallery for one car in display order.
    pub async fn list_images(&self, car_id: Uuid) -> Result<Vec<CarImage>> {
        self.rest
            .select(
                tables::CAR_IMAGES,
                Query::new()
                    .select("*")
                    .eq("car_id", car_id)
                    .order_asc("display_order"),
            )
            .await
    }

    pub async fn add_image(&self, image: &NewCarImage) -> Result<CarImage> {
        self.rest.insert_returning(tables::CAR_IMAGES, image).await
    }

    /// Make `image_id` the car's primary image.
    ///
    /// Two sequential PATCHes with no transaction: first every image of the
    /// car is cleared, then the chosen one is set. If the second step fails
    /// the car is left with zero primary images until an admin reassigns one.
    pub async fn set_primary_image(&self, car_id: Uuid, image_id: Uuid) -> Result<()> {
        self.rest
            .update(
                tables::CAR_IMAGES,
                Query::new().eq("car_id", car_id),
                &serde_json::json!({ "is_primary": false }),
            )
            .await?;
        self.rest
            .update(
                tables::CAR_IMAGES,
                Query::new().eq("id", image_id),
                &serde_json::json!({ "is_primary": true }),
            )
            .await
    }

    /// Remove an image row, then its stored object. A storage failure after
    /// the row is gone only logs; the gallery no longer references the object.
    pub async fn delete_image(&self, image: &CarImage) -> Result<()> {
        self.rest
            .delete(tables::CAR_IMAGES, Query::new().eq("id", image.id))
            .await?;
        if let Err(e) = self
            .storage
            .remove(CAR_IMAGES_BUCKET, &[image.storage_path.clone()])
            .await
        {
            tracing::warn!("orphaned storage object {}: {e}", image.storage_path);
        }
        Ok(())
    }

    /// Upload photo bytes and return `(public_url, storage_path)` for the
    /// gallery row that should follow.
    pub async fn upload_image(
        &self,
        car_id: Uuid,
        bytes: Vec<u8>,
        content_type: &str,
        extension: &str,
    ) -> Result<(String, String)> {
        let path = StorageClient::object_key(car_id, Utc::now().timestamp_millis(), extension);
        self.storage
            .upload(CAR_IMAGES_BUCKET, &path, bytes, content_type)
            .await?;
        Ok((self.storage.public_url(CAR_IMAGES_BUCKET, &path), path))
    }

    // ============== Specifications ==============

    pub async fn get_specification(&self, car_id: Uuid) -> Result<Option<CarSpecification>> {
        let rows: Vec<CarSpecification> = self
            .rest
            .select(
                tables::CAR_SPECIFICATIONS,
                Query::new().select("*").eq("car_id", car_id).limit(1),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a new sheet, or overwrite the existing one when its id is known.
    pub async fn save_specification(
        &self,
        existing: Option<Uuid>,
        spec: &NewCarSpecification,
    ) -> Result<()> {
        match existing {
            Some(id) => {
                self.rest
                    .update(tables::CAR_SPECIFICATIONS, Query::new().eq("id", id), spec)
                    .await
            }
            None => self.rest.insert(tables::CAR_SPECIFICATIONS, spec).await,
        }
    }

    // ============== Leads ==============

    pub async fn add_contact_inquiry(&self, inquiry: &NewContactInquiry) -> Result<()> {
        self.rest.insert(tables::CONTACT_INQUIRIES, inquiry).await
    }

    pub async fn list_contact_inquiries(&self) -> Result<Vec<ContactInquiry>> {
        self.rest
            .select(
                tables::CONTACT_INQUIRIES,
                Query::new().select("*").order_desc("created_at"),
            )
            .await
    }

    pub async fn delete_contact_inquiry(&self, id: Uuid) -> Result<()> {
        self.rest
            .delete(tables::CONTACT_INQUIRIES, Query::new().eq("id", id))
            .await
    }

    pub async fn add_finance_application(&self, application: &NewFinanceApplication) -> Result<()> {
        self.rest
            .insert(tables::FINANCE_APPLICATIONS, application)
            .await
    }

    pub async fn list_finance_applications(&self) -> Result<Vec<FinanceApplication>> {
        self.rest
            .select(
                tables::FINANCE_APPLICATIONS,
                Query::new().select("*").order_desc("created_at"),
            )
            .await
    }

    pub async fn delete_finance_application(&self, id: Uuid) -> Result<()> {
        self.rest
            .delete(tables::FINANCE_APPLICATIONS, Query::new().eq("id", id))
            .await
    }

    pub async fn add_appointment(&self, appointment: &NewAppointment) -> Result<()> {
        self.rest.insert(tables::APPOINTMENTS, appointment).await
    }

    pub async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        self.rest
            .select(
                tables::APPOINTMENTS,
                Query::new().select("*").order_desc("created_at"),
            )
            .await
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<()> {
        self.rest
            .delete(tables::APPOINTMENTS, Query::new().eq("id", id))
            .await
    }

    pub async fn add_car_order(&self, order: &NewCarOrder) -> Result<()> {
        self.rest.insert(tables::CAR_ORDERS, order).await
    }

    pub async fn list_car_orders(&self) -> Result<Vec<CarOrder>> {
        self.rest
            .select(
                tables::CAR_ORDERS,
                Query::new().select("*").order_desc("created_at"),
            )
            .await
    }

    pub async fn delete_car_order(&self, id: Uuid) -> Result<()> {
        self.rest
            .delete(tables::CAR_ORDERS, Query::new().eq("id", id))
            .await
    }

    // ============== Testimonials ==============

    pub async fn add_testimonial(&self, testimonial: &NewTestimonial) -> Result<()> {
        self.rest.insert(tables::TESTIMONIALS, testimonial).await
    }

    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>> {
        self.rest
            .select(
                tables::TESTIMONIALS,
                Query::new().select("*").order_desc("created_at"),
            )
            .await
    }

    /// Approved reviews for the public page, newest first.
    pub async fn list_approved_testimonials(&self, limit: usize) -> Result<Vec<Testimonial>> {
        self.rest
            .select(
                tables::TESTIMONIALS,
                Query::new()
                    .select("*")
                    .eq("is_approved", true)
                    .order_desc("created_at")
                    .limit(limit),
            )
            .await
    }

    pub async fn set_testimonial_approved(&self, id: Uuid, approved: bool) -> Result<()> {
        self.rest
            .update(
                tables::TESTIMONIALS,
                Query::new().eq("id", id),
                &serde_json::json!({ "is_approved": approved }),
            )
            .await
    }

    pub async fn set_testimonial_featured(&self, id: Uuid, featured: bool) -> Result<()> {
        self.rest
            .update(
                tables::TESTIMONIALS,
                Query::new().eq("id", id),
                &serde_json::json!({ "is_featured": featured }),
            )
            .await
    }

    pub async fn delete_testimonial(&self, id: Uuid) -> Result<()> {
        self.rest
            .delete(tables::TESTIMONIALS, Query::new().eq("id", id))
            .await
    }

    // ============== FAQs ==============

    pub async fn list_faqs(&self, category: Option<&str>, featured_only: bool) -> Result<Vec<Faq>> {
        self.rest
            .select(tables::FAQS, faq_query(category, featured_only))
            .await
    }
}

fn faq_query(category: Option<&str>, featured_only: bool) -> Query {
    let mut query = Query::new().select("*").order_asc("display_order");
    if let Some(category) = category {
        query = query.eq("category", category);
    }
    if featured_only {
        query = query.eq("is_featured", true);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_faq_query_filters() {
        let params = faq_query(None, false).params();
        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*".to_string()),
                ("order".to_string(), "display_order.asc".to_string()),
            ]
        );

        let params = faq_query(Some("buying"), true).params();
        assert!(params.contains(&("category".to_string(), "eq.buying".to_string())));
        assert!(params.contains(&("is_featured".to_string(), "eq.true".to_string())));
    }

    fn gallery(car_id: Uuid, primary_index: usize, len: usize) -> Vec<CarImage> {
        (0..len)
            .map(|i| CarImage {
                id: Uuid::from_u128(i as u128 + 1),
                car_id,
                image_url: format!("https://example.test/{i}.jpg"),
                storage_path: format!("{car_id}/{i}.jpg"),
                is_primary: Some(i == primary_index),
                display_order: Some(i as i32),
                alt_text: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .collect()
    }

    // What each PATCH of the reassignment does to the rows it matches.
    fn apply_clear_step(images: &mut [CarImage], car_id: Uuid) {
        for image in images.iter_mut().filter(|img| img.car_id == car_id) {
            image.is_primary = Some(false);
        }
    }

    fn apply_set_step(images: &mut [CarImage], image_id: Uuid) {
        for image in images.iter_mut().filter(|img| img.id == image_id) {
            image.is_primary = Some(true);
        }
    }

    #[test]
    fn test_reassignment_ends_with_exactly_one_primary() {
        let car_id = Uuid::from_u128(9);
        let mut images = gallery(car_id, 0, 3);

        apply_clear_step(&mut images, car_id);
        apply_set_step(&mut images, Uuid::from_u128(3));

        let primaries: Vec<_> = images.iter().filter(|img| img.primary()).collect();
        assert_eq!(primaries.len(), 1);
        assert_eq!(primaries[0].id, Uuid::from_u128(3));
    }

    #[test]
    fn test_reassignment_failure_window_leaves_zero_primary() {
        let car_id = Uuid::from_u128(9);
        let mut images = gallery(car_id, 0, 3);

        // Clear succeeds, the set step never lands.
        apply_clear_step(&mut images, car_id);

        assert!(showroom_core::primary_image(&images).is_none());
    }
}
