//! Public site pages.

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use showroom_core::{filter_cars, showcase_cars, Car, CatalogFilter, PriceBand};

use crate::forms::{ContactForm, FinanceForm, OrderForm, TestimonialForm};
use crate::routes::is_htmx;
use crate::state::AppState;
use crate::templates::{pages, STYLE_CSS};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/inventory", get(inventory))
        .route("/cars/:id", get(car_detail))
        .route("/finance", get(finance))
        .route("/order", get(order))
        .route("/contact", get(contact))
        .route("/testimonials", get(testimonials))
        .route("/style.css", get(style_css))
}

/// Live inventory, falling back to the built-in showcase when the store is
/// unreachable or empty. The public site never shows a blank lot.
pub async fn catalog(state: &AppState) -> Vec<Car> {
    match state.store.list_cars().await {
        Ok(cars) if !cars.is_empty() => cars,
        Ok(_) => showcase_cars(),
        Err(e) => {
            tracing::warn!("car listing unavailable, serving showcase: {e}");
            showcase_cars()
        }
    }
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let cars = catalog(&state).await;
    Html(pages::home_page(&cars))
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub year: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
}

impl CatalogQuery {
    /// Blank selects arrive as empty strings; treat them as inactive.
    pub fn to_filter(&self) -> CatalogFilter {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        CatalogFilter {
            query: self.q.trim().to_string(),
            brand: clean(&self.brand),
            price: self.price.as_deref().and_then(PriceBand::from_slug),
            year: self
                .year
                .as_deref()
                .and_then(|year| year.trim().parse().ok()),
            fuel_type: clean(&self.fuel_type),
            transmission: clean(&self.transmission),
        }
    }
}

async fn inventory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CatalogQuery>,
) -> Html<String> {
    let cars = catalog(&state).await;
    let filter = query.to_filter();
    let visible = filter_cars(&cars, &filter);

    if is_htmx(&headers) {
        Html(pages::car_grid_html(&visible, cars.len()))
    } else {
        Html(pages::inventory_page(&cars, &visible, &filter))
    }
}

/// Look a car up by id, trying the store first and the showcase second.
pub async fn find_car(state: &AppState, id: Uuid) -> Option<Car> {
    match state.store.get_car(id).await {
        Ok(Some(car)) => Some(car),
        Ok(None) => showcase_cars().into_iter().find(|car| car.id == id),
        Err(e) => {
            tracing::warn!("car lookup failed: {e}");
            showcase_cars().into_iter().find(|car| car.id == id)
        }
    }
}

async fn car_detail(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<Uuid>() else {
        return not_found().await;
    };
    let Some(car) = find_car(&state, id).await else {
        return not_found().await;
    };

    let images = state.store.list_images(id).await.unwrap_or_default();
    let spec = state.store.get_specification(id).await.unwrap_or_default();

    Html(pages::car_detail_page(&car, &images, spec.as_ref())).into_response()
}

async fn finance() -> Html<String> {
    Html(pages::finance_page(&FinanceForm::default(), None))
}

async fn order() -> Html<String> {
    Html(pages::order_page(&OrderForm::default(), None))
}

async fn contact(State(state): State<AppState>) -> Html<String> {
    let faqs = state
        .store
        .list_faqs(None, false)
        .await
        .unwrap_or_default();
    Html(pages::contact_page(&ContactForm::default(), None, &faqs))
}

async fn testimonials(State(state): State<AppState>) -> Html<String> {
    let approved = state
        .store
        .list_approved_testimonials(20)
        .await
        .unwrap_or_default();
    Html(pages::testimonials_page(
        &approved,
        &TestimonialForm::default(),
        None,
    ))
}

async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], STYLE_CSS)
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found_page())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_query_cleans_blanks() {
        let query = CatalogQuery {
            q: "  golf ".to_string(),
            brand: Some("".to_string()),
            price: Some("under-15000".to_string()),
            year: Some(" 2021 ".to_string()),
            fuel_type: Some("Diesel".to_string()),
            transmission: None,
        };

        let filter = query.to_filter();
        assert_eq!(filter.query, "golf");
        assert_eq!(filter.brand, None);
        assert_eq!(filter.price, Some(PriceBand::Under15000));
        assert_eq!(filter.year, Some(2021));
        assert_eq!(filter.fuel_type.as_deref(), Some("Diesel"));
        assert_eq!(filter.transmission, None);
    }

    #[test]
    fn test_catalog_query_ignores_garbage_year() {
        let query = CatalogQuery {
            year: Some("not-a-year".to_string()),
            ..CatalogQuery::default()
        };
        assert_eq!(query.to_filter().year, None);
    }
}
