//! Back-office handlers: session login, the tabbed dashboard, car CRUD,
//! image and specification management, lead cleanup, testimonial
//! moderation, CSV export, and the change feed.
//!
//! Everything in `protected_router` sits behind [`require_auth`]; the
//! login flow itself is in `public_router`.

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::sse::Event;
use axum::response::{Html, IntoResponse, Redirect, Response, Sse};
use axum::routing::{get, post};
use axum::{Form, Router};
use chrono::Utc;
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tower_cookies::{Cookie, Cookies};
use uuid::Uuid;

use showroom_core::{cars_to_csv, export_filename, quick_search, Car, NewCarImage};

use crate::forms::{CarForm, SpecificationForm};
use crate::routes::is_htmx;
use crate::state::AppState;
use crate::templates::admin as views;
use crate::templates::notice_html;

pub const SESSION_COOKIE: &str = "showroom_session";

const STORE_ERROR: &str = "The data store rejected the change. Please try again.";

pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", get(login_form).post(login_submit))
        .route("/admin/logout", get(logout))
}

pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/tabs/inventory", get(tab_inventory))
        .route("/admin/tabs/contacts", get(tab_contacts))
        .route("/admin/tabs/finance", get(tab_finance))
        .route("/admin/tabs/orders", get(tab_orders))
        .route("/admin/tabs/appointments", get(tab_appointments))
        .route("/admin/tabs/testimonials", get(tab_testimonials))
        .route("/admin/cars", post(create_car))
        .route("/admin/cars/new", get(new_car))
        .route("/admin/cars/:id", post(update_car))
        .route("/admin/cars/:id/edit", get(edit_car))
        .route("/admin/cars/:id/delete", post(delete_car))
        .route("/admin/cars/:id/images", get(car_images).post(upload_image))
        .route("/admin/images/:id/primary", post(set_primary_image))
        .route("/admin/images/:id/delete", post(delete_image))
        .route("/admin/cars/:id/specs", get(edit_specs).post(save_specs))
        .route("/admin/contacts/:id/delete", post(delete_contact))
        .route("/admin/finance/:id/delete", post(delete_finance))
        .route("/admin/orders/:id/delete", post(delete_order))
        .route("/admin/appointments/:id/delete", post(delete_appointment))
        .route("/admin/testimonials/:id/approve", post(toggle_approved))
        .route("/admin/testimonials/:id/feature", post(toggle_featured))
        .route("/admin/testimonials/:id/delete", post(delete_testimonial))
        .route("/admin/export/cars.csv", get(export_cars))
        .route("/admin/events", get(events))
}

// ============== Auth ==============

fn session_valid(state: &AppState, cookies: &Cookies) -> bool {
    cookies
        .get(SESSION_COOKIE)
        .map(|cookie| state.auth.validate_token(cookie.value()).is_some())
        .unwrap_or(false)
}

pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    request: Request<Body>,
    next: Next,
) -> Response {
    if session_valid(&state, &cookies) {
        next.run(request).await
    } else {
        Redirect::to("/admin/login").into_response()
    }
}

async fn login_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    if session_valid(&state, &cookies) {
        return Redirect::to("/admin").into_response();
    }
    state.auth.cleanup_expired();
    let csrf = state.auth.generate_csrf();
    Html(views::login_page(&csrf, None)).into_response()
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

async fn login_submit(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(input): Form<LoginInput>,
) -> Response {
    if !state.auth.validate_csrf(&input.csrf_token) {
        let csrf = state.auth.generate_csrf();
        return (
            StatusCode::BAD_REQUEST,
            Html(views::login_page(&csrf, Some("Invalid request. Please try again."))),
        )
            .into_response();
    }

    if let Some(session) = state.auth.login(&input.username, &input.password) {
        let mut cookie = Cookie::new(SESSION_COOKIE, session.token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
        cookies.add(cookie);

        tracing::info!("admin '{}' logged in", input.username);
        Redirect::to("/admin").into_response()
    } else {
        tracing::warn!("failed admin login for '{}'", input.username);
        let csrf = state.auth.generate_csrf();
        (
            StatusCode::UNAUTHORIZED,
            Html(views::login_page(&csrf, Some("Invalid username or password"))),
        )
            .into_response()
    }
}

async fn logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        state.auth.logout(cookie.value());
        cookies.remove(Cookie::from(SESSION_COOKIE));
    }
    Redirect::to("/admin/login")
}

// ============== Dashboard tabs ==============

/// Fragment for HTMX requests, full dashboard otherwise.
fn tab_response(headers: &HeaderMap, active: &str, fragment: String) -> Response {
    if is_htmx(headers) {
        Html(fragment).into_response()
    } else {
        Html(views::dashboard_page(active, &fragment)).into_response()
    }
}

fn store_error_fragment() -> String {
    notice_html("error", "The data store is unreachable right now.")
}

async fn inventory_fragment(state: &AppState, q: &str) -> String {
    match state.store.list_cars().await {
        Ok(cars) => {
            let visible = quick_search(&cars, q);
            views::inventory_tab(&visible, q)
        }
        Err(e) => {
            tracing::error!("car listing failed: {e}");
            store_error_fragment()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct InventoryQuery {
    #[serde(default)]
    q: String,
}

async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let fragment = inventory_fragment(&state, "").await;
    tab_response(&headers, "inventory", fragment)
}

async fn tab_inventory(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<InventoryQuery>,
) -> Response {
    let fragment = inventory_fragment(&state, &query.q).await;
    tab_response(&headers, "inventory", fragment)
}

async fn tab_contacts(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let fragment = match state.store.list_contact_inquiries().await {
        Ok(rows) => views::contacts_tab(&rows),
        Err(e) => {
            tracing::error!("contact listing failed: {e}");
            store_error_fragment()
        }
    };
    tab_response(&headers, "contacts", fragment)
}

async fn tab_finance(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let fragment = match state.store.list_finance_applications().await {
        Ok(rows) => views::finance_tab(&rows),
        Err(e) => {
            tracing::error!("finance listing failed: {e}");
            store_error_fragment()
        }
    };
    tab_response(&headers, "finance", fragment)
}

async fn tab_orders(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let fragment = match state.store.list_car_orders().await {
        Ok(rows) => views::orders_tab(&rows),
        Err(e) => {
            tracing::error!("order listing failed: {e}");
            store_error_fragment()
        }
    };
    tab_response(&headers, "orders", fragment)
}

async fn tab_appointments(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let fragment = match state.store.list_appointments().await {
        Ok(rows) => views::appointments_tab(&rows),
        Err(e) => {
            tracing::error!("appointment listing failed: {e}");
            store_error_fragment()
        }
    };
    tab_response(&headers, "appointments", fragment)
}

async fn testimonials_fragment(state: &AppState) -> String {
    match state.store.list_testimonials().await {
        Ok(rows) => views::testimonials_tab(&rows),
        Err(e) => {
            tracing::error!("testimonial listing failed: {e}");
            store_error_fragment()
        }
    }
}

async fn tab_testimonials(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let fragment = testimonials_fragment(&state).await;
    tab_response(&headers, "testimonials", fragment)
}

// ============== Cars ==============

async fn fetch_car(state: &AppState, id: Uuid) -> Option<Car> {
    match state.store.get_car(id).await {
        Ok(car) => car,
        Err(e) => {
            tracing::error!("car lookup failed: {e}");
            None
        }
    }
}

fn record_not_found(headers: &HeaderMap) -> Response {
    let mut response = tab_response(headers, "inventory", notice_html("error", "Record not found."));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

async fn refresh_inventory(state: &AppState, headers: &HeaderMap) -> Response {
    if is_htmx(headers) {
        Html(inventory_fragment(state, "").await).into_response()
    } else {
        Redirect::to("/admin").into_response()
    }
}

async fn new_car(headers: HeaderMap) -> Response {
    let fragment = views::car_form("Add Car", "/admin/cars", &CarForm::default(), None);
    tab_response(&headers, "inventory", fragment)
}

async fn create_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<CarForm>,
) -> Response {
    let car = form.to_new_car();
    if let Err(e) = car.validate() {
        let message = e.to_string();
        let fragment =
            views::car_form("Add Car", "/admin/cars", &form, Some(("error", message.as_str())));
        return tab_response(&headers, "inventory", fragment);
    }

    match state.store.create_car(&car).await {
        Ok(created) => {
            tracing::info!("car {} added to inventory", created.id);
            refresh_inventory(&state, &headers).await
        }
        Err(e) => {
            tracing::error!("car create failed: {e}");
            let fragment =
                views::car_form("Add Car", "/admin/cars", &form, Some(("error", STORE_ERROR)));
            tab_response(&headers, "inventory", fragment)
        }
    }
}

async fn edit_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(car) = fetch_car(&state, id).await else {
        return record_not_found(&headers);
    };
    let action = format!("/admin/cars/{id}");
    let fragment = views::car_form("Edit Car", &action, &CarForm::from_car(&car), None);
    tab_response(&headers, "inventory", fragment)
}

async fn update_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Form(form): Form<CarForm>,
) -> Response {
    let action = format!("/admin/cars/{id}");
    let car = form.to_new_car();
    if let Err(e) = car.validate() {
        let message = e.to_string();
        let fragment = views::car_form("Edit Car", &action, &form, Some(("error", message.as_str())));
        return tab_response(&headers, "inventory", fragment);
    }

    match state.store.update_car(id, &car).await {
        Ok(()) => refresh_inventory(&state, &headers).await,
        Err(e) => {
            tracing::error!("car update failed: {e}");
            let fragment = views::car_form("Edit Car", &action, &form, Some(("error", STORE_ERROR)));
            tab_response(&headers, "inventory", fragment)
        }
    }
}

async fn delete_car(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(e) = state.store.delete_car(id).await {
        tracing::error!("car delete failed: {e}");
    }
    refresh_inventory(&state, &headers).await
}

// ============== Images ==============

async fn images_response(state: &AppState, headers: &HeaderMap, car_id: Uuid) -> Response {
    let Some(car) = fetch_car(state, car_id).await else {
        return record_not_found(headers);
    };
    let images = state.store.list_images(car_id).await.unwrap_or_default();
    tab_response(headers, "inventory", views::images_panel(&car, &images))
}

async fn car_images(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    images_response(&state, &headers, id).await
}

fn extension_of(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "webp" | "gif" | "avif" => ext,
        _ => "jpg".to_string(),
    }
}

async fn upload_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Response {
    let mut uploaded = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }
        let extension = extension_of(field.file_name().unwrap_or_default());
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        match field.bytes().await {
            Ok(bytes) if !bytes.is_empty() => {
                uploaded = Some((bytes.to_vec(), content_type, extension));
                break;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("upload read failed: {e}"),
        }
    }

    if let Some((bytes, content_type, extension)) = uploaded {
        let existing = state.store.list_images(id).await.unwrap_or_default();
        match state
            .store
            .upload_image(id, bytes, &content_type, &extension)
            .await
        {
            Ok((url, path)) => {
                let row = NewCarImage::for_upload(id, url, path, &existing);
                if let Err(e) = state.store.add_image(&row).await {
                    tracing::error!("image row insert failed: {e}");
                }
            }
            Err(e) => tracing::error!("image upload failed: {e}"),
        }
    }

    images_response(&state, &headers, id).await
}

#[derive(Deserialize)]
struct ImageActionForm {
    car_id: Uuid,
}

async fn set_primary_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(image_id): Path<Uuid>,
    Form(form): Form<ImageActionForm>,
) -> Response {
    if let Err(e) = state.store.set_primary_image(form.car_id, image_id).await {
        tracing::error!("primary image change failed: {e}");
    }
    images_response(&state, &headers, form.car_id).await
}

async fn delete_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(image_id): Path<Uuid>,
    Form(form): Form<ImageActionForm>,
) -> Response {
    match state.store.list_images(form.car_id).await {
        Ok(images) => {
            if let Some(image) = images.iter().find(|img| img.id == image_id) {
                if let Err(e) = state.store.delete_image(image).await {
                    tracing::error!("image delete failed: {e}");
                }
            }
        }
        Err(e) => tracing::error!("image listing failed: {e}"),
    }
    images_response(&state, &headers, form.car_id).await
}

// ============== Specifications ==============

async fn edit_specs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(car) = fetch_car(&state, id).await else {
        return record_not_found(&headers);
    };
    let existing = state.store.get_specification(id).await.unwrap_or_default();
    let form = existing
        .as_ref()
        .map(SpecificationForm::from_specification)
        .unwrap_or_default();
    tab_response(&headers, "inventory", views::specs_form(&car, &form, None))
}

async fn save_specs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Form(form): Form<SpecificationForm>,
) -> Response {
    let Some(car) = fetch_car(&state, id).await else {
        return record_not_found(&headers);
    };
    let existing = state.store.get_specification(id).await.unwrap_or_default();
    let spec = form.to_specification(id);

    let notice = match state
        .store
        .save_specification(existing.map(|s| s.id), &spec)
        .await
    {
        Ok(()) => ("success", "Specifications saved."),
        Err(e) => {
            tracing::error!("specification save failed: {e}");
            ("error", STORE_ERROR)
        }
    };
    tab_response(&headers, "inventory", views::specs_form(&car, &form, Some(notice)))
}

// ============== Leads ==============

async fn delete_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(e) = state.store.delete_contact_inquiry(id).await {
        tracing::error!("contact delete failed: {e}");
    }
    let fragment = match state.store.list_contact_inquiries().await {
        Ok(rows) => views::contacts_tab(&rows),
        Err(_) => store_error_fragment(),
    };
    tab_response(&headers, "contacts", fragment)
}

async fn delete_finance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(e) = state.store.delete_finance_application(id).await {
        tracing::error!("finance delete failed: {e}");
    }
    let fragment = match state.store.list_finance_applications().await {
        Ok(rows) => views::finance_tab(&rows),
        Err(_) => store_error_fragment(),
    };
    tab_response(&headers, "finance", fragment)
}

async fn delete_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(e) = state.store.delete_car_order(id).await {
        tracing::error!("order delete failed: {e}");
    }
    let fragment = match state.store.list_car_orders().await {
        Ok(rows) => views::orders_tab(&rows),
        Err(_) => store_error_fragment(),
    };
    tab_response(&headers, "orders", fragment)
}

async fn delete_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(e) = state.store.delete_appointment(id).await {
        tracing::error!("appointment delete failed: {e}");
    }
    let fragment = match state.store.list_appointments().await {
        Ok(rows) => views::appointments_tab(&rows),
        Err(_) => store_error_fragment(),
    };
    tab_response(&headers, "appointments", fragment)
}

// ============== Testimonials ==============

async fn toggle_approved(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    match state.store.list_testimonials().await {
        Ok(rows) => {
            if let Some(row) = rows.iter().find(|t| t.id == id) {
                if let Err(e) = state.store.set_testimonial_approved(id, !row.approved()).await {
                    tracing::error!("testimonial approval change failed: {e}");
                }
            }
        }
        Err(e) => tracing::error!("testimonial listing failed: {e}"),
    }
    let fragment = testimonials_fragment(&state).await;
    tab_response(&headers, "testimonials", fragment)
}

async fn toggle_featured(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    match state.store.list_testimonials().await {
        Ok(rows) => {
            if let Some(row) = rows.iter().find(|t| t.id == id) {
                if let Err(e) = state.store.set_testimonial_featured(id, !row.featured()).await {
                    tracing::error!("testimonial feature change failed: {e}");
                }
            }
        }
        Err(e) => tracing::error!("testimonial listing failed: {e}"),
    }
    let fragment = testimonials_fragment(&state).await;
    tab_response(&headers, "testimonials", fragment)
}

async fn delete_testimonial(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    if let Err(e) = state.store.delete_testimonial(id).await {
        tracing::error!("testimonial delete failed: {e}");
    }
    let fragment = testimonials_fragment(&state).await;
    tab_response(&headers, "testimonials", fragment)
}

// ============== Export ==============

#[derive(Debug, Default, Deserialize)]
struct ExportQuery {
    #[serde(default)]
    q: String,
}

async fn export_cars(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let cars = match state.store.list_cars().await {
        Ok(cars) => cars,
        Err(e) => {
            tracing::error!("car listing failed: {e}");
            return (StatusCode::BAD_GATEWAY, "data store unreachable").into_response();
        }
    };
    let visible: Vec<Car> = quick_search(&cars, &query.q).into_iter().cloned().collect();

    match cars_to_csv(&visible) {
        Ok(bytes) => {
            let filename = export_filename(Utc::now().date_naive());
            (
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("csv export failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response()
        }
    }
}

// ============== Change feed ==============

/// Pushes one `change` event per store mutation seen by the realtime
/// subscription. The dashboard uses it to re-pull the active tab.
async fn events(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let rx = state.changes.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        result.ok().map(|change| {
            Ok(Event::default()
                .event("change")
                .data(format!("{} {}", change.action.as_str(), change.table)))
        })
    });
    Sse::new(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_whitelist() {
        assert_eq!(extension_of("photo.PNG"), "png");
        assert_eq!(extension_of("car.jpeg"), "jpeg");
        assert_eq!(extension_of("archive.exe"), "jpg");
        assert_eq!(extension_of("noextension"), "jpg");
        assert_eq!(extension_of(""), "jpg");
    }
}
