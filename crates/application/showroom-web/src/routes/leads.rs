//! Public form submissions: contact, finance, car orders, appointments,
//! and testimonials. Validation failures re-render the form with the
//! submitted values intact; successes clear it.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::routing::post;
use axum::{Form, Router};
use serde_json::json;

use showroom_core::NewAppointment;

use crate::forms::{AppointmentForm, ContactForm, FinanceForm, OrderForm, TestimonialForm};
use crate::routes::is_htmx;
use crate::state::AppState;
use crate::templates::{pages, wrap_page};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(submit_contact))
        .route("/finance", post(submit_finance))
        .route("/order", post(submit_order))
        .route("/appointments", post(submit_appointment))
        .route("/testimonials", post(submit_testimonial))
}

const STORE_ERROR: &str = "Something went wrong saving your request. Please try again.";

async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ContactForm>,
) -> Html<String> {
    let inquiry = form.to_inquiry();
    let (form, kind, message) = match inquiry.validate() {
        Ok(()) => match state.store.add_contact_inquiry(&inquiry).await {
            Ok(()) => (
                ContactForm::default(),
                "success",
                "Thank you for contacting us! We will get back to you soon.".to_string(),
            ),
            Err(e) => {
                tracing::error!("contact inquiry save failed: {e}");
                (form, "error", STORE_ERROR.to_string())
            }
        },
        Err(e) => (form, "error", e.to_string()),
    };
    let notice = Some((kind, message.as_str()));

    if is_htmx(&headers) {
        Html(pages::contact_form_html(&form, notice))
    } else {
        let faqs = state.store.list_faqs(None, false).await.unwrap_or_default();
        Html(pages::contact_page(&form, notice, &faqs))
    }
}

async fn submit_finance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<FinanceForm>,
) -> Html<String> {
    let application = form.to_application();
    let (form, kind, message) = match application.validate() {
        Ok(()) => match state.store.add_finance_application(&application).await {
            Ok(()) => (
                FinanceForm::default(),
                "success",
                "Finance application received! Our team will be in touch.".to_string(),
            ),
            Err(e) => {
                tracing::error!("finance application save failed: {e}");
                (form, "error", STORE_ERROR.to_string())
            }
        },
        Err(e) => (form, "error", e.to_string()),
    };
    let notice = Some((kind, message.as_str()));

    if is_htmx(&headers) {
        Html(pages::finance_form_html(&form, notice))
    } else {
        Html(pages::finance_page(&form, notice))
    }
}

async fn submit_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<OrderForm>,
) -> Html<String> {
    let order = form.to_order();
    let (form, kind, message) = match order.validate() {
        Ok(()) => match state.store.add_car_order(&order).await {
            Ok(()) => (
                OrderForm::default(),
                "success",
                "Order inquiry received! We will start the search for your car.".to_string(),
            ),
            Err(e) => {
                tracing::error!("car order save failed: {e}");
                (form, "error", STORE_ERROR.to_string())
            }
        },
        Err(e) => (form, "error", e.to_string()),
    };
    let notice = Some((kind, message.as_str()));

    if is_htmx(&headers) {
        Html(pages::order_form_html(&form, notice))
    } else {
        Html(pages::order_page(&form, notice))
    }
}

async fn submit_appointment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AppointmentForm>,
) -> Html<String> {
    let car_id = form.car_id.clone();

    let (form, kind, message) = match form.to_appointment() {
        Ok(appointment) => match appointment.validate() {
            Ok(()) => match state.store.add_appointment(&appointment).await {
                Ok(()) => {
                    send_confirmation(&state, &appointment);
                    (
                        AppointmentForm {
                            car_id: car_id.clone(),
                            ..AppointmentForm::default()
                        },
                        "success",
                        "Appointment request received! We will confirm shortly.".to_string(),
                    )
                }
                Err(e) => {
                    tracing::error!("appointment save failed: {e}");
                    (form, "error", STORE_ERROR.to_string())
                }
            },
            Err(e) => (form, "error", e.to_string()),
        },
        Err(_) => (
            form,
            "error",
            "Please pick a valid date and time.".to_string(),
        ),
    };

    let panel = pages::appointment_panel_html(&car_id, &form, Some((kind, message.as_str())));
    if is_htmx(&headers) {
        Html(panel)
    } else {
        Html(wrap_page("Book an Appointment", &panel))
    }
}

async fn submit_testimonial(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TestimonialForm>,
) -> Html<String> {
    let testimonial = form.to_testimonial();
    let (form, kind, message) = match testimonial.validate() {
        Ok(()) => match state.store.add_testimonial(&testimonial).await {
            Ok(()) => (
                TestimonialForm::default(),
                "success",
                "Thank you! Your review appears once our team approves it.".to_string(),
            ),
            Err(e) => {
                tracing::error!("testimonial save failed: {e}");
                (form, "error", STORE_ERROR.to_string())
            }
        },
        Err(e) => (form, "error", e.to_string()),
    };
    let notice = Some((kind, message.as_str()));

    if is_htmx(&headers) {
        Html(pages::testimonial_form_html(&form, notice))
    } else {
        let approved = state
            .store
            .list_approved_testimonials(20)
            .await
            .unwrap_or_default();
        Html(pages::testimonials_page(&approved, &form, notice))
    }
}

/// Post the appointment to the notification service without holding up the
/// response. Failures are logged; the booking itself already succeeded.
fn send_confirmation(state: &AppState, appointment: &NewAppointment) {
    let Some(base) = state.notify_url.clone() else {
        return;
    };
    let client = state.http.clone();
    let payload = json!({
        "type": "appointment",
        "data": {
            "name": appointment.name,
            "email": appointment.email,
            "appointment_date": appointment.appointment_date.to_rfc3339(),
            "appointment_type": appointment.appointment_type,
            "car_id": appointment.car_id.map(|id| id.to_string()),
        },
    });

    tokio::spawn(async move {
        let url = format!("{}/send-notification-email", base.trim_end_matches('/'));
        match client.post(&url).json(&payload).send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!("confirmation email rejected: {}", response.status());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("confirmation email failed: {e}"),
        }
    });
}
