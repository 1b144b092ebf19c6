//! Public site pages.

use showroom_core::{
    Car, CarImage, CarSpecification, CatalogFilter, Faq, PriceBand, Testimonial, BRANDS,
    FUEL_TYPES, TRANSMISSIONS,
};

use crate::forms::{AppointmentForm, ContactForm, FinanceForm, OrderForm, TestimonialForm};
use crate::templates::{format_price, html_escape, notice_html, wrap_page};

/// (kind, message) pair for the banner above a form.
pub type Notice<'a> = Option<(&'a str, &'a str)>;

fn selected(current: &str, value: &str) -> &'static str {
    if current == value {
        " selected"
    } else {
        ""
    }
}

fn notice_block(notice: Notice) -> String {
    notice
        .map(|(kind, message)| notice_html(kind, message))
        .unwrap_or_default()
}

pub fn home_page(cars: &[Car]) -> String {
    let featured: String = cars.iter().take(3).map(car_card_html).collect();

    let content = format!(
        r#"<section class="hero">
    <h1>Find your next car in Cyprus</h1>
    <p>Hand-picked used vehicles, fully inspected and serviced. Flexible finance,
    island-wide delivery and a team that answers the phone.</p>
    <div class="actions">
        <a class="btn secondary" href="/inventory">Browse Inventory</a>
        <a class="btn" href="/order">Order a Car</a>
    </div>
</section>

<h2 class="section-title">Featured Vehicles</h2>
<div class="car-grid">
{featured}
</div>

<h2 class="section-title" style="margin-top:36px;">Why Choose Us</h2>
<div class="car-grid">
    <div class="faq-item"><h4>Inspected &amp; serviced</h4>
        <p>Every car is checked and serviced before it reaches the showroom.</p></div>
    <div class="faq-item"><h4>Finance available</h4>
        <p>Apply online in minutes and get an answer within two business days.</p></div>
    <div class="faq-item"><h4>Car sourcing</h4>
        <p>Can't find it here? Tell us what you want and we will import it.</p></div>
</div>"#
    );

    wrap_page("Home", &content)
}

pub fn car_card_html(car: &Car) -> String {
    let image = car
        .image_url
        .as_deref()
        .unwrap_or("https://images.unsplash.com/photo-1492144534655-ae79c964c9d7?w=800");
    let mileage = car
        .mileage
        .as_deref()
        .map(html_escape)
        .unwrap_or_else(|| "-".to_string());

    format!(
        r#"<div class="car-card">
    <img src="{image}" alt="{name}">
    <div class="body">
        <h3>{name}</h3>
        <div class="price">{price}</div>
        <div class="meta"><span>{year}</span><span>{mileage}</span><span>{fuel}</span><span>{transmission}</span></div>
        <a class="btn small" href="/cars/{id}">View Details</a>
    </div>
</div>"#,
        image = html_escape(image),
        name = html_escape(&car.display_name()),
        price = format_price(car.price),
        year = car.year,
        fuel = html_escape(&car.fuel_type),
        transmission = html_escape(&car.transmission),
        id = car.id,
    )
}

/// The grid fragment HTMX swaps in as filters change.
pub fn car_grid_html(visible: &[&Car], total: usize) -> String {
    if visible.is_empty() {
        return format!(
            r#"<div id="car-grid">
    <p class="result-count">Showing 0 of {total} vehicles</p>
    <div class="empty-note">No vehicles found matching your criteria.</div>
</div>"#
        );
    }

    let cards: String = visible.iter().map(|car| car_card_html(car)).collect();
    format!(
        r#"<div id="car-grid">
    <p class="result-count">Showing {shown} of {total} vehicles</p>
    <div class="car-grid">
{cards}
    </div>
</div>"#,
        shown = visible.len(),
    )
}

fn year_options(cars: &[Car], filter: &CatalogFilter) -> String {
    let mut years: Vec<i32> = cars.iter().map(|car| car.year).collect();
    years.sort_unstable();
    years.dedup();
    years
        .iter()
        .rev()
        .map(|year| {
            let sel = if filter.year == Some(*year) { " selected" } else { "" };
            format!("<option value=\"{year}\"{sel}>{year}</option>")
        })
        .collect()
}

pub fn inventory_page(cars: &[Car], visible: &[&Car], filter: &CatalogFilter) -> String {
    let brand_options: String = BRANDS
        .iter()
        .map(|brand| {
            let sel = selected(filter.brand.as_deref().unwrap_or(""), brand);
            format!("<option value=\"{brand}\"{sel}>{brand}</option>")
        })
        .collect();

    let price_options: String = PriceBand::ALL
        .iter()
        .map(|band| {
            let sel = if filter.price == Some(*band) { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{sel}>{}</option>",
                band.slug(),
                band.label()
            )
        })
        .collect();

    let fuel_options: String = FUEL_TYPES
        .iter()
        .map(|fuel| {
            let sel = selected(filter.fuel_type.as_deref().unwrap_or(""), fuel);
            format!("<option value=\"{fuel}\"{sel}>{fuel}</option>")
        })
        .collect();

    let transmission_options: String = TRANSMISSIONS
        .iter()
        .map(|t| {
            let sel = selected(filter.transmission.as_deref().unwrap_or(""), t);
            format!("<option value=\"{t}\"{sel}>{t}</option>")
        })
        .collect();

    let content = format!(
        r##"<h1 class="section-title">Inventory</h1>
<form id="filter-form" class="filter-bar" hx-get="/inventory" hx-target="#car-grid" hx-swap="outerHTML" hx-trigger="change, submit">
    <div class="field">
        <label for="q">Search</label>
        <input type="search" id="q" name="q" value="{query}" placeholder="Make or model">
    </div>
    <div class="field">
        <label for="brand">Brand</label>
        <select id="brand" name="brand">
            <option value="">All brands</option>
{brand_options}
        </select>
    </div>
    <div class="field">
        <label for="price">Price</label>
        <select id="price" name="price">
            <option value="">Any price</option>
{price_options}
        </select>
    </div>
    <div class="field">
        <label for="year">Year</label>
        <select id="year" name="year">
            <option value="">Any year</option>
{years}
        </select>
    </div>
    <div class="field">
        <label for="fuel_type">Fuel</label>
        <select id="fuel_type" name="fuel_type">
            <option value="">Any fuel</option>
{fuel_options}
        </select>
    </div>
    <div class="field">
        <label for="transmission">Transmission</label>
        <select id="transmission" name="transmission">
            <option value="">Any gearbox</option>
{transmission_options}
        </select>
    </div>
</form>
{grid}"##,
        query = html_escape(&filter.query),
        years = year_options(cars, filter),
        grid = car_grid_html(visible, cars.len()),
    );

    wrap_page("Inventory", &content)
}

const APPOINTMENT_TYPES: [(&str, &str); 4] = [
    ("test_drive", "Test drive"),
    ("viewing", "Viewing"),
    ("consultation", "Consultation"),
    ("finance_meeting", "Finance meeting"),
];

/// Appointment booking panel shown on every car detail page.
pub fn appointment_panel_html(car_id: &str, form: &AppointmentForm, notice: Notice) -> String {
    let type_options: String = APPOINTMENT_TYPES
        .iter()
        .map(|(value, label)| {
            let sel = selected(&form.appointment_type, value);
            format!("<option value=\"{value}\"{sel}>{label}</option>")
        })
        .collect();

    format!(
        r##"<div id="appointment-panel">
{notice}
<form class="stacked" hx-post="/appointments" hx-target="#appointment-panel" hx-swap="outerHTML">
    <input type="hidden" name="car_id" value="{car_id}">
    <div class="field"><label for="ap-name">Name *</label>
        <input id="ap-name" name="name" value="{name}"></div>
    <div class="field"><label for="ap-email">Email *</label>
        <input id="ap-email" type="email" name="email" value="{email}"></div>
    <div class="field"><label for="ap-phone">Phone</label>
        <input id="ap-phone" name="phone" value="{phone}"></div>
    <div class="field"><label for="ap-type">Appointment type *</label>
        <select id="ap-type" name="appointment_type">{type_options}</select></div>
    <div class="field"><label for="ap-date">Date and time *</label>
        <input id="ap-date" type="datetime-local" name="appointment_date" value="{date}"></div>
    <div class="field"><label for="ap-message">Message</label>
        <textarea id="ap-message" name="message">{message}</textarea></div>
    <button class="btn" type="submit">Book Appointment</button>
</form>
</div>"##,
        notice = notice_block(notice),
        car_id = html_escape(car_id),
        name = html_escape(&form.name),
        email = html_escape(&form.email),
        phone = html_escape(&form.phone),
        date = html_escape(&form.appointment_date),
        message = html_escape(&form.message),
    )
}

fn spec_rows(spec: &CarSpecification) -> String {
    let mut rows = String::new();
    let mut push = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            rows.push_str(&format!(
                "<tr><td>{label}</td><td>{}</td></tr>",
                html_escape(&value)
            ));
        }
    };

    push("Engine", spec.engine_size.clone());
    push("Horsepower", spec.horsepower.map(|n| format!("{n} hp")));
    push("Torque", spec.torque.map(|n| format!("{n} Nm")));
    push(
        "0-100 km/h",
        spec.acceleration_0_100.map(|n| format!("{n} s")),
    );
    push("Top speed", spec.top_speed.map(|n| format!("{n} km/h")));
    push(
        "Consumption (city)",
        spec.fuel_consumption_city.map(|n| format!("{n} l/100km")),
    );
    push(
        "Consumption (highway)",
        spec.fuel_consumption_highway.map(|n| format!("{n} l/100km")),
    );
    push(
        "Consumption (combined)",
        spec.fuel_consumption_combined.map(|n| format!("{n} l/100km")),
    );
    push("CO2 emissions", spec.co2_emissions.map(|n| format!("{n} g/km")));
    push("Drivetrain", spec.drivetrain.clone());
    push("Exterior color", spec.exterior_color.clone());
    push("Interior color", spec.interior_color.clone());
    push("Doors", spec.number_of_doors.map(|n| n.to_string()));
    push("Seats", spec.number_of_seats.map(|n| n.to_string()));
    push("Boot capacity", spec.boot_capacity.map(|n| format!("{n} l")));
    push("Weight", spec.weight.map(|n| format!("{n} kg")));
    push("Length", spec.length.map(|n| format!("{n} mm")));
    push("Width", spec.width.map(|n| format!("{n} mm")));
    push("Height", spec.height.map(|n| format!("{n} mm")));
    push("Wheelbase", spec.wheelbase.map(|n| format!("{n} mm")));
    push(
        "Warranty",
        spec.warranty_years.map(|n| format!("{n} years")),
    );
    rows
}

pub fn car_detail_page(
    car: &Car,
    images: &[CarImage],
    spec: Option<&CarSpecification>,
) -> String {
    let main_image = showroom_core::primary_image(images)
        .map(|img| img.image_url.clone())
        .or_else(|| images.first().map(|img| img.image_url.clone()))
        .or_else(|| car.image_url.clone())
        .unwrap_or_else(|| {
            "https://images.unsplash.com/photo-1492144534655-ae79c964c9d7?w=800".to_string()
        });

    let thumbs: String = images
        .iter()
        .map(|img| {
            let alt = img.alt_text.as_deref().unwrap_or("Car image");
            format!(
                "<img src=\"{}\" alt=\"{}\">",
                html_escape(&img.image_url),
                html_escape(alt)
            )
        })
        .collect();

    let description = car
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", html_escape(d)))
        .unwrap_or_default();

    let spec_section = match spec {
        Some(spec) => {
            let rows = spec_rows(spec);
            if rows.is_empty() {
                String::new()
            } else {
                format!(
                    "<h2 class=\"section-title\" style=\"margin-top:28px;\">Specifications</h2>\
                     <table class=\"spec-table\">{rows}</table>"
                )
            }
        }
        None => String::new(),
    };

    let mileage = car
        .mileage
        .as_deref()
        .map(html_escape)
        .unwrap_or_else(|| "-".to_string());

    let content = format!(
        r#"<div class="detail-layout">
    <div class="gallery">
        <img class="main" src="{main_image}" alt="{name}">
        <div class="thumbs">{thumbs}</div>
        {description}
        {spec_section}
    </div>
    <div>
        <h1>{name}</h1>
        <p class="price" style="font-size:1.6rem;color:var(--brand);font-weight:700;">{price}</p>
        <table class="spec-table" style="margin:14px 0 24px;">
            <tr><td>Year</td><td>{year}</td></tr>
            <tr><td>Mileage</td><td>{mileage}</td></tr>
            <tr><td>Fuel type</td><td>{fuel}</td></tr>
            <tr><td>Transmission</td><td>{transmission}</td></tr>
        </table>
        <h2 class="section-title">Book an Appointment</h2>
        {appointment}
    </div>
</div>"#,
        main_image = html_escape(&main_image),
        name = html_escape(&car.display_name()),
        price = format_price(car.price),
        year = car.year,
        fuel = html_escape(&car.fuel_type),
        transmission = html_escape(&car.transmission),
        appointment = appointment_panel_html(&car.id.to_string(), &AppointmentForm::default(), None),
    );

    wrap_page(&car.display_name(), &content)
}

const EMPLOYMENT_STATUSES: [(&str, &str); 4] = [
    ("employed", "Employed"),
    ("self_employed", "Self-employed"),
    ("retired", "Retired"),
    ("student", "Student"),
];

pub fn finance_form_html(form: &FinanceForm, notice: Notice) -> String {
    let status_options: String = EMPLOYMENT_STATUSES
        .iter()
        .map(|(value, label)| {
            let sel = selected(&form.employment_status, value);
            format!("<option value=\"{value}\"{sel}>{label}</option>")
        })
        .collect();

    format!(
        r##"<div id="finance-panel">
{notice}
<form class="stacked" hx-post="/finance" hx-target="#finance-panel" hx-swap="outerHTML">
    <div class="field"><label for="fin-name">Name *</label>
        <input id="fin-name" name="name" value="{name}"></div>
    <div class="field"><label for="fin-email">Email *</label>
        <input id="fin-email" type="email" name="email" value="{email}"></div>
    <div class="field"><label for="fin-phone">Phone</label>
        <input id="fin-phone" name="phone" value="{phone}"></div>
    <div class="field"><label for="fin-income">Annual income (&#8364;)</label>
        <input id="fin-income" type="number" name="annual_income" value="{income}"></div>
    <div class="field"><label for="fin-loan">Loan amount (&#8364;)</label>
        <input id="fin-loan" type="number" name="loan_amount" value="{loan}"></div>
    <div class="field"><label for="fin-status">Employment status</label>
        <select id="fin-status" name="employment_status">
            <option value="">Select status</option>{status_options}
        </select></div>
    <button class="btn" type="submit">Apply for Finance</button>
</form>
</div>"##,
        notice = notice_block(notice),
        name = html_escape(&form.name),
        email = html_escape(&form.email),
        phone = html_escape(&form.phone),
        income = html_escape(&form.annual_income),
        loan = html_escape(&form.loan_amount),
    )
}

pub fn finance_page(form: &FinanceForm, notice: Notice) -> String {
    let content = format!(
        r#"<h1 class="section-title">Car Finance</h1>
<p style="max-width:560px;margin-bottom:18px;">Apply online and our finance team will
come back to you within two business days with a tailored offer.</p>
{}"#,
        finance_form_html(form, notice)
    );
    wrap_page("Finance", &content)
}

pub fn order_form_html(form: &OrderForm, notice: Notice) -> String {
    format!(
        r##"<div id="order-panel">
{notice}
<form class="stacked" hx-post="/order" hx-target="#order-panel" hx-swap="outerHTML">
    <div class="field"><label for="ord-name">Name *</label>
        <input id="ord-name" name="name" value="{name}"></div>
    <div class="field"><label for="ord-email">Email *</label>
        <input id="ord-email" type="email" name="email" value="{email}"></div>
    <div class="field"><label for="ord-phone">Phone</label>
        <input id="ord-phone" name="phone" value="{phone}"></div>
    <div class="field"><label for="ord-make">Make *</label>
        <input id="ord-make" name="car_make" value="{make}" placeholder="e.g. Audi"></div>
    <div class="field"><label for="ord-model">Model *</label>
        <input id="ord-model" name="car_model" value="{model}" placeholder="e.g. A4 Avant"></div>
    <div class="field"><label for="ord-budget">Budget range</label>
        <input id="ord-budget" name="budget_range" value="{budget}" placeholder="e.g. 20000-30000"></div>
    <div class="field"><label for="ord-req">Special requirements</label>
        <textarea id="ord-req" name="special_requirements">{requirements}</textarea></div>
    <button class="btn" type="submit">Request This Car</button>
</form>
</div>"##,
        notice = notice_block(notice),
        name = html_escape(&form.name),
        email = html_escape(&form.email),
        phone = html_escape(&form.phone),
        make = html_escape(&form.car_make),
        model = html_escape(&form.car_model),
        budget = html_escape(&form.budget_range),
        requirements = html_escape(&form.special_requirements),
    )
}

pub fn order_page(form: &OrderForm, notice: Notice) -> String {
    let content = format!(
        r#"<h1 class="section-title">Order a Car</h1>
<p style="max-width:560px;margin-bottom:18px;">Looking for something specific? Tell us
the make, model and budget and we will source it for you.</p>
{}"#,
        order_form_html(form, notice)
    );
    wrap_page("Order Car", &content)
}

pub fn contact_form_html(form: &ContactForm, notice: Notice) -> String {
    format!(
        r##"<div id="contact-panel">
{notice}
<form class="stacked" hx-post="/contact" hx-target="#contact-panel" hx-swap="outerHTML">
    <div class="field"><label for="ct-name">Name *</label>
        <input id="ct-name" name="name" value="{name}"></div>
    <div class="field"><label for="ct-email">Email *</label>
        <input id="ct-email" type="email" name="email" value="{email}"></div>
    <div class="field"><label for="ct-phone">Phone</label>
        <input id="ct-phone" name="phone" value="{phone}"></div>
    <div class="field"><label for="ct-message">Message *</label>
        <textarea id="ct-message" name="message">{message}</textarea></div>
    <button class="btn" type="submit">Send Message</button>
</form>
</div>"##,
        notice = notice_block(notice),
        name = html_escape(&form.name),
        email = html_escape(&form.email),
        phone = html_escape(&form.phone),
        message = html_escape(&form.message),
    )
}

pub fn faq_list_html(faqs: &[Faq]) -> String {
    faqs.iter()
        .map(|faq| {
            format!(
                "<div class=\"faq-item\"><h4>{}</h4><p>{}</p></div>",
                html_escape(&faq.question),
                html_escape(&faq.answer)
            )
        })
        .collect()
}

pub fn contact_page(form: &ContactForm, notice: Notice, faqs: &[Faq]) -> String {
    let faq_section = if faqs.is_empty() {
        String::new()
    } else {
        format!(
            "<h2 class=\"section-title\" style=\"margin-top:36px;\">Frequently Asked Questions</h2>{}",
            faq_list_html(faqs)
        )
    };

    let content = format!(
        r#"<h1 class="section-title">Contact Us</h1>
<div class="detail-layout">
    <div>{form}</div>
    <div>
        <div class="faq-item"><h4>Visit or call</h4>
            <p>+357 99 676 373<br>+357 99 155 460</p>
            <p><a href="mailto:androsancars@gmail.com">androsancars@gmail.com</a></p>
        </div>
    </div>
</div>
{faq_section}"#,
        form = contact_form_html(form, notice),
    );

    wrap_page("Contact", &content)
}

fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!(
        "{}{}",
        "\u{2605}".repeat(filled),
        "\u{2606}".repeat(5 - filled)
    )
}

pub fn testimonial_form_html(form: &TestimonialForm, notice: Notice) -> String {
    let rating_options: String = (1..=5)
        .rev()
        .map(|n| {
            let sel = selected(&form.rating, &n.to_string());
            format!("<option value=\"{n}\"{sel}>{n} star{}</option>", if n == 1 { "" } else { "s" })
        })
        .collect();

    format!(
        r##"<div id="testimonial-panel">
{notice}
<form class="stacked" hx-post="/testimonials" hx-target="#testimonial-panel" hx-swap="outerHTML">
    <div class="field"><label for="ts-name">Name *</label>
        <input id="ts-name" name="customer_name" value="{name}"></div>
    <div class="field"><label for="ts-email">Email</label>
        <input id="ts-email" type="email" name="customer_email" value="{email}"></div>
    <div class="field"><label for="ts-rating">Rating *</label>
        <select id="ts-rating" name="rating"><option value="">Select rating</option>{rating_options}</select></div>
    <div class="field"><label for="ts-title">Title</label>
        <input id="ts-title" name="title" value="{title}"></div>
    <div class="field"><label for="ts-content">Your review *</label>
        <textarea id="ts-content" name="content">{content}</textarea></div>
    <div class="field"><label for="ts-car">Car purchased</label>
        <input id="ts-car" name="car_purchased" value="{car}"></div>
    <div class="field"><label for="ts-date">Purchase date</label>
        <input id="ts-date" type="date" name="purchase_date" value="{date}"></div>
    <button class="btn" type="submit">Submit Review</button>
</form>
</div>"##,
        notice = notice_block(notice),
        name = html_escape(&form.customer_name),
        email = html_escape(&form.customer_email),
        title = html_escape(&form.title),
        content = html_escape(&form.content),
        car = html_escape(&form.car_purchased),
        date = html_escape(&form.purchase_date),
    )
}

pub fn testimonials_page(
    testimonials: &[Testimonial],
    form: &TestimonialForm,
    notice: Notice,
) -> String {
    let list: String = if testimonials.is_empty() {
        "<div class=\"empty-note\">No reviews yet. Be the first to share your experience.</div>"
            .to_string()
    } else {
        testimonials
            .iter()
            .map(|t| {
                let title = t
                    .title
                    .as_deref()
                    .map(|title| format!("<h4>{}</h4>", html_escape(title)))
                    .unwrap_or_default();
                let car = t
                    .car_purchased
                    .as_deref()
                    .map(|car| format!(" &#8226; {}", html_escape(car)))
                    .unwrap_or_default();
                format!(
                    r#"<div class="testimonial">
    <div class="stars">{stars}</div>
    {title}
    <p>{content}</p>
    <div class="who">{name}{car}</div>
</div>"#,
                    stars = stars(t.rating),
                    content = html_escape(&t.content),
                    name = html_escape(&t.customer_name),
                )
            })
            .collect()
    };

    let content = format!(
        r#"<h1 class="section-title">Customer Testimonials</h1>
<div class="detail-layout">
    <div>{list}</div>
    <div>
        <h2 class="section-title">Share Your Experience</h2>
        <p style="margin-bottom:12px;color:var(--ink-soft);">Your review appears once our team approves it.</p>
        {form}
    </div>
</div>"#,
        form = testimonial_form_html(form, notice),
    );

    wrap_page("Testimonials", &content)
}

pub fn not_found_page() -> String {
    let content = r#"<div class="empty-note" style="margin-top:40px;">
    <h1 style="margin-bottom:8px;">Page not found</h1>
    <p>The page you are looking for does not exist or the vehicle has been sold.</p>
    <p style="margin-top:14px;"><a class="btn" href="/inventory">Back to Inventory</a></p>
</div>"#;
    wrap_page("Not Found", content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn car(make: &str, model: &str) -> Car {
        Car {
            id: Uuid::from_u128(1),
            make: make.to_string(),
            model: model.to_string(),
            year: 2021,
            price: 28500.0,
            mileage: Some("30,000 km".to_string()),
            fuel_type: "Petrol".to_string(),
            transmission: "Automatic".to_string(),
            description: Some("One owner".to_string()),
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_card_escapes_and_prices() {
        let html = car_card_html(&car("BMW", "320i <script>"));
        assert!(html.contains("BMW 320i &lt;script&gt;"));
        assert!(html.contains("\u{20ac}28,500"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_grid_counts_and_empty_state() {
        let a = car("BMW", "320i");
        let visible = vec![&a];

        let html = car_grid_html(&visible, 2);
        assert!(html.contains("Showing 1 of 2 vehicles"));

        let html = car_grid_html(&[], 2);
        assert!(html.contains("Showing 0 of 2 vehicles"));
        assert!(html.contains("No vehicles found matching your criteria."));
    }

    #[test]
    fn test_filter_state_round_trips_into_selects() {
        let cars = vec![car("BMW", "320i")];
        let filter = CatalogFilter {
            query: "bmw".to_string(),
            brand: Some("BMW".to_string()),
            price: Some(PriceBand::From25000To35000),
            year: Some(2021),
            fuel_type: Some("Petrol".to_string()),
            transmission: None,
        };

        let visible: Vec<&Car> = cars.iter().collect();
        let html = inventory_page(&cars, &visible, &filter);
        assert!(html.contains("value=\"bmw\""));
        assert!(html.contains("<option value=\"BMW\" selected>"));
        assert!(html.contains("<option value=\"25000-35000\" selected>"));
        assert!(html.contains("<option value=\"2021\" selected>2021</option>"));
    }

    #[test]
    fn test_appointment_panel_retains_values() {
        let form = AppointmentForm {
            name: "Costas".to_string(),
            appointment_type: "viewing".to_string(),
            appointment_date: "2025-06-14T10:30".to_string(),
            ..Default::default()
        };

        let html = appointment_panel_html("abc", &form, Some(("error", "failed to save")));
        assert!(html.contains("value=\"Costas\""));
        assert!(html.contains("<option value=\"viewing\" selected>"));
        assert!(html.contains("value=\"2025-06-14T10:30\""));
        assert!(html.contains("notice error"));
    }

    #[test]
    fn test_stars_render() {
        assert_eq!(stars(4), "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}");
        assert_eq!(stars(0), "\u{2606}\u{2606}\u{2606}\u{2606}\u{2606}");
    }
}
