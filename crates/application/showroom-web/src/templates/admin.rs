//! Back-office pages and fragments.
//!
//! Tabs are full page loads; everything inside a tab (search, row actions,
//! uploads) goes through HTMX against `#tab-content`. The dashboard opens
//! an EventSource on `/admin/events` and re-pulls the active tab whenever
//! the store reports a change.

use chrono::{DateTime, Utc};

use showroom_core::{
    Appointment, Car, CarImage, CarOrder, ContactInquiry, FinanceApplication, Testimonial,
    FUEL_TYPES, TRANSMISSIONS,
};

use crate::forms::{CarForm, SpecificationForm};
use crate::templates::pages::Notice;
use crate::templates::{format_price, html_escape, notice_html, wrap_page};

const TABS: [(&str, &str); 6] = [
    ("inventory", "Inventory"),
    ("contacts", "Contacts"),
    ("finance", "Finance"),
    ("orders", "Orders"),
    ("appointments", "Appointments"),
    ("testimonials", "Testimonials"),
];

fn fmt_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

fn excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        html_escape(text)
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", html_escape(cut.trim_end()))
    }
}

pub fn login_page(csrf: &str, error: Option<&str>) -> String {
    let banner = error
        .map(|message| notice_html("error", message))
        .unwrap_or_default();

    let content = format!(
        r#"<div class="login-box">
    <h1>Staff Login</h1>
    {banner}
    <form class="stacked" method="post" action="/admin/login">
        <input type="hidden" name="csrf_token" value="{csrf}">
        <div class="field"><label for="username">Username</label>
            <input id="username" name="username" autocomplete="username"></div>
        <div class="field"><label for="password">Password</label>
            <input id="password" type="password" name="password" autocomplete="current-password"></div>
        <button class="btn" type="submit">Sign In</button>
    </form>
</div>"#,
        csrf = html_escape(csrf),
    );

    wrap_page("Admin Login", &content)
}

/// Full dashboard page with `content` already rendered into the active tab.
pub fn dashboard_page(active: &str, content: &str) -> String {
    let tab_bar: String = TABS
        .iter()
        .map(|(slug, label)| {
            let class = if *slug == active { " class=\"active\"" } else { "" };
            format!("<a href=\"/admin/tabs/{slug}\"{class}>{label}</a>")
        })
        .collect();

    let page = format!(
        r#"<div class="admin-bar">
    <h1 class="section-title" style="margin:0;">Dashboard</h1>
    <div class="row-actions">
        <a class="btn secondary small" href="/">View Site</a>
        <a class="btn secondary small" href="/admin/logout">Log Out</a>
    </div>
</div>
<div class="tab-bar">{tab_bar}</div>
<div id="tab-content" hx-get="/admin/tabs/{active}" hx-trigger="refresh" hx-swap="innerHTML">
{content}
</div>
<script>
  (function () {{
    var source = new EventSource('/admin/events');
    source.addEventListener('change', function () {{
      htmx.trigger('#tab-content', 'refresh');
    }});
  }})();
</script>"#
    );

    wrap_page("Admin", &page)
}

// ============== Inventory tab ==============

pub fn inventory_tab(cars: &[&Car], q: &str) -> String {
    let rows: String = cars
        .iter()
        .map(|car| {
            format!(
                r##"<tr>
    <td>{name}</td>
    <td>{year}</td>
    <td>{price}</td>
    <td>{fuel}</td>
    <td>{transmission}</td>
    <td class="row-actions">
        <a class="btn secondary small" href="/admin/cars/{id}/edit">Edit</a>
        <a class="btn secondary small" href="/admin/cars/{id}/images">Images</a>
        <a class="btn secondary small" href="/admin/cars/{id}/specs">Specs</a>
        <button class="btn danger small" hx-post="/admin/cars/{id}/delete"
            hx-target="#tab-content" hx-swap="innerHTML"
            hx-confirm="Delete this car and its images?">Delete</button>
    </td>
</tr>"##,
                name = html_escape(&car.display_name()),
                year = car.year,
                price = format_price(car.price),
                fuel = html_escape(&car.fuel_type),
                transmission = html_escape(&car.transmission),
                id = car.id,
            )
        })
        .collect();

    let body = if cars.is_empty() {
        "<div class=\"empty-note\">No cars match.</div>".to_string()
    } else {
        format!(
            r#"<table class="data-table">
<thead><tr><th>Car</th><th>Year</th><th>Price</th><th>Fuel</th><th>Gearbox</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
        )
    };

    format!(
        r##"<div class="toolbar">
    <input type="search" name="q" value="{q}" placeholder="Quick search..."
        hx-get="/admin/tabs/inventory" hx-target="#tab-content" hx-swap="innerHTML"
        hx-trigger="keyup changed delay:300ms, search">
    <a class="btn small" href="/admin/cars/new">Add Car</a>
    <a class="btn secondary small" href="/admin/export/cars.csv?q={q_url}">Export CSV</a>
</div>
{body}"##,
        q = html_escape(q),
        q_url = urlencode(q),
    )
}

/// Minimal query-string escape for values embedded in hrefs.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

pub fn car_form(title: &str, action: &str, form: &CarForm, notice: Notice) -> String {
    let banner = notice
        .map(|(kind, message)| notice_html(kind, message))
        .unwrap_or_default();

    let fuel_options: String = FUEL_TYPES
        .iter()
        .map(|fuel| {
            let sel = if *fuel == form.fuel_type { " selected" } else { "" };
            format!("<option value=\"{fuel}\"{sel}>{fuel}</option>")
        })
        .collect();

    let transmission_options: String = TRANSMISSIONS
        .iter()
        .map(|t| {
            let sel = if *t == form.transmission { " selected" } else { "" };
            format!("<option value=\"{t}\"{sel}>{t}</option>")
        })
        .collect();

    format!(
        r##"<h2 class="section-title">{title}</h2>
{banner}
<form class="stacked" style="max-width:680px;" hx-post="{action}" hx-target="#tab-content" hx-swap="innerHTML">
    <div class="form-grid">
        <div class="field"><label>Make *</label><input name="make" value="{make}"></div>
        <div class="field"><label>Model *</label><input name="model" value="{model}"></div>
        <div class="field"><label>Year</label><input type="number" name="year" value="{year}"></div>
        <div class="field"><label>Price (&#8364;)</label><input type="number" step="0.01" name="price" value="{price}"></div>
        <div class="field"><label>Mileage</label><input name="mileage" value="{mileage}" placeholder="e.g. 45,000 km"></div>
        <div class="field"><label>Fuel type</label><select name="fuel_type">{fuel_options}</select></div>
        <div class="field"><label>Transmission</label><select name="transmission">{transmission_options}</select></div>
        <div class="field"><label>Cover image URL</label><input name="image_url" value="{image_url}"></div>
        <div class="field wide"><label>Description</label><textarea name="description">{description}</textarea></div>
    </div>
    <div class="row-actions">
        <button class="btn" type="submit">Save Car</button>
        <a class="btn secondary" href="/admin/tabs/inventory">Cancel</a>
    </div>
</form>"##,
        make = html_escape(&form.make),
        model = html_escape(&form.model),
        year = html_escape(&form.year),
        price = html_escape(&form.price),
        mileage = html_escape(&form.mileage),
        image_url = html_escape(&form.image_url),
        description = html_escape(&form.description),
    )
}

pub fn images_panel(car: &Car, images: &[CarImage]) -> String {
    let tiles: String = images
        .iter()
        .map(|image| {
            let badge = if image.primary() {
                "<span class=\"badge on\">Primary</span>".to_string()
            } else {
                format!(
                    r##"<button class="btn secondary small" hx-post="/admin/images/{id}/primary"
    hx-vals='{{"car_id": "{car_id}"}}' hx-target="#tab-content" hx-swap="innerHTML">Set primary</button>"##,
                    id = image.id,
                    car_id = car.id,
                )
            };
            let alt = image.alt_text.as_deref().unwrap_or("Car image");
            format!(
                r##"<div class="tile">
    <img src="{url}" alt="{alt}">
    <div class="row-actions">
        {badge}
        <button class="btn danger small" hx-post="/admin/images/{id}/delete"
            hx-vals='{{"car_id": "{car_id}"}}' hx-target="#tab-content" hx-swap="innerHTML"
            hx-confirm="Delete this image?">Delete</button>
    </div>
</div>"##,
                url = html_escape(&image.image_url),
                alt = html_escape(alt),
                id = image.id,
                car_id = car.id,
            )
        })
        .collect();

    let gallery = if images.is_empty() {
        "<div class=\"empty-note\">No images uploaded yet.</div>".to_string()
    } else {
        format!("<div class=\"image-admin\">{tiles}</div>")
    };

    format!(
        r##"<h2 class="section-title">Images - {name}</h2>
<form class="toolbar" hx-post="/admin/cars/{id}/images" hx-target="#tab-content"
    hx-swap="innerHTML" hx-encoding="multipart/form-data">
    <input type="file" name="image" accept="image/*" required>
    <button class="btn small" type="submit">Upload</button>
    <a class="btn secondary small" href="/admin/tabs/inventory">Back</a>
</form>
{gallery}"##,
        name = html_escape(&car.display_name()),
        id = car.id,
    )
}

pub fn specs_form(car: &Car, form: &SpecificationForm, notice: Notice) -> String {
    let banner = notice
        .map(|(kind, message)| notice_html(kind, message))
        .unwrap_or_default();

    let text_field = |label: &str, name: &str, value: &str, placeholder: &str| {
        format!(
            "<div class=\"field\"><label>{label}</label>\
             <input name=\"{name}\" value=\"{}\" placeholder=\"{placeholder}\"></div>",
            html_escape(value)
        )
    };

    let fields = [
        text_field("Engine size", "engine_size", &form.engine_size, "e.g. 2.0L"),
        text_field("Horsepower", "horsepower", &form.horsepower, "hp"),
        text_field("Torque", "torque", &form.torque, "Nm"),
        text_field("0-100 km/h", "acceleration_0_100", &form.acceleration_0_100, "s"),
        text_field("Top speed", "top_speed", &form.top_speed, "km/h"),
        text_field("Consumption city", "fuel_consumption_city", &form.fuel_consumption_city, "l/100km"),
        text_field("Consumption highway", "fuel_consumption_highway", &form.fuel_consumption_highway, "l/100km"),
        text_field("Consumption combined", "fuel_consumption_combined", &form.fuel_consumption_combined, "l/100km"),
        text_field("CO2 emissions", "co2_emissions", &form.co2_emissions, "g/km"),
        text_field("Drivetrain", "drivetrain", &form.drivetrain, "e.g. FWD"),
        text_field("Exterior color", "exterior_color", &form.exterior_color, ""),
        text_field("Interior color", "interior_color", &form.interior_color, ""),
        text_field("Doors", "number_of_doors", &form.number_of_doors, ""),
        text_field("Seats", "number_of_seats", &form.number_of_seats, ""),
        text_field("Boot capacity", "boot_capacity", &form.boot_capacity, "l"),
        text_field("Weight", "weight", &form.weight, "kg"),
        text_field("Length", "length", &form.length, "mm"),
        text_field("Width", "width", &form.width, "mm"),
        text_field("Height", "height", &form.height, "mm"),
        text_field("Wheelbase", "wheelbase", &form.wheelbase, "mm"),
        text_field("Warranty years", "warranty_years", &form.warranty_years, ""),
    ]
    .concat();

    format!(
        r##"<h2 class="section-title">Specifications - {name}</h2>
{banner}
<form class="stacked" style="max-width:680px;" hx-post="/admin/cars/{id}/specs" hx-target="#tab-content" hx-swap="innerHTML">
    <div class="form-grid">{fields}</div>
    <div class="row-actions">
        <button class="btn" type="submit">Save Specifications</button>
        <a class="btn secondary" href="/admin/tabs/inventory">Cancel</a>
    </div>
</form>"##,
        name = html_escape(&car.display_name()),
        id = car.id,
    )
}

// ============== Lead tabs ==============

fn delete_button(path: &str, confirm: &str) -> String {
    format!(
        r##"<button class="btn danger small" hx-post="{path}" hx-target="#tab-content"
    hx-swap="innerHTML" hx-confirm="{confirm}">Delete</button>"##
    )
}

fn lead_table(header: &str, rows: String, empty: &str) -> String {
    if rows.is_empty() {
        format!("<div class=\"empty-note\">{empty}</div>")
    } else {
        format!(
            "<table class=\"data-table\"><thead><tr>{header}</tr></thead><tbody>{rows}</tbody></table>"
        )
    }
}

pub fn contacts_tab(rows: &[ContactInquiry]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&row.name),
                html_escape(&row.email),
                row.phone.as_deref().map(html_escape).unwrap_or_default(),
                excerpt(&row.message, 80),
                fmt_date(&row.created_at),
                delete_button(
                    &format!("/admin/contacts/{}/delete", row.id),
                    "Delete this inquiry?"
                ),
            )
        })
        .collect();

    lead_table(
        "<th>Name</th><th>Email</th><th>Phone</th><th>Message</th><th>Received</th><th></th>",
        body,
        "No contact inquiries.",
    )
}

pub fn finance_tab(rows: &[FinanceApplication]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&row.name),
                html_escape(&row.email),
                row.loan_amount.map(format_price).unwrap_or_default(),
                row.annual_income.map(format_price).unwrap_or_default(),
                row.employment_status
                    .as_deref()
                    .map(html_escape)
                    .unwrap_or_default(),
                fmt_date(&row.created_at),
                delete_button(
                    &format!("/admin/finance/{}/delete", row.id),
                    "Delete this application?"
                ),
            )
        })
        .collect();

    lead_table(
        "<th>Name</th><th>Email</th><th>Loan</th><th>Income</th><th>Status</th><th>Received</th><th></th>",
        body,
        "No finance applications.",
    )
}

pub fn orders_tab(rows: &[CarOrder]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&row.name),
                html_escape(&row.email),
                html_escape(&format!("{} {}", row.car_make, row.car_model)),
                row.budget_range
                    .as_deref()
                    .map(html_escape)
                    .unwrap_or_default(),
                fmt_date(&row.created_at),
                delete_button(
                    &format!("/admin/orders/{}/delete", row.id),
                    "Delete this order request?"
                ),
            )
        })
        .collect();

    lead_table(
        "<th>Name</th><th>Email</th><th>Requested Car</th><th>Budget</th><th>Received</th><th></th>",
        body,
        "No car order requests.",
    )
}

pub fn appointments_tab(rows: &[Appointment]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&row.name),
                html_escape(&row.email),
                html_escape(&row.appointment_type.replace('_', " ")),
                fmt_date(&row.appointment_date),
                html_escape(&row.status),
                delete_button(
                    &format!("/admin/appointments/{}/delete", row.id),
                    "Delete this appointment?"
                ),
            )
        })
        .collect();

    lead_table(
        "<th>Name</th><th>Email</th><th>Type</th><th>When</th><th>Status</th><th></th>",
        body,
        "No appointments.",
    )
}

pub fn testimonials_tab(rows: &[Testimonial]) -> String {
    let body: String = rows
        .iter()
        .map(|row| {
            let approve_label = if row.approved() { "Unapprove" } else { "Approve" };
            let feature_label = if row.featured() { "Unfeature" } else { "Feature" };
            let badge = if row.approved() {
                "<span class=\"badge on\">Approved</span>"
            } else {
                "<span class=\"badge off\">Pending</span>"
            };

            format!(
                r##"<tr>
    <td>{name}</td>
    <td>{rating}/5</td>
    <td>{content}</td>
    <td>{badge}</td>
    <td class="row-actions">
        <button class="btn secondary small" hx-post="/admin/testimonials/{id}/approve"
            hx-target="#tab-content" hx-swap="innerHTML">{approve_label}</button>
        <button class="btn secondary small" hx-post="/admin/testimonials/{id}/feature"
            hx-target="#tab-content" hx-swap="innerHTML">{feature_label}</button>
        {delete}
    </td>
</tr>"##,
                name = html_escape(&row.customer_name),
                rating = row.rating,
                content = excerpt(&row.content, 80),
                id = row.id,
                delete = delete_button(
                    &format!("/admin/testimonials/{}/delete", row.id),
                    "Delete this testimonial?"
                ),
            )
        })
        .collect();

    lead_table(
        "<th>Customer</th><th>Rating</th><th>Review</th><th>Status</th><th></th>",
        body,
        "No testimonials submitted.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_dashboard_marks_active_tab() {
        let html = dashboard_page("finance", "<p>rows</p>");
        assert!(html.contains("<a href=\"/admin/tabs/finance\" class=\"active\">"));
        assert!(html.contains("hx-get=\"/admin/tabs/finance\""));
        assert!(html.contains("/admin/events"));
    }

    #[test]
    fn test_inventory_tab_escapes_query() {
        let html = inventory_tab(&[], "a\"b c");
        assert!(html.contains("value=\"a&quot;b c\""));
        assert!(html.contains("/admin/export/cars.csv?q=a%22b%20c"));
        assert!(html.contains("No cars match."));
    }

    #[test]
    fn test_testimonial_toggle_labels() {
        let testimonial = Testimonial {
            id: Uuid::from_u128(7),
            customer_name: "Elena".to_string(),
            customer_email: None,
            rating: 5,
            title: None,
            content: "Great service".to_string(),
            car_purchased: None,
            purchase_date: None,
            is_approved: Some(true),
            is_featured: Some(false),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let html = testimonials_tab(&[testimonial]);
        assert!(html.contains("Unapprove"));
        assert!(html.contains(">Feature<"));
        assert!(html.contains("badge on"));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(100);
        let cut = excerpt(&long, 10);
        assert_eq!(cut, format!("{}...", "x".repeat(10)));
        assert_eq!(excerpt("short", 10), "short");
    }
}
