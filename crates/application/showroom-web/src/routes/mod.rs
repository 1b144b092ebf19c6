pub mod admin;
pub mod health;
pub mod leads;
pub mod pages;

/// Check if the request comes from HTMX (has HX-Request header).
pub fn is_htmx(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
