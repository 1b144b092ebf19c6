//! Server-rendered HTML for the site and back-office.
//!
//! Uses HTMX for partial updates; every template is a plain `format!`
//! string builder. User- and database-sourced text always goes through
//! [`html_escape`] before landing in markup.

pub mod admin;
pub mod pages;

/// CSS styles
pub const STYLE_CSS: &str = r#"
:root {
    --bg: #f7f7f5;
    --surface: #ffffff;
    --ink: #1d2129;
    --ink-soft: #5b6472;
    --brand: #b11226;
    --brand-dark: #8c0e1e;
    --line: #dfe2e8;
    --success: #1d7a3d;
    --danger: #b3261e;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Segoe UI', 'Helvetica Neue', Arial, sans-serif;
    background: var(--bg);
    color: var(--ink);
    line-height: 1.6;
    min-height: 100vh;
    display: flex;
    flex-direction: column;
}

a { color: var(--brand); text-decoration: none; }
a:hover { text-decoration: underline; }

/* Header */
.site-header {
    background: var(--surface);
    border-bottom: 1px solid var(--line);
    position: sticky;
    top: 0;
    z-index: 10;
}

.site-header .inner {
    max-width: 1100px;
    margin: 0 auto;
    padding: 14px 20px;
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 20px;
}

.brand {
    font-size: 1.3rem;
    font-weight: 700;
    color: var(--ink);
    letter-spacing: 0.02em;
}

.brand span { color: var(--brand); }

.site-nav { display: flex; gap: 18px; flex-wrap: wrap; }
.site-nav a { color: var(--ink-soft); font-weight: 500; }
.site-nav a:hover { color: var(--brand); text-decoration: none; }

main { flex: 1; max-width: 1100px; width: 100%; margin: 0 auto; padding: 28px 20px; }

/* Hero */
.hero {
    background: linear-gradient(120deg, var(--brand) 0%, var(--brand-dark) 100%);
    color: #fff;
    border-radius: 10px;
    padding: 56px 36px;
    margin-bottom: 32px;
}

.hero h1 { font-size: 2.2rem; margin-bottom: 10px; }
.hero p { font-size: 1.05rem; max-width: 560px; opacity: 0.92; }
.hero .actions { margin-top: 22px; display: flex; gap: 12px; }

/* Buttons */
.btn {
    display: inline-block;
    padding: 9px 18px;
    border-radius: 6px;
    border: 1px solid transparent;
    background: var(--brand);
    color: #fff;
    font-size: 0.95rem;
    font-weight: 600;
    cursor: pointer;
}

.btn:hover { background: var(--brand-dark); text-decoration: none; }
.btn.secondary { background: var(--surface); color: var(--ink); border-color: var(--line); }
.btn.secondary:hover { background: var(--bg); }
.btn.danger { background: var(--danger); }
.btn.small { padding: 5px 10px; font-size: 0.85rem; }

/* Car grid */
.section-title { font-size: 1.4rem; margin-bottom: 16px; }

.car-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 20px;
}

.car-card {
    background: var(--surface);
    border: 1px solid var(--line);
    border-radius: 10px;
    overflow: hidden;
    display: flex;
    flex-direction: column;
}

.car-card img { width: 100%; height: 180px; object-fit: cover; background: var(--line); }
.car-card .body { padding: 14px 16px 18px; display: flex; flex-direction: column; gap: 6px; flex: 1; }
.car-card h3 { font-size: 1.1rem; }
.car-card .price { color: var(--brand); font-weight: 700; font-size: 1.15rem; }
.car-card .meta { color: var(--ink-soft); font-size: 0.88rem; display: flex; gap: 10px; flex-wrap: wrap; }
.car-card .btn { margin-top: auto; align-self: flex-start; }

.result-count { color: var(--ink-soft); margin: 14px 0; }
.empty-note {
    background: var(--surface);
    border: 1px dashed var(--line);
    border-radius: 10px;
    padding: 36px;
    text-align: center;
    color: var(--ink-soft);
}

/* Filter bar */
.filter-bar {
    background: var(--surface);
    border: 1px solid var(--line);
    border-radius: 10px;
    padding: 16px;
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
    gap: 12px;
    margin-bottom: 8px;
}

/* Forms */
form.stacked { max-width: 560px; display: flex; flex-direction: column; gap: 14px; }
.field { display: flex; flex-direction: column; gap: 4px; }
.field label { font-weight: 600; font-size: 0.9rem; }

input, select, textarea {
    padding: 8px 10px;
    border: 1px solid var(--line);
    border-radius: 6px;
    font: inherit;
    background: var(--surface);
    color: var(--ink);
}

textarea { min-height: 110px; resize: vertical; }
input:focus, select:focus, textarea:focus { outline: 2px solid var(--brand); outline-offset: 1px; }

.form-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px 16px; }
.form-grid .wide { grid-column: 1 / -1; }

/* Notices */
.notice { padding: 12px 14px; border-radius: 6px; margin-bottom: 14px; font-size: 0.95rem; }
.notice.success { background: #e7f4eb; color: var(--success); border: 1px solid #bfe0ca; }
.notice.error { background: #fbeae9; color: var(--danger); border: 1px solid #f0c4c1; }

/* Detail page */
.detail-layout { display: grid; grid-template-columns: 3fr 2fr; gap: 28px; }
.gallery img.main { width: 100%; border-radius: 10px; background: var(--line); }
.gallery .thumbs { display: flex; gap: 8px; margin-top: 10px; flex-wrap: wrap; }
.gallery .thumbs img { width: 90px; height: 60px; object-fit: cover; border-radius: 6px; }

.spec-table, .data-table { width: 100%; border-collapse: collapse; background: var(--surface); }
.spec-table td, .data-table td, .data-table th {
    padding: 8px 12px;
    border-bottom: 1px solid var(--line);
    text-align: left;
    vertical-align: top;
}
.spec-table td:first-child { color: var(--ink-soft); width: 45%; }
.data-table th { background: var(--bg); font-size: 0.85rem; text-transform: uppercase; letter-spacing: 0.03em; }

/* Testimonials */
.testimonial {
    background: var(--surface);
    border: 1px solid var(--line);
    border-radius: 10px;
    padding: 16px 18px;
    margin-bottom: 14px;
}
.testimonial .stars { color: #d99a06; letter-spacing: 2px; }
.testimonial .who { color: var(--ink-soft); font-size: 0.88rem; margin-top: 6px; }

/* FAQ */
.faq-item { background: var(--surface); border: 1px solid var(--line); border-radius: 8px; padding: 14px 16px; margin-bottom: 10px; }
.faq-item h4 { margin-bottom: 6px; }

/* Admin */
.admin-bar { display: flex; align-items: center; justify-content: space-between; margin-bottom: 18px; }
.tab-bar { display: flex; gap: 6px; border-bottom: 2px solid var(--line); margin-bottom: 18px; flex-wrap: wrap; }
.tab-bar a {
    padding: 8px 14px;
    color: var(--ink-soft);
    font-weight: 600;
    border-bottom: 2px solid transparent;
    margin-bottom: -2px;
}
.tab-bar a.active, .tab-bar a:hover { color: var(--brand); border-color: var(--brand); text-decoration: none; }

.toolbar { display: flex; gap: 10px; align-items: center; margin-bottom: 14px; flex-wrap: wrap; }
.toolbar input[type=search] { min-width: 240px; }
.row-actions { display: flex; gap: 6px; flex-wrap: wrap; }

.badge { display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 0.78rem; font-weight: 600; }
.badge.on { background: #e7f4eb; color: var(--success); }
.badge.off { background: var(--bg); color: var(--ink-soft); }

.image-admin { display: flex; gap: 14px; flex-wrap: wrap; }
.image-admin .tile { border: 1px solid var(--line); border-radius: 8px; padding: 8px; background: var(--surface); width: 180px; }
.image-admin .tile img { width: 100%; height: 100px; object-fit: cover; border-radius: 4px; }
.image-admin .tile .row-actions { margin-top: 8px; }

/* Login */
.login-box {
    max-width: 380px;
    margin: 60px auto;
    background: var(--surface);
    border: 1px solid var(--line);
    border-radius: 10px;
    padding: 28px;
}
.login-box h1 { margin-bottom: 16px; font-size: 1.3rem; }

/* Footer */
.site-footer { background: var(--ink); color: #cfd4dc; margin-top: 40px; }
.site-footer .inner {
    max-width: 1100px;
    margin: 0 auto;
    padding: 32px 20px 20px;
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
    gap: 24px;
}
.site-footer h4 { color: #fff; margin-bottom: 10px; font-size: 1rem; }
.site-footer a { color: #cfd4dc; }
.site-footer .legal {
    border-top: 1px solid #343a46;
    text-align: center;
    padding: 14px;
    font-size: 0.85rem;
    color: #9aa1ad;
}

@media (max-width: 760px) {
    .detail-layout, .form-grid { grid-template-columns: 1fr; }
    .hero { padding: 36px 22px; }
}
"#;

/// HTML-escape a string to prevent XSS in hand-built HTML responses.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Price as shown across the site, whole euros with thousands separators.
pub fn format_price(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-\u{20ac}{grouped}")
    } else {
        format!("\u{20ac}{grouped}")
    }
}

/// A dismissable success or error banner.
pub fn notice_html(kind: &str, message: &str) -> String {
    format!(
        "<div class=\"notice {kind}\">{}</div>",
        html_escape(message)
    )
}

/// Wrap page content in the site shell with nav and footer.
pub fn wrap_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Andros An. Cars</title>
    <link rel="stylesheet" href="/style.css">
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
</head>
<body>
    <header class="site-header">
        <div class="inner">
            <a class="brand" href="/">Andros An. <span>Cars</span></a>
            <nav class="site-nav">
                <a href="/">Home</a>
                <a href="/inventory">Inventory</a>
                <a href="/finance">Finance</a>
                <a href="/order">Order Car</a>
                <a href="/contact">Contact</a>
            </nav>
        </div>
    </header>
    <main>
{content}
    </main>
    <footer class="site-footer">
        <div class="inner">
            <div>
                <h4>Andros An. Cars</h4>
                <p>Quality used cars in Cyprus. Every vehicle inspected, serviced and ready for the road.</p>
            </div>
            <div>
                <h4>Quick Links</h4>
                <p><a href="/inventory">Inventory</a></p>
                <p><a href="/finance">Finance</a></p>
                <p><a href="/order">Order Car</a></p>
                <p><a href="/testimonials">Testimonials</a></p>
            </div>
            <div>
                <h4>Contact</h4>
                <p>+357 99 676 373</p>
                <p>+357 99 155 460</p>
                <p><a href="mailto:androsancars@gmail.com">androsancars@gmail.com</a></p>
            </div>
        </div>
        <div class="legal">&#169; 2025 Andros An. Cars. All rights reserved.</div>
    </footer>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<script>alert("&'x")</script>"#),
            "&lt;script&gt;alert(&quot;&amp;&#x27;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_format_price_groups_thousands() {
        assert_eq!(format_price(9500.0), "\u{20ac}9,500");
        assert_eq!(format_price(15000.0), "\u{20ac}15,000");
        assert_eq!(format_price(125000.0), "\u{20ac}125,000");
        assert_eq!(format_price(800.0), "\u{20ac}800");
    }

    #[test]
    fn test_wrap_page_includes_shell() {
        let page = wrap_page("Inventory", "<p>cars</p>");
        assert!(page.contains("<title>Inventory | Andros An. Cars</title>"));
        assert!(page.contains("<p>cars</p>"));
        assert!(page.contains("androsancars@gmail.com"));
        assert!(page.contains("htmx.org"));
    }
}
