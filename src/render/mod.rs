pub mod escape;
pub mod schema;
pub mod view;

use crate::record::Record;
use escape::{escape_attr, escape_text};
use schema::ProductSchema;
use view::PhoneView;

/// Opening tag of each per-record fragment. One per record, never anywhere else.
pub const FRAGMENT_OPEN: &str = r#"<article class="phone-card">"#;

const STYLE: &str = include_str!("style.css");

/// Page-level metadata, written into the document head.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub site_url: String,
}

impl Default for PageMeta {
    fn default() -> Self {
        PageMeta {
            title: "Mobile Specs Pro - Latest Smartphone Specifications".into(),
            description: "Compare the latest mobile phone specifications, prices, and features."
                .into(),
            keywords: "Mobile Specs, Smartphone Comparison, Android Phones".into(),
            site_url: "https://example.com".into(),
        }
    }
}

/// Render the whole page: head shell, one fragment per record in order, closing shell.
pub fn render(records: &[Record], meta: &PageMeta) -> String {
    let mut html = String::with_capacity(4096 + records.len() * 1536);
    html.push_str(&render_head(meta));
    for record in records {
        html.push_str(&render_fragment(record));
    }
    html.push_str(PAGE_END);
    html
}

/// Structured-data block followed by the visual card for one record.
pub fn render_fragment(record: &Record) -> String {
    let view = PhoneView::from_record(record);

    let image = match &view.image {
        Some(src) => format!(
            r#"<img src="{}" alt="{}" loading="lazy">"#,
            escape_attr(src),
            escape_attr(&view.name)
        ),
        None => r#"<div class="no-image">No image</div>"#.to_string(),
    };
    let rows: String = view
        .rows()
        .iter()
        .map(|(label, value)| {
            format!(
                "                    <tr><td class=\"label\">{}</td><td>{}</td></tr>\n",
                label,
                escape_text(value)
            )
        })
        .collect();

    format!(
        r#"
        {script}
        {FRAGMENT_OPEN}
            <div class="image-box">
                {image}
            </div>
            <div class="details">
                <h2>{name}</h2>
                <table class="spec-table">
{rows}                </table>
            </div>
        </article>
"#,
        script = ProductSchema::from_view(&view).to_script_tag(),
        name = escape_text(&view.name),
    )
}

fn render_head(meta: &PageMeta) -> String {
    let title = escape_text(&meta.title);
    let title_attr = escape_attr(&meta.title);
    let description = escape_attr(&meta.description);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <meta name="keywords" content="{keywords}">
    <meta name="robots" content="index, follow">
    <meta property="og:title" content="{title_attr}">
    <meta property="og:description" content="{description}">
    <meta property="og:type" content="website">
    <meta property="og:url" content="{url}">
    <style>
{STYLE}    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>Mobile Specification Directory</h1>
            <p>Accurate, up-to-date technical data for modern smartphones.</p>
        </header>
"#,
        keywords = escape_attr(&meta.keywords),
        url = escape_attr(&meta.site_url),
    )
}

const PAGE_END: &str = "    </div>
</body>
</html>
";

// ── Tests ──
