use serde::Serialize;

use super::escape::json_for_script_tag;
use super::view::PhoneView;

const SCHEMA_CONTEXT: &str = "https://schema.org/";
const IN_STOCK: &str = "https://schema.org/InStock";
const CURRENCY: &str = "USD";

/// schema.org `Product` for one phone.
#[derive(Debug, Serialize)]
pub struct ProductSchema<'a> {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: &'a str,
    pub image: Option<&'a str>,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandSchema<'a>>,
    pub offers: OfferSchema<'a>,
}

#[derive(Debug, Serialize)]
pub struct BrandSchema<'a> {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSchema<'a> {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub price_currency: &'static str,
    pub price: &'a str,
    pub availability: &'static str,
}

impl<'a> ProductSchema<'a> {
    pub fn from_view(view: &'a PhoneView) -> Self {
        ProductSchema {
            context: SCHEMA_CONTEXT,
            kind: "Product",
            name: &view.name,
            image: view.image.as_deref(),
            description: &view.description,
            brand: view.brand.as_deref().map(|name| BrandSchema { kind: "Brand", name }),
            offers: OfferSchema {
                kind: "Offer",
                price_currency: CURRENCY,
                price: &view.price_value,
                availability: IN_STOCK,
            },
        }
    }

    /// Complete `<script type="application/ld+json">` element.
    pub fn to_script_tag(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string());
        format!(
            r#"<script type="application/ld+json">{}</script>"#,
            json_for_script_tag(&json)
        )
    }
}
