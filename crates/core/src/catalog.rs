//! Catalog types shared by the storefront service and the CLI.
//!
//! A [`Product`] is what the catalog store owns. Shoppers never put a product
//! in the cart directly; they pick a size and color, which turns it into a
//! [`LineItem`] via [`Product::line_item`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::LineItem;
use crate::types::ProductId;

/// Image used when a product is created without any image references.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.jpg";

/// Display titles for the known collection slugs.
const COLLECTION_TITLES: &[(&str, &str)] = &[
    ("new-arrivals", "New Arrivals"),
    ("winter", "Winter Collection"),
    ("summer", "Summer Essentials"),
    ("sport", "Sport Collection"),
    ("femme", "Femme"),
];

/// Title shown for a slug that isn't in the table.
const DEFAULT_COLLECTION_TITLE: &str = "Collection";

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Free-form collection tag, e.g. "Summer".
    pub collection: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
    pub description: String,
}

/// A product that has not been assigned an identifier yet.
///
/// Used as the body for both create and update: the identifier always comes
/// from the store or the request path, never from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub collection: String,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl NewProduct {
    /// Fill in [`PLACEHOLDER_IMAGE`] when no image was supplied.
    #[must_use]
    pub fn with_default_image(mut self) -> Self {
        if self.images.is_empty() {
            self.images.push(PLACEHOLDER_IMAGE.to_owned());
        }
        self
    }
}

impl Product {
    /// Attach an identifier to a new product.
    #[must_use]
    pub fn from_new(id: ProductId, product: NewProduct) -> Self {
        Self {
            id,
            name: product.name,
            price: product.price,
            collection: product.collection,
            sizes: product.sizes,
            colors: product.colors,
            images: product.images,
            description: product.description,
        }
    }

    /// Slug of the collection this product belongs to.
    #[must_use]
    pub fn collection_slug(&self) -> String {
        collection_slug(&self.collection)
    }

    /// Whether the product belongs to the collection with the given slug.
    #[must_use]
    pub fn in_collection(&self, slug: &str) -> bool {
        self.collection_slug() == slug
    }

    /// Whether the product can be ordered in this size.
    ///
    /// A product with no sizes listed accepts any size.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| s == size)
    }

    /// Whether the product can be ordered in this color.
    ///
    /// A product with no colors listed accepts any color.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.is_empty() || self.colors.iter().any(|c| c == color)
    }

    /// Build a cart candidate for one unit of this product in a variant.
    #[must_use]
    pub fn line_item(&self, size: &str, color: &str) -> LineItem {
        LineItem {
            product_id: self.id,
            name: self.name.clone(),
            unit_price: self.price,
            size: size.to_owned(),
            color: color.to_owned(),
            quantity: 1,
            image: self.images.first().cloned().unwrap_or_default(),
        }
    }
}

/// Turn a collection tag into its URL slug.
///
/// Lower-cases the tag and replaces each run of whitespace with a single `-`.
/// Leading and trailing whitespace become a `-` too.
///
/// ```
/// use boutique_core::catalog::collection_slug;
///
/// assert_eq!(collection_slug("New  Arrivals"), "new-arrivals");
/// ```
#[must_use]
pub fn collection_slug(tag: &str) -> String {
    let mut slug = String::with_capacity(tag.len());
    let mut in_whitespace = false;

    for ch in tag.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }

    slug
}

/// Display title for a collection slug.
#[must_use]
pub fn collection_title(slug: &str) -> &'static str {
    COLLECTION_TITLES
        .iter()
        .find(|(known, _)| *known == slug)
        .map_or(DEFAULT_COLLECTION_TITLE, |(_, title)| title)
}

/// The three demo products the boutique ships with.
#[must_use]
pub fn demo_products() -> Vec<NewProduct> {
    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    vec![
        NewProduct {
            name: "Polo Paris Regular Fit".to_owned(),
            price: Decimal::new(8999, 2),
            collection: "Summer".to_owned(),
            sizes: strings(&["S", "M", "L", "XL"]),
            colors: strings(&["White", "Black", "Navy"]),
            images: strings(&["/products/polo-1.jpg"]),
            description: "Classic polo shirt with a modern twist, perfect for any occasion."
                .to_owned(),
        },
        NewProduct {
            name: "Elegant Evening Dress".to_owned(),
            price: Decimal::new(29999, 2),
            collection: "Evening".to_owned(),
            sizes: strings(&["XS", "S", "M", "L"]),
            colors: strings(&["Black", "Red", "Navy"]),
            images: strings(&["/products/dress-1.jpg"]),
            description: "Sophisticated evening dress for special occasions.".to_owned(),
        },
        NewProduct {
            name: "Casual Linen Shirt".to_owned(),
            price: Decimal::new(7999, 2),
            collection: "Casual".to_owned(),
            sizes: strings(&["S", "M", "L", "XL", "XXL"]),
            colors: strings(&["White", "Beige", "Light Blue"]),
            images: strings(&["/products/shirt-1.jpg"]),
            description: "Comfortable linen shirt for a relaxed yet stylish look.".to_owned(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn polo() -> Product {
        Product::from_new(ProductId::new(1), demo_products().remove(0))
    }

    #[test]
    fn test_collection_slug_collapses_whitespace() {
        assert_eq!(collection_slug("Summer"), "summer");
        assert_eq!(collection_slug("Evening Wear"), "evening-wear");
        assert_eq!(collection_slug("Casual \t Chic"), "casual-chic");
    }

    #[test]
    fn test_collection_slug_keeps_edge_whitespace_as_dashes() {
        assert_eq!(collection_slug(" Summer "), "-summer-");
        assert_eq!(collection_slug("\tNew Arrivals"), "-new-arrivals");

        let mut product = polo();
        product.collection = " Summer".to_owned();
        assert!(!product.in_collection("summer"));
        assert!(product.in_collection("-summer"));
    }

    #[test]
    fn test_collection_title_known_and_unknown() {
        assert_eq!(collection_title("summer"), "Summer Essentials");
        assert_eq!(collection_title("new-arrivals"), "New Arrivals");
        assert_eq!(collection_title("evening"), "Collection");
    }

    #[test]
    fn test_in_collection_matches_slug() {
        let product = polo();
        assert!(product.in_collection("summer"));
        assert!(!product.in_collection("Summer"));
    }

    #[test]
    fn test_line_item_uses_first_image_and_unit_quantity() {
        let item = polo().line_item("M", "White");
        assert_eq!(item.product_id, ProductId::new(1));
        assert_eq!(item.unit_price, Decimal::new(8999, 2));
        assert_eq!(item.quantity, 1);
        assert_eq!(item.image, "/products/polo-1.jpg");
    }

    #[test]
    fn test_offers_variant() {
        let mut product = polo();
        assert!(product.offers_size("XL"));
        assert!(!product.offers_size("XXS"));
        assert!(!product.offers_color("Pink"));

        product.colors.clear();
        assert!(product.offers_color("Pink"));
    }

    #[test]
    fn test_with_default_image_only_when_empty() {
        let mut new = demo_products().remove(1);
        new.images.clear();
        let new = new.with_default_image();
        assert_eq!(new.images, vec![PLACEHOLDER_IMAGE.to_owned()]);

        let kept = demo_products().remove(2).with_default_image();
        assert_eq!(kept.images[0], "/products/shirt-1.jpg");
    }

    #[test]
    fn test_new_product_deserializes_with_defaults() {
        let json = r#"{"name":"Scarf","price":"19.50","collection":"Winter"}"#;
        let new: NewProduct = serde_json::from_str(json).unwrap();
        assert!(new.sizes.is_empty());
        assert_eq!(new.price, Decimal::new(1950, 2));
        assert_eq!(new.description, "");
    }
}
