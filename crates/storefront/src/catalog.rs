//! Product catalog source.
//!
//! Products are immutable records seeded at startup. The cart copies the
//! fields it needs at add time and never re-queries the catalog for price
//! changes, so a price is locked in when a product enters the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scoop_core::{Price, ProductId};

/// Errors raised when constructing catalog records.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("product price must be positive")]
    NonPositivePrice,
    #[error("discount percent {0} is out of range (0-100)")]
    DiscountOutOfRange(u8),
    #[error("rating {0} is out of range (0.0-5.0)")]
    RatingOutOfRange(f64),
}

/// Catalog category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Classic,
    Premium,
    Seasonal,
}

impl Category {
    /// Human-readable label for the category.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Premium => "Premium",
            Self::Seasonal => "Seasonal",
        }
    }
}

/// An immutable catalog record.
///
/// Constructed through [`Product::new`] and the `with_` methods so every
/// record in circulation has validated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Current unit price.
    pub price: Price,
    /// Pre-discount price, when the product is on sale.
    pub original_price: Option<Price>,
    /// Advertised discount percent (0-100), when on sale.
    pub discount_percent: Option<u8>,
    /// Image path for the view layer.
    pub image: Option<String>,
    /// Category tag.
    pub category: Category,
    /// Average review rating (0.0-5.0).
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Featured on the storefront's popular shelf.
    pub is_popular: bool,
}

impl Product {
    /// Create a product with the required fields.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the name is empty or the price is not
    /// positive.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        category: Category,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if price.amount() <= Decimal::ZERO {
            return Err(CatalogError::NonPositivePrice);
        }

        Ok(Self {
            id,
            name,
            description: String::new(),
            price,
            original_price: None,
            discount_percent: None,
            image: None,
            category,
            rating: 0.0,
            review_count: 0,
            is_popular: false,
        })
    }

    /// Set the marketing description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the product as on sale with its pre-sale price and advertised
    /// discount percent.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DiscountOutOfRange` for percentages above 100.
    pub fn with_sale(
        mut self,
        original_price: Price,
        discount_percent: u8,
    ) -> Result<Self, CatalogError> {
        if discount_percent > 100 {
            return Err(CatalogError::DiscountOutOfRange(discount_percent));
        }
        self.original_price = Some(original_price);
        self.discount_percent = Some(discount_percent);
        Ok(self)
    }

    /// Set the review rating and count.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::RatingOutOfRange` outside 0.0-5.0.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Result<Self, CatalogError> {
        if !(0.0..=5.0).contains(&rating) {
            return Err(CatalogError::RatingOutOfRange(rating));
        }
        self.rating = rating;
        self.review_count = review_count;
        Ok(self)
    }

    /// Set the image path.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Feature the product on the popular shelf.
    #[must_use]
    pub const fn popular(mut self) -> Self {
        self.is_popular = true;
        self
    }
}

/// In-memory catalog of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build the seeded storefront catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if seed data fails validation.
    pub fn seed() -> Result<Self, CatalogError> {
        let products = vec![
            Product::new(
                ProductId::new(1),
                "Classic Vanilla Bean",
                Price::from_cents(1299),
                Category::Classic,
            )?
            .with_description(
                "Rich and creamy vanilla ice cream made with real Madagascar vanilla beans.",
            )
            .with_sale(Price::from_cents(1599), 19)?
            .with_rating(4.8, 324)?
            .with_image("assets/vanilla.jpg")
            .popular(),
            Product::new(
                ProductId::new(2),
                "Dark Chocolate Delight",
                Price::from_cents(1499),
                Category::Classic,
            )?
            .with_description("Indulgent dark chocolate ice cream with Belgian chocolate chunks.")
            .with_rating(4.9, 256)?
            .with_image("assets/chocolate.jpg")
            .popular(),
            Product::new(
                ProductId::new(3),
                "Fresh Strawberry Swirl",
                Price::from_cents(1399),
                Category::Classic,
            )?
            .with_description("Sweet strawberry ice cream with real fruit swirls and pieces.")
            .with_sale(Price::from_cents(1699), 18)?
            .with_rating(4.7, 189)?
            .with_image("assets/strawberry.jpg"),
            Product::new(
                ProductId::new(4),
                "Mint Chocolate Chip",
                Price::from_cents(1599),
                Category::Classic,
            )?
            .with_description("Cool mint ice cream loaded with rich chocolate chips.")
            .with_rating(4.6, 142)?
            .with_image("assets/mint.jpg"),
            Product::new(
                ProductId::new(5),
                "Cookies & Cream Supreme",
                Price::from_cents(1699),
                Category::Premium,
            )?
            .with_description("Vanilla ice cream packed with chocolate cookie pieces and cream.")
            .with_rating(4.8, 298)?
            .with_image("assets/cookie.jpg")
            .popular(),
        ];

        Ok(Self { products })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products carrying the given category tag.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Products featured on the popular shelf.
    #[must_use]
    pub fn popular(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_popular).collect()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog() {
        let catalog = Catalog::seed().expect("seed");
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.popular().len(), 3);
        assert_eq!(catalog.by_category(Category::Premium).len(), 1);
        assert!(catalog.by_category(Category::Seasonal).is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::seed().expect("seed");
        let vanilla = catalog.get(ProductId::new(1)).expect("vanilla exists");
        assert_eq!(vanilla.name, "Classic Vanilla Bean");
        assert_eq!(vanilla.price, Price::from_cents(1299));
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = Product::new(
            ProductId::new(10),
            "   ",
            Price::from_cents(100),
            Category::Classic,
        );
        assert!(matches!(result, Err(CatalogError::EmptyName)));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let result = Product::new(
            ProductId::new(10),
            "Free Scoop",
            Price::from_cents(0),
            Category::Classic,
        );
        assert!(matches!(result, Err(CatalogError::NonPositivePrice)));
    }

    #[test]
    fn test_rejects_discount_over_100() {
        let product = Product::new(
            ProductId::new(10),
            "Everything Must Go",
            Price::from_cents(100),
            Category::Classic,
        )
        .expect("valid product");
        let result = product.with_sale(Price::from_cents(200), 101);
        assert!(matches!(result, Err(CatalogError::DiscountOutOfRange(101))));
    }

    #[test]
    fn test_rejects_out_of_range_rating() {
        let product = Product::new(
            ProductId::new(10),
            "Too Good",
            Price::from_cents(100),
            Category::Classic,
        )
        .expect("valid product");
        assert!(matches!(
            product.with_rating(5.5, 1),
            Err(CatalogError::RatingOutOfRange(_))
        ));
    }
}
