//! Catalog product records.

use serde::{Deserialize, Serialize};
use url::Url;

use super::id::ProductId;
use super::price::Price;

/// Errors that can occur when validating a [`ProductDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The title is empty or whitespace.
    #[error("product {0} has an empty title")]
    EmptyTitle(ProductId),
    /// The category is empty or whitespace.
    #[error("product {0} has an empty category")]
    EmptyCategory(ProductId),
    /// The price is zero or negative.
    #[error("product {id} has a non-positive price {price}")]
    NonPositivePrice {
        /// Offending product.
        id: ProductId,
        /// Rejected price.
        price: Price,
    },
    /// The price is above [`Price::MAX`].
    #[error("product {id} has a price {price} above the maximum")]
    PriceTooHigh {
        /// Offending product.
        id: ProductId,
        /// Rejected price.
        price: Price,
    },
    /// The stock count does not fit a non-negative integer.
    #[error("product {id} has an invalid stock count {stock}")]
    InvalidStock {
        /// Offending product.
        id: ProductId,
        /// Rejected stock value.
        stock: i64,
    },
    /// The image is not an absolute URL.
    #[error("product {id} has an invalid image url {url:?}: {reason}")]
    InvalidImageUrl {
        /// Offending product.
        id: ProductId,
        /// Rejected URL text.
        url: String,
        /// Parser message.
        reason: String,
    },
}

/// Unvalidated product fields, as produced by a catalog source or read back
/// from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub category: String,
    pub stock: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductDraft {
    /// Validate the draft into a [`Product`].
    ///
    /// An empty or whitespace image string is treated as "no image".
    ///
    /// # Errors
    ///
    /// Returns an error if the title or category is blank, the price is not
    /// positive or above [`Price::MAX`], the stock is negative or too large,
    /// or the image is not a valid absolute URL.
    pub fn validate(self) -> Result<Product, ProductError> {
        let id = self.id;

        if self.title.trim().is_empty() {
            return Err(ProductError::EmptyTitle(id));
        }
        if self.category.trim().is_empty() {
            return Err(ProductError::EmptyCategory(id));
        }
        if !self.price.is_positive() {
            return Err(ProductError::NonPositivePrice {
                id,
                price: self.price,
            });
        }
        if self.price > Price::MAX {
            return Err(ProductError::PriceTooHigh {
                id,
                price: self.price,
            });
        }
        let stock = u32::try_from(self.stock)
            .map_err(|_| ProductError::InvalidStock { id, stock: self.stock })?;

        let image = match self.image.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Url::parse(raw).map_err(|e| ProductError::InvalidImageUrl {
                id,
                url: raw.to_owned(),
                reason: e.to_string(),
            })?),
        };

        Ok(Product {
            id,
            title: self.title,
            price: self.price,
            category: self.category,
            stock,
            image,
            description: self.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// A validated catalog product.
///
/// Products are immutable once fetched. The only way to build one is through
/// [`ProductDraft::validate`], which deserialization also goes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductDraft")]
pub struct Product {
    id: ProductId,
    title: String,
    price: Price,
    category: String,
    stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TryFrom<ProductDraft> for Product {
    type Error = ProductError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl Product {
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Maximum purchasable quantity right now.
    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.stock
    }

    #[must_use]
    pub const fn image(&self) -> Option<&Url> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}
