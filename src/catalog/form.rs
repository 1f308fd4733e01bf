use std::path::PathBuf;

use thiserror::Error;

use crate::database::models::Product;

/// Where the product image comes from on the next submit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageRef {
    /// No image chosen and none on record
    #[default]
    None,
    /// Already hosted; submit reuses this URL
    Existing(String),
    /// A local file picked for upload; uploaded before the record is written
    Pending(PathBuf),
}

/// Create/edit form state, decoupled from any rendering layer. Price is
/// kept as entered text until validation parses it.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: ImageRef,
}

/// Field values after validation, ready for the API
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,

    #[error("Description is required")]
    MissingDescription,

    #[error("Price must be a number")]
    InvalidPrice,

    #[error("Price cannot be negative")]
    NegativePrice,
}

impl ProductForm {
    /// Prefill for the edit flow; the stored image URL is reused unless
    /// the user picks a new file
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: if product.image.is_empty() {
                ImageRef::None
            } else {
                ImageRef::Existing(product.image.clone())
            },
        }
    }

    pub fn choose_image(&mut self, path: impl Into<PathBuf>) {
        self.image = ImageRef::Pending(path.into());
    }

    /// Pure validation: trims text fields, parses the price text.
    /// Zero is a valid price.
    pub fn validate(&self) -> Result<ProductFields, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(FormError::MissingDescription);
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidPrice)?;
        if !price.is_finite() {
            return Err(FormError::InvalidPrice);
        }
        if price < 0.0 {
            return Err(FormError::NegativePrice);
        }

        Ok(ProductFields {
            name: name.to_string(),
            description: description.to_string(),
            price,
        })
    }

    /// Back to blank after a successful create
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: description.to_string(),
            price: price.to_string(),
            image: ImageRef::None,
        }
    }

    #[test]
    fn valid_form_parses_price_text() {
        let fields = form("Red Shirt", "Cotton tee", "19.99").validate().unwrap();
        assert_eq!(fields.name, "Red Shirt");
        assert_eq!(fields.price, 19.99);
    }

    #[test]
    fn zero_price_is_valid() {
        assert!(form("Freebie", "Promo item", "0").validate().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(
            form("  ", "Cotton tee", "19.99").validate(),
            Err(FormError::MissingName)
        );
        assert_eq!(
            form("Red Shirt", "", "19.99").validate(),
            Err(FormError::MissingDescription)
        );
    }

    #[test]
    fn bad_price_text_is_rejected() {
        assert_eq!(
            form("Red Shirt", "Cotton tee", "abc").validate(),
            Err(FormError::InvalidPrice)
        );
        assert_eq!(
            form("Red Shirt", "Cotton tee", "-5").validate(),
            Err(FormError::NegativePrice)
        );
        assert_eq!(
            form("Red Shirt", "Cotton tee", "inf").validate(),
            Err(FormError::InvalidPrice)
        );
    }

    #[test]
    fn reset_returns_to_blank() {
        let mut f = form("Red Shirt", "Cotton tee", "19.99");
        f.choose_image("/tmp/shirt.png");
        f.reset();
        assert!(f.name.is_empty());
        assert_eq!(f.image, ImageRef::None);
    }
}
