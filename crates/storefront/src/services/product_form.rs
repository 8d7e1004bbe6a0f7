//! Admin product form: validation before a product is created or edited.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::services::validation::ValidationErrors;

/// Product form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductField {
    Name,
    Price,
    Stock,
    Category,
    Description,
    Images,
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Category => "category",
            Self::Description => "description",
            Self::Images => "images",
        };
        f.write_str(name)
    }
}

/// Product fields as entered by an admin.
///
/// `price` and `stock` are signed because they come straight from number
/// inputs. `existing_images` are URLs already stored for the product,
/// `new_images` are uploads pending with this submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub existing_images: Vec<String>,
    #[serde(default)]
    pub new_images: Vec<String>,
    /// Existing image URLs the admin removed; sent so the backend deletes
    /// them.
    #[serde(default)]
    pub deleted_images: Vec<String>,
}

impl ProductForm {
    /// Images the product would have after saving.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.existing_images.len() + self.new_images.len()
    }

    /// Drop an existing image and remember it for deletion.
    ///
    /// Returns `false` if the URL was not one of the existing images.
    pub fn remove_existing_image(&mut self, url: &str) -> bool {
        let before = self.existing_images.len();
        self.existing_images.retain(|image| image != url);
        let removed = self.existing_images.len() != before;
        if removed {
            self.deleted_images.push(url.to_owned());
        }
        removed
    }

    /// Check every field and report all failures together.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` when the name, category or description is
    /// blank, the price is not positive, the stock is negative, or the
    /// product would have no images.
    pub fn validate(&self) -> Result<(), ValidationErrors<ProductField>> {
        let mut errors = ValidationErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(ProductField::Name, "Nama produk harus diisi");
        }
        if self.price <= 0 {
            errors.insert(ProductField::Price, "Harga harus lebih dari 0");
        }
        if self.stock < 0 {
            errors.insert(ProductField::Stock, "Stok tidak boleh negatif");
        }
        if self.category.trim().is_empty() {
            errors.insert(ProductField::Category, "Kategori harus dipilih");
        }
        if self.description.trim().is_empty() {
            errors.insert(ProductField::Description, "Deskripsi harus diisi");
        }
        if self.image_count() == 0 {
            errors.insert(ProductField::Images, "Minimal 1 gambar produk");
        }

        errors.into_result()
    }
}
