//! Product form commands.
//!
//! ```bash
//! mp-cli product check product-form.json
//! ```

use std::path::Path;

use marketplace_storefront::AppError;
use marketplace_storefront::services::ProductForm;

/// Validate a product form JSON document.
///
/// # Errors
///
/// Returns `AppError::ProductForm` listing the invalid fields, or an error
/// if the file cannot be read or parsed.
pub fn check(path: &Path) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::BadRequest(format!("cannot read {}: {e}", path.display())))?;
    let form: ProductForm = serde_json::from_str(&raw)?;

    if let Err(errors) = form.validate() {
        for (field, message) in errors.iter() {
            tracing::error!("{field}: {message}");
        }
        return Err(errors.into());
    }

    tracing::info!(
        "{} is valid ({} image(s), {} to delete)",
        form.name.trim(),
        form.image_count(),
        form.deleted_images.len()
    );
    Ok(())
}
