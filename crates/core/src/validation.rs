//! Catalog field validators: slugs, price pairs, image content types.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Cents;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowercase alphanumeric words joined by single hyphens.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 120;

/// Image MIME types accepted for product uploads, with their file extension.
pub const IMAGE_CONTENT_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
];

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Derive a URL slug from a display name.
///
/// Non-alphanumeric runs collapse into a single `-`; non-ASCII characters are
/// dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Validate a client-supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Use the explicit slug when given, otherwise derive one from `name`.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> Result<String, CoreError> {
    let slug = match explicit {
        Some(s) => s.to_string(),
        None => slugify(name),
    };
    validate_slug(&slug)?;
    Ok(slug)
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Both prices must be positive and the distributor price may not exceed retail.
pub fn validate_price_pair(price_cents: Cents, distributor_price_cents: Cents) -> Result<(), CoreError> {
    if price_cents <= 0 || distributor_price_cents <= 0 {
        return Err(CoreError::Validation(
            "Prices must be greater than zero".to_string(),
        ));
    }
    if distributor_price_cents > price_cents {
        return Err(CoreError::Validation(format!(
            "Distributor price ({distributor_price_cents}) must not exceed retail price ({price_cents})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Validate an upload content type and return the file extension to use.
pub fn validate_image_content_type(content_type: &str) -> Result<&'static str, CoreError> {
    let normalized = content_type.trim().to_ascii_lowercase();
    IMAGE_CONTENT_TYPES
        .iter()
        .find(|(ct, _)| *ct == normalized)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            let allowed: Vec<&str> = IMAGE_CONTENT_TYPES.iter().map(|(ct, _)| *ct).collect();
            CoreError::Validation(format!(
                "Unsupported image type '{content_type}'. Must be one of: {allowed:?}"
            ))
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
