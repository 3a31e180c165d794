// src/models/drug.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One entry in the drug index.
#[derive(Debug, Clone, Serialize)]
pub struct Drug {
    pub id: String,
    pub brand_name: String,
    pub generic_name: String,
    pub category: String,
    pub description: String,
    pub dosage: String,
    pub side_effects: String,
    pub manufacturer: String,
    pub image_url: Option<String>,
}

/// DTO for an admin adding a drug to the index.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDrugRequest {
    #[validate(length(min = 1, max = 200))]
    pub brand_name: String,

    #[validate(length(min = 1, max = 200))]
    pub generic_name: String,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[validate(length(min = 1, max = 200))]
    pub dosage: String,

    #[validate(length(min = 1, max = 5000))]
    pub side_effects: String,

    #[validate(length(min = 1, max = 200))]
    pub manufacturer: String,

    #[validate(url(message = "Image URL must be a valid URL."))]
    pub image_url: Option<String>,
}

/// Query parameters for drug search.
#[derive(Debug, Deserialize)]
pub struct DrugSearchParams {
    pub q: Option<String>,
}
