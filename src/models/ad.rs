// src/models/ad.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// An admin-managed banner with an active date window.
#[derive(Debug, Clone, Serialize)]
pub struct Advertisement {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub link_url: Option<String>,
}

impl Advertisement {
    /// Whether the ad is live on the given date (window is inclusive).
    pub fn is_active_on(&self, date: chrono::NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// DTO for an admin creating an ad.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(url(message = "Image URL must be a valid URL."))]
    pub image_url: String,

    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,

    #[validate(url(message = "Link URL must be a valid URL."))]
    pub link_url: Option<String>,
}
