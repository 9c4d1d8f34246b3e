//! Search response DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobRecord;

/// Top-level search response
///
/// The endpoint also reports counts and salary statistics; only the
/// result list matters here, so everything else is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<JobListing>,
}

/// One listing as returned by the search endpoint
///
/// `company`, `location`, and `description` are occasionally absent from
/// individual results; a missing field defaults to empty rather than
/// failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub location: JobLocation,
    #[serde(default)]
    pub description: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub display_name: String,
}

/// Hierarchical location, broadest area first (country down to city)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobLocation {
    #[serde(default)]
    pub area: Vec<String>,
    #[serde(default)]
    pub display_name: String,
}

impl From<JobListing> for JobRecord {
    fn from(listing: JobListing) -> Self {
        // Innermost area element is the most specific one; fall back to
        // the display name when the hierarchy is empty.
        let location = listing
            .location
            .area
            .last()
            .cloned()
            .unwrap_or(listing.location.display_name);

        JobRecord {
            id: listing.id,
            title: listing.title,
            company: listing.company.display_name,
            location,
            description: listing.description,
            url: listing.redirect_url,
        }
    }
}
