//! Search criteria
//!
//! Two fixed criteria sets drive every fetch: the default feed used by the
//! scheduled cycle and the no-argument command, and a location variant
//! used when a user asks about a specific place. Only the free-text
//! location varies at runtime; everything else is part of the product
//! definition.

/// How many results a single fetch asks for. No pagination follows.
pub const RESULTS_PER_PAGE: u32 = 20;

const AREA_PARAMS: [&str; 4] = ["location0", "location1", "location2", "location3"];

/// Location filter for a search
#[derive(Debug, Clone)]
pub enum LocationFilter {
    /// Fixed hierarchy, broadest area first (country down to city)
    Area(&'static [&'static str]),
    /// Free-text location from a user command
    Query(String),
}

/// One complete set of query filters for the search endpoint
///
/// Credentials are deliberately not part of the criteria; the client owns
/// those and merges them in when building the request.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub what: &'static str,
    pub what_and: Option<&'static str>,
    pub what_or: Option<&'static str>,
    pub what_exclude: &'static str,
    pub location: LocationFilter,
    pub max_days_old: u32,
    pub category: &'static str,
    pub sort_by: &'static str,
    pub full_time: bool,
    pub contract: bool,
    pub results_per_page: u32,
}

impl SearchCriteria {
    /// The fixed criteria behind the scheduled cycle and the no-argument
    /// command: recent junior-to-mid software roles around Pittsburgh.
    pub fn default_feed() -> Self {
        Self {
            what: "software",
            what_and: Some("developer"),
            what_or: Some("engineer"),
            what_exclude: "senior lead director principal",
            location: LocationFilter::Area(&["US", "Pennsylvania", "Allegheny County", "Pittsburgh"]),
            max_days_old: 7,
            category: "it-jobs",
            sort_by: "date",
            full_time: true,
            contract: false,
            results_per_page: RESULTS_PER_PAGE,
        }
    }

    /// Criteria for a user-supplied location. Broader keyword matching and
    /// contract roles included, since the point is to show what's there.
    pub fn for_location(location: impl Into<String>) -> Self {
        Self {
            what: "software",
            what_and: None,
            what_or: Some("engineer developer"),
            what_exclude: "senior lead director principal sr",
            location: LocationFilter::Query(location.into()),
            max_days_old: 7,
            category: "it-jobs",
            sort_by: "date",
            full_time: true,
            contract: true,
            results_per_page: RESULTS_PER_PAGE,
        }
    }

    /// Expand the criteria into query-string pairs for the search endpoint.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("results_per_page", self.results_per_page.to_string()),
            ("what", self.what.to_string()),
        ];

        if let Some(what_and) = self.what_and {
            pairs.push(("what_and", what_and.to_string()));
        }
        if let Some(what_or) = self.what_or {
            pairs.push(("what_or", what_or.to_string()));
        }
        pairs.push(("what_exclude", self.what_exclude.to_string()));

        match &self.location {
            LocationFilter::Area(levels) => {
                for (key, level) in AREA_PARAMS.iter().zip(levels.iter()) {
                    pairs.push((key, level.to_string()));
                }
            }
            LocationFilter::Query(query) => {
                pairs.push(("where", query.clone()));
            }
        }

        pairs.push(("max_days_old", self.max_days_old.to_string()));
        pairs.push(("category", self.category.to_string()));
        pairs.push(("sort_by", self.sort_by.to_string()));

        if self.full_time {
            pairs.push(("full_time", "1".to_string()));
        }
        if self.contract {
            pairs.push(("contract", "1".to_string()));
        }

        pairs
    }
}
