use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names as they appear in the source table header
// ---------------------------------------------------------------------------

pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

/// Selection value of the synthetic "every site" entry.
pub const ALL_SITES_VALUE: &str = "ALL";
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn as_u8(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        self.as_u8() as f64
    }
}

impl From<Outcome> for u8 {
    fn from(o: Outcome) -> u8 {
        o.as_u8()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: Option<u32>,
    pub launch_site: String,
    pub class: Outcome,
    pub payload_mass_kg: f64,
    pub booster_version: Option<String>,
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Shorthand for the four columns every downstream component needs.
    pub fn new(site: &str, payload_mass_kg: f64, category: &str, class: Outcome) -> Self {
        Self {
            flight_number: None,
            launch_site: site.to_string(),
            class,
            payload_mass_kg,
            booster_version: None,
            booster_version_category: category.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Inclusive (min, max) of the payload column over the full table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

/// All launch records in source row order. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    pub records: Vec<LaunchRecord>,
}

impl LaunchTable {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchRecord> {
        self.records.iter()
    }

    /// Min and max payload mass, or `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<PayloadBounds> {
        let mut iter = self.records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(PayloadBounds { min, max })
    }
}

// ---------------------------------------------------------------------------
// Selection types
// ---------------------------------------------------------------------------

/// Which site the user picked: every site, or one exact label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a selection value coming from the site selector.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_VALUE,
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether `site` passes this selection.
    pub fn admits(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Inclusive payload range `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Resolve a move of one or both selector handles. A handle moved past
    /// the other one pushes it along, so the result never inverts.
    pub fn drag(low: f64, high: f64, low_changed: bool, high_changed: bool) -> Self {
        let (mut low, mut high) = (low, high);
        if low_changed && low > high {
            high = low;
        }
        if high_changed && high < low {
            low = high;
        }
        Self::new(low, high)
    }

    /// `low > high` contains nothing.
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

impl From<PayloadBounds> for PayloadRange {
    fn from(b: PayloadBounds) -> Self {
        Self::new(b.min, b.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_empty_table_is_none() {
        assert_eq!(LaunchTable::default().payload_bounds(), None);
    }

    #[test]
    fn bounds_span_all_rows() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("A", 500.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("B", 9600.0, "FT", Outcome::Success),
            LaunchRecord::new("A", 0.0, "v1.1", Outcome::Success),
        ]);
        let b = table.payload_bounds().unwrap();
        assert_eq!(b.min, 0.0);
        assert_eq!(b.max, 9600.0);
    }

    #[test]
    fn all_value_maps_to_all_selection() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("CCAFS LC-40"),
            SiteSelection::Site("CCAFS LC-40".into())
        );
        assert_eq!(SiteSelection::All.value(), "ALL");
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let r = PayloadRange::new(5000.0, 1000.0);
        assert!(!r.contains(3000.0));
        assert!(!r.contains(5000.0));
        assert!(!r.contains(1000.0));
    }

    #[test]
    fn low_handle_pushes_high_handle() {
        let r = PayloadRange::drag(7000.0, 4000.0, true, false);
        assert_eq!(r, PayloadRange::new(7000.0, 7000.0));
    }

    #[test]
    fn high_handle_pushes_low_handle() {
        let r = PayloadRange::drag(6000.0, 2000.0, false, true);
        assert_eq!(r, PayloadRange::new(2000.0, 2000.0));
    }

    #[test]
    fn drag_within_order_is_untouched() {
        assert_eq!(
            PayloadRange::drag(1000.0, 8000.0, true, false),
            PayloadRange::new(1000.0, 8000.0)
        );
        assert_eq!(
            PayloadRange::drag(1000.0, 8000.0, false, false),
            PayloadRange::new(1000.0, 8000.0)
        );
    }

    #[test]
    fn range_is_inclusive() {
        let r = PayloadRange::new(1000.0, 2000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(2000.0));
        assert!(!r.contains(2000.5));
    }

    #[test]
    fn outcome_rejects_out_of_range_class() {
        assert!(Outcome::try_from(2u8).is_err());
        assert_eq!(Outcome::try_from(1u8), Ok(Outcome::Success));
    }
}
