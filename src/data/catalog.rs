use std::collections::HashSet;

use serde::Serialize;

use super::model::{LaunchTable, ALL_SITES_LABEL, ALL_SITES_VALUE};

/// One entry of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

impl SiteOption {
    fn same(site: &str) -> Self {
        Self {
            label: site.to_string(),
            value: site.to_string(),
        }
    }
}

/// Distinct launch sites in first-seen order.
pub fn distinct_sites(table: &LaunchTable) -> Vec<&str> {
    let mut seen = HashSet::new();
    table
        .iter()
        .map(|r| r.launch_site.as_str())
        .filter(|site| seen.insert(*site))
        .collect()
}

/// Options for the site selector: "All Sites" first, then each site once.
pub fn site_options(table: &LaunchTable) -> Vec<SiteOption> {
    std::iter::once(SiteOption {
        label: ALL_SITES_LABEL.to_string(),
        value: ALL_SITES_VALUE.to_string(),
    })
    .chain(distinct_sites(table).into_iter().map(SiteOption::same))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn opt(label: &str, value: &str) -> SiteOption {
        SiteOption {
            label: label.into(),
            value: value.into(),
        }
    }

    #[test]
    fn all_sites_first_then_first_seen_order() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("SiteA", 3000.0, "v1", Outcome::Success),
            LaunchRecord::new("SiteA", 7000.0, "v1", Outcome::Failure),
            LaunchRecord::new("SiteB", 3000.0, "v2", Outcome::Success),
            LaunchRecord::new("SiteB", 9000.0, "v2", Outcome::Success),
        ]);
        assert_eq!(
            site_options(&table),
            vec![
                opt("All Sites", "ALL"),
                opt("SiteA", "SiteA"),
                opt("SiteB", "SiteB"),
            ]
        );
    }

    #[test]
    fn order_follows_source_not_alphabet() {
        let table = LaunchTable::from_records(vec![
            LaunchRecord::new("VAFB SLC-4E", 500.0, "v1.1", Outcome::Failure),
            LaunchRecord::new("CCAFS LC-40", 500.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("VAFB SLC-4E", 500.0, "FT", Outcome::Success),
        ]);
        assert_eq!(distinct_sites(&table), vec!["VAFB SLC-4E", "CCAFS LC-40"]);
    }

    #[test]
    fn bundled_dataset_has_four_sites() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/spacex_launch_dash.csv");
        let table = crate::data::loader::load_file(&path).unwrap();
        let values: Vec<String> = site_options(&table).into_iter().map(|o| o.value).collect();
        assert_eq!(
            values,
            vec!["ALL", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
    }

    #[test]
    fn empty_table_only_has_all_sites() {
        assert_eq!(
            site_options(&LaunchTable::default()),
            vec![opt("All Sites", "ALL")]
        );
    }
}
