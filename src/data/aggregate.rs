use serde::Serialize;

use super::catalog::distinct_sites;
use super::model::{LaunchTable, Outcome, SiteSelection};

/// What a pie slice is keyed by: a site (all-sites mode) or an outcome
/// (single-site mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SliceKey {
    Site(String),
    Outcome(Outcome),
}

impl std::fmt::Display for SliceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliceKey::Site(s) => f.write_str(s),
            SliceKey::Outcome(o) => write!(f, "{o}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub key: SliceKey,
    pub count: usize,
}

/// Chart-ready dataset for the outcome pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieData {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieData {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

pub fn pie_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Success Count for all launch sites".to_string(),
        SiteSelection::Site(s) => format!("Total Success Launches for site {s}"),
    }
}

/// Group launch outcomes for the pie chart.
///
/// * `All` – one slice per site (first-seen order) holding its number of
///   successful launches. A site with no successes keeps a zero slice.
/// * `Site(s)` – one slice per outcome that occurs at `s`, failures first.
///   An unknown site gives no slices.
pub fn outcome_counts(table: &LaunchTable, selection: &SiteSelection) -> PieData {
    let slices = match selection {
        SiteSelection::All => distinct_sites(table)
            .into_iter()
            .map(|site| PieSlice {
                key: SliceKey::Site(site.to_string()),
                count: table
                    .iter()
                    .filter(|r| r.launch_site == site && r.class == Outcome::Success)
                    .count(),
            })
            .collect(),
        SiteSelection::Site(site) => {
            let (mut failures, mut successes) = (0usize, 0usize);
            for r in table.iter().filter(|r| &r.launch_site == site) {
                match r.class {
                    Outcome::Failure => failures += 1,
                    Outcome::Success => successes += 1,
                }
            }
            [(Outcome::Failure, failures), (Outcome::Success, successes)]
                .into_iter()
                .filter(|&(_, count)| count > 0)
                .map(|(outcome, count)| PieSlice {
                    key: SliceKey::Outcome(outcome),
                    count,
                })
                .collect()
        }
    };

    PieData {
        title: pie_title(selection),
        slices,
    }
}
