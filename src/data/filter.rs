use serde::Serialize;

use super::model::{LaunchRecord, LaunchTable, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Indices of rows with `low <= payload <= high`, restricted to the
/// selected site unless it is `All`. Source order is kept.
///
/// An inverted range or an unknown site yields an empty selection.
pub fn payload_filter_indices(
    table: &LaunchTable,
    range: PayloadRange,
    selection: &SiteSelection,
) -> Vec<usize> {
    table
        .iter()
        .enumerate()
        .filter(|(_, r)| range.contains(r.payload_mass_kg) && selection.admits(&r.launch_site))
        .map(|(i, _)| i)
        .collect()
}

/// Same selection as [`payload_filter_indices`], as row references.
pub fn payload_filter<'a>(
    table: &'a LaunchTable,
    range: PayloadRange,
    selection: &SiteSelection,
) -> Vec<&'a LaunchRecord> {
    payload_filter_indices(table, range, selection)
        .into_iter()
        .map(|i| &table.records[i])
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter dataset
// ---------------------------------------------------------------------------

/// Points of one booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub category: String,
    /// `[payload mass, class]` pairs.
    pub points: Vec<[f64; 2]>,
}

/// Chart-ready dataset for the payload scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub title: String,
    /// Indices of the selected rows in the source table.
    pub rows: Vec<usize>,
    /// One series per category, in first-seen order among the selected rows.
    pub series: Vec<ScatterSeries>,
}

pub fn scatter_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Success count on Payload mass for all sites".to_string(),
        SiteSelection::Site(s) => format!("Success count on Payload mass for site {s}"),
    }
}

pub fn scatter_points(
    table: &LaunchTable,
    range: PayloadRange,
    selection: &SiteSelection,
) -> ScatterData {
    let rows = payload_filter_indices(table, range, selection);

    let mut series: Vec<ScatterSeries> = Vec::new();
    for r in rows.iter().map(|&i| &table.records[i]) {
        let point = [r.payload_mass_kg, r.class.as_f64()];
        match series
            .iter_mut()
            .find(|s| s.category == r.booster_version_category)
        {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                category: r.booster_version_category.clone(),
                points: vec![point],
            }),
        }
    }

    ScatterData {
        title: scatter_title(selection),
        rows,
        series,
    }
}
