use serde::Serialize;

use crate::data::aggregate::PieData;
use crate::data::filter::ScatterData;
use crate::data::model::PayloadRange;

/// What both charts currently show, for copying out of the dashboard.
#[derive(Debug, Serialize)]
pub struct ChartSnapshot<'a> {
    pub site: &'a str,
    pub payload_range: PayloadRange,
    pub pie: &'a PieData,
    pub scatter: &'a ScatterData,
}

impl ChartSnapshot<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
