use std::path::PathBuf;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Fixed dashboard configuration
// ---------------------------------------------------------------------------

/// Where the data lives and how the controls are laid out.
///
/// Values are fixed at build time: the dashboard takes no flags and reads no
/// environment for these.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    /// Payload selector domain, kilograms.
    pub slider_min: f64,
    pub slider_max: f64,
    pub slider_step: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/spacex_launch_dash.csv"),
            window_title: "SpaceX Launch Records Dashboard".to_string(),
            inner_size: [1200.0, 900.0],
            min_inner_size: [700.0, 500.0],
            slider_min: 0.0,
            slider_max: 10000.0,
            slider_step: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Tick positions and labels along the payload selector.
    pub fn slider_marks(&self) -> Vec<(f64, String)> {
        let steps = ((self.slider_max - self.slider_min) / self.slider_step).round() as usize;
        (0..=steps)
            .map(|i| {
                let v = self.slider_min + i as f64 * self.slider_step;
                (v, mark_label(v))
            })
            .collect()
    }
}

/// `"0 kg"`, `"1,000 kg"`, `"10,000 kg"`.
pub fn mark_label(kg: f64) -> String {
    format!("{} kg", group_thousands(kg.round() as i64))
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}
