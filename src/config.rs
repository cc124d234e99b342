use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Okeanos configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OkeanosConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Index region settings.
    #[serde(default)]
    pub index: IndexToml,

    /// Map settings.
    #[serde(default)]
    pub map: MapToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Per-member sea-surface temperature files, one per ensemble member.
    #[serde(default)]
    pub sst_files: Vec<PathBuf>,
    /// Per-member target field files, paired with `sst_files` by position.
    #[serde(default)]
    pub target_files: Vec<PathBuf>,
    #[serde(default = "default_sst_var")]
    pub sst_var: String,
    #[serde(default = "default_target_var")]
    pub target_var: String,
    /// Candidate longitude coordinate variable names, tried in order.
    #[serde(default)]
    pub lon_aliases: Option<Vec<String>>,
    /// Candidate latitude coordinate variable names, tried in order.
    #[serde(default)]
    pub lat_aliases: Option<Vec<String>>,
    #[serde(default = "default_time_var")]
    pub time_var: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            sst_files: Vec::new(),
            target_files: Vec::new(),
            sst_var: default_sst_var(),
            target_var: default_target_var(),
            lon_aliases: None,
            lat_aliases: None,
            time_var: default_time_var(),
        }
    }
}

fn default_sst_var() -> String {
    "tos".to_string()
}
fn default_target_var() -> String {
    "pr".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}

/// Index region specification -- either a named `region` preset or explicit
/// bounds, not both.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexToml {
    /// Named preset; currently only "nino34".
    #[serde(default)]
    pub region: Option<String>,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
}

impl Default for IndexToml {
    fn default() -> Self {
        Self {
            region: Some("nino34".to_string()),
            lat_min: None,
            lat_max: None,
            lon_min: None,
            lon_max: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapToml {
    #[serde(default = "default_statistic")]
    pub statistic: String,
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Path for the JSON run summary; derived from `output` when unset.
    #[serde(default)]
    pub summary: Option<PathBuf>,
}

impl Default for MapToml {
    fn default() -> Self {
        Self {
            statistic: default_statistic(),
            significance_level: default_significance_level(),
            output: default_output(),
            summary: None,
        }
    }
}

fn default_statistic() -> String {
    "correlation".to_string()
}
fn default_significance_level() -> f64 {
    0.10
}
fn default_output() -> PathBuf {
    PathBuf::from("map.nc")
}
