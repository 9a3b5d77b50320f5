// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const DEFAULT_BASE_URL: &str = "http://www.trustees.uillinois.edu/trustees/resources/17-18-Graybook/";

/// Unit codes published for the 2017-2018 Gray Book, per campus.
static DEFAULT_CAMPUSES: &[(&str, &str)] = &[
    (
        "Urbana-Champaign",
        "KL KY LD NQ LT LN NA NT KM KT NU KW KN MY KP NN KR KS LQ KU KV LB NS NB LM NH LF LP LG LL NC LR NJ LC NP NE",
    ),
    (
        "Chicago",
        "JV GF FR JY FL JP JA FZ GA FV GE GC GS FN FM FP FQ JM FS JD GH GT JT FT GQ FW JS FX JB JU FY GL JK GN JL GP HY JW JE JX JC JJ JF",
    ),
    ("Springfield", "SC SG PE PL SA PG SF PJ PH SB PF SE PK"),
    ("System", "AF AH AA AR AM AD AN AP AJ"),
];

/// The units of one campus, processed in the listed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampusUnits {
    pub campus: String,
    pub units: Vec<String>,
}

/// Everything the pipeline and the report binaries need, passed explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory URL the `<UNIT>.html` pages live under.
    pub base_url: String,
    /// Local page cache; a cached page is never fetched again.
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Pause after every real network request.
    pub fetch_delay_secs: u64,
    /// Surface reconciliation discrepancies at warn level instead of debug.
    pub debug: bool,
    /// Max rows the report binaries print; `None` prints everything.
    pub display_row_limit: Option<usize>,
    /// Largest |computed - shown| total treated as agreement.
    pub discrepancy_tolerance: f64,
    pub write_parquet: bool,
    pub campuses: Vec<CampusUnits>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
            fetch_delay_secs: 30,
            debug: false,
            display_row_limit: None,
            discrepancy_tolerance: 0.01,
            write_parquet: false,
            campuses: DEFAULT_CAMPUSES
                .iter()
                .map(|(campus, codes)| CampusUnits {
                    campus: campus.to_string(),
                    units: codes.split_whitespace().map(str::to_string).collect(),
                })
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Read a YAML config; missing fields take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if given, otherwise the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_yaml_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_secs(self.fetch_delay_secs)
    }

    pub fn salaries_csv(&self) -> PathBuf {
        self.output_dir.join("salaries.csv")
    }

    pub fn rows_csv(&self) -> PathBuf {
        self.output_dir.join("uiData.csv")
    }

    pub fn salaries_parquet(&self) -> PathBuf {
        self.output_dir.join("salaries.parquet")
    }

    pub fn diagnostics_json(&self) -> PathBuf {
        self.output_dir.join("diagnostics.json")
    }

    /// (campus, unit code) pairs in processing order.
    pub fn units(&self) -> impl Iterator<Item = (&str, &str)> {
        self.campuses.iter().flat_map(|c| {
            c.units
                .iter()
                .map(move |u| (c.campus.as_str(), u.as_str()))
        })
    }
}
