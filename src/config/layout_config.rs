use crate::domain::slides::grid_layout::GridSpec;

/// Grid used when the command line does not override it
#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LayoutConfig {
    pub rows: u32,
    pub cols: u32,
    pub limit: Option<u32>,
    pub width_ratio: f64,
    pub height_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let spec = GridSpec::default();
        Self {
            rows: spec.rows,
            cols: spec.cols,
            limit: spec.limit,
            width_ratio: spec.width_ratio,
            height_ratio: spec.height_ratio,
        }
    }
}

impl From<&LayoutConfig> for GridSpec {
    fn from(config: &LayoutConfig) -> Self {
        GridSpec {
            rows: config.rows,
            cols: config.cols,
            limit: config.limit,
            width_ratio: config.width_ratio,
            height_ratio: config.height_ratio,
        }
    }
}
