use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SummaryDoc {
    pub tool: ToolMeta,
    pub dataset: DatasetMeta,
    pub selection: SelectionMeta,
    pub status: &'static str,
    pub rows: Vec<RowDoc>,
    pub coverage: Vec<CoverageDoc>,
}

#[derive(Debug, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
    pub git_hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DatasetMeta {
    pub path: String,
    pub shape: &'static str,
    pub profile: &'static str,
    pub models: usize,
}

#[derive(Debug, Serialize)]
pub struct SelectionMeta {
    pub temperature: String,
    pub active_biases: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RowDoc {
    pub rank: usize,
    pub model: String,
    pub score: f64,
    pub level_scores: [f64; 5],
    pub levels_by_score: Vec<LevelDoc>,
}

#[derive(Debug, Serialize)]
pub struct LevelDoc {
    pub level: usize,
    pub label: &'static str,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct CoverageDoc {
    pub bias_key: String,
    pub group: &'static str,
    pub models_with_data: usize,
    pub models_total: usize,
}
