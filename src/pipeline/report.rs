use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::input::Dataset;
use crate::model::rows::Aggregation;
use crate::model::selection::Selection;
use crate::pipeline::rank::level_breakdown;
use crate::report::json::{
    CoverageDoc, DatasetMeta, LevelDoc, RowDoc, SelectionMeta, SummaryDoc, ToolMeta,
};
use crate::report::text::render_report_text;
use crate::report::{DisplayRow, RenderContext, format_f64_6};
use crate::vocab::{CoverageAudit, Vocabulary};

#[derive(Debug, Clone)]
pub struct ReportInputs<'a> {
    pub aggregation: &'a Aggregation,
    pub dataset: &'a Dataset,
    pub vocabulary: &'static Vocabulary,
    pub selection: &'a Selection,
    pub audits: &'a [CoverageAudit],

    pub tool_name: String,
    pub tool_version: String,
    pub git_hash: Option<String>,
}

pub fn write_reports(inputs: &ReportInputs<'_>, out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let ctx = build_render_context(inputs);

    if !ctx.no_selection {
        write_rankings_tsv(&ctx, &out_dir.join("rankings.tsv"))?;
    }

    fs::write(out_dir.join("report.txt"), render_report_text(&ctx))?;

    let summary = build_summary(inputs, &ctx);
    let json = serde_json::to_string_pretty(&summary).map_err(io::Error::other)?;
    fs::write(out_dir.join("summary.json"), json)?;

    tracing::info!(
        "reports written: out={}, ranked_models={}",
        out_dir.display(),
        ctx.rows.len()
    );
    Ok(())
}

pub fn build_render_context(inputs: &ReportInputs<'_>) -> RenderContext {
    let rows = match inputs.aggregation {
        Aggregation::NoSelection => Vec::new(),
        Aggregation::Ranked(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| DisplayRow {
                rank: i + 1,
                name: row.name.clone(),
                score: row.score,
                levels: row.level_scores,
                breakdown: level_breakdown(row),
            })
            .collect(),
    };

    RenderContext {
        no_selection: matches!(inputs.aggregation, Aggregation::NoSelection),
        temperature: inputs.vocabulary.temperatures[inputs.selection.temperature].to_string(),
        selected_keys: inputs
            .selection
            .active_keys(inputs.vocabulary)
            .into_iter()
            .map(str::to_string)
            .collect(),
        models_total: inputs.dataset.models.len(),
        rows,
    }
}

fn build_summary(inputs: &ReportInputs<'_>, ctx: &RenderContext) -> SummaryDoc {
    SummaryDoc {
        tool: ToolMeta {
            name: inputs.tool_name.clone(),
            version: inputs.tool_version.clone(),
            git_hash: inputs.git_hash.clone(),
        },
        dataset: DatasetMeta {
            path: inputs.dataset.source_path.display().to_string(),
            shape: inputs.dataset.shape.as_str(),
            profile: inputs.vocabulary.profile,
            models: inputs.dataset.models.len(),
        },
        selection: SelectionMeta {
            temperature: ctx.temperature.clone(),
            active_biases: ctx.selected_keys.clone(),
        },
        status: if ctx.no_selection {
            "no_selection"
        } else {
            "ranked"
        },
        rows: ctx
            .rows
            .iter()
            .map(|row| RowDoc {
                rank: row.rank,
                model: row.name.clone(),
                score: row.score,
                level_scores: row.levels,
                levels_by_score: row
                    .breakdown
                    .iter()
                    .map(|l| LevelDoc {
                        level: l.level,
                        label: l.label,
                        score: l.score,
                    })
                    .collect(),
            })
            .collect(),
        coverage: inputs
            .audits
            .iter()
            .map(|a| CoverageDoc {
                bias_key: a.bias_key.clone(),
                group: a.group,
                models_with_data: a.models_with_data,
                models_total: a.models_total,
            })
            .collect(),
    }
}

fn write_rankings_tsv(ctx: &RenderContext, path: &Path) -> io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "rank", "model", "score", "level_1", "level_2", "level_3", "level_4", "level_5",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    // The TSV keeps level order; the display sub-ranking belongs to the
    // text report only.
    for row in &ctx.rows {
        let mut cols = vec![
            row.rank.to_string(),
            row.name.clone(),
            format_f64_6(row.score),
        ];
        cols.extend(row.levels.iter().map(|v| format_f64_6(*v)));
        writeln!(w, "{}", cols.join("\t"))?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/report.rs"]
mod tests;
