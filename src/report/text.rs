use crate::report::{RenderContext, format_f64_3};

pub fn render_report_text(ctx: &RenderContext) -> String {
    let mut out = String::new();

    out.push_str("LLM Bias & Quality Rankings\n");
    out.push_str("===========================\n\n");

    if ctx.no_selection {
        out.push_str("Select at least one bias category to rank models.\n");
        return out;
    }

    out.push_str(&format!("Temperature: {}\n", ctx.temperature));
    out.push_str(&format!(
        "Selected areas ({}): {}\n",
        ctx.selected_keys.len(),
        ctx.selected_keys.join(", ")
    ));
    out.push_str(&format!(
        "Models ranked: {} of {}\n\n",
        ctx.rows.len(),
        ctx.models_total
    ));

    if ctx.rows.is_empty() {
        out.push_str("No model has data for the selected areas at this temperature.\n");
        return out;
    }

    for row in &ctx.rows {
        out.push_str(&format!(
            "{:>3}. {:<44} {:>8}\n",
            row.rank,
            row.name,
            format_f64_3(row.score)
        ));
        for level in &row.breakdown {
            out.push_str(&format!(
                "     {:<48} {:>8}\n",
                level.label,
                format_f64_3(level.score)
            ));
        }
        out.push('\n');
    }

    out
}
