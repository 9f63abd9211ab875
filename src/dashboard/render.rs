//! Dashboard rendering
//!
//! `render_html` writes a standalone page: one row per variable with a uPlot
//! chart and the summary panel, the arrow drawn as inline SVG.
//! `render_text` writes the same readouts as a terminal table.

use super::panel::{ARROW_CANVAS_HEIGHT, ARROW_CANVAS_WIDTH, ARROW_LINE_WIDTH};
use super::{Dashboard, VariablePanel};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const UPLOT_VERSION: &str = "1.6.24";

/// Render the dashboard as a complete HTML document
pub fn render_html(dashboard: &Dashboard) -> String {
    let mut html = String::new();
    let title = encode_text(&dashboard.title);

    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", title);
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"https://unpkg.com/uplot@{v}/dist/uPlot.min.css\">",
        v = UPLOT_VERSION
    );
    let _ = writeln!(
        html,
        "<script src=\"https://unpkg.com/uplot@{v}/dist/uPlot.iife.min.js\"></script>",
        v = UPLOT_VERSION
    );
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(html, "<h1>{}</h1>", title);
    let _ = writeln!(html, "<div class=\"plots\">");

    for outcome in &dashboard.variables {
        match &outcome.result {
            Ok(panel) => render_row(&mut html, panel),
            Err(e) => {
                let _ = writeln!(
                    html,
                    "<div class=\"row\" style=\"display: flex; align-items: center;\"><p class=\"error\">{}: {}</p></div>",
                    encode_text(&outcome.name),
                    encode_text(&e.to_string())
                );
            }
        }
    }

    let _ = writeln!(html, "</div>");
    let _ = writeln!(html, "</body>");
    let _ = writeln!(html, "</html>");
    html
}

fn render_row(html: &mut String, panel: &VariablePanel) {
    let summary = &panel.summary;
    let config = &panel.chart.config;
    let color = encode_double_quoted_attribute(&summary.color);

    let _ = writeln!(
        html,
        "<div class=\"row\" style=\"display: flex; align-items: center;\">"
    );
    let _ = writeln!(
        html,
        "<div class=\"col-8\" id=\"{}\" style=\"display: inline; float: left;\"></div>",
        encode_double_quoted_attribute(&config.id)
    );

    let _ = writeln!(html, "<div class=\"col-4\">");
    let _ = writeln!(
        html,
        "<p style=\"color: {}; font-weight: bold; font-size: 35px; margin-bottom: 0px;\">{}</p>",
        color,
        encode_text(&summary.latest_text())
    );
    if let Some(time) = summary.latest_time_text() {
        let _ = writeln!(
            html,
            "<p style=\"color: black; font-size: 10px; margin-top: 0px;\">{}</p>",
            encode_text(&time)
        );
    }
    if let Some(arrow) = &summary.arrow {
        let _ = writeln!(
            html,
            "<svg width=\"{}\" height=\"{}\"><path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" fill=\"none\"/></svg>",
            ARROW_CANVAS_WIDTH,
            ARROW_CANVAS_HEIGHT,
            arrow.svg_path(),
            encode_double_quoted_attribute(&arrow.color),
            ARROW_LINE_WIDTH
        );
    }
    let _ = writeln!(
        html,
        "<p style=\"color: black; font-weight: bold; font-size: 20px;\">{}</p>",
        encode_text(&summary.mean_text())
    );
    let _ = writeln!(html, "</div>");

    let options = serde_json::to_string(config).unwrap_or_else(|_| "{}".to_string());
    let data = panel.chart.data_json().to_string();
    let id = serde_json::to_string(&config.id).unwrap_or_else(|_| "\"\"".to_string());
    let _ = writeln!(
        html,
        "<script>new uPlot({}, {}, document.getElementById({}));</script>",
        escape_script(&options),
        escape_script(&data),
        escape_script(&id)
    );
    let _ = writeln!(html, "</div>");
}

/// Render the readouts as a plain-text table
pub fn render_text(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", dashboard.title);
    let _ = writeln!(
        out,
        "{:<20} {:<18} {:<24} {:<22} {}",
        "Variable", "Latest", "Time", "Mean", "Trend"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));

    for outcome in &dashboard.variables {
        match &outcome.result {
            Ok(panel) => {
                let summary = &panel.summary;
                let mean = summary
                    .mean
                    .map(|m| format!("{:.2}", m))
                    .unwrap_or_else(|| "no data".to_string());
                let trend = summary
                    .arrow
                    .as_ref()
                    .map(|a| format!("{} {:+.3}", a.direction().symbol(), a.slope))
                    .unwrap_or_else(|| "-".to_string());

                let _ = writeln!(
                    out,
                    "{:<20} {:<18} {:<24} {:<22} {}",
                    outcome.name,
                    summary.latest_text(),
                    summary.latest_time_text().unwrap_or_else(|| "-".to_string()),
                    mean,
                    trend
                );
            }
            Err(e) => {
                let _ = writeln!(out, "{:<20} error: {}", outcome.name, e);
            }
        }
    }

    out
}

/// Keep embedded JSON from closing the script element
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/")
}
