use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::export::{ensure_parent, PrintDocument};
use crate::report::{Align, LineKind};

const ACCENT: &str = "#7b1113";

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Standalone print page: inline styles, opens the print dialog on load.
pub fn render_html(doc: &PrintDocument) -> String {
    let font = doc.scale.font_size;
    let pad = doc.scale.padding;
    let orientation = if doc.landscape { "landscape" } else { "portrait" };
    let width = doc.headers.len().max(1);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  @page {{ size: A4 {orientation}; margin: 12mm; }}
  body {{ font-family: Arial, Helvetica, sans-serif; color: #222; margin: 0; }}
  .header {{ border-bottom: 2px solid {ACCENT}; margin-bottom: 10px; padding-bottom: 6px; }}
  .header h1 {{ color: {ACCENT}; font-size: 18px; margin: 0 0 4px 0; }}
  .header .org {{ font-size: 13px; font-weight: bold; }}
  .header .meta {{ font-size: 10px; color: #555; }}
  table {{ border-collapse: collapse; width: 100%; font-size: {font}px; }}
  th {{ background: {ACCENT}; color: #fff; padding: {pad}px; border: 1px solid #999; }}
  td {{ padding: {pad}px; border: 1px solid #ccc; }}
  tr.data:nth-child(even) td {{ background: #f6f0f0; }}
  tr.category td {{ background: #e8dada; font-weight: bold; }}
  tr.subtotal td {{ font-weight: bold; border-top: 1px solid #666; }}
  tr.total td {{ font-weight: bold; background: #ddd; border-top: 2px solid #333; }}
  .right {{ text-align: right; }}
  .empty {{ padding: 20px; text-align: center; color: #666; }}
</style>
</head>
<body>
<div class="header">
"#,
        title = escape(&doc.title),
    );

    if !doc.organization.is_empty() {
        let _ = writeln!(html, "<div class=\"org\">{}</div>", escape(&doc.organization));
    }
    let _ = writeln!(html, "<h1>{}</h1>", escape(&doc.title));
    for f in &doc.filters {
        let _ = writeln!(
            html,
            "<div class=\"meta\"><b>{}:</b> {}</div>",
            escape(&f.label),
            escape(&f.value)
        );
    }
    let _ = writeln!(
        html,
        "<div class=\"meta\">Generated: {}</div>\n</div>",
        escape(&doc.generated)
    );

    if !doc.lines.iter().any(|l| l.kind == LineKind::Data) {
        html.push_str("<div class=\"empty\">No data found for the selected filters.</div>\n");
    } else {
        html.push_str("<table>\n<thead><tr>");
        for (label, align) in doc.headers.iter().zip(&doc.aligns) {
            let _ = write!(html, "<th{}>{}</th>", class_attr(*align), escape(label));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        for line in &doc.lines {
            match line.kind {
                LineKind::CategoryHeader => {
                    let label = line.display.first().map(String::as_str).unwrap_or("");
                    let _ = writeln!(
                        html,
                        "<tr class=\"category\"><td colspan=\"{width}\">{}</td></tr>",
                        escape(label)
                    );
                }
                kind => {
                    let class = match kind {
                        LineKind::Subtotal => "subtotal",
                        LineKind::Total => "total",
                        _ => "data",
                    };
                    let _ = write!(html, "<tr class=\"{class}\">");
                    for (cell, align) in line.display.iter().zip(&doc.aligns) {
                        let _ = write!(html, "<td{}>{}</td>", class_attr(*align), escape(cell));
                    }
                    html.push_str("</tr>\n");
                }
            }
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str("<script>window.onload = function () { window.print(); };</script>\n</body>\n</html>\n");
    html
}

fn class_attr(align: Align) -> &'static str {
    match align {
        Align::Right => " class=\"right\"",
        Align::Left => "",
    }
}

pub fn write_html(doc: &PrintDocument, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, render_html(doc))?;
    log::info!("wrote print page to {}", path.display());
    Ok(())
}
