use std::path::Path;
use std::process::Command;

use crate::error::{ReportError, Result};
use crate::export::{ensure_parent, PrintDocument};

/// Embedded Typst template for report tables.
/// Uses a placeholder that gets replaced with the actual JSON file path
const REPORT_TEMPLATE: &str = r##"// Report Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")
#let accent = rgb("#7b1113")
#let ncols = data.headers.len()

#set page(
  paper: "a4",
  flipped: data.landscape,
  margin: (top: 12mm, bottom: 12mm, left: 10mm, right: 10mm),
)

#set text(font: "Helvetica", size: data.scale.font_size * 0.75pt)

// Header block
#grid(
  columns: (1fr, auto),
  align: (left, right),
  [
    #if data.organization != "" [
      #text(weight: "bold", size: 11pt)[#data.organization] \
    ]
    #text(size: 16pt, weight: "bold", fill: accent)[#data.title]
    #v(0.3em)
    #for f in data.filters [
      *#f.label:* #f.value \
    ]
  ],
  [
    #text(size: 9pt, fill: gray)[Generated #data.generated]
  ]
)

#line(length: 100%, stroke: 1pt + accent)
#v(0.5em)

#let row-fill(kind, i) = {
  if kind == "category_header" { rgb("#e8dada") }
  else if kind == "total" { luma(220) }
  else if kind == "subtotal" { none }
  else if calc.even(i) { rgb("#f6f0f0") }
  else { none }
}

#let line-cells(line, i) = {
  if line.kind == "category_header" {
    (table.cell(colspan: ncols, fill: row-fill(line.kind, i))[*#line.display.at(0)*],)
  } else {
    line.display.enumerate().map(((c, cell)) => {
      let body = if line.kind == "data" { cell } else { strong(cell) }
      table.cell(
        align: if data.aligns.at(c) == "right" { right } else { left },
        fill: row-fill(line.kind, i),
      )[#body]
    })
  }
}

#if data.lines.len() == 0 [
  #align(center)[#text(fill: gray)[No data found for the selected filters.]]
] else [
  #table(
    columns: ncols,
    stroke: 0.5pt + luma(180),
    inset: data.scale.padding * 0.75pt,
    table.header(
      ..data.headers.map(h => table.cell(fill: accent)[#text(fill: white, weight: "bold")[#h]])
    ),
    ..data.lines.enumerate().map(((i, line)) => line-cells(line, i)).flatten()
  )
]
"##;

/// Generate a report PDF using Typst CLI
pub fn generate_report_pdf(doc: &PrintDocument, output_path: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();

    if typst_check.is_err() {
        return Err(ReportError::TypstNotFound);
    }

    let temp_dir = std::env::temp_dir().join(format!("reportdesk-{}", std::process::id()));
    std::fs::create_dir_all(&temp_dir)?;

    let result = compile_in(&temp_dir, doc, output_path);

    // Clean up temp files whether or not compilation succeeded
    let _ = std::fs::remove_dir_all(&temp_dir);

    result?;
    log::info!("wrote PDF export to {}", output_path.display());
    Ok(())
}

/// Write the payload and template into `work_dir` and run `typst compile` there.
fn compile_in(work_dir: &Path, doc: &PrintDocument, output_path: &Path) -> Result<()> {
    let json_data =
        serde_json::to_string(doc).map_err(|e| ReportError::PdfGeneration(e.to_string()))?;
    std::fs::write(work_dir.join("report_data.json"), &json_data)?;

    let template_content = REPORT_TEMPLATE.replace("DATA_JSON_PATH", "report_data.json");
    let template_path = work_dir.join("report.typ");
    std::fs::write(&template_path, &template_content)?;

    ensure_parent(output_path)?;

    // Run typst compile with root set to the work directory
    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(work_dir)
        .arg(&template_path)
        .arg(output_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReportError::PdfGeneration(stderr.to_string()));
    }
    Ok(())
}
