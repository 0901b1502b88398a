use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, Header, PageMargin, Paragraph, Run, RunFonts, Style,
    StyleType, Table, TableCell, TableRow,
};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from rendered Markdown-ish template output.
///
/// The `rendered` content uses a simple subset:
/// - `# Heading` → DOCX Heading 1
/// - `## Heading` → DOCX Heading 2
/// - `### Heading` → DOCX Heading 3
/// - `- item` → bullet list item (prefixed with bullet character)
/// - `**bold**` → bold run
/// - `| a | b |` lines → table; the first row is the header, `|---|` rows are skipped
/// - `---` or `***` → page break
/// - Everything else → normal paragraph
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let margin = styles.margin_twips();
    let mut docx = Docx::new()
        .default_fonts(body_fonts(styles))
        .default_size(styles.body_size * 2)
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size, styles))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size, styles))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size, styles));

    if let Some(text) = styles.header_text.as_deref().filter(|t| !t.trim().is_empty()) {
        docx = docx.header(
            Header::new().add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(text).bold().fonts(body_fonts(styles))),
            ),
        );
    }

    let mut table_lines: Vec<&str> = Vec::new();

    for line in rendered.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('|') {
            table_lines.push(trimmed);
            continue;
        }
        if !table_lines.is_empty() {
            docx = docx.add_table(build_table(&table_lines, styles));
            table_lines.clear();
        }

        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
            continue;
        }

        if let Some(text) = trimmed.strip_prefix("### ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading3"));
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading2"));
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading1"));
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            docx = docx.add_paragraph(bullet_paragraph(text, styles));
        } else if trimmed == "---" || trimmed == "***" {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
        } else {
            docx = docx.add_paragraph(body_paragraph(trimmed, styles));
        }
    }

    if !table_lines.is_empty() {
        docx = docx.add_table(build_table(&table_lines, styles));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn body_fonts(styles: &DocumentStyles) -> RunFonts {
    RunFonts::new()
        .ascii(&styles.body_font)
        .hi_ansi(&styles.body_font)
}

fn heading_style(style_id: &str, name: &str, size_pt: usize, styles: &DocumentStyles) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
        .fonts(
            RunFonts::new()
                .ascii(&styles.heading_font)
                .hi_ansi(&styles.heading_font),
        )
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let bullet_run = Run::new()
        .add_text("\u{2022} ")
        .fonts(body_fonts(styles));

    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(bullet_run);

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }

    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

/// Cells of a `| a | b |` line, trimmed.
pub fn table_cells(line: &str) -> Vec<&str> {
    let inner = line.trim().trim_start_matches('|').trim_end_matches('|');
    inner.split('|').map(str::trim).collect()
}

fn is_separator_row(cells: &[&str]) -> bool {
    cells
        .iter()
        .all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-' || ch == ':'))
}

fn build_table(lines: &[&str], styles: &DocumentStyles) -> Table {
    let mut rows = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let cells = table_cells(line);
        if is_separator_row(&cells) {
            continue;
        }
        let header = i == 0;
        let cells = cells
            .into_iter()
            .map(|text| {
                let mut run = Run::new().add_text(text).fonts(body_fonts(styles));
                if header {
                    run = run.bold();
                }
                TableCell::new().add_paragraph(Paragraph::new().add_run(run))
            })
            .collect();
        rows.push(TableRow::new(cells));
    }

    Table::new(rows)
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(Run::new().add_text(before).fonts(body_fonts(styles)));
        }

        let after_start = &remaining[start + 2..];
        if let Some(end) = after_start.find("**") {
            let bold_text = &after_start[..end];
            runs.push(
                Run::new()
                    .add_text(bold_text)
                    .bold()
                    .fonts(body_fonts(styles)),
            );
            remaining = &after_start[end + 2..];
        } else {
            // No closing **, keep the rest as plain text
            runs.push(Run::new().add_text(remaining).fonts(body_fonts(styles)));
            return runs;
        }
    }

    if !remaining.is_empty() {
        runs.push(Run::new().add_text(remaining).fonts(body_fonts(styles)));
    }

    runs
}
