use tera::{Context, Tera};

use crate::context::ReportContext;
use crate::docx::generate_docx;
use crate::error::ExportError;
use crate::styles::DocumentStyles;
use crate::templates::template_for;

/// Render a Tera template against a report context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The context fields become the template variables.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    report: &ReportContext,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(report)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render the built-in template for the context's report kind.
pub fn render_report(report: &ReportContext) -> Result<String, ExportError> {
    let (name, content) = template_for(report.kind);
    render_template(name, content, report)
}

/// Render and pack a report as DOCX bytes.
pub fn export_docx(report: &ReportContext, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let rendered = render_report(report)?;
    let bytes = generate_docx(&rendered, styles)?;
    tracing::info!(
        kind = report.kind.as_str(),
        format = %report.format_name,
        bytes = bytes.len(),
        "report exported"
    );
    Ok(bytes)
}
