//! Rendering blogs into downloadable documents.

use common::text::{format_date, slugify};
use common::validation::schemas::ExportOptions;
use common::{Choice, ExportFormat};
use serde::Serialize;

use crate::store::Blog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub format: ExportFormat,
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

/// Render `blog` in the requested format.
///
/// Returns the rejected format when it has no renderer.
pub fn render(blog: &Blog, options: &ExportOptions) -> Result<ExportDocument, ExportFormat> {
    let (content, extension, content_type) = match options.format {
        ExportFormat::Markdown => (markdown(blog, options), "md", "text/markdown; charset=utf-8"),
        ExportFormat::Html => (html(blog, options), "html", "text/html; charset=utf-8"),
        other => return Err(other),
    };

    let stem = match slugify(&blog.title) {
        s if s.is_empty() => "blog".to_string(),
        s => s,
    };

    Ok(ExportDocument {
        format: options.format,
        filename: format!("{stem}.{extension}"),
        content_type: content_type.to_string(),
        content,
    })
}

/// The body to export; falls back to outline headings for blogs that were
/// never written.
fn body(blog: &Blog) -> String {
    if !blog.content.trim().is_empty() {
        return blog.content.trim().to_string();
    }
    blog.outline
        .0
        .iter()
        .map(|heading| format!("## {heading}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn metadata_lines(blog: &Blog) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Topic", blog.topic.clone()),
        ("Status", blog.status.as_str().to_string()),
    ];
    if !blog.tags.is_empty() {
        lines.push(("Tags", blog.tags.join(", ")));
    }
    if let Some(published) = blog.published_at {
        lines.push(("Published", format_date(published)));
    }
    lines.push(("Updated", format_date(blog.updated_at)));
    lines
}

fn markdown(blog: &Blog, options: &ExportOptions) -> String {
    let mut out = format!("# {}\n\n", blog.title);

    if options.include_metadata {
        for (label, value) in metadata_lines(blog) {
            out.push_str(&format!("- **{label}:** {value}\n"));
        }
        out.push('\n');
    }

    if options.include_images
        && let Some(url) = &blog.hero_image_url
    {
        let alt = blog.hero_image_alt.as_deref().unwrap_or(&blog.title);
        out.push_str(&format!("![{alt}]({url})\n\n"));
    }

    out.push_str(&body(blog));
    out.push('\n');
    out
}

/// Escape text for inclusion in HTML markup.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn html(blog: &Blog, options: &ExportOptions) -> String {
    let mut head = format!(
        "<meta charset=\"utf-8\">\n<title>{}</title>\n",
        escape_html(&blog.title)
    );
    if let Some(css) = &options.custom_css {
        // Keep the stylesheet from closing its own tag.
        head.push_str(&format!("<style>\n{}\n</style>\n", css.replace("</", "<\\/")));
    }

    let mut article = format!("<h1>{}</h1>\n", escape_html(&blog.title));

    if options.include_metadata {
        article.push_str("<dl class=\"metadata\">\n");
        for (label, value) in metadata_lines(blog) {
            article.push_str(&format!("<dt>{label}</dt><dd>{}</dd>\n", escape_html(&value)));
        }
        article.push_str("</dl>\n");
    }

    if options.include_images
        && let Some(url) = &blog.hero_image_url
    {
        let alt = blog.hero_image_alt.as_deref().unwrap_or(&blog.title);
        article.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape_html(url),
            escape_html(alt)
        ));
    }

    for block in body(blog).split("\n\n").map(str::trim).filter(|b| !b.is_empty()) {
        let level = block.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&level) && block[level..].starts_with(' ') && !block.contains('\n') {
            article.push_str(&format!(
                "<h{level}>{}</h{level}>\n",
                escape_html(block[level..].trim())
            ));
        } else {
            article.push_str(&format!("<p>{}</p>\n", escape_html(block)));
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n{head}</head>\n<body>\n<article>\n{article}</article>\n</body>\n</html>\n"
    )
}
