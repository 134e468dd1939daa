use crate::config::OutputConfig;
use crate::harvest::NewsItem;

/// Marker substituted for line breaks (and the separator) inside a field
pub const BREAK_MARKER: &str = " ... ";

/// How items are rendered as result lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFormat {
    /// Append the resolved URL after the title
    pub show_url: bool,

    /// Separator between title and URL; a single space when `None`
    pub separator: Option<String>,
}

impl LineFormat {
    pub fn titles_only() -> Self {
        Self::default()
    }

    pub fn with_urls(separator: Option<String>) -> Self {
        Self {
            show_url: true,
            separator,
        }
    }
}

impl From<&OutputConfig> for LineFormat {
    fn from(config: &OutputConfig) -> Self {
        Self {
            show_url: config.show_url,
            separator: config.url_separator.clone(),
        }
    }
}

/// Renders one line per item
///
/// Each line is single-line by construction: line breaks inside a field are
/// replaced with [`BREAK_MARKER`]. With an explicit separator, occurrences of
/// it inside a field are replaced too, so the line splits unambiguously.
pub fn format_result_lines(items: &[NewsItem], format: &LineFormat) -> Vec<String> {
    items.iter().map(|item| format_line(item, format)).collect()
}

fn format_line(item: &NewsItem, format: &LineFormat) -> String {
    if !format.show_url {
        return sanitize(&item.title, None);
    }

    match &format.separator {
        Some(separator) => format!(
            "{}{}{}",
            sanitize(&item.title, Some(separator)),
            separator,
            sanitize(&item.url, Some(separator))
        ),
        None => format!("{} {}", sanitize(&item.title, None), sanitize(&item.url, None)),
    }
}

fn sanitize(field: &str, separator: Option<&str>) -> String {
    let field = field.replace('\n', BREAK_MARKER);
    match separator {
        Some(separator) if !separator.is_empty() => field.replace(separator, BREAK_MARKER),
        _ => field,
    }
}
