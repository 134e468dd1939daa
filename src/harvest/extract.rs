//! HTML extraction of news items
//!
//! A news page lists its headlines as `<dl class="b-news-item">` containers.
//! Each container yields at most one [`NewsItem`]:
//! - title from the first text node of the nested `a.title`
//! - link from that anchor's `href`, resolved against the page URL and unwrapped
//! - optional summary from the first text node of the nested `dd.text`
//!
//! Malformed containers are skipped; a page without containers yields no items.

use crate::url::unwrap_redirect;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// One headline extracted from a news page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline text, verbatim
    pub title: String,

    /// Anchor target resolved against the page URL
    pub raw_url: String,

    /// `raw_url` with any redirector wrapping removed
    pub url: String,

    /// Optional summary text
    pub text: Option<String>,
}

struct Selectors {
    container: Selector,
    title: Selector,
    text: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        container: Selector::parse("dl.b-news-item").expect("static selector parses"),
        title: Selector::parse("a.title").expect("static selector parses"),
        text: Selector::parse("dd.text").expect("static selector parses"),
    })
}

/// Extracts news items from a page, in document order
///
/// # Arguments
///
/// * `html` - The page markup
/// * `page_url` - The URL the page was fetched from, used to resolve links
///
/// # Example
///
/// ```
/// use news_harvest::harvest::extract_news;
/// use url::Url;
///
/// let html = r#"<dl class="b-news-item"><dt><a class="title" href="/n/1">Headline</a></dt></dl>"#;
/// let page_url = Url::parse("http://news.yandex.ru/world.html").unwrap();
/// let items = extract_news(html, &page_url);
/// assert_eq!(items[0].title, "Headline");
/// assert_eq!(items[0].url, "http://news.yandex.ru/n/1");
/// ```
pub fn extract_news(html: &str, page_url: &Url) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let selectors = selectors();

    document
        .select(&selectors.container)
        .filter_map(|container| extract_item(container, page_url, selectors))
        .collect()
}

fn extract_item(container: ElementRef<'_>, page_url: &Url, selectors: &Selectors) -> Option<NewsItem> {
    let anchor = container.select(&selectors.title).next()?;
    let title = first_text_child(anchor)?;

    let href = anchor.value().attr("href").unwrap_or("");
    let raw_url = match page_url.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!("Keeping unresolvable href {:?} for '{}': {}", href, title, e);
            href.to_string()
        }
    };
    let url = unwrap_redirect(&raw_url);

    let text = container
        .select(&selectors.text)
        .next()
        .and_then(first_text_child);

    Some(NewsItem {
        title,
        raw_url,
        url,
        text,
    })
}

/// Returns the element's first child if it is a plain text node
fn first_text_child(element: ElementRef<'_>) -> Option<String> {
    let child = element.first_child()?;
    child.value().as_text().map(|text| String::from(&**text))
}
