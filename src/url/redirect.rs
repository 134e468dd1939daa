use url::Url;

/// Query parameter the news site uses to wrap outbound links
pub const REDIRECT_PARAM: &str = "cl4url";

/// Unwraps a redirector link to its real destination
///
/// If `raw_url` carries a non-empty `cl4url` query parameter, its value is
/// returned, with `http://` prepended when the value has no scheme. Every
/// other input, including strings that do not parse as URLs, is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use news_harvest::url::unwrap_redirect;
///
/// assert_eq!(
///     unwrap_redirect("http://x/go?cl4url=example.com/a"),
///     "http://example.com/a"
/// );
/// assert_eq!(unwrap_redirect("http://x/go"), "http://x/go");
/// ```
pub fn unwrap_redirect(raw_url: &str) -> String {
    let parsed = match Url::parse(raw_url) {
        Ok(parsed) => parsed,
        Err(_) => return raw_url.to_string(),
    };

    match parsed.query() {
        Some(query) if !query.is_empty() => {}
        _ => return raw_url.to_string(),
    }

    // Blank values are ignored, so the first non-empty occurrence wins
    let target = parsed
        .query_pairs()
        .filter(|(key, value)| key == REDIRECT_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .next();

    match target {
        Some(target) if has_scheme(&target) => target,
        Some(target) => format!("http://{}", target),
        None => raw_url.to_string(),
    }
}

/// True if `candidate` starts with `scheme://`; the rest is not validated
fn has_scheme(candidate: &str) -> bool {
    let Some((scheme, _)) = candidate.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
