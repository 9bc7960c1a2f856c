use crate::url::CrawlUrl;
use crate::UrlError;

/// Resolves a reference string against a base URL into a `CrawlUrl`
///
/// # Resolution Rules
///
/// 1. The reference is trimmed of surrounding whitespace; an empty
///    reference fails with `MalformedReference`.
/// 2. A reference that already carries an `http`/`https` scheme is taken
///    as-is.
/// 3. A reference starting with `/` is joined to the base's site origin.
/// 4. Anything else is treated as path-relative to the base.
///
/// The result is validated like any other `CrawlUrl`: absolute, http(s),
/// fragment stripped.
///
/// # Examples
///
/// ```
/// use webharvest::{normalize, CrawlUrl};
///
/// let base = CrawlUrl::parse("https://site/docs/index.html").unwrap();
/// let asset = normalize(&base, "report.pdf").unwrap();
/// assert_eq!(asset.as_str(), "https://site/docs/report.pdf");
///
/// let rooted = normalize(&base, "/about").unwrap();
/// assert_eq!(rooted.as_str(), "https://site/about");
/// ```
pub fn normalize(base: &CrawlUrl, reference: &str) -> Result<CrawlUrl, UrlError> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(UrlError::MalformedReference(
            "empty reference".to_string(),
        ));
    }

    // Already absolute: take it as-is.
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return CrawlUrl::parse(reference);
    }

    // Root-relative and path-relative references both resolve against the
    // base; Url::join applies the scheme+host join for a leading slash and
    // the path-relative join otherwise.
    let joined = base
        .as_url()
        .join(reference)
        .map_err(|e| UrlError::MalformedReference(format!("{}: {}", reference, e)))?;

    CrawlUrl::from_parsed(joined)
}
