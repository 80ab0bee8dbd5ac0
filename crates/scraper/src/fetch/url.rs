//! Relative URL resolution against a site's base origin.

use url::Url;

/// Resolve a scraped href against a base origin such as
/// `https://clubberia.com`.
///
/// An empty href falls back to the site's generic listing URL. Everything
/// else goes through [`Url::join`], which handles absolute, protocol-relative
/// (`//host/...`), root-relative (`/path`), and bare-relative hrefs. An href
/// that cannot be joined also falls back to the listing URL.
pub fn resolve(base: &str, href: &str) -> String {
    let base = base.trim_end_matches('/');
    let listing = format!("{base}/events/");

    if href.is_empty() {
        return listing;
    }

    match Url::parse(base).and_then(|origin| origin.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(err) => {
            tracing::debug!("could not resolve href {:?} against {}: {}", href, base, err);
            listing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://clubberia.com";

    #[test]
    fn test_absolute_passthrough() {
        assert_eq!(
            resolve(BASE, "https://other.com/events/1"),
            "https://other.com/events/1"
        );
    }

    #[test]
    fn test_protocol_relative() {
        assert_eq!(
            resolve(BASE, "//cdn.clubberia.com/img.jpg"),
            "https://cdn.clubberia.com/img.jpg"
        );
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(resolve(BASE, "/ja/events/12345"), "https://clubberia.com/ja/events/12345");
    }

    #[test]
    fn test_bare_relative() {
        assert_eq!(resolve(BASE, "events/12345"), "https://clubberia.com/events/12345");
    }

    #[test]
    fn test_empty_falls_back_to_listing() {
        assert_eq!(resolve(BASE, ""), "https://clubberia.com/events/");
    }

    #[test]
    fn test_unjoinable_falls_back_to_listing() {
        assert_eq!(resolve(BASE, "https://"), "https://clubberia.com/events/");
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(resolve("https://clubberia.com/", "/x"), "https://clubberia.com/x");
    }
}
