use thiserror::Error;
use url::Url;

/// Errors from validating a link before handing it to the system opener.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
}

/// Validate a catalog link before passing it to `open::that`.
///
/// Only absolute `http`/`https` URLs with a host are accepted, so a
/// malicious catalog entry cannot make the opener run a local file or a
/// custom scheme handler.
pub fn validate_link(raw: &str) -> Result<Url, LinkError> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(LinkError::MissingHost);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        let url = validate_link("https://www.gutenberg.org/ebooks/1342.html.images").unwrap();
        assert_eq!(url.host_str(), Some("www.gutenberg.org"));
    }

    #[test]
    fn test_accepts_http_with_whitespace() {
        assert!(validate_link("  http://www.gutenberg.org/files/84/84-0.txt ").is_ok());
    }

    #[test]
    fn test_rejects_file_scheme() {
        assert!(matches!(
            validate_link("file:///etc/passwd"),
            Err(LinkError::UnsupportedScheme(s)) if s == "file"
        ));
    }

    #[test]
    fn test_rejects_javascript_scheme() {
        assert!(validate_link("javascript:alert(1)").is_err());
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_link("/ebooks/1342"),
            Err(LinkError::InvalidUrl(_))
        ));
    }
}
