use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|bmp|webp)$").unwrap());

/// Whether `url` points at something the catalog can display as an image.
///
/// Requires an absolute http(s) URL. Unsplash links carry no file extension
/// and are accepted as-is; anything else must end in a known image extension.
pub fn is_valid_image_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return false;
    }
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    if parsed
        .host_str()
        .is_some_and(|h| h == "unsplash.com" || h.ends_with(".unsplash.com"))
    {
        return true;
    }
    IMAGE_EXTENSION_RE.is_match(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_images_with_extensions() {
        assert!(is_valid_image_url("https://cdn.example.com/arch.JPG"));
        assert!(is_valid_image_url("http://example.com/a/b/marigold.webp"));
    }

    #[test]
    fn accepts_unsplash_without_extension() {
        assert!(is_valid_image_url(
            "https://images.unsplash.com/photo-1519741497674-611481863552?w=800"
        ));
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(!is_valid_image_url(""));
        assert!(!is_valid_image_url("   "));
        assert!(!is_valid_image_url("not a url"));
        assert!(!is_valid_image_url("ftp://example.com/a.png"));
        assert!(!is_valid_image_url("https://example.com/page.html"));
    }
}
