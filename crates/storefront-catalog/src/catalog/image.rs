//! Image reference resolution for the image-loading collaborator.

/// Resolve a product image reference against the API origin.
///
/// References that already start with `http` are returned unchanged; anything
/// else is treated as root-relative and joined onto `origin` with exactly one
/// `/` between them.
pub fn resolve_image_url(image: &str, origin: &str) -> String {
    if image.starts_with("http") {
        return image.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        image.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_unchanged() {
        let url = "https://storage.googleapis.com/bucket/1692947383286.jpg";
        assert_eq!(resolve_image_url(url, "https://fakestoreapi.in"), url);
    }

    #[test]
    fn test_relative_joined_once() {
        assert_eq!(
            resolve_image_url("/uploads/tv.png", "https://fakestoreapi.in/"),
            "https://fakestoreapi.in/uploads/tv.png"
        );
        assert_eq!(
            resolve_image_url("uploads/tv.png", "https://fakestoreapi.in"),
            "https://fakestoreapi.in/uploads/tv.png"
        );
    }
}
