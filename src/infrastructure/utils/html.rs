use ammonia::{Builder, UrlRelative};

/// Strips scripts, event handlers and unsafe URLs from article HTML.
pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_script_and_handlers() {
        let cleaned = sanitize_html(r#"<p onclick="steal()">Hi</p><script>alert(1)</script>"#);
        assert_eq!(cleaned, "<p>Hi</p>");
    }

    #[test]
    fn keeps_formatting_and_relative_images() {
        let cleaned = sanitize_html(r#"<h2>Recap</h2><img src="/uploads/recap.jpg">"#);
        assert!(cleaned.contains("<h2>Recap</h2>"));
        assert!(cleaned.contains(r#"src="/uploads/recap.jpg""#));
    }
}
