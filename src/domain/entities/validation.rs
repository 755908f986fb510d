use std::borrow::Cow;

use validator::ValidationError;

pub const MAX_TAGS: usize = 15;
pub const MAX_TAG_LENGTH: usize = 40;

/// Absolute http(s) URLs, or site-relative paths such as `/uploads/a.jpg`.
pub fn validate_link(link: &str) -> Result<(), ValidationError> {
    if link.starts_with('/') && !link.starts_with("//") {
        return Ok(());
    }
    validate_url(link)
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug cannot be empty"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    if slug.contains("--") {
        return Err(new_validation_error("slug_double_hyphen", "Slug must not contain consecutive hyphens"));
    }
    Ok(())
}

/// Longest entry accepted in a comma-joined list column.
pub const MAX_LIST_ENTRY_LENGTH: usize = 200;

/// Entries of lists stored comma-joined must be non-blank and comma-free,
/// or they would not read back as the same list.
fn check_list_entry(entry: &str, max_len: usize) -> Result<(), ValidationError> {
    let trimmed = entry.trim();
    if trimmed.is_empty() || trimmed.chars().count() > max_len {
        return Err(new_validation_error("invalid_entry_length", "List entries must be non-empty and within the allowed length"));
    }
    if trimmed.contains(',') {
        return Err(new_validation_error("invalid_entry_chars", "List entries must not contain commas"));
    }
    Ok(())
}

pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(new_validation_error("too_many_tags", "Too many tags provided"));
    }
    tags.iter().try_for_each(|tag| check_list_entry(tag, MAX_TAG_LENGTH))
}

pub fn validate_list_entries(entries: &[String]) -> Result<(), ValidationError> {
    entries
        .iter()
        .try_for_each(|entry| check_list_entry(entry, MAX_LIST_ENTRY_LENGTH))
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "Value must not be blank"));
    }
    Ok(())
}

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

/// Slug from an explicit value or, failing that, from the title.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, ValidationError> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    if slug.len() < 3 {
        return Err(new_validation_error("slug_too_short", "Generated slug is too short; please provide a custom slug"));
    }
    validate_slug(&slug)?;
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_accept_http_and_site_paths() {
        assert!(validate_link("https://club.example.edu/poster.png").is_ok());
        assert!(validate_link("/uploads/poster.png").is_ok());
        assert!(validate_link("//evil.example.com/x.png").is_err());
        assert!(validate_link("javascript:alert(1)").is_err());
    }

    #[test]
    fn slugs_are_derived_from_vietnamese_titles() {
        assert_eq!(resolve_slug(None, "Hội thảo AI 2025").unwrap(), "hoi-thao-ai-2025");
        assert_eq!(resolve_slug(Some("custom-slug"), "ignored").unwrap(), "custom-slug");
        assert!(resolve_slug(None, "!!").is_err());
        assert!(resolve_slug(Some("Bad Slug"), "x").is_err());
    }

    #[test]
    fn tags_reject_commas_and_overflow() {
        assert!(validate_tags(&["ai".into(), "web".into()]).is_ok());
        assert!(validate_tags(&["ai, ml".into()]).is_err());
        assert!(validate_tags(&vec!["t".to_string(); MAX_TAGS + 1]).is_err());
    }

    #[test]
    fn list_entries_must_survive_comma_joining() {
        assert!(validate_list_entries(&["Giải Nhất ICPC 2024".into(), "Học bổng".into()]).is_ok());
        assert!(validate_list_entries(&["Gold medal, ICPC Asia 2024".into()]).is_err());
        assert!(validate_list_entries(&["  ".into()]).is_err());
        assert!(validate_list_entries(&["x".repeat(MAX_LIST_ENTRY_LENGTH + 1)]).is_err());
    }
}
