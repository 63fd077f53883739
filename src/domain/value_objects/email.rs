/// Lightweight email shape check: one `@`, non-empty local part, dotted
/// domain, no whitespace or control characters. Deliverability is not our
/// problem here.
pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    if domain.contains("..") || domain.contains('@') {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        for raw in [
            "jane@example.com",
            "jane.doe+tag@mail.example.co.uk",
            "x@y.io",
        ] {
            assert!(is_valid_email(raw), "expected valid: {raw}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "",
            "jane",
            "jane@",
            "@example.com",
            "jane@example",
            "jane@.example.com",
            "jane@example.com.",
            "jane@exa..mple.com",
            "jane doe@example.com",
            "jane@exa@mple.com",
        ] {
            assert!(!is_valid_email(raw), "expected invalid: {raw}");
        }
    }
}
