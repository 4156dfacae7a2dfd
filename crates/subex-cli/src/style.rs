use console::Style;

pub fn error_prefix() -> String {
    Style::new().red().bold().apply_to("error:").to_string()
}

pub fn check_mark() -> String {
    Style::new().green().bold().apply_to("\u{2714}").to_string()
}

pub fn cross_mark() -> String {
    Style::new().red().bold().apply_to("\u{2718}").to_string()
}

/// Timestamp column of a subtitle preview.
pub fn timestamp(s: &str) -> String {
    Style::new().cyan().apply_to(s).to_string()
}

pub fn dim(s: &str) -> String {
    Style::new().dim().apply_to(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_return_non_empty() {
        assert!(!error_prefix().is_empty());
        assert!(!check_mark().is_empty());
        assert!(!cross_mark().is_empty());
        assert!(!timestamp("0:00:01.00").is_empty());
    }

    #[test]
    fn dim_keeps_text() {
        assert!(dim("312 lines").contains("312 lines"));
    }
}
