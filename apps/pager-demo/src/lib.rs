//! Pager demo: text pages driven through a scripted swipe and rotate
//! session, with the surface narrating every layout effect to the log.

pub mod app;

/// Environment variable holding the number of pages to serve.
pub const PAGE_COUNT_VAR: &str = "PAGER_DEMO_PAGES";

pub const DEFAULT_PAGE_COUNT: usize = 10;

/// Reads the page count from [`PAGE_COUNT_VAR`], falling back to
/// [`DEFAULT_PAGE_COUNT`] when it is unset.
pub fn page_count_from_env() -> anyhow::Result<usize> {
    match std::env::var(PAGE_COUNT_VAR) {
        Ok(value) => parse_page_count(&value),
        Err(std::env::VarError::NotPresent) => Ok(DEFAULT_PAGE_COUNT),
        Err(err) => Err(anyhow::Error::new(err).context(format!("reading {PAGE_COUNT_VAR}"))),
    }
}

fn parse_page_count(value: &str) -> anyhow::Result<usize> {
    use anyhow::Context;

    value
        .trim()
        .parse()
        .with_context(|| format!("{PAGE_COUNT_VAR} must be a page count, got '{value}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_parses_with_whitespace() {
        assert_eq!(parse_page_count(" 25\n").unwrap(), 25);
    }

    #[test]
    fn bad_page_count_names_the_variable() {
        let err = parse_page_count("lots").unwrap_err();
        assert!(err.to_string().contains(PAGE_COUNT_VAR));
    }
}
