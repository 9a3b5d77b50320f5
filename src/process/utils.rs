use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Collapse runs of whitespace (including `&nbsp;`) and trim; blank becomes `None`.
pub fn clean_cell(raw: &str) -> Option<String> {
    let spaced = raw.replace('\u{a0}', " ");
    let collapsed = WHITESPACE.replace_all(&spaced, " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A cell that is neither blank nor a finite number once `$` and `,` are stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAmount;

/// Strip currency formatting from an FTE or salary cell and parse it.
/// `Ok(None)` for blank cells.
pub fn parse_amount(raw: &str) -> Result<Option<f64>, InvalidAmount> {
    let stripped: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let stripped = stripped.trim();
    if stripped.is_empty() {
        return Ok(None);
    }
    match stripped.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(InvalidAmount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_cells() {
        assert_eq!(clean_cell("  Smith,\n   John "), Some("Smith, John".into()));
        assert_eq!(clean_cell("\u{a0}"), None);
        assert_eq!(clean_cell(""), None);
    }

    #[test]
    fn parses_currency() {
        assert_eq!(parse_amount("$123,456.78"), Ok(Some(123_456.78)));
        assert_eq!(parse_amount("0.50"), Ok(Some(0.5)));
        assert_eq!(parse_amount(" $ "), Ok(None));
        assert_eq!(parse_amount("n/a"), Err(InvalidAmount));
        assert_eq!(parse_amount("NaN"), Err(InvalidAmount));
    }
}
