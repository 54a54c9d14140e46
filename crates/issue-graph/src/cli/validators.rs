//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Validate issue key format.
///
/// Expected format: `PROJECT-NUMBER` where:
/// - project: starts with a letter, then letters, digits or underscores
/// - number: one or more digits
///
/// Examples: `PROJ-1`, `JRADEV-1107`, `AB_2-42`
pub fn validate_issue_key(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Issue key cannot be empty".to_string());
    }

    let Some((project, number)) = s.split_once('-') else {
        return Err(format!(
            "Invalid issue key format: '{s}'. Expected format: PROJECT-NUMBER (e.g., PROJ-42)"
        ));
    };

    if !project
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
    {
        return Err(format!(
            "Issue key project must start with a letter, got '{project}'"
        ));
    }

    if !project
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(
            "Issue key project must contain only letters, digits and underscores".to_string(),
        );
    }

    if number.is_empty() {
        return Err("Issue key number cannot be empty".to_string());
    }

    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Issue key number must be numeric, got '{number}'"));
    }

    Ok(s.to_string())
}

/// Validate the maximum summary length.
///
/// Must be a positive integer.
pub fn validate_summary_length(s: &str) -> Result<usize, String> {
    let length: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Summary length must be a positive integer, got '{s}'"))?;

    if length == 0 {
        return Err("Summary length must be at least 1".to_string());
    }

    Ok(length)
}
