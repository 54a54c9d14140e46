//! Duplicate statement removal.
//!
//! Duplicates are judged by rendered text only. Two statements that print
//! identically collapse into one even when they were produced by different
//! links; the earliest occurrence survives.

use super::statement::GraphStatement;

/// Remove statements whose rendered text repeats an earlier statement.
///
/// The survivors keep their original relative order. Applying this twice
/// yields the same result as applying it once.
pub fn dedup_statements(statements: Vec<GraphStatement>) -> Vec<GraphStatement> {
    let mut keyed: Vec<(usize, String, GraphStatement)> = statements
        .into_iter()
        .enumerate()
        .map(|(index, statement)| (index, statement.to_string(), statement))
        .collect();

    // Stable sort: among equal texts the earliest index comes first.
    keyed.sort_by(|a, b| a.1.cmp(&b.1));
    keyed.dedup_by(|later, earlier| later.1 == earlier.1);
    keyed.sort_by_key(|(index, _, _)| *index);

    keyed
        .into_iter()
        .map(|(_, _, statement)| statement)
        .collect()
}
