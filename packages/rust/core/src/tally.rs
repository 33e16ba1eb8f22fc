//! Ordered tallies for the count-and-tabulate pipelines.
//!
//! Counts are explicit folds returning immutable results; first-seen order is
//! preserved so output is stable for the same input.

/// Count occurrences of each key, preserving first-seen order.
pub fn tally<I, S>(keys: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts: Vec<(String, u64)> = Vec::new();
    for key in keys {
        let key = key.into();
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

/// Sort tallies by count descending. Stable, so equal counts keep their
/// first-seen order.
pub fn sorted_desc(mut counts: Vec<(String, u64)>) -> Vec<(String, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Render a two-column markdown count table with a right-aligned count column.
pub fn count_table(header: &str, counts: &[(String, u64)]) -> String {
    let mut lines = vec![format!("| {header} | count |"), "|---|---:|".to_string()];
    for (key, n) in counts {
        lines.push(format!("| {key} | {n} |"));
    }
    lines.join("\n")
}

/// Percentage with one decimal place; `0.0%` when the denominator is zero.
pub fn pct(num: f64, den: f64) -> String {
    if den == 0.0 {
        "0.0%".to_string()
    } else {
        format!("{:.1}%", (num / den) * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_in_first_seen_order() {
        let counts = tally(["Bug", "Story", "Bug", "Task", "Bug"]);
        assert_eq!(
            counts,
            vec![
                ("Bug".to_string(), 3),
                ("Story".to_string(), 1),
                ("Task".to_string(), 1),
            ]
        );
    }

    #[test]
    fn sorted_desc_is_stable_for_ties() {
        let counts = tally(["Story", "Task", "Bug", "Bug"]);
        let sorted = sorted_desc(counts);
        assert_eq!(sorted[0].0, "Bug");
        assert_eq!(sorted[1].0, "Story");
        assert_eq!(sorted[2].0, "Task");
    }

    #[test]
    fn count_table_formats_columns() {
        let table = count_table("issue type", &[("Bug".to_string(), 2)]);
        assert_eq!(table, "| issue type | count |\n|---|---:|\n| Bug | 2 |");
    }

    #[test]
    fn pct_handles_zero_denominator() {
        assert_eq!(pct(1.0, 0.0), "0.0%");
        assert_eq!(pct(41.0, 58.0), "70.7%");
    }
}
