//! Whitespace tokenising shared by the reply decoders.

/// Splits a reply line into fields separated by runs of spaces or tabs.
///
/// Leading and trailing separators never produce empty fields.
#[must_use]
pub fn split_fields(line: &str) -> Vec<&str> {
    line.split([' ', '\t'])
        .filter(|field| !field.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1 2 3 4", &["1", "2", "3", "4"])]
    #[case("1  2  3  4", &["1", "2", "3", "4"])]
    #[case("1\t2\t3\t4", &["1", "2", "3", "4"])]
    #[case(" \t1 \t 2\t", &["1", "2"])]
    #[case("1234", &["1234"])]
    #[case("", &[])]
    #[case(" \t ", &[])]
    fn splits_on_whitespace_runs(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(split_fields(line), expected);
    }
}
