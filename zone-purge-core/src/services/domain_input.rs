//! Raw user input -> ordered domain list.

use std::collections::HashSet;

/// Split free text into domains: one per line, trimmed, blanks dropped,
/// duplicates removed keeping the first occurrence.
///
/// Idempotent: parsing the newline-joined output yields the same list.
pub fn parse_domains(text: &str) -> Vec<String> {
    normalize_domains(text.lines())
}

/// Trim, drop blanks and de-duplicate an already split list.
///
/// Matching is on the exact trimmed string, so `Example.com` and
/// `example.com` are kept as two entries.
pub fn normalize_domains<I, S>(domains: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    domains
        .into_iter()
        .filter_map(|raw| {
            let domain = raw.as_ref().trim();
            (!domain.is_empty() && seen.insert(domain.to_string())).then(|| domain.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_drops_blanks_and_dedupes() {
        let parsed = parse_domains("a.com\n\n  b.com \na.com\n");
        assert_eq!(parsed, ["a.com", "b.com"]);
    }

    #[test]
    fn windows_line_endings() {
        assert_eq!(parse_domains("a.com\r\nb.com\r\n"), ["a.com", "b.com"]);
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert!(parse_domains("").is_empty());
        assert!(parse_domains("  \n\t\n").is_empty());
    }

    #[test]
    fn keeps_first_occurrence_order() {
        let parsed = parse_domains("c.com\nb.com\nc.com\na.com\nb.com");
        assert_eq!(parsed, ["c.com", "b.com", "a.com"]);
    }

    #[test]
    fn case_variants_are_distinct() {
        assert_eq!(
            parse_domains("Example.com\nexample.com"),
            ["Example.com", "example.com"]
        );
    }

    #[test]
    fn parse_is_idempotent() {
        let inputs = [
            "a.com\n\n  b.com \na.com\n",
            " x.org\ty.org \n x.org",
            "\n\n",
            "one.net",
        ];
        for input in inputs {
            let once = parse_domains(input);
            let twice = parse_domains(&once.join("\n"));
            assert_eq!(once, twice, "input: {input:?}");
        }
    }
}
