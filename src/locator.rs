//! Maps a literal token in raw manifest text back to the line it sits on

/// Outcome of a [`locate`] lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationResult {
    /// Line number (1-indexed) of the first match
    Found { line: usize },
    NotFound,
}

impl LocationResult {
    pub fn line(&self) -> Option<usize> {
        match self {
            LocationResult::Found { line } => Some(*line),
            LocationResult::NotFound => None,
        }
    }
}

/// How a dependency declaration is looked up in the manifest text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupStrategy {
    /// First occurrence anywhere in the document.
    /// A name declared in several groups always resolves to the earliest one.
    #[default]
    FirstMatch,
    /// First occurrence after the group's own key, falling back to `FirstMatch`
    SectionScoped,
}

/// Wraps a dependency name in double quotes, the way it appears as a JSON key
pub fn quoted(name: &str) -> String {
    format!("\"{}\"", name)
}

/// Find the line of the first occurrence of `token` in `document`.
///
/// Exact substring search, no pattern semantics. The line is the number of
/// `\n` characters before the match start, plus one. `token` must not be empty.
pub fn locate(token: &str, document: &str) -> LocationResult {
    match document.find(token) {
        Some(offset) => LocationResult::Found {
            line: line_at(document, offset),
        },
        None => LocationResult::NotFound,
    }
}

/// Like [`locate`], but only considers matches after the first occurrence of
/// `section` (itself a literal token such as `"devDependencies"`).
pub fn locate_in_section(section: &str, token: &str, document: &str) -> LocationResult {
    let Some(section_start) = document.find(section) else {
        return locate(token, document);
    };

    let search_from = section_start + section.len();
    match document[search_from..].find(token) {
        Some(relative) => LocationResult::Found {
            line: line_at(document, search_from + relative),
        },
        None => locate(token, document),
    }
}

fn line_at(document: &str, offset: usize) -> usize {
    document.as_bytes()[..offset]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "{\n  \"name\": \"pkg\",\n  \"dependencies\": {\n    \"left-pad\": \"^1.0.0\"\n  }\n}",
        "\"left-pad\"",
        LocationResult::Found { line: 4 }
    )]
    #[case("{\"a\":1}", "\"missing\"", LocationResult::NotFound)]
    #[case("\"x\"\n\"x\"\n", "\"x\"", LocationResult::Found { line: 1 })]
    #[case("", "\"x\"", LocationResult::NotFound)]
    #[case("\"x\"", "\"x\"", LocationResult::Found { line: 1 })]
    #[case("a\n\n\n\"x\"", "\"x\"", LocationResult::Found { line: 4 })]
    #[case("\"x\"\n", "\"x\"", LocationResult::Found { line: 1 })]
    fn locate_returns_expected(
        #[case] document: &str,
        #[case] token: &str,
        #[case] expected: LocationResult,
    ) {
        assert_eq!(locate(token, document), expected);
    }

    #[test]
    fn locate_treats_token_literally() {
        // `.` would match anything as a regex
        assert_eq!(
            locate("\"a.b\"", "\"axb\"\n\"a.b\""),
            LocationResult::Found { line: 2 }
        );
    }

    #[test]
    fn locate_requires_quotes_to_match() {
        let document = "{\n  \"dependencies\": {\n    \"react-dom\": \"^18.0.0\",\n    \"react\": \"^18.0.0\"\n  }\n}";

        assert_eq!(
            locate(&quoted("react"), document),
            LocationResult::Found { line: 4 }
        );
    }

    #[test]
    fn locate_counts_lines_after_multibyte_text() {
        let document = "{\n  \"description\": \"日本語 ✓\",\n  \"dependencies\": {\n    \"x\": \"1\"\n  }\n}";

        assert_eq!(locate("\"x\"", document), LocationResult::Found { line: 4 });
    }

    #[test]
    fn locate_in_section_skips_matches_before_section() {
        let document = r#"{
  "dependencies": {
    "chai": "^1.0.0"
  },
  "devDependencies": {
    "chai": "^1.0.0"
  }
}"#;

        assert_eq!(locate("\"chai\"", document), LocationResult::Found { line: 3 });
        assert_eq!(
            locate_in_section("\"devDependencies\"", "\"chai\"", document),
            LocationResult::Found { line: 6 }
        );
    }

    #[rstest]
    #[case::missing_section("{\n  \"x\": 1\n}", LocationResult::Found { line: 2 })]
    #[case::token_only_before_section(
        "{\n  \"x\": 1,\n  \"devDependencies\": {}\n}",
        LocationResult::Found { line: 2 }
    )]
    #[case::token_absent("{\n  \"devDependencies\": {}\n}", LocationResult::NotFound)]
    fn locate_in_section_falls_back_to_first_match(
        #[case] document: &str,
        #[case] expected: LocationResult,
    ) {
        assert_eq!(
            locate_in_section("\"devDependencies\"", "\"x\"", document),
            expected
        );
    }

    #[test]
    fn line_returns_found_line() {
        assert_eq!(LocationResult::Found { line: 7 }.line(), Some(7));
        assert_eq!(LocationResult::NotFound.line(), None);
    }

    proptest! {
        #[test]
        fn found_line_counts_preceding_newlines(
            prefix in "[a-z\n ]{0,40}",
            suffix in "[a-z\n ]{0,40}",
        ) {
            let document = format!("{}\"dep\"{}", prefix, suffix);
            let expected = prefix.matches('\n').count() + 1;

            prop_assert_eq!(locate("\"dep\"", &document), LocationResult::Found { line: expected });
        }

        #[test]
        fn absent_token_is_not_found(document in "[a-z\n {}:,]{0,80}") {
            prop_assert_eq!(locate("\"dep\"", &document), LocationResult::NotFound);
        }

        #[test]
        fn first_occurrence_wins(
            prefix in "[a-z\n ]{0,20}",
            middle in "[a-z\n ]{0,20}",
        ) {
            let document = format!("{}\"dep\"{}\n\"dep\"", prefix, middle);
            let expected = prefix.matches('\n').count() + 1;

            prop_assert_eq!(locate("\"dep\"", &document), LocationResult::Found { line: expected });
        }

        #[test]
        fn found_line_is_within_document(document in "[a-z\n\" ]{0,80}") {
            if let LocationResult::Found { line } = locate("\"", &document) {
                let lines: Vec<&str> = document.split('\n').collect();
                prop_assert!(line >= 1 && line <= lines.len());
                prop_assert!(lines[line - 1].contains('"'));
            }
        }

        #[test]
        fn repeated_calls_agree(document in "[a-z\n\" ]{0,80}") {
            prop_assert_eq!(locate("\"a\"", &document), locate("\"a\"", &document));
        }
    }
}
