//! Line parser for the comma delimited catalog source
//!
//! Format: `identifier,title[,prerequisite]*`, no quoting or escaping.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::course::Course;

const DELIMITER: char = ',';

/// Which fields are trimmed before they are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldTrim {
    /// Identifier and title are kept exactly as split; only prerequisites are trimmed.
    #[default]
    Verbatim,
    /// Identifier and title are trimmed too, blank lines are skipped.
    AllFields,
}

/// Parse one source line.
///
/// Returns `None` for a line that contributes no course: an empty line, or
/// with [`FieldTrim::AllFields`] a line holding only whitespace. Missing
/// fields default to empty strings; nothing is rejected here.
pub fn parse_line(line: &str, trim: FieldTrim) -> Option<Course> {
    let skip = match trim {
        FieldTrim::Verbatim => line.is_empty(),
        FieldTrim::AllFields => line.trim().is_empty(),
    };
    if skip {
        return None;
    }

    let mut fields = line.split(DELIMITER);
    let identifier = fields.next().unwrap_or_default();
    let title = fields.next().unwrap_or_default();
    let prerequisites = fields
        .map(|token| token.trim_matches(' '))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect();

    let (identifier, title) = match trim {
        FieldTrim::Verbatim => (identifier, title),
        FieldTrim::AllFields => (identifier.trim(), title.trim()),
    };

    trace!("parsed course {:?} from {:?}", identifier, line);
    Some(Course::new(identifier, title, prerequisites))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_spaced_line_when_verbatim_then_keeps_title_spacing() {
        let line = "CS200, Data Structures, CS100, CS105";
        let course = parse_line(line, FieldTrim::Verbatim).unwrap();
        assert_eq!(course.identifier, "CS200");
        assert_eq!(course.title, " Data Structures");
        assert_eq!(course.prerequisites, vec!["CS100", "CS105"]);
    }

    #[test]
    fn given_spaced_line_when_trimming_all_then_title_is_trimmed() {
        let course = parse_line(" CS200 , Data Structures ,CS100", FieldTrim::AllFields).unwrap();
        assert_eq!(course.identifier, "CS200");
        assert_eq!(course.title, "Data Structures");
        assert_eq!(course.prerequisites, vec!["CS100"]);
    }

    #[rstest]
    #[case(FieldTrim::Verbatim)]
    #[case(FieldTrim::AllFields)]
    fn given_empty_line_when_parsing_then_skipped(#[case] trim: FieldTrim) {
        assert_eq!(parse_line("", trim), None);
    }

    #[test]
    fn given_blank_line_when_verbatim_then_produces_course() {
        let course = parse_line("   ", FieldTrim::Verbatim).unwrap();
        assert_eq!(course.identifier, "   ");
        assert_eq!(parse_line("   ", FieldTrim::AllFields), None);
    }

    #[rstest]
    #[case("CS100", "CS100", "")]
    #[case("CS100,", "CS100", "")]
    #[case(",Orphan Title", "", "Orphan Title")]
    fn given_short_line_when_parsing_then_defaults_to_empty(
        #[case] line: &str,
        #[case] identifier: &str,
        #[case] title: &str,
    ) {
        let course = parse_line(line, FieldTrim::Verbatim).unwrap();
        assert_eq!(course.identifier, identifier);
        assert_eq!(course.title, title);
        assert!(course.prerequisites.is_empty());
    }

    #[test]
    fn given_blank_and_duplicate_prerequisites_when_parsing_then_drops_only_blanks() {
        let course = parse_line("CS300,Algorithms,CS200, ,,CS200 ", FieldTrim::Verbatim).unwrap();
        assert_eq!(course.prerequisites, vec!["CS200", "CS200"]);
    }

    #[test]
    fn given_tab_around_prerequisite_when_parsing_then_only_spaces_are_trimmed() {
        let course = parse_line("CS300,Algorithms,\tCS200", FieldTrim::Verbatim).unwrap();
        assert_eq!(course.prerequisites, vec!["\tCS200"]);
    }
}
