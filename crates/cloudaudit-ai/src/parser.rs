use cloudaudit_core::{AnalysisReport, Issue};
use tracing::debug;

const SUMMARY_MARKER: &str = "[SUMMARY]";
const ISSUES_MARKER: &str = "[ISSUES]";
const CONCLUSION_MARKER: &str = "[CONCLUSION]";
const BLOCK_DELIMITER: &str = "---";

/// Region of the model reply the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Summary,
    Issues,
    Conclusion,
}

/// Recovers a structured report from the model's free-text reply.
///
/// The reply format is requested, not guaranteed, so this is a maximally
/// permissive line scanner: text before the first marker is dropped, lines
/// without a known field prefix are dropped, and missing sections fall back
/// to the sentinel values from `cloudaudit_core::report`. The function is
/// total; malformed input degrades to a defaulted report, never to an error.
///
/// Section semantics: a later `[SUMMARY]` overwrites an earlier one, every
/// `[ISSUES]` section appends its blocks in order of appearance, and a later
/// `[CONCLUSION]` replaces the earlier recommendation list outright.
pub fn parse_analysis(text: &str) -> AnalysisReport {
    let mut report = AnalysisReport::default();
    let mut section = Section::None;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        let mut rest = line;
        // Markers are honored anywhere in a line, in positional order.
        while let Some((before, next, after)) = next_marker(rest) {
            if !before.is_empty() {
                buffer.push(before);
            }
            flush_section(&mut report, section, &buffer);
            buffer.clear();
            section = next;
            rest = after;
        }
        buffer.push(rest);
    }
    flush_section(&mut report, section, &buffer);

    if report.issues.is_empty() || report.recommendations.is_empty() {
        debug!("Model reply missing sections; falling back to defaults");
    }
    report.fill_defaults();
    report
}

/// Finds the earliest section marker in `s`, returning the text before it,
/// the section it opens, and the text after it.
fn next_marker(s: &str) -> Option<(&str, Section, &str)> {
    let markers = [
        (SUMMARY_MARKER, Section::Summary),
        (ISSUES_MARKER, Section::Issues),
        (CONCLUSION_MARKER, Section::Conclusion),
    ];

    let mut best: Option<(usize, &str, Section)> = None;
    for (marker, section) in markers {
        if let Some(pos) = s.find(marker) {
            if best.map_or(true, |(best_pos, _, _)| pos < best_pos) {
                best = Some((pos, marker, section));
            }
        }
    }

    best.map(|(pos, marker, section)| (&s[..pos], section, &s[pos + marker.len()..]))
}

fn flush_section(report: &mut AnalysisReport, section: Section, lines: &[&str]) {
    match section {
        Section::None => {}
        // Assigned even when empty: a present-but-empty summary section
        // deliberately yields "" rather than the sentinel.
        Section::Summary => report.summary = lines.join("\n").trim().to_string(),
        Section::Issues => report.issues.extend(parse_issue_blocks(lines)),
        Section::Conclusion => {
            report.recommendations = lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();
        }
    }
}

fn parse_issue_blocks(lines: &[&str]) -> Vec<Issue> {
    lines
        .split(|line| line.trim() == BLOCK_DELIMITER)
        .filter_map(parse_issue_block)
        .collect()
}

/// Parses one `---`-delimited block. Field prefixes are tested in fixed
/// priority order; the value is everything after the prefix's colon, trimmed.
/// Returns `None` when no labeled line was present at all.
fn parse_issue_block(lines: &[&str]) -> Option<Issue> {
    let mut issue = Issue::default();
    let mut matched = false;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(value) = line.strip_prefix("Issue:") {
            issue.title = value.trim().to_string();
            matched = true;
        } else if let Some(value) = line.strip_prefix("Severity:") {
            issue.severity = value.trim().to_uppercase();
            matched = true;
        } else if let Some(value) = line.strip_prefix("Description:") {
            issue.description = value.trim().to_string();
            matched = true;
        } else if let Some(value) = line.strip_prefix("Recommendation:") {
            issue.recommendation = value.trim().to_string();
            matched = true;
        }
        // Anything else is model chatter; drop it.
    }

    matched.then_some(issue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudaudit_core::{DEFAULT_RECOMMENDATION, DEFAULT_SUMMARY};

    #[test]
    fn well_formed_reply_recovers_every_field() {
        let text = "[SUMMARY]\nAll good.\n[ISSUES]\nIssue: Open port\nSeverity: high\nDescription: Port 22 exposed\nRecommendation: Restrict ingress\n[CONCLUSION]\nReview firewall rules";
        let report = parse_analysis(text);

        assert_eq!(report.summary, "All good.");
        assert_eq!(
            report.issues,
            vec![Issue {
                title: "Open port".into(),
                severity: "HIGH".into(),
                description: "Port 22 exposed".into(),
                recommendation: "Restrict ingress".into(),
            }]
        );
        assert_eq!(report.recommendations, vec!["Review firewall rules".to_string()]);
    }

    #[test]
    fn empty_input_yields_fully_defaulted_report() {
        let report = parse_analysis("");
        assert_eq!(report.summary, DEFAULT_SUMMARY);
        assert_eq!(report.issues, vec![Issue::no_issues_found()]);
        assert_eq!(report.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn missing_summary_marker_keeps_sentinel() {
        let report = parse_analysis("[ISSUES]\nIssue: Something\n[CONCLUSION]\nDo better");
        assert_eq!(report.summary, DEFAULT_SUMMARY);
        assert_eq!(report.issues[0].title, "Something");
    }

    #[test]
    fn missing_issues_section_yields_synthetic_record() {
        let report = parse_analysis("[SUMMARY]\nLooks fine.\n[CONCLUSION]\nKeep patching");
        assert_eq!(report.issues, vec![Issue::no_issues_found()]);
    }

    #[test]
    fn blank_issue_blocks_yield_synthetic_record() {
        let report = parse_analysis("[SUMMARY]\nFine.\n[ISSUES]\n\n---\n\n---\n\n");
        assert_eq!(report.issues, vec![Issue::no_issues_found()]);
    }

    #[test]
    fn missing_conclusion_yields_default_recommendation() {
        let report = parse_analysis("[SUMMARY]\nFine.\n[ISSUES]\nIssue: x");
        assert_eq!(report.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "[SUMMARY]\nMixed posture.\n[ISSUES]\nIssue: a\n---\nIssue: b\n[CONCLUSION]\nfix a\nfix b";
        assert_eq!(parse_analysis(text), parse_analysis(text));
    }

    #[test]
    fn severity_is_upper_cased() {
        for raw in ["low", "Low", "LOW"] {
            let text = format!("[ISSUES]\nIssue: x\nSeverity: {raw}");
            let report = parse_analysis(&text);
            assert_eq!(report.issues[0].severity, "LOW", "input {raw:?}");
        }
    }

    #[test]
    fn unexpected_severity_token_is_stored_verbatim_upper_cased() {
        let report = parse_analysis("[ISSUES]\nIssue: x\nSeverity: critical");
        assert_eq!(report.issues[0].severity, "CRITICAL");
    }

    #[test]
    fn multiple_blocks_keep_order_of_appearance() {
        let text = "[ISSUES]\nIssue: first\n---\nIssue: second\n---\nIssue: third";
        let report = parse_analysis(text);
        let titles: Vec<_> = report.issues.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn unlabeled_lines_inside_a_block_are_dropped() {
        let text = "[ISSUES]\nSure, here are the findings:\nIssue: Weak password policy\nnote to self\nDescription: No rotation configured";
        let report = parse_analysis(text);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].title, "Weak password policy");
        assert_eq!(report.issues[0].description, "No rotation configured");
    }

    #[test]
    fn block_without_any_labeled_line_is_dropped() {
        let text = "[ISSUES]\njust chatter\n---\nIssue: real finding";
        let report = parse_analysis(text);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].title, "real finding");
    }

    #[test]
    fn field_value_keeps_text_after_later_colons() {
        let text = "[ISSUES]\nIssue: Open port: SSH\nDescription: listens on 0.0.0.0:22";
        let report = parse_analysis(text);
        assert_eq!(report.issues[0].title, "Open port: SSH");
        assert_eq!(report.issues[0].description, "listens on 0.0.0.0:22");
    }

    #[test]
    fn unlabeled_block_fields_fall_back_to_defaults() {
        let report = parse_analysis("[ISSUES]\nDescription: only a description");
        let issue = &report.issues[0];
        assert_eq!(issue.title, "Unnamed Issue");
        assert_eq!(issue.severity, "MEDIUM");
        assert_eq!(issue.description, "only a description");
        assert_eq!(issue.recommendation, "");
    }

    #[test]
    fn later_summary_overwrites_earlier_one() {
        let report = parse_analysis("[SUMMARY]\nfirst\n[SUMMARY]\nsecond");
        assert_eq!(report.summary, "second");
    }

    #[test]
    fn present_but_empty_summary_is_empty_string() {
        let report = parse_analysis("[SUMMARY]\n[ISSUES]\nIssue: x");
        assert_eq!(report.summary, "");
    }

    #[test]
    fn multi_line_summary_preserves_interior_structure() {
        let report = parse_analysis("[SUMMARY]\nfirst line\n\nsecond paragraph\n[ISSUES]\n");
        assert_eq!(report.summary, "first line\n\nsecond paragraph");
    }

    #[test]
    fn later_conclusion_replaces_earlier_one() {
        let report = parse_analysis("[CONCLUSION]\nold advice\n[CONCLUSION]\nnew advice");
        assert_eq!(report.recommendations, vec!["new advice".to_string()]);
    }

    #[test]
    fn empty_trailing_conclusion_resets_to_default() {
        let report = parse_analysis("[CONCLUSION]\nsolid advice\n[CONCLUSION]\n\n");
        assert_eq!(report.recommendations, vec![DEFAULT_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn conclusion_lines_are_trimmed_and_blank_lines_skipped() {
        let report = parse_analysis("[CONCLUSION]\n  rotate keys  \n\n   enable mfa\n");
        assert_eq!(
            report.recommendations,
            vec!["rotate keys".to_string(), "enable mfa".to_string()]
        );
    }

    #[test]
    fn preamble_before_first_marker_is_ignored() {
        let text = "Sure! Here is the analysis you requested:\n[SUMMARY]\nFine.";
        let report = parse_analysis(text);
        assert_eq!(report.summary, "Fine.");
    }

    #[test]
    fn marker_mid_line_splits_content_positionally() {
        let report = parse_analysis("[SUMMARY] All good. [ISSUES]\nIssue: x");
        assert_eq!(report.summary, "All good.");
        assert_eq!(report.issues[0].title, "x");
    }

    #[test]
    fn stray_brackets_do_not_sever_a_section() {
        let report = parse_analysis("[SUMMARY]\ngood [mostly] config\n[ISSUES]\n");
        assert_eq!(report.summary, "good [mostly] config");
    }

    #[test]
    fn severity_only_block_is_kept() {
        let report = parse_analysis("[ISSUES]\nSeverity: high");
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].title, "Unnamed Issue");
        assert_eq!(report.issues[0].severity, "HIGH");
    }

    #[test]
    fn crlf_input_parses_like_lf_input() {
        let lf = "[SUMMARY]\nFine.\n[ISSUES]\nIssue: x\n[CONCLUSION]\ndo y";
        let crlf = lf.replace('\n', "\r\n");
        assert_eq!(parse_analysis(lf), parse_analysis(&crlf));
    }

    #[test]
    fn delimiter_requires_its_own_line() {
        let text = "[ISSUES]\nIssue: dashes --- in a title\nDescription: kept whole";
        let report = parse_analysis(text);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].title, "dashes --- in a title");
    }
}
