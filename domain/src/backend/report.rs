//! Text renderings of backend results.

use super::api::{AgentResult, SearchResponse};
use std::fmt::Write;

/// Render search results as a markdown document.
///
/// One section per hit, in the order the backend returned them.
pub fn format_search_results(response: &SearchResponse) -> String {
    let mut out = String::new();
    out.push_str("# Search Results\n\n");
    let _ = writeln!(out, "Query: \"{}\"", response.query);
    let _ = writeln!(out, "Found {} results\n", response.count);
    out.push_str("---\n\n");

    for hit in &response.results {
        let _ = writeln!(out, "## {}\n", hit.file_path);
        let _ = writeln!(
            out,
            "**Lines {}-{}** ({})\n",
            hit.start_line, hit.end_line, hit.node_type
        );
        let _ = writeln!(out, "```{}\n{}\n```\n", hit.language, hit.content);
        out.push_str("---\n\n");
    }

    out
}

/// Lines written to the agent run log after each run.
pub fn format_agent_transcript(goal: &str, result: &AgentResult) -> Vec<String> {
    let mut lines = vec![
        format!("Goal: {}", goal),
        format!("Status: {}", result.status),
        format!("Message: {}", result.message),
    ];

    if let Some(plan) = &result.plan {
        lines.push(String::new());
        lines.push("Plan:".to_string());
        lines.push(serde_json::to_string_pretty(plan).unwrap_or_default());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::api::{AgentPlan, SearchHit};

    fn hit(path: &str, start: u64, end: u64) -> SearchHit {
        SearchHit {
            file_path: path.to_string(),
            start_line: start,
            end_line: end,
            node_type: "function".to_string(),
            language: "ts".to_string(),
            content: "export function f() {}".to_string(),
        }
    }

    #[test]
    fn test_search_document_preserves_backend_order() {
        let response = SearchResponse {
            query: "foo".to_string(),
            count: 2,
            results: vec![hit("b.ts", 10, 20), hit("a.ts", 1, 5)],
        };
        let doc = format_search_results(&response);

        assert!(doc.starts_with("# Search Results\n\n"));
        assert!(doc.contains("Query: \"foo\"\n"));
        assert!(doc.contains("Found 2 results\n"));

        let b = doc.find("## b.ts").unwrap();
        let a = doc.find("## a.ts").unwrap();
        assert!(b < a, "hits must keep backend order");

        let b_lines = doc.find("**Lines 10-20** (function)").unwrap();
        let a_lines = doc.find("**Lines 1-5** (function)").unwrap();
        assert!(b < b_lines && b_lines < a);
        assert!(a < a_lines);
        assert_eq!(doc.matches("```ts\n").count(), 2);
    }

    #[test]
    fn test_search_document_with_no_hits() {
        let doc = format_search_results(&SearchResponse {
            query: "nothing".to_string(),
            count: 0,
            results: vec![],
        });
        assert!(doc.contains("Found 0 results"));
        assert!(!doc.contains("## "));
    }

    #[test]
    fn test_agent_transcript_without_plan() {
        let result = AgentResult {
            status: "failed".to_string(),
            message: "tests did not pass".to_string(),
            iterations: Some(5),
            plan: None,
        };
        let lines = format_agent_transcript("fix bug", &result);
        assert_eq!(
            lines,
            vec![
                "Goal: fix bug".to_string(),
                "Status: failed".to_string(),
                "Message: tests did not pass".to_string(),
            ]
        );
    }

    #[test]
    fn test_agent_transcript_with_plan() {
        let result = AgentResult {
            status: "success".to_string(),
            message: "done".to_string(),
            iterations: Some(1),
            plan: Some(AgentPlan {
                steps: Some(vec![serde_json::json!("edit main.rs")]),
                test_command: Some("cargo test".to_string()),
                ..Default::default()
            }),
        };
        let lines = format_agent_transcript("g", &result);
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Plan:");
        assert!(lines[5].contains("\"test_command\": \"cargo test\""));
        assert!(lines[5].contains("edit main.rs"));
    }
}
