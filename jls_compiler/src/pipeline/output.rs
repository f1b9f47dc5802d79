use crate::lexical::{LexicalError, LexicalMetrics};
use crate::pipeline::PipelineResult;
use crate::symbols::IdentifierTable;
use crate::syntax::{AppliedProduction, ParseTrace};
use crate::tokens::Token;
use serde::Serialize;

/// Machine-readable report for one input
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub file: String,
    pub accepted: bool,
    pub tokens: Vec<Token>,
    pub identifiers: IdentifierTable,
    pub lexical_errors: Vec<LexicalError>,
    pub metrics: LexicalMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_error: Option<SyntaxErrorReport>,
    pub productions_applied: usize,
    pub productions: Vec<AppliedProduction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<ParseTrace>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyntaxErrorReport {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl PipelineOutput {
    pub fn from_result(result: &PipelineResult, include_trace: bool) -> Self {
        let syntax_error = result.parse.error().map(|error| SyntaxErrorReport {
            code: error.error_code().as_str().to_string(),
            message: error.to_string(),
            line: error.line(),
            position: error.position(),
        });

        Self {
            file: result.file_metadata.path.display().to_string(),
            accepted: result.accepted(),
            tokens: result.scan.tokens.tokens().to_vec(),
            identifiers: result.scan.identifiers.clone(),
            lexical_errors: result.scan.errors.clone(),
            metrics: result.scan.metrics.clone(),
            syntax_error,
            productions_applied: result.parse.productions.len(),
            productions: result.parse.productions.clone(),
            trace: include_trace.then(|| result.parse.trace.clone()),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process_source;

    #[test]
    fn test_output_for_rejection() {
        let result = process_source("int x = 1", "inline");
        let output = PipelineOutput::from_result(&result, false);

        assert!(!output.accepted);
        assert_eq!(output.tokens.len(), 4);
        assert!(output.trace.is_none());

        let json: serde_json::Value =
            serde_json::from_str(&output.to_json().unwrap()).unwrap();
        assert_eq!(json["syntax_error"]["code"], "E040");
        assert_eq!(json["syntax_error"]["line"], 1);
        assert_eq!(json["tokens"][0]["category"], "int");
        assert_eq!(json["tokens"][1]["kind"], "IDENTIFIER");
        assert!(json["identifiers"].get("x").is_some());
    }

    #[test]
    fn test_output_with_trace() {
        let result = process_source("break;", "inline");
        let output = PipelineOutput::from_result(&result, true);

        assert!(output.accepted);
        assert!(output.syntax_error.is_none());
        assert_eq!(output.productions_applied, 4);

        let json = serde_json::to_value(&output).unwrap();
        assert!(json.get("syntax_error").is_none());
        assert_eq!(json["trace"]["steps"][0]["action"], "expand");
        assert_eq!(json["productions"][2]["non_terminal"], "C");
    }
}
