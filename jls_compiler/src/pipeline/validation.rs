use crate::logging::codes;

/// Check code registry coverage for every stage and the grammar table
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;
    crate::syntax::init_syntax_logging()?;
    crate::syntax::validate_grammar_integration().map_err(|e| e.to_string())?;

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 3
    );

    Ok(())
}
