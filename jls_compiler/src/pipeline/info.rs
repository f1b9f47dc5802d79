use crate::config::compile_time::file_processing::MAX_FILE_SIZE;
use crate::config::compile_time::syntax::{MAX_STACK_DEPTH, MAX_TRACE_STEPS};
use crate::file_processor::SOURCE_EXTENSIONS;
use crate::grammar::{NonTerminal, ParseTable, Terminal};

/// Pipeline capabilities and limits
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub terminals: usize,
    pub non_terminals: usize,
    /// Filled cells in the parse table, zero if it failed to build
    pub table_entries: usize,
    pub max_file_size: u64,
    pub max_stack_depth: usize,
    pub max_trace_steps: usize,
    pub supported_extensions: Vec<String>,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "Java-subset front end:\n\
             - Pipeline Stages: {}\n\
             - Terminals: {}\n\
             - Non-terminals: {}\n\
             - Parse Table Entries: {}\n\
             - Max File Size: {} MB\n\
             - Max Stack Depth: {}\n\
             - Max Trace Steps: {}\n\
             - Supported Extensions: {}",
            self.pipeline_stages,
            self.terminals,
            self.non_terminals,
            self.table_entries,
            self.max_file_size / (1024 * 1024),
            self.max_stack_depth,
            self.max_trace_steps,
            self.supported_extensions.join(", ")
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage LL(1) front end, {} table entries, extensions: {}",
            self.pipeline_stages,
            self.table_entries,
            self.supported_extensions.join(", ")
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        pipeline_stages: 3,
        terminals: Terminal::ALL.len(),
        non_terminals: NonTerminal::ALL.len(),
        table_entries: ParseTable::standard().map(ParseTable::len).unwrap_or(0),
        max_file_size: MAX_FILE_SIZE,
        max_stack_depth: MAX_STACK_DEPTH,
        max_trace_steps: MAX_TRACE_STEPS,
        supported_extensions: SOURCE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_info() {
        let info = get_pipeline_info();
        assert_eq!(info.terminals, 74);
        assert_eq!(info.non_terminals, 14);
        assert!(info.table_entries > 0);
        assert!(info.report().contains("Supported Extensions: java, txt"));
    }
}
