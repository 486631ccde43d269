use std::collections::HashMap;

use crate::domain::{ProcessingResult, RunSummary};

/// Resume-from gate: closed until the marker identifier has been seen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResumeGate {
    Open,
    AwaitingMarker(String),
}

/// Mutable state of a single run, owned by the pipeline controller.
#[derive(Debug)]
pub struct RunContext {
    pub results: HashMap<String, ProcessingResult>,
    /// Successful publishes so far.
    pub published: usize,
    gate: ResumeGate,
}

impl RunContext {
    pub fn new(resume_from: Option<&str>) -> Self {
        let gate = match resume_from {
            Some(marker) => ResumeGate::AwaitingMarker(marker.to_string()),
            None => ResumeGate::Open,
        };

        Self {
            results: HashMap::new(),
            published: 0,
            gate,
        }
    }

    pub fn awaiting_marker(&self) -> bool {
        matches!(self.gate, ResumeGate::AwaitingMarker(_))
    }

    /// Called once per note after it has been evaluated. The marker note
    /// itself is therefore still skipped.
    pub fn observe(&mut self, id: &str) {
        if let ResumeGate::AwaitingMarker(marker) = &self.gate {
            if marker == id {
                self.gate = ResumeGate::Open;
            }
        }
    }

    pub fn limit_reached(&self, limit: Option<usize>) -> bool {
        limit.is_some_and(|limit| self.published >= limit)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results, self.published)
    }
}
