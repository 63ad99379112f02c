use crate::ResearchError;

/// Which plan entries a research pass covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResearchScope {
    /// Every entry of the plan, including ones researched in earlier passes.
    #[default]
    FullPlan,
    /// Only the entries added since the previous research pass.
    Pending,
}

#[derive(Clone, Debug)]
pub struct ResearchConfig {
    /// Hard cap on planning passes; the critic approves unconditionally once reached.
    pub max_iterations: u32,
    pub max_initial_questions: usize,
    pub max_followup_questions: usize,
    pub max_search_results: usize,
    /// Characters of fetched page text kept in a note.
    pub scrape_char_limit: usize,
    /// Characters of fetched page text shown to the writer.
    pub excerpt_char_limit: usize,
    pub scope: ResearchScope,
    /// Sub-questions researched at once. Notes keep plan order regardless.
    pub concurrency: usize,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            max_initial_questions: 5,
            max_followup_questions: 3,
            max_search_results: 3,
            scrape_char_limit: 2000,
            excerpt_char_limit: 500,
            scope: ResearchScope::FullPlan,
            concurrency: 1,
        }
    }
}

impl ResearchConfig {
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_scope(mut self, scope: ResearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Node executions needed by the longest legal run: three per planning
    /// pass plus the writer.
    pub fn max_steps(&self) -> usize {
        3 * self.max_iterations as usize + 1
    }

    pub fn validate(&self) -> Result<(), ResearchError> {
        let positive = [
            ("max_iterations", self.max_iterations as usize),
            ("max_initial_questions", self.max_initial_questions),
            ("max_followup_questions", self.max_followup_questions),
            ("max_search_results", self.max_search_results),
            ("concurrency", self.concurrency),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ResearchError::InvalidConfig(format!(
                    "{name} must be at least 1"
                )));
            }
        }
        Ok(())
    }
}
