use ferret_graph::{AddCounter, Append, Overwrite, Reducer, StateSchema};
use ferret_tools::SearchResult;
use serde::{Deserialize, Serialize};

/// Finding for one sub-question.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub question: String,
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub sufficient: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Note {
    pub fn failed(question: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            sufficient: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ResearchState {
    pub query: String,
    pub plan: Vec<String>,
    pub notes: Vec<Note>,
    pub iteration: u32,
    pub critique: String,
    pub missing_aspects: Vec<String>,
    pub final_report: String,
    pub should_continue: bool,
    /// Length of the plan prefix covered by the last research pass.
    pub researched_through: usize,
}

impl ResearchState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            should_continue: true,
            ..Default::default()
        }
    }
}

/// Delta produced by one stage. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResearchUpdate {
    pub plan: Option<Vec<String>>,
    /// Appended to the accumulated notes.
    pub notes: Vec<Note>,
    /// Added to the iteration counter.
    pub iteration: u32,
    pub researched_through: Option<usize>,
    pub critique: Option<String>,
    pub missing_aspects: Option<Vec<String>>,
    pub final_report: Option<String>,
    pub should_continue: Option<bool>,
}

fn overwrite<T: Clone>(current: &T, update: Option<T>) -> T {
    match update {
        Some(value) => Overwrite.reduce(current.clone(), value),
        None => current.clone(),
    }
}

impl StateSchema for ResearchState {
    type Update = ResearchUpdate;

    fn apply(current: &Self, update: ResearchUpdate) -> Self {
        ResearchState {
            query: current.query.clone(),
            plan: overwrite(&current.plan, update.plan),
            notes: Append.reduce(current.notes.clone(), update.notes),
            iteration: AddCounter.reduce(current.iteration, update.iteration),
            critique: overwrite(&current.critique, update.critique),
            missing_aspects: overwrite(&current.missing_aspects, update.missing_aspects),
            final_report: overwrite(&current.final_report, update.final_report),
            should_continue: overwrite(&current.should_continue, update.should_continue),
            researched_through: overwrite(&current.researched_through, update.researched_through),
        }
    }
}
