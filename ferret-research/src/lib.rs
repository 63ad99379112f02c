//! The research loop: plan sub-questions, research them, critique the
//! findings, and either plan again or write the report.
//!
//! ```text
//! planner -> researcher -> critic --(continue)--> planner
//!                                 \--(done)-----> writer -> END
//! ```

mod agent;
mod config;
mod critic;
mod error;
mod planner;
mod prompts;
mod report;
mod researcher;
mod state;
mod writer;

pub use agent::{route_after_critique, ResearchAgent, ResearchAgentBuilder, Stage};
pub use config::{ResearchConfig, ResearchScope};
pub use critic::{CriticNode, Verdict};
pub use error::ResearchError;
pub use planner::{PlanOutput, PlannerNode};
pub use report::save_report;
pub use researcher::{Analysis, ResearcherNode};
pub use state::{Note, ResearchState, ResearchUpdate};
pub use writer::WriterNode;
