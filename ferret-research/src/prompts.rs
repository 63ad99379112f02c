use ferret_core::FerretError;
use ferret_prompt::PromptTemplate;

const INITIAL_PLAN: &str = r#"You are a research planner. Break down this query into {{min}}-{{max}} specific, researchable sub-questions. Make them concrete and answerable.

Query: {{query}}

Return ONLY JSON of the form {"questions": ["question 1", "question 2"]}"#;

const FOLLOW_UP_PLAN: &str = r#"You are a research planner. The previous research was incomplete.

Original Query: {{query}}
Critique: {{critique}}
Missing Aspects: {{missing_aspects}}

Create {{min}}-{{max}} additional specific sub-questions to address the gaps.
Return ONLY JSON of the form {"questions": ["question 1", "question 2"]}"#;

const ANALYSIS: &str = r#"Analyze these search results for the question: "{{question}}"

Search Results:
{{search_results}}

Respond with JSON:
{
    "sufficient": true/false,
    "summary": "brief summary of findings",
    "needs_scraping": true/false,
    "url_to_scrape": "url if needs scraping, else null"
}"#;

const CRITIQUE: &str = r#"You are a research quality critic. Evaluate if the gathered research adequately answers the original query.

Original Query: {{query}}
Iteration: {{iteration}}

Research Gathered:
{{notes}}

Respond with JSON:
{
    "is_complete": true/false,
    "feedback": "specific gaps or 'Research is complete'",
    "missing_aspects": ["aspect 1", "aspect 2"] or []
}

Be strict but fair. After {{max_iterations}} iterations, be more lenient."#;

const REPORT: &str = r#"You are a research writer. Create a comprehensive, well-structured Markdown report.

Original Query: {{query}}

Research Gathered:
{{research}}

Write a professional report with:
1. Executive Summary
2. Key Findings (organized by theme)
3. Detailed Analysis
4. Citations (include URLs from sources)
5. Conclusion

Use proper Markdown formatting."#;

pub(crate) fn initial_plan(query: &str, max: usize) -> Result<String, FerretError> {
    let min = max.min(3).to_string();
    PromptTemplate::new(INITIAL_PLAN).render_with(&[
        ("query", query),
        ("min", &min),
        ("max", &max.to_string()),
    ])
}

pub(crate) fn follow_up_plan(
    query: &str,
    critique: &str,
    missing_aspects: &[String],
    max: usize,
) -> Result<String, FerretError> {
    let min = max.min(2).to_string();
    let critique = if critique.trim().is_empty() {
        "no feedback given"
    } else {
        critique
    };
    let missing = if missing_aspects.is_empty() {
        "none listed".to_string()
    } else {
        missing_aspects.join("; ")
    };
    PromptTemplate::new(FOLLOW_UP_PLAN).render_with(&[
        ("query", query),
        ("critique", critique),
        ("missing_aspects", &missing),
        ("min", &min),
        ("max", &max.to_string()),
    ])
}

pub(crate) fn analysis(question: &str, search_results: &str) -> Result<String, FerretError> {
    PromptTemplate::new(ANALYSIS)
        .render_with(&[("question", question), ("search_results", search_results)])
}

pub(crate) fn critique(
    query: &str,
    iteration: u32,
    max_iterations: u32,
    notes: &str,
) -> Result<String, FerretError> {
    PromptTemplate::new(CRITIQUE).render_with(&[
        ("query", query),
        ("iteration", &iteration.to_string()),
        ("max_iterations", &max_iterations.to_string()),
        ("notes", notes),
    ])
}

pub(crate) fn report(query: &str, research: &str) -> Result<String, FerretError> {
    PromptTemplate::new(REPORT).render_with(&[("query", query), ("research", research)])
}
