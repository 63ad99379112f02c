use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ferret_core::Llm;
use ferret_graph::TracingObserver;
use ferret_llm::{OllamaClient, OpenAiCompatibleClient, GEMINI_BASE_URL, OPENAI_BASE_URL};
use ferret_research::{save_report, ResearchAgent, ResearchConfig, ResearchScope};
use ferret_tools::{HttpPageFetcher, TavilySearch};
use secrecy::SecretString;

mod narrator;

use narrator::ConsoleNarrator;

const DEFAULT_QUERY: &str = "Latest advancements in solid-state batteries in 2024";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Provider {
    Ollama,
    Openai,
    Gemini,
}

impl Provider {
    fn default_model(self) -> &'static str {
        match self {
            Provider::Ollama => "llama3.1",
            Provider::Openai => "gpt-4o-mini",
            Provider::Gemini => "gemini-2.0-flash",
        }
    }

    fn default_base_url(self) -> &'static str {
        match self {
            Provider::Ollama => "http://localhost:11434",
            Provider::Openai => OPENAI_BASE_URL,
            Provider::Gemini => GEMINI_BASE_URL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Scope {
    FullPlan,
    Pending,
}

impl From<Scope> for ResearchScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::FullPlan => ResearchScope::FullPlan,
            Scope::Pending => ResearchScope::Pending,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ferret", version, about = "Iterative web research agent")]
struct Args {
    /// Research question
    #[arg(default_value = DEFAULT_QUERY)]
    query: String,

    /// Where the Markdown report is written
    #[arg(short, long, default_value = "research_report.md")]
    output: PathBuf,

    #[arg(long, value_enum, env = "FERRET_PROVIDER", default_value_t = Provider::Gemini)]
    provider: Provider,

    /// Model name; defaults per provider
    #[arg(long, env = "FERRET_MODEL")]
    model: Option<String>,

    /// Endpoint override; defaults per provider
    #[arg(long, env = "FERRET_BASE_URL")]
    base_url: Option<String>,

    /// Planning passes before the report is written regardless of the critic
    #[arg(long, default_value_t = 3)]
    max_iterations: u32,

    /// Sub-questions researched at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    #[arg(long, value_enum, default_value_t = Scope::FullPlan)]
    scope: Scope,

    #[arg(long, env = "FERRET_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true)]
    tavily_api_key: String,
}

fn build_llm(args: &Args) -> Result<Arc<dyn Llm>> {
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| args.provider.default_model().to_string());
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| args.provider.default_base_url().to_string());
    tracing::debug!(provider = ?args.provider, %model, %base_url, "configuring llm");

    let llm: Arc<dyn Llm> = match args.provider {
        Provider::Ollama => Arc::new(OllamaClient::new(base_url, model)?),
        Provider::Openai | Provider::Gemini => {
            let api_key = args
                .api_key
                .clone()
                .context("FERRET_API_KEY must be set for hosted providers")?;
            Arc::new(
                OpenAiCompatibleClient::builder()
                    .base_url(base_url)
                    .api_key(SecretString::new(api_key))
                    .model(model)
                    .build()?,
            )
        }
    };
    Ok(llm)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let llm = build_llm(&args)?;
    let search = TavilySearch::new(SecretString::new(args.tavily_api_key.clone()))?;
    let fetcher = HttpPageFetcher::new()?;

    let config = ResearchConfig::default()
        .with_max_iterations(args.max_iterations)
        .with_concurrency(args.concurrency)
        .with_scope(args.scope.into());
    let agent = ResearchAgent::builder()
        .llm(llm)
        .search(Arc::new(search))
        .fetcher(Arc::new(fetcher))
        .config(config)
        .observer(Arc::new(ConsoleNarrator))
        .observer(Arc::new(TracingObserver))
        .build()?;

    println!("Researching: {}", args.query);
    let state = agent.run(&args.query).await?;

    println!("\n{}\n", "=".repeat(60));
    println!("{}", state.final_report);
    println!("{}", "=".repeat(60));

    save_report(&args.output, &state.final_report)
        .await
        .with_context(|| format!("saving report to {}", args.output.display()))?;
    println!("Report saved to {}", args.output.display());
    Ok(())
}
