use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;

use ragmark::config::{self, State};
use ragmark::pipeline::RagPipeline;

#[derive(Parser)]
#[command(name = "ragmark")]
#[command(version = "0.1")]
#[command(about = "A minimal in-memory RAG retrieval and scoring engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demo corpus end to end
    Demo,
    /// Ingest text from stdin and answer a question against it
    Ask { question: String },
    /// Print the resolved configuration
    Config,
}

fn demo_command(state: &State) -> Result<()> {
    let knowledge_base = "Antigravity is an AI agent designed by Google Deepmind. \
        It specializes in pair programming and helping users build web applications. \
        The primary goal of Antigravity is to write high-quality, production-ready code. \
        It prefers using Vanilla CSS over Tailwind unless requested. \
        It runs on Windows OS. ";

    let mut rag = RagPipeline::from_state(state);

    println!("[Step 1] Ingesting knowledge base...");
    rag.ingest(knowledge_base);
    println!("Indexed {} chunks.", rag.indexed_chunks());

    let question = "What OS does it run on?";
    println!("\n[Step 2] Asking question: '{}'", question);
    let response = rag.query(question, state.top_k)?;

    println!("\n[Step 3] Retrieval results:");
    println!("{}", response.context);

    println!("\n[Step 4] Simulated answer:");
    println!("{}", response.answer);

    println!("\n[Step 5] Faithfulness score: {:.2}", response.faithfulness);
    println!("(A score closer to 1.0 means the answer is well-supported by the context)");

    Ok(())
}

fn ask_command(state: &State, question: &str) -> Result<()> {
    let mut corpus = String::new();
    std::io::stdin().read_to_string(&mut corpus)?;

    let mut rag = RagPipeline::from_state(state);
    rag.ingest(&corpus);
    config::verbose_print(&format!("Indexed {} chunks from stdin", rag.indexed_chunks()));

    let response = rag.query(question, state.top_k)?;

    let output = serde_json::json!({
        "question": question,
        "indexed_chunks": rag.indexed_chunks(),
        "answer": response.answer,
        "results": response.top_matches,
        "actual_results_count": response.top_matches.len(),
        "requested_results_count": state.top_k,
        "faithfulness": response.faithfulness,
    });

    println!("{}", serde_json::to_string(&output)?);

    Ok(())
}

fn config_command(state: &State) -> Result<()> {
    state.print_config();
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let state = State::new()?;

    match args.command {
        Commands::Demo => demo_command(&state)?,
        Commands::Ask { question } => ask_command(&state, &question)?,
        Commands::Config => config_command(&state)?,
    }
    Ok(())
}
