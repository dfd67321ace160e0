//! Checks which Gemini model names answer with the configured API key.

use std::io::Write;

use clap::Parser;

use coverletter::{
    init_tracing,
    services::{CoverLetterGenerator, GeminiClient},
    Config,
};

const PROBE_PROMPT: &str = "Hello, are you there?";

#[derive(Parser, Debug)]
#[command(name = "probe-models")]
#[command(about = "Send a short prompt to each Gemini model and report which ones respond")]
struct Args {
    /// Model to test; repeat to test several
    #[arg(short, long = "model", default_values = [
        "gemini-1.5-flash",
        "gemini-1.5-flash-latest",
        "gemini-pro",
        "gemini-1.0-pro",
    ])]
    models: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("warn");

    let args = Args::parse();
    let config = Config::from_env()?;

    if config.usable_api_key().is_none() {
        anyhow::bail!("No API key found. Set GEMINI_API_KEY.");
    }

    let client = GeminiClient::from_config(&config)?;

    println!("Checking commonly available models...");

    for model in &args.models {
        print!("Testing {}... ", model);
        std::io::stdout().flush()?;

        match client.with_model(model.as_str()).generate(PROBE_PROMPT).await {
            Ok(text) => println!("OK! (Response: {})", text.trim()),
            Err(e) => println!("FAILED ({})", e.summary()),
        }
    }

    Ok(())
}
