//! Command-line client for a running predict proxy.
//!
//! Posts one prompt to `/predict` and prints the generated text; on a
//! non-2xx answer prints the status and body to stderr and exits with 1.

use clap::Parser;
use predict_proxy::http::{ApiResponse, PromptRequest};

#[derive(Parser)]
#[command(name = "predict-cli")]
#[command(about = "Send a prompt to a running predict proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Maximum tokens to generate (0 = backend default)
    #[arg(short, long, default_value_t = 0)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(short, long, default_value_t = 0.0)]
    temperature: f64,

    /// Prompt text
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let request = PromptRequest {
        prompt: cli.prompt,
        max_tokens: cli.max_tokens,
        temperature: cli.temperature,
    };

    let res = client
        .post(format!("{}/predict", cli.url.trim_end_matches('/')))
        .json(&request)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text.trim_end());
        }
        std::process::exit(1);
    }

    let body: ApiResponse = res.json().await?;
    println!("{}", body.generated);
    Ok(())
}
