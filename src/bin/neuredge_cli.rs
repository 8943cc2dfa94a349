//! neuredge-cli: Neuredge 平台命令行工具
//!
//! Usage:
//!   neuredge-cli summarize <text>                       Summarize text
//!   neuredge-cli translate <text> --to <lang>           Translate text
//!   neuredge-cli sentiment <text>                       Analyze sentiment
//!   neuredge-cli chat <prompt> [--stream]               Chat completion
//!   neuredge-cli embed <text>                           Create an embedding
//!   neuredge-cli indexes                                List vector indexes
//!   neuredge-cli image <prompt> [--out <file>]          Generate an image

use anyhow::{anyhow, bail, Context};
use futures::StreamExt;
use neuredge_sdk::image::{ImageGenerationMode, ImageOptions};
use neuredge_sdk::openai::{ChatCompletionRequest, ChatMessage, EmbeddingRequest};
use neuredge_sdk::text::LanguageCode;
use neuredge_sdk::{ClientConfig, NeuredgeClient};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let rest = &args[2..];
    let result = match args[1].as_str() {
        "summarize" => cmd_summarize(rest).await,
        "translate" => cmd_translate(rest).await,
        "sentiment" => cmd_sentiment(rest).await,
        "chat" => cmd_chat(rest).await,
        "embed" => cmd_embed(rest).await,
        "indexes" => cmd_indexes(rest).await,
        "image" => cmd_image(rest).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"neuredge-cli: Neuredge 命令行工具

USAGE:
    neuredge-cli <COMMAND> [OPTIONS]

COMMANDS:
    summarize <text>                      Summarize text
    translate <text> --to <lang> [--from <lang>]
                                          Translate text (en es fr de it pt ru zh ja ko)
    sentiment <text>                      Analyze sentiment
    chat <prompt> [--model <m>] [--stream]
                                          OpenAI-compatible chat completion
    embed <text> [--model <m>]            Create an embedding
    indexes                               List vector indexes
    image <prompt> [--out <file>] [--fast]
                                          Generate an image
    version                               Show version information
    help                                  Show this help message

GLOBAL OPTIONS:
    --config <file>                       Load client settings from YAML

ENVIRONMENT:
    NEUREDGE_API_KEY                      API key (after the OS keyring)
    NEUREDGE_BASE_URL                     API base URL
    NEUREDGE_MAX_RETRIES                  Attempts per request
    NEUREDGE_RETRY_DELAY_SECS             Base backoff in seconds
    NEUREDGE_HTTP_TIMEOUT_SECS            Per-attempt timeout
    NEUREDGE_PROXY_URL                    HTTP(S) proxy
    RUST_LOG                              Log filter, e.g. neuredge_sdk=debug"#
    );
}

fn cmd_version() {
    println!("neuredge-cli {}", env!("CARGO_PKG_VERSION"));
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<&str> {
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg.starts_with("--") {
            skip = matches!(arg.as_str(), "--to" | "--from" | "--model" | "--out" | "--config");
            continue;
        }
        return Some(arg);
    }
    None
}

fn required_text<'a>(args: &'a [String], what: &str) -> anyhow::Result<&'a str> {
    positional(args).ok_or_else(|| anyhow!("missing <{what}> argument"))
}

fn build_client(args: &[String]) -> anyhow::Result<NeuredgeClient> {
    let client = match flag_value(args, "--config") {
        Some(path) => NeuredgeClient::from_config(ClientConfig::from_yaml_file(path)?)?,
        None => NeuredgeClient::builder().build()?,
    };
    Ok(client)
}

async fn cmd_summarize(args: &[String]) -> anyhow::Result<()> {
    let text = required_text(args, "text")?;
    let client = build_client(args)?;
    println!("{}", client.text().summarize(text).await?);
    Ok(())
}

async fn cmd_translate(args: &[String]) -> anyhow::Result<()> {
    let text = required_text(args, "text")?;
    let target: LanguageCode = flag_value(args, "--to")
        .ok_or_else(|| anyhow!("missing --to <lang>"))?
        .parse()?;
    let source = flag_value(args, "--from")
        .map(str::parse::<LanguageCode>)
        .transpose()?;
    let client = build_client(args)?;
    println!("{}", client.text().translate(text, target, source).await?);
    Ok(())
}

async fn cmd_sentiment(args: &[String]) -> anyhow::Result<()> {
    let text = required_text(args, "text")?;
    let client = build_client(args)?;
    let result = client.text().analyze_sentiment(text).await?;
    println!("{:?} ({:.2})", result.sentiment, result.confidence);
    Ok(())
}

async fn cmd_chat(args: &[String]) -> anyhow::Result<()> {
    let prompt = required_text(args, "prompt")?;
    let client = build_client(args)?;
    let mut request = ChatCompletionRequest::new(vec![ChatMessage::user(prompt)]);
    if let Some(model) = flag_value(args, "--model") {
        request = request.with_model(model);
    }

    if !has_flag(args, "--stream") {
        let completion = client.openai().chat().create(&request).await?;
        println!("{}", completion.content().unwrap_or_default());
        return Ok(());
    }

    let mut stream = client.openai().chat().create_stream(&request).await?;
    let mut stdout = std::io::stdout();
    while let Some(chunk) = stream.next().await {
        if let Some(content) = chunk?.content() {
            write!(stdout, "{content}")?;
            stdout.flush()?;
        }
    }
    println!();
    Ok(())
}

async fn cmd_embed(args: &[String]) -> anyhow::Result<()> {
    let text = required_text(args, "text")?;
    let client = build_client(args)?;
    let mut request = EmbeddingRequest::new(text);
    if let Some(model) = flag_value(args, "--model") {
        request = request.with_model(model);
    }
    let resp = client.openai().embeddings().create(&request).await?;
    let first = resp
        .data
        .first()
        .ok_or_else(|| anyhow!("server returned no embeddings"))?;
    println!("model: {}", resp.model);
    println!("dimensions: {}", first.dimensions());
    let preview: Vec<String> = first.embedding.iter().take(8).map(|v| format!("{v:.4}")).collect();
    println!("head: [{}, ...]", preview.join(", "));
    Ok(())
}

async fn cmd_indexes(args: &[String]) -> anyhow::Result<()> {
    let client = build_client(args)?;
    let indexes = client.vector().list_indexes().await?;
    if indexes.is_empty() {
        println!("No indexes.");
        return Ok(());
    }
    println!("{:<32} {:>9} {:<10} {:>12}", "NAME", "DIMENSION", "METRIC", "VECTORS");
    for index in &indexes {
        println!(
            "{:<32} {:>9} {:<10} {:>12}",
            index.name, index.dimension, index.metric, index.vector_count
        );
    }
    Ok(())
}

async fn cmd_image(args: &[String]) -> anyhow::Result<()> {
    let prompt = required_text(args, "prompt")?;
    let client = build_client(args)?;
    let mut options = ImageOptions::default();
    if has_flag(args, "--fast") {
        options = options.with_mode(ImageGenerationMode::Fast);
    }
    let images = client.image().generate(prompt, options).await?;
    if images.is_empty() {
        bail!("server returned no images");
    }

    match flag_value(args, "--out") {
        Some(path) => {
            let bytes = images.decode(0)?;
            std::fs::write(path, &bytes).with_context(|| format!("writing {path}"))?;
            println!("Wrote {} bytes to {path}", bytes.len());
        }
        None => {
            for image in &images.images {
                let shown: String = image.chars().take(80).collect();
                println!("{shown}...");
            }
        }
    }
    Ok(())
}
