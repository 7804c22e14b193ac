use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use videobrief::config::Config;
use videobrief::llm::OpenAiChatClient;
use videobrief::pdf::PdfExtractor;
use videobrief::report::{self, ReportMeta};
use videobrief::summarize::{Summarizer, SummarizerOptions};
use videobrief::voice::{VoiceGenerator, VoiceOptions};
use videobrief::{logging, summarize};

/// Convert a PDF document into a video-ready text summary.
#[derive(Debug, Parser)]
#[command(name = "videobrief", version, about)]
struct Cli {
    /// Path to the PDF file to summarize.
    pdf_path: PathBuf,

    /// Output file path for the summary.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target video duration in minutes.
    #[arg(short, long, default_value_t = 15)]
    duration: u32,

    /// OpenAI API key (or set the OPENAI_API_KEY environment variable).
    #[arg(long)]
    api_key: Option<String>,

    /// Generate narration audio from the summary.
    #[arg(long)]
    generate_voice: bool,

    /// Directory for narration audio files.
    #[arg(long)]
    voice_output_dir: Option<PathBuf>,

    /// Voice code for TTS.
    #[arg(long, default_value = "")]
    voice_code: String,

    /// Speech speed rate.
    #[arg(long, default_value = "1.0")]
    speed_rate: String,

    /// Callback URL for asynchronous voice processing.
    #[arg(long, default_value = "")]
    callback_url: String,

    /// VBee API token (or set the VBEE_TOKEN environment variable).
    #[arg(long)]
    vbee_token: Option<String>,

    /// VBee app ID (or set the VBEE_APP_ID environment variable).
    #[arg(long)]
    vbee_app_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let api_key = cli
        .api_key
        .clone()
        .or_else(|| config.openai_api_key.clone())
        .context("OpenAI API key is required; set OPENAI_API_KEY or pass --api-key")?;

    println!("Processing PDF: {}", cli.pdf_path.display());
    println!("Target duration: {} minutes", cli.duration);

    let extractor = PdfExtractor::new();
    let text = extractor
        .extract_text(&cli.pdf_path)
        .context("Text extraction failed")?;
    let page_count = extractor.page_count(&cli.pdf_path).ok();

    let mut options = SummarizerOptions::default();
    if let Some(words_per_minute) = config.words_per_minute {
        options.words_per_minute = words_per_minute;
    }
    if let Some(max_chunk_chars) = config.max_chunk_chars {
        options.max_chunk_chars = max_chunk_chars;
    }
    let client = OpenAiChatClient::new(api_key, config.openai_model.clone());
    let summarizer = Summarizer::with_options(Box::new(client), options);

    println!("Extracting text and creating summary...");
    let result = summarizer
        .summarize(&text, cli.duration)
        .await
        .context("Summarization failed")?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| report::default_output_path(&cli.pdf_path, cli.duration));
    report::write_summary(
        &output,
        &result,
        &ReportMeta {
            source: cli.pdf_path.display().to_string(),
            page_count,
        },
    )
    .context("Failed to save summary")?;

    print_overview(&cli, &result, &output, page_count);

    if cli.generate_voice {
        generate_voice(&cli, &config, &result, &output).await?;
    }

    Ok(())
}

fn print_overview(
    cli: &Cli,
    result: &summarize::SummaryResult,
    output: &Path,
    page_count: Option<usize>,
) {
    println!();
    println!("{}", "=".repeat(60));
    println!("SUMMARY COMPLETED SUCCESSFULLY!");
    println!("{}", "=".repeat(60));
    println!("Source PDF: {}", cli.pdf_path.display());
    if let Some(pages) = page_count {
        println!("Pages processed: {pages}");
    }
    println!("Original words: {}", result.original_word_count);
    println!("Summary words: {}", result.word_count);
    println!(
        "Estimated duration: {}",
        report::format_duration(result.estimated_duration_minutes)
    );
    println!("Summary saved to: {}", output.display());

    println!();
    println!("SUMMARY PREVIEW:");
    println!("{}", "-".repeat(40));
    let preview: String = result.summary.chars().take(500).collect();
    if result.summary.chars().count() > 500 {
        println!("{preview}...");
    } else {
        println!("{preview}");
    }

    println!();
    println!("KEY POINTS:");
    println!("{}", "-".repeat(40));
    for (index, point) in result.key_points.iter().enumerate() {
        println!("{}. {point}", index + 1);
    }
}

async fn generate_voice(
    cli: &Cli,
    config: &Config,
    result: &summarize::SummaryResult,
    output: &Path,
) -> Result<()> {
    println!();
    println!("{}", "=".repeat(60));
    println!("GENERATING VOICE AUDIO...");
    println!("{}", "=".repeat(60));

    let token = cli
        .vbee_token
        .clone()
        .or_else(|| config.vbee_token.clone())
        .context("VBee token is required; set VBEE_TOKEN or pass --vbee-token")?;
    let app_id = cli
        .vbee_app_id
        .clone()
        .or_else(|| config.vbee_app_id.clone())
        .context("VBee app ID is required; set VBEE_APP_ID or pass --vbee-app-id")?;

    let output_dir = cli.voice_output_dir.clone().unwrap_or_else(|| {
        output
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let generator = VoiceGenerator::new(token, app_id);
    let run = generator
        .generate_from_summary(
            &result.summary,
            &output_dir,
            &VoiceOptions {
                voice_code: cli.voice_code.clone(),
                speed_rate: cli.speed_rate.clone(),
                callback_url: cli.callback_url.clone(),
            },
        )
        .await
        .context("Voice generation failed")?;

    println!("Audio files generated: {}", run.audio_files.len());
    println!("Output directory: {}", output_dir.display());
    for (index, audio_file) in run.audio_files.iter().enumerate() {
        println!("{}. {}", index + 1, audio_file.display());
    }

    Ok(())
}
