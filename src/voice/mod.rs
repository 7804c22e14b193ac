//! Text-to-speech generation for finished summaries.
//!
//! Downstream of the summarization core: the summary text is split into
//! narration-sized sections, each section becomes one TTS request against the
//! VBee API, and the returned audio URLs are downloaded into numbered `.mp3`
//! files. A section that fails to synthesize is logged and skipped so a single
//! flaky request does not discard the rest of the narration.

use crate::summarize::chunking::split_into_chunks;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_VBEE_URL: &str = "https://vbee.vn/api/v1/tts";

/// Maximum characters packed into one narration section.
const MAX_SECTION_CHARS: usize = 800;
/// Word-chunk budget applied when paragraph packing leaves an oversized section.
const FALLBACK_CHUNK_CHARS: usize = 1000;

/// Errors raised by the voice generation pipeline.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// TTS request could not reach the service.
    #[error("TTS request failed: {0}")]
    Request(String),
    /// Service answered with an error status.
    #[error("TTS service returned {status}: {body}")]
    Api {
        /// HTTP status returned by the service.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// Response did not contain a usable audio URL.
    #[error("Malformed TTS response: {0}")]
    MalformedResponse(String),
    /// Audio file download failed.
    #[error("Failed to download audio: {0}")]
    Download(String),
    /// Filesystem failure while writing audio output.
    #[error("Failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request voice parameters.
#[derive(Debug, Clone)]
pub struct VoiceOptions {
    /// Voice identifier understood by the TTS service; empty for the default voice.
    pub voice_code: String,
    /// Speech speed multiplier as the service expects it, e.g. `"1.0"`.
    pub speed_rate: String,
    /// Optional callback URL for asynchronous processing.
    pub callback_url: String,
}

impl Default for VoiceOptions {
    fn default() -> Self {
        Self {
            voice_code: String::new(),
            speed_rate: "1.0".to_string(),
            callback_url: String::new(),
        }
    }
}

/// Outcome of one voice generation run.
#[derive(Debug, Clone)]
pub struct VoiceRun {
    /// Audio files written, in section order.
    pub audio_files: Vec<PathBuf>,
    /// Number of sections the summary was split into.
    pub total_sections: usize,
}

/// VBee-backed voice generator.
pub struct VoiceGenerator {
    http: Client,
    token: String,
    app_id: String,
    base_url: String,
}

impl VoiceGenerator {
    /// Build a generator for the hosted VBee API.
    pub fn new(token: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self::with_base_url(token, app_id, DEFAULT_VBEE_URL)
    }

    /// Build a generator against an alternative endpoint (mock servers).
    pub fn with_base_url(
        token: impl Into<String>,
        app_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let http = Client::builder()
            .user_agent("videobrief/voice")
            .build()
            .expect("Failed to construct reqwest::Client for voice generation");
        Self {
            http,
            token: token.into(),
            app_id: app_id.into(),
            base_url: base_url.into(),
        }
    }

    /// Generate one audio file per summary section under `output_dir`.
    ///
    /// Sections that fail to synthesize are skipped with a warning; the run
    /// report lists the files that were produced.
    pub async fn generate_from_summary(
        &self,
        summary_text: &str,
        output_dir: &Path,
        options: &VoiceOptions,
    ) -> Result<VoiceRun, VoiceError> {
        let sections = split_into_sections(summary_text);
        let total_sections = sections.len();
        std::fs::create_dir_all(output_dir)?;

        let mut audio_files = Vec::new();
        for (index, section) in sections.iter().enumerate() {
            let section_number = index + 1;
            tracing::info!(
                section = section_number,
                total = total_sections,
                "Generating voice for section"
            );
            match self.synthesize(section, options).await {
                Ok(audio) => {
                    let file_path = output_dir.join(format!("section_{section_number:02}.mp3"));
                    std::fs::write(&file_path, audio)?;
                    tracing::info!(path = %file_path.display(), "Wrote audio file");
                    audio_files.push(file_path);
                }
                Err(error) => {
                    tracing::warn!(
                        section = section_number,
                        error = %error,
                        "Skipping section that failed to synthesize"
                    );
                }
            }
        }

        Ok(VoiceRun {
            audio_files,
            total_sections,
        })
    }

    /// Synthesize one section of text and return the audio bytes.
    pub async fn synthesize(
        &self,
        text: &str,
        options: &VoiceOptions,
    ) -> Result<Vec<u8>, VoiceError> {
        let payload = json!({
            "voice_code": options.voice_code,
            "speed_rate": options.speed_rate,
            "input_text": text,
            "app_id": self.app_id,
            "callback_url": options.callback_url,
        });

        tracing::debug!(chars = text.len(), "Calling TTS API");
        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(|error| VoiceError::Request(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoiceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: TtsResponse = response.json().await.map_err(|error| {
            VoiceError::MalformedResponse(format!("failed to decode TTS response: {error}"))
        })?;
        let audio_url = body.audio_url.ok_or_else(|| {
            VoiceError::MalformedResponse("response contained no audio_url".into())
        })?;

        self.download(&audio_url).await
    }

    async fn download(&self, audio_url: &str) -> Result<Vec<u8>, VoiceError> {
        let response = self
            .http
            .get(audio_url)
            .send()
            .await
            .map_err(|error| VoiceError::Download(error.to_string()))?;

        if !response.status().is_success() {
            return Err(VoiceError::Download(format!(
                "audio download returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| VoiceError::Download(error.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct TtsResponse {
    audio_url: Option<String>,
}

/// Split summary text into narration sections under 800 characters.
///
/// Paragraphs are packed greedily. Text without paragraph structure (the
/// orchestrator joins chunk summaries with single spaces, so a summary is
/// often one long line) would otherwise arrive as a single oversized blob;
/// any section still over 1000 characters is re-split at word boundaries so
/// every TTS request stays bounded.
pub fn split_into_sections(text: &str) -> Vec<String> {
    let paragraphs = text
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty());

    let mut sections = Vec::new();
    let mut current = String::new();
    for paragraph in paragraphs {
        if current.len() + paragraph.len() < MAX_SECTION_CHARS {
            current.push_str(paragraph);
            current.push(' ');
        } else {
            if !current.is_empty() {
                sections.push(current.trim().to_string());
            }
            current = format!("{paragraph} ");
        }
    }
    if !current.trim().is_empty() {
        sections.push(current.trim().to_string());
    }

    if sections
        .iter()
        .any(|section| section.len() > FALLBACK_CHUNK_CHARS)
    {
        sections = sections
            .iter()
            .flat_map(|section| split_into_chunks(section, FALLBACK_CHUNK_CHARS))
            .collect();
    }

    sections
}
