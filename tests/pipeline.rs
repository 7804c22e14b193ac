//! End-to-end pipeline tests against a mocked chat-completions endpoint.

use httpmock::{Method::POST, MockServer};
use serde_json::json;
use videobrief::llm::OpenAiChatClient;
use videobrief::report::{self, ReportMeta};
use videobrief::summarize::{Summarizer, SummarizerOptions};

/// A plausible extracted-PDF document: headings, repeated topic words, and
/// enough characters to clear the minimum-input threshold.
fn source_document() -> String {
    let mut text = String::from(
        "\n1. Introduction\nMachine learning systems transform how organizations process \
documents. Machine learning and deep learning appear throughout modern research.\n\n\
2. Methods\nThe experiments used machine learning pipelines with careful evaluation. \
Learning curves were recorded for every configuration.\n\n\
RESULTS:\nThe learning outcomes exceeded every baseline measurement.\n",
    );
    text.push_str(&"Additional discussion of the experimental setup follows here. ".repeat(3));
    text
}

fn model_summary() -> &'static str {
    "This document presents machine learning research. The key finding is that learning \
systems outperform baselines. Evaluation covered many configurations in detail. The main \
contribution is a reproducible methodology. Results generalize across every tested domain."
}

#[tokio::test]
async fn pdf_text_becomes_a_written_report() {
    let server = MockServer::start_async().await;
    let client = OpenAiChatClient::with_base_url("sk-test", "gpt-3.5-turbo", server.base_url());

    let chunk_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("comprehensive summary");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": model_summary()}}
                ]
            }));
        })
        .await;

    let summarizer = Summarizer::new(Box::new(client));
    let result = summarizer
        .summarize(&source_document(), 1)
        .await
        .expect("summary");

    // One chunk, response under the 20% overshoot threshold: no shorten call.
    chunk_mock.assert();
    assert_eq!(result.target_word_count, 155);
    assert!(result.summary.contains("machine learning research"));

    // Outline ran over the raw headings and topic words.
    assert_eq!(result.key_topics[0].0, "learning");
    assert!(
        result
            .sections
            .iter()
            .any(|section| section.title.contains("Introduction"))
    );
    assert!(!result.key_points.is_empty());
    assert!(result.reading_metrics.contains_key("flesch_reading_ease"));

    let dir = tempfile::tempdir().expect("temp dir");
    let output = dir.path().join("paper_summary_1min.txt");
    report::write_summary(
        &output,
        &result,
        &ReportMeta {
            source: "paper.pdf".to_string(),
            page_count: Some(3),
        },
    )
    .expect("write report");

    let written = std::fs::read_to_string(&output).expect("read report");
    assert!(written.contains("VIDEOBRIEF - VIDEO READY SUMMARY"));
    assert!(written.contains("Pages: 3"));
    assert!(written.contains("KEY TOPICS"));
    assert!(written.contains("- learning (mentioned"));
}

#[tokio::test]
async fn over_long_first_pass_is_shortened_once() {
    let server = MockServer::start_async().await;
    let client = OpenAiChatClient::with_base_url("sk-test", "gpt-3.5-turbo", server.base_url());

    let long_first_pass = vec!["word"; 400].join(" ");
    let chunk_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("comprehensive summary");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": long_first_pass}}
                ]
            }));
        })
        .await;
    let shorten_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("shorten this summary");
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "A tight final summary."}}
                ]
            }));
        })
        .await;

    let summarizer = Summarizer::with_options(
        Box::new(client),
        SummarizerOptions::default(),
    );
    let result = summarizer
        .summarize(&source_document(), 1)
        .await
        .expect("summary");

    chunk_mock.assert();
    shorten_mock.assert();
    assert_eq!(result.summary, "A tight final summary.");
    assert_eq!(result.word_count, 4);
}
