/*!
 * Integration tests for the four-stage translation pipeline
 */

use std::sync::Arc;
use std::time::Duration;

use yamat::errors::{InputError, ProviderError};
use yamat::providers::mock::MockProvider;
use yamat::translation::pipeline::{PipelineConfig, PipelineState};
use yamat::translation::{Glossary, Stage, TranslationPipeline, TranslationRequest};

use crate::common;

/// Instruction prefix of each stage, in pipeline order
const STAGE_ROLES: [&str; 4] = [
    "You are a Translation Agent",
    "You are a Review Agent",
    "You are a Proofreading Agent",
    "You are the main Translator AI Agent",
];

fn glossary_lines(message: &str) -> Vec<String> {
    message
        .split("Glossary:\n")
        .nth(1)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_translate_success_shouldIssueFourCallsInStageOrder() {
    let client = MockProvider::working();

    common::mock_pipeline(&client)
        .translate(common::SAMPLE_TEXT, &common::sample_glossary())
        .await
        .unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 4);
    for (call, role) in calls.iter().zip(STAGE_ROLES) {
        assert!(call.instruction.starts_with(role), "unexpected instruction: {}", call.instruction);
    }
}

#[tokio::test]
async fn test_translate_shouldPassEachOutputVerbatimToNextStage() {
    let outputs = ["  draft\n", "refined text ", "\tproofread", "final answer\n"];
    let client = MockProvider::scripted(outputs);

    let result = common::mock_pipeline(&client)
        .translate("Hello", &common::sample_glossary())
        .await
        .unwrap();

    assert_eq!(result, "final answer\n");
    let calls = client.calls();
    assert_eq!(calls[1].message, format!("Review and improve this translation: {}", outputs[0]));
    assert!(calls[2].message.contains(&format!("Translation: {}\n\nGlossary:", outputs[1])));
    assert_eq!(calls[3].message, format!("Finalize this translation: {}", outputs[2]));
}

#[tokio::test]
async fn test_translate_onlyDraftSeesSourceText() {
    let client = MockProvider::scripted(["d", "r", "g", "f"]);

    common::mock_pipeline(&client)
        .translate(common::SAMPLE_TEXT, &Glossary::new())
        .await
        .unwrap();

    let calls = client.calls();
    assert!(calls[0].message.contains(common::SAMPLE_TEXT));
    assert!(calls[1..].iter().all(|c| !c.message.contains(common::SAMPLE_TEXT)));
}

#[tokio::test]
async fn test_translate_glossaryCheck_shouldListOneLinePerEntry() {
    let client = MockProvider::working();

    common::mock_pipeline(&client)
        .translate(common::SAMPLE_TEXT, &common::sample_glossary())
        .await
        .unwrap();

    assert_eq!(glossary_lines(&client.calls()[2].message), vec!["Hello: Hola", "world: mundo"]);
}

#[tokio::test]
async fn test_translate_emptyGlossary_shouldStillRunFourStages() {
    let client = MockProvider::working();

    let result = common::mock_pipeline(&client)
        .translate(common::SAMPLE_TEXT, &Glossary::new())
        .await;

    assert!(result.is_ok());
    assert_eq!(client.call_count(), 4);
    assert!(glossary_lines(&client.calls()[2].message).is_empty());
}

#[tokio::test]
async fn test_translate_failureOnEachCall_shouldStopAndNameStage() {
    for (k, expected_stage) in Stage::ALL.into_iter().enumerate() {
        let call = k + 1;
        let client = MockProvider::fail_on_call(call);

        let error = common::mock_pipeline(&client)
            .translate(common::SAMPLE_TEXT, &common::sample_glossary())
            .await
            .unwrap_err();

        assert_eq!(error.stage(), expected_stage, "failure on call {}", call);
        assert!(matches!(error.cause(), ProviderError::ApiError { status_code: 503, .. }));
        assert_eq!(client.call_count(), call, "no calls may follow the failing one");
    }
}

#[tokio::test]
async fn test_translate_emptyOutput_shouldPassThroughUntouched() {
    let client = MockProvider::empty();

    let result = common::mock_pipeline(&client)
        .translate(common::SAMPLE_TEXT, &Glossary::new())
        .await
        .unwrap();

    assert_eq!(result, "");
    assert_eq!(client.calls()[3].message, "Finalize this translation: ");
}

#[tokio::test]
async fn test_run_skipEmptyGlossary_shouldIssueThreeCalls() {
    let client = MockProvider::scripted(["d", "r", "f"]);
    let config = PipelineConfig::new("English", "Spanish").with_skip_empty_glossary(true);
    let pipeline = TranslationPipeline::new(Arc::new(client.clone()), config);
    let request = TranslationRequest::new(common::SAMPLE_TEXT, Glossary::new()).unwrap();

    let report = pipeline.run(&request).await.unwrap();

    assert_eq!(report.translated_text, "f");
    assert_eq!(report.generation_calls, 3);
    assert_eq!(report.skipped_stages, vec![Stage::GlossaryCheck]);
    assert_eq!(client.calls()[2].message, "Finalize this translation: r");
    assert!(report.summary().contains("glossary_check: skipped"));
}

#[tokio::test]
async fn test_run_skipEmptyGlossary_nonEmptyGlossary_shouldStillCheck() {
    let client = MockProvider::working();
    let config = PipelineConfig::new("English", "Spanish").with_skip_empty_glossary(true);
    let pipeline = TranslationPipeline::new(Arc::new(client.clone()), config);
    let request = TranslationRequest::new(common::SAMPLE_TEXT, common::sample_glossary()).unwrap();

    let report = pipeline.run(&request).await.unwrap();

    assert_eq!(report.generation_calls, 4);
    assert!(report.skipped_stages.is_empty());
}

/// Glossary enforcement is advisory and non-deterministic: stage 3 only asks the
/// model to use the glossary, so a target term is not guaranteed to appear in the
/// final text. A model that ignores it is flagged by the audit, never corrected.
#[tokio::test]
async fn test_run_modelIgnoresGlossary_shouldFlagMissingTermWithoutRewriting() {
    let client = MockProvider::scripted(["d", "r", "g", "¡Hola planeta! Este es un mensaje de prueba."]);
    let request = TranslationRequest::new(common::SAMPLE_TEXT, common::sample_glossary()).unwrap();

    let report = common::mock_pipeline(&client).run(&request).await.unwrap();

    assert_eq!(report.glossary_audit.applicable, 2);
    assert_eq!(report.glossary_audit.missing.len(), 1);
    assert_eq!(report.glossary_audit.missing[0].target_term, "mundo");
    assert_eq!(report.translated_text, "¡Hola planeta! Este es un mensaje de prueba.");
}

#[tokio::test]
async fn test_run_callTimeout_shouldFailDraftWithTimeout() {
    let client = MockProvider::slow(1_000);
    let config = PipelineConfig::new("English", "Spanish").with_call_timeout(Some(Duration::from_millis(50)));
    let pipeline = TranslationPipeline::new(Arc::new(client.clone()), config);
    let request = TranslationRequest::new(common::SAMPLE_TEXT, Glossary::new()).unwrap();

    let error = pipeline.run(&request).await.unwrap_err();

    assert_eq!(error.stage(), Stage::Draft);
    assert!(matches!(error.cause(), ProviderError::Timeout(limit) if *limit == Duration::from_millis(50)));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_run_concurrentRuns_shouldBeIndependent() {
    let client = MockProvider::working();
    let pipeline = common::mock_pipeline(&client);
    let first = TranslationRequest::new("First text", Glossary::new()).unwrap();
    let second = TranslationRequest::new("Second text", common::sample_glossary()).unwrap();

    let (a, b) = tokio::join!(pipeline.run(&first), pipeline.run(&second));

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.run_id, b.run_id);
    assert_eq!(a.generation_calls + b.generation_calls, 8);
    assert_eq!(client.call_count(), 8);
}

#[tokio::test]
async fn test_endToEnd_helloWorld_shouldProduceChainedTranslation() {
    let client = MockProvider::working();
    let states = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&states);
    let pipeline = common::mock_pipeline(&client).with_progress(Box::new(move |p| sink.lock().push(p.state)));

    let result = pipeline
        .translate(common::SAMPLE_TEXT, &common::sample_glossary())
        .await
        .unwrap();

    assert!(!result.is_empty());
    assert!(result.starts_with("[MOCK 4] Finalize this translation: [MOCK 3] Check this translation"));
    let calls = client.calls();
    assert_eq!(calls[0].message, format!("Translate this text from English to Spanish: {}", common::SAMPLE_TEXT));
    assert_eq!(calls[1].message, format!("Review and improve this translation: [MOCK 1] {}", calls[0].message));
    assert_eq!(*states.lock(), vec![
        PipelineState::Drafting,
        PipelineState::Refining,
        PipelineState::GlossaryChecking,
        PipelineState::Finalizing,
        PipelineState::Done,
    ]);
}

#[test]
fn test_request_emptyText_shouldBeRejectedBeforeAnyCall() {
    assert_eq!(
        TranslationRequest::new("   ", common::sample_glossary()).unwrap_err(),
        InputError::EmptySourceText
    );
}
