//! Remote-first document analysis with local fallback

use std::sync::Arc;

use crate::config::{AnalysisConfig, InferenceConfig};
use crate::heuristics::{self, head_chars};
use crate::providers::{GeneratedText, InferenceProvider, InferenceTask, ModelRegistry};
use crate::types::{AnalysisOutcome, Classification, EntityBag};

/// Remote output must be longer than this to be considered
const MIN_REMOTE_CHARS: usize = 20;
/// A cleaned answer must be longer than this to be used
const MIN_ANSWER_CHARS: usize = 10;

const SUMMARY_MARKER: &str = "Professional Summary:";
const ANSWER_MARKER: &str = "Answer:";

fn summary_prompt(source: &str, max_words: usize) -> String {
    format!(
        "Please provide a concise professional summary of the following legal document. \
         Focus on key parties, main obligations, important dates, and financial terms. \
         Keep the summary under {max_words} words.\n\n\
         Legal Document:\n{source}\n\n\
         {SUMMARY_MARKER}"
    )
}

fn question_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a legal document assistant. Based on the following document content, please \
         answer the user's question accurately and helpfully. Provide specific information \
         from the document when available.\n\n\
         Document Content:\n{context}\n\n\
         User Question: {question}\n\n\
         Please provide a clear, accurate answer based on the information in the document. \
         If specific information is not available, explain what general information can be \
         inferred.\n\n\
         {ANSWER_MARKER}"
    )
}

/// Drop everything up to the last `marker`, or an echoed prompt
fn strip_echo(output: &str, marker: &str, prompt: &str) -> String {
    if let Some((_, tail)) = output.rsplit_once(marker) {
        tail.trim().to_string()
    } else if output.contains(prompt) {
        output.replace(prompt, "").trim().to_string()
    } else {
        output.trim().to_string()
    }
}

/// Document analyzer
///
/// Summaries and answers go to the hosted model first and fall back to the
/// local heuristics; classification, extraction and simplification are
/// always local.
pub struct DocumentAnalyzer {
    provider: Arc<dyn InferenceProvider>,
    models: ModelRegistry,
    config: AnalysisConfig,
}

impl DocumentAnalyzer {
    pub fn new(
        provider: Arc<dyn InferenceProvider>,
        inference: &InferenceConfig,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            provider,
            models: ModelRegistry::new(inference),
            config,
        }
    }

    /// Name of the inference provider in use
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Whether the inference provider is reachable
    pub async fn provider_healthy(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }

    async fn remote(&self, task: InferenceTask, prompt: &str) -> Option<GeneratedText> {
        let model = self.models.model_for(task);
        match self.provider.generate(model, task, prompt).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!(%task, provider = self.provider.name(), "inference failed: {}", e);
                None
            }
        }
    }

    /// Summarize a document, limited to `max_words` (default from config)
    pub async fn summarize(&self, text: &str, max_words: Option<usize>) -> AnalysisOutcome {
        let max_words = max_words.unwrap_or(self.config.summary_max_words);
        let prompt = summary_prompt(&heuristics::key_sentences(text), max_words);

        if let Some(generated) = self.remote(InferenceTask::Summarization, &prompt).await {
            if generated.text.trim().chars().count() > MIN_REMOTE_CHARS {
                let summary = strip_echo(&generated.text, SUMMARY_MARKER, &prompt);
                if summary.chars().count() > MIN_REMOTE_CHARS {
                    return AnalysisOutcome::remote(
                        format!("Legal Document Summary: {}", summary),
                        generated.model,
                    );
                }
            }
        }

        tracing::warn!("summary from local heuristics");
        AnalysisOutcome::local(heuristics::summarize(text))
    }

    /// Answer a question about a document
    pub async fn answer(&self, question: &str, context: &str) -> AnalysisOutcome {
        let prompt = question_prompt(
            head_chars(context, self.config.question_context_chars),
            question,
        );

        if let Some(generated) = self.remote(InferenceTask::QuestionAnswering, &prompt).await {
            if generated.text.trim().chars().count() > MIN_REMOTE_CHARS {
                let answer = strip_echo(&generated.text, ANSWER_MARKER, &prompt);
                if answer.chars().count() > MIN_ANSWER_CHARS {
                    return AnalysisOutcome::remote(answer, generated.model);
                }
            }
        }

        tracing::warn!("answer from local heuristics");
        AnalysisOutcome::local(heuristics::answer_question(question, context))
    }

    /// Run an arbitrary prompt for a task, with the task's local fallback
    pub async fn run_task(&self, task: InferenceTask, prompt: &str) -> AnalysisOutcome {
        match self.remote(task, prompt).await {
            Some(generated) => AnalysisOutcome::remote(generated.text.trim().to_string(), generated.model),
            None => AnalysisOutcome::local(heuristics::task_fallback(task, prompt)),
        }
    }

    pub fn classify(&self, text: &str) -> Classification {
        heuristics::classify(text)
    }

    pub fn extract_entities(&self, text: &str) -> EntityBag {
        heuristics::extract_entities(text)
    }

    pub fn simplify(&self, text: &str) -> AnalysisOutcome {
        AnalysisOutcome::local(heuristics::simplify_clauses(text))
    }

    pub fn key_clauses(&self, text: &str) -> AnalysisOutcome {
        AnalysisOutcome::local(heuristics::key_clauses(text))
    }

    pub fn detailed_summary(&self, text: &str) -> AnalysisOutcome {
        AnalysisOutcome::local(heuristics::detailed_summary(text))
    }

    pub fn highlight(&self, text: &str) -> AnalysisOutcome {
        AnalysisOutcome::local(heuristics::highlight_entities(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::providers::DisabledProvider;
    use crate::types::AnalysisSource;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    const MODEL: &str = "facebook/bart-large-cnn";

    const LEASE: &str = "This Lease Agreement is between Oak Properties LLC and the Tenant. \
        The Tenant shall pay $900 per month. The lease term is twelve months.";

    /// Provider that returns a fixed reply and records prompts
    struct Scripted {
        reply: Option<String>,
        prompts: Mutex<Vec<(InferenceTask, String)>>,
    }

    impl Scripted {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl InferenceProvider for Scripted {
        async fn generate(
            &self,
            model: &str,
            task: InferenceTask,
            prompt: &str,
        ) -> Result<Option<GeneratedText>> {
            self.prompts.lock().push((task, prompt.to_string()));
            Ok(self.reply.clone().map(|text| GeneratedText {
                text,
                model: model.to_string(),
            }))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct Failing;

    #[async_trait]
    impl InferenceProvider for Failing {
        async fn generate(&self, _: &str, _: InferenceTask, _: &str) -> Result<Option<GeneratedText>> {
            Err(Error::inference("connection reset"))
        }

        async fn health_check(&self) -> Result<bool> {
            Err(Error::inference("connection reset"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn analyzer(provider: Arc<dyn InferenceProvider>) -> DocumentAnalyzer {
        DocumentAnalyzer::new(provider, &InferenceConfig::default(), AnalysisConfig::default())
    }

    #[tokio::test]
    async fn test_summary_without_provider_is_local() {
        let outcome = analyzer(Arc::new(DisabledProvider)).summarize(LEASE, None).await;
        assert_eq!(outcome.source, AnalysisSource::Local);
        assert!(outcome.text.starts_with("Document Overview: This Lease Agreement"));
    }

    #[tokio::test]
    async fn test_remote_summary_is_cleaned() {
        let provider = Scripted::new(Some(
            "Professional Summary: A twelve month lease at $900 per month.",
        ));
        let outcome = analyzer(provider.clone()).summarize(LEASE, Some(60)).await;

        assert_eq!(
            outcome,
            AnalysisOutcome::remote(
                "Legal Document Summary: A twelve month lease at $900 per month.".to_string(),
                MODEL
            )
        );

        let prompts = provider.prompts.lock();
        assert_eq!(prompts[0].0, InferenceTask::Summarization);
        assert!(prompts[0].1.contains("Keep the summary under 60 words."));
        assert!(prompts[0].1.contains("Legal Document:\nThis Lease Agreement"));
    }

    #[tokio::test]
    async fn test_short_remote_summary_falls_back() {
        let outcome = analyzer(Scripted::new(Some("Short reply"))).summarize(LEASE, None).await;
        assert_eq!(outcome.source, AnalysisSource::Local);
    }

    #[tokio::test]
    async fn test_remote_answer_strips_marker() {
        let provider = Scripted::new(Some("Answer: The rent is $900 per month."));
        let outcome = analyzer(provider.clone())
            .answer("How much is the rent?", LEASE)
            .await;
        assert_eq!(outcome.text, "The rent is $900 per month.");
        assert!(outcome.source.is_remote());

        let prompts = provider.prompts.lock();
        assert!(prompts[0].1.contains("User Question: How much is the rent?"));
    }

    #[tokio::test]
    async fn test_answer_too_short_after_cleaning_falls_back() {
        let provider = Scripted::new(Some("Some long preamble from the model. Answer: yes"));
        let outcome = analyzer(provider).answer("What payment is due?", LEASE).await;
        assert_eq!(outcome.source, AnalysisSource::Local);
        assert!(outcome.text.starts_with("Financial information found: $900"));
    }

    #[tokio::test]
    async fn test_question_context_is_truncated() {
        let provider = Scripted::new(None);
        let context = "x".repeat(5000);
        analyzer(provider.clone()).answer("What now?", &context).await;

        let prompts = provider.prompts.lock();
        assert!(prompts[0].1.contains(&"x".repeat(1500)));
        assert!(!prompts[0].1.contains(&"x".repeat(1501)));
    }

    #[tokio::test]
    async fn test_provider_errors_degrade_to_local() {
        let analyzer = analyzer(Arc::new(Failing));
        assert_eq!(analyzer.summarize(LEASE, None).await.source, AnalysisSource::Local);
        assert_eq!(
            analyzer.answer("Who are the parties?", LEASE).await.source,
            AnalysisSource::Local
        );
        assert!(!analyzer.provider_healthy().await);
    }

    #[tokio::test]
    async fn test_run_task_fallback() {
        let outcome = analyzer(Arc::new(DisabledProvider))
            .run_task(InferenceTask::DetailedAnalysis, "Analyze this lease")
            .await;
        assert_eq!(outcome.source, AnalysisSource::Local);
        assert!(outcome.text.contains("review the document manually"));

        let outcome = analyzer(Scripted::new(Some("  The lease favors the landlord.  ")))
            .run_task(InferenceTask::DetailedAnalysis, "Analyze this lease")
            .await;
        assert_eq!(outcome.text, "The lease favors the landlord.");
    }

    #[test]
    fn test_strip_echo() {
        let prompt = "Question?\n\nAnswer:";
        assert_eq!(strip_echo("Answer: one Answer: two", "Answer:", prompt), "two");
        assert_eq!(
            strip_echo("Prefix Question? then text", "Missing:", "Question?"),
            "Prefix  then text"
        );
    }
}
