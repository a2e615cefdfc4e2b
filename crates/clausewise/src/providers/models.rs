//! Task to model assignment and backend redirects

use std::collections::HashMap;

use crate::config::InferenceConfig;

use super::inference::InferenceTask;

/// Resolves which model serves a task and which model is actually invoked
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    summarization: String,
    question_answering: String,
    detailed_analysis: String,
    aliases: HashMap<String, String>,
}

impl ModelRegistry {
    pub fn new(config: &InferenceConfig) -> Self {
        Self {
            summarization: config.models.summarization.clone(),
            question_answering: config.models.question_answering.clone(),
            detailed_analysis: config.models.detailed_analysis.clone(),
            aliases: config.backend_aliases.clone(),
        }
    }

    /// Model configured for a task
    pub fn model_for(&self, task: InferenceTask) -> &str {
        match task {
            InferenceTask::Summarization => &self.summarization,
            InferenceTask::QuestionAnswering => &self.question_answering,
            InferenceTask::DetailedAnalysis => &self.detailed_analysis,
        }
    }

    /// Model to invoke for a requested name.
    ///
    /// Redirects only happen through an explicitly configured alias and are
    /// logged with both names.
    pub fn resolve<'a>(&'a self, requested: &'a str) -> &'a str {
        match self.aliases.get(requested) {
            Some(backend) if backend != requested => {
                tracing::warn!(
                    requested,
                    invoked = backend.as_str(),
                    "model redirected by backend alias"
                );
                backend
            }
            _ => requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_to_themselves() {
        let registry = ModelRegistry::new(&InferenceConfig::default());
        let model = registry.model_for(InferenceTask::QuestionAnswering);
        assert_eq!(model, "facebook/bart-large-cnn");
        assert_eq!(registry.resolve(model), model);
        assert_eq!(registry.resolve("org/other"), "org/other");
    }

    #[test]
    fn test_explicit_alias_is_applied() {
        let mut config = InferenceConfig::default();
        config.models.summarization = "org/nominal".to_string();
        config
            .backend_aliases
            .insert("org/nominal".to_string(), "org/served".to_string());

        let registry = ModelRegistry::new(&config);
        let requested = registry.model_for(InferenceTask::Summarization);
        assert_eq!(requested, "org/nominal");
        assert_eq!(registry.resolve(requested), "org/served");
    }
}
