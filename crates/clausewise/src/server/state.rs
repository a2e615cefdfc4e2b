//! Application state for the ClauseWise server

use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::analysis::DocumentAnalyzer;
use crate::config::ClauseWiseConfig;
use crate::error::{Error, Result};
use crate::providers;
use crate::speech::SpeechSynthesizer;
use crate::types::response::{DocumentSummary, HistoryEntry};
use crate::types::{ConversationTurn, Document};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: ClauseWiseConfig,
    /// Remote-first analyzer
    analyzer: DocumentAnalyzer,
    /// Offline speech
    speech: SpeechSynthesizer,
    /// Document registry
    documents: DashMap<Uuid, Document>,
    /// Upload order (append-only)
    history: RwLock<Vec<Uuid>>,
    /// Question/answer turns per document (append-only)
    conversations: DashMap<Uuid, Vec<ConversationTurn>>,
    /// Set once the listener is bound
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state from configuration
    pub fn new(config: ClauseWiseConfig) -> Result<Self> {
        tracing::info!("Initializing ClauseWise application state...");

        let provider = providers::from_config(&config.inference)?;
        let analyzer =
            DocumentAnalyzer::new(provider, &config.inference, config.analysis.clone());
        tracing::info!("Analyzer initialized (provider: {})", analyzer.provider_name());

        let speech = SpeechSynthesizer::from_config(&config.speech);
        tracing::info!("Speech synthesizer initialized (engine: {})", config.speech.command);

        Ok(Self::with_components(config, analyzer, speech))
    }

    /// Create state from already built components
    pub fn with_components(
        config: ClauseWiseConfig,
        analyzer: DocumentAnalyzer,
        speech: SpeechSynthesizer,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                analyzer,
                speech,
                documents: DashMap::new(),
                history: RwLock::new(Vec::new()),
                conversations: DashMap::new(),
                ready: RwLock::new(false),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &ClauseWiseConfig {
        &self.inner.config
    }

    /// Get the analyzer
    pub fn analyzer(&self) -> &DocumentAnalyzer {
        &self.inner.analyzer
    }

    /// Get the speech synthesizer
    pub fn speech(&self) -> &SpeechSynthesizer {
        &self.inner.speech
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }

    /// Store a document and append it to the upload history
    pub fn add_document(&self, doc: Document) -> HistoryEntry {
        let mut history = self.inner.history.write();
        let entry = HistoryEntry {
            index: history.len(),
            document: DocumentSummary::from(&doc),
        };
        history.push(doc.id);
        self.inner.documents.insert(doc.id, doc);
        entry
    }

    /// Get a document by ID
    pub fn get_document(&self, id: &Uuid) -> Option<Document> {
        self.inner.documents.get(id).map(|d| d.clone())
    }

    /// Get a document by ID or fail with `DocumentNotFound`
    pub fn require_document(&self, id: &Uuid) -> Result<Document> {
        self.get_document(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    /// Upload history in upload order
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.inner
            .history
            .read()
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                self.inner.documents.get(id).map(|doc| HistoryEntry {
                    index,
                    document: DocumentSummary::from(doc.value()),
                })
            })
            .collect()
    }

    /// History entry of one document
    pub fn history_entry(&self, id: &Uuid) -> Option<HistoryEntry> {
        let index = self.inner.history.read().iter().position(|h| h == id)?;
        let doc = self.inner.documents.get(id)?;
        Some(HistoryEntry {
            index,
            document: DocumentSummary::from(doc.value()),
        })
    }

    /// Append a turn to a document's conversation; returns the new length
    pub fn record_turn(&self, id: Uuid, turn: ConversationTurn) -> usize {
        let mut turns = self.inner.conversations.entry(id).or_default();
        turns.push(turn);
        turns.len()
    }

    /// Conversation turns for a document, oldest first
    pub fn conversation(&self, id: &Uuid) -> Vec<ConversationTurn> {
        self.inner
            .conversations
            .get(id)
            .map(|turns| turns.clone())
            .unwrap_or_default()
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.inner.documents.len()
    }
}
