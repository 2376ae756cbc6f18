//! Driver — runs the work list through classify → research → generate →
//! extract → persist, one item at a time, in list order.
//!
//! Per-item failures are caught here and logged; a single bad item never
//! aborts the batch. An existing artifact for a post ID skips the item
//! entirely — no collaborator is invoked for it.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

pub mod artifact;
pub mod work_items;

use crate::classifier;
use crate::classifier::tiebreak::LanguageTieBreak;
use crate::errors::PipelineError;
use crate::generation::extract::{extract, PageContent};
use crate::generation::ContentGenerator;
use crate::research::ResearchProvider;
use artifact::PageArtifact;
use work_items::WorkItem;

/// Counts for one driver run, reported at the end.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The content pipeline with its collaborators injected. Collaborators are
/// plain values constructed in `main`; tests swap in stubs.
pub struct Pipeline {
    research: Arc<dyn ResearchProvider>,
    generator: Arc<dyn ContentGenerator>,
    tie_break: Arc<dyn LanguageTieBreak>,
    output_dir: PathBuf,
}

impl Pipeline {
    pub fn new(
        research: Arc<dyn ResearchProvider>,
        generator: Arc<dyn ContentGenerator>,
        tie_break: Arc<dyn LanguageTieBreak>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            research,
            generator,
            tie_break,
            output_dir,
        }
    }

    /// Processes the work list sequentially. Never returns an error — item
    /// failures are logged and counted.
    pub async fn run(&self, items: &[WorkItem]) -> RunSummary {
        let mut summary = RunSummary::default();

        for item in items {
            if PageArtifact::exists(&self.output_dir, &item.post_id) {
                info!(
                    "Skipping '{}' (post {}): artifact already exists",
                    item.keyword, item.post_id
                );
                summary.skipped += 1;
                continue;
            }

            match self.process_item(item).await {
                Ok(path) => {
                    info!(
                        "Content for post {} written to {}",
                        item.post_id,
                        path.display()
                    );
                    summary.generated += 1;
                }
                Err(e) => {
                    error!(
                        "Failed to process '{}' (post {}): {e}",
                        item.keyword, item.post_id
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    async fn process_item(&self, item: &WorkItem) -> Result<PathBuf, PipelineError> {
        let language = classifier::classify(&item.keyword, self.tie_break.as_ref()).await;
        info!(
            "Getting knowledge backbone for '{}' ({})",
            item.keyword,
            language.english_name()
        );

        let knowledge_backbone = self.research.research(&item.keyword, language).await?;

        info!("Generating all sections for '{}'", item.keyword);
        let raw = self
            .generator
            .generate(&item.keyword, &knowledge_backbone, language)
            .await?;

        let content = extract(&raw);
        if let PageContent::Error(err) = &content {
            // Persisted anyway — an ErrorContent artifact is a terminal state.
            warn!(
                "Generation output for '{}' did not parse: {}",
                item.keyword, err.error
            );
        }

        let artifact = PageArtifact {
            keyword: item.keyword.clone(),
            knowledge_backbone,
            content,
        };
        Ok(artifact.write(&self.output_dir, &item.post_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::classifier::Language;
    use crate::llm_client::LlmError;
    use crate::research::ResearchError;

    struct StubTieBreak;

    #[async_trait]
    impl LanguageTieBreak for StubTieBreak {
        async fn is_spanish(&self, _keyword: &str) -> Option<bool> {
            None
        }
    }

    /// Research stub that counts calls and fails for configured topics.
    struct StubResearch {
        calls: AtomicUsize,
        fail_for: Vec<String>,
    }

    impl StubResearch {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_for: Vec::new(),
            }
        }

        fn failing_for(topic: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_for: vec![topic.to_string()],
            }
        }
    }

    #[async_trait]
    impl ResearchProvider for StubResearch {
        async fn research(&self, topic: &str, _language: Language) -> Result<String, ResearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_for.iter().any(|t| t == topic) {
                return Err(ResearchError {
                    topic: topic.to_string(),
                    reason: "endpoint returned empty content".to_string(),
                });
            }
            Ok("Fact A. Fact B.".to_string())
        }
    }

    /// Generator stub with a fixed response.
    struct StubGenerator {
        calls: AtomicUsize,
        response: String,
    }

    impl StubGenerator {
        fn new(response: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                response: response.to_string(),
            }
        }
    }

    #[async_trait]
    impl ContentGenerator for StubGenerator {
        async fn generate(
            &self,
            _topic: &str,
            _backbone: &str,
            _language: Language,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    fn pipeline_with(
        research: Arc<StubResearch>,
        generator: Arc<StubGenerator>,
        output_dir: PathBuf,
    ) -> Pipeline {
        Pipeline::new(research, generator, Arc::new(StubTieBreak), output_dir)
    }

    #[tokio::test]
    async fn end_to_end_writes_parsed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let research = Arc::new(StubResearch::new());
        let generator = Arc::new(StubGenerator::new(
            "```json\n{\"hero\": {\"headline\": \"Grow\", \"cta\": \"Talk\"}}\n```",
        ));
        let pipeline = pipeline_with(research, generator, dir.path().to_path_buf());

        let summary = pipeline.run(&[WorkItem::new("seo agency", "1")]).await;
        assert_eq!(summary.generated, 1);

        let artifact = PageArtifact::read(dir.path(), "1").unwrap();
        assert_eq!(artifact.keyword, "seo agency");
        assert_eq!(artifact.knowledge_backbone, "Fact A. Fact B.");
        assert_eq!(
            artifact.content,
            PageContent::Sections(json!({"hero": {"headline": "Grow", "cta": "Talk"}}))
        );
    }

    #[tokio::test]
    async fn existing_artifact_skips_all_collaborators() {
        let dir = tempfile::tempdir().unwrap();
        let existing = PageArtifact {
            keyword: "seo agency".to_string(),
            knowledge_backbone: "old facts".to_string(),
            content: PageContent::Sections(json!({"hero": {}})),
        };
        existing.write(dir.path(), "56767").unwrap();

        let research = Arc::new(StubResearch::new());
        let generator = Arc::new(StubGenerator::new("{}"));
        let pipeline = pipeline_with(
            Arc::clone(&research),
            Arc::clone(&generator),
            dir.path().to_path_buf(),
        );

        let summary = pipeline.run(&[WorkItem::new("seo agency", "56767")]).await;

        assert_eq!(summary.skipped, 1);
        assert_eq!(research.calls.load(Ordering::SeqCst), 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        // The artifact is untouched
        assert_eq!(PageArtifact::read(dir.path(), "56767").unwrap(), existing);
    }

    #[tokio::test]
    async fn one_failing_item_does_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let research = Arc::new(StubResearch::failing_for("ppc agency"));
        let generator = Arc::new(StubGenerator::new("{\"hero\": {}}"));
        let pipeline = pipeline_with(research, generator, dir.path().to_path_buf());

        let items = [
            WorkItem::new("seo agency", "1"),
            WorkItem::new("ppc agency", "2"),
            WorkItem::new("content marketing agency", "3"),
        ];
        let summary = pipeline.run(&items).await;

        assert_eq!(summary.generated, 2);
        assert_eq!(summary.failed, 1);
        assert!(PageArtifact::exists(dir.path(), "1"));
        assert!(!PageArtifact::exists(dir.path(), "2"));
        assert!(PageArtifact::exists(dir.path(), "3"));
    }

    #[tokio::test]
    async fn unparseable_generation_output_still_produces_an_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let research = Arc::new(StubResearch::new());
        let generator = Arc::new(StubGenerator::new("I could not produce JSON, sorry."));
        let pipeline = pipeline_with(research, generator, dir.path().to_path_buf());

        let summary = pipeline.run(&[WorkItem::new("seo agency", "7")]).await;
        assert_eq!(summary.generated, 1);

        let artifact = PageArtifact::read(dir.path(), "7").unwrap();
        match artifact.content {
            PageContent::Error(err) => {
                assert_eq!(err.raw, "I could not produce JSON, sorry.");
            }
            PageContent::Sections(_) => panic!("prose should not parse as sections"),
        }
    }

    #[tokio::test]
    async fn rerun_skips_error_content_artifacts_too() {
        let dir = tempfile::tempdir().unwrap();
        let research = Arc::new(StubResearch::new());
        let generator = Arc::new(StubGenerator::new("still not json"));
        let pipeline = pipeline_with(
            Arc::clone(&research),
            Arc::clone(&generator),
            dir.path().to_path_buf(),
        );

        let items = [WorkItem::new("seo agency", "9")];
        pipeline.run(&items).await;
        let second = pipeline.run(&items).await;

        assert_eq!(second.skipped, 1);
        assert_eq!(research.calls.load(Ordering::SeqCst), 1);
    }
}
