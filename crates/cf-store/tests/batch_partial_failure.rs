//! Batch task creation where one item fails and is retried on its own.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use cf_analysis::{InMemoryFrameworks, TaskOptions, build_flow, synthesize_plan};
use cf_core::entities::{
    Assessment, Category, ControlStub, Framework, Question, ResponseMap, Section, TaskSpec,
};
use cf_store::{
    JsonlControlSink, JsonlTaskSink, StoreError, TaskCreationService, create_tasks,
    persist_controls,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Delegates to a JSONL sink but rejects each listed gap on its first attempt.
struct FlakyService {
    inner: JsonlTaskSink,
    fail_once: Mutex<HashSet<String>>,
    attempts: Mutex<Vec<String>>,
}

impl FlakyService {
    fn new(inner: JsonlTaskSink, failing: &[&str]) -> Self {
        Self {
            inner,
            fail_once: Mutex::new(failing.iter().map(ToString::to_string).collect()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

impl TaskCreationService for FlakyService {
    async fn create_task(&self, spec: &TaskSpec) -> Result<String, StoreError> {
        self.attempts.lock().unwrap().push(spec.gap_id.clone());
        let reject = self.fail_once.lock().unwrap().remove(&spec.gap_id);
        if reject {
            return Err(StoreError::Rejected {
                id: spec.gap_id.clone(),
                reason: "upstream timeout".to_string(),
            });
        }
        self.inner.create_task(spec).await
    }
}

fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.into(),
        text: text.into(),
        guidance: None,
        priority: None,
        references: Vec::new(),
        examples: Vec::new(),
    }
}

fn framework() -> Framework {
    Framework {
        id: "demo".into(),
        name: "Demo".into(),
        version: "1".into(),
        sections: vec![Section {
            id: "RS".into(),
            name: "Respond".into(),
            description: String::new(),
            categories: vec![Category {
                id: "RS.MA".into(),
                name: "Incident Management".into(),
                description: String::new(),
                questions: vec![
                    question("RS.MA-01", "Is the incident response plan executed?"),
                    question("RS.MA-02", "Are incident reports triaged?"),
                    question("RS.MA-03", "Are incidents categorized?"),
                ],
            }],
        }],
    }
}

fn plan() -> (Vec<TaskSpec>, Vec<ControlStub>) {
    let assessment = Assessment {
        id: "asm-7".into(),
        framework_id: "demo".into(),
        responses: ResponseMap::new(),
        evidence: BTreeMap::new(),
        evidence_links: BTreeMap::new(),
        updated_at: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
    };
    let provider: InMemoryFrameworks = [framework()].into_iter().collect();
    let flow = build_flow(&provider, &assessment).unwrap();
    let plan = synthesize_plan(
        &flow,
        &framework(),
        &TaskOptions::default(),
        Utc.with_ymd_and_hms(2026, 6, 2, 0, 0, 0).unwrap(),
    )
    .unwrap();
    (plan.tasks, plan.controls)
}

#[tokio::test]
async fn second_item_fails_and_retry_creates_only_it() {
    let tmp = TempDir::new().unwrap();
    let sink = JsonlTaskSink::open(tmp.path().join("tasks.jsonl")).unwrap();
    let service = FlakyService::new(sink, &["asm-7-RS.MA-02"]);
    let (specs, _) = plan();
    assert_eq!(specs.len(), 3);

    let mut outcome = create_tasks(&service, &specs).await;
    assert_eq!(outcome.succeeded_count, 2);
    assert_eq!(outcome.failed_indices(), vec![1]);
    assert_eq!(outcome.failures[0].gap_id, "asm-7-RS.MA-02");
    assert_eq!(
        outcome.failures[0].reason,
        "Service rejected asm-7-RS.MA-02: upstream timeout"
    );

    let retry_specs = outcome.failed_subset(&specs);
    assert_eq!(retry_specs.len(), 1);
    let retry = create_tasks(&service, &retry_specs).await;
    assert_eq!(retry.succeeded_count, 1);
    assert!(retry.is_complete());

    outcome.absorb_retry(retry);
    assert!(outcome.is_complete());
    assert_eq!(outcome.succeeded_count, 3);
    let indices: Vec<usize> = outcome.created.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    // Items 0 and 2 were attempted exactly once.
    assert_eq!(
        service.attempts(),
        vec!["asm-7-RS.MA-01", "asm-7-RS.MA-02", "asm-7-RS.MA-03", "asm-7-RS.MA-02"]
    );

    let written: Vec<String> = service
        .inner
        .records()
        .unwrap()
        .into_iter()
        .map(|record| record.spec.gap_id)
        .collect();
    assert_eq!(
        written,
        vec!["asm-7-RS.MA-01", "asm-7-RS.MA-03", "asm-7-RS.MA-02"]
    );
}

#[tokio::test]
async fn resubmitting_whole_batch_does_not_duplicate() {
    let tmp = TempDir::new().unwrap();
    let sink = JsonlTaskSink::open(tmp.path().join("tasks.jsonl")).unwrap();
    let (specs, _) = plan();

    let first = create_tasks(&sink, &specs).await;
    let second = create_tasks(&sink, &specs).await;

    assert_eq!(first.succeeded_count, 3);
    assert_eq!(first, second);
    assert_eq!(sink.records().unwrap().len(), 3);
}

#[tokio::test]
async fn empty_batch_is_complete() {
    let tmp = TempDir::new().unwrap();
    let sink = JsonlTaskSink::open(tmp.path().join("tasks.jsonl")).unwrap();

    let outcome = create_tasks(&sink, &[]).await;
    assert!(outcome.is_complete());
    assert_eq!(outcome.succeeded_count, 0);
    assert!(!sink.path().exists());
}

#[tokio::test]
async fn controls_persist_in_one_batch() {
    let tmp = TempDir::new().unwrap();
    let sink = JsonlControlSink::open(tmp.path().join("controls.jsonl")).unwrap();
    let (_, controls) = plan();

    let response = persist_controls(&sink, &controls).await.unwrap();
    assert_eq!(response.persisted, 3);
    assert_eq!(
        response.control_ids,
        vec!["ctl-asm-7-RS.MA-01", "ctl-asm-7-RS.MA-02", "ctl-asm-7-RS.MA-03"]
    );

    let again = persist_controls(&sink, &controls).await.unwrap();
    assert_eq!(again.persisted, 0);
    assert_eq!(sink.records().unwrap().len(), 3);
}
