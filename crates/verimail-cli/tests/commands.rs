//! Command flows against in-memory storage and a fake service.

use std::sync::Mutex;

use serde_json::Value;
use verimail_cli::browse::Browser;
use verimail_cli::commands::{
    ExtractRequest, ShowRequest, run_add, run_check, run_extract, run_reset, run_show,
};
use verimail_cli::progress::Spinner;
use verimail_cli::summary::Styling;
use verimail_client::{ClientError, VerificationApi};
use verimail_ingest::Delimiter;
use verimail_model::{Reachability, ResultSet, VerificationResult};
use verimail_present::{Column, SortState};
use verimail_store::{MemoryStore, RESULTS_KEY, SessionStore, StoragePort, StoreError};

/// Answers every address with a verdict derived from its text.
#[derive(Default)]
struct FakeApi {
    fail_with: Option<u16>,
    seen: Mutex<Vec<Vec<String>>>,
}

impl FakeApi {
    fn failing(code: u16) -> Self {
        Self {
            fail_with: Some(code),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.seen.lock().unwrap().clone()
    }
}

impl VerificationApi for FakeApi {
    async fn check(&self, addresses: &[String]) -> verimail_client::Result<ResultSet> {
        self.seen.lock().unwrap().push(addresses.to_vec());
        if let Some(code) = self.fail_with {
            return Err(ClientError::Status {
                code,
                reason: "Service Unavailable".to_string(),
            });
        }
        let items = addresses
            .iter()
            .map(|address| {
                let status = if address.contains('@') {
                    Reachability::Safe
                } else {
                    Reachability::Invalid
                };
                VerificationResult::new(address.clone(), status)
            })
            .collect();
        Ok(ResultSet::from_items(items))
    }
}

/// Accepts everything except verdict writes.
#[derive(Default)]
struct NoResultsStore(MemoryStore);

impl StoragePort for NoResultsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.0.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> verimail_store::Result<()> {
        if key == RESULTS_KEY {
            return Err(StoreError::Unavailable {
                reason: "quota exceeded".to_string(),
            });
        }
        self.0.set(key, value)
    }

    fn remove(&mut self, key: &str) -> verimail_store::Result<()> {
        self.0.remove(key)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

#[tokio::test]
async fn check_returns_one_row_per_submitted_address() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_add(&mut session, &strings(&["a@x.y b@x.y", "a@x.y"])).unwrap();
    let api = FakeApi::default();

    let outcome = run_check(&mut session, &api, &[], &mut Spinner::hidden())
        .await
        .unwrap();

    assert_eq!(api.calls(), [strings(&["a@x.y", "b@x.y", "a@x.y"])]);
    assert_eq!(outcome.results.items.len(), 3);
    assert!(outcome.storage_warning.is_none());
    assert_eq!(session.results(), Some(outcome.results));
}

#[tokio::test]
async fn check_arguments_replace_the_stored_list() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_add(&mut session, &strings(&["old@x.y"])).unwrap();
    let api = FakeApi::default();

    run_check(&mut session, &api, &strings(&["new@x.y, other"]), &mut Spinner::hidden())
        .await
        .unwrap();

    assert_eq!(session.addresses(), ["new@x.y", "other"]);
    let results = session.results().unwrap();
    assert_eq!(results.stats.safe, 1);
    assert_eq!(results.stats.invalid, 1);
}

#[tokio::test]
async fn check_with_empty_list_does_not_call_the_service() {
    let mut session = SessionStore::new(MemoryStore::new());
    let api = FakeApi::default();
    let err = run_check(&mut session, &api, &[], &mut Spinner::hidden())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no addresses"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn failed_check_keeps_previous_results() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_add(&mut session, &strings(&["a@x.y"])).unwrap();
    run_check(&mut session, &FakeApi::default(), &[], &mut Spinner::hidden())
        .await
        .unwrap();
    let before = session.results();

    let err = run_check(&mut session, &FakeApi::failing(503), &[], &mut Spinner::hidden())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Statuscode 503: Service Unavailable");
    assert_eq!(session.results(), before);
    assert_eq!(session.addresses(), ["a@x.y"]);
}

#[tokio::test]
async fn unpersisted_results_are_still_returned() {
    let mut session = SessionStore::new(NoResultsStore::default());
    let outcome = run_check(
        &mut session,
        &FakeApi::default(),
        &strings(&["a@x.y"]),
        &mut Spinner::hidden(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.results.items.len(), 1);
    let warning = outcome.storage_warning.unwrap();
    assert!(warning.contains("quota exceeded"), "{warning}");
    assert!(session.results().is_none());
}

#[tokio::test]
async fn extract_and_insert_appends_to_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.csv");
    std::fs::write(&path, "name,E-post\nKari,kari@example.no\nOla,\nPer,per@example.no\n").unwrap();

    let mut session = SessionStore::new(MemoryStore::new());
    run_add(&mut session, &strings(&["first@x.y"])).unwrap();

    let request = ExtractRequest {
        path,
        delimiter: Delimiter::Comma,
        column: None,
        trim: false,
        insert: true,
    };
    let outcome = run_extract(&mut session, &request).await.unwrap();

    assert_eq!(outcome.selected.as_deref(), Some("E-post"));
    assert_eq!(outcome.addresses, ["kari@example.no", "per@example.no"]);
    assert_eq!(
        outcome.summary.as_deref(),
        Some("We found 2 emails ready to use.")
    );
    assert_eq!(outcome.stored, Some(3));
    assert_eq!(
        session.addresses(),
        ["first@x.y", "kari@example.no", "per@example.no"]
    );
}

#[tokio::test]
async fn extract_with_unknown_column_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.csv");
    std::fs::write(&path, "name,email\nAda,ada@example.com\n").unwrap();

    let mut session = SessionStore::new(MemoryStore::new());
    let request = ExtractRequest {
        path,
        delimiter: Delimiter::Comma,
        column: Some("mail".to_string()),
        trim: false,
        insert: true,
    };
    let outcome = run_extract(&mut session, &request).await.unwrap();

    assert!(!outcome.column_known);
    assert!(outcome.addresses.is_empty());
    assert_eq!(outcome.stored, None);
    assert!(session.addresses().is_empty());
}

#[tokio::test]
async fn extract_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = SessionStore::new(MemoryStore::new());
    let request = ExtractRequest {
        path: dir.path().join("absent.csv"),
        delimiter: Delimiter::Comma,
        column: None,
        trim: false,
        insert: false,
    };
    assert!(run_extract(&mut session, &request).await.is_err());
}

#[tokio::test]
async fn show_applies_and_remembers_sort() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_check(
        &mut session,
        &FakeApi::default(),
        &strings(&["b@x.y", "a@x.y", "broken"]),
        &mut Spinner::hidden(),
    )
    .await
    .unwrap();

    let request = ShowRequest {
        sort: vec![Column::Email],
        ..ShowRequest::default()
    };
    let rendered = run_show(&mut session, &request, 60, Styling::Never)
        .unwrap()
        .unwrap();
    let a = rendered.find("a@x.y").unwrap();
    let b = rendered.find("b@x.y").unwrap();
    assert!(a < b);
    assert!(rendered.contains("Sort: Email ▲"));
    assert!(rendered.contains("Rows 1-3 of 3"));
    assert_eq!(
        session.view::<SortState>(),
        Some(SortState::ascending(Column::Email))
    );

    // The next invocation starts from the remembered sort.
    let filtered = ShowRequest {
        status: Some(Reachability::Invalid),
        ..ShowRequest::default()
    };
    let rendered = run_show(&mut session, &filtered, 60, Styling::Never)
        .unwrap()
        .unwrap();
    assert!(rendered.contains("Sort: Email ▲"));
    assert!(rendered.contains("broken"));
    assert!(!rendered.contains("a@x.y"));
    assert!(rendered.contains("Rows 1-1 of 1"));
}

#[tokio::test]
async fn show_rejects_status_absent_from_results() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_check(
        &mut session,
        &FakeApi::default(),
        &strings(&["a@x.y", "broken"]),
        &mut Spinner::hidden(),
    )
    .await
    .unwrap();

    let request = ShowRequest {
        status: Some(Reachability::Banned),
        sort: vec![Column::Email],
        ..ShowRequest::default()
    };
    let err = run_show(&mut session, &request, 60, Styling::Never).unwrap_err();

    assert_eq!(
        err.to_string(),
        "No results have status Banned; choose one of: Safe, Invalid"
    );
    assert!(session.view::<SortState>().is_none());

    let rendered = run_show(&mut session, &ShowRequest::default(), 60, Styling::Never)
        .unwrap()
        .unwrap();
    assert!(rendered.contains("Status: All [Safe|Invalid]"));
}

#[tokio::test]
async fn browse_rejects_status_absent_from_results() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_check(
        &mut session,
        &FakeApi::default(),
        &strings(&["a@x.y"]),
        &mut Spinner::hidden(),
    )
    .await
    .unwrap();

    let mut browser = Browser::open(&mut session, Styling::Never)
        .unwrap()
        .with_measure(|| 60);
    let mut out = Vec::new();
    browser
        .run(&b"status risky\nstatus safe\nq\n"[..], &mut out)
        .await
        .unwrap();

    assert_eq!(browser.view().status_filter(), Some(Reachability::Safe));
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("No results have status Risky; choose one of: Safe"));
    assert!(out.contains("Status: Safe [Safe]"));
}

#[tokio::test]
async fn reset_clears_list_and_results() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_check(
        &mut session,
        &FakeApi::default(),
        &strings(&["a@x.y"]),
        &mut Spinner::hidden(),
    )
    .await
    .unwrap();

    run_reset(&mut session).unwrap();

    assert!(session.addresses().is_empty());
    assert!(session.results().is_none());
    assert!(
        run_show(&mut session, &ShowRequest::default(), 60, Styling::Never)
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn browse_applies_only_the_settled_search() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_check(
        &mut session,
        &FakeApi::default(),
        &strings(&["alice@x.y", "bob@x.y"]),
        &mut Spinner::hidden(),
    )
    .await
    .unwrap();

    let mut browser = Browser::open(&mut session, Styling::Never)
        .unwrap()
        .with_measure(|| 60);
    let mut out = Vec::new();
    browser
        .run(&b"/a\n/al\n/alice\n"[..], &mut out)
        .await
        .unwrap();

    assert_eq!(browser.view().global_filter(), Some("alice"));
    assert_eq!(browser.view().row_count(), 1);
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Search: \"alice\""));
    assert!(!out.contains("Search: \"al\""));
    assert!(!out.contains("Search: \"a\""));
}

#[tokio::test]
async fn browse_sort_and_chart_are_persisted() {
    let mut session = SessionStore::new(MemoryStore::new());
    run_check(
        &mut session,
        &FakeApi::default(),
        &strings(&["a@x.y"]),
        &mut Spinner::hidden(),
    )
    .await
    .unwrap();

    {
        let mut browser = Browser::open(&mut session, Styling::Never)
            .unwrap()
            .with_measure(|| 60);
        let mut out = Vec::new();
        browser
            .run(&b"sort status\nsort status\nchart\nq\n"[..], &mut out)
            .await
            .unwrap();
    }

    assert_eq!(
        session.view::<SortState>(),
        Some(SortState::descending(Column::Status))
    );
    assert!(!session.show_chart());
}
