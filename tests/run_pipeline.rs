//! End-to-end runs of the notifier against in-memory collaborators.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use promo_notify::{
    error::{AppError, Result},
    models::{Config, RunContext, SentSet},
    pipeline::{RunState, run_notifier},
    services::{DocumentSource, Notifier},
    storage::{KeyValueStore, LedgerOrigin, MemoryStore},
    utils::fingerprint,
};

const TITLE_A: &str = "Giảm 50% cho khách hàng mới";
const DESC_A: &str = "Áp dụng đến hết tháng";
const TITLE_B: &str = "Ưu đãi 20%";

const PAGE: &str = r#"
<html><body>
  <div class="news_items">
    <a class="entry-title" href="/a">Giảm 50% cho khách hàng mới</a>
    <div class="entry-summary"><p>Áp dụng đến hết tháng</p></div>
  </div>
  <div class="news_items">
    <a class="entry-title" href="/b">Ưu đãi 20%</a>
  </div>
</body></html>
"#;

const EMPTY_PAGE: &str = "<html><body><p>Chưa có khuyến mãi</p></body></html>";

struct StaticSource(Option<&'static str>);

#[async_trait]
impl DocumentSource for StaticSource {
    async fn load(&self, url: &str) -> Result<String> {
        self.0
            .map(str::to_string)
            .ok_or_else(|| AppError::document(url, "connection reset"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Sent {
    subject: String,
    body: String,
    recipients: Vec<String>,
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingNotifier {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()> {
        self.sent.lock().unwrap().push(Sent {
            subject: subject.to_string(),
            body: body.to_string(),
            recipients: recipients.to_vec(),
        });
        if self.fail {
            return Err(AppError::mail("502 Bad Gateway"));
        }
        Ok(())
    }
}

/// Memory store that counts writes and can refuse them.
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    saves: AtomicUsize,
    reject_writes: bool,
}

impl CountingStore {
    fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.reject_writes {
            return Err(AppError::store("quota exceeded"));
        }
        self.inner.set(key, value).await
    }
}

fn context(recipients: &[&str]) -> RunContext {
    let recipients = recipients.iter().map(|r| r.to_string()).collect();
    RunContext::from_config(&Config::default(), "mobifone", recipients).unwrap()
}

fn stored_ledger(store: &CountingStore) -> SentSet {
    let blob = store.inner.value("sent_promos_mobifone").unwrap().unwrap();
    SentSet::from_blob(&blob).unwrap()
}

#[tokio::test]
async fn test_notifies_only_half_price_items() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    let notifier = RecordingNotifier::default();

    let report = run_notifier(&ctx, &StaticSource(Some(PAGE)), &store, &notifier)
        .await
        .unwrap();

    assert_eq!(
        notifier.sent(),
        vec![Sent {
            subject: TITLE_A.to_string(),
            body: DESC_A.to_string(),
            recipients: vec!["a@example.com".to_string()],
        }]
    );

    let ledger = stored_ledger(&store);
    let keys: Vec<&str> = ledger.fingerprints().collect();
    let expected = fingerprint(&format!("{TITLE_A}{DESC_A}"));
    assert_eq!(keys, vec![expected.as_str()]);
    assert!(!ledger.contains(&fingerprint(TITLE_B)));

    assert_eq!(report.candidates, 2);
    assert_eq!(report.promotions, 1);
    assert_eq!(report.notified, 1);
    assert_eq!(report.ledger_size, 1);
    assert_eq!(report.ledger_origin, LedgerOrigin::Missing);
    assert_eq!(report.state, RunState::Done);
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn test_replay_sends_nothing() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    let source = StaticSource(Some(PAGE));

    let first = RecordingNotifier::default();
    run_notifier(&ctx, &source, &store, &first).await.unwrap();
    assert_eq!(first.sent().len(), 1);

    let second = RecordingNotifier::default();
    let report = run_notifier(&ctx, &source, &store, &second).await.unwrap();

    assert!(second.sent().is_empty());
    assert_eq!(report.already_notified, 1);
    assert_eq!(report.notified, 0);
    assert_eq!(report.ledger_origin, LedgerOrigin::Stored);
    assert_eq!(stored_ledger(&store).len(), 1);
    assert_eq!(store.saves(), 2);
}

#[tokio::test]
async fn test_empty_page_still_saves_once() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    let notifier = RecordingNotifier::default();

    let report = run_notifier(&ctx, &StaticSource(Some(EMPTY_PAGE)), &store, &notifier)
        .await
        .unwrap();

    assert_eq!(report.candidates, 0);
    assert_eq!(store.saves(), 1);
    assert!(stored_ledger(&store).is_empty());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_empty_page_keeps_existing_ledger() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    store
        .inner
        .insert("sent_promos_mobifone", r#"{"DEADBEEF":1700000000}"#)
        .unwrap();

    run_notifier(&ctx, &StaticSource(Some(EMPTY_PAGE)), &store, &RecordingNotifier::default())
        .await
        .unwrap();

    let ledger = stored_ledger(&store);
    assert_eq!(ledger.sent_at("DEADBEEF"), Some(1_700_000_000));
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn test_document_failure_skips_save() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    let notifier = RecordingNotifier::default();

    let err = run_notifier(&ctx, &StaticSource(None), &store, &notifier)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Document { .. }));
    assert_eq!(store.saves(), 0);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_send_failure_is_not_recorded() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    let notifier = RecordingNotifier::failing();

    let report = run_notifier(&ctx, &StaticSource(Some(PAGE)), &store, &notifier)
        .await
        .unwrap();

    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.notified, 0);
    assert_eq!(store.saves(), 1);
    assert!(stored_ledger(&store).is_empty());

    // Next run retries the same item.
    let retry = RecordingNotifier::default();
    let report = run_notifier(&ctx, &StaticSource(Some(PAGE)), &store, &retry)
        .await
        .unwrap();
    assert_eq!(retry.sent().len(), 1);
    assert_eq!(report.notified, 1);
}

#[tokio::test]
async fn test_persist_failure_is_terminal() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore {
        reject_writes: true,
        ..CountingStore::default()
    };
    let notifier = RecordingNotifier::default();

    let err = run_notifier(&ctx, &StaticSource(Some(PAGE)), &store, &notifier)
        .await
        .unwrap_err();

    match err {
        AppError::Persist { key, notified, .. } => {
            assert_eq!(key, "sent_promos_mobifone");
            assert_eq!(notified, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    // Mail already went out.
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(store.saves(), 1);
}

#[tokio::test]
async fn test_corrupt_ledger_renotifies() {
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    store
        .inner
        .insert("sent_promos_mobifone", "{not json")
        .unwrap();
    let notifier = RecordingNotifier::default();

    let report = run_notifier(&ctx, &StaticSource(Some(PAGE)), &store, &notifier)
        .await
        .unwrap();

    assert_eq!(report.ledger_origin, LedgerOrigin::Corrupt);
    assert_eq!(notifier.sent().len(), 1);
    assert_eq!(stored_ledger(&store).len(), 1);
}

#[tokio::test]
async fn test_no_recipients_records_without_sending() {
    let ctx = context(&[]);
    let store = CountingStore::default();
    let notifier = RecordingNotifier::default();

    let report = run_notifier(&ctx, &StaticSource(Some(PAGE)), &store, &notifier)
        .await
        .unwrap();

    assert!(notifier.sent().is_empty());
    assert_eq!(report.notified, 1);
    assert_eq!(stored_ledger(&store).len(), 1);
}

#[tokio::test]
async fn test_description_fallback_in_body() {
    let page = r#"
        <div class="news_items"><a class="entry-title">Tặng 50% data</a></div>
    "#;
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    let notifier = RecordingNotifier::default();

    run_notifier(&ctx, &StaticSource(Some(page)), &store, &notifier)
        .await
        .unwrap();

    let sent = notifier.sent();
    assert_eq!(sent[0].subject, "Tặng 50% data");
    assert_eq!(sent[0].body, "Tặng 50% data");
    assert!(stored_ledger(&store).contains(&fingerprint("Tặng 50% data")));
}

#[tokio::test]
async fn test_inline_markup_is_notified_and_recorded() {
    let page = r#"
        <div class="news_items">
          <a class="entry-title">Giảm <b>50</b>% cước</a>
          <div class="entry-summary"><p>Áp dụng</p><p>đến <i>hết</i> tháng</p></div>
        </div>
    "#;
    let ctx = context(&["a@example.com"]);
    let store = CountingStore::default();
    let notifier = RecordingNotifier::default();

    let report = run_notifier(&ctx, &StaticSource(Some(page)), &store, &notifier)
        .await
        .unwrap();

    assert_eq!(report.notified, 1);
    let sent = notifier.sent();
    assert_eq!(sent[0].subject, "Giảm 50% cước");
    assert_eq!(sent[0].body, "Áp dụng\nđến hết tháng");

    let ledger = stored_ledger(&store);
    let keys: Vec<&str> = ledger.fingerprints().collect();
    let expected = fingerprint("Giảm 50% cướcÁp dụng\nđến hết tháng");
    assert_eq!(keys, vec![expected.as_str()]);
}
