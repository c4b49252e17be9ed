// src/pipeline/notify.rs

//! Promotion notification pipeline.
//!
//! One run: load page → load ledger → for each announcement filter, dedup,
//! notify → save ledger.
//!
//! The ledger is written exactly once per run that got past the page load,
//! whatever happened to individual items. A failed page load returns before
//! the ledger is touched.

use chrono::Utc;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{Announcement, RunContext};
use crate::pipeline::dedup::{record_sent, should_notify};
use crate::pipeline::{RunReport, RunState};
use crate::services::{AnnouncementExtractor, DocumentSource, Notifier};
use crate::storage::{KeyValueStore, SentSetStore};

/// Run the notifier once for `ctx.provider`.
pub async fn run_notifier(
    ctx: &RunContext,
    source: &dyn DocumentSource,
    store: &dyn KeyValueStore,
    notifier: &dyn Notifier,
) -> Result<RunReport> {
    let mut report = RunReport::new(&ctx.provider);
    log::info!("Checking {} promotions at {}", ctx.provider, ctx.page_url);

    let extractor = AnnouncementExtractor::new(&ctx.selectors).inspect_err(|_| {
        report.advance(RunState::Aborted);
    })?;

    let markup = match source.load(&ctx.page_url).await {
        Ok(markup) => markup,
        Err(e) => {
            report.advance(RunState::Aborted);
            log::error!("Failed to load {}: {}", ctx.page_url, e);
            return Err(e);
        }
    };
    let document = Html::parse_document(&markup);
    report.advance(RunState::DocumentLoaded);

    let ledger = SentSetStore::new(store, ctx.ledger_key());
    let (mut sent, origin) = ledger.load().await;
    report.ledger_origin = origin;
    log::debug!("Loaded {} ledger entries from '{}'", sent.len(), ledger.key());
    report.advance(RunState::SentSetLoaded);

    report.advance(RunState::Iterating);
    for announcement in extractor.extract(&document) {
        report.candidates += 1;
        log::info!("{}", announcement.title);

        if !ctx.filter.is_promotion_worthy(&announcement.title) {
            continue;
        }
        report.promotions += 1;

        if !should_notify(&announcement, &sent) {
            log::info!("--> Promotion has already been notified");
            report.already_notified += 1;
            continue;
        }

        log::info!("--> Sending email: {}", announcement.title);
        match deliver(notifier, &announcement, &ctx.recipients).await {
            Ok(()) => {
                record_sent(&announcement, &mut sent, Utc::now().timestamp());
                report.notified += 1;
            }
            Err(e) => {
                log::warn!("--> Failed to send '{}': {}", announcement.title, e);
                report.failed += 1;
            }
        }
    }

    report.advance(RunState::Finalizing);
    report.ledger_size = sent.len();
    log::info!(
        "{}: {} candidate(s), {} new notification(s), {} failed",
        ctx.provider,
        report.candidates,
        report.notified,
        report.failed
    );

    if let Err(e) = ledger.save(&sent).await {
        log::error!("Failed to save ledger '{}': {}", ledger.key(), e);
        report.advance(RunState::Aborted);
        return Err(AppError::Persist {
            key: ledger.key().to_string(),
            notified: report.notified,
            message: e.to_string(),
        });
    }

    report.advance(RunState::Done);
    Ok(report)
}

/// Send one announcement. No recipients means nothing to do.
async fn deliver(
    notifier: &dyn Notifier,
    announcement: &Announcement,
    recipients: &[String],
) -> Result<()> {
    if recipients.is_empty() {
        return Ok(());
    }
    notifier
        .send(announcement.subject(), announcement.body(), recipients)
        .await
}
