use anyhow::{bail, Context, Result};
use tokio::time::{self, MissedTickBehavior};
use watch_core::LinkExtractor;
use watch_engine::{
    Checker, CycleOutcome, DiscordNotifier, Fetcher, ListStore, Notifier, ReqwestFetcher,
};
use watch_logging::{watch_error, watch_info};

use crate::settings::Settings;

pub async fn run(settings: Settings, once: bool) -> Result<()> {
    let store = ListStore::open(&settings.state_path)
        .context("failed to load the stored link list")?;
    let fetcher = ReqwestFetcher::new(settings.fetch_settings());
    let notifier = DiscordNotifier::new(settings.discord_settings())
        .context("failed to build the Discord client")?;
    let mut checker = Checker::new(
        fetcher,
        store,
        settings.source_url.as_str(),
        LinkExtractor::new(settings.link_filter()),
    );

    if once {
        return run_cycle(&mut checker, &notifier, settings.exit_on_config_error).await;
    }

    watch_info!(
        "Watching {} every {}s",
        checker.source_url(),
        settings.interval_secs
    );
    let mut ticks = time::interval(settings.interval());
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticks.tick() => {
                run_cycle(&mut checker, &notifier, settings.exit_on_config_error).await?;
            }
            _ = &mut shutdown => {
                watch_info!("Shutting down");
                return Ok(());
            }
        }
    }
}

/// Runs one check and decides whether its outcome should stop the watcher.
pub async fn run_cycle<F: Fetcher>(
    checker: &mut Checker<F>,
    notifier: &dyn Notifier,
    exit_on_config_error: bool,
) -> Result<()> {
    let report = match checker.check(notifier).await? {
        CycleOutcome::Skipped { .. } => return Ok(()),
        CycleOutcome::Completed(report) => report,
    };

    if !report.new_items.is_empty() {
        watch_info!(
            "Announced {} of {} new item(s)",
            report.delivered_count(),
            report.new_items.len()
        );
    }

    if let Some(failure) = report.fatal_failure() {
        if exit_on_config_error {
            bail!("notifier is misconfigured: {}", failure.error);
        }
        watch_error!("Notifier is misconfigured, continuing: {}", failure.error);
    }
    Ok(())
}
