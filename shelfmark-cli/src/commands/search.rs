use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelfmark_catalog::{AniListClient, CatalogSession, Viewport};
use shelfmark_core::FilterState;

use crate::commands::spinner;
use crate::config::Config;
use crate::error::CliError;

pub(crate) fn run_search(config: &Config, filter: FilterState, limit: u32) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    rt.block_on(async {
        let client = AniListClient::new()?;
        let mut session = CatalogSession::new(client);

        let pb = spinner("Searching catalog...");
        let fetched = session.start(filter).await;
        if let Err(e) = fetched {
            pb.finish_and_clear();
            return Err(CliError::from(e));
        }
        // A viewport of limit rows is filled once a record overflows it,
        // so backfill runs until at least `limit` records are loaded or
        // the catalog runs dry.
        let filled = session
            .fill_viewport(Viewport::rows(limit.saturating_sub(1)))
            .await;
        pb.finish_and_clear();
        filled?;

        let visible = session.visible_records();
        if visible.is_empty() {
            log::info!("No results.");
            return Ok(());
        }

        for (i, record) in visible.iter().enumerate().take(limit as usize) {
            let title = record.title.preferred(config.title);
            let status = record.status.map_or("Unknown", |s| s.label());
            let volumes = match record.volumes {
                Some(v) => format!("{v} vols"),
                None => "? vols".to_owned(),
            };
            let score = record
                .average_score
                .map(|s| format!("  {s}%"))
                .unwrap_or_default();
            log::info!(
                "{:>3}. {} {}  ({}, {}{})",
                i + 1,
                format!("[{}]", record.id).if_supports_color(Stdout, |t| t.dimmed()),
                title.if_supports_color(Stdout, |t| t.bold()),
                status,
                volumes,
                score,
            );
        }

        let shown = visible.len().min(limit as usize);
        if visible.len() > shown || session.has_more() {
            log::info!("");
            log::info!(
                "Showing {shown} of {}+ results; raise --limit to fetch more.",
                visible.len()
            );
        }
        Ok(())
    })
}
