use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelfmark_catalog::{AniListClient, CatalogService};
use shelfmark_core::tags;

use crate::commands::spinner;
use crate::config::Config;
use crate::error::CliError;

pub(crate) fn run_show(config: &Config, id: u64) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    rt.block_on(async {
        let client = AniListClient::new()?;
        let pb = spinner("Fetching details...");
        let record = client.detail(id).await;
        pb.finish_and_clear();

        let Some(record) = record? else {
            log::warn!("No catalog entry with id {id}");
            return Ok(());
        };

        log::info!(
            "{}",
            record
                .title
                .preferred(config.title)
                .if_supports_color(Stdout, |t| t.bold()),
        );
        if let Some(ref romaji) = record.title.romaji {
            log::info!("  {romaji}");
        }
        log::info!("");

        let status = record.status.map_or("Unknown", |s| s.label());
        let volumes = record
            .volumes
            .map_or("unknown".to_owned(), |v| v.to_string());
        let chapters = record
            .chapters
            .map_or("unknown".to_owned(), |c| c.to_string());
        log::info!("  Status:    {status}");
        log::info!("  Volumes:   {volumes}");
        log::info!("  Chapters:  {chapters}");
        if let Some(author) = record.author() {
            log::info!("  Author:    {author}");
        }
        if let Some(score) = record.average_score {
            log::info!("  Score:     {score}%");
        }
        if let Some(favourites) = record.favourites {
            log::info!("  Favorites: {favourites}");
        }
        if !record.genres.is_empty() {
            log::info!("  Genres:    {}", record.genres.join(", "));
        }
        if !record.tags.is_empty() {
            let top: Vec<String> = record
                .tags
                .iter()
                .take(8)
                .map(|t| tags::display_tag(&t.name))
                .collect();
            log::info!("  Tags:      {}", top.join(", "));
        }

        let relations = record.relation_edges();
        if !relations.is_empty() {
            log::info!("");
            log::info!("Related:");
            for edge in relations {
                let kind = edge.node.media_type.as_deref().unwrap_or("?");
                log::info!(
                    "  [{}] {} ({}, {})",
                    edge.node.id,
                    edge.node.title.preferred(config.title),
                    edge.relation_type,
                    kind,
                );
            }
        }

        let recommended: Vec<_> = record.recommended().collect();
        if !recommended.is_empty() {
            log::info!("");
            log::info!("Recommended:");
            for rec in recommended {
                log::info!("  [{}] {}", rec.id, rec.title.preferred(config.title));
            }
        }

        if let Some(ref stats) = record.stats {
            if !stats.status_distribution.is_empty() {
                log::info!("");
                log::info!("Readers:");
                for entry in &stats.status_distribution {
                    log::info!("  {:<10} {}", entry.status, entry.amount);
                }
            }
        }
        Ok(())
    })
}
