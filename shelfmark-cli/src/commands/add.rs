use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelfmark_catalog::{AniListClient, CatalogService};
use shelfmark_core::MediaRecord;
use shelfmark_notes::VaultStore;

use crate::commands::spinner;
use crate::config::Config;
use crate::error::CliError;

pub(crate) fn run_add(config: &Config, id: u64, no_cover: bool) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    rt.block_on(async {
        let store = VaultStore::new(&config.vault_root);
        if let Some(path) = store.find_by_id(id)? {
            log::info!("Note already exists: {}", path.display());
            return Ok(());
        }

        let client = AniListClient::new()?;
        let pb = spinner("Fetching record...");
        let record = client.detail(id).await;
        pb.finish_and_clear();
        let record = record?.ok_or_else(|| CliError::other(format!("no catalog entry with id {id}")))?;

        let cover = if no_cover {
            None
        } else {
            fetch_cover(&client, &store, &record).await
        };

        let path = store.create_note(&record, config.title, cover.as_deref())?;
        log::info!(
            "{} Created {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            path.display(),
        );
        Ok(())
    })
}

/// Download and save the best cover image, if the record has one. Cover
/// failures never block note creation.
async fn fetch_cover(
    client: &AniListClient,
    store: &VaultStore,
    record: &MediaRecord,
) -> Option<String> {
    let url = record.cover_image.as_ref()?.best()?;
    let ext = image_extension(url);
    match client.download_image(url).await {
        Ok(bytes) => match store.save_cover(record.id, ext, &bytes) {
            Ok(rel) => Some(rel),
            Err(e) => {
                log::warn!("Failed to save cover: {e}");
                None
            }
        },
        Err(e) => {
            log::warn!("Failed to download cover: {e}");
            None
        }
    }
}

/// Extension from the final path segment of an image URL.
fn image_extension(url: &str) -> &str {
    url.split(['?', '#'])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .and_then(|file| file.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && ext.len() <= 4)
        .unwrap_or("jpg")
}
