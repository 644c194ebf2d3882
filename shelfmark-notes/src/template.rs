//! Markdown note scaffolding for a newly registered publication.

use shelfmark_core::{MediaRecord, TitleScript};

/// Vault subdirectory holding reading-log notes.
pub const BOOK_LOG_DIR: &str = "booklog";

/// Vault subdirectory holding downloaded cover images.
pub const ATTACHMENTS_DIR: &str = "attachments/book";

/// File name for a record's note: `{id}_{sanitized title}.md`. The id
/// prefix is what [`VaultStore::find_by_id`](crate::VaultStore::find_by_id)
/// scans for.
pub fn note_filename(record: &MediaRecord, script: TitleScript) -> String {
    let title = sanitize_file_name(record.title.preferred(script));
    format!("{}_{}.md", record.id, title)
}

/// Render the full note body: frontmatter, optional cover embed, heading,
/// and a `bookLog` block ready for the patcher.
pub fn render_note(record: &MediaRecord, script: TitleScript, cover: Option<&str>) -> String {
    let title = record.title.preferred(script);
    let author = record.author().unwrap_or("");
    let added = chrono::Local::now().format("%Y-%m-%d");

    let mut tags = vec!["booklog".to_owned()];
    tags.extend(
        record
            .genres
            .iter()
            .map(|g| format!("booklog_{}", sanitize_tag(g))),
    );
    let tag_lines: Vec<String> = tags.iter().map(|t| format!("  - {t}")).collect();

    let cover_embed = match cover {
        Some(path) => format!(
            "<div contenteditable=\"false\"><img src=\"{path}\" alt=\"{title}\" width=\"300\" /></div>\n\n"
        ),
        None => String::new(),
    };

    format!(
        "---\n\
         anilist_id: {id}\n\
         title: \"{title}\"\n\
         author: \"{author}\"\n\
         added: {added}\n\
         tags:\n\
         {tags}\n\
         ---\n\
         \n\
         {cover_embed}# {title}\n\
         \n\
         ```bookLog\n\
         media_id: {id}\n\
         status: plan_to_read\n\
         ```\n",
        id = record.id,
        tags = tag_lines.join("\n"),
    )
}

/// Strip characters that are unsafe in note file names.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Normalize a genre into a tag token: whitespace to underscores, then
/// only word characters kept.
fn sanitize_tag(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}
