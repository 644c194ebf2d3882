//! Bilingual tag translation between the catalog's canonical English tag
//! names and the Japanese display form shown to the user.

/// Canonical tag names and their Japanese translations.
const TAG_TABLE: &[(&str, &str)] = &[
    ("4-koma", "4コマ"),
    ("Action", "アクション"),
    ("Adventure", "冒険"),
    ("Comedy", "コメディ"),
    ("Demons", "悪魔"),
    ("Drama", "ドラマ"),
    ("Ecchi", "エッチ"),
    ("Fantasy", "ファンタジー"),
    ("Game", "ゲーム"),
    ("Harem", "ハーレム"),
    ("Historical", "歴史"),
    ("Horror", "ホラー"),
    ("Isekai", "異世界"),
    ("Josei", "女性"),
    ("Kids", "子供向け"),
    ("Magic", "魔法"),
    ("Martial Arts", "武道"),
    ("Mecha", "メカ"),
    ("Military", "ミリタリー"),
    ("Music", "音楽"),
    ("Mystery", "ミステリー"),
    ("Parody", "パロディ"),
    ("Police", "警察"),
    ("Post-Apocalyptic", "ポストアポカリプス"),
    ("Psychological", "心理"),
    ("Romance", "恋愛"),
    ("School", "学園"),
    ("Sci-Fi", "SF"),
    ("Seinen", "青年"),
    ("Shoujo", "少女"),
    ("Shounen", "少年"),
    ("Slice of Life", "日常"),
    ("Space", "宇宙"),
    ("Sports", "スポーツ"),
    ("Super Power", "超能力"),
    ("Supernatural", "超常現象"),
    ("Thriller", "サスペンス"),
    ("Vampire", "吸血鬼"),
    ("Yaoi", "ボーイズラブ"),
    ("Yuri", "百合"),
];

/// Display form of a canonical tag: `日本語 (English)` when a translation
/// exists, the canonical name unchanged otherwise.
pub fn display_tag(canonical: &str) -> String {
    match TAG_TABLE.iter().find(|(en, _)| *en == canonical) {
        Some((en, jp)) => format!("{jp} ({en})"),
        None => canonical.to_owned(),
    }
}

/// Reverse of [`display_tag`]: extracts the canonical name from a display
/// form, passing through values that are already canonical.
pub fn canonical_tag(display: &str) -> &str {
    let trimmed = display.trim();
    match (trimmed.rfind('('), trimmed.ends_with(')')) {
        (Some(open), true) if open + 1 < trimmed.len() - 1 => {
            &trimmed[open + 1..trimmed.len() - 1]
        }
        _ => trimmed,
    }
}
