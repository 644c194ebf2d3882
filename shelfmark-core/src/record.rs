use serde::{Deserialize, Serialize};

/// One catalog entry for a serialized publication.
///
/// Records are immutable snapshots returned by the catalog service. The
/// browser filters, ranks, and re-displays them but never mutates them.
/// Search results carry only the flat fields; the graph edges (`staff`,
/// `relations`, `recommendations`) are populated by a detail fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: u64,
    pub title: TitleSet,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub status: Option<ReleaseStatus>,
    /// Total volume count; `None` means the catalog does not know.
    #[serde(default)]
    pub volumes: Option<u32>,
    /// Total chapter count; `None` means the catalog does not know.
    #[serde(default)]
    pub chapters: Option<u32>,
    #[serde(default)]
    pub popularity: Option<u32>,
    /// Mean score on a 0-100 scale.
    #[serde(default)]
    pub average_score: Option<u8>,
    #[serde(default)]
    pub favourites: Option<u32>,
    /// Publication format token (e.g. "MANGA", "NOVEL").
    #[serde(default)]
    pub format: Option<String>,
    /// Media kind on relation edge nodes (e.g. "MANGA", "ANIME").
    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<RankedTag>,
    #[serde(default)]
    pub staff: Option<StaffConnection>,
    #[serde(default)]
    pub relations: Option<RelationConnection>,
    #[serde(default)]
    pub recommendations: Option<RecommendationConnection>,
    #[serde(default)]
    pub stats: Option<MediaStats>,
}

impl MediaRecord {
    /// Primary author: the first staff credit with a story or art role,
    /// preferring the native-script name.
    pub fn author(&self) -> Option<&str> {
        let edges = &self.staff.as_ref()?.edges;
        edges
            .iter()
            .find(|e| matches!(e.role.as_str(), "Story & Art" | "Story" | "Art"))
            .and_then(|e| e.node.name.native.as_deref().or(e.node.name.full.as_deref()))
    }

    /// Relation edges, if a detail fetch populated them.
    pub fn relation_edges(&self) -> &[RelationEdge] {
        self.relations
            .as_ref()
            .map(|r| r.edges.as_slice())
            .unwrap_or_default()
    }

    /// Recommended records (ranked), if a detail fetch populated them.
    pub fn recommended(&self) -> impl Iterator<Item = &MediaRecord> {
        self.recommendations
            .as_ref()
            .map(|r| r.nodes.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|n| n.media_recommendation.as_ref())
    }
}

/// Script variants of a record's title. At least one is present in
/// practice, but every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleSet {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

/// Which title script to prefer when displaying a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleScript {
    #[default]
    Native,
    Romaji,
    English,
}

impl std::str::FromStr for TitleScript {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(Self::Native),
            "romaji" => Ok(Self::Romaji),
            "english" => Ok(Self::English),
            _ => Err(format!("unknown title script: {s}")),
        }
    }
}

impl TitleSet {
    /// Title in the preferred script, falling back native → romaji → english.
    pub fn preferred(&self, script: TitleScript) -> &str {
        let first = match script {
            TitleScript::Native => &self.native,
            TitleScript::Romaji => &self.romaji,
            TitleScript::English => &self.english,
        };
        first
            .as_deref()
            .or(self.native.as_deref())
            .or(self.romaji.as_deref())
            .or(self.english.as_deref())
            .unwrap_or("No Title")
    }
}

/// Cover image references, ranked by resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub extra_large: Option<String>,
}

impl CoverImage {
    /// Highest-resolution URL available.
    pub fn best(&self) -> Option<&str> {
        self.extra_large
            .as_deref()
            .or(self.large.as_deref())
            .or(self.medium.as_deref())
    }
}

/// Lifecycle status of a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseStatus {
    Finished,
    Releasing,
    NotYetReleased,
    Cancelled,
    Hiatus,
}

impl ReleaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Finished => "Finished",
            Self::Releasing => "Releasing",
            Self::NotYetReleased => "Not yet released",
            Self::Cancelled => "Cancelled",
            Self::Hiatus => "On hiatus",
        }
    }
}

/// A classification tag with its relevance rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedTag {
    pub name: String,
    #[serde(default)]
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffConnection {
    #[serde(default)]
    pub edges: Vec<StaffEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffEdge {
    pub node: StaffNode,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffNode {
    pub name: StaffName,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaffName {
    #[serde(default)]
    pub full: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

/// Typed edges to other records (sequels, side stories, adaptations, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationConnection {
    #[serde(default)]
    pub edges: Vec<RelationEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    pub node: MediaRecord,
    #[serde(default)]
    pub relation_type: String,
}

/// Untyped, ranked recommendation edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationConnection {
    #[serde(default)]
    pub nodes: Vec<RecommendationNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationNode {
    #[serde(default)]
    pub media_recommendation: Option<MediaRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStats {
    #[serde(default)]
    pub status_distribution: Vec<StatusCount>,
}

/// How many catalog users hold a record in each reading state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub amount: u64,
}
