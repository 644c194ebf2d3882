use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::MediaRecord;
use crate::tags;

/// Sort orderings understood by the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "POPULARITY_DESC")]
    PopularityDesc,
    #[serde(rename = "SCORE_DESC")]
    ScoreDesc,
    #[serde(rename = "FAVOURITES_DESC")]
    FavouritesDesc,
    #[serde(rename = "UPDATED_AT_DESC")]
    UpdatedAtDesc,
}

impl SortKey {
    pub fn as_request_value(&self) -> &'static str {
        match self {
            Self::PopularityDesc => "POPULARITY_DESC",
            Self::ScoreDesc => "SCORE_DESC",
            Self::FavouritesDesc => "FAVOURITES_DESC",
            Self::UpdatedAtDesc => "UPDATED_AT_DESC",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POPULARITY_DESC" | "popularity" => Ok(Self::PopularityDesc),
            "SCORE_DESC" | "score" => Ok(Self::ScoreDesc),
            "FAVOURITES_DESC" | "favourites" => Ok(Self::FavouritesDesc),
            "UPDATED_AT_DESC" | "updated" => Ok(Self::UpdatedAtDesc),
            _ => Err(format!("unknown sort key: {s}")),
        }
    }
}

/// Publication format criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormatFilter {
    #[default]
    #[serde(rename = "ANY")]
    Any,
    #[serde(rename = "MANGA")]
    Manga,
    #[serde(rename = "NOVEL")]
    Novel,
}

impl FormatFilter {
    /// Request-parameter value; `None` when unspecified.
    pub fn as_request_value(&self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            Self::Manga => Some("MANGA"),
            Self::Novel => Some("NOVEL"),
        }
    }
}

impl FromStr for FormatFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANY" | "any" => Ok(Self::Any),
            "MANGA" | "manga" => Ok(Self::Manga),
            "NOVEL" | "novel" => Ok(Self::Novel),
            _ => Err(format!("unknown format: {s}")),
        }
    }
}

/// Volume-count bucket criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeBucket {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "5")]
    AtMost5,
    #[serde(rename = "10")]
    AtMost10,
    #[serde(rename = "20")]
    AtMost20,
    #[serde(rename = "more")]
    MoreThan20,
}

impl VolumeBucket {
    /// Server-side volume bounds for this bucket, as
    /// `(greater_than, lesser_than)`. The service treats both bounds as
    /// exclusive, so "at most N" becomes an upper bound of N + 1 and
    /// "more than 20" a lower bound of 20.
    pub fn bounds(&self) -> (Option<u32>, Option<u32>) {
        match self {
            Self::Any => (None, None),
            Self::AtMost5 => (None, Some(6)),
            Self::AtMost10 => (None, Some(11)),
            Self::AtMost20 => (None, Some(21)),
            Self::MoreThan20 => (Some(20), None),
        }
    }
}

impl FromStr for VolumeBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Self::Any),
            "5" => Ok(Self::AtMost5),
            "10" => Ok(Self::AtMost10),
            "20" => Ok(Self::AtMost20),
            "more" => Ok(Self::MoreThan20),
            _ => Err(format!("unknown volume bucket: {s} (use any|5|10|20|more)")),
        }
    }
}

/// Release-era criterion: any era, or a single decade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EraBucket {
    #[default]
    Any,
    /// Start year of the decade (e.g. 1990 for the 1990s).
    Decade(u16),
}

impl fmt::Display for EraBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Decade(d) => write!(f, "{d}s"),
        }
    }
}

// Saved as its token form so stale snapshots decay to `Any` like the
// other criteria.
impl Serialize for EraBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EraBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(token.parse().unwrap_or_default())
    }
}

impl EraBucket {
    /// Inclusive start and exclusive end of the decade in the catalog's
    /// YYYYMMDD fuzzy-date integer encoding.
    pub fn date_range(&self) -> Option<(u32, u32)> {
        match *self {
            Self::Any => None,
            Self::Decade(d) => {
                let d = u32::from(d);
                Some((d * 10_000 + 101, (d + 10) * 10_000 + 101))
            }
        }
    }
}

impl FromStr for EraBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            return Ok(Self::Any);
        }
        let year: u16 = s
            .trim_end_matches('s')
            .parse()
            .map_err(|_| format!("unknown era: {s} (use any or a decade like 1990s)"))?;
        Ok(Self::Decade(year - year % 10))
    }
}

/// User-selected search criteria for one catalog browse session.
///
/// Every `FilterState` maps deterministically to one request-parameter
/// tuple: issuing the same state twice produces the same server request.
/// Unknown tokens in a saved state decay to the unspecified variant on
/// deserialization instead of failing, so a stale snapshot stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    #[serde(deserialize_with = "lenient")]
    pub sort: SortKey,
    pub query: Option<String>,
    pub genre: Option<String>,
    /// Tag in canonical or bilingual display form; canonicalized when
    /// building request parameters.
    pub tag: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub format: FormatFilter,
    /// Restrict to publications whose run has finished.
    pub finished_only: bool,
    #[serde(deserialize_with = "lenient")]
    pub volumes: VolumeBucket,
    pub era: EraBucket,
}

/// Server-side query parameters derived from a [`FilterState`].
///
/// Every criterion present here is applied by the catalog service itself
/// and is never re-applied client-side; [`FilterState::client_predicate`]
/// covers the one residue the service cannot express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub query: Option<String>,
    pub genre: Option<String>,
    pub tag: Option<String>,
    pub format: Option<&'static str>,
    pub sort: &'static str,
    pub status: Option<&'static str>,
    /// Exclusive bounds on the volume count.
    pub volumes_greater: Option<u32>,
    pub volumes_lesser: Option<u32>,
    /// Inclusive lower and exclusive upper bound on the start date, in the
    /// YYYYMMDD integer encoding.
    pub start_date_min: Option<u32>,
    pub start_date_max: Option<u32>,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            query: None,
            genre: None,
            tag: None,
            format: None,
            sort: SortKey::default().as_request_value(),
            status: None,
            volumes_greater: None,
            volumes_lesser: None,
            start_date_min: None,
            start_date_max: None,
        }
    }
}

impl FilterState {
    /// Translate this state into server-side request parameters.
    /// Absent or empty criteria are omitted.
    pub fn request_params(&self) -> RequestParams {
        let (volumes_greater, volumes_lesser) = self.volumes.bounds();
        let (start_date_min, start_date_max) = match self.era.date_range() {
            Some((min, max)) => (Some(min), Some(max)),
            None => (None, None),
        };
        RequestParams {
            query: non_empty(&self.query),
            genre: non_empty(&self.genre),
            tag: non_empty(&self.tag).map(|t| tags::canonical_tag(&t).to_owned()),
            format: self.format.as_request_value(),
            sort: self.sort.as_request_value(),
            status: self.finished_only.then_some("FINISHED"),
            volumes_greater,
            volumes_lesser,
            start_date_min,
            start_date_max,
        }
    }

    /// Client-side residue of the filter.
    ///
    /// Server-native criteria are already applied by the fetch and must not
    /// be re-applied here (a borderline record the server admitted would be
    /// wrongly dropped). The only residue is the unknown-count rule: a
    /// record with no volume count never satisfies an active volume bucket.
    pub fn client_predicate(&self) -> impl Fn(&MediaRecord) -> bool + 'static {
        let bucket = self.volumes;
        move |record| bucket == VolumeBucket::Any || record.volumes.is_some()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Deserialize a token enum, decaying unknown tokens to the default
/// variant instead of failing.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let token = String::deserialize(deserializer)?;
    Ok(token.parse().unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
