use super::*;
use crate::record::{MediaRecord, TitleSet};

fn record_with_volumes(volumes: Option<u32>) -> MediaRecord {
    MediaRecord {
        id: 1,
        title: TitleSet {
            romaji: Some("Test".into()),
            english: None,
            native: None,
        },
        cover_image: None,
        status: None,
        volumes,
        chapters: None,
        popularity: None,
        average_score: None,
        favourites: None,
        format: None,
        media_type: None,
        genres: Vec::new(),
        tags: Vec::new(),
        staff: None,
        relations: None,
        recommendations: None,
        stats: None,
    }
}

#[test]
fn test_request_params_deterministic() {
    let state = FilterState {
        sort: SortKey::ScoreDesc,
        query: Some("fullmetal".into()),
        genre: Some("Action".into()),
        tag: Some("異世界 (Isekai)".into()),
        format: FormatFilter::Manga,
        finished_only: true,
        volumes: VolumeBucket::AtMost10,
        era: EraBucket::Decade(1990),
    };
    assert_eq!(state.request_params(), state.request_params());
}

#[test]
fn test_empty_criteria_omitted() {
    let params = FilterState::default().request_params();
    assert_eq!(params.query, None);
    assert_eq!(params.genre, None);
    assert_eq!(params.tag, None);
    assert_eq!(params.format, None);
    assert_eq!(params.status, None);
    assert_eq!(params.volumes_greater, None);
    assert_eq!(params.volumes_lesser, None);
    assert_eq!(params.start_date_min, None);
    assert_eq!(params.sort, "POPULARITY_DESC");

    let blank = FilterState {
        query: Some("   ".into()),
        ..Default::default()
    };
    assert_eq!(blank.request_params().query, None);
}

#[test]
fn test_tag_canonicalized_in_params() {
    let state = FilterState {
        tag: Some("異世界 (Isekai)".into()),
        ..Default::default()
    };
    assert_eq!(state.request_params().tag.as_deref(), Some("Isekai"));
}

#[test]
fn test_finished_only_maps_to_status() {
    let state = FilterState {
        finished_only: true,
        ..Default::default()
    };
    assert_eq!(state.request_params().status, Some("FINISHED"));
}

#[test]
fn test_volume_bucket_bounds() {
    assert_eq!(VolumeBucket::Any.bounds(), (None, None));
    assert_eq!(VolumeBucket::AtMost5.bounds(), (None, Some(6)));
    assert_eq!(VolumeBucket::AtMost10.bounds(), (None, Some(11)));
    assert_eq!(VolumeBucket::AtMost20.bounds(), (None, Some(21)));
    assert_eq!(VolumeBucket::MoreThan20.bounds(), (Some(20), None));
}

#[test]
fn test_era_decade_date_range() {
    assert_eq!(EraBucket::Any.date_range(), None);
    assert_eq!(
        EraBucket::Decade(1990).date_range(),
        Some((19_900_101, 20_000_101))
    );
    assert_eq!(
        EraBucket::Decade(2010).date_range(),
        Some((20_100_101, 20_200_101))
    );
}

#[test]
fn test_era_parses_decade_tokens() {
    assert_eq!("any".parse::<EraBucket>().unwrap(), EraBucket::Any);
    assert_eq!("1990s".parse::<EraBucket>().unwrap(), EraBucket::Decade(1990));
    assert_eq!("1995".parse::<EraBucket>().unwrap(), EraBucket::Decade(1990));
    assert!("ninety".parse::<EraBucket>().is_err());
}

#[test]
fn test_client_predicate_excludes_unknown_counts() {
    let state = FilterState {
        volumes: VolumeBucket::AtMost10,
        ..Default::default()
    };
    let pred = state.client_predicate();
    assert!(!pred(&record_with_volumes(None)));
    assert!(pred(&record_with_volumes(Some(10))));

    // Bound enforcement itself is server-side; the predicate only rejects
    // records whose count the service could not compare.
    let any = FilterState::default().client_predicate();
    assert!(any(&record_with_volumes(None)));
}

#[test]
fn test_malformed_saved_state_decays_to_default() {
    let json = r#"{
        "sort": "RANDOM_NONSENSE",
        "format": "AUDIOBOOK",
        "volumes": "7",
        "era": "sometime",
        "finished_only": true
    }"#;
    let state: FilterState = serde_json::from_str(json).unwrap();
    assert_eq!(state.sort, SortKey::PopularityDesc);
    assert_eq!(state.format, FormatFilter::Any);
    assert_eq!(state.volumes, VolumeBucket::Any);
    assert_eq!(state.era, EraBucket::Any);
    assert!(state.finished_only);
}

#[test]
fn test_filter_state_json_round_trip() {
    let state = FilterState {
        sort: SortKey::FavouritesDesc,
        query: Some("mushishi".into()),
        genre: None,
        tag: Some("Isekai".into()),
        format: FormatFilter::Novel,
        finished_only: true,
        volumes: VolumeBucket::MoreThan20,
        era: EraBucket::Decade(2000),
    };
    let json = serde_json::to_string(&state).unwrap();
    assert!(json.contains(r#""era":"2000s""#));
    let back: FilterState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
