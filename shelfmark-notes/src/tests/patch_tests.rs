use super::*;

const NOTE: &str = "---\nanilist_id: 30002\ntitle: \"ベルセルク\"\n---\n\n# ベルセルク\n\n```bookLog\nmedia_id: 30002\nstatus: plan_to_read\nvolume_status:\n  0: completed\n```\n\nFree-form thoughts below the block.\n";

#[test]
fn test_status_patch_changes_one_line() {
    let patched = apply_status(NOTE, ReadingStatus::Reading, None).unwrap();

    let before: Vec<&str> = NOTE.lines().collect();
    let after: Vec<&str> = patched.lines().collect();
    assert_eq!(before.len(), after.len());
    let changed: Vec<usize> = (0..before.len())
        .filter(|&i| before[i] != after[i])
        .collect();
    assert_eq!(changed.len(), 1);
    assert_eq!(after[changed[0]], "status: reading");
}

#[test]
fn test_status_patch_idempotent() {
    // Setting the value the field already holds is byte-identical.
    let same = apply_status(NOTE, ReadingStatus::PlanToRead, None).unwrap();
    assert_eq!(same, NOTE);

    let once = apply_status(NOTE, ReadingStatus::Completed, None).unwrap();
    let twice = apply_status(&once, ReadingStatus::Completed, None).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_status_preserves_indent_and_gap() {
    let doc = "```bookLog\n  status:   on_hold\n```\n";
    let patched = apply_status(doc, ReadingStatus::Dropped, None).unwrap();
    assert_eq!(patched, "```bookLog\n  status:   dropped\n```\n");
}

#[test]
fn test_status_missing_field_is_an_error() {
    let doc = "```bookLog\nmedia_id: 1\n```\n";
    assert!(matches!(
        apply_status(doc, ReadingStatus::Reading, None),
        Err(NoteError::FieldNotFound { field: "status" })
    ));
    // Nothing was inserted: the patcher never grows the block.
}

#[test]
fn test_status_ignores_volume_status_lines() {
    let doc = "```bookLog\nvolume_status:\n  0: completed\nstatus: reading\n```\n";
    let patched = apply_status(doc, ReadingStatus::Completed, None).unwrap();
    assert_eq!(
        patched,
        "```bookLog\nvolume_status:\n  0: completed\nstatus: completed\n```\n"
    );
}

#[test]
fn test_volume_set_appends_in_numeric_order() {
    let body = "status: plan_to_read\nvolume_status:\n  0: completed\n";
    let doc = format!("```bookLog\n{body}```\n");
    let patched = apply_volume(&doc, VolumeMutation::Complete(2), None).unwrap();
    assert_eq!(
        patched,
        "```bookLog\nstatus: plan_to_read\nvolume_status:\n  0: completed\n  2: completed\n```\n"
    );
}

#[test]
fn test_volume_insert_between_existing_keys() {
    let doc = "```bookLog\nvolume_status:\n  0: completed\n  2: completed\n```\n";
    let patched = apply_volume(doc, VolumeMutation::Complete(1), None).unwrap();
    assert_eq!(
        patched,
        "```bookLog\nvolume_status:\n  0: completed\n  1: completed\n  2: completed\n```\n"
    );
}

#[test]
fn test_volume_numeric_not_lexical_order() {
    let doc = "```bookLog\nvolume_status:\n  9: completed\n```\n";
    let patched = apply_volume(doc, VolumeMutation::Complete(10), None).unwrap();
    assert_eq!(
        patched,
        "```bookLog\nvolume_status:\n  9: completed\n  10: completed\n```\n"
    );
}

#[test]
fn test_volume_delete_and_empty_map_removal() {
    let doc = "```bookLog\nstatus: reading\nvolume_status:\n  0: completed\n  2: completed\n```\n\nTrailing paragraph.\n";

    let one_left = apply_volume(doc, VolumeMutation::Clear(0), None).unwrap();
    assert_eq!(
        one_left,
        "```bookLog\nstatus: reading\nvolume_status:\n  2: completed\n```\n\nTrailing paragraph.\n"
    );

    // Deleting the last key removes the header too; no dangling
    // `volume_status:` line, and the trailing document is untouched.
    let none_left = apply_volume(&one_left, VolumeMutation::Clear(2), None).unwrap();
    assert_eq!(
        none_left,
        "```bookLog\nstatus: reading\n```\n\nTrailing paragraph.\n"
    );
}

#[test]
fn test_volume_clear_without_header_is_noop() {
    let doc = "```bookLog\nstatus: reading\n```\n";
    let patched = apply_volume(doc, VolumeMutation::Clear(3), None).unwrap();
    assert_eq!(patched, doc);
}

#[test]
fn test_volume_set_materializes_header() {
    let doc = "```bookLog\nmedia_id: 9\nstatus: reading\n```\nAfter.\n";
    let patched = apply_volume(doc, VolumeMutation::Complete(0), None).unwrap();
    assert_eq!(
        patched,
        "```bookLog\nmedia_id: 9\nstatus: reading\nvolume_status:\n  0: completed\n```\nAfter.\n"
    );
}

#[test]
fn test_volume_set_idempotent() {
    let doc = "```bookLog\nvolume_status:\n  4: completed\n```\n";
    let patched = apply_volume(doc, VolumeMutation::Complete(4), None).unwrap();
    assert_eq!(patched, doc);
}

#[test]
fn test_volume_run_bounded_by_indentation() {
    // An un-indented field directly after the run must survive untouched.
    let doc = "```bookLog\nvolume_status:\n  1: completed\nrating: 5\n```\n";
    let patched = apply_volume(doc, VolumeMutation::Complete(3), None).unwrap();
    assert_eq!(
        patched,
        "```bookLog\nvolume_status:\n  1: completed\n  3: completed\nrating: 5\n```\n"
    );
}

#[test]
fn test_volume_run_bounded_by_non_map_line() {
    // Indented prose below the run is not part of the map and is kept.
    let doc = "```bookLog\nvolume_status:\n  1: completed\n  some note\n```\n";
    let patched = apply_volume(doc, VolumeMutation::Clear(1), None).unwrap();
    assert_eq!(patched, "```bookLog\n  some note\n```\n");
}

#[test]
fn test_bytes_outside_block_never_touched() {
    let patched = apply_volume(NOTE, VolumeMutation::Complete(5), None).unwrap();
    let (head, _) = NOTE.split_once("volume_status:").unwrap();
    let (patched_head, _) = patched.split_once("volume_status:").unwrap();
    assert_eq!(head, patched_head);
    assert!(patched.ends_with("```\n\nFree-form thoughts below the block.\n"));
}

#[test]
fn test_crlf_document_keeps_line_endings() {
    let doc = "```bookLog\r\nstatus: reading\r\nvolume_status:\r\n  0: completed\r\n```\r\n";
    let patched = apply_volume(doc, VolumeMutation::Complete(1), None).unwrap();
    assert_eq!(
        patched,
        "```bookLog\r\nstatus: reading\r\nvolume_status:\r\n  0: completed\r\n  1: completed\r\n```\r\n"
    );

    let status = apply_status(doc, ReadingStatus::Completed, None).unwrap();
    assert_eq!(
        status,
        "```bookLog\r\nstatus: completed\r\nvolume_status:\r\n  0: completed\r\n```\r\n"
    );
}

#[test]
fn test_missing_block_propagates() {
    assert!(matches!(
        apply_status("no block here\n", ReadingStatus::Reading, None),
        Err(NoteError::BlockNotFound)
    ));
    assert!(matches!(
        apply_volume("no block here\n", VolumeMutation::Complete(0), None),
        Err(NoteError::BlockNotFound)
    ));
}

#[test]
fn test_ambiguous_block_resolved_by_hint() {
    let doc = "```bookLog\nstatus: none\n```\n\n```bookLog\nstatus: reading\n```\n";
    assert!(matches!(
        apply_status(doc, ReadingStatus::Completed, None),
        Err(NoteError::AmbiguousBlock { count: 2 })
    ));
    let patched = apply_status(doc, ReadingStatus::Completed, Some(4..5)).unwrap();
    assert_eq!(
        patched,
        "```bookLog\nstatus: none\n```\n\n```bookLog\nstatus: completed\n```\n"
    );
}
