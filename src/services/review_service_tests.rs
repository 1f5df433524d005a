// src/services/review_service_tests.rs
//
// Review workflow scenarios, driven end to end through a SQLite-backed
// journal.
//
// INVARIANTS TESTED:
// - Selection never outlives visibility (filter change, batch edit, finalize)
// - Entries that stopped being visible drafts since they were selected are
//   left alone by the next batch
// - Batch edits with an empty selection change nothing
// - Bad batch input is rejected before any entry is touched
// - A draft becomes final only once species and a location answer are set

#[cfg(test)]
mod scenario_tests {
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::entry::{Coordinate, DraftFilter, TagMode, TrailEntry};
    use crate::domain::saved_location::SavedLocation;
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::infrastructure::LocalPhotoStore;
    use crate::repositories::{EntryRepository, SqliteEntryRepository};
    use crate::services::journal_service::{FinalizeSummary, JournalService};
    use crate::services::review_service::{LocationEdit, ReviewSession};

    struct Harness {
        journal: JournalService,
        session: ReviewSession,
        repo: Arc<SqliteEntryRepository>,
        _dir: tempfile::TempDir,
    }

    fn harness() -> Harness {
        let pool = create_memory_pool().unwrap();
        initialize_database(&pool.get().unwrap()).unwrap();
        let repo = Arc::new(SqliteEntryRepository::new(Arc::new(pool)));

        let dir = tempfile::tempdir().unwrap();
        let photos = Arc::new(LocalPhotoStore::new(dir.path().to_path_buf()).unwrap());

        let journal =
            JournalService::load(repo.clone(), photos, Arc::new(EventBus::new())).unwrap();

        Harness {
            journal,
            session: ReviewSession::new(),
            repo,
            _dir: dir,
        }
    }

    fn draft() -> TrailEntry {
        TrailEntry::new_draft(Utc::now())
    }

    fn draft_with_species(species: &str) -> TrailEntry {
        let mut entry = draft();
        entry.species = Some(species.to_string());
        entry
    }

    fn draft_with_gps(lat: f64, lon: f64) -> TrailEntry {
        let mut entry = draft();
        entry.set_coordinate(Coordinate::new(lat, lon).unwrap());
        entry
    }

    fn visible_ids(h: &Harness) -> Vec<Uuid> {
        h.session
            .visible_drafts(&h.journal)
            .into_iter()
            .map(TrailEntry::id)
            .collect()
    }

    #[test]
    fn test_imported_draft_becomes_final_after_review() {
        let mut h = harness();
        let e1 = draft();
        let id = e1.id();
        h.journal.insert_draft(e1);

        h.session.select(id, &h.journal);

        let first = h.session.finalize_selected(&mut h.journal);
        assert_eq!(first, FinalizeSummary { finalized: 0, skipped: 1 });
        assert!(h.journal.get(id).unwrap().is_draft);
        assert!(h.session.is_selected(id));

        assert_eq!(h.session.set_species(&mut h.journal, "Elg").unwrap(), 1);
        assert_eq!(
            h.session
                .set_location(&mut h.journal, LocationEdit::MarkUnknown)
                .unwrap(),
            1
        );

        let second = h.session.finalize_selected(&mut h.journal);
        assert_eq!(second, FinalizeSummary { finalized: 1, skipped: 0 });

        let entry = h.journal.get(id).unwrap();
        assert!(!entry.is_draft);
        assert_eq!(entry.species.as_deref(), Some("Elg"));
        assert!(entry.location_unknown);

        // Final entries are not visible drafts, so they leave the selection
        assert_eq!(h.session.selection_len(), 0);

        let stored = h.repo.load_all().unwrap();
        assert!(!stored[0].is_draft);
    }

    #[test]
    fn test_filter_change_prunes_hidden_ids() {
        let mut h = harness();
        let x = draft();
        let y = draft_with_species("Rev");
        h.journal.insert_drafts(vec![x.clone(), y.clone()]);

        h.session.select(x.id(), &h.journal);
        h.session.select(y.id(), &h.journal);

        h.session.set_filter(DraftFilter::MissingSpecies, &h.journal);

        assert!(h.session.is_selected(x.id()));
        assert!(!h.session.is_selected(y.id()));
        assert_eq!(h.session.selection_len(), 1);
    }

    #[test]
    fn test_batch_edit_prunes_entries_that_leave_the_filter() {
        let mut h = harness();
        let a = draft();
        let b = draft();
        h.journal.insert_drafts(vec![a.clone(), b.clone()]);

        h.session.set_filter(DraftFilter::MissingLocation, &h.journal);
        h.session.select_all_visible(&h.journal);
        assert_eq!(h.session.selection_len(), 2);

        let changed = h
            .session
            .set_location(&mut h.journal, LocationEdit::MarkUnknown)
            .unwrap();

        assert_eq!(changed, 2);
        assert_eq!(h.session.selection_len(), 0);
        assert!(visible_ids(&h).is_empty());
    }

    #[test]
    fn test_filters_partition_drafts() {
        let mut h = harness();
        let bare = draft();
        let gps = draft_with_gps(61.0, 9.0);
        let named = draft_with_species("Grevling");
        h.journal.insert_drafts(vec![bare.clone(), gps.clone(), named.clone()]);

        h.session.set_filter(DraftFilter::HasGps, &h.journal);
        assert_eq!(visible_ids(&h), vec![gps.id()]);

        h.session.set_filter(DraftFilter::NoGps, &h.journal);
        assert_eq!(visible_ids(&h), vec![bare.id(), named.id()]);

        h.session.set_filter(DraftFilter::MissingSpecies, &h.journal);
        assert_eq!(visible_ids(&h), vec![bare.id(), gps.id()]);

        h.session.set_filter(DraftFilter::All, &h.journal);
        assert_eq!(visible_ids(&h).len(), 3);
    }

    #[test]
    fn test_mark_unknown_clears_coordinates() {
        let mut h = harness();
        let gps = draft_with_gps(59.5, 10.5);
        let id = gps.id();
        h.journal.insert_draft(gps);

        h.session.select(id, &h.journal);
        h.session
            .set_location(&mut h.journal, LocationEdit::MarkUnknown)
            .unwrap();

        let entry = h.journal.get(id).unwrap();
        assert!(entry.location_unknown);
        assert_eq!(entry.latitude(), None);
        assert_eq!(entry.longitude(), None);
    }

    #[test]
    fn test_coordinate_mode_clears_unknown_flag() {
        let mut h = harness();
        let mut entry = draft();
        entry.mark_location_unknown();
        let id = entry.id();
        h.journal.insert_draft(entry);

        h.session.select(id, &h.journal);
        h.session
            .set_location(
                &mut h.journal,
                LocationEdit::Coordinate(Coordinate::new(62.0, 8.0).unwrap()),
            )
            .unwrap();

        let entry = h.journal.get(id).unwrap();
        assert!(!entry.location_unknown);
        assert_eq!(entry.latitude(), Some(62.0));
        assert_eq!(entry.longitude(), Some(8.0));
    }

    #[test]
    fn test_out_of_range_coordinate_is_rejected_before_mutation() {
        let mut h = harness();
        let entry = draft();
        let id = entry.id();
        h.journal.insert_draft(entry);

        h.session.select(id, &h.journal);
        let result = h.session.set_location(
            &mut h.journal,
            LocationEdit::Coordinate(Coordinate {
                latitude: 10.0,
                longitude: 200.0,
            }),
        );

        assert!(result.is_err());
        assert!(!h.journal.get(id).unwrap().has_coordinate());
    }

    #[test]
    fn test_clear_location_resets_both_answers() {
        let mut h = harness();
        let gps = draft_with_gps(60.0, 11.0);
        let id = gps.id();
        h.journal.insert_draft(gps);

        h.session.select(id, &h.journal);
        h.session
            .set_location(&mut h.journal, LocationEdit::Clear)
            .unwrap();

        let entry = h.journal.get(id).unwrap();
        assert!(!entry.location_unknown);
        assert!(!entry.has_coordinate());
    }

    #[test]
    fn test_apply_saved_location() {
        let mut h = harness();
        let entry = draft();
        let id = entry.id();
        h.journal.insert_draft(entry);
        let pin = SavedLocation::new("Saltlick".to_string(), Coordinate::new(60.25, 10.5).unwrap());

        h.session.select(id, &h.journal);
        assert_eq!(h.session.apply_saved_location(&mut h.journal, &pin).unwrap(), 1);

        assert_eq!(h.journal.get(id).unwrap().coordinate, Some(pin.coordinate));
    }

    #[test]
    fn test_tags_add_merges_and_replace_overwrites() {
        let mut h = harness();
        let mut entry = draft();
        entry.replace_tags(&["a".to_string(), "b".to_string()]);
        let id = entry.id();
        h.journal.insert_draft(entry);
        h.session.select(id, &h.journal);

        h.session.set_tags(&mut h.journal, "b, c", TagMode::Add);
        assert_eq!(h.journal.get(id).unwrap().tags, vec!["a", "b", "c"]);

        h.session.set_tags(&mut h.journal, "c,, b ,", TagMode::Replace);
        assert_eq!(h.journal.get(id).unwrap().tags, vec!["b", "c"]);
    }

    #[test]
    fn test_blank_species_is_rejected() {
        let mut h = harness();
        let entry = draft();
        let id = entry.id();
        h.journal.insert_draft(entry);
        h.session.select(id, &h.journal);

        let result = h.session.set_species(&mut h.journal, "   ");

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(h.journal.get(id).unwrap().species.is_none());
    }

    #[test]
    fn test_species_is_trimmed() {
        let mut h = harness();
        let entry = draft();
        let id = entry.id();
        h.journal.insert_draft(entry);
        h.session.select(id, &h.journal);

        h.session.set_species(&mut h.journal, "  Gaupe ").unwrap();
        assert_eq!(h.journal.get(id).unwrap().species.as_deref(), Some("Gaupe"));
    }

    #[test]
    fn test_camera_blank_clears() {
        let mut h = harness();
        let mut entry = draft();
        entry.set_camera("Cam 1");
        let id = entry.id();
        h.journal.insert_draft(entry);
        h.session.select(id, &h.journal);

        h.session.set_camera(&mut h.journal, "  ");
        assert!(h.journal.get(id).unwrap().camera.is_none());
    }

    #[test]
    fn test_empty_selection_changes_nothing() {
        let mut h = harness();
        let entry = draft();
        let id = entry.id();
        h.journal.insert_draft(entry);

        assert_eq!(h.session.set_species(&mut h.journal, "Elg").unwrap(), 0);
        assert_eq!(h.session.set_camera(&mut h.journal, "Cam"), 0);
        assert_eq!(h.session.set_tags(&mut h.journal, "x", TagMode::Add), 0);
        assert_eq!(
            h.session.finalize_selected(&mut h.journal),
            FinalizeSummary::default()
        );
        assert_eq!(h.session.delete_selected(&mut h.journal), 0);

        let entry = h.journal.get(id).unwrap();
        assert!(entry.species.is_none());
        assert!(entry.camera.is_none());
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_never_selected() {
        let mut h = harness();
        let entry = draft();
        let id = entry.id();
        h.journal.insert_draft(entry);

        assert!(h.session.select(id, &h.journal));
        assert!(!h.session.select(Uuid::new_v4(), &h.journal));

        assert_eq!(h.session.set_camera(&mut h.journal, "Cam 3"), 1);
        assert_eq!(h.session.selected(), &[id].into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn test_delete_selected_removes_entries() {
        let mut h = harness();
        let a = draft();
        let b = draft();
        h.journal.insert_drafts(vec![a.clone(), b.clone()]);

        h.session.select(a.id(), &h.journal);
        assert_eq!(h.session.delete_selected(&mut h.journal), 1);

        assert_eq!(h.journal.entries(), &[b]);
        assert_eq!(h.session.selection_len(), 0);
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut h = harness();
        let entry = draft();
        let id = entry.id();
        h.journal.insert_draft(entry);

        assert!(h.session.toggle(id, &h.journal));
        assert!(h.session.is_selected(id));
        assert!(!h.session.toggle(id, &h.journal));
        assert!(!h.session.is_selected(id));

        h.session.select(id, &h.journal);
        h.session.deselect(id);
        assert_eq!(h.session.selection_len(), 0);

        h.session.select(id, &h.journal);
        h.session.clear_selection();
        assert!(h.session.selected().is_empty());
    }

    #[test]
    fn test_batch_skips_draft_that_left_the_filter_since_selection() {
        let mut h = harness();
        let x = draft();
        let y = draft();
        h.journal.insert_drafts(vec![x.clone(), y.clone()]);

        h.session.set_filter(DraftFilter::MissingSpecies, &h.journal);
        h.session.select_all_visible(&h.journal);
        assert_eq!(h.session.selection_len(), 2);

        // Edited elsewhere (detail screen), so y no longer misses a species
        assert!(h
            .journal
            .update(y.id(), |e| e.set_species(Some("Rev".to_string()))));
        assert!(!visible_ids(&h).contains(&y.id()));

        assert_eq!(h.session.set_camera(&mut h.journal, "Cam 7"), 1);

        assert_eq!(h.journal.get(x.id()).unwrap().camera.as_deref(), Some("Cam 7"));
        assert_eq!(h.journal.get(y.id()).unwrap().camera, None);
        assert!(!h.session.is_selected(y.id()));
    }

    #[test]
    fn test_finalize_and_delete_skip_drafts_finalized_since_selection() {
        let mut h = harness();
        let x = draft();
        let mut y = draft_with_species("Elg");
        y.mark_location_unknown();
        h.journal.insert_drafts(vec![x.clone(), y.clone()]);

        h.session.select_all_visible(&h.journal);
        assert_eq!(h.session.selection_len(), 2);

        h.journal.finalize(&HashSet::from([y.id()]));

        // y is final now, so it neither counts again nor gets deleted
        let summary = h.session.finalize_selected(&mut h.journal);
        assert_eq!(summary, FinalizeSummary { finalized: 0, skipped: 1 });

        let mut z = draft_with_species("Rev");
        z.mark_location_unknown();
        h.journal.insert_draft(z.clone());
        h.session.select_all_visible(&h.journal);
        h.journal.finalize(&HashSet::from([z.id()]));

        assert_eq!(h.session.delete_selected(&mut h.journal), 1);
        assert!(h.journal.get(x.id()).is_none());
        assert!(h.journal.get(y.id()).is_some());
        assert!(h.journal.get(z.id()).is_some());
    }

    #[test]
    fn test_finalized_entry_cannot_be_selected() {
        let mut h = harness();
        let mut entry = draft_with_species("Gaupe");
        entry.mark_location_unknown();
        let id = entry.id();
        h.journal.insert_draft(entry);
        h.journal.finalize(&HashSet::from([id]));

        assert!(!h.session.toggle(id, &h.journal));
        assert_eq!(h.session.selection_len(), 0);

        assert_eq!(
            h.session
                .set_location(&mut h.journal, LocationEdit::Clear)
                .unwrap(),
            0
        );
        assert_eq!(h.session.delete_selected(&mut h.journal), 0);

        let stored = h.journal.get(id).unwrap();
        assert!(!stored.is_draft);
        assert!(stored.location_unknown);
    }
}
