// src/application/commands/review_commands.rs
//
// Review screen: filter, selection and batch actions over drafts.
// Every command here takes the journal lock before the review lock.

use super::parse_id;
use crate::application::{dto::*, state::AppState};
use crate::domain::entry::{DraftFilter, TagMode};
use crate::error::AppError;
use crate::services::LocationEdit;

pub fn get_review(state: &AppState) -> Result<ReviewDto, String> {
    let saved = state
        .saved_location_service
        .list()
        .map_err(|e| e.to_string())?;
    let journal = state.journal().map_err(|e| e.to_string())?;
    let review = state.review().map_err(|e| e.to_string())?;

    let filters = DraftFilter::ALL
        .iter()
        .map(|filter| FilterOptionDto {
            filter: *filter,
            label: filter.label().to_string(),
            count: journal.drafts().filter(|e| filter.matches(e)).count(),
        })
        .collect();

    let drafts = review
        .visible_drafts(&journal)
        .into_iter()
        .map(|entry| EntryDto::from_entry(entry, &saved))
        .collect();

    let mut selected: Vec<String> = review.selected().iter().map(|id| id.to_string()).collect();
    selected.sort();

    Ok(ReviewDto {
        filter: review.filter(),
        filters,
        drafts,
        selected,
    })
}

pub fn set_draft_filter(state: &AppState, filter: DraftFilter) -> Result<(), String> {
    let journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    review.set_filter(filter, &journal);
    Ok(())
}

/// Returns whether the draft is selected afterwards; ids that are not
/// visible drafts are never selected
pub fn toggle_selection(state: &AppState, entry_id: &str) -> Result<bool, String> {
    let id = parse_id(entry_id)?;
    let journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    Ok(review.toggle(id, &journal))
}

pub fn select_all_visible(state: &AppState) -> Result<usize, String> {
    let journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    review.select_all_visible(&journal);
    Ok(review.selection_len())
}

pub fn clear_selection(state: &AppState) -> Result<(), String> {
    let mut review = state.review().map_err(|e| e.to_string())?;
    review.clear_selection();
    Ok(())
}

pub fn batch_set_species(state: &AppState, species: &str) -> Result<usize, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    review
        .set_species(&mut journal, species)
        .map_err(|e| e.to_string())
}

pub fn batch_set_location(state: &AppState, edit: LocationEdit) -> Result<usize, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    review
        .set_location(&mut journal, edit)
        .map_err(|e| e.to_string())
}

pub fn batch_apply_saved_location(state: &AppState, location_id: &str) -> Result<usize, String> {
    let id = parse_id(location_id)?;
    let location = state
        .saved_location_service
        .list()
        .map_err(|e| e.to_string())?
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| AppError::NotFound.to_string())?;

    let mut journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    review
        .apply_saved_location(&mut journal, &location)
        .map_err(|e| e.to_string())
}

pub fn batch_set_camera(state: &AppState, camera: &str) -> Result<usize, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    Ok(review.set_camera(&mut journal, camera))
}

pub fn batch_set_tags(state: &AppState, input: &str, mode: TagMode) -> Result<usize, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    Ok(review.set_tags(&mut journal, input, mode))
}

pub fn finalize_selected(state: &AppState) -> Result<FinalizeSummaryDto, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    Ok(review.finalize_selected(&mut journal).into())
}

pub fn delete_selected(state: &AppState) -> Result<usize, String> {
    let mut journal = state.journal().map_err(|e| e.to_string())?;
    let mut review = state.review().map_err(|e| e.to_string())?;
    Ok(review.delete_selected(&mut journal))
}
