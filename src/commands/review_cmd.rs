//! Generic add/edit flows for reviewed records
//!
//! The food and pokemon pages run the same flow against different
//! tables and buckets; the per-entity command modules are thin typed
//! wrappers over these.

use serde_json::json;

use crate::domain::{DomainError, DomainResult, Entity, Review, ReviewedRecord};
use crate::repository::RecordRepository;
use crate::AppState;

use super::attachment::{
    content_type_for, derived_key, timestamped_key, upload_or_reuse, FileUpload,
};

/// Input from the add form.
#[derive(Debug, Clone)]
pub struct NewReviewedRecord {
    pub name: String,
    pub upload_date: String,
    pub review_content: String,
    pub review_rating: u8,
    pub file: Option<FileUpload>,
}

/// Input from the edit form. `new_file: None` keeps the stored image.
#[derive(Debug, Clone)]
pub struct ReviewedRecordEdit {
    pub name: String,
    pub review_content: String,
    pub review_rating: u8,
    pub new_file: Option<FileUpload>,
}

fn bucket<T: ReviewedRecord>() -> DomainResult<&'static str> {
    T::BUCKET.ok_or_else(|| {
        DomainError::Internal(format!("{} records have no attachment bucket", T::TABLE))
    })
}

/// Upload-and-insert.
///
/// Missing required fields are a silent no-op, matching the forms,
/// which simply ignore the click. A storage-key collision reuses the
/// stored object's URL; any other upload failure aborts before a row is
/// written. A successful upload followed by a failed insert leaves an
/// orphaned object behind; there is no compensating cleanup.
pub async fn submit_reviewed<T: ReviewedRecord>(
    state: &AppState,
    input: NewReviewedRecord,
) -> DomainResult<Option<T>> {
    if input.name.is_empty() || input.upload_date.is_empty() {
        log::debug!("submit to {} ignored: name or date missing", T::TABLE);
        return Ok(None);
    }
    let Some(file) = input.file else {
        log::debug!("submit to {} ignored: no file selected", T::TABLE);
        return Ok(None);
    };

    // One submission at a time
    let Some(_busy) = state.begin_upload() else {
        log::warn!(
            "submit to {} ignored: an upload is already in flight",
            T::TABLE
        );
        return Ok(None);
    };

    let user = state.current_user().await?;
    state.add_rating_bounds.validate(input.review_rating)?;

    let bucket = bucket::<T>()?;
    let key = derived_key(user.id, &file.name);
    let content_type = content_type_for(&file.name);
    let image_url =
        upload_or_reuse(state.objects.as_ref(), bucket, &key, file.bytes, &content_type).await?;

    let review = Review {
        content: input.review_content,
        rating: input.review_rating,
    };
    let record = T::new_record(user.id, &input.name, &image_url, &input.upload_date, &review);
    let stored = state.repo::<T>().insert(&record).await.map_err(|e| {
        log::error!("error submitting to {}: {}", T::TABLE, e);
        e
    })?;
    Ok(Some(stored))
}

/// Edit one record. A replacement image goes under a timestamped key
/// (the add flow's derived key would collide with the original upload);
/// here any upload failure is fatal. The remote patch is scoped by id
/// AND owner — a scope mismatch changes zero rows and yields `None`, a
/// silent failure the caller must not fold into local state.
pub async fn update_reviewed<T: ReviewedRecord>(
    state: &AppState,
    record: &T,
    edit: ReviewedRecordEdit,
) -> DomainResult<Option<T>> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    state.edit_rating_bounds.validate(edit.review_rating)?;

    let image_url = match edit.new_file {
        Some(file) => {
            let bucket = bucket::<T>()?;
            let key = timestamped_key(owner, &file.name);
            let content_type = content_type_for(&file.name);
            match state
                .objects
                .upload(bucket, &key, file.bytes, &content_type)
                .await
            {
                Ok(()) => state.objects.public_url(bucket, &key),
                Err(e) => {
                    log::error!("failed to upload replacement image: {}", e);
                    return Err(DomainError::Upload(e.to_string()));
                }
            }
        }
        None => record.image_url().to_string(),
    };

    let review = Review {
        content: edit.review_content,
        rating: edit.review_rating,
    };
    let patch = json!({
        "name": edit.name,
        "image_url": image_url,
        "review_content": review.content,
        "review_rating": review.rating,
    });
    let touched = state
        .repo::<T>()
        .update(owner, record.id(), patch)
        .await
        .map_err(|e| {
            log::error!("error updating {} {}: {}", T::TABLE, record.id(), e);
            e
        })?;
    if touched == 0 {
        log::warn!("update of {} {} matched no rows", T::TABLE, record.id());
        return Ok(None);
    }
    Ok(Some(record.with_edits(&edit.name, &image_url, &review)))
}

/// Save just the review from the expanded detail panel.
pub async fn set_review<T: ReviewedRecord>(
    state: &AppState,
    record: &T,
    review: Review,
) -> DomainResult<Option<T>> {
    let owner = state
        .session
        .resolve()
        .user_id()
        .ok_or(DomainError::NotAuthenticated)?;
    // The panel offers the add-form range
    state.add_rating_bounds.validate(review.rating)?;

    let patch = json!({
        "review_content": review.content,
        "review_rating": review.rating,
    });
    let touched = state.repo::<T>().update(owner, record.id(), patch).await?;
    if touched == 0 {
        return Ok(None);
    }
    Ok(Some(record.with_review(&review)))
}
