//! Command Flow Tests
//!
//! End-to-end add/edit/delete flows against the in-memory backends.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::collection::CollectionAction;
    use crate::commands::{self, FileUpload, NewReviewedRecord, ReviewedRecordEdit};
    use crate::domain::{AuthUser, ContentRecord, DomainError, Entity, FoodReview, Note, Review};
    use crate::repository::RecordRepository;
    use crate::session::{SessionContext, SessionState};
    use crate::store::{
        MemoryDataStore, MemoryIdentityStore, MemoryObjectStore, ObjectStore, StorageError,
    };
    use crate::AppState;

    struct Harness {
        state: AppState,
        objects: Arc<MemoryObjectStore>,
    }

    async fn signed_in() -> (Harness, AuthUser) {
        let data = Arc::new(MemoryDataStore::new());
        let objects = Arc::new(MemoryObjectStore::new());
        let identity = Arc::new(MemoryIdentityStore::new());
        identity.add_user("ash@example.com", "pikachu").await;

        let state = AppState::with_stores(
            data,
            objects.clone(),
            identity,
            SessionContext::new(),
        );
        let user = commands::sign_in(&state, "ash@example.com", "pikachu")
            .await
            .unwrap();
        (Harness { state, objects }, user)
    }

    fn taco_input() -> NewReviewedRecord {
        NewReviewedRecord {
            name: "Taco".to_string(),
            upload_date: "2024-01-01".to_string(),
            review_content: "crunchy".to_string(),
            review_rating: 4,
            file: Some(FileUpload::new("taco.jpg", vec![1, 2, 3])),
        }
    }

    #[tokio::test]
    async fn sign_in_resolves_the_session_to_the_user() {
        let (h, user) = signed_in().await;
        assert_eq!(h.state.session.resolve(), SessionState::User(user.id));
    }

    #[tokio::test]
    async fn submit_uploads_inserts_and_returns_the_stored_record() {
        let (h, user) = signed_in().await;

        let photo = commands::submit_food(&h.state, taco_input())
            .await
            .unwrap()
            .expect("record should be saved");
        assert!(photo.id() > 0);
        assert_eq!(photo.user_id, user.id);
        assert_eq!(
            photo.image_url,
            format!("memory://foodreview/{}/taco.jpg", user.id)
        );
        assert!(h.objects.contains("foodreview", &format!("{}/taco.jpg", user.id)).await);

        let listed = commands::list_food(&h.state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], photo);
    }

    #[tokio::test]
    async fn submit_over_an_existing_key_reuses_the_stored_object() {
        let (h, user) = signed_in().await;
        let key = format!("{}/taco.jpg", user.id);
        h.objects.put("foodreview", &key, vec![9, 9, 9]).await;

        let photo = commands::submit_food(&h.state, taco_input())
            .await
            .expect("collision must not fail")
            .expect("record should be saved");
        assert_eq!(
            photo.image_url,
            h.objects.public_url("foodreview", &key)
        );
        // No second object, exactly one new record
        assert_eq!(h.objects.object_count().await, 1);
        assert_eq!(commands::list_food(&h.state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn submit_with_missing_fields_silently_aborts() {
        let (h, _user) = signed_in().await;

        let mut no_file = taco_input();
        no_file.file = None;
        assert_eq!(commands::submit_food(&h.state, no_file).await.unwrap(), None);

        let mut no_name = taco_input();
        no_name.name.clear();
        assert_eq!(commands::submit_food(&h.state, no_name).await.unwrap(), None);

        assert!(commands::list_food(&h.state).await.unwrap().is_empty());
        assert_eq!(h.objects.object_count().await, 0);
    }

    #[tokio::test]
    async fn submit_without_a_session_is_an_auth_failure() {
        let state = AppState::with_stores(
            Arc::new(MemoryDataStore::new()),
            Arc::new(MemoryObjectStore::new()),
            Arc::new(MemoryIdentityStore::new()),
            SessionContext::new(),
        );
        let err = commands::submit_food(&state, taco_input())
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotAuthenticated);
    }

    #[tokio::test]
    async fn submit_rejects_ratings_outside_the_add_range() {
        let (h, _user) = signed_in().await;

        let mut zero = taco_input();
        zero.review_rating = 0;
        assert!(matches!(
            commands::submit_food(&h.state, zero).await,
            Err(DomainError::InvalidInput(_))
        ));

        let mut six = taco_input();
        six.review_rating = 6;
        assert!(matches!(
            commands::submit_food(&h.state, six).await,
            Err(DomainError::InvalidInput(_))
        ));

        assert_eq!(h.objects.object_count().await, 0);
    }

    #[tokio::test]
    async fn submit_is_ignored_while_an_upload_is_in_flight() {
        let (h, _user) = signed_in().await;

        let guard = h.state.begin_upload().unwrap();
        assert_eq!(
            commands::submit_food(&h.state, taco_input()).await.unwrap(),
            None
        );
        drop(guard);

        assert!(commands::submit_food(&h.state, taco_input())
            .await
            .unwrap()
            .is_some());
    }

    struct BrokenObjectStore;

    #[async_trait]
    impl ObjectStore for BrokenObjectStore {
        async fn upload(
            &self,
            _bucket: &str,
            _key: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<(), StorageError> {
            Err(StorageError::Other("503 Service Unavailable".to_string()))
        }

        fn public_url(&self, bucket: &str, key: &str) -> String {
            format!("broken://{}/{}", bucket, key)
        }
    }

    #[tokio::test]
    async fn a_fatal_upload_error_writes_no_partial_record() {
        let data = Arc::new(MemoryDataStore::new());
        let identity = Arc::new(MemoryIdentityStore::new());
        identity.add_user("ash@example.com", "pikachu").await;
        let state = AppState::with_stores(
            data,
            Arc::new(BrokenObjectStore),
            identity,
            SessionContext::new(),
        );
        commands::sign_in(&state, "ash@example.com", "pikachu")
            .await
            .unwrap();

        let err = commands::submit_food(&state, taco_input())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Upload(_)));
        assert!(commands::list_food(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_a_new_file_keeps_the_stored_image() {
        let (h, _user) = signed_in().await;
        let photo = commands::submit_food(&h.state, taco_input())
            .await
            .unwrap()
            .unwrap();

        let updated = commands::update_food(
            &h.state,
            &photo,
            ReviewedRecordEdit {
                name: "Street Taco".to_string(),
                review_content: "even crunchier".to_string(),
                review_rating: 5,
                new_file: None,
            },
        )
        .await
        .unwrap()
        .expect("one row should match");

        assert_eq!(updated.image_url, photo.image_url);
        assert_eq!(updated.name, "Street Taco");

        let listed = commands::list_food(&h.state).await.unwrap();
        assert_eq!(listed[0].name, "Street Taco");
        assert_eq!(listed[0].review_rating, Some(5));
    }

    #[tokio::test]
    async fn update_with_a_new_file_uploads_under_a_timestamped_key() {
        let (h, user) = signed_in().await;
        let photo = commands::submit_food(&h.state, taco_input())
            .await
            .unwrap()
            .unwrap();

        let updated = commands::update_food(
            &h.state,
            &photo,
            ReviewedRecordEdit {
                name: photo.name.clone(),
                review_content: "new photo".to_string(),
                review_rating: 3,
                new_file: Some(FileUpload::new("better.png", vec![7, 7])),
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_ne!(updated.image_url, photo.image_url);
        assert!(updated
            .image_url
            .starts_with(&format!("memory://foodreview/{}/", user.id)));
        assert!(updated.image_url.ends_with(".png"));
        // The original object stays; nothing cleans it up
        assert_eq!(h.objects.object_count().await, 2);
    }

    #[tokio::test]
    async fn update_of_someone_elses_record_is_a_silent_zero() {
        let (h, _user) = signed_in().await;
        let stranger = Uuid::new_v4();
        let theirs = h
            .state
            .repo::<FoodReview>()
            .insert(&FoodReview::new(
                stranger,
                "Not yours".to_string(),
                "memory://foodreview/x.jpg".to_string(),
                "2024-01-01".to_string(),
                &Review {
                    content: "private".to_string(),
                    rating: 5,
                },
            ))
            .await
            .unwrap();

        let outcome = commands::update_food(
            &h.state,
            &theirs,
            ReviewedRecordEdit {
                name: "Hijacked".to_string(),
                review_content: String::new(),
                review_rating: 0,
                new_file: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, None);

        let untouched = h.state.repo::<FoodReview>().list(stranger).await.unwrap();
        assert_eq!(untouched[0].name, "Not yours");
    }

    #[tokio::test]
    async fn set_review_only_touches_the_review_columns() {
        let (h, _user) = signed_in().await;
        let photo = commands::submit_food(&h.state, taco_input())
            .await
            .unwrap()
            .unwrap();

        let updated = commands::set_food_review(
            &h.state,
            &photo,
            Review {
                content: "changed my mind".to_string(),
                rating: 2,
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.name, photo.name);
        assert_eq!(updated.image_url, photo.image_url);

        let listed = commands::list_food(&h.state).await.unwrap();
        assert_eq!(listed[0].review_content.as_deref(), Some("changed my mind"));
        assert_eq!(listed[0].review_rating, Some(2));
    }

    #[tokio::test]
    async fn delete_food_removes_exactly_one_row() {
        let (h, _user) = signed_in().await;
        let photo = commands::submit_food(&h.state, taco_input())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(commands::delete_food(&h.state, photo.id()).await.unwrap(), 1);
        assert_eq!(commands::delete_food(&h.state, photo.id()).await.unwrap(), 0);
        assert!(commands::list_food(&h.state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pokemon_uploads_land_in_their_own_bucket() {
        let (h, user) = signed_in().await;

        let mut input = taco_input();
        input.name = "Snorlax".to_string();
        input.file = Some(FileUpload::new("snorlax.jpg", vec![1]));
        let record = commands::submit_pokemon(&h.state, input)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            record.image_url,
            format!("memory://pokemonreview/{}/snorlax.jpg", user.id)
        );
        assert!(h
            .objects
            .contains("pokemonreview", &format!("{}/snorlax.jpg", user.id))
            .await);
    }

    #[tokio::test]
    async fn add_note_ignores_blank_content_and_anonymous_sessions() {
        let (h, _user) = signed_in().await;
        assert_eq!(commands::add_note(&h.state, "   ").await.unwrap(), None);

        commands::sign_out(&h.state);
        assert_eq!(commands::add_note(&h.state, "hello").await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_note_stamps_the_date_and_assigns_an_id() {
        let (h, user) = signed_in().await;

        let note = commands::add_note(&h.state, "# groceries")
            .await
            .unwrap()
            .expect("note should be saved");
        assert!(note.id() > 0);
        assert_eq!(note.user_id, user.id);
        assert!(note.timestamp().is_some());

        let listed = commands::list_notes(&h.state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "# groceries");
    }

    #[tokio::test]
    async fn notes_come_back_newest_first() {
        let (h, user) = signed_in().await;
        let repo = h.state.repo::<Note>();
        repo.insert(&Note::new(
            user.id,
            "older".to_string(),
            "2024-01-01T08:00:00Z".to_string(),
        ))
        .await
        .unwrap();
        repo.insert(&Note::new(
            user.id,
            "newer".to_string(),
            "2024-05-01T08:00:00Z".to_string(),
        ))
        .await
        .unwrap();

        let listed = commands::list_notes(&h.state).await.unwrap();
        assert_eq!(listed[0].content, "newer");
    }

    #[tokio::test]
    async fn update_and_delete_note_round_trip() {
        let (h, _user) = signed_in().await;
        let note = commands::add_note(&h.state, "draft").await.unwrap().unwrap();

        let updated = commands::update_note(&h.state, &note, "final")
            .await
            .unwrap()
            .expect("one row should match");
        assert_eq!(updated.content, "final");
        assert_eq!(updated.id, note.id);

        assert_eq!(commands::delete_note(&h.state, note.id()).await.unwrap(), 1);
        assert!(commands::list_notes(&h.state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn page_controller_reconciles_after_submit_and_delete() {
        let (h, _user) = signed_in().await;
        let mut page = h.state.foods();
        page.refresh().await;
        assert!(page.view().is_empty());

        let photo = commands::submit_food(&h.state, taco_input())
            .await
            .unwrap()
            .unwrap();
        page.apply(CollectionAction::Added(photo.clone()));
        assert_eq!(page.view().len(), 1);

        let deleted = page.delete(photo.id(), &|_prompt: &str| true).await.unwrap();
        assert!(deleted);
        assert!(page.view().is_empty());
        assert!(commands::list_food(&h.state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn declined_account_deletion_changes_nothing() {
        let (h, user) = signed_in().await;
        let deleted = commands::delete_account(&h.state, &|_prompt: &str| false)
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(h.state.session.resolve(), SessionState::User(user.id));
    }

    #[tokio::test]
    async fn confirmed_account_deletion_removes_the_user_and_logs_out() {
        let (h, _user) = signed_in().await;
        let deleted = commands::delete_account(&h.state, &|_prompt: &str| true)
            .await
            .unwrap();
        assert!(deleted);
        assert_eq!(h.state.session.resolve(), SessionState::Anonymous);

        // The platform user is gone; signing in again fails
        let err = commands::sign_in(&h.state, "ash@example.com", "pikachu")
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::NotAuthenticated);
    }
}
