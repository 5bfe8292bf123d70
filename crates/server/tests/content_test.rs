#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Integration tests for the content store: publish filtering, point
//! lookups, partial updates, search, and deletion.

mod common;

use dharohar_server::models::{
    Blog, Event, EventChanges, NewBlog, NewEvent, NewPoetry, Poetry, PoetryChanges,
};
use uuid::Uuid;

fn sample_event(marker: &str) -> NewEvent {
    NewEvent {
        title: format!("Kavi Sammelan {marker}"),
        title_hi: Some("कवि सम्मेलन".to_string()),
        description: format!("An evening of poetry and literature {marker}"),
        description_hi: None,
        category: format!("literature-{marker}"),
        date: "March 15, 2024".to_string(),
        location: format!("Mumbai {marker}"),
        location_hi: Some("मुंबई".to_string()),
        image_url: None,
        published: Some(true),
        created_by: None,
    }
}

fn sample_poem(marker: &str) -> NewPoetry {
    NewPoetry {
        title: format!("Ek Nayi Subah {marker}"),
        title_hi: None,
        content: "Suraj ki pehli kiran ke saath".to_string(),
        content_hi: None,
        excerpt: "Suraj ki pehli kiran...".to_string(),
        excerpt_hi: None,
        author: format!("Kavita {marker}"),
        author_hi: None,
        image_url: None,
        published: Some(true),
        created_by: None,
    }
}

#[test]
fn list_respects_publish_filter() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let published = Event::create(&app.db, sample_event(&marker)).await.unwrap();
        let mut draft_input = sample_event(&marker);
        draft_input.published = Some(false);
        let draft = Event::create(&app.db, draft_input).await.unwrap();

        let public = Event::list(&app.db, Some(true)).await.unwrap();
        assert!(public.iter().any(|e| e.id == published.id));
        assert!(!public.iter().any(|e| e.id == draft.id));
        assert!(public.iter().all(|e| e.published));

        let drafts = Event::list(&app.db, Some(false)).await.unwrap();
        assert!(drafts.iter().any(|e| e.id == draft.id));
        assert!(drafts.iter().all(|e| !e.published));

        let everything = Event::list(&app.db, None).await.unwrap();
        assert!(everything.iter().any(|e| e.id == published.id));
        assert!(everything.iter().any(|e| e.id == draft.id));
    });
}

#[test]
fn list_orders_newest_first() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let older = Event::create(&app.db, sample_event(&marker)).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
        let newer = Event::create(&app.db, sample_event(&marker)).await.unwrap();

        let all = Event::list(&app.db, Some(true)).await.unwrap();
        let newer_pos = all.iter().position(|e| e.id == newer.id).unwrap();
        let older_pos = all.iter().position(|e| e.id == older.id).unwrap();
        assert!(newer_pos < older_pos);
    });
}

#[test]
fn find_by_id_missing_is_a_normal_empty_result() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };

        let found = Event::find_by_id(&app.db, Uuid::now_v7()).await.unwrap();
        assert!(found.is_none());

        let found = Poetry::find_by_id(&app.db, Uuid::now_v7()).await.unwrap();
        assert!(found.is_none());
    });
}

#[test]
fn find_by_id_returns_drafts() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let mut input = sample_event(&marker);
        input.published = Some(false);
        let draft = Event::create(&app.db, input).await.unwrap();

        // Unlisted semantics: a direct id lookup does not filter drafts.
        let found = Event::find_by_id(&app.db, draft.id).await.unwrap().unwrap();
        assert!(!found.published);
    });
}

#[test]
fn partial_update_changes_only_supplied_fields() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let event = Event::create(&app.db, sample_event(&marker)).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;

        let changes = EventChanges {
            title: Some(format!("Updated {marker}")),
            ..EventChanges::default()
        };
        let updated = Event::update(&app.db, event.id, changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, format!("Updated {marker}"));
        assert_eq!(updated.description, event.description);
        assert_eq!(updated.category, event.category);
        assert_eq!(updated.location, event.location);
        assert_eq!(updated.published, event.published);
        assert_eq!(updated.created_at, event.created_at);
        assert!(updated.updated_at > event.updated_at);
    });
}

#[test]
fn update_missing_id_reports_not_found() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };

        let changes = EventChanges {
            title: Some("Ghost".to_string()),
            ..EventChanges::default()
        };
        let updated = Event::update(&app.db, Uuid::now_v7(), changes).await.unwrap();
        assert!(updated.is_none());
    });
}

#[test]
fn empty_update_leaves_row_untouched() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let event = Event::create(&app.db, sample_event(&marker)).await.unwrap();
        let updated = Event::update(&app.db, event.id, EventChanges::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, event.title);
        assert_eq!(updated.updated_at, event.updated_at);
    });
}

#[test]
fn delete_is_quiet_about_missing_ids() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let event = Event::create(&app.db, sample_event(&marker)).await.unwrap();
        assert!(Event::delete(&app.db, event.id).await.unwrap());
        // Second delete leaves no visible effect and is not a fault.
        assert!(!Event::delete(&app.db, event.id).await.unwrap());
        assert!(!Event::delete(&app.db, Uuid::now_v7()).await.unwrap());

        assert!(Event::find_by_id(&app.db, event.id).await.unwrap().is_none());
    });
}

#[test]
fn search_is_case_insensitive_substring_over_published_rows() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let hit = Event::create(&app.db, sample_event(&marker)).await.unwrap();

        let mut draft_input = sample_event(&marker);
        draft_input.published = Some(false);
        let draft = Event::create(&app.db, draft_input).await.unwrap();

        // Case-insensitive match on the location field.
        let query = format!("mumbai {}", marker.to_uppercase());
        let results = Event::search(&app.db, &query).await.unwrap();

        assert!(results.iter().any(|e| e.id == hit.id));
        assert!(!results.iter().any(|e| e.id == draft.id));

        // A query matching nothing returns an empty set, not an error.
        let none = Event::search(&app.db, &format!("{marker}-absent")).await.unwrap();
        assert!(none.is_empty());
    });
}

#[test]
fn category_listing_is_published_only() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();
        let category = format!("literature-{marker}");

        let visible = Event::create(&app.db, sample_event(&marker)).await.unwrap();
        let mut draft_input = sample_event(&marker);
        draft_input.published = Some(false);
        Event::create(&app.db, draft_input).await.unwrap();

        let listed = Event::list_by_category(&app.db, &category).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, visible.id);
    });
}

#[test]
fn publish_cycle_end_to_end() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let event = Event::create(&app.db, sample_event(&marker)).await.unwrap();
        assert!(event.published);

        let public = Event::list(&app.db, Some(true)).await.unwrap();
        assert!(public.iter().any(|e| e.id == event.id));

        let changes = EventChanges {
            published: Some(false),
            ..EventChanges::default()
        };
        Event::update(&app.db, event.id, changes).await.unwrap().unwrap();

        let public = Event::list(&app.db, Some(true)).await.unwrap();
        assert!(!public.iter().any(|e| e.id == event.id));

        let everything = Event::list(&app.db, None).await.unwrap();
        assert!(everything.iter().any(|e| e.id == event.id));
    });
}

#[test]
fn blog_search_covers_content_and_category_listing_works() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let blog = Blog::create(
            &app.db,
            NewBlog {
                title: "Preserving Languages".to_string(),
                title_hi: None,
                content: format!("Regional languages and literature {marker}"),
                content_hi: None,
                excerpt: "On language preservation.".to_string(),
                excerpt_hi: None,
                category: format!("education-{marker}"),
                image_url: None,
                author: "Dr. Rajesh Kumar".to_string(),
                published: Some(true),
                created_by: None,
            },
        )
        .await
        .unwrap();

        let results = Blog::search(&app.db, &marker).await.unwrap();
        assert!(results.iter().any(|b| b.id == blog.id));

        let listed = Blog::list_by_category(&app.db, &format!("education-{marker}"))
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, blog.id);
    });
}

#[test]
fn poetry_search_matches_author() {
    common::run_test(async {
        let Some(app) = common::shared_app().await else {
            return;
        };
        let marker = common::unique_marker();

        let poem = Poetry::create(&app.db, sample_poem(&marker)).await.unwrap();

        let results = Poetry::search(&app.db, &format!("kavita {marker}")).await.unwrap();
        assert!(results.iter().any(|p| p.id == poem.id));

        // Unpublishing removes it from search results.
        let changes = PoetryChanges {
            published: Some(false),
            ..PoetryChanges::default()
        };
        Poetry::update(&app.db, poem.id, changes).await.unwrap().unwrap();

        let results = Poetry::search(&app.db, &format!("kavita {marker}")).await.unwrap();
        assert!(!results.iter().any(|p| p.id == poem.id));
    });
}
