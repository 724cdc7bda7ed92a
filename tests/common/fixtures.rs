//! Test fixture creation: database with seeded users plus helpers for
//! seeding catalog rows through the store.

use super::constants::*;
use anyhow::Result;
use recursive_label_server::label_store::{
    Artist, DemoSubmission, Genre, HeroSpotlight, LabelStore, NewArtist, NewGenre, NewRelease,
    NewSpotlight, NewSubmission, Release, ReleaseArtistInput, SqliteLabelStore,
};
use recursive_label_server::user::{LabelHasher, UserRole};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary label database seeded with one regular user and one
/// admin. Returns (temp_dir, db_path).
pub fn create_test_db_with_users() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("label.db");

    let store = SqliteLabelStore::new(&db_path)?;
    store.create_user(
        TEST_USER_EMAIL,
        &LabelHasher::Argon2.hash(TEST_USER_PASS)?,
        UserRole::User,
    )?;
    store.create_user(
        ADMIN_EMAIL,
        &LabelHasher::Argon2.hash(ADMIN_PASS)?,
        UserRole::Admin,
    )?;

    Ok((dir, db_path))
}

pub fn seed_artist(store: &dyn LabelStore, name: &str, slug: &str) -> Artist {
    store
        .create_artist(NewArtist {
            name: name.to_string(),
            slug: slug.to_string(),
            bio: None,
            image_url: None,
            status: None,
            is_featured: None,
            social_links: None,
        })
        .expect("Failed to seed artist")
}

pub fn seed_genre(store: &dyn LabelStore, name: &str, slug: &str) -> Genre {
    store
        .create_genre(NewGenre {
            name: name.to_string(),
            slug: slug.to_string(),
        })
        .expect("Failed to seed genre")
}

pub fn seed_release(
    store: &dyn LabelStore,
    title: &str,
    slug: &str,
    release_date: &str,
    artists: Vec<ReleaseArtistInput>,
    genres: Vec<String>,
) -> Release {
    store
        .create_release(NewRelease {
            title: title.to_string(),
            slug: slug.to_string(),
            release_date: release_date.to_string(),
            release_type: "EP".to_string(),
            status: None,
            cover_image_url: None,
            catalog_code: None,
            description: None,
            buy_link: None,
            is_featured: None,
            artists: Some(artists),
            genres: Some(genres),
        })
        .expect("Failed to seed release")
}

pub fn seed_spotlight(
    store: &dyn LabelStore,
    title: &str,
    is_active: bool,
    display_order: i64,
) -> HeroSpotlight {
    store
        .create_spotlight(NewSpotlight {
            title: title.to_string(),
            subtitle: None,
            description: None,
            image_url: None,
            cta_text: None,
            cta_link: None,
            background_color: None,
            catalog_code: None,
            is_active: Some(is_active),
            display_order: Some(display_order),
        })
        .expect("Failed to seed spotlight")
}

pub fn seed_submission(
    store: &dyn LabelStore,
    artist_name: &str,
    email: Option<&str>,
) -> DemoSubmission {
    store
        .create_submission(NewSubmission {
            artist_name: artist_name.to_string(),
            email: email.map(|e| e.to_string()),
            stream_link: "https://example.com/demo".to_string(),
            note: None,
        })
        .expect("Failed to seed submission")
}
