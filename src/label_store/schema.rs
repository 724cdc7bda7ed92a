//! SQLite schema for the label database.
//!
//! Entity primary keys are generated uuid-v4 strings; slugs are the unique
//! human-readable alternate keys used in public URLs. Junction tables cascade
//! on delete so removing a release or artist cannot orphan association rows.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("slug", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("bio", &SqlType::Text),
        sqlite_column!("image_url", &SqlType::Text),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'active'")
        ),
        sqlite_column!(
            "is_featured",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_artists_status", "status")],
    unique_constraints: &[],
};

const ARTIST_SOCIAL_LINKS_TABLE: Table = Table {
    name: "artist_social_links",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("platform", &SqlType::Text, non_null = true),
        sqlite_column!("url", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_artist_social_links_artist", "artist_id")],
    unique_constraints: &[],
};

const RELEASES_TABLE: Table = Table {
    name: "releases",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("slug", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("release_date", &SqlType::Text, non_null = true),
        sqlite_column!("release_type", &SqlType::Text, non_null = true),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'released'")
        ),
        sqlite_column!("cover_image_url", &SqlType::Text),
        sqlite_column!("catalog_code", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("buy_link", &SqlType::Text),
        sqlite_column!(
            "is_featured",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_releases_status", "status"),
        ("idx_releases_release_date", "release_date"),
    ],
    unique_constraints: &[],
};

/// Release <-> Artist credits. `order_index` drives display order.
const RELEASE_ARTISTS_TABLE: Table = Table {
    name: "release_artists",
    columns: &[
        sqlite_column!(
            "release_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "artists",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "role",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'primary'")
        ),
        sqlite_column!(
            "order_index",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[
        ("idx_release_artists_release", "release_id"),
        ("idx_release_artists_artist", "artist_id"),
    ],
    unique_constraints: &[],
};

/// Release <-> Genre membership, no attributes.
const RELEASE_GENRES_TABLE: Table = Table {
    name: "release_genres",
    columns: &[
        sqlite_column!(
            "release_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "genre_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "genres",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
    ],
    indices: &[
        ("idx_release_genres_release", "release_id"),
        ("idx_release_genres_genre", "genre_id"),
    ],
    unique_constraints: &[],
};

const GENRES_TABLE: Table = Table {
    name: "genres",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("slug", &SqlType::Text, non_null = true, is_unique = true),
    ],
    indices: &[],
    unique_constraints: &[],
};

const DEMO_SUBMISSIONS_TABLE: Table = Table {
    name: "demo_submissions",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("artist_name", &SqlType::Text, non_null = true),
        sqlite_column!("email", &SqlType::Text),
        sqlite_column!("stream_link", &SqlType::Text, non_null = true),
        sqlite_column!("note", &SqlType::Text),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'pending'")
        ),
        sqlite_column!(
            "source",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'website'")
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_demo_submissions_status", "status"),
        ("idx_demo_submissions_created", "created_at"),
    ],
    unique_constraints: &[],
};

const HERO_SPOTLIGHTS_TABLE: Table = Table {
    name: "hero_spotlights",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("subtitle", &SqlType::Text),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("image_url", &SqlType::Text),
        sqlite_column!("cta_text", &SqlType::Text),
        sqlite_column!("cta_link", &SqlType::Text),
        sqlite_column!("background_color", &SqlType::Text),
        sqlite_column!("catalog_code", &SqlType::Text),
        sqlite_column!(
            "is_active",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "display_order",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_hero_spotlights_active", "is_active")],
    unique_constraints: &[],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("email", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("password_hash", &SqlType::Text, non_null = true),
        sqlite_column!(
            "role",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'user'")
        ),
    ],
    indices: &[],
    unique_constraints: &[],
};

/// Durable queue of notification emails decoupled from the request that
/// produced them. Drained by the outbox dispatcher.
const EMAIL_OUTBOX_TABLE: Table = Table {
    name: "email_outbox",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("recipient", &SqlType::Text, non_null = true),
        sqlite_column!("subject", &SqlType::Text, non_null = true),
        sqlite_column!("body_html", &SqlType::Text, non_null = true),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'pending'")
        ),
        sqlite_column!(
            "attempts",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("last_error", &SqlType::Text),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("sent_at", &SqlType::Integer),
    ],
    indices: &[("idx_email_outbox_status", "status")],
    unique_constraints: &[],
};

pub const LABEL_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        ARTIST_SOCIAL_LINKS_TABLE,
        RELEASES_TABLE,
        RELEASE_ARTISTS_TABLE,
        RELEASE_GENRES_TABLE,
        GENRES_TABLE,
        DEMO_SUBMISSIONS_TABLE,
        HERO_SPOTLIGHTS_TABLE,
        USERS_TABLE,
        EMAIL_OUTBOX_TABLE,
    ],
    migration: None,
}];
