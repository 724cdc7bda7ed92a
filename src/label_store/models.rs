//! Data models for the label catalog: artists, releases, genres,
//! demo submissions and hero spotlights.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enumerations
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistStatus {
    Active,
    Inactive,
}

impl ArtistStatus {
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "inactive" => ArtistStatus::Inactive,
            _ => ArtistStatus::Active,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            ArtistStatus::Active => "active",
            ArtistStatus::Inactive => "inactive",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStatus {
    Released,
    Draft,
}

impl ReleaseStatus {
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "draft" => ReleaseStatus::Draft,
            _ => ReleaseStatus::Released,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Released => "released",
            ReleaseStatus::Draft => "draft",
        }
    }
}

/// Demo submission review state. Pending is the initial state, accepted and
/// rejected are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SubmissionStatus {
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "accepted" => SubmissionStatus::Accepted,
            "rejected" => SubmissionStatus::Rejected,
            _ => SubmissionStatus::Pending,
        }
    }

    pub fn as_db_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    /// Allowed transitions: pending -> accepted, pending -> rejected.
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (
                SubmissionStatus::Pending,
                SubmissionStatus::Accepted | SubmissionStatus::Rejected
            )
        )
    }
}

// =============================================================================
// Lookup Keys
// =============================================================================

lazy_static! {
    // UUID shape: 8-4-4-4-12 hex groups, version nibble 1-5, variant nibble 8/9/a/b.
    static ref UUID_RE: Regex = Regex::new(
        "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$"
    )
    .unwrap();
}

/// A single-item lookup key. Route paths accept either a generated id or a
/// human-readable slug; the two are told apart by shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityKey {
    Id(String),
    Slug(String),
}

impl EntityKey {
    pub fn parse<S: Into<String>>(raw: S) -> Self {
        let raw = raw.into();
        if UUID_RE.is_match(&raw) {
            EntityKey::Id(raw)
        } else {
            EntityKey::Slug(raw)
        }
    }
}

// =============================================================================
// Artists
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub status: ArtistStatus,
    pub is_featured: bool,
    pub created_at: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// An artist joined with its owned social links, as served by the
/// single-item lookup.
#[derive(Clone, Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub social_links: Vec<SocialLink>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewArtist {
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<ArtistStatus>,
    pub is_featured: Option<bool>,
    pub social_links: Option<Vec<SocialLink>>,
}

/// Partial patch; only supplied fields are written. A supplied `social_links`
/// array replaces the whole owned set.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ArtistPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub status: Option<ArtistStatus>,
    pub is_featured: Option<bool>,
    pub social_links: Option<Vec<SocialLink>>,
}

// =============================================================================
// Releases
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Release {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub release_date: String,
    #[serde(rename = "type")]
    pub release_type: String,
    pub status: ReleaseStatus,
    pub cover_image_url: Option<String>,
    pub catalog_code: Option<String>,
    pub description: Option<String>,
    pub buy_link: Option<String>,
    pub is_featured: bool,
    pub created_at: i64,
}

/// An artist credit on a release, ordered by `order_index` for display.
#[derive(Clone, Debug, Serialize)]
pub struct ReleaseArtistEntry {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub role: String,
    pub order_index: i64,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReleaseDetail {
    #[serde(flatten)]
    pub release: Release,
    pub artists: Vec<ReleaseArtistEntry>,
    pub genres: Vec<Genre>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReleaseArtistInput {
    pub artist_id: String,
    pub role: Option<String>,
    pub order_index: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewRelease {
    pub title: String,
    pub slug: String,
    pub release_date: String,
    #[serde(rename = "type")]
    pub release_type: String,
    pub status: Option<ReleaseStatus>,
    pub cover_image_url: Option<String>,
    pub catalog_code: Option<String>,
    pub description: Option<String>,
    pub buy_link: Option<String>,
    pub is_featured: Option<bool>,
    pub artists: Option<Vec<ReleaseArtistInput>>,
    pub genres: Option<Vec<String>>,
}

/// Partial patch for a release. A supplied `artists` or `genres` array
/// replaces the whole association set; an omitted one leaves it untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReleasePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub release_date: Option<String>,
    #[serde(rename = "type")]
    pub release_type: Option<String>,
    pub status: Option<ReleaseStatus>,
    pub cover_image_url: Option<String>,
    pub catalog_code: Option<String>,
    pub description: Option<String>,
    pub buy_link: Option<String>,
    pub is_featured: Option<bool>,
    pub artists: Option<Vec<ReleaseArtistInput>>,
    pub genres: Option<Vec<String>>,
}

// =============================================================================
// Genres
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewGenre {
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenrePatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

// =============================================================================
// Demo Submissions
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemoSubmission {
    pub id: String,
    pub artist_name: String,
    pub email: Option<String>,
    pub stream_link: String,
    pub note: Option<String>,
    pub status: SubmissionStatus,
    pub source: String,
    pub created_at: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSubmission {
    pub artist_name: String,
    pub email: Option<String>,
    pub stream_link: String,
    pub note: Option<String>,
}

/// Truncated submission row for the dashboard activity feed.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionSummary {
    pub id: String,
    pub artist_name: String,
    pub status: SubmissionStatus,
    pub created_at: i64,
}

// =============================================================================
// Hero Spotlights
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HeroSpotlight {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub background_color: Option<String>,
    pub catalog_code: Option<String>,
    pub is_active: bool,
    pub display_order: i64,
    pub created_at: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSpotlight {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub background_color: Option<String>,
    pub catalog_code: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SpotlightPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub background_color: Option<String>,
    pub catalog_code: Option<String>,
    pub is_active: Option<bool>,
    pub display_order: Option<i64>,
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub releases: i64,
    pub active_artists: i64,
    pub pending_demos: i64,
    pub active_spotlights: i64,
    pub recent_activity: Vec<SubmissionSummary>,
}
