//! LabelStore trait definition.
//!
//! Abstracts the label database so the server and the outbox dispatcher can
//! work against a trait object, and tests can substitute fixtures.

use anyhow::Result;

use crate::mailer::{EmailMessage, OutboxEmail};
use crate::user::{User, UserAccount, UserRole};

use super::models::*;

/// A pagination window. `page` is 1-based; the row offset is
/// `(page - 1) * limit`.
#[derive(Clone, Copy, Debug)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        PageRequest {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest { page: 1, limit: 10 }
    }
}

/// One page of rows plus the total count across all pages.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: i64,
}

pub trait LabelStore: Send + Sync {
    // =========================================================================
    // Artists
    // =========================================================================

    /// List active artists, optionally filtered by a case-insensitive name
    /// substring, ordered by name.
    fn list_artists(&self, page: PageRequest, q: Option<&str>) -> Result<Page<Artist>>;

    /// Active artists flagged as featured, capped at `limit`.
    fn featured_artists(&self, limit: usize) -> Result<Vec<Artist>>;

    /// Look up one artist by id or slug, joined with its social links.
    fn get_artist(&self, key: &EntityKey) -> Result<Option<ArtistDetail>>;

    fn create_artist(&self, new: NewArtist) -> Result<Artist>;

    /// Partial patch by id. Returns None when no such artist exists.
    fn update_artist(&self, id: &str, patch: ArtistPatch) -> Result<Option<Artist>>;

    /// Returns false when no such artist exists.
    fn delete_artist(&self, id: &str) -> Result<bool>;

    // =========================================================================
    // Releases
    // =========================================================================

    /// List released releases joined with artists and genres. `q` matches
    /// title or catalog code; `genre_slug` filters through the junction.
    /// Ordered by release date, newest first.
    fn list_releases(
        &self,
        page: PageRequest,
        q: Option<&str>,
        genre_slug: Option<&str>,
    ) -> Result<Page<ReleaseDetail>>;

    fn featured_releases(&self, limit: usize) -> Result<Vec<ReleaseDetail>>;

    fn get_release(&self, key: &EntityKey) -> Result<Option<ReleaseDetail>>;

    /// Composite create: release row plus artist/genre association sets,
    /// written in one transaction.
    fn create_release(&self, new: NewRelease) -> Result<Release>;

    /// Composite update. A supplied association array replaces the whole set
    /// (empty array clears it); an omitted one is left untouched. The scalar
    /// patch and both replacements commit or roll back together.
    fn update_release(&self, id: &str, patch: ReleasePatch) -> Result<Option<Release>>;

    fn delete_release(&self, id: &str) -> Result<bool>;

    // =========================================================================
    // Genres
    // =========================================================================

    fn list_genres(&self) -> Result<Vec<Genre>>;

    fn create_genre(&self, new: NewGenre) -> Result<Genre>;

    fn update_genre(&self, id: &str, patch: GenrePatch) -> Result<Option<Genre>>;

    fn delete_genre(&self, id: &str) -> Result<bool>;

    // =========================================================================
    // Hero Spotlights
    // =========================================================================

    /// Active spotlights ordered by display order. Any number of rows may be
    /// active at once.
    fn active_spotlights(&self) -> Result<Vec<HeroSpotlight>>;

    /// All spotlights, display order first, then newest first.
    fn list_spotlights(&self) -> Result<Vec<HeroSpotlight>>;

    fn create_spotlight(&self, new: NewSpotlight) -> Result<HeroSpotlight>;

    fn update_spotlight(&self, id: &str, patch: SpotlightPatch) -> Result<Option<HeroSpotlight>>;

    fn delete_spotlight(&self, id: &str) -> Result<bool>;

    // =========================================================================
    // Demo Submissions
    // =========================================================================

    fn create_submission(&self, new: NewSubmission) -> Result<DemoSubmission>;

    /// Newest first, optionally filtered by status.
    fn list_submissions(
        &self,
        page: PageRequest,
        status: Option<SubmissionStatus>,
    ) -> Result<Page<DemoSubmission>>;

    fn get_submission(&self, id: &str) -> Result<Option<DemoSubmission>>;

    /// Persist a review outcome: status (+ optional note) update and, when a
    /// notification is supplied, the matching outbox row, in one transaction.
    /// Returns the updated row, or None when no such submission exists.
    fn review_submission(
        &self,
        id: &str,
        status: SubmissionStatus,
        note: Option<&str>,
        notification: Option<&EmailMessage>,
    ) -> Result<Option<DemoSubmission>>;

    // =========================================================================
    // Dashboard Counts
    // =========================================================================

    fn count_releases(&self) -> Result<i64>;

    fn count_active_artists(&self) -> Result<i64>;

    fn count_pending_submissions(&self) -> Result<i64>;

    fn count_active_spotlights(&self) -> Result<i64>;

    fn recent_submissions(&self, limit: usize) -> Result<Vec<SubmissionSummary>>;

    // =========================================================================
    // Users
    // =========================================================================

    /// Insert a user. Fails when the email is already taken.
    fn create_user(&self, email: &str, password_hash: &str, role: UserRole) -> Result<User>;

    fn get_user_by_email(&self, email: &str) -> Result<Option<UserAccount>>;

    /// Role lookup used by the admin policy check. None when the user id is
    /// unknown.
    fn get_user_role(&self, id: &str) -> Result<Option<UserRole>>;

    /// Returns false when no user with that email exists.
    fn set_user_role(&self, email: &str, role: UserRole) -> Result<bool>;

    fn list_users(&self) -> Result<Vec<User>>;

    // =========================================================================
    // Email Outbox
    // =========================================================================

    fn enqueue_email(&self, message: &EmailMessage) -> Result<i64>;

    /// Pending rows, oldest first, capped at `limit`.
    fn pending_emails(&self, limit: usize) -> Result<Vec<OutboxEmail>>;

    fn mark_email_sent(&self, id: i64) -> Result<()>;

    /// Record a delivery failure; the row flips to failed once `max_attempts`
    /// is reached.
    fn mark_email_failed(&self, id: i64, error: &str, max_attempts: u32) -> Result<()>;
}
