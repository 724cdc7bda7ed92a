//! SQLite-backed label store implementation.
//!
//! One mutex-guarded write connection serializes all mutations; reads are
//! spread over a small round-robin pool. Composite writes (release
//! associations, submission review + notification enqueue) run inside a
//! single transaction.

use super::models::*;
use super::schema::LABEL_VERSIONED_SCHEMAS;
use super::trait_def::{LabelStore, Page, PageRequest};
use crate::mailer::{EmailMessage, OutboxEmail, OutboxStatus};
use crate::sqlite_persistence::BASE_DB_VERSION;
use crate::user::{User, UserAccount, UserRole};
use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, Connection, ToSql};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

const READ_POOL_SIZE: usize = 4;

#[derive(Clone)]
pub struct SqliteLabelStore {
    read_pool: Vec<Arc<Mutex<Connection>>>,
    write_conn: Arc<Mutex<Connection>>,
    read_index: Arc<AtomicUsize>,
}

fn migrate_if_needed(conn: &mut Connection) -> Result<()> {
    let latest_version = LABEL_VERSIONED_SCHEMAS.len() - 1;
    let latest_schema = &LABEL_VERSIONED_SCHEMAS[latest_version];

    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        info!("Creating label db schema at version {}", latest_version);
        latest_schema.create(conn)?;
        return Ok(());
    }

    let db_version: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    let mut current_version = (db_version as usize).saturating_sub(BASE_DB_VERSION);

    if current_version >= latest_version {
        latest_schema.validate(conn)?;
        return Ok(());
    }

    let tx = conn.transaction()?;
    for schema in LABEL_VERSIONED_SCHEMAS.iter().skip(current_version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!(
                "Migrating label db from version {} to {}",
                current_version, schema.version
            );
            migration_fn(&tx)?;
            current_version = schema.version;
        }
    }
    tx.pragma_update(None, "user_version", BASE_DB_VERSION + current_version)?;
    tx.commit()?;
    Ok(())
}

// =============================================================================
// Row Parsers
// =============================================================================

fn parse_artist_row(row: &rusqlite::Row) -> rusqlite::Result<Artist> {
    let status: String = row.get(5)?;
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        bio: row.get(3)?,
        image_url: row.get(4)?,
        status: ArtistStatus::from_db_str(&status),
        is_featured: row.get::<_, i64>(6)? != 0,
        created_at: row.get(7)?,
    })
}

const ARTIST_COLUMNS: &str = "id, name, slug, bio, image_url, status, is_featured, created_at";

fn parse_release_row(row: &rusqlite::Row) -> rusqlite::Result<Release> {
    let status: String = row.get(5)?;
    Ok(Release {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        release_date: row.get(3)?,
        release_type: row.get(4)?,
        status: ReleaseStatus::from_db_str(&status),
        cover_image_url: row.get(6)?,
        catalog_code: row.get(7)?,
        description: row.get(8)?,
        buy_link: row.get(9)?,
        is_featured: row.get::<_, i64>(10)? != 0,
        created_at: row.get(11)?,
    })
}

const RELEASE_COLUMNS: &str = "id, title, slug, release_date, release_type, status, \
     cover_image_url, catalog_code, description, buy_link, is_featured, created_at";

fn parse_genre_row(row: &rusqlite::Row) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
    })
}

fn parse_submission_row(row: &rusqlite::Row) -> rusqlite::Result<DemoSubmission> {
    let status: String = row.get(5)?;
    Ok(DemoSubmission {
        id: row.get(0)?,
        artist_name: row.get(1)?,
        email: row.get(2)?,
        stream_link: row.get(3)?,
        note: row.get(4)?,
        status: SubmissionStatus::from_db_str(&status),
        source: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const SUBMISSION_COLUMNS: &str =
    "id, artist_name, email, stream_link, note, status, source, created_at";

fn parse_spotlight_row(row: &rusqlite::Row) -> rusqlite::Result<HeroSpotlight> {
    Ok(HeroSpotlight {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        description: row.get(3)?,
        image_url: row.get(4)?,
        cta_text: row.get(5)?,
        cta_link: row.get(6)?,
        background_color: row.get(7)?,
        catalog_code: row.get(8)?,
        is_active: row.get::<_, i64>(9)? != 0,
        display_order: row.get(10)?,
        created_at: row.get(11)?,
    })
}

const SPOTLIGHT_COLUMNS: &str = "id, title, subtitle, description, image_url, cta_text, \
     cta_link, background_color, catalog_code, is_active, display_order, created_at";

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<UserAccount> {
    let role: String = row.get(3)?;
    Ok(UserAccount {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        role: UserRole::from_db_str(&role),
    })
}

fn parse_outbox_row(row: &rusqlite::Row) -> rusqlite::Result<OutboxEmail> {
    let status: String = row.get(4)?;
    Ok(OutboxEmail {
        id: row.get(0)?,
        recipient: row.get(1)?,
        subject: row.get(2)?,
        body_html: row.get(3)?,
        status: OutboxStatus::from_db_str(&status),
        attempts: row.get(5)?,
        last_error: row.get(6)?,
        created_at: row.get(7)?,
        sent_at: row.get(8)?,
    })
}

const OUTBOX_COLUMNS: &str =
    "id, recipient, subject, body_html, status, attempts, last_error, created_at, sent_at";

/// Accumulates `column = ?N` fragments and their parameters for a partial
/// UPDATE statement.
#[derive(Default)]
struct PatchBuilder {
    sets: Vec<String>,
    values: Vec<Box<dyn ToSql>>,
}

impl PatchBuilder {
    fn set<V: ToSql + 'static>(&mut self, column: &str, value: Option<V>) {
        if let Some(value) = value {
            self.values.push(Box::new(value));
            self.sets.push(format!("{} = ?{}", column, self.values.len()));
        }
    }

    fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Run `UPDATE {table} SET ... WHERE id = ?`. Returns the number of
    /// affected rows.
    fn execute(mut self, conn: &Connection, table: &str, id: &str) -> Result<usize> {
        self.values.push(Box::new(id.to_string()));
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table,
            self.sets.join(", "),
            self.values.len()
        );
        let affected = conn.execute(&sql, params_from_iter(self.values.iter().map(|v| v.as_ref())))?;
        Ok(affected)
    }
}

impl SqliteLabelStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path_ref = db_path.as_ref();

        let mut write_conn = Connection::open_with_flags(
            db_path_ref,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open label database")?;

        migrate_if_needed(&mut write_conn)?;

        write_conn.pragma_update(None, "journal_mode", "WAL")?;
        write_conn.pragma_update(None, "foreign_keys", "ON")?;

        let mut read_pool = Vec::with_capacity(READ_POOL_SIZE);
        for _ in 0..READ_POOL_SIZE {
            let read_conn = Connection::open_with_flags(
                db_path_ref,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            read_conn.pragma_update(None, "journal_mode", "WAL")?;
            read_pool.push(Arc::new(Mutex::new(read_conn)));
        }

        Ok(SqliteLabelStore {
            write_conn: Arc::new(Mutex::new(write_conn)),
            read_pool,
            read_index: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn get_read_conn(&self) -> Arc<Mutex<Connection>> {
        let index = self.read_index.fetch_add(1, Ordering::SeqCst) % self.read_pool.len();
        self.read_pool[index].clone()
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn get_social_links(conn: &Connection, artist_id: &str) -> Result<Vec<SocialLink>> {
        let mut stmt = conn.prepare_cached(
            "SELECT platform, url FROM artist_social_links WHERE artist_id = ?1 ORDER BY id",
        )?;
        let links = stmt
            .query_map(params![artist_id], |r| {
                Ok(SocialLink {
                    platform: r.get(0)?,
                    url: r.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    fn get_release_artists(conn: &Connection, release_id: &str) -> Result<Vec<ReleaseArtistEntry>> {
        let mut stmt = conn.prepare_cached(
            "SELECT a.id, a.name, a.slug, ra.role, ra.order_index
             FROM release_artists ra
             JOIN artists a ON a.id = ra.artist_id
             WHERE ra.release_id = ?1
             ORDER BY ra.order_index, a.name",
        )?;
        let artists = stmt
            .query_map(params![release_id], |r| {
                Ok(ReleaseArtistEntry {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    slug: r.get(2)?,
                    role: r.get(3)?,
                    order_index: r.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(artists)
    }

    fn get_release_genres(conn: &Connection, release_id: &str) -> Result<Vec<Genre>> {
        let mut stmt = conn.prepare_cached(
            "SELECT g.id, g.name, g.slug
             FROM release_genres rg
             JOIN genres g ON g.id = rg.genre_id
             WHERE rg.release_id = ?1
             ORDER BY g.name",
        )?;
        let genres = stmt
            .query_map(params![release_id], parse_genre_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    fn resolve_release(conn: &Connection, release: Release) -> Result<ReleaseDetail> {
        let artists = Self::get_release_artists(conn, &release.id)?;
        let genres = Self::get_release_genres(conn, &release.id)?;
        Ok(ReleaseDetail {
            release,
            artists,
            genres,
        })
    }

    fn fetch_release(conn: &Connection, id: &str) -> Result<Option<Release>> {
        let sql = format!("SELECT {} FROM releases WHERE id = ?1", RELEASE_COLUMNS);
        match conn.query_row(&sql, params![id], parse_release_row) {
            Ok(release) => Ok(Some(release)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn fetch_submission(conn: &Connection, id: &str) -> Result<Option<DemoSubmission>> {
        let sql = format!(
            "SELECT {} FROM demo_submissions WHERE id = ?1",
            SUBMISSION_COLUMNS
        );
        match conn.query_row(&sql, params![id], parse_submission_row) {
            Ok(submission) => Ok(Some(submission)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Drop and re-insert the artist credits for a release.
    fn replace_release_artists(
        conn: &Connection,
        release_id: &str,
        entries: &[ReleaseArtistInput],
    ) -> Result<()> {
        conn.execute(
            "DELETE FROM release_artists WHERE release_id = ?1",
            params![release_id],
        )?;
        let mut stmt = conn.prepare_cached(
            "INSERT INTO release_artists (release_id, artist_id, role, order_index)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for entry in entries {
            stmt.execute(params![
                release_id,
                entry.artist_id,
                entry.role.as_deref().unwrap_or("primary"),
                entry.order_index.unwrap_or(0),
            ])?;
        }
        Ok(())
    }

    /// Drop and re-insert the genre memberships for a release.
    fn replace_release_genres(conn: &Connection, release_id: &str, genre_ids: &[String]) -> Result<()> {
        conn.execute(
            "DELETE FROM release_genres WHERE release_id = ?1",
            params![release_id],
        )?;
        let mut stmt = conn
            .prepare_cached("INSERT INTO release_genres (release_id, genre_id) VALUES (?1, ?2)")?;
        for genre_id in genre_ids {
            stmt.execute(params![release_id, genre_id])?;
        }
        Ok(())
    }

    fn replace_social_links(conn: &Connection, artist_id: &str, links: &[SocialLink]) -> Result<()> {
        conn.execute(
            "DELETE FROM artist_social_links WHERE artist_id = ?1",
            params![artist_id],
        )?;
        let mut stmt = conn.prepare_cached(
            "INSERT INTO artist_social_links (artist_id, platform, url) VALUES (?1, ?2, ?3)",
        )?;
        for link in links {
            stmt.execute(params![artist_id, link.platform, link.url])?;
        }
        Ok(())
    }

    fn insert_outbox_row(conn: &Connection, message: &EmailMessage) -> Result<i64> {
        conn.execute(
            "INSERT INTO email_outbox (recipient, subject, body_html) VALUES (?1, ?2, ?3)",
            params![message.to, message.subject, message.html],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

impl LabelStore for SqliteLabelStore {
    // =========================================================================
    // Artists
    // =========================================================================

    fn list_artists(&self, page: PageRequest, q: Option<&str>) -> Result<Page<Artist>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();

        let mut where_sql = "status = 'active'".to_string();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(q) = q {
            values.push(Box::new(q.to_string()));
            where_sql.push_str(&format!(" AND name LIKE '%' || ?{} || '%'", values.len()));
        }

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM artists WHERE {}", where_sql),
            params_from_iter(values.iter().map(|v| v.as_ref())),
            |r| r.get(0),
        )?;

        values.push(Box::new(page.limit as i64));
        let limit_idx = values.len();
        values.push(Box::new(page.offset() as i64));
        let offset_idx = values.len();

        let sql = format!(
            "SELECT {} FROM artists WHERE {} ORDER BY name LIMIT ?{} OFFSET ?{}",
            ARTIST_COLUMNS, where_sql, limit_idx, offset_idx
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params_from_iter(values.iter().map(|v| v.as_ref())),
                parse_artist_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page { rows, total })
    }

    fn featured_artists(&self, limit: usize) -> Result<Vec<Artist>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM artists WHERE status = 'active' AND is_featured = 1
             ORDER BY name LIMIT ?1",
            ARTIST_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![limit as i64], parse_artist_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn get_artist(&self, key: &EntityKey) -> Result<Option<ArtistDetail>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();

        let (column, value) = match key {
            EntityKey::Id(id) => ("id", id),
            EntityKey::Slug(slug) => ("slug", slug),
        };
        let sql = format!(
            "SELECT {} FROM artists WHERE {} = ?1",
            ARTIST_COLUMNS, column
        );
        let artist = match conn.query_row(&sql, params![value], parse_artist_row) {
            Ok(artist) => artist,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let social_links = Self::get_social_links(&conn, &artist.id)?;
        Ok(Some(ArtistDetail {
            artist,
            social_links,
        }))
    }

    fn create_artist(&self, new: NewArtist) -> Result<Artist> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;

        let id = uuid::Uuid::new_v4().to_string();
        tx.execute(
            "INSERT INTO artists (id, name, slug, bio, image_url, status, is_featured)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                new.name,
                new.slug,
                new.bio,
                new.image_url,
                new.status.unwrap_or(ArtistStatus::Active).as_db_str(),
                new.is_featured.unwrap_or(false) as i64,
            ],
        )?;
        if let Some(links) = &new.social_links {
            Self::replace_social_links(&tx, &id, links)?;
        }

        let sql = format!("SELECT {} FROM artists WHERE id = ?1", ARTIST_COLUMNS);
        let artist = tx.query_row(&sql, params![id], parse_artist_row)?;
        tx.commit()?;
        Ok(artist)
    }

    fn update_artist(&self, id: &str, patch: ArtistPatch) -> Result<Option<Artist>> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;

        let mut builder = PatchBuilder::default();
        builder.set("name", patch.name);
        builder.set("slug", patch.slug);
        builder.set("bio", patch.bio);
        builder.set("image_url", patch.image_url);
        builder.set("status", patch.status.map(|s| s.as_db_str()));
        builder.set("is_featured", patch.is_featured.map(|b| b as i64));

        if !builder.is_empty() && builder.execute(&tx, "artists", id)? == 0 {
            return Ok(None);
        }

        let sql = format!("SELECT {} FROM artists WHERE id = ?1", ARTIST_COLUMNS);
        let artist = match tx.query_row(&sql, params![id], parse_artist_row) {
            Ok(artist) => artist,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if let Some(links) = &patch.social_links {
            Self::replace_social_links(&tx, id, links)?;
        }

        tx.commit()?;
        Ok(Some(artist))
    }

    fn delete_artist(&self, id: &str) -> Result<bool> {
        let conn = self.write_conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM artists WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // =========================================================================
    // Releases
    // =========================================================================

    fn list_releases(
        &self,
        page: PageRequest,
        q: Option<&str>,
        genre_slug: Option<&str>,
    ) -> Result<Page<ReleaseDetail>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();

        let mut where_sql = "status = 'released'".to_string();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(q) = q {
            values.push(Box::new(q.to_string()));
            let idx = values.len();
            where_sql.push_str(&format!(
                " AND (title LIKE '%' || ?{idx} || '%' OR catalog_code LIKE '%' || ?{idx} || '%')"
            ));
        }
        if let Some(genre_slug) = genre_slug {
            values.push(Box::new(genre_slug.to_string()));
            where_sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM release_genres rg
                     JOIN genres g ON g.id = rg.genre_id
                     WHERE rg.release_id = releases.id AND g.slug = ?{})",
                values.len()
            ));
        }

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM releases WHERE {}", where_sql),
            params_from_iter(values.iter().map(|v| v.as_ref())),
            |r| r.get(0),
        )?;

        values.push(Box::new(page.limit as i64));
        let limit_idx = values.len();
        values.push(Box::new(page.offset() as i64));
        let offset_idx = values.len();

        let sql = format!(
            "SELECT {} FROM releases WHERE {}
             ORDER BY release_date DESC LIMIT ?{} OFFSET ?{}",
            RELEASE_COLUMNS, where_sql, limit_idx, offset_idx
        );
        let mut stmt = conn.prepare(&sql)?;
        let releases = stmt
            .query_map(
                params_from_iter(values.iter().map(|v| v.as_ref())),
                parse_release_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let rows = releases
            .into_iter()
            .map(|release| Self::resolve_release(&conn, release))
            .collect::<Result<Vec<_>>>()?;

        Ok(Page { rows, total })
    }

    fn featured_releases(&self, limit: usize) -> Result<Vec<ReleaseDetail>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM releases WHERE status = 'released' AND is_featured = 1
             ORDER BY release_date DESC LIMIT ?1",
            RELEASE_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let releases = stmt
            .query_map(params![limit as i64], parse_release_row)?
            .collect::<Result<Vec<_>, _>>()?;

        releases
            .into_iter()
            .map(|release| Self::resolve_release(&conn, release))
            .collect()
    }

    fn get_release(&self, key: &EntityKey) -> Result<Option<ReleaseDetail>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();

        let (column, value) = match key {
            EntityKey::Id(id) => ("id", id),
            EntityKey::Slug(slug) => ("slug", slug),
        };
        let sql = format!(
            "SELECT {} FROM releases WHERE {} = ?1",
            RELEASE_COLUMNS, column
        );
        let release = match conn.query_row(&sql, params![value], parse_release_row) {
            Ok(release) => release,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(Self::resolve_release(&conn, release)?))
    }

    fn create_release(&self, new: NewRelease) -> Result<Release> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;

        let id = uuid::Uuid::new_v4().to_string();
        tx.execute(
            "INSERT INTO releases (id, title, slug, release_date, release_type, status,
                 cover_image_url, catalog_code, description, buy_link, is_featured)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id,
                new.title,
                new.slug,
                new.release_date,
                new.release_type,
                new.status.unwrap_or(ReleaseStatus::Released).as_db_str(),
                new.cover_image_url,
                new.catalog_code,
                new.description,
                new.buy_link,
                new.is_featured.unwrap_or(false) as i64,
            ],
        )?;

        if let Some(artists) = &new.artists {
            Self::replace_release_artists(&tx, &id, artists)?;
        }
        if let Some(genres) = &new.genres {
            Self::replace_release_genres(&tx, &id, genres)?;
        }

        let release = Self::fetch_release(&tx, &id)?
            .context("Release row missing right after insert")?;
        tx.commit()?;
        Ok(release)
    }

    fn update_release(&self, id: &str, patch: ReleasePatch) -> Result<Option<Release>> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;

        let mut builder = PatchBuilder::default();
        builder.set("title", patch.title);
        builder.set("slug", patch.slug);
        builder.set("release_date", patch.release_date);
        builder.set("release_type", patch.release_type);
        builder.set("status", patch.status.map(|s| s.as_db_str()));
        builder.set("cover_image_url", patch.cover_image_url);
        builder.set("catalog_code", patch.catalog_code);
        builder.set("description", patch.description);
        builder.set("buy_link", patch.buy_link);
        builder.set("is_featured", patch.is_featured.map(|b| b as i64));

        if !builder.is_empty() && builder.execute(&tx, "releases", id)? == 0 {
            return Ok(None);
        }

        let release = match Self::fetch_release(&tx, id)? {
            Some(release) => release,
            None => return Ok(None),
        };

        if let Some(artists) = &patch.artists {
            Self::replace_release_artists(&tx, id, artists)?;
        }
        if let Some(genres) = &patch.genres {
            Self::replace_release_genres(&tx, id, genres)?;
        }

        tx.commit()?;
        Ok(Some(release))
    }

    fn delete_release(&self, id: &str) -> Result<bool> {
        let conn = self.write_conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM releases WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // =========================================================================
    // Genres
    // =========================================================================

    fn list_genres(&self) -> Result<Vec<Genre>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let mut stmt = conn.prepare_cached("SELECT id, name, slug FROM genres ORDER BY name")?;
        let genres = stmt
            .query_map([], parse_genre_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(genres)
    }

    fn create_genre(&self, new: NewGenre) -> Result<Genre> {
        let conn = self.write_conn.lock().unwrap();
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO genres (id, name, slug) VALUES (?1, ?2, ?3)",
            params![id, new.name, new.slug],
        )?;
        Ok(Genre {
            id,
            name: new.name,
            slug: new.slug,
        })
    }

    fn update_genre(&self, id: &str, patch: GenrePatch) -> Result<Option<Genre>> {
        let conn = self.write_conn.lock().unwrap();

        let mut builder = PatchBuilder::default();
        builder.set("name", patch.name);
        builder.set("slug", patch.slug);
        if !builder.is_empty() && builder.execute(&conn, "genres", id)? == 0 {
            return Ok(None);
        }

        match conn.query_row(
            "SELECT id, name, slug FROM genres WHERE id = ?1",
            params![id],
            parse_genre_row,
        ) {
            Ok(genre) => Ok(Some(genre)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_genre(&self, id: &str) -> Result<bool> {
        let conn = self.write_conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM genres WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // =========================================================================
    // Hero Spotlights
    // =========================================================================

    fn active_spotlights(&self) -> Result<Vec<HeroSpotlight>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM hero_spotlights WHERE is_active = 1 ORDER BY display_order",
            SPOTLIGHT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], parse_spotlight_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn list_spotlights(&self) -> Result<Vec<HeroSpotlight>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM hero_spotlights ORDER BY display_order, created_at DESC",
            SPOTLIGHT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], parse_spotlight_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn create_spotlight(&self, new: NewSpotlight) -> Result<HeroSpotlight> {
        let conn = self.write_conn.lock().unwrap();
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO hero_spotlights (id, title, subtitle, description, image_url,
                 cta_text, cta_link, background_color, catalog_code, is_active, display_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id,
                new.title,
                new.subtitle,
                new.description,
                new.image_url,
                new.cta_text,
                new.cta_link,
                new.background_color,
                new.catalog_code,
                new.is_active.unwrap_or(false) as i64,
                new.display_order.unwrap_or(0),
            ],
        )?;

        let sql = format!(
            "SELECT {} FROM hero_spotlights WHERE id = ?1",
            SPOTLIGHT_COLUMNS
        );
        let spotlight = conn.query_row(&sql, params![id], parse_spotlight_row)?;
        Ok(spotlight)
    }

    fn update_spotlight(&self, id: &str, patch: SpotlightPatch) -> Result<Option<HeroSpotlight>> {
        let conn = self.write_conn.lock().unwrap();

        let mut builder = PatchBuilder::default();
        builder.set("title", patch.title);
        builder.set("subtitle", patch.subtitle);
        builder.set("description", patch.description);
        builder.set("image_url", patch.image_url);
        builder.set("cta_text", patch.cta_text);
        builder.set("cta_link", patch.cta_link);
        builder.set("background_color", patch.background_color);
        builder.set("catalog_code", patch.catalog_code);
        builder.set("is_active", patch.is_active.map(|b| b as i64));
        builder.set("display_order", patch.display_order);

        if !builder.is_empty() && builder.execute(&conn, "hero_spotlights", id)? == 0 {
            return Ok(None);
        }

        let sql = format!(
            "SELECT {} FROM hero_spotlights WHERE id = ?1",
            SPOTLIGHT_COLUMNS
        );
        match conn.query_row(&sql, params![id], parse_spotlight_row) {
            Ok(spotlight) => Ok(Some(spotlight)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete_spotlight(&self, id: &str) -> Result<bool> {
        let conn = self.write_conn.lock().unwrap();
        let affected = conn.execute("DELETE FROM hero_spotlights WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    // =========================================================================
    // Demo Submissions
    // =========================================================================

    fn create_submission(&self, new: NewSubmission) -> Result<DemoSubmission> {
        let conn = self.write_conn.lock().unwrap();
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO demo_submissions (id, artist_name, email, stream_link, note)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, new.artist_name, new.email, new.stream_link, new.note],
        )?;
        Self::fetch_submission(&conn, &id)?
            .context("Submission row missing right after insert")
    }

    fn list_submissions(
        &self,
        page: PageRequest,
        status: Option<SubmissionStatus>,
    ) -> Result<Page<DemoSubmission>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();

        let mut where_sql = "1 = 1".to_string();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(status) = status {
            values.push(Box::new(status.as_db_str()));
            where_sql = format!("status = ?{}", values.len());
        }

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM demo_submissions WHERE {}", where_sql),
            params_from_iter(values.iter().map(|v| v.as_ref())),
            |r| r.get(0),
        )?;

        values.push(Box::new(page.limit as i64));
        let limit_idx = values.len();
        values.push(Box::new(page.offset() as i64));
        let offset_idx = values.len();

        let sql = format!(
            "SELECT {} FROM demo_submissions WHERE {}
             ORDER BY created_at DESC, rowid DESC LIMIT ?{} OFFSET ?{}",
            SUBMISSION_COLUMNS, where_sql, limit_idx, offset_idx
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params_from_iter(values.iter().map(|v| v.as_ref())),
                parse_submission_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page { rows, total })
    }

    fn get_submission(&self, id: &str) -> Result<Option<DemoSubmission>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        Self::fetch_submission(&conn, id)
    }

    fn review_submission(
        &self,
        id: &str,
        status: SubmissionStatus,
        note: Option<&str>,
        notification: Option<&EmailMessage>,
    ) -> Result<Option<DemoSubmission>> {
        let mut conn = self.write_conn.lock().unwrap();
        let tx = conn.transaction()?;

        let affected = tx.execute(
            "UPDATE demo_submissions SET status = ?2, note = COALESCE(?3, note) WHERE id = ?1",
            params![id, status.as_db_str(), note],
        )?;
        if affected == 0 {
            return Ok(None);
        }

        let submission = Self::fetch_submission(&tx, id)?
            .context("Submission row missing right after update")?;

        if let Some(message) = notification {
            Self::insert_outbox_row(&tx, message)?;
        }

        tx.commit()?;
        Ok(Some(submission))
    }

    // =========================================================================
    // Dashboard Counts
    // =========================================================================

    fn count_releases(&self) -> Result<i64> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        Ok(conn.query_row("SELECT COUNT(*) FROM releases", [], |r| r.get(0))?)
    }

    fn count_active_artists(&self) -> Result<i64> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM artists WHERE status = 'active'",
            [],
            |r| r.get(0),
        )?)
    }

    fn count_pending_submissions(&self) -> Result<i64> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM demo_submissions WHERE status = 'pending'",
            [],
            |r| r.get(0),
        )?)
    }

    fn count_active_spotlights(&self) -> Result<i64> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        Ok(conn.query_row(
            "SELECT COUNT(*) FROM hero_spotlights WHERE is_active = 1",
            [],
            |r| r.get(0),
        )?)
    }

    fn recent_submissions(&self, limit: usize) -> Result<Vec<SubmissionSummary>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, artist_name, status, created_at FROM demo_submissions
             ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |r| {
                let status: String = r.get(2)?;
                Ok(SubmissionSummary {
                    id: r.get(0)?,
                    artist_name: r.get(1)?,
                    status: SubmissionStatus::from_db_str(&status),
                    created_at: r.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // =========================================================================
    // Users
    // =========================================================================

    fn create_user(&self, email: &str, password_hash: &str, role: UserRole) -> Result<User> {
        let conn = self.write_conn.lock().unwrap();
        let id = uuid::Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO users (id, email, password_hash, role) VALUES (?1, ?2, ?3, ?4)",
            params![id, email, password_hash, role.as_db_str()],
        )
        .with_context(|| format!("Failed to create user {}", email))?;
        Ok(User {
            id,
            email: email.to_string(),
            role,
        })
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<UserAccount>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        match conn.query_row(
            "SELECT id, email, password_hash, role FROM users WHERE email = ?1",
            params![email],
            parse_user_row,
        ) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get_user_role(&self, id: &str) -> Result<Option<UserRole>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        match conn.query_row(
            "SELECT role FROM users WHERE id = ?1",
            params![id],
            |r| r.get::<_, String>(0),
        ) {
            Ok(role) => Ok(Some(UserRole::from_db_str(&role))),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_user_role(&self, email: &str, role: UserRole) -> Result<bool> {
        let conn = self.write_conn.lock().unwrap();
        let affected = conn.execute(
            "UPDATE users SET role = ?2 WHERE email = ?1",
            params![email, role.as_db_str()],
        )?;
        Ok(affected > 0)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT id, email, password_hash, role FROM users ORDER BY email",
        )?;
        let users = stmt
            .query_map([], parse_user_row)?
            .map(|r| r.map(|account| account.public()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    // =========================================================================
    // Email Outbox
    // =========================================================================

    fn enqueue_email(&self, message: &EmailMessage) -> Result<i64> {
        let conn = self.write_conn.lock().unwrap();
        Self::insert_outbox_row(&conn, message)
    }

    fn pending_emails(&self, limit: usize) -> Result<Vec<OutboxEmail>> {
        let conn = self.get_read_conn();
        let conn = conn.lock().unwrap();
        let sql = format!(
            "SELECT {} FROM email_outbox WHERE status = 'pending'
             ORDER BY created_at, id LIMIT ?1",
            OUTBOX_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![limit as i64], parse_outbox_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn mark_email_sent(&self, id: i64) -> Result<()> {
        let conn = self.write_conn.lock().unwrap();
        conn.execute(
            "UPDATE email_outbox
             SET status = 'sent', attempts = attempts + 1,
                 sent_at = cast(strftime('%s','now') as int)
             WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    fn mark_email_failed(&self, id: i64, error: &str, max_attempts: u32) -> Result<()> {
        let conn = self.write_conn.lock().unwrap();
        conn.execute(
            "UPDATE email_outbox
             SET attempts = attempts + 1,
                 last_error = ?2,
                 status = CASE WHEN attempts + 1 >= ?3 THEN 'failed' ELSE status END
             WHERE id = ?1",
            params![id, error, max_attempts as i64],
        )?;
        Ok(())
    }
}
