//! SQLite-backed persistence layer: connection handling, schema migration and
//! one repository per entity.

use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

pub mod artist;
pub mod credentials;
pub mod game;
pub mod models;
pub mod participant;
pub mod player;
pub mod round;
pub mod round_songlist;
pub mod round_team;
pub mod round_team_player;
pub mod settings;
pub mod song;
pub mod storage;
pub mod track_info;

use storage::StorageResult;

/// Open a pooled SQLite connection with foreign keys enforced.
pub async fn connect(database_url: &str) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!(database_url, "connected to SQLite");
    Ok(pool)
}

/// Create the schema if it does not exist yet.
///
/// Every statement is idempotent so migration can run on each startup.
pub async fn migrate(pool: &SqlitePool) -> StorageResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS player (
            player_id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            image_url   TEXT,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game (
            game_id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            playlist_id                 TEXT,
            current_track_index         INTEGER NOT NULL DEFAULT 0,
            all_time_dj_participant_id  INTEGER,
            started_at                  TEXT,
            ended_at                    TEXT,
            created_at                  TEXT NOT NULL,
            updated_at                  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participant (
            participant_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            game_id         INTEGER NOT NULL REFERENCES game(game_id) ON DELETE CASCADE,
            player_id       INTEGER NOT NULL REFERENCES player(player_id) ON DELETE CASCADE,
            seat_number     INTEGER NOT NULL,
            created_at      TEXT NOT NULL,
            updated_at      TEXT NOT NULL,
            UNIQUE(game_id, player_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS round (
            round_id      INTEGER PRIMARY KEY AUTOINCREMENT,
            game_id       INTEGER NOT NULL REFERENCES game(game_id) ON DELETE CASCADE,
            round_number  INTEGER NOT NULL,
            is_complete   INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS round_team (
            round_team_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            round_id       INTEGER NOT NULL REFERENCES round(round_id) ON DELETE CASCADE,
            role           TEXT NOT NULL DEFAULT 'player',
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS round_team_player (
            round_team_player_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            round_team_id         INTEGER NOT NULL REFERENCES round_team(round_team_id) ON DELETE CASCADE,
            participant_id        INTEGER NOT NULL REFERENCES participant(participant_id) ON DELETE CASCADE,
            created_at            TEXT NOT NULL,
            updated_at            TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song (
            song_id     INTEGER PRIMARY KEY AUTOINCREMENT,
            spotify_id  TEXT NOT NULL UNIQUE,
            title       TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artist (
            artist_id   INTEGER PRIMARY KEY AUTOINCREMENT,
            spotify_id  TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS track_info (
            track_info_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            song_id        INTEGER NOT NULL REFERENCES song(song_id) ON DELETE CASCADE,
            artist_id      INTEGER NOT NULL REFERENCES artist(artist_id) ON DELETE CASCADE,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            UNIQUE(song_id, artist_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS round_songlist (
            round_songlist_id         INTEGER PRIMARY KEY AUTOINCREMENT,
            round_id                  INTEGER NOT NULL REFERENCES round(round_id) ON DELETE CASCADE,
            song_id                   INTEGER NOT NULL REFERENCES song(song_id) ON DELETE CASCADE,
            round_team_id             INTEGER NOT NULL REFERENCES round_team(round_team_id) ON DELETE CASCADE,
            track_info_id             INTEGER NOT NULL REFERENCES track_info(track_info_id) ON DELETE CASCADE,
            correct_artist_guess      INTEGER NOT NULL DEFAULT 0,
            correct_song_title_guess  INTEGER NOT NULL DEFAULT 0,
            bonus_correct_movie_guess INTEGER NOT NULL DEFAULT 0,
            score_type                TEXT NOT NULL DEFAULT 'standard',
            created_at                TEXT NOT NULL,
            updated_at                TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS gameplay_settings (
            setting_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            key         TEXT NOT NULL UNIQUE,
            value       TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// In-memory pool limited to one connection so every query sees the same
    /// database.
    pub async fn memory_pool() -> SqlitePool {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("open in-memory database");
        migrate(&pool).await.expect("run migrations");
        pool
    }
}
