//! Fixed sample data for local development and tests.
//!
//! [`seed_database`] wipes and repopulates every table; it is run by the
//! `seed` binary and is never called by the server.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::{types::Json, PgPool};

use crate::models::{
    ContentRef, ContentType, Episode, Genre, ListEntry, Movie, Preferences, TvShow, User, UserId,
    WatchHistoryItem,
};

/// Everything the seeder writes
#[derive(Debug, Clone)]
pub struct SeedData {
    pub users: Vec<User>,
    pub movies: Vec<Movie>,
    pub tv_shows: Vec<TvShow>,
    pub list_entries: Vec<ListEntry>,
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Builds the sample catalog plus a list for `user_id` relative to `now`
pub fn sample_data(user_id: &UserId, now: DateTime<Utc>) -> SeedData {
    let users = vec![User {
        id: user_id.as_str().to_string(),
        username: "ott_tester_1".to_string(),
        preferences: Preferences {
            favorite_genres: vec![Genre::SciFi, Genre::Action],
            disliked_genres: vec![Genre::Horror],
        },
        watch_history: vec![WatchHistoryItem {
            content_id: "movie-101".to_string(),
            watched_on: date(2025, 10, 1),
            rating: Some(5),
        }],
    }];

    let movies = vec![
        Movie {
            id: "movie-101".to_string(),
            title: "Galactic Fury".to_string(),
            description: "A space epic where two fleets clash over a dying star.".to_string(),
            genres: vec![Genre::SciFi, Genre::Action],
            release_date: date(2024, 5, 15),
            director: "Ava Johnson".to_string(),
            actors: strings(&["Chris Pine", "Zoe Saldana"]),
        },
        Movie {
            id: "movie-102".to_string(),
            title: "The Unlikely Alchemist".to_string(),
            description: "A charming romantic comedy set in a medieval town.".to_string(),
            genres: vec![Genre::Romance, Genre::Comedy],
            release_date: date(2023, 8, 20),
            director: "Ben Stiller".to_string(),
            actors: strings(&["Anna Kendrick", "Ryan Reynolds"]),
        },
        Movie {
            id: "movie-103".to_string(),
            title: "Silent Hill".to_string(),
            description: "A psychological horror movie about a deserted town.".to_string(),
            genres: vec![Genre::Horror, Genre::Drama],
            release_date: date(2022, 11, 1),
            director: "Cynthia Roth".to_string(),
            actors: strings(&["Jessica Chastain"]),
        },
    ];

    let tv_shows = vec![
        TvShow {
            id: "tvshow-201".to_string(),
            title: "Realm of the Dragons".to_string(),
            description: "A dark fantasy series about magic, war, and political intrigue."
                .to_string(),
            genres: vec![Genre::Fantasy, Genre::Drama],
            episodes: vec![Episode {
                episode_number: 1,
                season_number: 1,
                release_date: date(2024, 1, 1),
                director: "G. M. Tally".to_string(),
                actors: strings(&["Peter Dinklage"]),
            }],
        },
        TvShow {
            id: "tvshow-202".to_string(),
            title: "Laugh Track".to_string(),
            description: "A fast-paced comedy sketch show.".to_string(),
            genres: vec![Genre::Comedy],
            episodes: vec![Episode {
                episode_number: 1,
                season_number: 1,
                release_date: date(2023, 1, 1),
                director: "Lisa Kudrow".to_string(),
                actors: strings(&["Matthew Perry"]),
            }],
        },
    ];

    let list_entries = [
        (ContentType::TvShow, "tvshow-201", Duration::hours(1)),
        (ContentType::Movie, "movie-103", Duration::days(2)),
        (ContentType::Movie, "movie-102", Duration::days(5)),
    ]
    .into_iter()
    .map(|(content_type, id, age)| {
        ListEntry::with_created_at(user_id, &ContentRef::new(content_type, id), now - age)
    })
    .collect();

    SeedData {
        users,
        movies,
        tv_shows,
        list_entries,
    }
}

fn genre_names(genres: &[Genre]) -> Vec<String> {
    genres.iter().map(|g| g.as_str().to_string()).collect()
}

/// Replaces the contents of every table with `data` in a single transaction
pub async fn seed_database(pool: &PgPool, data: &SeedData) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE users, movies, tvshows, mylists")
        .execute(&mut *tx)
        .await?;
    tracing::info!("Tables cleared");

    for user in &data.users {
        sqlx::query(
            "INSERT INTO users (id, username, preferences, watch_history) VALUES ($1, $2, $3, $4)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(Json(&user.preferences))
        .bind(Json(&user.watch_history))
        .execute(&mut *tx)
        .await?;
    }
    tracing::info!(count = data.users.len(), "Inserted users");

    for movie in &data.movies {
        sqlx::query(
            r#"
            INSERT INTO movies (id, title, description, genres, release_date, director, actors)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&movie.id)
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(genre_names(&movie.genres))
        .bind(movie.release_date)
        .bind(&movie.director)
        .bind(&movie.actors)
        .execute(&mut *tx)
        .await?;
    }
    tracing::info!(count = data.movies.len(), "Inserted movies");

    for show in &data.tv_shows {
        sqlx::query(
            "INSERT INTO tvshows (id, title, description, genres, episodes) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&show.id)
        .bind(&show.title)
        .bind(&show.description)
        .bind(genre_names(&show.genres))
        .bind(Json(&show.episodes))
        .execute(&mut *tx)
        .await?;
    }
    tracing::info!(count = data.tv_shows.len(), "Inserted TV shows");

    for entry in &data.list_entries {
        sqlx::query(
            r#"
            INSERT INTO mylists (id, user_id, content_id, content_type, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(&entry.content_id)
        .bind(entry.content_type)
        .bind(entry.created_at)
        .execute(&mut *tx)
        .await?;
    }
    tracing::info!(count = data.list_entries.len(), "Inserted list entries");

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_list_references_seeded_catalog() {
        let user = UserId::new("user-abc-123");
        let data = sample_data(&user, Utc::now());

        let movie_ids: HashSet<_> = data.movies.iter().map(|m| m.id.as_str()).collect();
        let show_ids: HashSet<_> = data.tv_shows.iter().map(|s| s.id.as_str()).collect();

        for entry in &data.list_entries {
            assert_eq!(entry.user_id, "user-abc-123");
            let known = match entry.content_type {
                ContentType::Movie => movie_ids.contains(entry.content_id.as_str()),
                ContentType::TvShow => show_ids.contains(entry.content_id.as_str()),
            };
            assert!(known, "{} is not in the catalog", entry.content_id);
        }
    }

    #[test]
    fn test_sample_entries_are_newest_first() {
        let now = Utc::now();
        let data = sample_data(&UserId::new("u"), now);
        let ids: Vec<_> = data.list_entries.iter().map(|e| e.content_id.as_str()).collect();
        assert_eq!(ids, vec!["tvshow-201", "movie-103", "movie-102"]);
        assert_eq!(data.list_entries[0].created_at, now - Duration::hours(1));
    }

    #[test]
    fn test_fixed_dates_are_midnight_utc() {
        assert_eq!(date(2024, 5, 15).to_rfc3339(), "2024-05-15T00:00:00+00:00");
    }
}
