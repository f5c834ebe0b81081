use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};

use crate::{
    db::CatalogAccessor,
    error::{AppError, AppResult},
    models::{ContentDetails, Episode, Genre, Movie, TvShow},
};

#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: String,
    title: String,
    description: String,
    genres: Vec<String>,
    release_date: DateTime<Utc>,
    director: String,
    actors: Vec<String>,
}

impl TryFrom<MovieRow> for Movie {
    type Error = AppError;

    fn try_from(row: MovieRow) -> AppResult<Self> {
        Ok(Movie {
            genres: parse_genres(&row.id, row.genres)?,
            id: row.id,
            title: row.title,
            description: row.description,
            release_date: row.release_date,
            director: row.director,
            actors: row.actors,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TvShowRow {
    id: String,
    title: String,
    description: String,
    genres: Vec<String>,
    episodes: Json<Vec<Episode>>,
}

impl TryFrom<TvShowRow> for TvShow {
    type Error = AppError;

    fn try_from(row: TvShowRow) -> AppResult<Self> {
        Ok(TvShow {
            genres: parse_genres(&row.id, row.genres)?,
            id: row.id,
            title: row.title,
            description: row.description,
            episodes: row.episodes.0,
        })
    }
}

fn parse_genres(id: &str, genres: Vec<String>) -> AppResult<Vec<Genre>> {
    genres
        .iter()
        .map(|g| g.parse::<Genre>())
        .collect::<Result<_, _>>()
        .map_err(|e| AppError::Internal(format!("Catalog record {} is corrupt: {}", id, e)))
}

/// Accessor for the `movies` table
#[derive(Clone)]
pub struct PgMovieCatalog {
    pool: PgPool,
}

impl PgMovieCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogAccessor for PgMovieCatalog {
    async fn exists(&self, id: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn fetch_many(&self, ids: &[String]) -> AppResult<Vec<ContentDetails>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, description, genres, release_date, director, actors
            FROM movies
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Movie::try_from(row).map(ContentDetails::from))
            .collect()
    }
}

/// Accessor for the `tvshows` table
#[derive(Clone)]
pub struct PgTvShowCatalog {
    pool: PgPool,
}

impl PgTvShowCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CatalogAccessor for PgTvShowCatalog {
    async fn exists(&self, id: &str) -> AppResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tvshows WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn fetch_many(&self, ids: &[String]) -> AppResult<Vec<ContentDetails>> {
        let rows = sqlx::query_as::<_, TvShowRow>(
            r#"
            SELECT id, title, description, genres, episodes
            FROM tvshows
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| TvShow::try_from(row).map(ContentDetails::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genres_rejects_unknown_values() {
        let genres = vec!["Action".to_string(), "Western".to_string()];
        let err = parse_genres("movie-1", genres).unwrap_err();
        assert!(matches!(err, AppError::Internal(msg) if msg.contains("movie-1")));
    }

    #[test]
    fn test_tv_show_row_conversion() {
        let row = TvShowRow {
            id: "tvshow-1".to_string(),
            title: "Show".to_string(),
            description: "d".to_string(),
            genres: vec!["Comedy".to_string()],
            episodes: Json(vec![]),
        };
        let show = TvShow::try_from(row).unwrap();
        assert_eq!(show.genres, vec![Genre::Comedy]);
        assert!(show.episodes.is_empty());
    }
}
