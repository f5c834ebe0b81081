use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Discriminator stored on every list entry to select the catalog table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_type")]
pub enum ContentType {
    Movie,
    #[serde(rename = "TVShow")]
    #[sqlx(rename = "TVShow")]
    TvShow,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Movie, ContentType::TvShow];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TVShow",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| format!("unknown content type '{}'", s))
    }
}

/// Reference to a catalog record, tagged with the table it lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentRef {
    Movie(String),
    TvShow(String),
}

impl ContentRef {
    pub fn new(content_type: ContentType, id: impl Into<String>) -> Self {
        match content_type {
            ContentType::Movie => ContentRef::Movie(id.into()),
            ContentType::TvShow => ContentRef::TvShow(id.into()),
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            ContentRef::Movie(_) => ContentType::Movie,
            ContentRef::TvShow(_) => ContentType::TvShow,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ContentRef::Movie(id) | ContentRef::TvShow(id) => id,
        }
    }
}

impl Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with ID {}", self.content_type(), self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Romance,
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Romance,
        Genre::SciFi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Romance => "Romance",
            Genre::SciFi => "SciFi",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown genre '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genres: Vec<Genre>,
    pub release_date: DateTime<Utc>,
    pub director: String,
    pub actors: Vec<String>,
}

/// A single episode; owned by its show and carries no id of its own
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub episode_number: u32,
    pub season_number: u32,
    pub release_date: DateTime<Utc>,
    pub director: String,
    pub actors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TvShow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genres: Vec<Genre>,
    pub episodes: Vec<Episode>,
}

/// Full catalog record attached to a list entry at read time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ContentDetails {
    Movie(Movie),
    TvShow(TvShow),
}

impl ContentDetails {
    pub fn content_ref(&self) -> ContentRef {
        match self {
            ContentDetails::Movie(movie) => ContentRef::Movie(movie.id.clone()),
            ContentDetails::TvShow(show) => ContentRef::TvShow(show.id.clone()),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentDetails::Movie(movie) => &movie.title,
            ContentDetails::TvShow(show) => &show.title,
        }
    }
}

impl From<Movie> for ContentDetails {
    fn from(movie: Movie) -> Self {
        ContentDetails::Movie(movie)
    }
}

impl From<TvShow> for ContentDetails {
    fn from(show: TvShow) -> Self {
        ContentDetails::TvShow(show)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_wire_names() {
        assert_eq!(serde_json::to_string(&ContentType::Movie).unwrap(), "\"Movie\"");
        assert_eq!(serde_json::to_string(&ContentType::TvShow).unwrap(), "\"TVShow\"");
        assert_eq!("TVShow".parse::<ContentType>(), Ok(ContentType::TvShow));
        assert!("tvshow".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_content_ref_carries_type_and_id() {
        let content = ContentRef::new(ContentType::TvShow, "tvshow-201");
        assert_eq!(content, ContentRef::TvShow("tvshow-201".to_string()));
        assert_eq!(content.content_type(), ContentType::TvShow);
        assert_eq!(content.id(), "tvshow-201");
        assert_eq!(content.to_string(), "TVShow with ID tvshow-201");
    }

    #[test]
    fn test_genre_parse() {
        assert_eq!("SciFi".parse::<Genre>(), Ok(Genre::SciFi));
        assert!("Western".parse::<Genre>().is_err());
    }

    #[test]
    fn test_movie_serializes_camel_case() {
        let movie = Movie {
            id: "movie-1".to_string(),
            title: "Test".to_string(),
            description: "d".to_string(),
            genres: vec![Genre::Action],
            release_date: "2024-05-15T00:00:00Z".parse().unwrap(),
            director: "Someone".to_string(),
            actors: vec![],
        };
        let json = serde_json::to_value(ContentDetails::from(movie)).unwrap();
        assert_eq!(json["id"], "movie-1");
        assert_eq!(json["releaseDate"], "2024-05-15T00:00:00Z");
        assert_eq!(json["genres"][0], "Action");
    }
}
