use std::{collections::HashMap, sync::Arc};

use crate::{
    error::AppResult,
    models::{ContentDetails, ContentRef, ContentType},
};

/// Read-only access to one catalog table (movies or TV shows)
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogAccessor: Send + Sync {
    /// Checks whether a record exists without materialising it
    async fn exists(&self, id: &str) -> AppResult<bool>;

    /// Fetches every record whose id is in `ids`; unknown ids are skipped
    async fn fetch_many(&self, ids: &[String]) -> AppResult<Vec<ContentDetails>>;
}

/// The full catalog, routing each [`ContentRef`] to the accessor for its tag
#[derive(Clone)]
pub struct Catalog {
    movies: Arc<dyn CatalogAccessor>,
    tv_shows: Arc<dyn CatalogAccessor>,
}

impl Catalog {
    pub fn new(movies: Arc<dyn CatalogAccessor>, tv_shows: Arc<dyn CatalogAccessor>) -> Self {
        Self { movies, tv_shows }
    }

    pub fn accessor(&self, content_type: ContentType) -> &dyn CatalogAccessor {
        match content_type {
            ContentType::Movie => self.movies.as_ref(),
            ContentType::TvShow => self.tv_shows.as_ref(),
        }
    }

    pub async fn contains(&self, content: &ContentRef) -> AppResult<bool> {
        self.accessor(content.content_type())
            .exists(content.id())
            .await
    }

    /// Resolves a batch of references, issuing at most one fetch per content type
    ///
    /// References with no matching record are absent from the returned map.
    pub async fn resolve(
        &self,
        refs: &[ContentRef],
    ) -> AppResult<HashMap<ContentRef, ContentDetails>> {
        let mut resolved = HashMap::with_capacity(refs.len());

        for content_type in ContentType::ALL {
            let mut ids: Vec<String> = refs
                .iter()
                .filter(|r| r.content_type() == content_type)
                .map(|r| r.id().to_string())
                .collect();
            if ids.is_empty() {
                continue;
            }
            ids.sort();
            ids.dedup();

            let records = self.accessor(content_type).fetch_many(&ids).await?;
            tracing::debug!(
                content_type = %content_type,
                requested = ids.len(),
                found = records.len(),
                "Resolved catalog records"
            );

            for details in records {
                resolved.insert(details.content_ref(), details);
            }
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Movie, TvShow};
    use mockall::predicate::eq;

    fn movie(id: &str) -> ContentDetails {
        Movie {
            id: id.to_string(),
            title: format!("Movie {}", id),
            description: String::new(),
            genres: vec![],
            release_date: "2024-01-01T00:00:00Z".parse().unwrap(),
            director: String::new(),
            actors: vec![],
        }
        .into()
    }

    fn show(id: &str) -> ContentDetails {
        TvShow {
            id: id.to_string(),
            title: format!("Show {}", id),
            description: String::new(),
            genres: vec![],
            episodes: vec![],
        }
        .into()
    }

    #[tokio::test]
    async fn test_contains_routes_by_tag() {
        let mut movies = MockCatalogAccessor::new();
        movies
            .expect_exists()
            .with(eq("movie-1"))
            .times(1)
            .returning(|_| Ok(true));
        let mut shows = MockCatalogAccessor::new();
        shows.expect_exists().never();

        let catalog = Catalog::new(Arc::new(movies), Arc::new(shows));
        let found = catalog
            .contains(&ContentRef::Movie("movie-1".to_string()))
            .await
            .unwrap();
        assert!(found);
    }

    #[tokio::test]
    async fn test_resolve_batches_per_type() {
        let mut movies = MockCatalogAccessor::new();
        movies
            .expect_fetch_many()
            .withf(|ids: &[String]| ids == ["m1".to_string(), "m2".to_string()])
            .times(1)
            .returning(|_| Ok(vec![movie("m1")]));
        let mut shows = MockCatalogAccessor::new();
        shows
            .expect_fetch_many()
            .times(1)
            .returning(|_| Ok(vec![show("s1")]));

        let catalog = Catalog::new(Arc::new(movies), Arc::new(shows));
        let refs = vec![
            ContentRef::Movie("m2".to_string()),
            ContentRef::TvShow("s1".to_string()),
            ContentRef::Movie("m1".to_string()),
            ContentRef::Movie("m2".to_string()),
        ];
        let resolved = catalog.resolve(&refs).await.unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(
            resolved[&ContentRef::Movie("m1".to_string())].title(),
            "Movie m1"
        );
        assert_eq!(
            resolved[&ContentRef::TvShow("s1".to_string())].title(),
            "Show s1"
        );
        assert!(!resolved.contains_key(&ContentRef::Movie("m2".to_string())));
    }

    #[tokio::test]
    async fn test_resolve_skips_types_without_refs() {
        let mut movies = MockCatalogAccessor::new();
        movies.expect_fetch_many().never();
        let mut shows = MockCatalogAccessor::new();
        shows.expect_fetch_many().never();

        let catalog = Catalog::new(Arc::new(movies), Arc::new(shows));
        assert!(catalog.resolve(&[]).await.unwrap().is_empty());
    }
}
