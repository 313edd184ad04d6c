use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::errors::ApiError;
use crate::domains::movies::models::{Movie, RankingDefinition};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub imdb_id: String,
    pub title: String,
    pub genre: String,
    pub release_year: i32,
}

/// Movie as exposed over the API, with the ranking pair nested.
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub imdb_id: String,
    pub title: String,
    pub genre: String,
    pub release_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<RankingDefinition>,
}

impl From<Movie> for MovieResponse {
    fn from(movie: Movie) -> Self {
        let ranking = movie.ranking();
        Self {
            imdb_id: movie.imdb_id,
            title: movie.title,
            genre: movie.genre,
            release_year: movie.release_year,
            admin_review: movie.admin_review,
            ranking,
        }
    }
}

/// GET /movies
pub async fn list_movies_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<MovieResponse>>, ApiError> {
    let movies = Movie::find_all(&state.db_pool).await?;
    Ok(Json(movies.into_iter().map(Into::into).collect()))
}

/// GET /movie/{imdb_id}
pub async fn get_movie_handler(
    Extension(state): Extension<AppState>,
    Path(imdb_id): Path<String>,
) -> Result<Json<MovieResponse>, ApiError> {
    let movie = Movie::find_by_imdb_id(&imdb_id, &state.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Movie"))?;

    Ok(Json(movie.into()))
}

/// PUT /add-movie
pub async fn add_movie_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<CreateMovieRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), ApiError> {
    validate_movie(&body)?;

    if Movie::exists(&body.imdb_id, &state.db_pool).await? {
        return Err(ApiError::Conflict(
            "Movie with this IMDB ID already exists".to_string(),
        ));
    }

    let movie = Movie {
        id: Uuid::new_v4(),
        imdb_id: body.imdb_id,
        title: body.title,
        genre: body.genre,
        release_year: body.release_year,
        admin_review: None,
        ranking_name: None,
        ranking_value: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let inserted = movie.insert(&state.db_pool).await?;

    tracing::info!(imdb_id = %inserted.imdb_id, "movie added");

    Ok((StatusCode::CREATED, Json(inserted.into())))
}

fn validate_movie(body: &CreateMovieRequest) -> Result<(), ApiError> {
    if body.imdb_id.trim().is_empty() {
        return Err(ApiError::InvalidPayload(
            "imdb_id must not be empty".to_string(),
        ));
    }
    if body.title.trim().is_empty() {
        return Err(ApiError::InvalidPayload(
            "title must not be empty".to_string(),
        ));
    }
    if !(1888..=2100).contains(&body.release_year) {
        return Err(ApiError::InvalidPayload(
            "release_year is out of range".to_string(),
        ));
    }
    Ok(())
}
