mod catalog;
mod error;
mod page;

use anyhow::{Context, Result};
use catalog::recommender::Recommender;
use dotenv::dotenv;
use env_logger::Builder;
use error::RecommendError;
use lazy_static::lazy_static;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

#[macro_use]
extern crate log;

lazy_static! {
    static ref CATALOG_PATH: PathBuf = env_or("CATALOG_PATH", PathBuf::from("./movies.json"));
    static ref SIMILARITY_PATH: PathBuf =
        env_or("SIMILARITY_PATH", PathBuf::from("./similarity.bin"));
    static ref BIND_ADDR: IpAddr = env_or("BIND_ADDR", IpAddr::from([0, 0, 0, 0]));
    static ref PORT: u16 = env_or("PORT", 8080);
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("invalid {}: {:?}, using default", key, value);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Deserialize, Serialize)]
struct PageQuery {
    movie: Option<String>,
}

#[derive(Deserialize, Serialize)]
struct RecommendQuery {
    title: String,
}

#[derive(Serialize)]
struct RecommendedMovie {
    title: String,
    score: f32,
    link: String,
}

#[derive(Serialize)]
struct RecommendResponse {
    title: String,
    recommendations: Vec<RecommendedMovie>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // read .env
    dotenv().ok();

    // init logger
    let log_level = std::env::var("RUST_LOG").unwrap_or_default();

    if log_level == "debug" {
        Builder::new()
            .filter(None, LevelFilter::Off)
            .filter(Some("recommender"), LevelFilter::Debug)
            .init();
    } else if log_level == "info" {
        Builder::new()
            .filter(None, LevelFilter::Off)
            .filter(Some("recommender"), LevelFilter::Info)
            .init();
    } else {
        env_logger::init();
    }

    let recommender = Recommender::load(&CATALOG_PATH, &SIMILARITY_PATH).with_context(|| {
        format!(
            "load artifacts {} and {}",
            CATALOG_PATH.display(),
            SIMILARITY_PATH.display()
        )
    })?;
    info!("recommender ready: {} titles", recommender.titles().len());

    let addr = SocketAddr::new(*BIND_ADDR, *PORT);
    info!("server running at: {}", addr);
    warp::serve(routes(Arc::new(recommender))).run(addr).await;

    Ok(())
}

fn routes(
    recommender: Arc<Recommender>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let index_route = warp::path::end()
        .and(warp::get())
        .and(warp::query::<PageQuery>())
        .and(with_recommender(Arc::clone(&recommender)))
        .and_then(index);

    let titles_route = warp::path!("api" / "titles")
        .and(warp::get())
        .and(with_recommender(Arc::clone(&recommender)))
        .and_then(handle_titles);

    let recommend_route = warp::path!("api" / "recommend")
        .and(warp::get())
        .and(warp::query::<RecommendQuery>())
        .and(with_recommender(recommender))
        .and_then(handle_recommend);

    index_route.or(titles_route).or(recommend_route)
}

fn with_recommender(
    recommender: Arc<Recommender>,
) -> impl Filter<Extract = (Arc<Recommender>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&recommender))
}

async fn index(query: PageQuery, recommender: Arc<Recommender>) -> Result<impl Reply, Rejection> {
    let titles = recommender.titles();
    let (html, status) = match query.movie.as_deref() {
        None => (
            page::render(titles, None, page::Outcome::Empty),
            StatusCode::OK,
        ),
        Some(movie) => {
            info!("get recommend request: {:?}", movie);
            match recommender.recommend(movie) {
                Ok(recommended) => (
                    page::render(titles, Some(movie), page::Outcome::Recommended(&recommended)),
                    StatusCode::OK,
                ),
                Err(e) => {
                    warn!("handle recommend request failed: {}", e);
                    (
                        page::render(titles, None, page::Outcome::NotFound(movie)),
                        StatusCode::NOT_FOUND,
                    )
                }
            }
        }
    };
    Ok(warp::reply::with_status(warp::reply::html(html), status))
}

async fn handle_titles(recommender: Arc<Recommender>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&recommender.titles()))
}

async fn handle_recommend(
    query: RecommendQuery,
    recommender: Arc<Recommender>,
) -> Result<impl Reply, Rejection> {
    info!("get api recommend request: {:?}", query.title);
    let reply = match recommender.recommend_scored(&query.title) {
        Ok(scored) => {
            let response = RecommendResponse {
                recommendations: scored
                    .into_iter()
                    .map(|r| RecommendedMovie {
                        link: page::imdb_link(&r.title),
                        title: r.title,
                        score: r.score,
                    })
                    .collect(),
                title: query.title,
            };
            warp::reply::with_status(warp::reply::json(&response), StatusCode::OK)
        }
        Err(e) => {
            warn!("handle api recommend request failed: {}", e);
            let status = match e {
                RecommendError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let response = ErrorResponse {
                error: e.to_string(),
            };
            warp::reply::with_status(warp::reply::json(&response), status)
        }
    };
    Ok(reply)
}
