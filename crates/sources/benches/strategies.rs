//! Benchmarks for the recommendation strategies
//!
//! Run with: cargo bench --package sources
//!
//! Uses a synthetic catalog so no data files are needed.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::{Catalog, Movie, User, UserDirectory};
use pipeline::build_user_context;
use sources::{
    CollaborativeSource, GenreBasedSource, RecencySource, RecommendationSource, TopRatedSource,
};
use std::sync::Arc;

const GENRES: [&str; 6] = ["Action", "Comedy", "Drama", "Sci-Fi", "Romance", "Thriller"];

fn create_catalog(size: usize) -> Arc<Catalog> {
    let movies = (0..size)
        .map(|i| Movie {
            title: format!("Movie {i}"),
            genres: vec![
                GENRES[i % GENRES.len()].to_string(),
                GENRES[(i / 3) % GENRES.len()].to_string(),
            ],
            rating: (i % 100) as f32 / 10.0,
            release_year: 1980 + (i % 45) as u16,
        })
        .collect();
    Arc::new(Catalog::new(movies))
}

fn create_users(count: usize, catalog_size: usize) -> Arc<UserDirectory> {
    let users = (0..count)
        .map(|u| User {
            id: u as u32 + 1,
            name: format!("User {u}"),
            watched_movies: (0..25)
                .map(|k| format!("Movie {}", (u * 7 + k * 13) % catalog_size))
                .collect(),
        })
        .collect();
    Arc::new(UserDirectory::new(users))
}

fn bench_strategies(c: &mut Criterion) {
    let catalog = create_catalog(2_000);
    let users = create_users(500, 2_000);
    let context = build_user_context(&catalog, &users.users()[0]);

    let genre = GenreBasedSource::new(catalog.clone());
    c.bench_function("genre_based_recommend", |b| {
        b.iter(|| black_box(genre.recommend(black_box(&context))))
    });

    let collaborative = CollaborativeSource::new(catalog.clone(), users.clone());
    c.bench_function("collaborative_recommend", |b| {
        b.iter(|| black_box(collaborative.recommend(black_box(&context))))
    });

    let top_rated = TopRatedSource::new(catalog.clone());
    c.bench_function("top_rated_recommend", |b| {
        b.iter(|| black_box(top_rated.recommend(black_box(&context))))
    });

    let recency = RecencySource::new(catalog.clone());
    c.bench_function("recency_recommend", |b| {
        b.iter(|| black_box(recency.recommend(black_box(&context))))
    });
}

fn bench_build_user_context(c: &mut Criterion) {
    let catalog = create_catalog(2_000);
    let users = create_users(1, 2_000);
    let user = &users.users()[0];

    c.bench_function("build_user_context", |b| {
        b.iter(|| black_box(build_user_context(black_box(&catalog), black_box(user))))
    });
}

criterion_group!(benches, bench_strategies, bench_build_user_context);
criterion_main!(benches);
