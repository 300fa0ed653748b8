// src/main.rs
mod metrics;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use clap::{Parser as ClapParser, Subcommand};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Instant};
use tokio::fs as tokio_fs;
use tracing::info;

use crate::metrics::Metrics;
use rankboard::{engine::Leaderboard, parser::Feed, store::DEFAULT_SHARDS, wire};

#[derive(ClapParser, Debug)]
#[command(name = "rankboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Serve the leaderboard HTTP API.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        http_bind: SocketAddr,
        /// Number of independent score shards (contention partitions).
        #[arg(long, default_value_t = DEFAULT_SHARDS)]
        shards: usize,
    },
    /// Replay an NDJSON update feed offline and write a final snapshot.
    Load {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "final_leaderboard.json")]
        out: PathBuf,
        /// Emit only the top N ranks. 0 means the full board.
        #[arg(long, default_value_t = 0)]
        top: usize,
    },
}

#[derive(Clone)]
struct AppState {
    board: Arc<Leaderboard>,
    metrics: Arc<Metrics>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Serve { http_bind, shards } => serve(http_bind, shards).await,
        Cmd::Load { file, out, top } => load(file, out, top).await,
    }
}

async fn serve(http_bind: SocketAddr, shards: usize) -> Result<()> {
    let state = AppState {
        board: Arc::new(Leaderboard::with_shards(shards)),
        metrics: Arc::new(Metrics::new()),
    };
    info!("engine: shards={shards}");

    let api = build_api(state);
    info!("http: listening on {http_bind}");
    let listener = tokio::net::TcpListener::bind(http_bind).await?;
    axum::serve(listener, api).await?;
    Ok(())
}

fn build_api(state: AppState) -> Router {
    Router::new()
        .route("/customer/{id}/score/{delta}", post(update_handler))
        .route("/leaderboard", get(range_handler))
        .route("/leaderboard/{id}", get(neighbors_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn update_handler(
    State(st): State<AppState>,
    Path((id, delta)): Path<(i64, String)>,
) -> impl IntoResponse {
    let Ok(delta) = delta.parse::<Decimal>() else {
        st.metrics.inc_update_rejected();
        return (
            StatusCode::BAD_REQUEST,
            Bytes::from_static(b"delta must be a decimal number"),
        );
    };

    let t0 = Instant::now();
    match st.board.apply_delta(id, delta) {
        Ok(score) => {
            st.metrics.record_update(t0.elapsed());
            st.metrics.inc_update();
            (StatusCode::OK, wire::encode_score(id, score))
        }
        Err(e) => {
            st.metrics.inc_update_rejected();
            (StatusCode::BAD_REQUEST, Bytes::from(e.to_string()))
        }
    }
}

#[derive(Deserialize)]
struct RangeParams {
    start: Option<i64>,
    end: Option<i64>,
}

async fn range_handler(
    State(st): State<AppState>,
    Query(q): Query<RangeParams>,
) -> impl IntoResponse {
    let (Some(start), Some(end)) = (q.start, q.end) else {
        st.metrics.inc_query_rejected();
        return (
            StatusCode::BAD_REQUEST,
            Bytes::from_static(b"start and end query parameters are required"),
        );
    };

    let t0 = Instant::now();
    match st.board.range(start, end) {
        Ok(entries) => {
            st.metrics.record_query(t0.elapsed());
            st.metrics.inc_range_query();
            (StatusCode::OK, wire::encode_entries(&entries))
        }
        Err(e) => {
            st.metrics.inc_query_rejected();
            (StatusCode::BAD_REQUEST, Bytes::from(e.to_string()))
        }
    }
}

#[derive(Deserialize)]
struct NeighborParams {
    high: Option<i64>,
    low: Option<i64>,
}

async fn neighbors_handler(
    State(st): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<NeighborParams>,
) -> impl IntoResponse {
    let high = q.high.unwrap_or(0);
    let low = q.low.unwrap_or(0);

    let t0 = Instant::now();
    match st.board.neighbors(id, high, low) {
        Ok(entries) => {
            st.metrics.record_query(t0.elapsed());
            st.metrics.inc_neighbor_query();
            (StatusCode::OK, wire::encode_entries(&entries))
        }
        Err(e) => {
            st.metrics.inc_query_rejected();
            (StatusCode::BAD_REQUEST, Bytes::from(e.to_string()))
        }
    }
}

async fn metrics_handler(State(st): State<AppState>) -> impl IntoResponse {
    let text = st
        .metrics
        .prometheus_text(st.board.rebuild_count(), st.board.customer_count() as u64);
    (StatusCode::OK, text)
}

async fn load(file: PathBuf, out: PathBuf, top: usize) -> Result<()> {
    let entries = tokio::task::spawn_blocking(move || -> Result<_> {
        let f = std::fs::File::open(&file).with_context(|| format!("open {:?}", file))?;
        let board = Leaderboard::new();
        let mut applied = 0u64;
        let mut rejected = 0u64;

        Feed::ndjson_decode_reader(f, |rec| match board.apply_delta(rec.customer, rec.delta) {
            Ok(_) => applied += 1,
            Err(_) => rejected += 1,
        })?;

        info!(
            "load: applied={applied} rejected={rejected} customers={}",
            board.customer_count()
        );

        let view = board.current_view();
        let slice = if top == 0 {
            view.entries().to_vec()
        } else {
            view.entries().iter().take(top).copied().collect()
        };
        Ok(slice)
    })
    .await??;

    tokio_fs::write(&out, wire::encode_final(&entries)).await?;
    info!("wrote final leaderboard to {:?}", out);
    Ok(())
}
