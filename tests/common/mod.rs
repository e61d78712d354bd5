//! A stand-in for the image service, served by axum on a random local port.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header::CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::get;
use image::{ImageFormat, Rgb, RgbImage};

/// What the fake service saw for one request.
#[derive(Clone, Debug)]
pub struct SeenRequest {
    pub prompt: String,
    pub query: HashMap<String, String>,
}

struct FakeService {
    status: StatusCode,
    body: Vec<u8>,
    hits: AtomicUsize,
    seen: Mutex<Vec<SeenRequest>>,
}

pub struct FakeServer {
    addr: SocketAddr,
    service: Arc<FakeService>,
}

impl FakeServer {
    /// Starts a server answering every prompt with `status` and `body`.
    pub async fn start(status: StatusCode, body: Vec<u8>) -> anyhow::Result<Self> {
        let service = Arc::new(FakeService {
            status,
            body,
            hits: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/prompt/{prompt}", get(generate_handler))
            .with_state(service.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                eprintln!("fake image service failed: {err}");
            }
        });
        Ok(Self { addr, service })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/prompt", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.service.hits.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.service
            .seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

async fn generate_handler(
    State(service): State<Arc<FakeService>>,
    Path(prompt): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    service.hits.fetch_add(1, Ordering::SeqCst);
    if let Ok(mut seen) = service.seen.lock() {
        seen.push(SeenRequest { prompt, query });
    }
    (
        service.status,
        [(CONTENT_TYPE, "image/jpeg")],
        service.body.clone(),
    )
}

/// A small JPEG, like the real service sends.
pub fn jpeg_image() -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(32, 24, Rgb([12, 60, 140]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
    Ok(bytes)
}
