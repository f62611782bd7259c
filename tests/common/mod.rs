#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ed25519_dalek::{Signature, SigningKey, Verifier, VerifyingKey};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use dmarket_api_client::DmarketClient;
use dmarket_api_client::auth::Credentials;
use dmarket_api_client::rate_limit::RateLimiter;

/// Hex key pair derived from a one-byte seed.
pub struct TestKeys {
    pub public_key: String,
    pub private_key: String,
    pub verifying_key: VerifyingKey,
}

impl TestKeys {
    pub fn from_seed(seed: u8) -> Self {
        let signing_key = SigningKey::from_bytes(&[seed; 32]);
        Self {
            public_key: hex::encode(signing_key.verifying_key().to_bytes()),
            private_key: hex::encode(signing_key.to_keypair_bytes()),
            verifying_key: signing_key.verifying_key(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.public_key.clone(), self.private_key.clone()).unwrap()
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn build_client(server: &MockServer, keys: &TestKeys) -> DmarketClient {
    DmarketClient::builder()
        .base_url(server.uri())
        .credentials(keys.credentials())
        .rate_limiter(RateLimiter::unlimited())
        .build()
        .unwrap()
}

/// Check the authentication headers the way the API does.
///
/// Returns the reason on failure.
pub fn verify_signature(request: &Request, verifying_key: &VerifyingKey) -> Result<(), String> {
    let header = |name: &str| -> Result<String, String> {
        request
            .headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| format!("missing header {name}"))
    };

    if header("Accept")? != "application/json" || header("Content-Type")? != "application/json" {
        return Err("expected application/json".to_string());
    }

    let api_key = header("X-Api-Key")?;
    if api_key != hex::encode(verifying_key.to_bytes()) {
        return Err(format!("unknown api key {api_key}"));
    }

    let sign_date = header("X-Sign-Date")?;
    sign_date
        .parse::<i64>()
        .map_err(|_| format!("bad sign date {sign_date}"))?;

    let request_sign = header("X-Request-Sign")?;
    let signature_hex = request_sign
        .strip_prefix("dmar ed25519 ")
        .ok_or_else(|| format!("bad signature scheme {request_sign}"))?;
    let signature_bytes = hex::decode(signature_hex).map_err(|e| e.to_string())?;
    let signature = Signature::from_slice(&signature_bytes).map_err(|e| e.to_string())?;

    let uri = match request.url.query() {
        Some(query) => format!("{}?{}", request.url.path(), query),
        None => request.url.path().to_string(),
    };
    let message = format!("{}{}{}", request.method.as_str(), uri, sign_date);
    verifying_key
        .verify(message.as_bytes(), &signature)
        .map_err(|e| format!("signature mismatch: {e}"))
}

pub fn api_error(status: u16, error: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error": error,
        "code": status,
        "message": message,
        "details": [],
    }))
}

/// In-memory listing served page by page behind a cursor.
pub struct Marketplace {
    verifying_key: VerifyingKey,
    total_items: usize,
    requests: AtomicUsize,
    queries: Mutex<Vec<HashMap<String, String>>>,
}

impl Marketplace {
    pub fn new(keys: &TestKeys, total_items: usize) -> Arc<Self> {
        Arc::new(Self {
            verifying_key: keys.verifying_key,
            total_items,
            requests: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Serve every GET on `server` from this listing.
    pub async fn mount(self: &Arc<Self>, server: &MockServer) {
        let marketplace = Arc::clone(self);
        Mock::given(method("GET"))
            .respond_with(move |request: &Request| marketplace.respond(request))
            .mount(server)
            .await;
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().unwrap().clone()
    }

    fn respond(&self, request: &Request) -> ResponseTemplate {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if let Err(reason) = verify_signature(request, &self.verifying_key) {
            return api_error(401, "Unauthorized", &reason);
        }

        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();
        self.queries.lock().unwrap().push(query.clone());

        let offset = match query.get("cursor").map(String::as_str) {
            None | Some("") => 0,
            Some(cursor) => match cursor.strip_prefix("offset-").and_then(|n| n.parse().ok()) {
                Some(offset) => offset,
                None => return api_error(400, "BadRequest", "invalid cursor"),
            },
        };
        let limit = match query.get("limit").and_then(|limit| limit.parse::<usize>().ok()) {
            Some(limit) if (1..=100).contains(&limit) => limit,
            _ => return api_error(400, "BadRequest", "invalid limit"),
        };
        let title = query.get("title").cloned().unwrap_or_default();

        let end = (offset + limit).min(self.total_items);
        let objects: Vec<_> = (offset.min(end)..end)
            .map(|index| {
                let item_title = if title.is_empty() {
                    format!("Item {index}")
                } else {
                    title.clone()
                };
                let usd = (100 + index).to_string();
                serde_json::json!({
                    "itemId": format!("item-{index}"),
                    "title": item_title,
                    "amount": 1,
                    "price": {"DMC": "0", "USD": usd},
                    "type": "item",
                })
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cursor": format!("offset-{end}"),
            "objects": objects,
            "total": {"items": self.total_items, "offers": self.total_items},
        }))
    }
}
