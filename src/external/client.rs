use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client instance shared by all outbound calls.
///
/// The webhook POST, the OAuth token exchange, the Firestore REST calls,
/// and the FCM sends all go through this client, so TCP connections and
/// TLS sessions are pooled across requests.
///
/// No per-call timeouts are configured anywhere else; the 30s request and
/// 10s connect timeouts here are the effective limits for every external
/// call the relay makes.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .expect("Failed to build HTTP client")
});
