use std::time::Duration;

use reqwest::Client;

/// Build a default client with the bounded per-request timeout.
pub fn try_new(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}
