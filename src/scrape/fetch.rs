//! Page fetcher: blocking HTTP GET with a fixed user-agent.
//! The pipeline is a supervised batch job; callers log a fetch failure and
//! continue with defaults. No retry, no backoff.

use std::fmt;
use std::thread::sleep;
use std::time::Duration;

use reqwest::blocking::Client;

pub const BASE_URL: &str = "https://wiki.biligame.com";
/// 主武器理论数据表
pub const THEORY_URL: &str =
    "https://wiki.biligame.com/klbq/%E4%B8%BB%E6%AD%A6%E5%99%A8%E7%90%86%E8%AE%BA%E6%95%B0%E6%8D%AE%E8%A1%A8";
/// 武器筛选
pub const FILTER_URL: &str =
    "https://wiki.biligame.com/klbq/%E6%AD%A6%E5%99%A8%E7%AD%9B%E9%80%89";
/// 角色阵营
pub const FACTION_URL: &str =
    "https://wiki.biligame.com/klbq/%E8%A7%92%E8%89%B2%E9%98%B5%E8%90%A5";

const USER_AGENT: &str = "Mozilla/5.0";
const TIMEOUT_MS: u64 = 30_000;
/// Fixed pause between per-entity detail fetches. Politeness throttle only.
pub const POLITE_DELAY_MS: u64 = 200;

#[derive(Debug)]
pub enum FetchError {
    Build(reqwest::Error),
    Request(String, reqwest::Error),
    Status(String, u16),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build(err) => write!(f, "failed to build http client: {err}"),
            Self::Request(url, err) => write!(f, "GET {url} failed: {err}"),
            Self::Status(url, status) => write!(f, "GET {url} returned status {status}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Shared blocking client for one pipeline run.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    pub fn new() -> Result<PageClient, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(TIMEOUT_MS))
            .build()
            .map_err(FetchError::Build)?;
        Ok(PageClient { client })
    }

    /// Fetch one page and return the decoded body. Non-2xx is a failure.
    pub fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .map_err(|err| FetchError::Request(url.to_string(), err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(url.to_string(), status.as_u16()));
        }
        response
            .text()
            .map_err(|err| FetchError::Request(url.to_string(), err))
    }
}

/// Sleep between per-entity fetches to avoid hammering the wiki.
pub fn polite_pause() {
    sleep(Duration::from_millis(POLITE_DELAY_MS));
}

/// Prefix wiki-relative hrefs with the base host.
pub fn absolute_url(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{BASE_URL}{href}")
    }
}
