// src/fetch/pages.rs
use anyhow::{anyhow, bail, Context, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::{fs, io::AsyncWriteExt, time::sleep};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::PipelineConfig;

const MAX_RETRIES: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Unit pages by code, read from `<cache_dir>/<UNIT>.html` when present and
/// downloaded into it otherwise.
pub struct PageCache {
    /// `None` when running offline: a cache miss is then an error.
    client: Option<Client>,
    base: Url,
    dir: PathBuf,
    delay: Duration,
}

impl PageCache {
    pub fn new(client: Client, config: &PipelineConfig) -> Result<Self> {
        Self::build(Some(client), config)
    }

    pub fn offline(config: &PipelineConfig) -> Result<Self> {
        Self::build(None, config)
    }

    fn build(client: Option<Client>, config: &PipelineConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("parsing base URL {}", config.base_url))?;
        Ok(Self {
            client,
            base,
            dir: config.cache_dir.clone(),
            delay: config.fetch_delay(),
        })
    }

    pub fn cache_path(&self, unit: &str) -> PathBuf {
        self.dir.join(format!("{unit}.html"))
    }

    /// HTML of one unit page. A real download is followed by the configured
    /// pause; cache hits return immediately.
    #[instrument(level = "info", skip(self))]
    pub async fn page(&self, unit: &str) -> Result<String> {
        let path = self.cache_path(unit);
        let cached = fs::try_exists(&path)
            .await
            .with_context(|| format!("checking page cache {}", path.display()))?;
        if cached {
            debug!(path = %path.display(), "cache hit");
            return fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading cached page {}", path.display()));
        }

        let Some(client) = &self.client else {
            bail!("unit {unit}: no cached page at {} and running offline", path.display());
        };
        let url = self
            .base
            .join(&format!("{unit}.html"))
            .with_context(|| format!("building URL for unit {unit}"))?;

        info!(%url, "downloading");
        let html = download(client, &url).await?;
        store(&path, &html).await?;
        sleep(self.delay).await;
        Ok(html)
    }
}

async fn download(client: &Client, url: &Url) -> Result<String> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let resp = client.get(url.as_str()).send().await;
        match resp {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(html) => return Ok(html),
                Err(e) if attempt < MAX_RETRIES => {
                    warn!(%url, attempt, "reading body failed: {}", e);
                    sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e).with_context(|| format!("reading body from {url}")),
            },
            Ok(resp) => return Err(anyhow!("HTTP error {} for {}", resp.status(), url)),
            Err(e) if attempt < MAX_RETRIES => {
                warn!(%url, attempt, "request failed: {}", e);
                sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e).with_context(|| format!("GET {url}")),
        }
    }
}

/// Save a freshly downloaded page; never overwrites an existing cache entry.
async fn store(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating cache dir {}", parent.display()))?;
    }
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .with_context(|| format!("creating cache file {}", path.display()))?;
    file.write_all(html.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
