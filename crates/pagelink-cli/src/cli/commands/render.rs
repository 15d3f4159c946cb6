//! `pagelink render <path>` – fetch a rendered page.

use anyhow::{Context, Result};
use pagelink_core::address::StaticAddresses;
use pagelink_core::config::PagelinkConfig;
use pagelink_core::render::PageRenderClient;
use pagelink_core::transport::CurlTransport;

pub async fn run_render(cfg: &PagelinkConfig, source: StaticAddresses, path: String) -> Result<()> {
    let client = PageRenderClient::new(
        source,
        cfg.token_deriver(),
        CurlTransport::new(cfg.transport.clone()),
    );
    // The curl transfer blocks; keep it off the async workers.
    let body = tokio::task::spawn_blocking(move || client.render_page(&path))
        .await
        .context("render task failed")??;
    print!("{body}");
    Ok(())
}
