//! `pagelink token <path>` – print the email token for a path.

use anyhow::Result;
use pagelink_core::config::PagelinkConfig;
use pagelink_core::token::TokenDeriver;

pub fn run_token(cfg: &PagelinkConfig, path: &str, salt: Option<String>) -> Result<()> {
    let deriver = match salt {
        Some(salt) => TokenDeriver::new(salt, cfg.token_digest),
        None => cfg.token_deriver(),
    };
    println!("{}", deriver.derive(path));
    Ok(())
}
