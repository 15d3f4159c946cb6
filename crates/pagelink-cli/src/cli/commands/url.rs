//! `pagelink url <path>` – print the absolute URL for a resource.

use anyhow::Result;
use pagelink_core::address::StaticAddresses;
use pagelink_core::url_builder;

pub fn run_url(source: &StaticAddresses, path: &str, prefer: Option<&str>) -> Result<()> {
    let by_prefix = prefer.map(|p| move |a: &str| a.starts_with(p));
    let url = url_builder::build_url(
        source,
        path,
        by_prefix.as_ref().map(|f| f as &dyn Fn(&str) -> bool),
    )?;
    println!("{url}");
    Ok(())
}
