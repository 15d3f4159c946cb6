//! `pagelink resolve` – print the resolved base URL.

use anyhow::Result;
use pagelink_core::address::StaticAddresses;
use pagelink_core::resolver;

pub fn run_resolve(source: &StaticAddresses, https: bool, prefer: Option<&str>) -> Result<()> {
    let base = if https {
        resolver::resolve_https_from(source)?
    } else {
        let by_prefix = prefer.map(|p| move |a: &str| a.starts_with(p));
        resolver::resolve_from(
            source,
            by_prefix.as_ref().map(|f| f as &dyn Fn(&str) -> bool),
        )?
    };
    println!("{base}");
    Ok(())
}
