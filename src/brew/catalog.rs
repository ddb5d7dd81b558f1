use std::collections::HashSet;

use super::process::nonempty_lines;
use super::{Brew, BrewError};

#[derive(Debug)]
pub struct CatalogMessage {
    pub result: Result<Vec<String>, BrewError>,
}

#[derive(Debug)]
pub struct SearchMessage {
    pub keyword: String,
    pub result: Result<Vec<String>, BrewError>,
}

#[derive(Debug)]
pub struct InstalledMessage {
    pub result: Result<Vec<String>, BrewError>,
}

/// Every installable formula and cask, used as the recommendation pool.
pub async fn fetch_catalog(brew: &Brew) -> Result<Vec<String>, BrewError> {
    let formulae = brew.run(&["formulae"]).await?;
    formulae.ensure_success("brew formulae failed")?;
    let casks = brew.run(&["casks"]).await?;
    casks.ensure_success("brew casks failed")?;

    Ok(merge_catalog(
        nonempty_lines(&formulae.stdout),
        nonempty_lines(&casks.stdout),
    ))
}

pub async fn fetch_installed(brew: &Brew) -> Result<Vec<String>, BrewError> {
    let output = brew.run(&["list"]).await?;
    output.ensure_success("brew list failed")?;
    Ok(nonempty_lines(&output.stdout))
}

pub async fn search_packages(brew: &Brew, keyword: &str) -> Result<Vec<String>, BrewError> {
    let output = brew.run(&["search", keyword]).await?;
    let fallback = format!("brew search failed for {keyword}");
    output.ensure_success(&fallback)?;
    Ok(parse_search_output(&output.stdout))
}

/// Formulae first, then casks; a name listed in both appears once.
pub fn merge_catalog(formulae: Vec<String>, casks: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    formulae
        .into_iter()
        .chain(casks)
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// `brew search` separates formulae from casks with `==>` headers.
pub fn parse_search_output(text: &str) -> Vec<String> {
    nonempty_lines(text)
        .into_iter()
        .filter(|line| !line.starts_with("==>"))
        .collect()
}
