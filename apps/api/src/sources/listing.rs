//! Search-results page scraping shared by every site adapter.
//!
//! A `SiteProfile` describes one site: how to build its search URL and which
//! CSS selectors locate a job card and its fields. Selectors are tried in
//! order and the first hit wins, so stale selectors degrade to the next one.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::models::job::{JobRecord, SearchCriteria};
use crate::sources::{SourceAdapter, SourceError};

/// Builds an apply link from a card attribute when no anchor is usable.
pub struct LinkFromAttr {
    pub attr: &'static str,
    /// `{id}` is replaced by the attribute value.
    pub template: &'static str,
}

pub struct SiteProfile {
    pub name: &'static str,
    pub origin: &'static str,
    pub search_path: &'static str,
    pub keyword_param: &'static str,
    pub location_param: &'static str,
    pub extra_params: &'static [(&'static str, &'static str)],
    pub card: &'static [&'static str],
    pub title: &'static [&'static str],
    pub company: &'static [&'static str],
    pub location: &'static [&'static str],
    pub salary: &'static [&'static str],
    pub job_nature: &'static [&'static str],
    pub link: &'static [&'static str],
    pub link_from_attr: Option<LinkFromAttr>,
    /// Page fragments that identify a bot-protection interstitial.
    pub block_markers: &'static [&'static str],
}

impl SiteProfile {
    pub fn search_url(&self, criteria: &SearchCriteria) -> Result<Url, SourceError> {
        let mut url = Url::parse(self.origin)?.join(self.search_path)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(self.keyword_param, criteria.position.trim());
            if let Some(location) = criteria.location.as_deref().map(str::trim) {
                if !location.is_empty() {
                    query.append_pair(self.location_param, location);
                }
            }
            for (key, value) in self.extra_params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Extracts up to `max_results` complete records from a search-results page.
pub fn parse_listing(
    profile: &SiteProfile,
    html: &str,
    max_results: usize,
) -> Result<Vec<JobRecord>, SourceError> {
    let document = Html::parse_document(html);

    let cards: Vec<ElementRef> = profile
        .card
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .map(|selector| document.select(&selector).collect::<Vec<_>>())
        .find(|cards| !cards.is_empty())
        .unwrap_or_default();

    if cards.is_empty() {
        if profile.block_markers.iter().any(|m| html.contains(m)) {
            return Err(SourceError::Blocked);
        }
        warn!("No job cards found on {} results page", profile.name);
        return Ok(Vec::new());
    }

    let mut jobs = Vec::new();
    for card in cards.into_iter().take(max_results) {
        match parse_card(profile, card) {
            Some(job) => jobs.push(job),
            None => debug!("Skipping incomplete {} card", profile.name),
        }
    }

    Ok(jobs)
}

fn parse_card(profile: &SiteProfile, card: ElementRef) -> Option<JobRecord> {
    let job_title = find_text(card, profile.title)?;
    let company = find_text(card, profile.company)?;
    let apply_link = find_link(profile, card)?;

    let job = JobRecord {
        job_title,
        company,
        experience: None,
        job_nature: find_text(card, profile.job_nature),
        location: find_text(card, profile.location),
        salary: find_text(card, profile.salary),
        apply_link,
        source: profile.name.to_string(),
    };

    job.is_complete().then_some(job)
}

fn find_link(profile: &SiteProfile, card: ElementRef) -> Option<String> {
    let href = find_attr(card, profile.link, "href").or_else(|| {
        let rule = profile.link_from_attr.as_ref()?;
        let id = card.value().attr(rule.attr).or_else(|| {
            let selector = Selector::parse(&format!("[{}]", rule.attr)).ok()?;
            card.select(&selector).next()?.value().attr(rule.attr)
        })?;
        Some(rule.template.replace("{id}", id.trim()))
    })?;

    absolutize(profile.origin, &href)
}

/// Resolves a possibly relative href against the site origin.
pub fn absolutize(origin: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = Url::parse(origin).ok()?.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// First non-empty, whitespace-normalized text matched by any selector.
pub fn find_text(element: ElementRef, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            for found in element.select(&selector) {
                let text = normalize_whitespace(&found.text().collect::<String>());
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn find_attr(element: ElementRef, selectors: &[&str], attr: &str) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(value) = element
                .select(&selector)
                .filter_map(|e| e.value().attr(attr))
                .find(|v| !v.trim().is_empty())
            {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A `SourceAdapter` that GETs a site's public results page and parses it
/// with its `SiteProfile`.
pub struct ListingAdapter {
    profile: &'static SiteProfile,
    client: Client,
    max_results: usize,
}

impl ListingAdapter {
    pub fn new(profile: &'static SiteProfile, client: Client, max_results: usize) -> Self {
        Self {
            profile,
            client,
            max_results,
        }
    }
}

#[async_trait]
impl SourceAdapter for ListingAdapter {
    fn name(&self) -> &'static str {
        self.profile.name
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<JobRecord>, SourceError> {
        let url = self.profile.search_url(criteria)?;
        info!("Scraping {} jobs with URL: {url}", self.profile.name);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let jobs = parse_listing(self.profile, &html, self.max_results)?;

        info!(
            "Successfully scraped {} jobs from {}",
            jobs.len(),
            self.profile.name
        );
        Ok(jobs)
    }
}
