//! LinkedIn public (guest) job search.

use reqwest::Client;

use crate::sources::listing::{ListingAdapter, SiteProfile};

pub static LINKEDIN: SiteProfile = SiteProfile {
    name: "LinkedIn",
    origin: "https://www.linkedin.com",
    search_path: "/jobs/search/",
    keyword_param: "keywords",
    location_param: "location",
    extra_params: &[],
    card: &[".jobs-search__results-list > li", "div.base-search-card"],
    title: &[".base-search-card__title", "h3"],
    company: &[".base-search-card__subtitle", "h4"],
    location: &[".job-search-card__location"],
    salary: &[".job-search-card__salary-info"],
    job_nature: &[".job-search-card__workplace-type"],
    link: &["a.base-card__full-link", "a[href*='/jobs/view/']"],
    link_from_attr: None,
    block_markers: &["authwall", "Sign in to view more jobs"],
};

pub fn adapter(client: Client, max_results: usize) -> ListingAdapter {
    ListingAdapter::new(&LINKEDIN, client, max_results)
}
