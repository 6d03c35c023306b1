//! Indeed job search.

use reqwest::Client;

use crate::sources::listing::{LinkFromAttr, ListingAdapter, SiteProfile};

pub static INDEED: SiteProfile = SiteProfile {
    name: "Indeed",
    origin: "https://www.indeed.com",
    search_path: "/jobs",
    keyword_param: "q",
    location_param: "l",
    extra_params: &[],
    card: &[
        ".job_seen_beacon",
        ".jobsearch-ResultsList > li",
        ".jobCard",
        ".job-container",
    ],
    title: &["h2.jobTitle span[title]", "h2.jobTitle", ".jobTitle", "h2"],
    company: &[
        "[data-testid='company-name']",
        ".companyName",
        ".company",
    ],
    location: &["[data-testid='text-location']", ".companyLocation", ".location"],
    salary: &[
        ".salary-snippet-container",
        ".salaryOnly",
        "[data-testid='attribute_snippet_testid']",
    ],
    job_nature: &[".metadata .attribute_snippet", ".jobType"],
    link: &["a.jcs-JobTitle", "h2.jobTitle a", "a[href*='/viewjob']"],
    link_from_attr: Some(LinkFromAttr {
        attr: "data-jk",
        template: "/viewjob?jk={id}",
    }),
    block_markers: &["Cloudflare", "checking your browser", "cf-challenge"],
};

pub fn adapter(client: Client, max_results: usize) -> ListingAdapter {
    ListingAdapter::new(&INDEED, client, max_results)
}
