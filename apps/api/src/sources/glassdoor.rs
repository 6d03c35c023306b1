//! Glassdoor job search.

use reqwest::Client;

use crate::sources::listing::{LinkFromAttr, ListingAdapter, SiteProfile};

pub static GLASSDOOR: SiteProfile = SiteProfile {
    name: "Glassdoor",
    origin: "https://www.glassdoor.com",
    search_path: "/Job/jobs.htm",
    keyword_param: "sc.keyword",
    location_param: "locKeyword",
    extra_params: &[],
    card: &[
        "li[data-test='jobListing']",
        ".react-job-listing",
        ".jobCard",
        "li.JobsList_jobListItem",
    ],
    title: &[
        "[data-test='job-title']",
        "a.jobTitle",
        "a.job-title",
        ".jobLink",
    ],
    company: &[
        "[data-test='employer-name']",
        ".EmployerProfile_compactEmployerName",
        ".employer-name",
        "a.jobCompany",
    ],
    location: &["[data-test='emp-location']", "[data-test='location']", ".location"],
    salary: &["[data-test='detailSalary']", "[data-test='salary']", ".salary-estimate"],
    job_nature: &["[data-test='job-type']", ".jobType"],
    link: &[
        "a[data-test='job-title']",
        "a[data-test='job-link']",
        "a[href*='/job-listing/']",
        "a[href*='glassdoor.com/partner/']",
    ],
    link_from_attr: Some(LinkFromAttr {
        attr: "data-id",
        template: "/job-listing/{id}",
    }),
    block_markers: &["Cloudflare", "Help Us Protect Glassdoor"],
};

pub fn adapter(client: Client, max_results: usize) -> ListingAdapter {
    ListingAdapter::new(&GLASSDOOR, client, max_results)
}
