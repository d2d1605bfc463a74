//! Paging, filtering and grouping of children listings

use reqwest::header::HeaderMap;
use reqwest::RequestBuilder;

pub const HEADER_PAGE: &str = "X-Nuage-Page";
pub const HEADER_PAGE_SIZE: &str = "X-Nuage-PageSize";
pub const HEADER_FILTER: &str = "X-Nuage-Filter";
pub const HEADER_ORDER_BY: &str = "X-Nuage-OrderBy";
pub const HEADER_GROUP_BY: &str = "X-Nuage-GroupBy";
pub const HEADER_ATTRIBUTES: &str = "X-Nuage-Attributes";
pub const HEADER_COUNT: &str = "X-Nuage-Count";

/// Options for a children listing. After the call, `total_count` and
/// `page` hold what the controller reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchingInfo {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Controller filter expression, e.g. `name == "web"`
    pub filter: Option<String>,
    pub order_by: Option<String>,
    /// Attributes to group by; empty disables grouping
    pub group_by: Vec<String>,
    pub total_count: Option<u64>,
}

impl FetchingInfo {
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
            ..Default::default()
        }
    }

    pub fn filter(filter: impl Into<String>) -> Self {
        Self {
            filter: Some(filter.into()),
            ..Default::default()
        }
    }

    pub(crate) fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(page) = self.page {
            request = request.header(HEADER_PAGE, page);
        }
        if let Some(page_size) = self.page_size {
            request = request.header(HEADER_PAGE_SIZE, page_size);
        }
        if let Some(filter) = &self.filter {
            request = request.header(HEADER_FILTER, filter.as_str());
        }
        if let Some(order_by) = &self.order_by {
            request = request.header(HEADER_ORDER_BY, order_by.as_str());
        }
        if !self.group_by.is_empty() {
            request = request
                .header(HEADER_GROUP_BY, "true")
                .header(HEADER_ATTRIBUTES, self.group_by.join(", "));
        }
        request
    }

    pub(crate) fn record(&mut self, headers: &HeaderMap) {
        if let Some(count) = header_number(headers, HEADER_COUNT) {
            self.total_count = Some(count);
        }
        if let Some(page) = header_number(headers, HEADER_PAGE) {
            self.page = u32::try_from(page).ok();
        }
    }
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
