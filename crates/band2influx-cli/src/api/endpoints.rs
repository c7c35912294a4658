//! API endpoint URL builders

/// Build datapoint ingestion URL
pub fn datapoints_url(base_url: &str) -> String {
    format!("{}/api/datapoints", base_url.trim_end_matches('/'))
}
