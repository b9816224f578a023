//! services/api/src/adapters/timings.rs
//!
//! The adapter for the external prayer-timings provider (the Aladhan API).
//! It implements the `PrayerTimingsProvider` port from the `core` crate.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use guidance_core::domain::DailyTimings;
use guidance_core::ports::{PortError, PortResult, PrayerTimingsProvider};
use serde::Deserialize;

/// A timings client keyed by latitude/longitude/calculation method.
#[derive(Clone)]
pub struct AladhanClient {
    http: reqwest::Client,
    base_url: String,
    method: u32,
}

#[derive(Deserialize)]
struct AladhanResponse {
    data: AladhanData,
}

#[derive(Deserialize)]
struct AladhanData {
    timings: AladhanTimings,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AladhanTimings {
    fajr: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

/// The provider may append a timezone suffix ("05:12 (BST)"); keep only
/// the "HH:MM" prefix.
fn normalize_time(raw: &str) -> String {
    raw.trim().chars().take(5).collect()
}

impl AladhanClient {
    /// Creates a new client with a bounded request timeout.
    pub fn new(base_url: String, method: u32, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            method,
        })
    }
}

#[async_trait]
impl PrayerTimingsProvider for AladhanClient {
    async fn fetch_timings(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> PortResult<DailyTimings> {
        // The dated endpoint expects DD-MM-YYYY.
        let url = format!("{}/v1/timings/{}", self.base_url, date.format("%d-%m-%Y"));

        let response = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("method", self.method.to_string()),
            ])
            .send()
            .await
            .map_err(|e| PortError::Unavailable(format!("timings request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PortError::Unavailable(format!(
                "timings provider returned {}",
                response.status()
            )));
        }

        let body: AladhanResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unavailable(format!("malformed timings response: {e}")))?;

        let t = body.data.timings;
        Ok(DailyTimings {
            fajr: normalize_time(&t.fajr),
            dhuhr: normalize_time(&t.dhuhr),
            asr: normalize_time(&t.asr),
            maghrib: normalize_time(&t.maghrib),
            isha: normalize_time(&t.isha),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_are_trimmed_to_hh_mm() {
        assert_eq!(normalize_time("05:12"), "05:12");
        assert_eq!(normalize_time("05:12 (BST)"), "05:12");
        assert_eq!(normalize_time("  18:40 "), "18:40");
    }

    #[test]
    fn provider_response_shape_deserializes() {
        let body = r#"{"code":200,"status":"OK","data":{"timings":{
            "Fajr":"05:12","Sunrise":"06:30","Dhuhr":"12:01","Asr":"15:20",
            "Sunset":"18:05","Maghrib":"18:05","Isha":"19:30"}}}"#;
        let parsed: AladhanResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.timings.fajr, "05:12");
        assert_eq!(parsed.data.timings.isha, "19:30");
    }
}
