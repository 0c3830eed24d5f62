//! Reporting aggregate endpoints.
//!
//! The same shapes can be rebuilt client-side from raw collections with
//! [`clinica_core::reports`]; these calls fetch the server's version.

use crate::{ApiClient, ApiResult};
use clinica_core::{Alerts, Summary};

impl ApiClient {
    /// Headline counts for the dashboard.
    pub async fn report_summary(&self) -> ApiResult<Summary> {
        self.get_json("reports/summary", &[]).await
    }

    /// Alert lists for the dashboard.
    pub async fn report_alerts(&self) -> ApiResult<Alerts> {
        self.get_json("reports/alerts", &[]).await
    }
}
