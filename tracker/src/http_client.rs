// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use reqwest::{Client, Response, header::CONTENT_TYPE};

use crate::DEBUG_ANALYTICS_MOD;

/// POST one form-encoded hit payload to the collection endpoint on the shared
/// pooled client. One request, no retry; callers decide what a failure means.
pub async fn make_collect_request(
    client: &Client,
    url: &str,
    body: String,
) -> Result<Response, reqwest::Error> {
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body)
        .send()
        .await?;
    if response.status().is_success() {
        DEBUG_ANALYTICS_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "Collect request succeeded.",
                status = %response.status()
            );
        });
        Ok(response)
    } else {
        // % is Display, ? is Debug.
        tracing::error!(
            message = "Collect request failed.",
            status = %response.status()
        );
        response.error_for_status()
    }
}
