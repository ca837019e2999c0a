// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, hit_builder_common,
                     integer_accessors, text_accessors};

/// Builder for `t=pageview` hits. The endpoint wants either a full document
/// location (`dl`) or a host/path pair (`dh` + `dp`).
#[derive(Debug, Clone, PartialEq)]
pub struct PageViewHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(PageViewHit, HitType::PageView);

impl PageViewHit {
    #[must_use]
    pub fn new(url: impl AsRef<str>, title: impl AsRef<str>) -> PageViewHit {
        PageViewHit::default().document_url(url).document_title(title)
    }

    #[must_use]
    pub fn with_description(
        url: impl AsRef<str>,
        title: impl AsRef<str>,
        description: impl AsRef<str>,
    ) -> PageViewHit {
        PageViewHit::new(url, title).content_description(description)
    }

    text_accessors! {
        /// Full document location (`dl`, max 2048 bytes).
        document_url, get_document_url => Parameter::DocumentLocationUrl
    }

    text_accessors! {
        document_title, get_document_title => Parameter::DocumentTitle
    }

    text_accessors! {
        document_host_name, get_document_host_name => Parameter::DocumentHostName
    }

    text_accessors! {
        document_path, get_document_path => Parameter::DocumentPath
    }

    text_accessors! {
        document_referrer, get_document_referrer => Parameter::DocumentReferrer
    }

    text_accessors! {
        /// Content description (`cd`; the code doubles as screen name on
        /// screenview hits).
        content_description, get_content_description => Parameter::ScreenName
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn constructors_prepopulate_in_field_order() {
        let hit = PageViewHit::with_description(
            "https://example.com/checkout",
            "Checkout",
            "funnel step 3",
        );
        assert_eq!(hit.get_document_url(), Some("https://example.com/checkout"));
        assert_eq!(hit.get_document_title(), Some("Checkout"));
        assert_eq!(hit.get_content_description(), Some("funnel step 3"));
    }

    #[test]
    fn body_carries_the_pageview_tag() {
        let hit = PageViewHit::new("https://example.com/", "Home");
        let body = HitRequest::from(hit).to_post_body();
        assert!(body.starts_with("t=pageview&"));
        assert!(body.contains("dl=https%3A%2F%2Fexample.com%2F"));
        assert!(body.contains("dt=Home"));
    }
}
