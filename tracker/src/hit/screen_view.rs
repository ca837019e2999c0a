// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, hit_builder_common,
                     integer_accessors, text_accessors};

/// Builder for `t=screenview` hits (the app-world analogue of a page view).
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenViewHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(ScreenViewHit, HitType::ScreenView);

impl ScreenViewHit {
    #[must_use]
    pub fn new(app_name: impl AsRef<str>, screen_name: impl AsRef<str>) -> ScreenViewHit {
        ScreenViewHit::default()
            .application_name(app_name)
            .screen_name(screen_name)
    }

    text_accessors! {
        /// Screen name (`cd`). Required for screenview hits.
        screen_name, get_screen_name => Parameter::ScreenName
    }

    text_accessors! {
        application_name, get_application_name => Parameter::ApplicationName
    }

    text_accessors! {
        application_version, get_application_version => Parameter::ApplicationVersion
    }

    text_accessors! {
        application_id, get_application_id => Parameter::ApplicationId
    }
}
