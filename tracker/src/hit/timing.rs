// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, hit_builder_common,
                     integer_accessors, text_accessors};

/// Builder for `t=timing` hits: user timings (`utc`/`utv`/`utt`/`utl`) plus
/// the browser navigation-timing breakdown parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(TimingHit, HitType::Timing);

impl TimingHit {
    #[must_use]
    pub fn new(
        category: impl AsRef<str>,
        variable: impl AsRef<str>,
        time_millis: i64,
    ) -> TimingHit {
        TimingHit::default()
            .user_timing_category(category)
            .user_timing_variable_name(variable)
            .user_timing_time(time_millis)
    }

    text_accessors! {
        /// Timing category (`utc`, max 150 bytes). Example: `utc=jsonLoader`.
        user_timing_category, get_user_timing_category => Parameter::UserTimingCategory
    }

    text_accessors! {
        /// Timing variable (`utv`, max 500 bytes). Example: `utv=load`.
        user_timing_variable_name, get_user_timing_variable_name =>
            Parameter::UserTimingVariableName
    }

    integer_accessors! {
        /// Timing value in milliseconds (`utt`).
        user_timing_time, get_user_timing_time => Parameter::UserTimingTime
    }

    text_accessors! {
        user_timing_label, get_user_timing_label => Parameter::UserTimingLabel
    }

    integer_accessors! {
        page_load_time, get_page_load_time => Parameter::PageLoadTime
    }

    integer_accessors! {
        dns_time, get_dns_time => Parameter::DnsTime
    }

    integer_accessors! {
        page_download_time, get_page_download_time => Parameter::PageDownloadTime
    }

    integer_accessors! {
        redirect_response_time, get_redirect_response_time =>
            Parameter::RedirectResponseTime
    }

    integer_accessors! {
        tcp_connect_time, get_tcp_connect_time => Parameter::TcpConnectTime
    }

    integer_accessors! {
        server_response_time, get_server_response_time => Parameter::ServerResponseTime
    }
}
