// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, hit_builder_common,
                     integer_accessors, text_accessors};

/// Builder for `t=event` hits.
///
/// Category and action are what the endpoint keys event reports on; label and
/// value are optional refinements. All four can also be omitted entirely and
/// the hit sent bare (the permissive default mirrors the endpoint's own
/// tolerance).
#[derive(Debug, Clone, PartialEq)]
pub struct EventHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(EventHit, HitType::Event);

impl EventHit {
    /// Pre-populates the two commonly required fields. Later explicit setter
    /// calls override these.
    #[must_use]
    pub fn new(category: impl AsRef<str>, action: impl AsRef<str>) -> EventHit {
        EventHit::default().event_category(category).event_action(action)
    }

    text_accessors! {
        /// Event category (`ec`, max 150 bytes). Example: `ec=Category`.
        event_category, get_event_category => Parameter::EventCategory
    }

    text_accessors! {
        /// Event action (`ea`, max 500 bytes). Example: `ea=Action`.
        event_action, get_event_action => Parameter::EventAction
    }

    text_accessors! {
        /// Event label (`el`, max 500 bytes). Example: `el=Label`.
        event_label, get_event_label => Parameter::EventLabel
    }

    integer_accessors! {
        /// Event value (`ev`, integer, non-negative per the protocol). Example:
        /// `ev=55`. The client forwards negative values unchanged unless strict
        /// validation is enabled.
        event_value, get_event_value => Parameter::EventValue
    }
}
