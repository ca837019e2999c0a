// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, hit_builder_common,
                     integer_accessors, text_accessors};

/// Builder for refund measurements. Refunds go over the wire as `event` hits
/// that additionally reference the refunded transaction via `ti`, which is why
/// this builder carries the event field family plus a transaction id.
#[derive(Debug, Clone, PartialEq)]
pub struct RefundHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(RefundHit, HitType::Refund);

impl RefundHit {
    #[must_use]
    pub fn new(category: impl AsRef<str>, action: impl AsRef<str>) -> RefundHit {
        RefundHit::default().event_category(category).event_action(action)
    }

    text_accessors! {
        event_category, get_event_category => Parameter::EventCategory
    }

    text_accessors! {
        event_action, get_event_action => Parameter::EventAction
    }

    text_accessors! {
        event_label, get_event_label => Parameter::EventLabel
    }

    integer_accessors! {
        event_value, get_event_value => Parameter::EventValue
    }

    text_accessors! {
        /// The refunded transaction (`ti`, max 500 bytes); must match the
        /// original transaction hit's id.
        tx_id, get_tx_id => Parameter::TransactionId
    }
}
