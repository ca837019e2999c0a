// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

/// The closed set of hit types the collection endpoint understands. The wire
/// value is carried in the `t` parameter of every payload.
///
/// [`HitType::Refund`] is not a distinct wire type: refunds are measured as
/// `event` hits that additionally carry a transaction id, so its wire value is
/// `event`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitType {
    PageView,
    ScreenView,
    Event,
    Transaction,
    Item,
    Exception,
    Timing,
    Social,
    Refund,
}

impl HitType {
    /// The value sent in the `t` parameter.
    #[must_use]
    pub const fn wire_value(&self) -> &'static str {
        match self {
            HitType::PageView => "pageview",
            HitType::ScreenView => "screenview",
            HitType::Event | HitType::Refund => "event",
            HitType::Transaction => "transaction",
            HitType::Item => "item",
            HitType::Exception => "exception",
            HitType::Timing => "timing",
            HitType::Social => "social",
        }
    }
}

impl Display for HitType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { write!(f, "{}", self.wire_value()) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn wire_values_match_the_protocol() {
        assert_eq!(HitType::PageView.to_string(), "pageview");
        assert_eq!(HitType::ScreenView.to_string(), "screenview");
        assert_eq!(HitType::Event.to_string(), "event");
        assert_eq!(HitType::Transaction.to_string(), "transaction");
        assert_eq!(HitType::Item.to_string(), "item");
        assert_eq!(HitType::Exception.to_string(), "exception");
        assert_eq!(HitType::Timing.to_string(), "timing");
        assert_eq!(HitType::Social.to_string(), "social");
        // Refunds ride on the event hit type.
        assert_eq!(HitType::Refund.to_string(), "event");
    }
}
