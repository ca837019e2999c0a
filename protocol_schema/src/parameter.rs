// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::{HitType, InlineText};

/// Value type a parameter carries on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Text,
    Integer,
    Double,
    Currency,
    Boolean,
}

/// Every protocol parameter this client knows how to send. Each variant maps a
/// logical field name to its wire code, value type, declared maximum byte
/// length, and the hit types it applies to.
///
/// This is a static lookup table: no runtime registration, no mutation. The
/// tables come from the Measurement Protocol parameter reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    // General.
    ProtocolVersion,
    TrackingId,
    AnonymizeIp,
    DataSource,
    QueueTime,
    CacheBuster,
    // User.
    ClientId,
    UserId,
    // Session.
    SessionControl,
    IpOverride,
    UserAgentOverride,
    // Hit.
    HitTypeParam,
    NonInteractionHit,
    // Content.
    DocumentLocationUrl,
    DocumentHostName,
    DocumentPath,
    DocumentTitle,
    DocumentReferrer,
    ScreenName,
    // App.
    ApplicationName,
    ApplicationVersion,
    ApplicationId,
    // Event.
    EventCategory,
    EventAction,
    EventLabel,
    EventValue,
    // E-commerce.
    TransactionId,
    TransactionAffiliation,
    TransactionRevenue,
    TransactionShipping,
    TransactionTax,
    CurrencyCode,
    ItemName,
    ItemPrice,
    ItemQuantity,
    ItemCode,
    ItemCategory,
    // Social.
    SocialNetwork,
    SocialAction,
    SocialActionTarget,
    // Timing.
    UserTimingCategory,
    UserTimingVariableName,
    UserTimingTime,
    UserTimingLabel,
    PageLoadTime,
    DnsTime,
    PageDownloadTime,
    RedirectResponseTime,
    TcpConnectTime,
    ServerResponseTime,
    // Exception.
    ExceptionDescription,
    ExceptionFatal,
}

/// Hit-type applicability slices. An empty slice means "all hit types".
mod applies {
    use super::HitType;

    pub const ALL: &[HitType] = &[];
    pub const EVENT: &[HitType] = &[HitType::Event, HitType::Refund];
    pub const TRANSACTION: &[HitType] = &[HitType::Transaction];
    pub const TRANSACTION_ITEM: &[HitType] =
        &[HitType::Transaction, HitType::Item, HitType::Refund];
    pub const TRANSACTION_ITEM_ONLY: &[HitType] = &[HitType::Transaction, HitType::Item];
    pub const ITEM: &[HitType] = &[HitType::Item];
    pub const SOCIAL: &[HitType] = &[HitType::Social];
    pub const TIMING: &[HitType] = &[HitType::Timing];
    pub const EXCEPTION: &[HitType] = &[HitType::Exception];
    pub const SCREEN_OR_PAGE: &[HitType] = &[HitType::ScreenView, HitType::PageView];
}

impl Parameter {
    /// The short wire code, e.g. `"ec"` for [`Parameter::EventCategory`].
    #[rustfmt::skip]
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Parameter::ProtocolVersion =>        "v",
            Parameter::TrackingId =>             "tid",
            Parameter::AnonymizeIp =>            "aip",
            Parameter::DataSource =>             "ds",
            Parameter::QueueTime =>              "qt",
            Parameter::CacheBuster =>            "z",
            Parameter::ClientId =>               "cid",
            Parameter::UserId =>                 "uid",
            Parameter::SessionControl =>         "sc",
            Parameter::IpOverride =>             "uip",
            Parameter::UserAgentOverride =>      "ua",
            Parameter::HitTypeParam =>           "t",
            Parameter::NonInteractionHit =>      "ni",
            Parameter::DocumentLocationUrl =>    "dl",
            Parameter::DocumentHostName =>       "dh",
            Parameter::DocumentPath =>           "dp",
            Parameter::DocumentTitle =>          "dt",
            Parameter::DocumentReferrer =>       "dr",
            Parameter::ScreenName =>             "cd",
            Parameter::ApplicationName =>        "an",
            Parameter::ApplicationVersion =>     "av",
            Parameter::ApplicationId =>          "aid",
            Parameter::EventCategory =>          "ec",
            Parameter::EventAction =>            "ea",
            Parameter::EventLabel =>             "el",
            Parameter::EventValue =>             "ev",
            Parameter::TransactionId =>          "ti",
            Parameter::TransactionAffiliation => "ta",
            Parameter::TransactionRevenue =>     "tr",
            Parameter::TransactionShipping =>    "ts",
            Parameter::TransactionTax =>         "tt",
            Parameter::CurrencyCode =>           "cu",
            Parameter::ItemName =>               "in",
            Parameter::ItemPrice =>              "ip",
            Parameter::ItemQuantity =>           "iq",
            Parameter::ItemCode =>               "ic",
            Parameter::ItemCategory =>           "iv",
            Parameter::SocialNetwork =>          "sn",
            Parameter::SocialAction =>           "sa",
            Parameter::SocialActionTarget =>     "st",
            Parameter::UserTimingCategory =>     "utc",
            Parameter::UserTimingVariableName => "utv",
            Parameter::UserTimingTime =>         "utt",
            Parameter::UserTimingLabel =>        "utl",
            Parameter::PageLoadTime =>           "plt",
            Parameter::DnsTime =>                "dns",
            Parameter::PageDownloadTime =>       "pdt",
            Parameter::RedirectResponseTime =>   "rrt",
            Parameter::TcpConnectTime =>         "tcp",
            Parameter::ServerResponseTime =>     "srt",
            Parameter::ExceptionDescription =>   "exd",
            Parameter::ExceptionFatal =>         "exf",
        }
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Parameter::QueueTime
            | Parameter::EventValue
            | Parameter::ItemQuantity
            | Parameter::UserTimingTime
            | Parameter::PageLoadTime
            | Parameter::DnsTime
            | Parameter::PageDownloadTime
            | Parameter::RedirectResponseTime
            | Parameter::TcpConnectTime
            | Parameter::ServerResponseTime => ValueType::Integer,
            Parameter::TransactionRevenue
            | Parameter::TransactionShipping
            | Parameter::TransactionTax
            | Parameter::ItemPrice => ValueType::Currency,
            Parameter::AnonymizeIp
            | Parameter::NonInteractionHit
            | Parameter::ExceptionFatal => ValueType::Boolean,
            _ => ValueType::Text,
        }
    }

    /// Declared maximum byte length, where the protocol declares one.
    #[rustfmt::skip]
    #[must_use]
    pub const fn max_length(&self) -> Option<usize> {
        match self {
            Parameter::DataSource =>             Some(150),
            Parameter::ClientId =>               Some(512),
            Parameter::UserId =>                 Some(512),
            Parameter::UserAgentOverride =>      Some(2048),
            Parameter::DocumentLocationUrl =>    Some(2048),
            Parameter::DocumentHostName =>       Some(100),
            Parameter::DocumentPath =>           Some(2048),
            Parameter::DocumentTitle =>          Some(1500),
            Parameter::DocumentReferrer =>       Some(2048),
            Parameter::ScreenName =>             Some(2048),
            Parameter::ApplicationName =>        Some(100),
            Parameter::ApplicationVersion =>     Some(100),
            Parameter::ApplicationId =>          Some(150),
            Parameter::EventCategory =>          Some(150),
            Parameter::EventAction =>            Some(500),
            Parameter::EventLabel =>             Some(500),
            Parameter::TransactionId =>          Some(500),
            Parameter::TransactionAffiliation => Some(500),
            Parameter::CurrencyCode =>           Some(10),
            Parameter::ItemName =>               Some(500),
            Parameter::ItemCode =>               Some(500),
            Parameter::ItemCategory =>           Some(500),
            Parameter::SocialNetwork =>          Some(50),
            Parameter::SocialAction =>           Some(50),
            Parameter::SocialActionTarget =>     Some(2048),
            Parameter::UserTimingCategory =>     Some(150),
            Parameter::UserTimingVariableName => Some(500),
            Parameter::UserTimingLabel =>        Some(500),
            Parameter::ExceptionDescription =>   Some(150),
            _ =>                                 None,
        }
    }

    /// Hit types this parameter may be sent with. An empty slice means the
    /// parameter applies to every hit type.
    #[rustfmt::skip]
    #[must_use]
    pub const fn supported_hit_types(&self) -> &'static [HitType] {
        match self {
            Parameter::ScreenName =>             applies::SCREEN_OR_PAGE,
            Parameter::EventCategory
            | Parameter::EventAction
            | Parameter::EventLabel
            | Parameter::EventValue =>           applies::EVENT,
            Parameter::TransactionId =>          applies::TRANSACTION_ITEM,
            Parameter::TransactionAffiliation
            | Parameter::TransactionRevenue
            | Parameter::TransactionShipping
            | Parameter::TransactionTax =>       applies::TRANSACTION,
            Parameter::CurrencyCode =>           applies::TRANSACTION_ITEM_ONLY,
            Parameter::ItemName
            | Parameter::ItemPrice
            | Parameter::ItemQuantity
            | Parameter::ItemCode
            | Parameter::ItemCategory =>         applies::ITEM,
            Parameter::SocialNetwork
            | Parameter::SocialAction
            | Parameter::SocialActionTarget =>   applies::SOCIAL,
            Parameter::UserTimingCategory
            | Parameter::UserTimingVariableName
            | Parameter::UserTimingTime
            | Parameter::UserTimingLabel
            | Parameter::PageLoadTime
            | Parameter::DnsTime
            | Parameter::PageDownloadTime
            | Parameter::RedirectResponseTime
            | Parameter::TcpConnectTime
            | Parameter::ServerResponseTime =>   applies::TIMING,
            Parameter::ExceptionDescription
            | Parameter::ExceptionFatal =>       applies::EXCEPTION,
            _ =>                                 applies::ALL,
        }
    }

    /// Whether this parameter may be sent with `hit_type`.
    #[must_use]
    pub fn applies_to(&self, hit_type: HitType) -> bool {
        let supported = self.supported_hit_types();
        supported.is_empty() || supported.contains(&hit_type)
    }
}

/// Parameters the endpoint requires for a given hit type, beyond the
/// always-required `v`, `tid`, `cid`, and `t`.
///
/// Page views are a special case handled by the validator: they need either
/// [`Parameter::DocumentPath`] or [`Parameter::DocumentLocationUrl`], which a
/// flat slice cannot express.
#[rustfmt::skip]
#[must_use]
pub const fn required_parameters(hit_type: HitType) -> &'static [Parameter] {
    match hit_type {
        HitType::Event =>       &[Parameter::EventCategory, Parameter::EventAction],
        HitType::Refund =>      &[Parameter::EventCategory, Parameter::EventAction,
                                  Parameter::TransactionId],
        HitType::Transaction => &[Parameter::TransactionId],
        HitType::Item =>        &[Parameter::TransactionId, Parameter::ItemName],
        HitType::Social =>      &[Parameter::SocialNetwork, Parameter::SocialAction,
                                  Parameter::SocialActionTarget],
        HitType::ScreenView =>  &[Parameter::ScreenName],
        HitType::Timing =>      &[Parameter::UserTimingCategory,
                                  Parameter::UserTimingVariableName,
                                  Parameter::UserTimingTime],
        HitType::PageView | HitType::Exception => &[],
    }
}

/// Key for one entry in a hit's parameter map. Almost always a
/// [`Parameter`], but the protocol also allows indexed custom dimensions
/// (`cd1`..`cd200`, text) and custom metrics (`cm1`..`cm200`, number) whose
/// codes cannot be a `&'static str`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKey {
    Standard(Parameter),
    CustomDimension(u8),
    CustomMetric(u8),
}

impl ParameterKey {
    #[must_use]
    pub fn code(&self) -> InlineText {
        match self {
            ParameterKey::Standard(parameter) => InlineText::from(parameter.code()),
            ParameterKey::CustomDimension(index) => {
                let mut code = InlineText::new();
                _ = write!(code, "cd{index}");
                code
            }
            ParameterKey::CustomMetric(index) => {
                let mut code = InlineText::new();
                _ = write!(code, "cm{index}");
                code
            }
        }
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            ParameterKey::Standard(parameter) => parameter.value_type(),
            ParameterKey::CustomDimension(_) => ValueType::Text,
            ParameterKey::CustomMetric(_) => ValueType::Double,
        }
    }
}

impl From<Parameter> for ParameterKey {
    fn from(parameter: Parameter) -> ParameterKey { ParameterKey::Standard(parameter) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(Parameter::EventCategory, "ec", Some(150); "event category")]
    #[test_case(Parameter::EventAction, "ea", Some(500); "event action")]
    #[test_case(Parameter::EventLabel, "el", Some(500); "event label")]
    #[test_case(Parameter::EventValue, "ev", None; "event value")]
    #[test_case(Parameter::TransactionId, "ti", Some(500); "transaction id")]
    #[test_case(Parameter::DocumentLocationUrl, "dl", Some(2048); "document location")]
    #[test_case(Parameter::ProtocolVersion, "v", None; "protocol version")]
    fn codes_and_max_lengths(parameter: Parameter, code: &str, max_length: Option<usize>) {
        assert_eq!(parameter.code(), code);
        assert_eq!(parameter.max_length(), max_length);
    }

    #[test]
    fn value_types_follow_the_reference_tables() {
        assert_eq!(Parameter::EventValue.value_type(), ValueType::Integer);
        assert_eq!(Parameter::TransactionRevenue.value_type(), ValueType::Currency);
        assert_eq!(Parameter::AnonymizeIp.value_type(), ValueType::Boolean);
        assert_eq!(Parameter::EventCategory.value_type(), ValueType::Text);
        assert_eq!(Parameter::ItemQuantity.value_type(), ValueType::Integer);
    }

    #[test]
    fn applicability_distinguishes_global_from_scoped_parameters() {
        // `cid` is global.
        assert!(Parameter::ClientId.applies_to(HitType::Event));
        assert!(Parameter::ClientId.applies_to(HitType::Item));

        // `ec` belongs to event hits (refunds included), nothing else.
        assert!(Parameter::EventCategory.applies_to(HitType::Event));
        assert!(Parameter::EventCategory.applies_to(HitType::Refund));
        assert!(!Parameter::EventCategory.applies_to(HitType::PageView));

        // `ti` spans transactions, items, and refund events.
        assert!(Parameter::TransactionId.applies_to(HitType::Transaction));
        assert!(Parameter::TransactionId.applies_to(HitType::Item));
        assert!(Parameter::TransactionId.applies_to(HitType::Refund));
        assert!(!Parameter::TransactionId.applies_to(HitType::Social));
    }

    #[test]
    fn required_parameter_sets() {
        assert_eq!(
            required_parameters(HitType::Event),
            &[Parameter::EventCategory, Parameter::EventAction]
        );
        assert_eq!(required_parameters(HitType::Transaction), &[Parameter::TransactionId]);
        assert_eq!(
            required_parameters(HitType::Item),
            &[Parameter::TransactionId, Parameter::ItemName]
        );
        assert!(required_parameters(HitType::PageView).is_empty());
    }

    #[test]
    fn custom_keys_format_indexed_codes() {
        assert_eq!(ParameterKey::CustomDimension(5).code().as_str(), "cd5");
        assert_eq!(ParameterKey::CustomMetric(12).code().as_str(), "cm12");
        assert_eq!(ParameterKey::CustomDimension(5).value_type(), ValueType::Text);
        assert_eq!(ParameterKey::CustomMetric(12).value_type(), ValueType::Double);
        assert_eq!(
            ParameterKey::from(Parameter::EventCategory).code().as_str(),
            "ec"
        );
    }
}
