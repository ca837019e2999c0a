// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use std::fmt::Write as _;

use uatrack_protocol_schema::{HitType, InlineText, Parameter, ParameterKey,
                              ParameterValue, TinyVecBackingStore};

use crate::DEBUG_ANALYTICS_MOD;

/// One hit under construction: a hit type tag plus a small map of parameter
/// entries in insertion order. The typed per-hit-type builders in this module
/// family are thin fluent wrappers over this struct, so only setters valid for
/// the tag can ever populate it.
///
/// A request is built by exactly one owner and consumed exactly once by the
/// transport; nothing here is shared or locked.
#[derive(Debug, Clone, PartialEq)]
pub struct HitRequest {
    hit_type: HitType,
    entries: TinyVecBackingStore<(ParameterKey, ParameterValue)>,
}

impl HitRequest {
    #[must_use]
    pub fn new(hit_type: HitType) -> HitRequest {
        HitRequest {
            hit_type,
            entries: TinyVecBackingStore::new(),
        }
    }

    #[must_use]
    pub fn hit_type(&self) -> HitType { self.hit_type }

    /// Number of parameters currently set (the `t` tag is not an entry).
    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn contains(&self, key: impl Into<ParameterKey>) -> bool {
        let key = key.into();
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &(ParameterKey, ParameterValue)> {
        self.entries.iter()
    }

    pub fn remove(&mut self, key: impl Into<ParameterKey>) {
        let key = key.into();
        self.entries.retain(|(k, _)| *k != key);
    }

    fn upsert(&mut self, key: ParameterKey, value: ParameterValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Store a text value. An empty value removes the entry instead, so
    /// optional fields default to "not sent" rather than sent-empty. Values
    /// longer than the parameter's declared max byte length are truncated on a
    /// char boundary.
    pub fn set_text(&mut self, key: impl Into<ParameterKey>, value: &str) {
        let key = key.into();
        if value.is_empty() {
            self.remove(key);
            return;
        }
        let max_length = match key {
            ParameterKey::Standard(parameter) => parameter.max_length(),
            ParameterKey::CustomDimension(_) | ParameterKey::CustomMetric(_) => None,
        };
        let stored = match max_length {
            Some(max) if value.len() > max => {
                let truncated = truncate_to_char_boundary(value, max);
                DEBUG_ANALYTICS_MOD.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "Truncated over-length parameter value.",
                        code = %key.code(),
                        max_bytes = %max,
                        original_bytes = %value.len()
                    );
                });
                truncated
            }
            _ => value,
        };
        self.upsert(key, ParameterValue::text(stored));
    }

    /// Store an integer value; `None` removes the entry.
    pub fn set_integer(
        &mut self,
        key: impl Into<ParameterKey>,
        value: impl Into<Option<i64>>,
    ) {
        let key = key.into();
        match value.into() {
            Some(value) => self.upsert(key, ParameterValue::Integer(value)),
            None => self.remove(key),
        }
    }

    /// Store a double value; `None` removes the entry.
    pub fn set_double(
        &mut self,
        key: impl Into<ParameterKey>,
        value: impl Into<Option<f64>>,
    ) {
        let key = key.into();
        match value.into() {
            Some(value) => self.upsert(key, ParameterValue::Double(value)),
            None => self.remove(key),
        }
    }

    /// Store a currency value; `None` removes the entry.
    pub fn set_currency(
        &mut self,
        key: impl Into<ParameterKey>,
        value: impl Into<Option<f64>>,
    ) {
        let key = key.into();
        match value.into() {
            Some(value) => self.upsert(key, ParameterValue::Currency(value)),
            None => self.remove(key),
        }
    }

    /// Store a boolean value; `None` removes the entry.
    pub fn set_boolean(
        &mut self,
        key: impl Into<ParameterKey>,
        value: impl Into<Option<bool>>,
    ) {
        let key = key.into();
        match value.into() {
            Some(value) => self.upsert(key, ParameterValue::Boolean(value)),
            None => self.remove(key),
        }
    }

    #[must_use]
    pub fn get(&self, key: impl Into<ParameterKey>) -> Option<&ParameterValue> {
        let key = key.into();
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn get_text(&self, key: impl Into<ParameterKey>) -> Option<&str> {
        self.get(key).and_then(ParameterValue::as_text)
    }

    #[must_use]
    pub fn get_integer(&self, key: impl Into<ParameterKey>) -> Option<i64> {
        self.get(key).and_then(ParameterValue::as_integer)
    }

    #[must_use]
    pub fn get_double(&self, key: impl Into<ParameterKey>) -> Option<f64> {
        self.get(key).and_then(ParameterValue::as_double)
    }

    #[must_use]
    pub fn get_boolean(&self, key: impl Into<ParameterKey>) -> Option<bool> {
        self.get(key).and_then(ParameterValue::as_boolean)
    }

    /// Serialize this request's own parameters (prefixed by its `t` tag) into a
    /// URL-encoded POST body. The facade prepends the protocol/config prelude
    /// (`v`, `tid`, `cid`, defaults) before sending.
    #[must_use]
    pub fn to_post_body(&self) -> String {
        let mut pairs: Vec<(InlineText, String)> =
            vec![(InlineText::from("t"), self.hit_type.wire_value().to_string())];
        pairs.extend(
            self.entries
                .iter()
                .map(|(key, value)| (key.code(), value.to_string())),
        );
        encode_pairs(&pairs)
    }
}

/// Longest prefix of `value` that fits in `max` bytes without splitting a
/// UTF-8 sequence.
#[must_use]
pub(crate) fn truncate_to_char_boundary(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// Join `key=value` pairs into a form-urlencoded body.
#[must_use]
pub(crate) fn encode_pairs(pairs: &[(InlineText, String)]) -> String {
    let mut body = String::new();
    for (key, value) in pairs {
        if !body.is_empty() {
            body.push('&');
        }
        _ = write!(body, "{}={}", urlencoded(key.as_str()), urlencoded(value));
    }
    body
}

/// URL-encode a string (RFC 3986 unreserved characters pass through).
#[must_use]
pub(crate) fn urlencoded(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            _ => {
                _ = write!(result, "%{b:02X}");
            }
        }
    }
    result
}

/// Generates one fluent text setter (empty removes) / getter pair bound to a
/// [`Parameter`].
macro_rules! text_accessors {
    ($(#[$meta:meta])* $setter:ident, $getter:ident => $parameter:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $setter(mut self, value: impl AsRef<str>) -> Self {
            self.request.set_text($parameter, value.as_ref());
            self
        }

        #[must_use]
        pub fn $getter(&self) -> Option<&str> { self.request.get_text($parameter) }
    };
}

/// Generates one fluent integer setter (`None` removes) / getter pair.
macro_rules! integer_accessors {
    ($(#[$meta:meta])* $setter:ident, $getter:ident => $parameter:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $setter(mut self, value: impl Into<Option<i64>>) -> Self {
            self.request.set_integer($parameter, value);
            self
        }

        #[must_use]
        pub fn $getter(&self) -> Option<i64> { self.request.get_integer($parameter) }
    };
}

/// Generates one fluent currency setter / getter pair.
macro_rules! currency_accessors {
    ($(#[$meta:meta])* $setter:ident, $getter:ident => $parameter:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $setter(mut self, value: impl Into<Option<f64>>) -> Self {
            self.request.set_currency($parameter, value);
            self
        }

        #[must_use]
        pub fn $getter(&self) -> Option<f64> { self.request.get_double($parameter) }
    };
}

/// Generates one fluent boolean setter / getter pair.
macro_rules! boolean_accessors {
    ($(#[$meta:meta])* $setter:ident, $getter:ident => $parameter:expr) => {
        $(#[$meta])*
        #[must_use]
        pub fn $setter(mut self, value: impl Into<Option<bool>>) -> Self {
            self.request.set_boolean($parameter, value);
            self
        }

        #[must_use]
        pub fn $getter(&self) -> Option<bool> { self.request.get_boolean($parameter) }
    };
}

/// Generates the plumbing every per-hit-type builder shares: an empty
/// constructor, the general-scope accessors valid on all hit types, custom
/// dimension/metric setters, and the conversion the transport consumes.
macro_rules! hit_builder_common {
    ($builder:ident, $hit_type:expr) => {
        impl Default for $builder {
            fn default() -> Self {
                Self {
                    request: $crate::hit::request::HitRequest::new($hit_type),
                }
            }
        }

        impl From<$builder> for $crate::hit::request::HitRequest {
            fn from(builder: $builder) -> $crate::hit::request::HitRequest {
                builder.request
            }
        }

        impl $builder {
            #[must_use]
            pub fn request(&self) -> &$crate::hit::request::HitRequest { &self.request }

            text_accessors! {
                /// Overrides the facade-level `cid` default for this hit only.
                client_id, get_client_id =>
                    uatrack_protocol_schema::Parameter::ClientId
            }

            text_accessors! {
                user_id, get_user_id => uatrack_protocol_schema::Parameter::UserId
            }

            text_accessors! {
                data_source, get_data_source =>
                    uatrack_protocol_schema::Parameter::DataSource
            }

            boolean_accessors! {
                anonymize_ip, get_anonymize_ip =>
                    uatrack_protocol_schema::Parameter::AnonymizeIp
            }

            boolean_accessors! {
                non_interaction, get_non_interaction =>
                    uatrack_protocol_schema::Parameter::NonInteractionHit
            }

            integer_accessors! {
                /// Milliseconds the hit spent queued before sending (`qt`).
                queue_time, get_queue_time =>
                    uatrack_protocol_schema::Parameter::QueueTime
            }

            /// `cd<index>` indexed custom dimension (text).
            #[must_use]
            pub fn custom_dimension(mut self, index: u8, value: impl AsRef<str>) -> Self {
                self.request.set_text(
                    uatrack_protocol_schema::ParameterKey::CustomDimension(index),
                    value.as_ref(),
                );
                self
            }

            /// `cm<index>` indexed custom metric (number).
            #[must_use]
            pub fn custom_metric(mut self, index: u8, value: impl Into<Option<f64>>) -> Self {
                self.request.set_double(
                    uatrack_protocol_schema::ParameterKey::CustomMetric(index),
                    value,
                );
                self
            }
        }
    };
}

pub(crate) use {boolean_accessors, currency_accessors, hit_builder_common,
                integer_accessors, text_accessors};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uatrack_protocol_schema::Parameter;

    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let mut request = HitRequest::new(HitType::Event);
        request.set_text(Parameter::EventCategory, "video");
        request.set_integer(Parameter::EventValue, 55);
        assert_eq!(request.get_text(Parameter::EventCategory), Some("video"));
        assert_eq!(request.get_integer(Parameter::EventValue), Some(55));
    }

    #[test]
    fn setting_overwrites_in_place() {
        let mut request = HitRequest::new(HitType::Event);
        request.set_text(Parameter::EventCategory, "first");
        request.set_text(Parameter::EventCategory, "second");
        assert_eq!(request.get_text(Parameter::EventCategory), Some("second"));
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn empty_text_removes_the_entry() {
        let mut request = HitRequest::new(HitType::Event);
        request.set_text(Parameter::EventLabel, "label");
        assert!(request.contains(Parameter::EventLabel));
        request.set_text(Parameter::EventLabel, "");
        assert!(!request.contains(Parameter::EventLabel));
        assert!(!request.to_post_body().contains("el="));
    }

    #[test]
    fn none_removes_numeric_entries() {
        let mut request = HitRequest::new(HitType::Event);
        request.set_integer(Parameter::EventValue, 5);
        request.set_integer(Parameter::EventValue, None);
        assert_eq!(request.get_integer(Parameter::EventValue), None);
    }

    #[test]
    fn over_length_text_truncates_to_max_bytes() {
        // `ec` declares 150 bytes.
        let long = "x".repeat(200);
        let mut request = HitRequest::new(HitType::Event);
        request.set_text(Parameter::EventCategory, &long);
        assert_eq!(request.get_text(Parameter::EventCategory).map(str::len), Some(150));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // é is two bytes; cutting at 3 would split the second é.
        assert_eq!(truncate_to_char_boundary("ééé", 3), "é");
        assert_eq!(truncate_to_char_boundary("ééé", 4), "éé");
        assert_eq!(truncate_to_char_boundary("abc", 10), "abc");
    }

    #[test]
    fn post_body_uses_codes_and_escapes_values() {
        let mut request = HitRequest::new(HitType::Event);
        request.set_text(Parameter::EventCategory, "Category One");
        request.set_text(Parameter::EventAction, "a/b&c");
        request.set_integer(Parameter::EventValue, 55);
        assert_eq!(
            request.to_post_body(),
            "t=event&ec=Category%20One&ea=a%2Fb%26c&ev=55"
        );
    }

    #[test]
    fn urlencoded_passes_unreserved_through() {
        assert_eq!(urlencoded("AZaz09-_.~"), "AZaz09-_.~");
        assert_eq!(urlencoded("a b"), "a%20b");
        assert_eq!(urlencoded("100%"), "100%25");
        assert_eq!(urlencoded("café"), "caf%C3%A9");
    }
}
