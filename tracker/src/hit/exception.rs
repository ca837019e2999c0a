// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, hit_builder_common,
                     integer_accessors, text_accessors};

/// Builder for `t=exception` hits.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(ExceptionHit, HitType::Exception);

impl ExceptionHit {
    #[must_use]
    pub fn new(description: impl AsRef<str>) -> ExceptionHit {
        ExceptionHit::default().exception_description(description)
    }

    text_accessors! {
        /// Description of the exception (`exd`, max 150 bytes). Example:
        /// `exd=DatabaseError`.
        exception_description, get_exception_description =>
            Parameter::ExceptionDescription
    }

    boolean_accessors! {
        /// Whether the exception was fatal (`exf`, defaults to true on the
        /// endpoint side when omitted).
        exception_fatal, get_exception_fatal => Parameter::ExceptionFatal
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn exception_round_trips() {
        let hit = ExceptionHit::new("DatabaseError").exception_fatal(false);
        assert_eq!(hit.get_exception_description(), Some("DatabaseError"));
        assert_eq!(hit.get_exception_fatal(), Some(false));
        let body = HitRequest::from(hit).to_post_body();
        assert!(body.starts_with("t=exception&"));
        assert!(body.contains("exd=DatabaseError"));
        assert!(body.contains("exf=0"));
    }
}
