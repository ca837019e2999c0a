// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use uatrack_protocol_schema::{HitType, Parameter, required_parameters};

use crate::{AnalyticsError, AnalyticsErrorType, AnalyticsResult, HitRequest};

/// What to do about a hit that is missing required fields or carries negative
/// numbers where the protocol declares non-negative ones.
///
/// [`ValidationPolicy::Permissive`] is the default: the collection endpoint
/// itself tolerates malformed hits (it silently drops them), so by default the
/// client sends as-is and lets the server decide. [`ValidationPolicy::Strict`]
/// surfaces the problem to the caller before any network call is attempted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationPolicy {
    #[default]
    Permissive,
    Strict,
}

/// Check `request` against the per-hit-type rules. Under
/// [`ValidationPolicy::Permissive`] this always succeeds.
///
/// # Errors
///
/// Under strict mode: [`AnalyticsErrorType::RequiredParameterMissing`] when a
/// required parameter is absent, [`AnalyticsErrorType::NegativeParameterValue`]
/// when a numeric value is below zero.
pub fn validate(request: &HitRequest, policy: ValidationPolicy) -> AnalyticsResult<()> {
    if policy == ValidationPolicy::Permissive {
        return Ok(());
    }

    for parameter in required_parameters(request.hit_type()) {
        if !request.contains(*parameter) {
            return AnalyticsError::new_error_result(
                AnalyticsErrorType::RequiredParameterMissing,
                &format!(
                    "{} hit is missing required parameter {:?} ({})",
                    request.hit_type(),
                    parameter,
                    parameter.code()
                ),
            );
        }
    }

    // Page views need a location: either the full `dl` or a `dp` path. Not
    // expressible as a flat required slice.
    if request.hit_type() == HitType::PageView
        && !request.contains(Parameter::DocumentPath)
        && !request.contains(Parameter::DocumentLocationUrl)
    {
        return AnalyticsError::new_error_result(
            AnalyticsErrorType::RequiredParameterMissing,
            "pageview hit needs a document path (dp) or location (dl)",
        );
    }

    for (key, value) in request.entries() {
        if value.is_negative() {
            return AnalyticsError::new_error_result(
                AnalyticsErrorType::NegativeParameterValue,
                &format!("parameter {} must be non-negative, got {value}", key.code()),
            );
        }
    }

    Ok(())
}
