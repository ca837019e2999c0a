// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

//! For more information on this error-handling shape, see:
//! <https://developerlife.com/2024/06/10/rust-miette-error-handling/>

use std::{error::Error,
          fmt::{Debug, Display, Formatter, Result}};

/// Type alias to make it easy to work with:
/// 1. [`core::result::Result`]
/// 2. [`miette::Result`] and [`miette::Report`], which are [`std::error::Error`]
///    wrappers.
///
/// - It is basically `miette::Result<T, miette::Report>`.
/// - Works hand in hand w/ [`AnalyticsError`] and any other type of error.
pub type AnalyticsResult<T> = miette::Result<T>;

/// Common error struct for everything that can go wrong while building or
/// sending a hit.
#[derive(Debug, Clone)]
pub struct AnalyticsError {
    pub error_type: AnalyticsErrorType,
    pub error_message: Option<String>,
}

#[non_exhaustive]
#[derive(Default, Debug, Clone, Copy)]
pub enum AnalyticsErrorType {
    #[default]
    General,
    InvalidTrackingId,
    InvalidEndpointUrl,
    RequiredParameterMissing,
    NegativeParameterValue,
    TransportFailed,
    TrackerClosed,
}

impl Error for AnalyticsError {}

/// Implement [`Display`] trait (needed by [`Error`] trait). This is the same as
/// the [`Debug`] implementation (which is derived above).
impl Display for AnalyticsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result { Debug::fmt(self, f) }
}

impl AnalyticsError {
    /// Both [`AnalyticsError::error_type`] and [`AnalyticsError::error_message`]
    /// available.
    #[allow(clippy::all)]
    pub fn new_error_result<T>(
        err_type: AnalyticsErrorType,
        msg: &str,
    ) -> AnalyticsResult<T> {
        Err(miette::miette!(AnalyticsError {
            error_type: err_type,
            error_message: Some(msg.to_string()),
        }))
    }

    /// Only [`AnalyticsError::error_type`] available, and no
    /// [`AnalyticsError::error_message`].
    pub fn new_error_result_with_only_type<T>(
        err_type: AnalyticsErrorType,
    ) -> AnalyticsResult<T> {
        Err(miette::miette!(AnalyticsError {
            error_type: err_type,
            error_message: None,
        }))
    }
}
