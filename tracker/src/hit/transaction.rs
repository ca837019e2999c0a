// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, currency_accessors,
                     hit_builder_common, integer_accessors, text_accessors};

/// Builder for `t=transaction` hits. The transaction id (`ti`) ties this hit
/// to its [`super::ItemHit`]s and must be the same on both.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(TransactionHit, HitType::Transaction);

impl TransactionHit {
    #[must_use]
    pub fn new(tx_id: impl AsRef<str>) -> TransactionHit {
        TransactionHit::default().tx_id(tx_id)
    }

    text_accessors! {
        /// Unique transaction identifier (`ti`, max 500 bytes). Required.
        /// Example: `ti=OD564`.
        tx_id, get_tx_id => Parameter::TransactionId
    }

    text_accessors! {
        /// Affiliation or store name (`ta`, max 500 bytes).
        tx_affiliation, get_tx_affiliation => Parameter::TransactionAffiliation
    }

    currency_accessors! {
        /// Total revenue including tax and shipping (`tr`).
        tx_revenue, get_tx_revenue => Parameter::TransactionRevenue
    }

    currency_accessors! {
        tx_shipping, get_tx_shipping => Parameter::TransactionShipping
    }

    currency_accessors! {
        tx_tax, get_tx_tax => Parameter::TransactionTax
    }

    text_accessors! {
        /// ISO 4217 currency code (`cu`, max 10 bytes). Example: `cu=EUR`.
        currency_code, get_currency_code => Parameter::CurrencyCode
    }
}
