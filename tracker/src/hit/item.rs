// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use uatrack_protocol_schema::{HitType, Parameter};

use super::request::{HitRequest, boolean_accessors, currency_accessors,
                     hit_builder_common, integer_accessors, text_accessors};

/// Builder for `t=item` hits: one line item of a transaction, joined to its
/// [`super::TransactionHit`] by the shared `ti`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemHit {
    pub(crate) request: HitRequest,
}

hit_builder_common!(ItemHit, HitType::Item);

impl ItemHit {
    #[must_use]
    pub fn new(tx_id: impl AsRef<str>, name: impl AsRef<str>) -> ItemHit {
        ItemHit::default().tx_id(tx_id).item_name(name)
    }

    text_accessors! {
        /// Transaction this item belongs to (`ti`, max 500 bytes). Required.
        tx_id, get_tx_id => Parameter::TransactionId
    }

    text_accessors! {
        /// Item name (`in`, max 500 bytes). Required.
        item_name, get_item_name => Parameter::ItemName
    }

    currency_accessors! {
        /// Unit price (`ip`).
        item_price, get_item_price => Parameter::ItemPrice
    }

    integer_accessors! {
        /// Units purchased (`iq`).
        item_quantity, get_item_quantity => Parameter::ItemQuantity
    }

    text_accessors! {
        /// SKU (`ic`, max 500 bytes).
        item_code, get_item_code => Parameter::ItemCode
    }

    text_accessors! {
        /// Category (`iv`, max 500 bytes).
        item_category, get_item_category => Parameter::ItemCategory
    }

    text_accessors! {
        currency_code, get_currency_code => Parameter::CurrencyCode
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn item_round_trips_and_shares_the_tx_id_code() {
        let hit = ItemHit::new("OD564", "Shoe")
            .item_price(3.5)
            .item_quantity(4)
            .item_code("SKU47")
            .item_category("Blue");
        assert_eq!(hit.get_tx_id(), Some("OD564"));
        assert_eq!(hit.get_item_name(), Some("Shoe"));
        assert_eq!(hit.get_item_quantity(), Some(4));
        let body = HitRequest::from(hit).to_post_body();
        assert!(body.starts_with("t=item&"));
        assert!(body.contains("ti=OD564"));
        assert!(body.contains("in=Shoe"));
        assert!(body.contains("iq=4"));
    }
}
