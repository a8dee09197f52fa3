//! Submittability rules for option drafts.
//!
//! Every check is independent so a form can flag only the offending inputs.

use chrono::NaiveDate;
use serde::Serialize;

use crate::option::{Field, MAX_QUANTITY, NftOption};

/// Per-field invalid flags. `true` means the field violates its rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    pub collection: bool,
    pub nft_option_url: bool,
    pub nft_image_url: bool,
    pub strike_price: bool,
    pub amount: bool,
    pub expiration_date: bool,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        *self == FieldErrors::default()
    }

    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Collection => self.collection,
            Field::NftOptionUrl => self.nft_option_url,
            Field::NftImageUrl => self.nft_image_url,
            Field::StrikePrice => self.strike_price,
            Field::Amount => self.amount,
            Field::ExpirationDate => self.expiration_date,
        }
    }

    /// Fields currently flagged, in form order.
    pub fn fields(&self) -> Vec<Field> {
        [
            Field::Collection,
            Field::NftOptionUrl,
            Field::NftImageUrl,
            Field::StrikePrice,
            Field::Amount,
            Field::ExpirationDate,
        ]
        .into_iter()
        .filter(|f| self.get(*f))
        .collect()
    }
}

fn quantity_in_range(value: i64) -> bool {
    (0..=MAX_QUANTITY).contains(&value)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Evaluate every field rule against `today` (the earliest allowed expiration).
pub fn validate(draft: &NftOption, today: NaiveDate) -> FieldErrors {
    FieldErrors {
        collection: draft.collection.is_none(),
        nft_option_url: blank(&draft.nft_option_url),
        nft_image_url: blank(&draft.nft_image_url),
        strike_price: !quantity_in_range(draft.strike_price),
        amount: !quantity_in_range(draft.amount),
        expiration_date: draft.expiration_date.is_none_or(|d| d < today),
    }
}

/// `true` iff the draft may be sent to the option service.
pub fn is_valid(draft: &NftOption, today: NaiveDate) -> bool {
    validate(draft, today).is_empty()
}
