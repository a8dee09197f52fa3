use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

/// Upper bound shared by strike price and amount.
pub const MAX_QUANTITY: i64 = 99_999;

/// Date format used for expiration dates on the wire and in form input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Supported NFT collections. Free-text collections are not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "CryptoPunks")]
    CryptoPunks,
    #[serde(rename = "goblintown.wtf")]
    Goblintown,
    #[serde(rename = "troll-town.wtf")]
    TrollTown,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::CryptoPunks,
        Collection::Goblintown,
        Collection::TrollTown,
    ];

    /// Identifier stored on the option record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::CryptoPunks => "CryptoPunks",
            Collection::Goblintown => "goblintown.wtf",
            Collection::TrollTown => "troll-town.wtf",
        }
    }

    /// Human-readable name for selection lists.
    pub fn label(&self) -> &'static str {
        match self {
            Collection::CryptoPunks => "CryptoPunks",
            Collection::Goblintown => "goblintown",
            Collection::TrollTown => "troll-town.wtf",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unsupported collection: {s}"))
    }
}

/// An NFT option record. Drafts and persisted options share this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftOption {
    #[serde(default)]
    pub collection: Option<Collection>,
    #[serde(default)]
    pub nft_option_url: String,
    #[serde(default)]
    pub nft_image_url: String,
    #[serde(default)]
    pub strike_price: i64,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
}

impl NftOption {
    /// Empty draft: no collection, blank URLs, zero quantities, no expiration.
    pub fn draft() -> Self {
        Self::default()
    }

    /// Replace exactly one field, leaving the rest untouched.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Collection(c) => self.collection = c,
            FieldUpdate::NftOptionUrl(url) => self.nft_option_url = url,
            FieldUpdate::NftImageUrl(url) => self.nft_image_url = url,
            FieldUpdate::StrikePrice(v) => self.strike_price = v,
            FieldUpdate::Amount(v) => self.amount = v,
            FieldUpdate::ExpirationDate(d) => self.expiration_date = d,
        }
    }
}

/// Form field names, as used by keyed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Collection,
    NftOptionUrl,
    NftImageUrl,
    StrikePrice,
    Amount,
    ExpirationDate,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Collection => "collection",
            Field::NftOptionUrl => "nftOptionUrl",
            Field::NftImageUrl => "nftImageUrl",
            Field::StrikePrice => "strikePrice",
            Field::Amount => "amount",
            Field::ExpirationDate => "expirationDate",
        }
    }
}

impl std::str::FromStr for Field {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collection" => Ok(Field::Collection),
            "nftOptionUrl" => Ok(Field::NftOptionUrl),
            "nftImageUrl" => Ok(Field::NftImageUrl),
            "strikePrice" => Ok(Field::StrikePrice),
            "amount" => Ok(Field::Amount),
            "expirationDate" => Ok(Field::ExpirationDate),
            _ => Err(WorkflowError::UnknownField(s.to_string())),
        }
    }
}

/// A single-field edit of a draft.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Collection(Option<Collection>),
    NftOptionUrl(String),
    NftImageUrl(String),
    StrikePrice(i64),
    Amount(i64),
    /// `None` clears the date.
    ExpirationDate(Option<NaiveDate>),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Collection(_) => Field::Collection,
            FieldUpdate::NftOptionUrl(_) => Field::NftOptionUrl,
            FieldUpdate::NftImageUrl(_) => Field::NftImageUrl,
            FieldUpdate::StrikePrice(_) => Field::StrikePrice,
            FieldUpdate::Amount(_) => Field::Amount,
            FieldUpdate::ExpirationDate(_) => Field::ExpirationDate,
        }
    }

    /// Parse keyed form input (`name`, raw `value`) into a typed update.
    ///
    /// An empty collection or date clears the field. Numbers must be whole;
    /// range checks are left to validation so out-of-range input still lands
    /// in the draft and gets flagged.
    pub fn from_input(name: &str, value: &str) -> Result<Self, WorkflowError> {
        let field: Field = name.parse()?;
        let invalid = |reason: String| WorkflowError::InvalidFieldValue {
            field: field.as_str(),
            reason,
        };

        let update = match field {
            Field::Collection if value.is_empty() => FieldUpdate::Collection(None),
            Field::Collection => FieldUpdate::Collection(Some(value.parse().map_err(invalid)?)),
            Field::NftOptionUrl => FieldUpdate::NftOptionUrl(value.to_string()),
            Field::NftImageUrl => FieldUpdate::NftImageUrl(value.to_string()),
            Field::StrikePrice => FieldUpdate::StrikePrice(
                value
                    .trim()
                    .parse()
                    .map_err(|e| invalid(format!("{e}")))?,
            ),
            Field::Amount => FieldUpdate::Amount(
                value
                    .trim()
                    .parse()
                    .map_err(|e| invalid(format!("{e}")))?,
            ),
            Field::ExpirationDate => FieldUpdate::ExpirationDate(parse_date(value).map_err(invalid)?),
        };
        Ok(update)
    }
}

/// Parse an optional `YYYY-MM-DD` date; blank input means "cleared".
pub fn parse_date(value: &str) -> Result<Option<NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|e| format!("expected {DATE_FORMAT}: {e}"))
}
