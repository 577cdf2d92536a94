//! Residue identity extraction.
//!
//! Interaction reports describe residues in many shapes: XML attributes,
//! child elements, JSON objects with inconsistent key names, or plain label
//! strings. Everything funnels into [`ResidueRef`] through the same ordered
//! synonym tables, so both report flavours resolve identities identically.

pub mod label;

use core::fmt;
use label::{first_signed_integer, parse_residue_label, LabelParts};
use serde::Serialize;
use serde_json::{Map, Value};

/// Name rendered for residues without a residue name.
pub const UNKNOWN_NAME: &str = "UNK";
/// Number rendered for residues without a residue number.
pub const UNKNOWN_NUMBER: &str = "?";

/// Keys probed for the residue name, first match wins.
pub const NAME_KEYS: [&str; 5] = ["resname", "residue_name", "residue", "name", "resName"];
/// Keys probed for the residue number, first match wins.
pub const NUMBER_KEYS: [&str; 6] = [
    "resnr",
    "residue_number",
    "residue_id",
    "resSeq",
    "number",
    "seq",
];
/// Keys probed for the chain identifier, first match wins.
pub const CHAIN_KEYS: [&str; 3] = ["chain", "chain_id", "chainId"];
/// Free-text field holding a whole residue label, e.g. `GLU40A`.
pub const LABEL_KEY: &str = "label";

/// Key-value access to a structured record.
///
/// Implementations return `None` for missing keys and for values that carry
/// no information (empty strings, JSON `null`).
pub trait FieldLookup {
    /// The value stored under `key`, rendered as text.
    fn field(&self, key: &str) -> Option<String>;

    /// The value of the first key in `keys` that is present.
    fn first_field(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.field(key))
    }
}

impl FieldLookup for Map<String, Value> {
    fn field(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.to_owned()),
            other => Some(other.to_string()),
        }
    }
}

/// A residue number: the first integer found in the source text, or the
/// source text itself when it contains no integer.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Serialize)]
#[serde(untagged)]
pub enum ResidueNumber {
    /// Parsed sequence number
    Seq(i64),
    /// Unparseable number, kept verbatim
    Raw(String),
}

impl ResidueNumber {
    /// Normalize a raw number field.
    pub fn parse(raw: &str) -> Self {
        match first_signed_integer(raw) {
            Some(n) => ResidueNumber::Seq(n),
            None => ResidueNumber::Raw(raw.to_owned()),
        }
    }

    /// The sentinel used when a record carries no number at all.
    pub fn unknown() -> Self {
        ResidueNumber::Raw(UNKNOWN_NUMBER.to_owned())
    }
}

impl fmt::Display for ResidueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResidueNumber::Seq(n) => write!(f, "{n}"),
            ResidueNumber::Raw(s) => write!(f, "{s}"),
        }
    }
}

/// Canonical identity of a residue taking part in an interaction.
///
/// Serializes to `{"resname": ..., "resnr": ..., "chain": ...}`.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Serialize)]
pub struct ResidueRef {
    /// Residue name, `None` when the record only carried a number
    #[serde(rename = "resname")]
    pub name: Option<String>,
    /// Residue number
    #[serde(rename = "resnr")]
    pub number: ResidueNumber,
    /// Chain identifier, possibly empty
    pub chain: String,
}

impl ResidueRef {
    /// Display label, `GLU40_A` or `GLU40` when the chain is empty.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResidueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or(UNKNOWN_NAME);
        match self.chain.is_empty() {
            true => write!(f, "{name}{}", self.number),
            false => write!(f, "{name}{}_{}", self.number, self.chain),
        }
    }
}

/// The residue fields found so far while probing a record.
///
/// Probes only ever fill fields that are still missing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResidueFields {
    /// Residue name
    pub name: Option<String>,
    /// Residue number, not yet normalized
    pub number: Option<String>,
    /// Chain identifier
    pub chain: Option<String>,
}

impl ResidueFields {
    /// Probe the synonym tables of a structured record.
    pub fn probe<F: FieldLookup + ?Sized>(record: &F) -> Self {
        Self {
            name: record.first_field(&NAME_KEYS),
            number: record.first_field(&NUMBER_KEYS),
            chain: record.first_field(&CHAIN_KEYS),
        }
    }

    /// Whether the name or the number is still unknown.
    pub fn is_incomplete(&self) -> bool {
        self.name.is_none() || self.number.is_none()
    }

    /// Fill missing fields from another source.
    pub fn fill(&mut self, name: Option<String>, number: Option<String>, chain: Option<String>) {
        if self.name.is_none() {
            self.name = name;
        }
        if self.number.is_none() {
            self.number = number;
        }
        if self.chain.is_none() {
            self.chain = chain;
        }
    }

    /// Backfill from a free-text `label` field when the name is missing.
    ///
    /// A parsed label overrides the name and number; its chain is only used
    /// when it has one.
    pub fn backfill_from_label<F: FieldLookup + ?Sized>(&mut self, record: &F) {
        if self.name.is_some() {
            return;
        }
        let Some(text) = record.field(LABEL_KEY) else {
            return;
        };
        if let Some(parts) = parse_residue_label(&text) {
            self.name = Some(parts.name.to_owned());
            if let Some(number) = parts.number {
                self.number = Some(number.to_owned());
            }
            if let Some(chain) = parts.chain {
                self.chain = Some(chain.to_string());
            }
        }
    }

    /// Build the residue, or `None` when neither a name nor a number was found.
    pub fn into_residue(self) -> Option<ResidueRef> {
        if self.name.is_none() && self.number.is_none() {
            return None;
        }
        Some(ResidueRef {
            name: self.name,
            number: self
                .number
                .as_deref()
                .map_or_else(ResidueNumber::unknown, ResidueNumber::parse),
            chain: self.chain.unwrap_or_default(),
        })
    }
}

impl From<LabelParts<'_>> for ResidueFields {
    fn from(parts: LabelParts<'_>) -> Self {
        Self {
            name: Some(parts.name.to_owned()),
            number: parts.number.map(str::to_owned),
            chain: parts.chain.map(|c| c.to_string()),
        }
    }
}

/// Whatever could be learned about a residue from one report item.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub enum ResidueIdentity {
    /// Name and/or number were recovered
    Resolved(ResidueRef),
    /// Free text that does not follow the label grammar, kept as its own label
    Unparsed(String),
    /// A structured record without any residue fields
    Unknown,
}

impl ResidueIdentity {
    /// The row label used when counting interactions.
    pub fn label(&self) -> String {
        match self {
            ResidueIdentity::Resolved(residue) => residue.label(),
            ResidueIdentity::Unparsed(text) => text.to_owned(),
            ResidueIdentity::Unknown => format!("{UNKNOWN_NAME}{UNKNOWN_NUMBER}"),
        }
    }
}

impl From<ResidueRef> for ResidueIdentity {
    fn from(residue: ResidueRef) -> Self {
        ResidueIdentity::Resolved(residue)
    }
}

/// Extract a residue from a structured record.
///
/// Returns `None` when the record has neither a residue name nor a number.
pub fn residue_from_record<F: FieldLookup + ?Sized>(record: &F) -> Option<ResidueRef> {
    let mut fields = ResidueFields::probe(record);
    fields.backfill_from_label(record);
    fields.into_residue()
}

/// Identify a residue from a plain label string.
pub fn identify_text(text: &str) -> ResidueIdentity {
    match parse_residue_label(text).and_then(|parts| ResidueFields::from(parts).into_residue()) {
        Some(residue) => ResidueIdentity::Resolved(residue),
        None => ResidueIdentity::Unparsed(text.to_owned()),
    }
}

/// Identify the residue behind one item of a JSON interaction list.
///
/// Objects go through the synonym tables, strings through the label parser and
/// any other value is parsed from its JSON rendering.
pub fn identify_value(value: &Value) -> ResidueIdentity {
    match value {
        Value::Object(record) => residue_from_record(record)
            .map(ResidueIdentity::Resolved)
            .unwrap_or(ResidueIdentity::Unknown),
        Value::String(text) => identify_text(text),
        other => identify_text(&other.to_string()),
    }
}
