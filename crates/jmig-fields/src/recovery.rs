//! Recovery rules for compound fields that are one value short.
//!
//! A rule recognizes a structural signature in the split pieces and returns
//! the completed piece list, or `None` when the signature does not match.
//! The disambiguator still validates whatever a rule returns.

use std::fmt;

use jmig_model::{FieldType, Schema};

use crate::validate::ValidatorTable;

/// Stand-in for a username the export left out.
pub const UNKNOWN_USERNAME: &str = "Unknown";

pub type RecoveryFn = fn(&[&str], &Schema, &ValidatorTable) -> Option<Vec<String>>;

#[derive(Clone, Copy)]
pub struct RecoveryRule {
    pub name: &'static str,
    pub apply: RecoveryFn,
}

impl RecoveryRule {
    pub const fn new(name: &'static str, apply: RecoveryFn) -> Self {
        Self { name, apply }
    }
}

impl fmt::Debug for RecoveryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryRule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// An attachment record whose author was empty on entry.
pub const MISSING_USERNAME_ATTACHMENT: RecoveryRule =
    RecoveryRule::new("missing-username-attachment", missing_username_attachment);

/// A comment record whose author was empty on entry.
pub const MISSING_USERNAME_COMMENT: RecoveryRule =
    RecoveryRule::new("missing-username-comment", missing_username_comment);

/// Rules tried in order when a field has too few values.
pub fn standard_rules() -> Vec<RecoveryRule> {
    vec![MISSING_USERNAME_ATTACHMENT, MISSING_USERNAME_COMMENT]
}

fn missing_username_attachment(
    pieces: &[&str],
    schema: &Schema,
    validators: &ValidatorTable,
) -> Option<Vec<String>> {
    let username = schema.position_of(FieldType::Username)?;
    let filename = schema.position_of(FieldType::Filename)?;
    let location = schema.position_of(FieldType::Location)?;
    let candidate = insert_unknown_username(pieces, schema, username)?;

    // The piece that now follows the username must already read as the
    // attachment's file name or URL.
    let following = schema.field(username + 1)?;
    let follows_attachment = matches!(
        following.field_type,
        FieldType::Filename | FieldType::Location
    ) && validators.is_valid(following.field_type, &candidate[username + 1]);
    if !follows_attachment {
        return None;
    }

    let encoded = url_encode_filename(&candidate[filename]);
    candidate[location].contains(&encoded).then_some(candidate)
}

fn missing_username_comment(
    pieces: &[&str],
    schema: &Schema,
    validators: &ValidatorTable,
) -> Option<Vec<String>> {
    let datetime = schema.position_of(FieldType::Datetime)?;
    let username = schema.position_of(FieldType::Username)?;
    schema.position_of(FieldType::Text)?;
    let candidate = insert_unknown_username(pieces, schema, username)?;
    validators
        .is_valid(FieldType::Datetime, &candidate[datetime])
        .then_some(candidate)
}

fn insert_unknown_username(pieces: &[&str], schema: &Schema, username: usize) -> Option<Vec<String>> {
    if pieces.len() + 1 != schema.len() {
        return None;
    }
    let mut candidate: Vec<String> = pieces.iter().map(|piece| (*piece).to_string()).collect();
    candidate.insert(username, UNKNOWN_USERNAME.to_string());
    Some(candidate)
}

/// Attachment URLs carry the file name in encoded form.
fn url_encode_filename(filename: &str) -> String {
    filename
        .replace(' ', "+")
        .replace('@', "%40")
        .replace('=', "%3D")
}
