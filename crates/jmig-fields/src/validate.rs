//! Type validators and the validator table.
//!
//! Each [`FieldType`] is checked by one [`FieldValidator`]. The table is a
//! closed, enumerable mapping built once and shared read-only; custom
//! predicates replace the standard ones through [`ValidatorTable::register`].

use std::collections::HashMap;
use std::sync::{LazyLock, OnceLock};

use jmig_model::{DELIMITER, FieldType, Schema, SchemaError};
use regex::Regex;

/// Predicate deciding whether a raw sub-value can fill a slot of one type.
pub trait FieldValidator: Send + Sync {
    /// The type this validator checks.
    fn field_type(&self) -> FieldType;

    /// Returns a human-readable description of the accepted values.
    fn description(&self) -> &'static str {
        "Field validator"
    }

    fn is_valid(&self, value: &str) -> bool;
}

/// A date/time in one of the recognized source formats.
///
/// Serial dates are not accepted here: inside a compound field a bare number
/// is far more likely to be a count or a comment fragment.
pub struct DatetimeValidator;

impl FieldValidator for DatetimeValidator {
    fn field_type(&self) -> FieldType {
        FieldType::Datetime
    }

    fn description(&self) -> &'static str {
        "date/time in a recognized source format"
    }

    fn is_valid(&self, value: &str) -> bool {
        value.trim() == value
            && !value.contains(DELIMITER)
            && jmig_temporal::recognize_pattern(value).is_ok()
    }
}

/// Usernames never contain whitespace or the delimiter. Empty is allowed;
/// exports write an empty author for anonymous entries.
pub struct UsernameValidator;

impl FieldValidator for UsernameValidator {
    fn field_type(&self) -> FieldType {
        FieldType::Username
    }

    fn description(&self) -> &'static str {
        "username without whitespace or `;`"
    }

    fn is_valid(&self, value: &str) -> bool {
        !value
            .chars()
            .any(|ch| ch.is_whitespace() || ch == DELIMITER)
    }
}

static FILENAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^;]*\.\w+$").expect("Invalid filename regex"));

static LOCATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(http|file)[^;]*\.\w+$").expect("Invalid location regex"));

pub struct FilenameValidator;

impl FieldValidator for FilenameValidator {
    fn field_type(&self) -> FieldType {
        FieldType::Filename
    }

    fn description(&self) -> &'static str {
        "file name with an extension"
    }

    fn is_valid(&self, value: &str) -> bool {
        FILENAME_REGEX.is_match(value)
    }
}

pub struct LocationValidator;

impl FieldValidator for LocationValidator {
    fn field_type(&self) -> FieldType {
        FieldType::Location
    }

    fn description(&self) -> &'static str {
        "http(s) or file URL ending in a file name"
    }

    fn is_valid(&self, value: &str) -> bool {
        LOCATION_REGEX.is_match(value)
    }
}

pub struct IntegerValidator;

impl FieldValidator for IntegerValidator {
    fn field_type(&self) -> FieldType {
        FieldType::Integer
    }

    fn description(&self) -> &'static str {
        "signed decimal integer"
    }

    fn is_valid(&self, value: &str) -> bool {
        value.parse::<i64>().is_ok()
    }
}

pub struct TextValidator;

impl FieldValidator for TextValidator {
    fn field_type(&self) -> FieldType {
        FieldType::Text
    }

    fn description(&self) -> &'static str {
        "free text"
    }

    fn is_valid(&self, _value: &str) -> bool {
        true
    }
}

/// Validator backed by a plain function, for one-off predicates.
pub struct PredicateValidator {
    field_type: FieldType,
    predicate: fn(&str) -> bool,
}

impl PredicateValidator {
    pub fn new(field_type: FieldType, predicate: fn(&str) -> bool) -> Self {
        Self {
            field_type,
            predicate,
        }
    }
}

impl FieldValidator for PredicateValidator {
    fn field_type(&self) -> FieldType {
        self.field_type
    }

    fn is_valid(&self, value: &str) -> bool {
        (self.predicate)(value)
    }
}

/// Validators indexed by field type.
#[derive(Default)]
pub struct ValidatorTable {
    validators: HashMap<FieldType, Box<dyn FieldValidator>>,
}

impl ValidatorTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table with a validator for every [`FieldType`].
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register(Box::new(DatetimeValidator));
        table.register(Box::new(UsernameValidator));
        table.register(Box::new(FilenameValidator));
        table.register(Box::new(LocationValidator));
        table.register(Box::new(IntegerValidator));
        table.register(Box::new(TextValidator));
        table
    }

    /// Registers a validator for its type, replacing any existing one.
    pub fn register(&mut self, validator: Box<dyn FieldValidator>) {
        self.validators.insert(validator.field_type(), validator);
    }

    pub fn get(&self, field_type: FieldType) -> Option<&dyn FieldValidator> {
        self.validators.get(&field_type).map(|v| v.as_ref())
    }

    /// False when no validator is registered for the type.
    pub fn is_valid(&self, field_type: FieldType, value: &str) -> bool {
        self.get(field_type)
            .is_some_and(|validator| validator.is_valid(value))
    }

    /// Checks that every type in `schema` has a validator.
    pub fn check(&self, schema: &Schema) -> Result<(), SchemaError> {
        match schema
            .types()
            .find(|field_type| !self.validators.contains_key(field_type))
        {
            Some(field_type) => Err(SchemaError::MissingValidator { field_type }),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn field_types(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.validators.keys().copied()
    }
}

impl std::fmt::Debug for ValidatorTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.field_types()).finish()
    }
}

static DEFAULT_TABLE: OnceLock<ValidatorTable> = OnceLock::new();

/// The standard validator table, built on first access.
pub fn default_table() -> &'static ValidatorTable {
    DEFAULT_TABLE.get_or_init(ValidatorTable::standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_validators() {
        let table = default_table();
        assert_eq!(table.len(), FieldType::ALL.len());

        assert!(table.is_valid(FieldType::Datetime, "2021-05-01"));
        assert!(table.is_valid(FieldType::Datetime, "24/06/2005_11:16"));
        assert!(!table.is_valid(FieldType::Datetime, " 2021-05-01"));
        assert!(!table.is_valid(FieldType::Datetime, "44287.5"));
        assert!(!table.is_valid(FieldType::Datetime, "2021-05-01;jdoe"));

        assert!(table.is_valid(FieldType::Username, "jdoe"));
        assert!(table.is_valid(FieldType::Username, ""));
        assert!(!table.is_valid(FieldType::Username, " bye"));
        assert!(!table.is_valid(FieldType::Username, "Had a great day"));
        assert!(!table.is_valid(FieldType::Username, "jdoe;draft"));

        assert!(table.is_valid(FieldType::Filename, "report.txt"));
        assert!(!table.is_valid(FieldType::Filename, "report"));
        assert!(!table.is_valid(FieldType::Filename, "draft;report.txt"));

        assert!(table.is_valid(FieldType::Location, "https://server/a/report.txt"));
        assert!(table.is_valid(FieldType::Location, "file:///tmp/report.txt"));
        assert!(!table.is_valid(FieldType::Location, "report.txt"));
        assert!(!table.is_valid(FieldType::Location, "http://x/a.txt;http://x/b.txt"));

        assert!(table.is_valid(FieldType::Integer, "-3600"));
        assert!(!table.is_valid(FieldType::Integer, "3600s"));

        assert!(table.is_valid(FieldType::Text, ""));
        assert!(table.is_valid(FieldType::Text, "hi; bye"));
    }

    #[test]
    fn register_replaces_validator() {
        let mut table = ValidatorTable::standard();
        table.register(Box::new(PredicateValidator::new(FieldType::Username, |v| {
            v.starts_with('@')
        })));
        assert!(table.is_valid(FieldType::Username, "@jdoe"));
        assert!(!table.is_valid(FieldType::Username, "jdoe"));
    }

    #[test]
    fn check_reports_missing_validator() {
        let mut table = ValidatorTable::empty();
        table.register(Box::new(DatetimeValidator));
        let schema = Schema::from_tags(&["datetime", "username"]).unwrap();
        assert_eq!(
            table.check(&schema),
            Err(SchemaError::MissingValidator {
                field_type: FieldType::Username
            })
        );
    }
}
