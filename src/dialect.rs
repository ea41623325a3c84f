// ABOUTME: SQLite-to-MySQL column type translation
// ABOUTME: Classifies the leading type token and rewrites it in MySQL's dialect

use thiserror::Error;

/// A column type declaration with no recognizable leading type name.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid type declaration '{declared}'")]
pub struct InvalidTypeDeclaration {
    pub declared: String,
}

/// Translated types eligible for AUTO_INCREMENT on a primary-key column.
///
/// Membership is an exact match: parameterized or qualified spellings such
/// as `BIGINT(20)` or `BIGINT UNSIGNED` are not integer-class.
pub fn is_integer_class(mysql_type: &str) -> bool {
    matches!(mysql_type, "INT" | "BIGINT")
}

/// Stateless mapping from SQLite type declarations to MySQL column types.
///
/// The two type-family defaults customize what the classifier emits for
/// SQLite's small-integer aliases and its variable-length character types;
/// everything else is fixed by the translation table.
///
/// # Examples
///
/// ```
/// # use sqlite3_to_mysql::dialect::TypeTranslator;
/// let translator = TypeTranslator::default();
/// assert_eq!(translator.translate("TEXT").unwrap(), "TEXT");
/// assert_eq!(translator.translate("NVARCHAR(50)").unwrap(), "VARCHAR(50)");
/// assert_eq!(translator.translate("INT1").unwrap(), "INT");
/// assert!(translator.translate("").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TypeTranslator {
    integer_base: String,
    string_base: String,
    string_suffix: String,
}

impl Default for TypeTranslator {
    fn default() -> Self {
        Self::new("INT(11)", "VARCHAR(255)")
    }
}

impl TypeTranslator {
    /// Build a translator from the configured type-family defaults.
    ///
    /// Only the leading token of `integer_type` is kept; the string default
    /// contributes both its leading token and its own length suffix, which
    /// becomes the fallback for character columns declared without one.
    pub fn new(integer_type: &str, string_type: &str) -> Self {
        let integer_base =
            leading_token(integer_type).unwrap_or_else(|| "INT".to_string());
        let string_base =
            leading_token(string_type).unwrap_or_else(|| "VARCHAR".to_string());
        let string_suffix =
            length_suffix(string_type.trim()).unwrap_or_default();
        Self {
            integer_base,
            string_base,
            string_suffix,
        }
    }

    /// Map one declared column type to its MySQL spelling.
    ///
    /// Unrecognized leading tokens pass the full upper-cased declaration
    /// through unchanged, length and precision suffixes included. The
    /// dedicated length-copy logic recognizes only a `(<digits>)` suffix
    /// anchored at the end of the declaration.
    pub fn translate(&self, declared: &str) -> Result<String, InvalidTypeDeclaration> {
        let declared = declared.trim();
        let token = leading_token(declared).ok_or_else(|| InvalidTypeDeclaration {
            declared: declared.to_string(),
        })?;
        let suffix = length_suffix(declared);

        let translated = match token.as_str() {
            "TEXT" | "CLOB" => "TEXT".to_string(),
            "CHARACTER" | "NCHAR" | "NATIVE CHARACTER" => {
                format!("CHAR{}", suffix.unwrap_or_default())
            }
            "VARYING CHARACTER" | "NVARCHAR" | "VARCHAR" => {
                if self.string_suffix.is_empty() {
                    // a bare string default such as TEXT carries no length
                    self.string_base.clone()
                } else {
                    format!(
                        "{}{}",
                        self.string_base,
                        suffix.unwrap_or_else(|| self.string_suffix.clone())
                    )
                }
            }
            "DOUBLE PRECISION" => "DOUBLE".to_string(),
            "UNSIGNED BIG INT" => {
                format!("BIGINT{} UNSIGNED", suffix.unwrap_or_default())
            }
            "INT1" | "INT2" => self.integer_base.clone(),
            _ => declared.to_uppercase(),
        };

        Ok(translated)
    }
}

/// The run of characters before the first `(`, upper-cased.
fn leading_token(declared: &str) -> Option<String> {
    let head = declared.split('(').next().unwrap_or("").trim();
    if head.is_empty() {
        None
    } else {
        Some(head.to_uppercase())
    }
}

/// A `(<digits>)` suffix anchored at the end of the declaration, if any.
///
/// Multi-part suffixes such as `(10,2)` never match; unclassified
/// declarations keep them through the pass-through branch instead.
fn length_suffix(declared: &str) -> Option<String> {
    if !declared.ends_with(')') {
        return None;
    }
    let open = declared.rfind('(')?;
    let digits = &declared[open + 1..declared.len() - 1];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(declared[open..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(declared: &str) -> String {
        TypeTranslator::default().translate(declared).unwrap()
    }

    #[test]
    fn text_family_collapses_to_text() {
        assert_eq!(translate("TEXT"), "TEXT");
        assert_eq!(translate("CLOB"), "TEXT");
        assert_eq!(translate("clob"), "TEXT");
    }

    #[test]
    fn fixed_width_character_keeps_explicit_length() {
        assert_eq!(translate("CHARACTER(20)"), "CHAR(20)");
        assert_eq!(translate("NCHAR(55)"), "CHAR(55)");
        assert_eq!(translate("NATIVE CHARACTER(70)"), "CHAR(70)");
        assert_eq!(translate("CHARACTER"), "CHAR");
    }

    #[test]
    fn varchar_family_defaults_to_255() {
        assert_eq!(translate("VARCHAR"), "VARCHAR(255)");
        assert_eq!(translate("VARCHAR(100)"), "VARCHAR(100)");
        assert_eq!(translate("NVARCHAR(50)"), "VARCHAR(50)");
        assert_eq!(translate("VARYING CHARACTER(30)"), "VARCHAR(30)");
    }

    #[test]
    fn double_precision_drops_its_suffix() {
        assert_eq!(translate("DOUBLE PRECISION"), "DOUBLE");
    }

    #[test]
    fn unsigned_big_int_moves_the_qualifier() {
        assert_eq!(translate("UNSIGNED BIG INT"), "BIGINT UNSIGNED");
        assert_eq!(translate("UNSIGNED BIG INT(20)"), "BIGINT(20) UNSIGNED");
    }

    #[test]
    fn small_integer_aliases_use_the_integer_default() {
        assert_eq!(translate("INT1"), "INT");
        assert_eq!(translate("INT2"), "INT");
        assert_eq!(translate("INT2(8)"), "INT");
    }

    #[test]
    fn unrecognized_tokens_pass_through_upper_cased() {
        assert_eq!(translate("INTEGER"), "INTEGER");
        assert_eq!(translate("int"), "INT");
        assert_eq!(translate("BIGINT"), "BIGINT");
        assert_eq!(translate("REAL"), "REAL");
        assert_eq!(translate("BLOB"), "BLOB");
        assert_eq!(translate("NUMERIC"), "NUMERIC");
        assert_eq!(translate("DECIMAL(10,2)"), "DECIMAL(10,2)");
        assert_eq!(translate("datetime"), "DATETIME");
    }

    #[test]
    fn classified_types_lose_non_numeric_suffixes() {
        // the length-copy logic only recognizes (<digits>) at the end
        assert_eq!(translate("NCHAR(10,2)"), "CHAR");
        assert_eq!(translate("VARCHAR(abc)"), "VARCHAR(255)");
    }

    #[test]
    fn malformed_declarations_are_rejected() {
        let translator = TypeTranslator::default();
        assert!(translator.translate("").is_err());
        assert!(translator.translate("   ").is_err());
        assert!(translator.translate("(10)").is_err());
        let err = translator.translate("").unwrap_err();
        assert_eq!(err.declared, "");
    }

    #[test]
    fn translation_is_deterministic() {
        let translator = TypeTranslator::default();
        for declared in ["TEXT", "VARCHAR(100)", "UNSIGNED BIG INT(20)", "DECIMAL(10,2)"] {
            assert_eq!(
                translator.translate(declared).unwrap(),
                translator.translate(declared).unwrap()
            );
        }
    }

    #[test]
    fn configured_defaults_reshape_the_families() {
        let translator = TypeTranslator::new("BIGINT(20)", "VARCHAR(300)");
        assert_eq!(translator.translate("INT1").unwrap(), "BIGINT");
        assert_eq!(translator.translate("VARCHAR").unwrap(), "VARCHAR(300)");
        assert_eq!(translator.translate("VARCHAR(40)").unwrap(), "VARCHAR(40)");
    }

    #[test]
    fn bare_text_string_default_never_takes_a_length() {
        let translator = TypeTranslator::new("INT(11)", "TEXT");
        assert_eq!(translator.translate("VARCHAR").unwrap(), "TEXT");
        assert_eq!(translator.translate("NVARCHAR(50)").unwrap(), "TEXT");
    }

    #[test]
    fn integer_class_is_an_exact_match() {
        assert!(is_integer_class("INT"));
        assert!(is_integer_class("BIGINT"));
        assert!(!is_integer_class("INTEGER"));
        assert!(!is_integer_class("BIGINT(20)"));
        assert!(!is_integer_class("BIGINT UNSIGNED"));
        assert!(!is_integer_class("INT(11)"));
    }
}
