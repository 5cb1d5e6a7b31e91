use log::trace;
use serde_json::Value;

use crate::element::{base_metadata, RegexElement};
use crate::error::{RegexError, RegexResult};
use crate::safe_char::SafeString;

/// Literal text, escaped in the general context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    text: SafeString,
}

impl Literal {
    /// Creates a literal.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyLiteral`] when `text` is empty.
    pub fn new(text: &str) -> RegexResult<Self> {
        if text.is_empty() {
            return Err(RegexError::EmptyLiteral);
        }
        trace!("literal {:?}", text);
        Ok(Self {
            text: SafeString::new(text),
        })
    }

    /// The unescaped text.
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// The classified characters.
    pub fn safe_text(&self) -> &SafeString {
        &self.text
    }
}

impl RegexElement for Literal {
    fn compile(&self) -> String {
        self.text.escaped()
    }

    fn type_tag(&self) -> &'static str {
        "literal"
    }

    fn can_be_quantified(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("the text {:?}", self.text.to_string())
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("value".into(), Value::from(self.text()));
        map.insert("length".into(), Value::from(self.text.len()));
        map.insert("hasSpecialCharacters".into(), Value::from(self.text.has_special()));
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        self.text.requires_unicode()
    }
}
