//! Public pane names
//!
//! A name is either text or a number. Comparison is strict, so the text
//! `"1"` and the number `1` are different names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaneName {
    Number(i64),
    Text(String),
}

impl PaneName {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PaneName::Text(text) => Some(text),
            PaneName::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            PaneName::Number(n) => Some(*n),
            PaneName::Text(_) => None,
        }
    }
}

impl std::fmt::Display for PaneName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaneName::Text(text) => write!(f, "{}", text),
            PaneName::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for PaneName {
    fn from(text: &str) -> Self {
        PaneName::Text(text.to_string())
    }
}

impl From<String> for PaneName {
    fn from(text: String) -> Self {
        PaneName::Text(text)
    }
}

impl From<i64> for PaneName {
    fn from(n: i64) -> Self {
        PaneName::Number(n)
    }
}

impl From<i32> for PaneName {
    fn from(n: i32) -> Self {
        PaneName::Number(n.into())
    }
}

impl From<u32> for PaneName {
    fn from(n: u32) -> Self {
        PaneName::Number(n.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_equality() {
        assert_ne!(PaneName::from("1"), PaneName::from(1));
        assert_eq!(PaneName::from("a"), PaneName::Text("a".to_string()));
        assert_eq!(PaneName::from("a").as_text(), Some("a"));
        assert_eq!(PaneName::from(1).as_text(), None);
    }

    #[test]
    fn test_untagged_json() {
        let text: PaneName = serde_json::from_str("\"first\"").unwrap();
        let number: PaneName = serde_json::from_str("7").unwrap();
        assert_eq!(text, PaneName::from("first"));
        assert_eq!(number.as_number(), Some(7));
        assert_eq!(serde_json::to_string(&number).unwrap(), "7");
    }
}
