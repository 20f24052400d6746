//! Paging and filter parameters for the practice listing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field a text filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Title,
    Username,
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "username" | "user" => Ok(Self::Username),
            other => Err(format!("unknown filter field: {other}")),
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Username => f.write_str("username"),
        }
    }
}

/// Text filter sent along with every page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedFilter {
    pub text: String,
    pub field: FilterField,
}

impl FeedFilter {
    /// Builds a filter, or `None` when the text is blank.
    ///
    /// A blank filter must not produce a `title=` or `username=` parameter.
    #[must_use]
    pub fn new(text: &str, field: FilterField) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
                field,
            })
        }
    }
}

/// Query string for `GET /practice`.
///
/// `page` is a zero-based page index, not an item offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl PageQuery {
    #[must_use]
    pub fn new(page: u32, size: u32, filter: Option<&FeedFilter>) -> Self {
        let mut query = Self {
            page,
            size,
            title: None,
            username: None,
        };

        if let Some(filter) = filter {
            match filter.field {
                FilterField::Title => query.title = Some(filter.text.clone()),
                FilterField::Username => query.username = Some(filter.text.clone()),
            }
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filter_is_none() {
        assert!(FeedFilter::new("   ", FilterField::Title).is_none());
    }

    #[test]
    fn filter_routes_to_matching_parameter() {
        let filter = FeedFilter::new("mira", FilterField::Username).unwrap();
        let query = PageQuery::new(2, 10, Some(&filter));

        assert_eq!(query.username.as_deref(), Some("mira"));
        assert!(query.title.is_none());

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"page": 2, "size": 10, "username": "mira"}));
    }

    #[test]
    fn unfiltered_query_omits_filter_keys() {
        let json = serde_json::to_value(PageQuery::new(0, 10, None)).unwrap();
        assert_eq!(json, serde_json::json!({"page": 0, "size": 10}));
    }

    #[test]
    fn parses_filter_field() {
        assert_eq!("Title".parse::<FilterField>(), Ok(FilterField::Title));
        assert_eq!("username".parse::<FilterField>(), Ok(FilterField::Username));
        assert!("views".parse::<FilterField>().is_err());
    }
}
