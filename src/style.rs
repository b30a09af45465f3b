//! Typographic emphasis styles.
//!
//! This module provides the style half of an emphasis span:
//!
//! - [`TextAttributes`]: Bitflags for bold, italic, underline, strikethrough
//! - [`EmphasisStyle`]: Recognized typed fields plus an open passthrough map
//! - [`StylePolicy`]: Whether unrecognized attributes are carried or rejected
//!
//! # Examples
//!
//! ```
//! use spanweave::{EmphasisStyle, StylePolicy, TextAttributes};
//!
//! let style = EmphasisStyle::from_names(["bold", "underline"], StylePolicy::Strict).unwrap();
//! assert!(style.attributes.contains(TextAttributes::BOLD | TextAttributes::UNDERLINE));
//!
//! let props = style.presentation();
//! assert_eq!(props[0], ("fontWeight".to_string(), "bold".to_string()));
//! ```

use crate::color::Rgba;
use crate::error::{Error, Result};
use bitflags::bitflags;
use std::collections::BTreeMap;

bitflags! {
    /// Text emphasis attributes.
    ///
    /// Attributes are represented as bitflags and can be combined using
    /// bitwise OR.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold weight.
        const BOLD          = 0x01;
        /// Italic slant.
        const ITALIC        = 0x02;
        /// Underline decoration.
        const UNDERLINE     = 0x04;
        /// Line-through decoration.
        const STRIKETHROUGH = 0x08;
    }
}

impl TextAttributes {
    /// Resolve a single attribute name.
    ///
    /// Accepts the names hosts use for emphasis types, case-insensitively.
    #[must_use]
    pub fn from_emphasis_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bold" | "strong" => Some(Self::BOLD),
            "italic" | "em" => Some(Self::ITALIC),
            "underline" => Some(Self::UNDERLINE),
            "strikethrough" | "line-through" => Some(Self::STRIKETHROUGH),
            _ => None,
        }
    }
}

/// How style attributes outside the recognized set are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StylePolicy {
    /// Unrecognized attributes ride along in [`EmphasisStyle::extra`].
    #[default]
    Passthrough,
    /// Unrecognized attributes are rejected with
    /// [`Error::UnsupportedStyleAttribute`].
    Strict,
}

/// Style carried by an emphasis span.
///
/// The recognized fields are typed; anything else lives in `extra` as an
/// ordered key/value map so that two equal styles always compare and hash
/// equal, regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EmphasisStyle {
    /// Bold, italic, underline, strikethrough.
    pub attributes: TextAttributes,
    /// Foreground color override.
    pub color: Option<Rgba>,
    /// Unrecognized presentation properties, passed through verbatim.
    pub extra: BTreeMap<String, String>,
}

impl EmphasisStyle {
    /// Style with no attributes, color, or passthrough properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Style with only the given attributes.
    #[must_use]
    pub fn with_attributes(attributes: TextAttributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Create a bold style.
    #[must_use]
    pub fn bold() -> Self {
        Self::with_attributes(TextAttributes::BOLD)
    }

    /// Create an italic style.
    #[must_use]
    pub fn italic() -> Self {
        Self::with_attributes(TextAttributes::ITALIC)
    }

    /// Create an underline style.
    #[must_use]
    pub fn underline() -> Self {
        Self::with_attributes(TextAttributes::UNDERLINE)
    }

    /// Build a style from a list of attribute names such as `"bold"`.
    ///
    /// Under [`StylePolicy::Passthrough`] an unknown name is kept in `extra`
    /// with the value `"true"`.
    pub fn from_names<I, S>(names: I, policy: StylePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut style = Self::default();
        for name in names {
            let name = name.as_ref();
            match TextAttributes::from_emphasis_name(name) {
                Some(attr) => style.attributes |= attr,
                None if policy == StylePolicy::Strict => {
                    return Err(Error::UnsupportedStyleAttribute(name.to_string()));
                }
                None => {
                    style.extra.insert(name.to_string(), "true".to_string());
                }
            }
        }
        Ok(style)
    }

    /// Set a presentation property by name, replacing any earlier value for
    /// the same key.
    ///
    /// `fontWeight`, `fontStyle`, `textDecorationLine` and `color` map onto
    /// the typed fields. A recognized key with a value that cannot be
    /// represented (e.g. `fontWeight: "300"`) clears the typed field and is
    /// stored in `extra` unchanged, as is every other key.
    pub fn with_property(mut self, key: &str, value: &str) -> Result<Self> {
        let typed = match key {
            "fontWeight" => TextAttributes::BOLD,
            "fontStyle" => TextAttributes::ITALIC,
            "textDecorationLine" => TextAttributes::UNDERLINE | TextAttributes::STRIKETHROUGH,
            "color" => {
                self.color = Some(value.parse()?);
                self.extra.remove(key);
                return Ok(self);
            }
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
                return Ok(self);
            }
        };

        self.attributes.remove(typed);
        self.extra.remove(key);
        match (key, value) {
            ("fontWeight", "bold") => self.attributes |= TextAttributes::BOLD,
            ("fontStyle", "italic") => self.attributes |= TextAttributes::ITALIC,
            ("textDecorationLine", decoration) if is_decoration(decoration) => {
                for part in decoration.split_whitespace() {
                    if let Some(attr) = TextAttributes::from_emphasis_name(part) {
                        self.attributes |= attr;
                    }
                }
            }
            _ => {
                self.extra.insert(key.to_string(), value.to_string());
            }
        }
        Ok(self)
    }

    /// Check that every attribute is allowed under `policy`.
    pub fn validate(&self, policy: StylePolicy) -> Result<()> {
        match (policy, self.extra.keys().next()) {
            (StylePolicy::Strict, Some(key)) => Err(Error::UnsupportedStyleAttribute(key.clone())),
            _ => Ok(()),
        }
    }

    /// Check if this style has no effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.color.is_none() && self.extra.is_empty()
    }

    /// Presentation properties a renderer applies for this style.
    ///
    /// Typed fields come first in a fixed order, followed by the passthrough
    /// entries in key order. Underline and strikethrough share the
    /// `textDecorationLine` property. A passthrough entry never repeats a
    /// property a typed field already produced.
    #[must_use]
    pub fn presentation(&self) -> Vec<(String, String)> {
        let mut props = Vec::with_capacity(4 + self.extra.len());
        if self.attributes.contains(TextAttributes::BOLD) {
            props.push(("fontWeight".to_string(), "bold".to_string()));
        }
        if self.attributes.contains(TextAttributes::ITALIC) {
            props.push(("fontStyle".to_string(), "italic".to_string()));
        }
        let decoration = match (
            self.attributes.contains(TextAttributes::UNDERLINE),
            self.attributes.contains(TextAttributes::STRIKETHROUGH),
        ) {
            (true, true) => Some("underline line-through"),
            (true, false) => Some("underline"),
            (false, true) => Some("line-through"),
            (false, false) => None,
        };
        if let Some(decoration) = decoration {
            props.push(("textDecorationLine".to_string(), decoration.to_string()));
        }
        if let Some(color) = self.color {
            props.push(("color".to_string(), color.to_string()));
        }
        let typed = props.len();
        for (key, value) in &self.extra {
            if !props[..typed].iter().any(|(k, _)| k == key) {
                props.push((key.clone(), value.clone()));
            }
        }
        props
    }
}

fn is_decoration(value: &str) -> bool {
    !value.trim().is_empty()
        && value.split_whitespace().all(|part| {
            matches!(
                TextAttributes::from_emphasis_name(part),
                Some(TextAttributes::UNDERLINE | TextAttributes::STRIKETHROUGH)
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_emphasis_name() {
        assert_eq!(TextAttributes::from_emphasis_name("Strong"), Some(TextAttributes::BOLD));
        assert_eq!(
            TextAttributes::from_emphasis_name("line-through"),
            Some(TextAttributes::STRIKETHROUGH)
        );
        assert_eq!(TextAttributes::from_emphasis_name("blink"), None);
        // The flag-name lookup generated by bitflags is still available.
        assert_eq!(TextAttributes::from_name("ITALIC"), Some(TextAttributes::ITALIC));
    }

    #[test]
    fn test_from_names_strict() {
        let style = EmphasisStyle::from_names(["bold", "Italic"], StylePolicy::Strict).unwrap();
        assert_eq!(style.attributes, TextAttributes::BOLD | TextAttributes::ITALIC);
        assert!(style.extra.is_empty());

        let err = EmphasisStyle::from_names(["bold", "blink"], StylePolicy::Strict).unwrap_err();
        assert_eq!(err, Error::UnsupportedStyleAttribute("blink".to_string()));
    }

    #[test]
    fn test_from_names_passthrough() {
        let style =
            EmphasisStyle::from_names(["underline", "smallcaps"], StylePolicy::Passthrough)
                .unwrap();
        assert!(style.attributes.contains(TextAttributes::UNDERLINE));
        assert_eq!(style.extra.get("smallcaps").map(String::as_str), Some("true"));
        assert!(style.validate(StylePolicy::Passthrough).is_ok());
        assert!(style.validate(StylePolicy::Strict).is_err());
    }

    #[test]
    fn test_with_property() {
        let style = EmphasisStyle::new()
            .with_property("fontWeight", "bold")
            .and_then(|s| s.with_property("textDecorationLine", "underline line-through"))
            .and_then(|s| s.with_property("color", "red"))
            .unwrap();
        assert_eq!(
            style.attributes,
            TextAttributes::BOLD | TextAttributes::UNDERLINE | TextAttributes::STRIKETHROUGH
        );
        assert_eq!(style.color, Some(Rgba::RED));
        assert!(style.extra.is_empty());
    }

    #[test]
    fn test_with_property_replaces_typed_value() {
        let style = EmphasisStyle::bold().with_property("fontWeight", "300").unwrap();
        assert!(!style.attributes.contains(TextAttributes::BOLD));
        assert_eq!(style.extra.get("fontWeight").map(String::as_str), Some("300"));

        let style = style.with_property("fontWeight", "bold").unwrap();
        assert!(style.attributes.contains(TextAttributes::BOLD));
        assert!(style.extra.is_empty());
    }

    #[test]
    fn test_presentation_has_one_value_per_property() {
        let props = EmphasisStyle::bold()
            .with_property("fontWeight", "normal")
            .unwrap()
            .presentation();
        assert_eq!(props, vec![("fontWeight".to_string(), "normal".to_string())]);

        let props = EmphasisStyle::underline()
            .with_property("textDecorationLine", "none")
            .unwrap()
            .presentation();
        assert_eq!(props, vec![("textDecorationLine".to_string(), "none".to_string())]);

        let mut style = EmphasisStyle::italic();
        style.extra.insert("fontStyle".to_string(), "oblique".to_string());
        assert_eq!(style.presentation(), vec![("fontStyle".to_string(), "italic".to_string())]);
    }

    #[test]
    fn test_with_property_bad_color() {
        let err = EmphasisStyle::new().with_property("color", "ultraviolet");
        assert!(matches!(err, Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_presentation_italic_and_underline_are_independent() {
        let italic = EmphasisStyle::italic().presentation();
        assert_eq!(italic, vec![("fontStyle".to_string(), "italic".to_string())]);

        let both =
            EmphasisStyle::with_attributes(TextAttributes::ITALIC | TextAttributes::UNDERLINE)
                .presentation();
        assert_eq!(both.len(), 2);
        assert_eq!(both[1].1, "underline");
    }

    #[test]
    fn test_presentation_order() {
        let mut style = EmphasisStyle::bold();
        style.color = Some(Rgba::BLUE);
        style.extra.insert("letterSpacing".to_string(), "2".to_string());
        let keys: Vec<_> = style.presentation().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["fontWeight", "color", "letterSpacing"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(EmphasisStyle::new().is_empty());
        assert!(!EmphasisStyle::bold().is_empty());
    }
}
