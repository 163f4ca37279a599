//! Message catalog lookup with interpolation, plural forms and rich content.
//!
//! Messages are tera templates with `{{ name }}` placeholders. Plural forms live
//! under `<key>/<count>` with `<key>/other` as the general case.

use std::collections::HashMap;

use anyhow::{Context as _, Result, bail};
use tera::{Context, Tera};

use crate::Package;

const GERMAN: &str = include_str!("../messages/de.json");

/// Separates slots from text in a rendered rich message.
const SLOT_MARK: char = '\u{1}';

/// Keys the widgets look up regardless of campaign data.
pub const STATIC_KEYS: &[&str] = &[
    "package/amount/label",
    "package/continue",
    "query/loading",
    "status/goal/people",
    "status/goal/money",
    "status/time/days/other",
    "status/time/hours/other",
    "status/time/minutes/other",
    "status/time/ended",
    "status/time/label",
];

/// Piece of a rich message: literal text or a slot the view fills with an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Slot(String),
}

#[derive(Debug, Clone, Default)]
pub struct Translator {
    messages: HashMap<String, String>,
    templates: Tera,
}

impl Translator {
    /// Compiles every message as a template named after its key.
    pub fn new(messages: HashMap<String, String>) -> Result<Self> {
        let mut templates = Tera::default();
        templates
            .add_raw_templates(messages.iter())
            .context("Failed to compile message catalog")?;
        Ok(Self {
            messages,
            templates,
        })
    }

    /// Loads a flat `{ "key": "template" }` JSON catalog.
    pub fn from_json(json: &str) -> Result<Self> {
        let messages: HashMap<String, String> =
            serde_json::from_str(json).context("Failed to parse message catalog")?;
        Self::new(messages)
    }

    /// The bundled German catalog.
    pub fn german() -> Result<Self> {
        Self::from_json(GERMAN)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    fn render(&self, key: &str, context: &Context) -> Result<String> {
        if !self.contains(key) {
            bail!("Missing translation for {}", key);
        }
        self.templates
            .render(key, context)
            .with_context(|| format!("Failed to render {}", key))
    }

    /// Looks up `key` and fills in `values`, failing when the key is missing or
    /// a placeholder has no value.
    pub fn try_t(&self, key: &str, values: &[(&str, &str)]) -> Result<String> {
        self.render(key, &context(values))
    }

    /// Looks up `key`, falling back to the key itself when it cannot be rendered.
    pub fn t(&self, key: &str, values: &[(&str, &str)]) -> String {
        self.try_t(key, values).unwrap_or_else(|e| {
            tracing::warn!("{:#}", e);
            key.to_string()
        })
    }

    /// Looks up `key`, falling back to `fallback` without a warning.
    pub fn t_or(&self, key: &str, fallback: &str) -> String {
        self.try_t(key, &[])
            .unwrap_or_else(|_| fallback.to_string())
    }

    /// Picks the plural form for `count` and renders it with `count` set.
    pub fn pluralize(&self, key: &str, count: i64) -> String {
        let exact = format!("{}/{}", key, count);
        let key = if self.contains(&exact) {
            exact
        } else {
            format!("{}/other", key)
        };

        let mut context = Context::new();
        context.insert("count", &count);
        self.render(&key, &context).unwrap_or_else(|e| {
            tracing::warn!("{:#}", e);
            key
        })
    }

    /// Renders the message with `values` as text and each name in `slots` as a
    /// [`Segment::Slot`] for the view to fill with an element.
    pub fn elements(&self, key: &str, values: &[(&str, &str)], slots: &[&str]) -> Vec<Segment> {
        let mut context = context(values);
        for slot in slots {
            context.insert(*slot, &format!("{}{}{}", SLOT_MARK, slot, SLOT_MARK));
        }

        let rendered = match self.render(key, &context) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!("{:#}", e);
                return vec![Segment::Text(key.to_string())];
            }
        };

        // Marks come in pairs, so every odd piece is a slot name.
        rendered
            .split(SLOT_MARK)
            .enumerate()
            .filter(|(_, piece)| !piece.is_empty())
            .map(|(i, piece)| {
                if i % 2 == 1 {
                    Segment::Slot(piece.to_string())
                } else {
                    Segment::Text(piece.to_string())
                }
            })
            .collect()
    }

    /// Keys from [`STATIC_KEYS`] and the package titles/descriptions that are
    /// absent from the catalog.
    pub fn missing_keys(&self, packages: &[Package]) -> Vec<String> {
        STATIC_KEYS
            .iter()
            .map(|key| key.to_string())
            .chain(packages.iter().flat_map(|package| {
                [
                    format!("package/{}/title", package.name),
                    format!("package/{}/description", package.name),
                ]
            }))
            .filter(|key| !self.contains(key))
            .collect()
    }
}

fn context(values: &[(&str, &str)]) -> Context {
    let mut context = Context::new();
    for (name, value) in values {
        context.insert(*name, value);
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        Translator::new(HashMap::from([
            ("greeting".to_string(), "Hallo {{ name }}!".to_string()),
            ("status/goal/people".to_string(), "von {{ count }} Mitgliedern".to_string()),
            ("days/1".to_string(), "{{ count }} Tag".to_string()),
            ("days/other".to_string(), "{{ count }} Tage".to_string()),
        ]))
        .unwrap()
    }

    #[test]
    fn test_interpolation() {
        let t = translator();
        assert_eq!(t.t("greeting", &[("name", "Republik")]), "Hallo Republik!");
        assert!(t.try_t("greeting", &[]).is_err());
        assert_eq!(t.t("greeting", &[]), "greeting");
    }

    #[test]
    fn test_values_are_not_escaped() {
        let t = translator();
        assert_eq!(t.t("greeting", &[("name", "<Rot & Blau>")]), "Hallo <Rot & Blau>!");
    }

    #[test]
    fn test_missing_key_falls_back() {
        let t = translator();
        assert_eq!(t.t("package/UNKNOWN/title", &[]), "package/UNKNOWN/title");
        assert!(t.try_t("package/UNKNOWN/title", &[]).is_err());
        assert_eq!(t.t_or("option/GOODIE/label", "GOODIE"), "GOODIE");
    }

    #[test]
    fn test_broken_template_fails_to_load() {
        let messages = HashMap::from([("broken".to_string(), "{{ count".to_string())]);
        assert!(Translator::new(messages).is_err());
    }

    #[test]
    fn test_pluralize() {
        let t = translator();
        assert_eq!(t.pluralize("days", 1), "1 Tag");
        assert_eq!(t.pluralize("days", 0), "0 Tage");
        assert_eq!(t.pluralize("days", 12), "12 Tage");
        assert_eq!(t.pluralize("weeks", 2), "weeks/other");
    }

    #[test]
    fn test_elements() {
        let t = translator();
        assert_eq!(
            t.elements("status/goal/people", &[], &["count"]),
            vec![
                Segment::Text("von ".to_string()),
                Segment::Slot("count".to_string()),
                Segment::Text(" Mitgliedern".to_string()),
            ]
        );
        assert_eq!(
            t.elements("status/goal/people", &[("count", "3’000")], &[]),
            vec![Segment::Text("von 3’000 Mitgliedern".to_string())]
        );
        assert_eq!(
            t.elements("missing", &[], &["count"]),
            vec![Segment::Text("missing".to_string())]
        );
    }

    #[test]
    fn test_german_catalog() {
        let t = Translator::german().unwrap();
        assert_eq!(t.t("package/POSTER/title", &[]), "Das Manifest");
        assert_eq!(t.pluralize("status/time/hours", 1), "1 Stunde");
        assert_eq!(t.pluralize("status/time/minutes", 30), "30 Minuten");
        assert_eq!(
            t.t("status/goal/money", &[("formattedCHF", "CHF 750’000")]),
            "von CHF 750’000 finanziert"
        );
        assert!(t.missing_keys(&[]).is_empty());
    }

    #[test]
    fn test_missing_keys_for_packages() {
        let t = Translator::german().unwrap();
        let packages = vec![Package {
            id: "p1".to_string(),
            name: "MYSTERY".to_string(),
            options: Vec::new(),
        }];

        assert_eq!(
            t.missing_keys(&packages),
            vec!["package/MYSTERY/title", "package/MYSTERY/description"]
        );
    }
}
