//! Cardinal plural rules (`plurals.json`).
//!
//! Per locale, `pluralRule-count-<category>` entries are compiled into
//! format templates keyed by category; `other` is left out since it is
//! whatever no other category matches. The samples of every rule are
//! returned separately as fixture data.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{
    error::Error,
    plural_rules::{PluralCategory, PluralRule, PluralRuleSet},
    plural_samples::samples_to_json,
    tree::{self, Node},
};

lazy_static! {
    static ref RULE_KEY: Regex = Regex::new(r"^pluralRule-count-(.+)$").unwrap();
}

/// Rewrites `data` in place and returns the fixture data
/// (`locale → category → samples`).
pub fn transform(data: &mut Node, file: &str) -> Result<Node, Error> {
    let mut fixture = Node::new();
    for locale in tree::keys(data) {
        let Some(Value::Object(source)) = data.get(&locale) else {
            return Err(invalid(file, &locale));
        };
        let rule_set = parse_rule_set(source, file)?;

        let mut templates = Node::new();
        let mut samples = Node::new();
        for rule in &rule_set.rules {
            samples.insert(rule.category.to_string(), samples_to_json(&rule.samples));
            if let Some(template) = rule.to_template() {
                templates.insert(rule.category.to_string(), Value::String(template));
            }
        }
        data.insert(locale.clone(), Value::Object(templates));
        fixture.insert(locale, Value::Object(samples));
    }
    Ok(fixture)
}

/// Parses the rules of one locale, in source order.
pub fn parse_rule_set(source: &Node, file: &str) -> Result<PluralRuleSet, Error> {
    let mut rules = Vec::with_capacity(source.len());
    for (key, value) in source {
        let caps = RULE_KEY.captures(key).ok_or_else(|| invalid(file, key))?;
        let category: PluralCategory = caps[1].parse()?;
        let Value::String(text) = value else {
            return Err(invalid(file, key));
        };
        let rule = PluralRule::parse(category, text).map_err(|e| e.into_error(file, key, text))?;
        rules.push(rule);
    }
    Ok(PluralRuleSet { rules })
}

fn invalid(file: &str, node: &str) -> Error {
    Error::InvalidNode {
        file: file.to_string(),
        node: node.to_string(),
    }
}
