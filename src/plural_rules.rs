//! CLDR plural-rule compilation.
//!
//! A rule such as `"i = 1 and v = 0 @integer 1 @decimal 0.0~1.5"` is split
//! into its condition and its samples. The condition is parsed by a small
//! recursive-descent parser into a [`Condition`] tree, which can be
//! evaluated against [`PluralOperands`] or rendered as the format template
//! shipped in `plurals.json`:
//!
//! ```text
//! n % 10 = 2..4 and n % 100 != 12..14
//! static::inRange(%1$s %% 10, true, array(2, 4)) and static::inRange(%1$s %% 100, false, array(12, 14))
//! ```
//!
//! Grammar:
//!
//! ```text
//! condition  := and_cond ("or" and_cond)*
//! and_cond   := relation ("and" relation)*
//! relation   := operand ["%" integer] ("=" | "==" | "!=") range_list
//! range_list := item ("," item)*
//! item       := integer [".." integer]
//! operand    := "n" | "i" | "v" | "w" | "f" | "t"
//! ```

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::{
    error::Error,
    plural_samples::{Sample, parse_sample_section},
};

/// Standard CLDR plural forms.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(PluralCategory::Zero),
            "one" => Ok(PluralCategory::One),
            "two" => Ok(PluralCategory::Two),
            "few" => Ok(PluralCategory::Few),
            "many" => Ok(PluralCategory::Many),
            "other" => Ok(PluralCategory::Other),
            _ => Err(Error::UnknownEnum {
                kind: "plural category",
                value: s.to_string(),
            }),
        }
    }
}

/// The numeric facts a plural condition can inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Absolute value of the number.
    N,
    /// Integer digits.
    I,
    /// Count of visible fraction digits, with trailing zeros.
    V,
    /// Count of visible fraction digits, without trailing zeros.
    W,
    /// Visible fraction digits, with trailing zeros.
    F,
    /// Visible fraction digits, without trailing zeros.
    T,
}

impl Operand {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "n" => Some(Operand::N),
            "i" => Some(Operand::I),
            "v" => Some(Operand::V),
            "w" => Some(Operand::W),
            "f" => Some(Operand::F),
            "t" => Some(Operand::T),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operand::N => 'n',
            Operand::I => 'i',
            Operand::V => 'v',
            Operand::W => 'w',
            Operand::F => 'f',
            Operand::T => 't',
        }
    }

    /// One-based position of this operand in the rendered template.
    pub fn position(&self) -> usize {
        match self {
            Operand::N => 1,
            Operand::I => 2,
            Operand::V => 3,
            Operand::W => 4,
            Operand::F => 5,
            Operand::T => 6,
        }
    }
}

/// The six operands of a decimal number, as defined by UTS #35.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluralOperands {
    pub n: f64,
    pub i: u64,
    pub v: u64,
    pub w: u64,
    pub f: u64,
    pub t: u64,
}

impl PluralOperands {
    pub fn get(&self, operand: Operand) -> f64 {
        match operand {
            Operand::N => self.n,
            Operand::I => self.i as f64,
            Operand::V => self.v as f64,
            Operand::W => self.w as f64,
            Operand::F => self.f as f64,
            Operand::T => self.t as f64,
        }
    }
}

impl From<u64> for PluralOperands {
    fn from(value: u64) -> Self {
        PluralOperands {
            n: value as f64,
            i: value,
            v: 0,
            w: 0,
            f: 0,
            t: 0,
        }
    }
}

/// Parses a decimal literal such as `"-1.50"`; visible trailing zeros are
/// significant (`v = 2`, `w = 1` for `"1.50"`).
impl FromStr for PluralOperands {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad_number = || Error::InvalidNumber(s.to_string());
        let unsigned = s.trim().trim_start_matches(['+', '-']);
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
            return Err(bad_number());
        }
        if unsigned.contains('.') && fraction.is_empty() {
            return Err(bad_number());
        }
        let trimmed = fraction.trim_end_matches('0');
        let digits = |part: &str| -> Result<u64, Error> {
            if part.is_empty() {
                Ok(0)
            } else {
                part.parse().map_err(|_| bad_number())
            }
        };
        Ok(PluralOperands {
            n: unsigned.parse().map_err(|_| bad_number())?,
            i: digits(integer)?,
            v: fraction.len() as u64,
            w: trimmed.len() as u64,
            f: digits(fraction)?,
            t: digits(trimmed)?,
        })
    }
}

/// One element of a range list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeItem {
    Value(u64),
    /// Inclusive range.
    Range(u64, u64),
}

impl RangeItem {
    fn contains(&self, value: f64) -> bool {
        match *self {
            RangeItem::Value(v) => value == v as f64,
            RangeItem::Range(start, end) => {
                value.fract() == 0.0 && value >= start as f64 && value <= end as f64
            }
        }
    }

    fn render(&self) -> String {
        match self {
            RangeItem::Value(v) => v.to_string(),
            RangeItem::Range(start, end) => format!("array({}, {})", start, end),
        }
    }
}

/// `operand [% modulus] (=|!=) ranges`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub operand: Operand,
    pub modulus: Option<u64>,
    pub negated: bool,
    pub ranges: Vec<RangeItem>,
}

impl Relation {
    pub fn matches(&self, operands: &PluralOperands) -> bool {
        let mut value = operands.get(self.operand);
        if let Some(modulus) = self.modulus {
            value %= modulus as f64;
        }
        self.ranges.iter().any(|item| item.contains(value)) != self.negated
    }

    fn render(&self) -> String {
        let mut out = format!("static::inRange(%{}$s", self.operand.position());
        if let Some(modulus) = self.modulus {
            out.push_str(&format!(" %% {}", modulus));
        }
        out.push_str(if self.negated { ", false" } else { ", true" });
        for item in &self.ranges {
            out.push_str(", ");
            out.push_str(&item.render());
        }
        out.push(')');
        out
    }
}

/// A compiled plural condition. `and` binds tighter than `or`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Or(Vec<Condition>),
    And(Vec<Condition>),
    Relation(Relation),
}

impl Condition {
    /// Evaluates the condition against the operands of a number.
    pub fn matches(&self, operands: &PluralOperands) -> bool {
        match self {
            Condition::Or(terms) => terms.iter().any(|c| c.matches(operands)),
            Condition::And(terms) => terms.iter().all(|c| c.matches(operands)),
            Condition::Relation(relation) => relation.matches(operands),
        }
    }

    /// Renders the format template consumed at runtime: operands become
    /// `%1$s`..`%6$s` and the modulo sign is escaped as `%%`.
    pub fn to_template(&self) -> String {
        match self {
            Condition::Or(terms) => join_rendered(terms, " or "),
            Condition::And(terms) => join_rendered(terms, " and "),
            Condition::Relation(relation) => relation.render(),
        }
    }
}

fn join_rendered(terms: &[Condition], separator: &str) -> String {
    terms
        .iter()
        .map(Condition::to_template)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Parses a condition string (without samples).
pub fn parse_condition(source: &str) -> Result<Condition, RuleError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(RuleError::Syntax("empty condition".to_string()));
    }
    let mut parser = ConditionParser { tokens, pos: 0 };
    let condition = parser.condition()?;
    match parser.peek() {
        None => Ok(condition),
        Some(Token::Range) => Err(RuleError::DanglingRange),
        Some(token) => Err(RuleError::Syntax(format!("unexpected {}", token))),
    }
}

/// A rule of one plural category: its condition and its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralRule {
    pub category: PluralCategory,
    /// `None` for `other`, which matches whatever no other rule matches.
    pub condition: Option<Condition>,
    pub samples: Vec<Sample>,
}

impl PluralRule {
    /// Parses `"<condition> @integer ... @decimal ..."` for `category`.
    pub fn parse(category: PluralCategory, source: &str) -> Result<Self, RuleError> {
        let mut sections = source.split('@');
        let condition = sections.next().unwrap_or_default().trim();
        let mut samples = Vec::new();
        for section in sections {
            samples.extend(parse_sample_section(section)?);
        }
        let condition = match category {
            PluralCategory::Other if condition.is_empty() => None,
            PluralCategory::Other => return Err(RuleError::OtherNotEmpty),
            _ => Some(parse_condition(condition)?),
        };
        Ok(PluralRule {
            category,
            condition,
            samples,
        })
    }

    pub fn to_template(&self) -> Option<String> {
        self.condition.as_ref().map(Condition::to_template)
    }
}

/// The plural rules of one locale, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluralRuleSet {
    pub rules: Vec<PluralRule>,
}

impl PluralRuleSet {
    /// Returns the first category whose condition matches, `other` otherwise.
    pub fn select(&self, operands: &PluralOperands) -> PluralCategory {
        self.rules
            .iter()
            .find(|rule| {
                rule.condition
                    .as_ref()
                    .is_some_and(|condition| condition.matches(operands))
            })
            .map(|rule| rule.category)
            .unwrap_or(PluralCategory::Other)
    }
}

/// Failures while reading one rule, before file and key context is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    DanglingRange,
    Syntax(String),
    ExampleToken(String),
    OtherNotEmpty,
}

impl RuleError {
    /// Attaches the file, key and full rule text.
    pub fn into_error(self, file: &str, key: &str, rule: &str) -> Error {
        let (file, key, rule) = (file.to_string(), key.to_string(), rule.to_string());
        match self {
            RuleError::DanglingRange => Error::DanglingRange { file, key, rule },
            RuleError::Syntax(reason) => Error::InvalidPluralRule {
                file,
                key,
                rule,
                reason,
            },
            RuleError::ExampleToken(token) => Error::InvalidExampleToken { file, key, token },
            RuleError::OtherNotEmpty => Error::validation_error(format!(
                "'{}' in {} must not have a condition: {}",
                key, file, rule
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Operand(Operand),
    Number(u64),
    Modulo,
    Equal,
    NotEqual,
    Comma,
    Range,
    And,
    Or,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Operand(op) => write!(f, "operand '{}'", op.symbol()),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Modulo => write!(f, "'%'"),
            Token::Equal => write!(f, "'='"),
            Token::NotEqual => write!(f, "'!='"),
            Token::Comma => write!(f, "','"),
            Token::Range => write!(f, "'..'"),
            Token::And => write!(f, "'and'"),
            Token::Or => write!(f, "'or'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, RuleError> {
    let bytes = input.as_bytes();
    let mut i = 0;
    let mut out = Vec::new();

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if b.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let number = input[start..i]
                .parse()
                .map_err(|_| RuleError::Syntax(format!("number too large: {}", &input[start..i])))?;
            out.push(Token::Number(number));
            continue;
        }
        if b.is_ascii_alphabetic() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word = &input[start..i];
            let token = match word {
                "and" => Token::And,
                "or" => Token::Or,
                _ => Operand::from_symbol(word)
                    .map(Token::Operand)
                    .ok_or_else(|| RuleError::Syntax(format!("unknown word '{}'", word)))?,
            };
            out.push(token);
            continue;
        }
        let next = bytes.get(i + 1).copied();
        let (token, width) = match (b, next) {
            (b'%', _) => (Token::Modulo, 1),
            (b'=', Some(b'=')) => (Token::Equal, 2),
            (b'=', _) => (Token::Equal, 1),
            (b'!', Some(b'=')) => (Token::NotEqual, 2),
            (b',', _) => (Token::Comma, 1),
            (b'.', Some(b'.')) => (Token::Range, 2),
            _ => {
                let ch = input[i..].chars().next().unwrap_or('?');
                return Err(RuleError::Syntax(format!("unexpected character '{}'", ch)));
            }
        };
        out.push(token);
        i += width;
    }

    Ok(out)
}

struct ConditionParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ConditionParser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn condition(&mut self) -> Result<Condition, RuleError> {
        let mut terms = vec![self.and_condition()?];
        while self.eat(Token::Or) {
            terms.push(self.and_condition()?);
        }
        Ok(collapse(terms, Condition::Or))
    }

    fn and_condition(&mut self) -> Result<Condition, RuleError> {
        let mut terms = vec![Condition::Relation(self.relation()?)];
        while self.eat(Token::And) {
            terms.push(Condition::Relation(self.relation()?));
        }
        Ok(collapse(terms, Condition::And))
    }

    fn relation(&mut self) -> Result<Relation, RuleError> {
        let operand = match self.next() {
            Some(Token::Operand(operand)) => operand,
            other => return Err(expected("an operand", other)),
        };
        let modulus = if self.eat(Token::Modulo) {
            match self.next() {
                Some(Token::Number(0)) => {
                    return Err(RuleError::Syntax("modulo by zero".to_string()));
                }
                Some(Token::Number(m)) => Some(m),
                other => return Err(expected("a modulus", other)),
            }
        } else {
            None
        };
        let negated = match self.next() {
            Some(Token::Equal) => false,
            Some(Token::NotEqual) => true,
            other => return Err(expected("'=' or '!='", other)),
        };
        let mut ranges = vec![self.range_item()?];
        while self.eat(Token::Comma) {
            ranges.push(self.range_item()?);
        }
        Ok(Relation {
            operand,
            modulus,
            negated,
            ranges,
        })
    }

    fn range_item(&mut self) -> Result<RangeItem, RuleError> {
        let start = match self.next() {
            Some(Token::Number(n)) => n,
            Some(Token::Range) => return Err(RuleError::DanglingRange),
            other => return Err(expected("a number", other)),
        };
        if !self.eat(Token::Range) {
            return Ok(RangeItem::Value(start));
        }
        match self.next() {
            Some(Token::Number(end)) if end >= start => Ok(RangeItem::Range(start, end)),
            Some(Token::Number(end)) => Err(RuleError::Syntax(format!(
                "empty range {}..{}",
                start, end
            ))),
            _ => Err(RuleError::DanglingRange),
        }
    }
}

fn collapse(mut terms: Vec<Condition>, wrap: fn(Vec<Condition>) -> Condition) -> Condition {
    if terms.len() == 1 {
        terms.remove(0)
    } else {
        wrap(terms)
    }
}

fn expected(what: &str, found: Option<Token>) -> RuleError {
    match found {
        Some(token) => RuleError::Syntax(format!("expected {}, found {}", what, token)),
        None => RuleError::Syntax(format!("expected {}, found end of rule", what)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(s: &str) -> PluralOperands {
        s.parse().unwrap()
    }

    fn template(source: &str) -> String {
        parse_condition(source).unwrap().to_template()
    }

    #[test]
    fn test_single_value_relation() {
        assert_eq!(template("n = 1"), "static::inRange(%1$s, true, 1)");
        let condition = parse_condition("n = 1").unwrap();
        assert!(condition.matches(&ops("1")));
        assert!(condition.matches(&ops("1.0")));
        assert!(!condition.matches(&ops("2")));
        assert!(!condition.matches(&ops("1.5")));
    }

    #[test]
    fn test_conjunction() {
        let condition = parse_condition("i = 0 and v = 0").unwrap();
        assert!(matches!(condition, Condition::And(ref terms) if terms.len() == 2));
        assert_eq!(
            condition.to_template(),
            "static::inRange(%2$s, true, 0) and static::inRange(%3$s, true, 0)"
        );
    }

    #[test]
    fn test_modulo_and_ranges_render() {
        assert_eq!(
            template("n % 10 = 2..4 and n % 100 != 12..14"),
            "static::inRange(%1$s %% 10, true, array(2, 4)) and static::inRange(%1$s %% 100, false, array(12, 14))"
        );
        assert_eq!(
            template("n = 0,1 or i = 0,1..3"),
            "static::inRange(%1$s, true, 0, 1) or static::inRange(%2$s, true, 0, array(1, 3))"
        );
    }

    #[test]
    fn test_double_equals_is_accepted() {
        assert_eq!(template("n == 1"), template("n = 1"));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let condition = parse_condition("n = 1 or n = 2 and v = 1").unwrap();
        match condition {
            Condition::Or(ref terms) => {
                assert_eq!(terms.len(), 2);
                assert!(matches!(terms[1], Condition::And(_)));
            }
            ref other => panic!("unexpected {other:?}"),
        }
        assert!(condition.matches(&ops("1")));
        assert!(!condition.matches(&ops("2")));
    }

    #[test]
    fn test_russian_few() {
        let condition =
            parse_condition("v = 0 and i % 10 = 2..4 and i % 100 != 12..14").unwrap();
        for yes in ["2", "3", "4", "22", "104"] {
            assert!(condition.matches(&ops(yes)), "{yes}");
        }
        for no in ["1", "5", "12", "14", "2.0"] {
            assert!(!condition.matches(&ops(no)), "{no}");
        }
    }

    #[test]
    fn test_range_needs_whole_values() {
        let condition = parse_condition("n = 0..1").unwrap();
        assert!(condition.matches(&ops("0")));
        assert!(condition.matches(&ops("1.00")));
        assert!(!condition.matches(&ops("0.5")));
    }

    #[test]
    fn test_fraction_operands() {
        let condition = parse_condition("t = 0 and i % 10 = 1 or f = 5").unwrap();
        assert!(condition.matches(&ops("1")));
        assert!(condition.matches(&ops("0.5")));
        assert!(!condition.matches(&ops("2")));
    }

    #[test]
    fn test_dangling_ranges() {
        for source in ["n = 1..", "n = ..3", "n = 1..,2", "n = 1 .."] {
            assert_eq!(parse_condition(source), Err(RuleError::DanglingRange), "{source}");
        }
    }

    #[test]
    fn test_syntax_errors() {
        let sources = [
            "", "n", "n = ", "x = 1", "n % = 1", "n = 1 and", "n < 1", "n = 3..1", "n % 0 = 1",
        ];
        for source in sources {
            assert!(
                matches!(parse_condition(source), Err(RuleError::Syntax(_))),
                "accepted {source:?}"
            );
        }
    }

    #[test]
    fn test_operands_from_decimal_text() {
        let o = ops("1.50");
        assert_eq!((o.n, o.i, o.v, o.w, o.f, o.t), (1.5, 1, 2, 1, 50, 5));
        let o = ops("-12");
        assert_eq!((o.n, o.i, o.v, o.w, o.f, o.t), (12.0, 12, 0, 0, 0, 0));
        assert_eq!(PluralOperands::from(7), ops("7"));
        for bad in ["", "1.", ".5", "1e3", "abc"] {
            assert!(bad.parse::<PluralOperands>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_rule_with_samples() {
        let rule = PluralRule::parse(PluralCategory::One, "i = 1 and v = 0 @integer 1").unwrap();
        assert_eq!(
            rule.to_template().as_deref(),
            Some("static::inRange(%2$s, true, 1) and static::inRange(%3$s, true, 0)")
        );
        assert_eq!(rule.samples.len(), 1);
        assert_eq!(rule.samples[0].text, "1");
        assert_eq!(rule.samples[0].integer, Some(1));
    }

    #[test]
    fn test_other_must_be_empty() {
        let rule = PluralRule::parse(PluralCategory::Other, " @integer 0, 2~16, …").unwrap();
        assert!(rule.condition.is_none());
        assert_eq!(
            PluralRule::parse(PluralCategory::Other, "n = 1"),
            Err(RuleError::OtherNotEmpty)
        );
    }

    #[test]
    fn test_integer_and_decimal_samples_are_both_kept() {
        let rule = PluralRule::parse(PluralCategory::One, "i = 0,1 @integer 0, 1 @decimal 0.0~1.5")
            .unwrap();
        let texts: Vec<_> = rule.samples.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, ["0", "1", "0.0", "1.5"]);
    }

    #[test]
    fn test_rule_set_selects_first_match() {
        let rules = PluralRuleSet {
            rules: vec![
                PluralRule::parse(PluralCategory::One, "n = 1").unwrap(),
                PluralRule::parse(PluralCategory::Few, "n = 0..3").unwrap(),
                PluralRule::parse(PluralCategory::Other, "").unwrap(),
            ],
        };
        assert_eq!(rules.select(&ops("1")), PluralCategory::One);
        assert_eq!(rules.select(&ops("2")), PluralCategory::Few);
        assert_eq!(rules.select(&ops("7")), PluralCategory::Other);
    }

    #[test]
    fn test_category_names() {
        assert_eq!("few".parse::<PluralCategory>().unwrap(), PluralCategory::Few);
        assert!(matches!(
            "several".parse::<PluralCategory>(),
            Err(Error::UnknownEnum { .. })
        ));
        assert_eq!(PluralCategory::Many.to_string(), "many");
    }

    #[test]
    fn test_rule_error_context() {
        let err =
            RuleError::DanglingRange.into_error("plurals.json", "pluralRule-count-one", "n = 1..");
        assert!(matches!(err, Error::DanglingRange { .. }));
        assert!(err.to_string().contains("pluralRule-count-one"));
    }
}
