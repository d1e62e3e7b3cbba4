//! Entry validation: hard schema rules and soft consistency checks.
//!
//! Hard rules reject a candidate outright and are all reported together.
//! Soft checks compare the code sample against the declared parameters and
//! package; they never block a candidate unless the validator is strict.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConsistencyWarning, Field, Rule, SchemaViolation, ValidationError};
use crate::types::{ExampleEntry, Parameter, normalize_identifier};

/// Constructor call whose first argument is an object literal,
/// e.g. `new PutObjectCommand({`. The match ends just past the `{`.
static CONSTRUCTOR_WITH_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bnew\s+([A-Za-z_$][\w$]*)\s*\(\s*\{").expect("constructor pattern is valid")
});

/// A candidate that passed the hard rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// The normalized entry, ready to store.
    pub entry: ExampleEntry,
    pub warnings: Vec<ConsistencyWarning>,
}

/// Validation policy.
///
/// The default validator reports consistency problems as warnings. A strict
/// validator turns each of them into a [`Rule::PromotedWarning`] violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    strict: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Check a candidate and return its normalized form plus any warnings.
    ///
    /// Never mutates anything; the candidate is cloned for normalization.
    pub fn validate(&self, candidate: &ExampleEntry) -> Result<Validated, ValidationError> {
        let entry = normalize(candidate);
        let mut violations = hard_violations(&entry);
        let warnings = check_consistency(&entry);

        if self.strict {
            violations.extend(warnings.iter().map(|w| {
                SchemaViolation::new(w.field(), Rule::PromotedWarning(w.clone()))
            }));
        }

        if violations.is_empty() {
            Ok(Validated { entry, warnings })
        } else {
            Err(ValidationError {
                key: entry.key(),
                violations,
            })
        }
    }
}

/// Validate with the default (non-strict) policy.
pub fn validate(candidate: &ExampleEntry) -> Result<Validated, ValidationError> {
    Validator::default().validate(candidate)
}

/// Run only the soft checks. Used on entries already in the catalog.
pub fn check_consistency(entry: &ExampleEntry) -> Vec<ConsistencyWarning> {
    let mut warnings = Vec::new();
    let declared: HashSet<&str> = entry.parameters.iter().map(|p| p.name.as_str()).collect();

    for name in passed_parameters(&entry.code) {
        if !declared.contains(name.as_str()) {
            warnings.push(ConsistencyWarning::UndeclaredParameter(name));
        }
    }

    for p in &entry.parameters {
        if !p.name.is_empty() && !contains_word(&entry.code, &p.name) {
            warnings.push(ConsistencyWarning::UnusedParameter(p.name.clone()));
        }
    }

    if !entry.package.is_empty() && !entry.code.contains(&entry.package) {
        warnings.push(ConsistencyWarning::PackageNotReferenced(entry.package.clone()));
    }

    warnings
}

fn normalize(candidate: &ExampleEntry) -> ExampleEntry {
    ExampleEntry {
        service: normalize_identifier(&candidate.service),
        method: normalize_identifier(&candidate.method),
        description: candidate.description.trim().to_string(),
        code: candidate.code.clone(),
        parameters: candidate
            .parameters
            .iter()
            .map(|p| Parameter::new(p.name.trim(), p.description.trim()))
            .collect(),
        package: candidate.package.trim().to_string(),
    }
}

fn hard_violations(entry: &ExampleEntry) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();

    let required = [
        (Field::Service, entry.service.as_str()),
        (Field::Method, entry.method.as_str()),
        (Field::Description, entry.description.as_str()),
        (Field::Code, entry.code.trim()),
        (Field::Package, entry.package.as_str()),
    ];
    for (field, value) in required {
        if value.is_empty() {
            violations.push(SchemaViolation::new(field, Rule::Empty));
        }
    }

    if !entry.code.trim().is_empty() && !delimiters_balanced(&entry.code) {
        violations.push(SchemaViolation::new(Field::Code, Rule::UnbalancedDelimiters));
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for p in &entry.parameters {
        if p.name.is_empty() {
            violations.push(SchemaViolation::new(Field::Parameters, Rule::EmptyParameterName));
        } else if !seen.insert(p.name.as_str()) && reported.insert(p.name.as_str()) {
            violations.push(SchemaViolation::new(
                Field::Parameters,
                Rule::DuplicateParameter(p.name.clone()),
            ));
        }
    }

    violations
}

// ── Code scanning ───────────────────────────────────────────────────────────
//
// Just enough lexing of JavaScript-like samples to skip string, template and
// regex literals and comments. Not a parser.

/// Words after which a `/` starts a regex literal rather than a division.
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return", "typeof", "case", "do", "else", "in", "of", "delete", "void", "throw",
    "instanceof", "yield", "await",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// One byte of plain code.
    Code(usize),
    /// A string or template literal, quotes included.
    Str(usize, usize),
    /// A comment or regex literal.
    Skipped(usize, usize),
    /// A string literal that never closes. Always the last token.
    Unterminated(usize),
}

impl Token {
    fn start(&self) -> usize {
        match *self {
            Token::Code(p) | Token::Unterminated(p) => p,
            Token::Str(s, _) | Token::Skipped(s, _) => s,
        }
    }
}

/// What came before the current position, for telling `/re/` from `a / b`.
#[derive(Clone, Copy)]
enum Last {
    Start,
    Literal,
    Code(usize),
}

struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
    last: Last,
}

impl<'a> Tokens<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            last: Last::Start,
        }
    }

    fn code(&mut self, pos: usize) -> Token {
        if !self.bytes[pos].is_ascii_whitespace() {
            self.last = Last::Code(pos);
        }
        Token::Code(pos)
    }

    /// A `/` here opens a regex literal: it follows an operator, an opening
    /// bracket, or a keyword, not an operand.
    fn regex_allowed(&self) -> bool {
        match self.last {
            Last::Start => true,
            Last::Literal => false,
            Last::Code(p) => {
                let b = self.bytes[p];
                if is_ident_continue(b) {
                    let word_start = self.bytes[..p]
                        .iter()
                        .rposition(|&c| !is_ident_continue(c))
                        .map_or(0, |i| i + 1);
                    let word = &self.bytes[word_start..=p];
                    REGEX_PREFIX_KEYWORDS.iter().any(|k| k.as_bytes() == word)
                } else {
                    !matches!(b, b')' | b']' | b'}')
                }
            }
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let bytes = self.bytes;
        let start = self.pos;
        let b = *bytes.get(start)?;

        let token = match b {
            b'"' | b'\'' | b'`' => match skip_string(bytes, start) {
                Some(end) => {
                    self.last = Last::Literal;
                    Token::Str(start, end)
                }
                None => Token::Unterminated(start),
            },
            b'/' if bytes.get(start + 1) == Some(&b'/') => {
                Token::Skipped(start, skip_line_comment(bytes, start))
            }
            b'/' if bytes.get(start + 1) == Some(&b'*') => {
                Token::Skipped(start, skip_block_comment(bytes, start))
            }
            b'/' if self.regex_allowed() => match skip_regex(bytes, start) {
                Some(end) => {
                    self.last = Last::Literal;
                    Token::Skipped(start, end)
                }
                None => self.code(start),
            },
            _ => self.code(start),
        };

        self.pos = match token {
            Token::Code(p) => p + 1,
            Token::Str(_, end) | Token::Skipped(_, end) => end,
            Token::Unterminated(_) => bytes.len(),
        };
        Some(token)
    }
}

/// Index of the token for the plain-code byte at `pos`, or `None` when `pos`
/// lies inside a literal or comment.
fn code_token(tokens: &[Token], pos: usize) -> Option<usize> {
    let t = tokens.binary_search_by_key(&pos, Token::start).ok()?;
    matches!(tokens[t], Token::Code(_)).then_some(t)
}

/// Top-level property keys of every object literal passed to a constructor,
/// in first-seen order without repeats.
///
/// `*Client` constructors take client configuration (region, credentials),
/// not operation input, and are skipped, as are calls inside comments and
/// literals.
fn passed_parameters(code: &str) -> Vec<String> {
    let bytes = code.as_bytes();
    let tokens: Vec<Token> = Tokens::new(bytes).collect();
    let mut keys: Vec<String> = Vec::new();

    for caps in CONSTRUCTOR_WITH_OBJECT.captures_iter(code) {
        if caps[1].ends_with("Client") {
            continue;
        }
        let Some(m) = caps.get(0) else { continue };
        if code_token(&tokens, m.start()).is_none() {
            continue;
        }
        let Some(open) = code_token(&tokens, m.end() - 1) else {
            continue;
        };
        for key in object_keys(bytes, &tokens[open + 1..]) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Keys of an object literal, given the tokens just past its `{`. Depth one
/// only. Shorthand properties (`{ Bucket, Key }`) count as keys.
fn object_keys(bytes: &[u8], tokens: &[Token]) -> Vec<String> {
    let mut keys = Vec::new();
    let mut depth = 1usize;
    let mut expect_key = true;
    let mut t = 0;

    while t < tokens.len() {
        let i = match tokens[t] {
            Token::Code(i) => i,
            Token::Str(start, end) => {
                if depth == 1 && expect_key && bytes.get(skip_ws(bytes, end)) == Some(&b':') {
                    keys.push(String::from_utf8_lossy(&bytes[start + 1..end - 1]).into_owned());
                }
                expect_key = false;
                t += 1;
                continue;
            }
            Token::Skipped(..) => {
                t += 1;
                continue;
            }
            Token::Unterminated(_) => break,
        };

        let b = bytes[i];
        match b {
            b'{' | b'[' | b'(' => {
                depth += 1;
                expect_key = false;
            }
            b'}' | b']' | b')' => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            b',' if depth == 1 => expect_key = true,
            _ if b.is_ascii_whitespace() => {}
            _ if depth == 1 && expect_key && is_ident_start(b) => {
                let end = skip_ident(bytes, i);
                if matches!(bytes.get(skip_ws(bytes, end)), Some(b':' | b',' | b'}')) {
                    keys.push(String::from_utf8_lossy(&bytes[i..end]).into_owned());
                }
                expect_key = false;
                while t < tokens.len() && tokens[t].start() < end {
                    t += 1;
                }
                continue;
            }
            _ => {
                if depth == 1 {
                    expect_key = false;
                }
            }
        }
        t += 1;
    }

    keys
}

/// Brackets, braces, and parentheses outside literals and comments pair up,
/// and every string literal is closed.
fn delimiters_balanced(code: &str) -> bool {
    let bytes = code.as_bytes();
    let mut stack = Vec::new();

    for token in Tokens::new(bytes) {
        let i = match token {
            Token::Code(i) => i,
            Token::Unterminated(_) => return false,
            Token::Str(..) | Token::Skipped(..) => continue,
        };
        let expected = match bytes[i] {
            open @ (b'{' | b'[' | b'(') => {
                stack.push(open);
                continue;
            }
            b'}' => b'{',
            b']' => b'[',
            b')' => b'(',
            _ => continue,
        };
        if stack.pop() != Some(expected) {
            return false;
        }
    }

    stack.is_empty()
}

/// Index just past the closing quote of the literal starting at `start`.
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i + 1),
            // Only template literals may span lines.
            b'\n' if quote != b'`' => return None,
            _ => i += 1,
        }
    }
    None
}

/// Index just past the flags of the regex literal starting at `start`, or
/// `None` if no closing `/` appears on the same line.
fn skip_regex(bytes: &[u8], start: usize) -> Option<usize> {
    let mut in_class = false;
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => return Some(skip_ident(bytes, i + 1)),
            _ => i += 1,
        }
    }
    None
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |p| start + 2 + p + 2)
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn skip_ident(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_ident_continue(bytes[i]) {
        i += 1;
    }
    i
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// `word` occurs in `haystack` with no identifier characters on either side.
fn contains_word(haystack: &str, word: &str) -> bool {
    let bytes = haystack.as_bytes();
    haystack.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before_ok = start == 0 || !is_ident_continue(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_ident_continue(bytes[end]);
        before_ok && after_ok
    })
}

#[cfg(test)]
#[path = "tests/validator_tests.rs"]
mod tests;
