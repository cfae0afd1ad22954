//! Structured view of a generated class header.
//!
//! The header is split at the first `public:` access specifier of the named class.
//! User fields are kept as typed declarations and rendered between the two halves,
//! so extending the class is an edit on this structure rather than on raw text.

use crate::error::SkeletonError;
use std::collections::BTreeSet;
use std::fmt;

/// A member declaration with an in-class initializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub ty: String,
    pub name: String,
    pub init: String,
}

impl FieldDecl {
    pub fn new(ty: impl Into<String>, name: impl Into<String>, init: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            init: init.into(),
        }
    }
}

impl fmt::Display for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {};", self.ty, self.name, self.init)
    }
}

/// Parsed class header: everything through the public specifier, injected fields, the rest.
#[derive(Debug, Clone)]
pub struct HeaderSkeleton {
    class_name: String,
    head: Vec<String>,
    fields: Vec<FieldDecl>,
    tail: Vec<String>,
    members: BTreeSet<String>,
    trailing_newline: bool,
}

impl HeaderSkeleton {
    pub fn parse(text: &str, class_name: &str) -> Result<Self, SkeletonError> {
        let lines: Vec<&str> = text.lines().collect();

        let class_idx = lines
            .iter()
            .position(|line| declares_class(line, class_name))
            .ok_or_else(|| SkeletonError::MissingClass(class_name.to_string()))?;

        let public_idx = lines[class_idx..]
            .iter()
            .position(|line| is_public_specifier(line))
            .map(|offset| class_idx + offset)
            .ok_or_else(|| SkeletonError::MissingPublicSection(class_name.to_string()))?;

        let members = lines[class_idx + 1..]
            .iter()
            .filter_map(|line| member_name(line))
            .collect();

        Ok(Self {
            class_name: class_name.to_string(),
            head: lines[..=public_idx].iter().map(|l| l.to_string()).collect(),
            fields: Vec::new(),
            tail: lines[public_idx + 1..].iter().map(|l| l.to_string()).collect(),
            members,
            trailing_newline: text.ends_with('\n'),
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Whether the class declares a data member with this name.
    pub fn declares(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Add fields to the public section. Names already declared are rejected.
    pub fn inject_fields(&mut self, fields: &[FieldDecl]) -> Result<(), SkeletonError> {
        for field in fields {
            if self.members.contains(&field.name) {
                return Err(SkeletonError::DuplicateField(field.name.clone()));
            }
        }
        for field in fields {
            self.members.insert(field.name.clone());
            self.fields.push(field.clone());
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self.head.clone();
        if !self.fields.is_empty() {
            lines.push(String::new());
            lines.push("   // User settings (set by main.cc)".to_string());
            for field in &self.fields {
                lines.push(format!("   {}", field));
            }
            lines.push(String::new());
        }
        lines.extend(self.tail.iter().cloned());

        let mut text = lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}

fn declares_class(line: &str, class_name: &str) -> bool {
    let trimmed = line.trim_start();
    let Some(rest) = trimmed.strip_prefix("class") else {
        return false;
    };
    let Some(rest) = rest.trim_start().strip_prefix(class_name) else {
        return false;
    };
    // "class Foo;" is a forward declaration
    match rest.trim_start().chars().next() {
        None | Some('{') => true,
        Some(':') => !rest.trim_start().starts_with("::"),
        _ => false,
    }
}

fn is_public_specifier(line: &str) -> bool {
    let code = strip_comment(line).trim();
    match code.strip_prefix("public") {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.starts_with(':') && !rest.starts_with("::")
        }
        None => false,
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Name of the data member declared on this line, if it is a plain declaration.
fn member_name(line: &str) -> Option<String> {
    let code = strip_comment(line).trim();
    let code = code.strip_suffix(';')?;
    if code.contains('(') || code.starts_with('#') {
        return None;
    }
    let declarator = code.split('=').next()?.trim();
    let mut tokens = declarator.split_whitespace();
    let _ty = tokens.next()?;
    let last = tokens.last()?;
    let name = last.trim_start_matches(['*', '&']);
    let name = name.split('[').next()?;
    if is_identifier(name) {
        Some(name.to_string())
    } else {
        None
    }
}

/// C++ identifier check used for class names and detected members.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
