//! Folding token streams into directive maps.
//!
//! Keys and values are resolved through a [`VariableExpander`] and trimmed
//! before insertion. Line numbers in the errors and warnings produced here
//! are logical indices: the 1-based position of the offending token in the
//! stream.

use indexmap::IndexMap;

use crate::error::{IniError, IniResult};
use crate::expand::VariableExpander;
use crate::tokenize::{Directive, Token};
use crate::warning::IniWarning;

/// Resolved `key -> value` pairs in file order.
pub type FlatDirectives = IndexMap<String, String>;

/// Section name to directives, in file order. `""` holds the directives
/// that precede the first header.
pub type SectionedDirectives = IndexMap<String, FlatDirectives>;

/// Folds tokens into directive maps, collecting expansion warnings.
#[derive(Debug)]
pub struct Aggregator<'a> {
    expander: &'a VariableExpander,
    warnings: Vec<IniWarning>,
}

impl<'a> Aggregator<'a> {
    pub fn new(expander: &'a VariableExpander) -> Self {
        Self {
            expander,
            warnings: Vec::new(),
        }
    }

    /// Warnings raised so far.
    pub fn warnings(&self) -> &[IniWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<IniWarning> {
        self.warnings
    }

    /// Fold a header-less token stream into one map.
    ///
    /// Header tokens carry no directive and are skipped.
    pub fn to_flat(&mut self, tokens: &[Token]) -> IniResult<FlatDirectives> {
        let mut directives = FlatDirectives::new();
        for (i, token) in tokens.iter().enumerate() {
            if let Token::Directive(directive) = token {
                self.insert(&mut directives, directive, None, i + 1)?;
            }
        }
        Ok(directives)
    }

    /// Fold a token stream with headers into per-section maps.
    ///
    /// The implicit `""` section is only kept when it holds a directive;
    /// named sections are kept even when empty.
    pub fn to_sectioned(&mut self, tokens: &[Token]) -> IniResult<SectionedDirectives> {
        let mut sections = SectionedDirectives::new();
        let mut current = Section::implicit();

        for (i, token) in tokens.iter().enumerate() {
            let logical = i + 1;
            match token {
                Token::SectionHeader(name) => {
                    let finished = std::mem::replace(&mut current, Section::named(name, logical));
                    finished.flush_into(&mut sections)?;
                }
                Token::Directive(directive) => {
                    let section = Some(current.name.clone());
                    self.insert(&mut current.directives, directive, section, logical)?;
                }
            }
        }
        current.flush_into(&mut sections)?;

        Ok(sections)
    }

    fn insert(
        &mut self,
        directives: &mut FlatDirectives,
        directive: &Directive,
        section: Option<String>,
        logical: usize,
    ) -> IniResult<()> {
        let key = self.resolve(directive, &directive.key, logical);
        let value = self.resolve(directive, &directive.value, logical);
        if directives.contains_key(&key) {
            return Err(IniError::DuplicateKey {
                key,
                value,
                section,
                line: logical,
            });
        }
        directives.insert(key, value);
        Ok(())
    }

    fn resolve(&mut self, directive: &Directive, raw: &str, logical: usize) -> String {
        let expansion = self.expander.expand(raw);
        if let Some(reason) = expansion.warning {
            self.warnings.push(IniWarning::MalformedMacro {
                key: directive.key.clone(),
                value: directive.value.clone(),
                reason,
                line: logical,
            });
        }
        expansion.text.trim().to_string()
    }
}

/// Section being filled while walking the token stream.
struct Section {
    name: String,
    /// Logical index of the header; `None` for the implicit section.
    header: Option<usize>,
    directives: FlatDirectives,
}

impl Section {
    fn implicit() -> Self {
        Section {
            name: String::new(),
            header: None,
            directives: FlatDirectives::new(),
        }
    }

    fn named(name: &str, logical: usize) -> Self {
        Section {
            name: name.to_string(),
            header: Some(logical),
            directives: FlatDirectives::new(),
        }
    }

    fn flush_into(self, sections: &mut SectionedDirectives) -> IniResult<()> {
        let Some(header) = self.header else {
            if !self.directives.is_empty() {
                sections.insert(self.name, self.directives);
            }
            return Ok(());
        };
        if sections.contains_key(&self.name) {
            return Err(IniError::DuplicateSection {
                name: self.name,
                line: header,
            });
        }
        sections.insert(self.name, self.directives);
        Ok(())
    }
}

/// True if any section defines `key`.
pub fn contains_key_recursive(sections: &SectionedDirectives, key: &str) -> bool {
    sections.values().any(|directives| directives.contains_key(key))
}
