//! The declarative half of the tokenizer: scope vocabulary, word lists and
//! rule tables, plus the interned scopes a lexer hands out.

mod scopes;
pub mod rules;
pub mod words;

pub use self::rules::Rule;
pub use self::scopes::{Control, ScopeKind, Section};

use crate::errors::*;
use log::debug;
use syntect::parsing::Scope;

/// Interned scopes for one section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionScopes {
    pub meta: Scope,
    pub name: Scope,
    pub begin: Scope,
    pub end: Scope,
}

/// Every scope the grammar assigns, interned once up front so that the
/// lexer itself never has to parse a label.
#[derive(Clone, Debug)]
pub struct Grammar {
    scopes: Vec<Scope>,
    sections: Vec<SectionScopes>,
}

impl Grammar {
    pub fn new() -> Result<Grammar> {
        let scopes = ScopeKind::ALL
            .iter()
            .map(|kind| Scope::new(kind.name()))
            .collect::<::std::result::Result<Vec<_>, _>>()?;

        let mut sections = Vec::with_capacity(Section::ALL.len());
        for section in Section::ALL.iter() {
            let slug = section.slug();
            sections.push(SectionScopes {
                meta: Scope::new(&format!("meta.section.{}.stan", slug))?,
                name: Scope::new(&format!("entity.name.section.{}.stan", slug))?,
                begin: Scope::new(&format!("punctuation.definition.{}.begin.bracket.curly.stan", slug))?,
                end: Scope::new(&format!("punctuation.definition.{}.end.bracket.curly.stan", slug))?,
            });
        }
        debug!("interned {} scopes for {} sections", scopes.len(), sections.len());

        Ok(Grammar { scopes, sections })
    }

    pub fn scope(&self, kind: ScopeKind) -> Scope {
        self.scopes[kind as usize]
    }

    pub fn section(&self, section: Section) -> &SectionScopes {
        // Section::ALL is declared in discriminant order.
        &self.sections[section as usize]
    }
}
