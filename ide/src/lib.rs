//! Abbreviation expansion for editor integrations.
//!
//! The user types an acronym (`sb` for `StringBuilder`, `sb.ap` for a member of `sb`)
//! instead of an identifier; the engine classifies the caret position, collects the
//! matching candidates, ranks them and splices the chosen one into the tree.
//!
//! Coordinates are UTF-8 byte offsets (`[start, end)`), matching `analyzer`.

mod abbreviation;
mod collect;
mod config;
mod context;
mod edit;
mod error;
mod fragment;
mod insert;
mod rank;
mod text_edit;

use analyzer::semantic::{Phase, SemanticModel};
use analyzer::syntax::TreePath;
use analyzer::{ParseOutput, TokenQuery, parse};
use context::Scan;

pub use abbreviation::{abbreviate, matches};
pub use analyzer::TextEdit;
pub use collect::TypeFilter;
pub use config::{ArgumentWeights, CollectorFlags, CollectorId, EngineConfig, FlagStore, OverloadRatio};
pub use context::{CompletionContext, Slot, classify};
pub use edit::{ApplyResult, Insertion, apply_edits};
pub use error::{EditError, EngineError};
pub use fragment::{Argument, Callee, FieldAccess, Fragment, Invocation, Literal, Receiver, TypeRef};
pub use text_edit::apply_text_edits_bytes_with_cursor;

/// One abbreviation typed at a caret.
///
/// The host has already removed the abbreviation from `source`; `parsed` is the parse of
/// that text.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub source: &'a str,
    pub parsed: &'a ParseOutput,
    pub caret: u32,
    pub abbreviation: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    None,
    Single(Fragment),
    /// Deduplicated and sorted by display text.
    Ambiguous(Vec<Fragment>),
}

impl Resolution {
    fn from_candidates(mut candidates: Vec<Fragment>) -> Resolution {
        match candidates.len() {
            0 => Resolution::None,
            1 => candidates.pop().map_or(Resolution::None, Resolution::Single),
            _ => {
                candidates.sort();
                Resolution::Ambiguous(candidates)
            }
        }
    }
}

/// The host's ambiguity UI.
pub trait CandidatePicker {
    /// Index of the chosen candidate, or `None` when the user dismisses the choice.
    fn pick(&mut self, request: &Request<'_>, candidates: &[Fragment]) -> Option<usize>;
}

/// A committed expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub fragment: Fragment,
    pub source: String,
    pub cursor: u32,
    pub insertion: Insertion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Inserted(Applied),
    NoCandidates,
    /// The picker was shown and nothing was chosen.
    Declined,
    NoInsertionPoint,
}

/// Collects and ranks the candidates for `request`.
pub fn resolve(
    request: &Request<'_>,
    model: &dyn SemanticModel,
    config: &EngineConfig,
) -> Result<Resolution, EngineError> {
    validate(request, model)?;
    let candidates = ResolveSession::new(request, model, config).run();
    Ok(Resolution::from_candidates(candidates))
}

/// Synthesizes `fragment` and computes its insertion. `Ok(None)` when the caret has no legal
/// insertion point.
pub fn insert(request: &Request<'_>, fragment: &Fragment) -> Result<Option<Insertion>, EngineError> {
    check_caret(request)?;
    insert::insert(request.source, request.parsed, request.caret, fragment)
}

/// Runs a whole cycle: resolve the model, collect, rank, let `picker` break ties, insert
/// and apply.
pub fn expand(
    source: &str,
    caret: u32,
    abbreviation: &str,
    model: &mut dyn SemanticModel,
    config: &EngineConfig,
    picker: &mut dyn CandidatePicker,
) -> Result<Outcome, EngineError> {
    model.resolve();
    let parsed = parse(source);
    let request = Request {
        source,
        parsed: &parsed,
        caret,
        abbreviation,
    };

    let fragment = match resolve(&request, model, config)? {
        Resolution::None => return Ok(Outcome::NoCandidates),
        Resolution::Single(fragment) => fragment,
        Resolution::Ambiguous(candidates) => {
            let chosen = picker
                .pick(&request, &candidates)
                .and_then(|index| candidates.into_iter().nth(index));
            match chosen {
                Some(fragment) => fragment,
                None => return Ok(Outcome::Declined),
            }
        }
    };

    let Some(insertion) = insert(&request, &fragment)? else {
        return Ok(Outcome::NoInsertionPoint);
    };
    let applied = apply_edits(source, insertion.edits.clone(), caret)?;
    tracing::debug!(fragment = %fragment.display(), cursor = insertion.cursor, "expanded");
    Ok(Outcome::Inserted(Applied {
        fragment,
        source: applied.source,
        cursor: insertion.cursor,
        insertion,
    }))
}

fn validate(request: &Request<'_>, model: &dyn SemanticModel) -> Result<(), EngineError> {
    if model.phase() != Phase::Resolved {
        return Err(EngineError::ModelNotResolved);
    }
    if request.abbreviation.is_empty() {
        return Err(EngineError::EmptyAbbreviation);
    }
    check_caret(request)
}

fn check_caret(request: &Request<'_>) -> Result<(), EngineError> {
    let caret = request.caret as usize;
    if caret > request.source.len() || !request.source.is_char_boundary(caret) {
        return Err(EngineError::CaretOutOfBounds {
            caret: request.caret,
            len: request.source.len(),
        });
    }
    Ok(())
}

struct ResolveSession<'a> {
    request: &'a Request<'a>,
    model: &'a dyn SemanticModel,
    config: &'a EngineConfig,
    tokens: TokenQuery<'a>,
}

impl<'a> ResolveSession<'a> {
    fn new(request: &'a Request<'a>, model: &'a dyn SemanticModel, config: &'a EngineConfig) -> Self {
        Self {
            request,
            model,
            config,
            tokens: TokenQuery::new(&request.parsed.tokens),
        }
    }

    fn run(self) -> Vec<Fragment> {
        let caret = self.request.caret;
        let path = TreePath::at(&self.request.parsed.unit, caret);
        let scan = Scan::new(self.tokens, caret);

        // 1) Classify the caret position.
        let site = context::locate(&path, &scan);

        // 2) Resolve the expected type of the fragment.
        let expected = context::expected_type(&site, &path, &scan, self.model);
        tracing::debug!(expected = ?expected, "expected type");

        // 3) Resolve the owner of a qualified abbreviation.
        let (qualified, member, owners) =
            match abbreviation::split_qualified(self.request.abbreviation) {
                Some((owner, member)) => {
                    (true, member, collect::resolve_owners(self.model, caret, owner))
                }
                None => (false, self.request.abbreviation, Vec::new()),
            };

        // 4) Run the slot's pipeline.
        let pipeline = site.slot.pipeline(qualified);
        let request = collect::Collect {
            model: self.model,
            caret,
            abbreviation: member,
            expected: expected.as_ref(),
            owners: &owners,
        };
        let candidates = collect::run(&pipeline, &request, &self.config.flags);

        // 5) Deduplicate and rank.
        let ranker = rank::Ranker {
            model: self.model,
            caret,
            expected: expected.as_ref(),
            config: self.config,
        };
        let ranked = ranker.rank(candidates);
        tracing::debug!(candidates = ranked.len(), "resolved");
        ranked
    }
}

#[cfg(test)]
mod tests;
