//! Deduplication and overload ranking.
//!
//! Candidates keep their collection order. Overloads of one callable are collapsed into the
//! single best overload, which takes the position of the group's first member.

use crate::config::{ArgumentWeights, EngineConfig, OverloadRatio};
use crate::fragment::{Argument, Callee, Fragment, Invocation};
use analyzer::semantic::{Element, ParamInfo, PrimitiveKind, SemanticModel, Ty};
use std::cmp::Ordering;

/// Keeps the first candidate of every display text.
pub(crate) fn dedupe(candidates: Vec<Fragment>) -> Vec<Fragment> {
    let mut seen = Vec::<String>::new();
    candidates
        .into_iter()
        .filter(|f| {
            let display = f.display();
            if seen.contains(&display) {
                return false;
            }
            seen.push(display);
            true
        })
        .collect()
}

pub(crate) struct Ranker<'a> {
    pub(crate) model: &'a dyn SemanticModel,
    pub(crate) caret: u32,
    pub(crate) expected: Option<&'a Ty>,
    pub(crate) config: &'a EngineConfig,
}

enum Entry {
    Plain(Fragment),
    Group(usize),
}

type GroupKey = (Option<String>, String, bool);

impl Ranker<'_> {
    pub(crate) fn rank(&self, candidates: Vec<Fragment>) -> Vec<Fragment> {
        let mut entries = Vec::new();
        let mut groups: Vec<(GroupKey, Vec<Invocation>)> = Vec::new();

        for fragment in dedupe(candidates) {
            let Fragment::CallableInvocation(call) = fragment else {
                entries.push(Entry::Plain(fragment));
                continue;
            };
            if !self.returns_expected(&call) {
                tracing::trace!(method = %call.method.signature(), "return type rejected");
                continue;
            }
            let (receiver, name, constructor) = call.group_key();
            let key = (receiver.map(str::to_string), name.to_string(), constructor);
            match groups.iter_mut().position(|(k, _)| *k == key) {
                Some(index) => groups[index].1.push(call),
                None => {
                    entries.push(Entry::Group(groups.len()));
                    groups.push((key, vec![call]));
                }
            }
        }

        let scope = if groups.is_empty() {
            Vec::new()
        } else {
            self.model.elements_in_scope(self.caret, &|_| true)
        };
        let mut groups: Vec<Option<Invocation>> = groups
            .into_iter()
            .map(|(_, overloads)| self.best_overload(overloads, &scope))
            .collect();

        entries
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Plain(fragment) => Some(fragment),
                Entry::Group(index) => groups[index].take().map(Fragment::CallableInvocation),
            })
            .collect()
    }

    fn returns_expected(&self, call: &Invocation) -> bool {
        let Some(expected) = self.expected else {
            return true;
        };
        let produced = match &call.callee {
            Callee::Constructor { ty } => Ty::declared(ty.qualified.clone()),
            Callee::Method { .. } => call.method.ret.clone(),
        };
        produced != Ty::Void && self.model.is_assignable(&produced, expected)
    }

    /// Picks one overload after synthesizing the arguments of each.
    fn best_overload(&self, mut overloads: Vec<Invocation>, scope: &[Element]) -> Option<Invocation> {
        for call in &mut overloads {
            call.args = call
                .method
                .params
                .iter()
                .map(|param| self.argument(param, scope))
                .collect();
        }
        overloads.sort_by_key(|call| std::cmp::Reverse(call.arity()));

        let full = overloads
            .iter()
            .rposition(|call| call.resolved_args() == call.arity());
        let chosen = match full {
            Some(index) => index,
            None => {
                let mut best = 0;
                for index in 1..overloads.len() {
                    if self.compare_ratio(&overloads[index], &overloads[best]) == Ordering::Greater {
                        best = index;
                    }
                }
                best
            }
        };
        let winner = overloads.into_iter().nth(chosen)?;
        tracing::debug!(
            method = %winner.method.signature(),
            resolved = winner.resolved_args(),
            arity = winner.arity(),
            "overload chosen"
        );
        Some(winner)
    }

    fn compare_ratio(&self, a: &Invocation, b: &Invocation) -> Ordering {
        let (ra, aa) = (a.resolved_args(), a.arity().max(1));
        let (rb, ab) = (b.resolved_args(), b.arity().max(1));
        match self.config.ratio {
            OverloadRatio::Exact => (ra * ab).cmp(&(rb * aa)),
            OverloadRatio::Truncated => (ra / aa).cmp(&(rb / ab)),
        }
    }

    /// The closest in-scope symbol assignable to `param`, or a default literal.
    fn argument(&self, param: &ParamInfo, scope: &[Element]) -> Argument {
        scope
            .iter()
            .filter(|e| self.model.is_assignable(&e.ty, &param.ty))
            .min_by_key(|e| argument_score(e, param, &self.config.weights))
            .map(|e| Argument::Symbol(e.name.clone()))
            .unwrap_or_else(|| Argument::Default(default_literal(&param.ty)))
    }
}

fn argument_score(element: &Element, param: &ParamInfo, weights: &ArgumentWeights) -> usize {
    let distance = levenshtein(&element.name, &param.name);
    if element.ty.same_erasure(&param.ty) {
        distance
    } else {
        distance + weights.assignable_penalty
    }
}

fn default_literal(ty: &Ty) -> &'static str {
    match ty {
        Ty::Primitive(PrimitiveKind::Boolean) => "false",
        Ty::Primitive(PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char | PrimitiveKind::Int) => "0",
        Ty::Primitive(PrimitiveKind::Long) => "0L",
        Ty::Primitive(PrimitiveKind::Float) => "0.0f",
        Ty::Primitive(PrimitiveKind::Double) => "0.0d",
        _ => "null",
    }
}

/// Edit distance over chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (diagonal + cost).min(above + 1).min(row[j] + 1);
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{Literal, Receiver};
    use analyzer::semantic::{ElementKind, MethodInfo};

    #[test]
    fn levenshtein_distances() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("count", "count"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("index", "idx"), 2);
    }

    #[test]
    fn default_literals_match_the_parameter_width() {
        let literal = |kind| default_literal(&Ty::Primitive(kind));
        assert_eq!(literal(PrimitiveKind::Boolean), "false");
        assert_eq!(literal(PrimitiveKind::Char), "0");
        assert_eq!(literal(PrimitiveKind::Long), "0L");
        assert_eq!(literal(PrimitiveKind::Float), "0.0f");
        assert_eq!(literal(PrimitiveKind::Double), "0.0d");
        assert_eq!(default_literal(&Ty::string()), "null");
    }

    #[test]
    fn same_type_beats_a_closer_name() {
        let weights = ArgumentWeights::default();
        let param = ParamInfo {
            name: "total".into(),
            ty: Ty::Primitive(PrimitiveKind::Long),
        };
        let widened = Element {
            name: "total".into(),
            ty: Ty::Primitive(PrimitiveKind::Int),
            kind: ElementKind::LocalVariable,
            is_static: false,
        };
        let exact = Element {
            name: "elapsed".into(),
            ty: Ty::Primitive(PrimitiveKind::Long),
            kind: ElementKind::LocalVariable,
            is_static: false,
        };
        assert!(argument_score(&exact, &param, &weights) < argument_score(&widened, &param, &weights));
    }

    fn call(name: &str) -> Fragment {
        Fragment::CallableInvocation(Invocation {
            callee: Callee::Method {
                receiver: Some(Receiver::Value("sb".into())),
            },
            method: MethodInfo {
                name: name.into(),
                params: Vec::new(),
                ret: Ty::Void,
                is_static: false,
                declaring: "app.ScriptBuilder".into(),
            },
            args: Vec::new(),
        })
    }

    #[test]
    fn dedupe_is_idempotent() {
        let candidates = vec![
            call("reset"),
            Fragment::Literal(Literal::Null),
            call("reset"),
            Fragment::Literal(Literal::Null),
            call("run"),
        ];
        let once = dedupe(candidates);
        let displays: Vec<String> = once.iter().map(Fragment::display).collect();
        assert_eq!(displays, vec!["sb.reset()", "null", "sb.run()"]);
        assert_eq!(dedupe(once.clone()), once);
    }
}
