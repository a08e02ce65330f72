use crate::{
    CandidatePicker, EngineConfig, EngineError, Fragment, Outcome, Request, Resolution, expand,
    resolve,
};
use analyzer::parse;
use analyzer::semantic::{Index, SemanticModel, builtin_library};

/// Splits a `$0` caret marker out of `input`.
pub fn caret(input: &str) -> (String, u32) {
    let pos = input.find("$0").expect("missing $0 caret marker");
    let mut source = input.to_string();
    source.replace_range(pos..pos + 2, "");
    (source, pos as u32)
}

/// A resolved index over `source` with the builtin library.
pub fn index(source: &str) -> Index {
    let mut index = Index::from_source(source, builtin_library());
    index.resolve();
    index
}

/// Picker that answers with a fixed index and remembers what it was shown.
#[derive(Debug, Default)]
pub struct Pick {
    pub choice: Option<usize>,
    pub shown: Vec<String>,
}

impl Pick {
    pub fn nth(index: usize) -> Pick {
        Pick {
            choice: Some(index),
            shown: Vec::new(),
        }
    }

    pub fn dismiss() -> Pick {
        Pick::default()
    }
}

impl CandidatePicker for Pick {
    fn pick(&mut self, _request: &Request<'_>, candidates: &[Fragment]) -> Option<usize> {
        self.shown = candidates.iter().map(Fragment::display).collect();
        self.choice
    }
}

/// A source with a `$0` caret, the abbreviation typed there and the engine configuration.
pub struct Fixture {
    pub source: String,
    pub caret: u32,
    pub config: EngineConfig,
}

/// Routes engine logs to the test output; `RUST_LOG=ide=trace` shows the climb.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn t(marked: &str) -> Fixture {
    init_tracing();
    let (source, caret) = caret(marked);
    Fixture {
        source,
        caret,
        config: EngineConfig::default(),
    }
}

impl Fixture {
    pub fn config(mut self, config: EngineConfig) -> Fixture {
        self.config = config;
        self
    }

    pub fn try_resolve(&self, abbreviation: &str) -> Result<Resolution, EngineError> {
        let model = index(&self.source);
        let parsed = parse(&self.source);
        let request = Request {
            source: &self.source,
            parsed: &parsed,
            caret: self.caret,
            abbreviation,
        };
        resolve(&request, &model, &self.config)
    }

    pub fn resolve(&self, abbreviation: &str) -> Resolution {
        self.try_resolve(abbreviation)
            .unwrap_or_else(|e| panic!("resolve {abbreviation:?} failed: {e}"))
    }

    /// Display texts of the candidates, in resolution order.
    pub fn displays(&self, abbreviation: &str) -> Vec<String> {
        match self.resolve(abbreviation) {
            Resolution::None => Vec::new(),
            Resolution::Single(fragment) => vec![fragment.display()],
            Resolution::Ambiguous(candidates) => candidates.iter().map(Fragment::display).collect(),
        }
    }

    pub fn expect_single(&self, abbreviation: &str) -> Fragment {
        match self.resolve(abbreviation) {
            Resolution::Single(fragment) => fragment,
            other => panic!("expected one candidate for {abbreviation:?}, got {other:?}"),
        }
    }

    pub fn expand_with(&self, abbreviation: &str, picker: &mut Pick) -> Outcome {
        let mut model = Index::from_source(&self.source, builtin_library());
        expand(
            &self.source,
            self.caret,
            abbreviation,
            &mut model,
            &self.config,
            picker,
        )
        .unwrap_or_else(|e| panic!("expand {abbreviation:?} failed: {e}"))
    }

    pub fn expand(&self, abbreviation: &str) -> Outcome {
        self.expand_with(abbreviation, &mut Pick::dismiss())
    }

    /// The document after expanding `abbreviation`; panics unless something was inserted.
    pub fn expanded(&self, abbreviation: &str) -> (String, u32) {
        match self.expand(abbreviation) {
            Outcome::Inserted(applied) => (applied.source, applied.cursor),
            other => panic!("expected an insertion for {abbreviation:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_caret_marker_is_removed() {
    let (source, offset) = caret("a.$0b");
    assert_eq!(source, "a.b");
    assert_eq!(offset, 2);
}
