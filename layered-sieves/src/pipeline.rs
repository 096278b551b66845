//! Pipeline presets and the end-to-end resolver.

use crate::{
    apply_exclusions, CorefState, PreciseConstructs, PronounResolution, ProperHeadMatch,
    Resolution, Sieve, SieveContext, Strictness, StrictHeadMatch, StringMatch,
};
use layered_coref::{CorefConfig, CorefResult, Document, FeatureLexicon, PleonasticOracle};
use layered_mentions::MentionExtractor;
use layered_quotations::{apply_quotation_constraints, QuotationScanner, SpeakerAttribution};

/// The sieves a pipeline can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SieveKind {
    StringMatch,
    RelaxedStringMatch,
    PreciseConstructs,
    StrictHeadMatch5,
    StrictHeadMatch6,
    StrictHeadMatch7,
    ProperHeadMatch,
    RelaxedProperHeadMatch,
    PronounResolution,
}

impl Sieve for SieveKind {
    fn name(&self) -> &'static str {
        match self {
            SieveKind::StringMatch => StringMatch::exact().name(),
            SieveKind::RelaxedStringMatch => StringMatch::relaxed().name(),
            SieveKind::PreciseConstructs => PreciseConstructs.name(),
            SieveKind::StrictHeadMatch5 => StrictHeadMatch::new(Strictness::Both).name(),
            SieveKind::StrictHeadMatch6 => StrictHeadMatch::new(Strictness::WordInclusion).name(),
            SieveKind::StrictHeadMatch7 => StrictHeadMatch::new(Strictness::Modifiers).name(),
            SieveKind::ProperHeadMatch => ProperHeadMatch::exact().name(),
            SieveKind::RelaxedProperHeadMatch => ProperHeadMatch::relaxed().name(),
            SieveKind::PronounResolution => PronounResolution.name(),
        }
    }

    fn apply(&self, ctx: &SieveContext<'_>, state: CorefState) -> CorefResult<CorefState> {
        match self {
            SieveKind::StringMatch => StringMatch::exact().apply(ctx, state),
            SieveKind::RelaxedStringMatch => StringMatch::relaxed().apply(ctx, state),
            SieveKind::PreciseConstructs => PreciseConstructs.apply(ctx, state),
            SieveKind::StrictHeadMatch5 => StrictHeadMatch::new(Strictness::Both).apply(ctx, state),
            SieveKind::StrictHeadMatch6 => {
                StrictHeadMatch::new(Strictness::WordInclusion).apply(ctx, state)
            }
            SieveKind::StrictHeadMatch7 => {
                StrictHeadMatch::new(Strictness::Modifiers).apply(ctx, state)
            }
            SieveKind::ProperHeadMatch => ProperHeadMatch::exact().apply(ctx, state),
            SieveKind::RelaxedProperHeadMatch => ProperHeadMatch::relaxed().apply(ctx, state),
            SieveKind::PronounResolution => PronounResolution.apply(ctx, state),
        }
    }
}

/// Ordered list of sieves, most precise first.
///
/// - `standard()` - every sieve
/// - `string_only()` - the two string matching passes
#[derive(Debug, Clone)]
pub struct SievePipeline {
    sieves: Vec<SieveKind>,
}

impl SievePipeline {
    /// The full cascade:
    /// 1. StringMatch - identical text
    /// 2. RelaxedStringMatch - identical text up to the head
    /// 3. PreciseConstructs - appositions, predicates, relative and reflexive pronouns, acronyms
    /// 4. StrictHeadMatch5/6/7 - same head, no new content
    /// 5. ProperHeadMatch, RelaxedProperHeadMatch - names of one entity class
    /// 6. PronounResolution - pronouns and quoted participants
    pub fn standard() -> Self {
        Self {
            sieves: vec![
                SieveKind::StringMatch,
                SieveKind::RelaxedStringMatch,
                SieveKind::PreciseConstructs,
                SieveKind::StrictHeadMatch5,
                SieveKind::StrictHeadMatch6,
                SieveKind::StrictHeadMatch7,
                SieveKind::ProperHeadMatch,
                SieveKind::RelaxedProperHeadMatch,
                SieveKind::PronounResolution,
            ],
        }
    }

    pub fn string_only() -> Self {
        Self {
            sieves: vec![SieveKind::StringMatch, SieveKind::RelaxedStringMatch],
        }
    }

    /// A custom order.
    pub fn with_sieves(sieves: Vec<SieveKind>) -> Self {
        Self { sieves }
    }

    pub fn sieves(&self) -> &[SieveKind] {
        &self.sieves
    }

    pub fn run(&self, ctx: &SieveContext<'_>, mut state: CorefState) -> CorefResult<CorefState> {
        for sieve in &self.sieves {
            state = sieve.apply(ctx, state)?;
            tracing::debug!(
                sieve = sieve.name(),
                clusters = state.clusters.live_count(),
                "sieve done"
            );
        }
        Ok(state)
    }
}

impl Default for SievePipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Runs every stage on a document: mention extraction, quotation scanning,
/// speaker attribution, quotation constraints, the sieve pipeline and the
/// output exclusions.
pub struct CorefResolver<'r> {
    lexicon: &'r dyn FeatureLexicon,
    oracle: &'r dyn PleonasticOracle,
    config: CorefConfig,
    pipeline: SievePipeline,
}

impl<'r> CorefResolver<'r> {
    pub fn new(
        lexicon: &'r dyn FeatureLexicon,
        oracle: &'r dyn PleonasticOracle,
        config: CorefConfig,
    ) -> Self {
        Self {
            lexicon,
            oracle,
            config,
            pipeline: SievePipeline::standard(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: SievePipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &CorefConfig {
        &self.config
    }

    pub fn resolve(&self, doc: &Document) -> CorefResult<Resolution> {
        doc.validate()?;
        let mut mentions = MentionExtractor::new(self.lexicon, self.oracle)
            .with_config(self.config.clone())
            .extract(doc)?;

        let mut scan = QuotationScanner::new().scan(doc);
        SpeakerAttribution::new(&self.config).attribute(doc, &mentions, &mut scan);
        apply_quotation_constraints(&scan.quotations, &mut mentions);

        let ctx = SieveContext {
            doc,
            quotes: &scan,
            config: &self.config,
        };
        let mut state = self.pipeline.run(&ctx, CorefState::new(mentions))?;
        apply_exclusions(doc, &mut state, &self.config.exclude);

        tracing::debug!(
            mentions = state.mentions.len(),
            clusters = state.clusters.live_count(),
            quotations = scan.quotations.len(),
            "resolved document"
        );
        let CorefState { mentions, clusters } = state;
        Ok(Resolution::new(mentions, clusters, scan))
    }
}
