//! The corrector: one `correct()` call produces the rewritten text and a
//! stream of events.
//!
//! Indices built at construction:
//! - an Aho-Corasick automaton over all search-target surfaces (and a
//!   second one over protected terms),
//! - an exact phonetic-key index for variant lookup,
//! - the per-term metadata table for context scoring.
//!
//! A `correct()` call is single-threaded and pure modulo backend caches;
//! the corrector holds no mutable state, so disjoint calls may run
//! concurrently.

use std::sync::Arc;

use aho_corasick::AhoCorasick;
use ahash::AHashMap;
use tracing::{debug, info, warn};

use crate::config::PhoneticConfig;
use crate::distance::key_error_ratio;
use crate::error::{CorrectionError, Result};
use crate::event::{next_trace_id, Event, EventObserver, RejectedCheck};
use crate::system::PhoneticSystem;
use crate::term::NormalizedTermConfig;
use crate::tokenizer::{Token, Tokenizer};
use crate::utils;
use crate::variant::SearchTarget;

/// Diagnostic verbosity of a corrector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Only final corrections and errors are emitted.
    #[default]
    Production,
    /// Additionally emit `Warning` events for rejected high-similarity
    /// candidates.
    Evaluation,
}

/// A closed surface range that must not be rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionInterval {
    pub start: usize,
    pub end: usize,
    pub reason: String,
}

/// Margin above the tolerance at which evaluation mode still reports a
/// near-miss.
const NEAR_MISS_MARGIN: f64 = 0.1;

const EPSILON: f64 = 1e-9;

pub struct Corrector {
    system: Arc<dyn PhoneticSystem>,
    tokenizer: Arc<dyn Tokenizer>,
    config: Arc<PhoneticConfig>,
    mode: Mode,
    terms: Vec<NormalizedTermConfig>,
    targets: Vec<SearchTarget>,
    /// Surface automaton; `pattern_targets[pattern] -> target indices`.
    surface_index: Option<AhoCorasick>,
    pattern_targets: Vec<Vec<usize>>,
    /// Exact phonetic-key index: key string -> target indices.
    key_index: AHashMap<String, Vec<usize>>,
    protected_index: Option<AhoCorasick>,
    protected_terms: Vec<String>,
    /// Pass-through reason when the corrector was built in degrade mode.
    degraded: Option<String>,
    observers: Vec<Arc<dyn EventObserver>>,
}

/// A tentative replacement at a text position.
#[derive(Debug, Clone)]
struct Candidate {
    start: usize,
    end: usize,
    target_index: usize,
    error_ratio: f64,
}

/// A candidate that survived exclusion/inclusion with its final score.
#[derive(Debug, Clone)]
struct Scored {
    start: usize,
    end: usize,
    target_index: usize,
    error_ratio: f64,
    final_score: f64,
}

impl Corrector {
    pub(crate) fn build(
        system: Arc<dyn PhoneticSystem>,
        tokenizer: Arc<dyn Tokenizer>,
        config: Arc<PhoneticConfig>,
        mode: Mode,
        terms: Vec<NormalizedTermConfig>,
        targets: Vec<SearchTarget>,
        protected_terms: Vec<String>,
    ) -> Result<Self> {
        // One automaton pattern per distinct surface; several targets may
        // share a surface across canonicals.
        let mut pattern_of: AHashMap<&str, usize> = AHashMap::new();
        let mut patterns: Vec<&str> = Vec::new();
        let mut pattern_targets: Vec<Vec<usize>> = Vec::new();
        for (idx, target) in targets.iter().enumerate() {
            let pattern = *pattern_of.entry(target.surface.as_str()).or_insert_with(|| {
                patterns.push(target.surface.as_str());
                pattern_targets.push(Vec::new());
                patterns.len() - 1
            });
            pattern_targets[pattern].push(idx);
        }

        let surface_index = if patterns.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&patterns)
                    .map_err(|e| CorrectionError::InvalidInput(format!("surface index: {e}")))?,
            )
        };

        let protected_index = if protected_terms.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .ascii_case_insensitive(true)
                    .build(&protected_terms)
                    .map_err(|e| CorrectionError::InvalidInput(format!("protected index: {e}")))?,
            )
        };

        let mut key_index: AHashMap<String, Vec<usize>> = AHashMap::new();
        for (idx, target) in targets.iter().enumerate() {
            key_index
                .entry(target.key.as_str().to_string())
                .or_default()
                .push(idx);
        }

        debug!(
            language = %system.language(),
            terms = terms.len(),
            targets = targets.len(),
            protected = protected_terms.len(),
            "corrector indices built"
        );

        Ok(Self {
            system,
            tokenizer,
            config,
            mode,
            terms,
            targets,
            surface_index,
            pattern_targets,
            key_index,
            protected_index,
            protected_terms,
            degraded: None,
            observers: Vec::new(),
        })
    }

    /// A corrector that passes text through unchanged and reports why.
    pub(crate) fn pass_through(
        system: Arc<dyn PhoneticSystem>,
        tokenizer: Arc<dyn Tokenizer>,
        config: Arc<PhoneticConfig>,
        mode: Mode,
        reason: String,
    ) -> Self {
        Self {
            system,
            tokenizer,
            config,
            mode,
            terms: Vec::new(),
            targets: Vec::new(),
            surface_index: None,
            pattern_targets: Vec::new(),
            key_index: AHashMap::new(),
            protected_index: None,
            protected_terms: Vec::new(),
            degraded: Some(reason),
            observers: Vec::new(),
        }
    }

    pub fn register_observer(&mut self, observer: Arc<dyn EventObserver>) {
        self.observers.push(observer);
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Merged protected-term intervals for an input.
    pub fn protection_intervals(&self, text: &str) -> Vec<ProtectionInterval> {
        let Some(index) = &self.protected_index else {
            return Vec::new();
        };
        let mut intervals: Vec<ProtectionInterval> = index
            .find_overlapping_iter(text)
            .map(|m| ProtectionInterval {
                start: m.start(),
                end: m.end(),
                reason: self
                    .protected_terms
                    .get(m.pattern().as_usize())
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();
        intervals.sort_by_key(|iv| (iv.start, iv.end));
        let mut merged: Vec<ProtectionInterval> = Vec::new();
        for iv in intervals {
            match merged.last_mut() {
                Some(last) if iv.start <= last.end => {
                    if iv.end > last.end {
                        last.end = iv.end;
                    }
                }
                _ => merged.push(iv),
            }
        }
        merged
    }

    /// Correct with the defaults: context is the input itself, logging on.
    pub fn correct(&self, text: &str) -> String {
        self.correct_with(text, None, false)
    }

    /// Rewrite phonetically similar spans to their canonical forms.
    ///
    /// `full_context` widens keyword/exclusion scanning beyond the input
    /// (default: the input itself). `silent` suppresses logger output
    /// only; events still reach registered observers. Never raises for
    /// content reasons.
    pub fn correct_with(&self, text: &str, full_context: Option<&str>, silent: bool) -> String {
        if text.is_empty() {
            return String::new();
        }

        let trace_id = next_trace_id();

        if let Some(reason) = &self.degraded {
            self.emit(&Event::Degraded {
                trace_id,
                reason: reason.clone(),
            });
            if !silent {
                warn!(trace_id, reason = reason.as_str(), "degraded corrector: passing through");
            }
            return text.to_string();
        }

        let char_count = text.chars().count();
        if char_count > self.config.max_input_chars {
            let reason = format!(
                "input length {char_count} exceeds cap {}",
                self.config.max_input_chars
            );
            self.emit(&Event::Degraded {
                trace_id,
                reason: reason.clone(),
            });
            if !silent {
                warn!(trace_id, reason = reason.as_str(), "oversized input passed through");
            }
            return text.to_string();
        }

        let context = full_context.unwrap_or(text);
        let anchored = full_context.map(|c| c == text).unwrap_or(true);
        let context_chars = utils::fold_chars(context);
        let byte_to_char = ByteToChar::new(text);

        let mut protections = self.protection_intervals(text);
        self.add_canonical_protections(text, &mut protections);

        let mut candidates = self.collect_surface_candidates(text, &protections);
        self.collect_window_candidates(text, &protections, trace_id, silent, &mut candidates);

        let scored = self.score_candidates(
            text,
            &candidates,
            &context_chars,
            anchored,
            &byte_to_char,
            trace_id,
        );

        let winners = self.drop_contained_duplicates(self.best_per_span(scored));
        let accepted = resolve_conflicts(winners);

        if accepted.is_empty() {
            return text.to_string();
        }

        // Rewrite right to left so earlier indices stay valid.
        let mut output = text.to_string();
        let mut by_start_desc = accepted.clone();
        by_start_desc.sort_by(|a, b| b.start.cmp(&a.start));
        for m in &by_start_desc {
            let canonical = &self.targets[m.target_index].canonical;
            output.replace_range(m.start..m.end, canonical);
        }

        // Events follow the left-to-right order of accepted rewrites.
        let mut by_start = accepted;
        by_start.sort_by_key(|m| m.start);
        for m in &by_start {
            let target = &self.targets[m.target_index];
            let surface = text[m.start..m.end].to_string();
            if !silent {
                info!(
                    trace_id,
                    language = %self.system.language(),
                    surface = surface.as_str(),
                    canonical = target.canonical.as_str(),
                    score = m.final_score,
                    "corrected"
                );
            }
            self.emit(&Event::Correction {
                trace_id,
                start: m.start,
                end: m.end,
                surface,
                canonical: target.canonical.clone(),
                score: m.final_score,
            });
        }

        output
    }

    fn emit(&self, event: &Event) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Spans already spelled as a canonical are correct text: they are
    /// protected so no sub-window of them can be rewritten. This is what
    /// makes `correct` idempotent on its own output.
    fn add_canonical_protections(&self, text: &str, protections: &mut Vec<ProtectionInterval>) {
        let Some(index) = &self.surface_index else {
            return;
        };
        let word_aligned = self.tokenizer.word_boundaries();
        for m in index.find_overlapping_iter(text) {
            if word_aligned && !aligned_to_words(text, m.start(), m.end()) {
                continue;
            }
            let surface = &text[m.start()..m.end()];
            let is_canonical = self.pattern_targets[m.pattern().as_usize()]
                .iter()
                .any(|&t| self.targets[t].canonical == surface);
            if is_canonical {
                protections.push(ProtectionInterval {
                    start: m.start(),
                    end: m.end(),
                    reason: surface.to_string(),
                });
            }
        }
        protections.sort_by_key(|iv| (iv.start, iv.end));
        let mut merged: Vec<ProtectionInterval> = Vec::new();
        for iv in std::mem::take(protections) {
            match merged.last_mut() {
                Some(last) if iv.start <= last.end => {
                    if iv.end > last.end {
                        last.end = iv.end;
                    }
                }
                _ => merged.push(iv),
            }
        }
        *protections = merged;
    }

    /// Exact surface occurrences located by the Aho index.
    fn collect_surface_candidates(
        &self,
        text: &str,
        protections: &[ProtectionInterval],
    ) -> Vec<Candidate> {
        let Some(index) = &self.surface_index else {
            return Vec::new();
        };
        let word_aligned = self.tokenizer.word_boundaries();
        let mut out = Vec::new();
        for m in index.find_overlapping_iter(text) {
            if overlaps_any(m.start(), m.end(), protections) {
                continue;
            }
            if word_aligned && !aligned_to_words(text, m.start(), m.end()) {
                continue;
            }
            for &target_index in &self.pattern_targets[m.pattern().as_usize()] {
                out.push(Candidate {
                    start: m.start(),
                    end: m.end(),
                    target_index,
                    error_ratio: 0.0,
                });
            }
        }
        out
    }

    /// Sliding-window fuzzy candidates in the phonetic domain.
    fn collect_window_candidates(
        &self,
        text: &str,
        protections: &[ProtectionInterval],
        trace_id: u64,
        silent: bool,
        out: &mut Vec<Candidate>,
    ) {
        if self.targets.is_empty() {
            return;
        }
        let tokens: Vec<Token> = self
            .tokenizer
            .tokenize(text)
            .into_iter()
            .filter(|t| t.matchable)
            .collect();
        if tokens.is_empty() {
            return;
        }

        let allow_gaps = self.tokenizer.word_boundaries();
        let range = self.system.window_range();
        let longest = (*range.end()).min(tokens.len());
        let shortest = *range.start();
        if shortest > longest {
            return;
        }

        for window_len in (shortest..=longest).rev() {
            for window in tokens.windows(window_len) {
                if !window_is_contiguous(text, window, allow_gaps) {
                    continue;
                }
                let start = window[0].start;
                let end = window[window_len - 1].end;
                if overlaps_any(start, end, protections) {
                    continue;
                }
                let surface = &text[start..end];

                let window_key = match self.system.phonetic_key(surface) {
                    Ok(key) => key,
                    Err(err) => {
                        self.emit(&Event::FuzzyError {
                            trace_id,
                            span: surface.to_string(),
                            reason: err.to_string(),
                        });
                        if !silent {
                            warn!(trace_id, span = surface, error = %err, "window degraded to no-match");
                        }
                        continue;
                    }
                };
                if window_key.is_empty() {
                    continue;
                }

                let tolerance = self
                    .config
                    .tolerance_for(window_len)
                    .unwrap_or_else(|| self.system.tolerance(window_len));

                // Exact key hits first, then the fuzzy scan with a length
                // prefilter: keys whose length differs by more than the
                // tolerance allows cannot be within distance.
                if let Some(exact) = self.key_index.get(window_key.as_str()) {
                    for &target_index in exact {
                        out.push(Candidate {
                            start,
                            end,
                            target_index,
                            error_ratio: 0.0,
                        });
                    }
                }

                let window_len_chars = window_key.char_len();
                for (target_index, target) in self.targets.iter().enumerate() {
                    if target.key == window_key {
                        continue;
                    }
                    let target_len = target.key.char_len();
                    let longest = window_len_chars.max(target_len) as f64;
                    let len_gap = window_len_chars.abs_diff(target_len) as f64;
                    if len_gap / longest > tolerance + NEAR_MISS_MARGIN + EPSILON {
                        continue;
                    }
                    let ratio = key_error_ratio(&window_key, &target.key);
                    if ratio <= tolerance + EPSILON {
                        out.push(Candidate {
                            start,
                            end,
                            target_index,
                            error_ratio: ratio,
                        });
                    } else if self.mode == Mode::Evaluation
                        && ratio <= tolerance + NEAR_MISS_MARGIN + EPSILON
                    {
                        self.emit(&Event::Warning {
                            trace_id,
                            start,
                            end,
                            canonical: target.canonical.clone(),
                            check: RejectedCheck::Tolerance,
                        });
                    }
                }
            }
        }
    }

    /// Exclusion, then inclusion, then scoring.
    fn score_candidates(
        &self,
        text: &str,
        candidates: &[Candidate],
        context_chars: &[char],
        anchored: bool,
        byte_to_char: &ByteToChar,
        trace_id: u64,
    ) -> Vec<Scored> {
        let mut out = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let target = &self.targets[candidate.target_index];
            let term = &self.terms[target.term_index];
            let surface = &text[candidate.start..candidate.end];

            // Rewriting a canonical onto itself is a no-op; skipping it
            // keeps canonicals idempotent and event-free.
            if surface == target.canonical {
                continue;
            }

            let anchor = if anchored {
                Some((
                    byte_to_char.index_of(candidate.start),
                    byte_to_char.index_of(candidate.end),
                ))
            } else {
                find_fold(context_chars, surface)
            };

            if let Some(excluded) = self.exclusion_hit(term, context_chars, anchor) {
                debug!(
                    trace_id,
                    canonical = target.canonical.as_str(),
                    word = excluded.as_str(),
                    "candidate excluded by context"
                );
                if self.mode == Mode::Evaluation {
                    self.emit(&Event::Warning {
                        trace_id,
                        start: candidate.start,
                        end: candidate.end,
                        canonical: target.canonical.clone(),
                        check: RejectedCheck::Exclusion,
                    });
                }
                continue;
            }

            let bonus = match self.keyword_bonus(term, context_chars, anchor) {
                KeywordCheck::NoRequirement => 0.0,
                KeywordCheck::Found(bonus) => bonus,
                KeywordCheck::Missing => {
                    if self.mode == Mode::Evaluation {
                        self.emit(&Event::Warning {
                            trace_id,
                            start: candidate.start,
                            end: candidate.end,
                            canonical: target.canonical.clone(),
                            check: RejectedCheck::MissingKeyword,
                        });
                    }
                    continue;
                }
            };

            out.push(Scored {
                start: candidate.start,
                end: candidate.end,
                target_index: candidate.target_index,
                error_ratio: candidate.error_ratio,
                final_score: candidate.error_ratio - term.weight - bonus,
            });
        }

        out
    }

    /// Does any exclusion word occur near the candidate?
    fn exclusion_hit(
        &self,
        term: &NormalizedTermConfig,
        context_chars: &[char],
        anchor: Option<(usize, usize)>,
    ) -> Option<String> {
        for word in &term.exclude_when {
            match min_distance(context_chars, word, anchor) {
                Some(distance) => {
                    // Without an anchor, presence anywhere in the context
                    // excludes.
                    if anchor.is_none() || distance <= self.config.exclusion_window {
                        return Some(word.clone());
                    }
                }
                None => continue,
            }
        }
        None
    }

    fn keyword_bonus(
        &self,
        term: &NormalizedTermConfig,
        context_chars: &[char],
        anchor: Option<(usize, usize)>,
    ) -> KeywordCheck {
        if term.keywords.is_empty() {
            return KeywordCheck::NoRequirement;
        }
        let mut best: Option<usize> = None;
        for word in &term.keywords {
            if let Some(distance) = min_distance(context_chars, word, anchor) {
                let distance = if anchor.is_none() {
                    // Present somewhere in an unanchored context: counts,
                    // with the minimal bonus.
                    self.config.keyword_window
                } else {
                    distance
                };
                if distance <= self.config.keyword_window {
                    best = Some(best.map_or(distance, |b| b.min(distance)));
                }
            }
        }
        match best {
            Some(distance) => KeywordCheck::Found(self.config.context_bonus(distance)),
            None => KeywordCheck::Missing,
        }
    }
}

enum KeywordCheck {
    NoRequirement,
    Found(f64),
    Missing,
}

impl std::fmt::Debug for Corrector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corrector")
            .field("language", &self.system.language())
            .field("terms", &self.terms.len())
            .field("targets", &self.targets.len())
            .field("degraded", &self.degraded)
            .finish()
    }
}

impl Corrector {
    /// Keep only the best candidate per exact span. Ties break by higher
    /// weight, then closer phonetic match, then lexicographically smaller
    /// canonical.
    fn best_per_span(&self, scored: Vec<Scored>) -> Vec<Scored> {
        let mut best: AHashMap<(usize, usize), Scored> = AHashMap::new();
        for s in scored {
            match best.get(&(s.start, s.end)) {
                Some(existing) if !self.candidate_beats(existing, &s) => {}
                _ => {
                    best.insert((s.start, s.end), s);
                }
            }
        }
        best.into_values().collect()
    }

    fn candidate_beats(&self, existing: &Scored, challenger: &Scored) -> bool {
        if (challenger.final_score - existing.final_score).abs() > EPSILON {
            return challenger.final_score < existing.final_score;
        }
        let existing_target = &self.targets[existing.target_index];
        let challenger_target = &self.targets[challenger.target_index];
        let existing_weight = self.terms[existing_target.term_index].weight;
        let challenger_weight = self.terms[challenger_target.term_index].weight;
        if (challenger_weight - existing_weight).abs() > EPSILON {
            return challenger_weight > existing_weight;
        }
        if (challenger.error_ratio - existing.error_ratio).abs() > EPSILON {
            return challenger.error_ratio < existing.error_ratio;
        }
        challenger_target.canonical < existing_target.canonical
    }

    /// A candidate wholly inside another candidate for the same canonical
    /// that scores at least as well is redundant: the container already
    /// carries the rewrite. Key normalisation makes such nested windows
    /// common (こおひ and こおひい share one romaji key), and without this
    /// dedup the inner span would win the position tie-break and truncate
    /// the rewrite.
    fn drop_contained_duplicates(&self, scored: Vec<Scored>) -> Vec<Scored> {
        let keep: Vec<bool> = scored
            .iter()
            .map(|c| {
                !scored.iter().any(|d| {
                    (d.start, d.end) != (c.start, c.end)
                        && d.start <= c.start
                        && c.end <= d.end
                        && self.targets[d.target_index].canonical
                            == self.targets[c.target_index].canonical
                        && d.final_score <= c.final_score + EPSILON
                })
            })
            .collect();
        scored
            .into_iter()
            .zip(keep)
            .filter_map(|(c, keep)| keep.then_some(c))
            .collect()
    }
}

/// Greedy span-disjoint selection in ascending score order. Ties break by
/// smaller start, then smaller end.
fn resolve_conflicts(mut winners: Vec<Scored>) -> Vec<Scored> {
    winners.sort_by(|a, b| {
        a.final_score
            .partial_cmp(&b.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.end.cmp(&b.end))
    });
    let mut accepted: Vec<Scored> = Vec::new();
    for w in winners {
        let disjoint = accepted
            .iter()
            .all(|a| w.end <= a.start || a.end <= w.start);
        if disjoint {
            accepted.push(w);
        }
    }
    accepted
}

fn overlaps_any(start: usize, end: usize, intervals: &[ProtectionInterval]) -> bool {
    intervals.iter().any(|iv| start < iv.end && iv.start < end)
}

/// Exact-surface hits in word-granularity languages must align with word
/// edges so a pattern never fires inside a longer word. Han and kana
/// neighbours are script boundaries, not word continuations: `1kg設備`
/// still exposes `1kg` as a whole word.
fn aligned_to_words(text: &str, start: usize, end: usize) -> bool {
    let continues_word = |c: char| {
        c.is_alphanumeric() && !crate::tokenizer::is_han(c) && !crate::tokenizer::is_kana(c)
    };
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(continues_word) && !after.is_some_and(continues_word)
}

/// A window is a run of adjacent units; word-granularity languages allow
/// pure-whitespace gaps between units.
fn window_is_contiguous(text: &str, window: &[Token], allow_gaps: bool) -> bool {
    window.windows(2).all(|pair| {
        if pair[0].end == pair[1].start {
            return true;
        }
        allow_gaps
            && text[pair[0].end..pair[1].start]
                .chars()
                .all(char::is_whitespace)
    })
}

/// Byte offset -> char index lookup for one input string.
struct ByteToChar {
    starts: Vec<usize>,
    total_bytes: usize,
}

impl ByteToChar {
    fn new(text: &str) -> Self {
        Self {
            starts: text.char_indices().map(|(i, _)| i).collect(),
            total_bytes: text.len(),
        }
    }

    fn index_of(&self, byte: usize) -> usize {
        if byte >= self.total_bytes {
            return self.starts.len();
        }
        match self.starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i,
        }
    }
}

/// First occurrence of `needle` in the folded context, as a char span.
fn find_fold(context_chars: &[char], needle: &str) -> Option<(usize, usize)> {
    let needle = utils::fold_chars(needle);
    if needle.is_empty() || needle.len() > context_chars.len() {
        return None;
    }
    context_chars
        .windows(needle.len())
        .position(|w| w == needle.as_slice())
        .map(|i| (i, i + needle.len()))
}

/// Minimum char distance between any occurrence of `word` and the anchor
/// interval. `Some(0)` when they touch or overlap; `None` when the word
/// does not occur. Without an anchor, occurrence anywhere yields
/// `Some(0)` so callers can apply their own presence semantics.
fn min_distance(
    context_chars: &[char],
    word: &str,
    anchor: Option<(usize, usize)>,
) -> Option<usize> {
    let word_chars = utils::fold_chars(word);
    if word_chars.is_empty() || word_chars.len() > context_chars.len() {
        return None;
    }
    let mut best: Option<usize> = None;
    for (pos, w) in context_chars.windows(word_chars.len()).enumerate() {
        if w != word_chars.as_slice() {
            continue;
        }
        let Some((anchor_start, anchor_end)) = anchor else {
            return Some(0);
        };
        let occ_end = pos + word_chars.len();
        let distance = if occ_end <= anchor_start {
            anchor_start - occ_end
        } else if pos >= anchor_end {
            pos - anchor_end
        } else {
            0
        };
        best = Some(best.map_or(distance, |b| b.min(distance)));
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_anchor() {
        let ctx: Vec<char> = "abXcd".chars().collect();
        // Word before the anchor.
        assert_eq!(min_distance(&ctx, "ab", Some((2, 3))), Some(0));
        // Word after with one char in between.
        assert_eq!(min_distance(&ctx, "d", Some((2, 3))), Some(1));
        // Absent word.
        assert_eq!(min_distance(&ctx, "zz", Some((2, 3))), None);
        // No anchor: presence reports zero.
        assert_eq!(min_distance(&ctx, "cd", None), Some(0));
    }

    #[test]
    fn conflict_resolution_prefers_lower_score_then_position() {
        let scored = vec![
            Scored { start: 0, end: 4, target_index: 0, error_ratio: 0.0, final_score: 0.5 },
            Scored { start: 2, end: 6, target_index: 1, error_ratio: 0.0, final_score: 0.1 },
            Scored { start: 8, end: 10, target_index: 2, error_ratio: 0.0, final_score: 0.5 },
        ];
        let accepted = resolve_conflicts(scored);
        let spans: Vec<(usize, usize)> = accepted.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(spans, vec![(2, 6), (8, 10)]);
    }

    #[test]
    fn equal_scores_tie_break_by_smaller_start_then_end() {
        let scored = vec![
            Scored { start: 0, end: 12, target_index: 0, error_ratio: 0.0, final_score: 0.0 },
            Scored { start: 0, end: 9, target_index: 1, error_ratio: 0.0, final_score: 0.0 },
        ];
        let accepted = resolve_conflicts(scored);
        assert_eq!(accepted.len(), 1);
        assert_eq!((accepted[0].start, accepted[0].end), (0, 9));
    }

    #[test]
    fn word_alignment() {
        let text = "Pythonic Python";
        assert!(!aligned_to_words(text, 0, 6)); // inside "Pythonic"
        assert!(aligned_to_words(text, 9, 15)); // the standalone word
    }

    #[test]
    fn byte_to_char_maps_multibyte() {
        let text = "我a在";
        let map = ByteToChar::new(text);
        assert_eq!(map.index_of(0), 0);
        assert_eq!(map.index_of(3), 1); // 'a'
        assert_eq!(map.index_of(4), 2); // '在'
        assert_eq!(map.index_of(text.len()), 3);
    }
}
