//! Latent Dirichlet Allocation by collapsed Gibbs sampling.
//!
//! The trainer fits one model per analysis request: token-level topic
//! assignments are initialized from a seeded RNG, then resampled for a fixed
//! number of full sweeps over the corpus. Documents are visited in corpus
//! order, in chunks; the document-topic prior `alpha` (asymmetric, one value
//! per topic) is re-estimated from the current counts at chunk boundaries
//! and the topic-word prior `eta` (scalar) at sweep boundaries, both by
//! Minka's fixed-point update. Everything downstream of the seed is
//! deterministic: two runs with identical corpus and config produce
//! bit-identical distributions.
//!
//! The model lives only for the duration of one request and is never
//! persisted.

use crate::errors::{AnalysisError, Result};
use crate::vocab::{BowCorpus, Vocabulary};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Fixed default seed; every stochastic step derives from it.
pub const DEFAULT_SEED: u64 = 135;

/// Default number of documents per update chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

// ============================================================================
// Configuration
// ============================================================================

/// Training configuration.
///
/// `num_topics` and `iterations` are caller-supplied per request; the
/// remaining fields carry fixed defaults and exist for tests and tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdaConfig {
    /// Number of latent topics
    pub num_topics: usize,
    /// Gibbs sweeps over the corpus per pass
    pub iterations: usize,
    /// Documents per hyperparameter-update chunk
    pub chunk_size: usize,
    /// Passes over the corpus (total sweeps = passes * iterations)
    pub passes: usize,
    /// Log per-token log-likelihood every N sweeps; `None` disables
    pub eval_every: Option<usize>,
    /// RNG seed governing initialization and sampling
    pub seed: u64,
}

impl LdaConfig {
    /// Create a config with the fixed defaults (chunk size 1000, one pass,
    /// evaluation disabled, seed 135).
    pub fn new(num_topics: usize, iterations: usize) -> Self {
        Self {
            num_topics,
            iterations,
            chunk_size: DEFAULT_CHUNK_SIZE,
            passes: 1,
            eval_every: None,
            seed: DEFAULT_SEED,
        }
    }

    /// Override the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Override the pass count.
    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    /// Enable periodic log-likelihood evaluation.
    pub fn with_eval_every(mut self, every: Option<usize>) -> Self {
        self.eval_every = every;
        self
    }

    /// Override the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the caller-supplied parameters.
    pub fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(AnalysisError::training("topic count must be positive"));
        }
        if self.iterations == 0 {
            return Err(AnalysisError::training("iteration count must be positive"));
        }
        if self.passes == 0 {
            return Err(AnalysisError::training("pass count must be positive"));
        }
        if self.chunk_size == 0 {
            return Err(AnalysisError::training("chunk size must be positive"));
        }
        Ok(())
    }
}

// ============================================================================
// Fitted model
// ============================================================================

/// A fitted LDA model: count matrices, learned priors, the vocabulary, and
/// the training configuration. Immutable after training.
#[derive(Debug, Clone)]
pub struct LdaModel {
    config: LdaConfig,
    vocabulary: Vocabulary,
    /// Per-topic document-topic prior (asymmetric)
    alpha: Vec<f64>,
    /// Scalar topic-word prior
    eta: f64,
    /// [doc][topic] token counts
    ndk: Vec<Vec<u32>>,
    /// [topic][word] token counts
    nkw: Vec<Vec<u32>>,
    /// [topic] total token counts
    nk: Vec<u64>,
    doc_lengths: Vec<usize>,
}

impl LdaModel {
    /// Fit a model over the bag-of-words corpus.
    ///
    /// Guards before inference: the corpus must contain at least one token,
    /// and the topic count must not exceed the vocabulary size.
    pub fn train(corpus: &BowCorpus, config: &LdaConfig) -> Result<Self> {
        config.validate()?;

        let num_topics = config.num_topics;
        let vocab_size = corpus.vocabulary().len();
        if corpus.num_documents() == 0 || corpus.total_tokens() == 0 {
            return Err(AnalysisError::empty_corpus(
                "cannot train a topic model on an empty corpus",
            ));
        }
        if num_topics > vocab_size {
            return Err(AnalysisError::training(format!(
                "topic count {} exceeds vocabulary size {}",
                num_topics, vocab_size
            )));
        }

        // Expand each bag into token instances. Bags are id-sorted, so the
        // expansion (and with it the whole sampling trajectory) is
        // deterministic.
        let docs: Vec<Vec<u32>> = corpus
            .documents()
            .iter()
            .map(|bag| {
                bag.iter()
                    .flat_map(|&(id, count)| std::iter::repeat(id).take(count as usize))
                    .collect()
            })
            .collect();
        let num_docs = docs.len();
        let doc_lengths: Vec<usize> = docs.iter().map(Vec::len).collect();

        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut ndk = vec![vec![0u32; num_topics]; num_docs];
        let mut nkw = vec![vec![0u32; vocab_size]; num_topics];
        let mut nk = vec![0u64; num_topics];
        let mut z: Vec<Vec<usize>> = Vec::with_capacity(num_docs);

        for (di, doc) in docs.iter().enumerate() {
            let mut assignments = Vec::with_capacity(doc.len());
            for &w in doc {
                let topic = rng.gen_range(0..num_topics);
                assignments.push(topic);
                ndk[di][topic] += 1;
                nkw[topic][w as usize] += 1;
                nk[topic] += 1;
            }
            z.push(assignments);
        }

        // Auto priors: start symmetric, then re-estimate from the counts.
        let mut alpha = vec![1.0 / num_topics as f64; num_topics];
        let mut eta = 1.0 / num_topics as f64;

        let total_sweeps = config.passes * config.iterations;
        for sweep in 0..total_sweeps {
            let mut chunk_start = 0;
            while chunk_start < num_docs {
                let chunk_end = (chunk_start + config.chunk_size).min(num_docs);
                for di in chunk_start..chunk_end {
                    for pi in 0..docs[di].len() {
                        let w = docs[di][pi] as usize;
                        let old_t = z[di][pi];

                        ndk[di][old_t] -= 1;
                        nkw[old_t][w] -= 1;
                        nk[old_t] -= 1;

                        // p(t) ∝ (ndk + alpha_t) * (nkw + eta) / (nk + V*eta)
                        let vb = vocab_size as f64 * eta;
                        let mut weights = vec![0.0f64; num_topics];
                        for (t, weight) in weights.iter_mut().enumerate() {
                            let left = ndk[di][t] as f64 + alpha[t];
                            let right = (nkw[t][w] as f64 + eta) / (nk[t] as f64 + vb);
                            *weight = left * right;
                        }

                        let sum: f64 = weights.iter().sum();
                        let new_t = if sum <= f64::EPSILON {
                            rng.gen_range(0..num_topics)
                        } else {
                            let dist = WeightedIndex::new(&weights).map_err(|e| {
                                AnalysisError::internal(format!(
                                    "degenerate sampling weights: {}",
                                    e
                                ))
                            })?;
                            dist.sample(&mut rng)
                        };

                        z[di][pi] = new_t;
                        ndk[di][new_t] += 1;
                        nkw[new_t][w] += 1;
                        nk[new_t] += 1;
                    }
                }
                update_alpha(&mut alpha, &ndk, &doc_lengths);
                chunk_start = chunk_end;
            }
            eta = update_eta(eta, &nkw, &nk, vocab_size);

            if let Some(every) = config.eval_every {
                if every > 0 && (sweep + 1) % every == 0 {
                    let model = LdaModel {
                        config: config.clone(),
                        vocabulary: corpus.vocabulary().clone(),
                        alpha: alpha.clone(),
                        eta,
                        ndk: ndk.clone(),
                        nkw: nkw.clone(),
                        nk: nk.clone(),
                        doc_lengths: doc_lengths.clone(),
                    };
                    log::debug!(
                        "LDA sweep {}/{}: per-token log-likelihood {:.4}",
                        sweep + 1,
                        total_sweeps,
                        model.per_token_log_likelihood(corpus)
                    );
                }
            }
        }

        Ok(Self {
            config: config.clone(),
            vocabulary: corpus.vocabulary().clone(),
            alpha,
            eta,
            ndk,
            nkw,
            nk,
            doc_lengths,
        })
    }

    /// Number of topics.
    pub fn num_topics(&self) -> usize {
        self.config.num_topics
    }

    /// Number of documents the model was fitted on.
    pub fn num_documents(&self) -> usize {
        self.ndk.len()
    }

    /// The vocabulary the model was trained against.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The training configuration.
    pub fn config(&self) -> &LdaConfig {
        &self.config
    }

    /// θ_d: the topic-probability distribution of one document, smoothed by
    /// the learned prior. Sums to 1; an empty document yields the
    /// normalized prior itself.
    pub fn doc_topic_distribution(&self, doc: usize) -> Vec<f64> {
        let alpha_sum: f64 = self.alpha.iter().sum();
        let denom = self.doc_lengths[doc] as f64 + alpha_sum;
        self.ndk[doc]
            .iter()
            .zip(&self.alpha)
            .map(|(&n, &a)| (n as f64 + a) / denom)
            .collect()
    }

    /// φ_t: one topic's distribution over the vocabulary.
    pub fn topic_word_distribution(&self, topic: usize) -> Vec<f64> {
        let denom = self.nk[topic] as f64 + self.vocabulary.len() as f64 * self.eta;
        self.nkw[topic]
            .iter()
            .map(|&n| (n as f64 + self.eta) / denom)
            .collect()
    }

    /// The `n` highest-weight words of a topic, descending by weight; ties
    /// resolve to the lower word id.
    pub fn top_words(&self, topic: usize, n: usize) -> Vec<(String, f64)> {
        let phi = self.topic_word_distribution(topic);
        let mut pairs: Vec<(u32, f64)> = phi
            .iter()
            .enumerate()
            .map(|(id, &p)| (id as u32, p))
            .collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        pairs
            .into_iter()
            .take(n)
            .filter_map(|(id, p)| self.vocabulary.word(id).map(|w| (w.to_string(), p)))
            .collect()
    }

    /// Mean log-likelihood per token under the fitted distributions.
    pub fn per_token_log_likelihood(&self, corpus: &BowCorpus) -> f64 {
        let mut total = 0.0f64;
        let mut tokens = 0u64;
        let phis: Vec<Vec<f64>> = (0..self.num_topics())
            .map(|t| self.topic_word_distribution(t))
            .collect();
        for (di, bag) in corpus.documents().iter().enumerate() {
            let theta = self.doc_topic_distribution(di);
            for &(w, count) in bag {
                let p: f64 = theta
                    .iter()
                    .zip(phis.iter())
                    .map(|(&th, phi)| th * phi[w as usize])
                    .sum();
                total += count as f64 * p.max(f64::MIN_POSITIVE).ln();
                tokens += count as u64;
            }
        }
        if tokens == 0 {
            0.0
        } else {
            total / tokens as f64
        }
    }

    /// The learned per-topic document-topic prior.
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// The learned topic-word prior.
    pub fn eta(&self) -> f64 {
        self.eta
    }
}

// ============================================================================
// Hyperparameter re-estimation
// ============================================================================

const MIN_PRIOR: f64 = 1e-8;

/// One Minka fixed-point step for the asymmetric alpha, in place.
fn update_alpha(alpha: &mut [f64], ndk: &[Vec<u32>], doc_lengths: &[usize]) {
    let num_docs = ndk.len() as f64;
    let alpha_sum: f64 = alpha.iter().sum();

    let den: f64 = doc_lengths
        .iter()
        .map(|&len| digamma(len as f64 + alpha_sum))
        .sum::<f64>()
        - num_docs * digamma(alpha_sum);
    if !(den.is_finite() && den > 0.0) {
        return;
    }

    for (k, a) in alpha.iter_mut().enumerate() {
        let num: f64 = ndk
            .iter()
            .map(|row| digamma(row[k] as f64 + *a))
            .sum::<f64>()
            - num_docs * digamma(*a);
        if num.is_finite() && num > 0.0 {
            *a = (*a * num / den).max(MIN_PRIOR);
        }
    }
}

/// One Minka fixed-point step for the scalar eta.
fn update_eta(eta: f64, nkw: &[Vec<u32>], nk: &[u64], vocab_size: usize) -> f64 {
    let num_topics = nkw.len() as f64;
    let v = vocab_size as f64;

    let num: f64 = nkw
        .iter()
        .flat_map(|row| row.iter().map(|&n| digamma(n as f64 + eta)))
        .sum::<f64>()
        - num_topics * v * digamma(eta);
    let den: f64 = v
        * (nk
            .iter()
            .map(|&n| digamma(n as f64 + v * eta))
            .sum::<f64>()
            - num_topics * digamma(v * eta));

    if num.is_finite() && den.is_finite() && num > 0.0 && den > 0.0 {
        (eta * num / den).max(MIN_PRIOR)
    } else {
        eta
    }
}

/// Digamma via recurrence to x >= 6 plus the asymptotic expansion.
fn digamma(mut x: f64) -> f64 {
    let mut result = 0.0;
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln() - 0.5 * inv
        - inv2 * (1.0 / 12.0 - inv2 * (1.0 / 120.0 - inv2 / 252.0))
}
