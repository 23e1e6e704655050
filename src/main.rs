use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::info;

use speakerid_dtw::{Aligner, AlignerKind, BandConstraint, Convention, Sequence};
use speakerid_io::{StoreFormat, append_corpus, load_corpus, save_corpus};
use speakerid_match::{Identification, MatcherConfig, SpeakerLabel, Template, TemplateCorpus};

#[derive(Parser)]
#[command(name = "speakerid")]
#[command(about = "Text-independent speaker identification by DTW template matching")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// RNG seed for reproducible random query selection
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Shared alignment parameters.
#[derive(Args, Debug, Clone)]
struct AlignArgs {
    /// Aligner to run: "full", "banded", or "both"
    #[arg(long, default_value = "both")]
    aligner: String,

    /// Boundary convention: "legacy" or "textbook"
    #[arg(long, default_value = "legacy")]
    convention: String,

    /// Explicit band radius for the banded aligner (defaults to the length difference)
    #[arg(long)]
    band: Option<usize>,

    /// Scan the corpus on the calling thread instead of the rayon pool
    #[arg(long, default_value_t = false)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Identify the speaker of one query utterance
    Identify {
        /// Path to the enrolled template store
        #[arg(long)]
        templates: PathBuf,

        /// Path to the store holding query utterances
        #[arg(long)]
        query: PathBuf,

        /// Position of the query utterance in the query store
        #[arg(long, conflicts_with = "random")]
        index: Option<usize>,

        /// Pick the query utterance uniformly at random (uses --seed)
        #[arg(long, default_value_t = false)]
        random: bool,

        /// Also list the best K speakers
        #[arg(long)]
        top_k: Option<usize>,

        #[command(flatten)]
        align: AlignArgs,
    },

    /// Print the alignment cost between two utterances
    Compare {
        /// Store holding the first utterance
        #[arg(long)]
        a: PathBuf,

        /// Store holding the second utterance
        #[arg(long)]
        b: PathBuf,

        /// Position of the first utterance in its store
        #[arg(long, default_value_t = 0)]
        a_index: usize,

        /// Position of the second utterance in its store
        #[arg(long, default_value_t = 0)]
        b_index: usize,

        #[command(flatten)]
        align: AlignArgs,
    },

    /// Identify every labelled query and report accuracy
    Evaluate {
        /// Path to the enrolled template store
        #[arg(long)]
        templates: PathBuf,

        /// Path to the store of labelled queries
        #[arg(long)]
        queries: PathBuf,

        #[command(flatten)]
        align: AlignArgs,
    },

    /// Append every utterance of a store to the template store under one label
    Enroll {
        /// Path to the template store (created if missing)
        #[arg(long)]
        templates: PathBuf,

        /// Store holding the utterances to enrol
        #[arg(long)]
        from: PathBuf,

        /// Speaker label to enrol them under
        #[arg(long)]
        label: String,
    },

    /// Rewrite a store in the format implied by the output extension
    Convert {
        /// Source store
        #[arg(long)]
        input: PathBuf,

        /// Destination store (".bin" for binary, anything else for text)
        #[arg(long)]
        output: PathBuf,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct IdentifyOutput {
    query_index: usize,
    query_label: String,
    n_templates: usize,
    results: Vec<AlignerResult>,
}

#[derive(Serialize)]
struct AlignerResult {
    aligner: String,
    convention: String,
    label: String,
    cost: f64,
    template_index: usize,
    elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranking: Option<Vec<RankEntry>>,
}

#[derive(Serialize)]
struct RankEntry {
    label: String,
    cost: f64,
    template_index: usize,
}

#[derive(Serialize)]
struct CompareOutput {
    a_frames: usize,
    b_frames: usize,
    results: Vec<CostOutput>,
}

#[derive(Serialize)]
struct CostOutput {
    aligner: String,
    convention: String,
    cost: f64,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct EvaluateOutput {
    n_templates: usize,
    n_queries: usize,
    results: Vec<AccuracyOutput>,
}

#[derive(Serialize)]
struct AccuracyOutput {
    aligner: String,
    convention: String,
    correct: usize,
    total: usize,
    accuracy: f64,
    elapsed_ms: f64,
    per_speaker: BTreeMap<String, SpeakerAccuracy>,
}

#[derive(Serialize)]
struct SpeakerAccuracy {
    correct: usize,
    total: usize,
    accuracy: f64,
}

#[derive(Serialize)]
struct EnrollOutput {
    label: String,
    n_added: usize,
    n_templates: usize,
}

#[derive(Serialize)]
struct ConvertOutput {
    input_format: String,
    output_format: String,
    n_templates: usize,
}

fn parse_aligners(s: &str) -> Result<Vec<AlignerKind>> {
    match s {
        "full" => Ok(vec![AlignerKind::Full]),
        "banded" => Ok(vec![AlignerKind::Banded]),
        "both" => Ok(vec![AlignerKind::Full, AlignerKind::Banded]),
        other => anyhow::bail!("unknown aligner: {other} (expected full, banded, or both)"),
    }
}

fn parse_convention(s: &str) -> Result<Convention> {
    match s {
        "legacy" => Ok(Convention::Legacy),
        "textbook" => Ok(Convention::Textbook),
        other => anyhow::bail!("unknown convention: {other} (expected legacy or textbook)"),
    }
}

fn build_band(band: Option<usize>) -> BandConstraint {
    band.map_or(BandConstraint::LengthDifference, BandConstraint::Radius)
}

fn build_configs(args: &AlignArgs) -> Result<Vec<MatcherConfig>> {
    let convention = parse_convention(&args.convention)?;
    let band = build_band(args.band);
    Ok(parse_aligners(&args.aligner)?
        .into_iter()
        .map(|kind| {
            MatcherConfig::new(kind)
                .with_convention(convention)
                .with_band(band)
                .with_parallel(!args.sequential)
        })
        .collect())
}

fn load_store(path: &Path, what: &str) -> Result<TemplateCorpus> {
    load_corpus(path).with_context(|| format!("failed to load {what} store {}", path.display()))
}

fn pick<'a>(corpus: &'a TemplateCorpus, index: usize, what: &str) -> Result<&'a Template> {
    corpus.get(index).with_context(|| {
        format!(
            "{what} index {index} out of range (store holds {} utterances)",
            corpus.len()
        )
    })
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

fn rank_entry(id: &Identification) -> RankEntry {
    RankEntry {
        label: id.label.to_string(),
        cost: id.cost.value(),
        template_index: id.template_index,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Identify {
            templates,
            query,
            index,
            random,
            top_k,
            align,
        } => {
            let configs = build_configs(&align)?;
            let corpus = load_store(&templates, "template")?;
            let queries = load_store(&query, "query")?;

            let query_index = if random {
                let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
                rng.gen_range(0..queries.len())
            } else {
                index.unwrap_or(0)
            };
            let chosen = pick(&queries, query_index, "query")?;
            info!(
                query_index,
                label = %chosen.label,
                frames = chosen.sequence.len(),
                "query selected"
            );

            let mut results = Vec::with_capacity(configs.len());
            for config in &configs {
                let matcher = config.build();
                let start = Instant::now();
                let best = matcher
                    .identify(&chosen.sequence, &corpus)
                    .context("identification failed")?;
                let ranking = top_k
                    .map(|k| matcher.rank(&chosen.sequence, &corpus, k))
                    .transpose()
                    .context("ranking failed")?
                    .map(|ranked| ranked.iter().map(rank_entry).collect());
                let elapsed = elapsed_ms(start);

                info!(
                    aligner = %config.kind(),
                    label = %best.label,
                    cost = best.cost.value(),
                    elapsed_ms = elapsed,
                    "identified"
                );
                results.push(AlignerResult {
                    aligner: config.kind().to_string(),
                    convention: config.convention().to_string(),
                    label: best.label.to_string(),
                    cost: best.cost.value(),
                    template_index: best.template_index,
                    elapsed_ms: elapsed,
                    ranking,
                });
            }

            let output = IdentifyOutput {
                query_index,
                query_label: chosen.label.to_string(),
                n_templates: corpus.len(),
                results,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Compare {
            a,
            b,
            a_index,
            b_index,
            align,
        } => {
            let configs = build_configs(&align)?;
            let store_a = load_store(&a, "first")?;
            let store_b = load_store(&b, "second")?;
            let seq_a: &Sequence = &pick(&store_a, a_index, "first")?.sequence;
            let seq_b: &Sequence = &pick(&store_b, b_index, "second")?.sequence;

            let results = configs
                .iter()
                .map(|config| {
                    let strategy = config.strategy();
                    let start = Instant::now();
                    let cost = strategy.align(seq_a.as_view(), seq_b.as_view());
                    CostOutput {
                        aligner: config.kind().to_string(),
                        convention: config.convention().to_string(),
                        cost: cost.value(),
                        elapsed_ms: elapsed_ms(start),
                    }
                })
                .collect();

            let output = CompareOutput {
                a_frames: seq_a.len(),
                b_frames: seq_b.len(),
                results,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Evaluate {
            templates,
            queries,
            align,
        } => {
            let configs = build_configs(&align)?;
            let corpus = load_store(&templates, "template")?;
            let labelled: Vec<(SpeakerLabel, Sequence)> = load_store(&queries, "query")?
                .into_templates()
                .into_iter()
                .map(|t| (t.label, t.sequence))
                .collect();

            let mut results = Vec::with_capacity(configs.len());
            for config in &configs {
                let start = Instant::now();
                let evaluation = config
                    .build()
                    .evaluate(&labelled, &corpus)
                    .context("evaluation failed")?;
                let elapsed = elapsed_ms(start);

                let per_speaker = evaluation
                    .per_speaker()
                    .into_iter()
                    .map(|(label, score)| {
                        (
                            label.to_string(),
                            SpeakerAccuracy {
                                correct: score.correct,
                                total: score.total,
                                accuracy: score.accuracy(),
                            },
                        )
                    })
                    .collect();

                results.push(AccuracyOutput {
                    aligner: config.kind().to_string(),
                    convention: config.convention().to_string(),
                    correct: evaluation.correct(),
                    total: evaluation.total(),
                    accuracy: evaluation.accuracy(),
                    elapsed_ms: elapsed,
                    per_speaker,
                });
            }

            let output = EvaluateOutput {
                n_templates: corpus.len(),
                n_queries: labelled.len(),
                results,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Enroll {
            templates,
            from,
            label,
        } => {
            let label = SpeakerLabel::new(label).context("invalid speaker label")?;
            let source = load_store(&from, "source")?;
            let enrolled: TemplateCorpus = source
                .into_templates()
                .into_iter()
                .map(|t| Template::new(label.clone(), t.sequence))
                .collect();

            append_corpus(&templates, &enrolled).with_context(|| {
                format!("failed to append to template store {}", templates.display())
            })?;
            let n_templates = load_store(&templates, "template")?.len();
            info!(label = %label, n_added = enrolled.len(), n_templates, "speaker enrolled");

            let output = EnrollOutput {
                label: label.to_string(),
                n_added: enrolled.len(),
                n_templates,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Convert { input, output } => {
            let corpus = load_store(&input, "input")?;
            save_corpus(&output, &corpus)
                .with_context(|| format!("failed to write store {}", output.display()))?;

            let summary = ConvertOutput {
                input_format: StoreFormat::from_path(&input).to_string(),
                output_format: StoreFormat::from_path(&output).to_string(),
                n_templates: corpus.len(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
