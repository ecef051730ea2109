//! Model-based extraction strategy: BERT token classification via candle.
//!
//! The model is a process-lifetime resource: downloaded once from the
//! Hugging Face Hub (with one automatic retry on a failed fetch), loaded
//! under a timeout, and shared through a single init-once accessor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use clauselens_common::{EntityBundle, MAX_ENTITIES_PER_FIELD};

use crate::labels::{normalize_label, EntityCategory};
use crate::{EntityExtractor, NerError, Result};

/// NER configuration.
#[derive(Debug, Clone)]
pub struct NerConfig {
    pub model_id: String,
    pub max_length: usize,
    /// Document prefix (in characters) handed to the model.
    pub max_chars: usize,
    /// Bound on the one-time model load. Exceeding it fails the load with
    /// a clear error instead of hanging the caller.
    pub load_timeout: Duration,
    pub use_gpu: bool,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            // OntoNotes label set: PERSON/ORG/GPE/DATE/MONEY, which covers
            // every report category.
            model_id: "djagatiya/ner-bert-base-cased-ontonotesv5-englishv4".to_string(),
            max_length: 512,
            max_chars: 5000,
            load_timeout: Duration::from_secs(300),
            use_gpu: true,
        }
    }
}

/// One extracted span, in document order.
#[derive(Debug, Clone)]
pub struct NerSpan {
    pub text: String,
    pub category: EntityCategory,
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

/// BERT token-classification model wrapper.
pub struct NerModel {
    model: BertModel,
    tokenizer: Tokenizer,
    classifier: Tensor,
    label_map: HashMap<i64, String>,
    config: NerConfig,
    device: Device,
}

// Process-wide model instance
static GLOBAL_MODEL: OnceCell<Arc<NerModel>> = OnceCell::const_new();

impl NerModel {
    /// Process-wide instance. The first caller performs the load; concurrent
    /// first callers wait on the same initialization instead of racing it.
    /// A failed load leaves the cell empty, so a later call may try again.
    pub async fn global(config: NerConfig) -> Result<Arc<NerModel>> {
        GLOBAL_MODEL
            .get_or_try_init(|| async {
                info!("Initializing global NER model");
                NerModel::new(config).await.map(Arc::new)
            })
            .await
            .map(Arc::clone)
    }

    /// Load a NER model from the Hugging Face Hub.
    pub async fn new(config: NerConfig) -> Result<Self> {
        let start = Instant::now();
        info!("Loading NER model: {}", config.model_id);

        let device = if config.use_gpu {
            Device::cuda_if_available(0).unwrap_or(Device::Cpu)
        } else {
            Device::Cpu
        };
        debug!("Using device: {:?}", device);

        let model_id = config.model_id.clone();
        let download = tokio::task::spawn_blocking(move || {
            // One automatic retry: a transient fetch failure re-runs the
            // download against the local Hub cache before giving up.
            Self::fetch_model(&model_id).or_else(|err| {
                warn!("Model fetch failed, retrying once: {err}");
                Self::fetch_model(&model_id)
            })
        });
        let (bert_config, tokenizer, weights_path, label_map) =
            tokio::time::timeout(config.load_timeout, download)
                .await
                .map_err(|_| {
                    NerError::ModelLoad(format!(
                        "model load timed out after {:?}",
                        config.load_timeout
                    ))
                })?
                .map_err(|e| NerError::Download(e.to_string()))??;

        info!("Loading model weights from {:?}", weights_path);
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path.clone()], DType::F32, &device)
                .map_err(|e| NerError::ModelLoad(e.to_string()))?
        };

        let model = BertModel::load(vb.clone(), &bert_config)
            .or_else(|_| BertModel::load(vb.pp("bert"), &bert_config))
            .map_err(|e| NerError::ModelLoad(format!("BertModel: {e}")))?;

        // Token-classification head: [num_labels, hidden_size], applied as
        // hidden @ weight.T.
        let num_labels = label_map.len().max(1);
        let hidden_size = bert_config.hidden_size;
        let classifier = vb
            .pp("classifier")
            .get((num_labels, hidden_size), "weight")
            .or_else(|_| vb.get((num_labels, hidden_size), "classifier.weight"))
            .or_else(|_| vb.pp("bert").pp("classifier").get((num_labels, hidden_size), "weight"))
            .map_err(|e| NerError::ModelLoad(format!("classifier head: {e}")))?;

        info!("NER model loaded in {:?}", start.elapsed());

        Ok(Self {
            model,
            tokenizer,
            classifier,
            label_map,
            config,
            device,
        })
    }

    fn fetch_model(
        model_id: &str,
    ) -> Result<(Config, Tokenizer, std::path::PathBuf, HashMap<i64, String>)> {
        let api = Api::new().map_err(|e| NerError::Download(format!("API init: {e}")))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| NerError::Download(format!("config.json: {e}")))?;
        let config_json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&config_path)?)
                .map_err(|e| NerError::ModelLoad(format!("parse config: {e}")))?;

        let label_map: HashMap<i64, String> = config_json["id2label"]
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| {
                        let id: i64 = k.parse().ok()?;
                        let label = v.as_str()?.to_string();
                        Some((id, label))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let bert_config = Config {
            vocab_size: config_json["vocab_size"].as_u64().unwrap_or(30522) as usize,
            hidden_size: config_json["hidden_size"].as_u64().unwrap_or(768) as usize,
            num_hidden_layers: config_json["num_hidden_layers"].as_u64().unwrap_or(12) as usize,
            num_attention_heads: config_json["num_attention_heads"].as_u64().unwrap_or(12) as usize,
            intermediate_size: config_json["intermediate_size"].as_u64().unwrap_or(3072) as usize,
            hidden_act: candle_transformers::models::bert::HiddenAct::Gelu,
            hidden_dropout_prob: 0.1,
            max_position_embeddings: config_json["max_position_embeddings"].as_u64().unwrap_or(512)
                as usize,
            type_vocab_size: 2,
            initializer_range: 0.02,
            layer_norm_eps: 1e-12,
            pad_token_id: 0,
            position_embedding_type:
                candle_transformers::models::bert::PositionEmbeddingType::Absolute,
            use_cache: true,
            classifier_dropout: None,
            model_type: Some("bert".to_string()),
        };

        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| NerError::Download(format!("tokenizer.json: {e}")))?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| NerError::Tokenization(e.to_string()))?;

        let weights_path = repo
            .get("model.safetensors")
            .or_else(|_| repo.get("pytorch_model.bin"))
            .map_err(|e| NerError::Download(format!("model weights: {e}")))?;

        Ok((bert_config, tokenizer, weights_path, label_map))
    }

    /// Extract entity spans from text, in document order.
    pub fn extract(&self, text: &str) -> Result<Vec<NerSpan>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| NerError::Tokenization(e.to_string()))?;
        if encoding.get_ids().is_empty() {
            return Ok(Vec::new());
        }

        let input_ids: Vec<i64> = encoding
            .get_ids()
            .iter()
            .take(self.config.max_length)
            .map(|&id| id as i64)
            .collect();
        let seq_len = input_ids.len();

        let input_ids_tensor = Tensor::new(&input_ids[..], &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::zeros((1, seq_len), DType::I64, &self.device)?;
        let attention_mask = Tensor::ones((1, seq_len), DType::F32, &self.device)?;

        // [1, seq, hidden] -> [seq, num_labels]
        let hidden_states =
            self.model
                .forward(&input_ids_tensor, &token_type_ids, Some(&attention_mask))?;
        let (batch, seq, hidden) = hidden_states.dims3()?;
        let logits = hidden_states
            .reshape((batch * seq, hidden))?
            .matmul(&self.classifier.t()?)?;
        let num_labels = self.classifier.dim(0)?;
        let probs = candle_nn::ops::softmax(&logits.reshape((seq, num_labels))?, 1)?;
        let preds = probs.argmax(1)?.to_dtype(DType::I64)?.to_vec1::<i64>()?;

        let spans = self.collect_spans(&encoding, &preds, &probs, text);
        debug!("Extracted {} spans from {} tokens", spans.len(), seq_len);
        Ok(spans)
    }

    /// Merge BIO-tagged tokens into contiguous spans.
    fn collect_spans(
        &self,
        encoding: &tokenizers::Encoding,
        preds: &[i64],
        probs: &Tensor,
        text: &str,
    ) -> Vec<NerSpan> {
        let tokens = encoding.get_tokens();
        let offsets = encoding.get_offsets();

        let mut spans = Vec::new();
        // (label kind, byte start, byte end, running score)
        let mut open: Option<(String, usize, usize, f32)> = None;

        for (i, &pred) in preds.iter().enumerate() {
            if i >= offsets.len() {
                break;
            }
            let token = tokens[i].as_str();
            // Special tokens ([CLS], [SEP], [PAD]) never carry entity text.
            if token.starts_with('[') && token.ends_with(']') {
                continue;
            }

            let label = self.label_map.get(&pred).map(String::as_str).unwrap_or("O");
            let score = probs
                .get(i)
                .ok()
                .and_then(|row| row.get(pred as usize).ok())
                .and_then(|t| t.to_scalar::<f32>().ok())
                .unwrap_or(0.0);
            let (start, end) = offsets[i];

            // Subword pieces extend whatever span is open.
            if token.starts_with("##") {
                if let Some((_, _, open_end, open_score)) = open.as_mut() {
                    *open_end = end;
                    *open_score = (*open_score + score) / 2.0;
                }
                continue;
            }

            let kind = label.trim_start_matches("B-").trim_start_matches("I-");
            let continues = label.starts_with("I-")
                && open.as_ref().is_some_and(|(open_kind, ..)| open_kind == kind);

            if continues {
                if let Some((_, _, open_end, open_score)) = open.as_mut() {
                    *open_end = end;
                    *open_score = (*open_score + score) / 2.0;
                }
            } else {
                if let Some(finished) = open.take() {
                    push_span(&mut spans, finished, text);
                }
                if label.starts_with("B-") || label.starts_with("I-") {
                    open = Some((kind.to_string(), start, end, score));
                }
            }
        }

        if let Some(finished) = open.take() {
            push_span(&mut spans, finished, text);
        }

        spans
    }
}

fn push_span(
    spans: &mut Vec<NerSpan>,
    (kind, start, end, score): (String, usize, usize, f32),
    text: &str,
) {
    if start >= end {
        return;
    }
    let Some(slice) = text.get(start..end) else {
        return;
    };
    spans.push(NerSpan {
        text: slice.to_string(),
        category: normalize_label(&kind),
        start,
        end,
        score,
    });
}

/// Model-based extraction strategy sharing the process-wide [`NerModel`].
pub struct ModelExtractor {
    model: Arc<NerModel>,
    max_chars: usize,
}

impl ModelExtractor {
    /// Construct against the process-wide model, initializing it on first
    /// use. A failed load is a hard error; extraction is never silently
    /// disabled.
    pub async fn new(config: NerConfig) -> Result<Self> {
        let max_chars = config.max_chars;
        let model = NerModel::global(config).await?;
        Ok(Self { model, max_chars })
    }
}

impl EntityExtractor for ModelExtractor {
    fn extract_entities(&self, text: &str) -> Result<EntityBundle> {
        let prefix: String = text.chars().take(self.max_chars).collect();
        let spans = self.model.extract(&prefix)?;

        let mut bundle = EntityBundle::default();
        for span in spans {
            let field = match span.category {
                EntityCategory::Party => &mut bundle.parties,
                EntityCategory::Date => &mut bundle.dates,
                EntityCategory::Amount => &mut bundle.amounts,
                EntityCategory::Jurisdiction => &mut bundle.jurisdiction,
                EntityCategory::Other => continue,
            };
            if field.len() < MAX_ENTITIES_PER_FIELD {
                field.push(span.text);
            }
        }
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NerConfig::default();
        assert!(!config.model_id.is_empty());
        assert_eq!(config.max_length, 512);
        assert_eq!(config.max_chars, 5000);
        assert!(config.load_timeout > Duration::ZERO);
    }

    #[test]
    fn test_push_span_rejects_bad_ranges() {
        let text = "Acme Corp";
        let mut spans = Vec::new();
        push_span(&mut spans, ("ORG".to_string(), 5, 5, 0.9), text);
        push_span(&mut spans, ("ORG".to_string(), 0, 999, 0.9), text);
        assert!(spans.is_empty());

        push_span(&mut spans, ("ORG".to_string(), 0, 9, 0.9), text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Acme Corp");
        assert_eq!(spans[0].category, EntityCategory::Party);
    }
}
