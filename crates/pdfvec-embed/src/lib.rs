use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};
use twox_hash::XxHash64;

use pdfvec_core::config::Settings;
use pdfvec_core::traits::Embedder;
use pdfvec_core::types::Embedding;

mod device;
mod pool;
mod tokenize;

pub use device::select_device;
pub use pool::masked_mean_l2;
pub use tokenize::{load_tokenizer, tokenize_on_device};

/// The only model this tool embeds with.
pub const MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";
/// Output dimensionality of [`MODEL_NAME`].
pub const MODEL_DIM: usize = 384;

const MODEL_DIR_CANDIDATES: [&str; 2] = ["models/all-MiniLM-L6-v2", "../models/all-MiniLM-L6-v2"];

#[derive(Deserialize)]
struct ModelDims { hidden_size: usize }

/// BERT sentence embedder: masked mean pooling over the last hidden state,
/// then L2 normalisation (the sentence-transformers recipe for MiniLM).
pub struct MiniLmEmbedder { model: BertModel, tokenizer: Tokenizer, device: Device, dim: usize, max_len: usize }

impl MiniLmEmbedder {
    pub fn load(model_dir: &Path, max_len: usize) -> Result<Self> {
        let device = select_device();
        info!(dir = %model_dir.display(), "Loading {} from local files", MODEL_NAME);
        let tokenizer = load_tokenizer(&model_dir.join("tokenizer.json"))?;
        let config_path = model_dir.join("config.json");
        let raw_config = std::fs::read_to_string(&config_path).with_context(|| format!("read {}", config_path.display()))?;
        let config: BertConfig = serde_json::from_str(&raw_config)?;
        let dims: ModelDims = serde_json::from_str(&raw_config)?;
        let weights = load_weights(model_dir, &device)?;
        let vb = VarBuilder::from_tensors(weights, DType::F32, &device);
        let model = BertModel::load(vb, &config)?;
        debug!(dim = dims.hidden_size, max_len, "model ready");
        Ok(Self { model, tokenizer, device, dim: dims.hidden_size, max_len })
    }

    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize_on_device(&self.tokenizer, text, self.max_len, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_l2(&hidden, &attention_mask)?;
        let emb = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1::<f32>()?;
        if emb.len() != self.dim { return Err(anyhow!("model returned {} dims, expected {}", emb.len(), self.dim)); }
        if start.elapsed().as_millis() > 500 { warn!(ms = start.elapsed().as_millis() as u64, "Slow embedding"); }
        Ok(emb)
    }
}

impl Embedder for MiniLmEmbedder {
    fn model_id(&self) -> &str { MODEL_NAME }
    fn dim(&self) -> usize { self.dim }
    fn embed(&self, text: &str) -> Result<Embedding> { self.embed_text(text).map(Embedding::from) }
}

fn load_weights(model_dir: &Path, device: &Device) -> Result<HashMap<String, Tensor>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        debug!(path = %safetensors.display(), "loading safetensors weights");
        return candle_core::safetensors::load(&safetensors, device).with_context(|| format!("load {}", safetensors.display()));
    }
    let pickle = model_dir.join("pytorch_model.bin");
    debug!(path = %pickle.display(), "loading pytorch weights");
    let weights = candle_core::pickle::read_all(&pickle).with_context(|| format!("load {}", pickle.display()))?;
    weights.into_iter().map(|(name, t)| -> Result<(String, Tensor)> { Ok((name, t.to_device(device)?)) }).collect()
}

/// Deterministic bag-of-tokens embedder used in tests and offline development.
pub struct FakeEmbedder { dim: usize }

impl FakeEmbedder { pub fn new(dim: usize) -> Self { Self { dim } } }

impl Default for FakeEmbedder { fn default() -> Self { Self::new(MODEL_DIM) } }

impl Embedder for FakeEmbedder {
    fn model_id(&self) -> &str { "fake" }
    fn dim(&self) -> usize { self.dim }
    fn embed(&self, text: &str) -> Result<Embedding> {
        let mut values = vec![0f32; self.dim];
        for (position, word) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            hasher.write(word.as_bytes());
            let digest = hasher.finish();
            let slot = (digest % self.dim as u64) as usize;
            let weight = (digest >> 40) as f32 / (1u64 << 24) as f32;
            values[slot] += weight + 0.01 * (position % 3) as f32;
        }
        let norm = values.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
        values.iter_mut().for_each(|x| *x /= norm);
        Ok(Embedding::from(values))
    }
}

/// Build the embedder selected by `settings`: the fake one when
/// `use_fake_embeddings` is set, otherwise MiniLM from the resolved model dir.
pub fn get_default_embedder(settings: &Settings) -> Result<Box<dyn Embedder>> {
    if settings.use_fake_embeddings { info!("Using FakeEmbedder"); return Ok(Box::new(FakeEmbedder::default())); }
    let dir = resolve_model_dir(settings.model_dir())?;
    Ok(Box::new(MiniLmEmbedder::load(&dir, settings.max_seq_len)?))
}

/// Configured directory first, then the conventional relative locations.
pub fn resolve_model_dir(configured: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(p) = configured {
        if p.exists() { info!("Using model_dir: {}", p.display()); return Ok(p); }
        return Err(anyhow!("Configured model_dir {} does not exist", p.display()));
    }
    for candidate in MODEL_DIR_CANDIDATES {
        let p = Path::new(candidate);
        if p.exists() { info!("Using model dir: {}", p.display()); return Ok(p.to_path_buf()); }
    }
    Err(anyhow!("Could not locate {} model directory; set APP_MODEL_DIR or place it under {}", MODEL_NAME, MODEL_DIR_CANDIDATES[0]))
}
