use anyhow::{Result, anyhow};
use candle_core::{Device, Tensor};
use std::path::Path;
use tokenizers::Tokenizer;

/// Load `tokenizer.json` with its own padding and truncation turned off, so
/// the `max_len` passed to [`tokenize_on_device`] is the only length limit.
pub fn load_tokenizer(path: &Path) -> Result<Tokenizer> {
    let mut tokenizer = Tokenizer::from_file(path)
        .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", path.display(), e))?;
    tokenizer
        .with_padding(None)
        .with_truncation(None)
        .map_err(|e| anyhow!("Failed to reset truncation for {}: {}", path.display(), e))?;
    Ok(tokenizer)
}

/// Encode a single text into `[1, T]` id and mask tensors, truncated to `max_len` tokens.
pub fn tokenize_on_device(tokenizer: &Tokenizer, text: &str, max_len: usize, device: &Device) -> Result<(Tensor, Tensor)> {
    let enc = tokenizer.encode(text, true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
    let mut ids = enc.get_ids().to_vec();
    let mut mask = enc.get_attention_mask().to_vec();
    if ids.len() > max_len { ids.truncate(max_len); mask.truncate(max_len); }
    if ids.is_empty() { return Err(anyhow!("Tokenization produced no tokens")); }
    let len = ids.len();
    let input_ids = Tensor::from_iter(ids, device)?.reshape((1, len))?;
    let attention_mask = Tensor::from_iter(mask, device)?.reshape((1, len))?;
    Ok((input_ids, attention_mask))
}
