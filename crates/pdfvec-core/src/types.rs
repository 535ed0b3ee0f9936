//! Domain types shared by the extractor, embedder and store.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The trimmed, non-empty text of one PDF page.
///
/// `number` is 1-based and follows document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// A dense vector produced by an [`Embedder`](crate::traits::Embedder).
///
/// Stored as a JSON array literal; `to_json`/`from_json` are the only
/// serialization path used by the store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self { Self(values) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_slice(&self) -> &[f32] { &self.0 }

    /// Serialize as a JSON array. Fails on NaN or infinite components, which
    /// JSON cannot represent.
    pub fn to_json(&self) -> Result<String> {
        if let Some(i) = self.0.iter().position(|x| !x.is_finite()) {
            return Err(Error::Operation(format!("embedding component {} is not finite", i)));
        }
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self { Self(values) }
}

/// A row waiting to be written to the `Documents` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub filename: String,
    pub page: u32,
    pub text: String,
    pub embedding: Embedding,
}

/// A row read back from the `Documents` table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: i64,
    pub filename: String,
    pub page: u32,
    pub text: String,
    pub embedding: Embedding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_json_is_a_plain_array() {
        let e = Embedding::new(vec![0.5, -1.0, 0.125]);
        assert_eq!(e.to_json().unwrap(), "[0.5,-1.0,0.125]");
    }

    #[test]
    fn embedding_json_preserves_length_and_values() {
        let values: Vec<f32> = (0..384).map(|i| ((i as f32) * 0.37).sin() / 3.0).collect();
        let e = Embedding::new(values.clone());
        let back = Embedding::from_json(&e.to_json().unwrap()).unwrap();
        assert_eq!(back.len(), values.len());
        for (a, b) in back.as_slice().iter().zip(values.iter()) {
            assert!((a - b).abs() <= 1e-6, "a={a} b={b}");
        }
    }

    #[test]
    fn embedding_rejects_non_numeric_json() {
        assert!(Embedding::from_json("[\"x\"]").is_err());
        assert!(Embedding::from_json("{}").is_err());
    }

    #[test]
    fn embedding_with_non_finite_values_is_not_serialized() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let e = Embedding::new(vec![0.25, bad, 0.5]);
            assert!(matches!(e.to_json(), Err(Error::Operation(msg)) if msg.contains("component 1")));
        }
    }
}
