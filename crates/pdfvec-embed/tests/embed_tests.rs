use pdfvec_core::config::Settings;
use pdfvec_core::traits::Embedder;
use pdfvec_embed::{get_default_embedder, resolve_model_dir, FakeEmbedder, MODEL_DIM};

#[test]
fn fake_embedder_shapes_and_determinism() {
    // Force fake embedder to avoid loading large model
    let settings = Settings { use_fake_embeddings: true, ..Settings::default() };

    let embedder = get_default_embedder(&settings).expect("embedder");
    let v1 = embedder.embed("hello world").expect("embed");
    let v2 = embedder.embed("hello world").expect("embed");

    assert_eq!(v1.len(), MODEL_DIM, "embedding dim is 384");
    assert_eq!(embedder.dim(), MODEL_DIM);

    // Norm approximately 1.0
    let norm: f32 = v1.as_slice().iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.as_slice().iter().zip(v2.as_slice().iter()) { assert!((a - b).abs() <= 1e-6); }
}

#[test]
fn fake_embedder_distinguishes_texts() {
    let embedder = FakeEmbedder::new(64);
    let a = embedder.embed("the quick brown fox").unwrap();
    let b = embedder.embed("lorem ipsum dolor sit").unwrap();
    assert_eq!(a.len(), 64);
    assert_ne!(a, b);
}

#[test]
fn configured_model_dir_must_exist() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope");
    assert!(resolve_model_dir(Some(missing)).is_err());
    let found = resolve_model_dir(Some(tmp.path().to_path_buf())).unwrap();
    assert_eq!(found, tmp.path());
}

#[test]
fn missing_model_files_fail_to_load() {
    let tmp = tempfile::tempdir().unwrap();
    let settings = Settings { model_dir: Some(tmp.path().to_string_lossy().to_string()), ..Settings::default() };
    assert!(get_default_embedder(&settings).is_err(), "empty dir has no tokenizer.json");
}
