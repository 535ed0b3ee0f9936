use pdfvec_core::config::Config;
use pdfvec_embed::get_default_embedder;

fn main() -> anyhow::Result<()> {
    let settings = Config::load()?.settings()?;
    let embedder = get_default_embedder(&settings)?;
    for text in ["hello world", "rust embeddings"] {
        let emb = embedder.embed(text)?;
        println!("{:?}: model={} dim={} head={:?}", text, embedder.model_id(), emb.len(), &emb.as_slice()[..4]);
    }
    Ok(())
}
