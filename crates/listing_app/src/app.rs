use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use listing_core::ListingStats;
use listing_engine::{
    decode_snapshot, encode_snapshot, AtomicFileWriter, DecodedSnapshot, EngineConfig,
    EngineHandle, ListingDocument, ListingEngine, PageLayout, SettingsStore,
};
use listing_logging::{listing_info, listing_warn};

use crate::cli::Cli;
use crate::persistence::FileSettingsStore;

pub(crate) async fn run_app(cli: Cli) -> Result<ListingStats> {
    let config = match &cli.layout {
        Some(path) => EngineConfig::with_layout(load_layout(path)?),
        None => EngineConfig::default(),
    };
    let layout = config
        .layout
        .compile()
        .context("page layout has an invalid selector")?;

    let snapshot = read_snapshot(&cli.page)?;
    let document = ListingDocument::parse(&snapshot.html, Arc::new(layout));
    if !document.has_container() {
        listing_warn!("no listing container found in {:?}", cli.page);
    }
    let engine = ListingEngine::new(document, config.now.clone());

    let store = FileSettingsStore::new(&cli.settings);
    let handle = EngineHandle::start(engine, &store, config.debounce).await;

    if cli.has_overrides() {
        let settings = cli.merge_into(store.get().await);
        store.set(settings).await;
        let response = handle.apply_settings(settings).await;
        if !response.success {
            anyhow::bail!("engine rejected settings {:?}", settings);
        }
    }

    for batch in &cli.batches {
        let markup = read_snapshot(batch)?;
        let inserted = handle
            .insert_markup(markup.html)
            .await
            .context("engine stopped while loading more items")?;
        listing_info!("appended {} items from {:?}", inserted, batch);
    }
    handle
        .settle()
        .await
        .context("engine stopped before the last pass")?;

    let stats = handle.stats().await.context("engine stopped")?;

    if let Some(out) = &cli.out {
        let page = handle
            .snapshot_html()
            .await
            .context("engine stopped before the page was written")?;
        // Keep the page's own encoding so its charset declaration stays true.
        let bytes = encode_snapshot(&page, &snapshot.encoding_label);
        let written = AtomicFileWriter::new()
            .write(out, bytes)
            .with_context(|| format!("failed to write {}", out.display()))?;
        listing_info!("wrote reordered page to {:?}", written);
    }

    Ok(stats)
}

fn read_snapshot(path: &Path) -> Result<DecodedSnapshot> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let decoded = decode_snapshot(&bytes, None)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    listing_info!("read {:?} as {}", path, decoded.encoding_label);
    Ok(decoded)
}

fn load_layout(path: &Path) -> Result<PageLayout> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("failed to parse layout {}", path.display()))
}
