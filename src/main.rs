//! Tenzies entry point
//!
//! Handles platform-specific initialization. On the web the page drives a
//! `WebTenzies` session; natively a headless game is played to completion.

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is tenzies::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> tenzies::Result<()> {
    use tenzies::audio::{AudioEngine, TraceContext};
    use tenzies::platform::MemoryStorage;
    use tenzies::TenziesApp;

    env_logger::init();
    log::info!("Tenzies (native) starting...");
    log::info!("Native mode plays one headless game - run with `trunk serve` for web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let trace = TraceContext::new();
    let ctx = trace.clone();
    let mut app = TenziesApp::new(
        Some(MemoryStorage::new()),
        AudioEngine::new(move || Ok(ctx.clone())),
        seed,
    )?;

    let target = app.game().most_common_value();
    log::info!("Collecting {}s", target);

    'game: loop {
        let matching: Vec<usize> = app
            .game()
            .dice()
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_held && d.value == target)
            .map(|(i, _)| i)
            .collect();
        for i in matching {
            if app.hold(i)? {
                break 'game;
            }
        }
        app.roll();
        trace.advance(0.5);
    }

    println!(
        "Tenzies! {} rolls (best: {})",
        app.game().rolls(),
        app.best_score().map_or("-".to_string(), |b| b.to_string())
    );
    println!("{} sounds scheduled", trace.oscillators_created());
    Ok(())
}
