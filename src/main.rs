//! Idle Arcade entry point
//!
//! Native build: headless runner that plays one game for a fixed span of
//! simulated time and logs the HUD as the page would poll it.
//! Usage: `idle-arcade [variant] [seconds] [fps]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use idle_arcade::{AutoBuyer, FrameClock, Game, HudPoller, SimSettings, VariantKind};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = SimSettings::from_env();
    let mut args = std::env::args().skip(1);

    if let Some(name) = args.next() {
        match VariantKind::from_str(&name) {
            Some(kind) => settings.variant = kind,
            None => {
                let known: Vec<&str> = VariantKind::ALL.iter().map(|k| k.as_str()).collect();
                log::error!("Unknown game '{}'. Known games: {}", name, known.join(", "));
                std::process::exit(2);
            }
        }
    }
    if let Some(seconds) = args.next() {
        match seconds.parse::<f64>() {
            Ok(s) if s.is_finite() && s >= 0.0 => settings.run_seconds = s,
            _ => log::warn!("Ignoring bad duration '{}'", seconds),
        }
    }
    if let Some(fps) = args.next() {
        match fps.parse::<u32>() {
            Ok(f) if f > 0 => settings.fps = f,
            _ => log::warn!("Ignoring bad frame rate '{}'", fps),
        }
    }

    log::info!(
        "Idle Arcade (native) running {} for {}s at {} fps",
        settings.variant.as_str(),
        settings.run_seconds,
        settings.fps
    );

    let mut game = Game::new(settings.variant, settings.seed);
    let mut clock = FrameClock::new(settings.max_frame_dt);
    let mut poller = HudPoller::new(settings.poll_interval_ms);
    let mut buyer = AutoBuyer::default();

    // Simulated render-loop timestamps
    let frame_ms = settings.frame_dt() * 1000.0;
    let total_ms = settings.run_seconds * 1000.0;
    let mut now_ms = 0.0;
    let mut last_report_s = 0u64;

    while now_ms <= total_ms {
        let dt = clock.elapsed(now_ms);
        game.tick(dt);

        if let Some(hud) = poller.poll(now_ms, &game) {
            if settings.auto_buy {
                buyer.step(&mut game);
            }
            // One log line per simulated second is plenty
            let second = (hud.elapsed.max(0.0)) as u64;
            if second > last_report_s {
                last_report_s = second;
                log::debug!(
                    "t={:>5.1}s currency={:.1} entities={}",
                    hud.elapsed,
                    hud.currency,
                    hud.entities.len()
                );
            }
        }

        now_ms += frame_ms;
    }

    let hud = game.snapshot();
    log::info!(
        "Finished {}: currency={:.2} earned={:.2} collections={} purchases={}",
        hud.variant,
        hud.currency,
        hud.earned,
        hud.collected,
        buyer.purchases
    );
    for upgrade in &hud.upgrades {
        log::info!(
            "  {:<18} value={:>10.2} level={:>3} next cost={:.2}{}",
            upgrade.name,
            upgrade.value,
            upgrade.level,
            upgrade.cost,
            if upgrade.capped { " (max)" } else { "" }
        );
    }

    match serde_json::to_string(&hud.counts) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize entity counts: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `idle_arcade::web`, this is just to satisfy the compiler
}
