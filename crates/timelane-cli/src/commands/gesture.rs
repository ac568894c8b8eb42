use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Deserialize;
use timelane_core::{Event, GestureSession, HitZone, TimelineItem, ViewWindow};

/// One pointer sample in a replay script.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PointerSample {
    /// Pointer-down on an item. When `zone` is omitted it is derived from
    /// the item's rectangle and the configured handle margin.
    Down {
        item_id: String,
        x: f64,
        #[serde(default)]
        zone: Option<HitZone>,
    },
    Move {
        x: f64,
    },
    Up,
    Cancel,
}

#[derive(Subcommand)]
pub enum GestureAction {
    /// Replay a pointer script against an item set
    Replay {
        /// Path to a JSON array of items
        #[arg(long)]
        items: PathBuf,
        /// Path to a JSON array of pointer samples
        #[arg(long)]
        script: PathBuf,
        /// Window start (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Window end, exclusive (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Pixel density
        #[arg(long, default_value_t = 120.0)]
        px_per_day: f64,
        /// Print the item list after applying commits, instead of events
        #[arg(long)]
        final_items: bool,
    },
}

pub fn run(action: GestureAction, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        GestureAction::Replay {
            items,
            script,
            from,
            to,
            px_per_day,
            final_items,
        } => {
            let config = super::load_config(config_path)?;
            let mut items = super::load_items(&items)?;
            let view = super::build_window(&from, &to, px_per_day)?;
            let script: Vec<PointerSample> =
                serde_json::from_str(&std::fs::read_to_string(&script)?)?;

            let mut session = GestureSession::from_config(&config);
            let mut events = Vec::new();

            for sample in script {
                let event = match sample {
                    PointerSample::Down { item_id, x, zone } => {
                        let zone = zone.or_else(|| {
                            hit_zone_at(&items, &item_id, &view, x, config.handle_margin_px)
                        });
                        match zone {
                            Some(zone) => session.pointer_down(&items, &item_id, x, zone),
                            None => {
                                tracing::debug!(
                                    item_id = %item_id,
                                    x,
                                    "pointer-down missed the item rectangle"
                                );
                                None
                            }
                        }
                    }
                    PointerSample::Move { x } => session.pointer_move(&view, x),
                    PointerSample::Up => session.pointer_up(),
                    PointerSample::Cancel => session.cancel(),
                };
                if let Some(event) = event {
                    if let Event::SpanCommitted { item_id, span, .. } = &event {
                        // Merge the commit so later gestures in the script
                        // see the updated span.
                        if let Some(item) = items.iter_mut().find(|item| &item.id == item_id) {
                            item.span = *span;
                        }
                    }
                    events.push(event);
                }
            }

            if final_items {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&events)?);
            }
        }
    }
    Ok(())
}

/// Zone of a pointer offset within an item's current rectangle.
fn hit_zone_at(
    items: &[TimelineItem],
    id: &str,
    view: &ViewWindow,
    x: f64,
    margin_px: f64,
) -> Option<HitZone> {
    let item = items.iter().find(|item| item.id == id)?;
    view.span_rect(&item.span).hit_test(x, margin_px)
}
