use std::path::{Path, PathBuf};

use clap::Subcommand;
use timelane_core::{assign_lanes, content_height, day_marks, lane_top, month_marks};

#[derive(Subcommand)]
pub enum ViewAction {
    /// Pixel rectangles for every item in a window
    Rects {
        /// Path to a JSON array of items
        #[arg(long)]
        items: PathBuf,
        /// Window start (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        from: String,
        /// Window end, exclusive (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        to: String,
        /// Pixel density
        #[arg(long, default_value_t = 120.0)]
        px_per_day: f64,
    },
    /// Day cells inside a window
    Days {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = 120.0)]
        px_per_day: f64,
    },
    /// Month groups inside a window
    Months {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long, default_value_t = 120.0)]
        px_per_day: f64,
    },
}

pub fn run(action: ViewAction, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    match action {
        ViewAction::Rects {
            items,
            from,
            to,
            px_per_day,
        } => {
            let items = super::load_items(&items)?;
            let view = super::build_window(&from, &to, px_per_day)?;
            let layout = assign_lanes(&items);

            let rects: Vec<_> = items
                .iter()
                .map(|item| {
                    let rect = view.span_rect(&item.span);
                    let lane = layout.lane_of(&item.id).unwrap_or(0);
                    serde_json::json!({
                        "id": item.id,
                        "lane": lane,
                        "left": rect.left,
                        "width": rect.width,
                        "top": lane_top(lane, &config.lane),
                        "height": config.lane.lane_height_px,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "width": view.width_px(),
                "height": content_height(layout.lane_count(), &config.lane),
                "rects": rects,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ViewAction::Days {
            from,
            to,
            px_per_day,
        } => {
            let view = super::build_window(&from, &to, px_per_day)?;
            println!("{}", serde_json::to_string_pretty(&day_marks(&view))?);
        }
        ViewAction::Months {
            from,
            to,
            px_per_day,
        } => {
            let view = super::build_window(&from, &to, px_per_day)?;
            println!("{}", serde_json::to_string_pretty(&month_marks(&view))?);
        }
    }
    Ok(())
}
