use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Subcommand;
use timelane_core::assign_lanes;

#[derive(Subcommand)]
pub enum LanesAction {
    /// Assign items to lanes
    Assign {
        /// Path to a JSON array of items
        #[arg(long)]
        items: PathBuf,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: LanesAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LanesAction::Assign { items, json } => {
            let items = super::load_items(&items)?;
            let layout = assign_lanes(&items);

            if json {
                // BTreeMap for stable key order in the output.
                let lanes: BTreeMap<&str, usize> = layout.iter().collect();
                let output = serde_json::json!({
                    "lane_count": layout.lane_count(),
                    "lanes": lanes,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for lane in 0..layout.lane_count() {
                    let mut row: Vec<_> = items
                        .iter()
                        .filter(|item| layout.lane_of(&item.id) == Some(lane))
                        .collect();
                    row.sort_by_key(|item| item.span.start);
                    let cells: Vec<String> = row
                        .iter()
                        .map(|item| {
                            format!(
                                "{} [{} .. {})",
                                item.id,
                                item.span.start.format("%Y-%m-%d %H:%M"),
                                item.span.end.format("%Y-%m-%d %H:%M"),
                            )
                        })
                        .collect();
                    println!("lane {lane}: {}", cells.join(", "));
                }
                println!("{} items in {} lanes", items.len(), layout.lane_count());
            }
        }
    }
    Ok(())
}
