use crate::output::{print_json, print_table};
use bandroom_core::Rehearsal;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum RehearsalSubcommand {
    /// List a band's rehearsals, chronological
    List {
        /// Band slug
        #[arg(long)]
        band: String,
    },
}

pub fn run(root: &Path, subcommand: RehearsalSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        RehearsalSubcommand::List { band } => {
            bandroom_core::Band::load(root, &band)?;
            let rehearsals = Rehearsal::list_for_band(root, &band)?;
            if json {
                print_json(&rehearsals)?;
            } else {
                let rows = rehearsals
                    .iter()
                    .map(|r| {
                        vec![
                            r.id.to_string(),
                            r.interval.to_string(),
                            r.location.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                print_table(&["id", "when", "location"], rows);
            }
        }
    }
    Ok(())
}
