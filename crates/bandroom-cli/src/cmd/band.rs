use crate::output::{print_json, print_table};
use bandroom_core::Band;
use clap::Subcommand;
use std::path::Path;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum BandSubcommand {
    /// Create a new band
    Create {
        slug: String,
        /// Band name
        #[arg(long)]
        name: String,
    },
    /// List all bands
    List,
    /// Show band details and roster
    Info { slug: String },
    /// Add a member to the roster
    AddMember { slug: String, member_id: Uuid },
    /// Remove a member from the roster
    RemoveMember { slug: String, member_id: Uuid },
}

pub fn run(root: &Path, subcommand: BandSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        BandSubcommand::Create { slug, name } => {
            let band = Band::create(root, slug, name)?;
            if json {
                print_json(&band)?;
            } else {
                println!("created band '{}'", band.slug);
            }
        }
        BandSubcommand::List => {
            let bands = Band::list(root)?;
            if json {
                print_json(&bands)?;
            } else {
                let rows = bands
                    .iter()
                    .map(|b| {
                        vec![
                            b.slug.clone(),
                            b.name.clone(),
                            b.roster.len().to_string(),
                        ]
                    })
                    .collect();
                print_table(&["slug", "name", "members"], rows);
            }
        }
        BandSubcommand::Info { slug } => {
            let band = Band::load(root, &slug)?;
            if json {
                print_json(&band)?;
            } else {
                println!("{} ({})", band.name, band.slug);
                for member_id in &band.roster {
                    match bandroom_core::Member::load(root, *member_id) {
                        Ok(m) => println!("  {} {}", m.id, m.name),
                        Err(_) => println!("  {} (missing)", member_id),
                    }
                }
            }
        }
        BandSubcommand::AddMember { slug, member_id } => {
            let mut band = Band::load(root, &slug)?;
            bandroom_core::Member::load(root, member_id)?;
            band.add_member(member_id)?;
            band.save(root)?;
            println!("added {} to '{}'", member_id, band.slug);
        }
        BandSubcommand::RemoveMember { slug, member_id } => {
            let mut band = Band::load(root, &slug)?;
            band.remove_member(member_id)?;
            band.save(root)?;
            println!("removed {} from '{}'", member_id, band.slug);
        }
    }
    Ok(())
}
