use crate::output::{print_json, print_table};
use bandroom_core::Member;
use clap::Subcommand;
use std::path::Path;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum MemberSubcommand {
    /// Create a new member
    Create {
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// List all members
    List,
    /// Show a member's availability rules
    Rules { id: Uuid },
}

pub fn run(root: &Path, subcommand: MemberSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        MemberSubcommand::Create { name, email } => {
            let mut member = Member::create(root, name)?;
            if email.is_some() {
                member.email = email;
                member.save(root)?;
            }
            if json {
                print_json(&member)?;
            } else {
                println!("created member {} ({})", member.name, member.id);
            }
        }
        MemberSubcommand::List => {
            let members = Member::list(root)?;
            if json {
                print_json(&members)?;
            } else {
                let rows = members
                    .iter()
                    .map(|m| {
                        vec![
                            m.id.to_string(),
                            m.name.clone(),
                            m.rules.len().to_string(),
                        ]
                    })
                    .collect();
                print_table(&["id", "name", "rules"], rows);
            }
        }
        MemberSubcommand::Rules { id } => {
            let member = Member::load(root, id)?;
            print_json(&member.rules)?;
        }
    }
    Ok(())
}
