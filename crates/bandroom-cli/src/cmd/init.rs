use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = bandroom_core::config::init(root)?;
    if json {
        print_json(&config)?;
    } else {
        println!("initialized .bandroom/ at {}", root.display());
        println!("default policy: {:?}", config.default_policy);
    }
    Ok(())
}
