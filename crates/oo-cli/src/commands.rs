use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use oo_core::{merge, MergeOptions, Object};

use crate::cli::*;
use crate::scene::Scene;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::List(args) => cmd_list(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Chain(args) => cmd_chain(args),
        Command::Merge(args) => cmd_merge(args),
    }
}

fn load_scene(path: &Path) -> anyhow::Result<Scene> {
    Scene::load(path).with_context(|| format!("failed to load scene {}", path.display()))
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    if scene.is_empty() {
        println!("Scene is empty.");
        return Ok(());
    }
    println!("{} object(s)", scene.len().to_string().bold());
    for name in scene.names() {
        let obj = scene.get(name)?;
        let proto = obj
            .prototype()
            .map(|p| display_name(&scene, &p))
            .unwrap_or_else(|| "-".into());
        println!(
            "  {}  {} own key(s), prototype {}",
            name.cyan(),
            obj.len(),
            proto.yellow()
        );
    }
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    match resolve_key(&scene, &args.object, &args.key)? {
        Some(found) => println!(
            "{} = {}  {} {}",
            args.key.bold(),
            found.value,
            "from".dimmed(),
            found.owner.cyan()
        ),
        None => println!("{} is {}", args.key.bold(), "undefined".yellow()),
    }
    Ok(())
}

fn cmd_chain(args: ChainArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let names = chain_names(&scene, &args.object)?;
    println!("{}", names.join(&format!(" {} ", "->".dimmed())));
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let options = merge_options(args.config.as_deref(), args.own_only, args.keep_absent)?;
    let merged = merge_named(&scene, &args.target, &args.sources, &options)?;
    let json = merged.to_json(false)?;
    println!(
        "{} merged {} source(s) into {}",
        "✓".green().bold(),
        args.sources.len(),
        args.target.yellow()
    );
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// A resolved key and the scene object that defines it.
#[derive(Debug, PartialEq)]
pub struct Resolution {
    pub value: String,
    pub owner: String,
}

pub fn resolve_key(scene: &Scene, object: &str, key: &str) -> anyhow::Result<Option<Resolution>> {
    let obj = scene.get(object)?;
    let Some((value, owner)) = obj.resolve_with_owner(key) else {
        return Ok(None);
    };
    Ok(Some(Resolution {
        value: value.to_json()?.to_string(),
        owner: display_name(scene, &owner),
    }))
}

/// The object followed by its uber chain, by scene name.
pub fn chain_names(scene: &Scene, object: &str) -> anyhow::Result<Vec<String>> {
    let obj = scene.get(object)?;
    let mut names = vec![object.to_string()];
    names.extend(obj.uber_chain().iter().map(|o| display_name(scene, o)));
    Ok(names)
}

pub fn merge_options(
    config: Option<&Path>,
    own_only: bool,
    keep_absent: bool,
) -> anyhow::Result<MergeOptions> {
    let mut options = match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            MergeOptions::from_toml_str(&text)?
        }
        None => MergeOptions::default(),
    };
    if own_only {
        options.inherited_keys_included = false;
    }
    if keep_absent {
        options.skip_absent = false;
    }
    Ok(options)
}

pub fn merge_named(
    scene: &Scene,
    target: &str,
    sources: &[String],
    options: &MergeOptions,
) -> anyhow::Result<Object> {
    let target = scene.get(target)?;
    let sources = sources
        .iter()
        .map(|name| scene.get(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge(target, &sources, options))
}

fn display_name(scene: &Scene, obj: &Object) -> String {
    scene
        .name_of(obj)
        .map(str::to_string)
        .unwrap_or_else(|| "<anonymous>".into())
}
