//! Alter Life entry point
//!
//! Native: headless playthrough of an act against a file-backed save.
//! The browser build is driven from JS through `alter_life::web`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use alter_life::content::{ActData, Node};
    use alter_life::persistence::{FileStore, SaveSlot};
    use alter_life::{Config, NodeState, ProgressController};

    const DEMO_ACT: &str = include_str!("../demos/prologue.json");

    const USAGE: &str = "usage: alter-life [ACT_JSON] [--config PATH] [--new]";

    #[derive(Debug, Default)]
    struct Args {
        act: Option<PathBuf>,
        config: Option<PathBuf>,
        new_game: bool,
    }

    impl Args {
        fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Args::default();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--new" => parsed.new_game = true,
                    "--config" => {
                        let path = args.next().ok_or("--config needs a path")?;
                        parsed.config = Some(PathBuf::from(path));
                    }
                    "-h" | "--help" => return Err(USAGE.to_string()),
                    other if other.starts_with('-') => {
                        return Err(format!("unknown option {other}\n{USAGE}"));
                    }
                    other => parsed.act = Some(PathBuf::from(other)),
                }
            }
            Ok(parsed)
        }
    }

    /// Play one node through: pick the first option of every group,
    /// resolve the scene and complete the node
    fn play_node(game: &mut ProgressController<FileStore>, act: &ActData, node: &Node) {
        game.start_node(&node.id);

        match act.scene_for(node) {
            Some(scene) => {
                let mut step = scene.steps.first();
                // Bounded by step count so a `next` cycle cannot spin forever
                for _ in 0..scene.steps.len() {
                    let Some(current) = step else { break };
                    for group in &current.groups {
                        if let Some(choice) = group.options.first() {
                            println!("  {} -> {}", group.prompt, choice.label);
                            game.choose(choice);
                        }
                    }
                    step = scene.next_step(current);
                }
                game.resolve_scene(scene);
            }
            None => log::warn!("Node '{}' has no scene '{}'", node.id, node.scene_id),
        }

        game.complete_node(&node.id);
    }

    pub fn run() -> ExitCode {
        env_logger::init();

        let args = match Args::parse(std::env::args().skip(1)) {
            Ok(args) => args,
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        };

        let act = match &args.act {
            Some(path) => ActData::load(path),
            None => ActData::from_json_str(DEMO_ACT),
        };
        let act = match act {
            Ok(act) => act,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        };

        let config = args
            .config
            .as_deref()
            .map(Config::load)
            .unwrap_or_default();
        let slot = SaveSlot::new(FileStore::new(&config.save_dir), config.storage_key.clone());
        let mut game = ProgressController::new(slot);

        game.update_unlocked_nodes(&act.nodes);
        if args.new_game || !game.load_save() {
            game.start_new_game();
        }

        while let Some(node) = act
            .nodes
            .iter()
            .find(|node| game.node_state(node) == NodeState::Unlocked)
        {
            println!("{}", node.title);
            play_node(&mut game, &act, node);
            game.refresh_unlocked();
        }

        let state = game.state();
        println!();
        println!(
            "Completed {}/{} nodes",
            state.progress.completed.len(),
            act.nodes.len()
        );
        for (stat, value) in state.stats.iter().filter(|(_, value)| *value > 0) {
            println!("  {:<14} {:>3}", stat.name(), value);
        }
        println!("Items: {}", state.inventory.join(", "));
        println!("Achievements: {}", state.achievements.join(", "));

        ExitCode::SUCCESS
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &[&str]) -> Result<Args, String> {
            Args::parse(args.iter().map(|a| a.to_string()))
        }

        #[test]
        fn test_parse_args() {
            let args = parse(&["act.json", "--new", "--config", "c.json"]).unwrap();
            assert_eq!(args.act, Some(PathBuf::from("act.json")));
            assert_eq!(args.config, Some(PathBuf::from("c.json")));
            assert!(args.new_game);

            assert!(parse(&["--config"]).is_err());
            assert!(parse(&["--bogus"]).is_err());
        }

        #[test]
        fn test_demo_act_parses() {
            let act = ActData::from_json_str(DEMO_ACT).unwrap();
            for node in &act.nodes {
                assert!(act.scene_for(node).is_some(), "{} has no scene", node.id);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is alter_life::web::start, this is just to satisfy the compiler
}
