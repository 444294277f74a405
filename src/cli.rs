use std::path::Path;

use crate::config::Config;
use crate::data::data_registry::GameData;
use crate::data::faction::Faction;
use crate::data::loader::GameDataLoader;
use crate::error::ApiError;
use crate::explorer::{export_squad_costs, squad_total_cost};
use crate::server::{self, api};

const USAGE: &str =
    "usage: coh3-explorer <serve|squads <faction> [--table]|squad <id>|buildings <faction>|export <out.csv>|diagnostics>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Squads,
    Squad,
    Buildings,
    Export,
    Diagnostics,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("squads") => Some(Command::Squads),
        Some("squad") => Some(Command::Squad),
        Some("buildings") => Some(Command::Buildings),
        Some("export") => Some(Command::Export),
        Some("diagnostics") => Some(Command::Diagnostics),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    let Some(command) = parse_command(args) else {
        eprintln!("{USAGE}");
        return 2;
    };
    let operand = args.get(2).filter(|arg| !arg.starts_with("--")).map(String::as_str);
    if command != Command::Serve && command != Command::Diagnostics && operand.is_none() {
        eprintln!("{USAGE}");
        return 2;
    }
    if matches!(command, Command::Squads | Command::Buildings)
        && operand.and_then(Faction::parse).is_none()
    {
        eprintln!("unknown faction '{}'", operand.unwrap_or_default());
        return 2;
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };

    if command == Command::Serve {
        return match runtime.block_on(server::run_server(&config)) {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("server error: {err}");
                1
            }
        };
    }

    let loader = GameDataLoader::new(config.snapshot_source());
    let data = match runtime.block_on(loader.initialize()) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("failed to load game data: {err}");
            return 1;
        }
    };

    let operand = operand.unwrap_or_default();
    let as_table = args.iter().any(|arg| arg == "--table");
    match command {
        Command::Squads if as_table => print_squad_table(&data, operand),
        Command::Squads => print_payload(api::faction_squads_payload(&data, operand)),
        Command::Squad => print_payload(api::squad_payload(&data, operand)),
        Command::Buildings => print_payload(api::faction_buildings_payload(&data, operand)),
        Command::Diagnostics => print_payload(api::diagnostics_payload(&data)),
        Command::Export => handle_export(&data, Path::new(operand)),
        Command::Serve => 0,
    }
}

fn print_payload(result: Result<String, ApiError>) -> i32 {
    match result {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn print_squad_table(data: &GameData, faction: &str) -> i32 {
    let Some(faction) = Faction::parse(faction) else {
        eprintln!("unknown faction '{faction}'");
        return 2;
    };
    println!("id\tunit_type\tmanpower\tmunition\tfuel\tpopcap\ttime");
    for squad in data.squads_for(faction) {
        let cost = squad_total_cost(squad, data.entities()).value;
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            squad.id, squad.unit_type, cost.manpower, cost.munition, cost.fuel, cost.popcap, cost.time
        );
    }
    0
}

fn handle_export(data: &GameData, path: &Path) -> i32 {
    match export_squad_costs(data, path) {
        Ok(rows) => {
            println!("exported {rows} squad(s) to {}", path.display());
            0
        }
        Err(err) => {
            eprintln!("export failed: {err}");
            1
        }
    }
}
