use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_LINK: i32 = 4;
const EXIT_OUTPUT: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Team standings by rank (default if no subcommand)
    Standings,
    /// Events with their scoring ceilings
    Events,
    /// Per-event breakdown for one team
    Team {
        /// Team number as listed in the results file
        number: u32,
    },
}

#[derive(Parser, Debug)]
#[command(name = "sciolyff")]
#[command(about = "Score Science Olympiad tournament results", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print standings as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to the results file (YAML)
    file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Standings);
    let start_time = Instant::now();

    let rep = match sciolyff::load_rep(&cli.file) {
        Ok(rep) => rep,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} events, {} teams, {} placings, {} penalties from {}",
            rep.events.len(),
            rep.teams.len(),
            rep.placings.len(),
            rep.penalties.len(),
            cli.file.display()
        );
    }

    let interpreter = match sciolyff::Interpreter::new(rep) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Link error: {}", e);
            std::process::exit(EXIT_LINK);
        }
    };

    if cli.verbose {
        let tournament = interpreter.tournament();
        eprintln!("Linked in {:?}", start_time.elapsed());
        eprintln!(
            "  {} non-exhibition teams, maximum place {}{}",
            tournament.nonexhibition_teams_count(),
            tournament.maximum_place(),
            if tournament.custom_maximum_place() {
                " (custom)"
            } else {
                ""
            }
        );
        eprintln!(
            "  medals {}, trophies {}, worst placings dropped {}",
            tournament.medals(),
            tournament.trophies(),
            tournament.worst_placings_dropped()
        );
        if tournament.ties_outside_of_maximum_places() {
            eprintln!("  ties present outside of maximum places");
        }
    }

    let use_colors = sciolyff::output::should_use_colors();

    match command {
        Commands::Standings => {
            if cli.json {
                match sciolyff::output::format_standings_json(&interpreter) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Failed to serialize standings: {}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                }
            } else {
                println!(
                    "{}",
                    sciolyff::output::format_standings_table(&interpreter, use_colors)
                );
            }
        }
        Commands::Events => {
            println!(
                "{}",
                sciolyff::output::format_events_table(&interpreter, use_colors)
            );
        }
        Commands::Team { number } => {
            let Some(team) = interpreter.team(number) else {
                eprintln!("No team numbered {} in {}", number, cli.file.display());
                std::process::exit(EXIT_INPUT);
            };
            println!(
                "{}",
                sciolyff::output::format_team_detail(team, use_colors)
            );
        }
    }

    if cli.verbose {
        eprintln!();
        eprintln!("Done in {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
