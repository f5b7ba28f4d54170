use std::env;
use std::io::{self, BufRead};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use workouts::models::{Coordinates, EditField, WorkoutKind};
use workouts::persistence::FileSlotStore;
use workouts::session::{FormInput, Session};
use workouts::views::{FormView, ListView, MapView, WorkoutRow};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

/// Console stand-ins for the map, form, and list collaborators.
struct ConsoleMap;

impl MapView for ConsoleMap {
    fn render_marker(&mut self, id: Uuid, coords: Coordinates, popup: &str, kind: WorkoutKind) {
        println!(
            "[map] {} marker {id} at ({:.4}, {:.4}): {popup}",
            kind.label(),
            coords.lat,
            coords.lng
        );
    }

    fn remove_marker(&mut self, id: Uuid) {
        println!("[map] removed marker {id}");
    }

    fn pan_to(&mut self, coords: Coordinates, zoom: u8) {
        println!("[map] panned to ({:.4}, {:.4}) zoom {zoom}", coords.lat, coords.lng);
    }

    fn clear_markers(&mut self) {
        println!("[map] cleared all markers");
    }
}

struct ConsoleForm;

impl FormView for ConsoleForm {
    fn show(&mut self) {
        println!("[form] open: add <running|cycling> <distance-km> <duration-min> <cadence|elevation>");
    }

    fn hide_and_clear(&mut self) {
        println!("[form] closed");
    }

    fn report_error(&mut self, message: &str) {
        println!("[form] {message}");
    }
}

struct ConsoleList;

impl ListView for ConsoleList {
    fn render_row(&mut self, row: &WorkoutRow) {
        print_row(row);
    }

    fn update_row(&mut self, row: &WorkoutRow) {
        print_row(row);
    }

    fn remove_row(&mut self, id: Uuid) {
        println!("[list] removed {id}");
    }

    fn clear(&mut self) {
        println!("[list] cleared");
    }
}

fn print_row(row: &WorkoutRow) {
    let metrics: Vec<String> = row
        .metrics
        .iter()
        .map(|m| format!("{} {} {}", m.field.as_str(), m.value, m.unit))
        .collect();
    println!("[list] {} | {} | {}", row.id, row.title, metrics.join(", "));
}

type ConsoleSession = Session<FileSlotStore, ConsoleMap, ConsoleList, ConsoleForm>;

fn main() -> anyhow::Result<()> {
    init_logging();

    let data_dir = env::var("WORKOUTS_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let slots = FileSlotStore::new(&data_dir)?;

    let mut session = Session::new(slots, ConsoleMap, ConsoleList, ConsoleForm);
    session.start()?;

    println!(
        "workout log ready, {} workout(s) restored. Type 'help' for commands.",
        session.workouts().len()
    );

    for line in io::stdin().lock().lines() {
        let line = line?;
        if !run_command(&mut session, line.trim()) {
            break;
        }
    }

    Ok(())
}

fn run_command(session: &mut ConsoleSession, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let result = match parts.as_slice() {
        [] => Ok(()),
        ["quit"] | ["exit"] => return false,
        ["help"] => {
            print_help();
            Ok(())
        }
        ["click", lat, lng] => match (lat.parse(), lng.parse()) {
            (Ok(lat), Ok(lng)) => {
                session.map_clicked(Coordinates::new(lat, lng));
                Ok(())
            }
            _ => {
                println!("usage: click <lat> <lng>");
                Ok(())
            }
        },
        ["add", kind, distance, duration, extra] => session.submit_form(FormInput {
            kind: kind.to_string(),
            distance: distance.to_string(),
            duration: duration.to_string(),
            cadence: extra.to_string(),
            elevation_gain: extra.to_string(),
        }),
        ["cancel"] => {
            session.cancel_form();
            Ok(())
        }
        ["list"] => {
            for workout in session.workouts() {
                print_row(&WorkoutRow::for_workout(workout));
            }
            Ok(())
        }
        ["edit", id, field, value] => match (Uuid::parse_str(id), EditField::parse(field)) {
            (Ok(id), Some(field)) => session.edit_field(id, field, value),
            _ => {
                println!("usage: edit <id> <distance|duration|pace|speed|cadence|elevation> <value>");
                Ok(())
            }
        },
        ["delete", id] => match Uuid::parse_str(id) {
            Ok(id) => session.delete(id),
            Err(_) => {
                println!("usage: delete <id>");
                Ok(())
            }
        },
        ["goto", id] => match Uuid::parse_str(id) {
            Ok(id) => session.focus(id),
            Err(_) => {
                println!("usage: goto <id>");
                Ok(())
            }
        },
        ["reset"] => session.reset(),
        _ => {
            println!("unknown command, try 'help'");
            Ok(())
        }
    };

    if let Err(e) = result {
        println!("error: {e}");
    }
    true
}

fn print_help() {
    println!("commands:");
    println!("  click <lat> <lng>                          pick a location (opens the form)");
    println!("  add <running|cycling> <km> <min> <extra>   submit the form (extra: cadence or elevation gain)");
    println!("  cancel                                     close the form without saving");
    println!("  list                                       show all workouts");
    println!("  edit <id> <field> <value>                  change one field of a workout");
    println!("  delete <id>                                remove a workout");
    println!("  goto <id>                                  pan the map to a workout");
    println!("  reset                                      wipe the log and its persisted state");
    println!("  quit                                       exit");
}
