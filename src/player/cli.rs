use std::io::{self, Write};
use std::net::SocketAddr;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{
    ai,
    board::Board,
    common::{CellState, ShotFeedback, ShotReport, ShotResult},
    config::GRID_SIZE,
    session::{FleetSetup, Role},
    ship::Orientation,
};

use super::{Player, ShipPlacement};

/// Interactive player reading its decisions from the terminal.
pub struct CliPlayer;

impl CliPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn coord_to_string(x: usize, y: usize) -> String {
    let col = (b'A' + x as u8) as char;
    format!("{}{}", col, y + 1)
}

/// Parse a cell such as `A5` or `j10`: column letter is x, row number is y + 1.
fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let mut chars = input.trim().chars();
    let column = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
        Some(c) => return Err(format!("'{}' is not a column letter (A-J)", c)),
        None => return Err("empty coordinate, expected e.g. A5".to_string()),
    };
    let x = (column as u8 - b'A') as usize;
    if x >= GRID_SIZE {
        return Err(format!("column {} is off the board (A-J)", column));
    }
    let rest = chars.as_str();
    match rest.parse::<usize>() {
        Ok(row) if (1..=GRID_SIZE).contains(&row) => Ok((x, row - 1)),
        Ok(row) => Err(format!("row {} is off the board (1-10)", row)),
        Err(_) => Err(format!("'{}' is not a row number (1-10)", rest)),
    }
}

/// Prompt and read one trimmed line. EOF or a read error yields "".
fn prompt(text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn print_board(title: &str, board: &Board, reveal: bool) {
    println!("{}", title);
    print!("     ");
    for x in 0..GRID_SIZE {
        print!(" {}", (b'A' + x as u8) as char);
    }
    println!();
    for y in 0..GRID_SIZE {
        print!("  {:2} ", y + 1);
        for x in 0..GRID_SIZE {
            let ch = match board.cell(x, y).unwrap_or(CellState::Empty) {
                CellState::Hit => 'X',
                CellState::Miss => 'o',
                CellState::Ship if reveal => 'S',
                _ => '.',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

impl Player for CliPlayer {
    fn fleet_setup(&mut self) -> FleetSetup {
        let answer = prompt("\nPlace ships randomly? [Y/n]: ");
        if answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("no") {
            FleetSetup::Manual
        } else {
            FleetSetup::Random
        }
    }

    fn place_ship(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        missing: &[usize],
    ) -> Option<ShipPlacement> {
        let length = *missing.first()?;
        loop {
            print_board("\nYour board:", board, true);
            println!("Ships left to place: {:?}", missing);
            let line = prompt(&format!(
                "Ship of length {}: enter e.g. A5 H or A5 V (ENTER = random, 'reset' = start over): ",
                length
            ));

            if line.is_empty() {
                let orientation = if rng.random_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                return Some(ShipPlacement {
                    x: rng.random_range(0..GRID_SIZE),
                    y: rng.random_range(0..GRID_SIZE),
                    length,
                    orientation,
                });
            }
            if line.eq_ignore_ascii_case("reset") {
                return None;
            }

            let mut parts = line.split_whitespace();
            let (x, y) = match parts.next().map(parse_coord) {
                Some(Ok(coord)) => coord,
                Some(Err(e)) => {
                    println!("✗ Error: {}", e);
                    continue;
                }
                None => continue,
            };
            let orientation = match parts.next().and_then(|s| s.chars().next()) {
                None | Some('h') | Some('H') => Orientation::Horizontal,
                Some('v') | Some('V') => Orientation::Vertical,
                Some(other) => {
                    println!("✗ Error: Invalid orientation '{}' - use H or V", other);
                    continue;
                }
            };
            return Some(ShipPlacement {
                x,
                y,
                length,
                orientation,
            });
        }
    }

    fn select_target(&mut self, rng: &mut SmallRng, enemy: &Board) -> (usize, usize) {
        let suggestion = ai::pick_target(enemy, rng).unwrap_or((0, 0));
        print_board("\nOpponent board:", enemy, false);
        loop {
            let line = prompt(&format!(
                "Enter target [suggested: {}]: ",
                coord_to_string(suggestion.0, suggestion.1)
            ));
            if line.is_empty() {
                return suggestion;
            }
            match parse_coord(&line) {
                Ok((x, y)) => {
                    if enemy.cell(x, y).map_or(false, CellState::is_decided) {
                        println!("✗ This cell has already been attacked. Choose another target.");
                        continue;
                    }
                    return (x, y);
                }
                Err(e) => {
                    println!("✗ Invalid coordinate: {}", e);
                    println!("   Example: A5, B10, J1");
                }
            }
        }
    }

    fn wants_replay(&mut self, won: bool) -> bool {
        let verdict = if won { "You won this round." } else { "You lost this round." };
        let answer = prompt(&format!(
            "{} Play another round on this connection? [y/N]: ",
            verdict
        ));
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }

    fn handle_listening(&mut self, addr: SocketAddr) {
        println!("Waiting for the other player on port {}...", addr.port());
    }

    fn handle_connected(&mut self, role: Role) {
        match role {
            Role::Host => println!("Connected - you are the host. You fire first."),
            Role::Client => println!("Connected - you are the client. Wait for your turn."),
        }
    }

    fn handle_placement_rejected(&mut self, placement: ShipPlacement) {
        println!(
            "✗ Cannot place a ship of length {} at {}: ships must fit on the board and must not touch.",
            placement.length,
            coord_to_string(placement.x, placement.y)
        );
    }

    fn handle_shot_result(&mut self, coord: (usize, usize), result: ShotResult, _feedback: ShotFeedback) {
        let at = coord_to_string(coord.0, coord.1);
        match result {
            ShotResult::Hit | ShotResult::Win => println!("HIT! Your shot at {} struck an enemy ship.", at),
            ShotResult::Miss => println!("Miss. Your shot at {} hit only water.", at),
        }
    }

    fn handle_enemy_shot(&mut self, coord: (usize, usize), report: &ShotReport, own: &Board) {
        let at = coord_to_string(coord.0, coord.1);
        if report.hit {
            println!("Enemy HIT your ship at {}.", at);
        } else {
            println!("Enemy fired at {} and missed.", at);
        }
        if let Some(len) = report.destroyed_ship {
            println!("One of your ships of length {} was destroyed!", len);
        }
        print_board("\nYour board:", own, true);
    }

    fn handle_enemy_ship_destroyed(&mut self, length: usize) {
        println!("You destroyed an enemy ship of length {}!", length);
    }

    fn handle_round_over(&mut self, won: bool) {
        if won {
            println!("\nVICTORY! You have sunk the whole enemy fleet.");
        } else {
            println!("\nDEFEAT. All your ships have been destroyed.");
        }
    }

    fn handle_round_start(&mut self, own: &Board) {
        println!("\nThe round begins.");
        print_board("Your board:", own, true);
    }
}
