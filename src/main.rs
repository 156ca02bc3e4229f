use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};

use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::*;

mod display;

fn main() -> Result<()> {
    env_logger::init();
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let first = if ask_yes_no(&stdin, "Do you want to go first? y/n: ")? {
        Side::Human
    } else {
        Side::Machine
    };
    let difficulty = ask_difficulty(&stdin)?;

    let engine = Engine::new(EngineConfig::default()).with_difficulty(difficulty);
    let mut game = Game::new(engine, first);

    loop {
        play(&stdin, &mut game)?;

        if !ask_yes_no(&stdin, "Play again? y/n: ")? {
            break;
        }
        game.reset();
    }
    Ok(())
}

fn play(stdin: &Stdin, game: &mut Game) -> Result<()> {
    loop {
        match game.state() {
            GameState::Playing => {
                if game.to_move() == Side::Machine {
                    let spinner = ProgressBar::new_spinner();
                    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
                    spinner.set_message("AI is thinking...");
                    spinner.enable_steady_tick(100);

                    let (column, _) = game.play_machine()?;

                    spinner.finish_and_clear();
                    println!("AI plays column {}", column + 1);
                    continue;
                }

                display::draw(game.board())?;
                print!("Move input > ");
                stdout().flush()?;
                let input_str = read_line(stdin)?;

                let column = match input_str.trim().parse::<usize>() {
                    Err(_) => {
                        println!("Invalid number: {}", input_str.trim());
                        continue;
                    }
                    Ok(column) => column,
                };

                if let Err(err) = game.play_human(column) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::HumanWin => {
                display::draw(game.board())?;
                println!("You win!");
                break;
            }
            GameState::MachineWin => {
                display::draw(game.board())?;
                println!("AI wins!");
                break;
            }
            GameState::Draw => {
                display::draw(game.board())?;
                println!("It's a draw!");
                break;
            }
        }
    }
    Ok(())
}

fn read_line(stdin: &Stdin) -> Result<String> {
    let mut buffer = String::new();
    if stdin.read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer)
}

fn ask_yes_no(stdin: &Stdin, prompt: &str) -> Result<bool> {
    loop {
        print!("{}", prompt);
        stdout().flush()?;

        match read_line(stdin)?.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_difficulty(stdin: &Stdin) -> Result<Difficulty> {
    loop {
        print!("Choose AI difficulty (1 easy, 2 medium, 3 hard): ");
        stdout().flush()?;

        match read_line(stdin)?.parse::<Difficulty>() {
            Ok(difficulty) => return Ok(difficulty),
            Err(err) => println!("{}", err),
        }
    }
}
