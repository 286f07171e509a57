//! CLI Spider Solitaire example.

use std::io::{self, Write};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use spider_engine::{Card, Column, Game, GameConfig, Statistics, Suit};

fn main() {
    env_logger::init();
    println!("Spider Solitaire CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let game = Game::new(seed);
    let mut stats = Statistics::default();

    let Some(suits) = prompt_suits() else {
        return;
    };
    let Ok(config) = GameConfig::default().with_suits(suits) else {
        println!("Unsupported suit count.");
        return;
    };
    game.new_game(config, None);
    stats.record_start();

    let mut clock = Instant::now();
    loop {
        game.tick(clock.elapsed().as_secs_f64());
        clock = Instant::now();

        print_table(&game);
        if game.is_won() {
            let final_score = game.final_score().unwrap_or_else(|| game.score());
            stats.record_win(final_score, game.elapsed());
            println!("You won! Final score {final_score} in {} moves.", game.moves());
            break;
        }

        println!(
            "Commands: {} {} {} {} {}",
            colorize("[m] <from> <card> <to>", "32"),
            format_command("draw", "d", game.can_draw()),
            format_command("undo", "u", game.can_undo()),
            colorize("[s]ave", "32"),
            colorize("[q]uit", "32"),
        );

        let input = prompt_line("Action: ");
        let mut words = input.split_whitespace();
        match words.next() {
            Some("m" | "move") => {
                let args: Vec<usize> = words.filter_map(|word| word.parse().ok()).collect();
                let [from, card, to] = args[..] else {
                    println!("Usage: m <from> <card> <to>");
                    continue;
                };
                match game.move_run(from, card, to) {
                    Ok(outcome) => {
                        if outcome.revealed {
                            println!("Revealed a card.");
                        }
                        for sequence in outcome.completed {
                            println!("Completed a {} sequence.", sequence.suit);
                        }
                    }
                    Err(err) => println!("Move error: {err}"),
                }
            }
            Some("d" | "draw") => match game.draw_from_stock() {
                Ok(completed) if !completed.is_empty() => {
                    println!("Completed {} sequence(s).", completed.len());
                }
                Ok(_) => {}
                Err(err) => println!("Draw error: {err}"),
            },
            Some("u" | "undo") => {
                if let Err(err) = game.undo() {
                    println!("Undo error: {err}");
                }
            }
            Some("s" | "save") => match game.snapshot().to_json() {
                Ok(json) => println!("{json}"),
                Err(err) => println!("Save error: {err}"),
            },
            Some("q" | "quit") => break,
            _ => println!("Unknown action."),
        }
    }

    println!(
        "Played {}, won {} ({:.0}%).",
        stats.games_played,
        stats.games_won,
        stats.win_rate() * 100.0
    );
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_suits() -> Option<u8> {
    loop {
        let input = prompt_line("Suits (1, 2 or 4): ");
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<u8>() {
            Ok(value @ (1 | 2 | 4)) => return Some(value),
            _ => println!("Please enter 1, 2 or 4."),
        }
    }
}

fn print_table(game: &Game) {
    println!(
        "\nScore {} | moves {} | completed {} | stock {} | {:.0}s",
        game.score(),
        game.moves(),
        game.completed_sets(),
        game.stock_count(),
        game.elapsed()
    );

    for (index, column) in game.columns().iter().enumerate() {
        println!("{index}: {}", format_column(column));
    }
    println!();
}

fn format_command(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_column(column: &Column) -> String {
    if column.is_empty() {
        return "(empty)".to_string();
    }
    column
        .cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    if !card.face_up {
        return colorize("##", "90");
    }

    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    let rank = card.rank_symbol().unwrap_or("?");
    colorize(&format!("{rank}{}", card.suit.symbol()), color_code)
}
