//! Interactive play over any line-oriented reader and writer.

use anyhow::{Context, Result};
use log::debug;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use oregon_game::{
    ActionMenu, DecisionSource, EatingLevel, FortOrder, Journey, RiderTactic, ShotWord, Signal,
    StatusSnapshot, Supply, TurnAction, TurnOutcome,
};

use crate::render;

/// Human player answering prompts line by line.
///
/// Unparseable answers and end of input fall back to the last menu option,
/// the same as an out-of-range number.
pub struct ConsoleDecisions<R, W> {
    input: R,
    output: W,
    shot_limit: Option<Duration>,
    io_error: Option<io::Error>,
}

impl<R: BufRead, W: Write> ConsoleDecisions<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            shot_limit: None,
            io_error: None,
        }
    }

    /// Typed shots slower than `limit` count as misses.
    #[must_use]
    pub fn with_shot_limit(mut self, limit: Option<Duration>) -> Self {
        self.shot_limit = limit;
        self
    }

    /// First I/O failure since the last call, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn record(&mut self, err: io::Error) {
        self.io_error.get_or_insert(err);
    }

    fn say(&mut self, text: &str) {
        if let Err(err) = writeln!(self.output, "{text}").and_then(|()| self.output.flush()) {
            self.record(err);
        }
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        if let Err(err) = write!(self.output, "{prompt} ").and_then(|()| self.output.flush()) {
            self.record(err);
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_string()),
            Err(err) => {
                self.record(err);
                None
            }
        }
    }

    fn ask_number(&mut self, prompt: &str) -> i32 {
        self.ask(prompt)
            .and_then(|answer| answer.parse().ok())
            .unwrap_or(0)
    }
}

impl<R: BufRead, W: Write> DecisionSource for ConsoleDecisions<R, W> {
    fn turn_action(&mut self, status: &StatusSnapshot, menu: ActionMenu) -> TurnAction {
        self.say("");
        self.say(&render::status_block(status));
        let choice = self.ask_number(&render::action_prompt(menu.options()));
        menu.from_choice(choice)
    }

    fn fort_order(&mut self, _status: &StatusSnapshot) -> FortOrder {
        self.say("Enter what you wish to spend on the following");
        let mut order = FortOrder::default();
        for supply in Supply::ALL {
            let amount = self.ask_number(&format!("{}?", supply.label())).max(0);
            match supply {
                Supply::Food => order.food = amount,
                Supply::Ammunition => order.ammunition = amount,
                Supply::Clothing => order.clothing = amount,
                Supply::MiscSupplies => order.misc_supplies = amount,
            }
        }
        order
    }

    fn eating_level(&mut self, _status: &StatusSnapshot) -> EatingLevel {
        let choice = self.ask_number("Do you want to eat (1) poorly (2) moderately or (3) well?");
        EatingLevel::from_choice(choice)
    }

    fn rider_tactic(&mut self, _status: &StatusSnapshot, _hostile: bool) -> RiderTactic {
        let menu = RiderTactic::ALL
            .iter()
            .enumerate()
            .map(|(idx, tactic)| format!("({}) {}", idx + 1, tactic.label()))
            .collect::<Vec<_>>()
            .join("  ");
        self.say(&format!("Tactics: {menu}"));
        RiderTactic::from_choice(self.ask_number(">"))
    }

    fn shot_response(&mut self, word: ShotWord) -> bool {
        let started = Instant::now();
        let typed = self.ask(">").unwrap_or_default();
        let elapsed = started.elapsed();
        let in_time = self.shot_limit.is_none_or(|limit| elapsed <= limit);
        debug!("typed {typed:?} for {word} in {elapsed:?}");
        word.matches(&typed) && in_time
    }

    fn observe(&mut self, signal: &Signal) {
        if let Some(line) = render::render_signal(signal) {
            self.say(&line);
        }
    }
}

/// Play turns until the journey ends, surfacing console failures.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn play_interactive<R: BufRead, W: Write>(
    journey: &mut Journey,
    console: &mut ConsoleDecisions<R, W>,
) -> Result<TurnOutcome> {
    loop {
        let outcome = journey.run_turn(console)?;
        if let Some(err) = console.take_error() {
            return Err(err).context("console i/o failed");
        }
        if outcome.is_terminal() {
            return Ok(outcome);
        }
    }
}
