//! Text for engine signals and the per-turn status block.

use colored::{ColoredString, Colorize};
use oregon_game::{
    FightResult, HazardEvent, HuntOutcome, IllnessGrade, MountainPass, Severity, Signal,
    SignalKind, StatusSnapshot, TurnAction,
};

fn hazard_text(event: HazardEvent) -> &'static str {
    match event {
        HazardEvent::WagonBreakdown => "Wagon broke down. Time and supplies lost on repairs.",
        HazardEvent::OxInjury => "An ox hurt its leg and the team is slower for it.",
        HazardEvent::DaughterBreaksArm => "Your daughter broke her arm. Supplies went into a sling.",
        HazardEvent::OxWandersOff => "An ox wandered off. Time spent looking for it.",
        HazardEvent::SonGetsLost => "Your son got lost. Half a day spent finding him.",
        HazardEvent::UnsafeWater => "Unsafe water. Time lost looking for a clean spring.",
        HazardEvent::HeavyRains => "Heavy rains. Time and supplies lost.",
        HazardEvent::BanditsAttack => "Bandits attack!",
        HazardEvent::FireInWagon => "Fire in the wagon. Food and supplies damaged.",
        HazardEvent::LoseWayInFog => "Lost the way in heavy fog.",
        HazardEvent::PoisonousSnake => "You killed a poisonous snake after it bit you.",
        HazardEvent::WagonSwampedFording => "Wagon swamped fording a river. Food and clothes lost.",
        HazardEvent::WildAnimalsAttack => "Wild animals attack!",
        HazardEvent::ColdWeather => "Cold weather.",
        HazardEvent::HailStorm => "Hail storm. Supplies damaged.",
        HazardEvent::HelpfulIndians => "Helpful Indians show you where to find more food.",
    }
}

fn hunt_text(outcome: HuntOutcome) -> String {
    match outcome {
        HuntOutcome::Refused => "You need more bullets to go hunting.".to_string(),
        HuntOutcome::BigGame { food, .. } => {
            format!("Right between the eyes! A big one, {food} pounds of food.")
        }
        HuntOutcome::Missed { bullets_spent } => {
            format!("Missed, and dinner got away. {bullets_spent} bullets spent.")
        }
        HuntOutcome::Caught { food, .. } => format!("Nice shot. {food} pounds of food."),
    }
}

const fn fight_text(result: FightResult) -> &'static str {
    match result {
        FightResult::DroveOff => "Nice shooting, you drove them off.",
        FightResult::SlowDraw => "Kinda slow with that Colt.",
        FightResult::Knifed => "Lousy shot. You got knifed and need a doctor.",
    }
}

const fn illness_text(grade: IllnessGrade) -> &'static str {
    match grade {
        IllnessGrade::Mild => "Mild illness. Medicine used.",
        IllnessGrade::Bad => "Bad illness. Medicine used.",
        IllnessGrade::Serious => "Serious illness. You must stop for medical attention.",
    }
}

const fn pass_text(pass: MountainPass) -> &'static str {
    match pass {
        MountainPass::SouthPass => "Made it safely through South Pass. No snow.",
        MountainPass::BlueMountains => "Made it safely through the Blue Mountains.",
    }
}

const fn action_text(action: TurnAction) -> &'static str {
    match action {
        TurnAction::StopAtFort => "stop at the fort",
        TurnAction::Hunt => "hunt",
        TurnAction::Continue => "continue",
    }
}

/// Player-facing line for a signal, or `None` for beats the prompts already show.
#[must_use]
pub fn describe(kind: &SignalKind) -> Option<String> {
    let text = match *kind {
        SignalKind::TurnStarted { .. }
        | SignalKind::ActionChosen { .. }
        | SignalKind::RiderTacticChosen { .. }
        | SignalKind::Ate { .. } => return None,
        SignalKind::DoctorBill { amount } => format!("The doctor's bill is ${amount}."),
        SignalKind::DoctorUnaffordable => "You can't afford a doctor.".to_string(),
        SignalKind::LowFood { .. } => "You'd better do some hunting or buy food soon!".to_string(),
        SignalKind::FortPurchase {
            supply,
            spent,
            gained,
        } => format!("Spent ${spent} on {}, got {gained}.", supply.label()),
        SignalKind::FortPurchaseMissed { supply, amount } => format!(
            "You don't have ${amount}. You miss your chance to buy {}.",
            supply.label()
        ),
        SignalKind::Hunted { outcome } => hunt_text(outcome),
        SignalKind::RationCut { .. } => "You can't eat that well.".to_string(),
        SignalKind::Traveled { miles } => format!("You traveled {miles} miles."),
        SignalKind::RidersAhead { hostile } => {
            let look = if hostile { "look" } else { "don't look" };
            format!("Riders ahead. They {look} hostile.")
        }
        SignalKind::RidersHeldFire => "They did not attack.".to_string(),
        SignalKind::RiderFight { result } => fight_text(result).to_string(),
        SignalKind::RidersDeparted { hostile: true } => {
            "Riders were hostile. Check for losses.".to_string()
        }
        SignalKind::RidersDeparted { hostile: false } => {
            "Riders were friendly, but check for possible losses.".to_string()
        }
        SignalKind::ShotCalled { word } => format!("Type {word}"),
        SignalKind::Hazard { event } => hazard_text(event).to_string(),
        SignalKind::BanditsTookCash { .. } => {
            "Out of bullets. They got lots of cash.".to_string()
        }
        SignalKind::BanditsRepelled => "Quickest draw outside of Dodge City. You got 'em!".to_string(),
        SignalKind::BanditsWounded => {
            "Shot in the leg, and they took one of your oxen. See a doctor.".to_string()
        }
        SignalKind::AnimalsOverpowered => {
            "Too low on bullets. The wolves overpowered you.".to_string()
        }
        SignalKind::AnimalsFought { clean: true } => {
            "Nice shootin', pardner. They didn't get much.".to_string()
        }
        SignalKind::AnimalsFought { clean: false } => {
            "Slow on the draw. They got at your food and clothes.".to_string()
        }
        SignalKind::ColdWeather { warm: true } => "You have enough clothing to keep warm.".to_string(),
        SignalKind::ColdWeather { warm: false } => {
            "You don't have enough clothing to keep warm.".to_string()
        }
        SignalKind::Illness { grade } => illness_text(grade).to_string(),
        SignalKind::RuggedMountains => "Rugged mountains.".to_string(),
        SignalKind::LostInMountains => "You got lost. Valuable time spent finding the trail.".to_string(),
        SignalKind::MountainWagonDamage => "Wagon damaged. Time and supplies lost.".to_string(),
        SignalKind::SlowGoing { .. } => "The going gets slow.".to_string(),
        SignalKind::PassCleared { pass } => pass_text(pass).to_string(),
        SignalKind::Blizzard => "Blizzard in the mountain pass. Time and supplies lost.".to_string(),
        SignalKind::Died { cause } => format!("Your family has died: {}.", cause.key().replace('_', " ")),
        SignalKind::Arrived { arrival } => format!(
            "You finally arrived at Oregon City on {}, {} days after leaving Independence!",
            arrival.date.format("%A, %B %-d %Y"),
            arrival.total_days
        ),
    };
    Some(text)
}

fn paint(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Info => text.normal(),
        Severity::Warning => text.yellow(),
        Severity::Critical => text.red().bold(),
    }
}

/// Colored line for a journal entry.
#[must_use]
pub fn render_signal(signal: &Signal) -> Option<String> {
    describe(&signal.kind).map(|text| paint(&text, signal.severity).to_string())
}

/// Status block printed at the top of each turn.
#[must_use]
pub fn status_block(status: &StatusSnapshot) -> String {
    format!(
        "{}\nTotal mileage is {}\n{:<10}{:<10}{:<10}{:<12}{:<10}\n{:<10}{:<10}{:<10}{:<12}{:<10}",
        status.date.format("%A, %B %-d %Y").to_string().bold(),
        status.displayed_mileage,
        "Food",
        "Bullets",
        "Clothing",
        "Misc.",
        "Cash",
        status.food,
        status.bullets,
        status.clothing,
        status.misc_supplies,
        status.cash,
    )
}

/// Menu prompt for the turn's action.
#[must_use]
pub fn action_prompt(options: &[TurnAction]) -> String {
    let listed = options
        .iter()
        .enumerate()
        .map(|(idx, action)| format!("({}) {}", idx + 1, action_text(*action)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Do you want to {listed}?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use oregon_game::{ActionMenu, ArrivalDate, DeathCause, GameState, SignalId};

    #[test]
    fn quiet_signals_are_skipped() {
        assert!(describe(&SignalKind::ActionChosen {
            action: TurnAction::Hunt
        })
        .is_none());
        assert!(describe(&SignalKind::TurnStarted {
            date: NaiveDate::from_ymd_opt(1847, 3, 29).unwrap()
        })
        .is_none());
    }

    #[test]
    fn every_hazard_has_text() {
        for event in HazardEvent::ALL {
            let text = describe(&SignalKind::Hazard { event }).unwrap();
            assert!(!text.is_empty());
        }
    }

    #[test]
    fn arrival_names_the_weekday() {
        let arrival = ArrivalDate::interpolate(12, 1_900, 2_040);
        let text = describe(&SignalKind::Arrived { arrival }).unwrap();
        assert!(text.contains("Monday, September 27 1847"), "{text}");
        assert!(text.contains("182 days"));
    }

    #[test]
    fn death_cause_reads_naturally() {
        let text = describe(&SignalKind::Died {
            cause: DeathCause::WinterBlizzard,
        })
        .unwrap();
        assert!(text.ends_with("winter blizzard."));
    }

    #[test]
    fn critical_signals_render() {
        colored::control::set_override(false);
        let signal = Signal::new(SignalId::new(2, 0), SignalKind::DoctorUnaffordable);
        assert_eq!(
            render_signal(&signal).as_deref(),
            Some("You can't afford a doctor.")
        );
    }

    #[test]
    fn status_hides_mountain_mileage() {
        colored::control::set_override(false);
        let state = GameState {
            miles_traveled: 1_200,
            food: 80,
            turn_number: 3,
            ..GameState::default()
        };
        let block = status_block(&state.snapshot());
        assert!(block.starts_with("Monday, April 26 1847"), "{block}");
        assert!(block.contains("Total mileage is 950"));
        assert!(block.contains("80"));
    }

    #[test]
    fn prompt_numbers_menu_options() {
        assert_eq!(
            action_prompt(ActionMenu::WithoutFort.options()),
            "Do you want to (1) hunt, (2) continue?"
        );
    }
}
