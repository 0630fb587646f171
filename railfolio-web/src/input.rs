use railfolio_core::Command;

// Centralized keyboard mapping for rider commands.
// Takes KeyboardEvent.key; letters are matched case-insensitively.
#[must_use]
pub fn key_to_command(key: &str) -> Option<Command> {
    match key {
        "ArrowRight" | "ArrowDown" => Some(Command::StepForward),
        "ArrowLeft" | "ArrowUp" => Some(Command::StepBack),
        " " | "Spacebar" => Some(Command::Brake),
        "h" | "H" => Some(Command::Horn),
        "r" | "R" => Some(Command::Restart),
        _ => None,
    }
}

// Whether the browser default (page scroll) must be suppressed for a handled key.
#[must_use]
pub const fn suppresses_default(command: Command) -> bool {
    matches!(
        command,
        Command::StepForward | Command::StepBack | Command::Brake
    )
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn arrows_step_the_train() {
        assert_eq!(key_to_command("ArrowRight"), Some(Command::StepForward));
        assert_eq!(key_to_command("ArrowDown"), Some(Command::StepForward));
        assert_eq!(key_to_command("ArrowLeft"), Some(Command::StepBack));
        assert_eq!(key_to_command("ArrowUp"), Some(Command::StepBack));
    }

    #[test]
    fn letters_ignore_case() {
        assert_eq!(key_to_command("h"), Some(Command::Horn));
        assert_eq!(key_to_command("H"), Some(Command::Horn));
        assert_eq!(key_to_command("R"), Some(Command::Restart));
        assert_eq!(key_to_command("x"), None);
        assert_eq!(key_to_command("Enter"), None);
    }

    #[test]
    fn space_brakes_and_blocks_page_scroll() {
        assert_eq!(key_to_command(" "), Some(Command::Brake));
        assert!(suppresses_default(Command::Brake));
        assert!(suppresses_default(Command::StepBack));
        assert!(!suppresses_default(Command::Horn));
    }
}
