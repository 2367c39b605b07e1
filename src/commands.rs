use std::fmt;

use glam::DVec3;
use sandvox_core::format_vec3;

use crate::game::GameSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CommandError {}

/// Movement direction named by a command. Axes are local: forward is +z,
/// right is +x, independent of where the camera points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveDirection {
    fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Self::Forward),
            's' => Some(Self::Backward),
            'a' => Some(Self::Left),
            'd' => Some(Self::Right),
            _ => None,
        }
    }

    /// Unit intent vector for this direction.
    pub fn intent(self) -> DVec3 {
        match self {
            Self::Forward => DVec3::Z,
            Self::Backward => -DVec3::Z,
            Self::Left => -DVec3::X,
            Self::Right => DVec3::X,
        }
    }

    /// Word used in movement responses.
    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    ToggleHelp,
    Jump,
    Look,
    Status,
    Create { x: f64, y: f64, z: f64 },
    Destroy { x: f64, y: f64, z: f64 },
    Move(MoveDirection),
    /// Empty line or unrecognized single character: no output, no state change.
    Noop,
    /// Unmatched line, echoed back verbatim in the response.
    Unknown(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

/// Parse one raw input line.
///
/// Matchers run top to bottom and the first match wins; the order is part of
/// the grammar (a bare `create` must become a usage failure, not an unknown
/// command, and `j` must jump rather than count as an unrecognized key).
/// Keyword matching is case-folded; the original line is kept for numeric
/// arguments and for echoing unknown commands.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    if input.is_empty() {
        return Ok(Command::Noop);
    }

    let lowered = input.to_ascii_lowercase();
    match lowered.as_str() {
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "help" | "h" => return Ok(Command::ToggleHelp),
        "jump" | "j" | " " => return Ok(Command::Jump),
        "look" | "l" => return Ok(Command::Look),
        "status" | "stat" => return Ok(Command::Status),
        _ => {}
    }

    if lowered.starts_with("create") {
        let (x, y, z) = parse_coords(&input["create".len()..])
            .ok_or_else(|| CommandError::new("Usage: create <x> <y> <z>"))?;
        return Ok(Command::Create { x, y, z });
    }
    if lowered.starts_with("destroy") {
        let (x, y, z) = parse_coords(&input["destroy".len()..])
            .ok_or_else(|| CommandError::new("Usage: destroy <x> <y> <z>"))?;
        return Ok(Command::Destroy { x, y, z });
    }

    let mut chars = lowered.chars();
    if let (Some(key), None) = (chars.next(), chars.next()) {
        // Single-character movement keys; anything else is silently ignored.
        return Ok(match MoveDirection::from_key(key) {
            Some(dir) => Command::Move(dir),
            None => Command::Noop,
        });
    }

    let alias = match lowered.as_str() {
        "forward" => Some(MoveDirection::Forward),
        "backward" | "back" => Some(MoveDirection::Backward),
        "left" => Some(MoveDirection::Left),
        "right" => Some(MoveDirection::Right),
        _ => None,
    };
    Ok(match alias {
        Some(dir) => Command::Move(dir),
        None => Command::Unknown(input.to_string()),
    })
}

/// Three whitespace-separated reals; tokens past the third are ignored.
fn parse_coords(rest: &str) -> Option<(f64, f64, f64)> {
    let mut tokens = rest.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some((x, y, z))
}

/// Execute a parsed command against the session, collecting response lines.
pub fn execute_command(session: &mut GameSession, cmd: Command) -> CommandOutput {
    let mut out = CommandOutput::default();
    match cmd {
        Command::Quit => {
            // The farewell is printed by the loop on exit, not here.
            session.request_quit();
        }
        Command::ToggleHelp => {
            if session.toggle_help() {
                out.lines.extend(session.help_lines());
            }
        }
        Command::Jump => {
            // The grounded precondition lives in the player; the response is
            // unconditional either way.
            session.jump();
            out.lines.push("Player jumps!".to_string());
        }
        Command::Look => {
            out.lines.extend(session.look_lines());
        }
        Command::Status => {
            out.lines.extend(session.status_lines());
        }
        Command::Create { x, y, z } => {
            let position = DVec3::new(x, y, z);
            session.create_block(position);
            out.lines
                .push(format!("Created a block at {}", format_vec3(position)));
        }
        Command::Destroy { x, y, z } => {
            let position = DVec3::new(x, y, z);
            if session.destroy_block(position) {
                out.lines
                    .push(format!("Destroyed a block at {}", format_vec3(position)));
            } else {
                out.lines
                    .push(format!("No block found at {}", format_vec3(position)));
            }
        }
        Command::Move(dir) => {
            let position = session.move_step(dir.intent());
            out.lines.push(format!(
                "Player moved {} to position {}",
                dir.label(),
                format_vec3(position)
            ));
        }
        Command::Noop => {}
        Command::Unknown(original) => {
            out.lines.push(format!("Unknown command: {original}"));
            out.lines
                .push("Type 'help' for available commands.".to_string());
        }
    }
    out
}

/// Parse and execute one raw line; parse failures become response lines.
pub fn interpret(session: &mut GameSession, raw: &str) -> CommandOutput {
    match parse_command(raw) {
        Ok(cmd) => execute_command(session, cmd),
        Err(err) => CommandOutput {
            lines: vec![err.to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use proptest::prelude::*;

    fn session() -> GameSession {
        GameSession::new(&SimConfig::default())
    }

    fn run(session: &mut GameSession, inputs: &[&str]) -> Vec<String> {
        let mut transcript = Vec::new();
        for input in inputs {
            transcript.extend(interpret(session, input).lines);
        }
        transcript
    }

    #[test]
    fn parses_exact_keywords() {
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert_eq!(parse_command("EXIT").unwrap(), Command::Quit);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("help").unwrap(), Command::ToggleHelp);
        assert_eq!(parse_command("h").unwrap(), Command::ToggleHelp);
        assert_eq!(parse_command("jump").unwrap(), Command::Jump);
        assert_eq!(parse_command("j").unwrap(), Command::Jump);
        assert_eq!(parse_command(" ").unwrap(), Command::Jump);
        assert_eq!(parse_command("look").unwrap(), Command::Look);
        assert_eq!(parse_command("l").unwrap(), Command::Look);
        assert_eq!(parse_command("status").unwrap(), Command::Status);
        assert_eq!(parse_command("stat").unwrap(), Command::Status);
    }

    #[test]
    fn empty_line_is_a_noop() {
        assert_eq!(parse_command("").unwrap(), Command::Noop);
    }

    #[test]
    fn unrecognized_single_characters_are_silent() {
        assert_eq!(parse_command("x").unwrap(), Command::Noop);
        assert_eq!(parse_command("5").unwrap(), Command::Noop);
        assert_eq!(parse_command("?").unwrap(), Command::Noop);
    }

    #[test]
    fn parses_movement_keys_and_aliases() {
        assert_eq!(
            parse_command("w").unwrap(),
            Command::Move(MoveDirection::Forward)
        );
        assert_eq!(
            parse_command("A").unwrap(),
            Command::Move(MoveDirection::Left)
        );
        assert_eq!(
            parse_command("forward").unwrap(),
            Command::Move(MoveDirection::Forward)
        );
        assert_eq!(
            parse_command("back").unwrap(),
            Command::Move(MoveDirection::Backward)
        );
        assert_eq!(
            parse_command("BACKWARD").unwrap(),
            Command::Move(MoveDirection::Backward)
        );
        assert_eq!(
            parse_command("right").unwrap(),
            Command::Move(MoveDirection::Right)
        );
    }

    #[test]
    fn parses_create_with_real_literals() {
        assert_eq!(
            parse_command("create 5 0 5").unwrap(),
            Command::Create {
                x: 5.0,
                y: 0.0,
                z: 5.0
            }
        );
        assert_eq!(
            parse_command("CREATE 1e1 0 -2.5e-1").unwrap(),
            Command::Create {
                x: 10.0,
                y: 0.0,
                z: -0.25
            }
        );
    }

    #[test]
    fn create_ignores_tokens_after_the_third() {
        assert_eq!(
            parse_command("create 1 2 3 and then some").unwrap(),
            Command::Create {
                x: 1.0,
                y: 2.0,
                z: 3.0
            }
        );
    }

    #[test]
    fn bare_create_is_a_usage_failure_not_unknown() {
        let err = parse_command("create").unwrap_err();
        assert_eq!(err.to_string(), "Usage: create <x> <y> <z>");
        let err = parse_command("create 5 0").unwrap_err();
        assert_eq!(err.to_string(), "Usage: create <x> <y> <z>");
        let err = parse_command("destroy 5 zero 5").unwrap_err();
        assert_eq!(err.to_string(), "Usage: destroy <x> <y> <z>");
    }

    #[test]
    fn unknown_commands_keep_their_original_case() {
        assert_eq!(
            parse_command("FLY me").unwrap(),
            Command::Unknown("FLY me".to_string())
        );
    }

    #[test]
    fn create_then_destroy_round_trips() {
        let mut session = session();
        let transcript = run(&mut session, &["create 5 0 5", "destroy 5 0 5"]);
        assert_eq!(
            transcript,
            vec![
                "Created a block at (5, 0, 5)".to_string(),
                "Destroyed a block at (5, 0, 5)".to_string(),
            ]
        );
        assert_eq!(session.block_count(), 0);
    }

    #[test]
    fn destroy_without_create_reports_not_found() {
        let mut session = session();
        let transcript = run(&mut session, &["destroy 1 2 3"]);
        assert_eq!(transcript, vec!["No block found at (1, 2, 3)".to_string()]);
        assert_eq!(session.block_count(), 0);
    }

    #[test]
    fn malformed_create_has_no_partial_effect() {
        let mut session = session();
        let transcript = run(&mut session, &["create 5 0", "destroy 5 0 0"]);
        assert_eq!(
            transcript,
            vec![
                "Usage: create <x> <y> <z>".to_string(),
                "No block found at (5, 0, 0)".to_string(),
            ]
        );
    }

    #[test]
    fn nearby_coordinates_destroy_the_same_cell() {
        let mut session = session();
        let transcript = run(&mut session, &["create 5.4 0 5.4", "destroy 5.6 0 5.6"]);
        assert_eq!(
            transcript,
            vec![
                "Created a block at (5.4, 0, 5.4)".to_string(),
                "Destroyed a block at (5.6, 0, 5.6)".to_string(),
            ]
        );
    }

    #[test]
    fn movement_reports_the_new_position() {
        let mut session = session();
        let transcript = run(&mut session, &["w"]);
        assert_eq!(
            transcript,
            vec!["Player moved forward to position (0, 1.8, 0.5)".to_string()]
        );
    }

    #[test]
    fn only_movement_advances_game_time() {
        let mut session = session();
        run(
            &mut session,
            &[
                "look",
                "status",
                "help",
                "help",
                "create 1 1 1",
                "destroy 1 1 1",
                "jump",
                "",
                "x",
            ],
        );
        assert_eq!(session.game_time_steps(), 0);

        run(&mut session, &["w", "a", "s", "d", "forward", "back"]);
        assert_eq!(session.game_time_steps(), 6);
        assert!((session.game_time_seconds() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn help_toggle_is_its_own_inverse() {
        let mut session = session();
        assert!(session.is_help_shown());

        // First toggle hides the help and says nothing.
        let first = interpret(&mut session, "help");
        assert!(first.lines.is_empty());
        assert!(!session.is_help_shown());

        // Second toggle shows it again.
        let second = interpret(&mut session, "h");
        assert!(!second.lines.is_empty());
        assert_eq!(second.lines[0], "=== CONTROLS ===");
        assert!(session.is_help_shown());
    }

    #[test]
    fn unknown_command_echoes_and_hints() {
        let mut session = session();
        let transcript = run(&mut session, &["fly"]);
        assert_eq!(
            transcript,
            vec![
                "Unknown command: fly".to_string(),
                "Type 'help' for available commands.".to_string(),
            ]
        );
        assert!(session.is_running());
        assert_eq!(session.game_time_steps(), 0);
    }

    #[test]
    fn airborne_jump_still_prints_but_changes_nothing() {
        let mut session = session();
        assert!(session.is_on_ground());

        // Spawn is grounded, so the first jump launches.
        let first = run(&mut session, &["jump"]);
        assert_eq!(first, vec!["Player jumps!".to_string()]);
        assert!(!session.is_on_ground());
        let vy = session.player_velocity().y;
        assert!(vy > 0.0);

        // Airborne: same response, no velocity change.
        let second = run(&mut session, &["jump"]);
        assert_eq!(second, vec!["Player jumps!".to_string()]);
        assert_eq!(session.player_velocity().y, vy);
    }

    #[test]
    fn quit_stops_the_session_without_output() {
        let mut session = session();
        let transcript = run(&mut session, &["quit"]);
        assert!(transcript.is_empty());
        assert!(!session.is_running());
    }

    #[test]
    fn golden_session_transcript_is_stable() {
        let mut session = session();
        let transcript = run(
            &mut session,
            &[
                "create 5 0 5",
                "destroy 5 0 5",
                "destroy 5 0 5",
                "w",
                "right",
                "fly",
            ],
        );
        assert_eq!(
            transcript,
            vec![
                "Created a block at (5, 0, 5)".to_string(),
                "Destroyed a block at (5, 0, 5)".to_string(),
                "No block found at (5, 0, 5)".to_string(),
                "Player moved forward to position (0, 1.8, 0.5)".to_string(),
                "Player moved right to position (0.5, 1.4, 0.5)".to_string(),
                "Unknown command: fly".to_string(),
                "Type 'help' for available commands.".to_string(),
            ]
        );
    }

    proptest! {
        /// Property: the parser never panics, whatever bytes come in.
        #[test]
        fn parser_never_panics(input in ".*") {
            let _ = parse_command(&input);
        }

        /// Property: create followed by destroy at the same coordinates
        /// always reports a successful destruction.
        #[test]
        fn create_then_destroy_always_round_trips(
            x in -1.0e6..1.0e6f64,
            y in -1.0e6..1.0e6f64,
            z in -1.0e6..1.0e6f64,
        ) {
            let mut session = session();
            let created = interpret(&mut session, &format!("create {x} {y} {z}"));
            prop_assert_eq!(created.lines.len(), 1);
            prop_assert!(created.lines[0].starts_with("Created a block at"));

            let destroyed = interpret(&mut session, &format!("destroy {x} {y} {z}"));
            prop_assert_eq!(destroyed.lines.len(), 1);
            prop_assert!(
                destroyed.lines[0].starts_with("Destroyed a block at"),
                "unexpected response: {}",
                destroyed.lines[0]
            );
        }

        /// Property: any sequence of movement commands advances the clock by
        /// exactly one step per command.
        #[test]
        fn each_movement_command_is_one_step(
            moves in prop::collection::vec(prop_oneof![
                Just("w"), Just("a"), Just("s"), Just("d"),
                Just("forward"), Just("backward"), Just("back"),
                Just("left"), Just("right"),
            ], 0..32),
        ) {
            let mut session = session();
            for input in &moves {
                interpret(&mut session, input);
            }
            prop_assert_eq!(session.game_time_steps(), moves.len() as u64);
        }
    }
}
