//! Game session state and the interactive command loop.

use anyhow::Result;
use glam::DVec3;
use sandvox_core::{format_vec3, GameClock, FIXED_STEP_SECONDS};
use sandvox_input::InputState;
use sandvox_physics::{Player, PlayerTuning};
use sandvox_world::{World, WorldBounds};
use std::io::{BufRead, Write};
use tracing::info;

use crate::command_script::CommandScriptPlayer;
use crate::commands;
use crate::config::SimConfig;
use crate::transcript::{TranscriptRecord, TranscriptSink};

/// Everything one play session owns: world, player, input handler, clock, and
/// the running/help/score flags. All mutation goes through this type; reads
/// are snapshot copies.
pub struct GameSession {
    world: World,
    player: Player,
    input: InputState,
    clock: GameClock,
    running: bool,
    show_help: bool,
    score: u32,
    camera_offset: DVec3,
    camera_look_offset: DVec3,
}

impl GameSession {
    /// Build a session from config: bounded world with a ground plane, a
    /// player at the spawn point, and the camera set up behind the player.
    pub fn new(config: &SimConfig) -> Self {
        let bounds = WorldBounds::new(config.bounds_min(), config.bounds_max());
        let mut world = World::new(bounds);
        world.create_ground(config.ground_height);

        let tuning = PlayerTuning {
            move_speed: config.move_speed,
            jump_speed: config.jump_speed,
            gravity: config.gravity,
            terminal_velocity: config.terminal_velocity,
        };
        let player = Player::new(config.spawn_point(), tuning);

        // Initial framing is tighter than the trailing offset and looks
        // straight at the spawn point.
        world
            .camera_mut()
            .set_position(player.position() + DVec3::new(0.0, 5.0, -10.0));
        world.camera_mut().look_at(player.position());

        Self {
            world,
            player,
            input: InputState::new(),
            clock: GameClock::ZERO,
            running: true,
            show_help: true,
            score: 0,
            camera_offset: config.camera_offset(),
            camera_look_offset: config.camera_look_offset(),
        }
    }

    /// Whether the session still accepts commands.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Move to the terminal stopped state. Only the quit commands call this.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Flip the help listing; returns the new state.
    pub fn toggle_help(&mut self) -> bool {
        self.show_help = !self.show_help;
        self.show_help
    }

    /// Whether the help listing is currently shown.
    pub fn is_help_shown(&self) -> bool {
        self.show_help
    }

    /// Accumulated score. No current command awards points; the field is part
    /// of the session state for modes that do.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Completed simulation steps.
    pub fn game_time_steps(&self) -> u64 {
        self.clock.steps()
    }

    /// Elapsed simulated seconds.
    pub fn game_time_seconds(&self) -> f64 {
        self.clock.seconds()
    }

    /// Player position snapshot.
    pub fn player_position(&self) -> DVec3 {
        self.player.position()
    }

    /// Player velocity snapshot.
    pub fn player_velocity(&self) -> DVec3 {
        self.player.velocity()
    }

    /// Whether the player rests on a surface.
    pub fn is_on_ground(&self) -> bool {
        self.player.is_on_ground()
    }

    /// Number of placed blocks.
    pub fn block_count(&self) -> usize {
        self.world.block_count()
    }

    /// Let the player jump if grounded. Instantaneous: takes effect on the
    /// next simulation step, and advances no time itself.
    pub fn jump(&mut self) {
        self.player.jump();
    }

    /// Place a unit block anchored at `position`. Instantaneous world edit.
    pub fn create_block(&mut self, position: DVec3) {
        self.world.create_platform(position, DVec3::ONE);
    }

    /// Remove the block whose cell contains `position`; reports whether one
    /// was there. Instantaneous world edit.
    pub fn destroy_block(&mut self, position: DVec3) -> bool {
        self.world.destroy_platform(position)
    }

    /// Queue a movement intent and advance exactly one fixed step. Returns
    /// the player position after the step.
    pub fn move_step(&mut self, intent: DVec3) -> DVec3 {
        self.player.set_input_direction(intent);
        self.step();
        self.player.position()
    }

    /// Live-key mode: record one key transition.
    pub fn set_key(&mut self, key: char, pressed: bool) {
        self.input.set_key(key, pressed);
    }

    /// Live-key mode: advance one fixed step using the combined intent of the
    /// currently held keys. Shares the step path with the text commands.
    pub fn step_from_keys(&mut self) -> DVec3 {
        let intent = self.input.movement_intent();
        self.player.set_input_direction(intent);
        self.step();
        self.player.position()
    }

    /// One fixed simulation step: clock, player, world, then the camera
    /// rederived from the player.
    fn step(&mut self) {
        let dt = FIXED_STEP_SECONDS;
        self.clock.advance();
        self.player.update(dt, &self.world);
        self.world.update(dt);

        let player_position = self.player.position();
        self.world
            .camera_mut()
            .set_position(player_position + self.camera_offset);
        self.world
            .camera_mut()
            .look_at(player_position + self.camera_look_offset);
    }

    /// The control listing shown by the help toggle.
    pub fn help_lines(&self) -> Vec<String> {
        [
            "=== CONTROLS ===",
            "Movement:",
            "  w/forward  - Move forward",
            "  s/backward - Move backward",
            "  a/left     - Move left",
            "  d/right    - Move right",
            "  jump/j     - Jump",
            "Sandbox:",
            "  create <x> <y> <z>  - Create a block",
            "  destroy <x> <y> <z> - Destroy a block",
            "Session:",
            "  look/l     - Show world view",
            "  status     - Show game status",
            "  help/h     - Toggle this help",
            "  quit/q     - Exit game",
            "================",
        ]
        .iter()
        .map(|line| line.to_string())
        .collect()
    }

    /// Textual world view: the player plus everything the world draws.
    pub fn look_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "=== WORLD VIEW ===".to_string(),
            format!("Player at {}", format_vec3(self.player.position())),
        ];
        lines.extend(self.world.draw());
        lines.push("==================".to_string());
        lines
    }

    /// Fixed-format status report.
    pub fn status_lines(&self) -> Vec<String> {
        let bounds = self.world.bounds();
        vec![
            "=== GAME STATUS ===".to_string(),
            format!("Player Position: {}", format_vec3(self.player.position())),
            format!("Player Velocity: {}", format_vec3(self.player.velocity())),
            format!(
                "On Ground: {}",
                if self.player.is_on_ground() {
                    "Yes"
                } else {
                    "No"
                }
            ),
            format!("Game Time: {} seconds", self.clock.whole_seconds()),
            format!(
                "World Bounds: {} to {}",
                format_vec3(bounds.min),
                format_vec3(bounds.max)
            ),
            "==================".to_string(),
        ]
    }
}

/// Process one raw line: interpret it, print the response lines, and append
/// to the transcript when one is being kept.
fn process_line(
    session: &mut GameSession,
    raw: &str,
    transcript: &mut Option<TranscriptSink>,
) -> Result<()> {
    let out = commands::interpret(session, raw);
    for line in &out.lines {
        println!("{line}");
    }
    if let Some(sink) = transcript {
        sink.write(&TranscriptRecord {
            step: session.game_time_steps(),
            command: raw,
            lines: &out.lines,
        })?;
    }
    Ok(())
}

/// Read commands from stdin until the session stops. EOF counts as quit.
pub fn run_repl(session: &mut GameSession, transcript: &mut Option<TranscriptSink>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut line = String::new();

    while session.is_running() {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            info!("stdin closed, ending session");
            session.request_quit();
            break;
        }
        let raw = line.trim_end_matches(['\n', '\r']);
        process_line(session, raw, transcript)?;
    }

    print_farewell();
    Ok(())
}

/// Drive the session from a command script instead of stdin. Commands are
/// echoed after the prompt so the output reads like an interactive session.
pub fn run_script(
    session: &mut GameSession,
    mut script: CommandScriptPlayer,
    transcript: &mut Option<TranscriptSink>,
) -> Result<()> {
    while session.is_running() {
        let Some(raw) = script.next_command() else {
            break;
        };
        println!("> {raw}");
        process_line(session, &raw, transcript)?;
    }
    if !script.is_finished() {
        info!("session ended before the script finished");
    }

    print_farewell();
    Ok(())
}

fn print_farewell() {
    println!();
    println!("Thanks for playing the 3D Sandbox Game!");
}
