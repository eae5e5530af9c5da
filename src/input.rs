/// Player commands and the per-tick input they collapse into.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Level-triggered: sent every tick the fire key is held.
    Fire,
    /// Only honoured after game over.
    Restart,
    Quit,
    /// Sweep with the wider manual margin.
    ManualCleanup,
}

/// What the simulation sees for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub cleanup: bool,
}

impl FrameInput {
    /// Fold this tick's commands into flags. `Restart` and `Quit` are handled
    /// before the tick runs and are ignored here.
    pub fn from_commands(commands: &[Command]) -> Self {
        commands.iter().fold(FrameInput::default(), |mut input, cmd| {
            match cmd {
                Command::MoveLeft => input.left = true,
                Command::MoveRight => input.right = true,
                Command::Fire => input.fire = true,
                Command::ManualCleanup => input.cleanup = true,
                Command::Restart | Command::Quit => {}
            }
            input
        })
    }
}
