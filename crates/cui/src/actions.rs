use crate::app::App;
use crate::input::InputAction;
use sakura_core::Command;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::CloseHelp => app.show_help = false,
        InputAction::Next => app.apply(Command::Advance),
        InputAction::Prev => app.apply(Command::Retreat),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::Activate => app.activate_primary(),
        InputAction::Check => app.apply(Command::Grade),
        InputAction::Restart => app.restart(),
        InputAction::ToggleMusic => app.apply(Command::TogglePlayback),
        InputAction::SkipTrack => app.apply(Command::SkipTrack),
    }
}
