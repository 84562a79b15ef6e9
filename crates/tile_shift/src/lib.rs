use bevy::prelude::*;
use board::Board;
use config::GameConfig;
use render::Canvas;

mod app;
pub mod board;
pub mod config;
pub mod field;
pub mod input;
pub mod motion;
pub mod piece;
pub mod render;
pub mod selection;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
enum GameState {
    #[default]
    Init,
    Playing,
}

#[derive(Component)]
struct MainCamera;

pub fn run() -> AppExit {
    app::default_app(env!("CARGO_PKG_NAME"))
        .init_state::<GameState>()
        .init_resource::<GameConfig>()
        .init_resource::<Canvas>()
        .add_systems(OnEnter(GameState::Init), init_game)
        .add_systems(
            Update,
            (
                input::keyboard_input,
                input::pointer_input,
                tick_board,
                render::register_visuals,
                render::sync_piece_visuals,
                render::sync_cursor_visual,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .run()
}

fn init_game(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    commands.spawn(Camera2d).insert(MainCamera);

    let board = match Board::from_config(&config) {
        Ok(board) => board,
        Err(err) => {
            error!("Could not set up the board: {err}");
            exit.send(AppExit::error());
            return;
        }
    };
    render::spawn_ground(&mut commands, &board, config.motion.cell_size);
    commands.insert_resource(board);

    info!("Starting game");
    next_state.set(GameState::Playing);
}

fn tick_board(time: Res<Time>, mut board: ResMut<Board>) {
    board.update(time.delta_secs());
}
