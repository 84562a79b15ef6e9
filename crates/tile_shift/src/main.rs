use bevy::app::AppExit;

fn main() -> AppExit {
    tile_shift::run()
}
