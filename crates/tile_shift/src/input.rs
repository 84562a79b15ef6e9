use bevy::prelude::*;

use crate::board::{Board, Grab};
use crate::motion::Direction;

// Shorter drags count as a tap
pub const MINIMUM_SWIPE_DISTANCE: f32 = 24.0;

const DIRECTION_KEYS: [(Direction, [KeyCode; 2]); 4] = [
    (Direction::Up, [KeyCode::ArrowUp, KeyCode::KeyW]),
    (Direction::Down, [KeyCode::ArrowDown, KeyCode::KeyS]),
    (Direction::Left, [KeyCode::ArrowLeft, KeyCode::KeyA]),
    (Direction::Right, [KeyCode::ArrowRight, KeyCode::KeyD]),
];

const GRAB_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::Enter];

/// First held direction key, so holding a key keeps sliding cell after cell.
pub fn key_direction(keys: &ButtonInput<KeyCode>) -> Option<Direction> {
    DIRECTION_KEYS
        .iter()
        .find(|(_, codes)| keys.any_pressed(*codes))
        .map(|(direction, _)| *direction)
}

/// Direction of a drag in window space, where y grows downward like rows.
pub fn swipe_direction(drag: Vec2) -> Option<Direction> {
    if drag.length() < MINIMUM_SWIPE_DISTANCE {
        return None;
    }
    let direction = if drag.x.abs() > drag.y.abs() {
        if drag.x > 0. {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if drag.y > 0. {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(direction)
}

fn just_pressed_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input.iter_just_pressed().next().map(|touch| touch.position())
    }
}

fn just_released_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_released(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input.iter_just_released().next().map(|touch| touch.position())
    }
}

fn apply_grab(board: &mut Board) {
    match board.toggle_grab() {
        Ok(Grab::Nothing) => {}
        Ok(grab) => info!("{grab:?}"),
        Err(err) => error!("{err}"),
    }
}

pub fn keyboard_input(keys: Res<ButtonInput<KeyCode>>, mut board: ResMut<Board>) {
    if keys.any_just_pressed(GRAB_KEYS) {
        apply_grab(&mut board);
    }
    if let Some(direction) = key_direction(&keys) {
        board.step(direction);
    }
}

pub fn pointer_input(
    windows: Query<&Window>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut drag_start: Local<Option<Vec2>>,
    mut board: ResMut<Board>,
) {
    if let Some(position) = just_pressed_screen_position(&mouse_button_input, &touch_input, &windows) {
        *drag_start = Some(position);
    }

    let Some(end) = just_released_screen_position(&mouse_button_input, &touch_input, &windows) else {
        return;
    };
    let Some(start) = drag_start.take() else {
        return;
    };

    match swipe_direction(end - start) {
        Some(direction) => {
            board.step(direction);
        }
        None => apply_grab(&mut board),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_map_to_directions() {
        let mut keys = ButtonInput::<KeyCode>::default();
        assert_eq!(key_direction(&keys), None, "nothing held");

        keys.press(KeyCode::KeyD);
        assert_eq!(key_direction(&keys), Some(Direction::Right), "wasd");

        keys.release(KeyCode::KeyD);
        keys.press(KeyCode::ArrowUp);
        assert_eq!(key_direction(&keys), Some(Direction::Up), "arrows");
    }

    #[test]
    fn swipes_follow_the_dominant_axis() {
        assert_eq!(swipe_direction(Vec2::new(80., 10.)), Some(Direction::Right), "right");
        assert_eq!(swipe_direction(Vec2::new(-80., 30.)), Some(Direction::Left), "left");
        assert_eq!(swipe_direction(Vec2::new(5., 60.)), Some(Direction::Down), "window y is down");
        assert_eq!(swipe_direction(Vec2::new(5., -60.)), Some(Direction::Up), "up");
    }

    #[test]
    fn short_drags_are_taps() {
        assert_eq!(swipe_direction(Vec2::new(3., -4.)), None, "tap");
        assert_eq!(swipe_direction(Vec2::ZERO), None, "no drag");
    }
}
