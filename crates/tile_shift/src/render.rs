use bevy::prelude::*;
use bevy::utils::HashMap;

use crate::app::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::board::Board;
use crate::field::PieceKind;
use crate::piece::PieceId;

const PIECE_INSET: f32 = 6.0;
const CURSOR_BORDER: f32 = 4.0;

const GROUND_COLOR: Color = Color::srgb(0.15, 0.15, 0.18);
const GROUND_GAP: f32 = 2.0;
const CURSOR_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);

const GROUND_Z: f32 = -10.0;
const PIECE_Z: f32 = 0.0;
const CURSOR_Z: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKey {
    Cursor,
    Piece(PieceId),
}

/// Sprites already spawned for board objects. Registration is idempotent,
/// so systems may ask for a visual every frame.
#[derive(Resource, Default)]
pub struct Canvas {
    visuals: HashMap<VisualKey, Entity>,
}

impl Canvas {
    pub fn contains(&self, key: VisualKey) -> bool {
        self.visuals.contains_key(&key)
    }

    /// Records `entity` as the visual for `key` unless one is already
    /// registered. Returns true if it was added.
    pub fn put(&mut self, key: VisualKey, entity: Entity) -> bool {
        if self.contains(key) {
            return false;
        }
        self.visuals.insert(key, entity);
        true
    }

    pub fn get(&self, key: VisualKey) -> Option<Entity> {
        self.visuals.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

#[derive(Component)]
pub struct PieceVisual {
    pub id: PieceId,
}

#[derive(Component)]
pub struct CursorVisual;

/// Normal and selected colors of each kind.
pub const fn kind_color(kind: PieceKind, selected: bool) -> Color {
    match (kind, selected) {
        (PieceKind::Red, false) => Color::srgb(0.75, 0.2, 0.2),
        (PieceKind::Red, true) => Color::srgb(1.0, 0.45, 0.45),
        (PieceKind::Green, false) => Color::srgb(0.2, 0.65, 0.25),
        (PieceKind::Green, true) => Color::srgb(0.45, 0.95, 0.5),
        (PieceKind::Blue, false) => Color::srgb(0.2, 0.35, 0.8),
        (PieceKind::Blue, true) => Color::srgb(0.45, 0.6, 1.0),
    }
}

/// Converts the top-left corner of a cell in window pixels (y down) to the
/// world-space center of that cell (y up, origin at the window center).
pub fn to_world(position: Vec2, cell_size: f32) -> Vec2 {
    let center = position + Vec2::splat(cell_size / 2.);
    Vec2::new(center.x - WINDOW_WIDTH / 2., WINDOW_HEIGHT / 2. - center.y)
}

pub fn spawn_ground(commands: &mut Commands, board: &Board, cell_size: f32) {
    let field = board.field();
    let tile = Vec2::splat(cell_size - GROUND_GAP);
    let config = board.config();
    for row in 0..field.height() {
        for col in 0..field.width() {
            let cell = IVec2::new(col as i32, row as i32);
            let world = to_world(config.rest_position(cell), cell_size);
            commands.spawn((
                Sprite::from_color(GROUND_COLOR, tile),
                Transform::from_translation(world.extend(GROUND_Z)),
            ));
        }
    }
}

pub fn register_visuals(mut commands: Commands, board: Res<Board>, mut canvas: ResMut<Canvas>) {
    let cell_size = board.config().cell_size;

    if !canvas.contains(VisualKey::Cursor) {
        let entity = commands
            .spawn((
                Sprite::from_color(CURSOR_COLOR, Vec2::splat(cell_size)),
                Transform::from_xyz(0., 0., CURSOR_Z),
                CursorVisual,
            ))
            .with_child((
                Sprite::from_color(Color::BLACK, Vec2::splat(cell_size - CURSOR_BORDER * 2.)),
                Transform::from_xyz(0., 0., 0.1),
            ))
            .id();
        canvas.put(VisualKey::Cursor, entity);
    }

    let piece_size = Vec2::splat(cell_size - PIECE_INSET * 2.);
    for (id, piece) in board.pieces() {
        let key = VisualKey::Piece(id);
        if canvas.contains(key) {
            continue;
        }
        let entity = commands
            .spawn((
                Sprite::from_color(kind_color(piece.kind(), piece.is_selected()), piece_size),
                Transform::from_xyz(0., 0., PIECE_Z),
                PieceVisual { id },
            ))
            .id();
        canvas.put(key, entity);
        debug!("Registered visual for piece {id}");
    }
}

/// Copies every piece's position and selection state onto its sprite. Runs
/// every frame whether or not anything is moving.
pub fn sync_piece_visuals(
    board: Res<Board>,
    mut visuals: Query<(&PieceVisual, &mut Transform, &mut Sprite)>,
) {
    let cell_size = board.config().cell_size;
    for (visual, mut transform, mut sprite) in &mut visuals {
        let Some(piece) = board.piece(visual.id) else {
            warn!("Visual for missing piece {}", visual.id);
            continue;
        };
        let world = to_world(piece.position(), cell_size);
        transform.translation = world.extend(transform.translation.z);
        sprite.color = kind_color(piece.kind(), piece.is_selected());
    }
}

/// The cursor sprite follows the free cursor and hides while a piece is
/// grabbed, since the piece's selected color marks it instead.
pub fn sync_cursor_visual(
    board: Res<Board>,
    mut cursor: Query<(&mut Transform, &mut Visibility), With<CursorVisual>>,
) {
    let cell_size = board.config().cell_size;
    for (mut transform, mut visibility) in &mut cursor {
        match board.selection().free_motion() {
            Some(motion) => {
                let world = to_world(motion.position(), cell_size);
                transform.translation = world.extend(transform.translation.z);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
