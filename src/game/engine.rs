use super::{
    ColorIndex, Grid, Piece, PieceFactory, RandomPieceFactory, TickScheduler, GRID_HEIGHT,
    GRID_WIDTH, SCORE_PER_LINE,
};
use crate::config::GameConfig;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Falling,
    Paused,
    GameOver,
}

/// Discrete player requests, one per key press.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
}

/// Outcome of a one-row descent attempt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Descent {
    Moved,
    Locked,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceSpawned,
    PieceMoved,
    PieceRotated,
    PieceLocked,
    LinesCleared(u32),
    Paused,
    Unpaused,
    GameRestarted,
    GameOver,
}

// ============================================================================
// Engine
// ============================================================================

pub struct GameEngine {
    grid: Grid,
    current_piece: Piece,
    next_piece: Piece,
    score: u32,
    lines_cleared: u32,
    state: GameState,
    scheduler: TickScheduler,
    piece_factory: Box<dyn PieceFactory>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    pub fn new() -> Self {
        Self::with_factory(Box::new(RandomPieceFactory::new()))
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let factory: Box<dyn PieceFactory> = match config.seed {
            Some(seed) => Box::new(RandomPieceFactory::seeded(seed)),
            None => Box::new(RandomPieceFactory::new()),
        };
        let mut engine = Self::with_factory(factory);
        engine.scheduler = TickScheduler::new(config.fall_interval);
        engine
    }

    pub fn with_factory(mut factory: Box<dyn PieceFactory>) -> Self {
        let current_piece = draw(factory.as_mut());
        Self::with_parts(Grid::new(), current_piece, factory)
    }

    /// Starts from a prepared board and active piece with random follow-ups.
    pub fn with_grid(grid: Grid, current_piece: Piece) -> Self {
        Self::with_parts(grid, current_piece, Box::new(RandomPieceFactory::new()))
    }

    pub fn with_parts(grid: Grid, current_piece: Piece, mut factory: Box<dyn PieceFactory>) -> Self {
        let next_piece = draw(factory.as_mut());

        let engine = Self {
            grid,
            current_piece,
            next_piece,
            score: 0,
            lines_cleared: 0,
            state: GameState::Falling,
            scheduler: TickScheduler::default(),
            piece_factory: factory,
            events: Vec::new(),
        };
        debug_assert!(
            engine.is_valid_position(&engine.current_piece),
            "starting piece collides with the board: {:?}",
            engine.current_piece.position
        );
        engine
    }

    // ------------------------------------------------------------------------
    // Collision
    // ------------------------------------------------------------------------

    /// True when every occupied cell of `piece` is on the board and free.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.blocks().iter().all(|block| {
            self.grid.in_bounds(block.x, block.y)
                && !self.grid.is_occupied(block.x as usize, block.y as usize)
        })
    }

    fn try_replace(&mut self, candidate: Piece, event: GameEvent) -> bool {
        if self.state != GameState::Falling || !self.is_valid_position(&candidate) {
            return false;
        }
        self.current_piece = candidate;
        self.events.push(event);
        true
    }

    // ------------------------------------------------------------------------
    // Player intents
    // ------------------------------------------------------------------------

    pub fn move_left(&mut self) -> bool {
        self.try_replace(self.current_piece.moved(-1, 0), GameEvent::PieceMoved)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_replace(self.current_piece.moved(1, 0), GameEvent::PieceMoved)
    }

    /// Rotates clockwise in place. A colliding rotation is rejected outright.
    pub fn rotate(&mut self) -> bool {
        self.try_replace(self.current_piece.rotated(), GameEvent::PieceRotated)
    }

    pub fn soft_drop(&mut self) -> Option<Descent> {
        self.descend()
    }

    pub fn gravity_tick(&mut self) -> Option<Descent> {
        self.descend()
    }

    /// Returns true if the intent moved, rotated or locked the piece.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_left(),
            Intent::MoveRight => self.move_right(),
            Intent::Rotate => self.rotate(),
            Intent::SoftDrop => self.soft_drop().is_some(),
        }
    }

    /// One simulation frame: intents first, then gravity if the scheduler fires.
    pub fn step(&mut self, intents: &[Intent]) {
        if self.state == GameState::GameOver {
            return;
        }
        for &intent in intents {
            self.apply(intent);
        }
        if self.scheduler.advance() {
            self.gravity_tick();
        }
    }

    // ------------------------------------------------------------------------
    // Falling, locking, spawning
    // ------------------------------------------------------------------------

    fn descend(&mut self) -> Option<Descent> {
        if self.state != GameState::Falling {
            return None;
        }
        if self.try_replace(self.current_piece.moved(0, 1), GameEvent::PieceMoved) {
            Some(Descent::Moved)
        } else {
            self.lock_and_spawn();
            Some(Descent::Locked)
        }
    }

    fn lock_piece(&mut self) {
        let cells = self
            .current_piece
            .blocks()
            .into_iter()
            .map(|block| (block.x as usize, block.y as usize));
        self.grid.lock(cells, self.current_piece.color);
        self.events.push(GameEvent::PieceLocked);
    }

    fn lock_and_spawn(&mut self) {
        self.lock_piece();
        let lines = self.grid.clear_full_rows();
        if lines > 0 {
            self.add_score(lines);
            self.events.push(GameEvent::LinesCleared(lines));
        }
        self.spawn_next_piece();
    }

    fn add_score(&mut self, lines: u32) {
        self.score += SCORE_PER_LINE * lines;
        self.lines_cleared += lines;
    }

    /// Promotes the queued piece and draws a new one. Ends the game when the
    /// promoted piece overlaps the stack.
    fn spawn_next_piece(&mut self) {
        let next = draw(self.piece_factory.as_mut());
        self.current_piece = std::mem::replace(&mut self.next_piece, next);

        if self.is_valid_position(&self.current_piece) {
            self.events.push(GameEvent::PieceSpawned);
        } else {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
        }
    }

    // ------------------------------------------------------------------------
    // Session control
    // ------------------------------------------------------------------------

    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Falling => {
                self.state = GameState::Paused;
                self.events.push(GameEvent::Paused);
            }
            GameState::Paused => {
                self.state = GameState::Falling;
                self.events.push(GameEvent::Unpaused);
            }
            GameState::GameOver => {}
        }
    }

    /// Starts a fresh run. The frame counter keeps counting.
    pub fn restart(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.state = GameState::Falling;
        self.events.clear();

        self.current_piece = draw(self.piece_factory.as_mut());
        self.next_piece = draw(self.piece_factory.as_mut());

        self.events.push(GameEvent::GameRestarted);
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn frame(&self) -> u64 {
        self.scheduler.frame()
    }

    /// Locked cells with the active piece drawn on top.
    pub fn render_grid(&self) -> [[Option<ColorIndex>; GRID_WIDTH]; GRID_HEIGHT] {
        let mut visual = [[None; GRID_WIDTH]; GRID_HEIGHT];
        for (row, cells) in visual.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.grid.cell(col, row);
            }
        }

        for block in self.current_piece.blocks() {
            if self.grid.in_bounds(block.x, block.y) {
                visual[block.y as usize][block.x as usize] = Some(self.current_piece.color);
            }
        }

        visual
    }

    /// Takes and clears all pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn draw(factory: &mut dyn PieceFactory) -> Piece {
    let (kind, color) = factory.next();
    Piece::spawn(kind, color)
}
