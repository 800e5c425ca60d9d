pub mod enemy;

use std::{
    fmt,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::{
    action::Action,
    constants::{MAX_HITS, NUM_ENEMIES, PATH_LENGTH, PATH_WIDTH, RAMP_PERIOD},
    ui::{scene, Canvas},
};
use enemy::EnemyPool;

/// Screen geometry. The path is centered horizontally and sits on the
/// bottom of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub cols: i32,
    pub lines: i32,
}

impl From<(u16, u16)> for Field {
    fn from((cols, lines): (u16, u16)) -> Self {
        Self { cols: cols as i32, lines: lines as i32 }
    }
}

impl Field {
    /// Column of the left boundary marker.
    pub fn side_edge(&self) -> i32 {
        (self.cols - PATH_WIDTH) / 2
    }

    /// Column of the right boundary marker.
    pub fn right_edge(&self) -> i32 {
        self.cols - self.side_edge()
    }

    /// First row of the path, where new enemies appear.
    pub fn top_edge(&self) -> i32 {
        self.lines - PATH_LENGTH
    }

    pub fn bottom(&self) -> i32 {
        self.lines - 1
    }

    pub fn bike_row(&self) -> i32 {
        self.lines - 2
    }

    /// Leftmost and rightmost columns the bike may occupy.
    pub fn bike_bounds(&self) -> (i32, i32) {
        (self.side_edge() + 1, self.cols - 1 - self.side_edge())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bike {
    pub x: i32,
    pub y: i32,
    pub hits: u32,
}

impl Bike {
    pub fn new(field: &Field) -> Self {
        Self { x: field.cols / 2, y: field.bike_row(), hits: 0 }
    }

    /// Moves one cell left or right, never onto the boundary markers.
    pub fn steer(&mut self, action: Action, field: &Field) {
        let (min, max) = field.bike_bounds();
        match action {
            Action::Left if self.x > min => self.x -= 1,
            Action::Right if self.x < max => self.x += 1,
            _ => {},
        }
    }

    /// Keeps the bike on its row and inside the path after a resize.
    fn fit(&mut self, field: &Field) {
        let (min, max) = field.bike_bounds();
        self.x = self.x.clamp(min, max);
        self.y = field.bike_row();
    }
}

/// End of game report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Time from the start of the ride until the game ended.
    pub survived: Duration,
    /// Time from the start of the ride until the first hit.
    pub flawless: Duration,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GAME OVER -- You lasted {} seconds.", self.survived.as_secs())?;
        write!(f, "Flawless riding for {} seconds.", self.flawless.as_secs())
    }
}

/// Everything that lives for one ride.
pub struct Session {
    pub bike: Bike,
    pub enemies: EnemyPool,
    field: Field,
    rng: StdRng,
    started: Instant,
    first_hit: Option<Instant>,
    ramps: u64,
    done: bool,
}

impl Session {
    pub fn new(field: Field, rng: StdRng, now: Instant) -> Self {
        Self {
            bike: Bike::new(&field),
            enemies: EnemyPool::new(NUM_ENEMIES),
            field,
            rng,
            started: now,
            first_hit: None,
            ramps: 0,
            done: false,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Scatters the first enemies over the upper half of the path.
    pub fn prefill(&mut self) {
        let placed = self.enemies.spawn(&self.field, true, &mut self.rng);
        info!(placed, "path seeded with enemies");
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Left | Action::Right => self.bike.steer(action, &self.field),
            Action::Quit => {
                info!("ride abandoned");
                self.done = true;
            },
            Action::Start => {},
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.done
    }

    pub fn is_over(&self) -> bool {
        self.bike.hits >= MAX_HITS
    }

    /// Runs one frame: spawn, fall, collide, and draw it all.
    pub fn tick<C: Canvas>(&mut self, canvas: &mut C, now: Instant) -> Result<()> {
        canvas.clear();
        let field = Field::from(canvas.size());
        if field != self.field {
            debug!(?field, "screen resized");
            self.field = field;
            self.bike.fit(&field);
        }

        scene::draw_path(canvas, &self.field);
        self.enemies.spawn(&self.field, false, &mut self.rng);
        self.enemies.advance();
        scene::draw_enemies(canvas, &self.enemies);
        let freed = self.enemies.prune(&self.field);
        if freed > 0 {
            trace!(freed, "enemies left the screen");
        }
        scene::draw_bike(canvas, &self.bike);
        self.detect_collisions(now);
        scene::draw_status(canvas, &self.field, &self.bike);
        canvas.present()
    }

    fn detect_collisions(&mut self, now: Instant) {
        let hits = self.enemies.collide(self.bike.x, self.bike.y);
        if hits == 0 {
            return;
        }
        self.bike.hits += hits;
        if self.first_hit.is_none() {
            self.first_hit = Some(now);
        }
        info!(hits = self.bike.hits, x = self.bike.x, "bike hit an obstacle");
    }

    /// Speeds enemies up once for every [`RAMP_PERIOD`] of riding.
    pub fn ramp(&mut self, now: Instant) {
        let due = (now.saturating_duration_since(self.started).as_secs() / RAMP_PERIOD.as_secs()).max(self.ramps);
        while self.ramps < due {
            self.ramps += 1;
            if !self.enemies.quicken() {
                // already at full speed, nothing left to catch up on
                self.ramps = due;
            }
        }
    }

    pub fn summary(&self, now: Instant) -> Summary {
        let survived = now.saturating_duration_since(self.started);
        let flawless = self.first_hit.map_or(survived, |hit| hit.saturating_duration_since(self.started));
        Summary { survived, flawless }
    }
}
